use crate::layout::{Layout, LayoutStats, PlacedWord};
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Serializable snapshot of a layout, for renderers outside this crate.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutDump {
    pub width: f32,
    pub height: f32,
    pub words: Vec<WordDump>,
    pub stats: LayoutStats,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WordDump {
    #[serde(flatten)]
    pub word: PlacedWord,
    /// Degrees; present when decorations were drawn.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f32>,
}

impl LayoutDump {
    pub fn from_layout(layout: &Layout, rotations: Option<&[f32]>) -> Self {
        let words = layout
            .words
            .iter()
            .enumerate()
            .map(|(idx, word)| WordDump {
                word: word.clone(),
                rotation: rotations.and_then(|r| r.get(idx).copied()),
            })
            .collect();

        LayoutDump {
            width: layout.width,
            height: layout.height,
            words,
            stats: layout.stats,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

pub fn write_layout_dump(path: &Path, layout: &Layout, rotations: Option<&[f32]>) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let dump = LayoutDump::from_layout(layout, rotations);
    serde_json::to_writer_pretty(writer, &dump)?;
    Ok(())
}
