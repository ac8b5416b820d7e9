use serde::{Deserialize, Serialize};

/// A word with its resolved weight, before any geometry is assigned.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedWord {
    pub text: String,
    pub weight: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    Normal,
    Bold,
}

impl FontWeight {
    pub fn as_str(self) -> &'static str {
        match self {
            FontWeight::Normal => "normal",
            FontWeight::Bold => "bold",
        }
    }
}

/// Size and emphasis derived from a word's weight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WordStyle {
    pub font_size: f32,
    pub opacity: f32,
    pub font_weight: FontWeight,
}

/// Axis-aligned box, top-left origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl BoundingBox {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Strict intersection; boxes that only share an edge do not overlap.
    pub fn overlaps(&self, other: &BoundingBox) -> bool {
        self.x < other.x + other.width
            && self.x + self.width > other.x
            && self.y < other.y + other.height
            && self.y + self.height > other.y
    }
}

/// A positioned, sized and styled label. `x`/`y` are the top-left corner of
/// the estimated bounding box in canvas pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedWord {
    pub text: String,
    pub weight: f64,
    pub x: f32,
    pub y: f32,
    pub font_size: f32,
    pub opacity: f32,
    pub font_weight: FontWeight,
    pub width: f32,
    pub height: f32,
}

impl PlacedWord {
    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::new(self.x, self.y, self.width, self.height)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutStats {
    /// Candidate positions drawn across all words.
    pub attempts: usize,
    /// Words accepted at their last candidate despite an overlap.
    pub fallbacks: usize,
}

#[derive(Debug, Clone)]
pub struct Layout {
    pub width: f32,
    pub height: f32,
    pub words: Vec<PlacedWord>,
    pub stats: LayoutStats,
}
