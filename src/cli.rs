use crate::config::{Config, load_config, merge_init_config};
use crate::ir::{WordInput, sample_words};
use crate::layout::compute_layout;
use crate::layout_dump::{LayoutDump, write_layout_dump};
use crate::parser::parse_words;
use crate::random::{RandomSource, SeededRng};
use crate::render::{render_svg_with_rotations, word_rotations, write_output_png, write_output_svg};
use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "wcr", version, about = "Weighted word cloud renderer")]
pub struct Args {
    /// Input word list (text lines or JSON array), markdown with ```wordcloud blocks, or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file (svg/png/json). Defaults to stdout for SVG and JSON if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "svg")]
    pub output_format: OutputFormat,

    /// Config JSON file
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Canvas width in pixels
    #[arg(short = 'w', long = "width")]
    pub width: Option<f32>,

    /// Canvas height in pixels
    #[arg(short = 'H', long = "height")]
    pub height: Option<f32>,

    /// Seed for a reproducible layout
    #[arg(short = 's', long = "seed")]
    pub seed: Option<u64>,

    /// Render the bundled sample word list instead of reading input
    #[arg(long = "sample")]
    pub sample: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum OutputFormat {
    Svg,
    Png,
    Json,
}

impl OutputFormat {
    fn extension(self) -> &'static str {
        match self {
            OutputFormat::Svg => "svg",
            OutputFormat::Png => "png",
            OutputFormat::Json => "json",
        }
    }
}

pub fn run() -> Result<()> {
    init_tracing();
    let args = Args::parse();
    let mut base_config = load_config(args.config.as_deref())?;
    if let Some(width) = args.width {
        base_config.render.width = width;
    }
    if let Some(height) = args.height {
        base_config.render.height = height;
    }

    if args.sample {
        let output = args.output.as_deref();
        let mut rng = make_rng(args.seed, 0);
        return render_document(&sample_words(), &base_config, args.output_format, output, &mut rng);
    }

    let (input, is_markdown) = read_input(args.input.as_deref())?;
    let documents = if is_markdown {
        extract_wordcloud_blocks(&input)
    } else {
        vec![input]
    };

    if documents.is_empty() {
        return Err(anyhow::anyhow!("No wordcloud blocks found in input"));
    }

    let outputs = if documents.len() == 1 {
        vec![args.output.clone()]
    } else {
        resolve_multi_outputs(args.output.as_deref(), args.output_format, documents.len())?
            .into_iter()
            .map(Some)
            .collect()
    };

    for (idx, document) in documents.iter().enumerate() {
        let parsed = parse_words(document)?;
        let mut config = base_config.clone();
        if let Some(init_cfg) = parsed.init_config {
            config = merge_init_config(config, init_cfg);
        }
        let mut rng = make_rng(args.seed, idx as u64);
        render_document(
            &parsed.words,
            &config,
            args.output_format,
            outputs[idx].as_deref(),
            &mut rng,
        )?;
    }

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    // Keep any subscriber the embedding process already installed.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn make_rng(seed: Option<u64>, offset: u64) -> SeededRng {
    match seed {
        Some(seed) => SeededRng::new(seed.wrapping_add(offset)),
        None => SeededRng::from_entropy(),
    }
}

fn render_document<R: RandomSource>(
    words: &[WordInput],
    config: &Config,
    format: OutputFormat,
    output: Option<&Path>,
    rng: &mut R,
) -> Result<()> {
    let layout = compute_layout(
        words,
        config.render.width,
        config.render.height,
        &config.layout,
        rng,
    );
    let rotations = word_rotations(layout.words.len(), &config.theme, rng);
    info!(
        words = layout.words.len(),
        fallbacks = layout.stats.fallbacks,
        "rendering word cloud"
    );

    match format {
        OutputFormat::Svg => {
            let svg = render_svg_with_rotations(&layout, &config.theme, &rotations);
            write_output_svg(&svg, output)?;
        }
        OutputFormat::Png => {
            let output = ensure_output(output, "png")?;
            let svg = render_svg_with_rotations(&layout, &config.theme, &rotations);
            write_output_png(&svg, output, &config.render, &config.theme)?;
        }
        OutputFormat::Json => match output {
            Some(path) => write_layout_dump(path, &layout, Some(rotations.as_slice()))?,
            None => println!(
                "{}",
                LayoutDump::from_layout(&layout, Some(rotations.as_slice())).to_json()?
            ),
        },
    }
    Ok(())
}

/// Reads the word list from `path`, or stdin for `None` and `-`. The flag
/// marks markdown files whose fenced blocks each hold one word list.
fn read_input(path: Option<&Path>) -> Result<(String, bool)> {
    match path {
        Some(path) if path != Path::new("-") => {
            let content = std::fs::read_to_string(path)?;
            let is_markdown = matches!(
                path.extension().and_then(|ext| ext.to_str()),
                Some("md" | "markdown")
            );
            Ok((content, is_markdown))
        }
        _ => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok((buf, false))
        }
    }
}

fn ensure_output<'a>(output: Option<&'a Path>, ext: &str) -> Result<&'a Path> {
    output.ok_or_else(|| anyhow::anyhow!("Output path required for {} output", ext))
}

fn extract_wordcloud_blocks(input: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    // Open fence marker and the lines collected under it.
    let mut open: Option<(&'static str, Vec<&str>)> = None;

    for line in input.lines() {
        let trimmed = line.trim();
        match open.as_mut() {
            None => open = wordcloud_fence(trimmed).map(|marker| (marker, Vec::new())),
            Some((marker, body)) => {
                if closes_fence(trimmed, marker) {
                    blocks.push(body.join("\n"));
                    open = None;
                } else {
                    body.push(line);
                }
            }
        }
    }

    blocks
}

fn wordcloud_fence(line: &str) -> Option<&'static str> {
    ["```", "~~~"].into_iter().find(|marker| {
        line.strip_prefix(marker)
            .map(|info| info.trim_start().starts_with("wordcloud"))
            .unwrap_or(false)
    })
}

fn closes_fence(line: &str, marker: &str) -> bool {
    line.strip_prefix(marker)
        .map(|rest| rest.trim().is_empty())
        .unwrap_or(false)
}

fn resolve_multi_outputs(
    output: Option<&Path>,
    format: OutputFormat,
    count: usize,
) -> Result<Vec<PathBuf>> {
    let ext = format.extension();
    let base = output.ok_or_else(|| anyhow::anyhow!("Output path required for markdown input"))?;
    if base.is_dir() {
        return Ok((0..count)
            .map(|idx| base.join(format!("wordcloud-{}.{}", idx + 1, ext)))
            .collect());
    }
    let stem = base.file_stem().and_then(|s| s.to_str()).unwrap_or("wordcloud");
    let parent = base.parent().unwrap_or_else(|| Path::new("."));
    Ok((0..count)
        .map(|idx| parent.join(format!("{}-{}.{}", stem, idx + 1, ext)))
        .collect())
}
