use crate::config::RenderConfig;
use crate::layout::{FontWeight, Layout, PlacedWord};
use crate::random::RandomSource;
use crate::theme::Theme;
use anyhow::Result;
use std::path::Path;

/// Render-time tilt for each word, uniform in `[-max_rotation, max_rotation)`
/// degrees. Has no effect on layout geometry.
pub fn word_rotations<R: RandomSource>(count: usize, theme: &Theme, rng: &mut R) -> Vec<f32> {
    let amplitude = if theme.max_rotation.is_finite() {
        theme.max_rotation.abs()
    } else {
        0.0
    };
    (0..count)
        .map(|_| rng.range_f32(-amplitude, amplitude))
        .collect()
}

pub fn render_svg<R: RandomSource>(layout: &Layout, theme: &Theme, rng: &mut R) -> String {
    let rotations = word_rotations(layout.words.len(), theme, rng);
    render_svg_with_rotations(layout, theme, &rotations)
}

/// Renders with explicit per-word rotations. Missing entries render upright.
pub fn render_svg_with_rotations(layout: &Layout, theme: &Theme, rotations: &[f32]) -> String {
    let mut svg = String::new();
    let width = layout.width.max(1.0);
    let height = layout.height.max(1.0);

    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">",
    ));

    svg.push_str("<defs>");
    svg.push_str(&format!(
        "<linearGradient id=\"wordcloud-bg\" x1=\"0\" y1=\"0\" x2=\"1\" y2=\"1\"><stop offset=\"0\" stop-color=\"{}\"/><stop offset=\"1\" stop-color=\"{}\"/></linearGradient>",
        escape_xml(&theme.background_from),
        escape_xml(&theme.background_to)
    ));
    svg.push_str(&format!(
        "<clipPath id=\"wordcloud-clip\"><rect x=\"0\" y=\"0\" width=\"{width}\" height=\"{height}\"/></clipPath>",
    ));
    svg.push_str("</defs>");

    svg.push_str("<rect width=\"100%\" height=\"100%\" fill=\"url(#wordcloud-bg)\"/>");
    svg.push_str("<g clip-path=\"url(#wordcloud-clip)\">");

    for (idx, word) in layout.words.iter().enumerate() {
        let rotation = rotations.get(idx).copied().unwrap_or(0.0);
        svg.push_str(&word_svg(word, theme, rotation));
    }

    svg.push_str("</g>");
    svg.push_str("</svg>");
    svg
}

fn word_svg(word: &PlacedWord, theme: &Theme, rotation: f32) -> String {
    let font_weight = match word.font_weight {
        FontWeight::Normal => theme.normal_font_weight.as_str(),
        FontWeight::Bold => theme.bold_font_weight.as_str(),
    };
    let transform = if rotation != 0.0 {
        // Tilt around the box centre, like a CSS rotate().
        let cx = word.x + word.width / 2.0;
        let cy = word.y + word.height / 2.0;
        format!(" transform=\"rotate({rotation:.3} {cx:.2} {cy:.2})\"")
    } else {
        String::new()
    };
    format!(
        "<text x=\"{:.2}\" y=\"{:.2}\" dominant-baseline=\"hanging\" font-family=\"{}\" font-size=\"{:.2}\" font-weight=\"{}\" fill=\"{}\" opacity=\"{:.3}\"{}>{}</text>",
        word.x,
        word.y,
        escape_xml(&theme.font_family),
        word.font_size,
        escape_xml(font_weight),
        escape_xml(&theme.text_color),
        word.opacity,
        transform,
        escape_xml(&word.text)
    )
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
pub fn write_output_png(svg: &str, output: &Path, render_cfg: &RenderConfig, theme: &Theme) -> Result<()> {
    let mut opt = usvg::Options::default();
    opt.font_family = primary_font_family(&theme.font_family);
    opt.fontdb_mut().load_system_fonts();
    opt.default_size = usvg::Size::from_wh(render_cfg.width.max(1.0), render_cfg.height.max(1.0))
        .ok_or_else(|| anyhow::anyhow!("Invalid canvas size"))?;

    let tree = usvg::Tree::from_str(svg, &opt)?;
    let size = tree.size().to_int_size();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate pixmap"))?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap_mut);
    pixmap.save_png(output)?;
    Ok(())
}

#[cfg(not(feature = "png"))]
pub fn write_output_png(_svg: &str, _output: &Path, _render_cfg: &RenderConfig, _theme: &Theme) -> Result<()> {
    Err(anyhow::anyhow!("PNG output requires the `png` feature"))
}

/// First entry of a CSS font-family list, unquoted.
#[cfg_attr(not(feature = "png"), allow(dead_code))]
fn primary_font_family(list: &str) -> String {
    list.split(',')
        .map(|family| family.trim().trim_matches(|c| c == '"' || c == '\''))
        .find(|family| !family.is_empty())
        .unwrap_or("sans-serif")
        .to_string()
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
