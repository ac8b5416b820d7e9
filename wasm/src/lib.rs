use serde::Deserialize;
use wasm_bindgen::prelude::*;
use wordcloud_rs_renderer::layout_dump::LayoutDump;
use wordcloud_rs_renderer::render::{render_svg_with_rotations, word_rotations};
use wordcloud_rs_renderer::{RenderOptions, layout_with_options};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = Math, js_name = random)]
    fn math_random() -> f64;
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WordCloudRenderOptions {
    theme: Option<String>,
    font_family: Option<String>,
    text_color: Option<String>,
    width: Option<f32>,
    height: Option<f32>,
    seed: Option<u64>,
}

fn build_render_options(options: WordCloudRenderOptions, fallback_seed: u64) -> RenderOptions {
    let mut render_options = if options.theme.as_deref() == Some("modern") {
        RenderOptions::modern()
    } else {
        RenderOptions::classic()
    };

    if let Some(font_family) = options.font_family {
        render_options.theme.font_family = font_family;
    }
    if let Some(text_color) = options.text_color {
        render_options.theme.text_color = text_color;
    }
    if let Some(width) = options.width {
        render_options.render.width = width;
    }
    if let Some(height) = options.height {
        render_options.render.height = height;
    }

    // The wall clock is unavailable here, so an unseeded call takes its seed
    // from the host.
    render_options.with_seed(options.seed.unwrap_or(fallback_seed))
}

fn parse_options(options_json: Option<String>) -> Result<WordCloudRenderOptions, JsValue> {
    match options_json {
        Some(raw_options) => serde_json::from_str::<WordCloudRenderOptions>(&raw_options)
            .map_err(|error| JsValue::from_str(&error.to_string())),
        None => Ok(WordCloudRenderOptions::default()),
    }
}

fn host_seed() -> u64 {
    (math_random() * (1u64 << 53) as f64) as u64
}

fn render(words: &str, options: RenderOptions) -> Result<(String, String), String> {
    let (layout, config) = layout_with_options(words, &options).map_err(|error| error.to_string())?;
    let mut rng = options.decoration_rng();
    let rotations = word_rotations(layout.words.len(), &config.theme, &mut rng);
    let svg = render_svg_with_rotations(&layout, &config.theme, &rotations);
    let json = LayoutDump::from_layout(&layout, Some(rotations.as_slice()))
        .to_json()
        .map_err(|error| error.to_string())?;
    Ok((svg, json))
}

/// Renders a word list (text lines or a JSON array) to SVG.
#[wasm_bindgen]
pub fn render_word_cloud_svg(words: &str, options_json: Option<String>) -> Result<String, JsValue> {
    let options = build_render_options(parse_options(options_json)?, host_seed());
    render(words, options)
        .map(|(svg, _)| svg)
        .map_err(|error| JsValue::from_str(&error))
}

/// Lays out a word list and returns the placed words as JSON, for DOM or
/// canvas rendering on the JS side.
#[wasm_bindgen]
pub fn layout_word_cloud(words: &str, options_json: Option<String>) -> Result<String, JsValue> {
    let options = build_render_options(parse_options(options_json)?, host_seed());
    render(words, options)
        .map(|(_, json)| json)
        .map_err(|error| JsValue::from_str(&error))
}

#[cfg(test)]
mod tests {
    use crate::{WordCloudRenderOptions, build_render_options, render};
    use wordcloud_rs_renderer::render_with_options;

    #[test]
    fn renders_weighted_json_words() {
        let words = r#"[{"text": "rust", "weight": 9}, {"text": "wasm", "weight": 3}, "bindgen"]"#;
        let options = build_render_options(WordCloudRenderOptions::default(), 11);
        let (svg, json) = render(words, options).expect("word list should render");

        assert!(svg.contains("<svg"));
        assert!(svg.contains(">rust</text>"));
        assert!(svg.contains(">bindgen</text>"));
        assert!(json.contains("\"fontSize\""));
    }

    #[test]
    fn svg_matches_the_library_renderer() {
        let words = "rust: 9\nwasm: 3";
        let options = build_render_options(WordCloudRenderOptions::default(), 5);
        let (svg, _) = render(words, options.clone()).expect("word list should render");
        assert_eq!(svg, render_with_options(words, options).unwrap());
    }

    #[test]
    fn explicit_seed_wins_over_host_seed() {
        let options = WordCloudRenderOptions {
            seed: Some(4),
            theme: Some("modern".to_string()),
            ..Default::default()
        };
        let render_options = build_render_options(options, 99);
        assert_eq!(render_options.seed, Some(4));
        assert_eq!(render_options.theme.text_color, "#1C2430");
    }
}
