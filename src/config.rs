use crate::theme::Theme;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub min_font_size: f32,
    pub max_font_size: f32,
    /// Candidate positions tried per word before the best-effort fallback.
    pub max_attempts: usize,
    /// Estimated glyph advance as a fraction of the font size.
    pub char_width_ratio: f32,
    pub min_opacity: f32,
    pub max_opacity: f32,
    pub fallback_weight_min: u32,
    pub fallback_weight_max: u32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            min_font_size: 14.0,
            max_font_size: 48.0,
            max_attempts: 100,
            char_width_ratio: 0.6,
            min_opacity: 0.7,
            max_opacity: 1.0,
            fallback_weight_min: 1,
            fallback_weight_max: 10,
        }
    }
}

impl LayoutConfig {
    /// Midpoint of the font range. Words strictly above it are bold, and
    /// every word gets this size when all weights are equal.
    pub fn mid_font_size(&self) -> f32 {
        (self.min_font_size + self.max_font_size) / 2.0
    }

    /// Returns a copy with inconsistent values repaired.
    pub fn sanitized(&self) -> Self {
        let defaults = Self::default();
        let mut out = self.clone();

        if !out.min_font_size.is_finite() || out.min_font_size <= 0.0 {
            warn!(value = out.min_font_size, "invalid min_font_size, using default");
            out.min_font_size = defaults.min_font_size;
        }
        if !out.max_font_size.is_finite() || out.max_font_size <= 0.0 {
            warn!(value = out.max_font_size, "invalid max_font_size, using default");
            out.max_font_size = defaults.max_font_size;
        }
        if out.min_font_size > out.max_font_size {
            warn!(
                min = out.min_font_size,
                max = out.max_font_size,
                "font size range inverted, swapping"
            );
            std::mem::swap(&mut out.min_font_size, &mut out.max_font_size);
        }
        if out.max_attempts == 0 {
            warn!("max_attempts is zero, using 1");
            out.max_attempts = 1;
        }
        if !out.char_width_ratio.is_finite() || out.char_width_ratio <= 0.0 {
            warn!(value = out.char_width_ratio, "invalid char_width_ratio, using default");
            out.char_width_ratio = defaults.char_width_ratio;
        }
        if !out.min_opacity.is_finite() || !out.max_opacity.is_finite() {
            warn!("non-finite opacity range, using defaults");
            out.min_opacity = defaults.min_opacity;
            out.max_opacity = defaults.max_opacity;
        }
        out.min_opacity = out.min_opacity.clamp(0.0, 1.0);
        out.max_opacity = out.max_opacity.clamp(0.0, 1.0);
        if out.min_opacity > out.max_opacity {
            warn!(
                min = out.min_opacity,
                max = out.max_opacity,
                "opacity range inverted, swapping"
            );
            std::mem::swap(&mut out.min_opacity, &mut out.max_opacity);
        }
        if out.fallback_weight_min > out.fallback_weight_max {
            warn!(
                min = out.fallback_weight_min,
                max = out.fallback_weight_max,
                "fallback weight range inverted, swapping"
            );
            std::mem::swap(&mut out.fallback_weight_min, &mut out.fallback_weight_max);
        }
        if out.fallback_weight_min == 0 {
            warn!("fallback_weight_min must be positive, using 1");
            out.fallback_weight_min = 1;
            out.fallback_weight_max = out.fallback_weight_max.max(1);
        }
        out
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 500.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub theme: Theme,
    pub layout: LayoutConfig,
    pub render: RenderConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: Theme::classic(),
            layout: LayoutConfig::default(),
            render: RenderConfig::default(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThemeVariables {
    font_family: Option<String>,
    text_color: Option<String>,
    background: Option<String>,
    background_from: Option<String>,
    background_to: Option<String>,
    max_rotation: Option<f32>,
}

/// Numeric config values may arrive as numbers or strings, and integers may
/// arrive as floats when the source was JSON5.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f32),
    String(String),
}

impl NumberOrString {
    fn as_f32(&self) -> Option<f32> {
        match self {
            NumberOrString::Number(val) => Some(*val),
            NumberOrString::String(val) => val.trim().parse::<f32>().ok(),
        }
    }

    fn as_count(&self) -> Option<u32> {
        self.as_f32()
            .filter(|v| v.is_finite() && *v >= 0.0)
            .map(|v| v.round() as u32)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LayoutConfigFile {
    min_font_size: Option<NumberOrString>,
    max_font_size: Option<NumberOrString>,
    max_attempts: Option<NumberOrString>,
    char_width_ratio: Option<NumberOrString>,
    min_opacity: Option<NumberOrString>,
    max_opacity: Option<NumberOrString>,
    fallback_weight_min: Option<NumberOrString>,
    fallback_weight_max: Option<NumberOrString>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    theme_variables: Option<ThemeVariables>,
    layout: Option<LayoutConfigFile>,
    width: Option<f32>,
    height: Option<f32>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let config = Config::default();
    let Some(path) = path else {
        return Ok(config);
    };

    let contents = std::fs::read_to_string(path)?;
    let parsed: ConfigFile = serde_json::from_str(&contents)?;
    Ok(apply_config_file(config, parsed))
}

/// Applies a `%%{init: {...}}%%` object on top of `config`. Unknown keys are
/// ignored; an object that does not deserialize leaves `config` untouched.
pub fn merge_init_config(config: Config, init: serde_json::Value) -> Config {
    match serde_json::from_value::<ConfigFile>(init) {
        Ok(parsed) => apply_config_file(config, parsed),
        Err(err) => {
            warn!(error = %err, "ignoring malformed init directive");
            config
        }
    }
}

fn apply_config_file(mut config: Config, parsed: ConfigFile) -> Config {
    if let Some(theme_name) = parsed.theme.as_deref() {
        match Theme::by_name(theme_name) {
            Some(theme) => config.theme = theme,
            None => warn!(theme = theme_name, "unknown theme name"),
        }
    }

    if let Some(vars) = parsed.theme_variables {
        if let Some(v) = vars.font_family {
            config.theme.font_family = v;
        }
        if let Some(v) = vars.text_color {
            config.theme.text_color = v;
        }
        if let Some(v) = vars.background {
            config.theme.background_from = v.clone();
            config.theme.background_to = v;
        }
        if let Some(v) = vars.background_from {
            config.theme.background_from = v;
        }
        if let Some(v) = vars.background_to {
            config.theme.background_to = v;
        }
        if let Some(v) = vars.max_rotation {
            config.theme.max_rotation = v.abs();
        }
    }

    if let Some(layout) = parsed.layout {
        if let Some(v) = layout.min_font_size.as_ref().and_then(NumberOrString::as_f32) {
            config.layout.min_font_size = v;
        }
        if let Some(v) = layout.max_font_size.as_ref().and_then(NumberOrString::as_f32) {
            config.layout.max_font_size = v;
        }
        if let Some(v) = layout.max_attempts.as_ref().and_then(NumberOrString::as_count) {
            config.layout.max_attempts = v as usize;
        }
        if let Some(v) = layout.char_width_ratio.as_ref().and_then(NumberOrString::as_f32) {
            config.layout.char_width_ratio = v;
        }
        if let Some(v) = layout.min_opacity.as_ref().and_then(NumberOrString::as_f32) {
            config.layout.min_opacity = v;
        }
        if let Some(v) = layout.max_opacity.as_ref().and_then(NumberOrString::as_f32) {
            config.layout.max_opacity = v;
        }
        if let Some(v) = layout.fallback_weight_min.as_ref().and_then(NumberOrString::as_count) {
            config.layout.fallback_weight_min = v;
        }
        if let Some(v) = layout.fallback_weight_max.as_ref().and_then(NumberOrString::as_count) {
            config.layout.fallback_weight_max = v;
        }
    }

    if let Some(width) = parsed.width {
        config.render.width = width;
    }
    if let Some(height) = parsed.height {
        config.render.height = height;
    }

    config
}
