use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub font_family: String,
    pub text_color: String,
    /// Diagonal background gradient, top-left to bottom-right. Equal stops
    /// give a solid fill.
    pub background_from: String,
    pub background_to: String,
    /// Labels are tilted by a uniform angle in `[-max_rotation, max_rotation]`
    /// degrees at render time.
    pub max_rotation: f32,
    pub normal_font_weight: String,
    pub bold_font_weight: String,
}

impl Theme {
    pub fn classic() -> Self {
        Self {
            font_family: "ui-sans-serif, system-ui, sans-serif".to_string(),
            text_color: "#333".to_string(),
            background_from: "#F9FAFB".to_string(),
            background_to: "#F3F4F6".to_string(),
            max_rotation: 2.0,
            normal_font_weight: "400".to_string(),
            bold_font_weight: "600".to_string(),
        }
    }

    pub fn modern() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            text_color: "#1C2430".to_string(),
            background_from: "#F8FAFF".to_string(),
            background_to: "#EEF2F8".to_string(),
            max_rotation: 2.0,
            normal_font_weight: "400".to_string(),
            bold_font_weight: "700".to_string(),
        }
    }

    pub fn by_name(name: &str) -> Option<Self> {
        match name {
            "classic" | "default" | "base" => Some(Self::classic()),
            "modern" => Some(Self::modern()),
            _ => None,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::classic()
    }
}
