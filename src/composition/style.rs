use crate::foundation::color::Rgba8;

/// User-edited cover style, read fresh on every render.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StyleConfig {
    /// Fill color of the bottom and side bars.
    pub bar_color: Rgba8,
    /// Caption color.
    pub text_color: Rgba8,
    /// Caption text; trimmed before wrapping.
    pub caption: String,
    /// Whether the logo is drawn in the top-left corner.
    pub show_logo: bool,
}

impl StyleConfig {
    /// Caption as it is wrapped and drawn.
    pub fn trimmed_caption(&self) -> &str {
        self.caption.trim()
    }

    /// "Same as text": bars take the caption color.
    pub fn copy_text_color_to_bars(&mut self) {
        self.bar_color = self.text_color;
    }

    /// "Same as bars": caption takes the bar color.
    pub fn copy_bar_color_to_text(&mut self) {
        self.text_color = self.bar_color;
    }

    /// Parse a style preset from JSON.
    pub fn from_json_str(s: &str) -> crate::CoverResult<Self> {
        serde_json::from_str(s)
            .map_err(|e| crate::CoverError::validation(format!("invalid style JSON: {e}")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composition/style.rs"]
mod tests;
