use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// PDF output configuration.
///
/// Page geometry is fixed to A4 portrait; what can be tuned is the font lookup,
/// the type sizes, and the footer text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PDF {
    /// Bundled font directory, checked before system font locations.
    /// Relative paths are resolved against the recipe root.
    #[serde(default = "default_font_dir")]
    pub font_dir: Option<PathBuf>,
    /// File name of the regular Unicode font face
    #[serde(default = "default_font_regular")]
    pub font_regular: String,
    /// File name of the bold Unicode font face
    #[serde(default = "default_font_bold")]
    pub font_bold: String,
    /// How long `fc-match` may run before the lookup is abandoned
    #[serde(default = "default_font_lookup_timeout")]
    pub font_lookup_timeout_secs: u64,
    /// Footer text, `{n}` is the page number and `{total}` the page count.
    /// An empty template disables footers.
    #[serde(default = "default_footer_template")]
    pub footer_template: String,
    #[serde(default = "default_font_size_title")]
    pub font_size_title_pt: f32,
    #[serde(default = "default_font_size_heading")]
    pub font_size_heading_pt: f32,
    #[serde(default = "default_font_size_subheading")]
    pub font_size_subheading_pt: f32,
    #[serde(default = "default_font_size_body")]
    pub font_size_body_pt: f32,
    #[serde(default = "default_font_size_label")]
    pub font_size_label_pt: f32,
    #[serde(default = "default_font_size_small")]
    pub font_size_small_pt: f32,
}

fn default_font_dir() -> Option<PathBuf> {
    Some(PathBuf::from("tools/fonts"))
}
fn default_font_regular() -> String {
    "DejaVuSans.ttf".to_string()
}
fn default_font_bold() -> String {
    "DejaVuSans-Bold.ttf".to_string()
}
fn default_font_lookup_timeout() -> u64 {
    5
}
fn default_footer_template() -> String {
    "Page {n}/{total}".to_string()
}
fn default_font_size_title() -> f32 {
    24.0
}
fn default_font_size_heading() -> f32 {
    13.0
}
fn default_font_size_subheading() -> f32 {
    12.0
}
fn default_font_size_body() -> f32 {
    10.0
}
fn default_font_size_label() -> f32 {
    9.0
}
fn default_font_size_small() -> f32 {
    8.0
}

impl Default for PDF {
    fn default() -> Self {
        PDF {
            font_dir: default_font_dir(),
            font_regular: default_font_regular(),
            font_bold: default_font_bold(),
            font_lookup_timeout_secs: default_font_lookup_timeout(),
            footer_template: default_footer_template(),
            font_size_title_pt: default_font_size_title(),
            font_size_heading_pt: default_font_size_heading(),
            font_size_subheading_pt: default_font_size_subheading(),
            font_size_body_pt: default_font_size_body(),
            font_size_label_pt: default_font_size_label(),
            font_size_small_pt: default_font_size_small(),
        }
    }
}

impl PDF {
    pub fn font_lookup_timeout(&self) -> Duration {
        Duration::from_secs(self.font_lookup_timeout_secs)
    }
}

/// Statistics from rendering a PDF, used for user feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderStats {
    /// Number of pages in the PDF
    pub page_count: usize,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn can_serialize_pdf() {
        let pdf = PDF::default();
        toml::to_string(&pdf).expect("can serialize PDF to TOML");
    }

    #[test]
    fn partial_config_uses_defaults() {
        let pdf: PDF = toml::from_str("font_size_body_pt = 11.0").expect("can parse partial config");
        assert_eq!(pdf.font_size_body_pt, 11.0);
        assert_eq!(pdf.font_regular, "DejaVuSans.ttf");
        assert_eq!(pdf.footer_template, "Page {n}/{total}");
    }
}
