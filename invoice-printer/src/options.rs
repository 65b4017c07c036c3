//! Presentation knobs for a single render.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::Result;
use crate::labels::LabelOverrides;

/// Options accepted by [`crate::render`] and [`crate::print`].
///
/// Every field is optional. Empty strings and empty paths count as
/// absent, so a JSON configuration may leave a key blank.
///
/// ```
/// use invoice_printer::{LabelKey, LabelOverrides, RenderOptions};
///
/// let options = RenderOptions::new()
///     .labels(LabelOverrides::new().with(LabelKey::Name, "Faktura"))
///     .font("times");
/// assert_eq!(options.font.as_deref(), Some("times"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderOptions {
    /// Label overrides for this render only.
    pub labels: Option<LabelOverrides>,
    /// A TrueType file path or a builtin font name.
    pub font: Option<String>,
    pub stamp: Option<PathBuf>,
    pub logo: Option<PathBuf>,
    /// Image drawn on every page. Not checked before rendering.
    pub background: Option<PathBuf>,
    /// Deflate the PDF streams.
    pub compress: bool,
    /// Output path used by [`crate::print_configured`].
    pub file_name: Option<PathBuf>,
}

/// Output file written when no `file_name` is configured.
pub const DEFAULT_FILE_NAME: &str = "invoice.pdf";

impl RenderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn labels(mut self, labels: LabelOverrides) -> Self {
        self.labels = Some(labels);
        self
    }

    pub fn font(mut self, font: impl Into<String>) -> Self {
        self.font = Some(font.into());
        self
    }

    pub fn stamp(mut self, path: impl Into<PathBuf>) -> Self {
        self.stamp = Some(path.into());
        self
    }

    pub fn logo(mut self, path: impl Into<PathBuf>) -> Self {
        self.logo = Some(path.into());
        self
    }

    pub fn background(mut self, path: impl Into<PathBuf>) -> Self {
        self.background = Some(path.into());
        self
    }

    pub fn compress(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    pub fn file_name(mut self, path: impl Into<PathBuf>) -> Self {
        self.file_name = Some(path.into());
        self
    }

    /// Load options from a JSON object, e.g.
    /// `{"font": "courier", "labels": {"name": "Faktura"}}`.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub(crate) fn font_name(&self) -> Option<&str> {
        self.font.as_deref().filter(|f| !f.is_empty())
    }

    pub(crate) fn stamp_path(&self) -> Option<&Path> {
        present(&self.stamp)
    }

    pub(crate) fn logo_path(&self) -> Option<&Path> {
        present(&self.logo)
    }

    pub(crate) fn background_path(&self) -> Option<&Path> {
        present(&self.background)
    }

    /// The configured output path, or [`DEFAULT_FILE_NAME`].
    pub fn output_path(&self) -> &Path {
        present(&self.file_name).unwrap_or_else(|| Path::new(DEFAULT_FILE_NAME))
    }
}

fn present(path: &Option<PathBuf>) -> Option<&Path> {
    path.as_deref().filter(|p| !p.as_os_str().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::labels::LabelKey;

    #[test]
    fn builder_sets_fields() {
        let options = RenderOptions::new()
            .font("courier")
            .logo("logo.png")
            .stamp("stamp.png")
            .background("bg.png")
            .compress(true);
        assert_eq!(options.font_name(), Some("courier"));
        assert_eq!(options.logo_path(), Some(Path::new("logo.png")));
        assert_eq!(options.stamp_path(), Some(Path::new("stamp.png")));
        assert_eq!(options.background_path(), Some(Path::new("bg.png")));
        assert!(options.compress);
    }

    #[test]
    fn empty_values_count_as_absent() {
        let options = RenderOptions::new().font("").logo("");
        assert_eq!(options.font_name(), None);
        assert_eq!(options.logo_path(), None);
    }

    #[test]
    fn loads_from_json() {
        let options = RenderOptions::from_json(
            r#"{"font": "times", "logo": "logo.png", "labels": {"name": "Faktura", "sublabels": {"name": "Invoice"}}}"#,
        )
        .unwrap();
        assert_eq!(options.font.as_deref(), Some("times"));
        assert_eq!(options.logo, Some(PathBuf::from("logo.png")));
        assert!(!options.compress);
        let expected = LabelOverrides::new()
            .with(LabelKey::Name, "Faktura")
            .with_sublabel(LabelKey::Name, "Invoice");
        assert_eq!(options.labels, Some(expected));
    }

    #[test]
    fn file_name_loads_from_json() {
        let options = RenderOptions::from_json(r#"{"font": "times", "file_name": "out/faktura.pdf"}"#).unwrap();
        assert_eq!(options.font_name(), Some("times"));
        assert_eq!(options.output_path(), Path::new("out/faktura.pdf"));
    }

    #[test]
    fn output_path_defaults_to_invoice_pdf() {
        assert_eq!(RenderOptions::new().output_path(), Path::new("invoice.pdf"));
        assert_eq!(RenderOptions::new().file_name("").output_path(), Path::new("invoice.pdf"));
        assert_eq!(RenderOptions::new().file_name("a.pdf").output_path(), Path::new("a.pdf"));
    }

    #[test]
    fn unknown_option_is_rejected() {
        assert!(RenderOptions::from_json(r#"{"fonts": "times"}"#).is_err());
    }
}
