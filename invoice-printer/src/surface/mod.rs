//! The drawing operations the layout engine needs from a PDF writer.
//!
//! Coordinates follow the writer's margin box: points, origin at the
//! bottom-left, y growing upward, and every `at` naming the top-left
//! corner of what is drawn. Colors are 6-digit hex strings.

use std::path::{Path, PathBuf};

use crate::error::Result;

pub mod pdf;
pub mod recording;

pub use recording::{Call, RecordingSurface};

/// Horizontal alignment of text, or position of a span or image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Weight {
    #[default]
    Normal,
    Bold,
}

/// An absolutely positioned text box.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BoxOptions {
    pub at: (f64, f64),
    pub size: f64,
    /// Up to the right edge of the bounds when `None`.
    pub width: Option<f64>,
    pub align: Align,
    /// Degrees, counter-clockwise around `at`.
    pub rotate: Option<f64>,
}

/// Text flowed at the cursor.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextOptions {
    pub size: f64,
    pub align: Align,
    pub weight: Weight,
}

/// Image placement: absolute when `at` is set, otherwise at the cursor
/// using `position`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ImagePlacement {
    pub at: Option<(f64, f64)>,
    /// Box the image is scaled into, keeping its aspect ratio.
    pub fit: Option<(f64, f64)>,
    pub position: Align,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Border {
    Top,
    Right,
    Bottom,
    Left,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableCell {
    pub text: String,
    pub align: Align,
    /// The table's cell borders when `None`.
    pub borders: Option<Vec<Border>>,
}

impl TableCell {
    pub fn new(text: impl Into<String>, align: Align) -> Self {
        TableCell {
            text: text.into(),
            align,
            borders: None,
        }
    }

    pub fn borders(mut self, borders: Vec<Border>) -> Self {
        self.borders = Some(borders);
        self
    }
}

/// Overrides applied to every cell of one row.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RowStyle {
    pub background_color: Option<String>,
    pub border_color: Option<String>,
    pub borders: Option<Vec<Border>>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableOptions {
    /// Row 0 is a header, repeated on every page the table spans.
    pub header: bool,
    pub width: Option<f64>,
    /// Background colors cycled over the rows after the header.
    pub row_colors: Vec<Option<String>>,
    /// Default cell borders; every edge when `None`.
    pub cell_borders: Option<Vec<Border>>,
    /// The surface's current size when `None`.
    pub font_size: Option<f64>,
    /// Later entries for the same row win.
    pub row_styles: Vec<(usize, RowStyle)>,
}

/// The four files of a font family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontFiles {
    pub normal: PathBuf,
    pub italic: PathBuf,
    pub bold: PathBuf,
    pub bold_italic: PathBuf,
}

impl FontFiles {
    /// One file for every style.
    pub fn single(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        FontFiles {
            normal: path.clone(),
            italic: path.clone(),
            bold: path.clone(),
            bold_italic: path,
        }
    }
}

/// Options for [`Surface::number_pages`].
#[derive(Debug, Clone, PartialEq)]
pub struct PageNumbers {
    pub start_at: usize,
    pub at: (f64, f64),
    pub align: Align,
    pub size: f64,
}

/// A drawing surface the layout engine renders onto.
pub trait Surface {
    fn text_box(&mut self, text: &str, opts: &BoxOptions) -> Result<()>;

    fn text(&mut self, text: &str, opts: &TextOptions) -> Result<()>;

    fn image(&mut self, path: &Path, placement: &ImagePlacement) -> Result<()>;

    /// `origin` is the top-left corner.
    fn stroke_rounded_rectangle(&mut self, origin: (f64, f64), width: f64, height: f64, radius: f64) -> Result<()>;

    fn move_down(&mut self, points: f64);

    fn table(&mut self, rows: &[Vec<TableCell>], opts: &TableOptions) -> Result<()>;

    /// Run `body` inside a narrower region placed by `position`.
    fn span<F>(&mut self, width: f64, position: Align, body: F) -> Result<()>
    where
        F: FnOnce(&mut Self) -> Result<()>,
        Self: Sized;

    fn fill_color(&self) -> String;

    fn set_fill_color(&mut self, hex: &str) -> Result<()>;

    fn set_stroke_color(&mut self, hex: &str) -> Result<()>;

    fn register_font_family(&mut self, name: &str, files: &FontFiles) -> Result<()>;

    fn set_font(&mut self, name: &str) -> Result<()>;

    fn page_count(&self) -> usize;

    /// Right edge of the current bounds.
    fn bounds_right(&self) -> f64;

    /// Stamp every page, replacing `<page>` and `<total>` in `template`.
    fn number_pages(&mut self, template: &str, opts: &PageNumbers) -> Result<()>;

    fn set_info(&mut self, key: &str, value: &str);

    fn render_bytes(&self) -> Result<Vec<u8>>;

    fn render_to_file(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.render_bytes()?)?;
        Ok(())
    }
}
