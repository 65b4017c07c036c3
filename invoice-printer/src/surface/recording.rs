//! A [`Surface`] that records calls instead of drawing.
//!
//! Used to check what the layout engine emits, and in which order,
//! without parsing PDF output.

use std::path::{Path, PathBuf};

use super::{Align, BoxOptions, FontFiles, ImagePlacement, PageNumbers, Surface, TableCell, TableOptions, TextOptions};
use crate::error::Result;

const PAGE_WIDTH: f64 = 540.0;
const BUILTIN_FAMILIES: [&str; 3] = ["Helvetica", "Times-Roman", "Courier"];

/// One recorded surface call.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    TextBox { text: String, opts: BoxOptions },
    Text { text: String, opts: TextOptions },
    Image { path: PathBuf, placement: ImagePlacement },
    RoundedRectangle { origin: (f64, f64), width: f64, height: f64, radius: f64 },
    MoveDown(f64),
    Table { rows: Vec<Vec<TableCell>>, opts: TableOptions },
    SpanStart { width: f64, position: Align },
    SpanEnd,
    FillColor(String),
    StrokeColor(String),
    RegisterFont { name: String, files: FontFiles },
    SetFont(String),
    NumberPages { template: String, opts: PageNumbers },
    Info { key: String, value: String },
}

#[derive(Debug, Clone)]
pub struct RecordingSurface {
    calls: Vec<Call>,
    fill: String,
    families: Vec<String>,
    spans: Vec<f64>,
    pages: usize,
}

impl Default for RecordingSurface {
    fn default() -> Self {
        RecordingSurface {
            calls: Vec::new(),
            fill: "000000".to_string(),
            families: BUILTIN_FAMILIES.iter().map(|f| f.to_string()).collect(),
            spans: Vec::new(),
            pages: 1,
        }
    }
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report `pages` from `page_count`, as if content had overflowed.
    pub fn with_page_count(mut self, pages: usize) -> Self {
        self.pages = pages;
        self
    }

    pub fn calls(&self) -> &[Call] {
        &self.calls
    }

    /// Non-empty text in the order it was emitted. Table cells are
    /// listed row by row.
    pub fn fragments(&self) -> Vec<String> {
        let mut out = Vec::new();
        for call in &self.calls {
            match call {
                Call::TextBox { text, .. } | Call::Text { text, .. } => out.push(text.clone()),
                Call::Table { rows, .. } => {
                    out.extend(rows.iter().flatten().map(|cell| cell.text.clone()));
                }
                _ => {}
            }
        }
        out.retain(|text| !text.is_empty());
        out
    }

    /// Text of every text box, including empty ones.
    pub fn text_boxes(&self) -> Vec<(&str, &BoxOptions)> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::TextBox { text, opts } => Some((text.as_str(), opts)),
                _ => None,
            })
            .collect()
    }

    pub fn tables(&self) -> Vec<(&[Vec<TableCell>], &TableOptions)> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::Table { rows, opts } => Some((rows.as_slice(), opts)),
                _ => None,
            })
            .collect()
    }

    fn record(&mut self, call: Call) {
        self.calls.push(call);
    }
}

impl Surface for RecordingSurface {
    fn text_box(&mut self, text: &str, opts: &BoxOptions) -> Result<()> {
        self.record(Call::TextBox {
            text: text.to_string(),
            opts: opts.clone(),
        });
        Ok(())
    }

    fn text(&mut self, text: &str, opts: &TextOptions) -> Result<()> {
        self.record(Call::Text {
            text: text.to_string(),
            opts: opts.clone(),
        });
        Ok(())
    }

    fn image(&mut self, path: &Path, placement: &ImagePlacement) -> Result<()> {
        self.record(Call::Image {
            path: path.to_path_buf(),
            placement: placement.clone(),
        });
        Ok(())
    }

    fn stroke_rounded_rectangle(&mut self, origin: (f64, f64), width: f64, height: f64, radius: f64) -> Result<()> {
        self.record(Call::RoundedRectangle {
            origin,
            width,
            height,
            radius,
        });
        Ok(())
    }

    fn move_down(&mut self, points: f64) {
        self.record(Call::MoveDown(points));
    }

    fn table(&mut self, rows: &[Vec<TableCell>], opts: &TableOptions) -> Result<()> {
        self.record(Call::Table {
            rows: rows.to_vec(),
            opts: opts.clone(),
        });
        Ok(())
    }

    fn span<F>(&mut self, width: f64, position: Align, body: F) -> Result<()>
    where
        F: FnOnce(&mut Self) -> Result<()>,
    {
        self.record(Call::SpanStart { width, position });
        self.spans.push(width);
        let result = body(self);
        self.spans.pop();
        self.record(Call::SpanEnd);
        result
    }

    fn fill_color(&self) -> String {
        self.fill.clone()
    }

    fn set_fill_color(&mut self, hex: &str) -> Result<()> {
        self.fill = hex.trim_start_matches('#').to_string();
        self.record(Call::FillColor(self.fill.clone()));
        Ok(())
    }

    fn set_stroke_color(&mut self, hex: &str) -> Result<()> {
        self.record(Call::StrokeColor(hex.trim_start_matches('#').to_string()));
        Ok(())
    }

    fn register_font_family(&mut self, name: &str, files: &FontFiles) -> Result<()> {
        self.families.push(name.to_string());
        self.record(Call::RegisterFont {
            name: name.to_string(),
            files: files.clone(),
        });
        Ok(())
    }

    fn set_font(&mut self, name: &str) -> Result<()> {
        if !self.families.iter().any(|f| f == name) {
            return Err(pdf_core::Error::UnknownFontFamily(name.to_string()).into());
        }
        self.record(Call::SetFont(name.to_string()));
        Ok(())
    }

    fn page_count(&self) -> usize {
        self.pages
    }

    fn bounds_right(&self) -> f64 {
        self.spans.last().copied().unwrap_or(PAGE_WIDTH)
    }

    fn number_pages(&mut self, template: &str, opts: &PageNumbers) -> Result<()> {
        self.record(Call::NumberPages {
            template: template.to_string(),
            opts: opts.clone(),
        });
        Ok(())
    }

    fn set_info(&mut self, key: &str, value: &str) {
        self.record(Call::Info {
            key: key.to_string(),
            value: value.to_string(),
        });
    }

    /// One debug line per call.
    fn render_bytes(&self) -> Result<Vec<u8>> {
        let mut out = String::new();
        for call in &self.calls {
            out.push_str(&format!("{:?}\n", call));
        }
        Ok(out.into_bytes())
    }
}
