//! [`Surface`] backed by `pdf_core::PdfDocument`.

use std::path::Path;

use pdf_core::{
    Border as PdfBorder, Cell, Color, FontFamily, FontStyle, ImageOptions, PageNumbering, PageSize, PdfDocument,
    Position, RowStyle as PdfRowStyle, Table, TextAlign, TextBoxOptions, TextOptions as PdfTextOptions,
};

use super::{
    Align, Border, BoxOptions, FontFiles, ImagePlacement, PageNumbers, Surface, TableCell, TableOptions,
    TextOptions, Weight,
};
use crate::error::Result;

/// A US-Letter document, with `background` drawn on every page.
pub fn letter_document(background: Option<&Path>, compress: bool) -> Result<PdfDocument> {
    let mut doc = match background {
        Some(path) => PdfDocument::with_background(PageSize::Letter, path)?,
        None => PdfDocument::new(PageSize::Letter),
    };
    doc.set_compression(compress);
    Ok(doc)
}

impl From<Align> for TextAlign {
    fn from(align: Align) -> Self {
        match align {
            Align::Left => TextAlign::Left,
            Align::Center => TextAlign::Center,
            Align::Right => TextAlign::Right,
        }
    }
}

impl From<Align> for Position {
    fn from(align: Align) -> Self {
        match align {
            Align::Left => Position::Left,
            Align::Center => Position::Center,
            Align::Right => Position::Right,
        }
    }
}

impl From<Border> for PdfBorder {
    fn from(border: Border) -> Self {
        match border {
            Border::Top => PdfBorder::Top,
            Border::Right => PdfBorder::Right,
            Border::Bottom => PdfBorder::Bottom,
            Border::Left => PdfBorder::Left,
        }
    }
}

fn weight_style(weight: Weight) -> FontStyle {
    match weight {
        Weight::Normal => FontStyle::Normal,
        Weight::Bold => FontStyle::Bold,
    }
}

fn borders(list: &[Border]) -> Vec<PdfBorder> {
    list.iter().copied().map(PdfBorder::from).collect()
}

fn color(hex: &Option<String>) -> Result<Option<Color>> {
    Ok(hex.as_deref().map(Color::from_hex).transpose()?)
}

fn build_table(rows: &[Vec<TableCell>], opts: &TableOptions) -> Result<Table> {
    let cells = rows
        .iter()
        .map(|row| {
            row.iter()
                .map(|cell| Cell {
                    text: cell.text.clone(),
                    align: cell.align.into(),
                    borders: cell.borders.as_deref().map(borders),
                    background_color: None,
                })
                .collect()
        })
        .collect();

    let mut table = Table::new(cells)
        .header(opts.header)
        .row_colors(opts.row_colors.iter().map(color).collect::<Result<_>>()?);
    if let Some(width) = opts.width {
        table = table.width(width);
    }
    if let Some(size) = opts.font_size {
        table = table.font_size(size);
    }
    if let Some(list) = &opts.cell_borders {
        table = table.cell_borders(borders(list));
    }
    for (row, style) in &opts.row_styles {
        table = table.row_style(
            *row,
            PdfRowStyle {
                background_color: color(&style.background_color)?,
                border_color: color(&style.border_color)?,
                borders: style.borders.as_deref().map(borders),
            },
        );
    }
    Ok(table)
}

impl Surface for PdfDocument {
    fn text_box(&mut self, text: &str, opts: &BoxOptions) -> Result<()> {
        PdfDocument::text_box(
            self,
            text,
            &TextBoxOptions {
                at: opts.at,
                width: opts.width,
                size: Some(opts.size),
                align: opts.align.into(),
                rotate: opts.rotate,
                ..Default::default()
            },
        );
        Ok(())
    }

    fn text(&mut self, text: &str, opts: &TextOptions) -> Result<()> {
        PdfDocument::text(
            self,
            text,
            &PdfTextOptions {
                size: Some(opts.size),
                align: opts.align.into(),
                style: weight_style(opts.weight),
            },
        );
        Ok(())
    }

    fn image(&mut self, path: &Path, placement: &ImagePlacement) -> Result<()> {
        PdfDocument::image(
            self,
            path,
            &ImageOptions {
                at: placement.at,
                fit: placement.fit,
                position: placement.position.into(),
            },
        )?;
        Ok(())
    }

    fn stroke_rounded_rectangle(&mut self, origin: (f64, f64), width: f64, height: f64, radius: f64) -> Result<()> {
        PdfDocument::stroke_rounded_rectangle(self, origin, width, height, radius);
        Ok(())
    }

    fn move_down(&mut self, points: f64) {
        PdfDocument::move_down(self, points);
    }

    fn table(&mut self, rows: &[Vec<TableCell>], opts: &TableOptions) -> Result<()> {
        let table = build_table(rows, opts)?;
        PdfDocument::table(self, &table);
        Ok(())
    }

    fn span<F>(&mut self, width: f64, position: Align, body: F) -> Result<()>
    where
        F: FnOnce(&mut Self) -> Result<()>,
    {
        PdfDocument::span(self, width, position.into(), body)
    }

    fn fill_color(&self) -> String {
        PdfDocument::fill_color(self).to_hex()
    }

    fn set_fill_color(&mut self, hex: &str) -> Result<()> {
        Ok(PdfDocument::set_fill_color(self, hex)?)
    }

    fn set_stroke_color(&mut self, hex: &str) -> Result<()> {
        Ok(PdfDocument::set_stroke_color(self, hex)?)
    }

    fn register_font_family(&mut self, name: &str, files: &FontFiles) -> Result<()> {
        let family = FontFamily {
            normal: pdf_core::FontSource::File(files.normal.clone()),
            italic: pdf_core::FontSource::File(files.italic.clone()),
            bold: pdf_core::FontSource::File(files.bold.clone()),
            bold_italic: pdf_core::FontSource::File(files.bold_italic.clone()),
        };
        Ok(PdfDocument::register_font_family(self, name, family)?)
    }

    fn set_font(&mut self, name: &str) -> Result<()> {
        Ok(PdfDocument::set_font(self, name)?)
    }

    fn page_count(&self) -> usize {
        PdfDocument::page_count(self)
    }

    fn bounds_right(&self) -> f64 {
        self.bounds().right()
    }

    fn number_pages(&mut self, template: &str, opts: &PageNumbers) -> Result<()> {
        PdfDocument::number_pages(
            self,
            template,
            &PageNumbering {
                start_at: opts.start_at,
                at: opts.at,
                width: None,
                align: opts.align.into(),
                size: Some(opts.size),
            },
        );
        Ok(())
    }

    fn set_info(&mut self, key: &str, value: &str) {
        PdfDocument::set_info(self, key, value);
    }

    fn render_bytes(&self) -> Result<Vec<u8>> {
        Ok(self.render()?)
    }

    fn render_to_file(&self, path: &Path) -> Result<()> {
        Ok(PdfDocument::render_to_file(self, path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle)
    }

    #[test]
    fn fill_color_round_trips_as_hex() {
        let mut doc = letter_document(None, false).unwrap();
        assert_eq!(Surface::fill_color(&doc), "000000");
        Surface::set_fill_color(&mut doc, "ff0000").unwrap();
        assert_eq!(Surface::fill_color(&doc), "ff0000");
        assert!(Surface::set_fill_color(&mut doc, "red").is_err());
    }

    #[test]
    fn table_options_map_onto_the_writer() {
        let rows = vec![
            vec![TableCell::new("Item", Align::Left), TableCell::new("Amount", Align::Right)],
            vec![
                TableCell::new("Web", Align::Left).borders(vec![Border::Bottom]),
                TableCell::new("$ 100", Align::Right),
            ],
        ];
        let opts = TableOptions {
            header: true,
            width: Some(540.0),
            row_colors: vec![None, Some("ededed".into())],
            cell_borders: Some(vec![]),
            font_size: Some(10.0),
            row_styles: vec![(
                0,
                super::super::RowStyle {
                    background_color: Some("e3e3e3".into()),
                    border_color: Some("aaaaaa".into()),
                    borders: Some(vec![Border::Bottom]),
                },
            )],
        };
        let table = build_table(&rows, &opts).unwrap();
        assert!(table.header);
        assert_eq!(table.width, Some(540.0));
        assert!(table.borders.is_empty());
        assert_eq!(table.rows[1][0].borders, Some(vec![PdfBorder::Bottom]));
        assert_eq!(table.rows[1][1].align, TextAlign::Right);
        assert_eq!(table.row_styles[&0].borders, Some(vec![PdfBorder::Bottom]));

        let mut doc = letter_document(None, false).unwrap();
        Surface::table(&mut doc, &rows, &opts).unwrap();
        let bytes = Surface::render_bytes(&doc).unwrap();
        assert!(contains(&bytes, b"($ 100) Tj"));
    }

    #[test]
    fn bad_row_color_is_an_error() {
        let opts = TableOptions {
            row_colors: vec![Some("nope".into())],
            ..Default::default()
        };
        assert!(build_table(&[], &opts).is_err());
    }

    #[test]
    fn span_runs_the_body_on_the_document() {
        let mut doc = letter_document(None, false).unwrap();
        Surface::span(&mut doc, 100.0, Align::Right, |doc| {
            assert_eq!(Surface::bounds_right(doc), 100.0);
            Ok(())
        })
        .unwrap();
        assert_eq!(Surface::bounds_right(&doc), 540.0);
    }
}
