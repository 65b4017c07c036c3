use std::collections::BTreeMap;

use crate::content::ContentStream;
use crate::graphics::Color;
use crate::text::{self, TextAlign, TextStyle};
use crate::truetype::TrueTypeFont;

// -------------------------------------------------------
// Public types
// -------------------------------------------------------

/// One edge of a table cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Border {
    Top,
    Right,
    Bottom,
    Left,
}

impl Border {
    pub const ALL: [Border; 4] = [Border::Top, Border::Right, Border::Bottom, Border::Left];
}

/// A single table cell. Text may contain newlines.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cell {
    pub text: String,
    pub align: TextAlign,
    /// Edges to stroke; the table's default when `None`.
    pub borders: Option<Vec<Border>>,
    pub background_color: Option<Color>,
}

impl Cell {
    pub fn new(text: impl Into<String>) -> Self {
        Cell {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn align(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }

    pub fn borders(mut self, borders: Vec<Border>) -> Self {
        self.borders = Some(borders);
        self
    }
}

/// Style applied to every cell of one row. Each field, when set,
/// wins over the cell's own value and the table defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowStyle {
    pub background_color: Option<Color>,
    pub border_color: Option<Color>,
    pub borders: Option<Vec<Border>>,
}

/// A table drawn at the cursor by `PdfDocument::table`.
///
/// Column widths come from the widest line in each column plus padding.
/// With `width` set the columns are scaled to fill it exactly; otherwise
/// they are only shrunk when wider than the bounds.
#[derive(Debug, Clone)]
pub struct Table {
    pub rows: Vec<Vec<Cell>>,
    /// Treat row 0 as a header, repeated after every page break.
    pub header: bool,
    pub width: Option<f64>,
    /// Background colors cycled over the body rows.
    pub row_colors: Vec<Option<Color>>,
    /// Font size; the document's current size when `None`.
    pub font_size: Option<f64>,
    pub padding: f64,
    /// Default edges stroked around each cell.
    pub borders: Vec<Border>,
    pub border_color: Color,
    pub border_width: f64,
    pub row_styles: BTreeMap<usize, RowStyle>,
}

impl Table {
    pub fn new(rows: Vec<Vec<Cell>>) -> Self {
        Table {
            rows,
            header: false,
            width: None,
            row_colors: Vec::new(),
            font_size: None,
            padding: 5.0,
            borders: Border::ALL.to_vec(),
            border_color: Color::black(),
            border_width: 1.0,
            row_styles: BTreeMap::new(),
        }
    }

    pub fn header(mut self, header: bool) -> Self {
        self.header = header;
        self
    }

    pub fn width(mut self, width: f64) -> Self {
        self.width = Some(width);
        self
    }

    pub fn row_colors(mut self, colors: Vec<Option<Color>>) -> Self {
        self.row_colors = colors;
        self
    }

    pub fn font_size(mut self, size: f64) -> Self {
        self.font_size = Some(size);
        self
    }

    /// Default edges for every cell; an empty list draws no borders.
    pub fn cell_borders(mut self, borders: Vec<Border>) -> Self {
        self.borders = borders;
        self
    }

    pub fn row_style(mut self, row: usize, style: RowStyle) -> Self {
        self.row_styles.insert(row, style);
        self
    }

    pub fn column_count(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    fn header_rows(&self) -> usize {
        usize::from(self.header && !self.rows.is_empty())
    }

    fn background(&self, row: usize, cell: &Cell) -> Option<Color> {
        if let Some(bg) = self.row_styles.get(&row).and_then(|s| s.background_color) {
            return Some(bg);
        }
        if cell.background_color.is_some() {
            return cell.background_color;
        }
        let header_rows = self.header_rows();
        if row < header_rows || self.row_colors.is_empty() {
            return None;
        }
        self.row_colors[(row - header_rows) % self.row_colors.len()]
    }

    fn cell_borders_for(&self, row: usize, cell: &Cell) -> Vec<Border> {
        if let Some(borders) = self.row_styles.get(&row).and_then(|s| s.borders.clone()) {
            return borders;
        }
        cell.borders.clone().unwrap_or_else(|| self.borders.clone())
    }

    fn border_color_for(&self, row: usize) -> Color {
        self.row_styles
            .get(&row)
            .and_then(|s| s.border_color)
            .unwrap_or(self.border_color)
    }
}

// -------------------------------------------------------
// Layout
// -------------------------------------------------------

/// Resolved geometry of a table: one width per column, one height per
/// row and the wrapped lines of every cell.
#[derive(Debug)]
pub(crate) struct TableLayout {
    pub(crate) widths: Vec<f64>,
    pub(crate) heights: Vec<f64>,
    lines: Vec<Vec<Vec<String>>>,
}

impl Table {
    pub(crate) fn layout(&self, style: &TextStyle, tt_fonts: &[TrueTypeFont], avail_width: f64) -> TableLayout {
        let widths = self.column_widths(style, tt_fonts, avail_width);
        let body = text::ascent(style, tt_fonts) + text::descent(style, tt_fonts);
        let lh = text::line_height(style, tt_fonts);

        let mut lines = Vec::with_capacity(self.rows.len());
        let mut heights = Vec::with_capacity(self.rows.len());
        for row in &self.rows {
            let mut row_lines = Vec::with_capacity(row.len());
            let mut count = 1usize;
            for (col, cell) in row.iter().enumerate() {
                let inner = (widths[col] - 2.0 * self.padding).max(0.0);
                let wrapped = text::wrap_text(&cell.text, inner, style, tt_fonts);
                count = count.max(wrapped.len());
                row_lines.push(wrapped);
            }
            heights.push(2.0 * self.padding + body + (count - 1) as f64 * lh);
            lines.push(row_lines);
        }

        TableLayout {
            widths,
            heights,
            lines,
        }
    }

    fn column_widths(&self, style: &TextStyle, tt_fonts: &[TrueTypeFont], avail_width: f64) -> Vec<f64> {
        let mut natural = vec![2.0 * self.padding; self.column_count()];
        for row in &self.rows {
            for (col, cell) in row.iter().enumerate() {
                let widest = cell
                    .text
                    .split('\n')
                    .map(|line| text::measure(line.trim_end(), style, tt_fonts))
                    .fold(0.0_f64, f64::max);
                natural[col] = natural[col].max(widest + 2.0 * self.padding);
            }
        }

        let total: f64 = natural.iter().sum();
        let target = match self.width {
            Some(w) => w,
            None if total > avail_width => avail_width,
            None => return natural,
        };
        if total <= 0.0 {
            return natural;
        }
        let scale = target / total;
        natural.iter().map(|w| w * scale).collect()
    }
}

// -------------------------------------------------------
// Rendering
// -------------------------------------------------------

/// Draw one row with its top-left corner at absolute (x, top).
#[allow(clippy::too_many_arguments)]
pub(crate) fn draw_row(
    table: &Table,
    layout: &TableLayout,
    row: usize,
    x: f64,
    top: f64,
    style: &TextStyle,
    text_color: Color,
    tt_fonts: &mut [TrueTypeFont],
    cs: &mut ContentStream,
) {
    let cells = &table.rows[row];
    let height = layout.heights[row];
    let bottom = top - height;

    // Backgrounds first so text and borders paint over them.
    let mut col_x = x;
    for (col, cell) in cells.iter().enumerate() {
        if let Some(bg) = table.background(row, cell) {
            cs.save();
            cs.fill_color(bg);
            cs.fill_rect(col_x, bottom, layout.widths[col], height);
            cs.restore();
        }
        col_x += layout.widths[col];
    }

    let ascent = text::ascent(style, tt_fonts);
    let lh = text::line_height(style, tt_fonts);
    let resource = text::resource_name(style.font, tt_fonts);
    cs.save();
    cs.fill_color(text_color);
    cs.begin_text();
    cs.set_font(&resource, style.font_size);
    let mut col_x = x;
    for (col, cell) in cells.iter().enumerate() {
        let inner = layout.widths[col] - 2.0 * table.padding;
        for (i, line) in layout.lines[row][col].iter().enumerate() {
            let line = line.trim_end();
            if line.is_empty() {
                continue;
            }
            let dx = text::align_offset(cell.align, inner, text::measure(line, style, tt_fonts));
            let baseline = top - table.padding - ascent - i as f64 * lh;
            cs.text_position(col_x + table.padding + dx, baseline);
            text::show_line(cs, line, style.font, tt_fonts);
        }
        col_x += layout.widths[col];
    }
    cs.end_text();
    cs.restore();

    if table.border_width <= 0.0 {
        return;
    }
    let border_color = table.border_color_for(row);
    let mut col_x = x;
    for (col, cell) in cells.iter().enumerate() {
        let borders = table.cell_borders_for(row, cell);
        let right = col_x + layout.widths[col];
        if !borders.is_empty() {
            cs.save();
            cs.stroke_color(border_color);
            cs.line_width(table.border_width);
            for border in borders {
                match border {
                    Border::Top => cs.stroke_line(col_x, top, right, top),
                    Border::Right => cs.stroke_line(right, top, right, bottom),
                    Border::Bottom => cs.stroke_line(col_x, bottom, right, bottom),
                    Border::Left => cs.stroke_line(col_x, top, col_x, bottom),
                }
            }
            cs.restore();
        }
        col_x = right;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fonts::{BuiltinFont, FontRef};

    fn style() -> TextStyle {
        TextStyle {
            font: FontRef::Builtin(BuiltinFont::Helvetica),
            font_size: 10.0,
        }
    }

    fn grey(hex: &str) -> Option<Color> {
        Some(Color::from_hex(hex).unwrap())
    }

    #[test]
    fn fixed_width_is_distributed_proportionally() {
        let table = Table::new(vec![vec![Cell::new("aa"), Cell::new("aaaa")]]).width(540.0);
        let layout = table.layout(&style(), &[], 540.0);
        assert!((layout.widths.iter().sum::<f64>() - 540.0).abs() < 1e-6);
        assert!(layout.widths[1] > layout.widths[0]);
    }

    #[test]
    fn natural_width_is_kept_when_it_fits() {
        let table = Table::new(vec![vec![Cell::new("Subtotal:"), Cell::new("175")]]);
        let layout = table.layout(&style(), &[], 540.0);
        let label = crate::fonts::FontMetrics::measure_text("Subtotal:", BuiltinFont::Helvetica, 10.0);
        assert!((layout.widths[0] - (label + 10.0)).abs() < 1e-6);
    }

    #[test]
    fn wide_tables_shrink_to_bounds() {
        let long = "word ".repeat(60);
        let table = Table::new(vec![vec![Cell::new(long)]]);
        let layout = table.layout(&style(), &[], 100.0);
        assert!((layout.widths.iter().sum::<f64>() - 100.0).abs() < 1e-6);
        assert!(layout.heights[0] > 30.0);
    }

    #[test]
    fn row_height_grows_with_lines() {
        let table = Table::new(vec![vec![Cell::new("Item\npoložka"), Cell::new("x")]]);
        let layout = table.layout(&style(), &[], 540.0);
        let one = Table::new(vec![vec![Cell::new("Item")]]).layout(&style(), &[], 540.0);
        assert!(layout.heights[0] > one.heights[0]);
    }

    #[test]
    fn row_colors_skip_the_header() {
        let rows = vec![vec![Cell::new("h")], vec![Cell::new("a")], vec![Cell::new("b")]];
        let table = Table::new(rows)
            .header(true)
            .row_colors(vec![None, grey("ededed")]);
        let cell = Cell::new("");
        assert_eq!(table.background(0, &cell), None);
        assert_eq!(table.background(1, &cell), None);
        assert_eq!(table.background(2, &cell), grey("ededed"));
    }

    #[test]
    fn row_style_wins_over_cell_and_table() {
        let table = Table::new(vec![vec![Cell::new("h")]])
            .cell_borders(vec![])
            .row_style(
                0,
                RowStyle {
                    background_color: grey("e3e3e3"),
                    border_color: grey("aaaaaa"),
                    borders: Some(vec![Border::Bottom]),
                },
            );
        let cell = Cell {
            background_color: grey("ffffff"),
            ..Cell::new("h").borders(vec![Border::Top])
        };
        assert_eq!(table.background(0, &cell), grey("e3e3e3"));
        assert_eq!(table.cell_borders_for(0, &cell), vec![Border::Bottom]);
        assert_eq!(Some(table.border_color_for(0)), grey("aaaaaa"));
        assert_eq!(table.cell_borders_for(1, &Cell::new("x")), Vec::<Border>::new());
        assert_eq!(table.cell_borders_for(1, &cell), vec![Border::Top]);
    }

    #[test]
    fn draws_text_and_only_requested_borders() {
        let table = Table::new(vec![vec![Cell::new("Amount").align(TextAlign::Right)]])
            .cell_borders(vec![Border::Bottom]);
        let layout = table.layout(&style(), &[], 540.0);
        let mut cs = ContentStream::new();
        draw_row(&table, &layout, 0, 36.0, 500.0, &style(), Color::black(), &mut [], &mut cs);
        let out = String::from_utf8_lossy(cs.as_bytes()).into_owned();
        assert!(out.contains("(Amount) Tj"));
        assert_eq!(out.matches(" l\nS\n").count(), 1);
    }
}
