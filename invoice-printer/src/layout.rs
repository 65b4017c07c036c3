//! Places an invoice on a US-Letter page.
//!
//! Blocks are drawn in a fixed order: header, provider and purchaser
//! boxes, dates, items table, totals, stamp, logo, note, page numbers.
//! Absolutely positioned blocks in the upper part of the page are shifted
//! by `push_down`; the items table is pushed further down by the space
//! the dates block used.

use std::path::Path;

use log::debug;

use crate::document::{Document, Entity, Item};
use crate::error::Result;
use crate::labels::{LabelKey, Labels};
use crate::surface::{
    Align, Border, BoxOptions, ImagePlacement, PageNumbers, RowStyle, Surface, TableCell, TableOptions, TextOptions,
    Weight,
};

const PRODUCER: &str = concat!("invoice-printer ", env!("CARGO_PKG_VERSION"));

/// Address lines beyond this many are not drawn.
const MAX_ADDRESS_LINES: usize = 6;

/// Columns of the items table, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Names,
    Variables,
    Quantities,
    Units,
    Prices,
    Taxes,
    Amounts,
}

impl Column {
    pub const ALL: [Column; 7] = [
        Column::Names,
        Column::Variables,
        Column::Quantities,
        Column::Units,
        Column::Prices,
        Column::Taxes,
        Column::Amounts,
    ];

    fn label(self) -> LabelKey {
        match self {
            Column::Names => LabelKey::Item,
            Column::Variables => LabelKey::Variable,
            Column::Quantities => LabelKey::Quantity,
            Column::Units => LabelKey::Unit,
            Column::Prices => LabelKey::PricePerItem,
            Column::Taxes => LabelKey::Tax,
            Column::Amounts => LabelKey::Amount,
        }
    }

    fn value(self, item: &Item) -> &str {
        match self {
            Column::Names => &item.name,
            Column::Variables => &item.variable,
            Column::Quantities => &item.quantity,
            Column::Units => &item.unit,
            Column::Prices => &item.price,
            Column::Taxes => &item.tax,
            Column::Amounts => &item.amount,
        }
    }

    fn align(self) -> Align {
        match self {
            Column::Names => Align::Left,
            _ => Align::Right,
        }
    }
}

/// Columns for which at least one item has a value.
pub fn visible_columns(items: &[Item]) -> Vec<Column> {
    Column::ALL
        .into_iter()
        .filter(|column| items.iter().any(|item| !column.value(item).is_empty()))
        .collect()
}

/// Lines of an address, without trailing empty lines.
fn address_lines(lines: &str) -> Vec<&str> {
    let mut out: Vec<&str> = lines.split('\n').collect();
    while out.last().is_some_and(|line| line.is_empty()) {
        out.pop();
    }
    out
}

/// Renders one document onto a surface.
pub struct LayoutEngine<'a, S: Surface> {
    surface: S,
    document: &'a Document,
    labels: Labels,
    stamp: Option<&'a Path>,
    logo: Option<&'a Path>,
    /// Shift applied to the upper blocks. Always 0 for now.
    push_down: f64,
    /// Extra space above the items table, set by the dates block.
    push_items_table: f64,
}

impl<'a, S: Surface> LayoutEngine<'a, S> {
    pub fn new(surface: S, document: &'a Document, labels: Labels) -> Self {
        LayoutEngine {
            surface,
            document,
            labels,
            stamp: None,
            logo: None,
            push_down: 0.0,
            push_items_table: 0.0,
        }
    }

    /// Image placed right-aligned below the totals.
    pub fn stamp(mut self, path: Option<&'a Path>) -> Self {
        self.stamp = path;
        self
    }

    /// Image placed bottom-left, above the note.
    pub fn logo(mut self, path: Option<&'a Path>) -> Self {
        self.logo = path;
        self
    }

    pub fn push_items_table(&self) -> f64 {
        self.push_items_table
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Draw every block. Call once per engine.
    pub fn build(&mut self) -> Result<()> {
        self.push_down = 0.0;
        self.push_items_table = 0.0;
        self.surface.set_info("Producer", PRODUCER);
        if !self.document.number.is_empty() {
            let title = format!("{} {}", self.labels.get(LabelKey::Name), self.document.number);
            self.surface.set_info("Title", &title);
        }
        self.surface.set_fill_color("000000")?;
        self.surface.set_stroke_color("aaaaaa")?;

        self.build_header()?;
        let document = self.document;
        self.build_entity_box(LabelKey::Provider, document.provider(), 0.0)?;
        self.build_entity_box(LabelKey::Purchaser, document.purchaser(), 274.0)?;
        self.build_info_box()?;
        self.build_items()?;
        self.build_total()?;
        self.build_stamp()?;
        self.build_logo()?;
        self.build_note()?;
        self.build_footer()?;
        debug!("laid out {} page(s)", self.surface.page_count());
        Ok(())
    }

    /// Document name (and its sublabel) on the left, number on the right,
    /// and the status across them in red.
    fn build_header(&mut self) -> Result<()> {
        let top = 720.0 - self.push_down;
        self.surface.text_box(
            self.labels.get(LabelKey::Name),
            &BoxOptions {
                at: (0.0, top),
                size: 20.0,
                width: Some(300.0),
                align: Align::Left,
                ..Default::default()
            },
        )?;

        let sublabel = self.labels.sublabel(LabelKey::Name);
        if let Some(sublabel) = sublabel {
            self.surface.text_box(
                sublabel,
                &BoxOptions {
                    at: (0.0, top - 22.0),
                    size: 12.0,
                    width: Some(300.0),
                    align: Align::Left,
                    ..Default::default()
                },
            )?;
        }

        if !self.document.status.is_empty() {
            let original = self.surface.fill_color();
            self.surface.set_fill_color("ff0000")?;
            self.surface.text_box(
                &self.document.status,
                &BoxOptions {
                    at: (220.0, 710.0 - self.push_down),
                    size: 20.0,
                    rotate: Some(20.0),
                    ..Default::default()
                },
            )?;
            self.surface.set_fill_color(&original)?;
        }

        self.surface.text_box(
            &self.document.number,
            &BoxOptions {
                at: (240.0, top),
                size: 20.0,
                width: Some(300.0),
                align: Align::Right,
                ..Default::default()
            },
        )?;

        self.surface.move_down(250.0);
        if sublabel.is_some() {
            self.surface.move_down(12.0);
        }
        Ok(())
    }

    fn build_entity_box(&mut self, label: LabelKey, entity: Entity<'a>, offset: f64) -> Result<()> {
        let x = 10.0 + offset;
        self.surface.text_box(
            entity.name,
            &BoxOptions {
                at: (x, 640.0 - self.push_down),
                size: 15.0,
                width: Some(240.0),
                ..Default::default()
            },
        )?;
        self.surface.text_box(
            self.labels.get(label),
            &BoxOptions {
                at: (x, 660.0 - self.push_down),
                size: 11.0,
                width: Some(240.0),
                ..Default::default()
            },
        )?;

        for (index, line) in address_lines(entity.lines).into_iter().take(MAX_ADDRESS_LINES).enumerate() {
            self.surface.text_box(
                line,
                &BoxOptions {
                    at: (x, 618.0 - 15.0 * index as f64 - self.push_down),
                    size: 10.0,
                    width: Some(240.0),
                    ..Default::default()
                },
            )?;
        }

        self.surface
            .stroke_rounded_rectangle((offset, 670.0 - self.push_down), 266.0, 150.0, 6.0)
    }

    /// One row per present date, 20pt apart.
    fn build_info_box(&mut self) -> Result<()> {
        let document = self.document;
        let fields = [
            (LabelKey::IssueDate, &document.issue_date),
            (LabelKey::DueDate, &document.due_date),
            (LabelKey::ChargeDate, &document.charge_date),
        ];

        let mut dates = 0;
        for (key, value) in fields {
            if value.is_empty() {
                continue;
            }
            let y = 498.0 - 20.0 * dates as f64 - self.push_down;
            dates += 1;
            self.surface.text_box(
                self.labels.get(key),
                &BoxOptions {
                    at: (10.0, y),
                    size: 11.0,
                    width: Some(240.0),
                    ..Default::default()
                },
            )?;
            self.surface.text_box(
                value,
                &BoxOptions {
                    at: (110.0, y),
                    size: 11.0,
                    width: Some(146.0),
                    align: Align::Right,
                    ..Default::default()
                },
            )?;
        }

        if dates > 0 {
            self.push_items_table += 45.0 + (dates - 1) as f64 * 15.0;
        }
        Ok(())
    }

    fn build_items(&mut self) -> Result<()> {
        self.surface.move_down(self.push_items_table + self.push_down);

        let items = &self.document.items;
        let columns = visible_columns(items);
        if columns.is_empty() {
            return Ok(());
        }

        let mut rows = Vec::with_capacity(items.len() + 1);
        rows.push(
            columns
                .iter()
                .map(|c| TableCell::new(self.labels.with_sublabel(c.label()), c.align()))
                .collect::<Vec<_>>(),
        );
        for item in items {
            rows.push(
                columns
                    .iter()
                    .map(|c| {
                        let cell = TableCell::new(c.value(item), c.align());
                        match c {
                            Column::Names => cell.borders(vec![Border::Bottom]),
                            _ => cell,
                        }
                    })
                    .collect(),
            );
        }

        let last = rows.len() - 1;
        let opts = TableOptions {
            header: true,
            width: Some(540.0),
            row_colors: vec![None, Some("ededed".to_string())],
            cell_borders: Some(Vec::new()),
            font_size: Some(10.0),
            row_styles: vec![
                (
                    0,
                    RowStyle {
                        background_color: Some("e3e3e3".to_string()),
                        border_color: Some("aaaaaa".to_string()),
                        borders: Some(vec![Border::Bottom]),
                    },
                ),
                (
                    last,
                    RowStyle {
                        background_color: None,
                        border_color: Some("d9d9d9".to_string()),
                        borders: Some(vec![Border::Bottom]),
                    },
                ),
            ],
        };
        self.surface.table(&rows, &opts)
    }

    /// Borderless subtotal and tax rows on the right, then the total.
    fn build_total(&mut self) -> Result<()> {
        self.surface.move_down(25.0);

        let document = self.document;
        let amounts = [
            (LabelKey::Subtotal, &document.subtotal),
            (LabelKey::Tax, &document.tax),
        ];

        let rows: Vec<Vec<TableCell>> = amounts
            .iter()
            .filter(|(_, value)| !value.is_empty())
            .map(|(key, value)| {
                let caption = format!("{}:{}", self.labels.get(*key), self.sublabel_suffix(*key));
                vec![
                    TableCell::new(caption, Align::Right),
                    TableCell::new(value.as_str(), Align::Left),
                ]
            })
            .collect();

        let chars = amounts
            .iter()
            .map(|(key, value)| self.labels.get(*key).chars().count() + value.chars().count())
            .max()
            .unwrap_or(0);
        let width = chars as f64 * 8.0;

        let opts = TableOptions {
            cell_borders: Some(Vec::new()),
            ..Default::default()
        };
        self.surface.span(width, Align::Right, |surface| {
            if rows.is_empty() {
                Ok(())
            } else {
                surface.table(&rows, &opts)
            }
        })?;

        self.surface.move_down(15.0);

        if document.total.is_empty() {
            return Ok(());
        }
        self.surface.text(
            &format!("{}:   {}", self.labels.get(LabelKey::Total), document.total),
            &TextOptions {
                size: 16.0,
                align: Align::Right,
                weight: Weight::Bold,
            },
        )?;
        self.surface.move_down(5.0);

        if let Some(sublabel) = self.labels.sublabel(LabelKey::Total) {
            self.surface.text(
                &format!("{}:   {}", sublabel, document.total),
                &TextOptions {
                    size: 12.0,
                    align: Align::Right,
                    weight: Weight::Normal,
                },
            )?;
        }
        Ok(())
    }

    fn sublabel_suffix(&self, key: LabelKey) -> String {
        match self.labels.sublabel(key) {
            Some(sublabel) => format!("\n{}:", sublabel),
            None => String::new(),
        }
    }

    fn build_stamp(&mut self) -> Result<()> {
        let Some(stamp) = self.stamp else {
            return Ok(());
        };
        self.surface.move_down(15.0);
        self.surface.image(
            stamp,
            &ImagePlacement {
                position: Align::Right,
                ..Default::default()
            },
        )
    }

    /// The logo sits at the bottom left, above the note if there is one.
    fn build_logo(&mut self) -> Result<()> {
        let Some(logo) = self.logo else {
            return Ok(());
        };
        let bottom = if self.document.note.is_empty() {
            75.0
        } else {
            75.0 + self.note_height()
        };
        self.surface.image(
            logo,
            &ImagePlacement {
                at: Some((0.0, bottom)),
                fit: Some((200.0, 50.0)),
                ..Default::default()
            },
        )
    }

    fn build_note(&mut self) -> Result<()> {
        let at = (0.0, self.note_height());
        self.surface.text_box(
            &self.document.note,
            &BoxOptions {
                at,
                size: 10.0,
                width: Some(450.0),
                align: Align::Left,
                ..Default::default()
            },
        )
    }

    fn note_height(&self) -> f64 {
        self.document.note.lines().count() as f64 * 11.0
    }

    fn build_footer(&mut self) -> Result<()> {
        if self.surface.page_count() <= 1 {
            return Ok(());
        }
        let at = (self.surface.bounds_right() - 50.0, 0.0);
        self.surface.number_pages(
            "<page> / <total>",
            &PageNumbers {
                start_at: 1,
                at,
                align: Align::Right,
                size: 12.0,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_lines_drop_trailing_blanks_only() {
        assert_eq!(address_lines("a\n\nb\n\n"), vec!["a", "", "b"]);
        assert!(address_lines("").is_empty());
    }

    #[test]
    fn columns_follow_display_order() {
        let items = vec![
            Item {
                amount: "$ 1".into(),
                ..Item::new("a")
            },
            Item {
                quantity: "2".into(),
                ..Default::default()
            },
        ];
        assert_eq!(
            visible_columns(&items),
            vec![Column::Names, Column::Quantities, Column::Amounts]
        );
        assert!(visible_columns(&[]).is_empty());
    }

    #[test]
    fn only_names_column_is_left_aligned() {
        for column in Column::ALL {
            let expected = if column == Column::Names { Align::Left } else { Align::Right };
            assert_eq!(column.align(), expected);
        }
        assert_eq!(Column::Prices.label(), LabelKey::PricePerItem);
    }
}
