use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use log::debug;

use crate::content::ContentStream;
use crate::error::{Error, Result};
use crate::fonts::{BuiltinFont, FontFamily, FontRef, FontSource, FontStyle, TrueTypeFontId};
use crate::graphics::Color;
use crate::images::{load_image, ImageData, ImageId, ImageOptions, Position};
use crate::objects::{ObjAllocator, ObjId, PdfObject};
use crate::tables::{self, Table};
use crate::text::{self, TextAlign, TextBoxOptions, TextOptions, TextStyle};
use crate::truetype::TrueTypeFont;
use crate::writer::PdfWriter;

const CATALOG_OBJ: ObjId = ObjId(1, 0);
const PAGES_OBJ: ObjId = ObjId(2, 0);
const FIRST_FREE_OBJ_NUM: u32 = 3;

/// Builtin fonts own resource names F1..F14; embedded fonts follow.
const FIRST_TRUETYPE_NUM: u32 = 15;

/// Family active on a new document.
pub const DEFAULT_FAMILY: &str = "Helvetica";

/// Page dimensions in points.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PageSize {
    #[default]
    Letter,
    A4,
    Custom(f64, f64),
}

impl PageSize {
    pub fn dimensions(&self) -> (f64, f64) {
        match self {
            PageSize::Letter => (612.0, 792.0),
            PageSize::A4 => (595.28, 841.89),
            PageSize::Custom(w, h) => (*w, *h),
        }
    }
}

/// Horizontal drawing region. `left` is measured from the left edge of
/// the page margin box; vertical extent is always the full margin box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    /// Right edge in the region's own coordinates.
    pub fn right(&self) -> f64 {
        self.width
    }

    pub fn top(&self) -> f64 {
        self.height
    }
}

/// Options for `PdfDocument::number_pages`.
#[derive(Debug, Clone, Copy)]
pub struct PageNumbering {
    /// Number shown on the first page.
    pub start_at: usize,
    pub at: (f64, f64),
    pub width: Option<f64>,
    pub align: TextAlign,
    pub size: Option<f64>,
}

impl Default for PageNumbering {
    fn default() -> Self {
        PageNumbering {
            start_at: 1,
            at: (0.0, 0.0),
            width: None,
            align: TextAlign::Right,
            size: None,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct ResolvedFamily {
    normal: FontRef,
    italic: FontRef,
    bold: FontRef,
    bold_italic: FontRef,
}

impl ResolvedFamily {
    fn get(&self, style: FontStyle) -> FontRef {
        match style {
            FontStyle::Normal => self.normal,
            FontStyle::Italic => self.italic,
            FontStyle::Bold => self.bold,
            FontStyle::BoldItalic => self.bold_italic,
        }
    }
}

/// In-memory multi-page drawing surface.
///
/// Drawing coordinates are points inside the page margin box with the
/// origin at its bottom-left corner; on Letter with the default 36pt
/// margin that box is 540 x 720. A vertical cursor starts at the top and
/// is advanced by flowed content (`text`, `table`, images without `at`),
/// which moves to a new page when it does not fit. Absolutely positioned
/// content (`text_box`, images with `at`) never moves the cursor.
///
/// Pages stay in memory until `render`, which is what allows
/// `number_pages` to revisit them.
pub struct PdfDocument {
    page_width: f64,
    page_height: f64,
    margin: f64,
    pages: Vec<ContentStream>,
    current: usize,
    cursor: f64,
    bounds: Vec<Bounds>,
    fill: Color,
    stroke: Color,
    line_width: f64,
    families: BTreeMap<String, ResolvedFamily>,
    family: String,
    font_size: f64,
    tt_fonts: Vec<TrueTypeFont>,
    tt_by_path: BTreeMap<PathBuf, TrueTypeFontId>,
    used_builtin: BTreeSet<BuiltinFont>,
    images: Vec<ImageData>,
    image_by_path: BTreeMap<PathBuf, ImageId>,
    background: Option<ImageId>,
    info: Vec<(String, String)>,
    compress: bool,
}

impl PdfDocument {
    pub fn new(size: PageSize) -> Self {
        let (page_width, page_height) = size.dimensions();
        let margin = 36.0;
        let mut families = BTreeMap::new();
        for (name, family) in [
            ("Helvetica", FontFamily::helvetica()),
            ("Times-Roman", FontFamily::times()),
            ("Courier", FontFamily::courier()),
        ] {
            families.insert(name.to_string(), builtin_family(&family));
        }

        let box_height = page_height - 2.0 * margin;
        PdfDocument {
            page_width,
            page_height,
            margin,
            pages: vec![ContentStream::new()],
            current: 0,
            cursor: box_height,
            bounds: vec![Bounds {
                left: 0.0,
                width: page_width - 2.0 * margin,
                height: box_height,
            }],
            fill: Color::black(),
            stroke: Color::black(),
            line_width: 1.0,
            families,
            family: DEFAULT_FAMILY.to_string(),
            font_size: 12.0,
            tt_fonts: Vec::new(),
            tt_by_path: BTreeMap::new(),
            used_builtin: BTreeSet::new(),
            images: Vec::new(),
            image_by_path: BTreeMap::new(),
            background: None,
            info: Vec::new(),
            compress: false,
        }
    }

    /// Create a document whose every page starts with `path` drawn at
    /// natural size from the top-left corner of the page.
    pub fn with_background(size: PageSize, path: impl AsRef<Path>) -> Result<Self> {
        let mut doc = Self::new(size);
        let id = doc.load_image_cached(path.as_ref())?;
        doc.background = Some(id);
        doc.draw_background();
        Ok(doc)
    }

    /// Set a document info entry (e.g. "Producer", "Title").
    pub fn set_info(&mut self, key: &str, value: &str) -> &mut Self {
        self.info.retain(|(k, _)| k != key);
        self.info.push((key.to_string(), value.to_string()));
        self
    }

    /// Deflate content, image and font streams when rendering.
    pub fn set_compression(&mut self, compress: bool) -> &mut Self {
        self.compress = compress;
        self
    }

    // -------------------------------------------------------
    // State
    // -------------------------------------------------------

    pub fn cursor(&self) -> f64 {
        self.cursor
    }

    pub fn move_down(&mut self, points: f64) {
        self.cursor -= points;
    }

    pub fn bounds(&self) -> Bounds {
        *self.current_bounds()
    }

    pub fn font_size(&self) -> f64 {
        self.font_size
    }

    pub fn fill_color(&self) -> Color {
        self.fill
    }

    pub fn set_fill_color(&mut self, hex: &str) -> Result<()> {
        self.fill = Color::from_hex(hex)?;
        Ok(())
    }

    pub fn set_stroke_color(&mut self, hex: &str) -> Result<()> {
        self.stroke = Color::from_hex(hex)?;
        Ok(())
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Index (0-based) of the page receiving drawing operations.
    pub fn page_number(&self) -> usize {
        self.current
    }

    /// Continue drawing on an existing page. Out-of-range indices go to
    /// the last page.
    pub fn go_to_page(&mut self, index: usize) {
        self.current = index.min(self.pages.len() - 1);
        self.cursor = self.current_bounds().height;
    }

    /// Move to the next page, creating it when the current page is the
    /// last one.
    pub fn start_new_page(&mut self) {
        if self.current + 1 < self.pages.len() {
            self.current += 1;
        } else {
            self.pages.push(ContentStream::new());
            self.current = self.pages.len() - 1;
            self.draw_background();
        }
        self.cursor = self.current_bounds().height;
    }

    // -------------------------------------------------------
    // Fonts
    // -------------------------------------------------------

    /// Register a family under `name`. TrueType files are parsed now,
    /// once per path, and embedded at render time if used.
    pub fn register_font_family(&mut self, name: &str, family: FontFamily) -> Result<()> {
        let resolved = ResolvedFamily {
            normal: self.resolve_source(&family.normal)?,
            italic: self.resolve_source(&family.italic)?,
            bold: self.resolve_source(&family.bold)?,
            bold_italic: self.resolve_source(&family.bold_italic)?,
        };
        debug!("registered font family '{}'", name);
        self.families.insert(name.to_string(), resolved);
        Ok(())
    }

    /// Activate a registered family.
    pub fn set_font(&mut self, name: &str) -> Result<()> {
        if !self.families.contains_key(name) {
            return Err(Error::UnknownFontFamily(name.to_string()));
        }
        self.family = name.to_string();
        Ok(())
    }

    pub fn font_family(&self) -> &str {
        &self.family
    }

    fn resolve_source(&mut self, source: &FontSource) -> Result<FontRef> {
        match source {
            FontSource::Builtin(b) => Ok(FontRef::Builtin(*b)),
            FontSource::File(path) => {
                if let Some(id) = self.tt_by_path.get(path) {
                    return Ok(FontRef::TrueType(*id));
                }
                if !path.is_file() {
                    return Err(Error::FontFileMissing(path.clone()));
                }
                let data = fs::read(path)?;
                let num = FIRST_TRUETYPE_NUM + self.tt_fonts.len() as u32;
                let font = TrueTypeFont::from_bytes(data, num)?;
                debug!("loaded TrueType font {} from {}", font.postscript_name, path.display());
                let id = TrueTypeFontId(self.tt_fonts.len());
                self.tt_fonts.push(font);
                self.tt_by_path.insert(path.clone(), id);
                Ok(FontRef::TrueType(id))
            }
        }
    }

    fn text_style(&mut self, style: FontStyle, size: Option<f64>) -> TextStyle {
        let font = self
            .families
            .get(&self.family)
            .map(|f| f.get(style))
            .unwrap_or(FontRef::Builtin(BuiltinFont::Helvetica));
        if let FontRef::Builtin(b) = font {
            self.used_builtin.insert(b);
        }
        TextStyle {
            font,
            font_size: size.unwrap_or(self.font_size),
        }
    }

    /// Width of `text` in the active family at `size`.
    pub fn width_of(&self, text: &str, style: FontStyle, size: f64) -> f64 {
        let font = self
            .families
            .get(&self.family)
            .map(|f| f.get(style))
            .unwrap_or(FontRef::Builtin(BuiltinFont::Helvetica));
        text::measure(text, &TextStyle { font, font_size: size }, &self.tt_fonts)
    }

    // -------------------------------------------------------
    // Drawing
    // -------------------------------------------------------

    /// Draw text inside a box anchored at its top-left corner. Lines that
    /// do not fit in the box height are dropped. Returns the number of
    /// lines drawn.
    pub fn text_box(&mut self, text: &str, opts: &TextBoxOptions) -> usize {
        let style = self.text_style(opts.style, opts.size);
        let bounds = *self.current_bounds();
        let (x, y) = opts.at;
        let width = opts.width.unwrap_or(bounds.width - x);
        let height = opts.height.unwrap_or(y);

        let mut lines = text::wrap_text(text, width, &style, &self.tt_fonts);
        lines.truncate(text::lines_fitting(height, &style, &self.tt_fonts));

        let origin = (self.abs_x(x), self.abs_y(y));
        let rotation = opts.rotate.filter(|deg| *deg != 0.0);
        self.draw_lines(&lines, origin, width, opts.align, &style, rotation);
        lines.len()
    }

    /// Flow text at the cursor across the width of the current bounds,
    /// starting a new page whenever the next line does not fit.
    pub fn text(&mut self, text: &str, opts: &TextOptions) {
        let style = self.text_style(opts.style, opts.size);
        let width = self.current_bounds().width;
        let body = text::ascent(&style, &self.tt_fonts) + text::descent(&style, &self.tt_fonts);
        let lh = text::line_height(&style, &self.tt_fonts);

        for line in text::wrap_text(text, width, &style, &self.tt_fonts) {
            if self.cursor - body < 0.0 && self.cursor < self.current_bounds().height {
                self.start_new_page();
            }
            let origin = (self.abs_x(0.0), self.abs_y(self.cursor));
            self.draw_lines(&[line], origin, width, opts.align, &style, None);
            self.cursor -= lh;
        }
    }

    fn draw_lines(
        &mut self,
        lines: &[String],
        origin: (f64, f64),
        width: f64,
        align: TextAlign,
        style: &TextStyle,
        rotation: Option<f64>,
    ) {
        if lines.iter().all(|l| l.trim_end().is_empty()) {
            return;
        }
        let (ox, oy) = origin;
        let ascent = text::ascent(style, &self.tt_fonts);
        let lh = text::line_height(style, &self.tt_fonts);
        let resource = text::resource_name(style.font, &self.tt_fonts);
        let cs = &mut self.pages[self.current];

        cs.save();
        if let Some(deg) = rotation {
            let (sin, cos) = deg.to_radians().sin_cos();
            cs.transform([cos, sin, -sin, cos, ox - ox * cos + oy * sin, oy - ox * sin - oy * cos]);
        }
        cs.fill_color(self.fill);
        cs.begin_text();
        cs.set_font(&resource, style.font_size);
        for (i, line) in lines.iter().enumerate() {
            let line = line.trim_end();
            if line.is_empty() {
                continue;
            }
            let line_width = text::measure(line, style, &self.tt_fonts);
            let dx = text::align_offset(align, width, line_width);
            cs.text_position(ox + dx, oy - ascent - i as f64 * lh);
            text::show_line(cs, line, style.font, &mut self.tt_fonts);
        }
        cs.end_text();
        cs.restore();
    }

    /// Place an image. See `ImageOptions` for absolute versus flowed
    /// placement.
    pub fn image(&mut self, path: impl AsRef<Path>, opts: &ImageOptions) -> Result<()> {
        let id = self.load_image_cached(path.as_ref())?;
        let (w, h) = self.images[id.0].display_size(opts.fit);

        let (x, top) = match opts.at {
            Some(at) => at,
            None => {
                if self.cursor - h < 0.0 && self.cursor < self.current_bounds().height {
                    self.start_new_page();
                }
                let x = opts.position.offset(self.current_bounds().width, w);
                let top = self.cursor;
                self.cursor -= h;
                (x, top)
            }
        };

        let (ax, ay) = (self.abs_x(x), self.abs_y(top) - h);
        self.pages[self.current].draw_image(&id.pdf_name(), ax, ay, w, h);
        Ok(())
    }

    /// Stroke a rounded rectangle whose top-left corner is `origin`.
    pub fn stroke_rounded_rectangle(&mut self, origin: (f64, f64), width: f64, height: f64, radius: f64) {
        let (left, top) = (self.abs_x(origin.0), self.abs_y(origin.1));
        let cs = &mut self.pages[self.current];
        cs.save();
        cs.stroke_color(self.stroke);
        cs.line_width(self.line_width);
        cs.stroke_rounded_rect(left, top, width, height, radius);
        cs.restore();
    }

    /// Draw a table at the cursor, left-aligned in the current bounds,
    /// and move the cursor below it.
    pub fn table(&mut self, table: &Table) {
        if table.rows.is_empty() {
            return;
        }
        let style = self.text_style(FontStyle::Normal, table.font_size);
        let bounds = *self.current_bounds();
        let layout = table.layout(&style, &self.tt_fonts, bounds.width);
        let x = self.abs_x(0.0);

        for row in 0..table.rows.len() {
            let height = layout.heights[row];
            if self.cursor - height < 0.0 && self.cursor < bounds.height {
                self.start_new_page();
                if table.header && row > 0 {
                    self.draw_table_row(table, &layout, 0, x, &style);
                }
            }
            self.draw_table_row(table, &layout, row, x, &style);
        }
    }

    fn draw_table_row(&mut self, table: &Table, layout: &tables::TableLayout, row: usize, x: f64, style: &TextStyle) {
        let top = self.abs_y(self.cursor);
        tables::draw_row(
            table,
            layout,
            row,
            x,
            top,
            style,
            self.fill,
            &mut self.tt_fonts,
            &mut self.pages[self.current],
        );
        self.cursor -= layout.heights[row];
    }

    /// Run `body` inside a region `width` wide, placed inside the current
    /// bounds by `position`. The cursor keeps whatever position `body`
    /// leaves it at.
    pub fn span<R>(&mut self, width: f64, position: Position, body: impl FnOnce(&mut Self) -> R) -> R {
        let outer = *self.current_bounds();
        self.bounds.push(Bounds {
            left: outer.left + position.offset(outer.width, width),
            width,
            height: outer.height,
        });
        let result = body(self);
        self.bounds.pop();
        result
    }

    /// Stamp every page with `template`, replacing `<page>` and `<total>`.
    /// Leaves the document on its last page.
    pub fn number_pages(&mut self, template: &str, opts: &PageNumbering) {
        let total = self.pages.len();
        let style = self.text_style(FontStyle::Normal, opts.size);
        let body = text::ascent(&style, &self.tt_fonts) + text::descent(&style, &self.tt_fonts);
        for index in 0..total {
            self.go_to_page(index);
            let label = template
                .replace("<page>", &(index + opts.start_at).to_string())
                .replace("<total>", &total.to_string());
            self.text_box(
                &label,
                &TextBoxOptions {
                    at: opts.at,
                    width: opts.width,
                    height: Some(body),
                    size: Some(style.font_size),
                    align: opts.align,
                    ..Default::default()
                },
            );
        }
        self.go_to_page(total - 1);
    }

    fn current_bounds(&self) -> &Bounds {
        // The margin box is pushed in `new` and never popped.
        &self.bounds[self.bounds.len() - 1]
    }

    fn abs_x(&self, x: f64) -> f64 {
        self.margin + self.current_bounds().left + x
    }

    fn abs_y(&self, y: f64) -> f64 {
        self.margin + y
    }

    fn load_image_cached(&mut self, path: &Path) -> Result<ImageId> {
        if let Some(id) = self.image_by_path.get(path) {
            return Ok(*id);
        }
        let data = fs::read(path)?;
        let image = load_image(data)?;
        debug!("loaded {}x{} image from {}", image.width, image.height, path.display());
        let id = ImageId(self.images.len());
        self.images.push(image);
        self.image_by_path.insert(path.to_path_buf(), id);
        Ok(id)
    }

    fn draw_background(&mut self) {
        if let Some(id) = self.background {
            let (w, h) = self.images[id.0].display_size(None);
            let y = self.page_height - h;
            self.pages[self.current].draw_image(&id.pdf_name(), 0.0, y, w, h);
        }
    }

    // -------------------------------------------------------
    // Output
    // -------------------------------------------------------

    /// Serialize the whole document to `writer` and return it.
    pub fn write_to<W: Write>(&self, writer: W) -> Result<W> {
        let mut alloc = ObjAllocator::starting_at(FIRST_FREE_OBJ_NUM);
        let mut objects: Vec<(ObjId, PdfObject)> = Vec::new();

        let mut font_entries = Vec::new();
        for font in &self.used_builtin {
            let id = alloc.next_id();
            let mut dict = vec![
                ("Type", PdfObject::name("Font")),
                ("Subtype", PdfObject::name("Type1")),
                ("BaseFont", PdfObject::name(font.pdf_base_name())),
            ];
            if font.uses_win_ansi() {
                dict.push(("Encoding", PdfObject::name("WinAnsiEncoding")));
            }
            objects.push((id, PdfObject::dict(dict)));
            font_entries.push((font.pdf_name().to_string(), id));
        }
        for font in self.tt_fonts.iter().filter(|f| !f.used_glyphs.is_empty()) {
            let (id, embedded) = font.embed(&mut alloc, self.compress)?;
            objects.extend(embedded);
            font_entries.push((font.pdf_name.clone(), id));
        }

        let mut image_entries = Vec::new();
        for (index, image) in self.images.iter().enumerate() {
            let (id, embedded) = image.embed(&mut alloc, self.compress)?;
            objects.extend(embedded);
            image_entries.push((ImageId(index).pdf_name(), id));
        }

        let resources_id = alloc.next_id();
        let mut resources = Vec::new();
        if !font_entries.is_empty() {
            resources.push(("Font", named_refs(&font_entries)));
        }
        if !image_entries.is_empty() {
            resources.push(("XObject", named_refs(&image_entries)));
        }
        objects.push((resources_id, PdfObject::dict(resources)));

        let mut kids = Vec::with_capacity(self.pages.len());
        for content in &self.pages {
            let content_id = alloc.next_id();
            let page_id = alloc.next_id();
            let stream = PdfObject::stream_with(vec![], content.as_bytes().to_vec(), self.compress)?;
            let page = PdfObject::dict(vec![
                ("Type", PdfObject::name("Page")),
                ("Parent", PAGES_OBJ.into()),
                ("MediaBox", PdfObject::reals(&[0.0, 0.0, self.page_width, self.page_height])),
                ("Resources", resources_id.into()),
                ("Contents", content_id.into()),
            ]);
            objects.push((content_id, stream));
            objects.push((page_id, page));
            kids.push(PdfObject::from(page_id));
        }

        let info_id = if self.info.is_empty() {
            None
        } else {
            let id = alloc.next_id();
            let entries = self
                .info
                .iter()
                .map(|(k, v)| (k.as_str(), PdfObject::literal_string(v)))
                .collect();
            objects.push((id, PdfObject::dict(entries)));
            Some(id)
        };

        objects.push((
            PAGES_OBJ,
            PdfObject::dict(vec![
                ("Type", PdfObject::name("Pages")),
                ("Kids", PdfObject::array(kids)),
                ("Count", PdfObject::Integer(self.pages.len() as i64)),
            ]),
        ));
        objects.push((
            CATALOG_OBJ,
            PdfObject::dict(vec![("Type", PdfObject::name("Catalog")), ("Pages", PAGES_OBJ.into())]),
        ));
        objects.sort_by_key(|(id, _)| *id);

        let mut out = PdfWriter::new(writer);
        out.write_header()?;
        for (id, obj) in &objects {
            out.write_object(*id, obj)?;
        }
        out.write_xref_and_trailer(CATALOG_OBJ, info_id)?;
        debug!("wrote PDF with {} page(s), {} objects", self.pages.len(), objects.len());
        Ok(out.into_inner())
    }

    /// Serialize to an in-memory buffer.
    pub fn render(&self) -> Result<Vec<u8>> {
        self.write_to(Vec::new())
    }

    pub fn render_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let bytes = self.render()?;
        fs::write(path, bytes)?;
        Ok(())
    }
}

fn builtin_family(family: &FontFamily) -> ResolvedFamily {
    let pick = |source: &FontSource| match source {
        FontSource::Builtin(b) => FontRef::Builtin(*b),
        FontSource::File(_) => FontRef::Builtin(BuiltinFont::Helvetica),
    };
    ResolvedFamily {
        normal: pick(&family.normal),
        italic: pick(&family.italic),
        bold: pick(&family.bold),
        bold_italic: pick(&family.bold_italic),
    }
}

fn named_refs(entries: &[(String, ObjId)]) -> PdfObject {
    PdfObject::Dictionary(
        entries
            .iter()
            .map(|(name, id)| (name.clone(), PdfObject::from(*id)))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letter_margin_box_is_540_by_720() {
        let doc = PdfDocument::new(PageSize::Letter);
        let bounds = doc.bounds();
        assert_eq!((bounds.width, bounds.height), (540.0, 720.0));
        assert_eq!(doc.cursor(), 720.0);
    }

    #[test]
    fn span_narrows_and_restores_bounds() {
        let mut doc = PdfDocument::new(PageSize::Letter);
        let inner = doc.span(200.0, Position::Right, |d| d.bounds());
        assert_eq!((inner.left, inner.width), (340.0, 200.0));
        assert_eq!(doc.bounds().width, 540.0);
    }

    #[test]
    fn text_box_drops_lines_below_the_box() {
        let mut doc = PdfDocument::new(PageSize::Letter);
        let drawn = doc.text_box(
            "a\nb\nc\nd",
            &TextBoxOptions {
                at: (0.0, 100.0),
                height: Some(22.0),
                size: Some(10.0),
                ..Default::default()
            },
        );
        assert_eq!(drawn, 2);
    }

    #[test]
    fn flowed_text_breaks_pages() {
        let mut doc = PdfDocument::new(PageSize::Letter);
        doc.move_down(715.0);
        doc.text("overflow", &TextOptions::default());
        assert_eq!(doc.page_count(), 2);
        assert_eq!(doc.page_number(), 1);
    }

    #[test]
    fn unknown_family_is_rejected() {
        let mut doc = PdfDocument::new(PageSize::Letter);
        assert!(matches!(doc.set_font("Overpass"), Err(Error::UnknownFontFamily(_))));
        assert!(doc.set_font("Courier").is_ok());
    }

    #[test]
    fn missing_font_file_is_reported() {
        let mut doc = PdfDocument::new(PageSize::Letter);
        let result = doc.register_font_family("x", FontFamily::single_file("/no/such/font.ttf"));
        assert!(matches!(result, Err(Error::FontFileMissing(_))));
    }
}
