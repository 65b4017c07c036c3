use std::path::{Path, PathBuf};

/// Index into the document's TrueType font list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TrueTypeFontId(pub usize);

/// Unified font reference: either a builtin PDF font or a loaded
/// TrueType font.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FontRef {
    Builtin(BuiltinFont),
    TrueType(TrueTypeFontId),
}

impl From<BuiltinFont> for FontRef {
    fn from(font: BuiltinFont) -> Self {
        FontRef::Builtin(font)
    }
}

/// Font identifier for the 14 standard PDF fonts.
/// These fonts are guaranteed available in all PDF viewers
/// without embedding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BuiltinFont {
    Helvetica,
    HelveticaBold,
    HelveticaOblique,
    HelveticaBoldOblique,
    TimesRoman,
    TimesBold,
    TimesItalic,
    TimesBoldItalic,
    Courier,
    CourierBold,
    CourierOblique,
    CourierBoldOblique,
    Symbol,
    ZapfDingbats,
}

impl BuiltinFont {
    /// Returns the PDF resource name used in content streams
    /// (e.g. "F1"). Fixed mapping by variant order.
    pub fn pdf_name(&self) -> &'static str {
        match self {
            BuiltinFont::Helvetica => "F1",
            BuiltinFont::HelveticaBold => "F2",
            BuiltinFont::HelveticaOblique => "F3",
            BuiltinFont::HelveticaBoldOblique => "F4",
            BuiltinFont::TimesRoman => "F5",
            BuiltinFont::TimesBold => "F6",
            BuiltinFont::TimesItalic => "F7",
            BuiltinFont::TimesBoldItalic => "F8",
            BuiltinFont::Courier => "F9",
            BuiltinFont::CourierBold => "F10",
            BuiltinFont::CourierOblique => "F11",
            BuiltinFont::CourierBoldOblique => "F12",
            BuiltinFont::Symbol => "F13",
            BuiltinFont::ZapfDingbats => "F14",
        }
    }

    /// Returns the PDF BaseFont name (e.g. "Helvetica",
    /// "Times-Roman").
    pub fn pdf_base_name(&self) -> &'static str {
        match self {
            BuiltinFont::Helvetica => "Helvetica",
            BuiltinFont::HelveticaBold => "Helvetica-Bold",
            BuiltinFont::HelveticaOblique => "Helvetica-Oblique",
            BuiltinFont::HelveticaBoldOblique => "Helvetica-BoldOblique",
            BuiltinFont::TimesRoman => "Times-Roman",
            BuiltinFont::TimesBold => "Times-Bold",
            BuiltinFont::TimesItalic => "Times-Italic",
            BuiltinFont::TimesBoldItalic => "Times-BoldItalic",
            BuiltinFont::Courier => "Courier",
            BuiltinFont::CourierBold => "Courier-Bold",
            BuiltinFont::CourierOblique => "Courier-Oblique",
            BuiltinFont::CourierBoldOblique => "Courier-BoldOblique",
            BuiltinFont::Symbol => "Symbol",
            BuiltinFont::ZapfDingbats => "ZapfDingbats",
        }
    }

    /// Symbol and ZapfDingbats carry their own built-in encoding;
    /// every other standard font is written with WinAnsiEncoding.
    pub(crate) fn uses_win_ansi(&self) -> bool {
        !matches!(self, BuiltinFont::Symbol | BuiltinFont::ZapfDingbats)
    }
}

// Advance widths for ASCII 32..=126 in 1/1000 em, from the Adobe AFM files.
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

const TIMES_ROMAN_WIDTHS: [u16; 95] = [
    250, 333, 408, 500, 500, 833, 778, 180, 333, 333, 500, 564, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500, 278, 278, 564, 564, 564, 444,
    921, 722, 667, 667, 722, 611, 556, 722, 722, 333, 389, 722, 611, 889, 722, 722,
    556, 722, 667, 556, 611, 722, 722, 944, 722, 722, 611, 333, 278, 333, 469, 500,
    333, 444, 500, 444, 500, 444, 333, 500, 500, 278, 278, 500, 278, 778, 500, 500,
    500, 500, 333, 389, 278, 500, 500, 722, 500, 500, 444, 480, 200, 480, 541,
];

const TIMES_BOLD_WIDTHS: [u16; 95] = [
    250, 333, 555, 500, 500, 1000, 833, 278, 333, 333, 500, 570, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500, 333, 333, 570, 570, 570, 500,
    930, 722, 667, 722, 722, 667, 611, 778, 778, 389, 500, 778, 667, 944, 722, 778,
    611, 778, 722, 556, 667, 722, 722, 1000, 722, 722, 667, 333, 278, 333, 581, 500,
    333, 500, 556, 444, 556, 444, 333, 500, 556, 278, 333, 556, 278, 833, 556, 500,
    556, 556, 444, 389, 333, 556, 500, 722, 500, 500, 444, 394, 220, 394, 520,
];

const TIMES_ITALIC_WIDTHS: [u16; 95] = [
    250, 333, 420, 500, 500, 833, 778, 214, 333, 333, 500, 675, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500, 333, 333, 675, 675, 675, 500,
    920, 611, 611, 667, 722, 611, 611, 722, 722, 333, 444, 667, 556, 833, 667, 722,
    611, 722, 611, 500, 556, 722, 611, 833, 611, 556, 556, 389, 278, 389, 422, 500,
    333, 500, 500, 444, 500, 444, 278, 500, 500, 278, 278, 444, 278, 722, 500, 500,
    500, 500, 389, 389, 278, 500, 444, 667, 444, 444, 389, 400, 275, 400, 541,
];

const TIMES_BOLD_ITALIC_WIDTHS: [u16; 95] = [
    250, 389, 555, 500, 500, 833, 778, 278, 333, 333, 500, 570, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500, 333, 333, 570, 570, 570, 500,
    832, 667, 667, 667, 722, 667, 667, 722, 778, 389, 500, 667, 611, 889, 722, 722,
    611, 722, 667, 556, 611, 722, 667, 889, 667, 611, 611, 333, 278, 333, 570, 500,
    333, 500, 500, 444, 500, 444, 333, 500, 556, 278, 278, 500, 278, 778, 556, 500,
    556, 556, 389, 389, 278, 556, 444, 667, 500, 444, 389, 348, 220, 348, 570,
];

/// Courier uses a uniform width of 600 for all characters.
const COURIER_WIDTH: u16 = 600;

/// Default width for characters outside the mapped range (1/1000 em).
const DEFAULT_WIDTH: u16 = 278;

/// Font metrics for built-in PDF fonts.
pub struct FontMetrics;

impl FontMetrics {
    /// Returns the width of a character in 1/1000 em units.
    pub fn char_width(font: BuiltinFont, ch: char) -> u16 {
        match font {
            BuiltinFont::Courier
            | BuiltinFont::CourierBold
            | BuiltinFont::CourierOblique
            | BuiltinFont::CourierBoldOblique => return COURIER_WIDTH,
            BuiltinFont::Symbol | BuiltinFont::ZapfDingbats => return DEFAULT_WIDTH,
            _ => {}
        }

        let code = ch as u32;
        if !(32..=126).contains(&code) {
            return DEFAULT_WIDTH;
        }
        let index = (code - 32) as usize;
        match font {
            BuiltinFont::Helvetica | BuiltinFont::HelveticaOblique => HELVETICA_WIDTHS[index],
            BuiltinFont::HelveticaBold | BuiltinFont::HelveticaBoldOblique => {
                HELVETICA_BOLD_WIDTHS[index]
            }
            BuiltinFont::TimesRoman => TIMES_ROMAN_WIDTHS[index],
            BuiltinFont::TimesBold => TIMES_BOLD_WIDTHS[index],
            BuiltinFont::TimesItalic => TIMES_ITALIC_WIDTHS[index],
            BuiltinFont::TimesBoldItalic => TIMES_BOLD_ITALIC_WIDTHS[index],
            _ => DEFAULT_WIDTH,
        }
    }

    /// Measures the width of a text string in points.
    pub fn measure_text(text: &str, font: BuiltinFont, font_size: f64) -> f64 {
        let total: u32 = text.chars().map(|ch| Self::char_width(font, ch) as u32).sum();
        total as f64 * font_size / 1000.0
    }

    /// Vertical metrics in 1/1000 em: (ascender, descender, line spacing).
    /// Line spacing is the AFM FontBBox height, so consecutive lines
    /// include the font's line gap.
    fn vertical(font: BuiltinFont) -> (f64, f64, f64) {
        match font {
            BuiltinFont::Helvetica | BuiltinFont::HelveticaOblique => (718.0, -207.0, 1156.0),
            BuiltinFont::HelveticaBold | BuiltinFont::HelveticaBoldOblique => {
                (718.0, -207.0, 1190.0)
            }
            BuiltinFont::TimesRoman => (683.0, -217.0, 1116.0),
            BuiltinFont::TimesBold => (683.0, -217.0, 1153.0),
            BuiltinFont::TimesItalic => (683.0, -217.0, 1100.0),
            BuiltinFont::TimesBoldItalic => (683.0, -217.0, 1139.0),
            BuiltinFont::Courier | BuiltinFont::CourierOblique => (629.0, -157.0, 1055.0),
            BuiltinFont::CourierBold | BuiltinFont::CourierBoldOblique => {
                (629.0, -157.0, 1051.0)
            }
            BuiltinFont::Symbol => (1010.0, -293.0, 1303.0),
            BuiltinFont::ZapfDingbats => (820.0, -143.0, 963.0),
        }
    }

    /// Distance from the top of a line to its baseline, in points.
    pub fn ascent(font: BuiltinFont, font_size: f64) -> f64 {
        Self::vertical(font).0 * font_size / 1000.0
    }

    /// Distance below the baseline, in points (positive).
    pub fn descent(font: BuiltinFont, font_size: f64) -> f64 {
        -Self::vertical(font).1 * font_size / 1000.0
    }

    /// Baseline-to-baseline distance for consecutive lines.
    pub fn line_height(font: BuiltinFont, font_size: f64) -> f64 {
        Self::vertical(font).2 * font_size / 1000.0
    }
}

/// Encode text as WinAnsiEncoding bytes for a standard font.
/// Characters outside the encoding are replaced with `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars().map(win_ansi_byte).collect()
}

fn win_ansi_byte(ch: char) -> u8 {
    let code = ch as u32;
    if (32..=126).contains(&code) || (0xA0..=0xFF).contains(&code) {
        return code as u8;
    }
    match ch {
        '€' => 0x80,
        '‚' => 0x82,
        'ƒ' => 0x83,
        '„' => 0x84,
        '…' => 0x85,
        '†' => 0x86,
        '‡' => 0x87,
        'ˆ' => 0x88,
        '‰' => 0x89,
        'Š' => 0x8A,
        '‹' => 0x8B,
        'Œ' => 0x8C,
        'Ž' => 0x8E,
        '‘' => 0x91,
        '’' => 0x92,
        '“' => 0x93,
        '”' => 0x94,
        '•' => 0x95,
        '–' => 0x96,
        '—' => 0x97,
        '˜' => 0x98,
        '™' => 0x99,
        'š' => 0x9A,
        '›' => 0x9B,
        'œ' => 0x9C,
        'ž' => 0x9E,
        'Ÿ' => 0x9F,
        '\t' => b' ',
        _ => b'?',
    }
}

/// Style variant within a font family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
    Bold,
    BoldItalic,
}

/// Where a family variant's glyphs come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FontSource {
    Builtin(BuiltinFont),
    /// A TrueType file on disk, embedded when used.
    File(PathBuf),
}

/// A named set of four style variants, registered on a document
/// and activated by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontFamily {
    pub normal: FontSource,
    pub italic: FontSource,
    pub bold: FontSource,
    pub bold_italic: FontSource,
}

impl FontFamily {
    /// A family whose four variants all use the same TrueType file.
    pub fn single_file(path: impl AsRef<Path>) -> Self {
        let source = FontSource::File(path.as_ref().to_path_buf());
        FontFamily {
            normal: source.clone(),
            italic: source.clone(),
            bold: source.clone(),
            bold_italic: source,
        }
    }

    pub fn helvetica() -> Self {
        Self::builtin(
            BuiltinFont::Helvetica,
            BuiltinFont::HelveticaOblique,
            BuiltinFont::HelveticaBold,
            BuiltinFont::HelveticaBoldOblique,
        )
    }

    pub fn times() -> Self {
        Self::builtin(
            BuiltinFont::TimesRoman,
            BuiltinFont::TimesItalic,
            BuiltinFont::TimesBold,
            BuiltinFont::TimesBoldItalic,
        )
    }

    pub fn courier() -> Self {
        Self::builtin(
            BuiltinFont::Courier,
            BuiltinFont::CourierOblique,
            BuiltinFont::CourierBold,
            BuiltinFont::CourierBoldOblique,
        )
    }

    fn builtin(normal: BuiltinFont, italic: BuiltinFont, bold: BuiltinFont, bold_italic: BuiltinFont) -> Self {
        FontFamily {
            normal: FontSource::Builtin(normal),
            italic: FontSource::Builtin(italic),
            bold: FontSource::Builtin(bold),
            bold_italic: FontSource::Builtin(bold_italic),
        }
    }

    /// The source for a given style.
    pub fn source(&self, style: FontStyle) -> &FontSource {
        match style {
            FontStyle::Normal => &self.normal,
            FontStyle::Italic => &self.italic,
            FontStyle::Bold => &self.bold,
            FontStyle::BoldItalic => &self.bold_italic,
        }
    }
}
