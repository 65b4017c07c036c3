//! Text measurement and line breaking shared by text boxes, flowed
//! text and table cells.

use crate::content::ContentStream;
use crate::fonts::{encode_win_ansi, FontMetrics, FontRef, FontStyle};
use crate::truetype::TrueTypeFont;

/// Font and size used to measure and draw a run of text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub font: FontRef,
    pub font_size: f64,
}

/// Horizontal alignment of each line inside its box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Options for `PdfDocument::text_box`.
///
/// `at` is the box's top-left corner in bounds coordinates. A missing
/// `width` extends the box to the right edge of the bounds; a missing
/// `height` extends it to the bottom of the bounds. Lines that do not fit
/// inside the height are dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextBoxOptions {
    pub at: (f64, f64),
    pub width: Option<f64>,
    pub height: Option<f64>,
    /// Font size; the document's current size when `None`.
    pub size: Option<f64>,
    pub align: TextAlign,
    /// Counter-clockwise rotation in degrees around `at`.
    pub rotate: Option<f64>,
    pub style: FontStyle,
}

/// Options for `PdfDocument::text`, which flows at the cursor.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextOptions {
    pub size: Option<f64>,
    pub align: TextAlign,
    pub style: FontStyle,
}

/// Measure a string in points.
pub(crate) fn measure(text: &str, style: &TextStyle, tt_fonts: &[TrueTypeFont]) -> f64 {
    match style.font {
        FontRef::Builtin(b) => FontMetrics::measure_text(text, b, style.font_size),
        FontRef::TrueType(id) => tt_fonts[id.0].measure_text(text, style.font_size),
    }
}

pub(crate) fn ascent(style: &TextStyle, tt_fonts: &[TrueTypeFont]) -> f64 {
    match style.font {
        FontRef::Builtin(b) => FontMetrics::ascent(b, style.font_size),
        FontRef::TrueType(id) => tt_fonts[id.0].ascent(style.font_size),
    }
}

pub(crate) fn descent(style: &TextStyle, tt_fonts: &[TrueTypeFont]) -> f64 {
    match style.font {
        FontRef::Builtin(b) => FontMetrics::descent(b, style.font_size),
        FontRef::TrueType(id) => tt_fonts[id.0].descent(style.font_size),
    }
}

pub(crate) fn line_height(style: &TextStyle, tt_fonts: &[TrueTypeFont]) -> f64 {
    match style.font {
        FontRef::Builtin(b) => FontMetrics::line_height(b, style.font_size),
        FontRef::TrueType(id) => tt_fonts[id.0].line_height(style.font_size),
    }
}

/// Number of lines of `style` that fit in `height`: the first line needs
/// ascent + descent, every further line one line height more.
pub(crate) fn lines_fitting(height: f64, style: &TextStyle, tt_fonts: &[TrueTypeFont]) -> usize {
    let body = ascent(style, tt_fonts) + descent(style, tt_fonts);
    // Tolerate rounding in callers that compute heights from line counts.
    let height = height + 1e-6;
    if height < body {
        return 0;
    }
    1 + ((height - body) / line_height(style, tt_fonts)).floor() as usize
}

/// Horizontal offset of a line inside a box `width` wide.
pub(crate) fn align_offset(align: TextAlign, width: f64, line_width: f64) -> f64 {
    match align {
        TextAlign::Left => 0.0,
        TextAlign::Center => (width - line_width) / 2.0,
        TextAlign::Right => width - line_width,
    }
}

/// Resource name of a font in the page `/Font` dictionary.
pub(crate) fn resource_name(font: FontRef, tt_fonts: &[TrueTypeFont]) -> String {
    match font {
        FontRef::Builtin(b) => b.pdf_name().to_string(),
        FontRef::TrueType(id) => tt_fonts[id.0].pdf_name.clone(),
    }
}

/// Emit one already positioned line using the font's encoding.
pub(crate) fn show_line(cs: &mut ContentStream, line: &str, font: FontRef, tt_fonts: &mut [TrueTypeFont]) {
    match font {
        FontRef::Builtin(_) => cs.show_bytes(&encode_win_ansi(line)),
        FontRef::TrueType(id) => {
            let hex = tt_fonts[id.0].encode_text_hex(line);
            cs.show_hex(&hex);
        }
    }
}

/// Break `text` into lines no wider than `width`. Explicit newlines
/// always start a new line; runs of spaces inside a line are kept;
/// words wider than `width` are split between characters.
pub(crate) fn wrap_text(text: &str, width: f64, style: &TextStyle, tt_fonts: &[TrueTypeFont]) -> Vec<String> {
    let mut lines = Vec::new();
    for para in text.split('\n') {
        wrap_paragraph(para.trim_end_matches('\r'), width, style, tt_fonts, &mut lines);
    }
    lines
}

fn wrap_paragraph(
    text: &str,
    width: f64,
    style: &TextStyle,
    tt_fonts: &[TrueTypeFont],
    out: &mut Vec<String>,
) {
    let mut line = String::new();
    for token in tokens(text) {
        let mut candidate = line.clone();
        candidate.push_str(token);
        if measure(&candidate, style, tt_fonts) <= width {
            line = candidate;
            continue;
        }

        // The token starts a new line without its leading spaces.
        let word = token.trim_start_matches(' ');
        if word.is_empty() {
            // Trailing spaces that overflow are dropped.
            continue;
        }
        if !line.is_empty() {
            out.push(std::mem::take(&mut line));
        }
        if measure(word, style, tt_fonts) <= width {
            line.push_str(word);
        } else {
            let mut pieces = break_word(word, width, style, tt_fonts);
            if let Some(last) = pieces.pop() {
                out.extend(pieces);
                line = last;
            }
        }
    }
    out.push(line);
}

/// Split a paragraph into tokens of leading spaces plus one word.
fn tokens(text: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut in_word = false;
    for (i, ch) in text.char_indices() {
        if ch == ' ' {
            if in_word {
                out.push(&text[start..i]);
                start = i;
                in_word = false;
            }
        } else {
            in_word = true;
        }
    }
    if start < text.len() {
        out.push(&text[start..]);
    }
    out
}

/// Split a single word into pieces that each fit `width`. Every piece
/// holds at least one character.
fn break_word(word: &str, width: f64, style: &TextStyle, tt_fonts: &[TrueTypeFont]) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut current = String::new();
    for ch in word.chars() {
        let mut candidate = current.clone();
        candidate.push(ch);
        if !current.is_empty() && measure(&candidate, style, tt_fonts) > width {
            pieces.push(std::mem::take(&mut current));
            current.push(ch);
        } else {
            current = candidate;
        }
    }
    if !current.is_empty() {
        pieces.push(current);
    }
    pieces
}
