use std::collections::{BTreeMap, BTreeSet};
use std::io;

use crate::error::{Error, Result};
use crate::objects::{ObjAllocator, ObjId, PdfObject};

/// A loaded TrueType font with parsed metrics and glyph data.
pub struct TrueTypeFont {
    pub(crate) postscript_name: String,
    pub(crate) font_data: Vec<u8>,
    pub(crate) units_per_em: u16,
    pub(crate) ascent: i16,
    pub(crate) descent: i16,
    pub(crate) line_gap: i16,
    pub(crate) bbox: [i16; 4],
    pub(crate) cap_height: i16,
    pub(crate) italic_angle: f64,
    pub(crate) flags: u32,
    pub(crate) stem_v: i16,
    /// Unicode codepoint -> glyph ID
    pub(crate) cmap: BTreeMap<u32, u16>,
    /// Glyph ID -> advance width in font units
    pub(crate) glyph_widths: BTreeMap<u16, u16>,
    pub(crate) default_width: u16,
    /// Glyph IDs that have been drawn, for the /W array and ToUnicode.
    pub(crate) used_glyphs: BTreeSet<u16>,
    /// Glyph ID -> Unicode codepoint (for ToUnicode CMap)
    pub(crate) glyph_to_unicode: BTreeMap<u16, u32>,
    /// PDF resource name (e.g. "F15")
    pub(crate) pdf_name: String,
}

impl TrueTypeFont {
    /// Parse a TrueType font from raw .ttf bytes.
    pub fn from_bytes(data: Vec<u8>, font_num: u32) -> Result<Self> {
        let face = ttf_parser::Face::parse(&data, 0)
            .map_err(|e| Error::Font(format!("failed to parse TTF: {}", e)))?;

        let units_per_em = face.units_per_em();
        let ascent = face.ascender();
        let descent = face.descender();
        let bbox = face.global_bounding_box();

        let postscript_name = extract_name(&face, ttf_parser::name_id::POST_SCRIPT_NAME)
            .or_else(|| extract_name(&face, ttf_parser::name_id::FAMILY))
            .map(|n| sanitize_pdf_name(&n))
            .unwrap_or_else(|| format!("EmbeddedFont{}", font_num));

        let mut cmap = BTreeMap::new();
        let mut glyph_to_unicode = BTreeMap::new();
        let subtables = face
            .tables()
            .cmap
            .ok_or_else(|| Error::Font("font has no cmap table".to_string()))?;
        for subtable in subtables.subtables {
            if !subtable.is_unicode() {
                continue;
            }
            subtable.codepoints(|cp| {
                if let Some(gid) = subtable.glyph_index(cp) {
                    cmap.insert(cp, gid.0);
                    glyph_to_unicode.entry(gid.0).or_insert(cp);
                }
            });
        }

        let glyph_widths: BTreeMap<u16, u16> = (0..face.number_of_glyphs())
            .map(|gid| {
                let width = face.glyph_hor_advance(ttf_parser::GlyphId(gid)).unwrap_or(0);
                (gid, width)
            })
            .collect();
        // Glyph 0 is .notdef; its width is the fallback.
        let default_width = glyph_widths.get(&0).copied().unwrap_or(0);

        Ok(TrueTypeFont {
            postscript_name,
            units_per_em,
            ascent,
            descent,
            line_gap: face.line_gap(),
            bbox: [bbox.x_min, bbox.y_min, bbox.x_max, bbox.y_max],
            cap_height: face.capital_height().unwrap_or(ascent),
            italic_angle: face.italic_angle() as f64,
            flags: compute_flags(&face),
            stem_v: estimate_stem_v(&face),
            cmap,
            glyph_widths,
            default_width,
            used_glyphs: BTreeSet::new(),
            glyph_to_unicode,
            pdf_name: format!("F{}", font_num),
            font_data: data,
        })
    }

    /// Scale a raw font unit value to PDF units (1/1000 of text space).
    fn scale_to_pdf(&self, value: i16) -> i64 {
        (value as i64 * 1000) / self.units_per_em as i64
    }

    fn glyph_width_pdf(&self, gid: u16) -> u16 {
        let raw = self.glyph_widths.get(&gid).copied().unwrap_or(self.default_width);
        ((raw as u32 * 1000) / self.units_per_em as u32) as u16
    }

    /// Measure text width in points.
    pub fn measure_text(&self, text: &str, font_size: f64) -> f64 {
        let total: u32 = text
            .chars()
            .map(|ch| {
                let gid = self.cmap.get(&(ch as u32)).copied().unwrap_or(0);
                self.glyph_width_pdf(gid) as u32
            })
            .sum();
        total as f64 * font_size / 1000.0
    }

    pub fn ascent(&self, font_size: f64) -> f64 {
        self.ascent as f64 / self.units_per_em as f64 * font_size
    }

    /// Distance below the baseline, in points (positive).
    pub fn descent(&self, font_size: f64) -> f64 {
        -(self.descent as f64) / self.units_per_em as f64 * font_size
    }

    /// Baseline-to-baseline distance: ascent - descent + line gap.
    pub fn line_height(&self, font_size: f64) -> f64 {
        let units = self.ascent as i32 - self.descent as i32 + self.line_gap as i32;
        units as f64 / self.units_per_em as f64 * font_size
    }

    /// Encode text as hex glyph IDs (`<0048006C>`), recording each
    /// glyph as used.
    pub fn encode_text_hex(&mut self, text: &str) -> String {
        let mut hex = String::with_capacity(text.len() * 4 + 2);
        hex.push('<');
        for ch in text.chars() {
            let gid = self.cmap.get(&(ch as u32)).copied().unwrap_or(0);
            self.used_glyphs.insert(gid);
            hex.push_str(&format!("{:04X}", gid));
        }
        hex.push('>');
        hex
    }

    /// Build the PDF /W array for used glyphs, grouping consecutive
    /// glyph IDs: `[cid [w1 w2 ...] cid [w1 w2 ...] ...]`.
    fn build_w_array(&self) -> Vec<PdfObject> {
        let sorted: Vec<u16> = self.used_glyphs.iter().copied().collect();
        let mut result = Vec::new();
        let mut i = 0;
        while i < sorted.len() {
            let start = sorted[i];
            let mut widths = Vec::new();
            let mut j = i;
            while j < sorted.len() && sorted[j] as usize == start as usize + (j - i) {
                widths.push(PdfObject::Integer(self.glyph_width_pdf(sorted[j]) as i64));
                j += 1;
            }
            result.push(PdfObject::Integer(start as i64));
            result.push(PdfObject::Array(widths));
            i = j;
        }
        result
    }

    /// Build the ToUnicode CMap stream bytes.
    fn build_tounicode_cmap(&self) -> Vec<u8> {
        let mut cmap = String::from(
            "/CIDInit /ProcSet findresource begin\n\
             12 dict begin\n\
             begincmap\n\
             /CIDSystemInfo << /Registry (Adobe) /Ordering (UCS) /Supplement 0 >> def\n\
             /CMapName /Adobe-Identity-UCS def\n\
             /CMapType 2 def\n\
             1 begincodespacerange\n\
             <0000> <FFFF>\n\
             endcodespacerange\n",
        );

        let mappings: Vec<(u16, u32)> = self
            .used_glyphs
            .iter()
            .filter_map(|&gid| self.glyph_to_unicode.get(&gid).map(|&cp| (gid, cp)))
            .collect();

        // At most 100 entries per beginbfchar block.
        for chunk in mappings.chunks(100) {
            cmap.push_str(&format!("{} beginbfchar\n", chunk.len()));
            for &(gid, cp) in chunk {
                let utf16: Vec<u16> = char::from_u32(cp)
                    .map(|c| {
                        let mut buf = [0u16; 2];
                        c.encode_utf16(&mut buf).to_vec()
                    })
                    .unwrap_or_default();
                let dst: String = utf16.iter().map(|u| format!("{:04X}", u)).collect();
                cmap.push_str(&format!("<{:04X}> <{}>\n", gid, dst));
            }
            cmap.push_str("endbfchar\n");
        }

        cmap.push_str(
            "endcmap\n\
             CMapName currentdict /CMap defineresource pop\n\
             end\n\
             end\n",
        );
        cmap.into_bytes()
    }

    /// Produce the Type0 font and its descendant objects. Returns the
    /// Type0 font's id plus every object to write.
    pub(crate) fn embed(
        &self,
        alloc: &mut ObjAllocator,
        compress: bool,
    ) -> io::Result<(ObjId, Vec<(ObjId, PdfObject)>)> {
        let type0_id = alloc.next_id();
        let cid_id = alloc.next_id();
        let descriptor_id = alloc.next_id();
        let file_id = alloc.next_id();
        let tounicode_id = alloc.next_id();

        let font_file = PdfObject::stream_with(
            vec![("Length1", PdfObject::Integer(self.font_data.len() as i64))],
            self.font_data.clone(),
            compress,
        )?;

        let descriptor = PdfObject::dict(vec![
            ("Type", PdfObject::name("FontDescriptor")),
            ("FontName", PdfObject::name(&self.postscript_name)),
            ("Flags", PdfObject::Integer(self.flags as i64)),
            (
                "FontBBox",
                PdfObject::array(self.bbox.iter().map(|v| PdfObject::Integer(self.scale_to_pdf(*v))).collect()),
            ),
            ("ItalicAngle", PdfObject::Real(self.italic_angle)),
            ("Ascent", PdfObject::Integer(self.scale_to_pdf(self.ascent))),
            ("Descent", PdfObject::Integer(self.scale_to_pdf(self.descent))),
            ("CapHeight", PdfObject::Integer(self.scale_to_pdf(self.cap_height))),
            ("StemV", PdfObject::Integer(self.stem_v as i64)),
            ("FontFile2", file_id.into()),
        ]);

        let cid_font = PdfObject::dict(vec![
            ("Type", PdfObject::name("Font")),
            ("Subtype", PdfObject::name("CIDFontType2")),
            ("BaseFont", PdfObject::name(&self.postscript_name)),
            (
                "CIDSystemInfo",
                PdfObject::dict(vec![
                    ("Registry", PdfObject::literal_string("Adobe")),
                    ("Ordering", PdfObject::literal_string("Identity")),
                    ("Supplement", PdfObject::Integer(0)),
                ]),
            ),
            ("FontDescriptor", descriptor_id.into()),
            ("DW", PdfObject::Integer(self.glyph_width_pdf(0) as i64)),
            ("W", PdfObject::Array(self.build_w_array())),
            ("CIDToGIDMap", PdfObject::name("Identity")),
        ]);

        let tounicode = PdfObject::stream_with(vec![], self.build_tounicode_cmap(), compress)?;

        let type0 = PdfObject::dict(vec![
            ("Type", PdfObject::name("Font")),
            ("Subtype", PdfObject::name("Type0")),
            ("BaseFont", PdfObject::name(&self.postscript_name)),
            ("Encoding", PdfObject::name("Identity-H")),
            ("DescendantFonts", PdfObject::array(vec![cid_id.into()])),
            ("ToUnicode", tounicode_id.into()),
        ]);

        Ok((
            type0_id,
            vec![
                (type0_id, type0),
                (cid_id, cid_font),
                (descriptor_id, descriptor),
                (file_id, font_file),
                (tounicode_id, tounicode),
            ],
        ))
    }
}

fn extract_name(face: &ttf_parser::Face, name_id: u16) -> Option<String> {
    face.names()
        .into_iter()
        .find(|name| name.name_id == name_id && name.is_unicode())
        .and_then(|name| name.to_string())
}

/// Keep only characters that are safe inside a PDF name token.
fn sanitize_pdf_name(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .collect()
}

/// Compute PDF font descriptor flags from the font tables.
fn compute_flags(face: &ttf_parser::Face) -> u32 {
    // Bit 6 (32): Nonsymbolic, true for Latin text fonts.
    let mut flags = 32u32;
    if face.is_monospaced() {
        flags |= 1;
    }
    if face.is_italic() {
        flags |= 64;
    }
    flags
}

/// Estimate StemV from the font's weight class.
fn estimate_stem_v(face: &ttf_parser::Face) -> i16 {
    let w = face.weight().to_number() as f64 / 1000.0;
    (10.0 + 220.0 * w * w) as i16
}
