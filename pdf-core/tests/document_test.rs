use pdf_core::{
    Error, FontStyle, PageNumbering, PageSize, PdfDocument, TextAlign, TextBoxOptions, TextOptions,
};

/// Check whether a byte pattern exists in the buffer.
fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}

fn letter() -> PdfDocument {
    PdfDocument::new(PageSize::Letter)
}

fn boxed(at: (f64, f64), size: f64) -> TextBoxOptions {
    TextBoxOptions {
        at,
        size: Some(size),
        ..Default::default()
    }
}

// -------------------------------------------------------
// Structure
// -------------------------------------------------------

#[test]
fn empty_document_is_a_single_letter_page() {
    let bytes = letter().render().unwrap();
    assert!(bytes.starts_with(b"%PDF-1.7\n"));
    assert!(bytes.ends_with(b"%%EOF\n"));
    assert!(contains(&bytes, b"/MediaBox [0.0 0.0 612.0 792.0]"));
    assert!(contains(&bytes, b"/Count 1"));
    assert!(contains(&bytes, b"<< /Type /Catalog /Pages 2 0 R >>"));
}

#[test]
fn info_entries_are_written_once() {
    let mut doc = letter();
    doc.set_info("Producer", "invoice-printer");
    doc.set_info("Title", "Invoice 1");
    doc.set_info("Title", "Invoice 2");
    let bytes = doc.render().unwrap();
    assert!(contains(&bytes, b"/Producer (invoice-printer)"));
    assert!(contains(&bytes, b"/Title (Invoice 2)"));
    assert!(!contains(&bytes, b"(Invoice 1)"));
    assert!(contains(&bytes, b"/Info "));
}

#[test]
fn rendering_is_deterministic() {
    let build = || {
        let mut doc = letter();
        doc.text_box("Invoice", &boxed((0.0, 720.0), 20.0));
        doc.text("flowed", &TextOptions::default());
        doc.render().unwrap()
    };
    assert_eq!(build(), build());
}

fn find(haystack: &[u8], needle: &[u8], from: usize) -> usize {
    from + haystack[from..].windows(needle.len()).position(|w| w == needle).unwrap()
}

#[test]
fn compression_deflates_page_content() {
    let build = |compress: bool| {
        let mut doc = letter();
        doc.set_compression(compress);
        for row in 0..40 {
            doc.text_box("Hello", &boxed((0.0, 700.0 - row as f64 * 14.0), 12.0));
        }
        doc.render().unwrap()
    };
    let plain = build(false);
    let bytes = build(true);
    assert!(contains(&bytes, b"/Filter /FlateDecode"));
    assert!(!contains(&plain, b"/FlateDecode"));
    assert!(bytes.len() < plain.len());

    let filter = find(&bytes, b"/Filter /FlateDecode", 0);
    let start = find(&bytes, b"stream\n", filter) + b"stream\n".len();
    let end = find(&bytes, b"\nendstream", start);
    let mut content = Vec::new();
    std::io::Read::read_to_end(&mut flate2::read::ZlibDecoder::new(&bytes[start..end]), &mut content).unwrap();
    assert_eq!(content.windows(10).filter(|w| *w == b"(Hello) Tj").count(), 40);
}

#[test]
fn render_to_file_matches_render() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.pdf");
    let mut doc = letter();
    doc.text_box("Saved", &boxed((0.0, 700.0), 12.0));
    doc.render_to_file(&path).unwrap();
    assert_eq!(std::fs::read(&path).unwrap(), doc.render().unwrap());
}

// -------------------------------------------------------
// Text
// -------------------------------------------------------

#[test]
fn text_box_is_anchored_at_its_top_left_corner() {
    let mut doc = letter();
    doc.text_box("Invoice", &boxed((0.0, 720.0), 20.0));
    let bytes = doc.render().unwrap();
    assert!(contains(&bytes, b"/F1 20 Tf"));
    // Baseline sits one ascent (718/1000 em) below the top of the box.
    assert!(contains(&bytes, b"1 0 0 1 36 741.64 Tm\n(Invoice) Tj"));
    assert!(contains(&bytes, b"/BaseFont /Helvetica /Encoding /WinAnsiEncoding"));
}

#[test]
fn right_alignment_ends_at_the_box_edge() {
    let mut doc = letter();
    // "200" is 3 x 556/1000 em wide at 10pt.
    assert!((doc.width_of("200", FontStyle::Normal, 10.0) - 16.68).abs() < 1e-9);
    doc.text_box(
        "200",
        &TextBoxOptions {
            at: (100.0, 500.0),
            width: Some(100.0),
            size: Some(10.0),
            align: TextAlign::Right,
            ..Default::default()
        },
    );
    let bytes = doc.render().unwrap();
    assert!(contains(&bytes, b"1 0 0 1 219.32 "));
}

#[test]
fn rotated_text_box_uses_a_transform() {
    let mut doc = letter();
    doc.set_fill_color("ff0000").unwrap();
    doc.text_box(
        "DRAFT",
        &TextBoxOptions {
            at: (220.0, 710.0),
            size: Some(20.0),
            rotate: Some(20.0),
            ..Default::default()
        },
    );
    let bytes = doc.render().unwrap();
    assert!(contains(&bytes, b"0.9397 0.342 -0.342 0.9397 "));
    assert!(contains(&bytes, b"1 0 0 rg\nBT"));
    assert!(contains(&bytes, b"(DRAFT) Tj"));
}

#[test]
fn bold_style_uses_the_family_bold_face() {
    let mut doc = letter();
    doc.text(
        "Total:   $ 200",
        &TextOptions {
            size: Some(16.0),
            align: TextAlign::Right,
            style: FontStyle::Bold,
        },
    );
    let bytes = doc.render().unwrap();
    assert!(contains(&bytes, b"/BaseFont /Helvetica-Bold"));
    assert!(contains(&bytes, b"(Total:   $ 200) Tj"));
}

#[test]
fn flowed_text_advances_the_cursor() {
    let mut doc = letter();
    doc.text("one\ntwo", &TextOptions::default());
    assert!(doc.cursor() < 720.0 - 2.0 * 12.0);
}

#[test]
fn builtin_families_can_be_activated() {
    let mut doc = letter();
    doc.set_font("Times-Roman").unwrap();
    doc.text_box("Serif", &boxed((0.0, 700.0), 12.0));
    let bytes = doc.render().unwrap();
    assert!(contains(&bytes, b"/BaseFont /Times-Roman"));
    assert!(!contains(&bytes, b"/BaseFont /Helvetica"));
}

#[test]
fn unknown_family_is_an_error() {
    let mut doc = letter();
    match doc.set_font("Nope") {
        Err(Error::UnknownFontFamily(name)) => assert_eq!(name, "Nope"),
        other => panic!("expected UnknownFontFamily, got {:?}", other.err()),
    }
}

#[test]
fn invalid_color_is_an_error() {
    let mut doc = letter();
    assert!(matches!(doc.set_fill_color("red"), Err(Error::Color(_))));
    assert_eq!(doc.fill_color().to_hex(), "000000");
}

// -------------------------------------------------------
// Pages
// -------------------------------------------------------

#[test]
fn number_pages_stamps_every_page() {
    let mut doc = letter();
    doc.start_new_page();
    doc.start_new_page();
    let right = doc.bounds().right();
    doc.number_pages(
        "<page> / <total>",
        &PageNumbering {
            at: (right - 50.0, 0.0),
            size: Some(12.0),
            ..Default::default()
        },
    );
    assert_eq!(doc.page_number(), 2);
    let bytes = doc.render().unwrap();
    assert!(contains(&bytes, b"(1 / 3) Tj"));
    assert!(contains(&bytes, b"(2 / 3) Tj"));
    assert!(contains(&bytes, b"(3 / 3) Tj"));
    assert!(contains(&bytes, b"/Count 3"));
}

#[test]
fn go_to_page_revisits_existing_pages() {
    let mut doc = letter();
    doc.start_new_page();
    doc.go_to_page(0);
    assert_eq!(doc.page_number(), 0);
    doc.start_new_page();
    assert_eq!(doc.page_count(), 2);
    doc.go_to_page(10);
    assert_eq!(doc.page_number(), 1);
}

#[test]
fn rounded_rectangle_uses_stroke_color() {
    let mut doc = letter();
    doc.set_stroke_color("aaaaaa").unwrap();
    doc.stroke_rounded_rectangle((0.0, 670.0), 266.0, 150.0, 6.0);
    let bytes = doc.render().unwrap();
    assert!(contains(&bytes, b"0.6667 0.6667 0.6667 RG"));
    assert!(contains(&bytes, b"42 706 m"));
    assert!(contains(&bytes, b"h\nS\n"));
}
