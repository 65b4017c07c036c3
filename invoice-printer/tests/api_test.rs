use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use invoice_printer::{print, print_configured, render, Document, Error, Item, LabelKey, LabelOverrides, RenderOptions};

/// Check whether a byte pattern exists in the buffer.
fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}

fn write_png(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    let file = File::create(&path).unwrap();
    let mut encoder = png::Encoder::new(BufWriter::new(file), width, height);
    encoder.set_color(png::ColorType::Rgb);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header().unwrap();
    writer
        .write_image_data(&vec![90u8; (width * height * 3) as usize])
        .unwrap();
    writer.finish().unwrap();
    path
}

fn invoice() -> Document {
    Document {
        number: "198900000001".into(),
        provider_name: "Business s.r.o.".into(),
        provider_lines: "Rolnicka 1\n747 05 Opava".into(),
        purchaser_name: "Adam".into(),
        purchaser_lines: "Ostravska 2\n747 05 Opava".into(),
        issue_date: "19/03/3939".into(),
        due_date: "19/03/3939".into(),
        subtotal: "175".into(),
        tax: "5".into(),
        total: "$ 200".into(),
        items: vec![Item {
            quantity: "2".into(),
            unit: "hours".into(),
            price: "$ 25".into(),
            tax: "$ 1".into(),
            amount: "$ 100".into(),
            ..Item::new("Web consultation")
        }],
        ..Default::default()
    }
}

#[test]
fn render_produces_a_letter_pdf() {
    let bytes = render(&invoice(), &RenderOptions::default()).unwrap();
    assert!(bytes.starts_with(b"%PDF-"));
    assert!(contains(&bytes, b"/MediaBox [0.0 0.0 612.0 792.0]"));
    assert!(contains(&bytes, b"(198900000001) Tj"));
    assert!(contains(&bytes, b"(Web consultation) Tj"));
    assert!(contains(&bytes, b"(Total:   $ 200) Tj"));
    assert!(contains(&bytes, b"/BaseFont /Helvetica-Bold"));
    assert!(contains(&bytes, b"/Title (Invoice 198900000001)"));
}

#[test]
fn render_is_deterministic() {
    let a = render(&invoice(), &RenderOptions::default()).unwrap();
    let b = render(&invoice(), &RenderOptions::default()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn print_writes_what_render_returns() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("invoice.pdf");
    print(&invoice(), &path, &RenderOptions::default()).unwrap();
    let written = std::fs::read(&path).unwrap();
    assert_eq!(written, render(&invoice(), &RenderOptions::default()).unwrap());
}

#[test]
fn print_configured_writes_to_the_option_file_name() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("faktura.pdf");
    let json = format!(r#"{{"font": "times", "file_name": {}}}"#, serde_json::to_string(&path).unwrap());
    let options = RenderOptions::from_json(&json).unwrap();
    let written = print_configured(&invoice(), &options).unwrap();
    assert_eq!(written, path);
    assert_eq!(std::fs::read(&path).unwrap(), render(&invoice(), &options).unwrap());
}

#[test]
fn per_render_labels_are_used() {
    let options = RenderOptions::new().labels(LabelOverrides::new().with(LabelKey::Name, "Faktura"));
    let bytes = render(&invoice(), &options).unwrap();
    assert!(contains(&bytes, b"(Faktura) Tj"));
    assert!(contains(&bytes, b"/Title (Faktura 198900000001)"));
}

#[test]
fn missing_logo_fails_before_rendering() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("invoice.pdf");
    let options = RenderOptions::new().logo("/nonexistent");
    let err = print(&invoice(), &path, &options).unwrap_err();
    assert!(matches!(err, Error::LogoFileNotFound(ref p) if p == Path::new("/nonexistent")));
    assert!(!path.exists());
}

#[test]
fn missing_stamp_fails() {
    let options = RenderOptions::new().stamp("/nonexistent/stamp.png");
    assert!(matches!(
        render(&invoice(), &options),
        Err(Error::StampFileNotFound(_))
    ));
}

#[test]
fn logo_is_checked_before_stamp_and_font() {
    let options = RenderOptions::new()
        .logo("/nonexistent/logo.png")
        .stamp("/nonexistent/stamp.png")
        .font("/nonexistent/font.ttf");
    assert!(matches!(
        render(&invoice(), &options),
        Err(Error::LogoFileNotFound(_))
    ));
}

#[test]
fn unknown_font_fails() {
    let options = RenderOptions::new().font("/nonexistent/font.ttf");
    let err = render(&invoice(), &options).unwrap_err();
    assert!(matches!(err, Error::FontFileNotFound(_)));
    assert_eq!(err.to_string(), "Font file not found for /nonexistent/font.ttf");
}

#[test]
fn unreadable_font_file_surfaces_the_writer_error() {
    let dir = tempfile::tempdir().unwrap();
    let font = dir.path().join("broken.ttf");
    std::fs::write(&font, b"not a font").unwrap();
    let options = RenderOptions::new().font(font.to_str().unwrap());
    assert!(matches!(render(&invoice(), &options), Err(Error::Pdf(_))));
}

#[test]
fn builtin_font_is_embedded_by_name() {
    let bytes = render(&invoice(), &RenderOptions::new().font("times")).unwrap();
    assert!(contains(&bytes, b"/BaseFont /Times-Roman"));
    assert!(contains(&bytes, b"/BaseFont /Times-Bold"));
    assert!(!contains(&bytes, b"/BaseFont /Helvetica"));
}

#[test]
fn logo_and_stamp_are_placed() {
    let dir = tempfile::tempdir().unwrap();
    let logo = write_png(dir.path(), "logo.png", 400, 100);
    let stamp = write_png(dir.path(), "stamp.png", 120, 60);
    let options = RenderOptions::new().logo(&logo).stamp(&stamp);
    let bytes = render(&invoice(), &options).unwrap();
    // The logo is fitted into 200 x 50 at the bottom left of the margin box.
    assert!(contains(&bytes, b"200 0 0 50 36 61 cm"));
    assert!(contains(&bytes, b"/Im1 Do"));
    assert!(contains(&bytes, b"/Im2 Do"));
}

#[test]
fn background_is_forwarded_to_the_writer() {
    let dir = tempfile::tempdir().unwrap();
    let background = write_png(dir.path(), "bg.png", 612, 792);
    let bytes = render(&invoice(), &RenderOptions::new().background(&background)).unwrap();
    assert!(contains(&bytes, b"612 0 0 792 0 0 cm"));

    let missing = RenderOptions::new().background("/nonexistent/bg.png");
    assert!(matches!(render(&invoice(), &missing), Err(Error::Pdf(_))));
}

#[test]
fn compression_deflates_streams() {
    let plain = render(&invoice(), &RenderOptions::default()).unwrap();
    let bytes = render(&invoice(), &RenderOptions::new().compress(true)).unwrap();
    assert!(contains(&bytes, b"/FlateDecode"));
    assert!(contains(&plain, b"(198900000001) Tj"));
    assert!(bytes.len() < plain.len());
}

#[test]
fn long_item_lists_get_page_numbers() {
    let items = (0..80)
        .map(|i| Item {
            amount: format!("$ {}", i),
            ..Item::new(format!("Item {}", i))
        })
        .collect();
    let document = Document { items, ..invoice() };
    let bytes = render(&document, &RenderOptions::default()).unwrap();
    assert!(contains(&bytes, b"(1 / "));
    assert!(contains(&bytes, b"(2 / "));
}

#[test]
fn single_page_has_no_page_numbers() {
    let bytes = render(&invoice(), &RenderOptions::default()).unwrap();
    assert!(!contains(&bytes, b"(1 / 1) Tj"));
}

#[test]
fn json_document_renders() {
    let document = Document::from_json(
        r#"{"number": 7, "provider_name": "Business", "items": [{"name": "Support", "amount": "$ 5"}], "total": "$ 5"}"#,
    )
    .unwrap();
    let bytes = render(&document, &RenderOptions::default()).unwrap();
    assert!(contains(&bytes, b"(Support) Tj"));
    assert!(contains(&bytes, b"(Invoice 7)"));
}
