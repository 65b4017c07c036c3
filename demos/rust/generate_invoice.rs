/// Invoice example: a two-party invoice with German captions and English
/// sublabels, a DRAFT status and a generated logo. Builtin fonts encode
/// WinAnsi only, so the captions stay inside it.
///
/// Run with:
///   cargo run --example generate_invoice -p invoice-demos
///
/// Opens output at: output/invoice.pdf
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use invoice_printer::{Document, Item, LabelKey, LabelOverrides, RenderOptions};

/// A flat navy bar standing in for a company logo.
fn write_logo(path: &Path) {
    let (width, height) = (400u32, 100u32);
    let file = File::create(path).expect("create logo");
    let mut encoder = png::Encoder::new(BufWriter::new(file), width, height);
    encoder.set_color(png::ColorType::Rgb);
    encoder.set_depth(png::BitDepth::Eight);
    let pixels: Vec<u8> = (0..width * height).flat_map(|_| [30u8, 58, 95]).collect();
    let mut writer = encoder.write_header().expect("png header");
    writer.write_image_data(&pixels).expect("png data");
    writer.finish().expect("png finish");
}

fn invoice() -> Document {
    Document {
        number: "198900000001".into(),
        status: "DRAFT".into(),
        provider_name: "Business s.r.o.".into(),
        provider_lines: "Rolnicka 1\n747 05 Opava\nCzech Republic".into(),
        purchaser_name: "Adam".into(),
        purchaser_lines: "Ostravska 2\n747 05 Opava".into(),
        issue_date: "19/03/3939".into(),
        due_date: "19/03/3939".into(),
        subtotal: "175".into(),
        tax: "5".into(),
        total: "$ 200".into(),
        items: vec![
            Item {
                quantity: "2".into(),
                unit: "hours".into(),
                price: "$ 25".into(),
                tax: "$ 1".into(),
                amount: "$ 100".into(),
                ..Item::new("Web consultation")
            },
            Item {
                quantity: "1".into(),
                unit: "month".into(),
                price: "$ 75".into(),
                tax: "$ 4".into(),
                amount: "$ 75".into(),
                ..Item::new("Hosting")
            },
        ],
        note: "Thank you for your business.\nPayable by bank transfer.".into(),
        ..Default::default()
    }
}

fn labels() -> LabelOverrides {
    LabelOverrides::new()
        .with(LabelKey::Name, "Rechnung")
        .with(LabelKey::Provider, "Anbieter")
        .with(LabelKey::Purchaser, "Käufer")
        .with(LabelKey::IssueDate, "Rechnungsdatum")
        .with(LabelKey::DueDate, "Fälligkeitsdatum")
        .with(LabelKey::Item, "Position")
        .with(LabelKey::Quantity, "Menge")
        .with(LabelKey::Unit, "Einheit")
        .with(LabelKey::PricePerItem, "Preis pro Einheit")
        .with(LabelKey::Tax, "MwSt.")
        .with(LabelKey::Amount, "Betrag")
        .with(LabelKey::Subtotal, "Zwischensumme")
        .with(LabelKey::Total, "Gesamt")
        .with_sublabel(LabelKey::Name, "Invoice")
        .with_sublabel(LabelKey::Item, "Item")
        .with_sublabel(LabelKey::Quantity, "Quantity")
        .with_sublabel(LabelKey::Unit, "Unit")
        .with_sublabel(LabelKey::PricePerItem, "Price per item")
        .with_sublabel(LabelKey::Tax, "Tax")
        .with_sublabel(LabelKey::Amount, "Amount")
        .with_sublabel(LabelKey::Subtotal, "Subtotal")
        .with_sublabel(LabelKey::Total, "Total")
}

fn main() {
    env_logger::init();

    std::fs::create_dir_all("output").unwrap();
    let logo = Path::new("output/logo.png");
    write_logo(logo);

    let options = RenderOptions::new().labels(labels()).logo(logo).compress(true);
    let path = "output/invoice.pdf";
    invoice_printer::print(&invoice(), path, &options).expect("print invoice");
    println!("Written to {}", path);
}
