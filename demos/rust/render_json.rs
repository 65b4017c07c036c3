/// Render an invoice described by JSON files.
///
/// Run with:
///   cargo run --example render_json -p invoice-demos -- [document.json] [options.json] [out.pdf]
///
/// Defaults to demos/data/invoice.json and demos/data/options.json,
/// writing output/invoice-json.pdf.
use std::env;
use std::fs;

use invoice_printer::{Document, RenderOptions};

fn main() {
    env_logger::init();

    let mut args = env::args().skip(1);
    let document_path = args.next().unwrap_or_else(|| "demos/data/invoice.json".to_string());
    let options_path = args.next().unwrap_or_else(|| "demos/data/options.json".to_string());
    let output = args.next().unwrap_or_else(|| "output/invoice-json.pdf".to_string());

    let document = Document::from_json(&fs::read_to_string(&document_path).expect("read document"))
        .expect("parse document");
    let options = RenderOptions::from_json(&fs::read_to_string(&options_path).expect("read options"))
        .expect("parse options");
    log::info!(
        "rendering {} with {} item(s) from {}",
        document.number,
        document.items.len(),
        document_path
    );

    if let Some(parent) = std::path::Path::new(&output).parent() {
        fs::create_dir_all(parent).unwrap();
    }
    let bytes = invoice_printer::render(&document, &options).expect("render invoice");
    fs::write(&output, &bytes).unwrap();
    println!("Written {} bytes to {}", bytes.len(), output);
}
