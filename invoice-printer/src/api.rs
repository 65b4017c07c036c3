//! Entry points: validate options, lay out the document, emit the PDF.

use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::document::Document;
use crate::error::{Error, Result};
use crate::fonts::{resolve_font, FontChoice};
use crate::labels::merge_for_render;
use crate::layout::LayoutEngine;
use crate::options::RenderOptions;
use crate::surface::pdf::letter_document;
use crate::surface::{FontFiles, Surface};

/// Render `document` to PDF bytes.
///
/// ```no_run
/// use invoice_printer::{Document, RenderOptions};
///
/// let invoice = Document {
///     number: "198900000001".into(),
///     total: "$ 200".into(),
///     ..Default::default()
/// };
/// let pdf = invoice_printer::render(&invoice, &RenderOptions::default())?;
/// assert!(pdf.starts_with(b"%PDF-"));
/// # Ok::<(), invoice_printer::Error>(())
/// ```
pub fn render(document: &Document, options: &RenderOptions) -> Result<Vec<u8>> {
    let font = check_options(options)?;
    let surface = letter_document(options.background_path(), options.compress)?;
    let surface = draw(surface, document, options, font)?;
    surface.render_bytes()
}

/// Render `document` and write the PDF to `file_name`.
pub fn print(document: &Document, file_name: impl AsRef<Path>, options: &RenderOptions) -> Result<()> {
    let file_name = file_name.as_ref();
    let font = check_options(options)?;
    let surface = letter_document(options.background_path(), options.compress)?;
    let surface = draw(surface, document, options, font)?;
    surface.render_to_file(file_name)?;
    info!("wrote invoice {} to {}", document.number, file_name.display());
    Ok(())
}

/// Render `document` to the path named by `options.file_name`,
/// `invoice.pdf` when none is set. Returns the path written.
pub fn print_configured(document: &Document, options: &RenderOptions) -> Result<PathBuf> {
    let file_name = options.output_path().to_path_buf();
    print(document, &file_name, options)?;
    Ok(file_name)
}

/// Lay out `document` on any surface and hand the surface back.
pub fn render_on<S: Surface>(surface: S, document: &Document, options: &RenderOptions) -> Result<S> {
    let font = check_options(options)?;
    draw(surface, document, options, font)
}

/// Fail on missing assets before anything is drawn.
fn check_options(options: &RenderOptions) -> Result<Option<FontChoice>> {
    if let Some(logo) = options.logo_path() {
        if !logo.exists() {
            return Err(Error::LogoFileNotFound(logo.to_path_buf()));
        }
    }
    if let Some(stamp) = options.stamp_path() {
        if !stamp.exists() {
            return Err(Error::StampFileNotFound(stamp.to_path_buf()));
        }
    }
    match options.font_name() {
        Some(font) => resolve_font(font),
        None => Ok(None),
    }
}

fn draw<S: Surface>(mut surface: S, document: &Document, options: &RenderOptions, font: Option<FontChoice>) -> Result<S> {
    debug!(
        "rendering document '{}' with {} item(s)",
        document.number,
        document.items.len()
    );
    if let Some(choice) = font {
        use_font(&mut surface, choice)?;
    }

    let labels = merge_for_render(options.labels.as_ref());
    let mut engine = LayoutEngine::new(surface, document, labels)
        .stamp(options.stamp_path())
        .logo(options.logo_path());
    engine.build()?;
    Ok(engine.into_surface())
}

fn use_font<S: Surface>(surface: &mut S, choice: FontChoice) -> Result<()> {
    match choice {
        FontChoice::File { family, path } => {
            surface.register_font_family(&family, &FontFiles::single(&path))?;
            surface.set_font(&family)
        }
        FontChoice::Builtin(family) => surface.set_font(family),
    }
}
