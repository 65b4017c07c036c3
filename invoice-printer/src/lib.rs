//! Prints invoices and receipts as US-Letter PDFs.
//!
//! A [`Document`] carries pre-formatted strings only; nothing is
//! computed or validated. [`render`] returns the PDF bytes and [`print`]
//! writes them to a file. Field captions come from the process-wide
//! labels ([`set_labels`]) shadowed by per-render [`RenderOptions`].

pub mod api;
pub mod document;
pub mod error;
pub mod fonts;
pub mod labels;
pub mod layout;
pub mod options;
pub mod surface;

pub use api::{print, print_configured, render, render_on};
pub use document::{Document, Entity, Item};
pub use error::{Error, Result};
pub use fonts::{resolve_font, FontChoice};
pub use labels::{labels, merge_for_render, reset_labels, set_labels, LabelKey, LabelOverrides, Labels};
pub use layout::{visible_columns, Column, LayoutEngine};
pub use options::{RenderOptions, DEFAULT_FILE_NAME};
pub use surface::{RecordingSurface, Surface};
