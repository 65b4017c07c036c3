pub mod content;
pub mod document;
pub mod error;
pub mod fonts;
pub mod graphics;
pub mod images;
pub mod objects;
pub mod tables;
pub mod text;
pub mod truetype;
pub mod writer;

pub use document::{Bounds, PageNumbering, PageSize, PdfDocument, DEFAULT_FAMILY};
pub use error::{Error, Result};
pub use fonts::{BuiltinFont, FontFamily, FontRef, FontSource, FontStyle};
pub use graphics::Color;
pub use images::{ImageOptions, Position};
pub use tables::{Border, Cell, RowStyle, Table};
pub use text::{TextAlign, TextBoxOptions, TextOptions, TextStyle};
