//! Resolution of the `font` option.

use std::path::{Path, PathBuf};

use log::debug;

use crate::error::{Error, Result};

/// Builtin font identifiers and the family each one activates.
const BUILTIN_FAMILIES: [(&str, &str); 4] = [
    ("helvetica", "Helvetica"),
    ("times", "Times-Roman"),
    ("times-roman", "Times-Roman"),
    ("courier", "Courier"),
];

/// What the `font` option refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FontChoice {
    /// A TrueType file used for every style, registered under its file name.
    File { family: String, path: PathBuf },
    /// A family every surface already knows.
    Builtin(&'static str),
}

/// Resolve a font option. An existing file wins over a builtin name;
/// an empty option selects nothing.
pub fn resolve_font(font: &str) -> Result<Option<FontChoice>> {
    if font.is_empty() {
        return Ok(None);
    }
    let path = Path::new(font);
    if path.is_file() {
        let family = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| font.to_string());
        debug!("using font file {} as family '{}'", path.display(), family);
        return Ok(Some(FontChoice::File {
            family,
            path: path.to_path_buf(),
        }));
    }
    let key = font.trim().to_ascii_lowercase();
    match BUILTIN_FAMILIES.iter().find(|(id, _)| *id == key) {
        Some(&(_, family)) => {
            debug!("using builtin font family '{}'", family);
            Ok(Some(FontChoice::Builtin(family)))
        }
        None => Err(Error::FontFileNotFound(font.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_names_are_case_insensitive() {
        assert_eq!(resolve_font("Helvetica").unwrap(), Some(FontChoice::Builtin("Helvetica")));
        assert_eq!(resolve_font("TIMES").unwrap(), Some(FontChoice::Builtin("Times-Roman")));
        assert_eq!(resolve_font("times-roman").unwrap(), Some(FontChoice::Builtin("Times-Roman")));
        assert_eq!(resolve_font("courier").unwrap(), Some(FontChoice::Builtin("Courier")));
    }

    #[test]
    fn empty_font_selects_nothing() {
        assert_eq!(resolve_font("").unwrap(), None);
    }

    #[test]
    fn existing_file_is_named_after_its_basename() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Overpass-Regular.ttf");
        std::fs::write(&path, b"not parsed here").unwrap();
        let choice = resolve_font(path.to_str().unwrap()).unwrap();
        assert_eq!(
            choice,
            Some(FontChoice::File {
                family: "Overpass-Regular.ttf".to_string(),
                path,
            })
        );
    }

    #[test]
    fn unknown_font_is_not_found() {
        let err = resolve_font("/nonexistent/font.ttf").unwrap_err();
        assert!(matches!(err, Error::FontFileNotFound(ref f) if f == "/nonexistent/font.ttf"));
        assert!(matches!(resolve_font("comic-sans"), Err(Error::FontFileNotFound(_))));
    }
}
