//! File format readers for kbforge.
//!
//! Each reader takes a path and returns the raw textual content of the
//! document in its natural shape: paragraphs for `.docx`, flowing text for
//! `.pdf`, header-keyed rows for `.xlsx`. Segmentation and classification
//! happen downstream in `kbforge-core`.

pub mod docx;
pub mod pdf;
pub mod xlsx;

use std::path::Path;

use kbforge_shared::{KbForgeError, Result};

pub use docx::read_paragraphs;
pub use pdf::read_text;
pub use xlsx::{SpreadsheetRow, read_rows};

// ---------------------------------------------------------------------------
// DocumentKind
// ---------------------------------------------------------------------------

/// The file formats kbforge can read, dispatched on extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Docx,
    Pdf,
    Xlsx,
}

impl DocumentKind {
    /// Determine the reader for a path from its extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match extension.as_str() {
            "docx" => Ok(Self::Docx),
            "pdf" => Ok(Self::Pdf),
            "xlsx" => Ok(Self::Xlsx),
            _ => Err(KbForgeError::unsupported(extension)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatch_on_extension() {
        assert_eq!(
            DocumentKind::from_path(Path::new("faq.docx")).unwrap(),
            DocumentKind::Docx
        );
        assert_eq!(
            DocumentKind::from_path(Path::new("manual.pdf")).unwrap(),
            DocumentKind::Pdf
        );
        assert_eq!(
            DocumentKind::from_path(Path::new("respostas.xlsx")).unwrap(),
            DocumentKind::Xlsx
        );
    }

    #[test]
    fn dispatch_is_case_insensitive() {
        assert_eq!(
            DocumentKind::from_path(Path::new("FAQ.DOCX")).unwrap(),
            DocumentKind::Docx
        );
    }

    #[test]
    fn unknown_extension_is_unsupported() {
        let err = DocumentKind::from_path(Path::new("notes.txt")).unwrap_err();
        assert!(matches!(err, KbForgeError::Unsupported { .. }));
        assert_eq!(err.to_string(), "unsupported file type: .txt");
    }

    #[test]
    fn missing_extension_is_unsupported() {
        let err = DocumentKind::from_path(Path::new("README")).unwrap_err();
        assert!(matches!(err, KbForgeError::Unsupported { .. }));
    }
}
