//! Word-processor (.docx) paragraph reader.

use std::path::Path;

use docx_rs::{DocumentChild, ParagraphChild, RunChild};

use kbforge_shared::{KbForgeError, Result};

/// Read a `.docx` file and return its non-empty paragraphs in document order.
///
/// Each paragraph is the concatenation of its run texts, trimmed. Tables and
/// other non-paragraph children are ignored.
pub fn read_paragraphs(path: &Path) -> Result<Vec<String>> {
    let data = std::fs::read(path).map_err(|e| KbForgeError::io(path, e))?;
    let doc = docx_rs::read_docx(&data)
        .map_err(|e| KbForgeError::extract(format!("{}: {e}", path.display())))?;

    let mut paragraphs = Vec::new();
    for child in doc.document.children {
        if let DocumentChild::Paragraph(paragraph) = child {
            let mut text = String::new();
            for child in paragraph.children {
                if let ParagraphChild::Run(run) = child {
                    for child in run.children {
                        if let RunChild::Text(t) = child {
                            text.push_str(&t.text);
                        }
                    }
                }
            }

            let trimmed = text.trim();
            if !trimmed.is_empty() {
                paragraphs.push(trimmed.to_string());
            }
        }
    }

    tracing::debug!(path = %path.display(), count = paragraphs.len(), "read docx paragraphs");
    Ok(paragraphs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_maps_to_io_error() {
        let err = read_paragraphs(Path::new("no-such-file.docx")).unwrap_err();
        assert!(matches!(err, KbForgeError::Io { .. }));
    }

    #[test]
    fn garbage_bytes_map_to_extract_error() {
        let dir = std::env::temp_dir().join("kbforge-docx-test");
        std::fs::create_dir_all(&dir).expect("create temp dir");
        let path = dir.join("broken.docx");
        std::fs::write(&path, b"not a zip archive").expect("write file");

        let err = read_paragraphs(&path).unwrap_err();
        assert!(matches!(err, KbForgeError::Extract { .. }));
    }
}
