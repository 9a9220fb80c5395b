//! PDF flowing-text reader.

use std::path::Path;

use kbforge_shared::{KbForgeError, Result};

/// Read a `.pdf` file and return its extracted text, pages concatenated
/// with newline separators.
///
/// The text keeps the extractor's line structure; the segmenter downstream
/// joins lines back into sentences.
pub fn read_text(path: &Path) -> Result<String> {
    let data = std::fs::read(path).map_err(|e| KbForgeError::io(path, e))?;
    let text = pdf_extract::extract_text_from_mem(&data)
        .map_err(|e| KbForgeError::extract(format!("{}: {e}", path.display())))?;

    tracing::debug!(path = %path.display(), bytes = text.len(), "read pdf text");
    Ok(text)
}
