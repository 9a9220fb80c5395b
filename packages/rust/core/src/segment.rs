//! Text segmentation: raw document text → units.
//!
//! Each source shape has its own rule. Paragraph sources already arrive
//! segmented; flowing text is re-joined into sentences; web pages are
//! joined into one blob and re-split on sentence boundaries.

/// A segment of source text, not yet classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawUnit {
    pub text: String,
    pub source: String,
}

/// Web fragments under this many characters are discarded as noise.
const MIN_FRAGMENT_CHARS: usize = 30;

/// A line ending in one of these characters completes a sentence.
const SENTENCE_TERMINATORS: [char; 4] = ['.', '!', '?', ':'];

// ---------------------------------------------------------------------------
// Paragraph sources
// ---------------------------------------------------------------------------

/// One unit per non-empty trimmed paragraph or cell.
pub fn paragraph_units(paragraphs: Vec<String>, source: &str) -> Vec<RawUnit> {
    paragraphs
        .into_iter()
        .filter_map(|text| {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(RawUnit {
                    text: trimmed.to_string(),
                    source: source.to_string(),
                })
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Flowing-text sources
// ---------------------------------------------------------------------------

/// Joins extracted lines back into sentence-shaped units.
///
/// PDF extraction yields hard-wrapped lines; lines accumulate here until one
/// ends in sentence-terminating punctuation, at which point the buffer is
/// flushed as a single unit.
#[derive(Debug, Default)]
pub struct FlowBuffer {
    buffer: String,
}

impl FlowBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one line. Returns the completed unit when the line terminates
    /// a sentence.
    pub fn push_line(&mut self, line: &str) -> Option<String> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return None;
        }

        if !self.buffer.is_empty() {
            self.buffer.push(' ');
        }
        self.buffer.push_str(trimmed);

        if trimmed
            .chars()
            .next_back()
            .is_some_and(|c| SENTENCE_TERMINATORS.contains(&c))
        {
            return Some(std::mem::take(&mut self.buffer));
        }
        None
    }

    /// Flush whatever remains at end-of-stream.
    pub fn finish(&mut self) -> Option<String> {
        if self.buffer.is_empty() {
            None
        } else {
            Some(std::mem::take(&mut self.buffer))
        }
    }
}

/// Segment flowing text (one string, hard-wrapped lines) into units.
pub fn flow_units(text: &str, source: &str) -> Vec<RawUnit> {
    let mut buffer = FlowBuffer::new();
    let mut units = Vec::new();

    for line in text.lines() {
        if let Some(sentence) = buffer.push_line(line) {
            units.push(RawUnit {
                text: sentence,
                source: source.to_string(),
            });
        }
    }
    if let Some(rest) = buffer.finish() {
        units.push(RawUnit {
            text: rest,
            source: source.to_string(),
        });
    }

    units
}

// ---------------------------------------------------------------------------
// Web sources
// ---------------------------------------------------------------------------

/// Join page blocks into one blob, split on sentence boundaries, and drop
/// fragments below the noise floor.
pub fn web_fragments(blocks: &[String]) -> Vec<String> {
    let blob = blocks.join(" ");

    blob.split(". ")
        .map(|fragment| fragment.trim().to_string())
        .filter(|fragment| fragment.chars().count() >= MIN_FRAGMENT_CHARS)
        .collect()
}
