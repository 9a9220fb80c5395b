//! Core domain types for kbforge knowledge snapshots.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// RunId
// ---------------------------------------------------------------------------

/// A UUID v7 wrapper for build-run identifiers (time-sortable).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunId(pub Uuid);

impl RunId {
    /// Generate a new time-sortable run identifier.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for RunId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

// ---------------------------------------------------------------------------
// Knowledge records
// ---------------------------------------------------------------------------

/// A question/answer pair extracted from a document or page.
///
/// Both fields are non-empty and normalized to the target language
/// by the time a pair reaches the output collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QaPair {
    /// The question text, including its terminal punctuation.
    pub question: String,
    /// The accumulated answer text.
    pub answer: String,
}

/// A free-text content block with provenance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentBlock {
    /// The block text.
    pub content: String,
    /// Where the block came from (file name or URL).
    pub source: String,
}

/// One record in the output snapshot.
///
/// Serialized untagged: a QA pair is `{"question", "answer"}` and a
/// content block is `{"content", "source"}`, with no discriminator field.
/// Deserialization relies on the two shapes having disjoint field names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum KnowledgeRecord {
    Qa(QaPair),
    Content(ContentBlock),
}

impl KnowledgeRecord {
    /// The pre-translation dedup key side of the record is decided by the
    /// pipeline; this accessor exposes the primary text for reporting.
    pub fn text(&self) -> &str {
        match self {
            Self::Qa(pair) => &pair.question,
            Self::Content(block) => &block.content,
        }
    }
}

// ---------------------------------------------------------------------------
// RunManifest
// ---------------------------------------------------------------------------

/// The `manifest.json` sidecar written next to the output snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunManifest {
    /// Unique identifier for this build run.
    pub run_id: RunId,
    /// Tool version that produced the snapshot.
    pub tool_version: String,
    /// When the snapshot was written.
    pub generated_at: DateTime<Utc>,
    /// Total number of records in the snapshot.
    pub record_count: usize,
    /// Number of question/answer records.
    pub qa_count: usize,
    /// Number of content-block records.
    pub content_count: usize,
    /// Per-source record counts, in processing order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<SourceCount>,
}

/// Record count for a single input source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceCount {
    /// File name or URL.
    pub source: String,
    /// Records emitted from this source.
    pub records: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_id_roundtrip() {
        let id = RunId::new();
        let s = id.to_string();
        let parsed: RunId = s.parse().expect("parse RunId");
        assert_eq!(id, parsed);
    }

    #[test]
    fn qa_pair_wire_shape() {
        let record = KnowledgeRecord::Qa(QaPair {
            question: "Como funciona?".into(),
            answer: "Funciona bem.".into(),
        });

        let json = serde_json::to_value(&record).expect("serialize");
        let obj = json.as_object().expect("object");
        assert_eq!(obj.len(), 2);
        assert_eq!(obj["question"], "Como funciona?");
        assert_eq!(obj["answer"], "Funciona bem.");
    }

    #[test]
    fn content_block_wire_shape() {
        let record = KnowledgeRecord::Content(ContentBlock {
            content: "Um bloco de texto com mais de trinta caracteres.".into(),
            source: "manual.pdf".into(),
        });

        let json = serde_json::to_value(&record).expect("serialize");
        let obj = json.as_object().expect("object");
        assert_eq!(obj.len(), 2);
        assert_eq!(obj["content"], "Um bloco de texto com mais de trinta caracteres.");
        assert_eq!(obj["source"], "manual.pdf");
    }

    #[test]
    fn untagged_deserialization_picks_variant() {
        let json = r#"[
            {"question": "Qual o prazo?", "answer": "Trinta dias."},
            {"content": "Texto corrido sem estrutura de perguntas.", "source": "https://example.com"}
        ]"#;

        let records: Vec<KnowledgeRecord> = serde_json::from_str(json).expect("deserialize");
        assert!(matches!(records[0], KnowledgeRecord::Qa(_)));
        assert!(matches!(records[1], KnowledgeRecord::Content(_)));
    }

    #[test]
    fn manifest_serialization() {
        let manifest = RunManifest {
            run_id: RunId::new(),
            tool_version: "0.1.0".into(),
            generated_at: Utc::now(),
            record_count: 5,
            qa_count: 3,
            content_count: 2,
            sources: vec![SourceCount {
                source: "faq.docx".into(),
                records: 5,
            }],
        };

        let json = serde_json::to_string_pretty(&manifest).expect("serialize");
        let parsed: RunManifest = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed.record_count, 5);
        assert_eq!(parsed.sources.len(), 1);
        assert_eq!(parsed.sources[0].source, "faq.docx");
    }
}
