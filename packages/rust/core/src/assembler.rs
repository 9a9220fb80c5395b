//! Record assembly and snapshot output.
//!
//! [`RecordSink`] is the single accumulator the pipeline stages push into:
//! it owns the output vector, the dedup set, and the per-source counters.
//! At end-of-run it serializes the snapshot and its manifest sidecar.

use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::{debug, info, instrument};

use kbforge_shared::{
    ContentBlock, KbForgeError, KnowledgeRecord, QaPair, Result, RunId, RunManifest, SourceCount,
};

use crate::dedup::DedupSet;

/// Content blocks must exceed this many characters to be worth keeping.
const MIN_CONTENT_CHARS: usize = 30;

// ---------------------------------------------------------------------------
// RecordSink
// ---------------------------------------------------------------------------

/// Accumulates knowledge records in processing order.
#[derive(Debug)]
pub struct RecordSink {
    records: Vec<KnowledgeRecord>,
    dedup: DedupSet,
    deduplicate: bool,
    qa_count: usize,
    content_count: usize,
    sources: Vec<SourceCount>,
}

impl RecordSink {
    pub fn new(deduplicate: bool) -> Self {
        Self {
            records: Vec::new(),
            dedup: DedupSet::new(),
            deduplicate,
            qa_count: 0,
            content_count: 0,
            sources: Vec::new(),
        }
    }

    /// Push a question/answer pair. `dedup_key` is the pre-translation
    /// question text. Returns whether the record was kept.
    pub fn push_qa(&mut self, pair: QaPair, dedup_key: &str, source: &str) -> bool {
        if !self.admit(dedup_key) {
            debug!(question = %pair.question, "duplicate QA pair dropped");
            return false;
        }

        self.records.push(KnowledgeRecord::Qa(pair));
        self.qa_count += 1;
        self.count_source(source);
        true
    }

    /// Push a content block. `dedup_key` is the pre-translation block text.
    /// Blocks at or under the length floor are dropped. Returns whether the
    /// record was kept.
    pub fn push_content(&mut self, block: ContentBlock, dedup_key: &str) -> bool {
        if block.content.chars().count() <= MIN_CONTENT_CHARS {
            debug!(source = %block.source, "short content block dropped");
            return false;
        }
        if !self.admit(dedup_key) {
            debug!(source = %block.source, "duplicate content block dropped");
            return false;
        }

        let source = block.source.clone();
        self.records.push(KnowledgeRecord::Content(block));
        self.content_count += 1;
        self.count_source(&source);
        true
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn qa_count(&self) -> usize {
        self.qa_count
    }

    pub fn content_count(&self) -> usize {
        self.content_count
    }

    pub fn records(&self) -> &[KnowledgeRecord] {
        &self.records
    }

    pub fn sources(&self) -> &[SourceCount] {
        &self.sources
    }

    fn admit(&mut self, dedup_key: &str) -> bool {
        if !self.deduplicate {
            return true;
        }
        self.dedup.insert(dedup_key)
    }

    fn count_source(&mut self, source: &str) {
        if let Some(entry) = self.sources.iter_mut().find(|s| s.source == source) {
            entry.records += 1;
        } else {
            self.sources.push(SourceCount {
                source: source.to_string(),
                records: 1,
            });
        }
    }

    // -----------------------------------------------------------------------
    // Output
    // -----------------------------------------------------------------------

    /// Write the snapshot and its `manifest.json` sidecar.
    ///
    /// Returns the manifest that was written.
    #[instrument(skip_all, fields(path = %output_path.display(), records = self.records.len()))]
    pub fn write_snapshot(&self, output_path: &Path, tool_version: &str) -> Result<RunManifest> {
        if let Some(parent) = output_path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| KbForgeError::io(parent, e))?;
        }

        write_json(output_path, &self.records)?;

        let manifest = RunManifest {
            run_id: RunId::new(),
            tool_version: tool_version.to_string(),
            generated_at: Utc::now(),
            record_count: self.records.len(),
            qa_count: self.qa_count,
            content_count: self.content_count,
            sources: self.sources.clone(),
        };
        write_json(&manifest_path(output_path), &manifest)?;

        info!(
            records = self.records.len(),
            qa = self.qa_count,
            content = self.content_count,
            "snapshot written"
        );
        Ok(manifest)
    }
}

/// Path of the manifest sidecar next to the snapshot.
pub fn manifest_path(output_path: &Path) -> PathBuf {
    output_path
        .parent()
        .map(|p| p.join("manifest.json"))
        .unwrap_or_else(|| PathBuf::from("manifest.json"))
}

/// Write a JSON file (pretty-printed).
fn write_json<T: serde::Serialize>(path: &Path, data: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| KbForgeError::validation(format!("JSON serialization failed: {e}")))?;
    std::fs::write(path, json).map_err(|e| KbForgeError::io(path, e))?;
    debug!(path = %path.display(), "wrote JSON file");
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
