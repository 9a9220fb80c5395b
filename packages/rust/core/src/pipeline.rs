//! End-to-end `build` pipeline: scan → extract → classify → pair → gate → snapshot.

use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{info, instrument, warn};
use url::Url;

use kbforge_extract::DocumentKind;
use kbforge_lang::{LanguageDetector, TranslationGate, Translator, normalize_simple_answer};
use kbforge_shared::{BuildOptions, ContentBlock, KbForgeError, QaPair, Result, RunManifest};
use kbforge_web::PageFetcher;

use crate::assembler::RecordSink;
use crate::classify::{self, Role};
use crate::normalize::fix_spacing;
use crate::pairing::AnswerAccumulator;
use crate::segment::{self, RawUnit};

/// Spreadsheet columns read as a question/answer pair in QA mode.
const QA_QUESTION_COLUMN: &str = "pergunta";
const QA_ANSWER_COLUMN: &str = "resposta";

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// What kind of records the pipeline emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionMode {
    /// Pair questions with the statements that follow them.
    QuestionAnswer,
    /// Keep every unit as a content block.
    ContentBlocks,
}

impl ExtractionMode {
    /// Parse the config/CLI mode string.
    pub fn parse(mode: &str) -> Result<Self> {
        match mode {
            "qa" => Ok(Self::QuestionAnswer),
            "content" => Ok(Self::ContentBlocks),
            other => Err(KbForgeError::config(format!(
                "unknown extraction mode {other:?} (expected \"qa\" or \"content\")"
            ))),
        }
    }
}

/// Configuration for the `build` pipeline.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Directory scanned for input documents.
    pub input_dir: PathBuf,
    /// Path of the JSON snapshot to write.
    pub output_path: PathBuf,
    /// Web pages fetched after the document directory, in order.
    pub urls: Vec<Url>,
    /// What kind of records to emit.
    pub mode: ExtractionMode,
    /// Whether to run the translation gate.
    pub translate: bool,
    /// Whether to suppress duplicate records.
    pub deduplicate: bool,
    /// Whether to repair glued words in flowing text.
    pub fix_spacing: bool,
    /// Whether to read h2/h3 elements from web pages.
    pub include_headings: bool,
    /// Tool version string, recorded in the manifest.
    pub tool_version: String,
}

impl BuildConfig {
    /// Validate runtime options into a pipeline config.
    pub fn from_options(options: &BuildOptions, tool_version: &str) -> Result<Self> {
        let mode = ExtractionMode::parse(&options.mode)?;

        let mut urls = Vec::with_capacity(options.urls.len());
        for raw in &options.urls {
            let url = Url::parse(raw)
                .map_err(|e| KbForgeError::config(format!("invalid source URL {raw:?}: {e}")))?;
            urls.push(url);
        }

        Ok(Self {
            input_dir: options.input_dir.clone(),
            output_path: options.output_path.clone(),
            urls,
            mode,
            translate: options.translate,
            deduplicate: options.deduplicate,
            fix_spacing: options.fix_spacing,
            include_headings: options.include_headings,
            tool_version: tool_version.to_string(),
        })
    }
}

/// Result of the `build` pipeline.
#[derive(Debug)]
pub struct BuildResult {
    /// Path of the written snapshot.
    pub output_path: PathBuf,
    /// Manifest written beside the snapshot.
    pub manifest: RunManifest,
    /// Number of documents read successfully.
    pub files_processed: usize,
    /// Number of web pages fetched successfully.
    pub pages_fetched: usize,
    /// Per-input failures as `(input, error)`, in processing order.
    pub errors: Vec<(String, String)>,
    /// Total elapsed time.
    pub elapsed: std::time::Duration,
}

// ---------------------------------------------------------------------------
// Progress reporting
// ---------------------------------------------------------------------------

/// Progress callback for reporting pipeline status.
pub trait ProgressReporter: Send + Sync {
    /// Called when entering a new phase.
    fn phase(&self, name: &str);
    /// Called when a document has been processed.
    fn file_processed(&self, name: &str, current: usize, total: usize);
    /// Called when a web page has been fetched.
    fn url_fetched(&self, url: &str, current: usize, total: usize);
    /// Called when the pipeline completes.
    fn done(&self, result: &BuildResult);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn phase(&self, _name: &str) {}
    fn file_processed(&self, _name: &str, _current: usize, _total: usize) {}
    fn url_fetched(&self, _url: &str, _current: usize, _total: usize) {}
    fn done(&self, _result: &BuildResult) {}
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Run the full `build` pipeline.
///
/// 1. Scan the input directory
/// 2. Read and segment each document
/// 3. Fetch and fragment each web page
/// 4. Classify, pair, gate, and deduplicate
/// 5. Write the snapshot and manifest
///
/// Individual documents and pages fail soft: the failure is logged,
/// recorded in the result, and the run continues.
#[instrument(skip_all, fields(input_dir = %config.input_dir.display(), mode = ?config.mode))]
pub async fn run_build<D: LanguageDetector, T: Translator>(
    config: &BuildConfig,
    gate: &TranslationGate<D, T>,
    progress: &dyn ProgressReporter,
) -> Result<BuildResult> {
    let start = Instant::now();

    progress.phase("Scanning input directory");
    let files = scan_input_dir(&config.input_dir)?;

    if files.is_empty() && config.urls.is_empty() {
        return Err(KbForgeError::validation(
            "no input documents or source URLs to process",
        ));
    }

    let mut sink = RecordSink::new(config.deduplicate);
    let mut errors: Vec<(String, String)> = Vec::new();

    // --- Phase 1: Documents ---
    let mut files_processed = 0;
    if !files.is_empty() {
        progress.phase("Processing documents");
        let total = files.len();

        for (i, path) in files.iter().enumerate() {
            let name = file_name(path);
            match process_document(config, gate, path, &name, &mut sink).await {
                Ok(()) => {
                    files_processed += 1;
                    progress.file_processed(&name, i + 1, total);
                }
                Err(e) => {
                    warn!(file = %name, error = %e, "document skipped");
                    errors.push((name, e.to_string()));
                }
            }
        }
    }

    // --- Phase 2: Web pages ---
    let mut pages_fetched = 0;
    if !config.urls.is_empty() {
        progress.phase("Fetching web pages");
        let fetcher = PageFetcher::new(config.include_headings)?;
        let total = config.urls.len();

        for (i, url) in config.urls.iter().enumerate() {
            match process_page(config, gate, &fetcher, url, &mut sink).await {
                Ok(()) => {
                    pages_fetched += 1;
                    progress.url_fetched(url.as_str(), i + 1, total);
                }
                Err(e) => {
                    warn!(%url, error = %e, "page skipped");
                    errors.push((url.to_string(), e.to_string()));
                }
            }
        }
    }

    // --- Phase 3: Snapshot ---
    progress.phase("Writing snapshot");
    let manifest = sink.write_snapshot(&config.output_path, &config.tool_version)?;

    let result = BuildResult {
        output_path: config.output_path.clone(),
        manifest,
        files_processed,
        pages_fetched,
        errors,
        elapsed: start.elapsed(),
    };

    progress.done(&result);

    info!(
        records = result.manifest.record_count,
        files = result.files_processed,
        pages = result.pages_fetched,
        errors = result.errors.len(),
        elapsed_ms = result.elapsed.as_millis(),
        "build complete"
    );

    Ok(result)
}

// ---------------------------------------------------------------------------
// Input scan
// ---------------------------------------------------------------------------

/// List input files in name order. Office lock files (`~` prefix) are
/// skipped. A missing directory yields an empty list, not an error.
fn scan_input_dir(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.exists() {
        warn!(dir = %dir.display(), "input directory not found, skipping document scan");
        return Ok(Vec::new());
    }

    let entries = std::fs::read_dir(dir).map_err(|e| KbForgeError::io(dir, e))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| KbForgeError::io(dir, e))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if file_name(&path).starts_with('~') {
            continue;
        }
        files.push(path);
    }

    files.sort();
    Ok(files)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

// ---------------------------------------------------------------------------
// Document processing
// ---------------------------------------------------------------------------

/// Read one document and feed its units into the sink.
async fn process_document<D: LanguageDetector, T: Translator>(
    config: &BuildConfig,
    gate: &TranslationGate<D, T>,
    path: &Path,
    name: &str,
    sink: &mut RecordSink,
) -> Result<()> {
    let units = match DocumentKind::from_path(path)? {
        DocumentKind::Docx => {
            let paragraphs = kbforge_extract::read_paragraphs(path)?;
            segment::paragraph_units(paragraphs, name)
        }
        DocumentKind::Pdf => {
            let text = kbforge_extract::read_text(path)?;
            let mut units = segment::flow_units(&text, name);
            if config.fix_spacing {
                for unit in &mut units {
                    unit.text = fix_spacing(&unit.text);
                }
            }
            units
        }
        DocumentKind::Xlsx => {
            let rows = kbforge_extract::read_rows(path)?;
            return process_spreadsheet(config, gate, &rows, name, sink).await;
        }
    };

    process_units(config, gate, units, name, sink).await;
    Ok(())
}

/// Spreadsheet rows: in QA mode, rows carrying the question/answer columns
/// become pairs directly, bypassing segmentation. Every other cell becomes
/// an independent content unit with the file name as source.
async fn process_spreadsheet<D: LanguageDetector, T: Translator>(
    config: &BuildConfig,
    gate: &TranslationGate<D, T>,
    rows: &[kbforge_extract::SpreadsheetRow],
    name: &str,
    sink: &mut RecordSink,
) -> Result<()> {
    let mut leftover_cells: Vec<String> = Vec::new();

    for row in rows {
        let question = row.get(QA_QUESTION_COLUMN);
        let answer = row.get(QA_ANSWER_COLUMN);

        if config.mode == ExtractionMode::QuestionAnswer && !question.is_empty() && !answer.is_empty()
        {
            let pair = QaPair {
                question: question.to_string(),
                answer: answer.to_string(),
            };
            finalize_qa(config, gate, pair, name, sink).await;
        } else {
            leftover_cells.extend(row.cells().map(|(_, value)| value.to_string()));
        }
    }

    for unit in segment::paragraph_units(leftover_cells, name) {
        finalize_content(config, gate, unit, sink).await;
    }
    Ok(())
}

/// Run document units through classification, pairing, and finalization.
async fn process_units<D: LanguageDetector, T: Translator>(
    config: &BuildConfig,
    gate: &TranslationGate<D, T>,
    units: Vec<RawUnit>,
    source: &str,
    sink: &mut RecordSink,
) {
    match config.mode {
        ExtractionMode::QuestionAnswer => {
            let mut accumulator = AnswerAccumulator::new();

            for unit in units {
                match classify::classify_document(&unit.text) {
                    Role::Question => {
                        if let Some(pair) = accumulator.push_question(unit.text) {
                            finalize_qa(config, gate, pair, source, sink).await;
                        }
                    }
                    Role::Statement => accumulator.push_statement(&unit.text),
                }
            }
            if let Some(pair) = accumulator.finish() {
                finalize_qa(config, gate, pair, source, sink).await;
            }
        }
        ExtractionMode::ContentBlocks => {
            for unit in units {
                finalize_content(config, gate, unit, sink).await;
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Web page processing
// ---------------------------------------------------------------------------

/// Fetch one page and feed its fragments into the sink.
///
/// In QA mode a question fragment becomes a pair whose answer points back
/// at the page; statement fragments become content blocks.
async fn process_page<D: LanguageDetector, T: Translator>(
    config: &BuildConfig,
    gate: &TranslationGate<D, T>,
    fetcher: &PageFetcher,
    url: &Url,
    sink: &mut RecordSink,
) -> Result<()> {
    let blocks = fetcher.fetch_blocks(url).await?;
    let mut fragments = segment::web_fragments(&blocks);
    if config.fix_spacing {
        for fragment in &mut fragments {
            *fragment = fix_spacing(fragment);
        }
    }

    let source = url.to_string();

    for fragment in fragments {
        let is_question = config.mode == ExtractionMode::QuestionAnswer
            && classify::classify_web(&fragment) == Role::Question;

        if is_question {
            // The synthesized answer is already in the target language.
            let answer = format!("(Conteúdo extraído da página: {url})");
            let dedup_key = fragment.clone();
            let question = if config.translate {
                gate.apply(&fragment).await
            } else {
                fragment
            };
            sink.push_qa(QaPair { question, answer }, &dedup_key, &source);
        } else {
            let unit = RawUnit {
                text: fragment,
                source: source.clone(),
            };
            finalize_content(config, gate, unit, sink).await;
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Record finalization
// ---------------------------------------------------------------------------

/// Gate a pair and push it. The dedup key is the pre-translation question.
async fn finalize_qa<D: LanguageDetector, T: Translator>(
    config: &BuildConfig,
    gate: &TranslationGate<D, T>,
    pair: QaPair,
    source: &str,
    sink: &mut RecordSink,
) {
    let dedup_key = pair.question.clone();

    let answer = normalize_simple_answer(&pair.answer);
    let (question, answer) = if config.translate {
        (gate.apply(&pair.question).await, gate.apply(&answer).await)
    } else {
        (pair.question, answer)
    };

    sink.push_qa(QaPair { question, answer }, &dedup_key, source);
}

/// Gate a content unit and push it. The dedup key is the pre-translation text.
async fn finalize_content<D: LanguageDetector, T: Translator>(
    config: &BuildConfig,
    gate: &TranslationGate<D, T>,
    unit: RawUnit,
    sink: &mut RecordSink,
) {
    let dedup_key = unit.text.clone();
    let content = if config.translate {
        gate.apply(&unit.text).await
    } else {
        unit.text
    };

    sink.push_content(
        ContentBlock {
            content,
            source: unit.source,
        },
        &dedup_key,
    );
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
