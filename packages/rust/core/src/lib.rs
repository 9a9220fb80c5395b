//! Core pipeline orchestration and domain logic for kbforge.
//!
//! This crate ties together the format readers, the web fetcher, and the
//! translation gate into the end-to-end `build` workflow: segment raw text
//! into units, classify questions, pair answers, normalize, deduplicate,
//! and assemble the output snapshot.

pub mod assembler;
pub mod classify;
pub mod dedup;
pub mod normalize;
pub mod pairing;
pub mod pipeline;
pub mod segment;

pub use assembler::RecordSink;
pub use classify::{Role, classify_document, classify_web};
pub use dedup::DedupSet;
pub use normalize::fix_spacing;
pub use pairing::AnswerAccumulator;
pub use pipeline::{
    BuildConfig, BuildResult, ExtractionMode, ProgressReporter, SilentProgress, run_build,
};
pub use segment::{FlowBuffer, RawUnit, flow_units, paragraph_units, web_fragments};
