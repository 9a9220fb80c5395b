//! Language detection and machine translation for kbforge.
//!
//! The translation gate normalizes record text into the target language:
//! it detects the text's language and translates only when the configured
//! source language is detected with confidence. Detection or translation
//! failures never block the pipeline; the text passes through unchanged.

pub mod detect;
pub mod gate;
pub mod translate;

pub use detect::{LanguageDetector, WhatlangDetector};
pub use gate::{GateOutcome, TranslationGate, normalize_simple_answer};
pub use translate::{HttpTranslator, Translator};
