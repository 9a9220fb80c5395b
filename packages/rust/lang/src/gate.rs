//! Translation gate.

use tracing::debug;

use crate::detect::LanguageDetector;
use crate::translate::Translator;

/// What the gate did with a piece of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateOutcome {
    /// The text was in the source language and was translated.
    Translated,
    /// Detection did not report the source language; text kept as-is.
    Unchanged,
    /// Detection or translation failed; text kept as-is.
    Failed(String),
}

/// Decides whether a piece of text needs translation and applies it.
///
/// Best-effort by contract: the gate never fails the pipeline. Any
/// detector or translator error degrades to passing the input through.
pub struct TranslationGate<D, T> {
    detector: D,
    translator: T,
    source_lang: String,
}

impl<D: LanguageDetector, T: Translator> TranslationGate<D, T> {
    pub fn new(detector: D, translator: T, source_lang: impl Into<String>) -> Self {
        Self {
            detector,
            translator,
            source_lang: source_lang.into(),
        }
    }

    /// Gate `text`, returning the resulting text and what happened.
    pub async fn apply_with_outcome(&self, text: &str) -> (String, GateOutcome) {
        let Some(detected) = self.detector.detect(text) else {
            return (
                text.to_string(),
                GateOutcome::Failed("language detection inconclusive".into()),
            );
        };

        if detected != self.source_lang {
            return (text.to_string(), GateOutcome::Unchanged);
        }

        match self.translator.translate(text).await {
            Ok(translated) => (translated, GateOutcome::Translated),
            Err(e) => (text.to_string(), GateOutcome::Failed(e.to_string())),
        }
    }

    /// Gate `text`, logging the outcome and returning only the text.
    pub async fn apply(&self, text: &str) -> String {
        let (result, outcome) = self.apply_with_outcome(text).await;
        debug!(?outcome, "translation gate");
        result
    }
}

// ---------------------------------------------------------------------------
// Simple-answer normalization
// ---------------------------------------------------------------------------

/// Map bare `yes`/`no` answers to their Portuguese forms.
///
/// Runs before the gate so one-word answers never reach the detector,
/// which cannot classify them reliably anyway.
pub fn normalize_simple_answer(text: &str) -> String {
    match text.trim().to_lowercase().as_str() {
        "yes" => "Sim".to_string(),
        "no" => "Não".to_string(),
        _ => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kbforge_shared::{KbForgeError, Result};

    struct FixedDetector(Option<&'static str>);

    impl LanguageDetector for FixedDetector {
        fn detect(&self, _text: &str) -> Option<String> {
            self.0.map(str::to_string)
        }
    }

    struct UppercaseTranslator;

    impl Translator for UppercaseTranslator {
        async fn translate(&self, text: &str) -> Result<String> {
            Ok(text.to_uppercase())
        }
    }

    struct FailingTranslator;

    impl Translator for FailingTranslator {
        async fn translate(&self, _text: &str) -> Result<String> {
            Err(KbForgeError::Network("connection refused".into()))
        }
    }

    #[tokio::test]
    async fn source_language_text_is_translated() {
        let gate = TranslationGate::new(FixedDetector(Some("en")), UppercaseTranslator, "en");
        let (text, outcome) = gate.apply_with_outcome("hello world").await;
        assert_eq!(text, "HELLO WORLD");
        assert_eq!(outcome, GateOutcome::Translated);
    }

    #[tokio::test]
    async fn other_language_text_passes_through() {
        let gate = TranslationGate::new(FixedDetector(Some("pt")), UppercaseTranslator, "en");
        let (text, outcome) = gate.apply_with_outcome("olá mundo").await;
        assert_eq!(text, "olá mundo");
        assert_eq!(outcome, GateOutcome::Unchanged);
    }

    #[tokio::test]
    async fn inconclusive_detection_passes_through() {
        let gate = TranslationGate::new(FixedDetector(None), UppercaseTranslator, "en");
        let (text, outcome) = gate.apply_with_outcome("ok").await;
        assert_eq!(text, "ok");
        assert!(matches!(outcome, GateOutcome::Failed(_)));
    }

    #[tokio::test]
    async fn translator_failure_passes_through() {
        let gate = TranslationGate::new(FixedDetector(Some("en")), FailingTranslator, "en");
        let (text, outcome) = gate.apply_with_outcome("hello world").await;
        assert_eq!(text, "hello world");
        assert!(matches!(outcome, GateOutcome::Failed(_)));
    }

    #[test]
    fn simple_answers_are_normalized() {
        assert_eq!(normalize_simple_answer("yes"), "Sim");
        assert_eq!(normalize_simple_answer(" YES "), "Sim");
        assert_eq!(normalize_simple_answer("No"), "Não");
        assert_eq!(normalize_simple_answer("talvez"), "talvez");
        assert_eq!(normalize_simple_answer("yes, of course"), "yes, of course");
    }
}
