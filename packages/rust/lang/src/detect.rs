//! Natural-language detection.

use whatlang::Lang;

/// Identifies the language of a piece of text.
///
/// Returns an ISO 639-1 code where one exists. `None` means the detector
/// could not reach a confident answer; callers treat that as "leave the
/// text alone".
pub trait LanguageDetector: Send + Sync {
    fn detect(&self, text: &str) -> Option<String>;
}

/// Statistical detector backed by `whatlang`.
///
/// Detections the library marks unreliable are discarded. Short fragments
/// routinely fall below the reliability bar, which keeps the gate from
/// mistranslating them.
#[derive(Debug, Default, Clone, Copy)]
pub struct WhatlangDetector;

impl LanguageDetector for WhatlangDetector {
    fn detect(&self, text: &str) -> Option<String> {
        let info = whatlang::detect(text)?;
        if !info.is_reliable() {
            return None;
        }
        Some(iso_639_1(info.lang()).to_string())
    }
}

/// Map a whatlang language to its two-letter code, falling back to the
/// library's three-letter code for languages without one here.
fn iso_639_1(lang: Lang) -> &'static str {
    match lang {
        Lang::Eng => "en",
        Lang::Por => "pt",
        Lang::Spa => "es",
        Lang::Fra => "fr",
        Lang::Deu => "de",
        Lang::Ita => "it",
        Lang::Nld => "nl",
        other => other.code(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_english_prose() {
        let detector = WhatlangDetector;
        let detected = detector.detect(
            "The delivery time for international orders is usually between ten and fifteen business days.",
        );
        assert_eq!(detected.as_deref(), Some("en"));
    }

    #[test]
    fn detects_portuguese_prose() {
        let detector = WhatlangDetector;
        let detected = detector.detect(
            "O prazo de entrega para pedidos internacionais costuma ficar entre dez e quinze dias úteis.",
        );
        assert_eq!(detected.as_deref(), Some("pt"));
    }

    #[test]
    fn empty_text_yields_none() {
        let detector = WhatlangDetector;
        assert_eq!(detector.detect(""), None);
    }
}
