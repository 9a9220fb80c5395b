//! Question classification.

/// What a unit of text is, for pairing purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Question,
    Statement,
}

/// Interrogative openers that mark a web fragment as a question even
/// without terminal punctuation.
const QUESTION_PREFIXES: [&str; 6] = ["como ", "o que ", "por que ", "qual ", "quando ", "quem "];

/// Classify a unit from a document stream. Only the suffix rule applies:
/// documents carry their question marks.
pub fn classify_document(text: &str) -> Role {
    if text.trim_end().ends_with('?') {
        Role::Question
    } else {
        Role::Statement
    }
}

/// Classify a web fragment. Sentence splitting strips terminal punctuation,
/// so the suffix rule is extended with interrogative prefixes.
pub fn classify_web(text: &str) -> Role {
    let trimmed = text.trim();
    if trimmed.ends_with('?') {
        return Role::Question;
    }

    let lowered = trimmed.to_lowercase();
    if QUESTION_PREFIXES
        .iter()
        .any(|prefix| lowered.starts_with(prefix))
    {
        return Role::Question;
    }

    Role::Statement
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_suffix_rule() {
        assert_eq!(classify_document("Qual o prazo de entrega?"), Role::Question);
        assert_eq!(classify_document("O prazo é de cinco dias."), Role::Statement);
        assert_eq!(classify_document("Qual o prazo de entrega?  "), Role::Question);
    }

    #[test]
    fn document_rule_ignores_prefixes() {
        // Prefix alone is not enough for document streams.
        assert_eq!(
            classify_document("Como solicitar o reembolso em poucos passos"),
            Role::Statement
        );
    }

    #[test]
    fn web_suffix_rule() {
        assert_eq!(classify_web("Posso parcelar a compra?"), Role::Question);
    }

    #[test]
    fn web_prefix_rule_is_case_insensitive() {
        assert_eq!(classify_web("Como acompanhar o meu pedido"), Role::Question);
        assert_eq!(classify_web("COMO ACOMPANHAR O MEU PEDIDO"), Role::Question);
        assert_eq!(classify_web("O que fazer em caso de atraso"), Role::Question);
        assert_eq!(classify_web("Quando o pedido será enviado"), Role::Question);
    }

    #[test]
    fn web_prefix_requires_following_word() {
        // "Comodidade" starts with "como" but not with the prefix "como ".
        assert_eq!(
            classify_web("Comodidade é a nossa prioridade"),
            Role::Statement
        );
    }

    #[test]
    fn web_statement() {
        assert_eq!(
            classify_web("A entrega padrão leva cinco dias úteis"),
            Role::Statement
        );
    }
}
