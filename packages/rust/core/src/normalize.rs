//! Text normalization passes for flowing-text sources.

use std::sync::LazyLock;

use regex::Regex;

/// Insert a space where a lowercase letter runs directly into an uppercase
/// one. PDF extraction and HTML flattening glue words together at layout
/// boundaries ("diasÚteis" → "dias Úteis").
pub fn fix_spacing(text: &str) -> String {
    static GLUE_RE: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"([a-záàâãéêíóôõúüç])([A-ZÁÀÂÃÉÊÍÓÔÕÚÜÇ])").expect("valid regex")
    });

    GLUE_RE.replace_all(text, "$1 $2").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inserts_space_at_glued_boundary() {
        assert_eq!(fix_spacing("entregaRápida"), "entrega Rápida");
        assert_eq!(
            fix_spacing("prazo de entrega.Consulte o site"),
            "prazo de entrega.Consulte o site"
        );
    }

    #[test]
    fn handles_accented_boundaries() {
        assert_eq!(fix_spacing("vocêPode"), "você Pode");
        assert_eq!(fix_spacing("atençãoClientes"), "atenção Clientes");
    }

    #[test]
    fn leaves_normal_text_alone() {
        let text = "O prazo de entrega é de cinco dias úteis.";
        assert_eq!(fix_spacing(text), text);
    }

    #[test]
    fn leaves_acronyms_alone() {
        assert_eq!(fix_spacing("CPF e CNPJ"), "CPF e CNPJ");
    }
}
