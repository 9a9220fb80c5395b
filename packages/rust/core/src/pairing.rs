//! Question/answer pairing state machine.

use kbforge_shared::QaPair;

/// Pairs each question with the statements that follow it.
///
/// A question opens a pending pair; statements append to its answer with a
/// single separating space. The pending pair is emitted when the next
/// question arrives or at end-of-stream, and only if the answer is
/// non-empty. Statements with no open question are discarded.
#[derive(Debug, Default)]
pub struct AnswerAccumulator {
    question: Option<String>,
    answer: String,
}

impl AnswerAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a new pending pair. Returns the previous pair when it had
    /// accumulated an answer; a question with no answer is dropped.
    pub fn push_question(&mut self, question: impl Into<String>) -> Option<QaPair> {
        let flushed = self.take_pending();
        self.question = Some(question.into());
        flushed
    }

    /// Append a statement to the open answer, if any.
    pub fn push_statement(&mut self, statement: &str) {
        if self.question.is_none() {
            return;
        }
        if !self.answer.is_empty() {
            self.answer.push(' ');
        }
        self.answer.push_str(statement);
    }

    /// Emit the final pending pair at end-of-stream.
    pub fn finish(&mut self) -> Option<QaPair> {
        self.take_pending()
    }

    fn take_pending(&mut self) -> Option<QaPair> {
        let question = self.question.take()?;
        let answer = std::mem::take(&mut self.answer);
        if answer.is_empty() {
            return None;
        }
        Some(QaPair { question, answer })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pairs_question_with_following_statements() {
        let mut acc = AnswerAccumulator::new();
        assert!(acc.push_question("Qual o prazo?").is_none());
        acc.push_statement("O prazo é de cinco dias.");
        acc.push_statement("Feriados não contam.");

        let pair = acc.finish().expect("pending pair");
        assert_eq!(pair.question, "Qual o prazo?");
        assert_eq!(pair.answer, "O prazo é de cinco dias. Feriados não contam.");
    }

    #[test]
    fn next_question_flushes_previous_pair() {
        let mut acc = AnswerAccumulator::new();
        acc.push_question("Qual o prazo?");
        acc.push_statement("Cinco dias.");

        let flushed = acc.push_question("Posso parcelar?").expect("flushed pair");
        assert_eq!(flushed.question, "Qual o prazo?");
        assert_eq!(flushed.answer, "Cinco dias.");
    }

    #[test]
    fn question_without_answer_is_dropped() {
        let mut acc = AnswerAccumulator::new();
        acc.push_question("Qual o prazo?");

        assert!(acc.push_question("Posso parcelar?").is_none());
        assert!(acc.finish().is_none());
    }

    #[test]
    fn leading_statements_are_discarded() {
        let mut acc = AnswerAccumulator::new();
        acc.push_statement("Bem-vindo ao manual.");
        acc.push_question("Qual o prazo?");
        acc.push_statement("Cinco dias.");

        let pair = acc.finish().expect("pending pair");
        assert_eq!(pair.answer, "Cinco dias.");
    }

    #[test]
    fn finish_is_idempotent() {
        let mut acc = AnswerAccumulator::new();
        acc.push_question("Qual o prazo?");
        acc.push_statement("Cinco dias.");

        assert!(acc.finish().is_some());
        assert!(acc.finish().is_none());
    }
}
