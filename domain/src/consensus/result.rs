//! Consensus result value objects

use super::paraphrase::QueryVariant;
use super::tally::AnswerTally;
use serde::{Deserialize, Serialize};

/// One variant together with the answer it produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantAnswer {
    pub variant: QueryVariant,
    pub answer: String,
}

impl VariantAnswer {
    pub fn new(variant: QueryVariant, answer: impl Into<String>) -> Self {
        Self {
            variant,
            answer: answer.into(),
        }
    }
}

/// Outcome of a paraphrase consensus run
///
/// Holds the selected answer and every (variant, answer) pair in issuance
/// order. The selected answer is always one of the collected answers.
///
/// # Example
///
/// ```
/// use rag_domain::{ConsensusResult, Question, VariantAnswer, paraphrase};
///
/// let question = Question::new("the deadline");
/// let answers = ["June", "May", "June", "July"];
/// let pairs = paraphrase(&question)
///     .into_iter()
///     .zip(answers)
///     .map(|(v, a)| VariantAnswer::new(v, a))
///     .collect();
///
/// let result = ConsensusResult::select(question, pairs).unwrap();
/// assert_eq!(result.answer, "June");
/// assert_eq!(result.agreement(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsensusResult {
    /// The original question
    pub question: String,
    /// The most frequent answer
    pub answer: String,
    /// Every variant and its answer, in issuance order
    pub pairs: Vec<VariantAnswer>,
}

impl ConsensusResult {
    /// Tally `pairs` and pick the winning answer.
    ///
    /// Returns `None` when there are no pairs to vote over.
    pub fn select(question: impl Into<String>, pairs: Vec<VariantAnswer>) -> Option<Self> {
        let answer = AnswerTally::from_answers(pairs.iter().map(|p| p.answer.as_str()))
            .winner()?
            .to_string();

        Some(Self {
            question: question.into(),
            answer,
            pairs,
        })
    }

    /// Recompute the tally over the collected answers
    pub fn tally(&self) -> AnswerTally {
        AnswerTally::from_answers(self.answers())
    }

    /// Collected answers in issuance order
    pub fn answers(&self) -> impl Iterator<Item = &str> {
        self.pairs.iter().map(|p| p.answer.as_str())
    }

    /// How many variants produced the selected answer
    pub fn agreement(&self) -> usize {
        self.answers().filter(|a| *a == self.answer).count()
    }

    /// Whether every variant produced the same answer
    pub fn is_unanimous(&self) -> bool {
        self.agreement() == self.pairs.len()
    }

    /// Agreement summary such as `"2/4"`
    pub fn agreement_summary(&self) -> String {
        format!("{}/{}", self.agreement(), self.pairs.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consensus::paraphrase::paraphrase;
    use crate::core::question::Question;

    fn pairs_for(question: &Question, answers: [&str; 4]) -> Vec<VariantAnswer> {
        paraphrase(question)
            .into_iter()
            .zip(answers)
            .map(|(v, a)| VariantAnswer::new(v, a))
            .collect()
    }

    #[test]
    fn test_select_tie_break() {
        let q = Question::new("q");
        let result = ConsensusResult::select(q.content(), pairs_for(&q, ["A", "B", "A", "B"])).unwrap();
        assert_eq!(result.answer, "A");
        assert!(!result.is_unanimous());
    }

    #[test]
    fn test_select_all_distinct() {
        let q = Question::new("q");
        let result = ConsensusResult::select(q.content(), pairs_for(&q, ["X", "Y", "Z", "W"])).unwrap();
        assert_eq!(result.answer, "X");
        assert_eq!(result.agreement_summary(), "1/4");
    }

    #[test]
    fn test_select_unanimous_keeps_pairs() {
        let q = Question::new("q");
        let result =
            ConsensusResult::select(q.content(), pairs_for(&q, ["same", "same", "same", "same"]))
                .unwrap();
        assert_eq!(result.answer, "same");
        assert!(result.is_unanimous());
        assert_eq!(result.pairs.len(), 4);
        for (pair, variant) in result.pairs.iter().zip(paraphrase(&q)) {
            assert_eq!(pair.variant, variant);
            assert_eq!(pair.answer, "same");
        }
    }

    #[test]
    fn test_selected_answer_is_member_with_max_frequency() {
        let q = Question::new("q");
        let result = ConsensusResult::select(q.content(), pairs_for(&q, ["a", "b", "b", "c"])).unwrap();
        assert!(result.answers().any(|a| a == result.answer));
        let tally = result.tally();
        for (_, count) in tally.entries() {
            assert!(result.agreement() >= count);
        }
    }

    #[test]
    fn test_select_empty_is_none() {
        assert!(ConsensusResult::select("q", vec![]).is_none());
    }
}
