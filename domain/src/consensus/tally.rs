//! Answer frequency counting

use std::collections::HashMap;

/// Occurrence counts of distinct answers, in first-occurrence order
///
/// Answers are grouped by exact string equality; no trimming or case folding
/// is applied, so `"Yes."` and `"Yes"` are different answers.
///
/// # Example
///
/// ```
/// use rag_domain::AnswerTally;
///
/// let tally = AnswerTally::from_answers(["A", "B", "A", "B"]);
/// assert_eq!(tally.count("A"), 2);
/// assert_eq!(tally.winner(), Some("A"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerTally {
    entries: Vec<(String, usize)>,
    positions: HashMap<String, usize>,
}

impl AnswerTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tally from answers in collection order
    pub fn from_answers<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut tally = Self::new();
        for answer in answers {
            tally.record(answer.as_ref());
        }
        tally
    }

    /// Count one more occurrence of `answer`
    pub fn record(&mut self, answer: &str) {
        match self.positions.get(answer) {
            Some(&pos) => self.entries[pos].1 += 1,
            None => {
                self.positions.insert(answer.to_string(), self.entries.len());
                self.entries.push((answer.to_string(), 1));
            }
        }
    }

    /// Occurrences of `answer` (0 if never recorded)
    pub fn count(&self, answer: &str) -> usize {
        self.positions
            .get(answer)
            .map(|&pos| self.entries[pos].1)
            .unwrap_or(0)
    }

    /// The most frequent answer.
    ///
    /// Among answers sharing the highest count, the one first seen in
    /// collection order wins, so `[A, B, B, A]` selects `A` even though `B`
    /// reached two votes first. Returns `None` only for an empty tally.
    ///
    /// ```
    /// use rag_domain::AnswerTally;
    ///
    /// let tally = AnswerTally::from_answers(["A", "B", "B", "A"]);
    /// assert_eq!(tally.winner(), Some("A"));
    /// ```
    pub fn winner(&self) -> Option<&str> {
        let mut best: Option<&(String, usize)> = None;
        for entry in &self.entries {
            if best.is_none_or(|b| entry.1 > b.1) {
                best = Some(entry);
            }
        }
        best.map(|(answer, _)| answer.as_str())
    }

    /// Highest count in the tally
    pub fn max_count(&self) -> usize {
        self.entries.iter().map(|(_, c)| *c).max().unwrap_or(0)
    }

    /// Distinct answers with their counts, in first-occurrence order
    pub fn entries(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries.iter().map(|(a, c)| (a.as_str(), *c))
    }

    /// Number of distinct answers
    pub fn distinct(&self) -> usize {
        self.entries.len()
    }

    /// Total answers recorded
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, c)| c).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether every recorded answer is identical
    pub fn is_unanimous(&self) -> bool {
        self.entries.len() == 1
    }
}
