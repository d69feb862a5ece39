//! Query paraphrasing
//!
//! Derives the fixed set of alternate phrasings used to probe the answer
//! generator several times.

use crate::core::question::Question;
use serde::{Deserialize, Serialize};

/// Number of variants produced for every question
pub const VARIANT_COUNT: usize = 4;

/// One of the fixed rewording templates, in issuance order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParaphraseTemplate {
    /// The question unmodified
    Original,
    /// `"Explain this: " + question`
    Explain,
    /// `"What is meant by " + question + "?"`
    WhatIsMeant,
    /// `"Give details about " + question`
    GiveDetails,
}

impl ParaphraseTemplate {
    /// All templates in the order their variants are issued
    pub const ALL: [ParaphraseTemplate; VARIANT_COUNT] = [
        ParaphraseTemplate::Original,
        ParaphraseTemplate::Explain,
        ParaphraseTemplate::WhatIsMeant,
        ParaphraseTemplate::GiveDetails,
    ];

    /// Render this template around the raw question text
    pub fn apply(&self, question: &str) -> String {
        match self {
            ParaphraseTemplate::Original => question.to_string(),
            ParaphraseTemplate::Explain => format!("Explain this: {}", question),
            ParaphraseTemplate::WhatIsMeant => format!("What is meant by {}?", question),
            ParaphraseTemplate::GiveDetails => format!("Give details about {}", question),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ParaphraseTemplate::Original => "original",
            ParaphraseTemplate::Explain => "explain",
            ParaphraseTemplate::WhatIsMeant => "what_is_meant",
            ParaphraseTemplate::GiveDetails => "give_details",
        }
    }
}

impl std::fmt::Display for ParaphraseTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A templated rewording of a [`Question`] (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QueryVariant {
    /// Template that produced this variant
    pub template: ParaphraseTemplate,
    /// Text sent to the answer generator
    pub text: String,
}

impl QueryVariant {
    pub fn new(template: ParaphraseTemplate, question: &Question) -> Self {
        Self {
            template,
            text: template.apply(question.content()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl std::fmt::Display for QueryVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// Produce the four variants of a question.
///
/// Pure and total: the same question always yields the same variants, and an
/// empty question is simply wrapped by the templates.
///
/// # Example
///
/// ```
/// use rag_domain::{Question, paraphrase};
///
/// let variants = paraphrase(&Question::new("the warranty"));
/// assert_eq!(variants[0].as_str(), "the warranty");
/// assert_eq!(variants[1].as_str(), "Explain this: the warranty");
/// assert_eq!(variants[2].as_str(), "What is meant by the warranty?");
/// assert_eq!(variants[3].as_str(), "Give details about the warranty");
/// ```
pub fn paraphrase(question: &Question) -> [QueryVariant; VARIANT_COUNT] {
    ParaphraseTemplate::ALL.map(|template| QueryVariant::new(template, question))
}
