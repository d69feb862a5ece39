//! Prompt domain
//!
//! Templates for the prompt sent to the language model once the relevant
//! chunks have been retrieved.

mod template;

pub use template::PromptTemplate;
