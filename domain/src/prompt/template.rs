//! Prompt templates for the retrieval chain

use crate::document::entities::ScoredChunk;

/// Templates for generating the question-answering prompt
pub struct PromptTemplate;

impl PromptTemplate {
    /// System prompt for answering from retrieved context
    pub fn answer_system() -> &'static str {
        r#"You are an assistant answering questions about a single document.
Use only the provided pieces of context to answer.
If the context does not contain the answer, say that you don't know; do not make up an answer.
Keep the answer concise."#
    }

    /// User prompt that "stuffs" every retrieved chunk into one context block
    pub fn answer_prompt(question: &str, chunks: &[ScoredChunk]) -> String {
        let context = chunks
            .iter()
            .map(|c| c.chunk.text.trim())
            .collect::<Vec<_>>()
            .join("\n\n");

        format!(
            r#"Use the following pieces of context to answer the question at the end.

{}

Question: {}
Helpful Answer:"#,
            context, question
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::entities::Chunk;

    fn scored(index: usize, text: &str) -> ScoredChunk {
        ScoredChunk::new(Chunk::new(index, "doc.pdf", text), 0.9)
    }

    #[test]
    fn test_answer_prompt_contains_question_and_context() {
        let chunks = vec![
            scored(0, "Refunds are issued within 30 days."),
            scored(3, "Shipping is free over $50."),
        ];
        let prompt = PromptTemplate::answer_prompt("What is the refund window?", &chunks);
        assert!(prompt.contains("Question: What is the refund window?"));
        assert!(prompt.contains("Refunds are issued within 30 days.\n\nShipping is free over $50."));
        assert!(prompt.ends_with("Helpful Answer:"));
    }

    #[test]
    fn test_answer_prompt_trims_chunk_whitespace() {
        let prompt = PromptTemplate::answer_prompt("q", &[scored(0, "\n  body  \n")]);
        assert!(prompt.contains("\n\nbody\n\n"));
    }

    #[test]
    fn test_answer_prompt_without_context() {
        let prompt = PromptTemplate::answer_prompt("q", &[]);
        assert!(prompt.contains("Question: q"));
    }
}
