//! Pipeline orchestration domain
//!
//! Phases reported while a document is indexed and questions are answered,
//! and the result of a single retrieval-chain answer.

pub mod entities;
pub mod value_objects;

pub use entities::Phase;
pub use value_objects::RetrievalAnswer;
