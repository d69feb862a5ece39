//! Vector index adapters

mod in_memory;

pub use in_memory::{InMemoryVectorIndex, cosine_similarity};
