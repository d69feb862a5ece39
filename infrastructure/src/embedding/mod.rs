//! Offline embedding adapters

mod hash;

pub use hash::HashEmbedder;
