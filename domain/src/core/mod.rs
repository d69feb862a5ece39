//! Core domain concepts shared across all subdomains.
//!
//! - [`question::Question`]: the user's query about the indexed document
//! - [`error::DomainError`]: domain-level errors

pub mod error;
pub mod question;
