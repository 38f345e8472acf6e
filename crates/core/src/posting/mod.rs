//! Posting rules: business documents to balanced journal lines.

pub mod engine;
pub mod error;
pub mod rules;

#[cfg(test)]
mod engine_props;

pub use engine::PostingEngine;
pub use error::PostingError;
pub use rules::PostingRules;
