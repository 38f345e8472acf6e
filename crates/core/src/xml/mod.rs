//! Structured XML writing.
//!
//! The builder tracks the stack of open elements, escapes every piece of
//! text exactly once, and treats "omit when absent" as a first-class
//! operation so optional schema fields are never emitted empty.

pub mod builder;
pub mod error;

pub use builder::XmlBuilder;
pub use error::XmlError;
