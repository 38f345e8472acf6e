//! Shared types, errors, and configuration for Racun.
//!
//! This crate provides common building blocks used by the other crates:
//! - Fixed-precision amount rounding and formatting
//! - Typed IDs for type-safe entity references
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
