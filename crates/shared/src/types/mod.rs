//! Common types used across the application.

pub mod amount;
pub mod id;

pub use amount::{
    DEFAULT_TOLERANCE, format_amount, format_quantity, format_trimmed, round_amount,
    round_unit_price, within_tolerance,
};
pub use id::*;
