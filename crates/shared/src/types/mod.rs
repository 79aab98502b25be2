//! Common types used across the engine.

pub mod id;
pub mod money;

pub use id::*;
pub use money::{MONEY_SCALE, is_money_equal, round_money};
