//! Data models
//!
//! Rust structs representing database entities.

mod daily_log;
mod nut;
mod skip_day;

pub use daily_log::{ClearedDay, DailyLog};
pub use nut::{Nut, NutScores};
pub use skip_day::SkipDay;
