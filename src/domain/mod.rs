//! Scoring and reporting domain logic
//!
//! Pure functions only: no I/O and no shared state. The record store supplies catalog
//! and per-day selections; everything shown to the user is derived here.

pub mod comment;
pub mod dates;
pub mod error;
pub mod growth;
pub mod report;
pub mod score;
pub mod streak;

pub use comment::{daily_comment, monthly_comment, DAILY_EMPTY_MESSAGE, MONTHLY_EMPTY_MESSAGE};
pub use dates::{format_date, parse_date, YearMonth};
pub use error::{DomainError, DomainResult};
pub use growth::{
    character_for_month, character_image_path, growth_progress, growth_stage, CharacterId,
    GrowthProgress, GrowthStage,
};
pub use report::{
    aggregate_monthly_report, aggregate_nut_consumption, calculate_monthly_score, DailyRecord,
    MonthlyReport, MonthlyScoreResult, MonthlyScores, NutConsumption,
};
pub use score::{compute_daily_scores, DailyScores, ScoreKey, ScoreResult};
pub use streak::{max_streak_in_month, month_streak_ending_at};
