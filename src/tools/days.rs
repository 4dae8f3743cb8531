//! Day MCP Tools
//!
//! Saving, skipping and viewing individual days.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::info;

use crate::db::Database;
use crate::domain::dates::{next_day, previous_day};
use crate::domain::{
    compute_daily_scores, daily_comment, format_date, month_streak_ending_at, parse_date,
    ScoreResult, YearMonth, DAILY_EMPTY_MESSAGE,
};
use crate::models::{DailyLog, Nut, SkipDay};

/// What is stored for a date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DayStatus {
    Recorded,
    Skipped,
    None,
}

/// Response for save_daily_log
#[derive(Debug, Serialize)]
pub struct SaveDailyLogResponse {
    pub date: String,
    pub nut_ids: Vec<i64>,
    pub score: ScoreResult,
    pub comment: String,
    pub month_streak: u32,
}

/// Response for skip_day
#[derive(Debug, Serialize)]
pub struct SkipDayResponse {
    pub date: String,
    pub skipped: bool,
    pub message: String,
}

/// Response for clear_day
#[derive(Debug, Serialize)]
pub struct ClearDayResponse {
    pub date: String,
    pub removed_record: bool,
    pub removed_skip: bool,
}

/// Full view of one day
#[derive(Debug, Serialize)]
pub struct DayDetail {
    pub date: String,
    pub previous_date: String,
    pub next_date: String,
    pub status: DayStatus,
    pub selected_nut_ids: Vec<i64>,
    /// Present only for recorded days
    pub score: Option<ScoreResult>,
    pub comment: String,
    pub month_streak: u32,
}

#[derive(Debug, Serialize)]
pub struct CalendarDay {
    pub date: String,
    pub status: DayStatus,
}

/// Response for get_month_calendar
#[derive(Debug, Serialize)]
pub struct MonthCalendar {
    pub year_month: YearMonth,
    pub days_in_month: u32,
    pub recorded_days: usize,
    pub skipped_days: usize,
    pub days: Vec<CalendarDay>,
}

/// Streak ending at `date`, counted within its month
fn month_streak_at(conn: &rusqlite::Connection, date: NaiveDate) -> Result<u32, String> {
    let first = YearMonth::from_date(date)
        .first_day()
        .map_err(|e| e.to_string())?;
    let dates = DailyLog::dates_in_range(conn, first, date)
        .map_err(|e| format!("Failed to load month records: {}", e))?;
    Ok(month_streak_ending_at(&dates, date))
}

// ============================================================================
// Day Tools
// ============================================================================

/// Replace the nut selection for a date and return the fresh score
pub fn save_daily_log(
    db: &Database,
    date: &str,
    nut_ids: &[i64],
) -> Result<SaveDailyLogResponse, String> {
    let day = parse_date(date).map_err(|e| e.to_string())?;
    let mut conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let log = DailyLog::save(&mut conn, day, nut_ids)
        .map_err(|e| format!("Failed to save daily log: {}", e))?;
    info!(date = %log.log_date, nuts = log.nut_ids.len(), "daily log saved");

    let catalog = Nut::list(&conn).map_err(|e| format!("Failed to load nuts: {}", e))?;
    let score = compute_daily_scores(&catalog, &log.nut_ids);
    let month_streak = month_streak_at(&conn, day)?;

    Ok(SaveDailyLogResponse {
        comment: daily_comment(&log.log_date, &score),
        date: log.log_date,
        nut_ids: log.nut_ids,
        score,
        month_streak,
    })
}

/// Mark a date as intentionally nut-free
pub fn skip_day(db: &Database, date: &str) -> Result<SkipDayResponse, String> {
    let day = parse_date(date).map_err(|e| e.to_string())?;
    let mut conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let skip = SkipDay::mark(&mut conn, day)
        .map_err(|e| format!("Failed to skip day: {}", e))?;
    info!(date = %skip.log_date, "day skipped");

    Ok(SkipDayResponse {
        date: skip.log_date,
        skipped: true,
        message: "No nuts today. Marked as skipped.".to_string(),
    })
}

/// Remove both the record and the skip marker for a date
pub fn clear_day(db: &Database, date: &str) -> Result<ClearDayResponse, String> {
    let day = parse_date(date).map_err(|e| e.to_string())?;
    let mut conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let cleared = DailyLog::clear(&mut conn, day)
        .map_err(|e| format!("Failed to clear day: {}", e))?;
    info!(
        date,
        removed_record = cleared.removed_record,
        removed_skip = cleared.removed_skip,
        "day cleared"
    );

    Ok(ClearDayResponse {
        date: format_date(day),
        removed_record: cleared.removed_record,
        removed_skip: cleared.removed_skip,
    })
}

/// Get a day with its selection, score, comment and streak
pub fn get_day(db: &Database, date: &str) -> Result<DayDetail, String> {
    let day = parse_date(date).map_err(|e| e.to_string())?;
    let previous_date = previous_day(day).map_err(|e| e.to_string())?;
    let next_date = next_day(day).map_err(|e| e.to_string())?;

    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let log = DailyLog::get_by_date(&conn, day)
        .map_err(|e| format!("Failed to get daily log: {}", e))?;
    let month_streak = month_streak_at(&conn, day)?;
    let date_str = format_date(day);

    let (status, selected_nut_ids, score, comment) = match log {
        Some(log) => {
            let catalog = Nut::list(&conn).map_err(|e| format!("Failed to load nuts: {}", e))?;
            let score = compute_daily_scores(&catalog, &log.nut_ids);
            let comment = daily_comment(&date_str, &score);
            (DayStatus::Recorded, log.nut_ids, Some(score), comment)
        }
        None => {
            let skipped = SkipDay::is_skipped(&conn, day)
                .map_err(|e| format!("Failed to check skip: {}", e))?;
            let status = if skipped { DayStatus::Skipped } else { DayStatus::None };
            (status, Vec::new(), None, DAILY_EMPTY_MESSAGE.to_string())
        }
    };

    Ok(DayDetail {
        date: date_str,
        previous_date: format_date(previous_date),
        next_date: format_date(next_date),
        status,
        selected_nut_ids,
        score,
        comment,
        month_streak,
    })
}

/// Per-day status for every day of a month
pub fn get_month_calendar(db: &Database, year_month: &str) -> Result<MonthCalendar, String> {
    let ym = YearMonth::parse(year_month).map_err(|e| e.to_string())?;
    let first = ym.first_day().map_err(|e| e.to_string())?;
    let last = ym.last_day().map_err(|e| e.to_string())?;

    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;
    let recorded = DailyLog::dates_in_range(&conn, first, last)
        .map_err(|e| format!("Failed to load records: {}", e))?;
    let skipped = SkipDay::dates_in_range(&conn, first, last)
        .map_err(|e| format!("Failed to load skips: {}", e))?;

    let days = first
        .iter_days()
        .take_while(|d| *d <= last)
        .map(|d| {
            let status = if recorded.contains(&d) {
                DayStatus::Recorded
            } else if skipped.contains(&d) {
                DayStatus::Skipped
            } else {
                DayStatus::None
            };
            CalendarDay {
                date: format_date(d),
                status,
            }
        })
        .collect();

    Ok(MonthCalendar {
        year_month: ym,
        days_in_month: ym.days_in_month(),
        recorded_days: recorded.len(),
        skipped_days: skipped.len(),
        days,
    })
}
