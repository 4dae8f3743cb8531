//! Nuts Balance Status Tool
//!
//! Runtime status of the service and the usage guide handed to assistants.

use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;
use chrono::NaiveDate;
use rusqlite::Connection;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::build_info::BuildInfo;
use crate::db::{migrations, Database, DbResult};
use crate::domain::YearMonth;
use crate::models::{DailyLog, Nut, SkipDay};

/// Usage guide for AI assistants
pub const INSTRUCTIONS: &str = r#"
# Nuts Balance Instructions

Nuts Balance records which nuts were eaten each day and turns the selection into five
0-5 scores: antioxidants, minerals, dietary fiber, vitamins and variety.

## Dates

All dates are `YYYY-MM-DD`; months are `YYYY-MM`. Ask the user for the date when
"today" is ambiguous. Never guess a date.

## Logging a day

1. Call `list_nuts` to get the catalog IDs.
2. Call `save_daily_log` with the date and every nut eaten that day.
   Saving again replaces the day's selection; it does not add to it.
3. Show the returned scores and comment. `month_streak` counts consecutive
   recorded days ending at the date, within its month.

If the user ate no nuts on purpose, call `skip_day`. `clear_day` removes both a
record and a skip marker.

## Reviewing

| Tool | Use |
|------|-----|
| `get_day` | one day: selection, scores, comment, neighbours |
| `get_month_calendar` | recorded / skipped / none for every day of a month |
| `get_monthly_report` | averages, nut consumption, longest streak, comment |
| `get_growth` | growth stage from every record day ever logged |

## Scores

Daily nutrient scores are the average of the selected nuts' 1-3 ratings rescaled
to 0-5. Variety is the number of different nuts out of six, rescaled to 0-5. A day
is balanced when all five scores (antioxidants, minerals, dietary fiber, vitamins
and variety) lie within one point of each other. A one-nut day has a variety
score of 1, so it is balanced only when every nutrient score is 2.
"#;

/// What the record store holds
#[derive(Debug, Serialize)]
pub struct StoreStatus {
    pub schema_version: i32,
    /// False when the database predates this binary's migrations
    pub schema_current: bool,
    pub catalog_size: i64,
    pub total_record_days: i64,
    pub record_days_this_month: usize,
    pub skipped_days_this_month: usize,
}

/// Status information returned by `nuts_status`
#[derive(Debug, Serialize)]
pub struct NutsStatus {
    pub build: BuildInfo,
    pub store: StoreStatus,

    pub database_path: String,
    pub database_size_bytes: Option<u64>,

    pub uptime_seconds: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,
}

/// Collects runtime information for `nuts_status`
pub struct StatusTracker {
    start_time: Instant,
    database_path: PathBuf,
}

impl StatusTracker {
    pub fn new(database_path: PathBuf) -> Self {
        Self {
            start_time: Instant::now(),
            database_path,
        }
    }

    fn read_store(conn: &Connection, first: NaiveDate, last: NaiveDate) -> DbResult<StoreStatus> {
        Ok(StoreStatus {
            schema_version: migrations::get_schema_version(conn)?,
            schema_current: migrations::is_current(conn)?,
            catalog_size: Nut::count(conn)?,
            total_record_days: DailyLog::count_all(conn)?,
            record_days_this_month: DailyLog::dates_in_range(conn, first, last)?.len(),
            skipped_days_this_month: SkipDay::dates_in_range(conn, first, last)?.len(),
        })
    }

    fn store_status(db: &Database) -> Result<StoreStatus, String> {
        let month = YearMonth::current();
        let first = month.first_day().map_err(|e| e.to_string())?;
        let last = month.last_day().map_err(|e| e.to_string())?;

        let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;
        Self::read_store(&conn, first, last).map_err(|e| format!("Failed to read store status: {}", e))
    }

    /// Process memory in bytes, 0 if the process table cannot be read
    fn memory_usage(pid: u32) -> u64 {
        let pid = Pid::from_u32(pid);
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[pid]));
        sys.process(pid).map_or(0, |p| p.memory())
    }

    pub fn get_status(&self, db: &Database) -> Result<NutsStatus, String> {
        let process_id = std::process::id();

        Ok(NutsStatus {
            build: BuildInfo::current(),
            store: Self::store_status(db)?,
            database_path: self.database_path.display().to_string(),
            database_size_bytes: std::fs::metadata(&self.database_path).ok().map(|m| m.len()),
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id,
            memory_usage_bytes: Self::memory_usage(process_id),
        })
    }
}
