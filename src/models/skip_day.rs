//! Skip day model
//!
//! A date the user marked as intentionally nut-free. A date is either recorded,
//! skipped, or neither.

use chrono::NaiveDate;
use rusqlite::{Connection, Row};
use serde::Serialize;

use crate::db::{DbError, DbResult};
use crate::domain::{format_date, parse_date};

#[derive(Debug, Clone, Serialize)]
pub struct SkipDay {
    pub log_date: String,
    pub created_at: String,
}

impl SkipDay {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            log_date: row.get("log_date")?,
            created_at: row.get("created_at")?,
        })
    }

    pub fn get_by_date(conn: &Connection, date: NaiveDate) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM skip_days WHERE log_date = ?1")?;

        match stmt.query_row([format_date(date)], Self::from_row) {
            Ok(skip) => Ok(Some(skip)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Mark a date as skipped, dropping any record saved for it
    pub fn mark(conn: &mut Connection, date: NaiveDate) -> DbResult<Self> {
        let date_str = format_date(date);
        let tx = conn.transaction()?;
        tx.execute("DELETE FROM daily_logs WHERE log_date = ?1", [&date_str])?;
        tx.execute(
            "INSERT OR IGNORE INTO skip_days (log_date) VALUES (?1)",
            [&date_str],
        )?;
        tx.commit()?;

        Self::get_by_date(conn, date)?
            .ok_or(DbError::Sqlite(rusqlite::Error::QueryReturnedNoRows))
    }

    /// Remove a skip marker; true if one existed
    pub fn unmark(conn: &Connection, date: NaiveDate) -> DbResult<bool> {
        let rows = conn.execute(
            "DELETE FROM skip_days WHERE log_date = ?1",
            [format_date(date)],
        )?;
        Ok(rows > 0)
    }

    pub fn is_skipped(conn: &Connection, date: NaiveDate) -> DbResult<bool> {
        Ok(Self::get_by_date(conn, date)?.is_some())
    }

    /// Skipped dates between two dates (inclusive), ascending
    pub fn dates_in_range(
        conn: &Connection,
        start: NaiveDate,
        end: NaiveDate,
    ) -> DbResult<Vec<NaiveDate>> {
        let mut stmt = conn.prepare(
            "SELECT log_date FROM skip_days WHERE log_date BETWEEN ?1 AND ?2 ORDER BY log_date",
        )?;
        let raw = stmt
            .query_map([format_date(start), format_date(end)], |row| {
                row.get::<_, String>(0)
            })?
            .collect::<Result<Vec<_>, _>>()?;

        raw.iter()
            .map(|s| parse_date(s).map_err(DbError::from))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;
    use crate::models::DailyLog;

    fn seeded() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("PRAGMA foreign_keys = ON;").unwrap();
        run_migrations(&conn).unwrap();
        conn
    }

    fn d(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    #[test]
    fn test_mark_and_unmark() {
        let mut conn = seeded();
        let skip = SkipDay::mark(&mut conn, d("2024-05-04")).unwrap();
        assert_eq!(skip.log_date, "2024-05-04");
        assert!(SkipDay::is_skipped(&conn, d("2024-05-04")).unwrap());

        // Marking twice is harmless
        SkipDay::mark(&mut conn, d("2024-05-04")).unwrap();

        assert!(SkipDay::unmark(&conn, d("2024-05-04")).unwrap());
        assert!(!SkipDay::is_skipped(&conn, d("2024-05-04")).unwrap());
        assert!(!SkipDay::unmark(&conn, d("2024-05-04")).unwrap());
    }

    #[test]
    fn test_mark_drops_record() {
        let mut conn = seeded();
        DailyLog::save(&mut conn, d("2024-05-04"), &[1, 2]).unwrap();
        SkipDay::mark(&mut conn, d("2024-05-04")).unwrap();

        assert!(DailyLog::get_by_date(&conn, d("2024-05-04")).unwrap().is_none());
        assert_eq!(DailyLog::count_all(&conn).unwrap(), 0);
    }

    #[test]
    fn test_dates_in_range() {
        let mut conn = seeded();
        SkipDay::mark(&mut conn, d("2024-05-09")).unwrap();
        SkipDay::mark(&mut conn, d("2024-05-02")).unwrap();
        SkipDay::mark(&mut conn, d("2024-06-01")).unwrap();

        let dates = SkipDay::dates_in_range(&conn, d("2024-05-01"), d("2024-05-31")).unwrap();
        assert_eq!(dates, vec![d("2024-05-02"), d("2024-05-09")]);
    }
}
