//! Daily log model
//!
//! One row per recorded date, with the selected nuts stored as items. Saving a date
//! replaces its previous selection.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rusqlite::{params, Connection, Row};
use serde::Serialize;

use crate::db::{DbError, DbResult};
use crate::domain::{format_date, parse_date, DailyRecord};
use super::{Nut, SkipDay};

/// What clearing a date removed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ClearedDay {
    pub removed_record: bool,
    pub removed_skip: bool,
}

/// A recorded day
#[derive(Debug, Clone, Serialize)]
pub struct DailyLog {
    pub id: i64,
    pub log_date: String,
    pub nut_ids: Vec<i64>,
    pub created_at: String,
    pub updated_at: String,
}

impl DailyLog {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            log_date: row.get("log_date")?,
            nut_ids: Vec::new(),
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        })
    }

    fn load_nut_ids(conn: &Connection, daily_log_id: i64) -> DbResult<Vec<i64>> {
        let mut stmt = conn.prepare(
            "SELECT nut_id FROM daily_log_items WHERE daily_log_id = ?1 ORDER BY nut_id",
        )?;
        let ids = stmt
            .query_map([daily_log_id], |row| row.get(0))?
            .collect::<Result<Vec<i64>, _>>()?;
        Ok(ids)
    }

    /// Get the log for a date, with its nut IDs
    pub fn get_by_date(conn: &Connection, date: NaiveDate) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM daily_logs WHERE log_date = ?1")?;

        let mut log = match stmt.query_row([format_date(date)], Self::from_row) {
            Ok(log) => log,
            Err(rusqlite::Error::QueryReturnedNoRows) => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        log.nut_ids = Self::load_nut_ids(conn, log.id)?;
        Ok(Some(log))
    }

    /// Replace the selection for a date.
    ///
    /// The selection must name at least one catalog nut. Any skip marker on the date is
    /// removed in the same transaction.
    pub fn save(conn: &mut Connection, date: NaiveDate, nut_ids: &[i64]) -> DbResult<Self> {
        let mut unique: Vec<i64> = Vec::with_capacity(nut_ids.len());
        for id in nut_ids {
            if !unique.contains(id) {
                unique.push(*id);
            }
        }

        if unique.is_empty() {
            return Err(DbError::Rejected("select at least one nut".to_string()));
        }

        let known = Nut::all_ids(conn)?;
        if let Some(unknown) = unique.iter().find(|id| !known.contains(*id)) {
            return Err(DbError::Rejected(format!("unknown nut id {}", unknown)));
        }

        let date_str = format_date(date);
        let tx = conn.transaction()?;

        tx.execute(
            r#"
            INSERT INTO daily_logs (log_date) VALUES (?1)
            ON CONFLICT(log_date) DO UPDATE SET updated_at = datetime('now')
            "#,
            [&date_str],
        )?;
        let log_id: i64 = tx.query_row(
            "SELECT id FROM daily_logs WHERE log_date = ?1",
            [&date_str],
            |row| row.get(0),
        )?;

        tx.execute("DELETE FROM daily_log_items WHERE daily_log_id = ?1", [log_id])?;
        {
            let mut insert = tx.prepare(
                "INSERT INTO daily_log_items (daily_log_id, nut_id) VALUES (?1, ?2)",
            )?;
            for nut_id in &unique {
                insert.execute(params![log_id, nut_id])?;
            }
        }
        tx.execute("DELETE FROM skip_days WHERE log_date = ?1", [&date_str])?;
        tx.commit()?;

        Self::get_by_date(conn, date)?
            .ok_or(DbError::Sqlite(rusqlite::Error::QueryReturnedNoRows))
    }

    /// Remove the log for a date; true if one existed
    pub fn delete_by_date(conn: &Connection, date: NaiveDate) -> DbResult<bool> {
        let rows = conn.execute(
            "DELETE FROM daily_logs WHERE log_date = ?1",
            [format_date(date)],
        )?;
        Ok(rows > 0)
    }

    /// Remove both the record and the skip marker for a date in one transaction
    pub fn clear(conn: &mut Connection, date: NaiveDate) -> DbResult<ClearedDay> {
        let tx = conn.transaction()?;
        let removed_record = Self::delete_by_date(&tx, date)?;
        let removed_skip = SkipDay::unmark(&tx, date)?;
        tx.commit()?;

        Ok(ClearedDay {
            removed_record,
            removed_skip,
        })
    }

    /// Records between two dates (inclusive), ascending by date
    pub fn records_in_range(
        conn: &Connection,
        start: NaiveDate,
        end: NaiveDate,
    ) -> DbResult<Vec<DailyRecord>> {
        let mut stmt = conn.prepare(
            r#"
            SELECT l.log_date, i.nut_id
            FROM daily_logs l
            JOIN daily_log_items i ON i.daily_log_id = l.id
            WHERE l.log_date BETWEEN ?1 AND ?2
            ORDER BY l.log_date, i.nut_id
            "#,
        )?;

        let rows = stmt
            .query_map([format_date(start), format_date(end)], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        let mut by_date: BTreeMap<String, Vec<i64>> = BTreeMap::new();
        for (date, nut_id) in rows {
            by_date.entry(date).or_default().push(nut_id);
        }

        by_date
            .into_iter()
            .map(|(date, nut_ids)| -> DbResult<DailyRecord> {
                Ok(DailyRecord::new(parse_date(&date)?, nut_ids))
            })
            .collect()
    }

    /// Dates with a record between two dates (inclusive), ascending
    pub fn dates_in_range(
        conn: &Connection,
        start: NaiveDate,
        end: NaiveDate,
    ) -> DbResult<Vec<NaiveDate>> {
        Ok(Self::records_in_range(conn, start, end)?
            .into_iter()
            .map(|r| r.date)
            .collect())
    }

    /// Total record days ever logged
    pub fn count_all(conn: &Connection) -> DbResult<i64> {
        let count: i64 = conn.query_row(
            "SELECT COUNT(DISTINCT daily_log_id) FROM daily_log_items",
            [],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;

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
    fn test_save_and_get() {
        let mut conn = seeded();
        let log = DailyLog::save(&mut conn, d("2024-05-01"), &[3, 1, 3]).unwrap();
        assert_eq!(log.log_date, "2024-05-01");
        assert_eq!(log.nut_ids, vec![1, 3]);

        let fetched = DailyLog::get_by_date(&conn, d("2024-05-01")).unwrap().unwrap();
        assert_eq!(fetched.id, log.id);
        assert_eq!(fetched.nut_ids, vec![1, 3]);
    }

    #[test]
    fn test_resave_replaces_selection() {
        let mut conn = seeded();
        let first = DailyLog::save(&mut conn, d("2024-05-01"), &[1, 2, 3]).unwrap();
        let second = DailyLog::save(&mut conn, d("2024-05-01"), &[6]).unwrap();
        assert_eq!(first.id, second.id);
        assert_eq!(second.nut_ids, vec![6]);
        assert_eq!(DailyLog::count_all(&conn).unwrap(), 1);
    }

    #[test]
    fn test_save_rejects_empty_selection() {
        let mut conn = seeded();
        let err = DailyLog::save(&mut conn, d("2024-05-01"), &[]).unwrap_err();
        assert!(matches!(err, DbError::Rejected(_)));
        assert!(DailyLog::get_by_date(&conn, d("2024-05-01")).unwrap().is_none());
    }

    #[test]
    fn test_save_rejects_unknown_nut() {
        let mut conn = seeded();
        let err = DailyLog::save(&mut conn, d("2024-05-01"), &[1, 77]).unwrap_err();
        assert!(err.to_string().contains("77"));
        assert!(DailyLog::get_by_date(&conn, d("2024-05-01")).unwrap().is_none());
    }

    #[test]
    fn test_save_clears_skip_marker() {
        let mut conn = seeded();
        conn.execute("INSERT INTO skip_days (log_date) VALUES ('2024-05-02')", [])
            .unwrap();
        DailyLog::save(&mut conn, d("2024-05-02"), &[2]).unwrap();
        let skips: i64 = conn
            .query_row("SELECT COUNT(*) FROM skip_days", [], |row| row.get(0))
            .unwrap();
        assert_eq!(skips, 0);
    }

    #[test]
    fn test_records_in_range() {
        let mut conn = seeded();
        DailyLog::save(&mut conn, d("2024-04-30"), &[1]).unwrap();
        DailyLog::save(&mut conn, d("2024-05-03"), &[4, 2]).unwrap();
        DailyLog::save(&mut conn, d("2024-05-01"), &[5]).unwrap();
        DailyLog::save(&mut conn, d("2024-06-01"), &[6]).unwrap();

        let records = DailyLog::records_in_range(&conn, d("2024-05-01"), d("2024-05-31")).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].date, d("2024-05-01"));
        assert_eq!(records[0].nut_ids, vec![5]);
        assert_eq!(records[1].nut_ids, vec![2, 4]);

        let dates = DailyLog::dates_in_range(&conn, d("2024-04-01"), d("2024-06-30")).unwrap();
        assert_eq!(dates.len(), 4);
        assert_eq!(DailyLog::count_all(&conn).unwrap(), 4);
    }

    #[test]
    fn test_clear_removes_record_and_skip() {
        let mut conn = seeded();
        DailyLog::save(&mut conn, d("2024-05-01"), &[1]).unwrap();
        conn.execute("INSERT INTO skip_days (log_date) VALUES ('2024-05-02')", [])
            .unwrap();

        let record = DailyLog::clear(&mut conn, d("2024-05-01")).unwrap();
        assert_eq!(
            record,
            ClearedDay {
                removed_record: true,
                removed_skip: false
            }
        );
        let skip = DailyLog::clear(&mut conn, d("2024-05-02")).unwrap();
        assert!(!skip.removed_record && skip.removed_skip);
        let nothing = DailyLog::clear(&mut conn, d("2024-05-03")).unwrap();
        assert!(!nothing.removed_record && !nothing.removed_skip);
    }

    #[test]
    fn test_clear_rolls_back_when_a_delete_fails() {
        let mut conn = seeded();
        DailyLog::save(&mut conn, d("2024-05-01"), &[1]).unwrap();
        conn.execute_batch(
            "CREATE TRIGGER block_unskip BEFORE DELETE ON skip_days
             BEGIN SELECT RAISE(ABORT, 'blocked'); END;
             INSERT INTO skip_days (log_date) VALUES ('2024-05-01');",
        )
        .unwrap();

        assert!(DailyLog::clear(&mut conn, d("2024-05-01")).is_err());
        assert!(DailyLog::get_by_date(&conn, d("2024-05-01")).unwrap().is_some());
    }

    #[test]
    fn test_delete_by_date() {
        let mut conn = seeded();
        DailyLog::save(&mut conn, d("2024-05-01"), &[1]).unwrap();
        assert!(DailyLog::delete_by_date(&conn, d("2024-05-01")).unwrap());
        assert!(!DailyLog::delete_by_date(&conn, d("2024-05-01")).unwrap());
        assert_eq!(DailyLog::count_all(&conn).unwrap(), 0);
    }
}
