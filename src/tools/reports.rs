//! Report MCP Tools
//!
//! Monthly report and growth character views.

use serde::Serialize;

use crate::db::Database;
use crate::domain::{
    aggregate_monthly_report, character_for_month, character_image_path, growth_progress,
    monthly_comment, CharacterId, GrowthProgress, MonthlyReport, YearMonth,
};
use crate::models::{DailyLog, Nut};

/// Growth character for a period
#[derive(Debug, Serialize)]
pub struct CharacterView {
    pub character: CharacterId,
    pub image_path: String,
    pub progress: GrowthProgress,
}

/// Response for get_monthly_report
#[derive(Debug, Serialize)]
pub struct MonthlyReportResponse {
    #[serde(flatten)]
    pub report: MonthlyReport,
    pub comment: String,
    pub days_in_month: u32,
    /// None before 0001-01 and after 9999-12
    pub previous_month: Option<YearMonth>,
    pub next_month: Option<YearMonth>,
    /// Grown from this month's record days only
    pub character: CharacterView,
}

/// Response for get_growth
#[derive(Debug, Serialize)]
pub struct GrowthResponse {
    pub total_record_days: i64,
    #[serde(flatten)]
    pub character: CharacterView,
}

fn character_view(year_month: YearMonth, record_days: i64) -> Result<CharacterView, String> {
    let progress = growth_progress(record_days).map_err(|e| e.to_string())?;
    let character = character_for_month(year_month.month()).map_err(|e| e.to_string())?;
    Ok(CharacterView {
        character,
        image_path: character_image_path(character, progress.stage),
        progress,
    })
}

/// Build the monthly report for `year_month` (`YYYY-MM`), defaulting to the current month
pub fn get_monthly_report(
    db: &Database,
    year_month: Option<&str>,
) -> Result<MonthlyReportResponse, String> {
    let ym = match year_month {
        Some(s) => YearMonth::parse(s).map_err(|e| e.to_string())?,
        None => YearMonth::current(),
    };
    let first = ym.first_day().map_err(|e| e.to_string())?;
    let last = ym.last_day().map_err(|e| e.to_string())?;

    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;
    let catalog = Nut::list(&conn).map_err(|e| format!("Failed to load nuts: {}", e))?;
    let records = DailyLog::records_in_range(&conn, first, last)
        .map_err(|e| format!("Failed to load records: {}", e))?;

    let report = aggregate_monthly_report(ym, &catalog, &records);
    let comment = monthly_comment(&ym.to_string(), &report.monthly_score);
    let character = character_view(ym, i64::from(report.monthly_score.record_days))?;

    Ok(MonthlyReportResponse {
        comment,
        days_in_month: ym.days_in_month(),
        previous_month: ym.previous().ok(),
        next_month: ym.next().ok(),
        character,
        report,
    })
}

/// Growth progress over every record day ever logged
pub fn get_growth(db: &Database) -> Result<GrowthResponse, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;
    let total_record_days =
        DailyLog::count_all(&conn).map_err(|e| format!("Failed to count records: {}", e))?;

    Ok(GrowthResponse {
        total_record_days,
        character: character_view(YearMonth::current(), total_record_days)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{GrowthStage, ScoreKey, MONTHLY_EMPTY_MESSAGE};
    use crate::tools::days::save_daily_log;
    use crate::tools::test_database;

    #[test]
    fn test_empty_month_report() {
        let db = test_database();
        let response = get_monthly_report(&db, Some("2024-06")).unwrap();
        assert_eq!(response.comment, MONTHLY_EMPTY_MESSAGE);
        assert_eq!(response.report.monthly_score.record_days, 0);
        assert_eq!(response.report.nut_consumption.len(), 6);
        assert_eq!(response.days_in_month, 30);
        assert_eq!(response.previous_month.unwrap().to_string(), "2024-05");
        assert_eq!(response.next_month.unwrap().to_string(), "2024-07");
        assert_eq!(response.character.character, CharacterId::Wl);
        assert_eq!(response.character.progress.stage, GrowthStage::Seed);
    }

    #[test]
    fn test_month_report_with_records() {
        let db = test_database();
        save_daily_log(&db, "2024-07-01", &[1]).unwrap();
        save_daily_log(&db, "2024-07-02", &[1]).unwrap();
        save_daily_log(&db, "2024-07-03", &[1, 2]).unwrap();
        save_daily_log(&db, "2024-07-09", &[1]).unwrap();
        save_daily_log(&db, "2024-07-10", &[1]).unwrap();
        save_daily_log(&db, "2024-08-01", &[3]).unwrap();

        let response = get_monthly_report(&db, Some("2024-07")).unwrap();
        let report = &response.report;
        assert_eq!(report.monthly_score.record_days, 5);
        assert_eq!(report.max_streak, 3);
        assert_eq!(report.nut_consumption[0].days, 5);
        assert_eq!(report.nut_consumption[1].days, 1);
        assert_eq!(report.nut_consumption[2].days, 0);
        assert_eq!(report.monthly_score.strongest_key, ScoreKey::Antioxidant);
        assert_eq!(response.character.character, CharacterId::Al);
        assert_eq!(response.character.progress.stage, GrowthStage::Sprout);
        assert!(!response.comment.is_empty());
    }

    #[test]
    fn test_invalid_month_rejected() {
        let db = test_database();
        assert!(get_monthly_report(&db, Some("2024-13")).is_err());
        assert!(get_monthly_report(&db, Some("July")).is_err());
    }

    #[test]
    fn test_report_at_calendar_edges() {
        let db = test_database();
        save_daily_log(&db, "9999-12-31", &[1]).unwrap();

        let last = get_monthly_report(&db, Some("9999-12")).unwrap();
        assert_eq!(last.previous_month.unwrap().to_string(), "9999-11");
        assert!(last.next_month.is_none());
        assert_eq!(last.report.monthly_score.record_days, 1);

        let first = get_monthly_report(&db, Some("0001-01")).unwrap();
        assert!(first.previous_month.is_none());
        assert_eq!(first.next_month.unwrap().to_string(), "0001-02");
    }

    #[test]
    fn test_growth_counts_all_record_days() {
        let db = test_database();
        for day in 1..=6 {
            save_daily_log(&db, &format!("2024-01-{:02}", day), &[2]).unwrap();
        }
        save_daily_log(&db, "2024-03-15", &[2]).unwrap();

        let growth = get_growth(&db).unwrap();
        assert_eq!(growth.total_record_days, 7);
        assert_eq!(growth.character.progress.stage, GrowthStage::Sprout);
        assert_eq!(growth.character.progress.remaining_days, 3);
    }
}
