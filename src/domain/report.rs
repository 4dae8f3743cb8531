//! Monthly report aggregation
//!
//! Folds a month of daily records into average scores, per-nut day counts and the
//! month's longest streak.

use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::NaiveDate;
use serde::Serialize;

use super::dates::{parse_date, YearMonth};
use super::error::DomainResult;
use super::score::{compute_daily_scores, is_balanced, strongest_key, ScoreKey};
use super::streak::max_streak_in_month;
use crate::models::Nut;

/// One saved day: the date and the nuts selected on it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyRecord {
    pub date: NaiveDate,
    pub nut_ids: Vec<i64>,
}

impl DailyRecord {
    pub fn new(date: NaiveDate, nut_ids: Vec<i64>) -> Self {
        Self { date, nut_ids }
    }

    /// Build a record from a `YYYY-MM-DD` string
    pub fn parse(date: &str, nut_ids: Vec<i64>) -> DomainResult<Self> {
        Ok(Self::new(parse_date(date)?, nut_ids))
    }
}

/// Average of each axis over a month, rounded to one decimal
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct MonthlyScores {
    pub antioxidant: f64,
    pub mineral: f64,
    pub fiber: f64,
    pub vitamin: f64,
    pub variety: f64,
}

impl MonthlyScores {
    pub fn get(&self, key: ScoreKey) -> f64 {
        match key {
            ScoreKey::Antioxidant => self.antioxidant,
            ScoreKey::Mineral => self.mineral,
            ScoreKey::Fiber => self.fiber,
            ScoreKey::Vitamin => self.vitamin,
            ScoreKey::Variety => self.variety,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MonthlyScoreResult {
    pub average_scores: MonthlyScores,
    pub record_days: u32,
    pub is_balanced: bool,
    pub strongest_key: ScoreKey,
}

impl MonthlyScoreResult {
    /// Result for a month without records
    pub fn empty() -> Self {
        Self {
            average_scores: MonthlyScores::default(),
            record_days: 0,
            is_balanced: true,
            strongest_key: ScoreKey::Variety,
        }
    }
}

/// How many days in the month a nut was eaten
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NutConsumption {
    pub nut_id: i64,
    pub name: String,
    pub days: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyReport {
    pub year_month: YearMonth,
    pub monthly_score: MonthlyScoreResult,
    pub nut_consumption: Vec<NutConsumption>,
    pub max_streak: u32,
    /// Ascending
    pub recorded_dates: Vec<NaiveDate>,
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// One record per date, ascending; a later record for the same date replaces an earlier one
fn latest_per_date(records: &[DailyRecord]) -> Vec<&DailyRecord> {
    let mut by_date: BTreeMap<NaiveDate, &DailyRecord> = BTreeMap::new();
    for record in records {
        by_date.insert(record.date, record);
    }
    by_date.into_values().collect()
}

/// Count distinct record dates per catalog nut. Every catalog nut appears, in catalog order.
pub fn aggregate_nut_consumption(catalog: &[Nut], records: &[DailyRecord]) -> Vec<NutConsumption> {
    let mut days_by_nut: HashMap<i64, HashSet<NaiveDate>> =
        catalog.iter().map(|n| (n.id, HashSet::new())).collect();

    for record in latest_per_date(records) {
        for nut_id in &record.nut_ids {
            if let Some(days) = days_by_nut.get_mut(nut_id) {
                days.insert(record.date);
            }
        }
    }

    catalog
        .iter()
        .map(|nut| NutConsumption {
            nut_id: nut.id,
            name: nut.name.clone(),
            days: days_by_nut.get(&nut.id).map_or(0, |d| d.len() as u32),
        })
        .collect()
}

/// Average the daily scores of every record day in the month
pub fn calculate_monthly_score(catalog: &[Nut], records: &[DailyRecord]) -> MonthlyScoreResult {
    let days = latest_per_date(records);
    if days.is_empty() {
        return MonthlyScoreResult::empty();
    }

    let record_days = days.len() as u32;
    let mut sums = [0.0f64; 5];
    for record in &days {
        let daily = compute_daily_scores(catalog, &record.nut_ids);
        for (sum, key) in sums.iter_mut().zip(ScoreKey::PRIORITY) {
            *sum += f64::from(daily.scores.get(key));
        }
    }

    let n = f64::from(record_days);
    let average_scores = MonthlyScores {
        antioxidant: round_to_tenth(sums[0] / n),
        mineral: round_to_tenth(sums[1] / n),
        fiber: round_to_tenth(sums[2] / n),
        vitamin: round_to_tenth(sums[3] / n),
        variety: round_to_tenth(sums[4] / n),
    };

    let values = ScoreKey::PRIORITY.map(|k| average_scores.get(k));

    MonthlyScoreResult {
        average_scores,
        record_days,
        is_balanced: is_balanced(&values),
        strongest_key: strongest_key(|k| average_scores.get(k)),
    }
}

/// Build the full monthly report. Records outside `year_month` are ignored.
pub fn aggregate_monthly_report(
    year_month: YearMonth,
    catalog: &[Nut],
    records: &[DailyRecord],
) -> MonthlyReport {
    let in_month: Vec<DailyRecord> = records
        .iter()
        .filter(|r| year_month.contains(r.date))
        .cloned()
        .collect();

    let recorded_dates: Vec<NaiveDate> = latest_per_date(&in_month)
        .into_iter()
        .map(|r| r.date)
        .collect();

    MonthlyReport {
        year_month,
        monthly_score: calculate_monthly_score(catalog, &in_month),
        nut_consumption: aggregate_nut_consumption(catalog, &in_month),
        max_streak: max_streak_in_month(&recorded_dates),
        recorded_dates,
    }
}
