//! Consecutive-day streaks
//!
//! Two separate questions are answered here. The monthly report wants the longest run of
//! consecutive record days anywhere in the month; the daily view wants the run that ends on
//! the day being shown, counted back no further than the first of its month.

use std::collections::HashSet;

use chrono::{Datelike, NaiveDate};

use super::dates::days_between;

/// Longest run of calendar-consecutive dates.
///
/// Input dates are expected to be pre-filtered to one month; order and duplicates don't matter.
pub fn max_streak_in_month(dates: &[NaiveDate]) -> u32 {
    let mut sorted = dates.to_vec();
    sorted.sort_unstable();
    sorted.dedup();

    if sorted.is_empty() {
        return 0;
    }

    let mut max_streak = 1;
    let mut current = 1;
    for pair in sorted.windows(2) {
        if days_between(pair[0], pair[1]) == 1 {
            current += 1;
            max_streak = max_streak.max(current);
        } else {
            current = 1;
        }
    }
    max_streak
}

/// Run of consecutive record days ending at `base`, stopping at the first gap or at the
/// first day of `base`'s month. Zero when `base` itself has no record.
pub fn month_streak_ending_at(dates: &[NaiveDate], base: NaiveDate) -> u32 {
    let recorded: HashSet<NaiveDate> = dates.iter().copied().collect();

    let mut streak = 0;
    let mut day = base;
    while recorded.contains(&day) {
        streak += 1;
        if day.day() == 1 {
            break;
        }
        match day.pred_opt() {
            Some(prev) => day = prev,
            None => break,
        }
    }
    streak
}
