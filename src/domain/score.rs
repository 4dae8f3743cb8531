//! Daily score calculation
//!
//! Turns one day's nut selection into five 0-5 star ratings. Scores are never stored;
//! they are recomputed from the catalog every time a day or month is shown.

use std::collections::HashMap;
use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::models::Nut;

/// Upper bound of every score axis
pub const MAX_SCORE: u8 = 5;

/// Raw per-nut nutrient scores run 1-3
pub const MAX_NUT_SCORE: f64 = 3.0;

/// Distinct nuts needed for a full variety score
pub const MAX_VARIETY: usize = 6;

/// One of the five scored dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreKey {
    Antioxidant,
    Mineral,
    Fiber,
    Vitamin,
    Variety,
}

impl ScoreKey {
    /// Tie-break order for the strongest axis
    pub const PRIORITY: [ScoreKey; 5] = [
        ScoreKey::Antioxidant,
        ScoreKey::Mineral,
        ScoreKey::Fiber,
        ScoreKey::Vitamin,
        ScoreKey::Variety,
    ];

    /// Human-readable label used in comments
    pub fn label(&self) -> &'static str {
        match self {
            ScoreKey::Antioxidant => "Antioxidants",
            ScoreKey::Mineral => "Minerals",
            ScoreKey::Fiber => "Dietary fiber",
            ScoreKey::Vitamin => "Vitamins",
            ScoreKey::Variety => "Variety",
        }
    }
}

/// Five 0-5 star ratings for one day
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DailyScores {
    pub antioxidant: u8,
    pub mineral: u8,
    pub fiber: u8,
    pub vitamin: u8,
    pub variety: u8,
}

impl DailyScores {
    pub fn get(&self, key: ScoreKey) -> u8 {
        match key {
            ScoreKey::Antioxidant => self.antioxidant,
            ScoreKey::Mineral => self.mineral,
            ScoreKey::Fiber => self.fiber,
            ScoreKey::Vitamin => self.vitamin,
            ScoreKey::Variety => self.variety,
        }
    }
}

/// Scores for a day plus the balance classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoreResult {
    pub scores: DailyScores,
    /// Distinct catalog nuts selected, 0-6
    pub variety_count: u8,
    pub is_balanced: bool,
    pub strongest_key: ScoreKey,
}

impl ScoreResult {
    /// Result for a day with nothing selected
    pub fn empty() -> Self {
        Self {
            scores: DailyScores::default(),
            variety_count: 0,
            is_balanced: true,
            strongest_key: ScoreKey::Variety,
        }
    }
}

/// True when every axis lies within one point of every other
pub(crate) fn is_balanced(values: &[f64]) -> bool {
    let max = values.iter().copied().fold(f64::MIN, f64::max);
    let min = values.iter().copied().fold(f64::MAX, f64::min);
    // Averages are rounded to tenths, so allow for float noise at the boundary
    max - min <= 1.0 + 1e-9
}

/// First axis in priority order holding the maximum value
pub(crate) fn strongest_key(value_of: impl Fn(ScoreKey) -> f64) -> ScoreKey {
    let mut strongest = ScoreKey::Variety;
    let mut best = f64::MIN;
    for key in ScoreKey::PRIORITY {
        let v = value_of(key);
        if v > best {
            best = v;
            strongest = key;
        }
    }
    strongest
}

/// Linear rescale of `value` from [0, max] to [0, 5], rounded and clamped
fn scale_to_stars(value: f64, max: f64) -> u8 {
    (value / max * f64::from(MAX_SCORE))
        .round()
        .clamp(0.0, f64::from(MAX_SCORE)) as u8
}

/// Compute the five axis scores for one day's selection.
///
/// Duplicate IDs count once and IDs missing from the catalog are ignored, since a day may
/// reference a nut that has since been removed.
pub fn compute_daily_scores(catalog: &[Nut], selected_nut_ids: &[i64]) -> ScoreResult {
    let by_id: HashMap<i64, &Nut> = catalog.iter().map(|n| (n.id, n)).collect();

    let mut seen = HashSet::new();
    let selected: Vec<&Nut> = selected_nut_ids
        .iter()
        .filter(|id| seen.insert(**id))
        .filter_map(|id| by_id.get(id).copied())
        .collect();

    if selected.is_empty() {
        return ScoreResult::empty();
    }

    let variety_count = selected.len().min(MAX_VARIETY);
    let count = selected.len() as f64;
    let average = |raw: fn(&Nut) -> i64| -> f64 {
        selected.iter().map(|n| raw(n) as f64).sum::<f64>() / count
    };

    let scores = DailyScores {
        antioxidant: scale_to_stars(average(|n| n.scores.antioxidant), MAX_NUT_SCORE),
        mineral: scale_to_stars(average(|n| n.scores.mineral), MAX_NUT_SCORE),
        fiber: scale_to_stars(average(|n| n.scores.fiber), MAX_NUT_SCORE),
        vitamin: scale_to_stars(average(|n| n.scores.vitamin), MAX_NUT_SCORE),
        variety: scale_to_stars(variety_count as f64, MAX_VARIETY as f64),
    };

    let values = ScoreKey::PRIORITY.map(|k| f64::from(scores.get(k)));

    ScoreResult {
        scores,
        variety_count: variety_count as u8,
        is_balanced: is_balanced(&values),
        strongest_key: strongest_key(|k| f64::from(scores.get(k))),
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::models::{Nut, NutScores};

    pub fn nut(id: i64, antioxidant: i64, mineral: i64, fiber: i64, vitamin: i64) -> Nut {
        Nut {
            id,
            slug: format!("nut-{}", id),
            name: format!("Nut {}", id),
            description: None,
            image_path: format!("/nuts/nut-{}.png", id),
            scores: NutScores {
                antioxidant,
                mineral,
                fiber,
                vitamin,
            },
        }
    }

    /// Six nuts; nut 1 is antioxidant-heavy
    pub fn catalog() -> Vec<Nut> {
        vec![
            nut(1, 3, 1, 1, 1),
            nut(2, 2, 3, 2, 1),
            nut(3, 1, 2, 3, 2),
            nut(4, 2, 2, 1, 3),
            nut(5, 3, 3, 3, 3),
            nut(6, 1, 1, 2, 2),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::{catalog, nut};
    use super::*;

    #[test]
    fn test_empty_selection_is_all_zero() {
        let result = compute_daily_scores(&catalog(), &[]);
        assert_eq!(result.scores, DailyScores::default());
        assert_eq!(result.variety_count, 0);
        assert!(result.is_balanced);
        assert_eq!(result.strongest_key, ScoreKey::Variety);
    }

    #[test]
    fn test_single_antioxidant_nut() {
        let result = compute_daily_scores(&catalog(), &[1]);
        assert_eq!(
            result.scores,
            DailyScores {
                antioxidant: 5,
                mineral: 2,
                fiber: 2,
                vitamin: 2,
                variety: 1,
            }
        );
        assert_eq!(result.variety_count, 1);
        assert!(!result.is_balanced);
        assert_eq!(result.strongest_key, ScoreKey::Antioxidant);
    }

    #[test]
    fn test_duplicates_do_not_change_result() {
        let deduped = compute_daily_scores(&catalog(), &[1, 2]);
        let duplicated = compute_daily_scores(&catalog(), &[1, 2, 2, 1, 1]);
        assert_eq!(deduped, duplicated);
        assert_eq!(duplicated.variety_count, 2);
    }

    #[test]
    fn test_repeated_calls_are_identical() {
        let nuts = catalog();
        assert_eq!(
            compute_daily_scores(&nuts, &[3, 4, 6]),
            compute_daily_scores(&nuts, &[3, 4, 6])
        );
    }

    #[test]
    fn test_unknown_ids_are_ignored() {
        let with_stale = compute_daily_scores(&catalog(), &[1, 99, -4]);
        let clean = compute_daily_scores(&catalog(), &[1]);
        assert_eq!(with_stale, clean);
    }

    #[test]
    fn test_only_unknown_ids_is_empty() {
        assert_eq!(compute_daily_scores(&catalog(), &[42, 43]), ScoreResult::empty());
    }

    #[test]
    fn test_all_six_nuts() {
        let result = compute_daily_scores(&catalog(), &[1, 2, 3, 4, 5, 6]);
        // antioxidant avg 12/6 = 2.0 -> 3.33 -> 3
        assert_eq!(result.scores.antioxidant, 3);
        // mineral avg 12/6 = 2.0 -> 3
        assert_eq!(result.scores.mineral, 3);
        assert_eq!(result.scores.variety, 5);
        assert_eq!(result.variety_count, 6);
        assert!(!result.is_balanced);
        assert_eq!(result.strongest_key, ScoreKey::Variety);
    }

    #[test]
    fn test_tie_prefers_earlier_axis() {
        let nuts = vec![nut(1, 3, 3, 3, 3)];
        let result = compute_daily_scores(&nuts, &[1]);
        assert_eq!(result.scores.antioxidant, 5);
        assert_eq!(result.scores.vitamin, 5);
        assert_eq!(result.strongest_key, ScoreKey::Antioxidant);
    }

    #[test]
    fn test_balanced_day() {
        // avg 2 on every axis -> 3 stars; 4 nuts -> variety 3.33 -> 3
        let nuts = vec![
            nut(1, 2, 2, 2, 2),
            nut(2, 2, 2, 2, 2),
            nut(3, 2, 2, 2, 2),
            nut(4, 2, 2, 2, 2),
        ];
        let result = compute_daily_scores(&nuts, &[1, 2, 3, 4]);
        assert!(result.is_balanced);
        assert_eq!(result.strongest_key, ScoreKey::Antioxidant);
    }

    #[test]
    fn test_out_of_range_catalog_scores_are_clamped() {
        let nuts = vec![nut(1, 9, -2, 0, 3), nut(2, 9, 0, 0, 3)];
        let result = compute_daily_scores(&nuts, &[1, 2]);
        assert_eq!(result.scores.antioxidant, 5);
        assert_eq!(result.scores.mineral, 0);
    }

    #[test]
    fn test_variety_is_capped_for_large_catalogs() {
        let nuts: Vec<Nut> = (1..=8).map(|id| nut(id, 2, 2, 2, 2)).collect();
        let ids: Vec<i64> = (1..=8).collect();
        let result = compute_daily_scores(&nuts, &ids);
        assert_eq!(result.variety_count, 6);
        assert_eq!(result.scores.variety, 5);
    }

    #[test]
    fn test_every_axis_within_bounds() {
        let nuts = catalog();
        let ids: Vec<i64> = nuts.iter().map(|n| n.id).collect();
        for mask in 0u32..64 {
            let selected: Vec<i64> = ids
                .iter()
                .enumerate()
                .filter(|(i, _)| mask & (1 << i) != 0)
                .map(|(_, id)| *id)
                .collect();
            let result = compute_daily_scores(&nuts, &selected);
            for key in ScoreKey::PRIORITY {
                assert!(result.scores.get(key) <= MAX_SCORE);
            }
            assert!(usize::from(result.variety_count) <= MAX_VARIETY);
        }
    }

    #[test]
    fn test_score_key_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&ScoreKey::Antioxidant).unwrap(),
            "\"antioxidant\""
        );
    }
}
