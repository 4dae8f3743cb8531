//! One-line comments for daily and monthly views
//!
//! A comment is picked from a fixed pool by hashing a seed such as `2024-05-01:balance`,
//! so the same day always shows the same comment without the choice being stored.

use super::report::MonthlyScoreResult;
use super::score::ScoreResult;

/// Shown for a day that has not been saved yet
pub const DAILY_EMPTY_MESSAGE: &str = "Save your selection to see today's scores.";

/// Shown for a month without any record days
pub const MONTHLY_EMPTY_MESSAGE: &str =
    "No records yet this month. Eat some nuts and start logging!";

/// Record days at which the monthly comment gains a congratulation
pub const HIGH_RECORD_DAYS: u32 = 15;

const BALANCE_TEMPLATES: [&str; 7] = [
    "Everything lines up nicely today. Few gaps, which is an ideal balance for a habit.",
    "No axis stands far apart from the others. A steady pace you can keep up easily.",
    "A smooth, even record. Days like this add up to a healthy routine.",
    "Nothing sticks out and nothing is missing. A balanced pattern that lasts.",
    "The whole picture is stable today. A great state for daily building.",
    "A well-balanced, reassuring record. Keeping this flow would be ideal.",
    "No bias at all and everything is in order. A very complete day for the habit.",
];

const STRENGTH_TEMPLATES: [&str; 7] = [
    "{label} stood out today. Keep it going!",
    "You got a solid dose of {label} again today. The habit is taking hold.",
    "{label} was the star of today. Keep it easy and carry on tomorrow.",
    "{label} is well covered. Aim for a balanced mix again tomorrow.",
    "Today's record centers on {label}. Keep stacking days without forcing it.",
    "{label} really showed up today. Building on your strengths is going well.",
    "Today leaned toward {label}. You're choosing what suits you.",
];

const MONTHLY_BALANCE_TEMPLATES: [&str; 4] = [
    "A well-balanced month overall. Keep it up!",
    "Every nutrient came in without much bias. A great habit.",
    "Your nutrient balance was in good shape this month. Let's carry it into next month.",
    "A nicely balanced month. Your healthy nut routine is going strong.",
];

const MONTHLY_STRENGTH_TEMPLATES: [&str; 4] = [
    "{label} was especially rich this month. Try paying attention to the others next month.",
    "A month with plenty of {label}. Keeping balance in mind will make it even better.",
    "This month's strength was {label}. Build on it and broaden your range.",
    "{label} stood out this month. Keep going and fill in the other nutrients too.",
];

const HIGH_RECORD_DAYS_TEMPLATES: [&str; 3] = [
    "You logged {days} days this month!",
    "{days} days of records. Well done.",
    "Amazing! {days} days and counting.",
];

/// 32-bit FNV-1a over the seed's bytes
pub fn hash_seed(seed: &str) -> u32 {
    const OFFSET_BASIS: u32 = 2_166_136_261;
    const PRIME: u32 = 16_777_619;

    seed.bytes().fold(OFFSET_BASIS, |h, b| {
        (h ^ u32::from(b)).wrapping_mul(PRIME)
    })
}

/// Stable pick from a non-empty pool
pub fn pick_deterministic<'a>(pool: &[&'a str], seed: &str) -> &'a str {
    pool[hash_seed(seed) as usize % pool.len()]
}

/// Comment for a saved day. Balanced days and strength days draw from different pools.
pub fn daily_comment(date: &str, result: &ScoreResult) -> String {
    if result.is_balanced {
        let seed = format!("{}:balance", date);
        return pick_deterministic(&BALANCE_TEMPLATES, &seed).to_string();
    }

    let seed = format!("{}:strength", date);
    pick_deterministic(&STRENGTH_TEMPLATES, &seed).replace("{label}", result.strongest_key.label())
}

/// Comment for a month, with a congratulation prepended once enough days are logged
pub fn monthly_comment(year_month: &str, result: &MonthlyScoreResult) -> String {
    if result.record_days == 0 {
        return MONTHLY_EMPTY_MESSAGE.to_string();
    }

    let seed = format!("{}:monthly", year_month);
    let comment = if result.is_balanced {
        pick_deterministic(&MONTHLY_BALANCE_TEMPLATES, &seed).to_string()
    } else {
        pick_deterministic(&MONTHLY_STRENGTH_TEMPLATES, &seed)
            .replace("{label}", result.strongest_key.label())
    };

    if result.record_days < HIGH_RECORD_DAYS {
        return comment;
    }

    let days_seed = format!("{}:days", seed);
    let congrats = pick_deterministic(&HIGH_RECORD_DAYS_TEMPLATES, &days_seed)
        .replace("{days}", &result.record_days.to_string());
    format!("{} {}", congrats, comment)
}
