//! Growth character progress
//!
//! Record days grow a nut character through five stages. The character shown alternates
//! by calendar month.

use serde::{Serialize, Serializer};

use super::error::{DomainError, DomainResult};

/// Stage of the growth character, 1 through 5
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GrowthStage {
    Seed = 1,
    Sprout = 2,
    Sapling = 3,
    Tree = 4,
    Fruiting = 5,
}

impl GrowthStage {
    pub const ALL: [GrowthStage; 5] = [
        GrowthStage::Seed,
        GrowthStage::Sprout,
        GrowthStage::Sapling,
        GrowthStage::Tree,
        GrowthStage::Fruiting,
    ];

    pub fn number(&self) -> u8 {
        *self as u8
    }

    /// Minimum cumulative record days needed to reach this stage
    pub fn threshold(&self) -> i64 {
        match self {
            GrowthStage::Seed => 0,
            GrowthStage::Sprout => 5,
            GrowthStage::Sapling => 10,
            GrowthStage::Tree => 15,
            GrowthStage::Fruiting => 21,
        }
    }

    /// Meter icon for this stage
    pub fn icon(&self) -> &'static str {
        match self {
            GrowthStage::Seed => "🌱",
            GrowthStage::Sprout => "🌿",
            GrowthStage::Sapling => "🌳",
            GrowthStage::Tree => "🌳✨",
            GrowthStage::Fruiting => "🌳🌰",
        }
    }

    pub fn is_max(&self) -> bool {
        *self == GrowthStage::Fruiting
    }

    /// The following stage, or this one at the top
    pub fn next(&self) -> GrowthStage {
        match self {
            GrowthStage::Seed => GrowthStage::Sprout,
            GrowthStage::Sprout => GrowthStage::Sapling,
            GrowthStage::Sapling => GrowthStage::Tree,
            GrowthStage::Tree | GrowthStage::Fruiting => GrowthStage::Fruiting,
        }
    }
}

impl Serialize for GrowthStage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.number())
    }
}

/// Progress toward the next growth stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GrowthProgress {
    pub stage: GrowthStage,
    pub icon: &'static str,
    pub is_max_stage: bool,
    pub current_threshold: i64,
    pub next_threshold: i64,
    pub remaining_days: i64,
    /// 0-100
    pub progress_pct: u8,
}

fn check_record_days(record_days: i64) -> DomainResult<()> {
    if record_days < 0 {
        return Err(DomainError::invalid(format!(
            "record days must not be negative, got {}",
            record_days
        )));
    }
    Ok(())
}

/// Highest stage whose threshold has been reached
pub fn growth_stage(record_days: i64) -> DomainResult<GrowthStage> {
    check_record_days(record_days)?;
    Ok(GrowthStage::ALL
        .into_iter()
        .rev()
        .find(|s| record_days >= s.threshold())
        .unwrap_or(GrowthStage::Seed))
}

pub fn growth_progress(record_days: i64) -> DomainResult<GrowthProgress> {
    let stage = growth_stage(record_days)?;
    let is_max_stage = stage.is_max();

    let current_threshold = stage.threshold();
    let next_threshold = stage.next().threshold();

    let ratio = if is_max_stage {
        1.0
    } else {
        let span = (next_threshold - current_threshold).max(1) as f64;
        (record_days - current_threshold) as f64 / span
    };
    let progress_pct = (ratio.clamp(0.0, 1.0) * 100.0).round() as u8;

    let remaining_days = if is_max_stage {
        0
    } else {
        (next_threshold - record_days).max(0)
    };

    Ok(GrowthProgress {
        stage,
        icon: stage.icon(),
        is_max_stage,
        current_threshold,
        next_threshold,
        remaining_days,
        progress_pct,
    })
}

/// Which of the two nut characters appears in a given month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CharacterId {
    /// Odd months
    Al,
    /// Even months
    Wl,
}

impl CharacterId {
    pub fn as_str(&self) -> &'static str {
        match self {
            CharacterId::Al => "al",
            CharacterId::Wl => "wl",
        }
    }
}

/// Pick the character for a calendar month (1-12)
pub fn character_for_month(month: u32) -> DomainResult<CharacterId> {
    if !(1..=12).contains(&month) {
        return Err(DomainError::invalid(format!("month {} out of range", month)));
    }
    Ok(if month % 2 == 0 {
        CharacterId::Wl
    } else {
        CharacterId::Al
    })
}

/// Image path for a character at a stage
pub fn character_image_path(character: CharacterId, stage: GrowthStage) -> String {
    format!("/nuts/{}-stage{}.png", character.as_str(), stage.number())
}
