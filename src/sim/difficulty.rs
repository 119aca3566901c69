//! Difficulty progression
//!
//! Elapsed time maps onto an ordered, contiguous list of tiers. Each tier
//! sets bullet speed, spawn cadence, and the live-bullet cap; the final tier
//! is open-ended.

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyTier {
    pub from_sec: f32,
    /// `None` marks the open-ended final tier.
    pub to_sec: Option<f32>,
    pub bullet_speed: f32,
    pub spawn_interval_ms: f32,
    pub max_bullets: usize,
}

/// First tier whose `[from_sec, to_sec)` interval contains `elapsed_sec`.
/// With a well-formed schedule a match always exists; a gap falls back to
/// the last tier.
pub fn pick_difficulty_tier(elapsed_sec: f32, tiers: &[DifficultyTier]) -> &DifficultyTier {
    assert!(
        !tiers.is_empty(),
        "difficulty tiers must contain at least one tier"
    );

    tiers
        .iter()
        .find(|tier| {
            elapsed_sec >= tier.from_sec && tier.to_sec.is_none_or(|to| elapsed_sec < to)
        })
        .unwrap_or_else(|| &tiers[tiers.len() - 1])
}

/// Construction-time schedule validation: non-empty, contiguous ascending
/// intervals, only the last tier unbounded.
pub fn validate_tiers(tiers: &[DifficultyTier]) -> Result<(), ConfigError> {
    if tiers.is_empty() {
        return Err(ConfigError::EmptyDifficultyTiers);
    }

    for (index, window) in tiers.windows(2).enumerate() {
        let (current, next) = (&window[0], &window[1]);
        match current.to_sec {
            None => return Err(ConfigError::UnboundedInnerTier { index }),
            Some(to) if to != next.from_sec => {
                return Err(ConfigError::DiscontiguousDifficultyTiers {
                    index: index + 1,
                    from_sec: next.from_sec,
                    expected: to,
                });
            }
            Some(_) => {}
        }
    }

    Ok(())
}
