//! Scoring rules configuration.
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{
    BASE_PLACEMENT_POINTS, BOUNTY_POINTS, BOUNTY_SLOTS, COUNTED_GAMES, FISH_CHIP_POINTS,
    PAID_DIVISOR,
};

/// Errors raised when scoring rules invariants are violated.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RulesError {
    #[error("placement table must have at least one entry")]
    EmptyPlacementTable,
    #[error("placement table must not increase (place {place} scores {points}, above {previous})")]
    IncreasingPlacement {
        place: usize,
        points: u32,
        previous: u32,
    },
    #[error("last placement must score at least 1 point")]
    ZeroLastPlacement,
    #[error("{field} must be at least 1")]
    ZeroField { field: &'static str },
}

/// Errors raised when a rules file cannot be used.
#[derive(Debug, Error)]
pub enum RulesLoadError {
    #[error("rules file is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Invalid(#[from] RulesError),
}

/// Tunable numbers behind placement points, bonuses, and aggregation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringRules {
    /// Points for each place, winner first, before field-size extension.
    #[serde(default = "ScoringRules::default_placement_points")]
    pub placement_points: Vec<u32>,
    /// Best game totals counted toward the overall score.
    #[serde(default = "ScoringRules::default_counted_games")]
    pub counted_games: usize,
    #[serde(default = "ScoringRules::default_bounty_slots")]
    pub bounty_slots: usize,
    #[serde(default = "ScoringRules::default_paid_divisor")]
    pub paid_divisor: usize,
    #[serde(default = "ScoringRules::default_fish_chip_points")]
    pub fish_chip_points: u32,
    #[serde(default = "ScoringRules::default_bounty_points")]
    pub bounty_points: u32,
}

impl ScoringRules {
    fn default_placement_points() -> Vec<u32> {
        BASE_PLACEMENT_POINTS.to_vec()
    }

    const fn default_counted_games() -> usize {
        COUNTED_GAMES
    }

    const fn default_bounty_slots() -> usize {
        BOUNTY_SLOTS
    }

    const fn default_paid_divisor() -> usize {
        PAID_DIVISOR
    }

    const fn default_fish_chip_points() -> u32 {
        FISH_CHIP_POINTS
    }

    const fn default_bounty_points() -> u32 {
        BOUNTY_POINTS
    }

    /// Parse rules from JSON and validate them.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the rules are inconsistent.
    pub fn from_json(json: &str) -> Result<Self, RulesLoadError> {
        let rules: Self = serde_json::from_str(json)?;
        rules.validate()?;
        Ok(rules)
    }

    /// Check rule invariants.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant.
    pub fn validate(&self) -> Result<(), RulesError> {
        let Some(&last) = self.placement_points.last() else {
            return Err(RulesError::EmptyPlacementTable);
        };
        for (idx, pair) in self.placement_points.windows(2).enumerate() {
            if pair[1] > pair[0] {
                return Err(RulesError::IncreasingPlacement {
                    place: idx + 2,
                    points: pair[1],
                    previous: pair[0],
                });
            }
        }
        if last == 0 {
            return Err(RulesError::ZeroLastPlacement);
        }
        if self.counted_games == 0 {
            return Err(RulesError::ZeroField {
                field: "counted_games",
            });
        }
        if self.paid_divisor == 0 {
            return Err(RulesError::ZeroField {
                field: "paid_divisor",
            });
        }
        Ok(())
    }

    /// Placement points for a game with `finishers` players.
    ///
    /// Fields no larger than the base table use its first entries as-is.
    /// Larger fields lift every base entry by the overflow and append a
    /// countdown to 1, so last place always scores exactly 1 when the base
    /// table ends in 1.
    #[must_use]
    pub fn placement_table(&self, finishers: usize) -> Vec<u32> {
        let base = &self.placement_points;
        if finishers <= base.len() {
            return base[..finishers].to_vec();
        }
        let extra = u32::try_from(finishers - base.len()).unwrap_or(u32::MAX);
        base.iter()
            .map(|points| points.saturating_add(extra))
            .chain((1..=extra).rev())
            .collect()
    }

    /// Number of finishers in the money for a field of `finishers`.
    #[must_use]
    pub const fn paid_places(&self, finishers: usize) -> usize {
        match finishers.checked_div(self.paid_divisor) {
            Some(paid) => paid,
            None => 0,
        }
    }
}

impl Default for ScoringRules {
    fn default() -> Self {
        Self {
            placement_points: Self::default_placement_points(),
            counted_games: Self::default_counted_games(),
            bounty_slots: Self::default_bounty_slots(),
            paid_divisor: Self::default_paid_divisor(),
            fish_chip_points: Self::default_fish_chip_points(),
            bounty_points: Self::default_bounty_points(),
        }
    }
}
