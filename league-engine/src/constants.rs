//! Centralized scoring constants for the league engine.
//!
//! These are the defaults behind [`crate::ScoringRules`]. A league that
//! wants different numbers supplies its own rules file; the engine itself
//! never reaches for these directly once rules are in hand.

// Placement ----------------------------------------------------------------
/// Points for 1st through 10th place before any field-size extension.
pub const BASE_PLACEMENT_POINTS: [u32; 10] = [15, 13, 11, 9, 7, 5, 4, 3, 2, 1];

// Aggregation --------------------------------------------------------------
/// Number of best game totals that count toward a player's overall score.
pub const COUNTED_GAMES: usize = 9;

// Carry-over bonuses -------------------------------------------------------
/// How many of the previous game's top finishers carry a bounty.
pub const BOUNTY_SLOTS: usize = 3;
/// Finisher count is divided by this to get the number of paid places.
pub const PAID_DIVISOR: usize = 3;
/// Points for cashing the fish-chip (holder finishes in the money).
pub const FISH_CHIP_POINTS: u32 = 1;
/// Points for each bounty player knocked out.
pub const BOUNTY_POINTS: u32 = 1;
