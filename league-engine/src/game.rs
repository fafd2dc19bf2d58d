//! A single league game: finishing order, knockouts, and its scoresheet.
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::HashSet;
use thiserror::Error;

use crate::player::PlayerId;
use crate::rules::ScoringRules;

/// Players carrying a bounty into a game. Default rules allow three.
pub type BountyList = SmallVec<[PlayerId; 3]>;

/// Errors raised when constructing a malformed game.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidGameError {
    #[error("a game needs at least one finisher")]
    EmptyResults,
    #[error("player {0} appears more than once in the results")]
    DuplicatePlayer(PlayerId),
}

/// One player eliminating another during a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Knockout {
    pub perpetrator: PlayerId,
    pub victim: PlayerId,
}

impl Knockout {
    #[must_use]
    pub const fn new(perpetrator: PlayerId, victim: PlayerId) -> Self {
        Self {
            perpetrator,
            victim,
        }
    }
}

/// Points earned by one finisher in one game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinisherPoints {
    pub player: PlayerId,
    /// Zero-based finishing position.
    pub place: usize,
    pub placement: u32,
    pub fish_chip: u32,
    pub bounty: u32,
}

impl FinisherPoints {
    #[must_use]
    pub const fn bonus(&self) -> u32 {
        self.fish_chip.saturating_add(self.bounty)
    }

    #[must_use]
    pub const fn total(&self) -> u32 {
        self.placement.saturating_add(self.bonus())
    }
}

/// Bounty claimed by one player on another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BountyClaim {
    pub claimant: PlayerId,
    pub target: PlayerId,
}

/// Everything a game contributes to the season table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoresheet {
    pub game_index: usize,
    /// One entry per finisher, winner first.
    pub finishers: Vec<FinisherPoints>,
    pub paid: Vec<PlayerId>,
    pub bounty_claims: Vec<BountyClaim>,
    /// Fish-chip holder, if they finished in the money.
    pub fish_chip_cashed: Option<PlayerId>,
}

impl Scoresheet {
    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        self.finishers.first().map(|f| f.player)
    }

    #[must_use]
    pub fn points_for(&self, player: PlayerId) -> Option<&FinisherPoints> {
        self.finishers.iter().find(|f| f.player == player)
    }
}

/// One session of play.
///
/// The results and knockouts are fixed at construction. The bounty list and
/// fish-chip holder are derived from the previous game in the season and are
/// set once, before scoring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    date: String,
    index: usize,
    results: Vec<PlayerId>,
    knockouts: Vec<Knockout>,
    bounty_players: BountyList,
    fish_chipper: Option<PlayerId>,
}

impl Game {
    /// Build a game from its finishing order (winner first) and knockouts.
    ///
    /// Knockouts naming a player who did not finish, or a player knocking
    /// out themselves, are kept as recorded but never score.
    ///
    /// # Errors
    ///
    /// Returns an error if `results` is empty or lists a player twice.
    pub fn new(
        date: impl Into<String>,
        results: Vec<PlayerId>,
        knockouts: Vec<Knockout>,
    ) -> Result<Self, InvalidGameError> {
        if results.is_empty() {
            return Err(InvalidGameError::EmptyResults);
        }
        let mut seen = HashSet::with_capacity(results.len());
        for &player in &results {
            if !seen.insert(player) {
                return Err(InvalidGameError::DuplicatePlayer(player));
            }
        }
        Ok(Self {
            date: date.into(),
            index: 0,
            results,
            knockouts,
            bounty_players: BountyList::new(),
            fish_chipper: None,
        })
    }

    #[must_use]
    pub fn date(&self) -> &str {
        &self.date
    }

    /// Zero-based position of this game within its season.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    pub(crate) const fn set_index(&mut self, index: usize) {
        self.index = index;
    }

    #[must_use]
    pub fn results(&self) -> &[PlayerId] {
        &self.results
    }

    #[must_use]
    pub fn knockouts(&self) -> &[Knockout] {
        &self.knockouts
    }

    #[must_use]
    pub fn bounty_players(&self) -> &[PlayerId] {
        &self.bounty_players
    }

    #[must_use]
    pub const fn fish_chipper(&self) -> Option<PlayerId> {
        self.fish_chipper
    }

    #[must_use]
    pub fn played(&self, player: PlayerId) -> bool {
        self.results.contains(&player)
    }

    /// Derive the bounty list and fish-chip holder from the previous game.
    ///
    /// Bounties go to the first `rules.bounty_slots` finishers of `previous`
    /// who also play here; absentees are skipped, not carried further. The
    /// fish-chip goes to the lowest finisher of `previous` who plays here.
    /// With no previous game both stay empty.
    pub fn set_previous_game_info(&mut self, previous: Option<&Self>, rules: &ScoringRules) {
        self.bounty_players.clear();
        self.fish_chipper = None;
        let Some(previous) = previous else {
            return;
        };
        self.bounty_players = previous
            .results
            .iter()
            .copied()
            .filter(|&p| self.played(p))
            .take(rules.bounty_slots)
            .collect();
        self.fish_chipper = previous
            .results
            .iter()
            .rev()
            .copied()
            .find(|&p| self.played(p));
    }

    /// Knockouts that can earn bounty points in this game.
    pub fn scoring_knockouts(&self) -> impl Iterator<Item = &Knockout> {
        self.knockouts.iter().filter(|ko| {
            ko.perpetrator != ko.victim && self.played(ko.perpetrator) && self.played(ko.victim)
        })
    }

    fn warn_ignored_knockouts(&self) {
        for ko in &self.knockouts {
            if ko.perpetrator == ko.victim {
                warn!(
                    "game {}: ignoring self-knockout by {}",
                    self.index, ko.perpetrator
                );
            } else if !self.played(ko.perpetrator) || !self.played(ko.victim) {
                warn!(
                    "game {}: ignoring knockout {} -> {} naming a non-finisher",
                    self.index, ko.perpetrator, ko.victim
                );
            }
        }
    }

    /// Score every finisher. Pure: calling it twice yields the same sheet.
    #[must_use]
    pub fn calculate_scores(&self, rules: &ScoringRules) -> Scoresheet {
        self.warn_ignored_knockouts();

        let table = rules.placement_table(self.results.len());
        let paid_places = rules.paid_places(self.results.len());
        let paid: Vec<PlayerId> = self.results[..paid_places].to_vec();
        debug!(
            "game {}: {} finishers, {} paid, bounties {:?}, fish-chip {:?}",
            self.index,
            self.results.len(),
            paid_places,
            self.bounty_players.as_slice(),
            self.fish_chipper
        );

        let fish_chip_cashed = self.fish_chipper.filter(|holder| paid.contains(holder));
        let bounty_claims: Vec<BountyClaim> = self
            .scoring_knockouts()
            .filter(|ko| self.bounty_players.contains(&ko.victim))
            .map(|ko| BountyClaim {
                claimant: ko.perpetrator,
                target: ko.victim,
            })
            .collect();

        let finishers = self
            .results
            .iter()
            .zip(table)
            .enumerate()
            .map(|(place, (&player, placement))| {
                let fish_chip = if fish_chip_cashed == Some(player) {
                    rules.fish_chip_points
                } else {
                    0
                };
                let claims = bounty_claims
                    .iter()
                    .filter(|claim| claim.claimant == player)
                    .count();
                let bounty = rules
                    .bounty_points
                    .saturating_mul(u32::try_from(claims).unwrap_or(u32::MAX));
                FinisherPoints {
                    player,
                    place,
                    placement,
                    fish_chip,
                    bounty,
                }
            })
            .collect();

        Scoresheet {
            game_index: self.index,
            finishers,
            paid,
            bounty_claims,
            fish_chip_cashed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(raw: &[u32]) -> Vec<PlayerId> {
        raw.iter().copied().map(PlayerId).collect()
    }

    fn ko(perpetrator: u32, victim: u32) -> Knockout {
        Knockout::new(PlayerId(perpetrator), PlayerId(victim))
    }

    #[test]
    fn construction_rejects_malformed_results() {
        assert_eq!(
            Game::new("2024-1-4", vec![], vec![]),
            Err(InvalidGameError::EmptyResults)
        );
        assert_eq!(
            Game::new("2024-1-4", ids(&[1, 2, 1]), vec![]),
            Err(InvalidGameError::DuplicatePlayer(PlayerId(1)))
        );
    }

    #[test]
    fn previous_game_sets_bounties_and_fish_chip() {
        let rules = ScoringRules::default();
        let first = Game::new("d1", ids(&[0, 1, 2, 3, 4, 5]), vec![]).unwrap();
        let mut second = Game::new("d2", ids(&[2, 0, 1, 3, 4, 5]), vec![]).unwrap();
        second.set_previous_game_info(Some(&first), &rules);
        assert_eq!(second.bounty_players(), ids(&[0, 1, 2]).as_slice());
        assert_eq!(second.fish_chipper(), Some(PlayerId(5)));
    }

    #[test]
    fn absentees_are_skipped_for_bounties_and_fish_chip() {
        let rules = ScoringRules::default();
        let first = Game::new("d1", ids(&[0, 1, 2, 3, 4, 5]), vec![]).unwrap();
        let mut second = Game::new("d2", ids(&[4, 3, 2, 0, 9]), vec![]).unwrap();
        second.set_previous_game_info(Some(&first), &rules);
        assert_eq!(second.bounty_players(), ids(&[0, 2, 3]).as_slice());
        assert_eq!(second.fish_chipper(), Some(PlayerId(4)));
    }

    #[test]
    fn no_overlap_leaves_no_carry_over() {
        let rules = ScoringRules::default();
        let first = Game::new("d1", ids(&[0, 1]), vec![]).unwrap();
        let mut second = Game::new("d2", ids(&[5, 6]), vec![]).unwrap();
        second.set_previous_game_info(Some(&first), &rules);
        assert!(second.bounty_players().is_empty());
        assert_eq!(second.fish_chipper(), None);

        second.set_previous_game_info(None, &rules);
        assert!(second.bounty_players().is_empty());
    }

    #[test]
    fn fish_chip_requires_holding_and_being_paid() {
        let rules = ScoringRules::default();
        let first = Game::new("d1", ids(&[0, 1, 2, 3, 4, 5]), vec![]).unwrap();

        let mut cashed = Game::new("d2", ids(&[5, 0, 1, 2, 3, 4]), vec![]).unwrap();
        cashed.set_previous_game_info(Some(&first), &rules);
        let sheet = cashed.calculate_scores(&rules);
        assert_eq!(sheet.fish_chip_cashed, Some(PlayerId(5)));
        let holder = sheet.points_for(PlayerId(5)).unwrap();
        assert_eq!(holder.fish_chip, 1);
        assert_eq!(holder.total(), 16);

        let mut unpaid = Game::new("d2", ids(&[0, 1, 5, 2, 3, 4]), vec![]).unwrap();
        unpaid.set_previous_game_info(Some(&first), &rules);
        let sheet = unpaid.calculate_scores(&rules);
        assert_eq!(sheet.fish_chip_cashed, None);
        assert!(sheet.finishers.iter().all(|f| f.fish_chip == 0));

        // Paid but not the holder.
        let sheet = unpaid.calculate_scores(&rules);
        assert_eq!(sheet.points_for(PlayerId(0)).unwrap().fish_chip, 0);
    }

    #[test]
    fn bounties_stack_without_cap() {
        let rules = ScoringRules::default();
        let first = Game::new("d1", ids(&[0, 1, 2, 3]), vec![]).unwrap();
        let knockouts = vec![ko(3, 0), ko(3, 1), ko(2, 3)];
        let mut second = Game::new("d2", ids(&[3, 2, 1, 0]), knockouts).unwrap();
        second.set_previous_game_info(Some(&first), &rules);
        let sheet = second.calculate_scores(&rules);
        let winner = sheet.points_for(PlayerId(3)).unwrap();
        assert_eq!(winner.bounty, 2);
        // Player 3 was also last last time and took the only paid place.
        assert_eq!(winner.fish_chip, 1);
        assert_eq!(winner.total(), 15 + 2 + 1);
        // Player 3 finished fourth last time, so no bounty on them.
        assert_eq!(sheet.points_for(PlayerId(2)).unwrap().bounty, 0);
        assert_eq!(sheet.bounty_claims.len(), 2);
    }

    #[test]
    fn dangling_and_self_knockouts_are_ignored() {
        let rules = ScoringRules::default();
        let first = Game::new("d1", ids(&[0, 1, 2]), vec![]).unwrap();
        let mut second = Game::new(
            "d2",
            ids(&[0, 1, 2]),
            vec![ko(0, 0), ko(9, 1), ko(1, 9), ko(2, 1)],
        )
        .unwrap();
        second.set_previous_game_info(Some(&first), &rules);
        assert_eq!(second.scoring_knockouts().count(), 1);
        let sheet = second.calculate_scores(&rules);
        assert_eq!(sheet.points_for(PlayerId(0)).unwrap().bounty, 0);
        assert_eq!(sheet.points_for(PlayerId(2)).unwrap().bounty, 1);
        assert_eq!(second.knockouts().len(), 4);
    }

    #[test]
    fn scoring_is_idempotent_and_marks_winner() {
        let rules = ScoringRules::default();
        let game = Game::new("d1", ids(&[4, 2, 7]), vec![ko(4, 2)]).unwrap();
        let first = game.calculate_scores(&rules);
        let second = game.calculate_scores(&rules);
        assert_eq!(first, second);
        assert_eq!(first.winner(), Some(PlayerId(4)));
        assert!(first.paid == ids(&[4]));
        let totals: Vec<u32> = first.finishers.iter().map(FinisherPoints::total).collect();
        assert_eq!(totals, vec![15, 13, 11]);
    }

    #[test]
    fn finisher_totals_saturate() {
        let points = FinisherPoints {
            player: PlayerId(0),
            place: 0,
            placement: 15,
            fish_chip: u32::MAX,
            bounty: 3,
        };
        assert_eq!(points.bonus(), u32::MAX);
        assert_eq!(points.total(), u32::MAX);
    }
}
