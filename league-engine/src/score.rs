//! Per-player season aggregates.
use std::collections::{BTreeMap, BTreeSet};

use crate::game::FinisherPoints;
use crate::numbers::{mean, round_to_tenth, saturating_u32};
use crate::player::PlayerId;

/// A player's running record for one season.
///
/// Game totals are keyed by game index, so a game that is scored again
/// overwrites its previous entry. A missing key means the player sat that
/// game out. Every aggregate is computed on demand from these maps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Score {
    player: PlayerId,
    counted_games: usize,
    totals: BTreeMap<usize, u32>,
    bonuses: BTreeMap<usize, u32>,
    wins: BTreeSet<usize>,
}

impl Score {
    /// Empty record counting the best `counted_games` totals.
    #[must_use]
    pub const fn new(player: PlayerId, counted_games: usize) -> Self {
        Self {
            player,
            counted_games,
            totals: BTreeMap::new(),
            bonuses: BTreeMap::new(),
            wins: BTreeSet::new(),
        }
    }

    #[must_use]
    pub const fn player(&self) -> PlayerId {
        self.player
    }

    /// Store a finisher's points for the given game.
    pub fn record(&mut self, game_index: usize, points: &FinisherPoints) {
        self.totals.insert(game_index, points.total());
        self.bonuses.insert(game_index, points.bonus());
    }

    /// Credit a win for the given game.
    pub fn win(&mut self, game_index: usize) {
        self.wins.insert(game_index);
    }

    /// Total for one game, `None` if the player sat it out.
    #[must_use]
    pub fn points_in(&self, game_index: usize) -> Option<u32> {
        self.totals.get(&game_index).copied()
    }

    /// Per-game totals for games `0..game_count`, with gaps as `None`.
    #[must_use]
    pub fn weekly_points(&self, game_count: usize) -> Vec<Option<u32>> {
        (0..game_count).map(|idx| self.points_in(idx)).collect()
    }

    #[must_use]
    pub fn games_played(&self) -> usize {
        self.totals.len()
    }

    #[must_use]
    pub fn wins(&self) -> u32 {
        saturating_u32(self.wins.len())
    }

    /// Mean game total rounded to one decimal; 0.0 before any game.
    #[must_use]
    pub fn average_points_per_game(&self) -> f64 {
        let sum: u64 = self.totals.values().map(|&v| u64::from(v)).sum();
        round_to_tenth(mean(sum, self.totals.len()))
    }

    #[must_use]
    pub fn bonus_points(&self) -> u32 {
        self.bonuses.values().fold(0, |acc, &v| acc.saturating_add(v))
    }

    /// Worst recorded game total; 0 before any game.
    #[must_use]
    pub fn lowest_weekly_points(&self) -> u32 {
        self.totals.values().copied().min().unwrap_or(0)
    }

    /// Sum of the best `counted_games` totals, or of all when fewer were played.
    #[must_use]
    pub fn overall_score(&self) -> u32 {
        let mut totals: Vec<u32> = self.totals.values().copied().collect();
        totals.sort_unstable_by(|a, b| b.cmp(a));
        totals
            .into_iter()
            .take(self.counted_games)
            .fold(0, |acc, v| acc.saturating_add(v))
    }

    /// Game indices whose totals are left out of the overall score.
    #[must_use]
    pub fn dropped_games(&self) -> Vec<usize> {
        let mut ranked: Vec<(usize, u32)> = self.totals.iter().map(|(&k, &v)| (k, v)).collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        let mut dropped: Vec<usize> = ranked
            .into_iter()
            .skip(self.counted_games)
            .map(|(idx, _)| idx)
            .collect();
        dropped.sort_unstable();
        dropped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::COUNTED_GAMES;

    fn points(total: u32, bonus: u32) -> FinisherPoints {
        FinisherPoints {
            player: PlayerId(1),
            place: 0,
            placement: total - bonus,
            fish_chip: 0,
            bounty: bonus,
        }
    }

    fn score_with(totals: &[u32]) -> Score {
        let mut score = Score::new(PlayerId(1), COUNTED_GAMES);
        for (idx, &total) in totals.iter().enumerate() {
            score.record(idx, &points(total, 0));
        }
        score
    }

    #[test]
    fn empty_record_reports_zeros() {
        let score = Score::new(PlayerId(3), COUNTED_GAMES);
        assert_eq!(score.games_played(), 0);
        assert!((score.average_points_per_game() - 0.0).abs() < f64::EPSILON);
        assert_eq!(score.bonus_points(), 0);
        assert_eq!(score.lowest_weekly_points(), 0);
        assert_eq!(score.overall_score(), 0);
        assert_eq!(score.wins(), 0);
    }

    #[test]
    fn overall_counts_best_nine_of_twelve() {
        let totals = [15, 1, 13, 2, 11, 3, 9, 4, 7, 5, 6, 8];
        let score = score_with(&totals);
        assert_eq!(score.games_played(), 12);
        assert_eq!(score.overall_score(), 15 + 13 + 11 + 9 + 8 + 7 + 6 + 5 + 4);
        assert_eq!(score.dropped_games(), vec![1, 3, 5]);
    }

    #[test]
    fn overall_sums_everything_under_nine_games() {
        let score = score_with(&[4, 9, 1, 15, 7]);
        assert_eq!(score.overall_score(), 36);
        assert!(score.dropped_games().is_empty());
    }

    #[test]
    fn gaps_are_skipped_by_every_aggregate() {
        let mut score = Score::new(PlayerId(1), COUNTED_GAMES);
        score.record(0, &points(10, 1));
        score.record(3, &points(5, 0));
        score.record(4, &points(7, 2));
        assert_eq!(score.games_played(), 3);
        assert_eq!(score.bonus_points(), 3);
        assert_eq!(score.lowest_weekly_points(), 5);
        assert!((score.average_points_per_game() - 7.3).abs() < 1e-9);
        assert_eq!(
            score.weekly_points(5),
            vec![Some(10), None, None, Some(5), Some(7)]
        );
    }

    #[test]
    fn rescoring_a_game_overwrites_it() {
        let mut score = Score::new(PlayerId(1), COUNTED_GAMES);
        score.record(0, &points(10, 1));
        score.win(0);
        score.record(0, &points(12, 0));
        score.win(0);
        assert_eq!(score.games_played(), 1);
        assert_eq!(score.overall_score(), 12);
        assert_eq!(score.bonus_points(), 0);
        assert_eq!(score.wins(), 1);
    }

    #[test]
    fn season_sums_saturate_at_the_ceiling() {
        let mut score = Score::new(PlayerId(1), COUNTED_GAMES);
        score.record(0, &points(u32::MAX, u32::MAX));
        score.record(1, &points(7, 7));
        assert_eq!(score.overall_score(), u32::MAX);
        assert_eq!(score.bonus_points(), u32::MAX);
        assert!((score.average_points_per_game() - 2_147_483_651.0).abs() < 1.0);
    }
}
