//! Season orchestration: games in, ranked table out.
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::game::{Game, Scoresheet};
use crate::narrative::GameLog;
use crate::player::{LookupError, PlayerDirectory, PlayerId};
use crate::rules::ScoringRules;
use crate::score::Score;

/// One row of the league table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandingRow {
    /// 1-based position in the ranked table.
    pub rank: usize,
    pub player: PlayerId,
    pub name: String,
    pub overall: u32,
    pub games_played: usize,
    pub average: f64,
    pub bonus: u32,
    pub lowest: u32,
    pub wins: u32,
    /// Game totals in season order; `None` where the player sat out.
    pub weekly: Vec<Option<u32>>,
}

/// An ordered run of games and the table they produce.
///
/// Games are append-only and scored in insertion order. The score table
/// always reflects every game in the season and is kept sorted by overall
/// score, ties keeping first-appearance order.
#[derive(Debug, Clone, PartialEq)]
pub struct Season {
    name: String,
    rules: ScoringRules,
    games: Vec<Game>,
    scores: Vec<Score>,
    log: GameLog,
}

impl Season {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_rules(name, ScoringRules::default())
    }

    #[must_use]
    pub fn with_rules(name: impl Into<String>, rules: ScoringRules) -> Self {
        Self {
            name: name.into(),
            rules,
            games: Vec::new(),
            scores: Vec::new(),
            log: GameLog::new(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn rules(&self) -> &ScoringRules {
        &self.rules
    }

    #[must_use]
    pub fn games(&self) -> &[Game] {
        &self.games
    }

    /// Score records, best overall first.
    #[must_use]
    pub fn scores(&self) -> &[Score] {
        &self.scores
    }

    #[must_use]
    pub const fn log(&self) -> &GameLog {
        &self.log
    }

    #[must_use]
    pub fn score_for(&self, player: PlayerId) -> Option<&Score> {
        self.scores.iter().find(|s| s.player() == player)
    }

    /// Append a game, score it, and re-rank the table.
    ///
    /// The game is linked to the one before it for bounty and fish-chip
    /// carry-over and takes the next sequence index.
    pub fn add_game(&mut self, mut game: Game) -> Scoresheet {
        game.set_previous_game_info(self.games.last(), &self.rules);
        game.set_index(self.games.len());
        let sheet = game.calculate_scores(&self.rules);
        self.log.narrate(&game, &sheet);
        self.apply(&sheet);
        self.games.push(game);
        self.rank();
        sheet
    }

    /// Replace the rules and rebuild every score from the raw games.
    pub fn set_rules(&mut self, rules: ScoringRules) {
        self.rules = rules;
        self.recompute();
    }

    /// Reset every score and replay all games in order.
    pub fn recompute(&mut self) {
        let games = std::mem::take(&mut self.games);
        self.scores.clear();
        self.log.clear();
        info!(
            "season {}: recomputing {} game(s) from scratch",
            self.name,
            games.len()
        );
        for game in games {
            self.add_game(game);
        }
    }

    /// Ranked league table with names from `directory`.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::UnknownPlayer`] if a scored player is missing
    /// from the directory.
    pub fn standings(&self, directory: &PlayerDirectory) -> Result<Vec<StandingRow>, LookupError> {
        self.scores
            .iter()
            .enumerate()
            .map(|(idx, score)| {
                let player = directory.resolve(score.player())?;
                Ok(StandingRow {
                    rank: idx + 1,
                    player: player.id,
                    name: player.name.clone(),
                    overall: score.overall_score(),
                    games_played: score.games_played(),
                    average: score.average_points_per_game(),
                    bonus: score.bonus_points(),
                    lowest: score.lowest_weekly_points(),
                    wins: score.wins(),
                    weekly: score.weekly_points(self.games.len()),
                })
            })
            .collect()
    }

    fn score_mut(&mut self, player: PlayerId) -> &mut Score {
        let idx = match self.scores.iter().position(|s| s.player() == player) {
            Some(idx) => idx,
            None => {
                debug!("season {}: first appearance of {player}", self.name);
                self.scores
                    .push(Score::new(player, self.rules.counted_games));
                self.scores.len() - 1
            }
        };
        &mut self.scores[idx]
    }

    fn apply(&mut self, sheet: &Scoresheet) {
        for points in &sheet.finishers {
            self.score_mut(points.player)
                .record(sheet.game_index, points);
        }
        if let Some(winner) = sheet.winner() {
            self.score_mut(winner).win(sheet.game_index);
        }
    }

    fn rank(&mut self) {
        self.scores
            .sort_by_key(|score| std::cmp::Reverse(score.overall_score()));
    }
}
