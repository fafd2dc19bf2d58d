//! Persisted record shapes and rehydration.
//!
//! Only raw inputs are stored: players, and per season the games' dates,
//! finishing orders, and knockouts. Bounties, fish-chips, and every score
//! are re-derived by replaying the games in stored order.
use log::info;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::game::{Game, InvalidGameError, Knockout};
use crate::player::{LookupError, Player, PlayerDirectory, PlayerId};
use crate::rules::ScoringRules;
use crate::season::Season;

/// Errors raised when turning records back into live league state.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LeagueError {
    #[error(transparent)]
    Lookup(#[from] LookupError),
    #[error("season {season:?}, game {game}: {source}")]
    InvalidGame {
        season: String,
        game: usize,
        #[source]
        source: InvalidGameError,
    },
}

/// Stored form of one game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    /// Opaque date label, conventionally `YYYY-M-D`.
    pub date: String,
    /// Finishing order, winner first.
    pub results: Vec<PlayerId>,
    /// `[perpetrator, victim]` pairs.
    #[serde(default)]
    pub knockouts: Vec<(PlayerId, PlayerId)>,
}

impl GameRecord {
    /// Resolve every id through `directory` and build the game.
    ///
    /// # Errors
    ///
    /// Fails if any id is unknown to the directory or the results are
    /// malformed. `season` and `game` label the error.
    pub fn to_game(
        &self,
        directory: &PlayerDirectory,
        season: &str,
        game: usize,
    ) -> Result<Game, LeagueError> {
        for &id in &self.results {
            directory.resolve(id)?;
        }
        for &(perpetrator, victim) in &self.knockouts {
            directory.resolve(perpetrator)?;
            directory.resolve(victim)?;
        }
        let knockouts = self
            .knockouts
            .iter()
            .map(|&(perpetrator, victim)| Knockout::new(perpetrator, victim))
            .collect();
        Game::new(self.date.clone(), self.results.clone(), knockouts).map_err(|source| {
            LeagueError::InvalidGame {
                season: season.to_string(),
                game,
                source,
            }
        })
    }
}

impl From<&Game> for GameRecord {
    fn from(game: &Game) -> Self {
        Self {
            date: game.date().to_string(),
            results: game.results().to_vec(),
            knockouts: game
                .knockouts()
                .iter()
                .map(|ko| (ko.perpetrator, ko.victim))
                .collect(),
        }
    }
}

/// Stored form of one season.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonRecord {
    pub name: String,
    #[serde(default)]
    pub games: Vec<GameRecord>,
}

impl SeasonRecord {
    /// Rebuild the season by replaying every stored game in order.
    ///
    /// # Errors
    ///
    /// Fails on the first game that cannot be rebuilt.
    pub fn rehydrate(
        &self,
        directory: &PlayerDirectory,
        rules: &ScoringRules,
    ) -> Result<Season, LeagueError> {
        let mut season = Season::with_rules(self.name.clone(), rules.clone());
        for (idx, record) in self.games.iter().enumerate() {
            let game = record.to_game(directory, &self.name, idx)?;
            season.add_game(game);
        }
        info!(
            "season {}: rehydrated {} game(s), {} player(s)",
            self.name,
            season.games().len(),
            season.scores().len()
        );
        Ok(season)
    }
}

impl From<&Season> for SeasonRecord {
    fn from(season: &Season) -> Self {
        Self {
            name: season.name().to_string(),
            games: season.games().iter().map(GameRecord::from).collect(),
        }
    }
}

/// Both stored collections together.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeagueRecord {
    #[serde(default)]
    pub players: Vec<Player>,
    #[serde(default)]
    pub seasons: Vec<SeasonRecord>,
}

impl LeagueRecord {
    /// Parse a combined league record from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON does not match the record shape.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
