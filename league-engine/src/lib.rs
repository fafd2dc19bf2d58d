//! League Scoring Engine
//!
//! Platform-agnostic core logic for a recurring tournament league. Turns
//! each game's finishing order and knockouts into placement and bonus
//! points, carries bounties and the fish-chip from one game to the next,
//! and ranks a season on each player's best results.
//! This crate performs no I/O; storage is injected through
//! [`LeagueLoader`] and [`LeagueStorage`].

pub mod constants;
pub mod game;
pub mod league;
pub mod narrative;
pub mod numbers;
pub mod player;
pub mod record;
pub mod rules;
pub mod score;
pub mod season;

// Re-export commonly used types
pub use game::{
    BountyClaim, BountyList, FinisherPoints, Game, InvalidGameError, Knockout, Scoresheet,
};
pub use league::League;
pub use narrative::{GameLog, LogEntry};
pub use player::{LookupError, Player, PlayerDirectory, PlayerId};
pub use record::{GameRecord, LeagueError, LeagueRecord, SeasonRecord};
pub use rules::{RulesError, RulesLoadError, ScoringRules};
pub use score::Score;
pub use season::{Season, StandingRow};

/// Trait for abstracting league loading operations
/// Platform-specific implementations should provide this
pub trait LeagueLoader {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load the player directory records, in assignment order
    ///
    /// # Errors
    ///
    /// Returns an error if the players cannot be read.
    fn load_players(&self) -> Result<Vec<Player>, Self::Error>;

    /// Load the raw season records, in chronological order
    ///
    /// # Errors
    ///
    /// Returns an error if the seasons cannot be read.
    fn load_seasons(&self) -> Result<Vec<SeasonRecord>, Self::Error>;
}

/// Trait for abstracting league persistence
/// Platform-specific implementations should provide this
pub trait LeagueStorage {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Persist the player directory
    ///
    /// # Errors
    ///
    /// Returns an error if the players cannot be written.
    fn save_players(&self, players: &[Player]) -> Result<(), Self::Error>;

    /// Persist the raw season records
    ///
    /// # Errors
    ///
    /// Returns an error if the seasons cannot be written.
    fn save_seasons(&self, seasons: &[SeasonRecord]) -> Result<(), Self::Error>;
}

/// Loads and saves leagues through the injected ports.
pub struct LeagueEngine<L, S>
where
    L: LeagueLoader,
    S: LeagueStorage,
{
    loader: L,
    storage: S,
    rules: ScoringRules,
}

impl<L, S> LeagueEngine<L, S>
where
    L: LeagueLoader,
    S: LeagueStorage,
{
    /// Create an engine with the default scoring rules
    pub fn new(loader: L, storage: S) -> Self {
        Self::with_rules(loader, storage, ScoringRules::default())
    }

    /// Create an engine that scores with `rules`
    pub const fn with_rules(loader: L, storage: S, rules: ScoringRules) -> Self {
        Self {
            loader,
            storage,
            rules,
        }
    }

    #[must_use]
    pub const fn rules(&self) -> &ScoringRules {
        &self.rules
    }

    /// Load players, then replay every stored season
    ///
    /// # Errors
    ///
    /// Returns an error if either collection cannot be loaded or the
    /// records do not rehydrate.
    pub fn load_league(&self) -> Result<League, anyhow::Error>
    where
        L::Error: Into<anyhow::Error>,
    {
        let players = self.loader.load_players().map_err(Into::into)?;
        let seasons = self.loader.load_seasons().map_err(Into::into)?;
        let record = LeagueRecord { players, seasons };
        Ok(League::from_record(record, self.rules.clone())?)
    }

    /// Persist the league's raw inputs
    ///
    /// # Errors
    ///
    /// Returns an error if either collection cannot be saved.
    pub fn save_league(&self, league: &League) -> Result<(), S::Error> {
        self.storage.save_players(league.directory().players())?;
        self.storage.save_seasons(&league.season_records())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::convert::Infallible;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct MemoryStore {
        players: Rc<RefCell<Vec<Player>>>,
        seasons: Rc<RefCell<Vec<SeasonRecord>>>,
    }

    impl LeagueLoader for MemoryStore {
        type Error = Infallible;

        fn load_players(&self) -> Result<Vec<Player>, Self::Error> {
            Ok(self.players.borrow().clone())
        }

        fn load_seasons(&self) -> Result<Vec<SeasonRecord>, Self::Error> {
            Ok(self.seasons.borrow().clone())
        }
    }

    impl LeagueStorage for MemoryStore {
        type Error = Infallible;

        fn save_players(&self, players: &[Player]) -> Result<(), Self::Error> {
            *self.players.borrow_mut() = players.to_vec();
            Ok(())
        }

        fn save_seasons(&self, seasons: &[SeasonRecord]) -> Result<(), Self::Error> {
            *self.seasons.borrow_mut() = seasons.to_vec();
            Ok(())
        }
    }

    #[test]
    fn engine_saves_and_reloads_league() {
        let store = MemoryStore::default();
        let engine = LeagueEngine::new(store.clone(), store.clone());

        let mut league = engine.load_league().unwrap();
        assert!(league.directory().is_empty());
        let ann = league.add_player("Ann").unwrap();
        let bob = league.add_player("Bob").unwrap();
        league
            .record_game("Spring", "2024-3-7", vec![ann, bob], vec![])
            .unwrap();
        engine.save_league(&league).unwrap();

        assert_eq!(store.players.borrow().len(), 2);
        assert_eq!(store.seasons.borrow()[0].games.len(), 1);
        let loaded = engine.load_league().unwrap();
        assert_eq!(loaded, league);
    }

    #[test]
    fn engine_applies_its_rules_on_load() {
        let store = MemoryStore::default();
        let engine = LeagueEngine::new(store.clone(), store.clone());
        let mut league = engine.load_league().unwrap();
        let ann = league.add_player("Ann").unwrap();
        league.record_game("S", "d1", vec![ann], vec![]).unwrap();
        engine.save_league(&league).unwrap();

        let rules = ScoringRules {
            placement_points: vec![50],
            ..ScoringRules::default()
        };
        let strict = LeagueEngine::with_rules(store.clone(), store, rules);
        let reloaded = strict.load_league().unwrap();
        let season = reloaded.season("S").unwrap();
        assert_eq!(season.score_for(ann).unwrap().overall_score(), 50);
    }

    #[test]
    fn engine_surfaces_rehydration_errors() {
        let store = MemoryStore::default();
        store.seasons.borrow_mut().push(SeasonRecord {
            name: "Orphans".into(),
            games: vec![GameRecord {
                date: "d1".into(),
                results: vec![PlayerId(3)],
                knockouts: vec![],
            }],
        });
        let engine = LeagueEngine::new(store.clone(), store);
        let err = engine.load_league().unwrap_err();
        assert!(err.to_string().contains("unknown player id #3"));
    }
}
