//! The league: a player directory and its seasons.
use crate::game::{Knockout, Scoresheet};
use crate::player::{LookupError, PlayerDirectory, PlayerId};
use crate::record::{GameRecord, LeagueError, LeagueRecord, SeasonRecord};
use crate::rules::ScoringRules;
use crate::season::Season;

/// In-memory league state. All storage goes through [`crate::LeagueEngine`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct League {
    directory: PlayerDirectory,
    seasons: Vec<Season>,
    rules: ScoringRules,
}

impl League {
    #[must_use]
    pub fn new(rules: ScoringRules) -> Self {
        Self {
            directory: PlayerDirectory::new(),
            seasons: Vec::new(),
            rules,
        }
    }

    /// Rebuild a league from stored records.
    ///
    /// The directory is loaded first, then every season is replayed.
    ///
    /// # Errors
    ///
    /// Fails on duplicate player ids, unknown ids in any game, or a
    /// malformed game.
    pub fn from_record(record: LeagueRecord, rules: ScoringRules) -> Result<Self, LeagueError> {
        let directory = PlayerDirectory::from_players(record.players)?;
        let seasons = record
            .seasons
            .iter()
            .map(|season| season.rehydrate(&directory, &rules))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            directory,
            seasons,
            rules,
        })
    }

    #[must_use]
    pub fn to_record(&self) -> LeagueRecord {
        LeagueRecord {
            players: self.directory.players().to_vec(),
            seasons: self.season_records(),
        }
    }

    #[must_use]
    pub fn season_records(&self) -> Vec<SeasonRecord> {
        self.seasons.iter().map(SeasonRecord::from).collect()
    }

    #[must_use]
    pub const fn directory(&self) -> &PlayerDirectory {
        &self.directory
    }

    #[must_use]
    pub const fn rules(&self) -> &ScoringRules {
        &self.rules
    }

    #[must_use]
    pub fn seasons(&self) -> &[Season] {
        &self.seasons
    }

    #[must_use]
    pub fn season(&self, name: &str) -> Option<&Season> {
        self.seasons.iter().find(|s| s.name() == name)
    }

    /// Register a player and return their new id.
    ///
    /// # Errors
    ///
    /// Fails if no unused id is left above the highest registered one.
    pub fn add_player(&mut self, name: impl Into<String>) -> Result<PlayerId, LookupError> {
        self.directory.assign(name)
    }

    /// The season called `name`, created empty if it does not exist yet.
    pub fn open_season(&mut self, name: &str) -> &mut Season {
        let idx = match self.seasons.iter().position(|s| s.name() == name) {
            Some(idx) => idx,
            None => {
                self.seasons
                    .push(Season::with_rules(name, self.rules.clone()));
                self.seasons.len() - 1
            }
        };
        &mut self.seasons[idx]
    }

    /// Record a game in the named season, opening the season if needed.
    ///
    /// # Errors
    ///
    /// Fails if any id is unknown to the directory or the results are
    /// malformed. Nothing is recorded on failure.
    pub fn record_game(
        &mut self,
        season: &str,
        date: impl Into<String>,
        results: Vec<PlayerId>,
        knockouts: Vec<Knockout>,
    ) -> Result<Scoresheet, LeagueError> {
        let record = GameRecord {
            date: date.into(),
            results,
            knockouts: knockouts
                .iter()
                .map(|ko| (ko.perpetrator, ko.victim))
                .collect(),
        };
        let next_index = self.season(season).map_or(0, |s| s.games().len());
        let game = record.to_game(&self.directory, season, next_index)?;
        Ok(self.open_season(season).add_game(game))
    }

    /// Swap the rules and rescore every season.
    pub fn set_rules(&mut self, rules: ScoringRules) {
        for season in &mut self.seasons {
            season.set_rules(rules.clone());
        }
        self.rules = rules;
    }
}
