//! JSON file store backing the engine's load/save ports.
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use league_engine::{LeagueLoader, LeagueStorage, Player, SeasonRecord};
use log::debug;
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

pub const PLAYERS_FILE: &str = "players.json";
pub const SEASONS_FILE: &str = "seasons.json";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{path} is not a valid league file")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Stores players and seasons as two JSON files in one directory.
///
/// A missing file reads as an empty collection so a fresh directory is a
/// fresh league.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn read<T: DeserializeOwned + Default>(&self, file: &str) -> Result<T, StoreError> {
        let path = self.dir.join(file);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!("{} not found, starting empty", path.display());
                return Ok(T::default());
            }
            Err(source) => return Err(StoreError::Io { path, source }),
        };
        serde_json::from_str(&raw).map_err(|source| StoreError::Json { path, source })
    }

    fn write<T: Serialize + ?Sized>(&self, file: &str, value: &T) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir).map_err(|source| StoreError::Io {
            path: self.dir.clone(),
            source,
        })?;
        let path = self.dir.join(file);
        let payload = serde_json::to_vec_pretty(value).map_err(|source| StoreError::Json {
            path: path.clone(),
            source,
        })?;
        fs::write(&path, payload).map_err(|source| StoreError::Io { path, source })
    }
}

impl LeagueLoader for JsonFileStore {
    type Error = StoreError;

    fn load_players(&self) -> Result<Vec<Player>, Self::Error> {
        self.read(PLAYERS_FILE)
    }

    fn load_seasons(&self) -> Result<Vec<SeasonRecord>, Self::Error> {
        self.read(SEASONS_FILE)
    }
}

impl LeagueStorage for JsonFileStore {
    type Error = StoreError;

    fn save_players(&self, players: &[Player]) -> Result<(), Self::Error> {
        self.write(PLAYERS_FILE, players)
    }

    fn save_seasons(&self, seasons: &[SeasonRecord]) -> Result<(), Self::Error> {
        self.write(SEASONS_FILE, seasons)
    }
}
