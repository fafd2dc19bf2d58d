//! Player identities and the directory that hands them out.
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Stable identity for a player. Compared by value, never by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub u32);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A registered league player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
}

/// Errors raised when resolving player identities.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("unknown player id {0}")]
    UnknownPlayer(PlayerId),
    #[error("player id {0} is registered more than once")]
    DuplicatePlayer(PlayerId),
    #[error("no player ids left after {0}")]
    IdsExhausted(PlayerId),
}

/// Assigns and resolves player identities.
///
/// Players are kept in assignment order, which is also the order they are
/// persisted in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerDirectory {
    players: Vec<Player>,
}

impl PlayerDirectory {
    /// Create an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a directory from stored player records.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::DuplicatePlayer`] if two records share an id.
    pub fn from_players(players: Vec<Player>) -> Result<Self, LookupError> {
        let mut directory = Self::new();
        for player in players {
            if directory.get(player.id).is_some() {
                return Err(LookupError::DuplicatePlayer(player.id));
            }
            directory.players.push(player);
        }
        Ok(directory)
    }

    /// Register a new player and return the id assigned to them.
    ///
    /// Ids continue from the highest one registered.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::IdsExhausted`] if the highest id is already
    /// `u32::MAX`. The directory is left unchanged.
    pub fn assign(&mut self, name: impl Into<String>) -> Result<PlayerId, LookupError> {
        let id = match self.players.iter().map(|p| p.id).max() {
            None => PlayerId(0),
            Some(max) => max
                .0
                .checked_add(1)
                .map(PlayerId)
                .ok_or(LookupError::IdsExhausted(max))?,
        };
        self.players.push(Player {
            id,
            name: name.into(),
        });
        Ok(id)
    }

    /// Look up a player by id.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::UnknownPlayer`] if the id was never assigned.
    pub fn resolve(&self, id: PlayerId) -> Result<&Player, LookupError> {
        self.get(id).ok_or(LookupError::UnknownPlayer(id))
    }

    #[must_use]
    pub fn get(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    /// First player registered under `name`, ignoring ASCII case.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<&Player> {
        self.players
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }

    /// Display name for an id, falling back to the id itself.
    #[must_use]
    pub fn name_of(&self, id: PlayerId) -> String {
        self.get(id)
            .map_or_else(|| id.to_string(), |p| p.name.clone())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Player> {
        self.players.iter()
    }

    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.players.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}
