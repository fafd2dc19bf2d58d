//! Human-readable season narrative.
//!
//! Entries hold player ids and are rendered against a [`PlayerDirectory`]
//! when displayed. Nothing here feeds back into scoring.
use serde::{Deserialize, Serialize};

use crate::game::{Game, Scoresheet};
use crate::player::{PlayerDirectory, PlayerId};

/// One line of the season narrative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LogEntry {
    GameStarted {
        game_index: usize,
        date: String,
    },
    BountiesIssued { players: Vec<PlayerId> },
    FishChipHeld { player: PlayerId },
    BountyClaimed {
        claimant: PlayerId,
        target: PlayerId,
    },
    FishChipCashed { player: PlayerId },
    Winner { player: PlayerId },
    Paid { players: Vec<PlayerId> },
}

impl LogEntry {
    /// Render the entry with player names.
    #[must_use]
    pub fn render(&self, directory: &PlayerDirectory) -> String {
        let name = |id: &PlayerId| directory.name_of(*id);
        let names = |ids: &[PlayerId]| ids.iter().map(name).collect::<Vec<_>>().join(", ");
        match self {
            Self::GameStarted { game_index, date } => format!("Game {} ({date})", game_index + 1),
            Self::BountiesIssued { players } => format!("Bounties are on {}", names(players)),
            Self::FishChipHeld { player } => format!("{} holds the fish-chip", name(player)),
            Self::BountyClaimed { claimant, target } => {
                format!("{} collects the bounty on {}", name(claimant), name(target))
            }
            Self::FishChipCashed { player } => format!("{} cashes in the fish-chip", name(player)),
            Self::Winner { player } => format!("{} wins", name(player)),
            Self::Paid { players } if players.is_empty() => "Nobody is paid".to_string(),
            Self::Paid { players } => format!("Paid: {}", names(players)),
        }
    }
}

/// Append-only season narrative.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameLog {
    entries: Vec<LogEntry>,
}

impl GameLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: LogEntry) {
        self.entries.push(entry);
    }

    /// Append the story of one scored game.
    pub fn narrate(&mut self, game: &Game, sheet: &Scoresheet) {
        self.push(LogEntry::GameStarted {
            game_index: game.index(),
            date: game.date().to_string(),
        });
        if !game.bounty_players().is_empty() {
            self.push(LogEntry::BountiesIssued {
                players: game.bounty_players().to_vec(),
            });
        }
        if let Some(player) = game.fish_chipper() {
            self.push(LogEntry::FishChipHeld { player });
        }
        for claim in &sheet.bounty_claims {
            self.push(LogEntry::BountyClaimed {
                claimant: claim.claimant,
                target: claim.target,
            });
        }
        if let Some(player) = sheet.fish_chip_cashed {
            self.push(LogEntry::FishChipCashed { player });
        }
        if let Some(player) = sheet.winner() {
            self.push(LogEntry::Winner { player });
        }
        self.push(LogEntry::Paid {
            players: sheet.paid.clone(),
        });
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[must_use]
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    #[must_use]
    pub fn render(&self, directory: &PlayerDirectory) -> Vec<String> {
        self.entries
            .iter()
            .map(|entry| entry.render(directory))
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Knockout;
    use crate::rules::ScoringRules;

    #[test]
    fn narrative_covers_bounties_fish_chip_and_payouts() {
        let mut directory = PlayerDirectory::new();
        let ann = directory.assign("Ann").unwrap();
        let bob = directory.assign("Bob").unwrap();
        let cat = directory.assign("Cat").unwrap();
        let rules = ScoringRules::default();

        let first = Game::new("2024-1-4", vec![ann, bob, cat], vec![]).unwrap();
        let mut second = Game::new(
            "2024-1-11",
            vec![cat, ann, bob],
            vec![Knockout::new(cat, ann)],
        )
        .unwrap();
        second.set_index(1);
        second.set_previous_game_info(Some(&first), &rules);
        let sheet = second.calculate_scores(&rules);

        let mut log = GameLog::new();
        log.narrate(&second, &sheet);
        let lines = log.render(&directory);
        assert_eq!(
            lines,
            vec![
                "Game 2 (2024-1-11)",
                "Bounties are on Ann, Bob, Cat",
                "Cat holds the fish-chip",
                "Cat collects the bounty on Ann",
                "Cat cashes in the fish-chip",
                "Cat wins",
                "Paid: Cat",
            ]
        );
    }

    #[test]
    fn unknown_players_render_by_id() {
        let directory = PlayerDirectory::new();
        let entry = LogEntry::Winner {
            player: PlayerId(12),
        };
        assert_eq!(entry.render(&directory), "#12 wins");
        assert_eq!(
            LogEntry::Paid { players: vec![] }.render(&directory),
            "Nobody is paid"
        );
    }
}
