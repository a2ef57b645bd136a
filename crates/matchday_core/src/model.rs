use std::fmt::Debug;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

/// A record shown as one row of a list.
///
/// Rows are matched between snapshots by [`Row::id`] and compared for content
/// changes with `PartialEq`; nothing else about them is inspected.
pub trait Row: Clone + PartialEq + Debug + Send + Sync + 'static {
    type Id: Clone + Eq + Hash + Debug + Send + Sync + 'static;

    fn id(&self) -> Self::Id;
}

pub type MatchId = String;
pub type PlayerId = String;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
}

impl Player {
    pub fn new(id: impl Into<PlayerId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    #[serde(default)]
    pub home_players: Vec<Player>,
    #[serde(default)]
    pub away_players: Vec<Player>,
    #[serde(default)]
    pub home_goals: u32,
    #[serde(default)]
    pub away_goals: u32,
}

impl Match {
    pub fn new(id: impl Into<MatchId>) -> Self {
        Self {
            id: id.into(),
            home_players: Vec::new(),
            away_players: Vec::new(),
            home_goals: 0,
            away_goals: 0,
        }
    }

    pub fn with_players(mut self, home: Vec<Player>, away: Vec<Player>) -> Self {
        self.home_players = home;
        self.away_players = away;
        self
    }

    pub fn with_score(mut self, home_goals: u32, away_goals: u32) -> Self {
        self.home_goals = home_goals;
        self.away_goals = away_goals;
        self
    }
}

impl Row for Match {
    type Id = MatchId;

    fn id(&self) -> MatchId {
        self.id.clone()
    }
}
