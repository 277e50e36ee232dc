//! Championship data models.

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use super::errors::{ChampionshipError, SnapshotError};

/// Championship ID type, assigned by whoever stores the championship
pub type ChampionshipId = i64;

/// Championship format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Variant {
    /// Losers drop out after every round
    SingleElimination,
    /// Everyone keeps playing, paired by score without rematches
    Swiss,
}

impl Variant {
    /// Tag used by the storage layer to tell variants apart
    pub fn tag(&self) -> &'static str {
        match self {
            Variant::SingleElimination => "SingleElimination",
            Variant::Swiss => "Swiss",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

impl FromStr for Variant {
    type Err = SnapshotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SingleElimination" => Ok(Variant::SingleElimination),
            "Swiss" => Ok(Variant::Swiss),
            other => Err(SnapshotError::UnknownVariant(other.to_string())),
        }
    }
}

/// Whether a player is still in the running
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerStatus {
    Active,
    Removed,
}

/// Which players to list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayerFilter {
    #[default]
    All,
    Active,
    Removed,
}

/// A registered player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Name, unique within the championship
    pub name: String,
    /// External seat or badge number
    pub number: Option<u32>,
    /// Cumulative points
    pub score: i64,
    /// Active or removed
    pub status: PlayerStatus,
}

impl Player {
    pub fn new(name: String, number: Option<u32>) -> Self {
        Self {
            name,
            number,
            score: 0,
            status: PlayerStatus::Active,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == PlayerStatus::Active
    }
}

/// Two players scheduled against each other. Order carries no meaning.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pairing {
    pub player_a: String,
    pub player_b: String,
}

impl Pairing {
    pub fn new(player_a: impl Into<String>, player_b: impl Into<String>) -> Self {
        Self {
            player_a: player_a.into(),
            player_b: player_b.into(),
        }
    }

    /// True if this pairing is between `a` and `b`, in either order
    pub fn is_between(&self, a: &str, b: &str) -> bool {
        (self.player_a == a && self.player_b == b) || (self.player_a == b && self.player_b == a)
    }

    pub fn involves(&self, name: &str) -> bool {
        self.player_a == name || self.player_b == name
    }

    /// Order-independent key, used for the match history
    pub fn key(&self) -> (String, String) {
        pair_key(&self.player_a, &self.player_b)
    }
}

impl fmt::Display for Pairing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} vs {}", self.player_a, self.player_b)
    }
}

/// Normalise an unordered pair of names
pub fn pair_key(a: &str, b: &str) -> (String, String) {
    if a <= b {
        (a.to_string(), b.to_string())
    } else {
        (b.to_string(), a.to_string())
    }
}

/// How a single match ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    PlayerAWins,
    PlayerBWins,
    Draw,
}

/// A completed match. Immutable once recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub player_a: String,
    pub player_b: String,
    pub score_a: u32,
    pub score_b: u32,
}

impl MatchResult {
    pub fn new(
        player_a: impl Into<String>,
        player_b: impl Into<String>,
        score_a: u32,
        score_b: u32,
    ) -> Self {
        Self {
            player_a: player_a.into(),
            player_b: player_b.into(),
            score_a,
            score_b,
        }
    }

    pub fn outcome(&self) -> Outcome {
        match self.score_a.cmp(&self.score_b) {
            std::cmp::Ordering::Greater => Outcome::PlayerAWins,
            std::cmp::Ordering::Less => Outcome::PlayerBWins,
            std::cmp::Ordering::Equal => Outcome::Draw,
        }
    }

    pub fn winner(&self) -> Option<&str> {
        match self.outcome() {
            Outcome::PlayerAWins => Some(&self.player_a),
            Outcome::PlayerBWins => Some(&self.player_b),
            Outcome::Draw => None,
        }
    }

    pub fn loser(&self) -> Option<&str> {
        match self.outcome() {
            Outcome::PlayerAWins => Some(&self.player_b),
            Outcome::PlayerBWins => Some(&self.player_a),
            Outcome::Draw => None,
        }
    }

    pub fn pairing(&self) -> Pairing {
        Pairing::new(self.player_a.clone(), self.player_b.clone())
    }
}

/// One row of the standings table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    /// 1-indexed position
    pub position: usize,
    pub name: String,
    pub number: Option<u32>,
    pub score: i64,
    pub status: PlayerStatus,
}

/// Pairings generated for one round
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RoundPairings {
    /// Round number these pairings belong to
    pub round: u32,
    /// Matches to play
    pub pairings: Vec<Pairing>,
    /// Active players left without an opponent (a bye in elimination)
    pub unpaired: Vec<String>,
}

impl RoundPairings {
    /// True when every active player has an opponent
    pub fn is_complete(&self) -> bool {
        self.unpaired.is_empty()
    }

    /// True when no match could be scheduled
    pub fn is_empty(&self) -> bool {
        self.pairings.is_empty()
    }

    /// Treat unpaired players as an error
    pub fn require_complete(self) -> Result<Self, ChampionshipError> {
        if self.is_complete() {
            Ok(self)
        } else {
            Err(ChampionshipError::IncompleteMatching {
                unpaired: self.unpaired,
            })
        }
    }
}
