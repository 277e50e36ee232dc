//! Championship error types.

use thiserror::Error;

use super::models::{ChampionshipId, Variant};

/// Errors raised by the championship engine
#[derive(Debug, Error)]
pub enum ChampionshipError {
    /// A player with this name is already registered
    #[error("Player already registered: {0}")]
    DuplicatePlayer(String),

    /// No active (or, for results, no registered) player with this name
    #[error("Unknown player: {0}")]
    UnknownPlayer(String),

    /// The bracket is already seeded and cannot take new entrants
    #[error("Registration is closed once a {0} championship has started")]
    RegistrationClosed(Variant),

    /// Results were submitted before the first round was generated
    #[error("No active round")]
    NoActiveRound,

    /// The current round still has pairings without a result
    #[error("Round not complete: {pending} pairing(s) still awaiting a result")]
    InvalidRoundState { pending: usize },

    /// A Swiss round could not pair every active player
    #[error("Incomplete matching: unpaired players {unpaired:?}")]
    IncompleteMatching { unpaired: Vec<String> },

    /// The two players are not scheduled against each other this round
    #[error("{player_a} and {player_b} are not paired this round")]
    NotPaired { player_a: String, player_b: String },

    /// The pairing already has a result for this round
    #[error("Result already recorded for {player_a} vs {player_b}")]
    AlreadyRecorded { player_a: String, player_b: String },

    /// Elimination matches need a winner
    #[error("Draws are not allowed in single elimination")]
    DrawNotAllowed,

    /// The championship produced no further pairings
    #[error("Championship already finished")]
    AlreadyFinished,

    /// Invalid scoring or engine configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// No stored championship under this identifier
    #[error("Championship not found: {0}")]
    NotFound(ChampionshipId),

    /// Snapshot encoding or decoding failed
    #[error("Snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),
}

impl ChampionshipError {
    /// Get a message suitable for showing to the person running the championship
    ///
    /// Snapshot failures are reported generically so storage internals never
    /// reach the rendering layer.
    pub fn client_message(&self) -> String {
        match self {
            ChampionshipError::Snapshot(_) => "Championship data could not be read".to_string(),
            ChampionshipError::NotFound(_) => "Championship not found".to_string(),
            _ => self.to_string(),
        }
    }
}

/// Result type for championship operations
pub type ChampionshipResult<T> = Result<T, ChampionshipError>;

/// Errors that can occur while turning a championship into a blob and back
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// Failed to encode the snapshot
    #[error("Failed to encode snapshot: {0}")]
    Encode(#[from] bincode::error::EncodeError),

    /// Failed to decode the snapshot
    #[error("Failed to decode snapshot: {0}")]
    Decode(#[from] bincode::error::DecodeError),

    /// Blob was written by an incompatible schema version
    #[error("Unsupported snapshot version {found} (supported: {supported})")]
    UnsupportedVersion { found: u16, supported: u16 },

    /// Stored variant tag is not a known championship variant
    #[error("Unknown championship variant: {0}")]
    UnknownVariant(String),

    /// Stored variant tag disagrees with the blob contents
    #[error("Variant mismatch: expected {expected}, found {found}")]
    VariantMismatch { expected: Variant, found: Variant },
}
