//! Championship module: player registry, round pairing and result ledger.
//!
//! This module implements:
//! - Player registration, removal and standings
//! - Single elimination rounds with random seeding and byes
//! - Swiss rounds paired by maximum-weight matching without rematches
//! - A per-round result ledger with global match history
//! - Versioned snapshot blobs for persistence
//!
//! ## Example
//!
//! ```
//! use champ_engine::championship::{Championship, Variant};
//!
//! # fn main() -> Result<(), champ_engine::championship::ChampionshipError> {
//! let mut championship = Championship::new(Variant::Swiss);
//! for name in ["A", "B", "C", "D"] {
//!     championship.add_player(name, None)?;
//! }
//!
//! let round = championship.advance_round()?;
//! assert_eq!(round.pairings.len(), 2);
//!
//! championship.record_result("A", "B", 2, 0)?;
//! championship.record_result("C", "D", 1, 1)?;
//!
//! let standings = championship.standings();
//! assert_eq!(standings[0].name, "A");
//! assert_eq!(standings[0].score, 3);
//! # Ok(())
//! # }
//! ```

pub mod engine;
pub mod errors;
pub mod formats;
pub mod ledger;
pub mod models;
pub mod registry;
pub mod snapshot;

pub use engine::Championship;
pub use errors::{ChampionshipError, ChampionshipResult, SnapshotError};
pub use formats::{Format, PairingFormat, SingleElimination, Swiss};
pub use ledger::Ledger;
pub use models::{
    ChampionshipId, MatchResult, Outcome, Pairing, Player, PlayerFilter, PlayerStatus,
    RoundPairings, Standing, Variant,
};
pub use registry::Registry;
pub use snapshot::{ChampionshipSnapshot, SNAPSHOT_VERSION};
