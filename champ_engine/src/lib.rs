//! # Champ Engine
//!
//! A tournament pairing engine for single elimination and Swiss championships.
//!
//! A [`Championship`] owns its roster, the results of every round and the
//! pairings currently being played. Each call to
//! [`Championship::advance_round`] asks the championship's format for the next
//! set of pairings:
//!
//! - **Single elimination**: players are shuffled once, paired in order, and
//!   losers drop out. An odd player out gets a bye.
//! - **Swiss**: everyone keeps playing. Pairings come from a maximum-cardinality,
//!   maximum-weight matching over the pairs that have not met yet.
//!
//! The whole state is plain data and can be stored as an opaque, versioned
//! blob between requests (see [`store`]).
//!
//! ## Core Modules
//!
//! - [`championship`]: Championship aggregate, formats, registry and ledger
//! - [`matching`]: Maximum-weight matching on general graphs
//! - [`config`]: Scoring and pairing configuration
//! - [`store`]: Persistence boundary with an in-memory implementation
//!
//! ## Example
//!
//! ```
//! use champ_engine::{Championship, Variant};
//!
//! # fn main() -> Result<(), champ_engine::ChampionshipError> {
//! let mut championship = Championship::new(Variant::SingleElimination);
//! championship.add_player("Ana", Some(1))?;
//! championship.add_player("Bo", Some(2))?;
//!
//! let round = championship.advance_round()?;
//! let pairing = &round.pairings[0];
//! championship.record_result(&pairing.player_a, &pairing.player_b, 3, 1)?;
//!
//! assert!(championship.advance_round()?.is_empty());
//! assert!(championship.is_finished());
//! assert!(championship.champion().is_some());
//! # Ok(())
//! # }
//! ```

/// Championship state, pairing formats and results.
pub mod championship;
pub use championship::{
    Championship, ChampionshipError, ChampionshipId, ChampionshipResult, MatchResult, Pairing,
    PlayerFilter, RoundPairings, Standing, Variant,
};

/// Scoring and pairing configuration.
pub mod config;
pub use config::{ChampionshipConfig, ScoringConfig, SwissWeighting};

pub mod matching;

/// Persistence boundary.
pub mod store;
pub use store::{ChampionshipStore, MemoryStore};
