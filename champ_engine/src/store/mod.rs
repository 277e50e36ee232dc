//! Persistence boundary for championships.
//!
//! A store keeps one `(id, variant tag, blob)` row per championship. The blob
//! is the opaque snapshot produced by [`Championship::to_blob`]; callers never
//! see it directly.
//!
//! Every mutation of a stored championship should go through
//! [`ChampionshipStore::update`], which loads, mutates and saves under a single
//! lock so concurrent requests cannot overwrite each other's changes.
//!
//! ## Example
//!
//! ```
//! use champ_engine::championship::Variant;
//! use champ_engine::config::ChampionshipConfig;
//! use champ_engine::store::{ChampionshipStore, MemoryStore};
//!
//! # fn main() -> Result<(), champ_engine::championship::ChampionshipError> {
//! let store = MemoryStore::new();
//! let id = store.create(Variant::Swiss, ChampionshipConfig::default())?.id();
//!
//! store.update(id, |championship| {
//!     championship.add_player("Ana", Some(1))?;
//!     championship.add_player("Bo", Some(2))
//! })?;
//!
//! let pairings = store.update(id, |championship| championship.advance_round())?;
//! assert_eq!(pairings.pairings.len(), 1);
//! # Ok(())
//! # }
//! ```

pub mod memory;

pub use memory::MemoryStore;

use crate::championship::{Championship, ChampionshipId, ChampionshipResult, Variant};
use crate::config::ChampionshipConfig;

/// A persisted championship row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredChampionship {
    pub id: ChampionshipId,
    /// Variant tag, see [`Variant::tag`]
    pub variant: String,
    /// Snapshot blob
    pub data: Vec<u8>,
}

impl StoredChampionship {
    pub fn from_championship(championship: &Championship) -> ChampionshipResult<Self> {
        Ok(Self {
            id: championship.id(),
            variant: championship.variant().tag().to_string(),
            data: championship.to_blob()?,
        })
    }

    pub fn restore(&self) -> ChampionshipResult<Championship> {
        Championship::restore(self.id, &self.variant, &self.data)
    }
}

/// Storage for championship snapshots
pub trait ChampionshipStore: Send + Sync {
    /// Create and persist an empty championship, assigning it a fresh id
    fn create(
        &self,
        variant: Variant,
        config: ChampionshipConfig,
    ) -> ChampionshipResult<Championship>;

    /// Load a championship, `None` if no row exists for `id`
    fn load(&self, id: ChampionshipId) -> ChampionshipResult<Option<Championship>>;

    /// Overwrite the stored row of an existing championship
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the championship was never created in this store.
    fn save(&self, championship: &Championship) -> ChampionshipResult<()>;

    /// Ids and variants of every stored championship, by id
    fn list(&self) -> ChampionshipResult<Vec<(ChampionshipId, Variant)>>;

    /// Load, mutate and save a championship as one critical section.
    ///
    /// Nothing is saved if `f` fails, so a rejected operation leaves the stored
    /// state untouched.
    fn update<T, F>(&self, id: ChampionshipId, f: F) -> ChampionshipResult<T>
    where
        F: FnOnce(&mut Championship) -> ChampionshipResult<T>,
        Self: Sized;
}
