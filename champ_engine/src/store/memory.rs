//! In-process championship store.

use std::{
    collections::BTreeMap,
    sync::{Mutex, MutexGuard, PoisonError},
};

use super::{ChampionshipStore, StoredChampionship};
use crate::championship::{
    Championship, ChampionshipError, ChampionshipId, ChampionshipResult, Variant,
};
use crate::config::ChampionshipConfig;

#[derive(Debug)]
struct Rows {
    rows: BTreeMap<ChampionshipId, StoredChampionship>,
    next_id: ChampionshipId,
}

/// Store keeping snapshot rows in memory, ids assigned from 1
#[derive(Debug)]
pub struct MemoryStore {
    inner: Mutex<Rows>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Rows {
                rows: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }

    /// Raw row for `id`, as an external database would hold it
    pub fn row(&self, id: ChampionshipId) -> Option<StoredChampionship> {
        self.lock().rows.get(&id).cloned()
    }

    pub fn len(&self) -> usize {
        self.lock().rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().rows.is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, Rows> {
        // Rows are only replaced whole, so a poisoned lock still holds valid data
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ChampionshipStore for MemoryStore {
    fn create(
        &self,
        variant: Variant,
        config: ChampionshipConfig,
    ) -> ChampionshipResult<Championship> {
        let mut championship = Championship::with_config(variant, config)?;
        let mut inner = self.lock();
        championship.set_id(inner.next_id);
        let row = StoredChampionship::from_championship(&championship)?;
        inner.rows.insert(row.id, row);
        inner.next_id += 1;
        log::info!("Created {variant} championship {}", championship.id());
        Ok(championship)
    }

    fn load(&self, id: ChampionshipId) -> ChampionshipResult<Option<Championship>> {
        self.lock()
            .rows
            .get(&id)
            .map(StoredChampionship::restore)
            .transpose()
    }

    fn save(&self, championship: &Championship) -> ChampionshipResult<()> {
        let row = StoredChampionship::from_championship(championship)?;
        let mut inner = self.lock();
        match inner.rows.get_mut(&row.id) {
            Some(existing) => {
                *existing = row;
                Ok(())
            }
            None => Err(ChampionshipError::NotFound(row.id)),
        }
    }

    fn list(&self) -> ChampionshipResult<Vec<(ChampionshipId, Variant)>> {
        self.lock()
            .rows
            .values()
            .map(|row| -> ChampionshipResult<_> { Ok((row.id, row.variant.parse::<Variant>()?)) })
            .collect()
    }

    fn update<T, F>(&self, id: ChampionshipId, f: F) -> ChampionshipResult<T>
    where
        F: FnOnce(&mut Championship) -> ChampionshipResult<T>,
    {
        let mut inner = self.lock();
        let row = inner.rows.get(&id).ok_or(ChampionshipError::NotFound(id))?;
        let mut championship = row.restore()?;

        let value = f(&mut championship)?;

        let row = StoredChampionship::from_championship(&championship)?;
        inner.rows.insert(id, row);
        Ok(value)
    }
}
