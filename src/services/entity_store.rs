// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Entity store: INSERT-or-UPDATE persistence for identity-carrying records.
//!
//! Handles:
//! - Choosing INSERT vs UPDATE from the entity's `is_new` flag alone
//! - Clearing `is_new` only after a successful INSERT
//! - Rebuilding loaded entities as not-new
//! - Rejecting a second save of an id while the first is still running

use crate::error::{AppError, Result};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use serde::{de::DeserializeOwned, Serialize};
use std::future::Future;
use std::marker::PhantomData;

/// A persistable record with a stable id and an insert/update lifecycle.
pub trait Entity: Send + Sync {
    /// Plain data written to the backend.
    type Record: Serialize + DeserializeOwned + Clone + Send + Sync + 'static;

    /// Storage key and REST collection name.
    const COLLECTION: &'static str;

    fn id(&self) -> &str;

    /// True until the first successful INSERT.
    fn is_new(&self) -> bool;

    fn mark_stored(&mut self);

    fn to_record(&self) -> Self::Record;

    /// Rebuild from stored data. The result must report `is_new() == false`.
    fn from_record(record: Self::Record) -> Self;

    fn record_id(record: &Self::Record) -> &str;
}

/// Persistence target for one entity type.
///
/// `insert` fails with [`AppError::Insert`] and `update` with
/// [`AppError::Update`] when the backend rejects the write.
pub trait EntityBackend<E: Entity>: Send + Sync {
    fn insert(&self, record: &E::Record) -> impl Future<Output = Result<E::Record>> + Send;

    fn update(&self, record: &E::Record) -> impl Future<Output = Result<E::Record>> + Send;

    fn fetch(&self, id: &str) -> impl Future<Output = Result<Option<E::Record>>> + Send;

    fn fetch_all(&self) -> impl Future<Output = Result<Vec<E::Record>>> + Send;

    /// Remove by id; a missing id is not an error.
    fn remove(&self, id: &str) -> impl Future<Output = Result<()>> + Send;
}

/// Front door for saving, loading and deleting entities of type `E`.
pub struct EntityStore<E, B> {
    backend: B,
    in_flight: DashMap<String, ()>,
    _entity: PhantomData<fn() -> E>,
}

impl<E, B> EntityStore<E, B>
where
    E: Entity,
    B: EntityBackend<E>,
{
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            in_flight: DashMap::new(),
            _entity: PhantomData,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// INSERT a new entity or UPDATE an existing one.
    ///
    /// On INSERT failure the entity stays new, so a later retry inserts again.
    pub async fn save(&self, entity: &mut E) -> Result<E::Record> {
        let _guard = InFlightGuard::acquire(&self.in_flight, entity.id())?;
        let record = entity.to_record();

        if entity.is_new() {
            let stored = self.backend.insert(&record).await?;
            entity.mark_stored();
            tracing::info!(
                collection = E::COLLECTION,
                id = entity.id(),
                "Inserted entity"
            );
            Ok(stored)
        } else {
            let stored = self.backend.update(&record).await?;
            tracing::info!(
                collection = E::COLLECTION,
                id = entity.id(),
                "Updated entity"
            );
            Ok(stored)
        }
    }

    /// Load an entity by id, marked as already stored.
    pub async fn load(&self, id: &str) -> Result<Option<E>> {
        let record = self.backend.fetch(id).await?;
        Ok(record.map(E::from_record))
    }

    /// All stored entities, in backend order.
    pub async fn list(&self) -> Result<Vec<E>> {
        let records = self.backend.fetch_all().await?;
        Ok(records.into_iter().map(E::from_record).collect())
    }

    /// Remove the entity from the backend; no-op if it was never stored.
    pub async fn delete(&self, entity: &E) -> Result<()> {
        self.backend.remove(entity.id()).await?;
        tracing::info!(
            collection = E::COLLECTION,
            id = entity.id(),
            "Deleted entity"
        );
        Ok(())
    }

    /// Whether a save for `id` is currently outstanding.
    pub fn is_saving(&self, id: &str) -> bool {
        self.in_flight.contains_key(id)
    }
}

/// Pending marker for one id, released on drop (including cancellation).
struct InFlightGuard<'a> {
    pending: &'a DashMap<String, ()>,
    id: String,
}

impl<'a> InFlightGuard<'a> {
    fn acquire(pending: &'a DashMap<String, ()>, id: &str) -> Result<Self> {
        match pending.entry(id.to_string()) {
            Entry::Occupied(_) => {
                tracing::warn!(id, "Rejected overlapping save");
                Err(AppError::SaveInFlight(id.to_string()))
            }
            Entry::Vacant(slot) => {
                slot.insert(());
                Ok(Self {
                    pending,
                    id: id.to_string(),
                })
            }
        }
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.pending.remove(&self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_rejects_second_acquire_until_dropped() {
        let pending = DashMap::new();

        let first = InFlightGuard::acquire(&pending, "p-1").unwrap();
        let err = InFlightGuard::acquire(&pending, "p-1").err().unwrap();
        assert!(matches!(err, AppError::SaveInFlight(ref id) if id == "p-1"));

        // Other ids are unaffected.
        let other = InFlightGuard::acquire(&pending, "p-2").unwrap();

        drop(first);
        assert!(InFlightGuard::acquire(&pending, "p-1").is_ok());
        drop(other);
        assert!(pending.is_empty());
    }
}
