// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Entity backend over a key-value store.
//!
//! The whole collection lives under one key as a JSON array, so every
//! write is load-modify-store and lookups are linear scans by id. Writes
//! hold `write_lock` for the whole cycle; saves of different ids would
//! otherwise overwrite each other.

use crate::db::KeyValueStore;
use crate::error::{AppError, Result};
use crate::services::entity_store::{Entity, EntityBackend};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Stores entities as a JSON array under `E::COLLECTION`.
#[derive(Debug, Clone)]
pub struct LocalBackend<S> {
    store: S,
    /// Shared by clones, which write to the same store.
    write_lock: Arc<Mutex<()>>,
}

impl<S: KeyValueStore> LocalBackend<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn load_all<E: Entity>(&self) -> Result<Vec<E::Record>> {
        match self.store.get(E::COLLECTION)? {
            Some(data) => Ok(serde_json::from_str(&data)?),
            None => Ok(Vec::new()),
        }
    }

    fn save_all<E: Entity>(&self, records: &[E::Record]) -> Result<()> {
        let data = serde_json::to_string(records)?;
        self.store.set(E::COLLECTION, &data)
    }
}

impl<E, S> EntityBackend<E> for LocalBackend<S>
where
    E: Entity,
    S: KeyValueStore,
{
    async fn insert(&self, record: &E::Record) -> Result<E::Record> {
        let _write = self.write_lock.lock().await;
        let mut records = self.load_all::<E>()?;
        let id = E::record_id(record);
        if records.iter().any(|r| E::record_id(r) == id) {
            return Err(AppError::Insert(format!(
                "{} {} already exists",
                E::COLLECTION,
                id
            )));
        }
        records.push(record.clone());
        self.save_all::<E>(&records)
            .map_err(|e| AppError::Insert(e.to_string()))?;
        Ok(record.clone())
    }

    async fn update(&self, record: &E::Record) -> Result<E::Record> {
        let _write = self.write_lock.lock().await;
        let mut records = self.load_all::<E>()?;
        let id = E::record_id(record);
        let Some(index) = records.iter().position(|r| E::record_id(r) == id) else {
            tracing::warn!(collection = E::COLLECTION, id, "Update of missing record");
            return Err(AppError::Update(format!(
                "no stored {} with id {}",
                E::COLLECTION,
                id
            )));
        };
        records[index] = record.clone();
        self.save_all::<E>(&records)
            .map_err(|e| AppError::Update(e.to_string()))?;
        Ok(record.clone())
    }

    async fn fetch(&self, id: &str) -> Result<Option<E::Record>> {
        let records = self.load_all::<E>()?;
        Ok(records.into_iter().find(|r| E::record_id(r) == id))
    }

    async fn fetch_all(&self) -> Result<Vec<E::Record>> {
        self.load_all::<E>()
    }

    async fn remove(&self, id: &str) -> Result<()> {
        let _write = self.write_lock.lock().await;
        let mut records = self.load_all::<E>()?;
        let before = records.len();
        records.retain(|r| E::record_id(r) != id);
        if records.len() != before {
            self.save_all::<E>(&records)?;
        }
        Ok(())
    }
}
