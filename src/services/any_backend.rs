// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Backend chosen at startup from configuration.

use crate::db::SharedStore;
use crate::error::Result;
use crate::services::entity_store::{Entity, EntityBackend};
use crate::services::local_backend::LocalBackend;
use crate::services::remote_backend::RemoteBackend;

/// Local key-value storage, or an upstream REST API.
#[derive(Clone)]
pub enum AnyBackend {
    Local(LocalBackend<SharedStore>),
    Remote(RemoteBackend),
}

impl AnyBackend {
    /// Remote when an upstream URL is configured, local otherwise.
    pub fn from_config(store: SharedStore, remote_url: Option<&str>) -> Self {
        match remote_url {
            Some(url) => {
                tracing::info!(url, "Using remote entity backend");
                AnyBackend::Remote(RemoteBackend::new(url))
            }
            None => AnyBackend::Local(LocalBackend::new(store)),
        }
    }
}

impl<E: Entity> EntityBackend<E> for AnyBackend {
    async fn insert(&self, record: &E::Record) -> Result<E::Record> {
        match self {
            AnyBackend::Local(b) => EntityBackend::<E>::insert(b, record).await,
            AnyBackend::Remote(b) => EntityBackend::<E>::insert(b, record).await,
        }
    }

    async fn update(&self, record: &E::Record) -> Result<E::Record> {
        match self {
            AnyBackend::Local(b) => EntityBackend::<E>::update(b, record).await,
            AnyBackend::Remote(b) => EntityBackend::<E>::update(b, record).await,
        }
    }

    async fn fetch(&self, id: &str) -> Result<Option<E::Record>> {
        match self {
            AnyBackend::Local(b) => EntityBackend::<E>::fetch(b, id).await,
            AnyBackend::Remote(b) => EntityBackend::<E>::fetch(b, id).await,
        }
    }

    async fn fetch_all(&self) -> Result<Vec<E::Record>> {
        match self {
            AnyBackend::Local(b) => EntityBackend::<E>::fetch_all(b).await,
            AnyBackend::Remote(b) => EntityBackend::<E>::fetch_all(b).await,
        }
    }

    async fn remove(&self, id: &str) -> Result<()> {
        match self {
            AnyBackend::Local(b) => EntityBackend::<E>::remove(b, id).await,
            AnyBackend::Remote(b) => EntityBackend::<E>::remove(b, id).await,
        }
    }
}
