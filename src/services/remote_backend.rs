// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! REST entity backend.
//!
//! Handles:
//! - INSERT as `POST /api/{collection}`
//! - UPDATE as `PUT /api/{collection}/{id}`
//! - Loading and deleting by id (404 means absent)
//!
//! Any non-2xx answer to a write is surfaced as an insert/update error.
//! Nothing is retried.

use crate::error::{AppError, Result};
use crate::services::entity_store::{Entity, EntityBackend};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

/// HTTP client for a remote entity API.
#[derive(Clone)]
pub struct RemoteBackend {
    http: reqwest::Client,
    base_url: String,
}

impl RemoteBackend {
    /// Create a client for the API rooted at `base_url` (e.g. `http://host:8080`).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url<E: Entity>(&self) -> String {
        format!("{}/api/{}", self.base_url, E::COLLECTION)
    }

    fn item_url<E: Entity>(&self, id: &str) -> String {
        format!("{}/{}", self.collection_url::<E>(), id)
    }

    /// Turn a response into a parsed body, or an error built by `fail`.
    async fn parse_success<T: DeserializeOwned>(
        response: reqwest::Response,
        fail: fn(String) -> AppError,
    ) -> Result<T> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(%status, "Remote backend rejected request");
            return Err(fail(format!("HTTP {}: {}", status, body)));
        }

        response
            .json()
            .await
            .map_err(|e| fail(format!("JSON parse error: {}", e)))
    }
}

impl<E: Entity> EntityBackend<E> for RemoteBackend {
    async fn insert(&self, record: &E::Record) -> Result<E::Record> {
        let url = self.collection_url::<E>();
        tracing::debug!(%url, id = E::record_id(record), "POST entity");

        let response = self
            .http
            .post(&url)
            .json(record)
            .send()
            .await
            .map_err(|e| AppError::Insert(e.to_string()))?;

        Self::parse_success(response, AppError::Insert).await
    }

    async fn update(&self, record: &E::Record) -> Result<E::Record> {
        let url = self.item_url::<E>(E::record_id(record));
        tracing::debug!(%url, "PUT entity");

        let response = self
            .http
            .put(&url)
            .json(record)
            .send()
            .await
            .map_err(|e| AppError::Update(e.to_string()))?;

        Self::parse_success(response, AppError::Update).await
    }

    async fn fetch(&self, id: &str) -> Result<Option<E::Record>> {
        let response = self
            .http
            .get(self.item_url::<E>(id))
            .send()
            .await
            .map_err(|e| AppError::Storage(e.to_string()))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        Self::parse_success(response, AppError::Storage)
            .await
            .map(Some)
    }

    async fn fetch_all(&self) -> Result<Vec<E::Record>> {
        let response = self
            .http
            .get(self.collection_url::<E>())
            .send()
            .await
            .map_err(|e| AppError::Storage(e.to_string()))?;

        Self::parse_success(response, AppError::Storage).await
    }

    async fn remove(&self, id: &str) -> Result<()> {
        let response = self
            .http
            .delete(self.item_url::<E>(id))
            .send()
            .await
            .map_err(|e| AppError::Storage(e.to_string()))?;

        let status = response.status();
        if status.is_success() || status == StatusCode::NOT_FOUND {
            return Ok(());
        }
        let body = response.text().await.unwrap_or_default();
        Err(AppError::Storage(format!("HTTP {}: {}", status, body)))
    }
}
