// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Product entity persisted through the entity store.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use uuid::Uuid;

use crate::db::collections;
use crate::services::entity_store::Entity;

/// Plain stored form of a product (`products` key / `/api/products`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ProductRecord {
    pub id: String,
    pub name: String,
    pub price: f64,
}

/// In-memory product handle.
///
/// `is_new` is never persisted: it is true only for a product created
/// without an id and not yet inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    id: String,
    pub name: String,
    pub price: f64,
    is_new: bool,
}

impl Product {
    /// Create a product, generating an id when none is given.
    pub fn create(name: impl Into<String>, price: f64, id: Option<String>) -> Self {
        let is_new = id.is_none();
        Self {
            id: id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            name: name.into(),
            price,
            is_new,
        }
    }

    /// Shorthand for a brand-new product.
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self::create(name, price, None)
    }
}

impl Entity for Product {
    type Record = ProductRecord;

    const COLLECTION: &'static str = collections::PRODUCTS;

    fn id(&self) -> &str {
        &self.id
    }

    fn is_new(&self) -> bool {
        self.is_new
    }

    fn mark_stored(&mut self) {
        self.is_new = false;
    }

    fn to_record(&self) -> ProductRecord {
        ProductRecord {
            id: self.id.clone(),
            name: self.name.clone(),
            price: self.price,
        }
    }

    fn from_record(record: ProductRecord) -> Self {
        Self::create(record.name, record.price, Some(record.id))
    }

    fn record_id(record: &ProductRecord) -> &str {
        &record.id
    }
}
