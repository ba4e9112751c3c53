// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Product REST routes (`/api/products`).
//!
//! These are the endpoints [`crate::services::RemoteBackend`] talks to:
//! `POST` inserts and `PUT /{id}` updates, each answering with the stored
//! record.

use crate::error::{AppError, Result};
use crate::models::{Product, ProductRecord};
use crate::services::entity_store::{Entity, EntityBackend};
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/products", get(list_products).post(create_product))
        .route(
            "/api/products/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
}

/// Body for insert and update. Clients may choose the id on insert.
#[derive(Deserialize)]
struct ProductInput {
    id: Option<String>,
    name: String,
    price: f64,
}

fn validate_input(input: &ProductInput) -> Result<()> {
    if input.name.trim().is_empty() {
        return Err(AppError::BadRequest("Product name is required".to_string()));
    }
    if !input.price.is_finite() || input.price < 0.0 {
        return Err(AppError::Validation(vec!["price"]));
    }
    Ok(())
}

async fn list_products(State(state): State<Arc<AppState>>) -> Result<Json<Vec<ProductRecord>>> {
    let products = state.products.list().await?;
    Ok(Json(products.iter().map(Product::to_record).collect()))
}

async fn get_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ProductRecord>> {
    let product = state
        .products
        .load(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Product {} not found", id)))?;
    Ok(Json(product.to_record()))
}

async fn create_product(
    State(state): State<Arc<AppState>>,
    Json(input): Json<ProductInput>,
) -> Result<(StatusCode, Json<ProductRecord>)> {
    validate_input(&input)?;

    let stored = match input.id {
        // Server assigns the id: an ordinary first save.
        None => {
            let mut product = Product::new(input.name, input.price);
            state.products.save(&mut product).await?
        }
        // Client-assigned id: insert the record as given.
        Some(id) => {
            let record = ProductRecord {
                id,
                name: input.name,
                price: input.price,
            };
            EntityBackend::<Product>::insert(state.products.backend(), &record).await?
        }
    };

    Ok((StatusCode::CREATED, Json(stored)))
}

async fn update_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(input): Json<ProductInput>,
) -> Result<Json<ProductRecord>> {
    validate_input(&input)?;
    if input.id.as_deref().is_some_and(|body_id| body_id != id) {
        return Err(AppError::BadRequest(
            "Product id in body does not match path".to_string(),
        ));
    }

    let mut product = state
        .products
        .load(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Product {} not found", id)))?;
    product.name = input.name;
    product.price = input.price;

    Ok(Json(state.products.save(&mut product).await?))
}

async fn delete_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    let product = state
        .products
        .load(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Product {} not found", id)))?;
    state.products.delete(&product).await?;
    Ok(StatusCode::NO_CONTENT)
}
