// src/handlers/product.rs
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use tracing::instrument;

use crate::dtos::product::{CreateProductRequest, ProductResponse, SearchParams, SortParams};
use crate::error::AppError;
use crate::models::product::Product;
use crate::state::AppState;

fn to_response(products: Vec<Product>) -> Json<Vec<ProductResponse>> {
    Json(products.into_iter().map(ProductResponse::from).collect())
}

// POST /products/ - Create new product
#[instrument(skip(state, payload))]
pub async fn create_product(
    State(state): State<AppState>,
    payload: Result<Json<CreateProductRequest>, JsonRejection>,
) -> Result<Json<ProductResponse>, AppError> {
    let Json(payload) = payload.map_err(|e| AppError::validation(e.body_text()))?;
    let product = state.catalog.add_product(payload).await?;
    Ok(Json(ProductResponse::from(product)))
}

// GET /products/ - List all products
#[instrument(skip(state))]
pub async fn get_products(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProductResponse>>, AppError> {
    let products = state.catalog.all_products().await?;
    Ok(to_response(products))
}

// GET /products/{id_or_name} - Digits are looked up as an id, anything else as a name fragment
#[instrument(skip(state))]
pub async fn get_products_by_id_or_name(
    Path(id_or_name): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Vec<ProductResponse>>, AppError> {
    let products = state.catalog.resolve_by_id_or_name(&id_or_name).await?;
    Ok(to_response(products))
}

// GET /products/search?name=&category=
#[instrument(skip(state))]
pub async fn search_products(
    State(state): State<AppState>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<Vec<ProductResponse>>, AppError> {
    let Query(params) = params.map_err(|e| AppError::validation(e.body_text()))?;
    let products = state
        .catalog
        .search(params.name.as_deref(), params.category.as_deref())
        .await?;
    Ok(to_response(products))
}

// GET /products/sorted?sortBy=price|name|category
#[instrument(skip(state))]
pub async fn get_sorted_products(
    State(state): State<AppState>,
    params: Result<Query<SortParams>, QueryRejection>,
) -> Result<Json<Vec<ProductResponse>>, AppError> {
    let Query(params) = params.map_err(|e| AppError::validation(e.body_text()))?;
    let products = state
        .catalog
        .sorted_products(params.sort_by.as_deref())
        .await?;
    Ok(to_response(products))
}
