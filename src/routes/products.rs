use axum::{
    routing::get,
    Router,
};
use crate::handlers::product::{
    create_product, get_products, get_products_by_id_or_name, get_sorted_products, search_products,
};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(get_products).post(create_product))
        .route("/products/", get(get_products).post(create_product))
        .route("/products/search", get(search_products))
        .route("/products/sorted", get(get_sorted_products))
        .route("/products/{id_or_name}", get(get_products_by_id_or_name))
}
