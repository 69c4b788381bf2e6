use axum::{Router, routing::get};

pub mod catalog;
pub mod system;

/// Router for the catalog query endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/products", get(catalog::products))
        .route("/cheapest", get(catalog::cheapest))
        .route("/most-expensive", get(catalog::most_expensive))
        .route("/exact-price", get(catalog::exact_price))
        .route("/most-bottles", get(catalog::most_bottles))
        .route("/all-routes", get(catalog::all_routes))
}
