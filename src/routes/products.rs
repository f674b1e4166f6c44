use axum::{
    middleware::from_fn,
    routing::get,
    Router,
};
use crate::handlers::product::{
    get_products, get_product, create_product, update_product, delete_product
};
use crate::middleware::auth::require_auth;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(get_products).post(create_product))
        .route("/products/{id}", get(get_product).patch(update_product).delete(delete_product))
        .layer(from_fn(require_auth))
}
