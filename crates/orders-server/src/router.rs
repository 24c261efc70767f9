//! Router assembly for the orders HTTP API.
//!
//! [`build_router`] wires all handler functions to their routes with
//! CORS and tracing middleware layers.

use axum::routing::{get, patch};
use axum::Router;
use orders_storage::{Agent, Customer, Order};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::openapi::DOCUMENT_PATH;
use crate::resource::Resource;
use crate::state::AppState;

/// Builds the complete axum router with all API routes.
///
/// CORS is permissive (browser clients call from any origin).
/// TraceLayer provides request-level logging via tracing.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(resource_routes::<Agent>())
        .merge(resource_routes::<Customer>())
        .merge(resource_routes::<Order>())
        .route("/say", get(handlers::say::say))
        .route("/docs", get(handlers::docs::ui))
        .route(DOCUMENT_PATH, get(handlers::docs::openapi_json))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// List/create on the collection; update/upsert/delete on the item.
fn resource_routes<R: Resource>() -> Router<AppState> {
    use crate::handlers::entities;

    Router::new()
        .route(
            R::COLLECTION,
            get(entities::list::<R>).post(entities::create::<R>),
        )
        .route(
            R::ITEM,
            patch(entities::update::<R>)
                .put(entities::upsert::<R>)
                .delete(entities::delete::<R>),
        )
}
