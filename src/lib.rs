use std::sync::Arc;

use axum::Router;
use axum::extract::State;

use crate::domain::todo::driven_ports::TodoStore;

pub mod api;
pub mod app_env;
pub mod db;
pub mod domain;
pub mod dto;
pub mod logging;
pub mod persistence;
pub mod routing_utils;


/// Resources shared by every request handler. The todo store is created once at startup.
pub struct SharedData {
    pub todo_store: Box<dyn TodoStore>,
}

pub type AppState = State<Arc<SharedData>>;

/// Assembles the todo routes, the API documentation, and request tracing into the
/// application's router
pub fn build_router(shared_data: SharedData) -> Router {
    let router = Router::new()
        .merge(api::todo::todo_routes())
        .merge(api::swagger_main::build_documentation())
        .with_state(Arc::new(shared_data));

    logging::attach_tracing_http(router)
}
