use axum::{
    Router, middleware,
    routing::{delete, get, patch, post},
};

use crate::middleware::auth::require_auth;
use crate::state::AppState;

use super::controller::{
    create_project, create_task, delete_project, delete_task, list_tasks, update_task,
};

/// Reading a project's tasks is public; everything else requires a session.
pub fn init_projects_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", post(create_project))
        .route("/{id}", delete(delete_project))
        .route("/{id}/tasks", post(create_task))
        .route_layer(middleware::from_fn_with_state(state, require_auth))
        .route("/{id}/tasks", get(list_tasks))
}

pub fn init_tasks_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/{id}", patch(update_task).delete(delete_task))
        .route_layer(middleware::from_fn_with_state(state, require_auth))
}
