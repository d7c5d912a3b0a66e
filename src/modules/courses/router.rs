use axum::{
    Router, middleware,
    routing::{get, patch, post},
};

use crate::middleware::auth::require_auth;
use crate::state::AppState;

use super::controller::{create_course, delete_course, list_courses, update_course};

/// Listing is public; every mutating route sits behind `require_auth`.
pub fn init_courses_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", post(create_course))
        .route("/{id}", patch(update_course).delete(delete_course))
        .route_layer(middleware::from_fn_with_state(state, require_auth))
        .route("/", get(list_courses))
}
