use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::middleware::auth::require_auth;
use crate::state::AppState;

use super::controller::{login, me, signup};

pub fn init_auth_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/me", get(me))
        .route_layer(middleware::from_fn_with_state(state, require_auth))
        .route("/signup", post(signup))
        .route("/login", post(login))
}
