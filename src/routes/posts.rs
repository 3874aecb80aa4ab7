use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::post,
    Router,
};

use crate::handlers::posts;
use crate::middleware::auth::auth_middleware;
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    let body_limit = state.max_body_bytes;

    Router::new()
        .route(
            "/",
            post(posts::create_post)
                .put(posts::update_post)
                .delete(posts::delete_post),
        )
        .route("/like", post(posts::like_and_unlike_post))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
        .layer(DefaultBodyLimit::max(body_limit))
}
