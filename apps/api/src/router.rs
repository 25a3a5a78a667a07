use axum::{routing::get, Router};

use signaling_cell::{signaling_routes, CallRelayService};

pub fn create_router(relay: CallRelayService) -> Router {
    Router::new()
        .route("/", get(|| async { "DocTalk signaling server is running!" }))
        .nest("/signaling", signaling_routes(relay))
}
