use axum::{routing::get, Router};

use crate::handlers::signaling_ws;
use crate::services::CallRelayService;

pub fn signaling_routes(relay: CallRelayService) -> Router {
    Router::new()
        .route("/ws", get(signaling_ws))
        .with_state(relay)
}
