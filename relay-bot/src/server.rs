//! HTTP listener: liveness on `GET /` and, in webhook mode, update intake on `POST /webhook`.
//! The handler chain is injected through router state.

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use teloxide::types::Update;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::chain::HandlerChain;
use crate::config::TransportMode;
use crate::telegram::{update_to_core, WEBHOOK_PATH};

pub const LIVENESS_MESSAGE: &str = "Bot e API rodando 🚀";

/// Shared state for the axum handlers.
#[derive(Clone)]
pub struct AppState {
    pub chain: HandlerChain,
    pub mode: TransportMode,
}

impl AppState {
    pub fn new(chain: HandlerChain, mode: TransportMode) -> Self {
        Self { chain, mode }
    }
}

/// Builds the router. The webhook route only exists in webhook mode.
pub fn build_router(state: AppState) -> Router {
    let mut router = Router::new().route("/", get(liveness));
    if state.mode == TransportMode::Webhook {
        router = router.route(WEBHOOK_PATH, post(receive_update));
    }
    router.with_state(state)
}

/// GET / — static status payload for health checks.
async fn liveness(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "message": LIVENESS_MESSAGE,
        "mode": state.mode.as_str(),
    }))
}

/// POST /webhook — parses a Telegram update and hands text messages to the chain.
/// Answers 200 whatever the relay outcome; only an unparseable body gets 400.
async fn receive_update(State(state): State<AppState>, body: Bytes) -> (StatusCode, Json<Value>) {
    let update: Update = match serde_json::from_slice(&body) {
        Ok(u) => u,
        Err(e) => {
            warn!(error = %e, body_len = body.len(), "Rejected webhook body");
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "status": "error", "detail": "invalid update payload" })),
            );
        }
    };

    match update_to_core(&update) {
        Some(message) => {
            debug!(
                user_id = message.user.id,
                chat_id = message.chat.id,
                "Webhook update accepted"
            );
            state.chain.spawn_handle(message);
        }
        None => debug!(update_id = ?update.id, "Ignoring update without text message"),
    }

    (StatusCode::OK, Json(json!({ "status": "ok" })))
}

/// Serves `router` on `listener` until `shutdown` is cancelled, then drains in-flight requests.
pub async fn serve(
    listener: TcpListener,
    router: Router,
    shutdown: CancellationToken,
) -> anyhow::Result<()> {
    let addr = listener.local_addr()?;
    info!(addr = %addr, "HTTP listener serving");
    axum::serve(listener, router)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
        .map_err(|e| anyhow::anyhow!("HTTP listener failed: {}", e))?;
    info!("HTTP listener stopped");
    Ok(())
}
