//! Interactions webhook
//!
//! POST /interactions - signed callbacks from the chat platform

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use tracing::{debug, warn};

use super::{AppState, ErrorResponse};
use crate::commands::{self, Dispatch};
use crate::discord::{Interaction, InteractionResponse, InteractionType};

/// Build the interactions router
pub fn router() -> Router<AppState> {
    Router::new().route("/interactions", post(handle_interaction))
}

fn error(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
        .into_response()
}

/// Verify, then answer pings or dispatch commands
async fn handle_interaction(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    if let Err(e) = state.verifier.verify_request(&headers, &body) {
        warn!(error = %e, "rejected interaction");
        return error(StatusCode::UNAUTHORIZED, "invalid request signature");
    }

    let interaction: Interaction = match serde_json::from_slice(&body) {
        Ok(interaction) => interaction,
        Err(e) => return error(StatusCode::BAD_REQUEST, format!("invalid interaction: {}", e)),
    };

    debug!(id = ?interaction.id, kind = ?interaction.kind, "interaction received");

    match interaction.kind {
        InteractionType::Ping => Json(InteractionResponse::pong()).into_response(),
        InteractionType::ApplicationCommand => {
            let Some(data) = interaction.data else {
                return error(StatusCode::BAD_REQUEST, "missing command data");
            };

            let dispatched = commands::dispatch(&data, &state.evaluator, &mut rand::rng());
            match dispatched {
                Dispatch::Reply(response) => Json(response).into_response(),
                Dispatch::UnknownCommand(name) => {
                    warn!(command = %name, "unknown command");
                    error(StatusCode::BAD_REQUEST, format!("unknown command: {}", name))
                }
            }
        }
        InteractionType::Other(kind) => error(
            StatusCode::BAD_REQUEST,
            format!("unsupported interaction type: {}", kind),
        ),
    }
}
