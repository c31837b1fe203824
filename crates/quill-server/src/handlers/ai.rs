//! AI text edit handler.

use std::sync::Arc;

use axum::{extract::State, Json};
use tracing::{error, info};

use crate::dto::{AiRequest, AiResponse};
use crate::error::AppError;
use crate::services;
use crate::ServerState;

/// Rewrites, summarizes or proofreads the submitted text.
pub async fn ai_edit(
    State(state): State<Arc<ServerState>>,
    Json(req): Json<AiRequest>,
) -> Result<Json<AiResponse>, AppError> {
    let model = state.resolve_model(req.model.as_deref());

    info!(
        "AI request (action: {}, model: {}): {}...",
        req.action,
        model,
        req.text.get(..50).unwrap_or(&req.text)
    );

    let result = services::edit::run(state.generator.as_ref(), req.action, &req.text, model)
        .await
        .inspect_err(|e| {
            if let quill_core::RelayError::Upstream(msg) = e {
                error!("Upstream error: {}", msg);
            }
        })?;

    Ok(Json(AiResponse { result }))
}
