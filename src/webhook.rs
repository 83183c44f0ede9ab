//! HTTP surface: the LINE webhook endpoint and a liveness route

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use tracing::{debug, error, info_span, warn, Instrument};
use uuid::Uuid;

use crate::commands::{self, CommandError};
use crate::context::BotContext;
use crate::models::{WebhookBody, WebhookEvent};

pub const NO_MESSAGE_STATUS: &str = "No message events";
pub const REPLY_FAILED_STATUS: &str = "Reply failed";
pub const LEDGER_FAILED_STATUS: &str = "Failed to record expense";

pub fn router(ctx: Arc<BotContext>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/line-webhook", post(line_webhook))
        .with_state(ctx)
}

async fn index() -> &'static str {
    "LINE expense bot is running"
}

async fn line_webhook(
    State(ctx): State<Arc<BotContext>>,
    Json(body): Json<WebhookBody>,
) -> (StatusCode, &'static str) {
    let span = info_span!("webhook", request_id = %Uuid::new_v4(), events = body.events.len());
    process_events(&ctx, &body.events).instrument(span).await
}

/// Handle a batch of events in order.
///
/// Reply failures are logged and the batch carries on; the response still
/// acknowledges the delivery. A ledger failure stops the batch and turns the
/// whole response into a 500, even if earlier events went through.
pub async fn process_events(ctx: &BotContext, events: &[WebhookEvent]) -> (StatusCode, &'static str) {
    let mut status = NO_MESSAGE_STATUS;

    for event in events {
        let Some((reply_token, text)) = event.text_message() else {
            debug!("Skipping {} event", event.kind);
            continue;
        };

        match commands::handle_message(ctx, reply_token, text).await {
            Ok(s) => status = s,
            Err(CommandError::Expense(e)) => {
                error!("Error recording expense: {}", e);
                return (StatusCode::INTERNAL_SERVER_ERROR, LEDGER_FAILED_STATUS);
            }
            Err(e @ CommandError::Notifier(_)) => {
                warn!("{}", e);
                status = REPLY_FAILED_STATUS;
            }
        }
    }

    (StatusCode::OK, status)
}
