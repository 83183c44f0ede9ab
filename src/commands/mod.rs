pub mod expense;
pub mod fallback;
pub mod payment;

use thiserror::Error;
use tracing::info;

use crate::api::ApiError;
use crate::context::BotContext;
use crate::models::{Command, ReplyMessage};
use crate::services::expense_service::ExpenseError;
use crate::services::intent_service;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Expense(#[from] ExpenseError),
    #[error("failed to send reply: {0}")]
    Notifier(ApiError),
}

/// Classify one text message, run it, and reply.
///
/// Returns a short status for the webhook response.
pub async fn handle_message(ctx: &BotContext, reply_token: &str, text: &str) -> Result<&'static str, CommandError> {
    let command = intent_service::classify(text);
    info!("Message classified as {}", command.name());

    match command {
        Command::PaymentRequest { amount } => payment::execute(ctx, reply_token, amount).await,
        Command::ExpenseEntry { category, amount } => expense::execute(ctx, reply_token, category, amount).await,
        Command::Unrecognized { text } => fallback::execute(ctx, reply_token, &text).await,
    }
}

async fn send_reply(ctx: &BotContext, reply_token: &str, messages: &[ReplyMessage]) -> Result<(), CommandError> {
    ctx.notifier
        .reply(reply_token, messages)
        .await
        .map_err(CommandError::Notifier)
}


#[cfg(test)]
mod tests {
    use super::testing::{context, MemoryLedger, MemoryNotifier};
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_dispatches_each_command() {
        let ledger = Arc::new(MemoryLedger::default());
        let notifier = Arc::new(MemoryNotifier::default());
        let ctx = context(ledger.clone(), notifier.clone());

        assert_eq!(handle_message(&ctx, "r1", "pp").await.unwrap(), payment::STATUS);
        assert_eq!(handle_message(&ctx, "r2", "45f").await.unwrap(), expense::STATUS);
        assert_eq!(handle_message(&ctx, "r3", "hello").await.unwrap(), fallback::STATUS);

        assert_eq!(ledger.appended.lock().unwrap().len(), 1);
        assert_eq!(notifier.replies.lock().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_notifier_failure_is_surfaced() {
        let ledger = Arc::new(MemoryLedger::default());
        let notifier = Arc::new(MemoryNotifier {
            fail: true,
            ..MemoryNotifier::default()
        });
        let ctx = context(ledger, notifier);

        let err = handle_message(&ctx, "r1", "pp").await.unwrap_err();
        assert!(matches!(err, CommandError::Notifier(ApiError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn test_reused_reply_token_is_an_error() {
        let ledger = Arc::new(MemoryLedger::default());
        let notifier = Arc::new(MemoryNotifier::default());
        let ctx = context(ledger, notifier);

        handle_message(&ctx, "same", "pp").await.unwrap();
        let err = handle_message(&ctx, "same", "pp").await.unwrap_err();
        assert!(matches!(err, CommandError::Notifier(ApiError::BadRequest(_))));
    }
}
