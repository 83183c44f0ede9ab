use tracing::debug;

use super::{send_reply, CommandError};
use crate::context::BotContext;
use crate::services::fallback_service;

pub const STATUS: &str = "Fallback reply sent";

pub async fn execute(ctx: &BotContext, reply_token: &str, text: &str) -> Result<&'static str, CommandError> {
    let preview: String = text.chars().take(50).collect();
    debug!("No command matched {:?}", preview);

    send_reply(ctx, reply_token, &[fallback_service::create_fallback_message(text)]).await?;
    Ok(STATUS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{context, MemoryLedger, MemoryNotifier};
    use crate::models::ReplyMessage;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_hello_gets_single_help_reply() {
        let ledger = Arc::new(MemoryLedger::default());
        let notifier = Arc::new(MemoryNotifier::default());
        let ctx = context(ledger.clone(), notifier.clone());

        execute(&ctx, "r1", "hello").await.unwrap();

        let replies = notifier.replies.lock().unwrap();
        assert_eq!(replies.len(), 1);
        assert_eq!(replies[0].1, vec![ReplyMessage::text(fallback_service::HELP_TEXT)]);
        assert!(ledger.appended.lock().unwrap().is_empty());
    }
}
