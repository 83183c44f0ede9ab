use chrono::Utc;
use tracing::info;

use super::{send_reply, CommandError};
use crate::context::BotContext;
use crate::models::Category;
use crate::services::expense_service;

pub const STATUS: &str = "Expense recorded";

/// Record the expense, then reply with the card.
///
/// A ledger failure returns before anything is sent, so the user gets no reply
/// for that message.
pub async fn execute(
    ctx: &BotContext,
    reply_token: &str,
    category: Category,
    amount: f64,
) -> Result<&'static str, CommandError> {
    let result = expense_service::record_expense(ctx.ledger.as_ref(), ctx.timezone, category, amount, Utc::now()).await?;
    info!("Today's usage is now {:.2}", result.daily_total);

    send_reply(ctx, reply_token, &[expense_service::create_expense_card(&result)]).await?;
    Ok(STATUS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{context, MemoryLedger, MemoryNotifier};
    use crate::models::{ExpenseRecord, NewExpense};
    use crate::services::expense_service::ExpenseError;
    use chrono::Duration;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_records_and_replies_with_total() {
        let now = Utc::now();
        let ledger = Arc::new(MemoryLedger::default());
        ledger.history.lock().unwrap().extend([
            ExpenseRecord {
                category: Some("food".to_string()),
                amount: Some(10.0),
                recorded_at: Some(now.into()),
            },
            ExpenseRecord {
                category: Some("food".to_string()),
                amount: Some(5.0),
                recorded_at: Some((now - Duration::days(2)).into()),
            },
        ]);
        let notifier = Arc::new(MemoryNotifier::default());
        let ctx = context(ledger.clone(), notifier.clone());

        let status = execute(&ctx, "r1", Category::Transportation, 120.5).await.unwrap();
        assert_eq!(status, STATUS);

        assert_eq!(
            *ledger.appended.lock().unwrap(),
            vec![NewExpense {
                category: Category::Transportation,
                amount: 120.5
            }]
        );

        let replies = notifier.replies.lock().unwrap();
        assert_eq!(replies.len(), 1);
        let json = serde_json::to_value(&replies[0].1).unwrap();
        assert_eq!(json[0]["contents"]["body"]["contents"][0]["text"], "฿120.50");
        assert_eq!(json[0]["contents"]["body"]["contents"][1]["text"], "transportation");
        assert_eq!(json[0]["contents"]["footer"]["contents"][1]["text"], "฿130.50");
    }

    #[tokio::test]
    async fn test_ledger_failure_sends_no_reply() {
        let ledger = Arc::new(MemoryLedger {
            fail_append: true,
            ..MemoryLedger::default()
        });
        let notifier = Arc::new(MemoryNotifier::default());
        let ctx = context(ledger, notifier.clone());

        let err = execute(&ctx, "r1", Category::Food, 50.0).await.unwrap_err();
        assert!(matches!(err, CommandError::Expense(ExpenseError::LedgerWrite(_))));
        assert!(notifier.replies.lock().unwrap().is_empty());
    }
}
