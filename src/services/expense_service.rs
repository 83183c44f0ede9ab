use chrono::{DateTime, TimeZone, Utc};
use chrono_tz::Tz;
use thiserror::Error;
use tracing::{debug, info};

use crate::api::{ApiError, Ledger};
use crate::models::reply::{BoxLayout, FlexBox, FlexText};
use crate::models::{Category, ExpenseRecord, ExpenseResult, NewExpense, ReplyMessage};
use crate::utils::{build_card, format_baht, CardStyle};

pub const CARD_TITLE: &str = "Expense Tracking";

#[derive(Debug, Error)]
pub enum ExpenseError {
    #[error("failed to read expense history: {0}")]
    LedgerRead(ApiError),
    #[error("failed to record expense: {0}")]
    LedgerWrite(ApiError),
}

/// Record an expense and work out today's running total.
///
/// Today's history is read before the write so the total counts the new entry
/// exactly once. Nothing is written if the read fails. Concurrent requests can
/// still race: each sees the history as it was before its own write.
pub async fn record_expense(
    ledger: &dyn Ledger,
    timezone: Tz,
    category: Category,
    amount: f64,
    now: DateTime<Utc>,
) -> Result<ExpenseResult, ExpenseError> {
    let local_now = now.with_timezone(&timezone);

    let history = ledger
        .list_for_day(local_now.date_naive(), timezone)
        .await
        .map_err(ExpenseError::LedgerRead)?;
    debug!("Loaded {} ledger records for {}", history.len(), local_now.date_naive());

    info!("Recording expense: {} {}", category, amount);
    ledger
        .append(&NewExpense { category, amount })
        .await
        .map_err(ExpenseError::LedgerWrite)?;

    Ok(ExpenseResult {
        category,
        amount,
        daily_total: compute_daily_total(&history, amount, &local_now),
    })
}

/// Sum of today's recorded amounts plus `new_amount`.
///
/// "Today" is the calendar date of `now` in `now`'s timezone. Records without
/// a usable amount or date are skipped.
pub fn compute_daily_total<Z: TimeZone>(records: &[ExpenseRecord], new_amount: f64, now: &DateTime<Z>) -> f64 {
    let today = now.date_naive();
    let timezone = now.timezone();

    let existing: f64 = records
        .iter()
        .filter_map(|record| {
            let amount = record.amount.filter(|a| a.is_finite() && *a >= 0.0)?;
            let recorded_at = record.recorded_at?;
            (recorded_at.local_date(&timezone) == today).then_some(amount)
        })
        .sum();

    existing + new_amount
}

pub fn create_expense_card(result: &ExpenseResult) -> ReplyMessage {
    let amount = format_baht(result.amount);
    let total = format_baht(result.daily_total);

    let body = FlexBox::new(
        BoxLayout::Vertical,
        vec![
            FlexText::new(amount.clone()).bold().size("xl").into(),
            FlexText::new(result.category.as_str()).into(),
            FlexText::new("Recorded").into(),
        ],
    );

    let footer = FlexBox::new(
        BoxLayout::Horizontal,
        vec![
            FlexText::new("Today Usage").color("#FFFFFF").into(),
            FlexText::new(total.clone()).color("#FFFFFF").align_end().into(),
        ],
    )
    .background_color("#000000");

    build_card(
        CARD_TITLE,
        body,
        CardStyle {
            footer: Some(footer.into()),
            alt_text: Some(format!(
                "{}: {} {}, today {}",
                CARD_TITLE, amount, result.category, total
            )),
            ..CardStyle::default()
        },
    )
}
