//! External capabilities the bot talks to
//!
//! The ledger (Airtable) and the notifier (LINE reply API) sit behind traits so
//! commands can run against in-memory fakes in tests. Both clients are built
//! once in `main` and shared through `Arc`.

pub mod airtable;
pub mod error;
pub mod line;

use async_trait::async_trait;
use chrono::NaiveDate;
use chrono_tz::Tz;

use crate::models::{ExpenseRecord, NewExpense, ReplyMessage};

pub use airtable::AirtableClient;
pub use error::ApiError;
pub use line::LineClient;

/// Append-only store of expense records
#[async_trait]
pub trait Ledger: Send + Sync {
    /// Append one expense. The store stamps the record's date.
    async fn append(&self, expense: &NewExpense) -> Result<(), ApiError>;

    /// Every record in the store
    async fn list_all(&self) -> Result<Vec<ExpenseRecord>, ApiError>;

    /// Records dated `day` in `tz`.
    ///
    /// Stores that cannot filter return everything; callers filter again.
    async fn list_for_day(&self, day: NaiveDate, tz: Tz) -> Result<Vec<ExpenseRecord>, ApiError> {
        let _ = (day, tz);
        self.list_all().await
    }
}

/// Sends replies bound to a single-use reply token
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn reply(&self, reply_token: &str, messages: &[ReplyMessage]) -> Result<(), ApiError>;
}
