//! Data models for the bot's commands, replies and ledger rows
//!
//! Commands are what an inbound message is classified into, replies are what
//! goes back to LINE, and expense records are what the ledger holds.

pub mod command;
pub mod expense;
pub mod qr;
pub mod reply;
pub mod webhook;

// Re-export commonly used types for convenience
pub use command::{Category, Command};
pub use expense::{ExpenseRecord, ExpenseResult, NewExpense, RecordedAt};
pub use qr::QrReference;
pub use reply::{FlexComponent, ReplyMessage};
pub use webhook::{WebhookBody, WebhookEvent};
