use std::sync::Arc;

use chrono_tz::Tz;

use crate::api::{Ledger, Notifier};
use crate::config::Config;
use crate::services::qr_service::PromptPaySettings;

/// Everything a command needs, built once at startup
pub struct BotContext {
    pub ledger: Arc<dyn Ledger>,
    pub notifier: Arc<dyn Notifier>,
    pub promptpay: PromptPaySettings,
    pub timezone: Tz,
}

impl BotContext {
    pub fn new(config: &Config, ledger: Arc<dyn Ledger>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            ledger,
            notifier,
            promptpay: config.promptpay.clone(),
            timezone: config.ledger_timezone,
        }
    }
}
