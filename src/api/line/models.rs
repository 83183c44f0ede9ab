use serde::Serialize;

use crate::models::ReplyMessage;

/// LINE accepts at most five messages per reply
pub const MAX_REPLY_MESSAGES: usize = 5;

/// Request body for POST /v2/bot/message/reply
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplyRequest<'a> {
    pub reply_token: &'a str,
    pub messages: &'a [ReplyMessage],
}
