//! Inbound LINE webhook models
//!
//! Everything except `events` is optional so that unknown event shapes
//! (follows, stickers, postbacks) still deserialize and can be skipped.

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct WebhookBody {
    #[serde(default)]
    pub events: Vec<WebhookEvent>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookEvent {
    #[serde(rename = "type", default)]
    pub kind: String,
    pub reply_token: Option<String>,
    pub message: Option<EventMessage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventMessage {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub text: Option<String>,
}

impl WebhookEvent {
    /// Reply token and text of a text message event, `None` for anything else
    pub fn text_message(&self) -> Option<(&str, &str)> {
        if self.kind != "message" {
            return None;
        }
        let message = self.message.as_ref()?;
        if matches!(message.kind.as_deref(), Some(kind) if kind != "text") {
            return None;
        }
        Some((self.reply_token.as_deref()?, message.text.as_deref()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_mixed_events() {
        let body: WebhookBody = serde_json::from_str(
            r#"{
                "destination": "U123",
                "events": [
                    { "type": "follow", "replyToken": "r0" },
                    { "type": "message", "replyToken": "r1", "message": { "type": "text", "id": "1", "text": "120t" } },
                    { "type": "message", "replyToken": "r2", "message": { "type": "sticker", "id": "2" } }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(body.events.len(), 3);
        assert_eq!(body.events[0].text_message(), None);
        assert_eq!(body.events[1].text_message(), Some(("r1", "120t")));
        assert_eq!(body.events[2].text_message(), None);
    }

    #[test]
    fn test_event_without_type_is_skipped() {
        let body: WebhookBody = serde_json::from_str(
            r#"{
                "events": [
                    { "replyToken": "r0", "message": { "type": "text", "text": "10t" } },
                    { "type": "message", "replyToken": "r1", "message": { "type": "text", "text": "20f" } }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(body.events[0].text_message(), None);
        assert_eq!(body.events[1].text_message(), Some(("r1", "20f")));
    }

    #[test]
    fn test_missing_events_is_empty_batch() {
        let body: WebhookBody = serde_json::from_str("{}").unwrap();
        assert!(body.events.is_empty());
    }
}
