//! Builder for flex "cards": a bubble with a coloured header, a body and an
//! optional footer.
//!
//! Body and footer accept either plain text, which is wrapped in a default
//! vertical box, or a caller-built box that is inserted as-is. That lets
//! composite cards nest their own layouts while sharing the header styling.

use crate::models::reply::{BoxLayout, FlexBox, FlexContainer, FlexText};
use crate::models::ReplyMessage;

use super::text::truncate_with_ellipsis;

/// Longest alt text the bot sends; LINE itself allows more
pub const MAX_ALT_TEXT_LENGTH: usize = 400;

/// Content of a card region
#[derive(Debug, Clone, PartialEq)]
pub enum CardContent {
    Text(String),
    Box(FlexBox),
}

impl From<&str> for CardContent {
    fn from(text: &str) -> Self {
        CardContent::Text(text.to_string())
    }
}

impl From<String> for CardContent {
    fn from(text: String) -> Self {
        CardContent::Text(text)
    }
}

impl From<FlexBox> for CardContent {
    fn from(b: FlexBox) -> Self {
        CardContent::Box(b)
    }
}

impl CardContent {
    fn into_box(self, text_size: Option<&str>) -> FlexBox {
        match self {
            CardContent::Box(b) => b,
            CardContent::Text(text) => {
                let mut block = FlexText::new(text);
                if let Some(size) = text_size {
                    block = block.size(size);
                }
                FlexBox::new(BoxLayout::Vertical, vec![block.into()])
            }
        }
    }
}

/// Optional overrides for [`build_card`]
#[derive(Debug, Clone, PartialEq)]
pub struct CardStyle {
    pub header_background: String,
    pub header_text_color: String,
    /// Size applied to plain-text bodies
    pub body_text_size: Option<String>,
    pub footer: Option<CardContent>,
    /// Defaults to the title
    pub alt_text: Option<String>,
}

impl Default for CardStyle {
    fn default() -> Self {
        Self {
            header_background: "#000000".to_string(),
            header_text_color: "#FFFFFF".to_string(),
            body_text_size: None,
            footer: None,
            alt_text: None,
        }
    }
}

/// Build a flex message card
pub fn build_card(title: &str, body: impl Into<CardContent>, style: CardStyle) -> ReplyMessage {
    let header = FlexBox::new(
        BoxLayout::Vertical,
        vec![FlexText::new(title).color(style.header_text_color).into()],
    )
    .background_color(style.header_background);

    let body = body.into().into_box(style.body_text_size.as_deref());
    let footer = style.footer.map(|footer| footer.into_box(None));
    let alt_text = style.alt_text.unwrap_or_else(|| title.to_string());

    ReplyMessage::Flex {
        alt_text: truncate_with_ellipsis(&alt_text, MAX_ALT_TEXT_LENGTH),
        contents: FlexContainer::Bubble {
            header: Some(header.into()),
            body: Some(body.into()),
            footer: footer.map(Into::into),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FlexComponent;

    fn bubble(message: &ReplyMessage) -> (&str, &FlexContainer) {
        match message {
            ReplyMessage::Flex { alt_text, contents } => (alt_text.as_str(), contents),
            other => panic!("expected flex message, got {:?}", other),
        }
    }

    #[test]
    fn test_plain_text_card() {
        let card = build_card("Notice", "Something happened", CardStyle::default());
        let (alt_text, contents) = bubble(&card);
        assert_eq!(alt_text, "Notice");

        let FlexContainer::Bubble { header, body, footer } = contents;
        assert_eq!(
            header.as_ref(),
            Some(&FlexComponent::Box(
                FlexBox::new(BoxLayout::Vertical, vec![FlexText::new("Notice").color("#FFFFFF").into()])
                    .background_color("#000000")
            ))
        );
        assert_eq!(
            body.as_ref(),
            Some(&FlexComponent::Box(FlexBox::new(
                BoxLayout::Vertical,
                vec![FlexText::new("Something happened").into()]
            )))
        );
        assert!(footer.is_none());
    }

    #[test]
    fn test_structured_regions_inserted_unchanged() {
        let custom_body = FlexBox::new(
            BoxLayout::Horizontal,
            vec![FlexText::new("left").into(), FlexText::new("right").align_end().into()],
        );
        let custom_footer = FlexBox::new(BoxLayout::Vertical, vec![FlexText::new("foot").into()])
            .background_color("#123456");

        let card = build_card(
            "Title",
            custom_body.clone(),
            CardStyle {
                header_background: "#FF0000".to_string(),
                header_text_color: "#00FF00".to_string(),
                footer: Some(custom_footer.clone().into()),
                ..CardStyle::default()
            },
        );

        let (_, FlexContainer::Bubble { header, body, footer }) = bubble(&card);
        assert_eq!(body.as_ref(), Some(&FlexComponent::Box(custom_body)));
        assert_eq!(footer.as_ref(), Some(&FlexComponent::Box(custom_footer)));

        let json = serde_json::to_value(header).unwrap();
        assert_eq!(json["backgroundColor"], "#FF0000");
        assert_eq!(json["contents"][0]["color"], "#00FF00");
    }

    #[test]
    fn test_body_text_size_applies_to_plain_text() {
        let card = build_card(
            "T",
            "big",
            CardStyle {
                body_text_size: Some("xl".to_string()),
                ..CardStyle::default()
            },
        );
        let json = serde_json::to_value(&card).unwrap();
        assert_eq!(json["contents"]["body"]["contents"][0]["size"], "xl");
    }

    #[test]
    fn test_alt_text_capped() {
        let card = build_card(
            "T",
            "body",
            CardStyle {
                alt_text: Some("x".repeat(1000)),
                ..CardStyle::default()
            },
        );
        let (alt_text, _) = bubble(&card);
        assert_eq!(alt_text.chars().count(), 396);
        assert!(alt_text.chars().count() <= MAX_ALT_TEXT_LENGTH);
    }
}
