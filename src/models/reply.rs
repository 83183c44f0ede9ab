//! Outgoing LINE message models
//!
//! These serialize straight into the `messages` array of the LINE reply API.
//! Only the parts of the flex message schema the bot actually sends are
//! modelled.

use serde::Serialize;

/// One element of a reply
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ReplyMessage {
    Text {
        text: String,
    },
    #[serde(rename_all = "camelCase")]
    Image {
        original_content_url: String,
        preview_image_url: String,
    },
    #[serde(rename_all = "camelCase")]
    Flex {
        alt_text: String,
        contents: FlexContainer,
    },
}

impl ReplyMessage {
    pub fn text(text: impl Into<String>) -> Self {
        ReplyMessage::Text { text: text.into() }
    }

    /// Image reply using the same URL for the full image and its preview
    pub fn image(url: impl Into<String>) -> Self {
        let url = url.into();
        ReplyMessage::Image {
            original_content_url: url.clone(),
            preview_image_url: url,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FlexContainer {
    Bubble {
        #[serde(skip_serializing_if = "Option::is_none")]
        header: Option<FlexComponent>,
        #[serde(skip_serializing_if = "Option::is_none")]
        body: Option<FlexComponent>,
        #[serde(skip_serializing_if = "Option::is_none")]
        footer: Option<FlexComponent>,
    },
}

/// A node inside a flex bubble. Boxes nest arbitrarily.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FlexComponent {
    Box(FlexBox),
    Text(FlexText),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BoxLayout {
    Vertical,
    Horizontal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlexBox {
    pub layout: BoxLayout,
    pub contents: Vec<FlexComponent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
}

impl FlexBox {
    pub fn new(layout: BoxLayout, contents: Vec<FlexComponent>) -> Self {
        Self {
            layout,
            contents,
            background_color: None,
        }
    }

    pub fn background_color(mut self, color: impl Into<String>) -> Self {
        self.background_color = Some(color.into());
        self
    }
}

impl From<FlexBox> for FlexComponent {
    fn from(b: FlexBox) -> Self {
        FlexComponent::Box(b)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlexText {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align: Option<String>,
}

impl FlexText {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            color: None,
            size: None,
            weight: None,
            align: None,
        }
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn size(mut self, size: impl Into<String>) -> Self {
        self.size = Some(size.into());
        self
    }

    pub fn bold(mut self) -> Self {
        self.weight = Some("bold".to_string());
        self
    }

    pub fn align_end(mut self) -> Self {
        self.align = Some("end".to_string());
        self
    }
}

impl From<FlexText> for FlexComponent {
    fn from(t: FlexText) -> Self {
        FlexComponent::Text(t)
    }
}
