//! PromptPay QR models

/// Image reference for a PromptPay QR code plus the caption sent with it
#[derive(Debug, Clone, PartialEq)]
pub struct QrReference {
    pub image_url: String,
    pub caption: String,
}
