use crate::models::{QrReference, ReplyMessage};
use crate::utils::card::MAX_ALT_TEXT_LENGTH;
use crate::utils::{format_baht, truncate_with_ellipsis};

/// Where PromptPay QR images come from and who they pay
#[derive(Debug, Clone, PartialEq)]
pub struct PromptPaySettings {
    /// Image provider root, e.g. `https://promptpay.io`
    pub provider_url: String,
    /// Phone number or national id registered with PromptPay
    pub payee_id: String,
}

/// Derive the QR image URL and caption. No image is generated locally.
pub fn build_qr_reference(settings: &PromptPaySettings, amount: Option<f64>) -> QrReference {
    let provider = settings.provider_url.trim_end_matches('/');
    let payee_id = &settings.payee_id;

    let (image_url, caption) = match amount {
        Some(amount) => (
            format!("{}/{}/{:.2}.png", provider, payee_id, amount),
            format!("PromptPay QR to {} for {}", payee_id, format_baht(amount)),
        ),
        None => (
            format!("{}/{}.png", provider, payee_id),
            format!("PromptPay QR to {}", payee_id),
        ),
    };

    QrReference {
        image_url,
        caption: truncate_with_ellipsis(&caption, MAX_ALT_TEXT_LENGTH),
    }
}

/// Caption text followed by the QR image
pub fn create_qr_messages(reference: &QrReference) -> Vec<ReplyMessage> {
    vec![
        ReplyMessage::text(reference.caption.clone()),
        ReplyMessage::image(reference.image_url.clone()),
    ]
}
