use tracing::info;

use super::{send_reply, CommandError};
use crate::context::BotContext;
use crate::services::qr_service;

pub const STATUS: &str = "PromptPay QR sent";

pub async fn execute(ctx: &BotContext, reply_token: &str, amount: Option<f64>) -> Result<&'static str, CommandError> {
    let reference = qr_service::build_qr_reference(&ctx.promptpay, amount);
    info!("Sending PromptPay QR {}", reference.image_url);

    send_reply(ctx, reply_token, &qr_service::create_qr_messages(&reference)).await?;
    Ok(STATUS)
}
