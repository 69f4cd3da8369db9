//! Request logging around the handler chain.

use async_trait::async_trait;
use hookbot_core::{HandlerResponse, Message, Middleware, Result};
use tracing::{debug, info, instrument};

/// Short label for how routing ended.
fn outcome(response: &HandlerResponse) -> &'static str {
    match response {
        HandlerResponse::Reply(_) => "replied",
        HandlerResponse::Stop => "stopped",
        HandlerResponse::Continue | HandlerResponse::Ignore => "unhandled",
    }
}

/// Logs each inbound message and how routing ended. Message text is never logged, only its length.
pub struct LoggingMiddleware;

#[async_trait]
impl Middleware for LoggingMiddleware {
    #[instrument(skip(self, message))]
    async fn before(&self, message: &Message) -> Result<bool> {
        info!(
            update_id = message.update_id,
            chat_id = message.chat.id,
            user_id = message.user.id,
            message_type = %message.message_type,
            attachment = ?message.attachment.as_ref().map(|a| a.kind),
            content_len = message.content.chars().count(),
            "Update received"
        );
        Ok(true)
    }

    #[instrument(skip(self, message, response))]
    async fn after(&self, message: &Message, response: &HandlerResponse) -> Result<()> {
        let reply_len = match response {
            HandlerResponse::Reply(text) => text.chars().count(),
            _ => 0,
        };
        debug!(
            update_id = message.update_id,
            chat_id = message.chat.id,
            outcome = outcome(response),
            reply_len,
            "Update routed"
        );
        Ok(())
    }
}
