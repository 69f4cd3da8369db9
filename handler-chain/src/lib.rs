//! # Handler chain
//!
//! Routes one message through middleware and handlers. Middleware `before` runs in order and may
//! veto; handlers run in order until one answers `Stop` or `Reply`; middleware `after` then runs
//! in reverse for every middleware whose `before` ran.

use hookbot_core::{Handler, HandlerResponse, Message, Middleware, Result};
use std::sync::Arc;
use tracing::{debug, info, instrument};

#[derive(Clone, Default)]
pub struct HandlerChain {
    middleware: Vec<Arc<dyn Middleware>>,
    handlers: Vec<Arc<dyn Handler>>,
}

impl HandlerChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_middleware(mut self, middleware: Arc<dyn Middleware>) -> Self {
        self.middleware.push(middleware);
        self
    }

    pub fn add_handler(mut self, handler: Arc<dyn Handler>) -> Self {
        self.handlers.push(handler);
        self
    }

    pub fn len(&self) -> usize {
        self.middleware.len() + self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the response that ended routing: `Stop` when a middleware vetoed, the first
    /// handler `Stop`/`Reply`, or `Continue` when no handler claimed the message.
    #[instrument(skip(self, message), fields(update_id = message.update_id, chat_id = message.chat.id))]
    pub async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let mut passed = 0;
        let mut final_response = HandlerResponse::Continue;

        for (index, mw) in self.middleware.iter().enumerate() {
            passed += 1;
            if !mw.before(message).await? {
                info!(middleware = index, "Chain stopped by middleware");
                final_response = HandlerResponse::Stop;
                break;
            }
        }

        if final_response == HandlerResponse::Continue {
            for (index, handler) in self.handlers.iter().enumerate() {
                if !handler.before(message).await? {
                    info!(handler = index, "Chain stopped by handler before()");
                    final_response = HandlerResponse::Stop;
                    break;
                }
                let response = handler.handle(message).await?;
                debug!(handler = index, response = ?response, "Handler done");
                if matches!(response, HandlerResponse::Stop | HandlerResponse::Reply(_)) {
                    info!(handler = index, "Message handled");
                    final_response = response;
                    break;
                }
            }
        }

        for handler in self.handlers.iter().rev() {
            handler.after(message, &final_response).await?;
        }
        for mw in self.middleware[..passed].iter().rev() {
            mw.after(message, &final_response).await?;
        }

        Ok(final_response)
    }
}
