//! Webhook dispatch: verify → parse → dedup → extract → route.
//!
//! Every stage ends in a [`DispatchOutcome`]; nothing here returns an error. The HTTP layer
//! acknowledges the delivery whatever the outcome, so Telegram never retries an update because
//! of a failure on our side.

use handler_chain::HandlerChain;
use hookbot_core::{HandlerResponse, ToCoreMessage};
use hookbot_telegram::{TelegramMessageWrapper, Update};
use middleware::{DedupGuard, SecretCandidates, SecretVerifier};
use tracing::{debug, error, info, instrument, warn};

/// How one webhook delivery ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Secret check failed.
    Unauthorized,
    /// Body was not a Telegram update.
    Malformed,
    /// Update id was already processed within the dedup TTL.
    Duplicate,
    /// Update carried no message (callback queries, channel posts and the like).
    NoMessage,
    /// The handler chain ran; holds the response that ended routing.
    Routed(HandlerResponse),
    /// The handler chain returned an error; already logged.
    Failed,
}

pub struct Dispatcher {
    verifier: SecretVerifier,
    dedup: DedupGuard,
    chain: HandlerChain,
}

impl Dispatcher {
    pub fn new(verifier: SecretVerifier, dedup: DedupGuard, chain: HandlerChain) -> Self {
        Self {
            verifier,
            dedup,
            chain,
        }
    }

    pub fn verifier(&self) -> &SecretVerifier {
        &self.verifier
    }

    #[instrument(skip_all, fields(bytes = body.len()))]
    pub async fn dispatch(&self, secrets: &SecretCandidates, body: &[u8]) -> DispatchOutcome {
        if !self.verifier.verify(secrets) {
            warn!("Webhook rejected: secret mismatch");
            return DispatchOutcome::Unauthorized;
        }

        let update: Update = match serde_json::from_slice(body) {
            Ok(update) => update,
            Err(e) => {
                warn!(error = %e, "Webhook body is not a Telegram update");
                return DispatchOutcome::Malformed;
            }
        };

        if self.dedup.seen_recently(update.update_id).await {
            info!(update_id = update.update_id, "Duplicate update skipped");
            return DispatchOutcome::Duplicate;
        }

        let Some(tg_message) = update.message() else {
            debug!(update_id = update.update_id, "Update without message");
            return DispatchOutcome::NoMessage;
        };
        let message = TelegramMessageWrapper::new(update.update_id, tg_message).to_core();

        match self.chain.handle(&message).await {
            Ok(response) => DispatchOutcome::Routed(response),
            Err(e) => {
                error!(
                    update_id = update.update_id,
                    chat_id = message.chat.id,
                    error = %e,
                    "Handler chain failed"
                );
                DispatchOutcome::Failed
            }
        }
    }
}
