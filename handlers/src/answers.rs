//! Intent answers and the AI fallback.

use async_trait::async_trait;
use hookbot_core::{ChatAction, Handler, HandlerResponse, Message, Result};
use intent::{detect_intent, Intent};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use crate::format;
use crate::services::Services;

/// Notes recalled as context for one AI answer.
pub const RECALL_LIMIT: usize = 3;

/// Answers a classified intent. `Intent::None` is left to the next handler.
pub(crate) async fn answer_intent(
    services: &Services,
    message: &Message,
    intent: Intent,
) -> HandlerResponse {
    let intent = match intent {
        Intent::None => return HandlerResponse::Continue,
        Intent::Ai { prompt } => return answer_ai(services, message, &prompt).await,
        other => other,
    };

    let t = services.texts(message).await;
    services.chat_action(message, ChatAction::Typing).await;

    let result = match intent {
        Intent::None | Intent::Ai { .. } => return HandlerResponse::Continue,
        Intent::Weather { city } => {
            let city = match city {
                Some(city) => Some(city),
                None => services.prefs.get_last_place(message.user.id).await,
            };
            let Some(city) = city else {
                return services.reply(message, t.ask_city).await;
            };
            let report = services.lookup.weather(&city).await;
            if report.is_ok() {
                if let Err(e) = services.prefs.set_last_place(message.user.id, &city).await {
                    warn!(error = %e, "Failed to remember last place");
                }
            }
            report.map(|r| format::weather(&r))
        }
        Intent::Rates { from, to } => services
            .lookup
            .rates(&from, &to)
            .await
            .map(|q| format::rate(&q)),
        Intent::News { country, topic } => services
            .lookup
            .news(&country, topic.as_deref())
            .await
            .and_then(|items| {
                anyhow::ensure!(!items.is_empty(), "no headlines");
                Ok(format::headlines(&items))
            }),
        Intent::Holidays { country, year } => services
            .lookup
            .holidays(&country, year)
            .await
            .and_then(|items| {
                anyhow::ensure!(!items.is_empty(), "no holidays");
                Ok(format::holidays(&items))
            }),
        Intent::Wiki { title } => {
            let lang = services.lang(message).await;
            services
                .lookup
                .wiki(&title, lang.code())
                .await
                .map(|s| format::wiki(&s))
        }
    };

    match result {
        Ok(text) => services.reply(message, text).await,
        Err(e) => {
            warn!(chat_id = message.chat.id, error = %e, "Lookup failed");
            services.reply(message, t.unavailable).await
        }
    }
}

/// Asks the LLM with the chat's best-matching notes as context.
pub(crate) async fn answer_ai(
    services: &Services,
    message: &Message,
    prompt: &str,
) -> HandlerResponse {
    let t = services.texts(message).await;
    let Some(llm) = &services.llm else {
        return services.reply(message, t.ai_unavailable).await;
    };
    services.chat_action(message, ChatAction::Typing).await;

    let context: Vec<String> = match services
        .brain
        .recall(message.chat.id, prompt, RECALL_LIMIT)
        .await
    {
        Ok(notes) => notes.into_iter().map(|n| n.text).collect(),
        Err(e) => {
            warn!(error = %e, "Brain recall failed, answering without notes");
            Vec::new()
        }
    };

    match llm.complete(prompt, &context).await {
        Ok(answer) if !answer.trim().is_empty() => services.reply(message, answer).await,
        Ok(_) => services.reply(message, t.unavailable).await,
        Err(e) => {
            warn!(chat_id = message.chat.id, error = %e, "LLM request failed");
            services.reply(message, t.unavailable).await
        }
    }
}

/// Classifies free text and answers lookups.
pub struct IntentHandler {
    services: Arc<Services>,
}

impl IntentHandler {
    pub fn new(services: Arc<Services>) -> Self {
        Self { services }
    }
}

#[async_trait]
impl Handler for IntentHandler {
    #[instrument(skip(self, message))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        if message.content.trim().is_empty() || message.is_command() {
            return Ok(HandlerResponse::Continue);
        }
        let lang = self.services.intent_lang(message).await;
        let intent = detect_intent(&message.content, &lang);
        debug!(intent = intent.name(), "Intent detected");
        if intent == Intent::None {
            return Ok(HandlerResponse::Continue);
        }
        info!(chat_id = message.chat.id, intent = intent.name(), "Answering intent");
        Ok(answer_intent(&self.services, message, intent).await)
    }
}

/// Last handler: any remaining text goes to the LLM, or gets a hint when none is configured.
pub struct AiHandler {
    services: Arc<Services>,
}

impl AiHandler {
    pub fn new(services: Arc<Services>) -> Self {
        Self { services }
    }
}

#[async_trait]
impl Handler for AiHandler {
    #[instrument(skip(self, message))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let prompt = message.content.trim();
        if prompt.is_empty() {
            return Ok(HandlerResponse::Continue);
        }
        Ok(answer_ai(&self.services, message, prompt).await)
    }
}
