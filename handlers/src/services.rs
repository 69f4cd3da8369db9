//! Everything a handler may touch: the outbound bot, state stores and providers.

use hookbot_core::{texts, Bot, ChatAction, HandlerResponse, Lang, Message, Texts};
use providers::{DriveClient, LlmClient, Lookup, SpeechClient};
use std::sync::Arc;
use storage::{BrainStore, ChecklistStore, KvStore, PhotoMemoryStore, UserPrefsStore};
use tracing::warn;

pub struct Services {
    pub bot: Arc<dyn Bot>,
    pub prefs: UserPrefsStore,
    pub photos: PhotoMemoryStore,
    pub checklist: ChecklistStore,
    pub brain: BrainStore,
    pub lookup: Arc<dyn Lookup>,
    pub llm: Option<Arc<dyn LlmClient>>,
    pub speech: Option<Arc<dyn SpeechClient>>,
    pub drive: Option<Arc<dyn DriveClient>>,
}

impl Services {
    /// Stores are built over the one shared `kv`; optional providers start unset.
    pub fn new(bot: Arc<dyn Bot>, kv: Arc<dyn KvStore>, lookup: Arc<dyn Lookup>) -> Self {
        Self {
            bot,
            prefs: UserPrefsStore::new(kv.clone()),
            photos: PhotoMemoryStore::new(kv.clone()),
            checklist: ChecklistStore::new(kv.clone()),
            brain: BrainStore::new(kv),
            lookup,
            llm: None,
            speech: None,
            drive: None,
        }
    }

    pub fn with_llm(mut self, llm: Arc<dyn LlmClient>) -> Self {
        self.llm = Some(llm);
        self
    }

    pub fn with_speech(mut self, speech: Arc<dyn SpeechClient>) -> Self {
        self.speech = Some(speech);
        self
    }

    pub fn with_drive(mut self, drive: Arc<dyn DriveClient>) -> Self {
        self.drive = Some(drive);
        self
    }

    pub async fn lang(&self, message: &Message) -> Lang {
        self.prefs
            .reply_lang(message.user.id, message.user.language_code.as_deref())
            .await
    }

    pub async fn texts(&self, message: &Message) -> &'static Texts {
        texts(self.lang(message).await)
    }

    /// Language tag for intent detection. Keeps client tags the reply languages do not cover
    /// ("de", "pl") so country defaults still follow them.
    pub async fn intent_lang(&self, message: &Message) -> String {
        match self.prefs.get_lang(message.user.id).await {
            Some(lang) => lang.code().to_string(),
            None => message
                .user
                .language_code
                .clone()
                .unwrap_or_else(|| Lang::default().code().to_string()),
        }
    }

    /// Sends `text` to the message's chat. A failed send is logged, never returned: the
    /// update has been handled either way.
    pub async fn reply(&self, message: &Message, text: impl Into<String>) -> HandlerResponse {
        let text = text.into();
        if let Err(e) = self.bot.reply_to(message, &text).await {
            warn!(chat_id = message.chat.id, error = %e, "Failed to send reply");
        }
        HandlerResponse::Reply(text)
    }

    /// Shows a typing/upload indicator. Failures only cost the indicator.
    pub async fn chat_action(&self, message: &Message, action: ChatAction) {
        if let Err(e) = self.bot.send_chat_action(&message.chat, action).await {
            warn!(chat_id = message.chat.id, action = ?action, error = %e, "Failed to send chat action");
        }
    }
}
