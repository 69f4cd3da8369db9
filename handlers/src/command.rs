//! Slash commands.

use async_trait::async_trait;
use hookbot_core::{texts, ChatAction, Handler, HandlerResponse, Lang, Message, Result, Texts};
use intent::Intent;
use std::sync::Arc;
use storage::StorageError;
use tracing::{info, instrument, warn};

use crate::answers::{answer_ai, answer_intent};
use crate::format;
use crate::services::Services;

/// Splits `/name@bot args` into `("name", "args")`. The name is lowercased; `None` for non-commands.
pub fn parse_command(text: &str) -> Option<(String, &str)> {
    let text = text.trim_start();
    let rest = text.strip_prefix('/')?;
    let (head, args) = match rest.find(char::is_whitespace) {
        Some(i) => (&rest[..i], rest[i..].trim()),
        None => (rest, ""),
    };
    let name = head.split('@').next().unwrap_or_default().to_lowercase();
    if name.is_empty() {
        return None;
    }
    Some((name, args))
}

/// `on`/`off` argument; a bare command means `on`.
fn parse_switch(args: &str) -> Option<bool> {
    match args.to_ascii_lowercase().as_str() {
        "" | "on" | "1" | "true" | "yes" => Some(true),
        "off" | "0" | "false" | "no" => Some(false),
        _ => None,
    }
}

pub struct CommandHandler {
    services: Arc<Services>,
}

impl CommandHandler {
    pub fn new(services: Arc<Services>) -> Self {
        Self { services }
    }

    /// Commands whose reply is a single text built from store reads and writes.
    async fn run_store_command(
        &self,
        message: &Message,
        name: &str,
        args: &str,
        t: &'static Texts,
    ) -> std::result::Result<Option<String>, StorageError> {
        let s = &self.services;
        let user_id = message.user.id;
        let chat_id = message.chat.id;

        let text = match name {
            "start" => t.greeting.to_string(),
            "help" => t.help.to_string(),
            "lang" => match Lang::parse(args) {
                Some(lang) => {
                    s.prefs.set_lang(user_id, lang).await?;
                    texts(lang).lang_set.to_string()
                }
                None => t.lang_usage.to_string(),
            },
            "drive" => match parse_switch(args) {
                Some(true) if s.drive.is_none() => t.drive_not_connected.to_string(),
                Some(on) => {
                    s.prefs.set_drive_mode(user_id, on).await?;
                    (if on { t.drive_on } else { t.drive_off }).to_string()
                }
                None => t.help.to_string(),
            },
            "learn" => match parse_switch(args) {
                Some(on) => {
                    s.prefs.set_learn_mode(user_id, on).await?;
                    (if on { t.learn_on } else { t.learn_off }).to_string()
                }
                None => t.help.to_string(),
            },
            "autolog" => match parse_switch(args) {
                Some(on) => {
                    s.prefs.set_autolog(user_id, on).await?;
                    (if on { t.autolog_on } else { t.autolog_off }).to_string()
                }
                None => t.help.to_string(),
            },
            "todo" if args.is_empty() => s.checklist.to_markdown(chat_id).await?,
            "todo" => {
                let item = s.checklist.add_item(chat_id, args, user_id).await?;
                format!("{} #{} {}", t.todo_added, item.id, item.text)
            }
            "done" | "rm" => {
                let Ok(id) = args.trim_start_matches('#').parse::<i64>() else {
                    return Ok(Some(t.todo_usage.to_string()));
                };
                let found = if name == "done" {
                    s.checklist.mark_done(chat_id, id).await?.is_some()
                } else {
                    s.checklist.remove_item(chat_id, id).await?
                };
                if !found {
                    return Ok(Some(t.todo_not_found.to_string()));
                }
                let header = if name == "done" { t.todo_toggled } else { t.todo_removed };
                format!("{}\n\n{}", header, s.checklist.to_markdown(chat_id).await?)
            }
            "clear_todo" => {
                s.checklist.clear(chat_id).await?;
                t.todo_cleared.to_string()
            }
            "photos" => {
                let entries = s.photos.load(user_id).await;
                if entries.is_empty() {
                    t.photos_empty.to_string()
                } else {
                    format::photos(&entries)
                }
            }
            "forget_photos" => {
                s.photos.clear(user_id).await?;
                t.photos_cleared.to_string()
            }
            "brain" => {
                let notes = s.brain.list(chat_id).await?;
                if notes.is_empty() {
                    t.brain_empty.to_string()
                } else {
                    format::brain(t.brain_count, &notes)
                }
            }
            "forget_brain" => {
                s.brain.forget_all(chat_id).await?;
                t.brain_cleared.to_string()
            }
            _ => return Ok(None),
        };
        Ok(Some(text))
    }

    async fn say(&self, message: &Message, text: &str, t: &'static Texts) -> HandlerResponse {
        let s = &self.services;
        if text.is_empty() {
            return s.reply(message, t.say_usage).await;
        }
        let Some(speech) = &s.speech else {
            return s.reply(message, t.unavailable).await;
        };
        s.chat_action(message, ChatAction::RecordVoice).await;
        let audio = match speech.synthesize(text).await {
            Ok(audio) => audio,
            Err(e) => {
                warn!(error = %e, "Speech synthesis failed");
                return s.reply(message, t.unavailable).await;
            }
        };
        if let Err(e) = s.bot.send_voice(&message.chat, audio, None).await {
            warn!(error = %e, "Failed to send voice");
        }
        HandlerResponse::Stop
    }
}

#[async_trait]
impl Handler for CommandHandler {
    #[instrument(skip(self, message))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let Some((name, args)) = parse_command(&message.content) else {
            return Ok(HandlerResponse::Continue);
        };
        info!(chat_id = message.chat.id, command = %name, "Command received");
        let s = &self.services;
        let t = s.texts(message).await;

        let response = match name.as_str() {
            "ai" if args.is_empty() => s.reply(message, t.help).await,
            "ai" => answer_ai(s, message, args).await,
            "say" => self.say(message, args, t).await,
            "weather" => {
                let city = (!args.is_empty()).then(|| args.to_string());
                answer_intent(s, message, Intent::Weather { city }).await
            }
            _ => match self.run_store_command(message, &name, args, t).await {
                Ok(Some(text)) => s.reply(message, text).await,
                Ok(None) => s.reply(message, t.unknown_command).await,
                Err(e) => {
                    warn!(command = %name, error = %e, "Command failed on the state store");
                    s.reply(message, t.unavailable).await
                }
            },
        };
        Ok(response)
    }
}
