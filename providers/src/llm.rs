//! Chat completion and image description over an OpenAI-compatible API.

use anyhow::{bail, Result};
use async_openai::config::OpenAIConfig;
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestMessageContentPartImageArgs,
    ChatCompletionRequestMessageContentPartTextArgs, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs, ImageDetail,
    ImageUrlArgs,
};
use async_openai::Client;
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::sync::Arc;
use tracing::{info, instrument};

use crate::config::OpenAiSettings;

/// Plain-text replies only: Telegram shows them without parse mode.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful assistant in a Telegram chat. \
Answer briefly in the user's language. Do not use Markdown or any formatting symbols.";

const DEFAULT_VISION_PROMPT: &str =
    "Describe this image in two or three sentences. Mention any visible text.";

#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Answers `prompt`. `context` holds notes the user taught the bot; they go before the question.
    async fn complete(&self, prompt: &str, context: &[String]) -> Result<String>;

    /// Describes an image given as raw bytes.
    async fn describe_image(&self, image: &[u8], mime: &str, prompt: Option<&str>)
        -> Result<String>;
}

#[derive(Clone)]
pub struct OpenAiLlm {
    client: Arc<Client<OpenAIConfig>>,
    chat_model: String,
    vision_model: String,
    system_prompt: String,
}

impl OpenAiLlm {
    pub fn new(settings: &OpenAiSettings) -> Self {
        let config = OpenAIConfig::new()
            .with_api_key(settings.api_key.clone())
            .with_api_base(settings.base_url.clone());
        Self {
            client: Arc::new(Client::with_config(config)),
            chat_model: settings.chat_model.clone(),
            vision_model: settings.vision_model.clone(),
            system_prompt: settings
                .system_prompt
                .clone()
                .unwrap_or_else(|| DEFAULT_SYSTEM_PROMPT.to_string()),
        }
    }

    fn system_message(&self, context: &[String]) -> Result<ChatCompletionRequestMessage> {
        let mut content = self.system_prompt.clone();
        if !context.is_empty() {
            content.push_str("\n\nNotes the user asked you to remember:\n");
            for note in context {
                content.push_str("- ");
                content.push_str(note);
                content.push('\n');
            }
        }
        Ok(ChatCompletionRequestSystemMessageArgs::default()
            .content(content)
            .build()?
            .into())
    }

    async fn first_choice(
        &self,
        model: &str,
        messages: Vec<ChatCompletionRequestMessage>,
    ) -> Result<String> {
        let request = CreateChatCompletionRequestArgs::default()
            .model(model)
            .messages(messages)
            .build()?;
        let response = self.client.chat().create(request).await?;
        match response.choices.first() {
            Some(choice) => Ok(choice.message.content.clone().unwrap_or_default()),
            None => bail!("No choices in completion response"),
        }
    }
}

#[async_trait]
impl LlmClient for OpenAiLlm {
    #[instrument(skip(self, prompt, context), fields(model = %self.chat_model, notes = context.len()))]
    async fn complete(&self, prompt: &str, context: &[String]) -> Result<String> {
        let messages = vec![
            self.system_message(context)?,
            ChatCompletionRequestUserMessageArgs::default()
                .content(prompt)
                .build()?
                .into(),
        ];
        let reply = self.first_choice(&self.chat_model, messages).await?;
        info!(reply_len = reply.len(), "Completion received");
        Ok(reply)
    }

    #[instrument(skip(self, image, prompt), fields(model = %self.vision_model, bytes = image.len()))]
    async fn describe_image(
        &self,
        image: &[u8],
        mime: &str,
        prompt: Option<&str>,
    ) -> Result<String> {
        let data_url = format!("data:{};base64,{}", mime, STANDARD.encode(image));
        let parts = vec![
            ChatCompletionRequestMessageContentPartTextArgs::default()
                .text(prompt.unwrap_or(DEFAULT_VISION_PROMPT))
                .build()?
                .into(),
            ChatCompletionRequestMessageContentPartImageArgs::default()
                .image_url(
                    ImageUrlArgs::default()
                        .url(data_url)
                        .detail(ImageDetail::Low)
                        .build()?,
                )
                .build()?
                .into(),
        ];
        let messages = vec![ChatCompletionRequestUserMessageArgs::default()
            .content(parts)
            .build()?
            .into()];
        self.first_choice(&self.vision_model, messages).await
    }
}
