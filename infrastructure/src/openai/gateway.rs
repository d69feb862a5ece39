//! `/v1/chat/completions` adapter

use super::client::OpenAiClient;
use super::wire::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage};
use async_trait::async_trait;
use rag_application::ports::llm_gateway::{GatewayError, LlmGateway, LlmSession};
use std::sync::Arc;
use tracing::debug;

pub const DEFAULT_CHAT_MODEL: &str = "gpt-3.5-turbo";

/// Chat completion gateway for OpenAI-compatible APIs
pub struct OpenAiLlmGateway {
    client: Arc<OpenAiClient>,
    model: String,
    temperature: f32,
}

impl OpenAiLlmGateway {
    pub fn new(client: Arc<OpenAiClient>, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
            temperature: 0.0,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }
}

#[async_trait]
impl LlmGateway for OpenAiLlmGateway {
    fn model_name(&self) -> &str {
        &self.model
    }

    async fn create_session_with_system_prompt(
        &self,
        system_prompt: &str,
    ) -> Result<Box<dyn LlmSession>, GatewayError> {
        Ok(Box::new(OpenAiSession {
            client: Arc::clone(&self.client),
            model: self.model.clone(),
            temperature: self.temperature,
            system_prompt: system_prompt.to_string(),
        }))
    }
}

/// One system prompt plus single-turn user messages
pub struct OpenAiSession {
    client: Arc<OpenAiClient>,
    model: String,
    temperature: f32,
    system_prompt: String,
}

impl OpenAiSession {
    fn request<'a>(&'a self, content: &'a str) -> ChatCompletionRequest<'a> {
        let mut messages = Vec::with_capacity(2);
        if !self.system_prompt.is_empty() {
            messages.push(ChatMessage {
                role: "system",
                content: &self.system_prompt,
            });
        }
        messages.push(ChatMessage {
            role: "user",
            content,
        });

        ChatCompletionRequest {
            model: &self.model,
            messages,
            temperature: self.temperature,
        }
    }
}

fn first_choice(response: ChatCompletionResponse) -> Result<String, GatewayError> {
    response
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content.unwrap_or_default())
        .ok_or_else(|| GatewayError::InvalidResponse("response has no choices".to_string()))
}

#[async_trait]
impl LlmSession for OpenAiSession {
    fn model(&self) -> &str {
        &self.model
    }

    async fn send(&self, content: &str) -> Result<String, GatewayError> {
        let response: ChatCompletionResponse = self
            .client
            .post("chat/completions", &self.request(content))
            .await?;
        let answer = first_choice(response)?;
        debug!("{} replied with {} chars", self.model, answer.len());
        Ok(answer)
    }
}
