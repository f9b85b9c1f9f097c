use std::fmt;
use std::time::Duration;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;
use hd_core::{Error, Result};
use super::InferenceModel;

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    stream: bool,
}

#[derive(Deserialize)]
struct ChatResponse {
    message: Message,
}

#[derive(Deserialize)]
struct Message {
    content: String,
}

pub struct OllamaModel {
    client: Client,
    chat_url: Url,
    model_name: String,
}

impl OllamaModel {
    pub fn new(base_url: &str, model_name: &str, timeout: Duration) -> Result<Self> {
        let chat_url = Url::parse(base_url)
            .and_then(|url| url.join("/api/chat"))
            .map_err(|e| Error::Config(format!("Invalid Ollama URL '{}': {}", base_url, e)))?;
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            chat_url,
            model_name: model_name.to_string(),
        })
    }

    pub fn chat_url(&self) -> &Url {
        &self.chat_url
    }

    fn request(&self, prompt: &str) -> ChatRequest {
        ChatRequest {
            model: self.model_name.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            stream: false,
        }
    }
}

impl fmt::Debug for OllamaModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OllamaModel")
            .field("client", &"<reqwest::Client>")
            .field("chat_url", &self.chat_url.as_str())
            .field("model_name", &self.model_name)
            .finish()
    }
}

#[async_trait]
impl InferenceModel for OllamaModel {
    fn name(&self) -> &str {
        "Ollama"
    }

    async fn chat(&self, prompt: &str) -> Result<String> {
        tracing::debug!("POST {} ({} prompt chars)", self.chat_url, prompt.len());
        let response = self.client
            .post(self.chat_url.clone())
            .json(&self.request(prompt))
            .send()
            .await?
            .error_for_status()?
            .json::<ChatResponse>()
            .await?;

        Ok(response.message.content)
    }
}
