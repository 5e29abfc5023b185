//! Text-generation client: one prompt in, one free-text reply out.
//!
//! The client is an explicit value built from config + stored credentials
//! and passed into the session; nothing here touches global state. Calls
//! are synchronous from the caller's point of view, one at a time, with no
//! retries and no caching.

use reqwest::header::AUTHORIZATION;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::auth::AuthState;
use crate::config::LlmSection;

const ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Anthropic,
    OpenAI,
}

impl Provider {
    fn name(&self) -> &'static str {
        match self {
            Provider::Anthropic => "anthropic",
            Provider::OpenAI => "openai",
        }
    }
}

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("unknown provider `{0}` (expected `anthropic` or `openai`)")]
    UnknownProvider(String),

    #[error("no {provider} credential found; run: compass auth {hint}")]
    MissingCredential {
        provider: &'static str,
        hint: &'static str,
    },

    #[error("create tokio runtime")]
    Runtime(#[source] std::io::Error),

    #[error("{provider} request failed: {source}")]
    Transport {
        provider: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{provider} returned {status}: {body}")]
    Api {
        provider: &'static str,
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("could not parse {provider} response: {source}")]
    BadResponse {
        provider: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{provider} reply contained no text")]
    EmptyReply { provider: &'static str },
}

/// A configured text-generation capability for one provider.
#[derive(Debug, Clone)]
pub struct LlmClient {
    provider: Provider,
    model: String,
    base_url: String,
    temperature: f32,
    max_tokens: u32,
    api_key: String,
}

impl LlmClient {
    /// Resolve a client from the config section and stored credentials.
    pub fn from_settings(llm: &LlmSection, auth: &AuthState) -> Result<Self, LlmError> {
        let provider = match llm.provider.as_str() {
            "anthropic" => Provider::Anthropic,
            "openai" => Provider::OpenAI,
            other => return Err(LlmError::UnknownProvider(other.to_string())),
        };

        let api_key = match provider {
            Provider::Anthropic => {
                auth.anthropic_token
                    .clone()
                    .ok_or(LlmError::MissingCredential {
                        provider: "anthropic",
                        hint: "paste-anthropic-token",
                    })?
            }
            Provider::OpenAI => auth.openai_api_key.clone().ok_or(LlmError::MissingCredential {
                provider: "openai",
                hint: "paste-openai-api-key",
            })?,
        };

        Ok(Self {
            provider,
            model: llm.model.clone(),
            base_url: llm.base_url.trim_end_matches('/').to_string(),
            temperature: llm.temperature,
            max_tokens: llm.max_tokens,
            api_key,
        })
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    /// Send one system+user exchange and return the reply text.
    ///
    /// The CLI runs under #[tokio::main], so we're usually already inside a
    /// runtime; creating a nested runtime and calling block_on would panic.
    /// Inside a runtime: block_in_place + Handle::block_on. Outside: build a
    /// runtime and block_on.
    pub fn generate(&self, system: &str, prompt: &str) -> Result<String, LlmError> {
        if let Ok(handle) = tokio::runtime::Handle::try_current() {
            tokio::task::block_in_place(|| handle.block_on(self.generate_async(system, prompt)))
        } else {
            let rt = tokio::runtime::Runtime::new().map_err(LlmError::Runtime)?;
            rt.block_on(self.generate_async(system, prompt))
        }
    }

    async fn generate_async(&self, system: &str, prompt: &str) -> Result<String, LlmError> {
        match self.provider {
            Provider::Anthropic => self.anthropic_generate(system, prompt).await,
            Provider::OpenAI => self.openai_generate(system, prompt).await,
        }
    }

    async fn anthropic_generate(&self, system: &str, prompt: &str) -> Result<String, LlmError> {
        #[derive(Serialize)]
        struct Msg {
            role: String,
            content: String,
        }

        #[derive(Serialize)]
        struct Req {
            model: String,
            max_tokens: u32,
            temperature: f32,
            system: String,
            messages: Vec<Msg>,
        }

        #[derive(Deserialize)]
        struct Resp {
            content: Vec<ContentBlock>,
        }

        #[derive(Deserialize)]
        struct ContentBlock {
            #[serde(rename = "type")]
            t: String,
            text: Option<String>,
        }

        let provider = self.provider.name();
        let body = Req {
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            system: system.to_string(),
            messages: vec![Msg {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
        };

        let client = reqwest::Client::new();
        let resp = client
            .post(format!("{ANTHROPIC_BASE_URL}/v1/messages"))
            .header("x-api-key", self.api_key.as_str())
            .header("anthropic-version", "2023-06-01")
            .json(&body)
            .send()
            .await
            .map_err(|source| LlmError::Transport { provider, source })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                provider,
                status,
                body,
            });
        }

        let out: Resp = resp
            .json()
            .await
            .map_err(|source| LlmError::BadResponse { provider, source })?;

        let mut s = String::new();
        for b in out.content {
            if b.t == "text" {
                if let Some(t) = b.text {
                    s.push_str(&t);
                }
            }
        }

        let s = s.trim().to_string();
        if s.is_empty() {
            return Err(LlmError::EmptyReply { provider });
        }
        Ok(s)
    }

    async fn openai_generate(&self, system: &str, prompt: &str) -> Result<String, LlmError> {
        #[derive(Serialize)]
        struct Msg {
            role: String,
            content: String,
        }

        #[derive(Serialize)]
        struct Req {
            model: String,
            messages: Vec<Msg>,
            temperature: f32,
            max_tokens: u32,
        }

        #[derive(Deserialize)]
        struct Resp {
            choices: Vec<Choice>,
        }

        #[derive(Deserialize)]
        struct Choice {
            message: MsgOut,
        }

        #[derive(Deserialize)]
        struct MsgOut {
            content: Option<String>,
        }

        let provider = self.provider.name();
        let body = Req {
            model: self.model.clone(),
            messages: vec![
                Msg {
                    role: "system".to_string(),
                    content: system.to_string(),
                },
                Msg {
                    role: "user".to_string(),
                    content: prompt.to_string(),
                },
            ],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        let client = reqwest::Client::new();
        let resp = client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await
            .map_err(|source| LlmError::Transport { provider, source })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                provider,
                status,
                body,
            });
        }

        let out: Resp = resp
            .json()
            .await
            .map_err(|source| LlmError::BadResponse { provider, source })?;

        let content = out
            .choices
            .first()
            .and_then(|c| c.message.content.clone())
            .unwrap_or_default();

        let content = content.trim().to_string();
        if content.is_empty() {
            return Err(LlmError::EmptyReply { provider });
        }
        Ok(content)
    }
}
