use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use super::types::{CompletionClient, CompletionResult, TokenUsage};
use super::SummarizingError;

/// Sampling temperature for near-deterministic summaries.
pub const SUMMARY_TEMPERATURE: f32 = 0.01;

/// OpenAI-compatible chat-completion client.
pub struct OpenAiClient {
    base_url: String,
    api_key: Option<String>,
    client: reqwest::blocking::Client,
    timeout_secs: u64,
}

impl OpenAiClient {
    pub fn new(
        base_url: &str,
        api_key: Option<String>,
        timeout_secs: u64,
    ) -> Result<Self, SummarizingError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| SummarizingError::HttpClient(e.to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            client,
            timeout_secs,
        })
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

/// Request body for /chat/completions
#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    response_format: ResponseFormat,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

/// Response body from /chat/completions
#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
    usage: TokenUsage,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

fn build_request<'a>(model: &'a str, system: &'a str, prompt: &'a str) -> ChatCompletionRequest<'a> {
    ChatCompletionRequest {
        model,
        response_format: ResponseFormat {
            kind: "json_object",
        },
        messages: [
            ChatMessage {
                role: "system",
                content: system,
            },
            ChatMessage {
                role: "user",
                content: prompt,
            },
        ],
        temperature: SUMMARY_TEMPERATURE,
    }
}

/// Pull the first choice's text out of a decoded response.
fn into_completion(parsed: ChatCompletionResponse) -> Result<CompletionResult, SummarizingError> {
    let text = parsed
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| SummarizingError::MalformedResponse("No choices in response".into()))?
        .message
        .content
        .ok_or_else(|| SummarizingError::MalformedResponse("First choice has no content".into()))?;

    Ok(CompletionResult {
        text,
        usage: parsed.usage,
    })
}

impl CompletionClient for OpenAiClient {
    fn complete(
        &self,
        model: &str,
        system: &str,
        prompt: &str,
    ) -> Result<CompletionResult, SummarizingError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(SummarizingError::MissingApiKey)?;

        let body = build_request(model, system, prompt);

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .map_err(|e| {
                if e.is_connect() {
                    SummarizingError::Connection(self.base_url.clone())
                } else if e.is_timeout() {
                    SummarizingError::HttpClient(format!(
                        "Request timed out after {}s",
                        self.timeout_secs
                    ))
                } else {
                    SummarizingError::HttpClient(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(SummarizingError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatCompletionResponse = response
            .json()
            .map_err(|e| SummarizingError::MalformedResponse(e.to_string()))?;

        into_completion(parsed)
    }
}

/// Mock completion client for testing. Returns a configurable response
/// and records every prompt it is given.
pub struct MockCompletionClient {
    result: CompletionResult,
    calls: Mutex<Vec<(String, String)>>,
}

impl MockCompletionClient {
    pub fn new(text: &str, usage: TokenUsage) -> Self {
        Self {
            result: CompletionResult {
                text: text.to_string(),
                usage,
            },
            calls: Mutex::new(Vec::new()),
        }
    }

    /// `(model, prompt)` for every call made so far.
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }
}

impl CompletionClient for MockCompletionClient {
    fn complete(
        &self,
        model: &str,
        _system: &str,
        prompt: &str,
    ) -> Result<CompletionResult, SummarizingError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((model.to_string(), prompt.to_string()));
        }
        Ok(self.result.clone())
    }
}
