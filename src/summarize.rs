use crate::config::SummaryConfig;
use crate::sanitize::html_to_text;
use crate::types::{ArchiveError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

const SYSTEM_PROMPT: &str = "You are an assistant that summarizes daily AI news \
issues for technical readers. Respond with 3-6 bullet points of key information, \
followed by one short concluding line. Keep it concise.";

/// Incoming body of a summarize request. All fields are validated before any
/// upstream call is made.
#[derive(Debug, Default, Deserialize)]
pub struct SummarizeRequest {
    pub title: Option<String>,
    pub date: Option<String>,
    pub content: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SummarizeResponse {
    pub summary: String,
}

/// A validated request: trimmed fields, content stripped of HTML and capped.
#[derive(Debug, Clone)]
pub struct SummaryInput {
    pub title: String,
    pub date: String,
    pub content: String,
}

/// Validate and prepare a request, rejecting it before any upstream work.
pub fn prepare_input(request: SummarizeRequest, max_content_chars: usize) -> Result<SummaryInput> {
    let title = request.title.as_deref().unwrap_or("").trim();
    let date = request.date.as_deref().unwrap_or("").trim();
    let content = request.content.as_deref().unwrap_or("").trim();

    if title.is_empty() || date.is_empty() || content.is_empty() {
        return Err(ArchiveError::InvalidInput(
            "Missing title, date, or content.".to_string(),
        ));
    }

    let text = html_to_text(content);
    if text.is_empty() {
        return Err(ArchiveError::InvalidInput(
            "Content is empty after stripping HTML.".to_string(),
        ));
    }

    Ok(SummaryInput {
        title: title.to_string(),
        date: date.to_string(),
        content: text.chars().take(max_content_chars).collect(),
    })
}

/// An upstream that can turn a prepared issue into a short summary.
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, input: &SummaryInput) -> Result<String>;
}

/// Issue exactly one upstream call, bounded by `deadline`.
///
/// When the timer wins the race the in-flight call is dropped, which aborts
/// its underlying request; the caller sees a timeout-class error rather than
/// a generic failure. An empty summary is a server-error-class result.
pub async fn run_summary(
    summarizer: &dyn Summarizer,
    input: &SummaryInput,
    deadline: Duration,
) -> Result<String> {
    match tokio::time::timeout(deadline, summarizer.summarize(input)).await {
        Err(_) => Err(ArchiveError::SummaryTimeout),
        Ok(Err(e)) => Err(e),
        Ok(Ok(summary)) => {
            let summary = summary.trim().to_string();
            if summary.is_empty() {
                Err(ArchiveError::EmptySummary)
            } else {
                Ok(summary)
            }
        }
    }
}

/// Summarizer backed by an OpenAI-compatible chat-completions API.
pub struct OpenAiSummarizer {
    client: Client,
    config: SummaryConfig,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

impl OpenAiSummarizer {
    pub fn new(config: SummaryConfig) -> Result<Self> {
        let client = Client::builder().build()?;
        Ok(Self { client, config })
    }
}

#[async_trait]
impl Summarizer for OpenAiSummarizer {
    async fn summarize(&self, input: &SummaryInput) -> Result<String> {
        let user_message = format!(
            "Title: {}\nDate: {}\nContent:\n{}",
            input.title, input.date, input.content
        );
        let body = ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: &user_message,
                },
            ],
        };

        debug!("Requesting summary for issue: {}", input.title);

        let url = format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'));
        let response = self
            .client
            .post(url)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ArchiveError::SummaryUpstream {
                status: None,
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| status.to_string());
            return Err(ArchiveError::SummaryUpstream {
                status: Some(status.as_u16()),
                message: format!("Summarization error: {}", message),
            });
        }

        let parsed: ChatResponse =
            response
                .json()
                .await
                .map_err(|e| ArchiveError::SummaryUpstream {
                    status: None,
                    message: e.to_string(),
                })?;

        let summary = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default();

        info!("Received summary ({} chars)", summary.len());
        Ok(summary)
    }
}

/// Configurable stand-in for the upstream API, used by the tests.
pub struct MockSummarizer {
    reply: Result<String>,
    delay: Duration,
}

impl MockSummarizer {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Ok(reply.to_string()),
            delay: Duration::ZERO,
        }
    }

    pub fn failing(status: Option<u16>, message: &str) -> Self {
        Self {
            reply: Err(ArchiveError::SummaryUpstream {
                status,
                message: message.to_string(),
            }),
            delay: Duration::ZERO,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[async_trait]
impl Summarizer for MockSummarizer {
    async fn summarize(&self, _input: &SummaryInput) -> Result<String> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        match &self.reply {
            Ok(text) => Ok(text.clone()),
            Err(ArchiveError::SummaryUpstream { status, message }) => {
                Err(ArchiveError::SummaryUpstream {
                    status: *status,
                    message: message.clone(),
                })
            }
            Err(_) => Err(ArchiveError::EmptySummary),
        }
    }
}
