use crate::domain::model::{ConversionResult, TokenUsage};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{ConvertError, Result};
use reqwest::Client;
use serde::Deserialize;

pub const GOOGLE_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

const PROMPT_HEADER: &str = "Convert the following text into well-structured Markdown format suitable for GitHub documentation.\n\
Use appropriate headings (#, ##, ###), lists, code blocks, and bold/italic formatting.\n\
Ensure the output is clean and directly usable in a .md file. Do not wrap the whole response in a code fence.";

/// 組合固定指令與原文，原文不做截斷或跳脫
pub fn build_prompt(text: &str) -> String {
    format!("{}\n\nText to convert:\n{}", PROMPT_HEADER, text)
}

pub struct GeminiClient {
    client: Client,
    endpoint: String,
    model: String,
    api_key: String,
    timeout_seconds: Option<u64>,
}

impl GeminiClient {
    pub fn new(
        endpoint: String,
        model: String,
        api_key: String,
        timeout_seconds: Option<u64>,
    ) -> Self {
        Self {
            client: Client::new(),
            endpoint,
            model,
            api_key,
            timeout_seconds,
        }
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Self {
        Self::new(
            config.api_endpoint().to_string(),
            config.model().to_string(),
            config.api_key().to_string(),
            config.timeout_seconds(),
        )
    }

    /// 發送一次 generateContent 請求，回傳模型文字
    pub async fn generate_markdown(&self, text: &str) -> Result<ConversionResult> {
        let prompt = build_prompt(text);

        let body = serde_json::json!({
            "contents": [{
                "role": "user",
                "parts": [{"text": prompt}]
            }]
        });

        let url = format!("{}/models/{}:generateContent", self.endpoint, self.model);

        tracing::debug!("Sending generateContent request to model: {}", self.model);

        let mut request = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&body);

        if let Some(timeout) = self.timeout_seconds {
            request = request.timeout(std::time::Duration::from_secs(timeout));
        }

        let response = request.send().await?;
        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ConvertError::ApiStatusError {
                status: status.as_u16(),
                message,
            });
        }

        // 自行反序列化，schema 不符時回報 SerializationError
        let body_bytes = response.bytes().await?;
        let api_response: GenerateResponse = serde_json::from_slice(&body_bytes)?;

        let mut markdown = String::new();
        if let Some(candidate) = api_response
            .candidates
            .as_ref()
            .and_then(|candidates| candidates.first())
        {
            if let Some(reason) = &candidate.finish_reason {
                tracing::debug!("Candidate finish reason: {}", reason);
            }
            for part in &candidate.content.parts {
                if let Some(text) = &part.text {
                    markdown.push_str(text);
                }
            }
        }

        if markdown.is_empty() {
            return Err(ConvertError::EmptyResponseError);
        }

        let usage = api_response.usage_metadata.map(|u| TokenUsage {
            prompt_tokens: u.prompt_token_count.unwrap_or(0),
            response_tokens: u.candidates_token_count.unwrap_or(0),
            total_tokens: u.total_token_count.unwrap_or(0),
        });

        Ok(ConversionResult { markdown, usage })
    }
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    candidates: Option<Vec<Candidate>>,
    #[serde(rename = "usageMetadata")]
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
    #[serde(rename = "finishReason")]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UsageMetadata {
    #[serde(rename = "promptTokenCount")]
    prompt_token_count: Option<u32>,
    #[serde(rename = "candidatesTokenCount")]
    candidates_token_count: Option<u32>,
    #[serde(rename = "totalTokenCount")]
    total_token_count: Option<u32>,
}
