use reqwest::Client;
use serde_json::Value;
use tracing::{info, warn};

use super::client::OpenAiClient;
use super::error::TranslateError;
use super::guard::UsageGuard;
use super::model::{Decision, TranslationRequest, TranslationResult};
use crate::config::Config;

/// 韩译英调用方，先过用量守卫再请求模型
#[derive(Debug, Clone)]
pub struct Translator {
    client: OpenAiClient,
    guard: UsageGuard,
}

impl Translator {
    pub fn new(client: OpenAiClient) -> Self {
        Self {
            guard: UsageGuard::new(client.clone()),
            client,
        }
    }

    pub fn from_config(http: Client, config: &Config) -> Result<Self, TranslateError> {
        OpenAiClient::from_config(http, config).map(Self::new)
    }

    pub async fn translate(
        &self,
        request: TranslationRequest,
    ) -> Result<TranslationResult, TranslateError> {
        let usage = match self.guard.check().await {
            Decision {
                permitted: true,
                usage: Some(usage),
                ..
            } => usage,
            Decision { message, usage, .. } => {
                return Err(TranslateError::QuotaExceeded { message, usage });
            }
        };

        let prompt = build_prompt(&request);
        let reply = self.client.complete_json(&prompt).await?;
        let (title, content) = parse_reply(reply.as_deref());

        info!(
            "Translated post with {} (usage {} tokens)",
            self.client.model(),
            usage.total_tokens
        );

        Ok(TranslationResult {
            title,
            content,
            usage,
        })
    }
}

pub(crate) fn build_prompt(request: &TranslationRequest) -> String {
    format!(
        "\nPlease translate the following Korean blog post to English.\n\
         Keep the markdown formatting intact.\n\
         Maintain the same tone and style of writing.\n\
         \n\
         Title: {}\n\
         \n\
         Content:\n\
         {}\n\
         \n\
         Translate to English maintaining all markdown formatting.\n\
         Return in JSON format with \"title\" and \"content\" fields.\n",
        request.title(),
        request.content()
    )
}

/// 回复不是合法 JSON 时两个字段都留空，不报错
pub(crate) fn parse_reply(reply: Option<&str>) -> (Option<String>, Option<String>) {
    let value = match serde_json::from_str::<Value>(reply.unwrap_or("{}")) {
        Ok(value) => value,
        Err(e) => {
            warn!("Model reply is not valid JSON, returning empty translation: {}", e);
            Value::Null
        }
    };

    let field = |name: &str| value.get(name).and_then(Value::as_str).map(str::to_string);
    (field("title"), field("content"))
}
