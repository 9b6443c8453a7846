use thiserror::Error;

use super::model::UsageSnapshot;

/// 翻译流程中的错误
#[derive(Debug, Error)]
pub enum TranslateError {
    /// 凭证缺失，不会发出任何网络请求
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("invalid request: {0}")]
    Validation(String),

    /// 用量检查未通过，`usage` 在用量查询失败时为空
    #[error("quota exceeded: {message}")]
    QuotaExceeded {
        message: String,
        usage: Option<UsageSnapshot>,
    },

    #[error("network error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("upstream returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("failed to parse upstream response: {0}")]
    Parse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_display_includes_status() {
        let err = TranslateError::Api {
            status: 401,
            message: "Incorrect API key provided".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("401"));
        assert!(text.contains("Incorrect API key"));
    }
}
