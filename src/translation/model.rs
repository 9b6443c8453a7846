use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::TranslateError;

/// 单次用量查询的结果，每次检查重新获取，不做缓存
#[derive(Debug, Clone)]
pub struct UsageSnapshot {
    pub total_tokens: u64,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    /// 用量接口返回的原始报告，对外原样回显
    pub report: Value,
}

impl UsageSnapshot {
    pub fn from_report(report: Value, today: NaiveDate) -> Self {
        let (period_start, period_end) = month_bounds(today);
        let total_tokens = report
            .get("total_tokens")
            .and_then(|tokens| {
                tokens
                    .as_u64()
                    // 小数向上取整，保证 1000.5 也会超过阈值
                    .or_else(|| tokens.as_f64().filter(|t| *t > 0.0).map(|t| t.ceil() as u64))
            })
            .unwrap_or(0);

        Self {
            total_tokens,
            period_start,
            period_end,
            report,
        }
    }
}

/// 当月第一天和最后一天
pub fn month_bounds(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let first = today - Days::new(u64::from(today.day0()));
    let last = first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(today);
    (first, last)
}

/// 用量检查的结论
#[derive(Debug, Clone)]
pub struct Decision {
    pub permitted: bool,
    pub message: String,
    pub usage: Option<UsageSnapshot>,
}

impl Decision {
    pub fn permitted(message: impl Into<String>, usage: UsageSnapshot) -> Self {
        Self {
            permitted: true,
            message: message.into(),
            usage: Some(usage),
        }
    }

    pub fn denied(message: impl Into<String>, usage: Option<UsageSnapshot>) -> Self {
        Self {
            permitted: false,
            message: message.into(),
            usage,
        }
    }
}

/// 接口请求体，字段缺失交给 `TranslationRequest::new` 处理
#[derive(Debug, Deserialize)]
pub struct TranslatePayload {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

/// 经过校验的翻译请求，标题和正文都不为空
#[derive(Debug, Clone)]
pub struct TranslationRequest {
    title: String,
    content: String,
}

impl TranslationRequest {
    pub fn new(title: Option<String>, content: Option<String>) -> Result<Self, TranslateError> {
        match (non_blank(title), non_blank(content)) {
            (Some(title), Some(content)) => Ok(Self { title, content }),
            _ => Err(TranslateError::Validation(
                "제목과 내용이 필요합니다.".to_string(),
            )),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

impl TryFrom<TranslatePayload> for TranslationRequest {
    type Error = TranslateError;

    fn try_from(payload: TranslatePayload) -> Result<Self, Self::Error> {
        Self::new(payload.title, payload.content)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[derive(Debug, Clone)]
pub struct TranslationResult {
    pub title: Option<String>,
    pub content: Option<String>,
    pub usage: UsageSnapshot,
}

/// 翻译接口的成功响应
#[derive(Debug, Serialize)]
pub struct TranslateResponse {
    pub title: Option<String>,
    pub content: Option<String>,
    pub usage: Value,
}

impl From<TranslationResult> for TranslateResponse {
    fn from(result: TranslationResult) -> Self {
        Self {
            title: result.title,
            content: result.content,
            usage: result.usage.report,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UsageQuery {
    pub date: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn month_bounds_handles_leap_february_and_december() {
        assert_eq!(
            month_bounds(date(2024, 2, 17)),
            (date(2024, 2, 1), date(2024, 2, 29))
        );
        assert_eq!(
            month_bounds(date(2025, 12, 31)),
            (date(2025, 12, 1), date(2025, 12, 31))
        );
        assert_eq!(
            month_bounds(date(2025, 4, 1)),
            (date(2025, 4, 1), date(2025, 4, 30))
        );
    }

    #[test]
    fn snapshot_reads_total_tokens() {
        let snapshot = UsageSnapshot::from_report(json!({ "total_tokens": 42 }), date(2025, 3, 9));
        assert_eq!(snapshot.total_tokens, 42);
        assert_eq!(snapshot.period_start, date(2025, 3, 1));
        assert_eq!(snapshot.period_end, date(2025, 3, 31));
        assert_eq!(snapshot.report, json!({ "total_tokens": 42 }));
    }

    #[test]
    fn snapshot_without_token_count_counts_as_zero() {
        let today = date(2025, 3, 9);
        assert_eq!(UsageSnapshot::from_report(json!({}), today).total_tokens, 0);
        assert_eq!(
            UsageSnapshot::from_report(json!({ "total_tokens": "many" }), today).total_tokens,
            0
        );
        assert_eq!(
            UsageSnapshot::from_report(json!({ "total_tokens": -5 }), today).total_tokens,
            0
        );
    }

    #[test]
    fn fractional_token_count_rounds_up() {
        let today = date(2025, 3, 9);
        let snapshot = UsageSnapshot::from_report(json!({ "total_tokens": 1000.5 }), today);
        assert_eq!(snapshot.total_tokens, 1001);
        assert!(snapshot.total_tokens > crate::translation::QUOTA_TOKEN_LIMIT);
        assert_eq!(
            UsageSnapshot::from_report(json!({ "total_tokens": 999.0 }), today).total_tokens,
            999
        );
    }

    #[test]
    fn request_requires_title_and_content() {
        assert!(TranslationRequest::new(Some("안녕".into()), Some("**굵게**".into())).is_ok());

        for (title, content) in [
            (None, Some("본문".to_string())),
            (Some("제목".to_string()), None),
            (Some(String::new()), Some("본문".to_string())),
            (Some("제목".to_string()), Some("   ".to_string())),
        ] {
            let err = TranslationRequest::new(title, content).unwrap_err();
            assert!(matches!(err, TranslateError::Validation(_)));
        }
    }
}
