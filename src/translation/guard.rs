use chrono::{NaiveDate, Utc};
use tracing::{error, info};

use super::client::OpenAiClient;
use super::model::{Decision, UsageSnapshot};

/// 超过该 token 数即拒绝翻译
pub const QUOTA_TOKEN_LIMIT: u64 = 1000;

const PERMITTED_MESSAGE: &str = "번역 가능합니다.";
const LIMIT_REACHED_MESSAGE: &str =
    "OpenAI API 사용 한도에 도달했습니다. 나중에 다시 시도해주세요.";
const LOOKUP_FAILED_MESSAGE: &str = "OpenAI 사용량 조회 중 오류가 발생했습니다.";

/// 用量守卫，每次检查都重新查询远端用量，不预留额度
#[derive(Debug, Clone)]
pub struct UsageGuard {
    client: OpenAiClient,
    limit: u64,
}

impl UsageGuard {
    pub fn new(client: OpenAiClient) -> Self {
        Self {
            client,
            limit: QUOTA_TOKEN_LIMIT,
        }
    }

    pub async fn check(&self) -> Decision {
        self.check_on(Utc::now().date_naive()).await
    }

    /// 查询失败一律视为拒绝
    pub async fn check_on(&self, today: NaiveDate) -> Decision {
        let report = match self.client.usage(Some(today)).await {
            Ok(report) => report,
            Err(e) => {
                error!("OpenAI usage lookup failed: {}", e);
                return Decision::denied(LOOKUP_FAILED_MESSAGE, None);
            }
        };

        let snapshot = UsageSnapshot::from_report(report, today);
        if snapshot.total_tokens > self.limit {
            info!(
                "Translation quota reached: {} > {} tokens ({} ~ {})",
                snapshot.total_tokens, self.limit, snapshot.period_start, snapshot.period_end
            );
            return Decision::denied(LIMIT_REACHED_MESSAGE, Some(snapshot));
        }

        Decision::permitted(PERMITTED_MESSAGE, snapshot)
    }
}
