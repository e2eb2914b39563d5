// ==========================================
// 가맹점 매출 분석 - 인사이트 클라이언트
// ==========================================
// InsightClient: 외부 텍스트 생성 서비스 경계 (전송 방식은 구현체 몫)
// InsightService: 시간 제한 + 실패 시 안내 문구로 대체 (호출자에게 에러를 넘기지 않음)
// ==========================================

use crate::config::AnalyticsConfig;
use crate::engine::store_report::StoreMonthlyReport;
use crate::i18n;
use crate::insight::error::{InsightError, InsightResult};
use crate::insight::prompt::{build_store_prompt, parse_sections, InsightSections};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{info, instrument, warn};

// ==========================================
// InsightClient Trait
// ==========================================
#[async_trait]
pub trait InsightClient: Send + Sync {
    /// 프롬프트 → 응답 텍스트
    async fn complete(&self, model: &str, prompt: &str) -> InsightResult<String>;
}

// ==========================================
// InsightService
// ==========================================
pub struct InsightService<C: InsightClient> {
    client: C,
    model: String,
    timeout: Duration,
}

impl<C: InsightClient> InsightService<C> {
    pub fn new(client: C, config: &AnalyticsConfig) -> Self {
        Self {
            client,
            model: config.insight_model.clone(),
            timeout: Duration::from_secs(config.insight_timeout_secs),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// 응답 원문 (시간 제한 적용)
    pub async fn request(&self, prompt: &str) -> InsightResult<String> {
        let call = self.client.complete(&self.model, prompt);
        let text = match tokio::time::timeout(self.timeout, call).await {
            Ok(result) => result?,
            Err(_) => return Err(InsightError::Timeout(self.timeout.as_secs())),
        };
        if text.trim().is_empty() {
            return Err(InsightError::EmptyResponse);
        }
        Ok(text)
    }

    /// 매장 월간 리포트 인사이트
    ///
    /// 실패/시간 초과 시에도 안내 문구가 담긴 결과를 돌려준다.
    #[instrument(skip(self, report), fields(month = %report.month, stores = report.stores.len()))]
    pub async fn store_insight(&self, report: &StoreMonthlyReport) -> InsightSections {
        let prompt = build_store_prompt(report);
        match self.request(&prompt).await {
            Ok(text) => {
                info!(chars = text.chars().count(), "인사이트 응답 수신");
                parse_sections(&text)
            }
            Err(InsightError::Unauthorized(reason)) => {
                warn!(reason = %reason, "인사이트 인증 실패");
                InsightSections::failed(i18n::t("insight.unauthorized"))
            }
            Err(e) => {
                warn!(error = %e, "인사이트 요청 실패");
                InsightSections::failed(i18n::t("insight.failed"))
            }
        }
    }
}
