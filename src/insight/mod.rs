// ==========================================
// 가맹점 매출 분석 - 인사이트 계층
// ==========================================
// 책임: 리포트 → 프롬프트, 응답 → 구분자별 섹션
// 전송(HTTP 등)은 InsightClient 구현체가 담당
// ==========================================

pub mod error;
pub mod insight_client;
pub mod prompt;

pub use error::{InsightError, InsightResult};
pub use insight_client::{InsightClient, InsightService};
pub use prompt::{build_share_text, build_store_prompt, parse_sections, InsightSections};
