// ==========================================
// 가맹점 매출 분석 - API 계층
// ==========================================
// 책임: 표시 계층용 조회 인터페이스 (문자열 파라미터 검증 + 엔진 호출)
// ==========================================

pub mod dashboard_api;
pub mod error;

// 핵심 타입 재수출
pub use dashboard_api::{DashboardApi, DashboardQuery, EfficiencyNotice};
pub use error::{ApiError, ApiResult};
