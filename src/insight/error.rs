// ==========================================
// 가맹점 매출 분석 - 인사이트 에러 타입
// ==========================================

use thiserror::Error;

#[derive(Error, Debug)]
pub enum InsightError {
    /// 인증 필요 (접근 비밀번호 등)
    #[error("인사이트 서비스 인증 필요: {0}")]
    Unauthorized(String),

    #[error("인사이트 서비스 호출 실패: {0}")]
    ClientError(String),

    #[error("인사이트 응답 시간 초과: {0}초")]
    Timeout(u64),

    #[error("빈 응답")]
    EmptyResponse,
}

pub type InsightResult<T> = Result<T, InsightError>;
