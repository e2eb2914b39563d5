// ==========================================
// 가맹점 매출 분석 - API 계층 에러 타입
// ==========================================
// 요청 파라미터 오류만 에러로 반환한다
// 데이터 품질 문제(빈 결과, 0 나눗셈 등)는 에러가 아님
// ==========================================

use thiserror::Error;

/// API 계층 에러 타입
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("날짜 형식 오류 (YYYY-MM-DD 이어야 함): {0}")]
    InvalidDate(String),

    #[error("종료일이 시작일보다 빠름: start={start}, end={end}")]
    InvalidRange { start: String, end: String },

    #[error("월 형식 오류 (YYYY-MM 이어야 함): {0}")]
    InvalidMonth(String),

    #[error("잘못된 입력: {0}")]
    InvalidInput(String),
}

/// Result 타입 별칭
pub type ApiResult<T> = Result<T, ApiError>;
