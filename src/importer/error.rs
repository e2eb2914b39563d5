// ==========================================
// 가맹점 매출 분석 - 가져오기 모듈 에러 타입
// ==========================================
// 시트 단위 실패만 에러로 다룬다
// 셀 단위 문제(숫자/날짜 형식)는 에러가 아니라 0 처리 또는 조용히 제외
// ==========================================

use thiserror::Error;

/// 가져오기 모듈 에러 타입
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 파일 관련 =====
    #[error("파일이 존재하지 않음: {0}")]
    FileNotFound(String),

    #[error("지원하지 않는 파일 형식: {0} (.xlsx/.xls/.csv 만 지원)")]
    UnsupportedFormat(String),

    #[error("파일 읽기 실패: {0}")]
    FileReadError(String),

    #[error("Excel 파싱 실패: {0}")]
    ExcelParseError(String),

    #[error("CSV 파싱 실패: {0}")]
    CsvParseError(String),

    // ===== 시트 구조 =====
    #[error("시트에 데이터 행이 없음: {0}")]
    EmptySheet(String),

    #[error("시트명에서 채널을 확인할 수 없음: {0}")]
    InvalidSheetName(String),

    #[error("피드 디렉터리가 아님: {0}")]
    NotADirectory(String),

    // ===== 실행 =====
    /// 파싱 작업 스레드가 비정상 종료
    #[error("시트 파싱 작업 실패: {0}")]
    WorkerFailed(String),
}

impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

impl From<calamine::Error> for ImportError {
    fn from(err: calamine::Error) -> Self {
        ImportError::ExcelParseError(err.to_string())
    }
}

impl From<calamine::XlsxError> for ImportError {
    fn from(err: calamine::XlsxError) -> Self {
        ImportError::ExcelParseError(err.to_string())
    }
}

/// Result 타입 별칭
pub type ImportResult<T> = Result<T, ImportError>;
