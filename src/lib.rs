// ==========================================
// 가맹점 매출 분석 - 핵심 라이브러리
// ==========================================
// 채널별 매출 시트 → 채널 합성 → 기간/그룹/매장 지표
// 엔진은 동기/순수 함수, 비동기는 가져오기와 인사이트 경계만
// ==========================================

// 국제화 초기화
rust_i18n::i18n!("locales", fallback = "ko");

// ==========================================
// 모듈 선언
// ==========================================

// 도메인 계층 - 레코드와 타입
pub mod domain;

// 가져오기 계층 - 채널별 시트
pub mod importer;

// 엔진 계층 - 합성/집계 규칙
pub mod engine;

// 설정 계층
pub mod config;

// API 계층 - 조회 인터페이스
pub mod api;

// 인사이트 경계 - 프롬프트/응답 구분
pub mod insight;

// 로그
pub mod logging;

// 국제화
pub mod i18n;

// ==========================================
// 핵심 타입 재수출
// ==========================================

pub use domain::types::{
    ChannelType, ComparisonMode, EfficiencyBand, GroupBy, RecordOrigin, SynthesisRule,
    TrendGranularity,
};

pub use domain::{FilterSelection, RawSalesRecord, SynthesizedRecord};

pub use engine::{
    ChannelSynthesizer, DateRange, GroupAnalyzer, HolidayDetector, PeriodAggregator,
    StoreReportBuilder, TrendBuilder,
};

pub use importer::{FeedImporter, FeedImporterImpl, MergeReport};

pub use api::{ApiError, DashboardApi, DashboardQuery};

pub use config::AnalyticsConfig;

// ==========================================
// 상수
// ==========================================

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const APP_NAME: &str = "가맹점 매출 분석";
