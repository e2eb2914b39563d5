// ==========================================
// 가맹점 매출 분석 - 설정 계층
// ==========================================
// 책임: 시트 배치/라벨/추이 기준 등 분석 설정 로드
// 저장: JSON 파일 (영속 저장소 없음)
// ==========================================

pub mod analytics_config;

pub use analytics_config::{
    config_keys, default_config_path, AnalyticsConfig, ConfigError, SheetLayout,
};
