// ==========================================
// 가맹점 매출 분석 - 분석 설정
// ==========================================
// 저장: JSON 파일 (선택), 없으면 기본값
// 효율 구간 기준값은 품질 관리 규칙이므로 설정 대상이 아님
// ==========================================

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

// ==========================================
// 설정 키 / 환경 변수
// ==========================================
pub mod config_keys {
    /// 설정 파일 경로를 지정하는 환경 변수
    pub const CONFIG_PATH_ENV: &str = "FSI_CONFIG";
    /// 기본 설정 디렉터리명 (dirs::config_dir 하위)
    pub const CONFIG_DIR_NAME: &str = "franchise-sales-insight";
    /// 기본 설정 파일명
    pub const CONFIG_FILE_NAME: &str = "config.json";
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("설정 파일 읽기 실패 ({path}): {message}")]
    ReadError { path: String, message: String },

    #[error("설정 파일 형식 오류 ({path}): {message}")]
    ParseError { path: String, message: String },
}

// ==========================================
// SheetLayout - 가로형 시트 열 배치
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetLayout {
    pub manager_column: usize,
    pub region_column: usize,
    pub store_column: usize,
    /// 이 열부터 날짜 열
    pub first_date_column: usize,
}

impl Default for SheetLayout {
    fn default() -> Self {
        Self {
            manager_column: 1,
            region_column: 2,
            store_column: 3,
            first_date_column: 4,
        }
    }
}

// ==========================================
// AnalyticsConfig - 분석 설정 전체
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// 건수 시트 표식 (시트명에 포함되면 건수 시트)
    pub count_sheet_marker: String,
    /// 건너뛸 담당자 라벨 (헤더 반복행, 미지정)
    pub placeholder_managers: Vec<String>,
    /// 건너뛸 매장 라벨
    pub placeholder_stores: Vec<String>,
    /// 지역 누락 시 기본값
    pub default_region: String,
    pub sheet_layout: SheetLayout,
    /// 이 절대값(%) 미만 성장률은 보합 처리
    pub flat_growth_threshold_pct: f64,
    /// 조회 기간이 이 일수 이하이면 일별 추이
    pub trend_daily_max_days: i64,
    /// 조회 기간이 이 일수 이하이면 주별 추이 (초과 시 월별)
    pub trend_weekly_max_days: i64,
    /// 외부 인사이트 호출 제한 시간 (초)
    pub insight_timeout_secs: u64,
    /// 외부 인사이트 모델명
    pub insight_model: String,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            count_sheet_marker: "건수".to_string(),
            placeholder_managers: vec!["담당자명".to_string(), "미지정".to_string()],
            placeholder_stores: vec!["가맹점명".to_string()],
            default_region: "미지정".to_string(),
            sheet_layout: SheetLayout::default(),
            flat_growth_threshold_pct: 0.1,
            trend_daily_max_days: 31,
            trend_weekly_max_days: 180,
            insight_timeout_secs: 60,
            insight_model: "gemini-1.5-flash".to_string(),
        }
    }
}

impl AnalyticsConfig {
    /// JSON 파일에서 로드 (누락 필드는 기본값)
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_json_str(&raw).map_err(|e| match e {
            ConfigError::ParseError { message, .. } => ConfigError::ParseError {
                path: path.display().to_string(),
                message,
            },
            other => other,
        })
    }

    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(raw).map_err(|e| ConfigError::ParseError {
            path: "<inline>".to_string(),
            message: e.to_string(),
        })
    }

    /// 설정 로드
    ///
    /// 우선순위: 명시 경로 → FSI_CONFIG → 사용자 설정 디렉터리 → 기본값
    /// 명시 경로나 환경 변수 경로가 잘못된 경우에만 에러를 반환한다.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit_path {
            return Self::from_json_file(path);
        }

        if let Ok(env_path) = std::env::var(config_keys::CONFIG_PATH_ENV) {
            let env_path = env_path.trim();
            if !env_path.is_empty() {
                return Self::from_json_file(Path::new(env_path));
            }
        }

        match default_config_path() {
            Some(path) if path.exists() => {
                tracing::info!(path = %path.display(), "사용자 설정 파일 로드");
                Self::from_json_file(&path)
            }
            _ => {
                tracing::debug!("설정 파일 없음, 기본값 사용");
                Ok(Self::default())
            }
        }
    }

    pub fn is_placeholder_manager(&self, value: &str) -> bool {
        self.placeholder_managers.iter().any(|p| p == value)
    }

    pub fn is_placeholder_store(&self, value: &str) -> bool {
        self.placeholder_stores.iter().any(|p| p == value)
    }
}

/// 기본 설정 파일 경로
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| {
        dir.join(config_keys::CONFIG_DIR_NAME)
            .join(config_keys::CONFIG_FILE_NAME)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = AnalyticsConfig::default();
        assert_eq!(config.count_sheet_marker, "건수");
        assert!(config.is_placeholder_manager("담당자명"));
        assert!(config.is_placeholder_manager("미지정"));
        assert!(config.is_placeholder_store("가맹점명"));
        assert_eq!(config.sheet_layout.first_date_column, 4);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config =
            AnalyticsConfig::from_json_str(r#"{"count_sheet_marker": "count", "sheet_layout": {"store_column": 0}}"#)
                .unwrap();
        assert_eq!(config.count_sheet_marker, "count");
        assert_eq!(config.sheet_layout.store_column, 0);
        assert_eq!(config.sheet_layout.manager_column, 1);
        assert_eq!(config.default_region, "미지정");
    }

    #[test]
    fn test_load_explicit_path() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"insight_timeout_secs": 5}}"#).unwrap();

        let config = AnalyticsConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.insight_timeout_secs, 5);
    }

    #[test]
    fn test_invalid_json_is_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "not json").unwrap();

        let result = AnalyticsConfig::from_json_file(file.path());
        assert!(matches!(result, Err(ConfigError::ParseError { .. })));
    }
}
