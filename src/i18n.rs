// ==========================================
// 가맹점 매출 분석 - 국제화 (i18n)
// ==========================================
// rust-i18n 사용, 한국어(기본) / 영어
// rust_i18n::i18n! 매크로는 lib.rs 에서 초기화
// 실행 시 FSI_LOCALE=en 으로 영어 메시지 선택
// ==========================================

use crate::domain::types::EfficiencyBand;
use tracing::warn;

/// 언어 선택 환경 변수
pub const LOCALE_ENV: &str = "FSI_LOCALE";

const SUPPORTED_LOCALES: [&str; 2] = ["ko", "en"];

/// FSI_LOCALE 이 있으면 그 언어로 전환 (없으면 기본 ko 유지)
pub fn init_locale() {
    if let Ok(requested) = std::env::var(LOCALE_ENV) {
        apply_locale(&requested);
    }
}

/// 지원 언어면 전환 후 true
fn apply_locale(requested: &str) -> bool {
    let requested = requested.trim().to_ascii_lowercase();
    if !SUPPORTED_LOCALES.contains(&requested.as_str()) {
        warn!(locale = %requested, "지원하지 않는 언어, 기본값 유지");
        return false;
    }
    rust_i18n::set_locale(&requested);
    true
}

pub fn t(key: &str) -> String {
    rust_i18n::t!(key).to_string()
}

/// 읽지 못한 시트 안내
pub fn sheet_skipped(sheet: &str, reason: &str) -> String {
    rust_i18n::t!("import.sheet_skipped", sheet = sheet, reason = reason).to_string()
}

/// 효율 구간 표시명 (정상/저효율/...)
pub fn efficiency_label(band: EfficiencyBand) -> String {
    t(&format!("efficiency.{}.label", band.key()))
}

/// 효율 구간 점검 안내 문구
pub fn efficiency_guide(band: EfficiencyBand) -> String {
    t(&format!("efficiency.{}.guide", band.key()))
}
