// ==========================================
// 가맹점 매출 분석 - 로그 초기화
// ==========================================
// tracing + tracing-subscriber
// 로그 레벨은 RUST_LOG 환경 변수로 조정
// ==========================================

use tracing_subscriber::{fmt, EnvFilter};

/// 로그 출력 형식
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    /// 한 줄 JSON (수집기 연동용)
    Json,
}

impl LogFormat {
    /// FSI_LOG_FORMAT=json 이면 Json
    pub fn from_env() -> Self {
        match std::env::var("FSI_LOG_FORMAT") {
            Ok(v) if v.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Pretty,
        }
    }
}

/// 로그 초기화
///
/// # 환경 변수
/// - RUST_LOG: 레벨 필터 (기본: info)
///   예: RUST_LOG=debug 또는 RUST_LOG=franchise_sales_insight::engine=trace
/// - FSI_LOG_FORMAT: json 지정 시 JSON 출력
///
/// # 예시
/// ```no_run
/// use franchise_sales_insight::logging;
/// logging::init();
/// ```
pub fn init() {
    init_with(LogFormat::from_env());
}

pub fn init_with(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_line_number(true);

    // 이미 초기화된 경우는 무시
    let _ = match format {
        LogFormat::Pretty => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
}

/// 테스트용 로그 초기화 (debug, 테스트 출력으로 전달)
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
