// ==========================================
// 가맹점 매출 분석 - 실행 진입점
// ==========================================
// 사용법: franchise-sales-insight <피드 디렉터리> [시작일] [종료일]
// 날짜 형식 YYYY-MM-DD, 생략 시 이번 달 1일 ~ 어제
// FSI_LOCALE=en 이면 영어 메시지
// 결과: 기간 요약 JSON (stdout)
// ==========================================

use anyhow::{bail, Context};
use chrono::{Duration, Local};
use franchise_sales_insight::engine::period::first_day_of_month;
use franchise_sales_insight::importer::{FeedImporter, FeedImporterImpl};
use franchise_sales_insight::{i18n, logging, AnalyticsConfig, DashboardApi, DashboardQuery};
use std::path::PathBuf;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init();
    i18n::init_locale();

    let mut args = std::env::args().skip(1);
    let Some(feed_dir) = args.next().map(PathBuf::from) else {
        bail!("사용법: franchise-sales-insight <피드 디렉터리> [시작일] [종료일]");
    };

    let today = Local::now().date_naive();
    let yesterday = today - Duration::days(1);
    let start = args
        .next()
        .unwrap_or_else(|| first_day_of_month(yesterday).format("%Y-%m-%d").to_string());
    let end = args
        .next()
        .unwrap_or_else(|| yesterday.format("%Y-%m-%d").to_string());

    tracing::info!("==================================================");
    tracing::info!("{} v{}", franchise_sales_insight::APP_NAME, franchise_sales_insight::VERSION);
    tracing::info!("==================================================");

    let config = AnalyticsConfig::load(None).context("설정 로드 실패")?;

    let importer = FeedImporterImpl::new(config.clone(), today);
    let (records, report) = importer
        .import_directory(&feed_dir)
        .await
        .with_context(|| format!("피드 디렉터리 읽기 실패: {}", feed_dir.display()))?;

    for failure in &report.failed_sheets {
        tracing::warn!("{}", i18n::sheet_skipped(&failure.sheet, &failure.reason));
    }

    tracing::info!(
        batch_id = %report.batch_id,
        sheets = report.sheets_read,
        failed = report.failed_sheets.len(),
        records = records.len(),
        "피드 가져오기 완료"
    );

    let api = DashboardApi::new(config, records, today);
    tracing::debug!(records = api.record_count(), today = %api.today(), "대시보드 준비");
    let summary = api.overview(&DashboardQuery::new(start, end))?;

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
