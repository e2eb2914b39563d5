// ==========================================
// 피드 가져오기 통합 테스트
// ==========================================
// 테스트 목표: 채널별 시트 디렉터리 → 병합 레코드 → 대시보드 요약
// ==========================================

mod helpers;

use calamine::{Data, ExcelDateTime, ExcelDateTimeType};
use franchise_sales_insight::api::{DashboardApi, DashboardQuery};
use franchise_sales_insight::config::AnalyticsConfig;
use franchise_sales_insight::domain::types::ComparisonMode;
use franchise_sales_insight::importer::{
    excel_cell_text, FeedImporter, FeedImporterImpl, ImportError, ImportResult, SheetGrid,
    SheetParser,
};
use franchise_sales_insight::logging;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use helpers::test_data_builder::{date, today, write_raw, FeedSheetWriter};
use tempfile::TempDir;

/// 날짜 헤더가 Excel 날짜형으로 저장된 배민 시트를 돌려주는 파서
struct TypedDateHeaderParser;

impl SheetParser for TypedDateHeaderParser {
    fn parse_grid(&self, _file_path: &Path) -> ImportResult<SheetGrid> {
        let serial = |value: f64| {
            Data::DateTime(ExcelDateTime::new(value, ExcelDateTimeType::DateTime, false))
        };
        let text = |value: &str| Data::String(value.to_string());
        let rows = vec![
            vec![
                text("No"),
                text("담당자명"),
                text("지역"),
                text("가맹점명"),
                serial(46296.0),
                serial(46297.0),
            ],
            vec![
                Data::Float(1.0),
                text("김담당"),
                text("서울"),
                text("A점"),
                Data::Float(12000.0),
                Data::Float(8000.0),
            ],
        ];
        Ok(SheetGrid::from_rows(
            rows.iter()
                .map(|row| row.iter().map(excel_cell_text).collect())
                .collect(),
        ))
    }
}

/// 일매출/배민/쿠팡이츠 금액·건수 시트 + 깨진 엑셀 파일
fn write_feed(dir: &std::path::Path) {
    FeedSheetWriter::new(&["10-01", "10-02"])
        .row("김담당", "서울", "A점", &["100,000", "50,000"])
        .row("담당자명", "지역", "가맹점명", &["10-01", "10-02"])
        .write(dir, "일매출");
    FeedSheetWriter::new(&["10-01", "10-02"])
        .row("김담당", "서울", "A점", &["20", "10"])
        .write(dir, "일매출 건수");
    FeedSheetWriter::new(&["10-01", "10-02"])
        .row("김담당", "서울", "A점", &["30,000", ""])
        .row("이담당", "부산", "B점", &["40,000", "0"])
        .write(dir, "배민");
    FeedSheetWriter::new(&["10-01", "10-02"])
        .row("김담당", "서울", "A점", &["6", ""])
        .row("이담당", "부산", "B점", &["8", ""])
        .write(dir, "배민 건수");
    FeedSheetWriter::new(&["10-01", "10-02"])
        .row("김담당", "서울", "A점", &["", "20,000"])
        .write(dir, "쿠팡이츠");
    write_raw(dir, "요기요.xlsx", "엑셀이 아닌 내용");
    write_raw(dir, "메모.txt", "가져오기 대상 아님");
}

#[tokio::test]
async fn test_import_feed_directory() {
    logging::init_test();

    let dir = TempDir::new().unwrap();
    write_feed(dir.path());

    let importer = FeedImporterImpl::new(AnalyticsConfig::default(), today());
    let (records, report) = importer.import_directory(dir.path()).await.unwrap();

    assert_eq!(report.sheets_read, 5);
    assert_eq!(report.failed_sheets.len(), 1);
    assert!(report.failed_sheets[0].sheet.contains("요기요"));
    assert_eq!(report.rows_skipped, 1);
    assert_eq!(report.records, records.len());
    assert_eq!(records.len(), 5);

    let a_total = records
        .iter()
        .find(|r| r.store_name == "A점" && r.channel == "일매출" && r.date == date(2026, 10, 1))
        .unwrap();
    assert_eq!(a_total.amount, 100_000.0);
    assert_eq!(a_total.order_count, 20.0);

    let b_baemin = records
        .iter()
        .find(|r| r.store_name == "B점" && r.channel == "배민")
        .unwrap();
    assert_eq!(b_baemin.region, "부산");
    assert_eq!(b_baemin.order_count, 8.0);

    // 금액 시트에만 있는 값은 건수 0
    let coupang = records.iter().find(|r| r.channel == "쿠팡이츠").unwrap();
    assert_eq!(coupang.amount, 20_000.0);
    assert_eq!(coupang.order_count, 0.0);
}

#[tokio::test]
async fn test_imported_feed_overview() {
    logging::init_test();

    let dir = TempDir::new().unwrap();
    write_feed(dir.path());

    let config = AnalyticsConfig::default();
    let importer = FeedImporterImpl::new(config.clone(), today());
    let (records, _) = importer.import_directory(dir.path()).await.unwrap();

    let api = DashboardApi::new(config, records, today());
    let summary = api
        .overview(&DashboardQuery::new("2026-10-01", "2026-10-02"))
        .unwrap();

    assert_eq!(summary.comparison_mode, ComparisonMode::TrailingWindow);
    assert_eq!(summary.current.platform.amount, 90_000.0);
    assert_eq!(summary.current.in_store.amount, 100_000.0);
    assert_eq!(summary.current.total.amount, 190_000.0);
    assert_eq!(summary.current.total.orders, 38.0);

    // 전기 데이터 없음 → 비교 불가
    assert_eq!(summary.growth.total.rate, None);

    // B점 10-02 매출 없음
    assert_eq!(summary.holidays.total_holidays, 1);
    assert_eq!(summary.holidays.potential_store_days, 4);
    assert_eq!(summary.holidays.stores[0].store_name, "B점");
}

#[tokio::test]
async fn test_missing_directory_is_error() {
    let importer = FeedImporterImpl::new(AnalyticsConfig::default(), today());
    let result = importer
        .import_directory(std::path::Path::new("/nonexistent/feed/dir"))
        .await;
    assert!(matches!(result, Err(ImportError::NotADirectory(_))));
}

#[tokio::test]
async fn test_empty_directory_yields_no_records() {
    let dir = TempDir::new().unwrap();
    let importer = FeedImporterImpl::new(AnalyticsConfig::default(), today());
    let (records, report) = importer.import_directory(dir.path()).await.unwrap();
    assert!(records.is_empty());
    assert_eq!(report.sheets_read, 0);
    assert!(report.failed_sheets.is_empty());
}

#[tokio::test]
async fn test_typed_excel_date_headers_are_kept() {
    logging::init_test();

    let importer = FeedImporterImpl::with_parser(
        AnalyticsConfig::default(),
        today(),
        Arc::new(TypedDateHeaderParser),
    );
    let (records, report) = importer
        .import_files(vec![PathBuf::from("배민.xlsx")])
        .await
        .unwrap();

    assert_eq!(report.dropped_date_columns, 0);
    assert_eq!(records.len(), 2);
    let first = records.iter().find(|r| r.date == date(2026, 10, 1)).unwrap();
    assert_eq!(first.amount, 12_000.0);
    assert_eq!(first.channel, "배민");
    let second = records.iter().find(|r| r.date == date(2026, 10, 2)).unwrap();
    assert_eq!(second.amount, 8_000.0);
}

#[tokio::test]
async fn test_many_sheets_parse_in_parallel() {
    let dir = TempDir::new().unwrap();
    let channels = ["배민", "요기요", "쿠팡이츠", "땡겨요", "먹깨비", "위메프오", "자사앱", "전화"];
    for channel in channels {
        FeedSheetWriter::new(&["10-01"])
            .row("김담당", "서울", "A점", &["1,000"])
            .write(dir.path(), channel);
    }

    let importer = FeedImporterImpl::new(AnalyticsConfig::default(), today());
    let (records, report) = importer.import_directory(dir.path()).await.unwrap();
    assert_eq!(report.sheets_read, channels.len());
    assert!(report.failed_sheets.is_empty());
    assert_eq!(records.len(), channels.len());
    assert!(records.iter().all(|r| r.amount == 1_000.0));
}
