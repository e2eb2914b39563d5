// ==========================================
// 가맹점 매출 분석 - 피드 가져오기 구현
// ==========================================
// 흐름: 파일 목록 → 시트 파싱(파일마다 blocking 작업) → 채널/종류 판별 → 병합
// 실패한 시트는 보고서에 기록하고 건너뛴다
// ==========================================

use crate::config::AnalyticsConfig;
use crate::domain::sales::RawSalesRecord;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::feed_importer_trait::{FeedImporter, SheetParser};
use crate::importer::file_parser::UniversalFileParser;
use crate::importer::record_merger::{channels_in, MergeReport, RecordMerger, SheetFailure};
use crate::importer::sheet::FeedSheet;
use async_trait::async_trait;
use chrono::NaiveDate;
use futures::future::join_all;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

// ==========================================
// FeedImporterImpl
// ==========================================
pub struct FeedImporterImpl {
    config: AnalyticsConfig,
    parser: Arc<dyn SheetParser>,
    /// 날짜 헤더 보완 기준일
    reference_date: NaiveDate,
}

impl FeedImporterImpl {
    pub fn new(config: AnalyticsConfig, reference_date: NaiveDate) -> Self {
        Self::with_parser(config, reference_date, Arc::new(UniversalFileParser))
    }

    pub fn with_parser(
        config: AnalyticsConfig,
        reference_date: NaiveDate,
        parser: Arc<dyn SheetParser>,
    ) -> Self {
        Self {
            config,
            parser,
            reference_date,
        }
    }

    /// 파일 하나를 blocking 작업으로 파싱
    async fn load_sheet(&self, path: PathBuf) -> ImportResult<FeedSheet> {
        let parser = Arc::clone(&self.parser);
        let marker = self.config.count_sheet_marker.clone();
        tokio::task::spawn_blocking(move || read_sheet(parser.as_ref(), &marker, &path))
            .await
            .map_err(|e| ImportError::WorkerFailed(e.to_string()))?
    }
}

/// 파일 하나 → FeedSheet (시트명 = 파일명에서 확장자 제외)
fn read_sheet(parser: &dyn SheetParser, count_marker: &str, path: &Path) -> ImportResult<FeedSheet> {
    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| ImportError::InvalidSheetName(path.display().to_string()))?;

    let grid = parser.parse_grid(path)?;
    if grid.is_empty() {
        return Err(ImportError::EmptySheet(name.to_string()));
    }

    FeedSheet::from_name(name, count_marker, grid)
}

#[async_trait]
impl FeedImporter for FeedImporterImpl {
    #[instrument(skip(self), fields(dir = %dir.display()))]
    async fn import_directory(
        &self,
        dir: &Path,
    ) -> ImportResult<(Vec<RawSalesRecord>, MergeReport)> {
        if !dir.is_dir() {
            return Err(ImportError::NotADirectory(dir.display().to_string()));
        }

        let mut files: Vec<PathBuf> = std::fs::read_dir(dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.is_file() && UniversalFileParser::is_supported(path))
            .collect();
        // 결과 재현성을 위해 파일명 순
        files.sort();

        debug!(files = files.len(), "피드 파일 목록 확인");
        self.import_files(files).await
    }

    #[instrument(skip(self, files), fields(batch_id))]
    async fn import_files(
        &self,
        files: Vec<PathBuf>,
    ) -> ImportResult<(Vec<RawSalesRecord>, MergeReport)> {
        let start_time = Instant::now();
        let batch_id = Uuid::new_v4().to_string();
        tracing::Span::current().record("batch_id", batch_id.as_str());
        info!(batch_id = %batch_id, files = files.len(), "피드 가져오기 시작");

        let tasks = files.into_iter().map(|path| async move {
            let label = path.display().to_string();
            match self.load_sheet(path).await {
                Ok(sheet) => {
                    debug!(file = %label, channel = %sheet.channel, rows = sheet.grid.rows.len(), "시트 파싱 완료");
                    Ok(sheet)
                }
                Err(e) => {
                    warn!(file = %label, error = %e, "시트 건너뜀");
                    Err(SheetFailure {
                        sheet: label,
                        reason: e.to_string(),
                    })
                }
            }
        });

        let results = join_all(tasks).await;

        let mut sheets = Vec::new();
        let mut failures = Vec::new();
        for result in results {
            match result {
                Ok(sheet) => sheets.push(sheet),
                Err(failure) => failures.push(failure),
            }
        }

        if sheets.is_empty() && !failures.is_empty() {
            error!(failed = failures.len(), "읽을 수 있는 시트가 없음");
        }

        let merger = RecordMerger::new(&self.config, self.reference_date);
        let (records, mut report) = merger.merge(&sheets);
        report.batch_id = batch_id;
        report.failed_sheets = failures;
        report.elapsed_ms = start_time.elapsed().as_millis();

        info!(
            batch_id = %report.batch_id,
            sheets_read = report.sheets_read,
            sheets_failed = report.failed_sheets.len(),
            records = report.records,
            channels = channels_in(&records).len(),
            elapsed_ms = report.elapsed_ms,
            "피드 가져오기 완료"
        );

        Ok((records, report))
    }
}
