// ==========================================
// 가맹점 매출 분석 - 레코드 병합기
// ==========================================
// 가로형(행 = 매장, 열 = 날짜) 금액 시트 + 건수 시트
//   → (매장, 담당자, 일자, 채널) 단위 세로형 레코드
// 금액 시트는 amount, 건수 시트는 order_count 에 누적, 반대쪽은 0
// ==========================================

use crate::config::AnalyticsConfig;
use crate::domain::sales::RawSalesRecord;
use crate::importer::cell_cleaner::CellCleaner;
use crate::importer::sheet::{FeedSheet, SheetKind};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info, instrument};

type MergeKey = (String, String, NaiveDate, String);

// ==========================================
// MergeReport - 가져오기/병합 보고서
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MergeReport {
    pub batch_id: String,
    pub sheets_read: usize,
    pub failed_sheets: Vec<SheetFailure>,
    /// 담당자/매장 누락 또는 헤더 반복행
    pub rows_skipped: usize,
    /// 날짜로 해석할 수 없어 버린 열 (시트별 합계)
    pub dropped_date_columns: usize,
    pub records: usize,
    pub elapsed_ms: u128,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetFailure {
    pub sheet: String,
    pub reason: String,
}

// ==========================================
// RecordMerger
// ==========================================
pub struct RecordMerger<'a> {
    config: &'a AnalyticsConfig,
    cleaner: CellCleaner,
}

impl<'a> RecordMerger<'a> {
    /// # 인자
    /// - config: 시트 열 배치 / 자리표시 라벨
    /// - reference_date: 날짜 헤더의 연/월 보완 기준일
    pub fn new(config: &'a AnalyticsConfig, reference_date: NaiveDate) -> Self {
        Self {
            config,
            cleaner: CellCleaner::new(reference_date),
        }
    }

    /// 시트 묶음을 병합
    ///
    /// 반환 레코드는 (매장, 담당자, 일자, 채널) 순으로 정렬된다.
    #[instrument(skip(self, sheets), fields(sheets = sheets.len()))]
    pub fn merge(&self, sheets: &[FeedSheet]) -> (Vec<RawSalesRecord>, MergeReport) {
        let mut merged: BTreeMap<MergeKey, RawSalesRecord> = BTreeMap::new();
        let mut report = MergeReport {
            sheets_read: sheets.len(),
            ..MergeReport::default()
        };

        for sheet in sheets {
            self.merge_sheet(sheet, &mut merged, &mut report);
        }

        let records: Vec<RawSalesRecord> = merged.into_values().collect();
        report.records = records.len();

        info!(
            records = report.records,
            rows_skipped = report.rows_skipped,
            dropped_date_columns = report.dropped_date_columns,
            "시트 병합 완료"
        );

        (records, report)
    }

    fn merge_sheet(
        &self,
        sheet: &FeedSheet,
        merged: &mut BTreeMap<MergeKey, RawSalesRecord>,
        report: &mut MergeReport,
    ) {
        let layout = &self.config.sheet_layout;

        // 날짜 열은 시트당 한 번만 해석
        let date_columns: Vec<(usize, NaiveDate)> = sheet
            .grid
            .header
            .iter()
            .enumerate()
            .skip(layout.first_date_column)
            .filter_map(|(idx, header)| {
                self.cleaner
                    .resolve_date_header(header)
                    .map(|date| (idx, date))
            })
            .collect();
        let date_header_count = sheet
            .grid
            .header
            .len()
            .saturating_sub(layout.first_date_column);
        report.dropped_date_columns += date_header_count - date_columns.len();

        let mut skipped = 0usize;
        let mut cells = 0usize;

        for row in &sheet.grid.rows {
            let manager = match self.cleaner.clean_text(row.get(layout.manager_column)) {
                Some(m) if !self.config.is_placeholder_manager(&m) => m,
                _ => {
                    skipped += 1;
                    continue;
                }
            };
            let store = match self.cleaner.clean_text(row.get(layout.store_column)) {
                Some(s) if !self.config.is_placeholder_store(&s) => s,
                _ => {
                    skipped += 1;
                    continue;
                }
            };
            let region = self
                .cleaner
                .clean_text(row.get(layout.region_column))
                .unwrap_or_else(|| self.config.default_region.clone());

            for (idx, date) in &date_columns {
                let value = row
                    .get(*idx)
                    .map(|cell| self.cleaner.parse_number(cell))
                    .unwrap_or(0.0);
                // 0 이하 값은 레코드를 만들지 않는다
                if value <= 0.0 {
                    continue;
                }

                let key = (store.clone(), manager.clone(), *date, sheet.channel.clone());
                let entry = merged.entry(key).or_insert_with(|| {
                    RawSalesRecord::new(
                        store.clone(),
                        manager.clone(),
                        region.clone(),
                        *date,
                        sheet.channel.clone(),
                        0.0,
                        0.0,
                    )
                });

                match sheet.kind {
                    SheetKind::Amount => entry.amount += value,
                    SheetKind::Count => entry.order_count += value,
                }
                cells += 1;
            }
        }

        report.rows_skipped += skipped;
        debug!(
            sheet = %sheet.name,
            channel = %sheet.channel,
            kind = ?sheet.kind,
            date_columns = date_columns.len(),
            cells,
            skipped,
            "시트 병합"
        );
    }
}

/// 병합 결과에 등장한 채널 목록 (진단용)
pub fn channels_in(records: &[RawSalesRecord]) -> BTreeSet<String> {
    records.iter().map(|r| r.channel.clone()).collect()
}
