// ==========================================
// 가맹점 매출 분석 - 대시보드 API
// ==========================================
// 표시 계층이 넘기는 문자열 파라미터를 검증하고 엔진을 호출한다
// 흐름: 파라미터 검증 → 운영 매장 필터(종료일 연도) → 합성 → 집계
// 오늘 날짜는 생성 시 주입 (엔진은 시스템 시각을 읽지 않음)
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::config::AnalyticsConfig;
use crate::domain::sales::{FilterSelection, RawSalesRecord, SynthesizedRecord};
use crate::domain::types::{ComparisonMode, EfficiencyBand, GroupBy};
use crate::engine::active_store::{filter_options, retain_active, FilterOptions};
use crate::engine::aggregator::{PeriodAggregator, PeriodSummary};
use crate::engine::group_analysis::{GroupAnalysis, GroupAnalyzer};
use crate::engine::period::DateRange;
use crate::engine::store_report::{available_months, StoreMonthlyReport, StoreReportBuilder};
use crate::engine::synthesizer::ChannelSynthesizer;
use crate::engine::trend::{TrendBuilder, TrendSeries};
use crate::i18n;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::{debug, instrument};

// ==========================================
// DashboardQuery - 대시보드 조회 요청
// ==========================================
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardQuery {
    pub start_date: String,
    pub end_date: String,
    /// "all" / 빈 값 = 전체
    #[serde(default)]
    pub manager: Option<String>,
    #[serde(default)]
    pub store: Option<String>,
    /// 없으면 종료일로 추정
    #[serde(default)]
    pub comparison: Option<ComparisonMode>,
}

impl DashboardQuery {
    pub fn new(start_date: impl Into<String>, end_date: impl Into<String>) -> Self {
        Self {
            start_date: start_date.into(),
            end_date: end_date.into(),
            ..Self::default()
        }
    }

    pub fn with_manager(mut self, manager: impl Into<String>) -> Self {
        self.manager = Some(manager.into());
        self
    }

    pub fn with_store(mut self, store: impl Into<String>) -> Self {
        self.store = Some(store.into());
        self
    }

    pub fn with_comparison(mut self, mode: ComparisonMode) -> Self {
        self.comparison = Some(mode);
        self
    }
}

// ==========================================
// EfficiencyNotice - 효율 구간 표시 문구
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EfficiencyNotice {
    pub band: EfficiencyBand,
    pub label: String,
    pub guide: String,
}

impl EfficiencyNotice {
    /// 현재 locale 기준 문구
    pub fn for_band(band: EfficiencyBand) -> Self {
        Self {
            band,
            label: i18n::efficiency_label(band),
            guide: i18n::efficiency_guide(band),
        }
    }
}

/// 검증된 조회 조건 + 합성 결과
struct PreparedQuery {
    range: DateRange,
    mode: ComparisonMode,
    records: Vec<SynthesizedRecord>,
}

// ==========================================
// DashboardApi
// ==========================================
pub struct DashboardApi {
    config: AnalyticsConfig,
    records: Vec<RawSalesRecord>,
    today: NaiveDate,
    synthesizer: ChannelSynthesizer,
}

impl DashboardApi {
    /// # 인자
    /// - records: 가져오기 단계의 원본 레코드 전체
    /// - today: 월 누계 추정/휴무 계산 기준일
    pub fn new(config: AnalyticsConfig, records: Vec<RawSalesRecord>, today: NaiveDate) -> Self {
        Self {
            config,
            records,
            today,
            synthesizer: ChannelSynthesizer::new(),
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    // ==========================================
    // 조회 인터페이스
    // ==========================================

    /// 합성 레코드
    pub fn synthesized_records(&self, query: &DashboardQuery) -> ApiResult<Vec<SynthesizedRecord>> {
        Ok(self.prepare(query)?.records)
    }

    /// 기간 요약 (합계, 증감, 월 누계 효율, 휴무)
    #[instrument(skip(self))]
    pub fn overview(&self, query: &DashboardQuery) -> ApiResult<PeriodSummary> {
        let prepared = self.prepare(query)?;
        let aggregator = PeriodAggregator::new(&self.config, self.today);
        Ok(aggregator.summarize(&prepared.records, prepared.range, prepared.mode))
    }

    /// 그룹별 상세 분석
    #[instrument(skip(self))]
    pub fn grouped_analysis(
        &self,
        query: &DashboardQuery,
        group_by: GroupBy,
        search: Option<&str>,
    ) -> ApiResult<Vec<GroupAnalysis>> {
        let prepared = self.prepare(query)?;
        let aggregator = PeriodAggregator::new(&self.config, self.today);
        Ok(GroupAnalyzer::new(&aggregator).analyze(
            &prepared.records,
            group_by,
            prepared.range,
            prepared.mode,
            search,
        ))
    }

    /// 매출 추이
    pub fn trend(&self, query: &DashboardQuery) -> ApiResult<TrendSeries> {
        let prepared = self.prepare(query)?;
        Ok(TrendBuilder::new(&self.config).build(&prepared.records, prepared.range))
    }

    /// 매장 월간 리포트
    ///
    /// # 인자
    /// - stores: 선택 매장 (1개 이상)
    /// - month: "YYYY-MM"
    #[instrument(skip(self))]
    pub fn store_report(&self, stores: &[String], month: &str) -> ApiResult<StoreMonthlyReport> {
        let selected: BTreeSet<String> = stores
            .iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        if selected.is_empty() {
            return Err(ApiError::InvalidInput("매장을 하나 이상 선택해야 함".to_string()));
        }
        let month_date = parse_month(month)?;

        let records = self.synthesizer.synthesize(&self.records, &FilterSelection::all());
        let builder = StoreReportBuilder::new(self.config.flat_growth_threshold_pct, self.today);
        Ok(builder.build(&records, &selected, month_date))
    }

    /// 매장 월간 리포트의 효율 구간 문구
    pub fn efficiency_notice(&self, report: &StoreMonthlyReport) -> EfficiencyNotice {
        EfficiencyNotice::for_band(report.efficiency.band)
    }

    /// 데이터가 있는 월 목록 (최신순)
    pub fn available_months(&self) -> Vec<String> {
        let records = self.synthesizer.synthesize(&self.records, &FilterSelection::all());
        available_months(&records)
    }

    /// 담당자/매장 선택지 (종료일 연도 기준 운영 매장)
    pub fn filter_options(&self, end_date: &str, manager: Option<&str>) -> ApiResult<FilterOptions> {
        let end = parse_date(end_date)?;
        let selection = FilterSelection::from_params(manager, None);
        Ok(filter_options(&self.records, end, selection.manager.as_deref()))
    }

    // ==========================================
    // 내부 처리
    // ==========================================

    fn prepare(&self, query: &DashboardQuery) -> ApiResult<PreparedQuery> {
        let start = parse_date(&query.start_date)?;
        let end = parse_date(&query.end_date)?;
        let range = DateRange::new(start, end).ok_or_else(|| ApiError::InvalidRange {
            start: query.start_date.clone(),
            end: query.end_date.clone(),
        })?;
        let mode = query
            .comparison
            .unwrap_or_else(|| ComparisonMode::infer(end, self.today));
        let filter = FilterSelection::from_params(query.manager.as_deref(), query.store.as_deref());

        let active = retain_active(self.records.clone(), end);
        let records = self.synthesizer.synthesize(&active, &filter);

        debug!(
            start = %start,
            end = %end,
            mode = %mode,
            records = records.len(),
            "조회 조건 준비"
        );

        Ok(PreparedQuery {
            range,
            mode,
            records,
        })
    }
}

fn parse_date(value: &str) -> ApiResult<NaiveDate> {
    let raw = value.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| ApiError::InvalidDate(raw.to_string()))
}

fn parse_month(value: &str) -> ApiResult<NaiveDate> {
    let raw = value.trim();
    NaiveDate::parse_from_str(&format!("{}-01", raw), "%Y-%m-%d")
        .map_err(|_| ApiError::InvalidMonth(raw.to_string()))
}
