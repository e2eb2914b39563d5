// ==========================================
// 가맹점 매출 분석 - 엔진 계층
// ==========================================
// 책임: 합성 / 집계 / 지표 계산
// 원칙: 동기 순수 함수, 시스템 시각을 읽지 않음 (오늘 날짜는 인자로 받음)
// ==========================================

pub mod active_store;
pub mod aggregator;
pub mod efficiency;
pub mod group_analysis;
pub mod growth;
pub mod holiday;
pub mod manager_resolver;
pub mod period;
pub mod store_report;
pub mod synthesizer;
pub mod trend;

// 핵심 엔진 재수출
pub use active_store::{active_stores, filter_options, retain_active, FilterOptions};
pub use aggregator::{
    ChannelAmount, GrowthSet, MonthToDateEfficiency, PeriodAggregator, PeriodSummary, PeriodTotals,
};
pub use efficiency::{classify_efficiency, efficiency, EfficiencyReading, StoreEfficiency};
pub use group_analysis::{GroupAnalysis, GroupAnalyzer};
pub use growth::{growth_rate, Growth};
pub use holiday::{HolidayDetector, HolidayReport, StoreHolidays};
pub use manager_resolver::EffectiveManagerMap;
pub use period::DateRange;
pub use store_report::{available_months, ChannelComparison, StoreMonthlyReport, StoreReportBuilder};
pub use synthesizer::ChannelSynthesizer;
pub use trend::{ChannelShare, TrendBucket, TrendBuilder, TrendSeries};
