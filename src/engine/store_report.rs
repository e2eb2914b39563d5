// ==========================================
// 가맹점 매출 분석 - 매장 월간 리포트
// ==========================================
// 선택 매장 + 월(YYYY-MM) 단위
//   - 매출(플랫폼 + 내점) / 포장 / 자재 구성
//   - 채널별 당월 vs 전월 (전월은 월 전체)
//   - 조리 효율 (월 전체)
//   - 휴무일 (당일 제외 규칙 적용)
// ==========================================

use crate::domain::sales::SynthesizedRecord;
use crate::engine::aggregator::{ChannelAmount, MonthToDateEfficiency, PeriodTotals};
use crate::engine::efficiency::{EfficiencyReading, StoreEfficiency};
use crate::engine::growth::Growth;
use crate::engine::holiday::{HolidayDetector, HolidayReport};
use crate::engine::period::{first_day_of_month, month_label, DateRange};
use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{info, instrument};

// ==========================================
// ChannelComparison - 채널별 당월/전월
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelComparison {
    pub channel: String,
    pub current: ChannelAmount,
    pub previous_amount: f64,
    pub growth: Growth,
}

// ==========================================
// StoreMonthlyReport
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreMonthlyReport {
    pub stores: Vec<String>,
    /// "YYYY-MM"
    pub month: String,
    pub range: DateRange,
    pub previous_range: DateRange,
    pub current: PeriodTotals,
    pub previous: PeriodTotals,
    pub revenue_growth: Growth,
    /// 매출 채널 (플랫폼 + 내점 + 포장)
    pub revenue_channels: Vec<ChannelComparison>,
    /// 자재 채널
    pub material_channels: Vec<ChannelComparison>,
    /// 월 전체 조리 효율
    pub efficiency: EfficiencyReading,
    pub store_efficiency: Vec<StoreEfficiency>,
    pub holidays: HolidayReport,
    /// 영업일 평균 매출 (영업일 0 이면 0)
    pub average_daily_revenue: f64,
    pub average_order_value: f64,
}

pub struct StoreReportBuilder {
    flat_threshold_pct: f64,
    holidays: HolidayDetector,
}

impl StoreReportBuilder {
    pub fn new(flat_threshold_pct: f64, today: NaiveDate) -> Self {
        Self {
            flat_threshold_pct,
            holidays: HolidayDetector::new(today),
        }
    }

    /// # 인자
    /// - records: 합성 레코드
    /// - stores: 선택 매장 (비어 있으면 빈 리포트)
    /// - month: 해당 월의 아무 날짜
    ///
    /// 휴무일은 어제까지만 센다. 오늘이 그 달 1일이거나 미래 월이면
    /// 계산할 날이 없어 `holidays.effective_range` 는 None, 일평균 매출은 0.
    /// 월 시작 이전으로는 당기지 않는다.
    #[instrument(skip(self, records, stores), fields(stores = stores.len()))]
    pub fn build(
        &self,
        records: &[SynthesizedRecord],
        stores: &BTreeSet<String>,
        month: NaiveDate,
    ) -> StoreMonthlyReport {
        let range = DateRange::month_of(month);
        let previous_start = first_day_of_month(month)
            .checked_sub_months(Months::new(1))
            .unwrap_or(range.start);
        let previous_range = DateRange::month_of(previous_start);

        let scoped: Vec<&SynthesizedRecord> = records
            .iter()
            .filter(|r| stores.contains(r.store_name()))
            .collect();
        let current = PeriodTotals::collect(scoped.iter().copied(), range);
        let previous = PeriodTotals::collect(scoped.iter().copied(), previous_range);

        let revenue_channels = self.revenue_channels(&current, &previous);
        let material_channels =
            self.compare(&current.material_breakdown, &previous.material_breakdown);

        let month_efficiency = MonthToDateEfficiency::over(records, stores, range);
        let holidays = self.holidays.detect(records, stores, range);

        let operating_days = holidays
            .potential_store_days
            .saturating_sub(holidays.total_holidays);
        let average_daily_revenue = if operating_days > 0 {
            current.total.amount / operating_days as f64
        } else {
            0.0
        };

        info!(
            month = %month_label(range.start),
            revenue = current.total.amount,
            holidays = holidays.total_holidays,
            "매장 월간 리포트 생성"
        );

        StoreMonthlyReport {
            stores: stores.iter().cloned().collect(),
            month: month_label(range.start),
            range,
            previous_range,
            revenue_growth: Growth::new(
                current.total.amount,
                previous.total.amount,
                self.flat_threshold_pct,
            ),
            revenue_channels,
            material_channels,
            efficiency: month_efficiency.aggregate,
            store_efficiency: month_efficiency.stores,
            holidays,
            average_daily_revenue,
            average_order_value: current.average_order_value(),
            current,
            previous,
        }
    }

    fn revenue_channels(
        &self,
        current: &PeriodTotals,
        previous: &PeriodTotals,
    ) -> Vec<ChannelComparison> {
        let with_fixed = |totals: &PeriodTotals| {
            let mut map = totals.platform_breakdown.clone();
            if totals.in_store.amount > 0.0 || totals.in_store.orders > 0.0 {
                map.insert(crate::domain::channel::IN_STORE_CHANNEL.to_string(), totals.in_store);
            }
            if totals.takeout.amount > 0.0 || totals.takeout.orders > 0.0 {
                map.insert(crate::domain::channel::TAKEOUT_CHANNEL.to_string(), totals.takeout);
            }
            map
        };
        self.compare(&with_fixed(current), &with_fixed(previous))
    }

    /// 금액 내림차순
    fn compare(
        &self,
        current: &BTreeMap<String, ChannelAmount>,
        previous: &BTreeMap<String, ChannelAmount>,
    ) -> Vec<ChannelComparison> {
        let names: BTreeSet<&String> = current.keys().chain(previous.keys()).collect();
        let mut list: Vec<ChannelComparison> = names
            .into_iter()
            .map(|name| {
                let cur = current.get(name).copied().unwrap_or_default();
                let prev = previous.get(name).map_or(0.0, |v| v.amount);
                ChannelComparison {
                    channel: name.clone(),
                    current: cur,
                    previous_amount: prev,
                    growth: Growth::new(cur.amount, prev, self.flat_threshold_pct),
                }
            })
            .collect();
        list.sort_by(|a, b| {
            b.current
                .amount
                .partial_cmp(&a.current.amount)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.channel.cmp(&b.channel))
        });
        list
    }
}

/// 레코드에 등장하는 월 목록 (최신순, "YYYY-MM")
pub fn available_months(records: &[SynthesizedRecord]) -> Vec<String> {
    let months: BTreeSet<NaiveDate> = records
        .iter()
        .map(|r| first_day_of_month(r.date()))
        .collect();
    months.into_iter().rev().map(month_label).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::sales::{FilterSelection, RawSalesRecord};
    use crate::engine::synthesizer::ChannelSynthesizer;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, m, d).unwrap()
    }

    fn rec(m: u32, d: u32, channel: &str, amount: f64, count: f64) -> RawSalesRecord {
        RawSalesRecord::new("A", "김", "서울", date(m, d), channel, amount, count)
    }

    fn synthesize(raw: &[RawSalesRecord]) -> Vec<SynthesizedRecord> {
        ChannelSynthesizer::new().synthesize(raw, &FilterSelection::all())
    }

    fn stores() -> BTreeSet<String> {
        ["A".to_string()].into_iter().collect()
    }

    #[test]
    fn test_past_month_report() {
        let records = synthesize(&[
            rec(8, 31, "배민", 1_000.0, 1.0),
            rec(9, 1, "총매출", 10_000.0, 5.0),
            rec(9, 1, "배민", 2_000.0, 1.0),
            rec(9, 2, "포장", 500.0, 1.0),
            rec(9, 3, "절단육", 0.0, 650.0),
            rec(9, 20, "전용유", 0.0, 10.0),
        ]);
        let builder = StoreReportBuilder::new(0.1, date(10, 19));
        let report = builder.build(&records, &stores(), date(9, 15));

        assert_eq!(report.month, "2026-09");
        assert_eq!(report.previous_range.start, date(8, 1));
        assert_eq!(report.current.total.amount, 10_000.0);
        assert_eq!(report.revenue_growth.rate, Some(900.0));
        assert_eq!(report.efficiency.efficiency, 65.0);
        // 과거 월은 월 전체 계산
        assert_eq!(report.holidays.counted_days, 30);
        // 매출 채널: 내점 8000, 배민 2000, 포장 500
        let names: Vec<&str> = report.revenue_channels.iter().map(|c| c.channel.as_str()).collect();
        assert_eq!(names, vec!["내점", "배민", "포장"]);
    }

    #[test]
    fn test_current_month_clamped_to_yesterday() {
        let records = synthesize(&[rec(10, 1, "배민", 1_000.0, 1.0)]);
        let builder = StoreReportBuilder::new(0.1, date(10, 19));
        let report = builder.build(&records, &stores(), date(10, 1));
        assert_eq!(report.holidays.counted_days, 18);
        assert_eq!(report.holidays.total_holidays, 17);
        assert_eq!(report.average_daily_revenue, 1_000.0);
    }

    #[test]
    fn test_first_day_of_month_has_no_countable_days() {
        let records = synthesize(&[rec(10, 1, "배민", 1_000.0, 1.0)]);
        let builder = StoreReportBuilder::new(0.1, date(10, 1));
        let report = builder.build(&records, &stores(), date(10, 1));

        assert!(report.holidays.effective_range.is_none());
        assert_eq!(report.holidays.counted_days, 0);
        assert_eq!(report.holidays.stores[0].operating_days, 0);
        assert_eq!(report.average_daily_revenue, 0.0);
        // 매출 집계는 월 전체 그대로
        assert_eq!(report.current.total.amount, 1_000.0);
    }

    #[test]
    fn test_future_month_has_no_countable_days() {
        let builder = StoreReportBuilder::new(0.1, date(10, 19));
        let report = builder.build(&[], &stores(), date(11, 5));
        assert_eq!(report.month, "2026-11");
        assert!(report.holidays.effective_range.is_none());
        assert_eq!(report.holidays.potential_store_days, 0);
    }

    #[test]
    fn test_available_months_newest_first() {
        let records = synthesize(&[
            rec(8, 3, "배민", 1.0, 1.0),
            rec(10, 3, "배민", 1.0, 1.0),
            rec(10, 9, "배민", 1.0, 1.0),
        ]);
        assert_eq!(available_months(&records), vec!["2026-10", "2026-08"]);
    }
}
