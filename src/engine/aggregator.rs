// ==========================================
// 가맹점 매출 분석 - 기간 집계 엔진
// ==========================================
// 입력: 합성 레코드 + [시작일, 종료일] + 비교 모드 + 오늘
// 출력: 당기/전기 합계, 증감률, 월 누계 조리 효율, 휴무일
// 매출 = 플랫폼 + 내점 (포장은 별도 집계)
// ==========================================

use crate::config::AnalyticsConfig;
use crate::domain::channel::{is_oil, is_sub_material};
use crate::domain::sales::SynthesizedRecord;
use crate::domain::types::{ChannelType, ComparisonMode};
use crate::engine::efficiency::{sort_by_efficiency, EfficiencyReading, StoreEfficiency};
use crate::engine::growth::Growth;
use crate::engine::holiday::{HolidayDetector, HolidayReport};
use crate::engine::period::DateRange;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{info, instrument};

// ==========================================
// ChannelAmount - 채널별 금액/건수
// ==========================================
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelAmount {
    pub amount: f64,
    pub orders: f64,
}

impl ChannelAmount {
    fn add(&mut self, record: &SynthesizedRecord) {
        self.amount += record.amount();
        self.orders += record.order_count();
    }
}

// ==========================================
// PeriodTotals - 구간 합계
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodTotals {
    /// 플랫폼 + 내점
    pub total: ChannelAmount,
    pub platform: ChannelAmount,
    pub in_store: ChannelAmount,
    pub takeout: ChannelAmount,
    /// 플랫폼 채널별
    pub platform_breakdown: BTreeMap<String, ChannelAmount>,
    /// 자재 채널별
    pub material_breakdown: BTreeMap<String, ChannelAmount>,
    pub raw_material_amount: f64,
    pub oil_amount: f64,
    pub sub_material_amount: f64,
    /// 자재 금액 총합
    pub procurement_total: f64,
    /// 원재료 발주 수량 (조리 효율 분자)
    pub raw_material_orders: f64,
    /// 전용유 발주 수량 (조리 효율 분모)
    pub oil_orders: f64,
}

impl PeriodTotals {
    pub fn collect<'a, I>(records: I, range: DateRange) -> Self
    where
        I: IntoIterator<Item = &'a SynthesizedRecord>,
    {
        let mut totals = Self::default();
        for record in records {
            if range.contains(record.date()) {
                totals.add(record);
            }
        }
        totals.total.amount = totals.platform.amount + totals.in_store.amount;
        totals.total.orders = totals.platform.orders + totals.in_store.orders;
        totals
    }

    fn add(&mut self, record: &SynthesizedRecord) {
        if record.is_takeout() {
            self.takeout.add(record);
            return;
        }
        match record.channel_type {
            ChannelType::Platform => {
                self.platform.add(record);
                self.platform_breakdown
                    .entry(record.canonical_channel.clone())
                    .or_default()
                    .add(record);
            }
            ChannelType::Calculated => self.in_store.add(record),
            ChannelType::Material => {
                let name = record.canonical_channel.as_str();
                if is_oil(name) {
                    self.oil_amount += record.amount();
                    self.oil_orders += record.order_count();
                } else if is_sub_material(name) {
                    self.sub_material_amount += record.amount();
                } else {
                    self.raw_material_amount += record.amount();
                    self.raw_material_orders += record.order_count();
                }
                self.procurement_total += record.amount();
                self.material_breakdown
                    .entry(name.to_string())
                    .or_default()
                    .add(record);
            }
            // 합성 결과에는 나타나지 않는다
            ChannelType::Total | ChannelType::Procurement | ChannelType::Takeout => {}
        }
    }

    pub fn efficiency(&self) -> EfficiencyReading {
        EfficiencyReading::from_counts(self.raw_material_orders, self.oil_orders)
    }

    /// 객단가 (주문 0 이면 0)
    pub fn average_order_value(&self) -> f64 {
        if self.total.orders > 0.0 {
            self.total.amount / self.total.orders
        } else {
            0.0
        }
    }
}

// ==========================================
// GrowthSet - 지표별 증감
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthSet {
    pub total: Growth,
    pub orders: Growth,
    pub platform: Growth,
    pub in_store: Growth,
    pub takeout: Growth,
    pub procurement: Growth,
    /// 플랫폼 채널별 (당기/전기 어느 쪽에든 있는 채널)
    pub channels: BTreeMap<String, Growth>,
}

impl GrowthSet {
    pub fn between(current: &PeriodTotals, previous: &PeriodTotals, flat_threshold: f64) -> Self {
        let growth = |c: f64, p: f64| Growth::new(c, p, flat_threshold);

        let names: BTreeSet<&String> = current
            .platform_breakdown
            .keys()
            .chain(previous.platform_breakdown.keys())
            .collect();
        let channels = names
            .into_iter()
            .map(|name| {
                let c = current.platform_breakdown.get(name).map_or(0.0, |v| v.amount);
                let p = previous.platform_breakdown.get(name).map_or(0.0, |v| v.amount);
                (name.clone(), growth(c, p))
            })
            .collect();

        Self {
            total: growth(current.total.amount, previous.total.amount),
            orders: growth(current.total.orders, previous.total.orders),
            platform: growth(current.platform.amount, previous.platform.amount),
            in_store: growth(current.in_store.amount, previous.in_store.amount),
            takeout: growth(current.takeout.amount, previous.takeout.amount),
            procurement: growth(current.procurement_total, previous.procurement_total),
            channels,
        }
    }
}

// ==========================================
// MonthToDateEfficiency - 월 누계 조리 효율
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthToDateEfficiency {
    pub range: DateRange,
    pub aggregate: EfficiencyReading,
    /// 효율 오름차순
    pub stores: Vec<StoreEfficiency>,
}

impl MonthToDateEfficiency {
    /// end 가 속한 달 1일 ~ end (선택한 시작일과 무관)
    pub fn compute(records: &[SynthesizedRecord], stores: &BTreeSet<String>, end: NaiveDate) -> Self {
        let range = DateRange::month_to_date(end);
        Self::over(records, stores, range)
    }

    /// 범위 안에 재료 행이 하나라도 있는 매장만 목록에 오른다
    pub fn over(records: &[SynthesizedRecord], stores: &BTreeSet<String>, range: DateRange) -> Self {
        let mut per_store: BTreeMap<&str, (f64, f64)> = BTreeMap::new();

        for record in records {
            if record.channel_type != ChannelType::Material || !range.contains(record.date()) {
                continue;
            }
            let Some(store) = stores.get(record.store_name()) else {
                continue;
            };
            let counts = per_store.entry(store.as_str()).or_insert((0.0, 0.0));
            let name = record.canonical_channel.as_str();
            if is_oil(name) {
                counts.1 += record.order_count();
            } else if !is_sub_material(name) {
                counts.0 += record.order_count();
            }
        }

        let (raw, oil) = per_store
            .values()
            .fold((0.0, 0.0), |acc, (r, o)| (acc.0 + r, acc.1 + o));

        let mut list: Vec<StoreEfficiency> = per_store
            .into_iter()
            .map(|(store, (r, o))| StoreEfficiency {
                store_name: store.to_string(),
                reading: EfficiencyReading::from_counts(r, o),
            })
            .collect();
        sort_by_efficiency(&mut list);

        Self {
            range,
            aggregate: EfficiencyReading::from_counts(raw, oil),
            stores: list,
        }
    }
}

// ==========================================
// PeriodSummary - 집계 결과
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodSummary {
    pub range: DateRange,
    pub previous_range: DateRange,
    pub comparison_mode: ComparisonMode,
    pub stores: Vec<String>,
    pub current: PeriodTotals,
    pub previous: PeriodTotals,
    pub growth: GrowthSet,
    pub efficiency: MonthToDateEfficiency,
    pub holidays: HolidayReport,
}

// ==========================================
// PeriodAggregator
// ==========================================
pub struct PeriodAggregator {
    flat_threshold_pct: f64,
    holidays: HolidayDetector,
}

impl PeriodAggregator {
    pub fn new(config: &AnalyticsConfig, today: NaiveDate) -> Self {
        Self {
            flat_threshold_pct: config.flat_growth_threshold_pct,
            holidays: HolidayDetector::new(today),
        }
    }

    /// 레코드에 등장한 매장 기준 집계
    #[instrument(skip(self, records), fields(records = records.len()))]
    pub fn summarize(
        &self,
        records: &[SynthesizedRecord],
        range: DateRange,
        mode: ComparisonMode,
    ) -> PeriodSummary {
        let stores: BTreeSet<String> = records.iter().map(|r| r.store_name().to_string()).collect();
        self.summarize_stores(records, &stores, range, mode)
    }

    /// 지정 매장 기준 집계 (레코드는 해당 매장 것만 사용)
    pub fn summarize_stores(
        &self,
        records: &[SynthesizedRecord],
        stores: &BTreeSet<String>,
        range: DateRange,
        mode: ComparisonMode,
    ) -> PeriodSummary {
        let previous_range = range.previous(mode);
        let scoped: Vec<&SynthesizedRecord> = records
            .iter()
            .filter(|r| stores.contains(r.store_name()))
            .collect();

        let current = PeriodTotals::collect(scoped.iter().copied(), range);
        let previous = PeriodTotals::collect(scoped.iter().copied(), previous_range);
        let growth = GrowthSet::between(&current, &previous, self.flat_threshold_pct);
        let efficiency = MonthToDateEfficiency::compute(records, stores, range.end);
        let holidays = self.holidays.detect(records, stores, range);

        info!(
            stores = stores.len(),
            total = current.total.amount,
            previous_total = previous.total.amount,
            mode = %mode,
            "기간 집계 완료"
        );

        PeriodSummary {
            range,
            previous_range,
            comparison_mode: mode,
            stores: stores.iter().cloned().collect(),
            current,
            previous,
            growth,
            efficiency,
            holidays,
        }
    }

    pub fn flat_threshold_pct(&self) -> f64 {
        self.flat_threshold_pct
    }
}
