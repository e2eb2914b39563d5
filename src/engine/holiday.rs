// ==========================================
// 가맹점 매출 분석 - 휴무일 감지
// ==========================================
// (매장, 일자) 의 내점 + 플랫폼 매출이 없거나 0 이하 → 휴무
// 종료일이 오늘 이후면 유효 종료일 = 어제 (당일 데이터는 미완성)
// ==========================================

use crate::domain::sales::SynthesizedRecord;
use crate::engine::period::DateRange;
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreHolidays {
    pub store_name: String,
    pub holidays: u64,
    pub operating_days: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HolidayReport {
    /// 당일 제외 후 실제 계산 구간 (계산할 날이 없으면 None)
    pub effective_range: Option<DateRange>,
    /// 매장당 계산 일수
    pub counted_days: u64,
    /// 매장 수 × 계산 일수
    pub potential_store_days: u64,
    pub total_holidays: u64,
    /// 휴무일 내림차순 (동률은 매장명)
    pub stores: Vec<StoreHolidays>,
}

// ==========================================
// HolidayDetector
// ==========================================
#[derive(Debug, Clone, Copy)]
pub struct HolidayDetector {
    today: NaiveDate,
}

impl HolidayDetector {
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }

    /// 당일/미래를 잘라낸 계산 구간
    pub fn effective_range(&self, range: DateRange) -> Option<DateRange> {
        let end = if range.end >= self.today {
            self.today - Duration::days(1)
        } else {
            range.end
        };
        DateRange::new(range.start, end)
    }

    pub fn detect(
        &self,
        records: &[SynthesizedRecord],
        stores: &BTreeSet<String>,
        range: DateRange,
    ) -> HolidayReport {
        let effective = self.effective_range(range);

        let Some(effective) = effective else {
            return HolidayReport {
                effective_range: None,
                stores: stores
                    .iter()
                    .map(|s| StoreHolidays {
                        store_name: s.clone(),
                        holidays: 0,
                        operating_days: 0,
                    })
                    .collect(),
                ..HolidayReport::default()
            };
        };

        // 매장 → 일자 → 매출
        let mut revenue: BTreeMap<&str, BTreeMap<NaiveDate, f64>> = BTreeMap::new();
        for record in records {
            if record.is_revenue()
                && effective.contains(record.date())
                && stores.contains(record.store_name())
            {
                *revenue
                    .entry(record.store_name())
                    .or_default()
                    .entry(record.date())
                    .or_insert(0.0) += record.amount();
            }
        }

        // DateRange 는 start <= end 를 보장
        let counted_days = u64::try_from(effective.days()).unwrap_or(0);
        let mut per_store: Vec<StoreHolidays> = stores
            .iter()
            .map(|store| {
                let daily = revenue.get(store.as_str());
                let holidays = effective
                    .iter_days()
                    .filter(|day| {
                        daily
                            .and_then(|d| d.get(day))
                            .map_or(true, |amount| *amount <= 0.0)
                    })
                    .count() as u64;
                StoreHolidays {
                    store_name: store.clone(),
                    holidays,
                    operating_days: counted_days.saturating_sub(holidays),
                }
            })
            .collect();

        per_store.sort_by(|a, b| {
            b.holidays
                .cmp(&a.holidays)
                .then_with(|| a.store_name.cmp(&b.store_name))
        });

        let total_holidays = per_store
            .iter()
            .fold(0u64, |acc, s| acc.saturating_add(s.holidays));
        debug!(
            stores = stores.len(),
            counted_days,
            total_holidays,
            "휴무일 계산"
        );

        HolidayReport {
            effective_range: Some(effective),
            counted_days,
            potential_store_days: counted_days.saturating_mul(stores.len() as u64),
            total_holidays,
            stores: per_store,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::channel::IN_STORE_CHANNEL;
    use crate::domain::sales::RawSalesRecord;
    use crate::domain::types::SynthesisRule;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, d).unwrap()
    }

    fn platform(store: &str, d: u32, amount: f64) -> SynthesizedRecord {
        SynthesizedRecord::observed(RawSalesRecord::new(store, "김", "서울", date(d), "배민", amount, 1.0))
    }

    fn in_store(store: &str, d: u32, amount: f64) -> SynthesizedRecord {
        SynthesizedRecord::synthesized(
            RawSalesRecord::new(store, "김", "서울", date(d), IN_STORE_CHANNEL, amount, 0.0),
            SynthesisRule::InStoreRemainder,
        )
    }

    fn stores(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_today_excluded() {
        // 종료일 = 오늘, 오늘 레코드 없음 → 오늘은 분모/휴무 모두 제외
        let detector = HolidayDetector::new(date(19));
        let records = vec![platform("A", 17, 100.0), in_store("A", 18, 50.0)];
        let range = DateRange::new(date(17), date(19)).unwrap();

        let report = detector.detect(&records, &stores(&["A"]), range);
        assert_eq!(report.counted_days, 2);
        assert_eq!(report.total_holidays, 0);
        assert_eq!(report.effective_range.unwrap().end, date(18));
    }

    #[test]
    fn test_zero_revenue_is_holiday() {
        let detector = HolidayDetector::new(date(30));
        let records = vec![
            platform("A", 1, 100.0),
            in_store("A", 2, 0.0),
            platform("B", 1, 100.0),
            platform("B", 2, 100.0),
            platform("B", 3, 100.0),
        ];
        let range = DateRange::new(date(1), date(3)).unwrap();

        let report = detector.detect(&records, &stores(&["A", "B"]), range);
        assert_eq!(report.potential_store_days, 6);
        assert_eq!(report.total_holidays, 2);
        assert_eq!(report.stores[0].store_name, "A");
        assert_eq!(report.stores[0].holidays, 2);
        assert_eq!(report.stores[1].operating_days, 3);
    }

    #[test]
    fn test_range_entirely_in_future() {
        let detector = HolidayDetector::new(date(10));
        let range = DateRange::new(date(10), date(12)).unwrap();
        let report = detector.detect(&[], &stores(&["A"]), range);
        assert!(report.effective_range.is_none());
        assert_eq!(report.counted_days, 0);
        assert_eq!(report.total_holidays, 0);
        assert_eq!(report.stores.len(), 1);
    }

    #[test]
    fn test_multi_year_range_counts_every_day() {
        let detector = HolidayDetector::new(date(19));
        let start = NaiveDate::from_ymd_opt(1990, 1, 1).unwrap();
        let range = DateRange::new(start, date(31)).unwrap();
        let names: Vec<String> = (0..300).map(|i| format!("매장{:03}", i)).collect();
        let all: BTreeSet<String> = names.into_iter().collect();

        let report = detector.detect(&[platform("매장000", 1, 100.0)], &all, range);
        let expected_days = (date(18) - start).num_days() as u64 + 1;
        assert_eq!(report.counted_days, expected_days);
        assert_eq!(report.potential_store_days, expected_days * 300);
        assert_eq!(report.total_holidays, expected_days * 300 - 1);
        assert_eq!(report.stores.last().unwrap().operating_days, 1);
    }
}
