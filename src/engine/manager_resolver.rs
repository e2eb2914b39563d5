// ==========================================
// 가맹점 매출 분석 - 유효 담당자 해석
// ==========================================
// 매장 → 가장 최근 일자 레코드의 담당자
// 같은 일자 레코드가 여러 개면 마지막으로 본 것
// 필터/집계 이전에 한 번만 계산한다
// ==========================================

use crate::domain::sales::RawSalesRecord;
use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EffectiveManagerMap {
    latest: BTreeMap<String, (NaiveDate, String)>,
}

impl EffectiveManagerMap {
    pub fn build<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a RawSalesRecord>,
    {
        let mut latest: BTreeMap<String, (NaiveDate, String)> = BTreeMap::new();
        for record in records {
            if record.store_name.is_empty() || record.manager_name.is_empty() {
                continue;
            }
            match latest.get_mut(&record.store_name) {
                Some((date, manager)) => {
                    if record.date >= *date {
                        *date = record.date;
                        *manager = record.manager_name.clone();
                    }
                }
                None => {
                    latest.insert(
                        record.store_name.clone(),
                        (record.date, record.manager_name.clone()),
                    );
                }
            }
        }
        Self { latest }
    }

    pub fn get(&self, store_name: &str) -> Option<&str> {
        self.latest.get(store_name).map(|(_, m)| m.as_str())
    }

    /// 매장의 유효 담당자 (매장 정보가 없으면 레코드 담당자)
    pub fn resolve<'a>(&'a self, record: &'a RawSalesRecord) -> &'a str {
        self.get(&record.store_name)
            .unwrap_or(record.manager_name.as_str())
    }

    /// 유효 담당자 목록 (정렬)
    pub fn managers(&self) -> BTreeSet<String> {
        self.latest.values().map(|(_, m)| m.clone()).collect()
    }

    /// 담당자가 현재 맡고 있는 매장
    pub fn stores_of(&self, manager: &str) -> BTreeSet<String> {
        self.latest
            .iter()
            .filter(|(_, (_, m))| m == manager)
            .map(|(store, _)| store.clone())
            .collect()
    }

    /// 담당자가 정해진 매장 수
    pub fn store_count(&self) -> usize {
        self.latest.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(store: &str, manager: &str, d: u32) -> RawSalesRecord {
        RawSalesRecord::new(
            store,
            manager,
            "서울",
            NaiveDate::from_ymd_opt(2026, 10, d).unwrap(),
            "배민",
            100.0,
            1.0,
        )
    }

    #[test]
    fn test_latest_record_wins() {
        let records = vec![
            record("A", "김", 5),
            record("A", "이", 1),
            record("B", "박", 2),
        ];
        let map = EffectiveManagerMap::build(&records);
        assert_eq!(map.get("A"), Some("김"));
        assert_eq!(map.get("B"), Some("박"));
        assert_eq!(map.resolve(&records[1]), "김");
        assert_eq!(map.store_count(), 2);
    }

    #[test]
    fn test_tie_last_seen_wins() {
        let records = vec![record("A", "김", 5), record("A", "이", 5)];
        let map = EffectiveManagerMap::build(&records);
        assert_eq!(map.get("A"), Some("이"));
    }

    #[test]
    fn test_managers_and_stores() {
        let records = vec![
            record("A", "김", 1),
            record("B", "김", 1),
            record("C", "이", 1),
            record("", "박", 1),
        ];
        let map = EffectiveManagerMap::build(&records);
        assert_eq!(map.managers().len(), 2);
        assert_eq!(map.stores_of("김").len(), 2);
        assert!(map.stores_of("박").is_empty());
    }
}
