// ==========================================
// 가맹점 매출 분석 - 그룹별 상세 분석
// ==========================================
// 기준: 매장 / 유효 담당자 / 지역
// 그룹마다 기간 집계(당기·전기·증감·월 누계 효율·휴무)를 수행
// 정렬: 당기 매출 내림차순
// ==========================================

use crate::domain::sales::SynthesizedRecord;
use crate::domain::types::{ComparisonMode, GroupBy};
use crate::engine::aggregator::{PeriodAggregator, PeriodSummary};
use crate::engine::period::DateRange;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, instrument};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupAnalysis {
    pub group_by: GroupBy,
    pub key: String,
    #[serde(flatten)]
    pub summary: PeriodSummary,
}

pub struct GroupAnalyzer<'a> {
    aggregator: &'a PeriodAggregator,
}

impl<'a> GroupAnalyzer<'a> {
    pub fn new(aggregator: &'a PeriodAggregator) -> Self {
        Self { aggregator }
    }

    /// 그룹별 분석
    ///
    /// search 가 있으면 그룹 키에 대소문자 무시 부분일치하는 그룹만 남긴다.
    #[instrument(skip(self, records), fields(records = records.len()))]
    pub fn analyze(
        &self,
        records: &[SynthesizedRecord],
        group_by: GroupBy,
        range: DateRange,
        mode: ComparisonMode,
        search: Option<&str>,
    ) -> Vec<GroupAnalysis> {
        let mut members: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        for record in records {
            members
                .entry(group_key(record, group_by).to_string())
                .or_default()
                .insert(record.store_name().to_string());
        }

        let needle = search
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);

        let mut groups: Vec<GroupAnalysis> = members
            .into_iter()
            .filter(|(key, _)| {
                needle
                    .as_ref()
                    .map_or(true, |n| key.to_lowercase().contains(n.as_str()))
            })
            .map(|(key, stores)| {
                let scoped: Vec<SynthesizedRecord> = records
                    .iter()
                    .filter(|r| group_key(r, group_by) == key)
                    .cloned()
                    .collect();
                let summary = self
                    .aggregator
                    .summarize_stores(&scoped, &stores, range, mode);
                GroupAnalysis {
                    group_by,
                    key,
                    summary,
                }
            })
            .collect();

        groups.sort_by(|a, b| {
            b.summary
                .current
                .total
                .amount
                .partial_cmp(&a.summary.current.total.amount)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.key.cmp(&b.key))
        });

        debug!(group_by = ?group_by, groups = groups.len(), "그룹 분석 완료");
        groups
    }
}

fn group_key(record: &SynthesizedRecord, group_by: GroupBy) -> &str {
    match group_by {
        GroupBy::Store => record.store_name(),
        GroupBy::Manager => record.manager_name(),
        GroupBy::Region => record.region(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnalyticsConfig;
    use crate::domain::sales::{FilterSelection, RawSalesRecord};
    use crate::engine::synthesizer::ChannelSynthesizer;
    use chrono::NaiveDate;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, d).unwrap()
    }

    fn records() -> Vec<SynthesizedRecord> {
        let raw = vec![
            RawSalesRecord::new("A", "김", "서울", date(5), "배민", 1_000.0, 1.0),
            RawSalesRecord::new("B", "김", "부산", date(5), "배민", 5_000.0, 1.0),
            RawSalesRecord::new("C", "이", "서울", date(5), "쿠팡이츠", 3_000.0, 1.0),
        ];
        ChannelSynthesizer::new().synthesize(&raw, &FilterSelection::all())
    }

    fn range() -> DateRange {
        DateRange::new(date(1), date(10)).unwrap()
    }

    #[test]
    fn test_group_by_manager() {
        let aggregator = PeriodAggregator::new(&AnalyticsConfig::default(), date(19));
        let groups = GroupAnalyzer::new(&aggregator).analyze(
            &records(),
            GroupBy::Manager,
            range(),
            ComparisonMode::TrailingWindow,
            None,
        );
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].key, "김");
        assert_eq!(groups[0].summary.current.total.amount, 6_000.0);
        assert_eq!(groups[0].summary.stores.len(), 2);
        assert_eq!(groups[0].summary.holidays.potential_store_days, 20);
    }

    #[test]
    fn test_group_by_region_with_search() {
        let aggregator = PeriodAggregator::new(&AnalyticsConfig::default(), date(19));
        let groups = GroupAnalyzer::new(&aggregator).analyze(
            &records(),
            GroupBy::Region,
            range(),
            ComparisonMode::TrailingWindow,
            Some("서울"),
        );
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].summary.current.platform_breakdown.len(), 2);
    }

    #[test]
    fn test_store_groups_sorted_by_amount() {
        let aggregator = PeriodAggregator::new(&AnalyticsConfig::default(), date(19));
        let groups = GroupAnalyzer::new(&aggregator).analyze(
            &records(),
            GroupBy::Store,
            range(),
            ComparisonMode::TrailingWindow,
            None,
        );
        let keys: Vec<&str> = groups.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(keys, vec!["B", "C", "A"]);
    }
}
