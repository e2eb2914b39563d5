// ==========================================
// 가맹점 매출 분석 - 매출 추이
// ==========================================
// 구간 길이에 따라 집계 단위 결정
//   <= 31일  → 일별 (MM/dd)
//   <= 180일 → 주별 (월요일 시작, MM/dd)
//   그 외    → 월별 (yyyy/MM)
// ==========================================

use crate::config::AnalyticsConfig;
use crate::domain::sales::SynthesizedRecord;
use crate::domain::types::{ChannelType, TrendGranularity};
use crate::engine::period::{first_day_of_month, DateRange};
use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendBucket {
    pub start: NaiveDate,
    pub label: String,
    /// 플랫폼 채널별 금액
    pub platforms: BTreeMap<String, f64>,
    pub in_store: f64,
    pub takeout: f64,
    /// 플랫폼 + 내점
    pub total: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelShare {
    pub platform: f64,
    pub in_store: f64,
    pub takeout: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendSeries {
    pub granularity: TrendGranularity,
    pub range: DateRange,
    pub buckets: Vec<TrendBucket>,
    /// 구간 전체 기준 구성비 (%), 분모 = 플랫폼 + 내점 + 포장
    pub composition: ChannelShare,
}

pub struct TrendBuilder {
    daily_max_days: i64,
    weekly_max_days: i64,
}

impl TrendBuilder {
    pub fn new(config: &AnalyticsConfig) -> Self {
        Self {
            daily_max_days: config.trend_daily_max_days,
            weekly_max_days: config.trend_weekly_max_days,
        }
    }

    pub fn granularity_for(&self, range: DateRange) -> TrendGranularity {
        let days = range.days();
        if days <= self.daily_max_days {
            TrendGranularity::Day
        } else if days <= self.weekly_max_days {
            TrendGranularity::Week
        } else {
            TrendGranularity::Month
        }
    }

    pub fn build(&self, records: &[SynthesizedRecord], range: DateRange) -> TrendSeries {
        let granularity = self.granularity_for(range);

        // 빈 구간도 0 으로 표시되도록 미리 생성
        let mut buckets: BTreeMap<NaiveDate, TrendBucket> = BTreeMap::new();
        for day in range.iter_days() {
            let start = bucket_start(day, granularity);
            buckets.entry(start).or_insert_with(|| TrendBucket {
                start,
                label: bucket_label(start, granularity),
                platforms: BTreeMap::new(),
                in_store: 0.0,
                takeout: 0.0,
                total: 0.0,
            });
        }

        for record in records.iter().filter(|r| range.contains(r.date())) {
            let start = bucket_start(record.date(), granularity);
            let Some(bucket) = buckets.get_mut(&start) else {
                continue;
            };
            if record.is_takeout() {
                bucket.takeout += record.amount();
                continue;
            }
            match record.channel_type {
                ChannelType::Platform => {
                    *bucket
                        .platforms
                        .entry(record.canonical_channel.clone())
                        .or_insert(0.0) += record.amount();
                    bucket.total += record.amount();
                }
                ChannelType::Calculated => {
                    bucket.in_store += record.amount();
                    bucket.total += record.amount();
                }
                _ => {}
            }
        }

        let buckets: Vec<TrendBucket> = buckets.into_values().collect();
        let composition = composition(&buckets);
        debug!(granularity = ?granularity, buckets = buckets.len(), "추이 계산");

        TrendSeries {
            granularity,
            range,
            buckets,
            composition,
        }
    }
}

fn bucket_start(date: NaiveDate, granularity: TrendGranularity) -> NaiveDate {
    match granularity {
        TrendGranularity::Day => date,
        TrendGranularity::Week => {
            date - Duration::days(date.weekday().num_days_from_monday() as i64)
        }
        TrendGranularity::Month => first_day_of_month(date),
    }
}

fn bucket_label(start: NaiveDate, granularity: TrendGranularity) -> String {
    match granularity {
        TrendGranularity::Day | TrendGranularity::Week => start.format("%m/%d").to_string(),
        TrendGranularity::Month => start.format("%Y/%m").to_string(),
    }
}

fn composition(buckets: &[TrendBucket]) -> ChannelShare {
    let platform: f64 = buckets.iter().map(|b| b.platforms.values().sum::<f64>()).sum();
    let in_store: f64 = buckets.iter().map(|b| b.in_store).sum();
    let takeout: f64 = buckets.iter().map(|b| b.takeout).sum();
    let whole = platform + in_store + takeout;
    if whole <= 0.0 {
        return ChannelShare::default();
    }
    ChannelShare {
        platform: platform / whole * 100.0,
        in_store: in_store / whole * 100.0,
        takeout: takeout / whole * 100.0,
    }
}
