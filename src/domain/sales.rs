// ==========================================
// 가맹점 매출 분석 - 매출 레코드
// ==========================================
// RawSalesRecord: 매장/일자/채널 단위 원본 레코드
// SynthesizedRecord: 합성 단계 출력 (표준 채널명 + 유형 + 출처)
// ==========================================

use crate::domain::channel::classify;
use crate::domain::types::{ChannelType, RecordOrigin, SynthesisRule};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// RawSalesRecord - 원본 매출 레코드
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSalesRecord {
    pub store_name: String,
    /// 레코드 일자 기준 담당자 (매장 고정 속성 아님)
    pub manager_name: String,
    pub region: String,
    pub date: NaiveDate,
    /// 표준 채널명 또는 정규화 전 원본 라벨
    pub channel: String,
    pub amount: f64,
    pub order_count: f64,
}

impl RawSalesRecord {
    pub fn new(
        store_name: impl Into<String>,
        manager_name: impl Into<String>,
        region: impl Into<String>,
        date: NaiveDate,
        channel: impl Into<String>,
        amount: f64,
        order_count: f64,
    ) -> Self {
        Self {
            store_name: store_name.into(),
            manager_name: manager_name.into(),
            region: region.into(),
            date,
            channel: channel.into(),
            amount,
            order_count,
        }
    }
}

// ==========================================
// SynthesizedRecord - 합성 결과 레코드
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SynthesizedRecord {
    /// manager_name 은 유효 담당자로 치환된 상태
    #[serde(flatten)]
    pub record: RawSalesRecord,
    /// 표준 채널명
    pub canonical_channel: String,
    pub channel_type: ChannelType,
    pub origin: RecordOrigin,
}

impl SynthesizedRecord {
    /// 관측 레코드 (라벨 분류 포함)
    pub fn observed(record: RawSalesRecord) -> Self {
        let (canonical_channel, channel_type) = classify(&record.channel);
        Self {
            record,
            canonical_channel,
            channel_type,
            origin: RecordOrigin::Observed,
        }
    }

    /// 합성 레코드 (채널 라벨 = 표준명)
    pub fn synthesized(record: RawSalesRecord, rule: SynthesisRule) -> Self {
        let (canonical_channel, channel_type) = classify(&record.channel);
        Self {
            record,
            canonical_channel,
            channel_type,
            origin: RecordOrigin::Synthesized(rule),
        }
    }

    pub fn store_name(&self) -> &str {
        &self.record.store_name
    }

    pub fn manager_name(&self) -> &str {
        &self.record.manager_name
    }

    pub fn region(&self) -> &str {
        &self.record.region
    }

    pub fn date(&self) -> NaiveDate {
        self.record.date
    }

    pub fn amount(&self) -> f64 {
        self.record.amount
    }

    pub fn order_count(&self) -> f64 {
        self.record.order_count
    }

    /// 매출 집계 대상 (플랫폼 + 내점)
    pub fn is_revenue(&self) -> bool {
        self.channel_type == ChannelType::Platform || self.channel_type == ChannelType::Calculated
    }

    /// 포장 (유형 또는 원본 라벨 기준)
    pub fn is_takeout(&self) -> bool {
        self.channel_type == ChannelType::Takeout
            || self.record.channel == crate::domain::channel::TAKEOUT_CHANNEL
    }
}

// ==========================================
// FilterSelection - 담당자/매장 필터
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSelection {
    pub manager: Option<String>,
    pub store: Option<String>,
}

impl FilterSelection {
    pub fn all() -> Self {
        Self::default()
    }

    /// "all" 및 빈 문자열은 필터 없음으로 취급
    pub fn from_params(manager: Option<&str>, store: Option<&str>) -> Self {
        fn normalize(value: Option<&str>) -> Option<String> {
            value
                .map(str::trim)
                .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case("all"))
                .map(str::to_string)
        }
        Self {
            manager: normalize(manager),
            store: normalize(store),
        }
    }

    pub fn matches(&self, effective_manager: &str, store_name: &str) -> bool {
        if let Some(manager) = &self.manager {
            if manager != effective_manager {
                return false;
            }
        }
        if let Some(store) = &self.store {
            if store != store_name {
                return false;
            }
        }
        true
    }
}
