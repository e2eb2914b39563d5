// ==========================================
// 가맹점 매출 분석 - 도메인 타입 정의
// ==========================================
// 채널 유형 / 레코드 출처 / 비교 모드 / 효율 구간
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 채널 유형 (Channel Type)
// ==========================================
// 닫힌 집합: 정규화된 채널명은 반드시 이 중 하나로 분류된다
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelType {
    Total,       // 총매출 시트
    Platform,    // 배달 플랫폼
    Takeout,     // 포장
    Calculated,  // 내점 (합성)
    Material,    // 원재료/전용유/부자재
    Procurement, // 총발주
}

impl fmt::Display for ChannelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChannelType::Total => write!(f, "total"),
            ChannelType::Platform => write!(f, "platform"),
            ChannelType::Takeout => write!(f, "takeout"),
            ChannelType::Calculated => write!(f, "calculated"),
            ChannelType::Material => write!(f, "material"),
            ChannelType::Procurement => write!(f, "procurement"),
        }
    }
}

// ==========================================
// 합성 규칙 (Synthesis Rule)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SynthesisRule {
    /// 내점 = max(0, 총매출 - 플랫폼 합계)
    InStoreRemainder,
    /// 부자재 = max(0, 발주 - 원재료 - 전용유)
    SubMaterialRemainder,
}

impl fmt::Display for SynthesisRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SynthesisRule::InStoreRemainder => write!(f, "IN_STORE_REMAINDER"),
            SynthesisRule::SubMaterialRemainder => write!(f, "SUB_MATERIAL_REMAINDER"),
        }
    }
}

// ==========================================
// 레코드 출처 (Record Origin)
// ==========================================
// 관측값과 추론값을 채널명 비교 없이 구분하기 위한 태그
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "rule", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecordOrigin {
    Observed,
    Synthesized(SynthesisRule),
}

impl RecordOrigin {
    pub fn is_synthesized(&self) -> bool {
        matches!(self, RecordOrigin::Synthesized(_))
    }
}

// ==========================================
// 전기 비교 모드 (Comparison Mode)
// ==========================================
// 호출자가 한 번 결정해서 넘긴다 (엔진 내부에서 시스템 시각을 읽지 않음)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComparisonMode {
    /// 직전 동일 길이 구간
    TrailingWindow,
    /// 전월 동일 경과일 (월 누계 비교)
    MonthOverMonth,
}

impl fmt::Display for ComparisonMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComparisonMode::TrailingWindow => write!(f, "TRAILING_WINDOW"),
            ComparisonMode::MonthOverMonth => write!(f, "MONTH_OVER_MONTH"),
        }
    }
}

// ==========================================
// 조리 효율 구간 (Efficiency Band)
// ==========================================
// 품질 관리 기준: 60~70 정상
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EfficiencyBand {
    NotOrdered, // 미발주 (eff == 0)
    Normal,     // 정상 (60 <= eff <= 70)
    Low,        // 저효율 (30 < eff < 60)
    Over,       // 과효율 (eff > 70)
    Suspicious, // 주의 (그 외)
}

impl EfficiencyBand {
    /// i18n 키 접두어
    pub fn key(&self) -> &'static str {
        match self {
            EfficiencyBand::NotOrdered => "not_ordered",
            EfficiencyBand::Normal => "normal",
            EfficiencyBand::Low => "low",
            EfficiencyBand::Over => "over",
            EfficiencyBand::Suspicious => "suspicious",
        }
    }
}

impl fmt::Display for EfficiencyBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EfficiencyBand::NotOrdered => write!(f, "NOT_ORDERED"),
            EfficiencyBand::Normal => write!(f, "NORMAL"),
            EfficiencyBand::Low => write!(f, "LOW"),
            EfficiencyBand::Over => write!(f, "OVER"),
            EfficiencyBand::Suspicious => write!(f, "SUSPICIOUS"),
        }
    }
}

// ==========================================
// 그룹 기준 (Group By)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupBy {
    Store,
    Manager,
    Region,
}

// ==========================================
// 추이 집계 단위 (Trend Granularity)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendGranularity {
    Day,
    Week,
    Month,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_type_serde() {
        let json = serde_json::to_string(&ChannelType::Procurement).unwrap();
        assert_eq!(json, "\"procurement\"");

        let parsed: ChannelType = serde_json::from_str("\"calculated\"").unwrap();
        assert_eq!(parsed, ChannelType::Calculated);
    }

    #[test]
    fn test_record_origin_tagging() {
        let observed = RecordOrigin::Observed;
        let synthesized = RecordOrigin::Synthesized(SynthesisRule::InStoreRemainder);
        assert!(!observed.is_synthesized());
        assert!(synthesized.is_synthesized());

        let json = serde_json::to_string(&synthesized).unwrap();
        assert!(json.contains("IN_STORE_REMAINDER"));
    }

    #[test]
    fn test_display() {
        assert_eq!(ComparisonMode::MonthOverMonth.to_string(), "MONTH_OVER_MONTH");
        assert_eq!(EfficiencyBand::Suspicious.to_string(), "SUSPICIOUS");
        assert_eq!(EfficiencyBand::Low.key(), "low");
    }
}
