// ==========================================
// 가맹점 매출 분석 - 조리 효율
// ==========================================
// 효율 = 원재료 발주 수량 / 전용유 발주 수량 (전용유 > 0 일 때)
// 구간 경계 (품질 관리 기준, 변경 금지):
//   eff == 0        → 미발주
//   60 <= eff <= 70 → 정상
//   30 <  eff < 60  → 저효율
//   eff > 70        → 과효율 (외부 전용유 의심)
//   그 외           → 주의
// ==========================================

use crate::domain::types::EfficiencyBand;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

pub const NORMAL_MIN: f64 = 60.0;
pub const NORMAL_MAX: f64 = 70.0;
pub const LOW_MIN: f64 = 30.0;

pub fn efficiency(raw_orders: f64, oil_orders: f64) -> f64 {
    if oil_orders > 0.0 {
        raw_orders / oil_orders
    } else {
        0.0
    }
}

pub fn classify_efficiency(eff: f64) -> EfficiencyBand {
    if eff == 0.0 {
        EfficiencyBand::NotOrdered
    } else if (NORMAL_MIN..=NORMAL_MAX).contains(&eff) {
        EfficiencyBand::Normal
    } else if eff > LOW_MIN && eff < NORMAL_MIN {
        EfficiencyBand::Low
    } else if eff > NORMAL_MAX {
        EfficiencyBand::Over
    } else {
        EfficiencyBand::Suspicious
    }
}

// ==========================================
// EfficiencyReading - 수량 + 효율 + 구간
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EfficiencyReading {
    pub raw_orders: f64,
    pub oil_orders: f64,
    pub efficiency: f64,
    pub band: EfficiencyBand,
}

impl EfficiencyReading {
    pub fn from_counts(raw_orders: f64, oil_orders: f64) -> Self {
        let eff = efficiency(raw_orders, oil_orders);
        Self {
            raw_orders,
            oil_orders,
            efficiency: eff,
            band: classify_efficiency(eff),
        }
    }
}

impl Default for EfficiencyReading {
    fn default() -> Self {
        Self::from_counts(0.0, 0.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreEfficiency {
    pub store_name: String,
    #[serde(flatten)]
    pub reading: EfficiencyReading,
}

/// 효율 오름차순 (동률은 매장명)
pub fn sort_by_efficiency(list: &mut [StoreEfficiency]) {
    list.sort_by(|a, b| {
        a.reading
            .efficiency
            .partial_cmp(&b.reading.efficiency)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.store_name.cmp(&b.store_name))
    });
}
