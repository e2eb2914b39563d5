// ==========================================
// 가맹점 매출 분석 - 증감률
// ==========================================
// 증감률 = (당기 - 전기) / 전기 * 100, 전기 > 0 일 때만
// 전기 <= 0 → 비교 불가 (0% 도 NaN 도 아님)
// ==========================================

use serde::{Deserialize, Serialize};

pub fn growth_rate(current: f64, previous: f64) -> Option<f64> {
    if previous > 0.0 {
        Some((current - previous) / previous * 100.0)
    } else {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Growth {
    pub current: f64,
    pub previous: f64,
    pub rate: Option<f64>,
    /// |rate| 가 임계값 미만 (배지 숨김)
    pub flat: bool,
}

impl Growth {
    pub fn new(current: f64, previous: f64, flat_threshold_pct: f64) -> Self {
        let rate = growth_rate(current, previous);
        let flat = rate.map_or(false, |r| r.abs() < flat_threshold_pct);
        Self {
            current,
            previous,
            rate,
            flat,
        }
    }

    /// 증감 배지 표시 여부
    pub fn is_badge_visible(&self) -> bool {
        self.rate.is_some() && !self.flat
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_growth_rate() {
        assert_eq!(growth_rate(150.0, 100.0), Some(50.0));
        assert_eq!(growth_rate(50.0, 100.0), Some(-50.0));
        assert_eq!(growth_rate(0.0, 0.0), None);
        assert_eq!(growth_rate(100.0, 0.0), None);
        assert_eq!(growth_rate(100.0, -5.0), None);
    }

    #[test]
    fn test_badge_visibility() {
        let absent = Growth::new(0.0, 0.0, 0.1);
        assert!(absent.rate.is_none());
        assert!(!absent.is_badge_visible());

        let flat = Growth::new(100.05, 100.0, 0.1);
        assert!(flat.flat);
        assert!(!flat.is_badge_visible());

        let up = Growth::new(120.0, 100.0, 0.1);
        assert!(up.is_badge_visible());
    }
}
