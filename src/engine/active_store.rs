// ==========================================
// 가맹점 매출 분석 - 운영 매장 필터
// ==========================================
// 기준일의 연도에 레코드가 하나라도 있는 매장 = 운영 매장
// 폐점 매장은 필터 선택지와 집계 모두에서 제외한다
// ==========================================

use crate::domain::sales::RawSalesRecord;
use crate::engine::manager_resolver::EffectiveManagerMap;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::debug;

pub fn active_stores(records: &[RawSalesRecord], reference_date: NaiveDate) -> BTreeSet<String> {
    let year = reference_date.year();
    records
        .iter()
        .filter(|r| r.date.year() == year && !r.store_name.is_empty())
        .map(|r| r.store_name.clone())
        .collect()
}

/// 운영 매장 레코드만 남긴다 (연도 무관, 매장 기준)
pub fn retain_active(records: Vec<RawSalesRecord>, reference_date: NaiveDate) -> Vec<RawSalesRecord> {
    let active = active_stores(&records, reference_date);
    let before = records.len();
    let kept: Vec<RawSalesRecord> = records
        .into_iter()
        .filter(|r| active.contains(&r.store_name))
        .collect();
    debug!(
        active_stores = active.len(),
        before,
        after = kept.len(),
        "운영 매장 필터 적용"
    );
    kept
}

// ==========================================
// FilterOptions - 담당자/매장 선택지
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptions {
    pub managers: Vec<String>,
    pub stores: Vec<String>,
}

/// 선택지 생성
///
/// 담당자 목록은 운영 매장의 유효 담당자,
/// 매장 목록은 선택된 담당자(있으면)가 현재 맡은 운영 매장.
pub fn filter_options(
    records: &[RawSalesRecord],
    reference_date: NaiveDate,
    manager: Option<&str>,
) -> FilterOptions {
    let active = active_stores(records, reference_date);
    let managers_map =
        EffectiveManagerMap::build(records.iter().filter(|r| active.contains(&r.store_name)));

    let managers = managers_map.managers();

    let stores = match manager {
        Some(m) => managers_map.stores_of(m),
        None => active,
    };

    FilterOptions {
        managers: managers.into_iter().collect(),
        stores: stores.into_iter().collect(),
    }
}
