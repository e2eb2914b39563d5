// ==========================================
// 가맹점 매출 분석 - 채널 합성 엔진
// ==========================================
// 입력: 운영 매장 필터를 거친 원본 레코드 + 담당자/매장 필터
// 출력: (매장, 일자) 그룹별
//   1) 플랫폼 레코드 (관측)
//   2) 내점 레코드 (합성) = max(0, 총매출 - 플랫폼 합)
//   3) 포장 레코드 (관측)
//   4) 자재 레코드 (관측)
//   5) 부자재 레코드 (합성) = max(0, 발주 - 원재료 - 전용유), 양수일 때만
// 총매출/발주/관측 내점 레코드는 소비되고 출력되지 않는다
// ==========================================

use crate::domain::channel::{
    classify, is_oil, is_sub_material, IN_STORE_CHANNEL, SUB_MATERIAL_CHANNEL,
};
use crate::domain::sales::{FilterSelection, RawSalesRecord, SynthesizedRecord};
use crate::domain::types::{ChannelType, SynthesisRule};
use crate::engine::manager_resolver::EffectiveManagerMap;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use tracing::{debug, info, instrument};

// ==========================================
// StoreDayGroup - (매장, 일자) 누적값
// ==========================================
#[derive(Debug, Default)]
struct StoreDayGroup {
    region: String,
    manager: String,
    total_amount: f64,
    total_count: f64,
    platform_amount: f64,
    platform_count: f64,
    platform_rows: Vec<RawSalesRecord>,
    takeout_rows: Vec<RawSalesRecord>,
    material_rows: Vec<RawSalesRecord>,
    raw_material_amount: f64,
    oil_amount: f64,
    procurement_amount: f64,
}

impl StoreDayGroup {
    fn add(&mut self, record: RawSalesRecord, channel_name: &str, channel_type: ChannelType) {
        match channel_type {
            ChannelType::Total => {
                self.total_amount += record.amount;
                self.total_count += record.order_count;
            }
            ChannelType::Platform => {
                self.platform_amount += record.amount;
                self.platform_count += record.order_count;
                self.platform_rows.push(record);
            }
            ChannelType::Takeout => self.takeout_rows.push(record),
            ChannelType::Material => {
                if is_oil(channel_name) {
                    self.oil_amount += record.amount;
                } else if !is_sub_material(channel_name) {
                    self.raw_material_amount += record.amount;
                }
                self.material_rows.push(record);
            }
            ChannelType::Procurement => self.procurement_amount += record.amount,
            // 관측 내점 값은 쓰지 않는다 (항상 차감으로 재계산)
            ChannelType::Calculated => {}
        }
    }
}

// ==========================================
// ChannelSynthesizer
// ==========================================
#[derive(Debug, Default)]
pub struct ChannelSynthesizer;

impl ChannelSynthesizer {
    pub fn new() -> Self {
        Self
    }

    /// 합성 실행
    ///
    /// 동일 입력/필터에 대해 항상 같은 순서의 같은 결과를 낸다.
    #[instrument(skip(self, records), fields(input = records.len()))]
    pub fn synthesize(
        &self,
        records: &[RawSalesRecord],
        filter: &FilterSelection,
    ) -> Vec<SynthesizedRecord> {
        let managers = EffectiveManagerMap::build(records);
        self.synthesize_with(records, filter, &managers)
    }

    /// 유효 담당자 표를 미리 만든 경우
    pub fn synthesize_with(
        &self,
        records: &[RawSalesRecord],
        filter: &FilterSelection,
        managers: &EffectiveManagerMap,
    ) -> Vec<SynthesizedRecord> {
        let mut groups: BTreeMap<(String, NaiveDate), StoreDayGroup> = BTreeMap::new();
        let mut excluded = 0usize;

        for record in records {
            if record.store_name.is_empty() || record.manager_name.is_empty() {
                excluded += 1;
                continue;
            }
            let effective = managers.resolve(record).to_string();
            if !filter.matches(&effective, &record.store_name) {
                continue;
            }

            let (channel_name, channel_type) = classify(&record.channel);
            let group = groups
                .entry((record.store_name.clone(), record.date))
                .or_insert_with(|| StoreDayGroup {
                    region: record.region.clone(),
                    manager: effective.clone(),
                    ..StoreDayGroup::default()
                });

            let mut observed = record.clone();
            observed.manager_name = effective;
            group.add(observed, &channel_name, channel_type);
        }

        let mut output = Vec::new();
        let mut synthesized = 0usize;
        for ((store, date), group) in groups {
            let before = output.len();
            Self::emit_group(&store, date, group, &mut output, &mut synthesized);
            debug!(store = %store, date = %date, rows = output.len() - before, "그룹 합성");
        }

        info!(
            records = output.len(),
            stores = managers.store_count(),
            synthesized,
            excluded,
            "채널 합성 완료"
        );
        output
    }

    fn emit_group(
        store: &str,
        date: NaiveDate,
        group: StoreDayGroup,
        output: &mut Vec<SynthesizedRecord>,
        synthesized: &mut usize,
    ) {
        output.extend(group.platform_rows.into_iter().map(SynthesizedRecord::observed));

        // 내점: 총매출 - 플랫폼 (음수는 0)
        let in_store = RawSalesRecord::new(
            store,
            group.manager.clone(),
            group.region.clone(),
            date,
            IN_STORE_CHANNEL,
            (group.total_amount - group.platform_amount).max(0.0),
            (group.total_count - group.platform_count).max(0.0),
        );
        output.push(SynthesizedRecord::synthesized(
            in_store,
            SynthesisRule::InStoreRemainder,
        ));
        *synthesized += 1;

        output.extend(group.takeout_rows.into_iter().map(SynthesizedRecord::observed));
        output.extend(group.material_rows.into_iter().map(SynthesizedRecord::observed));

        if group.procurement_amount > 0.0 {
            let remainder =
                (group.procurement_amount - group.raw_material_amount - group.oil_amount).max(0.0);
            if remainder > 0.0 {
                let sub = RawSalesRecord::new(
                    store,
                    group.manager,
                    group.region,
                    date,
                    SUB_MATERIAL_CHANNEL,
                    remainder,
                    0.0,
                );
                output.push(SynthesizedRecord::synthesized(
                    sub,
                    SynthesisRule::SubMaterialRemainder,
                ));
                *synthesized += 1;
            }
        }
    }
}
