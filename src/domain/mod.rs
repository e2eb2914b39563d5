// ==========================================
// 가맹점 매출 분석 - 도메인 계층
// ==========================================
// 책임: 레코드/타입/채널 분류표 정의
// 원칙: 데이터 접근 로직 없음, 집계 로직 없음
// ==========================================

pub mod channel;
pub mod sales;
pub mod types;

// 핵심 타입 재노출
pub use channel::{
    channel_type, classify, normalize_channel, ChannelGroup, CHANNEL_GROUPS, IN_STORE_CHANNEL,
    OIL_CHANNEL, PROCUREMENT_CHANNEL, SUB_MATERIAL_CHANNEL, TAKEOUT_CHANNEL, UNKNOWN_CHANNEL,
};
pub use sales::{FilterSelection, RawSalesRecord, SynthesizedRecord};
pub use types::{
    ChannelType, ComparisonMode, EfficiencyBand, GroupBy, RecordOrigin, SynthesisRule,
    TrendGranularity,
};
