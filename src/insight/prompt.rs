// ==========================================
// 가맹점 매출 분석 - 인사이트 프롬프트
// ==========================================
// 매장 월간 리포트 → 텍스트 생성 서비스용 프롬프트
// 응답은 구분자 [SUMMARY] [DELIVERY] [TAKEOUT] [INSTORE] 로 나눈다
// ==========================================

use crate::engine::store_report::StoreMonthlyReport;
use crate::i18n;
use serde::{Deserialize, Serialize};

pub const SUMMARY_MARKER: &str = "[SUMMARY]";
pub const DELIVERY_MARKER: &str = "[DELIVERY]";
pub const TAKEOUT_MARKER: &str = "[TAKEOUT]";
pub const INSTORE_MARKER: &str = "[INSTORE]";

// ==========================================
// InsightSections - 구분자별 응답
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightSections {
    pub summary: String,
    pub delivery: String,
    pub takeout: String,
    pub instore: String,
}

impl InsightSections {
    /// 호출 실패 시 결과 (요약에 사유, 나머지는 빈 값)
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            summary: message.into(),
            delivery: String::new(),
            takeout: String::new(),
            instore: String::new(),
        }
    }
}

/// 천 단위 구분 정수 금액 ("1,234,567")
pub fn format_amount(value: f64) -> String {
    let rounded = value.round() as i64;
    let digits = rounded.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if rounded < 0 {
        format!("-{}", out)
    } else {
        out
    }
}

/// 매장 월간 리포트 프롬프트
pub fn build_store_prompt(report: &StoreMonthlyReport) -> String {
    let stores = report.stores.join(", ");
    let current = &report.current;
    format!(
        "가맹점({stores})의 {month}월 정밀 분석 리포트를 작성하세요.\n\
         - 매출(홀+배달): {revenue}원 (배달: {platform}, 내점: {in_store})\n\
         - 별도 포장매출: {takeout}원\n\
         - 조리 효율: {efficiency:.1}수/can\n\
         - 총 휴무: {holidays}/{potential}일\n\
         \n\
         요구사항:\n\
         1) 경쟁 강도(치킨/분식/배달치킨 등)를 추정하고, 근거와 함께 높/중/낮으로 분류\n\
         2) 배달/포장/내점 각각 데이터 기반 성장 전략 제시\n\
         3) 아래 구분자 사용\n\
         {SUMMARY_MARKER}: 가맹점 현황 및 경쟁 분석 요약\n\
         {DELIVERY_MARKER}: 배달 채널 성장 전략\n\
         {TAKEOUT_MARKER}: 포장 채널 성장 전략\n\
         {INSTORE_MARKER}: 내점 채널 성장 전략\n\
         4) HTML 태그 금지, 줄바꿈만 사용\n",
        month = report.month,
        revenue = format_amount(current.total.amount),
        platform = format_amount(current.platform.amount),
        in_store = format_amount(current.in_store.amount),
        takeout = format_amount(current.takeout.amount),
        efficiency = report.efficiency.efficiency,
        holidays = report.holidays.total_holidays,
        potential = report.holidays.potential_store_days,
    )
}

/// marker 뒤(콜론 허용)부터 next 직전 또는 끝까지
fn section(text: &str, marker: &str, next: Option<&str>) -> Option<String> {
    let start = text.find(marker)? + marker.len();
    let rest = &text[start..];
    let rest = rest.strip_prefix(':').unwrap_or(rest);
    let end = next.and_then(|n| rest.find(n)).unwrap_or(rest.len());
    let body = rest[..end].trim();
    if body.is_empty() {
        None
    } else {
        Some(body.to_string())
    }
}

/// 응답 텍스트를 구분자별로 분리 (누락 구간은 안내 문구)
pub fn parse_sections(text: &str) -> InsightSections {
    let missing = || i18n::t("insight.section_missing");
    InsightSections {
        summary: section(text, SUMMARY_MARKER, Some(DELIVERY_MARKER))
            .unwrap_or_else(|| i18n::t("insight.summary_missing")),
        delivery: section(text, DELIVERY_MARKER, Some(TAKEOUT_MARKER)).unwrap_or_else(missing),
        takeout: section(text, TAKEOUT_MARKER, Some(INSTORE_MARKER)).unwrap_or_else(missing),
        instore: section(text, INSTORE_MARKER, None).unwrap_or_else(missing),
    }
}

/// 공유용 요약 텍스트
pub fn build_share_text(report: &StoreMonthlyReport, sections: &InsightSections) -> String {
    let stores = report.stores.join(", ");
    format!(
        "[{stores} 정밀 진단 리포트 - {month}]\n\
         매출(홀+배달): {revenue}원\n\
         포장: {takeout}원\n\
         효율: {efficiency:.1}수/can\n\
         \n\
         종합 진단:\n{summary}\n\
         \n\
         배달 전략: {delivery}\n\
         포장 전략: {takeout_plan}\n\
         내점 전략: {instore}",
        month = report.month,
        revenue = format_amount(report.current.total.amount),
        takeout = format_amount(report.current.takeout.amount),
        efficiency = report.efficiency.efficiency,
        summary = sections.summary,
        delivery = sections.delivery,
        takeout_plan = sections.takeout,
        instore = sections.instore,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::sales::{FilterSelection, RawSalesRecord};
    use crate::engine::store_report::StoreReportBuilder;
    use crate::engine::synthesizer::ChannelSynthesizer;
    use chrono::NaiveDate;
    use std::collections::BTreeSet;

    fn report() -> StoreMonthlyReport {
        let date = NaiveDate::from_ymd_opt(2026, 9, 1).unwrap();
        let raw = vec![
            RawSalesRecord::new("A점", "김", "서울", date, "총매출", 1_234_567.0, 50.0),
            RawSalesRecord::new("A점", "김", "서울", date, "배민", 234_567.0, 10.0),
        ];
        let records = ChannelSynthesizer::new().synthesize(&raw, &FilterSelection::all());
        let stores: BTreeSet<String> = ["A점".to_string()].into_iter().collect();
        StoreReportBuilder::new(0.1, NaiveDate::from_ymd_opt(2026, 10, 19).unwrap())
            .build(&records, &stores, date)
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(0.0), "0");
        assert_eq!(format_amount(999.0), "999");
        assert_eq!(format_amount(1_000.0), "1,000");
        assert_eq!(format_amount(1_234_567.4), "1,234,567");
        assert_eq!(format_amount(-12_000.0), "-12,000");
    }

    #[test]
    fn test_prompt_contains_figures_and_markers() {
        let prompt = build_store_prompt(&report());
        assert!(prompt.contains("A점"));
        assert!(prompt.contains("2026-09"));
        assert!(prompt.contains("1,234,567원"));
        assert!(prompt.contains("내점: 1,000,000"));
        for marker in [SUMMARY_MARKER, DELIVERY_MARKER, TAKEOUT_MARKER, INSTORE_MARKER] {
            assert!(prompt.contains(marker));
        }
    }

    #[test]
    fn test_parse_all_sections() {
        let text = "[SUMMARY]: 요약\n[DELIVERY]: 배달\n[TAKEOUT] 포장\n[INSTORE]: 내점 전략";
        let sections = parse_sections(text);
        assert_eq!(sections.summary, "요약");
        assert_eq!(sections.delivery, "배달");
        assert_eq!(sections.takeout, "포장");
        assert_eq!(sections.instore, "내점 전략");
    }

    #[test]
    fn test_missing_sections_fall_back() {
        let sections = parse_sections("[SUMMARY]: 요약만 있음");
        assert_eq!(sections.summary, "요약만 있음");
        assert!(!sections.delivery.is_empty());
        assert!(!sections.instore.is_empty());

        let sections = parse_sections("구분자 없는 응답");
        assert!(!sections.summary.is_empty());
        assert_ne!(sections.summary, "구분자 없는 응답");
    }

    #[test]
    fn test_share_text() {
        let sections = InsightSections {
            summary: "요약".into(),
            delivery: "배달".into(),
            takeout: "포장".into(),
            instore: "내점".into(),
        };
        let text = build_share_text(&report(), &sections);
        assert!(text.starts_with("[A점 정밀 진단 리포트 - 2026-09]"));
        assert!(text.contains("내점 전략: 내점"));
    }
}
