// ==========================================
// 가맹점 매출 분석 - 채널 분류표
// ==========================================
// 원본 채널 라벨 → 표준 채널명 (키워드 부분 일치)
// 순서가 곧 우선순위: "배민1" 이 "배민" 보다 먼저 와야 한다
// ==========================================

use crate::domain::types::ChannelType;
use serde::Serialize;

/// 내점 채널 (합성)
pub const IN_STORE_CHANNEL: &str = "내점";
/// 포장 채널
pub const TAKEOUT_CHANNEL: &str = "포장";
/// 전용유 채널
pub const OIL_CHANNEL: &str = "전용유";
/// 부자재 채널 (합성 잔여분 포함)
pub const SUB_MATERIAL_CHANNEL: &str = "부자재";
/// 총발주 채널
pub const PROCUREMENT_CHANNEL: &str = "발주";
/// 라벨 없음
pub const UNKNOWN_CHANNEL: &str = "기타";

// ==========================================
// ChannelGroup - 분류표 항목
// ==========================================
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ChannelGroup {
    pub name: &'static str,
    pub channel_type: ChannelType,
    pub keywords: &'static [&'static str],
}

/// 채널 분류표 (선언 순서대로 평가, 첫 일치 채택)
pub const CHANNEL_GROUPS: &[ChannelGroup] = &[
    ChannelGroup {
        name: "총매출",
        channel_type: ChannelType::Total,
        keywords: &["일매출", "총매출", "전체매출", "total"],
    },
    ChannelGroup {
        name: "배민1",
        channel_type: ChannelType::Platform,
        keywords: &["배민1", "baemin1", "배민one", "배민원"],
    },
    ChannelGroup {
        name: "배민",
        channel_type: ChannelType::Platform,
        keywords: &["배달의민족", "배민배달", "배민"],
    },
    ChannelGroup {
        name: "요기배달",
        channel_type: ChannelType::Platform,
        keywords: &["요기배달"],
    },
    ChannelGroup {
        name: "요기요",
        channel_type: ChannelType::Platform,
        keywords: &["요기요", "yogiyo"],
    },
    ChannelGroup {
        name: "쿠팡이츠",
        channel_type: ChannelType::Platform,
        keywords: &["쿠팡이츠", "쿠팡", "coupang"],
    },
    ChannelGroup {
        name: "위메프오",
        channel_type: ChannelType::Platform,
        keywords: &["위메프오", "위메프", "wemakeprice"],
    },
    ChannelGroup {
        name: "땡겨요",
        channel_type: ChannelType::Platform,
        keywords: &["땡겨요", "ddangyo"],
    },
    ChannelGroup {
        name: "먹깨비",
        channel_type: ChannelType::Platform,
        keywords: &["먹깨비", "mukkebi"],
    },
    ChannelGroup {
        name: "자사앱",
        channel_type: ChannelType::Platform,
        keywords: &["자사앱", "자체앱"],
    },
    ChannelGroup {
        name: "전화",
        channel_type: ChannelType::Platform,
        keywords: &["전화", "콜주문"],
    },
    ChannelGroup {
        name: TAKEOUT_CHANNEL,
        channel_type: ChannelType::Takeout,
        keywords: &["포장", "테이크아웃", "takeout"],
    },
    ChannelGroup {
        name: IN_STORE_CHANNEL,
        channel_type: ChannelType::Calculated,
        keywords: &["내점", "홀", "다이닝"],
    },
    ChannelGroup {
        name: "절단육",
        channel_type: ChannelType::Material,
        keywords: &["절단육"],
    },
    ChannelGroup {
        name: "순살(800g)",
        channel_type: ChannelType::Material,
        keywords: &["정육800g", "순살800g"],
    },
    ChannelGroup {
        name: "콤보",
        channel_type: ChannelType::Material,
        keywords: &["콤보"],
    },
    ChannelGroup {
        name: "순살(600g)",
        channel_type: ChannelType::Material,
        keywords: &["정육600g", "순살600g"],
    },
    ChannelGroup {
        name: "근위",
        channel_type: ChannelType::Material,
        keywords: &["근위"],
    },
    ChannelGroup {
        name: OIL_CHANNEL,
        channel_type: ChannelType::Material,
        keywords: &["전용유", "식용유", "오일", "oil", "튀김유"],
    },
    ChannelGroup {
        name: SUB_MATERIAL_CHANNEL,
        channel_type: ChannelType::Material,
        keywords: &["부자재", "소모품", "박스", "비닐", "sub"],
    },
    ChannelGroup {
        name: PROCUREMENT_CHANNEL,
        channel_type: ChannelType::Procurement,
        keywords: &["발주", "총발주", "매입", "procurement"],
    },
];

/// 소문자화 후 영문/숫자/한글 음절 이외 문자 제거
fn clean_label(value: &str) -> String {
    value
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || ('가'..='힣').contains(c))
        .collect()
}

/// 원본 라벨 → 표준 채널명
///
/// - 분류표 키워드가 정제된 라벨에 포함되면 해당 표준명
/// - 일치 없음 → 앞뒤 공백 제거한 원본 라벨 그대로
/// - 빈 라벨 → "기타"
pub fn normalize_channel(label: &str) -> String {
    let trimmed = label.trim();
    if trimmed.is_empty() {
        return UNKNOWN_CHANNEL.to_string();
    }

    let cleaned = clean_label(trimmed);
    for group in CHANNEL_GROUPS {
        let matched = group.keywords.iter().any(|keyword| {
            let cleaned_keyword = clean_label(keyword);
            !cleaned_keyword.is_empty() && cleaned.contains(&cleaned_keyword)
        });
        if matched {
            return group.name.to_string();
        }
    }

    trimmed.to_string()
}

/// 표준 채널명 → 채널 유형
///
/// 분류표에 없는 이름은 Platform 으로 취급한다 (기존 동작 유지).
pub fn channel_type(name: &str) -> ChannelType {
    match CHANNEL_GROUPS.iter().find(|group| group.name == name) {
        Some(group) => group.channel_type,
        None => {
            tracing::debug!(channel = %name, "분류표에 없는 채널, platform 으로 분류");
            ChannelType::Platform
        }
    }
}

/// 원본 라벨을 한 번에 (표준명, 유형) 으로 분류
pub fn classify(label: &str) -> (String, ChannelType) {
    let name = normalize_channel(label);
    let channel_type = channel_type(&name);
    (name, channel_type)
}

pub fn is_oil(name: &str) -> bool {
    name == OIL_CHANNEL
}

/// 부자재 또는 발주 (원재료 집계에서 제외)
pub fn is_sub_material(name: &str) -> bool {
    name == SUB_MATERIAL_CHANNEL || name == PROCUREMENT_CHANNEL
}

/// 원재료 = material 유형 중 전용유/부자재/발주 제외
pub fn is_raw_material(name: &str, channel_type: ChannelType) -> bool {
    channel_type == ChannelType::Material && !is_oil(name) && !is_sub_material(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_platform_labels() {
        assert_eq!(normalize_channel("배달의민족"), "배민");
        assert_eq!(normalize_channel("쿠팡 이츠"), "쿠팡이츠");
        assert_eq!(normalize_channel("Coupang Eats"), "쿠팡이츠");
        assert_eq!(normalize_channel("  요기요  "), "요기요");
    }

    #[test]
    fn test_declaration_order_wins() {
        // "배민1" 은 "배민" 키워드도 포함하지만 먼저 선언된 항목이 이긴다
        assert_eq!(normalize_channel("배민1"), "배민1");
        assert_eq!(normalize_channel("배민 원"), "배민1");
        assert_eq!(normalize_channel("배민"), "배민");
        // "요기배달" 은 "요기요" 보다 먼저
        assert_eq!(normalize_channel("요기배달"), "요기배달");
        // "총발주" 는 "발주" 키워드를 가진 procurement 로
        assert_eq!(normalize_channel("총발주"), "발주");
    }

    #[test]
    fn test_normalize_materials() {
        assert_eq!(normalize_channel("정육800g"), "순살(800g)");
        assert_eq!(normalize_channel("순살 (600g)"), "순살(600g)");
        assert_eq!(normalize_channel("식용유"), "전용유");
        assert_eq!(normalize_channel("박스"), "부자재");
    }

    #[test]
    fn test_unmatched_and_empty() {
        assert_eq!(normalize_channel("  신규플랫폼 "), "신규플랫폼");
        assert_eq!(normalize_channel(""), "기타");
        assert_eq!(normalize_channel("   "), "기타");
        // 정제 후 빈 문자열이 되어도 원본 라벨 유지
        assert_eq!(normalize_channel("!!!"), "!!!");
    }

    #[test]
    fn test_channel_type_lookup() {
        assert_eq!(channel_type("총매출"), ChannelType::Total);
        assert_eq!(channel_type("포장"), ChannelType::Takeout);
        assert_eq!(channel_type("내점"), ChannelType::Calculated);
        assert_eq!(channel_type("근위"), ChannelType::Material);
        assert_eq!(channel_type("발주"), ChannelType::Procurement);
        // 분류표에 없는 이름은 platform
        assert_eq!(channel_type("기타"), ChannelType::Platform);
        assert_eq!(channel_type("신규플랫폼"), ChannelType::Platform);
    }

    #[test]
    fn test_taxonomy_totality() {
        let samples = ["", " ", "x", "배민", "???", "총 매출", "전용유 건수", "ㅋㅋ", "12345"];
        for sample in samples {
            let (name, _channel_type) = classify(sample);
            assert!(!name.is_empty());
        }
    }

    #[test]
    fn test_material_predicates() {
        assert!(is_oil("전용유"));
        assert!(is_sub_material("부자재"));
        assert!(is_sub_material("발주"));
        assert!(is_raw_material("절단육", ChannelType::Material));
        assert!(!is_raw_material("전용유", ChannelType::Material));
        assert!(!is_raw_material("배민", ChannelType::Platform));
    }
}
