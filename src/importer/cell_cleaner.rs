// ==========================================
// 가맹점 매출 분석 - 셀 정제
// ==========================================
// 숫자 셀: 숫자/마침표/마이너스 외 제거 후 파싱, 실패 시 0
// 날짜 헤더: 일 / 월-일 / 연-월-일 → 기준일의 연·월로 보완
// ==========================================

use chrono::{Datelike, NaiveDate};

pub struct CellCleaner {
    /// 연/월 누락 시 보완에 쓰는 기준일
    reference_date: NaiveDate,
}

impl CellCleaner {
    pub fn new(reference_date: NaiveDate) -> Self {
        Self { reference_date }
    }

    /// 텍스트 셀 정제 (빈 값 → None)
    pub fn clean_text(&self, value: Option<&String>) -> Option<String> {
        value
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    }

    /// 숫자 셀 파싱
    ///
    /// "12,000원" → 12000, "" → 0, "abc" → 0, "1.2.3" → 0
    pub fn parse_number(&self, value: &str) -> f64 {
        let digits: String = value
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
            .collect();
        if digits.is_empty() {
            return 0.0;
        }
        match digits.parse::<f64>() {
            Ok(v) if v.is_finite() => v,
            _ => 0.0,
        }
    }

    /// 날짜 헤더 해석
    ///
    /// - "5"          → 기준연-기준월-05
    /// - "3/1", "3.1" → 기준연-03-01
    /// - "25.3.1"     → 2025-03-01
    /// - "2026-03-01" → 그대로
    ///
    /// 완전한 달력 날짜가 되지 않으면 None (해당 열은 버린다)
    pub fn resolve_date_header(&self, header: &str) -> Option<NaiveDate> {
        let normalized = header.replace(['.', '/'], "-");
        let normalized = normalized.trim();
        if normalized.is_empty() {
            return None;
        }

        let parts: Vec<&str> = normalized.split('-').map(str::trim).collect();
        let year = self.reference_date.year().to_string();
        let month = format!("{:02}", self.reference_date.month());

        let (y, m, d) = match parts.as_slice() {
            [day] => (year, month, pad2(day)),
            [m, d] => (year, pad2(m), pad2(d)),
            [y, m, d] => {
                let y = if y.len() == 2 {
                    format!("20{}", y)
                } else {
                    y.to_string()
                };
                (y, pad2(m), pad2(d))
            }
            _ => return None,
        };

        if !is_fixed_digits(&y, 4) || !is_fixed_digits(&m, 2) || !is_fixed_digits(&d, 2) {
            return None;
        }

        NaiveDate::parse_from_str(&format!("{}-{}-{}", y, m, d), "%Y-%m-%d").ok()
    }
}

fn pad2(value: &str) -> String {
    format!("{:0>2}", value)
}

fn is_fixed_digits(value: &str, len: usize) -> bool {
    value.len() == len && value.chars().all(|c| c.is_ascii_digit())
}
