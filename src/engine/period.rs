// ==========================================
// 가맹점 매출 분석 - 기간 계산
// ==========================================
// DateRange: 양끝 포함 일 단위 구간
// 전기 구간: TrailingWindow → 직전 동일 길이
//            MonthOverMonth → 전월 1일 ~ (종료일 - 1개월)
// ==========================================

use crate::domain::types::ComparisonMode;
use chrono::{Datelike, Duration, Months, NaiveDate};
use serde::{Deserialize, Serialize};

// ==========================================
// DateRange - 양끝 포함 구간
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// start > end 이면 None
    pub fn new(start: NaiveDate, end: NaiveDate) -> Option<Self> {
        if start > end {
            return None;
        }
        Some(Self { start, end })
    }

    /// 해당 월 전체 (1일 ~ 말일)
    pub fn month_of(date: NaiveDate) -> Self {
        let start = first_day_of_month(date);
        Self {
            start,
            end: last_day_of_month(start),
        }
    }

    /// end 가 속한 달의 1일 ~ end (시작일과 무관)
    pub fn month_to_date(end: NaiveDate) -> Self {
        Self {
            start: first_day_of_month(end),
            end,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// 포함 일수
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    pub fn iter_days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |d| *d <= end)
    }

    /// 비교 기준 전기 구간
    pub fn previous(&self, mode: ComparisonMode) -> Self {
        match mode {
            ComparisonMode::TrailingWindow => {
                let len = Duration::days(self.days());
                Self {
                    start: self.start - len,
                    end: self.start - Duration::days(1),
                }
            }
            ComparisonMode::MonthOverMonth => {
                let start = first_day_of_month(self.start)
                    .checked_sub_months(Months::new(1))
                    .unwrap_or(self.start);
                // 말일 보정은 chrono 가 처리 (3/31 → 2/28)
                let end = self.end.checked_sub_months(Months::new(1)).unwrap_or(start);
                Self {
                    start,
                    end: end.max(start),
                }
            }
        }
    }
}

impl ComparisonMode {
    /// 종료일이 오늘 또는 어제면 월 누계 비교
    ///
    /// 호출자(API)가 한 번 결정해 엔진에 넘긴다.
    pub fn infer(end: NaiveDate, today: NaiveDate) -> Self {
        let yesterday = today - Duration::days(1);
        if end == today || end == yesterday {
            ComparisonMode::MonthOverMonth
        } else {
            ComparisonMode::TrailingWindow
        }
    }
}

pub fn first_day_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

pub fn last_day_of_month(date: NaiveDate) -> NaiveDate {
    first_day_of_month(date)
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(date)
}

/// "YYYY-MM" 형식 월 라벨
pub fn month_label(date: NaiveDate) -> String {
    format!("{:04}-{:02}", date.year(), date.month())
}
