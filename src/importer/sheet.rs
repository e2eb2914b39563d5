// ==========================================
// 가맹점 매출 분석 - 시트 구조
// ==========================================
// SheetGrid: 헤더 1행 + 데이터 행 (문자열 셀)
// FeedSheet: 시트명에서 채널/종류(금액·건수)를 판별한 시트
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use serde::{Deserialize, Serialize};

// ==========================================
// SheetGrid - 파싱된 시트
// ==========================================
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SheetGrid {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl SheetGrid {
    /// 첫 행을 헤더로 분리 (완전히 빈 행은 제외)
    pub fn from_rows(rows: Vec<Vec<String>>) -> Self {
        let mut iter = rows
            .into_iter()
            .filter(|row| row.iter().any(|cell| !cell.trim().is_empty()));
        let header = iter.next().unwrap_or_default();
        Self {
            header,
            rows: iter.collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ==========================================
// SheetKind - 금액 시트 / 건수 시트
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SheetKind {
    Amount,
    Count,
}

// ==========================================
// FeedSheet - 채널이 확정된 시트
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct FeedSheet {
    pub name: String,
    pub channel: String,
    pub kind: SheetKind,
    pub grid: SheetGrid,
}

impl FeedSheet {
    /// 시트명으로 채널/종류 판별
    ///
    /// "쿠팡이츠 건수" → (쿠팡이츠, Count), "쿠팡이츠" → (쿠팡이츠, Amount)
    pub fn from_name(name: &str, count_marker: &str, grid: SheetGrid) -> ImportResult<Self> {
        let trimmed = name.trim();
        let is_count = !count_marker.is_empty() && trimmed.contains(count_marker);
        let channel = if is_count {
            trimmed.replacen(count_marker, "", 1).trim().to_string()
        } else {
            trimmed.to_string()
        };

        if channel.is_empty() {
            return Err(ImportError::InvalidSheetName(name.to_string()));
        }

        Ok(Self {
            name: trimmed.to_string(),
            channel,
            kind: if is_count {
                SheetKind::Count
            } else {
                SheetKind::Amount
            },
            grid,
        })
    }
}
