// ==========================================
// 가맹점 매출 분석 - 파일 파서
// ==========================================
// 지원: Excel (.xlsx/.xls, 첫 번째 시트) / CSV (.csv)
// 출력: 헤더 + 데이터 행 격자 (모든 셀 trim)
// Excel 날짜형 셀은 일련번호 대신 YYYY-MM-DD 문자열
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use crate::importer::feed_importer_trait::SheetParser;
use crate::importer::sheet::SheetGrid;
use calamine::{open_workbook_auto, Data, DataType, Reader};
use csv::ReaderBuilder;
use std::fs::File;
use std::path::Path;

/// 지원 확장자
pub const SUPPORTED_EXTENSIONS: &[&str] = &["csv", "xlsx", "xls"];

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

// ==========================================
// CSV Parser
// ==========================================
pub struct CsvParser;

impl SheetParser for CsvParser {
    fn parse_grid(&self, file_path: &Path) -> ImportResult<SheetGrid> {
        if !file_path.exists() {
            return Err(ImportError::FileNotFound(file_path.display().to_string()));
        }

        let ext = extension_of(file_path);
        if ext != "csv" {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        let file = File::open(file_path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(false) // 헤더도 격자의 첫 행으로 읽는다
            .flexible(true) // 행 길이 불일치 허용
            .from_reader(file);

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result?;
            rows.push(record.iter().map(|v| v.trim().to_string()).collect());
        }

        Ok(SheetGrid::from_rows(rows))
    }
}

// ==========================================
// Excel Parser
// ==========================================
pub struct ExcelParser;

impl SheetParser for ExcelParser {
    fn parse_grid(&self, file_path: &Path) -> ImportResult<SheetGrid> {
        if !file_path.exists() {
            return Err(ImportError::FileNotFound(file_path.display().to_string()));
        }

        let ext = extension_of(file_path);
        if ext != "xlsx" && ext != "xls" {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        let mut workbook = open_workbook_auto(file_path)?;

        // 첫 번째 시트만 읽는다
        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| ImportError::ExcelParseError("Excel 파일에 시트가 없음".to_string()))?;

        let range = workbook.worksheet_range(&sheet_name)?;

        let rows = range
            .rows()
            .map(|row| row.iter().map(excel_cell_text).collect())
            .collect();

        Ok(SheetGrid::from_rows(rows))
    }
}

/// Excel 셀 → 문자열
///
/// 날짜 헤더가 날짜형으로 저장된 경우 일련번호("46296")가 아니라
/// "2026-10-01" 로 돌려준다.
pub fn excel_cell_text(cell: &Data) -> String {
    let text = match cell {
        Data::DateTime(_) => cell
            .as_date()
            .map(|date| date.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| cell.to_string()),
        Data::DateTimeIso(iso) => iso.split('T').next().unwrap_or(iso).to_string(),
        _ => cell.to_string(),
    };
    text.trim().to_string()
}

// ==========================================
// 범용 파서 (확장자로 자동 선택)
// ==========================================
pub struct UniversalFileParser;

impl UniversalFileParser {
    pub fn is_supported(path: &Path) -> bool {
        SUPPORTED_EXTENSIONS.contains(&extension_of(path).as_str())
    }
}

impl SheetParser for UniversalFileParser {
    fn parse_grid(&self, file_path: &Path) -> ImportResult<SheetGrid> {
        match extension_of(file_path).as_str() {
            "csv" => CsvParser.parse_grid(file_path),
            "xlsx" | "xls" => ExcelParser.parse_grid(file_path),
            other => Err(ImportError::UnsupportedFormat(other.to_string())),
        }
    }
}
