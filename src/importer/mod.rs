// ==========================================
// 가맹점 매출 분석 - 가져오기 계층
// ==========================================
// 책임: 채널별 가로형 시트(CSV/Excel) → 세로형 원본 레코드
// ==========================================

pub mod cell_cleaner;
pub mod error;
pub mod feed_importer_impl;
pub mod feed_importer_trait;
pub mod file_parser;
pub mod record_merger;
pub mod sheet;

// 핵심 타입 재수출
pub use cell_cleaner::CellCleaner;
pub use error::{ImportError, ImportResult};
pub use feed_importer_impl::FeedImporterImpl;
pub use file_parser::{excel_cell_text, CsvParser, ExcelParser, UniversalFileParser};
pub use record_merger::{MergeReport, RecordMerger, SheetFailure};
pub use sheet::{FeedSheet, SheetGrid, SheetKind};

// Trait 인터페이스 재수출
pub use feed_importer_trait::{FeedImporter, SheetParser};
