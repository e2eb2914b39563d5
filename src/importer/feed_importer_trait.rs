// ==========================================
// 가맹점 매출 분석 - 피드 가져오기 Trait
// ==========================================
// 책임: 시트 파싱 / 피드 가져오기 인터페이스 정의 (구현 없음)
// ==========================================

use crate::domain::sales::RawSalesRecord;
use crate::importer::error::ImportResult;
use crate::importer::record_merger::MergeReport;
use crate::importer::sheet::SheetGrid;
use async_trait::async_trait;
use std::path::Path;

// ==========================================
// SheetParser Trait
// ==========================================
// 구현: CsvParser, ExcelParser
pub trait SheetParser: Send + Sync {
    /// 파일을 헤더 + 데이터 행 격자로 파싱
    ///
    /// # 반환
    /// - Ok(SheetGrid): 완전히 빈 행은 제외된 격자
    /// - Err: 파일 없음, 형식 불일치, 파싱 실패
    fn parse_grid(&self, file_path: &Path) -> ImportResult<SheetGrid>;
}

// ==========================================
// FeedImporter Trait
// ==========================================
// 구현: FeedImporterImpl
#[async_trait]
pub trait FeedImporter: Send + Sync {
    /// 피드 디렉터리의 모든 시트를 읽어 병합
    ///
    /// # 반환
    /// - Ok((레코드, 보고서)): 일부 시트가 실패해도 나머지로 결과를 만든다
    /// - Err: 디렉터리 자체를 읽을 수 없는 경우만
    async fn import_directory(
        &self,
        dir: &Path,
    ) -> ImportResult<(Vec<RawSalesRecord>, MergeReport)>;

    /// 지정한 파일 목록을 읽어 병합 (시트명 = 파일명)
    async fn import_files(
        &self,
        files: Vec<std::path::PathBuf>,
    ) -> ImportResult<(Vec<RawSalesRecord>, MergeReport)>;
}
