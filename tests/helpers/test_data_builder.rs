// ==========================================
// 테스트 데이터 빌더 - 통합 테스트용
// ==========================================

use chrono::NaiveDate;
use franchise_sales_insight::domain::sales::RawSalesRecord;
use std::fs;
use std::path::Path;

/// 테스트 기준일 (2026-10-19)
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ==========================================
// RawSalesRecord 빌더
// ==========================================

pub struct RecordBuilder {
    store_name: String,
    manager_name: String,
    region: String,
    date: NaiveDate,
    channel: String,
    amount: f64,
    order_count: f64,
}

impl RecordBuilder {
    pub fn new(store_name: &str) -> Self {
        Self {
            store_name: store_name.to_string(),
            manager_name: "김담당".to_string(),
            region: "서울".to_string(),
            date: today(),
            channel: "배민".to_string(),
            amount: 0.0,
            order_count: 0.0,
        }
    }

    pub fn manager(mut self, manager: &str) -> Self {
        self.manager_name = manager.to_string();
        self
    }

    pub fn region(mut self, region: &str) -> Self {
        self.region = region.to_string();
        self
    }

    pub fn on(mut self, y: i32, m: u32, d: u32) -> Self {
        self.date = date(y, m, d);
        self
    }

    pub fn channel(mut self, channel: &str) -> Self {
        self.channel = channel.to_string();
        self
    }

    pub fn amount(mut self, amount: f64) -> Self {
        self.amount = amount;
        self
    }

    pub fn orders(mut self, orders: f64) -> Self {
        self.order_count = orders;
        self
    }

    pub fn build(self) -> RawSalesRecord {
        RawSalesRecord::new(
            self.store_name,
            self.manager_name,
            self.region,
            self.date,
            self.channel,
            self.amount,
            self.order_count,
        )
    }
}

// ==========================================
// 피드 시트 (CSV) 작성기
// ==========================================

/// 가로형 시트 한 장을 CSV 로 기록
///
/// 열 배치: No, 담당자명, 지역, 가맹점명, 날짜...
pub struct FeedSheetWriter {
    dates: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl FeedSheetWriter {
    pub fn new(dates: &[&str]) -> Self {
        Self {
            dates: dates.iter().map(|d| d.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn row(mut self, manager: &str, region: &str, store: &str, values: &[&str]) -> Self {
        let mut row = vec![
            (self.rows.len() + 1).to_string(),
            manager.to_string(),
            region.to_string(),
            store.to_string(),
        ];
        row.extend(values.iter().map(|v| v.to_string()));
        self.rows.push(row);
        self
    }

    pub fn write(self, dir: &Path, sheet_name: &str) {
        let mut writer = csv::Writer::from_path(dir.join(format!("{}.csv", sheet_name))).unwrap();
        let mut header = vec![
            "No".to_string(),
            "담당자명".to_string(),
            "지역".to_string(),
            "가맹점명".to_string(),
        ];
        header.extend(self.dates.iter().cloned());
        writer.write_record(&header).unwrap();
        for row in &self.rows {
            writer.write_record(row).unwrap();
        }
        writer.flush().unwrap();
    }
}

pub fn write_raw(dir: &Path, file_name: &str, content: &str) {
    fs::write(dir.join(file_name), content).unwrap();
}
