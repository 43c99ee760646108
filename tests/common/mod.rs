#![allow(dead_code)]

use stockexplorer::domain::error::ExplorerError;
use stockexplorer::domain::record::{Cell, RawRecord};
use stockexplorer::ports::record_store::RecordStore;

pub struct MockRecordStore {
    pub records: Vec<RawRecord>,
    pub error: Option<String>,
}

impl MockRecordStore {
    pub fn new(records: Vec<RawRecord>) -> Self {
        Self {
            records,
            error: None,
        }
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            records: Vec::new(),
            error: Some(reason.to_string()),
        }
    }
}

impl RecordStore for MockRecordStore {
    fn fetch_all(&self) -> Result<Vec<RawRecord>, ExplorerError> {
        if let Some(reason) = &self.error {
            return Err(ExplorerError::Database {
                reason: reason.clone(),
            });
        }
        Ok(self.records.clone())
    }

    fn fetch_preview(&self, limit: usize) -> Result<Vec<RawRecord>, ExplorerError> {
        Ok(self.fetch_all()?.into_iter().take(limit).collect())
    }
}

/// A store document with the five core fields, an `_id` and one
/// percentage metric.
pub fn make_doc(
    id: i64,
    date: &str,
    client: &str,
    security: &str,
    buy_sell: &str,
    kind: &str,
    three_month: &str,
) -> RawRecord {
    RawRecord::new()
        .with("_id", Cell::Integer(id))
        .with("date", date)
        .with("client_name", client)
        .with("security_name", security)
        .with("buy_sell", buy_sell)
        .with("type", kind)
        .with("3m_%", three_month)
}

/// Six trades across 2023 and 2024.
pub fn sample_docs() -> Vec<RawRecord> {
    vec![
        make_doc(1, "05-01-2023", "Acme", "BHP", "Buy", "Equity", "3.5%"),
        make_doc(2, "10-02-2023", "Acme", "CBA", "Sell", "Equity", "-1.2%"),
        make_doc(3, "10-02-2023", "Globex", "BHP", "Buy", "Option", "0%"),
        make_doc(4, "01-01-2024", "Globex", "WBC", "Sell", "Equity", "12%"),
        make_doc(5, "15-01-2024", "Initech", "CBA", "Buy", "Bond", "n/a"),
        make_doc(6, "15-01-2024", "Acme", "BHP", "Sell", "Equity", "-0.5%"),
    ]
}

pub const SAMPLE_CSV: &str = "\
date,client_name,security_name,buy_sell,type,3m_%,12m_%
05-01-2023,Acme,BHP,Buy,Equity,3.5%,10%
10-02-2023,Acme,CBA,Sell,Equity,-1.2%,
10-02-2023,Globex,BHP,Buy,Option,0%,-4%
01-01-2024,Globex,WBC,Sell,Equity,12%,1%
";
