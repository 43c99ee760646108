//! Dataset normalization: raw store documents to typed records.
//!
//! Drops the store identifier, parses the source `date` into a
//! [`TradeDate`], and checks the core text fields. Everything else is kept
//! as-is, in source order, so exports reproduce the stored values.

use crate::domain::dataset::Dataset;
use crate::domain::error::ExplorerError;
use crate::domain::record::{
    BUY_SELL, CLIENT_NAME, Cell, DATE, RawRecord, Record, SECURITY_NAME, TEXT_FIELDS, TYPE,
    TradeDate,
};

pub const DEFAULT_ID_FIELD: &str = "_id";
pub const DEFAULT_DATE_FORMAT: &str = "%d-%m-%Y";

#[derive(Debug, Clone)]
pub struct Normalizer {
    pub id_field: String,
    pub date_format: String,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self {
            id_field: DEFAULT_ID_FIELD.to_string(),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}

impl Normalizer {
    pub fn new(id_field: impl Into<String>, date_format: impl Into<String>) -> Self {
        Self {
            id_field: id_field.into(),
            date_format: date_format.into(),
        }
    }

    pub fn normalize(&self, raw: Vec<RawRecord>) -> Result<Dataset, ExplorerError> {
        let mut columns: Vec<String> = Vec::new();
        let mut records = Vec::with_capacity(raw.len());

        for (row, doc) in raw.into_iter().enumerate() {
            for (name, _) in &doc.fields {
                if *name != self.id_field && !columns.contains(name) {
                    if row > 0 {
                        log::warn!("record {row}: column {name} not present in earlier records");
                    }
                    columns.push(name.clone());
                }
            }
            records.push(self.normalize_record(row, doc)?);
        }

        Ok(Dataset { columns, records })
    }

    fn normalize_record(&self, row: usize, doc: RawRecord) -> Result<Record, ExplorerError> {
        let date = match doc.get(DATE) {
            Some(Cell::Text(value)) => TradeDate::parse(value, &self.date_format).ok_or_else(|| {
                ExplorerError::DateParse {
                    row,
                    value: value.clone(),
                    format: self.date_format.clone(),
                }
            })?,
            Some(other) => {
                return Err(ExplorerError::DateParse {
                    row,
                    value: other.to_string(),
                    format: self.date_format.clone(),
                });
            }
            None => {
                return Err(ExplorerError::MissingField {
                    row,
                    field: DATE.into(),
                });
            }
        };

        for field in TEXT_FIELDS {
            match doc.get(field) {
                Some(Cell::Text(_)) => {}
                Some(other) => {
                    return Err(ExplorerError::InvalidField {
                        row,
                        field: field.into(),
                        found: other.kind().into(),
                    });
                }
                None => {
                    return Err(ExplorerError::MissingField {
                        row,
                        field: field.into(),
                    });
                }
            }
        }

        let mut record = Record {
            date,
            client_name: String::new(),
            security_name: String::new(),
            buy_sell: String::new(),
            kind: String::new(),
            metrics: Vec::new(),
        };

        for (name, value) in doc.fields {
            if name == self.id_field || name == DATE {
                continue;
            }
            let value = match (name.as_str(), value) {
                (CLIENT_NAME, Cell::Text(s)) => {
                    record.client_name = s;
                    continue;
                }
                (SECURITY_NAME, Cell::Text(s)) => {
                    record.security_name = s;
                    continue;
                }
                (BUY_SELL, Cell::Text(s)) => {
                    record.buy_sell = s;
                    continue;
                }
                (TYPE, Cell::Text(s)) => {
                    record.kind = s;
                    continue;
                }
                (_, value) => value,
            };
            record.metrics.push((name, value));
        }

        Ok(record)
    }
}
