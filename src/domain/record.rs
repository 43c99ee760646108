//! Raw and normalized trade records.

use chrono::{Datelike, NaiveDate};
use std::fmt;

/// A scalar value as it came out of the record store.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Null,
    Bool(bool),
    Integer(i64),
    Number(f64),
    Text(String),
}

impl Cell {
    pub fn kind(&self) -> &'static str {
        match self {
            Cell::Null => "null",
            Cell::Bool(_) => "bool",
            Cell::Integer(_) => "integer",
            Cell::Number(_) => "number",
            Cell::Text(_) => "text",
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Null => Ok(()),
            Cell::Bool(b) => write!(f, "{b}"),
            Cell::Integer(i) => write!(f, "{i}"),
            Cell::Number(n) => write!(f, "{n}"),
            Cell::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

/// One document from the store: field name to value, in store column order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRecord {
    pub fields: Vec<(String, Cell)>,
}

impl RawRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, value: impl Into<Cell>) -> Self {
        self.fields.push((name.to_string(), value.into()));
        self
    }

    pub fn get(&self, name: &str) -> Option<&Cell> {
        self.fields.iter().find(|(k, _)| k == name).map(|(_, v)| v)
    }
}

/// Calendar date of a record, decomposed once at load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TradeDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl TradeDate {
    pub fn parse(value: &str, format: &str) -> Option<Self> {
        NaiveDate::parse_from_str(value.trim(), format)
            .ok()
            .map(Self::from)
    }
}

impl From<NaiveDate> for TradeDate {
    fn from(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
            day: date.day(),
        }
    }
}

/// Canonical `YYYY-MM-DD`.
impl fmt::Display for TradeDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

pub const DATE: &str = "date";
pub const CLIENT_NAME: &str = "client_name";
pub const SECURITY_NAME: &str = "security_name";
pub const BUY_SELL: &str = "buy_sell";
pub const TYPE: &str = "type";

/// Fields every record must carry as text (besides `date`).
pub const TEXT_FIELDS: [&str; 4] = [CLIENT_NAME, SECURITY_NAME, BUY_SELL, TYPE];

/// A normalized trade/holding entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub date: TradeDate,
    pub client_name: String,
    pub security_name: String,
    pub buy_sell: String,
    pub kind: String,
    /// Every other field, in source order, with its raw value.
    pub metrics: Vec<(String, Cell)>,
}

impl Record {
    /// Value of a column as it is displayed and exported.
    pub fn value(&self, column: &str) -> Option<Cell> {
        match column {
            DATE => Some(Cell::Text(self.date.to_string())),
            CLIENT_NAME => Some(Cell::Text(self.client_name.clone())),
            SECURITY_NAME => Some(Cell::Text(self.security_name.clone())),
            BUY_SELL => Some(Cell::Text(self.buy_sell.clone())),
            TYPE => Some(Cell::Text(self.kind.clone())),
            other => self.metric(other).cloned(),
        }
    }

    pub fn metric(&self, name: &str) -> Option<&Cell> {
        self.metrics.iter().find(|(k, _)| k == name).map(|(_, v)| v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trade_date_parses_day_month_year() {
        let date = TradeDate::parse("05-01-2023", "%d-%m-%Y").unwrap();
        assert_eq!(
            date,
            TradeDate {
                year: 2023,
                month: 1,
                day: 5
            }
        );
        assert_eq!(date.to_string(), "2023-01-05");
    }

    #[test]
    fn trade_date_rejects_other_formats() {
        assert!(TradeDate::parse("2023-01-05", "%d-%m-%Y").is_none());
        assert!(TradeDate::parse("31-02-2023", "%d-%m-%Y").is_none());
        assert!(TradeDate::parse("", "%d-%m-%Y").is_none());
    }

    #[test]
    fn cell_display_keeps_raw_text() {
        assert_eq!(Cell::Text("-3.5%".into()).to_string(), "-3.5%");
        assert_eq!(Cell::Number(7.2).to_string(), "7.2");
        assert_eq!(Cell::Integer(12).to_string(), "12");
        assert_eq!(Cell::Null.to_string(), "");
    }

    #[test]
    fn record_value_covers_core_and_metric_columns() {
        let record = Record {
            date: TradeDate {
                year: 2024,
                month: 3,
                day: 9,
            },
            client_name: "Acme".into(),
            security_name: "BHP".into(),
            buy_sell: "Buy".into(),
            kind: "Equity".into(),
            metrics: vec![("3m_%".into(), Cell::Text("1.5%".into()))],
        };
        assert_eq!(record.value("date"), Some(Cell::Text("2024-03-09".into())));
        assert_eq!(record.value("type"), Some(Cell::Text("Equity".into())));
        assert_eq!(record.value("3m_%"), Some(Cell::Text("1.5%".into())));
        assert_eq!(record.value("12m_%"), None);
    }
}
