//! CSV export of filtered rows and CSV reading for store seeding.

use crate::domain::error::ExplorerError;
use crate::domain::record::{Cell, RawRecord, Record};
use std::io::{Read, Write};

pub const EXPORT_FILE_NAME: &str = "filtered_data.csv";

/// Writes a header of `columns` and one line per record with the raw
/// (unstyled) values. A column a record lacks is written empty.
pub fn write_records<'a, W, I>(
    writer: W,
    columns: &[String],
    records: I,
) -> Result<(), ExplorerError>
where
    W: Write,
    I: IntoIterator<Item = &'a Record>,
{
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(columns)?;
    for record in records {
        wtr.write_record(
            columns
                .iter()
                .map(|c| record.value(c).map(|v| v.to_string()).unwrap_or_default()),
        )?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn records_to_csv<'a, I>(columns: &[String], records: I) -> Result<String, ExplorerError>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut buf = Vec::new();
    write_records(&mut buf, columns, records)?;
    String::from_utf8(buf).map_err(|e| ExplorerError::Export {
        reason: e.to_string(),
    })
}

/// Reads a headed CSV into documents. Every value is kept as text; an
/// empty field becomes null.
pub fn read_raw_records<R: Read>(
    reader: R,
) -> Result<(Vec<String>, Vec<RawRecord>), ExplorerError> {
    let mut rdr = csv::Reader::from_reader(reader);
    let headers: Vec<String> = rdr
        .headers()
        .map_err(|e| ExplorerError::Database {
            reason: format!("CSV header error: {e}"),
        })?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut records = Vec::new();
    for result in rdr.records() {
        let row = result.map_err(|e| ExplorerError::Database {
            reason: format!("CSV parse error: {e}"),
        })?;
        let fields = headers
            .iter()
            .zip(row.iter())
            .map(|(name, value)| {
                let cell = if value.is_empty() {
                    Cell::Null
                } else {
                    Cell::Text(value.to_string())
                };
                (name.clone(), cell)
            })
            .collect();
        records.push(RawRecord { fields });
    }

    Ok((headers, records))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::record::TradeDate;

    fn record(client: &str, pct: Cell) -> Record {
        Record {
            date: TradeDate {
                year: 2023,
                month: 1,
                day: 5,
            },
            client_name: client.into(),
            security_name: "BHP".into(),
            buy_sell: "Sell".into(),
            kind: "Equity".into(),
            metrics: vec![("3m_%".into(), pct)],
        }
    }

    fn columns() -> Vec<String> {
        ["date", "client_name", "buy_sell", "3m_%", "12m_%"]
            .iter()
            .map(|c| c.to_string())
            .collect()
    }

    #[test]
    fn exports_raw_values_in_column_order() {
        let a = record("Acme", Cell::Text("-3.5%".into()));
        let b = record("Smith, Jones & Co", Cell::Number(7.2));
        let csv = records_to_csv(&columns(), [&a, &b]).unwrap();
        assert_eq!(
            csv,
            "date,client_name,buy_sell,3m_%,12m_%\n\
             2023-01-05,Acme,Sell,-3.5%,\n\
             2023-01-05,\"Smith, Jones & Co\",Sell,7.2,\n"
        );
    }

    #[test]
    fn header_only_for_no_rows() {
        let csv = records_to_csv(&columns(), std::iter::empty::<&Record>()).unwrap();
        assert_eq!(csv, "date,client_name,buy_sell,3m_%,12m_%\n");
    }

    #[test]
    fn reads_headed_csv_as_text() {
        let input = "date,client_name,3m_%\n05-01-2023,Acme,-3.5%\n06-01-2023,Globex,\n";
        let (headers, records) = read_raw_records(input.as_bytes()).unwrap();
        assert_eq!(headers, vec!["date", "client_name", "3m_%"]);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("3m_%"), Some(&Cell::Text("-3.5%".into())));
        assert_eq!(records[1].get("3m_%"), Some(&Cell::Null));
    }

    #[test]
    fn ragged_csv_is_an_error() {
        let input = "date,client_name\n05-01-2023\n";
        assert!(read_raw_records(input.as_bytes()).is_err());
    }
}
