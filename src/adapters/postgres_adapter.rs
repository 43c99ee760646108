//! PostgreSQL record store adapter.

use crate::domain::config::{DEFAULT_TABLE, configured_id_field, validate_table_name};
use crate::domain::error::ExplorerError;
use crate::domain::normalizer::DEFAULT_DATE_FORMAT;
use crate::domain::record::{Cell, RawRecord};
use crate::ports::config_port::ConfigPort;
use crate::ports::record_store::RecordStore;
use chrono::NaiveDate;
use postgres::types::Type;
use postgres::{NoTls, Row};
use r2d2::Pool;
use r2d2_postgres::PostgresConnectionManager;
use std::fmt::Write;

/// Documents are read from `public.<table>` in order of the id column,
/// which the table must have.
pub struct PostgresAdapter {
    pool: Pool<PostgresConnectionManager<NoTls>>,
    table: String,
    id_field: String,
    date_format: String,
}

/// How one column is selected and turned into a [`Cell`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnRead {
    Text,
    /// Selected as `::text` so the exact decimal survives.
    Numeric,
    Float8,
    Float4,
    Int8,
    Int4,
    Int2,
    Bool,
    /// Written back as text in the source date format.
    Date,
}

fn column_read(ty: &Type) -> Option<ColumnRead> {
    let read = if [Type::TEXT, Type::VARCHAR, Type::BPCHAR, Type::NAME].contains(ty) {
        ColumnRead::Text
    } else if *ty == Type::NUMERIC {
        ColumnRead::Numeric
    } else if *ty == Type::FLOAT8 {
        ColumnRead::Float8
    } else if *ty == Type::FLOAT4 {
        ColumnRead::Float4
    } else if *ty == Type::INT8 {
        ColumnRead::Int8
    } else if *ty == Type::INT4 {
        ColumnRead::Int4
    } else if *ty == Type::INT2 {
        ColumnRead::Int2
    } else if *ty == Type::BOOL {
        ColumnRead::Bool
    } else if *ty == Type::DATE {
        ColumnRead::Date
    } else {
        return None;
    };
    Some(read)
}

fn select_expr(name: &str, read: ColumnRead) -> String {
    let ident = quote_ident(name);
    match read {
        ColumnRead::Numeric => format!("{ident}::text AS {ident}"),
        _ => ident,
    }
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

impl PostgresAdapter {
    pub fn from_config(config: &dyn ConfigPort) -> Result<Self, ExplorerError> {
        // [postgres] connection_string first, then [database] conninfo
        let connection_string = config
            .get_string("postgres", "connection_string")
            .or_else(|| config.get_string("database", "conninfo"))
            .ok_or_else(|| ExplorerError::ConfigMissing {
                section: "postgres".into(),
                key: "connection_string".into(),
            })?;
        let table = config
            .get_string("store", "table")
            .unwrap_or_else(|| DEFAULT_TABLE.to_string());
        validate_table_name(&table)?;
        let id_field = configured_id_field(config)?;
        let date_format = config
            .get_string("explorer", "source_date_format")
            .unwrap_or_else(|| DEFAULT_DATE_FORMAT.to_string());

        let pg_config = connection_string
            .parse::<postgres::Config>()
            .map_err(ExplorerError::database)?;
        let manager = PostgresConnectionManager::new(pg_config, NoTls);
        let pool = Pool::builder()
            .max_size(config.get_int("postgres", "pool_size", 4).max(1) as u32)
            .build(manager)
            .map_err(ExplorerError::database)?;

        Ok(Self {
            pool,
            table,
            id_field,
            date_format,
        })
    }

    fn from_clause(&self) -> String {
        format!(
            "FROM public.{} ORDER BY {}",
            quote_ident(&self.table),
            quote_ident(&self.id_field)
        )
    }

    fn fetch(&self, limit: Option<usize>) -> Result<Vec<RawRecord>, ExplorerError> {
        let mut client = self.pool.get().map_err(ExplorerError::database)?;

        let shape = client
            .prepare(&format!("SELECT * {}", self.from_clause()))
            .map_err(ExplorerError::query)?;
        let mut names = Vec::new();
        let mut reads = Vec::new();
        for column in shape.columns() {
            let read = column_read(column.type_()).ok_or_else(|| ExplorerError::DatabaseQuery {
                reason: format!(
                    "column {} has unsupported type {}; cast it to text or float8",
                    column.name(),
                    column.type_()
                ),
            })?;
            names.push(column.name().to_string());
            reads.push(read);
        }

        let select_list: Vec<String> = names
            .iter()
            .zip(&reads)
            .map(|(name, read)| select_expr(name, *read))
            .collect();
        let mut query = format!("SELECT {} {}", select_list.join(", "), self.from_clause());
        if let Some(limit) = limit {
            query.push_str(&format!(" LIMIT {limit}"));
        }

        let rows = client.query(query.as_str(), &[]).map_err(ExplorerError::query)?;
        rows.iter()
            .map(|row| self.read_row(row, &names, &reads))
            .collect()
    }

    fn read_row(
        &self,
        row: &Row,
        names: &[String],
        reads: &[ColumnRead],
    ) -> Result<RawRecord, ExplorerError> {
        let mut record = RawRecord::new();
        for (i, (name, read)) in names.iter().zip(reads).enumerate() {
            let cell = match read {
                ColumnRead::Text | ColumnRead::Numeric => {
                    row.try_get::<_, Option<String>>(i).map(|v| v.map(Cell::Text))
                }
                ColumnRead::Float8 => row.try_get::<_, Option<f64>>(i).map(|v| v.map(Cell::Number)),
                ColumnRead::Float4 => row
                    .try_get::<_, Option<f32>>(i)
                    .map(|v| v.map(|f| Cell::Number(f64::from(f)))),
                ColumnRead::Int8 => row.try_get::<_, Option<i64>>(i).map(|v| v.map(Cell::Integer)),
                ColumnRead::Int4 => row
                    .try_get::<_, Option<i32>>(i)
                    .map(|v| v.map(|n| Cell::Integer(i64::from(n)))),
                ColumnRead::Int2 => row
                    .try_get::<_, Option<i16>>(i)
                    .map(|v| v.map(|n| Cell::Integer(i64::from(n)))),
                ColumnRead::Bool => row.try_get::<_, Option<bool>>(i).map(|v| v.map(Cell::Bool)),
                ColumnRead::Date => match row.try_get::<_, Option<NaiveDate>>(i) {
                    Ok(Some(date)) => Ok(Some(format_date(date, &self.date_format)?)),
                    Ok(None) => Ok(None),
                    Err(e) => Err(e),
                },
            };
            let cell = cell.map_err(ExplorerError::query)?.unwrap_or(Cell::Null);
            record.fields.push((name.clone(), cell));
        }
        Ok(record)
    }
}

fn format_date(date: NaiveDate, format: &str) -> Result<Cell, ExplorerError> {
    let mut text = String::new();
    write!(text, "{}", date.format(format)).map_err(|_| ExplorerError::DatabaseQuery {
        reason: format!("cannot format date with {format:?}"),
    })?;
    Ok(Cell::Text(text))
}

impl RecordStore for PostgresAdapter {
    fn fetch_all(&self) -> Result<Vec<RawRecord>, ExplorerError> {
        self.fetch(None)
    }

    fn fetch_preview(&self, limit: usize) -> Result<Vec<RawRecord>, ExplorerError> {
        self.fetch(Some(limit))
    }
}
