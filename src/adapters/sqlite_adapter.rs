//! SQLite record store adapter.
//!
//! Documents live in one table whose columns are whatever the seeding data
//! had. Columns are declared without a type so SQLite keeps each value as
//! it was written (a percentage may be `REAL` in one row and `'3.5%'` in
//! the next). The id column named by `[explorer] id_field` is an integer
//! key assigned on insert; seed values for it are not kept.

use crate::domain::config::{DEFAULT_TABLE, configured_id_field, validate_table_name};
use crate::domain::error::ExplorerError;
use crate::domain::normalizer::DEFAULT_ID_FIELD;
use crate::domain::record::{Cell, RawRecord};
use crate::ports::config_port::ConfigPort;
use crate::ports::record_store::RecordStore;
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::types::ValueRef;
use rusqlite::{Row, params_from_iter};

pub struct SqliteAdapter {
    pool: Pool<SqliteConnectionManager>,
    table: String,
    id_field: String,
}

impl SqliteAdapter {
    pub fn from_config(config: &dyn ConfigPort) -> Result<Self, ExplorerError> {
        let db_path =
            config
                .get_string("sqlite", "path")
                .ok_or_else(|| ExplorerError::ConfigMissing {
                    section: "sqlite".into(),
                    key: "path".into(),
                })?;
        let table = config
            .get_string("store", "table")
            .unwrap_or_else(|| DEFAULT_TABLE.to_string());
        validate_table_name(&table)?;
        let id_field = configured_id_field(config)?;

        let pool_size = config.get_int("sqlite", "pool_size", 4).max(1) as u32;

        let manager = SqliteConnectionManager::file(&db_path);
        let pool = Pool::builder()
            .max_size(pool_size)
            .build(manager)
            .map_err(ExplorerError::database)?;

        log::debug!("sqlite store at {db_path}, table {table}");
        Ok(Self {
            pool,
            table,
            id_field,
        })
    }

    pub fn in_memory() -> Result<Self, ExplorerError> {
        let manager = SqliteConnectionManager::memory();
        let pool = Pool::builder()
            .max_size(1)
            .build(manager)
            .map_err(ExplorerError::database)?;

        Ok(Self {
            pool,
            table: DEFAULT_TABLE.to_string(),
            id_field: DEFAULT_ID_FIELD.to_string(),
        })
    }

    /// Creates the document table with the integer id column and the given
    /// untyped columns. A column named like the id column is skipped.
    pub fn initialize_schema(&self, columns: &[String]) -> Result<(), ExplorerError> {
        let conn = self.pool.get().map_err(ExplorerError::database)?;

        let mut ddl = format!(
            "CREATE TABLE IF NOT EXISTS {} ({} INTEGER PRIMARY KEY AUTOINCREMENT",
            quote_ident(&self.table),
            quote_ident(&self.id_field)
        );
        for column in columns.iter().filter(|c| **c != self.id_field) {
            ddl.push_str(", ");
            ddl.push_str(&quote_ident(column));
        }
        ddl.push(')');

        conn.execute_batch(&ddl).map_err(ExplorerError::query)?;
        Ok(())
    }

    /// Inserts documents in order. Every document must use only columns
    /// that exist in the table; an id field in the document is ignored.
    pub fn insert_records(&self, records: &[RawRecord]) -> Result<usize, ExplorerError> {
        let mut conn = self.pool.get().map_err(ExplorerError::database)?;
        let tx = conn.transaction().map_err(ExplorerError::query)?;

        for record in records {
            let fields: Vec<&(String, Cell)> = record
                .fields
                .iter()
                .filter(|(k, _)| *k != self.id_field)
                .collect();
            let names: Vec<String> = fields.iter().map(|(k, _)| quote_ident(k)).collect();
            let placeholders: Vec<String> =
                (1..=names.len()).map(|i| format!("?{i}")).collect();
            let sql = format!(
                "INSERT INTO {} ({}) VALUES ({})",
                quote_ident(&self.table),
                names.join(", "),
                placeholders.join(", ")
            );
            let values = fields.iter().map(|(_, v)| to_sql_value(v));
            tx.execute(&sql, params_from_iter(values))
                .map_err(ExplorerError::query)?;
        }

        tx.commit().map_err(ExplorerError::query)?;
        Ok(records.len())
    }

    fn fetch(&self, limit: Option<usize>) -> Result<Vec<RawRecord>, ExplorerError> {
        let conn = self.pool.get().map_err(ExplorerError::database)?;

        let mut sql = format!("SELECT * FROM {} ORDER BY rowid", quote_ident(&self.table));
        if let Some(limit) = limit {
            sql.push_str(&format!(" LIMIT {limit}"));
        }

        let mut stmt = conn.prepare(&sql).map_err(ExplorerError::query)?;
        let names: Vec<String> = stmt.column_names().iter().map(|n| n.to_string()).collect();

        let rows = stmt
            .query_map([], |row| read_row(row, &names))
            .map_err(ExplorerError::query)?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row.map_err(ExplorerError::query)?);
        }
        Ok(records)
    }
}

impl RecordStore for SqliteAdapter {
    fn fetch_all(&self) -> Result<Vec<RawRecord>, ExplorerError> {
        self.fetch(None)
    }

    fn fetch_preview(&self, limit: usize) -> Result<Vec<RawRecord>, ExplorerError> {
        self.fetch(Some(limit))
    }
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

fn read_row(row: &Row<'_>, names: &[String]) -> rusqlite::Result<RawRecord> {
    let mut record = RawRecord::new();
    for (i, name) in names.iter().enumerate() {
        let cell = match row.get_ref(i)? {
            ValueRef::Null => Cell::Null,
            ValueRef::Integer(v) => Cell::Integer(v),
            ValueRef::Real(v) => Cell::Number(v),
            ValueRef::Text(bytes) => Cell::Text(String::from_utf8_lossy(bytes).into_owned()),
            ValueRef::Blob(_) => {
                return Err(rusqlite::Error::InvalidColumnType(
                    i,
                    name.clone(),
                    rusqlite::types::Type::Blob,
                ));
            }
        };
        record.fields.push((name.clone(), cell));
    }
    Ok(record)
}

fn to_sql_value(cell: &Cell) -> rusqlite::types::Value {
    use rusqlite::types::Value;
    match cell {
        Cell::Null => Value::Null,
        Cell::Bool(b) => Value::Integer(i64::from(*b)),
        Cell::Integer(i) => Value::Integer(*i),
        Cell::Number(n) => Value::Real(*n),
        Cell::Text(s) => Value::Text(s.clone()),
    }
}
