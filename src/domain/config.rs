//! Explorer settings read and validated from the config port.

use crate::domain::dataset::PREVIEW_LIMIT;
use crate::domain::error::ExplorerError;
use crate::domain::normalizer::{DEFAULT_DATE_FORMAT, DEFAULT_ID_FIELD, Normalizer};
use crate::domain::style::default_highlight_columns;
use crate::ports::config_port::ConfigPort;
use std::net::SocketAddr;

pub const DEFAULT_TABLE: &str = "stock_data";
pub const DEFAULT_LISTEN: &str = "127.0.0.1:3000";

#[derive(Debug, Clone, PartialEq)]
pub struct ExplorerConfig {
    pub table: String,
    pub preview_limit: usize,
    pub id_field: String,
    pub source_date_format: String,
    pub highlight_columns: Vec<String>,
    pub listen: SocketAddr,
    pub static_dir: String,
}

impl ExplorerConfig {
    pub fn from_config(config: &dyn ConfigPort) -> Result<Self, ExplorerError> {
        let table = config
            .get_string("store", "table")
            .unwrap_or_else(|| DEFAULT_TABLE.to_string());
        validate_table_name(&table)?;

        let preview_limit = config.get_int("explorer", "preview_limit", PREVIEW_LIMIT as i64);
        if preview_limit <= 0 {
            return Err(ExplorerError::config_invalid(
                "explorer",
                "preview_limit",
                "preview_limit must be positive",
            ));
        }

        let highlight_columns = match config.get_string("explorer", "highlight_columns") {
            Some(list) => {
                let columns: Vec<String> = list
                    .split(',')
                    .map(|c| c.trim().to_string())
                    .filter(|c| !c.is_empty())
                    .collect();
                if columns.is_empty() {
                    return Err(ExplorerError::config_invalid(
                        "explorer",
                        "highlight_columns",
                        "at least one column is required",
                    ));
                }
                columns
            }
            None => default_highlight_columns(),
        };

        let listen_str = config
            .get_string("web", "listen")
            .unwrap_or_else(|| DEFAULT_LISTEN.to_string());
        let listen: SocketAddr = listen_str.parse().map_err(|_| {
            ExplorerError::config_invalid(
                "web",
                "listen",
                format!("invalid socket address: {listen_str}"),
            )
        })?;

        Ok(Self {
            table,
            preview_limit: preview_limit as usize,
            id_field: configured_id_field(config)?,
            source_date_format: config
                .get_string("explorer", "source_date_format")
                .unwrap_or_else(|| DEFAULT_DATE_FORMAT.to_string()),
            highlight_columns,
            listen,
            static_dir: config
                .get_string("web", "static_dir")
                .unwrap_or_else(|| "static".to_string()),
        })
    }

    pub fn normalizer(&self) -> Normalizer {
        Normalizer::new(self.id_field.clone(), self.source_date_format.clone())
    }
}

/// Table names are spliced into SQL, so only plain identifiers pass.
pub fn validate_table_name(table: &str) -> Result<(), ExplorerError> {
    validate_identifier("store", "table", table)
}

/// The `[explorer] id_field` column, validated because stores splice it
/// into SQL.
pub fn configured_id_field(config: &dyn ConfigPort) -> Result<String, ExplorerError> {
    let id_field = config
        .get_string("explorer", "id_field")
        .unwrap_or_else(|| DEFAULT_ID_FIELD.to_string());
    validate_identifier("explorer", "id_field", &id_field)?;
    Ok(id_field)
}

fn validate_identifier(section: &str, key: &str, name: &str) -> Result<(), ExplorerError> {
    let mut chars = name.chars();
    let valid_start = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    if !valid_start || !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(ExplorerError::config_invalid(
            section,
            key,
            format!("invalid identifier: {name:?}"),
        ));
    }
    Ok(())
}
