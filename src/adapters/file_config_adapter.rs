//! INI file configuration adapter.

use crate::domain::error::ExplorerError;
use crate::ports::config_port::ConfigPort;
use configparser::ini::Ini;
use std::path::Path;

pub struct FileConfigAdapter {
    config: Ini,
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ExplorerError> {
        let path = path.as_ref();
        let mut config = Ini::new();
        config
            .load(path)
            .map_err(|reason| ExplorerError::ConfigParse {
                file: path.display().to_string(),
                reason,
            })?;
        Ok(Self { config })
    }

    pub fn from_string(content: &str) -> Result<Self, ExplorerError> {
        let mut config = Ini::new();
        config
            .read(content.to_string())
            .map_err(|reason| ExplorerError::ConfigParse {
                file: "<string>".into(),
                reason,
            })?;
        Ok(Self { config })
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.config.get(section, key)
    }

    fn get_int(&self, section: &str, key: &str, default: i64) -> i64 {
        self.config
            .getint(section, key)
            .ok()
            .flatten()
            .unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::config::ExplorerConfig;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = r#"
[sqlite]
path = /var/lib/explorer/stock.db
pool_size = 2

[store]
table = stock_data

[explorer]
preview_limit = 150
highlight_columns = %_of_curr,3m_%,12m_%

[web]
listen = 0.0.0.0:8000
"#;

    #[test]
    fn from_string_reads_sections() {
        let adapter = FileConfigAdapter::from_string(SAMPLE).unwrap();
        assert_eq!(
            adapter.get_string("sqlite", "path"),
            Some("/var/lib/explorer/stock.db".to_string())
        );
        assert_eq!(adapter.get_int("sqlite", "pool_size", 4), 2);
        assert_eq!(
            adapter.get_string("explorer", "highlight_columns"),
            Some("%_of_curr,3m_%,12m_%".to_string())
        );
    }

    #[test]
    fn missing_keys_fall_back() {
        let adapter = FileConfigAdapter::from_string("[explorer]\n").unwrap();
        assert_eq!(adapter.get_string("explorer", "id_field"), None);
        assert_eq!(adapter.get_string("nowhere", "key"), None);
        assert_eq!(adapter.get_int("explorer", "preview_limit", 200), 200);
    }

    #[test]
    fn non_numeric_int_falls_back() {
        let adapter =
            FileConfigAdapter::from_string("[explorer]\npreview_limit = lots\n").unwrap();
        assert_eq!(adapter.get_int("explorer", "preview_limit", 200), 200);
    }

    #[test]
    fn feeds_explorer_config() {
        let adapter = FileConfigAdapter::from_string(SAMPLE).unwrap();
        let config = ExplorerConfig::from_config(&adapter).unwrap();
        assert_eq!(config.preview_limit, 150);
        assert_eq!(config.highlight_columns, vec!["%_of_curr", "3m_%", "12m_%"]);
        assert_eq!(config.listen.port(), 8000);
    }

    #[test]
    fn from_file_reads_config() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "[store]\ntable = trades\n").unwrap();
        let adapter = FileConfigAdapter::from_file(file.path()).unwrap();
        assert_eq!(adapter.get_string("store", "table"), Some("trades".into()));
    }

    #[test]
    fn from_file_reports_path_on_error() {
        match FileConfigAdapter::from_file("/nonexistent/explorer.ini") {
            Err(ExplorerError::ConfigParse { file, .. }) => {
                assert_eq!(file, "/nonexistent/explorer.ini")
            }
            Err(other) => panic!("expected ConfigParse, got: {other}"),
            Ok(_) => panic!("expected error, got Ok"),
        }
    }
}
