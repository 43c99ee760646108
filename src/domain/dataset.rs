//! Ordered record collections and the per-session data handle.

use crate::domain::error::ExplorerError;
use crate::domain::normalizer::Normalizer;
use crate::domain::record::Record;
use crate::ports::record_store::RecordStore;

pub const PREVIEW_LIMIT: usize = 200;

/// Records in fetch order plus the column order they are displayed in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub columns: Vec<String>,
    pub records: Vec<Record>,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }
}

/// The `full` and `preview` datasets of one session, fetched once.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub full: Dataset,
    pub preview: Dataset,
}

impl Session {
    pub fn load(
        store: &dyn RecordStore,
        normalizer: &Normalizer,
        preview_limit: usize,
    ) -> Result<Self, ExplorerError> {
        let full = normalizer.normalize(store.fetch_all()?)?;
        let preview = normalizer.normalize(store.fetch_preview(preview_limit)?)?;
        log::info!(
            "loaded session: {} records, {} in preview",
            full.len(),
            preview.len()
        );
        Ok(Self { full, preview })
    }
}
