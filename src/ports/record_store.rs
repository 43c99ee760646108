//! Record store port trait.

use crate::domain::error::ExplorerError;
use crate::domain::record::RawRecord;

/// Read access to the backing collection. Implementations return documents
/// in store order and do not transform them.
pub trait RecordStore {
    fn fetch_all(&self) -> Result<Vec<RawRecord>, ExplorerError>;

    /// The first `limit` documents in store order.
    fn fetch_preview(&self, limit: usize) -> Result<Vec<RawRecord>, ExplorerError>;
}
