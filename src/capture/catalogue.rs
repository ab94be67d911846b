//! Catalogue of stored composites.
//!
//! One record per successful capture, pointing at the stored file.

use std::path::PathBuf;

use async_trait::async_trait;
use chrono::{Local, TimeZone};
use tokio::sync::RwLock;
use tracing::debug;

use crate::image_pipeline::common::error::Result;

const DISPLAY_FORMAT: &str = "%Y.%m.%d %H:%M";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedImageRecord {
    pub id: u64,
    pub path: PathBuf,
    /// Capture time in milliseconds since the Unix epoch
    pub taken_at_millis: i64,
}

impl CapturedImageRecord {
    /// Capture time as `yyyy.MM.dd HH:mm` in local time.
    pub fn taken_at_display(&self) -> String {
        self.taken_at_display_in(&Local)
    }

    pub fn taken_at_display_in<Tz>(&self, tz: &Tz) -> String
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        tz.timestamp_millis_opt(self.taken_at_millis)
            .single()
            .map(|dt| dt.format(DISPLAY_FORMAT).to_string())
            .unwrap_or_default()
    }
}

#[async_trait]
pub trait ImageCatalogue: Send + Sync {
    /// Adds a record and returns it with its assigned id.
    async fn insert(&self, path: PathBuf, taken_at_millis: i64) -> Result<CapturedImageRecord>;

    async fn all(&self) -> Result<Vec<CapturedImageRecord>>;

    async fn by_id(&self, id: u64) -> Result<Option<CapturedImageRecord>>;

    /// Most recently inserted record.
    async fn last(&self) -> Result<Option<CapturedImageRecord>>;
}

/// In-process catalogue with auto-incrementing ids starting at 1.
#[derive(Debug, Default)]
pub struct MemoryCatalogue {
    records: RwLock<Vec<CapturedImageRecord>>,
}

impl MemoryCatalogue {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ImageCatalogue for MemoryCatalogue {
    async fn insert(&self, path: PathBuf, taken_at_millis: i64) -> Result<CapturedImageRecord> {
        let mut records = self.records.write().await;
        let id = records.last().map_or(1, |r| r.id + 1);
        let record = CapturedImageRecord {
            id,
            path,
            taken_at_millis,
        };
        debug!(id, path = %record.path.display(), "cataloguing image");
        records.push(record.clone());
        Ok(record)
    }

    async fn all(&self) -> Result<Vec<CapturedImageRecord>> {
        Ok(self.records.read().await.clone())
    }

    async fn by_id(&self, id: u64) -> Result<Option<CapturedImageRecord>> {
        Ok(self.records.read().await.iter().find(|r| r.id == id).cloned())
    }

    async fn last(&self) -> Result<Option<CapturedImageRecord>> {
        Ok(self.records.read().await.last().cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[tokio::test]
    async fn test_ids_increment_and_lookups_work() {
        let catalogue = MemoryCatalogue::new();
        assert_eq!(catalogue.last().await.unwrap(), None);

        let first = catalogue.insert(PathBuf::from("a.jpg"), 10).await.unwrap();
        let second = catalogue.insert(PathBuf::from("b.jpg"), 20).await.unwrap();

        assert_eq!((first.id, second.id), (1, 2));
        assert_eq!(catalogue.all().await.unwrap().len(), 2);
        assert_eq!(catalogue.by_id(1).await.unwrap(), Some(first));
        assert_eq!(catalogue.by_id(3).await.unwrap(), None);
        assert_eq!(catalogue.last().await.unwrap(), Some(second));
    }

    #[test]
    fn test_display_format() {
        let record = CapturedImageRecord {
            id: 1,
            path: PathBuf::from("x.jpg"),
            taken_at_millis: 1_700_000_000_000,
        };
        assert_eq!(record.taken_at_display_in(&Utc), "2023.11.14 22:13");
    }
}
