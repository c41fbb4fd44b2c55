/// In-memory record store
///
/// Pages through records in insertion order like a table scan, which makes
/// multi-page listings easy to exercise in tests. A cursor stays valid after
/// its record is deleted, the same way a DynamoDB start key does.
use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{RecordStore, DELETE_NOT_FOUND, DELETE_OK};
use crate::error::Result;
use crate::models::{RecordPage, ScanCursor, ThumbnailRecord};

const DEFAULT_PAGE_SIZE: usize = 25;

#[derive(Default)]
struct Table {
    /// Every id ever stored, in insertion order
    order: Vec<String>,
    records: HashMap<String, ThumbnailRecord>,
}

impl Table {
    fn live(&self) -> impl Iterator<Item = &ThumbnailRecord> + '_ {
        self.order.iter().filter_map(|id| self.records.get(id))
    }
}

pub struct MemoryRecordStore {
    table: Mutex<Table>,
    page_size: usize,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::with_page_size(DEFAULT_PAGE_SIZE)
    }

    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            table: Mutex::new(Table::default()),
            page_size: page_size.max(1),
        }
    }

    pub async fn records(&self) -> Vec<ThumbnailRecord> {
        self.table.lock().await.live().cloned().collect()
    }

    pub async fn len(&self) -> usize {
        self.table.lock().await.records.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.table.lock().await.records.is_empty()
    }
}

impl Default for MemoryRecordStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn put(&self, record: &ThumbnailRecord) -> Result<()> {
        let mut table = self.table.lock().await;
        if !table.order.contains(&record.id) {
            table.order.push(record.id.clone());
        }
        table.records.insert(record.id.clone(), record.clone());
        Ok(())
    }

    async fn scan(&self, cursor: Option<ScanCursor>) -> Result<RecordPage> {
        let table = self.table.lock().await;

        let start = match cursor {
            Some(cursor) => table
                .order
                .iter()
                .position(|id| *id == cursor.0)
                .map_or(table.order.len(), |pos| pos + 1),
            None => 0,
        };

        let mut remaining = table.order[start..]
            .iter()
            .filter_map(|id| table.records.get(id));
        let items: Vec<_> = remaining.by_ref().take(self.page_size).cloned().collect();
        let next = if remaining.next().is_some() {
            items.last().map(|r| ScanCursor(r.id.clone()))
        } else {
            None
        };

        Ok(RecordPage { items, next })
    }

    async fn get(&self, id: &str) -> Result<Option<ThumbnailRecord>> {
        Ok(self.table.lock().await.records.get(id).cloned())
    }

    async fn delete(&self, id: &str) -> Result<u16> {
        match self.table.lock().await.records.remove(id) {
            Some(_) => Ok(DELETE_OK),
            None => Ok(DELETE_NOT_FOUND),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn seeded(count: usize, page_size: usize) -> MemoryRecordStore {
        let store = MemoryRecordStore::with_page_size(page_size);
        for i in 0..count {
            store
                .put(&ThumbnailRecord::new(format!("u{i}"), 1_000))
                .await
                .unwrap();
        }
        store
    }

    #[tokio::test]
    async fn test_scan_pages_until_exhausted() {
        let store = seeded(5, 2).await;

        let first = store.scan(None).await.unwrap();
        assert_eq!(first.items.len(), 2);
        let second = store.scan(first.next.clone()).await.unwrap();
        assert_eq!(second.items.len(), 2);
        let third = store.scan(second.next.clone()).await.unwrap();
        assert_eq!(third.items.len(), 1);
        assert!(third.next.is_none());
    }

    #[tokio::test]
    async fn test_exact_multiple_has_no_trailing_cursor() {
        let store = seeded(4, 2).await;
        let first = store.scan(None).await.unwrap();
        let second = store.scan(first.next).await.unwrap();
        assert_eq!(second.items.len(), 2);
        assert!(second.next.is_none());
    }

    #[tokio::test]
    async fn test_delete_reports_status() {
        let store = seeded(1, 10).await;
        let id = store.records().await[0].id.clone();

        assert_eq!(store.delete(&id).await.unwrap(), DELETE_OK);
        assert_eq!(store.delete(&id).await.unwrap(), DELETE_NOT_FOUND);
        assert!(store.get(&id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_cursor_survives_deleting_its_record() {
        let store = seeded(5, 2).await;

        let first = store.scan(None).await.unwrap();
        let cursor = first.next.clone().unwrap();
        assert_eq!(store.delete(&cursor.0).await.unwrap(), DELETE_OK);

        let second = store.scan(Some(cursor)).await.unwrap();
        assert_eq!(second.items.len(), 2);
        let third = store.scan(second.next).await.unwrap();
        assert_eq!(third.items.len(), 1);
        assert!(third.next.is_none());
    }
}
