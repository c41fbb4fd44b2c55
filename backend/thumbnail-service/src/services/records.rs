/// Record service - list, get and delete thumbnail records
///
/// Listing walks the table as a lazy stream of scan pages. The stream is
/// bounded by `max_pages` and can be restarted from any cursor it produced.
use std::sync::Arc;

use futures::stream::{self, Stream, TryStreamExt};
use futures::StreamExt;
use tracing::{debug, warn};

use crate::db::{RecordStore, DELETE_OK};
use crate::error::{AppError, Result};
use crate::models::{RecordListing, RecordPage, ScanCursor, ThumbnailRecord};

enum ScanState {
    Start(Option<ScanCursor>),
    After(ScanCursor),
    Exhausted,
}

#[derive(Clone)]
pub struct RecordService {
    store: Arc<dyn RecordStore>,
    max_pages: usize,
}

impl RecordService {
    pub fn new(store: Arc<dyn RecordStore>, max_pages: usize) -> Self {
        Self {
            store,
            max_pages: max_pages.max(1),
        }
    }

    /// Lazy stream of scan pages starting at `start`, at most `max_pages` long
    pub fn pages(
        &self,
        start: Option<ScanCursor>,
    ) -> impl Stream<Item = Result<RecordPage>> + Send + 'static {
        let store = self.store.clone();

        stream::try_unfold(ScanState::Start(start), move |state| {
            let store = store.clone();
            async move {
                let cursor = match state {
                    ScanState::Start(cursor) => cursor,
                    ScanState::After(cursor) => Some(cursor),
                    ScanState::Exhausted => return Ok(None),
                };

                let page = store.scan(cursor).await?;
                let next_state = match &page.next {
                    Some(cursor) => ScanState::After(cursor.clone()),
                    None => ScanState::Exhausted,
                };
                Ok::<_, AppError>(Some((page, next_state)))
            }
        })
        .take(self.max_pages)
    }

    /// Collect records from `start` until the table ends or the page bound is hit
    pub async fn list(&self, start: Option<ScanCursor>) -> Result<RecordListing> {
        let mut pages = Box::pin(self.pages(start));
        let mut listing = RecordListing::default();
        let mut page_count = 0usize;

        while let Some(page) = pages.try_next().await? {
            page_count += 1;
            listing.items.extend(page.items);
            listing.next = page.next;
        }

        if let Some(cursor) = &listing.next {
            warn!(
                pages = page_count,
                cursor = %cursor.as_str(),
                "Listing truncated at page bound"
            );
        }
        debug!(count = listing.items.len(), pages = page_count, "Listed thumbnail records");

        Ok(listing)
    }

    /// Fetch one record, failing with `NotFound` when it does not exist
    pub async fn get(&self, id: &str) -> Result<ThumbnailRecord> {
        self.store
            .get(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Thumbnail record not found: {id}")))
    }

    /// Delete one record; anything but a success status from the store is an error
    pub async fn delete(&self, id: &str) -> Result<()> {
        let status = self.store.delete(id).await?;
        if status != DELETE_OK {
            return Err(AppError::Persistence(format!(
                "An error occurred while deleting thumbnail record {id} (status {status})"
            )));
        }

        debug!(id = %id, "Thumbnail record deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryRecordStore;

    async fn service_with(count: usize, page_size: usize, max_pages: usize) -> RecordService {
        let store = MemoryRecordStore::with_page_size(page_size);
        for i in 0..count {
            store
                .put(&ThumbnailRecord::new(format!("https://s3/b/{i}_thumbnail.png"), 10_000))
                .await
                .unwrap();
        }
        RecordService::new(Arc::new(store), max_pages)
    }

    #[tokio::test]
    async fn test_list_accumulates_all_pages_in_order() {
        let service = service_with(7, 3, 100).await;
        let listing = service.list(None).await.unwrap();

        assert_eq!(listing.items.len(), 7);
        assert!(listing.next.is_none());
        let urls: Vec<_> = listing.items.iter().map(|r| r.url.as_str()).collect();
        assert_eq!(urls[0], "https://s3/b/0_thumbnail.png");
        assert_eq!(urls[6], "https://s3/b/6_thumbnail.png");
    }

    #[tokio::test]
    async fn test_list_empty_table() {
        let service = service_with(0, 3, 100).await;
        let listing = service.list(None).await.unwrap();
        assert!(listing.items.is_empty());
        assert!(listing.next.is_none());
    }

    #[tokio::test]
    async fn test_page_bound_truncates_and_resumes() {
        let service = service_with(10, 2, 2).await;

        let first = service.list(None).await.unwrap();
        assert_eq!(first.items.len(), 4);
        let cursor = first.next.clone().expect("truncated listing has a cursor");

        let mut all = first.items;
        let mut next = Some(cursor);
        while let Some(cursor) = next {
            let listing = service.list(Some(cursor)).await.unwrap();
            all.extend(listing.items);
            next = listing.next;
        }

        assert_eq!(all.len(), 10);
        let mut ids: Vec<_> = all.iter().map(|r| r.id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 10);
    }

    #[tokio::test]
    async fn test_pages_stream_is_lazy() {
        let service = service_with(6, 2, 100).await;
        let mut pages = Box::pin(service.pages(None));

        let first = pages.try_next().await.unwrap().unwrap();
        assert_eq!(first.items.len(), 2);
        assert!(first.next.is_some());
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let service = service_with(1, 10, 10).await;
        let err = service.get("no-such-id").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_success() {
        let service = service_with(1, 10, 10).await;
        let err = service.delete("no-such-id").await.unwrap_err();
        assert!(matches!(err, AppError::Persistence(_)));
    }

    #[tokio::test]
    async fn test_delete_existing() {
        let service = service_with(2, 10, 10).await;
        let id = service.list(None).await.unwrap().items[0].id.clone();

        service.delete(&id).await.unwrap();
        assert!(matches!(
            service.get(&id).await.unwrap_err(),
            AppError::NotFound(_)
        ));
        assert_eq!(service.list(None).await.unwrap().items.len(), 1);
    }
}
