use crate::modules::grade::repository::{Error, GradeRecord, GradeStore, StoredGrade};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::RwLock;

/// In-process table. Scans return items in insertion order.
#[derive(Default)]
pub struct MemoryStore {
    items: RwLock<Vec<StoredGrade>>,
    scans: AtomicUsize,
    puts: AtomicUsize,
    scan_failure: Option<Error>,
    put_failure: Option<Error>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_items(items: Vec<StoredGrade>) -> Self {
        Self {
            items: RwLock::new(items),
            ..Self::default()
        }
    }

    pub fn failing_scans(mut self, err: Error) -> Self {
        self.scan_failure = Some(err);
        self
    }

    pub fn failing_puts(mut self, err: Error) -> Self {
        self.put_failure = Some(err);
        self
    }

    pub async fn items(&self) -> Vec<StoredGrade> {
        self.items.read().await.clone()
    }

    pub fn scan_count(&self) -> usize {
        self.scans.load(Ordering::SeqCst)
    }

    pub fn put_count(&self) -> usize {
        self.puts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GradeStore for MemoryStore {
    async fn scan(&self) -> Result<Vec<StoredGrade>, Error> {
        self.scans.fetch_add(1, Ordering::SeqCst);

        if let Some(err) = &self.scan_failure {
            return Err(err.clone());
        }

        Ok(self.items.read().await.clone())
    }

    async fn put(&self, record: GradeRecord) -> Result<(), Error> {
        self.puts.fetch_add(1, Ordering::SeqCst);

        if let Some(err) = &self.put_failure {
            return Err(err.clone());
        }

        tracing::debug!("Storing grade for student {}", record.student_id);
        self.items.write().await.push(record.into());
        Ok(())
    }
}
