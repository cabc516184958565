use async_trait::async_trait;
use model::Record;
use store::{ScanPage, StoreError, TableStore};
use std::sync::{Arc, Mutex, PoisonError};

pub struct InMemoryTableStore {
    table_name: String,
    records: Arc<Mutex<Vec<Record>>>,
    // Maximum records returned by one scan, like the store's 1 MB page
    page_limit: Option<usize>,
}

impl InMemoryTableStore {
    pub fn new(table_name: impl Into<String>) -> Self {
        InMemoryTableStore {
            table_name: table_name.into(),
            records: Arc::new(Mutex::new(Vec::new())),
            page_limit: None,
        }
    }

    pub fn with_records(self, records: Vec<Record>) -> Self {
        *self.records.lock().unwrap_or_else(PoisonError::into_inner) = records;
        self
    }

    pub fn with_page_limit(mut self, page_limit: usize) -> Self {
        self.page_limit = Some(page_limit);
        self
    }

    pub fn put(&self, record: Record) {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(record);
    }
}

#[async_trait]
impl TableStore for InMemoryTableStore {
    fn table_name(&self) -> &str {
        &self.table_name
    }

    async fn scan(&self) -> Result<ScanPage, StoreError> {
        let records = self.records.lock().unwrap_or_else(PoisonError::into_inner);
        let limit: usize = self.page_limit.unwrap_or(records.len());

        let items: Vec<Record> = records.iter().take(limit).cloned().collect();
        // An empty page over a non-empty table still carries a key
        let last_evaluated_key: Option<Record> =
            (records.len() > limit).then(|| items.last().cloned().unwrap_or_default());

        Ok(ScanPage {
            items,
            last_evaluated_key,
        })
    }
}
