use async_trait::async_trait;
use model::{Error, Record};
use std::fmt::{Display, Formatter};

/// Read access to the table holding the records served by the handler.
///
/// A scan returns a single page. Implementations report whether the store
/// stopped early through `ScanPage::last_evaluated_key`, but callers are not
/// expected to follow it.
#[async_trait]
pub trait TableStore: Send + Sync {
    fn table_name(&self) -> &str;

    async fn scan(&self) -> Result<ScanPage, StoreError>;
}

/// One page of a table scan.
#[derive(Debug, Clone, Default)]
pub struct ScanPage {
    pub items: Vec<Record>,
    // Present when the store truncated the scan
    pub last_evaluated_key: Option<Record>,
}

impl ScanPage {
    pub fn is_truncated(&self) -> bool {
        self.last_evaluated_key.is_some()
    }
}

/// Errors arising from reading the table.
#[derive(Debug)]
pub struct StoreError {
    pub table_name: String,

    pub operation: StoreOperation,
    pub reason: StoreErrorReason,
}

#[derive(Debug)]
pub enum StoreErrorReason {
    // The table does not exist
    MissingTable,
    // An error from the underlying store
    BackendFailure(Error),
}

#[derive(Debug, Clone)]
pub enum StoreOperation {
    Scan,
}

impl StoreError {
    pub fn new(table_name: String, operation: StoreOperation, reason: StoreErrorReason) -> Self {
        StoreError {
            table_name,
            operation,
            reason,
        }
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.reason {
            StoreErrorReason::MissingTable => {
                write!(f, "{:?} failed, table {} does not exist", self.operation, self.table_name)
            }
            StoreErrorReason::BackendFailure(err) => write!(
                f,
                "{:?} failed on table {}: {}",
                self.operation, self.table_name, err
            ),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.reason {
            StoreErrorReason::BackendFailure(err) => Some(err.as_ref()),
            StoreErrorReason::MissingTable => None,
        }
    }
}
