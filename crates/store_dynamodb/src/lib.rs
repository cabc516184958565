use async_trait::async_trait;
use aws_sdk_dynamodb::config::http::HttpResponse;
use aws_sdk_dynamodb::error::SdkError;
use aws_sdk_dynamodb::operation::scan::{ScanError, ScanOutput};
use lambda_runtime::tracing;
use store::StoreErrorReason::{BackendFailure, MissingTable};
use store::StoreOperation::Scan;
use store::{ScanPage, StoreError, StoreErrorReason, TableStore};

/// Reads the table through a DynamoDB client.
///
/// The client is expected to be created once per process and shared by every
/// invocation.
pub struct DynamoDbTableStore {
    table_name: String,
    dynamodb_client: aws_sdk_dynamodb::Client,
    consistent_read: bool,
}

impl DynamoDbTableStore {
    pub fn new(dynamodb_client: aws_sdk_dynamodb::Client, table_name: impl Into<String>) -> Self {
        DynamoDbTableStore {
            table_name: table_name.into(),
            dynamodb_client,
            consistent_read: false,
        }
    }

    /// Use strongly consistent reads, at twice the read capacity cost.
    pub fn with_consistent_read(mut self, consistent_read: bool) -> Self {
        self.consistent_read = consistent_read;
        self
    }
}

#[async_trait]
impl TableStore for DynamoDbTableStore {
    fn table_name(&self) -> &str {
        &self.table_name
    }

    async fn scan(&self) -> Result<ScanPage, StoreError> {
        let output: ScanOutput = self
            .dynamodb_client
            .scan()
            .table_name(&self.table_name)
            .consistent_read(self.consistent_read)
            .send()
            .await
            .map_err(|err| StoreError::new(self.table_name.clone(), Scan, scan_error_reason(err)))?;

        tracing::debug!(
            count = output.count,
            scanned_count = output.scanned_count,
            "Scanned {}",
            self.table_name
        );

        Ok(ScanPage {
            items: output.items.unwrap_or_default(),
            last_evaluated_key: output.last_evaluated_key,
        })
    }
}

fn scan_error_reason(err: SdkError<ScanError, HttpResponse>) -> StoreErrorReason {
    match err.as_service_error() {
        Some(service_err) if service_err.is_resource_not_found_exception() => MissingTable,
        _ => BackendFailure(err.into()),
    }
}
