use encoding::{DecimalAsString, DecimalEncoding, encode_body};
use lambda_runtime::tracing::{Instrument, Span};
use lambda_runtime::{LambdaEvent, tracing};
use model::{Error, ResponseEnvelope};
use serde_json::Value;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use store::{ScanPage, TableStore};

/// Returns every record of a table as a JSON array in an HTTP response.
///
/// Only the first page of the scan is returned. If the store truncates the
/// result a warning is logged and the partial page is served.
pub struct TableScanHandler {
    store: Arc<dyn TableStore>,
    encoding: Box<dyn DecimalEncoding>,
}

impl TableScanHandler {
    /// Create a handler which writes decimals as JSON strings.
    pub fn new(store: Arc<dyn TableStore>) -> Self {
        Self::with_encoding(store, Box::new(DecimalAsString))
    }

    pub fn with_encoding(store: Arc<dyn TableStore>, encoding: Box<dyn DecimalEncoding>) -> Self {
        TableScanHandler { store, encoding }
    }

    /// The event payload and context are not used beyond tracing.
    pub async fn handle(&self, event: LambdaEvent<Value>) -> Result<ResponseEnvelope, Error> {
        let request_id: &str = &event.context.request_id;
        let table_name: &str = self.store.table_name();

        let scan_span: Span =
            tracing::span!(tracing::Level::INFO, "TableScan", request_id, table_name);

        async {
            let page: ScanPage = self.store.scan().await.inspect_err(|err| {
                tracing::error!("Failed to scan {table_name}, {err}");
            })?;

            if page.is_truncated() {
                tracing::warn!(
                    "Scan of {table_name} was truncated, returning only the first {} items",
                    page.items.len()
                );
            }

            let body: String =
                encode_body(&page.items, self.encoding.as_ref()).inspect_err(|err| {
                    tracing::error!("Failed to encode items from {table_name}, {err}");
                })?;

            tracing::info!("Returning {} items from {table_name}", page.items.len());

            Ok::<ResponseEnvelope, Error>(ResponseEnvelope::ok(body))
        }
        .instrument(scan_span)
        .await
    }
}

pub type ScanFuture<'a> =
    Pin<Box<dyn Future<Output = Result<ResponseEnvelope, Error>> + Send + 'a>>;

/// Adapts a `TableScanHandler` for use with `lambda_runtime::service_fn`.
///
/// ```no_compile
/// let handler: TableScanHandler = TableScanHandler::new(Arc::new(store));
/// lambda_runtime::run(service_fn(scan_fn(&handler))).await?;
/// ```
pub fn scan_fn<'a>(
    handler: &'a TableScanHandler,
) -> impl Fn(LambdaEvent<Value>) -> ScanFuture<'a> + 'a {
    move |event: LambdaEvent<Value>| Box::pin(handler.handle(event))
}
