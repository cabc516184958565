use aws_config::BehaviorVersion;
use lambda_runtime::{service_fn, tracing};
use model::Error;
use model::table::TABLE_NAME;
use scan_handler::{TableScanHandler, scan_fn};
use std::sync::Arc;
use store_dynamodb::DynamoDbTableStore;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing::init_default_subscriber();

    // One client per process, reused by every invocation
    let dynamodb_client: aws_sdk_dynamodb::Client =
        aws_sdk_dynamodb::Client::new(&aws_config::load_defaults(BehaviorVersion::latest()).await);

    let handler: TableScanHandler =
        TableScanHandler::new(Arc::new(DynamoDbTableStore::new(dynamodb_client, TABLE_NAME)));

    lambda_runtime::run(service_fn(scan_fn(&handler))).await
}
