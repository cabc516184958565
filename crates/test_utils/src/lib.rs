use aws_sdk_dynamodb::operation::scan::{ScanError, ScanOutput};
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::types::error::{InternalServerError, ResourceNotFoundException};
use aws_smithy_mocks::{Rule, mock, mock_client};
use lambda_runtime::{Context, LambdaEvent};
use model::Record;
use serde_json::Value;

/// Test table name
pub const TEST_TABLE: &str = "test_table";

/// Build a record from attribute name and value pairs
pub fn record(fields: &[(&str, AttributeValue)]) -> Record {
    fields
        .iter()
        .map(|(name, value)| (name.to_string(), value.clone()))
        .collect()
}

/// A product record as stored by the shop front
pub fn product(id: &str, name: &str, price: &str) -> Record {
    record(&[
        ("id", AttributeValue::S(id.to_string())),
        ("productName", AttributeValue::S(name.to_string())),
        ("price", AttributeValue::N(price.to_string())),
    ])
}

/// A Lambda event with an empty payload and default context
pub fn lambda_event() -> LambdaEvent<Value> {
    LambdaEvent::new(Value::Null, Context::default())
}

/// A mock DynamoDB client whose scans of `TEST_TABLE` return `items`
pub fn create_mock_dynamodb_client(items: Vec<Record>) -> aws_sdk_dynamodb::Client {
    create_mock_dynamodb_client_with_page(items, None)
}

/// As `create_mock_dynamodb_client`, also returning a continuation key
pub fn create_mock_dynamodb_client_with_page(
    items: Vec<Record>,
    last_evaluated_key: Option<Record>,
) -> aws_sdk_dynamodb::Client {
    let scan_rule: Rule = mock!(aws_sdk_dynamodb::Client::scan)
        .match_requests(|req| req.table_name() == Some(TEST_TABLE))
        .sequence()
        .output(move || {
            ScanOutput::builder()
                .set_items(Some(items.clone()))
                .count(items.len() as i32)
                .set_last_evaluated_key(last_evaluated_key.clone())
                .build()
        })
        .repeatedly()
        .build();

    mock_client!(aws_sdk_dynamodb, [&scan_rule])
}

/// A mock DynamoDB client where the table does not exist
pub fn create_missing_table_dynamodb_client() -> aws_sdk_dynamodb::Client {
    let scan_rule: Rule = mock!(aws_sdk_dynamodb::Client::scan)
        .match_requests(|_| true)
        .then_error(|| {
            ScanError::ResourceNotFoundException(
                ResourceNotFoundException::builder()
                    .message("Requested resource not found")
                    .build(),
            )
        });

    mock_client!(aws_sdk_dynamodb, [&scan_rule])
}

/// A mock DynamoDB client where the service fails
pub fn create_failing_dynamodb_client() -> aws_sdk_dynamodb::Client {
    let scan_rule: Rule = mock!(aws_sdk_dynamodb::Client::scan)
        .match_requests(|_| true)
        .then_error(|| {
            ScanError::InternalServerError(
                InternalServerError::builder()
                    .message("Internal server error")
                    .build(),
            )
        });

    mock_client!(aws_sdk_dynamodb, [&scan_rule])
}
