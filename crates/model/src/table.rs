/// The table scanned on every invocation.
pub const TABLE_NAME: &str = "pez-dynamodb";
