use aws_sdk_dynamodb::types::AttributeValue;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub mod table;

pub type Error = Box<dyn std::error::Error + Send + Sync>;

/// A single item read from the table, keyed by attribute name.
pub type Record = HashMap<String, AttributeValue>;

/// HTTP-shaped response returned to the invoker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub body: String,
}

impl ResponseEnvelope {
    pub const OK: u16 = 200;

    pub fn ok(body: String) -> Self {
        ResponseEnvelope {
            status_code: Self::OK,
            body,
        }
    }
}
