use aws_sdk_dynamodb::types::AttributeValue;
use model::Record;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

mod decimal;
mod formatter;

pub use crate::decimal::{DecimalAsNumber, DecimalAsString, DecimalEncoding};
pub use crate::formatter::SpacedAsciiFormatter;

/// Serialize scanned records into the response body, a JSON array.
pub fn encode_body(
    records: &[Record],
    encoding: &dyn DecimalEncoding,
) -> Result<String, EncodeError> {
    let items: Vec<Value> = records
        .iter()
        .map(|record| record_to_json(record, encoding))
        .collect::<Result<_, _>>()?;

    let mut buf: Vec<u8> = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, SpacedAsciiFormatter);
    items
        .serialize(&mut serializer)
        .map_err(EncodeError::Serialize)?;

    // The formatter only ever writes ASCII
    String::from_utf8(buf).map_err(|err| EncodeError::Utf8(err.to_string()))
}

/// Convert a single record into a JSON object with its keys in sorted order.
pub fn record_to_json(
    record: &Record,
    encoding: &dyn DecimalEncoding,
) -> Result<Value, EncodeError> {
    record
        .iter()
        .map(|(name, value)| -> Result<(String, Value), EncodeError> {
            Ok((name.clone(), attribute_to_json(name, value, encoding)?))
        })
        .collect::<Result<BTreeMap<String, Value>, EncodeError>>()
        .map(sorted_object)
}

// serde_json may be built with `preserve_order`, so sort before building the map
fn sorted_object(entries: BTreeMap<String, Value>) -> Value {
    Value::Object(entries.into_iter().collect::<Map<String, Value>>())
}

fn attribute_to_json(
    path: &str,
    value: &AttributeValue,
    encoding: &dyn DecimalEncoding,
) -> Result<Value, EncodeError> {
    match value {
        AttributeValue::S(s) => Ok(Value::String(s.clone())),
        AttributeValue::Bool(b) => Ok(Value::Bool(*b)),
        AttributeValue::Null(_) => Ok(Value::Null),
        AttributeValue::N(n) => {
            encoding
                .encode_decimal(n)
                .ok_or_else(|| EncodeError::InvalidNumber {
                    path: path.to_string(),
                    value: n.clone(),
                })
        }
        AttributeValue::L(list) => list
            .iter()
            .enumerate()
            .map(|(index, item)| attribute_to_json(&format!("{path}[{index}]"), item, encoding))
            .collect::<Result<Vec<Value>, EncodeError>>()
            .map(Value::Array),
        AttributeValue::M(map) => map
            .iter()
            .map(|(name, item)| -> Result<(String, Value), EncodeError> {
                let value: Value = attribute_to_json(&format!("{path}.{name}"), item, encoding)?;
                Ok((name.clone(), value))
            })
            .collect::<Result<BTreeMap<String, Value>, EncodeError>>()
            .map(sorted_object),
        other => Err(EncodeError::Unsupported {
            path: path.to_string(),
            kind: attribute_kind(other),
        }),
    }
}

fn attribute_kind(value: &AttributeValue) -> &'static str {
    match value {
        AttributeValue::B(_) => "B",
        AttributeValue::Bool(_) => "BOOL",
        AttributeValue::Bs(_) => "BS",
        AttributeValue::L(_) => "L",
        AttributeValue::M(_) => "M",
        AttributeValue::N(_) => "N",
        AttributeValue::Ns(_) => "NS",
        AttributeValue::Null(_) => "NULL",
        AttributeValue::S(_) => "S",
        AttributeValue::Ss(_) => "SS",
        _ => "unknown",
    }
}

/// Errors arising from serializing records.
#[derive(Debug)]
pub enum EncodeError {
    // The attribute type has no JSON representation
    Unsupported { path: String, kind: &'static str },
    // The decimal encoding could not represent the number
    InvalidNumber { path: String, value: String },
    Serialize(serde_json::Error),
    Utf8(String),
}

impl Display for EncodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            EncodeError::Unsupported { path, kind } => {
                write!(f, "attribute {path} of type {kind} is not JSON serializable")
            }
            EncodeError::InvalidNumber { path, value } => {
                write!(f, "attribute {path} holds a number {value} that cannot be encoded")
            }
            EncodeError::Serialize(err) => write!(f, "failed to serialize records: {err}"),
            EncodeError::Utf8(err) => write!(f, "serialized body is not valid UTF-8: {err}"),
        }
    }
}

impl std::error::Error for EncodeError {}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_dynamodb::primitives::Blob;
    use serde_json::json;
    use std::collections::HashMap;
    use test_utils::record;

    #[test]
    fn empty_table_is_empty_array() {
        let body: String = encode_body(&[], &DecimalAsString).unwrap();

        assert_eq!("[]", body);
    }

    #[test]
    fn decimals_are_strings() {
        let records: Vec<Record> = vec![record(&[
            ("id", AttributeValue::S("1".to_string())),
            ("price", AttributeValue::N("9.99".to_string())),
        ])];

        let body: String = encode_body(&records, &DecimalAsString).unwrap();

        assert_eq!(r#"[{"id": "1", "price": "9.99"}]"#, body);
    }

    #[test]
    fn decimals_can_be_numbers() {
        let records: Vec<Record> =
            vec![record(&[("price", AttributeValue::N("9.99".to_string()))])];

        let body: String = encode_body(&records, &DecimalAsNumber).unwrap();

        assert_eq!(r#"[{"price": 9.99}]"#, body);
    }

    #[test]
    fn nested_values_are_converted() {
        let nested: HashMap<String, AttributeValue> = HashMap::from([(
            "weight".to_string(),
            AttributeValue::N("0.25".to_string()),
        )]);
        let item: Record = record(&[
            ("inStock", AttributeValue::Bool(true)),
            ("discontinued", AttributeValue::Null(true)),
            ("details", AttributeValue::M(nested)),
            (
                "sizes",
                AttributeValue::L(vec![
                    AttributeValue::N("1".to_string()),
                    AttributeValue::S("large".to_string()),
                ]),
            ),
        ]);

        let value: Value = record_to_json(&item, &DecimalAsString).unwrap();

        assert_eq!(
            json!({
                "inStock": true,
                "discontinued": null,
                "details": {"weight": "0.25"},
                "sizes": ["1", "large"],
            }),
            value
        );
    }

    #[test]
    fn sets_are_unsupported() {
        let item: Record = record(&[(
            "tags",
            AttributeValue::Ss(vec!["mint".to_string(), "lemon".to_string()]),
        )]);

        let err: EncodeError = record_to_json(&item, &DecimalAsString).unwrap_err();

        assert!(matches!(
            err,
            EncodeError::Unsupported { ref path, kind: "SS" } if path == "tags"
        ));
    }

    #[test]
    fn unsupported_path_points_into_nested_values() {
        let item: Record = record(&[(
            "images",
            AttributeValue::L(vec![
                AttributeValue::S("front.png".to_string()),
                AttributeValue::B(Blob::new(vec![0xff, 0xd8])),
            ]),
        )]);

        let err: EncodeError = encode_body(&[item], &DecimalAsString).unwrap_err();

        assert_eq!(
            "attribute images[1] of type B is not JSON serializable",
            err.to_string()
        );
    }

    #[test]
    fn invalid_number_reports_the_value() {
        let item: Record = record(&[("price", AttributeValue::N("Infinity".to_string()))]);

        let err: EncodeError = record_to_json(&item, &DecimalAsNumber).unwrap_err();

        assert!(matches!(
            err,
            EncodeError::InvalidNumber { ref path, ref value }
                if path == "price" && value == "Infinity"
        ));
    }

    #[test]
    fn tiny_prices_and_delete_match_reference_body() {
        let records: Vec<Record> = vec![record(&[
            ("name", AttributeValue::S("a\u{7f}b".to_string())),
            ("price", AttributeValue::N("0.0000001".to_string())),
        ])];

        let body: String = encode_body(&records, &DecimalAsString).unwrap();

        assert_eq!(r#"[{"name": "a\u007fb", "price": "1E-7"}]"#, body);
    }

    #[test]
    fn keys_are_sorted_in_records_and_nested_maps() {
        let nested: HashMap<String, AttributeValue> = ["z", "m", "a", "q", "c", "x"]
            .iter()
            .map(|key| (key.to_string(), AttributeValue::Bool(true)))
            .collect();
        let records: Vec<Record> = (0..4)
            .map(|_| {
                record(&[
                    ("productName", AttributeValue::S("Pez".to_string())),
                    ("id", AttributeValue::S("1".to_string())),
                    ("details", AttributeValue::M(nested.clone())),
                    ("price", AttributeValue::N("9.99".to_string())),
                    ("description", AttributeValue::S("Candy".to_string())),
                ])
            })
            .collect();

        let body: String = encode_body(&records, &DecimalAsString).unwrap();

        let item: &str = concat!(
            r#"{"description": "Candy", "#,
            r#""details": {"a": true, "c": true, "m": true, "q": true, "x": true, "z": true}, "#,
            r#""id": "1", "price": "9.99", "productName": "Pez"}"#
        );
        assert_eq!(format!("[{item}, {item}, {item}, {item}]"), body);
    }
}
