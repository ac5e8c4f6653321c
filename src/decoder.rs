use crate::domain::MessageRecord;
use crate::error::DecodeError;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashSet;

/// Invocation payload as delivered by the host. SQS event sources use
/// `Records`; `records` is accepted as well.
#[derive(Debug, Deserialize)]
struct RawEvent {
    #[serde(rename = "Records")]
    sqs_records: Option<Value>,
    records: Option<Value>,
}

/// One record before validation. Fields stay untyped so that a wrong type
/// is reported against the field rather than as a parse error.
#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(rename = "messageId")]
    message_id: Option<Value>,
    body: Option<Value>,
    #[serde(rename = "receiptHandle")]
    receipt_handle: Option<Value>,
    attributes: Option<Value>,
    #[serde(rename = "eventSourceARN")]
    event_source_arn: Option<Value>,
}

impl RawRecord {
    /// Validates the required fields and extracts optional metadata.
    ///
    /// # Errors
    /// Returns a [`DecodeError`] if `messageId` or `body` is missing, null, of
    /// the wrong type, or if `messageId` is blank.
    fn validate(self, index: usize) -> Result<MessageRecord, DecodeError> {
        let message_id = required_string(self.message_id, index, "messageId")?;
        if message_id.trim().is_empty() {
            return Err(DecodeError::InvalidField { index, field: "messageId" });
        }
        let body = required_string(self.body, index, "body")?;

        Ok(MessageRecord {
            message_id,
            body,
            receipt_handle: optional_string(self.receipt_handle),
            receive_count: self.attributes.as_ref().and_then(receive_count),
            event_source_arn: optional_string(self.event_source_arn),
        })
    }
}

const RECEIVE_COUNT_ATTRIBUTE: &str = "ApproximateReceiveCount";

/// Decodes an invocation payload into its message records.
///
/// Delivery order is preserved. Optional metadata with an unexpected type is
/// ignored; only the record list, `messageId` and `body` are validated.
///
/// # Errors
/// Returns a [`DecodeError`] if the payload is not an object, has no record
/// list, or any record lacks a usable `messageId` or `body`, or repeats a
/// `messageId` already seen in the batch.
pub fn decode(payload: &Value) -> Result<Vec<MessageRecord>, DecodeError> {
    // serde would also accept a JSON array as a struct, so check the shape first.
    if !payload.is_object() {
        return Err(DecodeError::NotAnObject);
    }
    let event = RawEvent::deserialize(payload).map_err(|_| DecodeError::NotAnObject)?;
    let list = event.sqs_records.or(event.records).ok_or(DecodeError::MissingRecords)?;
    let Value::Array(items) = list else {
        return Err(DecodeError::RecordsNotAnArray);
    };

    let mut seen = HashSet::with_capacity(items.len());
    let mut records = Vec::with_capacity(items.len());

    for (index, item) in items.into_iter().enumerate() {
        if !item.is_object() {
            return Err(DecodeError::RecordNotAnObject { index });
        }
        let raw = RawRecord::deserialize(item).map_err(|_| DecodeError::RecordNotAnObject { index })?;
        let record = raw.validate(index)?;
        if !seen.insert(record.message_id.clone()) {
            return Err(DecodeError::DuplicateMessageId { index, message_id: record.message_id });
        }
        records.push(record);
    }

    Ok(records)
}

fn required_string(value: Option<Value>, index: usize, field: &'static str) -> Result<String, DecodeError> {
    match value {
        None | Some(Value::Null) => Err(DecodeError::MissingField { index, field }),
        Some(Value::String(s)) => Ok(s),
        Some(_) => Err(DecodeError::InvalidField { index, field }),
    }
}

fn optional_string(value: Option<Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) => Some(s),
        _ => None,
    }
}

fn receive_count(attributes: &Value) -> Option<u32> {
    match attributes.get(RECEIVE_COUNT_ATTRIBUTE)? {
        Value::String(s) => s.trim().parse().ok(),
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        _ => None,
    }
}
