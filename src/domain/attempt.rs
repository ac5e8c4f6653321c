use crate::domain::{InvocationContext, MessageRecord};
use serde::Serialize;

/// Structured observation of one delivery attempt.
///
/// Holds no wall-clock data so that identical invocations produce identical
/// entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttemptEntry {
    pub invocation_id: String,
    pub function_name: Option<String>,
    pub message_id: String,
    pub position: usize,
    pub receive_count: Option<u32>,
    pub redelivery: bool,
    pub body_len: usize,
    pub body_excerpt: String,
    pub truncated: bool,
}

impl AttemptEntry {
    #[must_use]
    pub fn new(ctx: &InvocationContext, position: usize, record: &MessageRecord, excerpt_limit: usize) -> Self {
        let (body_excerpt, truncated) = excerpt(&record.body, excerpt_limit);
        Self {
            invocation_id: ctx.invocation_id.clone(),
            function_name: ctx.function_name.clone(),
            message_id: record.message_id.clone(),
            position,
            receive_count: record.receive_count,
            redelivery: record.is_redelivery(),
            body_len: record.body.len(),
            body_excerpt: body_excerpt.to_owned(),
            truncated,
        }
    }
}

/// Cuts `body` to at most `limit` bytes without splitting a character.
fn excerpt(body: &str, limit: usize) -> (&str, bool) {
    if body.len() <= limit {
        return (body, false);
    }
    let mut end = limit;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    (&body[..end], true)
}
