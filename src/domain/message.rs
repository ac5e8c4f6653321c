/// One queued message delivered in an invocation.
///
/// `receive_count` and `receipt_handle` belong to the queueing system and are
/// carried through untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageRecord {
    pub message_id: String,
    pub body: String,
    pub receipt_handle: Option<String>,
    pub receive_count: Option<u32>,
    pub event_source_arn: Option<String>,
}

impl MessageRecord {
    #[must_use]
    pub fn new(message_id: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            message_id: message_id.into(),
            body: body.into(),
            receipt_handle: None,
            receive_count: None,
            event_source_arn: None,
        }
    }

    /// Whether the queueing system has delivered this message before.
    #[must_use]
    pub fn is_redelivery(&self) -> bool {
        self.receive_count.is_some_and(|count| count > 1)
    }
}
