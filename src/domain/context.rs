use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Execution context supplied by the host for a single invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvocationContext {
    pub invocation_id: String,
    pub function_name: Option<String>,
    /// Deadline in milliseconds since the Unix epoch.
    pub deadline_ms: Option<u64>,
}

impl InvocationContext {
    #[must_use]
    pub fn new(invocation_id: impl Into<String>) -> Self {
        Self { invocation_id: invocation_id.into(), function_name: None, deadline_ms: None }
    }

    #[must_use]
    pub fn with_function_name(mut self, function_name: impl Into<String>) -> Self {
        self.function_name = Some(function_name.into());
        self
    }

    #[must_use]
    pub const fn with_deadline_ms(mut self, deadline_ms: u64) -> Self {
        self.deadline_ms = Some(deadline_ms);
        self
    }

    /// Time left before the host reclaims the invocation, saturating at zero.
    #[must_use]
    pub fn remaining_at(&self, now: SystemTime) -> Option<Duration> {
        let deadline = UNIX_EPOCH + Duration::from_millis(self.deadline_ms?);
        Some(deadline.duration_since(now).unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remaining_without_deadline() {
        let ctx = InvocationContext::new("req-1");
        assert_eq!(ctx.remaining_at(SystemTime::now()), None);
    }

    #[test]
    fn test_remaining_before_and_after_deadline() {
        let ctx = InvocationContext::new("req-1").with_deadline_ms(10_000);

        let before = UNIX_EPOCH + Duration::from_millis(7_500);
        assert_eq!(ctx.remaining_at(before), Some(Duration::from_millis(2_500)));

        let after = UNIX_EPOCH + Duration::from_millis(12_000);
        assert_eq!(ctx.remaining_at(after), Some(Duration::ZERO));
    }
}
