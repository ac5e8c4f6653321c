pub mod attempt;
pub mod context;
pub mod message;

pub use attempt::AttemptEntry;
pub use context::InvocationContext;
pub use message::MessageRecord;
