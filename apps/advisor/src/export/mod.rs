// Export: plan → printable document → sink.

pub mod document;
pub mod handlers;
pub mod sink;
