//! Extraction audit log adapters.

mod in_memory_audit_log;

pub use in_memory_audit_log::{InMemoryExtractionAuditLog, DEFAULT_AUDIT_CAPACITY};
