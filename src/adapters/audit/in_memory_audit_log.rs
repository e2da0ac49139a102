//! In-memory extraction audit log.
//!
//! A ring buffer: once `capacity` entries are held, each new entry evicts
//! the oldest one. `success_rate` is the share of successful extraction
//! attempts among the retained entries; guidance calls are kept but not
//! counted.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::extraction::{AuditKind, ExtractionLogEntry};
use crate::domain::foundation::{DomainError, UserId};
use crate::ports::ExtractionAuditLog;

/// Entries retained when no capacity is given.
pub const DEFAULT_AUDIT_CAPACITY: usize = 1_000;

#[derive(Debug, Default)]
struct AuditBuffer {
    entries: VecDeque<ExtractionLogEntry>,
    evicted: u64,
}

#[derive(Debug, Clone)]
pub struct InMemoryExtractionAuditLog {
    buffer: Arc<RwLock<AuditBuffer>>,
    capacity: usize,
}

impl Default for InMemoryExtractionAuditLog {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_AUDIT_CAPACITY)
    }
}

impl InMemoryExtractionAuditLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps at most `capacity` entries. A zero capacity is raised to one.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: Arc::new(RwLock::new(AuditBuffer::default())),
            capacity: capacity.max(1),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Retained entries, oldest first.
    pub async fn entries(&self) -> Vec<ExtractionLogEntry> {
        self.buffer.read().await.entries.iter().cloned().collect()
    }

    pub async fn len(&self) -> usize {
        self.buffer.read().await.entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.buffer.read().await.entries.is_empty()
    }

    /// Entries dropped to stay within capacity since creation.
    pub async fn evicted(&self) -> u64 {
        self.buffer.read().await.evicted
    }

    /// Retained entries written for one user.
    pub async fn entries_for(&self, user_id: &UserId) -> Vec<ExtractionLogEntry> {
        self.buffer
            .read()
            .await
            .entries
            .iter()
            .filter(|e| &e.user_id == user_id)
            .cloned()
            .collect()
    }

    /// Share of retained extraction attempts that produced slots, `None`
    /// when there are none.
    pub async fn success_rate(&self) -> Option<f64> {
        let buffer = self.buffer.read().await;
        let attempts: Vec<_> = buffer
            .entries
            .iter()
            .filter(|e| e.kind == AuditKind::Extraction)
            .collect();
        if attempts.is_empty() {
            return None;
        }
        let succeeded = attempts.iter().filter(|e| e.success).count();
        Some(succeeded as f64 / attempts.len() as f64)
    }
}

#[async_trait]
impl ExtractionAuditLog for InMemoryExtractionAuditLog {
    async fn record(&self, entry: ExtractionLogEntry) -> Result<(), DomainError> {
        let mut buffer = self.buffer.write().await;
        while buffer.entries.len() >= self.capacity {
            buffer.entries.pop_front();
            buffer.evicted += 1;
        }
        buffer.entries.push_back(entry);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::extraction::{ExtractionRequest, StrategyKind};
    use crate::domain::profile::{Budget, ProfileUpdate, SlotName};

    fn request(user: &str) -> ExtractionRequest {
        ExtractionRequest::new(UserId::new(user).unwrap(), "五千", Some(SlotName::Budget))
    }

    #[tokio::test]
    async fn empty_log_has_no_rate() {
        assert_eq!(InMemoryExtractionAuditLog::new().success_rate().await, None);
    }

    #[tokio::test]
    async fn rate_ignores_guidance_entries() {
        let log = InMemoryExtractionAuditLog::new();
        let update = ProfileUpdate::new().with_budget(Budget::new(5000));

        log.record(ExtractionLogEntry::extraction_succeeded(
            &request("U1"),
            StrategyKind::Semantic,
            "{\"budget\":5000}",
            &update,
        ))
        .await
        .unwrap();
        log.record(ExtractionLogEntry::extraction_failed(&request("U1"), StrategyKind::Semantic, None))
            .await
            .unwrap();
        log.record(ExtractionLogEntry::guidance(&request("U1"), Some("預算多少呢？")))
            .await
            .unwrap();

        assert_eq!(log.entries().await.len(), 3);
        assert_eq!(log.success_rate().await, Some(0.5));
    }

    #[tokio::test]
    async fn entries_for_filters_by_user() {
        let log = InMemoryExtractionAuditLog::new();
        log.record(ExtractionLogEntry::guidance(&request("U1"), None)).await.unwrap();
        log.record(ExtractionLogEntry::guidance(&request("U2"), None)).await.unwrap();

        let mine = log.entries_for(&UserId::new("U2").unwrap()).await;
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].topic, "budget");
    }

    #[tokio::test]
    async fn oldest_entries_are_evicted_at_capacity() {
        let log = InMemoryExtractionAuditLog::with_capacity(3);
        for user in ["U1", "U2", "U3", "U4", "U5"] {
            log.record(ExtractionLogEntry::guidance(&request(user), None))
                .await
                .unwrap();
        }

        assert_eq!(log.len().await, 3);
        assert_eq!(log.evicted().await, 2);
        let users: Vec<String> = log
            .entries()
            .await
            .iter()
            .map(|e| e.user_id.to_string())
            .collect();
        assert_eq!(users, vec!["U3", "U4", "U5"]);
    }

    #[tokio::test]
    async fn zero_capacity_still_keeps_latest_entry() {
        let log = InMemoryExtractionAuditLog::with_capacity(0);
        log.record(ExtractionLogEntry::guidance(&request("U1"), None)).await.unwrap();
        log.record(ExtractionLogEntry::guidance(&request("U2"), None)).await.unwrap();

        assert_eq!(log.capacity(), 1);
        assert_eq!(log.entries_for(&UserId::new("U2").unwrap()).await.len(), 1);
        assert_eq!(log.evicted().await, 1);
    }
}
