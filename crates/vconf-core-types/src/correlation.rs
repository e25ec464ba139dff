//! Correlation types for task tracking
//!
//! Every submitted unit of work carries a `TaskId`, and every worker pool
//! the executor builds carries a `PoolId`, so log lines and errors can be
//! tied back to the submission that produced them.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a single submitted task
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskId(String);

impl TaskId {
    /// Generate a new random TaskId using UUIDv7
    pub fn new() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    /// Get the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Create from an existing string (for deserialization)
    pub fn from_string(s: String) -> Self {
        Self(s)
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity of one worker pool generation
///
/// Pool ids are allocated monotonically by their executor; a reconfigure
/// that replaces the pool always yields a fresh id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PoolId(u64);

impl PoolId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for PoolId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "pool-{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_id_generation() {
        let id1 = TaskId::new();
        let id2 = TaskId::new();

        // Should generate different IDs
        assert_ne!(id1, id2);

        // Should be non-empty strings
        assert!(!id1.as_str().is_empty());
        assert!(!id2.as_str().is_empty());
    }

    #[test]
    fn test_task_id_display() {
        let id = TaskId::new();
        let display_str = format!("{}", id);
        assert_eq!(display_str, id.as_str());
    }

    #[test]
    fn test_pool_id_display_and_order() {
        let a = PoolId::new(1);
        let b = PoolId::new(2);
        assert_eq!(a.to_string(), "pool-1");
        assert!(a < b);
        assert_eq!(b.get(), 2);
    }

    #[test]
    fn test_serialization() {
        let id = TaskId::new();
        let json = serde_json::to_string(&id).unwrap();
        let deserialized: TaskId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);

        let pool = PoolId::new(7);
        let json = serde_json::to_string(&pool).unwrap();
        assert_eq!(json, "7");
    }
}
