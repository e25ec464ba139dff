//! Core types shared across vconf facilities
//!
//! This crate provides foundational types used by the task executor,
//! the error facility and the logging facility:
//!
//! - **Correlation types**: TaskId, PoolId
//! - **Schema constants**: Canonical field keys and event names

pub mod correlation;
pub mod schema;

pub use correlation::{PoolId, TaskId};
