//! Current-vs-desired configuration comparator.
//!
//! Compares the live configuration of a managed product against the
//! operator-desired configuration and reports only the portions that differ,
//! in a shape suitable for `check_compliance` results.
//!
//! ## Entry point
//!
//! ```
//! use serde_json::json;
//! use vconf_core::comparator::get_non_compliant_configs;
//!
//! let diff = get_non_compliant_configs(
//!     &json!({"timeout": 300, "banner": "hi"}),
//!     &json!({"timeout": 900, "banner": "hi"}),
//! );
//! assert_eq!(diff.current, Some(json!({"timeout": 300})));
//! assert_eq!(diff.desired, Some(json!({"timeout": 900})));
//! ```
//!
//! ## Guarantees
//!
//! - **Purity**: no side effects; safe to call from any number of threads.
//! - **Determinism**: identical inputs produce identical diffs (mapping keys are
//!   emitted in sorted order, sequence elements in discovery order).
//! - **Minimality**: a key that is present and equivalent on both sides never
//!   appears in either side of the diff.
//! - **Emptiness**: the diff is empty iff the two inputs are equivalent.

pub mod defaults;
pub mod engine;
pub mod human_summary;
pub mod model;

pub use defaults::{fill_defaults, with_defaults};
pub use engine::{get_non_compliant_configs, Comparator};
pub use human_summary::render_drift_summary;
pub use model::{CompareOptions, ConfigDiff, ListComparison};
