//! Declarative checklists per audit type, plus the evaluation table.
//!
//! Checklist entries are pure data (`CheckItemSpec`); the behavior
//! behind each entry's `EvalKind` tag lives in [`evaluators`]. The
//! registry is process-wide, read-only, and safely shared across
//! concurrent workflow runs.

pub mod evaluators;
pub mod registry;

pub use evaluators::evaluate;
pub use registry::{checklist_for, validate_checklist};
