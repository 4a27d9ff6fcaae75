//! # Sitelens Core
//!
//! Core library for the Sitelens audit platform: the audit workflow
//! engine, the check provider contracts and their HTTP implementations,
//! and the boundary collaborators (URL safety guard, rate limiter, and
//! deterministic file-format generators).
//!
//! ## Overview
//!
//! An audit is one end-to-end run against a target URL:
//!
//! - the [`checklist`] registry declares which items an audit type
//!   evaluates and which provider feeds each item
//! - the [`workflow`] dispatcher runs the deduplicated provider set
//!   sequentially under a single wall-clock budget
//! - the evaluator, scorer, and report builder turn whatever results
//!   were obtained into a deterministic scored [`AuditReport`]
//!
//! Providers are thin async probes behind traits; any subset of them may
//! fail without failing the workflow.
//!
//! ## Architecture
//!
//! - [`checklist`]: static checklist tables plus the evaluation
//!   function table
//! - [`providers`]: provider traits, the [`providers::ProviderSet`]
//!   bundle, and reqwest-backed implementations
//! - [`workflow`]: dispatcher, evaluator, scorer, progress reporter,
//!   report builder, and the [`workflow::AuditWorkflow`] entry point
//! - [`safety`], [`ratelimit`]: caller-side guards run before a
//!   workflow is ever invoked
//! - [`generators`]: pure robots.txt / sitemap / meta-tag builders

#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(missing_docs)]

/// Checklist registry and evaluation function table
pub mod checklist;

/// Error types and error handling utilities
pub mod error;

/// Deterministic file-format generators (robots.txt, sitemap, meta tags)
pub mod generators;

/// Check provider contracts and HTTP implementations
pub mod providers;

/// Fixed-window rate limiting for workflow invocations
pub mod ratelimit;

/// Target URL safety validation
pub mod safety;

/// Audit workflow engine: dispatch, evaluation, scoring, reporting
pub mod workflow;

pub use error::{AuditError, Result};
pub use sitelens_model::AuditReport;
pub use workflow::{AuditWorkflow, WorkflowConfig};
