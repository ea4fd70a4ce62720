//! nyx - automation for keeping GitHub repositories green
//!
//! The library behind the `nyx` binary. It decides whether a pull request is
//! safe to auto-merge given its commit statuses, check runs, and collaborator
//! reviews, and it maintains a tracking issue per failed nightly workflow
//! run.
//!
//! Module map:
//! - [`context`] - parse and classify the `GITHUB_CONTEXT` workflow payload
//! - [`merge`] - the precedence rules, the decision engine, and the event
//!   dispatcher
//! - [`provider`] - the GitHub collaborator behind an injectable trait
//! - [`report`] - nightly failure tracking issues
//! - [`types`] - the shared domain types, including [`types::Outcome`] whose
//!   numeric codes double as the process exit status

pub mod context;
pub mod error;
pub mod merge;
pub mod provider;
pub mod report;
pub mod types;
