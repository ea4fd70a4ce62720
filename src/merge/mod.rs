//! Merge decision engine
//!
//! Three-layer pattern:
//! 1. Rules - the precedence chain over fetched signals (pure, testable)
//! 2. Engine - fetch signals for one PR and apply the rules (effectful)
//! 3. Dispatch - resolve the target PR from a workflow event (effectful)

mod dispatch;
mod engine;
mod rules;

pub use dispatch::{dispatch, merge_by_context};
pub use engine::{decide, MergeDecision, MergeEngine};
pub use rules::{evaluate_ci, evaluate_reviews, filter_reviews_by_collaborators};
