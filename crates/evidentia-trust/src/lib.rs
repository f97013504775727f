//! Trust analyzer and contradiction index in one crate, because the
//! analyzer's contradiction-search step *is* the index.

pub mod analyzer;
pub mod contradiction;

pub use analyzer::{analyze, CustodySignatureVerifier, Recommendation, TrustReport};
pub use contradiction::{
    contradictions_for, find_contradictions, group_by_case, Contradiction, ContradictionReason,
    Severity,
};
