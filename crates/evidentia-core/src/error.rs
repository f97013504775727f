//! One flat error enum spanning every subsystem instead of giving each
//! subsystem its own type. Each variant below is grouped under a comment
//! banner naming the abstract error kind it belongs to; downstream crates
//! re-export the variants they produce.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum EvidentiaError {
    // ── IntakeError ─────────────────────────────────────────────────────
    #[error("malformed artifact: {detail}")]
    MalformedArtifact { detail: String },

    #[error("duplicate artifact id: {id}")]
    DuplicateArtifactId { id: String },

    #[error("invalid hash format: {detail}")]
    InvalidHashFormat { detail: String },

    #[error("credibility factor count exceeds bound: {count} factors")]
    TooManyCredibilityFactors { count: usize },

    // ── ResolutionError ─────────────────────────────────────────────────
    #[error("dependency cycle detected among artifacts: {}", .ids.join(", "))]
    DependencyCycle { ids: Vec<String> },

    #[error("artifact {artifact_id} is missing required predecessor(s): {}", .missing.join(", "))]
    MissingRequiredPredecessor {
        artifact_id: String,
        missing: Vec<String>,
    },

    #[error("dependency batch unresolvable: {reason}")]
    UnresolvableBatch { reason: String },

    // ── ConsentDeclined ─────────────────────────────────────────────────
    #[error("consent declined for artifact {artifact_id}: {rationale}")]
    ConsentDeclined {
        artifact_id: String,
        rationale: String,
    },

    // ── MiningError ─────────────────────────────────────────────────────
    #[error("mining exceeded budget of {max_iterations} iterations")]
    MiningExceededBudget { max_iterations: u64 },

    #[error("mining cancelled")]
    Cancelled,

    // ── ValidationError ─────────────────────────────────────────────────
    #[error("chain link broken at block {index}: expected previous_hash {expected}, got {actual}")]
    BrokenLink {
        index: u64,
        expected: String,
        actual: String,
    },

    #[error("merkle root mismatch at block {index}: expected {expected}, got {actual}")]
    MerkleRootMismatch {
        index: u64,
        expected: String,
        actual: String,
    },

    #[error("proof-of-work invalid at block {index}: hash {hash} does not meet difficulty {difficulty}")]
    ProofOfWorkInvalid {
        index: u64,
        hash: String,
        difficulty: u8,
    },

    #[error("non-monotonic timestamp at block {index}: {timestamp} <= previous {previous}")]
    NonMonotonicTimestamp {
        index: u64,
        timestamp: i64,
        previous: i64,
    },

    #[error("artifact id {id} appears in more than one block")]
    DuplicateArtifactAcrossChain { id: String },

    #[error("content hash {hash} appears in more than one block without a satisfied amendment/placeholder reference")]
    DuplicateContentHashAcrossChain { hash: String },

    #[error("chain link index mismatch at position {position}: expected index {expected}, got {actual}")]
    IndexMismatch {
        position: u64,
        expected: u64,
        actual: u64,
    },

    // ── ProofError ──────────────────────────────────────────────────────
    #[error("artifact not found: {id}")]
    ArtifactNotFound { id: String },

    #[error("malformed proof: {detail}")]
    MalformedProof { detail: String },

    // ── Import/export ───────────────────────────────────────────────────
    #[error("chain snapshot import failed: {detail}")]
    ImportFailed { detail: String },

    #[error("{0}")]
    Other(String),
}

/// The CLI exit-code convention for any binary built on
/// this core. The core itself never calls `process::exit`; this is a
/// pure lookup a caller's `main` can use when translating a surfaced
/// `EvidentiaError` into a process exit status.
pub fn suggested_exit_code(err: &EvidentiaError) -> u8 {
    match err {
        EvidentiaError::MalformedArtifact { .. } | EvidentiaError::InvalidHashFormat { .. } => 5,
        EvidentiaError::DuplicateArtifactId { .. } | EvidentiaError::TooManyCredibilityFactors { .. } => 5,
        EvidentiaError::DependencyCycle { .. }
        | EvidentiaError::MissingRequiredPredecessor { .. }
        | EvidentiaError::UnresolvableBatch { .. } => 2,
        EvidentiaError::ConsentDeclined { .. } => 3,
        EvidentiaError::MiningExceededBudget { .. } | EvidentiaError::Cancelled => 4,
        EvidentiaError::BrokenLink { .. }
        | EvidentiaError::MerkleRootMismatch { .. }
        | EvidentiaError::ProofOfWorkInvalid { .. }
        | EvidentiaError::NonMonotonicTimestamp { .. }
        | EvidentiaError::DuplicateArtifactAcrossChain { .. }
        | EvidentiaError::DuplicateContentHashAcrossChain { .. }
        | EvidentiaError::IndexMismatch { .. }
        | EvidentiaError::ImportFailed { .. } => 1,
        EvidentiaError::ArtifactNotFound { .. } | EvidentiaError::MalformedProof { .. } => 5,
        EvidentiaError::Other(_) => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consent_declined_maps_to_exit_code_three() {
        let err = EvidentiaError::ConsentDeclined {
            artifact_id: "ART-1".into(),
            rationale: "policy".into(),
        };
        assert_eq!(suggested_exit_code(&err), 3);
    }

    #[test]
    fn mining_budget_exceeded_maps_to_exit_code_four() {
        let err = EvidentiaError::MiningExceededBudget { max_iterations: 10 };
        assert_eq!(suggested_exit_code(&err), 4);
    }
}
