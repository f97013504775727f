//! Turn an `ArtifactIntake` into a fully-weighted `Artifact`:
//! assign the deterministic id, run the pure weight calculator,
//! and reject an oversized credibility-factor set before it ever reaches
//! the ledger.

use evidentia_core::constants::MAX_CREDIBILITY_FACTORS;
use evidentia_core::{ids, Artifact, EvidentiaError};

use crate::intake::ArtifactIntake;

/// Build the artifact the ledger will see. `now_millis` is the caller's
/// clock read, taken at the ingest boundary — nothing downstream of this
/// function reads a clock (DESIGN.md, determinism requirement).
pub fn build_artifact(intake: ArtifactIntake, now_millis: i64) -> Result<Artifact, EvidentiaError> {
    if intake.credibility_factors.len() > MAX_CREDIBILITY_FACTORS {
        return Err(EvidentiaError::TooManyCredibilityFactors {
            count: intake.credibility_factors.len(),
        });
    }

    let weight = evidentia_weight::artifact_weight(
        intake.tier,
        &intake.credibility_factors,
        intake.custody_chain.len(),
        &intake.authentication_marks,
    );

    Ok(Artifact {
        id: ids::generate_artifact_id(now_millis),
        content_hash: intake.content_hash,
        statement: intake.statement,
        artifact_type: intake.artifact_type,
        tier: intake.tier,
        authentication_method: intake.authentication_method,
        credibility_factors: intake.credibility_factors,
        authentication_marks: intake.authentication_marks,
        custody_chain: intake.custody_chain,
        case_id: intake.case_id,
        metadata: intake.metadata,
        weight,
        submitted_at: now_millis,
        submitted_by: intake.submitted_by,
    })
}
