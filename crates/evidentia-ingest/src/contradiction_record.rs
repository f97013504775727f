//! Turn a detected `Contradiction` into the
//! `ContradictionRecord` artifact that is itself minted onto the chain,
//! naming the winner chosen by tier precedence.

use evidentia_core::{
    ids, Artifact, ArtifactType, AuthenticationMethod, CaseId, ContentHash, Metadata, Tier,
};
use evidentia_trust::{Contradiction, ContradictionReason};

/// Build the artifact. `content_hash` is derived from the conflicting
/// pair and the winner rather than supplied externally — a contradiction
/// record has no underlying document of its own (§1 "the core ... does
/// not store or transmit artifact content"), but its hash still needs to
/// be unique per pair so the chain's cross-block content-hash uniqueness
/// check (§4.1) does not flag two unrelated records as duplicates.
pub fn build_contradiction_record(
    contradiction: &Contradiction,
    case_id: &CaseId,
    now_millis: i64,
) -> Artifact {
    let reason_text = match &contradiction.reason {
        ContradictionReason::Antonym { token_a, token_b } => {
            format!("antonym conflict (\"{token_a}\" vs \"{token_b}\")")
        }
        ContradictionReason::MaterialKeyMismatch { key } => {
            format!("material key \"{key}\" mismatch")
        }
    };
    let statement = format!(
        "Contradiction between {} and {} ({reason_text}); {} resolved as authoritative by tier precedence",
        contradiction.a_id, contradiction.b_id, contradiction.winner_id
    );

    let hash_input = format!(
        "{}|{}|{}|{:?}",
        contradiction.a_id, contradiction.b_id, contradiction.winner_id, contradiction.reason
    );
    let content_hash = ContentHash(evidentia_crypto::sha3_256(hash_input.as_bytes()));

    let mut metadata = Metadata::default();
    metadata.custom.insert("contradiction_a".into(), contradiction.a_id.clone());
    metadata.custom.insert("contradiction_b".into(), contradiction.b_id.clone());
    metadata
        .custom
        .insert("contradiction_winner".into(), contradiction.winner_id.clone());
    metadata
        .custom
        .insert("contradiction_severity".into(), format!("{:?}", contradiction.severity));

    let tier = Tier::SelfAuthenticating;
    let weight = evidentia_weight::artifact_weight(
        tier,
        &Default::default(),
        0,
        &Default::default(),
    );

    Artifact {
        id: ids::generate_conflict_id(now_millis),
        content_hash,
        statement,
        artifact_type: ArtifactType::ContradictionRecord,
        tier,
        authentication_method: AuthenticationMethod::None,
        credibility_factors: Default::default(),
        authentication_marks: Default::default(),
        custody_chain: vec![],
        case_id: case_id.clone(),
        metadata,
        weight,
        submitted_at: now_millis,
        submitted_by: "ledger".into(),
    }
}
