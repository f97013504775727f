//! Canonical artifact byte serialization: the fields
//! `(id, content_hash, statement, type, tier, authentication_method,
//! weight_millis, case_id, submitted_at)` concatenated in that order,
//! each preceded by its byte length. This is the *only* input to the
//! artifact hash — it is deliberately not `bincode` or `serde_json`, both
//! of which the spec's "floating-point in hashes" and "dynamic metadata
//! bags" notes (§9) rule out as hash inputs (floats and open-ended map
//! ordering would make the hash non-reproducible).

use evidentia_core::{Artifact, ArtifactType, AuthenticationMethod, Tier};

fn push_field(buf: &mut Vec<u8>, field: &[u8]) {
    buf.extend_from_slice(&(field.len() as u32).to_be_bytes());
    buf.extend_from_slice(field);
}

fn tier_tag(tier: Tier) -> &'static str {
    match tier {
        Tier::SelfAuthenticating => "SELF_AUTHENTICATING",
        Tier::Government => "GOVERNMENT",
        Tier::FinancialInstitution => "FINANCIAL_INSTITUTION",
        Tier::IndependentThirdParty => "INDEPENDENT_THIRD_PARTY",
        Tier::BusinessRecords => "BUSINESS_RECORDS",
        Tier::FirstPartyAdverse => "FIRST_PARTY_ADVERSE",
        Tier::FirstPartyFriendly => "FIRST_PARTY_FRIENDLY",
        Tier::UncorroboratedPerson => "UNCORROBORATED_PERSON",
    }
}

fn auth_tag(method: AuthenticationMethod) -> &'static str {
    match method {
        AuthenticationMethod::None => "none",
        AuthenticationMethod::DigitalSeal => "digital_seal",
        AuthenticationMethod::Notarized => "notarized",
        AuthenticationMethod::Witness => "witness",
        AuthenticationMethod::SelfAttested => "self",
    }
}

fn type_tag(t: ArtifactType) -> &'static str {
    match t {
        ArtifactType::Document => "document",
        ArtifactType::Fact => "fact",
        ArtifactType::Amendment => "amendment",
        ArtifactType::CourtOrder => "court_order",
        ArtifactType::PropertyTransfer => "property_transfer",
        ArtifactType::Response => "response",
        ArtifactType::Placeholder => "placeholder",
        ArtifactType::ContradictionRecord => "contradiction_record",
    }
}

/// Serialize the fixed, hash-relevant projection of an artifact.
pub fn canonical_bytes(artifact: &Artifact) -> Vec<u8> {
    let mut buf = Vec::new();
    push_field(&mut buf, artifact.id.as_bytes());
    push_field(&mut buf, &artifact.content_hash.0);
    push_field(&mut buf, artifact.statement.as_bytes());
    push_field(&mut buf, type_tag(artifact.artifact_type).as_bytes());
    push_field(&mut buf, tier_tag(artifact.tier).as_bytes());
    push_field(
        &mut buf,
        auth_tag(artifact.authentication_method).as_bytes(),
    );
    push_field(&mut buf, &artifact.weight_millis().to_be_bytes());
    push_field(&mut buf, artifact.case_id.0.as_bytes());
    push_field(&mut buf, &artifact.submitted_at.to_be_bytes());
    buf
}

/// `SHA3-256(canonical(artifact))`, as used for Merkle leaves and the
/// artifact hash index.
pub fn artifact_hash(artifact: &Artifact) -> [u8; 32] {
    crate::sha3_256(&canonical_bytes(artifact))
}
