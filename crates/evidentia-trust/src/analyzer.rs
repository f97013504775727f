//! Trust analyzer: consumes an artifact plus the current
//! chain view and produces a `TrustReport` — score, warnings, detected
//! contradictions, and a mint recommendation.

use tracing::debug;

use evidentia_core::constants::{
    AGE_PENALTY_MULTIPLIER, AGE_PENALTY_THRESHOLD_DAYS, AUTH_DIGITAL_SEAL_MULTIPLIER,
    AUTH_NONE_MULTIPLIER, AUTH_NOTARIZED_MULTIPLIER, AUTH_WITNESS_MULTIPLIER,
    CONTRADICTION_MULTIPLIER, CUSTODY_INVALID_MULTIPLIER, HASH_MISMATCH_MULTIPLIER,
    TRUST_AUTO_MINT_THRESHOLD, TRUST_CORROBORATION_THRESHOLD, TRUST_MANUAL_CONSENT_THRESHOLD,
};
use evidentia_core::{Artifact, AuthenticationMethod, CustodyEntry};

use crate::contradiction::{contradictions_for, find_contradictions, Contradiction};

/// Capability the core consumes to check a custody-entry signature.
/// An unconfigured verifier is
/// "unverified but not invalid" — it never fails validation, only the
/// trust score computation below treats it conservatively.
pub trait CustodySignatureVerifier {
    fn verify(&self, entry: &CustodyEntry) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recommendation {
    AutoMint,
    ManualConsent,
    NeedsCorroboration,
    Reject,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrustReport {
    pub score: f64,
    pub warnings: Vec<String>,
    pub contradictions: Vec<Contradiction>,
    pub recommendation: Recommendation,
}

fn recommend(score: f64) -> Recommendation {
    if score >= TRUST_AUTO_MINT_THRESHOLD {
        Recommendation::AutoMint
    } else if score >= TRUST_MANUAL_CONSENT_THRESHOLD {
        Recommendation::ManualConsent
    } else if score >= TRUST_CORROBORATION_THRESHOLD {
        Recommendation::NeedsCorroboration
    } else {
        Recommendation::Reject
    }
}

fn auth_multiplier(method: AuthenticationMethod) -> f64 {
    match method {
        AuthenticationMethod::DigitalSeal => AUTH_DIGITAL_SEAL_MULTIPLIER,
        AuthenticationMethod::Notarized => AUTH_NOTARIZED_MULTIPLIER,
        AuthenticationMethod::Witness => AUTH_WITNESS_MULTIPLIER,
        AuthenticationMethod::None | AuthenticationMethod::SelfAttested => AUTH_NONE_MULTIPLIER,
    }
}

/// `true` iff custody timestamps are strictly increasing and every entry
/// that carries a signature verifies, when a verifier is configured.
fn custody_chain_valid(
    custody_chain: &[CustodyEntry],
    verifier: Option<&dyn CustodySignatureVerifier>,
    warnings: &mut Vec<String>,
) -> bool {
    for window in custody_chain.windows(2) {
        if window[1].timestamp <= window[0].timestamp {
            return false;
        }
    }
    for entry in custody_chain {
        if entry.signature.is_some() {
            match verifier {
                Some(v) => {
                    if !v.verify(entry) {
                        return false;
                    }
                }
                None => warnings.push(format!(
                    "custody entry at {} by {} carries a signature but no verifier is configured",
                    entry.timestamp, entry.holder
                )),
            }
        }
    }
    true
}

const MILLIS_PER_DAY: i64 = 86_400_000;

/// Analyze `artifact` against the other artifacts already known to share
/// its case (`case_peers`, drawn from pending + minted artifacts), an
/// optional recomputed content hash (when the caller supplied raw content
/// for verification), an optional custody-signature verifier, and "now"
/// (for the age penalty).
pub fn analyze(
    artifact: &Artifact,
    case_peers: &[&Artifact],
    recomputed_content_hash: Option<evidentia_core::ContentHash>,
    custody_verifier: Option<&dyn CustodySignatureVerifier>,
    material_keys: &[&str],
    now_millis: i64,
) -> TrustReport {
    let mut score = artifact.weight;
    let mut warnings = Vec::new();

    if let Some(recomputed) = recomputed_content_hash {
        if recomputed != artifact.content_hash {
            warnings.push(format!(
                "content hash mismatch for artifact {}: recomputed hash does not match stored content_hash",
                artifact.id
            ));
            score *= HASH_MISMATCH_MULTIPLIER;
        }
    }

    if !custody_chain_valid(&artifact.custody_chain, custody_verifier, &mut warnings) {
        warnings.push(format!(
            "custody chain for artifact {} is not strictly monotonic or fails signature verification",
            artifact.id
        ));
        score *= CUSTODY_INVALID_MULTIPLIER;
    }

    let mut all_peers: Vec<&Artifact> = case_peers.to_vec();
    all_peers.push(artifact);
    let all_contradictions = find_contradictions(&all_peers, material_keys);
    let mine = contradictions_for(&artifact.id, &all_contradictions);

    let higher_tier_contradiction = mine.iter().any(|c| {
        let other_id = if c.a_id == artifact.id { &c.b_id } else { &c.a_id };
        c.winner_id == *other_id && c.winner_id != artifact.id
    });
    if higher_tier_contradiction {
        warnings.push(format!(
            "artifact {} contradicts at least one higher-tier artifact in the same case",
            artifact.id
        ));
        score *= CONTRADICTION_MULTIPLIER;
    }

    score *= auth_multiplier(artifact.authentication_method);

    let age_days = (now_millis - artifact.submitted_at) / MILLIS_PER_DAY;
    if age_days > AGE_PENALTY_THRESHOLD_DAYS {
        score *= AGE_PENALTY_MULTIPLIER;
    }

    score = score.clamp(0.0, 1.0);
    let recommendation = recommend(score);

    debug!(
        artifact_id = %artifact.id,
        score,
        contradictions = mine.len(),
        recommendation = ?recommendation,
        "trust analysis complete"
    );

    TrustReport {
        score,
        warnings,
        contradictions: mine.into_iter().cloned().collect(),
        recommendation,
    }
}
