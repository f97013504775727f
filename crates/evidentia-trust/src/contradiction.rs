//! Contradiction index: pairwise conflict detection between
//! artifacts sharing a `case_id`, severity tiering, and tier-precedence
//! resolution. The antonym table is a `once_cell::Lazy` static, the way
//! schema registries are kept workspace-wide here too.

use once_cell::sync::Lazy;
use std::collections::HashMap;

use evidentia_core::constants::{
    tier_base_weight, CONTRADICTION_SEVERITY_HIGH, CONTRADICTION_SEVERITY_MEDIUM,
};
use evidentia_core::{Artifact, Tier};

/// `{owns↔does not own, true↔false, valid↔invalid, authentic↔forged}`,
/// case-insensitive substring match. Kept small and explicit —
/// no broader NLP guessing.
static ANTONYM_PAIRS: Lazy<Vec<(&'static str, &'static str)>> = Lazy::new(|| {
    vec![
        ("owns", "does not own"),
        ("true", "false"),
        ("valid", "invalid"),
        ("authentic", "forged"),
    ]
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContradictionReason {
    Antonym { token_a: String, token_b: String },
    MaterialKeyMismatch { key: String },
}

/// A detected pairwise conflict between two artifacts in the same case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contradiction {
    pub a_id: String,
    pub b_id: String,
    pub severity: Severity,
    pub reason: ContradictionReason,
    /// Id of the artifact that wins under tier-precedence resolution.
    pub winner_id: String,
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// `true` iff `a`'s statement and `b`'s statement carry opposite ends of
/// one of the antonym pairs.
fn antonym_conflict(a: &str, b: &str) -> Option<(String, String)> {
    for (x, y) in ANTONYM_PAIRS.iter() {
        if contains_ci(a, x) && contains_ci(b, y) {
            return Some((x.to_string(), y.to_string()));
        }
        if contains_ci(a, y) && contains_ci(b, x) {
            return Some((y.to_string(), x.to_string()));
        }
    }
    None
}

/// `true` iff both artifacts carry a material metadata key with differing
/// values.
fn material_key_mismatch(a: &Artifact, b: &Artifact, material_keys: &[&str]) -> Option<String> {
    for key in material_keys {
        let av = a.metadata.custom.get(*key);
        let bv = b.metadata.custom.get(*key);
        if let (Some(av), Some(bv)) = (av, bv) {
            if av != bv {
                return Some(key.to_string());
            }
        }
    }
    None
}

fn severity(a_tier: Tier, b_tier: Tier) -> Severity {
    let diff = (tier_base_weight(a_tier) - tier_base_weight(b_tier)).abs();
    if diff > CONTRADICTION_SEVERITY_HIGH {
        Severity::High
    } else if diff > CONTRADICTION_SEVERITY_MEDIUM {
        Severity::Medium
    } else {
        Severity::Low
    }
}

/// Resolve a single conflict by tier precedence: `SELF_AUTHENTICATING`
/// always wins; otherwise higher-weight tier wins; ties broken by earlier
/// `submitted_at`.
fn resolve_winner<'a>(a: &'a Artifact, b: &'a Artifact) -> &'a Artifact {
    if a.tier == Tier::SelfAuthenticating && b.tier != Tier::SelfAuthenticating {
        return a;
    }
    if b.tier == Tier::SelfAuthenticating && a.tier != Tier::SelfAuthenticating {
        return b;
    }
    let wa = tier_base_weight(a.tier);
    let wb = tier_base_weight(b.tier);
    if wa > wb {
        a
    } else if wb > wa {
        b
    } else if a.submitted_at <= b.submitted_at {
        a
    } else {
        b
    }
}

/// Find every pairwise contradiction among `case_artifacts` (artifacts
/// already known to share a `case_id`). `material_keys` is the
/// caller-declared "material" metadata key set (default:
/// `amount`, `date`, `owner`, `parcel_id`).
pub fn find_contradictions(
    case_artifacts: &[&Artifact],
    material_keys: &[&str],
) -> Vec<Contradiction> {
    let mut out = Vec::new();
    for i in 0..case_artifacts.len() {
        for j in (i + 1)..case_artifacts.len() {
            let a = case_artifacts[i];
            let b = case_artifacts[j];

            let reason = if let Some((token_a, token_b)) = antonym_conflict(&a.statement, &b.statement) {
                Some(ContradictionReason::Antonym { token_a, token_b })
            } else {
                material_key_mismatch(a, b, material_keys)
                    .map(|key| ContradictionReason::MaterialKeyMismatch { key })
            };

            if let Some(reason) = reason {
                let winner = resolve_winner(a, b);
                out.push(Contradiction {
                    a_id: a.id.clone(),
                    b_id: b.id.clone(),
                    severity: severity(a.tier, b.tier),
                    reason,
                    winner_id: winner.id.clone(),
                });
            }
        }
    }
    out
}

/// Contradictions involving a specific artifact id, keyed for quick lookup
/// by the trust analyzer.
pub fn contradictions_for<'a>(
    target_id: &str,
    contradictions: &'a [Contradiction],
) -> Vec<&'a Contradiction> {
    contradictions
        .iter()
        .filter(|c| c.a_id == target_id || c.b_id == target_id)
        .collect()
}

/// Group a flat artifact slice by `case_id` (helper for building
/// `case_artifacts` batches before calling [`find_contradictions`]).
pub fn group_by_case<'a>(artifacts: &[&'a Artifact]) -> HashMap<String, Vec<&'a Artifact>> {
    let mut groups: HashMap<String, Vec<&'a Artifact>> = HashMap::new();
    for artifact in artifacts {
        groups.entry(artifact.case_id.0.clone()).or_default().push(artifact);
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use evidentia_core::{ArtifactType, AuthenticationMethod, CaseId, ContentHash, Metadata};

    fn artifact(id: &str, tier: Tier, statement: &str, submitted_at: i64) -> Artifact {
        Artifact {
            id: id.to_string(),
            content_hash: ContentHash([0u8; 32]),
            statement: statement.to_string(),
            artifact_type: ArtifactType::Fact,
            tier,
            authentication_method: AuthenticationMethod::None,
            credibility_factors: Default::default(),
            authentication_marks: Default::default(),
            custody_chain: vec![],
            case_id: CaseId("CA-2026-CIV-0001".into()),
            metadata: Metadata::default(),
            weight: tier_base_weight(tier),
            submitted_at,
            submitted_by: "actor".into(),
        }
    }

    #[test]
    fn antonym_conflict_is_detected_case_insensitively() {
        let a = artifact("A", Tier::FirstPartyFriendly, "Claimant owns parcel 7", 100);
        let b = artifact("B", Tier::SelfAuthenticating, "Deed shows claimant DOES NOT OWN parcel 7", 200);
        let found = find_contradictions(&[&a, &b], &["owner"]);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].severity, Severity::High);
        assert_eq!(found[0].winner_id, "B", "SELF_AUTHENTICATING always wins");
    }

    #[test]
    fn material_key_mismatch_is_detected() {
        let mut a = artifact("A", Tier::BusinessRecords, "Contract terms", 100);
        let mut b = artifact("B", Tier::BusinessRecords, "Contract terms", 200);
        a.metadata.custom.insert("amount".into(), "1000".into());
        b.metadata.custom.insert("amount".into(), "2000".into());
        let found = find_contradictions(&[&a, &b], &["amount"]);
        assert_eq!(found.len(), 1);
        assert_eq!(
            found[0].reason,
            ContradictionReason::MaterialKeyMismatch { key: "amount".into() }
        );
        assert_eq!(found[0].winner_id, "A", "equal tier, earlier submission wins");
    }

    #[test]
    fn no_conflict_when_statements_and_metadata_agree() {
        let a = artifact("A", Tier::BusinessRecords, "Routine filing", 100);
        let b = artifact("B", Tier::BusinessRecords, "Another routine filing", 200);
        assert!(find_contradictions(&[&a, &b], &["amount"]).is_empty());
    }

    #[test]
    fn severity_buckets_follow_tier_weight_gap() {
        assert_eq!(severity(Tier::SelfAuthenticating, Tier::UncorroboratedPerson), Severity::High);
        assert_eq!(severity(Tier::IndependentThirdParty, Tier::FirstPartyFriendly), Severity::Medium);
        assert_eq!(severity(Tier::BusinessRecords, Tier::FirstPartyAdverse), Severity::Low);
    }
}
