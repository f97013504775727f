//! Pure weight calculator. Referentially transparent: same
//! inputs, bit-identical output, no I/O, no clock reads, no randomness —
//! clamped, additive adjustment arithmetic throughout.

use evidentia_core::constants::{
    tier_base_weight, CLERK_SIGNATURE_BONUS, CREDIBILITY_FACTOR_BONUS, CREDIBILITY_FACTOR_CAP,
    CUSTODY_ENTRY_BONUS, FACT_FACTOR_BONUS, NOTARY_BONUS, SEAL_BONUS,
};
use evidentia_core::{AuthenticationMarks, CredibilityFactors, Tier};

/// Compute an artifact's weight from its tier, credibility factors,
/// custody chain depth, and presence of seal/notary/clerk attestations.
pub fn artifact_weight(
    tier: Tier,
    credibility_factors: &CredibilityFactors,
    custody_chain_len: usize,
    marks: &AuthenticationMarks,
) -> f64 {
    let mut w = tier_base_weight(tier);

    let credibility_bonus =
        (credibility_factors.len() as f64 * CREDIBILITY_FACTOR_BONUS).min(CREDIBILITY_FACTOR_CAP);
    w += credibility_bonus;

    w += custody_chain_len as f64 * CUSTODY_ENTRY_BONUS;

    if marks.seal_number.is_some() {
        w += SEAL_BONUS;
    }
    if marks.notary_id.is_some() {
        w += NOTARY_BONUS;
    }
    if marks.court_clerk_signature.is_some() {
        w += CLERK_SIGNATURE_BONUS;
    }

    w.clamp(0.0, 1.0)
}

/// Derive a fact's weight from its parent evidence weight, an extraction
/// confidence in `[0,1]`, a per-factor bonus, and an optional
/// corroboration bonus.
pub fn fact_weight(
    parent_weight: f64,
    extraction_confidence: f64,
    factor_count: usize,
    corroboration_bonus: f64,
) -> f64 {
    let base = parent_weight * extraction_confidence.clamp(0.0, 1.0);
    let bonus = factor_count as f64 * FACT_FACTOR_BONUS;
    (base + bonus + corroboration_bonus.max(0.0)).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn factors(n: usize) -> CredibilityFactors {
        CredibilityFactors((0..n).map(|i| format!("factor-{i}")).collect::<BTreeSet<_>>())
    }

    #[test]
    fn government_with_digital_seal_and_no_other_bonuses() {
        let marks = AuthenticationMarks {
            seal_number: Some("SEAL-1".into()),
            ..Default::default()
        };
        let w = artifact_weight(Tier::Government, &CredibilityFactors::default(), 0, &marks);
        assert!((w - 1.0).abs() < 1e-9, "0.95 + 0.10 clamps to 1.0, got {w}");
    }

    #[test]
    fn credibility_bonus_caps_at_four_factors() {
        let w_four = artifact_weight(
            Tier::UncorroboratedPerson,
            &factors(4),
            0,
            &AuthenticationMarks::default(),
        );
        let w_eight = artifact_weight(
            Tier::UncorroboratedPerson,
            &factors(8),
            0,
            &AuthenticationMarks::default(),
        );
        assert!((w_four - w_eight).abs() < 1e-9, "bonus caps at +0.20 past 4 factors");
        assert!((w_four - 0.60).abs() < 1e-9);
    }

    #[test]
    fn custody_depth_contributes_linearly_until_clamp() {
        let w0 = artifact_weight(
            Tier::FirstPartyFriendly,
            &CredibilityFactors::default(),
            0,
            &AuthenticationMarks::default(),
        );
        let w3 = artifact_weight(
            Tier::FirstPartyFriendly,
            &CredibilityFactors::default(),
            3,
            &AuthenticationMarks::default(),
        );
        assert!((w3 - (w0 + 0.15)).abs() < 1e-9);
    }

    #[test]
    fn is_referentially_transparent() {
        let marks = AuthenticationMarks {
            notary_id: Some("N-1".into()),
            ..Default::default()
        };
        let a = artifact_weight(Tier::BusinessRecords, &factors(2), 5, &marks);
        let b = artifact_weight(Tier::BusinessRecords, &factors(2), 5, &marks);
        assert_eq!(a.to_bits(), b.to_bits());
    }

    #[test]
    fn fact_weight_combines_parent_weight_and_confidence() {
        let w = fact_weight(0.8, 0.5, 2, 0.0);
        assert!((w - (0.4 + 0.06)).abs() < 1e-9);
    }

    #[test]
    fn fact_weight_clamps_to_one() {
        let w = fact_weight(1.0, 1.0, 10, 0.5);
        assert!((w - 1.0).abs() < 1e-9);
    }

    /// No `proptest`/`quickcheck` dependency here, so this is a
    /// seeded-`rand` loop instead: 1,000 random inputs, each computed
    /// twice, must agree bit-for-bit.
    #[test]
    fn a_thousand_random_inputs_are_bit_identical_across_two_evaluations() {
        use rand::rngs::StdRng;
        use rand::{Rng, SeedableRng};

        let tiers = [
            Tier::Government,
            Tier::SelfAuthenticating,
            Tier::BusinessRecords,
            Tier::FirstPartyFriendly,
            Tier::UncorroboratedPerson,
        ];
        let mut rng = StdRng::seed_from_u64(0xE11D_E47A);
        for _ in 0..1000 {
            let tier = tiers[rng.gen_range(0..tiers.len())];
            let factors = factors(rng.gen_range(0..10));
            let custody_len = rng.gen_range(0..20);
            let marks = AuthenticationMarks {
                seal_number: rng.gen_bool(0.5).then(|| "SEAL".to_string()),
                notary_id: rng.gen_bool(0.5).then(|| "NOTARY".to_string()),
                court_clerk_signature: rng.gen_bool(0.5).then(|| "CLERK".to_string()),
            };

            let a = artifact_weight(tier, &factors, custody_len, &marks);
            let b = artifact_weight(tier, &factors, custody_len, &marks);
            assert_eq!(a.to_bits(), b.to_bits());
        }
    }
}
