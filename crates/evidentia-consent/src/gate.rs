//! Consent gate: a pure state machine over
//! `(tier_policy, trust_score, contradiction_count)`.

use evidentia_core::constants::{
    TRUST_AUTO_MINT_THRESHOLD, TRUST_CORROBORATION_THRESHOLD, TRUST_MANUAL_CONSENT_THRESHOLD,
};
use evidentia_core::Tier;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    AutoMint,
    RequireConsent,
    RequireCorroboration,
    Reject,
}

impl GateDecision {
    pub fn describe(&self) -> &'static str {
        match self {
            GateDecision::AutoMint => "auto-mint: tier policy and trust score clear the bar without a human in the loop",
            GateDecision::RequireConsent => "require human consent before minting",
            GateDecision::RequireCorroboration => "score too low to mint as-is; additional corroboration is required",
            GateDecision::Reject => "trust score below the corroboration floor; reject",
        }
    }
}

/// `{tier.auto_mint, score, high_contradiction_count, resolver_clean}` →
/// `GateDecision`. `resolver_clean` is
/// `true` when the dependency resolver reported `valid: true` for this
/// artifact's batch.
pub fn decide(
    tier: Tier,
    trust_score: f64,
    high_contradiction_count: usize,
    resolver_clean: bool,
) -> GateDecision {
    let tier_auto_mint_eligible = evidentia_core::constants::tier_auto_mint_eligible(tier);

    if tier_auto_mint_eligible && trust_score >= TRUST_AUTO_MINT_THRESHOLD && high_contradiction_count == 0 {
        GateDecision::AutoMint
    } else if trust_score >= TRUST_MANUAL_CONSENT_THRESHOLD && resolver_clean {
        GateDecision::RequireConsent
    } else if (TRUST_CORROBORATION_THRESHOLD..TRUST_MANUAL_CONSENT_THRESHOLD).contains(&trust_score) {
        GateDecision::RequireCorroboration
    } else {
        GateDecision::Reject
    }
}
