//! Fixed numeric tables shared across the workspace. Every crate that
//! needs a tier weight, an adjustment delta, or a default threshold pulls
//! it from here rather than re-declaring the magic number locally.

use crate::types::Tier;

// ── Weight calculator (§4.2) ───────────────────────────────────────────────

/// Base weight by source tier, before any adjustment is applied.
pub fn tier_base_weight(tier: Tier) -> f64 {
    match tier {
        Tier::SelfAuthenticating => 1.00,
        Tier::Government => 0.95,
        Tier::FinancialInstitution => 0.90,
        Tier::IndependentThirdParty => 0.85,
        Tier::BusinessRecords => 0.80,
        Tier::FirstPartyAdverse => 0.75,
        Tier::FirstPartyFriendly => 0.60,
        Tier::UncorroboratedPerson => 0.40,
    }
}

/// Only these two tiers are eligible for automatic minting (§4.6). The
/// source documents disagreed on `FINANCIAL_INSTITUTION`; this workspace
/// resolves that by leaving it `false` (see DESIGN.md, Open Question 3).
pub fn tier_auto_mint_eligible(tier: Tier) -> bool {
    matches!(tier, Tier::SelfAuthenticating | Tier::Government)
}

/// `+0.05` per credibility factor.
pub const CREDIBILITY_FACTOR_BONUS: f64 = 0.05;
/// Credibility factor bonus caps at `+0.20` (four factors).
pub const CREDIBILITY_FACTOR_CAP: f64 = 0.20;
/// `+0.05` per custody chain entry.
pub const CUSTODY_ENTRY_BONUS: f64 = 0.05;
/// `+0.10` if a seal number is present.
pub const SEAL_BONUS: f64 = 0.10;
/// `+0.10` for a notary id.
pub const NOTARY_BONUS: f64 = 0.10;
/// `+0.20` for a court-clerk signature.
pub const CLERK_SIGNATURE_BONUS: f64 = 0.20;

/// `+0.03` per extraction factor on fact-level weight derivation.
pub const FACT_FACTOR_BONUS: f64 = 0.03;

// ── Trust analyzer (§4.3) ──────────────────────────────────────────────────

pub const HASH_MISMATCH_MULTIPLIER: f64 = 0.5;
pub const CUSTODY_INVALID_MULTIPLIER: f64 = 0.8;
pub const CONTRADICTION_MULTIPLIER: f64 = 0.7;
pub const AUTH_DIGITAL_SEAL_MULTIPLIER: f64 = 1.10;
pub const AUTH_NOTARIZED_MULTIPLIER: f64 = 1.05;
pub const AUTH_WITNESS_MULTIPLIER: f64 = 1.00;
pub const AUTH_NONE_MULTIPLIER: f64 = 1.00;
pub const AGE_PENALTY_MULTIPLIER: f64 = 0.95;
pub const AGE_PENALTY_THRESHOLD_DAYS: i64 = 365;

pub const TRUST_AUTO_MINT_THRESHOLD: f64 = 0.95;
pub const TRUST_MANUAL_CONSENT_THRESHOLD: f64 = 0.80;
pub const TRUST_CORROBORATION_THRESHOLD: f64 = 0.60;

// ── Contradiction index (§4.5) ─────────────────────────────────────────────

pub const CONTRADICTION_SEVERITY_HIGH: f64 = 0.30;
pub const CONTRADICTION_SEVERITY_MEDIUM: f64 = 0.15;

/// Metadata keys treated as "material" by default for contradiction
/// detection — two artifacts in the same case that disagree on one of
/// these keys contradict even without an antonym match.
pub const DEFAULT_MATERIAL_KEYS: &[&str] = &["amount", "date", "owner", "parcel_id"];

// ── Resolver (§4.4) ─────────────────────────────────────────────────────────

/// Minimum normalized Levenshtein similarity for a typo suggestion.
pub const TYPO_SUGGESTION_THRESHOLD: f64 = 0.80;

// ── Artifact intake (§3, §7) ────────────────────────────────────────────────

/// A credibility-factor set beyond this size is rejected at intake as
/// `IntakeError::TooManyCredibilityFactors` — well past the four factors
/// that saturate the weight bonus (`CREDIBILITY_FACTOR_CAP` above), this
/// is a sanity bound against an unbounded submission, not a scoring rule.
pub const MAX_CREDIBILITY_FACTORS: usize = 32;

// ── Block + chain engine (§4.1, §5) ────────────────────────────────────────

/// `previous_hash` of the genesis block: 64 hex zero characters.
pub fn genesis_previous_hash() -> String {
    "0".repeat(64)
}
pub const DEFAULT_DIFFICULTY: u8 = 4;
/// Mining fails with `MiningExceededBudget` past this many nonce attempts.
pub const DEFAULT_MAX_MINING_ITERATIONS: u64 = 10_000_000;
