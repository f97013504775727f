//! The `ConsentProvider` capability: the core asks a
//! human-in-the-loop abstraction for a decision and records the outcome
//! as a decision record keyed by artifact id.

use evidentia_trust::TrustReport;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsentOutcome {
    Granted,
    Declined,
    ReviewThenGranted,
    ReviewThenDeclined,
}

impl ConsentOutcome {
    pub fn is_granted(&self) -> bool {
        matches!(self, ConsentOutcome::Granted | ConsentOutcome::ReviewThenGranted)
    }
}

/// Capability the core consumes to obtain human consent. The core supplies
/// summary text and the trust report; the provider returns a decision and
/// an optional rationale.
pub trait ConsentProvider {
    fn ask(&self, artifact_summary: &str, trust_report: &TrustReport) -> (ConsentOutcome, Option<String>);
}

/// A provider that always grants — useful for auto-mint-eligible batches
/// or tests that do not exercise the human-in-the-loop path.
pub struct AlwaysGrant;
impl ConsentProvider for AlwaysGrant {
    fn ask(&self, _artifact_summary: &str, _trust_report: &TrustReport) -> (ConsentOutcome, Option<String>) {
        (ConsentOutcome::Granted, None)
    }
}

/// A provider that always declines — useful for tests exercising the
/// `ConsentDeclined` error path.
pub struct AlwaysDecline;
impl ConsentProvider for AlwaysDecline {
    fn ask(&self, _artifact_summary: &str, _trust_report: &TrustReport) -> (ConsentOutcome, Option<String>) {
        (ConsentOutcome::Declined, Some("declined by policy".into()))
    }
}

/// One consent decision, keyed by artifact id, for the append-only consent
/// log: every decision is recorded in a `ConsentRecord`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsentRecord {
    pub artifact_id: String,
    pub gate_decision: crate::gate::GateDecision,
    pub outcome: Option<ConsentOutcome>,
    pub rationale: Option<String>,
    pub recorded_at: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use evidentia_trust::Recommendation;

    fn report(score: f64) -> TrustReport {
        TrustReport {
            score,
            warnings: vec![],
            contradictions: vec![],
            recommendation: Recommendation::ManualConsent,
        }
    }

    #[test]
    fn always_grant_is_granted() {
        let (outcome, _) = AlwaysGrant.ask("summary", &report(0.9));
        assert!(outcome.is_granted());
    }

    #[test]
    fn always_decline_carries_a_rationale() {
        let (outcome, rationale) = AlwaysDecline.ask("summary", &report(0.9));
        assert!(!outcome.is_granted());
        assert!(rationale.is_some());
    }
}
