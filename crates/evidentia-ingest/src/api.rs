//! `IngestApi`: the single top-level facade wrapping the ledger and
//! exposing one method per operation — wires intake → resolver → trust →
//! consent → chain into `submit`/`mint_pending` plus the read-side
//! operations the ledger already exposes.

use std::collections::HashSet;

use evidentia_chain::{
    CancellationToken, ChainSnapshot, ChainStats, Ledger, MerkleProof, QueryFilter, ValidationReport,
};
use evidentia_consent::{ConsentProvider, GateDecision};
use evidentia_core::constants::DEFAULT_MAX_MINING_ITERATIONS;
use evidentia_core::{Artifact, CaseId, ContentHash, EvidentiaError, Tier};
use evidentia_trust::Severity;
use tracing::info;

use crate::builder::build_artifact;
use crate::contradiction_record::build_contradiction_record;
use crate::intake::ArtifactIntake;
use crate::report::{MintReport, Outcome};

/// Parameters for one `mint_pending` call. `cancellation` defaults to a
/// token that never fires; pass a real one to make mining interruptible.
#[derive(Clone)]
pub struct MintOptions {
    pub miner: String,
    pub timestamp: i64,
    pub difficulty_override: Option<u8>,
    pub max_iterations: u64,
    pub cancellation: CancellationToken,
}

impl MintOptions {
    pub fn new(miner: impl Into<String>, timestamp: i64) -> Self {
        Self {
            miner: miner.into(),
            timestamp,
            difficulty_override: None,
            max_iterations: DEFAULT_MAX_MINING_ITERATIONS,
            cancellation: CancellationToken::never(),
        }
    }
}

pub struct IngestApi {
    ledger: Ledger,
    material_keys: Vec<String>,
}

impl IngestApi {
    pub fn new(ledger: Ledger, material_keys: Vec<String>) -> Self {
        Self { ledger, material_keys }
    }

    /// `material_keys` defaults to `amount, date, owner, parcel_id`.
    pub fn with_defaults(ledger: Ledger) -> Self {
        let keys = evidentia_core::constants::DEFAULT_MATERIAL_KEYS
            .iter()
            .map(|s| s.to_string())
            .collect();
        Self::new(ledger, keys)
    }

    fn material_key_refs(&self) -> Vec<&str> {
        self.material_keys.iter().map(|s| s.as_str()).collect()
    }

    /// Build and stage one artifact. Returns the assigned
    /// artifact id.
    pub async fn submit(&self, intake: ArtifactIntake, now_millis: i64) -> Result<String, EvidentiaError> {
        let artifact = build_artifact(intake, now_millis)?;
        self.ledger.submit(artifact).await
    }

    pub async fn pending_count(&self) -> usize {
        self.ledger.pending_count().await
    }

    /// Resolve the pending queue into dependency-ordered layers, run the
    /// trust analyzer and consent gate over every artifact in order, and
    /// seal one block per layer (plus, if any new contradictions were
    /// found, a trailing block of `ContradictionRecord` artifacts).
    ///
    /// An empty pending queue is a no-op, not an error.
    pub async fn mint_pending(
        &self,
        options: &MintOptions,
        consent: &dyn ConsentProvider,
        now_millis: i64,
    ) -> Result<MintReport, EvidentiaError> {
        let pending = self.ledger.pending_snapshot().await;
        if pending.is_empty() {
            return Ok(MintReport::default());
        }

        let minted_ids = self.ledger.minted_ids().await;
        let resolution = evidentia_resolver::resolve(&pending, &minted_ids);
        if !resolution.valid {
            let has_missing = resolution.unresolvable.iter().any(|u| !u.missing.is_empty());
            if has_missing {
                let first = resolution
                    .unresolvable
                    .iter()
                    .find(|u| !u.missing.is_empty())
                    .expect("has_missing just confirmed one exists");
                return Err(EvidentiaError::MissingRequiredPredecessor {
                    artifact_id: first.artifact_id.clone(),
                    missing: first.missing.clone(),
                });
            }
            let ids: Vec<String> = resolution.unresolvable.iter().map(|u| u.artifact_id.clone()).collect();
            return Err(EvidentiaError::DependencyCycle { ids });
        }

        let by_id: std::collections::HashMap<String, Artifact> =
            pending.into_iter().map(|a| (a.id.clone(), a)).collect();

        let mut actually_minted = minted_ids;
        let mut outcomes = Vec::new();
        let mut blocks_minted = 0usize;
        let mut contradiction_records: Vec<Artifact> = Vec::new();
        let mut seen_pairs: HashSet<(String, String)> = HashSet::new();
        let material_keys = self.material_key_refs();
        // Each block sealed in this call needs a strictly greater timestamp
        // than the one before it (§4.1); a multi-layer batch or a trailing
        // contradiction block would otherwise carry the same `options.timestamp`
        // and fail `validate_chain`'s monotonicity check.
        let mut next_timestamp = options.timestamp;

        for layer in &resolution.layers {
            let mut to_mint_ids: Vec<String> = Vec::new();

            for artifact_id in layer {
                let artifact = &by_id[artifact_id];

                let required_deps: Vec<String> = evidentia_resolver::extract_edges(artifact)
                    .into_iter()
                    .filter(|e| e.required)
                    .map(|e| e.to)
                    .collect();
                let blocked_on = required_deps
                    .iter()
                    .find(|dep| by_id.contains_key(*dep) && !actually_minted.contains(*dep));
                if let Some(dep) = blocked_on {
                    outcomes.push(Outcome::Rejected {
                        artifact_id: artifact_id.clone(),
                        reason: format!("required dependency {dep} was not minted this round"),
                    });
                    continue;
                }

                let peers = self.ledger.case_peers(&artifact.case_id, &artifact.id).await;
                let peer_refs: Vec<&Artifact> = peers.iter().collect();
                let trust_report = evidentia_trust::analyze(artifact, &peer_refs, None, None, &material_keys, now_millis);

                for contradiction in &trust_report.contradictions {
                    let key = sorted_pair(&contradiction.a_id, &contradiction.b_id);
                    if seen_pairs.insert(key) {
                        contradiction_records.push(build_contradiction_record(contradiction, &artifact.case_id, now_millis));
                    }
                }

                let high_contradiction_count = trust_report
                    .contradictions
                    .iter()
                    .filter(|c| c.severity == Severity::High)
                    .count();
                let gate = evidentia_consent::decide(artifact.tier, trust_report.score, high_contradiction_count, true);

                match gate {
                    GateDecision::AutoMint => {
                        to_mint_ids.push(artifact.id.clone());
                    }
                    GateDecision::RequireConsent => {
                        let summary = format!(
                            "{} ({:?}, weight {:.2}, trust {:.2})",
                            artifact.id, artifact.tier, artifact.weight, trust_report.score
                        );
                        let (consent_outcome, rationale) = consent.ask(&summary, &trust_report);
                        if consent_outcome.is_granted() {
                            to_mint_ids.push(artifact.id.clone());
                        } else {
                            outcomes.push(Outcome::ConsentDeclined {
                                artifact_id: artifact.id.clone(),
                                rationale: rationale.unwrap_or_else(|| "declined".to_string()),
                            });
                        }
                    }
                    GateDecision::RequireCorroboration => {
                        outcomes.push(Outcome::NeedsCorroboration {
                            artifact_id: artifact.id.clone(),
                            score: trust_report.score,
                        });
                    }
                    GateDecision::Reject => {
                        outcomes.push(Outcome::Rejected {
                            artifact_id: artifact.id.clone(),
                            reason: format!("trust score {:.2} below corroboration floor", trust_report.score),
                        });
                    }
                }
            }

            if !to_mint_ids.is_empty() {
                let block = self
                    .ledger
                    .mint_block(
                        &to_mint_ids,
                        &options.miner,
                        next_timestamp,
                        options.difficulty_override,
                        options.max_iterations,
                        &options.cancellation,
                    )
                    .await?;
                next_timestamp = block.timestamp + 1;
                blocks_minted += 1;
                for id in &to_mint_ids {
                    actually_minted.insert(id.clone());
                    outcomes.push(Outcome::Minted {
                        artifact_id: id.clone(),
                        block_index: block.index,
                    });
                }
            }
        }

        let contradiction_records_minted = contradiction_records.len();
        if !contradiction_records.is_empty() {
            let mut ids = Vec::with_capacity(contradiction_records.len());
            for record in contradiction_records {
                ids.push(record.id.clone());
                self.ledger.submit(record).await?;
            }
            let block = self
                .ledger
                .mint_block(
                    &ids,
                    &options.miner,
                    next_timestamp,
                    options.difficulty_override,
                    options.max_iterations,
                    &options.cancellation,
                )
                .await?;
            blocks_minted += 1;
            info!(count = ids.len(), block_index = block.index, "contradiction records minted");
        }

        Ok(MintReport {
            outcomes,
            blocks_minted,
            contradiction_records_minted,
        })
    }

    pub async fn validate_chain(&self, cancellation: &CancellationToken) -> ValidationReport {
        self.ledger.validate(cancellation).await
    }

    pub async fn query(&self, filter: &QueryFilter) -> Vec<Artifact> {
        self.ledger.query(filter).await
    }

    pub async fn get_by_id(&self, id: &str) -> Option<Artifact> {
        self.ledger.get_by_id(id).await
    }

    pub async fn get_by_content_hash(&self, hash: &ContentHash) -> Option<Artifact> {
        self.ledger.get_by_content_hash(hash).await
    }

    pub async fn prove(&self, artifact_id: &str) -> Result<MerkleProof, EvidentiaError> {
        self.ledger.prove(artifact_id).await
    }

    pub async fn export_chain(&self) -> ChainSnapshot {
        self.ledger.export_snapshot().await
    }

    pub async fn import_chain(&self, snapshot: ChainSnapshot) -> Result<(), EvidentiaError> {
        self.ledger.import_snapshot(snapshot).await
    }

    /// Every artifact currently on-chain or pending that shares `case_id`,
    /// for callers assembling a case file outside the trust analyzer.
    pub async fn case_peers(&self, case_id: &CaseId, exclude_id: &str) -> Vec<Artifact> {
        self.ledger.case_peers(case_id, exclude_id).await
    }

    pub fn tier_auto_mint_eligible(tier: Tier) -> bool {
        evidentia_core::constants::tier_auto_mint_eligible(tier)
    }

    pub async fn chain_stats(&self) -> ChainStats {
        self.ledger.chain_stats().await
    }
}

fn sorted_pair(a: &str, b: &str) -> (String, String) {
    if a <= b {
        (a.to_string(), b.to_string())
    } else {
        (b.to_string(), a.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use evidentia_consent::AlwaysGrant;
    use evidentia_core::{ArtifactType, AuthenticationMarks, AuthenticationMethod, CredibilityFactors, Metadata};

    fn intake(case: &str, tier: Tier, statement: &str) -> ArtifactIntake {
        ArtifactIntake {
            content_hash: ContentHash([1u8; 32]),
            statement: statement.to_string(),
            artifact_type: ArtifactType::Document,
            tier,
            authentication_method: AuthenticationMethod::DigitalSeal,
            credibility_factors: CredibilityFactors::default(),
            authentication_marks: AuthenticationMarks::default(),
            custody_chain: vec![],
            case_id: CaseId(case.into()),
            metadata: Metadata::default(),
            submitted_by: "clerk-1".into(),
        }
    }

    #[tokio::test]
    async fn a_government_sealed_artifact_auto_mints() {
        let ledger = Ledger::new(1, 1_700_000_000_000);
        let api = IngestApi::with_defaults(ledger);

        api.submit(intake("CA-2026-CIV-0001", Tier::Government, "Deed recorded"), 1_700_000_000_100)
            .await
            .unwrap();

        let options = MintOptions::new("miner-1", 1_700_000_000_200);
        let report = api.mint_pending(&options, &AlwaysGrant, 1_700_000_000_200).await.unwrap();

        assert_eq!(report.minted_count(), 1);
        assert_eq!(report.blocks_minted, 1);
        assert_eq!(report.contradiction_records_minted, 0);
    }

    #[tokio::test]
    async fn empty_queue_mints_nothing() {
        let ledger = Ledger::new(1, 1_700_000_000_000);
        let api = IngestApi::with_defaults(ledger);
        let options = MintOptions::new("miner-1", 1_700_000_000_200);
        let report = api.mint_pending(&options, &AlwaysGrant, 1_700_000_000_200).await.unwrap();
        assert_eq!(report, MintReport::default());
    }

    #[tokio::test]
    async fn contradicting_artifacts_mint_a_trailing_contradiction_record() {
        let ledger = Ledger::new(1, 1_700_000_000_000);
        let api = IngestApi::with_defaults(ledger);

        let mut friendly = intake("CA-2026-CIV-0002", Tier::FirstPartyFriendly, "Claimant owns parcel 7");
        friendly.authentication_method = AuthenticationMethod::None;
        api.submit(friendly, 1_700_000_000_100).await.unwrap();

        let selfauth = intake(
            "CA-2026-CIV-0002",
            Tier::SelfAuthenticating,
            "Deed shows claimant does not own parcel 7",
        );
        api.submit(selfauth, 1_700_000_000_101).await.unwrap();

        let options = MintOptions::new("miner-1", 1_700_000_000_200);
        let report = api.mint_pending(&options, &AlwaysGrant, 1_700_000_000_200).await.unwrap();

        assert_eq!(report.contradiction_records_minted, 1);
        assert!(report.blocks_minted >= 1);

        let validation = api.validate_chain(&CancellationToken::never()).await;
        assert!(validation.valid, "errors: {:?}", validation.errors);
    }
}
