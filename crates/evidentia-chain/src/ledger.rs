//! The single-writer chain state: one `RwLock` guarding the
//! chain, the pending queue, and the artifact index together, so a reader
//! never observes the chain and the index disagreeing mid-mint. The
//! writer path is validate-then-stage-then-commit, implemented here as
//! stage-into-pending then mint-into-chain.

use std::collections::{HashSet, VecDeque};
use std::sync::Arc;

use evidentia_core::{Artifact, ArtifactType, Block, CaseId, ContentHash, EvidentiaError};
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::cancellation::CancellationToken;
use crate::chain::Chain;
use crate::index::{query, ArtifactIndex, QueryFilter};
use crate::proof::{prove, MerkleProof};
use crate::snapshot::{self, ChainSnapshot};
use crate::validator::{validate_chain, ValidationReport};

struct ChainState {
    chain: Chain,
    pending: VecDeque<Artifact>,
    index: ArtifactIndex,
}

/// The ledger: genesis block, pending queue, and derived index behind one
/// lock. Cheap to clone — every clone shares the same underlying state.
#[derive(Clone)]
pub struct Ledger {
    state: Arc<RwLock<ChainState>>,
}

impl Ledger {
    pub fn new(difficulty: u8, genesis_timestamp: i64) -> Self {
        let chain = Chain::genesis(difficulty, genesis_timestamp);
        let index = ArtifactIndex::build(&chain);
        Self {
            state: Arc::new(RwLock::new(ChainState {
                chain,
                pending: VecDeque::new(),
                index,
            })),
        }
    }

    /// Stage an artifact for a future mint. Rejects an id already pending
    /// or already minted.
    pub async fn submit(&self, artifact: Artifact) -> Result<String, EvidentiaError> {
        let mut state = self.state.write().await;
        if state.index.contains_id(&artifact.id) || state.pending.iter().any(|a| a.id == artifact.id) {
            warn!(artifact_id = %artifact.id, "rejected duplicate artifact id");
            return Err(EvidentiaError::DuplicateArtifactId { id: artifact.id });
        }
        let id = artifact.id.clone();
        info!(artifact_id = %id, tier = ?artifact.tier, "artifact staged for minting");
        state.pending.push_back(artifact);
        Ok(id)
    }

    pub async fn pending_snapshot(&self) -> Vec<Artifact> {
        self.state.read().await.pending.iter().cloned().collect()
    }

    pub async fn minted_ids(&self) -> HashSet<String> {
        let state = self.state.read().await;
        state
            .chain
            .blocks
            .iter()
            .flat_map(|b| b.artifacts.iter())
            .map(|a| a.id.clone())
            .collect()
    }

    /// Every other artifact (pending or minted) sharing `case_id`, for the
    /// trust analyzer's contradiction search — `exclude_id` omits the
    /// artifact under analysis from its own peer set.
    pub async fn case_peers(&self, case_id: &CaseId, exclude_id: &str) -> Vec<Artifact> {
        let state = self.state.read().await;
        state
            .chain
            .blocks
            .iter()
            .flat_map(|b| b.artifacts.iter())
            .chain(state.pending.iter())
            .filter(|a| &a.case_id == case_id && a.id != exclude_id)
            .cloned()
            .collect()
    }

    pub async fn get_by_id(&self, id: &str) -> Option<Artifact> {
        let state = self.state.read().await;
        let (block_index, position) = state.index.position_of(id)?;
        state
            .chain
            .blocks
            .iter()
            .find(|b| b.index == block_index)
            .and_then(|b| b.artifacts.get(position))
            .cloned()
    }

    pub async fn get_by_content_hash(&self, hash: &ContentHash) -> Option<Artifact> {
        let state = self.state.read().await;
        let id = state.index.id_for_content_hash(hash)?.to_string();
        drop(state);
        self.get_by_id(&id).await
    }

    pub async fn query(&self, filter: &QueryFilter) -> Vec<Artifact> {
        let state = self.state.read().await;
        query(&state.chain, filter)
    }

    pub async fn prove(&self, artifact_id: &str) -> Result<MerkleProof, EvidentiaError> {
        let state = self.state.read().await;
        prove(&state.chain, &state.index, artifact_id)
    }

    /// Seal exactly `artifact_ids`, in the given order, into one new block
    /// on top of the current tip. The ids must currently be pending; if
    /// mining fails (budget exceeded or cancelled) the artifacts are
    /// returned to the pending queue untouched.
    pub async fn mint_block(
        &self,
        artifact_ids: &[String],
        miner: &str,
        timestamp: i64,
        difficulty_override: Option<u8>,
        max_iterations: u64,
        cancellation: &CancellationToken,
    ) -> Result<Block, EvidentiaError> {
        let mut state = self.state.write().await;

        let mut to_mint = Vec::with_capacity(artifact_ids.len());
        for id in artifact_ids {
            let position = state.pending.iter().position(|a| &a.id == id).ok_or_else(|| {
                EvidentiaError::UnresolvableBatch {
                    reason: format!("artifact {id} is not pending"),
                }
            })?;
            to_mint.push((position, id.clone()));
        }
        // remove back-to-front so earlier indices stay valid
        to_mint.sort_by(|a, b| b.0.cmp(&a.0));
        let mut removed: Vec<Artifact> = Vec::with_capacity(artifact_ids.len());
        for (position, _id) in &to_mint {
            removed.push(state.pending.remove(*position).expect("position just located"));
        }
        // restore the caller's requested order
        removed.reverse();

        let index = state.chain.next_index();
        let previous_hash = state.chain.tip().hash.clone();
        let difficulty = difficulty_override.unwrap_or(state.chain.difficulty);

        let sealed = crate::assembler::assemble_and_seal(
            index,
            &previous_hash,
            timestamp,
            removed.clone(),
            miner,
            difficulty,
            max_iterations,
            cancellation,
        );

        match sealed {
            Ok(block) => {
                info!(block_index = block.index, artifacts = block.artifacts.len(), "block minted");
                state.index.index_block(&block);
                state.chain.blocks.push(block.clone());
                Ok(block)
            }
            Err(err) => {
                warn!(error = %err, "mint failed, restoring artifacts to pending");
                for artifact in removed.into_iter().rev() {
                    state.pending.push_front(artifact);
                }
                Err(err)
            }
        }
    }

    pub async fn validate(&self, cancellation: &CancellationToken) -> ValidationReport {
        let state = self.state.read().await;
        validate_chain(&state.chain, || !cancellation.is_cancelled())
    }

    pub async fn export_snapshot(&self) -> ChainSnapshot {
        let state = self.state.read().await;
        snapshot::export(&state.chain)
    }

    /// Replace the whole ledger state with an imported snapshot. Pending
    /// artifacts are discarded — a snapshot only carries minted history.
    pub async fn import_snapshot(&self, snapshot: ChainSnapshot) -> Result<(), EvidentiaError> {
        let chain = snapshot::import(snapshot)?;
        let index = ArtifactIndex::build(&chain);
        let mut state = self.state.write().await;
        state.chain = chain;
        state.index = index;
        state.pending.clear();
        Ok(())
    }

    pub async fn block_count(&self) -> usize {
        self.state.read().await.chain.blocks.len()
    }

    pub async fn total_artifacts(&self) -> usize {
        self.state.read().await.chain.total_artifacts()
    }

    pub async fn pending_count(&self) -> usize {
        self.state.read().await.pending.len()
    }

    /// Dashboard summary of chain and pending-queue counters, minus
    /// anything that would require an RPC layer this crate doesn't have.
    pub async fn chain_stats(&self) -> ChainStats {
        let state = self.state.read().await;
        let total_artifacts = state.chain.total_artifacts();
        let contradiction_records = state
            .chain
            .blocks
            .iter()
            .flat_map(|b| b.artifacts.iter())
            .filter(|a| a.artifact_type == ArtifactType::ContradictionRecord)
            .count();
        // blocks.len() - 1 excludes genesis, which never carries artifacts.
        let minted_blocks = state.chain.blocks.len().saturating_sub(1);
        let mean_contradictions_per_block = if minted_blocks == 0 {
            0.0
        } else {
            contradiction_records as f64 / minted_blocks as f64
        };
        ChainStats {
            block_count: state.chain.blocks.len(),
            total_artifacts,
            pending_count: state.pending.len(),
            contradiction_records,
            mean_contradictions_per_block,
        }
    }
}

/// Snapshot of ledger-wide counters, for embedding callers that want a
/// dashboard view without walking the chain themselves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChainStats {
    pub block_count: usize,
    pub total_artifacts: usize,
    pub pending_count: usize,
    pub contradiction_records: usize,
    pub mean_contradictions_per_block: f64,
}

/// A no-cancellation mint, for callers that do not need the cancellation
/// path (tests, one-shot tools).
pub fn never_cancel_token() -> CancellationToken {
    CancellationToken::never()
}

#[cfg(test)]
mod tests {
    use super::*;
    use evidentia_core::{ArtifactType, AuthenticationMethod, Metadata, Tier};

    fn artifact(id: &str) -> Artifact {
        Artifact {
            id: id.into(),
            content_hash: ContentHash([6u8; 32]),
            statement: "stmt".into(),
            artifact_type: ArtifactType::Document,
            tier: Tier::Government,
            authentication_method: AuthenticationMethod::None,
            credibility_factors: Default::default(),
            authentication_marks: Default::default(),
            custody_chain: vec![],
            case_id: CaseId("CA-2026-CIV-0001".into()),
            metadata: Metadata::default(),
            weight: 0.95,
            submitted_at: 1_700_000_000_000,
            submitted_by: "clerk-1".into(),
        }
    }

    #[tokio::test]
    async fn submit_then_mint_lands_the_artifact_in_the_chain() {
        let ledger = Ledger::new(1, 1_700_000_000_000);
        ledger.submit(artifact("ART-1")).await.unwrap();
        assert_eq!(ledger.pending_count().await, 1);

        let block = ledger
            .mint_block(
                &["ART-1".to_string()],
                "miner-1",
                1_700_000_000_001,
                None,
                1_000_000,
                &never_cancel_token(),
            )
            .await
            .unwrap();
        assert_eq!(block.index, 1);
        assert_eq!(ledger.pending_count().await, 0);
        assert!(ledger.get_by_id("ART-1").await.is_some());
    }

    #[tokio::test]
    async fn duplicate_submission_is_rejected() {
        let ledger = Ledger::new(1, 1_700_000_000_000);
        ledger.submit(artifact("ART-1")).await.unwrap();
        let err = ledger.submit(artifact("ART-1")).await.unwrap_err();
        assert!(matches!(err, EvidentiaError::DuplicateArtifactId { .. }));
    }

    #[tokio::test]
    async fn a_failed_mint_restores_pending_artifacts() {
        let ledger = Ledger::new(64, 1_700_000_000_000);
        ledger.submit(artifact("ART-1")).await.unwrap();
        let err = ledger
            .mint_block(
                &["ART-1".to_string()],
                "miner-1",
                1_700_000_000_001,
                Some(64),
                10,
                &never_cancel_token(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, EvidentiaError::MiningExceededBudget { .. }));
        assert_eq!(ledger.pending_count().await, 1);
    }

    #[tokio::test]
    async fn export_then_import_round_trips_the_chain() {
        let ledger = Ledger::new(1, 1_700_000_000_000);
        ledger.submit(artifact("ART-1")).await.unwrap();
        ledger
            .mint_block(
                &["ART-1".to_string()],
                "miner-1",
                1_700_000_000_001,
                None,
                1_000_000,
                &never_cancel_token(),
            )
            .await
            .unwrap();

        let snapshot = ledger.export_snapshot().await;
        let restored = Ledger::new(1, 1_700_000_000_000);
        restored.import_snapshot(snapshot).await.unwrap();
        assert_eq!(restored.block_count().await, 2);
        assert!(restored.get_by_id("ART-1").await.is_some());
    }

    #[tokio::test]
    async fn chain_stats_reflects_minted_and_pending_state() {
        let ledger = Ledger::new(1, 1_700_000_000_000);
        ledger.submit(artifact("ART-1")).await.unwrap();
        ledger.submit(artifact("ART-2")).await.unwrap();
        ledger
            .mint_block(
                &["ART-1".to_string()],
                "miner-1",
                1_700_000_000_001,
                None,
                1_000_000,
                &never_cancel_token(),
            )
            .await
            .unwrap();

        let stats = ledger.chain_stats().await;
        assert_eq!(stats.block_count, 2);
        assert_eq!(stats.total_artifacts, 1);
        assert_eq!(stats.pending_count, 1);
        assert_eq!(stats.contradiction_records, 0);
        assert_eq!(stats.mean_contradictions_per_block, 0.0);
    }
}
