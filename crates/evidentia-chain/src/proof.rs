//! Merkle inclusion proofs: prove an artifact sits in a
//! given block's Merkle tree without handing over the rest of the block.

use evidentia_core::EvidentiaError;
use evidentia_crypto::merkle::{merkle_path, verify_path, MerklePath};
use evidentia_crypto::canonical;

use crate::chain::Chain;
use crate::index::ArtifactIndex;

#[derive(Debug, Clone)]
pub struct MerkleProof {
    pub artifact_id: String,
    pub block_index: u64,
    pub path: MerklePath,
    pub claimed_root: [u8; 32],
}

pub fn prove(chain: &Chain, index: &ArtifactIndex, artifact_id: &str) -> Result<MerkleProof, EvidentiaError> {
    let (block_index, position) = index
        .position_of(artifact_id)
        .ok_or_else(|| EvidentiaError::ArtifactNotFound {
            id: artifact_id.to_string(),
        })?;

    let block = chain
        .blocks
        .iter()
        .find(|b| b.index == block_index)
        .ok_or_else(|| EvidentiaError::ArtifactNotFound {
            id: artifact_id.to_string(),
        })?;

    let leaves: Vec<[u8; 32]> = block.artifacts.iter().map(canonical::artifact_hash).collect();
    let path = merkle_path(&leaves, position).ok_or_else(|| EvidentiaError::MalformedProof {
        detail: format!("artifact {artifact_id} position {position} out of range for block {block_index}"),
    })?;

    let claimed_root = hex::decode(&block.merkle_root)
        .ok()
        .and_then(|b| <[u8; 32]>::try_from(b).ok())
        .ok_or_else(|| EvidentiaError::MalformedProof {
            detail: format!("block {block_index} merkle_root is not valid hex"),
        })?;

    Ok(MerkleProof {
        artifact_id: artifact_id.to_string(),
        block_index,
        path,
        claimed_root,
    })
}

/// Verify a proof against an artifact's hash, independent of any `Chain` or
/// `ArtifactIndex` — callers who only hold the proof and the artifact can
/// check it without access to the ledger.
pub fn verify_proof(artifact_hash: [u8; 32], proof: &MerkleProof) -> bool {
    verify_path(artifact_hash, &proof.path, proof.claimed_root)
}
