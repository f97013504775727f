//! Build and seal one block from a set of approved artifacts:
//! Merkle root over the artifacts' canonical hashes, then
//! proof-of-work mining via `evidentia-crypto::pow`.

use evidentia_core::{Artifact, Block, EvidentiaError};
use evidentia_crypto::pow::{mine, MiningCancellation};
use evidentia_crypto::{canonical, merkle};

/// Seal `artifacts` into a new block on top of `previous_hash` at `index`.
/// Mining runs synchronously on the calling thread; callers on an async
/// runtime should run this inside `tokio::task::spawn_blocking` for
/// anything past a low test difficulty.
pub fn assemble_and_seal(
    index: u64,
    previous_hash: &str,
    timestamp: i64,
    artifacts: Vec<Artifact>,
    miner: &str,
    difficulty: u8,
    max_iterations: u64,
    cancellation: &dyn MiningCancellation,
) -> Result<Block, EvidentiaError> {
    let leaves: Vec<[u8; 32]> = artifacts.iter().map(canonical::artifact_hash).collect();
    let merkle_root_hex = hex::encode(merkle::merkle_root(&leaves));

    let (nonce, hash) = mine(
        index,
        previous_hash,
        timestamp,
        &merkle_root_hex,
        miner,
        difficulty,
        max_iterations,
        cancellation,
    )?;

    Ok(Block {
        index,
        previous_hash: previous_hash.to_string(),
        timestamp,
        artifacts,
        merkle_root: merkle_root_hex,
        nonce,
        hash,
        miner: miner.to_string(),
    })
}
