//! The wire- and disk-stable JSON interchange format. A `ChainSnapshot`
//! is rejected wholesale on import if
//! any chain invariant fails — this workspace never applies a partial
//! snapshot.

use evidentia_core::{Block, EvidentiaError};
use serde::{Deserialize, Serialize};

use crate::chain::Chain;
use crate::validator::validate_chain;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainSnapshot {
    pub genesis_hash: String,
    pub difficulty: u8,
    pub blocks: Vec<Block>,
}

pub fn export(chain: &Chain) -> ChainSnapshot {
    ChainSnapshot {
        genesis_hash: chain.blocks[0].hash.clone(),
        difficulty: chain.difficulty,
        blocks: chain.blocks.clone(),
    }
}

/// Rebuild a `Chain` from a snapshot, verifying every chain invariant
/// before handing it back. Never returns a partially-applied chain: either
/// the whole snapshot validates or the import is rejected.
pub fn import(snapshot: ChainSnapshot) -> Result<Chain, EvidentiaError> {
    if snapshot.blocks.is_empty() {
        return Err(EvidentiaError::ImportFailed {
            detail: "snapshot has no blocks, not even a genesis block".into(),
        });
    }
    if snapshot.blocks[0].hash != snapshot.genesis_hash {
        return Err(EvidentiaError::ImportFailed {
            detail: "genesis_hash does not match blocks[0].hash".into(),
        });
    }

    let candidate = Chain {
        blocks: snapshot.blocks,
        difficulty: snapshot.difficulty,
    };

    let report = validate_chain(&candidate, || true);
    if !report.valid {
        return Err(EvidentiaError::ImportFailed {
            detail: format!("{} validation error(s) in imported snapshot", report.errors.len()),
        });
    }

    Ok(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a_genesis_only_chain_round_trips_through_json() {
        let chain = Chain::genesis(1, 1_700_000_000_000);
        let snapshot = export(&chain);
        let json = serde_json::to_string(&snapshot).unwrap();
        let parsed: ChainSnapshot = serde_json::from_str(&json).unwrap();
        let restored = import(parsed).unwrap();
        assert_eq!(restored.blocks.len(), 1);
        assert_eq!(restored.difficulty, 1);
    }

    #[test]
    fn an_empty_snapshot_is_rejected() {
        let snapshot = ChainSnapshot {
            genesis_hash: "0".repeat(64),
            difficulty: 1,
            blocks: vec![],
        };
        assert!(import(snapshot).is_err());
    }

    #[test]
    fn a_snapshot_with_a_broken_link_is_rejected_wholesale() {
        let mut chain = Chain::genesis(1, 1_700_000_000_000);
        let mut block = crate::assembler::assemble_and_seal(
            1,
            &chain.tip().hash.clone(),
            1_700_000_000_001,
            vec![],
            "miner-1",
            1,
            1_000_000,
            &evidentia_crypto::pow::NeverCancel,
        )
        .unwrap();
        block.previous_hash = "f".repeat(64);
        chain.blocks.push(block);

        let snapshot = export(&chain);
        assert!(import(snapshot).is_err());
    }
}
