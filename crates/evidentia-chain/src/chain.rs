//! The block list and its difficulty target.

use evidentia_core::constants::genesis_previous_hash;
use evidentia_core::Block;
use evidentia_crypto::pow::block_hash_hex;
use serde::{Deserialize, Serialize};

/// The ordered sequence of sealed blocks, plus the difficulty target new
/// blocks are mined against. Genesis is exempt from the proof-of-work
/// check so it is sealed at nonce 0
/// regardless of whether its hash happens to meet `difficulty`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chain {
    pub blocks: Vec<Block>,
    pub difficulty: u8,
}

impl Chain {
    pub fn genesis(difficulty: u8, timestamp: i64) -> Self {
        let previous_hash = genesis_previous_hash();
        let merkle_root = hex::encode([0u8; 32]);
        let miner = "genesis";
        let nonce = 0;
        let hash = block_hash_hex(0, &previous_hash, timestamp, &merkle_root, nonce, miner);
        let genesis = Block {
            index: 0,
            previous_hash,
            timestamp,
            artifacts: Vec::new(),
            merkle_root,
            nonce,
            hash,
            miner: miner.to_string(),
        };
        Self {
            blocks: vec![genesis],
            difficulty,
        }
    }

    pub fn tip(&self) -> &Block {
        self.blocks.last().expect("chain always has a genesis block")
    }

    pub fn next_index(&self) -> u64 {
        self.tip().index + 1
    }

    pub fn total_artifacts(&self) -> usize {
        self.blocks.iter().map(|b| b.artifacts.len()).sum()
    }
}
