//! Whole-chain validation: exhaustive, never short-circuits
//! on the first error, so a caller gets every broken link, not just the
//! first one.

use std::collections::{HashMap, HashSet};

use evidentia_core::{ArtifactType, EvidentiaError};
use evidentia_crypto::pow::{block_hash_hex, meets_difficulty};
use evidentia_crypto::{canonical, merkle};

use crate::chain::Chain;

#[derive(Debug, Clone)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<EvidentiaError>,
    pub warnings: Vec<String>,
    pub chain_length: usize,
    pub total_artifacts: usize,
}

/// Validate `chain` block by block, link by link, plus the cross-chain
/// uniqueness rules. `should_continue` is polled once per block; returning
/// `false` stops the scan early and the report carries a `Cancelled` error
/// alongside whatever was already found.
pub fn validate_chain(chain: &Chain, mut should_continue: impl FnMut() -> bool) -> ValidationReport {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    let mut blocks_checked = 0usize;
    let mut cancelled = false;

    for (position, block) in chain.blocks.iter().enumerate() {
        if !should_continue() {
            cancelled = true;
            break;
        }
        blocks_checked += 1;

        let expected_index = position as u64;
        if block.index != expected_index {
            errors.push(EvidentiaError::IndexMismatch {
                position: expected_index,
                expected: expected_index,
                actual: block.index,
            });
        }

        if block.is_genesis() {
            continue;
        }

        let previous = &chain.blocks[position - 1];

        if block.previous_hash != previous.hash {
            errors.push(EvidentiaError::BrokenLink {
                index: block.index,
                expected: previous.hash.clone(),
                actual: block.previous_hash.clone(),
            });
        }

        if block.timestamp <= previous.timestamp {
            errors.push(EvidentiaError::NonMonotonicTimestamp {
                index: block.index,
                timestamp: block.timestamp,
                previous: previous.timestamp,
            });
        }

        let leaves: Vec<[u8; 32]> = block.artifacts.iter().map(canonical::artifact_hash).collect();
        let expected_root = hex::encode(merkle::merkle_root(&leaves));
        if block.merkle_root != expected_root {
            errors.push(EvidentiaError::MerkleRootMismatch {
                index: block.index,
                expected: expected_root,
                actual: block.merkle_root.clone(),
            });
        }

        let recomputed_hash = block_hash_hex(
            block.index,
            &block.previous_hash,
            block.timestamp,
            &block.merkle_root,
            block.nonce,
            &block.miner,
        );
        if recomputed_hash != block.hash || !meets_difficulty(&recomputed_hash, chain.difficulty) {
            errors.push(EvidentiaError::ProofOfWorkInvalid {
                index: block.index,
                hash: block.hash.clone(),
                difficulty: chain.difficulty,
            });
        }
    }

    if cancelled {
        errors.push(EvidentiaError::Cancelled);
    }

    check_cross_chain_uniqueness(chain, &mut errors, &mut warnings);

    let total_artifacts = chain.total_artifacts();
    ValidationReport {
        valid: errors.is_empty(),
        errors,
        warnings,
        chain_length: blocks_checked,
        total_artifacts,
    }
}

fn check_cross_chain_uniqueness(
    chain: &Chain,
    errors: &mut Vec<EvidentiaError>,
    warnings: &mut Vec<String>,
) {
    let mut seen_ids: HashMap<&str, u64> = HashMap::new();
    let mut seen_hashes: HashMap<String, &str> = HashMap::new();
    let mut reported_duplicate_ids = HashSet::new();
    let mut reported_duplicate_hashes = HashSet::new();

    for block in &chain.blocks {
        for artifact in &block.artifacts {
            if let Some(_first_block) = seen_ids.get(artifact.id.as_str()) {
                if reported_duplicate_ids.insert(artifact.id.clone()) {
                    errors.push(EvidentiaError::DuplicateArtifactAcrossChain {
                        id: artifact.id.clone(),
                    });
                }
            } else {
                seen_ids.insert(&artifact.id, block.index);
            }

            let hash_hex = artifact.content_hash.to_hex();
            if let Some(_first_id) = seen_hashes.get(&hash_hex) {
                let is_satisfied_amendment = matches!(
                    artifact.artifact_type,
                    ArtifactType::Amendment | ArtifactType::Placeholder
                ) && artifact.metadata.original_document_id.is_some();

                if is_satisfied_amendment {
                    warnings.push(format!(
                        "content hash {hash_hex} repeats for {} as a declared amendment/placeholder",
                        artifact.id
                    ));
                } else if reported_duplicate_hashes.insert(hash_hex.clone()) {
                    errors.push(EvidentiaError::DuplicateContentHashAcrossChain { hash: hash_hex });
                }
            } else {
                seen_hashes.insert(hash_hex, &artifact.id);
            }
        }
    }
}
