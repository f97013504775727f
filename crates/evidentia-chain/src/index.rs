//! In-memory artifact index and the query filter it serves.
//! Each lookup table here is an ordinary in-memory map rebuilt from the
//! chain rather than persisted — durable storage is out of this
//! workspace's scope.

use std::collections::HashMap;

use evidentia_core::{ArtifactType, CaseId, ContentHash, Tier};

use crate::chain::Chain;

/// Maps an artifact id to where it lives in the chain, and a content hash
/// to the id that first claimed it.
#[derive(Debug, Clone, Default)]
pub struct ArtifactIndex {
    by_id: HashMap<String, (u64, usize)>,
    by_content_hash: HashMap<ContentHash, String>,
}

impl ArtifactIndex {
    pub fn build(chain: &Chain) -> Self {
        let mut by_id = HashMap::new();
        let mut by_content_hash = HashMap::new();
        for block in &chain.blocks {
            for (position, artifact) in block.artifacts.iter().enumerate() {
                by_id.insert(artifact.id.clone(), (block.index, position));
                by_content_hash
                    .entry(artifact.content_hash)
                    .or_insert_with(|| artifact.id.clone());
            }
        }
        Self { by_id, by_content_hash }
    }

    /// Record one newly-minted block without rescanning the whole chain.
    pub fn index_block(&mut self, block: &evidentia_core::Block) {
        for (position, artifact) in block.artifacts.iter().enumerate() {
            self.by_id.insert(artifact.id.clone(), (block.index, position));
            self.by_content_hash
                .entry(artifact.content_hash)
                .or_insert_with(|| artifact.id.clone());
        }
    }

    pub fn position_of(&self, id: &str) -> Option<(u64, usize)> {
        self.by_id.get(id).copied()
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    pub fn contains_content_hash(&self, hash: &ContentHash) -> bool {
        self.by_content_hash.contains_key(hash)
    }

    pub fn id_for_content_hash(&self, hash: &ContentHash) -> Option<&str> {
        self.by_content_hash.get(hash).map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

/// Filter criteria for `query`. Every field is optional;
/// `None` means "don't filter on this dimension."
#[derive(Debug, Clone, Default)]
pub struct QueryFilter {
    pub case_id: Option<CaseId>,
    pub tier: Option<Tier>,
    pub artifact_type: Option<ArtifactType>,
    pub submitter: Option<String>,
    pub weight_range: Option<(f64, f64)>,
    pub time_range: Option<(i64, i64)>,
}

pub fn query(chain: &Chain, filter: &QueryFilter) -> Vec<evidentia_core::Artifact> {
    chain
        .blocks
        .iter()
        .flat_map(|b| b.artifacts.iter())
        .filter(|a| filter.case_id.as_ref().is_none_or(|c| c == &a.case_id))
        .filter(|a| filter.tier.is_none_or(|t| t == a.tier))
        .filter(|a| filter.artifact_type.is_none_or(|t| t == a.artifact_type))
        .filter(|a| {
            filter
                .submitter
                .as_ref()
                .is_none_or(|s| s == &a.submitted_by)
        })
        .filter(|a| {
            filter
                .weight_range
                .is_none_or(|(lo, hi)| a.weight >= lo && a.weight <= hi)
        })
        .filter(|a| {
            filter
                .time_range
                .is_none_or(|(lo, hi)| a.submitted_at >= lo && a.submitted_at <= hi)
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use evidentia_core::{Artifact, AuthenticationMethod, Metadata};

    fn artifact(id: &str, case: &str, tier: Tier) -> Artifact {
        Artifact {
            id: id.into(),
            content_hash: ContentHash([5u8; 32]),
            statement: "stmt".into(),
            artifact_type: ArtifactType::Document,
            tier,
            authentication_method: AuthenticationMethod::None,
            credibility_factors: Default::default(),
            authentication_marks: Default::default(),
            custody_chain: vec![],
            case_id: CaseId(case.into()),
            metadata: Metadata::default(),
            weight: 0.8,
            submitted_at: 1_700_000_000_000,
            submitted_by: "clerk-1".into(),
        }
    }

    #[test]
    fn index_finds_a_minted_artifact_by_id() {
        let mut chain = Chain::genesis(1, 1_700_000_000_000);
        let block = crate::assembler::assemble_and_seal(
            1,
            &chain.tip().hash.clone(),
            1_700_000_000_001,
            vec![artifact("ART-1", "CA-2026-CIV-0001", Tier::Government)],
            "miner-1",
            1,
            1_000_000,
            &evidentia_crypto::pow::NeverCancel,
        )
        .unwrap();
        chain.blocks.push(block);

        let index = ArtifactIndex::build(&chain);
        assert_eq!(index.position_of("ART-1"), Some((1, 0)));
        assert!(index.contains_id("ART-1"));
        assert!(!index.contains_id("ART-2"));
    }

    #[test]
    fn query_filters_by_case_and_tier() {
        let mut chain = Chain::genesis(1, 1_700_000_000_000);
        let block = crate::assembler::assemble_and_seal(
            1,
            &chain.tip().hash.clone(),
            1_700_000_000_001,
            vec![
                artifact("ART-1", "CA-2026-CIV-0001", Tier::Government),
                artifact("ART-2", "CA-2026-CIV-0002", Tier::BusinessRecords),
            ],
            "miner-1",
            1,
            1_000_000,
            &evidentia_crypto::pow::NeverCancel,
        )
        .unwrap();
        chain.blocks.push(block);

        let filter = QueryFilter {
            case_id: Some(CaseId("CA-2026-CIV-0001".into())),
            ..Default::default()
        };
        let results = query(&chain, &filter);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "ART-1");
    }
}
