//! Dependency resolver: builds a DAG over a batch of
//! pending artifacts plus the chain's already-minted set, layers it by
//! depth for a safe minting order, detects cycles, and flags artifacts
//! whose required antecedents are absent, using a closure-based lookup
//! over the combined chain-plus-pending id set.

mod edges;
mod levenshtein;

use std::collections::{HashMap, HashSet};

use evidentia_core::Artifact;

pub use edges::{extract_edges, Edge, EdgeKind};
pub use levenshtein::normalized_similarity;

/// Result of resolving a batch of pending artifacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionReport {
    pub valid: bool,
    pub layers: Vec<Vec<String>>,
    pub unresolvable: Vec<UnresolvableArtifact>,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvableArtifact {
    pub artifact_id: String,
    pub missing: Vec<String>,
}

/// Resolve `pending` against the ids already present on-chain
/// (`minted_ids`). `known_ids` is used for typo suggestions and should
/// include both pending and minted ids.
pub fn resolve(pending: &[Artifact], minted_ids: &HashSet<String>) -> ResolutionReport {
    let pending_ids: HashSet<String> = pending.iter().map(|a| a.id.clone()).collect();
    let known_ids: Vec<String> = pending_ids
        .iter()
        .cloned()
        .chain(minted_ids.iter().cloned())
        .collect();

    let mut warnings = Vec::new();
    let mut edges_by_artifact: HashMap<String, Vec<Edge>> = HashMap::new();
    for artifact in pending {
        let edges = extract_edges(artifact);
        edges_by_artifact.insert(artifact.id.clone(), edges);
    }

    // `chronology.precedes` is the inverse of `follows`: if A declares it
    // precedes X, that is a required edge from X back to A (X sits after A
    // in the minting order), same as if X had declared `follows: [A]`. Only
    // turned into an edge when X is itself in this batch — a precedes
    // target outside the batch has nothing to layer against here.
    for artifact in pending {
        for successor in &artifact.metadata.chronology.precedes {
            if let Some(edges) = edges_by_artifact.get_mut(successor) {
                edges.push(Edge {
                    to: artifact.id.clone(),
                    required: true,
                    kind: EdgeKind::Chronological,
                });
            }
        }
    }

    // Missing-predecessor pass: required edges pointing at ids absent from
    // both pending and minted sets fail the artifact (and everything that
    // transitively requires it, below); optional ones just warn.
    let mut missing_required: HashMap<String, Vec<String>> = HashMap::new();
    for artifact in pending {
        let edges = &edges_by_artifact[&artifact.id];
        let mut missing = Vec::new();
        for edge in edges {
            let present = pending_ids.contains(&edge.to) || minted_ids.contains(&edge.to);
            if !present {
                if edge.required {
                    missing.push(edge.to.clone());
                } else {
                    let mut msg = format!(
                        "artifact {} has an optional missing reference to {}",
                        artifact.id, edge.to
                    );
                    if let Some(suggestion) = suggest(&edge.to, &known_ids) {
                        msg.push_str(&format!(" (did you mean {suggestion}?)"));
                    }
                    warnings.push(msg);
                }
            }
        }
        if !missing.is_empty() {
            missing_required.insert(artifact.id.clone(), missing);
        }
    }

    // Propagate failure to transitive descendants of a missing-predecessor
    // artifact: anything that requires a failed artifact also fails.
    let mut failed: HashSet<String> = missing_required.keys().cloned().collect();
    loop {
        let mut added = false;
        for artifact in pending {
            if failed.contains(&artifact.id) {
                continue;
            }
            let depends_on_failed = edges_by_artifact[&artifact.id]
                .iter()
                .any(|e| e.required && failed.contains(&e.to));
            if depends_on_failed {
                failed.insert(artifact.id.clone());
                added = true;
            }
        }
        if !added {
            break;
        }
    }

    let unresolvable: Vec<UnresolvableArtifact> = failed
        .iter()
        .map(|id| UnresolvableArtifact {
            artifact_id: id.clone(),
            missing: missing_required.get(id).cloned().unwrap_or_default(),
        })
        .collect();

    // Cycle detection over the subgraph of artifacts not already failed.
    let live: Vec<&Artifact> = pending.iter().filter(|a| !failed.contains(&a.id)).collect();
    let cycle_nodes = detect_cycles(&live, &edges_by_artifact);
    if !cycle_nodes.is_empty() {
        return ResolutionReport {
            valid: false,
            layers: Vec::new(),
            unresolvable: cycle_nodes
                .into_iter()
                .map(|id| UnresolvableArtifact {
                    artifact_id: id,
                    missing: Vec::new(),
                })
                .collect(),
            warnings,
        };
    }

    if !unresolvable.is_empty() {
        return ResolutionReport {
            valid: false,
            layers: Vec::new(),
            unresolvable,
            warnings,
        };
    }

    let layers = layer_by_depth(&live, &edges_by_artifact, minted_ids);
    ResolutionReport {
        valid: true,
        layers,
        unresolvable: Vec::new(),
        warnings,
    }
}

/// Coloring DFS cycle detection. Returns every node id on any detected
/// cycle (possibly across multiple disjoint cycles), for operator clarity.
fn detect_cycles(
    live: &[&Artifact],
    edges_by_artifact: &HashMap<String, Vec<Edge>>,
) -> Vec<String> {
    #[derive(Clone, Copy, PartialEq)]
    enum Color {
        White,
        Gray,
        Black,
    }

    let live_ids: HashSet<String> = live.iter().map(|a| a.id.clone()).collect();
    let mut color: HashMap<String, Color> = live_ids.iter().map(|id| (id.clone(), Color::White)).collect();
    let mut on_stack: Vec<String> = Vec::new();
    let mut cycle_nodes: HashSet<String> = HashSet::new();

    fn visit(
        node: &str,
        edges_by_artifact: &HashMap<String, Vec<Edge>>,
        live_ids: &HashSet<String>,
        color: &mut HashMap<String, Color>,
        on_stack: &mut Vec<String>,
        cycle_nodes: &mut HashSet<String>,
    ) {
        color.insert(node.to_string(), Color::Gray);
        on_stack.push(node.to_string());
        if let Some(edges) = edges_by_artifact.get(node) {
            for edge in edges.iter().filter(|e| e.required && live_ids.contains(&e.to)) {
                match color.get(&edge.to).copied().unwrap_or(Color::White) {
                    Color::White => visit(&edge.to, edges_by_artifact, live_ids, color, on_stack, cycle_nodes),
                    Color::Gray => {
                        if let Some(pos) = on_stack.iter().position(|n| n == &edge.to) {
                            for n in &on_stack[pos..] {
                                cycle_nodes.insert(n.clone());
                            }
                        }
                    }
                    Color::Black => {}
                }
            }
        }
        on_stack.pop();
        color.insert(node.to_string(), Color::Black);
    }

    for artifact in live {
        if color.get(&artifact.id).copied() == Some(Color::White) {
            visit(
                &artifact.id,
                edges_by_artifact,
                &live_ids,
                &mut color,
                &mut on_stack,
                &mut cycle_nodes,
            );
        }
    }

    let mut result: Vec<String> = cycle_nodes.into_iter().collect();
    result.sort();
    result
}

/// Depth = longest required-path length from any root. Layer-by-depth
/// groups form the minting batches; within a layer, artifacts are sorted
/// ascending lexicographically by id so the merkle root stays deterministic
/// regardless of submission order.
fn layer_by_depth(
    live: &[&Artifact],
    edges_by_artifact: &HashMap<String, Vec<Edge>>,
    minted_ids: &HashSet<String>,
) -> Vec<Vec<String>> {
    let mut depth: HashMap<String, usize> = HashMap::new();

    fn compute_depth(
        id: &str,
        edges_by_artifact: &HashMap<String, Vec<Edge>>,
        minted_ids: &HashSet<String>,
        live_ids: &HashSet<String>,
        depth: &mut HashMap<String, usize>,
    ) -> usize {
        if let Some(d) = depth.get(id) {
            return *d;
        }
        let edges = edges_by_artifact.get(id);
        let max_parent_depth = edges
            .map(|es| {
                es.iter()
                    .filter(|e| e.required && live_ids.contains(&e.to))
                    .map(|e| {
                        if minted_ids.contains(&e.to) {
                            0
                        } else {
                            1 + compute_depth(&e.to, edges_by_artifact, minted_ids, live_ids, depth)
                        }
                    })
                    .max()
            })
            .flatten();
        let d = max_parent_depth.map(|m| m).unwrap_or(0);
        depth.insert(id.to_string(), d);
        d
    }

    let live_ids: HashSet<String> = live.iter().map(|a| a.id.clone()).collect();
    for artifact in live {
        compute_depth(&artifact.id, edges_by_artifact, minted_ids, &live_ids, &mut depth);
    }

    let max_depth = depth.values().copied().max().unwrap_or(0);
    let mut layers: Vec<Vec<String>> = vec![Vec::new(); max_depth + 1];
    for artifact in live {
        layers[depth[&artifact.id]].push(artifact.id.clone());
    }
    for layer in &mut layers {
        layer.sort();
    }
    layers.retain(|l| !l.is_empty());
    layers
}

/// For a missing id, scan `known_ids` and return the best candidate with
/// normalized Levenshtein similarity ≥ 0.80, advisory only.
pub fn suggest(missing_id: &str, known_ids: &[String]) -> Option<String> {
    known_ids
        .iter()
        .map(|candidate| (candidate, normalized_similarity(missing_id, candidate)))
        .filter(|(_, sim)| *sim >= evidentia_core::constants::TYPO_SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap())
        .map(|(candidate, _)| candidate.clone())
}
