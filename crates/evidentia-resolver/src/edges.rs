//! Edge extraction: direct, inferred, chronological, and
//! type-specific dependency edges derived from an artifact's fields.

use evidentia_core::{Artifact, ArtifactType};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub to: String,
    pub required: bool,
    pub kind: EdgeKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeKind {
    Direct,
    Inferred,
    Chronological,
    TypeSpecific,
}

const INFERRED_PHRASES: &[&str] = &[
    "refers to",
    "references",
    "based on",
    "pursuant to",
    "in accordance with",
    "as per",
];

/// Scan `statement` for `(refers to|references|based on|pursuant to|in
/// accordance with|as per) (document|artifact|evidence) (ID:|#)?<TOKEN>`
/// and return the trailing token for each match.
fn inferred_references(statement: &str) -> Vec<String> {
    let lower = statement.to_lowercase();
    let mut out = Vec::new();
    for phrase in INFERRED_PHRASES {
        let mut search_from = 0;
        while let Some(pos) = lower[search_from..].find(phrase) {
            let abs = search_from + pos + phrase.len();
            if let Some(token) = extract_trailing_token(statement, abs) {
                out.push(token);
            }
            search_from = abs;
        }
    }
    out
}

/// After the matched phrase, require one of `(document|artifact|evidence)`,
/// then skip an optional `ID:`/`#` marker and take the next
/// whitespace-delimited token as the referenced id. The keyword is not
/// optional: `(refers to|…) (document|artifact|evidence) (ID:|#)?<TOKEN>`
/// with no keyword present is not a match at all.
fn extract_trailing_token(statement: &str, from_byte: usize) -> Option<String> {
    let rest = &statement[from_byte..];
    let mut words = rest.split_whitespace();
    let keyword = words.next()?;

    let lowered = keyword.to_lowercase();
    if lowered != "document" && lowered != "artifact" && lowered != "evidence" {
        return None;
    }
    let next = words.next()?;

    let trimmed = next.trim_start_matches("ID:").trim_start_matches('#');
    let token: String = trimmed
        .trim_end_matches(|c: char| c == '.' || c == ',' || c == ';')
        .to_string();
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}

/// Extract every dependency edge implied by an artifact's fields.
pub fn extract_edges(artifact: &Artifact) -> Vec<Edge> {
    let mut edges = Vec::new();

    for dep in &artifact.metadata.dependencies {
        edges.push(Edge {
            to: dep.clone(),
            required: true,
            kind: EdgeKind::Direct,
        });
    }
    if let Some(parent) = &artifact.metadata.parent_document_id {
        edges.push(Edge {
            to: parent.clone(),
            required: true,
            kind: EdgeKind::Direct,
        });
    }
    for referenced in &artifact.metadata.referenced_artifacts {
        edges.push(Edge {
            to: referenced.clone(),
            required: true,
            kind: EdgeKind::Direct,
        });
    }
    for supporting in &artifact.metadata.supporting_documents {
        edges.push(Edge {
            to: supporting.clone(),
            required: false,
            kind: EdgeKind::Direct,
        });
    }

    for token in inferred_references(&artifact.statement) {
        edges.push(Edge {
            to: token,
            required: false,
            kind: EdgeKind::Inferred,
        });
    }

    for follows in &artifact.metadata.chronology.follows {
        edges.push(Edge {
            to: follows.clone(),
            required: true,
            kind: EdgeKind::Chronological,
        });
    }
    // `precedes` is an inverse constraint enforced by layering elsewhere,
    // not a direct required-edge on this artifact; it carries no entry
    // here because it describes a constraint on a *different* node's
    // depth rather than this one's.

    match artifact.artifact_type {
        ArtifactType::Amendment => {
            if let Some(original) = &artifact.metadata.original_document_id {
                edges.push(Edge {
                    to: original.clone(),
                    required: true,
                    kind: EdgeKind::TypeSpecific,
                });
            }
        }
        ArtifactType::CourtOrder => {
            if let Some(motion) = &artifact.metadata.motion_id {
                edges.push(Edge {
                    to: motion.clone(),
                    required: false,
                    kind: EdgeKind::TypeSpecific,
                });
            }
        }
        ArtifactType::PropertyTransfer => {
            if let Some(deed) = &artifact.metadata.property_deed_id {
                edges.push(Edge {
                    to: deed.clone(),
                    required: true,
                    kind: EdgeKind::TypeSpecific,
                });
            }
        }
        ArtifactType::Response => {
            if let Some(target) = &artifact.metadata.in_response_to {
                edges.push(Edge {
                    to: target.clone(),
                    required: true,
                    kind: EdgeKind::TypeSpecific,
                });
            }
        }
        ArtifactType::Document
        | ArtifactType::Fact
        | ArtifactType::Placeholder
        | ArtifactType::ContradictionRecord => {}
    }

    edges
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_a_pursuant_to_reference() {
        let refs = inferred_references("This amendment is made pursuant to document #ART-99.");
        assert_eq!(refs, vec!["ART-99".to_string()]);
    }

    #[test]
    fn finds_a_references_with_id_prefix() {
        let refs = inferred_references("The affidavit references evidence ID:FACT-7");
        assert_eq!(refs, vec!["FACT-7".to_string()]);
    }

    #[test]
    fn statement_without_a_phrase_yields_nothing() {
        assert!(inferred_references("A plain statement with no citation.").is_empty());
    }

    #[test]
    fn a_trigger_phrase_without_the_required_keyword_yields_nothing() {
        let refs = inferred_references("This testimony is based on prior testimony given in court.");
        assert!(refs.is_empty());
    }
}
