//! The evidence data model: `Artifact`, `Block`, and their component
//! types, laid out as versioned, banner-commented structs — every
//! optional extension field
//! carries `#[serde(default)]` so a snapshot written by an older build of
//! this crate still imports cleanly.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Monotonic ledger timestamp, milliseconds since the Unix epoch.
pub type Timestamp = i64;

/// 32-byte SHA3-256 digest of externally-held content. The content itself
/// never enters the core.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentHash(pub [u8; 32]);

impl ContentHash {
    pub fn from_hex(s: &str) -> Result<Self, crate::EvidentiaError> {
        let bytes = hex::decode(s).map_err(|_| crate::EvidentiaError::InvalidHashFormat {
            detail: format!("{s} is not valid hex"),
        })?;
        if bytes.len() != 32 {
            return Err(crate::EvidentiaError::InvalidHashFormat {
                detail: format!("expected 32 bytes, got {}", bytes.len()),
            });
        }
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl std::fmt::Debug for ContentHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ContentHash({}…)", &self.to_hex()[..8])
    }
}

impl std::fmt::Display for ContentHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

/// Ordinal class of source reliability. Determines base weight (§4.2) and
/// auto-mint eligibility (§4.6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Tier {
    SelfAuthenticating,
    Government,
    FinancialInstitution,
    IndependentThirdParty,
    BusinessRecords,
    FirstPartyAdverse,
    FirstPartyFriendly,
    UncorroboratedPerson,
}

/// How the artifact's authenticity was attested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthenticationMethod {
    None,
    DigitalSeal,
    Notarized,
    Witness,
    #[serde(rename = "self")]
    SelfAttested,
}

/// The kind of evidentiary record. Drives which dependency edges the
/// resolver (§4.4) treats as required vs. optional.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactType {
    Document,
    Fact,
    Amendment,
    CourtOrder,
    PropertyTransfer,
    Response,
    Placeholder,
    /// Emitted by the contradiction index (§4.5) when a pairwise conflict
    /// between two case artifacts is resolved by tier precedence. Minted
    /// like any other artifact; never submitted by a caller directly.
    ContradictionRecord,
}

/// Bounded set of named credibility factors. Bounded because the weight
/// bonus they contribute is capped (§4.2); the set itself may hold more
/// entries than the cap counts toward weight.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredibilityFactors(pub std::collections::BTreeSet<String>);

impl CredibilityFactors {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// One link in an artifact's chain of custody.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustodyEntry {
    pub timestamp: Timestamp,
    pub holder: String,
    pub action: String,
    pub hash: ContentHash,
    #[serde(default)]
    pub signature: Option<String>,
}

/// Whether the source-provided seal/notary/clerk attestations are present,
/// and custody-chain entries, which feed the weight calculator (§4.2).
///
/// `custody_chain` is declared directly on `Artifact` rather than here;
/// this type only carries the presence bonuses that are not otherwise
/// derivable from a field already on the artifact.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticationMarks {
    #[serde(default)]
    pub seal_number: Option<String>,
    #[serde(default)]
    pub notary_id: Option<String>,
    #[serde(default)]
    pub court_clerk_signature: Option<String>,
}

/// `chronology.{precedes,follows}` from the metadata bag (§3, §4.4).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chronology {
    #[serde(default)]
    pub precedes: Vec<String>,
    #[serde(default)]
    pub follows: Vec<String>,
}

/// Open-ended extension bag for an artifact (§9 "Dynamic metadata bags").
/// Known extensions are named fields; anything else lands in `custom`.
/// The canonical serializer (`evidentia-crypto::canonical`) never hashes
/// any of this directly — only the fixed projection named in §4.1 — so
/// adding an unknown `custom` key can never alter a historical hash.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(default)]
    pub dependencies: Vec<String>,
    #[serde(default)]
    pub parent_document_id: Option<String>,
    #[serde(default)]
    pub original_document_id: Option<String>,
    #[serde(default)]
    pub in_response_to: Option<String>,
    #[serde(default)]
    pub supporting_documents: Vec<String>,
    #[serde(default)]
    pub referenced_artifacts: Vec<String>,
    #[serde(default)]
    pub chronology: Chronology,
    /// `motion` reference for a `court_order` artifact type (optional edge).
    #[serde(default)]
    pub motion_id: Option<String>,
    /// `property_deed` reference for a `property_transfer` artifact type.
    #[serde(default)]
    pub property_deed_id: Option<String>,
    /// Everything not named above.
    #[serde(default)]
    pub custom: BTreeMap<String, String>,
}

/// Grouping key for contradiction search (§4.5), grammar
/// `<JURISDICTION>-<YEAR>-<TYPE>-<CASE#>`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CaseId(pub String);

impl std::fmt::Display for CaseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The unit of evidence (§3).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artifact {
    pub id: String,
    pub content_hash: ContentHash,
    pub statement: String,
    #[serde(rename = "type")]
    pub artifact_type: ArtifactType,
    pub tier: Tier,
    pub authentication_method: AuthenticationMethod,
    #[serde(default)]
    pub credibility_factors: CredibilityFactors,
    #[serde(default)]
    pub authentication_marks: AuthenticationMarks,
    #[serde(default)]
    pub custody_chain: Vec<CustodyEntry>,
    pub case_id: CaseId,
    #[serde(default)]
    pub metadata: Metadata,
    pub weight: f64,
    pub submitted_at: Timestamp,
    pub submitted_by: String,
}

impl Artifact {
    /// `weight` converted to integer millis for canonical hashing (§4.1,
    /// §9 "Floating-point in hashes"): `round(weight * 1000)`.
    pub fn weight_millis(&self) -> u16 {
        (self.weight * 1000.0).round() as u16
    }
}

/// Sealed container for an ordered set of artifacts (§3).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    pub index: u64,
    pub previous_hash: String,
    pub timestamp: Timestamp,
    pub artifacts: Vec<Artifact>,
    pub merkle_root: String,
    pub nonce: u64,
    pub hash: String,
    pub miner: String,
}

impl Block {
    pub fn is_genesis(&self) -> bool {
        self.index == 0
    }
}
