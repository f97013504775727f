//! Domain types shared by every crate in the workspace: the artifact and
//! block data model, the deterministic id schemes, and the flat error
//! taxonomy every other crate's `Result` resolves to.

pub mod constants;
pub mod error;
pub mod ids;
pub mod types;

pub use error::EvidentiaError;
pub use types::{
    Artifact, ArtifactType, AuthenticationMarks, AuthenticationMethod, Block, CaseId, Chronology,
    ContentHash, CredibilityFactors, CustodyEntry, Metadata, Tier, Timestamp,
};

pub type Result<T> = std::result::Result<T, EvidentiaError>;
