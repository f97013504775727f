//! The raw submission shape: everything a caller supplies
//! about an artifact before this crate computes its deterministic id and
//! weight and hands it to the ledger.

use evidentia_core::{
    ArtifactType, AuthenticationMarks, AuthenticationMethod, CaseId, ContentHash,
    CredibilityFactors, CustodyEntry, Metadata, Tier,
};

#[derive(Debug, Clone)]
pub struct ArtifactIntake {
    pub content_hash: ContentHash,
    pub statement: String,
    pub artifact_type: ArtifactType,
    pub tier: Tier,
    pub authentication_method: AuthenticationMethod,
    pub credibility_factors: CredibilityFactors,
    pub authentication_marks: AuthenticationMarks,
    pub custody_chain: Vec<CustodyEntry>,
    pub case_id: CaseId,
    pub metadata: Metadata,
    pub submitted_by: String,
}
