//! The ingest facade: turns raw `ArtifactIntake` submissions
//! into weighted artifacts, stages them on a `Ledger`, and orchestrates the
//! resolver → trust → consent pipeline that decides what actually gets
//! minted. Everything below this crate (`evidentia-chain` and down) is
//! mechanical; this is where the policy lives.

pub mod api;
pub mod builder;
pub mod contradiction_record;
pub mod intake;
pub mod report;

pub use api::{IngestApi, MintOptions};
pub use builder::build_artifact;
pub use contradiction_record::build_contradiction_record;
pub use intake::ArtifactIntake;
pub use report::{MintReport, Outcome};
