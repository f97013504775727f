//! Block assembly, proof-of-work sealing, whole-chain validation, the
//! in-memory artifact index, and the query/proof service. `Ledger` owns
//! the single `RwLock` and the cancellation plumbing; it exposes
//! mechanical primitives only — the resolver → trust → consent
//! orchestration pipeline lives one layer up,
//! in `evidentia-ingest`.

pub mod assembler;
pub mod cancellation;
pub mod chain;
pub mod index;
pub mod ledger;
pub mod proof;
pub mod snapshot;
pub mod validator;

pub use cancellation::{CancellationSource, CancellationToken};
pub use chain::Chain;
pub use index::{ArtifactIndex, QueryFilter};
pub use ledger::{ChainStats, Ledger};
pub use proof::MerkleProof;
pub use snapshot::ChainSnapshot;
pub use validator::ValidationReport;
