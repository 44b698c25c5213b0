//! Bronze-to-silver patient reconciliation.
//!
//! [`reconcile_batch`] turns one source's raw rows into silver records and
//! findings. [`merge`] concatenates batches while keeping provenance.
//! [`Reconciler`] runs both for a configured set of sources.

pub mod engine;
pub mod error;
pub mod merge;
pub mod options;
pub mod reconciler;

pub use engine::{BatchOutput, BatchStats, reconcile_batch};
pub use error::{ReconError, Result};
pub use merge::{MergedOutput, SourceSummary, merge};
pub use options::ReconcileOptions;
pub use reconciler::{Reconciler, SourceBatches};
