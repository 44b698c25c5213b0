//! Run orchestration: one batch per configured source, then merge.

use std::collections::BTreeMap;

use rayon::prelude::*;
use tracing::{debug, info};

use silver_map::{SourceAdapter, SourcesConfig, check_adapter_set};
use silver_model::{RawRow, SourceId};

use crate::engine::{BatchOutput, reconcile_batch};
use crate::error::{ReconError, Result};
use crate::merge::{MergedOutput, merge};
use crate::options::ReconcileOptions;

/// Bronze rows keyed by the source that supplied them.
pub type SourceBatches = BTreeMap<SourceId, Vec<RawRow>>;

/// Reconciles a fixed set of sources.
#[derive(Debug, Clone)]
pub struct Reconciler {
    adapters: Vec<SourceAdapter>,
    options: ReconcileOptions,
}

impl Reconciler {
    pub fn new(adapters: Vec<SourceAdapter>, options: ReconcileOptions) -> Result<Self> {
        check_adapter_set(&adapters)?;
        Ok(Self { adapters, options })
    }

    pub fn from_config(config: SourcesConfig, options: ReconcileOptions) -> Result<Self> {
        Self::new(config.adapters, options)
    }

    /// Adapters in processing order.
    pub fn adapters(&self) -> &[SourceAdapter] {
        &self.adapters
    }

    pub fn options(&self) -> &ReconcileOptions {
        &self.options
    }

    /// Reconcile every source and merge the results.
    ///
    /// Each configured source needs exactly one batch (possibly empty).
    /// Output order follows adapter order regardless of parallelism.
    pub fn run(&self, mut batches: SourceBatches) -> Result<MergedOutput> {
        let mut inputs = Vec::with_capacity(self.adapters.len());
        for adapter in &self.adapters {
            let rows = batches
                .remove(&adapter.source)
                .ok_or_else(|| ReconError::MissingBatch(adapter.source.clone()))?;
            inputs.push((adapter, rows));
        }
        if let Some(source) = batches.into_keys().next() {
            return Err(ReconError::UnknownSource(source));
        }

        info!(
            sources = inputs.len(),
            parallel = self.options.parallel,
            "reconciling sources"
        );
        let outputs: Vec<BatchOutput> = if self.options.parallel {
            inputs
                .par_iter()
                .map(|(adapter, rows)| reconcile_batch(adapter, rows, &self.options))
                .collect()
        } else {
            inputs
                .iter()
                .map(|(adapter, rows)| reconcile_batch(adapter, rows, &self.options))
                .collect()
        };
        debug!(batches = outputs.len(), "source batches complete");
        merge(outputs)
    }
}
