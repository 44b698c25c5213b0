//! Run-level options for reconciliation.

use chrono::NaiveDate;

use silver_map::SourcesConfig;
use silver_normalize::{DEFAULT_MIN_BIRTH_YEAR, DobRules};
use silver_validate::ValidationPolicy;

/// Options shared by every source batch in one run.
///
/// The processing date is explicit so that a run is a pure function of its
/// inputs: the same batch and options always give the same output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconcileOptions {
    /// Birth dates after this date are rejected.
    pub as_of: NaiveDate,
    pub min_birth_year: i32,
    pub policy: ValidationPolicy,
    /// Reconcile sources on the rayon thread pool.
    pub parallel: bool,
}

impl ReconcileOptions {
    pub fn new(as_of: NaiveDate) -> Self {
        Self {
            as_of,
            min_birth_year: DEFAULT_MIN_BIRTH_YEAR,
            policy: ValidationPolicy::default(),
            parallel: true,
        }
    }

    /// Options carrying the policy section of a sources file.
    pub fn from_config(config: &SourcesConfig, as_of: NaiveDate) -> Self {
        Self::new(as_of)
            .with_policy(config.policy)
            .with_min_birth_year(config.min_birth_year)
    }

    #[must_use]
    pub fn with_policy(mut self, policy: ValidationPolicy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub fn with_min_birth_year(mut self, year: i32) -> Self {
        self.min_birth_year = year;
        self
    }

    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn dob_rules(&self) -> DobRules {
        DobRules::new(self.as_of).with_min_year(self.min_birth_year)
    }
}
