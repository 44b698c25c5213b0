use silver_model::{Outcome, ReasonCode};

/// Value produced by a normalizer together with how it was obtained.
///
/// `reason` is set exactly when `outcome` is not [`Outcome::Ok`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized<T> {
    pub value: T,
    pub outcome: Outcome,
    pub reason: Option<ReasonCode>,
}

impl<T> Normalized<T> {
    pub fn ok(value: T) -> Self {
        Self {
            value,
            outcome: Outcome::Ok,
            reason: None,
        }
    }

    pub fn defaulted(value: T, reason: ReasonCode) -> Self {
        Self {
            value,
            outcome: Outcome::Defaulted,
            reason: Some(reason),
        }
    }

    pub fn invalid(value: T, reason: ReasonCode) -> Self {
        Self {
            value,
            outcome: Outcome::Invalid,
            reason: Some(reason),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.outcome.is_ok()
    }
}
