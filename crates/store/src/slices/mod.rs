pub mod auth;
pub mod goals;
pub mod transactions;

/// Lifecycle of the slice's most recent async operation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OpPhase {
    #[default]
    Idle,
    Pending,
    Fulfilled,
    Rejected,
}

impl OpPhase {
    #[must_use]
    pub fn is_pending(self) -> bool {
        self == Self::Pending
    }
}
