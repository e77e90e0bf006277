use thiserror::Error;

/// PIN states that block card access until the user intervenes.
///
/// `PucBlocked` is terminal for the card: no credential can recover it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinState {
    /// PIN1 must be entered before the session can proceed
    PinRequired,
    /// PIN1 is blocked, the unblock code (PUC) is required
    PinBlocked,
    /// The unblock code itself is blocked
    PucBlocked,
}

impl PinState {
    /// Whether user input can still recover the card
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, PinState::PucBlocked)
    }
}

/// Main error type for SIM subscriber operations
#[derive(Error, Debug)]
pub enum SimError {
    #[error("Card already present, remove it first")]
    Busy,

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Card authentication required: {0:?}")]
    CardAuthRequired(PinState),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Relay session failure: {0}")]
    RelaySession(String),

    #[error("Unsupported: {0}")]
    Unsupported(String),

    #[error("Channel closed: {0}")]
    Channel(String),
}

/// Result type alias for SIM subscriber operations
pub type SimResult<T> = Result<T, SimError>;
