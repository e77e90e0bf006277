//! Card job responses

use crate::job::{Generation, HandleKind};
use bytes::Bytes;
use simsub_core::PinState;
use std::fmt;

/// Error cause byte reported by the card endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCause {
    /// PIN1 must be presented first
    Pin1Required,
    /// PIN1 is blocked, the unblock code is needed
    Pin1Blocked,
    /// The unblock code is blocked as well; the card is unusable
    PucBlocked,
    /// Any other card or reader error
    Other(u8),
}

impl ErrorCause {
    pub const PIN1_REQUIRED: u8 = 0x01;
    pub const PIN1_BLOCKED: u8 = 0x02;
    pub const PUC_BLOCKED: u8 = 0x03;

    pub fn from_u8(cause: u8) -> Self {
        match cause {
            Self::PIN1_REQUIRED => ErrorCause::Pin1Required,
            Self::PIN1_BLOCKED => ErrorCause::Pin1Blocked,
            Self::PUC_BLOCKED => ErrorCause::PucBlocked,
            other => ErrorCause::Other(other),
        }
    }

    pub fn to_u8(self) -> u8 {
        match self {
            ErrorCause::Pin1Required => Self::PIN1_REQUIRED,
            ErrorCause::Pin1Blocked => Self::PIN1_BLOCKED,
            ErrorCause::PucBlocked => Self::PUC_BLOCKED,
            ErrorCause::Other(other) => other,
        }
    }

    /// Whether the cause is one of the PIN states
    pub fn is_pin_related(self) -> bool {
        self.pin_state().is_some()
    }

    /// The PIN state blocking the session, if this cause is PIN related
    pub fn pin_state(self) -> Option<PinState> {
        match self {
            ErrorCause::Pin1Required => Some(PinState::PinRequired),
            ErrorCause::Pin1Blocked => Some(PinState::PinBlocked),
            ErrorCause::PucBlocked => Some(PinState::PucBlocked),
            ErrorCause::Other(_) => None,
        }
    }
}

impl fmt::Display for ErrorCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCause::Pin1Required => write!(f, "PIN1 required"),
            ErrorCause::Pin1Blocked => write!(f, "PIN1 blocked"),
            ErrorCause::PucBlocked => write!(f, "PUC blocked"),
            ErrorCause::Other(c) => write!(f, "cause {}", c),
        }
    }
}

/// Error outcome of a job: cause byte plus remaining retries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JobError {
    pub cause: ErrorCause,
    pub retries_left: u8,
}

/// What came back for a job
pub type JobOutcome = Result<Bytes, JobError>;

/// One response from the card I/O endpoint
#[derive(Debug, Clone)]
pub struct SimJobResponse {
    pub handle: HandleKind,
    pub generation: Generation,
    pub outcome: JobOutcome,
}

impl SimJobResponse {
    pub fn ok(handle: HandleKind, generation: Generation, data: impl Into<Bytes>) -> Self {
        Self {
            handle,
            generation,
            outcome: Ok(data.into()),
        }
    }

    pub fn error(
        handle: HandleKind,
        generation: Generation,
        cause: ErrorCause,
        retries_left: u8,
    ) -> Self {
        Self {
            handle,
            generation,
            outcome: Err(JobError {
                cause,
                retries_left,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cause_round_trip() {
        for byte in [0x01, 0x02, 0x03, 0x20, 0xff] {
            assert_eq!(ErrorCause::from_u8(byte).to_u8(), byte);
        }
    }

    #[test]
    fn test_pin_related() {
        assert!(ErrorCause::Pin1Required.is_pin_related());
        assert!(ErrorCause::PucBlocked.is_pin_related());
        assert!(!ErrorCause::Other(0x42).is_pin_related());
    }

    #[test]
    fn test_pin_state_mapping() {
        assert_eq!(
            ErrorCause::Pin1Blocked.pin_state(),
            Some(PinState::PinBlocked)
        );
        assert_eq!(ErrorCause::Other(0x20).pin_state(), None);
    }
}
