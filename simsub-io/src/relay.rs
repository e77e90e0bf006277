//! Remote smart-card relay collaborator
//!
//! A relay gives access to a card in another device. The subsystem only
//! opens and closes the session; APDU traffic and session notifications
//! come back as `RelayResponse` values.

use async_trait::async_trait;
use bytes::Bytes;
use simsub_core::SimResult;

/// Result code of a relay response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayResult {
    /// Request processed correctly
    Ok,
    /// Any relay-level error code
    Error(u8),
}

impl RelayResult {
    pub fn is_ok(self) -> bool {
        matches!(self, RelayResult::Ok)
    }
}

/// What kind of relay response arrived
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayResponseKind {
    /// Raw APDU response bytes, forwarded to the query handle
    ApduTransfer,
    /// Answer-to-reset: the remote card session is ready
    SessionReady,
    /// Anything this subsystem does not support
    Other(u8),
}

/// One response callback from the relay
#[derive(Debug, Clone)]
pub struct RelayResponse {
    pub result: RelayResult,
    pub kind: RelayResponseKind,
    pub params: Bytes,
}

/// Session control towards the remote relay
#[async_trait]
pub trait RelayLink: Send {
    /// Open a session with the remote card
    async fn open(&mut self) -> SimResult<()>;

    /// Tear the session down
    async fn close(&mut self) -> SimResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relay_result() {
        assert!(RelayResult::Ok.is_ok());
        assert!(!RelayResult::Error(4).is_ok());
    }
}
