//! Remote-relay backend
//!
//! The relay gives access to a card in another device. After the session
//! opens, the attach waits for the session-ready notification before it
//! starts walking the file table; APDU responses are fed into the regular
//! query handle path.

use crate::events::SubscriberEvent;
use crate::manager::SubscriberManager;
use simsub_core::{CardKind, SimError, SimResult};
use simsub_io::{HandleKind, RelayResponse, RelayResponseKind, SimJobResponse};

impl SubscriberManager {
    pub(crate) async fn insert_remote(&mut self) -> SimResult<()> {
        self.record.card_kind = CardKind::RemoteRelay;
        self.record.name = "remote".to_string();

        self.notifier.clear();
        self.notifier.notify("Connecting to the remote card relay...");

        let Some(link) = self.relay.as_mut() else {
            log::error!("no relay link configured");
            self.notifier.notify("Relay connection error!");
            self.events.publish(SubscriberEvent::Detached);
            return Err(SimError::RelaySession("no relay link configured".to_string()));
        };

        if let Err(err) = link.open().await {
            log::error!("Failed to open relay session: {}", err);
            self.notifier.notify("Relay connection error!");
            self.events.publish(SubscriberEvent::Detached);
            return Err(SimError::RelaySession(err.to_string()));
        }

        // reading starts when the session-ready notification arrives
        Ok(())
    }

    /// Feed a relay callback into the subsystem
    pub fn handle_relay_response(&mut self, response: RelayResponse) -> SimResult<()> {
        if !response.result.is_ok() {
            log::warn!("Ignored relay response ({:?})", response.result);
            return Ok(());
        }

        match response.kind {
            RelayResponseKind::SessionReady => {
                log::info!("Remote card is ready, start reading...");
                self.record.file_cursor = 0;
                self.request_current_file()
            }
            RelayResponseKind::ApduTransfer => {
                if response.params.is_empty() {
                    log::warn!("Ignored empty relay APDU response");
                    return Ok(());
                }
                self.handle_response(SimJobResponse::ok(
                    HandleKind::Query,
                    self.generation,
                    response.params,
                ))
            }
            RelayResponseKind::Other(kind) => {
                log::warn!("Ignored relay response type {}", kind);
                Ok(())
            }
        }
    }
}
