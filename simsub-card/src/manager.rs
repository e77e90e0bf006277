//! The subscriber manager
//!
//! Owns the subscriber record exclusively and drives every card
//! interaction. All card round trips go through the job queue and return
//! immediately; continuation happens in the `handle_*` methods when the
//! endpoint delivers a response.

use crate::auth::{self, DUMMY_SRES};
use crate::config::SimSettings;
use crate::events::{EventSender, Notifier, SubscriberEvent};
use bytes::Bytes;
use simsub_core::{CardKind, Plmn, SimError, SimResult, SubscriberRecord, KEY_SEQ_INVALID};
use simsub_files::{kc, loci, locigprs, DF_GSM};
use simsub_io::{
    FilePath, Generation, HandleKind, JobError, JobOutcome, JobSender, PinOp, RelayLink, SimJob,
    SimJobResponse,
};

/// File identifiers of the write-back targets
const EF_KC: u16 = 0x6f20;
const EF_FPLMN: u16 = 0x6f7b;
const EF_LOCI: u16 = 0x6f7e;
const EF_LOCIGPRS: u16 = 0x6f53;

pub struct SubscriberManager {
    pub(crate) settings: SimSettings,
    pub(crate) record: SubscriberRecord,
    pub(crate) generation: Generation,
    pub(crate) jobs: JobSender,
    pub(crate) events: EventSender,
    pub(crate) notifier: Notifier,
    pub(crate) relay: Option<Box<dyn RelayLink>>,
}

impl SubscriberManager {
    /// Create a manager wired to its collaborators
    pub fn new(
        settings: SimSettings,
        jobs: JobSender,
        events: EventSender,
        notifier: Notifier,
    ) -> Self {
        Self {
            settings,
            record: SubscriberRecord::new(),
            generation: Generation::new(),
            jobs,
            events,
            notifier,
            relay: None,
        }
    }

    /// Attach the remote-relay collaborator
    pub fn set_relay_link(&mut self, link: Box<dyn RelayLink>) {
        self.relay = Some(link);
    }

    /// Read-only view of the subscriber record
    pub fn record(&self) -> &SubscriberRecord {
        &self.record
    }

    pub fn settings(&self) -> &SimSettings {
        &self.settings
    }

    /// Current card session generation, for tagging endpoint responses
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Whether the active backend talks to a real card via the job queue
    pub(crate) fn is_card_backend(&self) -> bool {
        matches!(
            self.record.card_kind,
            CardKind::PhysicalReader | CardKind::RemoteRelay
        )
    }

    /// Insert a card of the configured kind
    ///
    /// The record is zeroed and re-initialized; prior state is fully
    /// discarded. A new generation token invalidates any response still
    /// in flight for the previous card.
    pub async fn insert_card(&mut self) -> SimResult<()> {
        if self.record.valid {
            log::error!("Cannot insert card, until current card is removed.");
            return Err(SimError::Busy);
        }

        self.record = SubscriberRecord::new();
        self.generation = self.generation.next();
        self.record.valid = true;

        let result = match self.settings.sim_type {
            CardKind::PhysicalReader => self.insert_physical(),
            CardKind::TestCard => self.insert_test_card(),
            CardKind::RemoteRelay => self.insert_remote().await,
            CardKind::None => Err(SimError::InvalidArgument(
                "no card kind configured".to_string(),
            )),
        };

        if let Err(err) = result {
            self.record.valid = false;
            return Err(err);
        }
        Ok(())
    }

    /// Start the access state machine against the local reader
    fn insert_physical(&mut self) -> SimResult<()> {
        self.record.card_kind = CardKind::PhysicalReader;
        self.record.name = "sim".to_string();
        self.record.file_cursor = 0;
        self.request_current_file()
    }

    /// Remove the card, flushing the record
    pub async fn remove_card(&mut self) -> SimResult<()> {
        if !self.record.valid {
            log::error!("Cannot remove card, no card present");
            return Err(SimError::InvalidArgument("no card present".to_string()));
        }

        if self.record.card_kind == CardKind::RemoteRelay {
            if let Some(link) = self.relay.as_mut() {
                if let Err(err) = link.close().await {
                    log::warn!("relay session close failed: {}", err);
                }
            }
        }

        self.events.publish(SubscriberEvent::Detached);
        self.record = SubscriberRecord::new();
        self.generation = self.generation.next();
        Ok(())
    }

    /// PIN management towards the card
    ///
    /// Skipped silently without a valid card. The test card has no PIN
    /// concept; entering one is a no-op that reports success.
    pub fn enter_pin(&mut self, op: PinOp, pin1: &str, pin2: &str) -> SimResult<()> {
        if self.record.card_kind == CardKind::None || !self.record.valid {
            return Ok(());
        }
        if self.record.card_kind == CardKind::TestCard {
            log::warn!("PIN on test SIM: not implemented!");
            return Ok(());
        }

        match op {
            PinOp::Unlock => {
                if !self.record.pin_required {
                    log::error!("No PIN required now");
                    return Ok(());
                }
                log::info!("entering PIN");
            }
            PinOp::Enable => log::info!("enabling PIN"),
            PinOp::Disable => log::info!("disabling PIN"),
            PinOp::Change => log::info!("changing PIN"),
            PinOp::Unblock => log::info!("unblocking PIN with PUC"),
        }

        self.jobs
            .submit(SimJob::pin(self.generation, op, pin1, pin2))
    }

    /// Key sequence to report in a service request
    pub fn key_seq_for_request(&self) -> u8 {
        if self.settings.force_rekey {
            KEY_SEQ_INVALID
        } else {
            self.record.key_seq
        }
    }

    /// Produce an authentication vector for a 16-byte challenge
    ///
    /// Without a usable card (or with `no_sim` forced) a fixed placeholder
    /// signed response is published instead of a computed one.
    pub fn generate_auth_vector(
        &mut self,
        key_seq: u8,
        rand: &[u8; 16],
        no_sim: bool,
    ) -> SimResult<()> {
        if no_sim || self.record.card_kind == CardKind::None || !self.record.valid {
            log::info!("Sending dummy authentication response");
            self.events
                .publish(SubscriberEvent::AuthResponse { sres: DUMMY_SRES });
            return Ok(());
        }

        if self.record.card_kind == CardKind::TestCard {
            return self.generate_auth_vector_local(key_seq, rand);
        }

        log::info!("Generating KEY at SIM");
        self.record.set_key_seq(key_seq);
        self.jobs.submit(SimJob::run_gsm_algorithm(
            self.generation,
            FilePath::from_slice(DF_GSM),
            *rand,
        ))
    }

    /// Compute the vector locally from the test-card configuration
    fn generate_auth_vector_local(&mut self, key_seq: u8, rand: &[u8; 16]) -> SimResult<()> {
        let cfg = &self.settings.test_card;
        let vector = auth::generate_vector(cfg.algorithm, &cfg.ki, rand)?;

        self.record.set_key_seq(key_seq);
        self.record.key = vector.kc;

        log::info!("Sending authentication response");
        self.events.publish(SubscriberEvent::AuthResponse {
            sres: vector.sres,
        });
        Ok(())
    }

    /// Write the location information file back to the card
    pub fn write_loci(&mut self) -> SimResult<()> {
        if self.record.card_kind == CardKind::None || !self.record.valid {
            return Ok(());
        }
        log::info!("Updating LOCI on SIM");
        if !self.is_card_backend() {
            log::warn!("Updating LOCI on test SIM: not implemented!");
            return Ok(());
        }

        let image = loci::encode_loci(&self.record);
        self.jobs.submit(SimJob::update_binary(
            HandleKind::Update,
            self.generation,
            FilePath::from_slice(DF_GSM),
            EF_LOCI,
            Bytes::copy_from_slice(&image),
        ))
    }

    /// Write the GPRS location information file back to the card
    pub fn write_locigprs(&mut self) -> SimResult<()> {
        if self.record.card_kind == CardKind::None || !self.record.valid {
            return Ok(());
        }
        log::info!("Updating LOCIGPRS on SIM");
        if !self.is_card_backend() {
            return Ok(());
        }

        let image = locigprs::encode_locigprs(&self.record);
        self.jobs.submit(SimJob::update_binary(
            HandleKind::Update,
            self.generation,
            FilePath::from_slice(DF_GSM),
            EF_LOCIGPRS,
            Bytes::copy_from_slice(&image),
        ))
    }

    /// Add a network to the forbidden list
    ///
    /// The home network is never written to the card file; the in-memory
    /// entry is kept and the caller is told via the error.
    pub fn add_forbidden_plmn(&mut self, plmn: Plmn, cause: u8) -> SimResult<()> {
        log::info!("Add to list of forbidden PLMNs (mcc-mnc={})", plmn);
        self.record.forbidden_plmns.insert(plmn, cause);

        if self.record.valid && self.record.is_home_plmn(&plmn) {
            return Err(SimError::InvalidArgument(
                "home network is not persisted to the forbidden file".to_string(),
            ));
        }

        self.persist_forbidden()
    }

    /// Delete one forbidden network, or flush the whole list with `None`
    ///
    /// Persists only when something was actually removed. Returns whether
    /// the list changed.
    pub fn del_forbidden_plmn(&mut self, plmn: Option<&Plmn>) -> SimResult<bool> {
        let deleted = match plmn {
            Some(plmn) => self.record.forbidden_plmns.remove(plmn),
            None => self.record.forbidden_plmns.clear(),
        };

        if deleted {
            self.persist_forbidden()?;
        }
        Ok(deleted)
    }

    /// Membership test on the forbidden list
    pub fn is_forbidden_plmn(&self, plmn: &Plmn) -> bool {
        self.record.forbidden_plmns.contains(plmn)
    }

    /// Write the forbidden-list projection to the card
    fn persist_forbidden(&mut self) -> SimResult<()> {
        if self.record.card_kind == CardKind::None || !self.record.valid {
            return Ok(());
        }
        log::info!("Updating FPLMN on SIM");
        if !self.is_card_backend() {
            log::warn!("Updating FPLMN on test SIM: not implemented!");
            return Ok(());
        }

        let image = self.record.forbidden_plmns.to_card_image();
        self.jobs.submit(SimJob::update_binary(
            HandleKind::Update,
            self.generation,
            FilePath::from_slice(DF_GSM),
            EF_FPLMN,
            Bytes::copy_from_slice(&image),
        ))
    }

    /// Entry point for responses delivered by the card I/O endpoint
    ///
    /// Responses for a superseded card session are detected by their
    /// generation token and dropped.
    pub fn handle_response(&mut self, response: SimJobResponse) -> SimResult<()> {
        if response.generation != self.generation {
            log::info!(
                "dropping stale {} response from {}",
                response.handle,
                response.generation
            );
            return Ok(());
        }

        match response.handle {
            HandleKind::Query => self.handle_query_outcome(response.outcome),
            HandleKind::Update => self.handle_update_outcome(response.outcome),
            HandleKind::Key => self.handle_key_outcome(response.outcome),
        }
    }

    /// Write-backs are fire-and-forget; failures are only logged
    fn handle_update_outcome(&mut self, outcome: JobOutcome) -> SimResult<()> {
        if let Err(JobError { cause, .. }) = outcome {
            log::warn!("SIM update failed ({})", cause);
        }
        Ok(())
    }

    /// Continuation of an on-card authentication run
    fn handle_key_outcome(&mut self, outcome: JobOutcome) -> SimResult<()> {
        let data = match outcome {
            Ok(data) => data,
            Err(JobError { cause, .. }) => {
                log::warn!("key generation on SIM failed ({})", cause);
                return Ok(());
            }
        };

        if data.len() < 12 {
            log::warn!("authentication response from SIM too short");
            return Ok(());
        }

        let mut sres = [0u8; 4];
        sres.copy_from_slice(&data[0..4]);
        self.record.key.copy_from_slice(&data[4..12]);

        // key and sequence go back to the card before the event fires
        log::info!("Updating KC on SIM");
        let image = kc::encode_kc(&self.record.key, self.record.key_seq);
        self.jobs.submit(SimJob::update_binary(
            HandleKind::Update,
            self.generation,
            FilePath::from_slice(DF_GSM),
            EF_KC,
            Bytes::copy_from_slice(&image),
        ))?;

        self.events.publish(SubscriberEvent::AuthResponse { sres });
        Ok(())
    }
}
