//! The card access state machine
//!
//! Walks the fixed file table one read at a time on the query handle.
//! Each response either advances the cursor, re-issues the current file
//! after a PIN round trip, or invalidates the card.

use crate::events::SubscriberEvent;
use crate::manager::SubscriberManager;
use bytes::Bytes;
use simsub_core::{PinState, SimResult};
use simsub_files::{FileJob, FILE_TABLE};
use simsub_io::{FilePath, HandleKind, JobError, JobOutcome, SimJob};

impl SubscriberManager {
    /// Issue the read for the file at the current cursor, or finish the
    /// attach once the cursor has run off the table
    pub(crate) fn request_current_file(&mut self) -> SimResult<()> {
        let Some(entry) = FILE_TABLE.get(self.record.file_cursor) else {
            return self.finalize_attach();
        };

        log::info!("Requesting SIM file 0x{:04x}", entry.file);
        let path = FilePath::from_slice(entry.path);
        let job = match entry.job {
            FileJob::ReadBinary => {
                SimJob::read_binary(HandleKind::Query, self.generation, path, entry.file)
            }
            FileJob::ReadRecord => {
                SimJob::read_record(HandleKind::Query, self.generation, path, entry.file, 1)
            }
        };
        self.jobs.submit(job)
    }

    /// All files are in; derive the registered network and announce the card
    fn finalize_attach(&mut self) -> SimResult<()> {
        log::info!("Done reading SIM card (IMSI={})", self.record.imsi);

        if self.record.lai.is_valid() {
            self.record.plmn_valid = true;
            self.record.registered_plmn = self.record.lai.plmn;
            log::info!("-> SIM card registered to {}", self.record.registered_plmn);
        } else {
            log::info!("-> SIM card not registered");
        }

        self.events.publish(SubscriberEvent::Attached);
        Ok(())
    }

    /// A response arrived on the query handle
    pub(crate) fn handle_query_outcome(&mut self, outcome: JobOutcome) -> SimResult<()> {
        match outcome {
            Err(err) => self.handle_query_error(err),
            Ok(data) => self.handle_query_data(data),
        }
    }

    fn handle_query_data(&mut self, data: Bytes) -> SimResult<()> {
        // a successful response while a PIN was pending is the PIN job
        // confirmation; re-issue the interrupted file read
        if self.record.pin_required {
            self.record.pin_required = false;
            return self.request_current_file();
        }

        let Some(entry) = FILE_TABLE.get(self.record.file_cursor) else {
            // PIN management confirmation after the attach finished
            return Ok(());
        };

        if let Err(err) = (entry.decode)(&mut self.record, &data) {
            log::warn!("SIM reading failed, file invalid ({})", err);
            if entry.mandatory {
                return self.fail_card("SIM failed, data invalid, replace SIM!");
            }
        }
        self.advance()
    }

    fn handle_query_error(&mut self, err: JobError) -> SimResult<()> {
        if let Some(state) = err.cause.pin_state() {
            return self.handle_pin_wait(state, err.retries_left);
        }

        match FILE_TABLE.get(self.record.file_cursor) {
            Some(entry) if !entry.mandatory => {
                log::warn!("SIM reading failed, ignoring! ({})", err.cause);
                self.advance()
            }
            _ => {
                log::warn!("SIM reading failed ({})", err.cause);
                self.fail_card("SIM failed, replace SIM!")
            }
        }
    }

    /// Park the state machine until the user supplies a credential
    fn handle_pin_wait(&mut self, state: PinState, retries_left: u8) -> SimResult<()> {
        self.notifier.clear();
        match state {
            PinState::PinRequired => {
                log::info!("PIN is required, {} tries left", retries_left);
                self.notifier.notify(format!(
                    "Please give PIN for ICCID {} (you have {} tries left)",
                    self.record.iccid, retries_left
                ));
            }
            PinState::PinBlocked => {
                log::warn!("PIN is blocked");
                self.notifier.notify("PIN is blocked");
                if retries_left > 0 {
                    self.notifier.notify(format!(
                        "Please give PUC for ICCID {} (you have {} tries left)",
                        self.record.iccid, retries_left
                    ));
                }
            }
            PinState::PucBlocked => {
                log::warn!("PUC is blocked");
                self.notifier.notify("PUC is blocked");
            }
        }

        if !state.is_recoverable() {
            log::warn!("no credential can recover this card");
        }
        self.record.pin_required = true;
        Ok(())
    }

    /// Move past the current file
    fn advance(&mut self) -> SimResult<()> {
        self.record.file_cursor += 1;
        self.request_current_file()
    }

    /// Terminal failure: the card is unusable from here on
    pub(crate) fn fail_card(&mut self, text: &str) -> SimResult<()> {
        self.notifier.clear();
        self.notifier.notify(text);
        self.record.valid = false;
        self.events.publish(SubscriberEvent::Detached);
        Ok(())
    }
}
