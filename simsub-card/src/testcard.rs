//! The synthetic test card
//!
//! Populates the record straight from configuration, with no card I/O at
//! all, and attaches immediately. The circuit-switched and packet-switched
//! update states are derived independently from their own attach flags.

use crate::config::imsi_valid;
use crate::events::SubscriberEvent;
use crate::manager::SubscriberManager;
use simsub_core::{CardKind, GuState, SimError, SimResult, UState};

impl SubscriberManager {
    pub(crate) fn insert_test_card(&mut self) -> SimResult<()> {
        let cfg = self.settings.test_card.clone();

        if !imsi_valid(&cfg.imsi) {
            log::error!("Wrong IMSI format");
            return Err(SimError::InvalidArgument("wrong IMSI format".to_string()));
        }

        let record = &mut self.record;
        record.card_kind = CardKind::TestCard;
        record.name = "test".to_string();
        record.imsi = cfg.imsi;
        record.imsi_attached = cfg.imsi_attached;

        // test cards ignore access class restrictions entirely
        record.acc_class = 0xffff;
        record.acc_barred = cfg.barred;

        record.plmn_valid = cfg.rplmn_valid;
        record.registered_plmn = cfg.rplmn;
        record.lai.plmn = cfg.rplmn;
        record.lai.lac = cfg.lac;
        record.tmsi = cfg.tmsi;

        record.always_search_hplmn = cfg.always_search_hplmn;
        record.t6m_hplmn = 1;

        record.ustate = if record.imsi_attached && record.plmn_valid {
            UState::Updated
        } else {
            UState::NotUpdated
        };

        record.gprs.ptmsi = cfg.gprs.ptmsi;
        record.gprs.ptmsi_sig = cfg.gprs.ptmsi_sig;
        record.gprs.imsi_attached = cfg.gprs.imsi_attached;
        record.gprs.rai_valid = cfg.gprs.rai_valid;
        record.gprs.rai = cfg.gprs.rai;
        record.gprs.gu_state = if record.gprs.imsi_attached && record.gprs.rai_valid {
            GuState::Updated
        } else {
            GuState::NotUpdated
        };

        if record.plmn_valid {
            log::info!("-> Test card registered to {}", record.registered_plmn);
        } else {
            log::info!("-> Test card not registered");
        }

        self.events.publish(SubscriberEvent::Attached);
        Ok(())
    }
}
