//! The subscriber record
//!
//! Single mutable data model of the subsystem. The card manager owns it
//! exclusively; collaborators only observe snapshots after an event.

use crate::forbidden::ForbiddenPlmnList;
use crate::plmn::{LocationArea, PLMN_SENTINEL, Plmn, RoutingArea};
use crate::state::{GuState, UState};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Write};

/// Reserved TMSI / P-TMSI value meaning "unknown"
pub const RESERVED_TMSI: u32 = 0xffff_ffff;

/// Key sequence value meaning "no key available / force re-key"
pub const KEY_SEQ_INVALID: u8 = 7;

/// Which kind of card, if any, is behind the record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CardKind {
    #[default]
    None,
    /// Physical card in a local reader
    PhysicalReader,
    /// Synthetic card populated from configuration
    TestCard,
    /// Card reached through a remote relay session
    RemoteRelay,
}

/// GPRS (packet-switched) portion of the subscriber record
#[derive(Debug, Clone)]
pub struct GprsRecord {
    /// Packet TMSI, `RESERVED_TMSI` when unknown
    pub ptmsi: u32,
    /// P-TMSI signature (24 bit), `RESERVED_TMSI` when unknown
    pub ptmsi_sig: u32,
    pub rai: RoutingArea,
    pub rai_valid: bool,
    pub imsi_attached: bool,
    pub gu_state: GuState,
}

impl Default for GprsRecord {
    fn default() -> Self {
        Self {
            ptmsi: RESERVED_TMSI,
            ptmsi_sig: RESERVED_TMSI,
            rai: RoutingArea::default(),
            rai_valid: false,
            imsi_attached: false,
            gu_state: GuState::NotUpdated,
        }
    }
}

/// In-memory view of the subscriber identity module
#[derive(Debug, Clone)]
pub struct SubscriberRecord {
    pub card_kind: CardKind,
    /// A card is currently attached
    pub valid: bool,
    /// Short card name for logs ("test", "sim-<ICCID>", "remote")
    pub name: String,

    /// 6..=15 digits, empty until read
    pub imsi: String,
    pub iccid: String,
    pub msisdn: String,
    pub service_center_addr: String,
    pub service_provider_name: String,

    /// TMSI, `RESERVED_TMSI` when unknown
    pub tmsi: u32,
    pub lai: LocationArea,
    pub ustate: UState,
    pub imsi_attached: bool,

    /// Session ciphering key Kc
    pub key: [u8; 8],
    /// 0..=6 valid, 7 means no key
    pub key_seq: u8,

    pub gprs: GprsRecord,

    pub registered_plmn: Plmn,
    pub plmn_valid: bool,

    /// 16-bit access class bitmap
    pub acc_class: u16,
    /// Whether barred cells may be accessed
    pub acc_barred: bool,

    /// Preferred networks, insertion order is priority
    pub preferred_plmns: Vec<Plmn>,
    pub forbidden_plmns: ForbiddenPlmnList,

    /// Home network search interval in multiples of 6 minutes
    pub t6m_hplmn: u8,
    pub always_search_hplmn: bool,

    /// Position of the access state machine in the file table
    pub file_cursor: usize,
    /// Session is waiting for a user PIN
    pub pin_required: bool,
}

impl Default for SubscriberRecord {
    fn default() -> Self {
        Self {
            card_kind: CardKind::None,
            valid: false,
            name: String::new(),
            imsi: String::new(),
            iccid: String::new(),
            msisdn: String::new(),
            service_center_addr: String::new(),
            service_provider_name: String::new(),
            tmsi: RESERVED_TMSI,
            lai: LocationArea::default(),
            ustate: UState::NotUpdated,
            imsi_attached: false,
            key: [0; 8],
            key_seq: KEY_SEQ_INVALID,
            gprs: GprsRecord::default(),
            registered_plmn: Plmn::default(),
            plmn_valid: false,
            acc_class: 0,
            acc_barred: false,
            preferred_plmns: Vec::new(),
            forbidden_plmns: ForbiddenPlmnList::new(),
            t6m_hplmn: 0,
            always_search_hplmn: false,
            file_cursor: 0,
            pin_required: false,
        }
    }
}

impl SubscriberRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a key sequence number; the value is always taken modulo 8
    pub fn set_key_seq(&mut self, seq: u8) {
        self.key_seq = seq & 0x07;
    }

    /// Whether a usable session key is present
    pub fn has_key(&self) -> bool {
        self.key_seq != KEY_SEQ_INVALID
    }

    /// Rebuild the preferred-network list from card triplets.
    ///
    /// The existing sequence is discarded wholesale; triplets are consumed
    /// until the sentinel or buffer exhaustion.
    pub fn load_preferred_plmns(&mut self, data: &[u8]) {
        self.preferred_plmns.clear();
        for chunk in data.chunks_exact(3) {
            if chunk == PLMN_SENTINEL {
                break;
            }
            let Ok(plmn) = Plmn::from_bcd(chunk) else {
                continue;
            };
            log::info!("received PLMN selector (mcc-mnc={}) from SIM", plmn);
            self.preferred_plmns.push(plmn);
        }
    }

    /// Whether `plmn` is the subscriber's home network
    pub fn is_home_plmn(&self, plmn: &Plmn) -> bool {
        plmn.matches_imsi(&self.imsi)
    }

    /// Human-readable summary of the record
    pub fn dump(&self, w: &mut impl Write) -> fmt::Result {
        if !self.valid {
            return writeln!(w, " No SIM present.");
        }

        writeln!(w, " IMSI: {}", self.imsi)?;
        if !self.iccid.is_empty() {
            writeln!(w, " ICCID: {}", self.iccid)?;
        }
        if !self.service_provider_name.is_empty() {
            writeln!(w, " Service Provider Name: {}", self.service_provider_name)?;
        }
        if !self.msisdn.is_empty() {
            writeln!(w, " MSISDN: {}", self.msisdn)?;
        }
        if !self.service_center_addr.is_empty() {
            writeln!(w, " SMS Service Center Address: {}", self.service_center_addr)?;
        }

        write!(
            w,
            " Status: {}  IMSI {}",
            self.ustate,
            if self.imsi_attached { "attached" } else { "detached" }
        )?;
        if self.tmsi != RESERVED_TMSI {
            write!(w, "  TMSI 0x{:08x}", self.tmsi)?;
        }
        if self.lai.is_valid() {
            writeln!(w)?;
            writeln!(w, "         LAI: {}", self.lai)?;
        } else {
            writeln!(w, "  LAI: invalid")?;
        }

        write!(
            w,
            " GPRS Status: {}  IMSI {}",
            self.gprs.gu_state,
            if self.gprs.imsi_attached { "attached" } else { "detached" }
        )?;
        if self.gprs.ptmsi != RESERVED_TMSI {
            write!(w, "  PTMSI 0x{:08x}", self.gprs.ptmsi)?;
        }
        if self.gprs.ptmsi_sig != RESERVED_TMSI {
            write!(w, "  PTMSI-sig 0x{:06x}", self.gprs.ptmsi_sig)?;
        }
        if self.gprs.rai.is_valid() {
            writeln!(w)?;
            writeln!(w, "         RAI: {}", self.gprs.rai)?;
        } else {
            writeln!(w, "  RAI: invalid")?;
        }

        if self.has_key() {
            write!(w, " Key: sequence {} ", self.key_seq)?;
            for byte in &self.key {
                write!(w, " {:02x}", byte)?;
            }
            writeln!(w)?;
        }
        if self.plmn_valid {
            writeln!(w, " Registered PLMN: MCC-MNC {}", self.registered_plmn)?;
        }
        writeln!(
            w,
            " Access barred cells: {}",
            if self.acc_barred { "yes" } else { "no" }
        )?;
        write!(w, " Access classes:")?;
        for i in 0..16 {
            if self.acc_class & (1 << i) != 0 {
                write!(w, " C{}", i)?;
            }
        }
        writeln!(w)?;

        if !self.preferred_plmns.is_empty() {
            writeln!(w, " List of preferred PLMNs:")?;
            for plmn in &self.preferred_plmns {
                writeln!(w, "        {}", plmn)?;
            }
        }
        if !self.forbidden_plmns.is_empty() {
            writeln!(w, " List of forbidden PLMNs:")?;
            for entry in self.forbidden_plmns.iter() {
                writeln!(w, "        {}    {}", entry.plmn, entry.cause)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_record_sentinels() {
        let record = SubscriberRecord::new();
        assert_eq!(record.tmsi, RESERVED_TMSI);
        assert_eq!(record.gprs.ptmsi, RESERVED_TMSI);
        assert_eq!(record.key_seq, KEY_SEQ_INVALID);
        assert!(!record.valid);
        assert!(!record.has_key());
    }

    #[test]
    fn test_key_seq_modulo_8() {
        let mut record = SubscriberRecord::new();
        record.set_key_seq(0x0a);
        assert_eq!(record.key_seq, 2);
    }

    #[test]
    fn test_load_preferred_plmns_replaces_list() {
        let mut record = SubscriberRecord::new();
        record
            .preferred_plmns
            .push(Plmn::new(1, 1, false).unwrap());

        let mut data = Vec::new();
        data.extend_from_slice(&Plmn::new(262, 1, false).unwrap().to_bcd());
        data.extend_from_slice(&Plmn::new(262, 2, false).unwrap().to_bcd());
        data.extend_from_slice(&PLMN_SENTINEL);
        data.extend_from_slice(&Plmn::new(262, 3, false).unwrap().to_bcd());
        record.load_preferred_plmns(&data);

        assert_eq!(
            record.preferred_plmns,
            vec![
                Plmn::new(262, 1, false).unwrap(),
                Plmn::new(262, 2, false).unwrap()
            ]
        );
    }

    #[test]
    fn test_dump_without_card() {
        let record = SubscriberRecord::new();
        let mut out = String::new();
        record.dump(&mut out).unwrap();
        assert!(out.contains("No SIM present"));
    }

    #[test]
    fn test_dump_with_card() {
        let mut record = SubscriberRecord::new();
        record.valid = true;
        record.imsi = "001010000000001".to_string();
        record.acc_class = 0x0001;
        let mut out = String::new();
        record.dump(&mut out).unwrap();
        assert!(out.contains("IMSI: 001010000000001"));
        assert!(out.contains(" C0"));
    }
}
