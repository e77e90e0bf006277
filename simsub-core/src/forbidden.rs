//! Forbidden-PLMN list manager
//!
//! Networks the subscriber must not register with, tagged with the reject
//! cause that put them there. The logical tail is the most recent entry.
//! The card file only holds four slots, so persistence projects the four
//! most recently added entries; the in-memory list is never truncated.

use crate::plmn::{PLMN_SENTINEL, Plmn};
use std::fmt::{self, Write};

/// Number of PLMN slots in the on-card forbidden-network file
pub const FPLMN_CARD_SLOTS: usize = 4;

/// Reject cause attached to a forbidden network
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForbiddenCause {
    /// The card stores no cause, or cause 0 was supplied
    Unspecified,
    /// GSM 04.08 reject cause, 1..=255
    Code(u8),
}

impl ForbiddenCause {
    /// Cause 0 is not a legal reject cause and maps to `Unspecified`
    pub fn from_u8(cause: u8) -> Self {
        match cause {
            0 => ForbiddenCause::Unspecified,
            c => ForbiddenCause::Code(c),
        }
    }
}

impl fmt::Display for ForbiddenCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ForbiddenCause::Unspecified => write!(f, "#-1"),
            ForbiddenCause::Code(c) => write!(f, "#{}", c),
        }
    }
}

/// One forbidden network entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForbiddenEntry {
    pub plmn: Plmn,
    pub cause: ForbiddenCause,
}

/// Ordered list of forbidden networks, most recent at the tail
#[derive(Debug, Clone, Default)]
pub struct ForbiddenPlmnList {
    entries: Vec<ForbiddenEntry>,
}

impl ForbiddenPlmnList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry at the tail, removing any earlier entry for the
    /// same PLMN first. Returns whether a duplicate was displaced.
    pub fn insert(&mut self, plmn: Plmn, cause: u8) -> bool {
        let displaced = self.remove(&plmn);
        self.entries.push(ForbiddenEntry {
            plmn,
            cause: ForbiddenCause::from_u8(cause),
        });
        displaced
    }

    /// Remove the first entry matching `plmn`. Returns whether one was removed.
    pub fn remove(&mut self, plmn: &Plmn) -> bool {
        match self.entries.iter().position(|e| e.plmn == *plmn) {
            Some(idx) => {
                log::info!("Delete from list of forbidden PLMNs (mcc-mnc={})", plmn);
                self.entries.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Drop every entry. Returns whether the list was non-empty.
    pub fn clear(&mut self) -> bool {
        if self.entries.is_empty() {
            return false;
        }
        self.entries.clear();
        true
    }

    /// Membership test
    pub fn contains(&self, plmn: &Plmn) -> bool {
        self.entries.iter().any(|e| e.plmn == *plmn)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ForbiddenEntry> {
        self.entries.iter()
    }

    /// Rebuild the list from card triplets. Existing entries are discarded.
    /// The card stores no cause, so every entry is `Unspecified`.
    pub fn load_from_triplets(&mut self, data: &[u8]) {
        self.entries.clear();
        for chunk in data.chunks_exact(3) {
            if chunk == PLMN_SENTINEL {
                break;
            }
            let Ok(plmn) = Plmn::from_bcd(chunk) else {
                continue;
            };
            log::info!("received Forbidden PLMN {} from SIM", plmn);
            self.entries.push(ForbiddenEntry {
                plmn,
                cause: ForbiddenCause::Unspecified,
            });
        }
    }

    /// Write the list as a standalone table, one row per network
    pub fn dump(&self, w: &mut impl Write) -> fmt::Result {
        writeln!(w, "MCC    |MNC    |cause")?;
        writeln!(w, "-------+-------+-------")?;
        for entry in &self.entries {
            let mnc = if entry.plmn.mnc_3_digits {
                format!("{:03}", entry.plmn.mnc)
            } else {
                format!("{:02}", entry.plmn.mnc)
            };
            writeln!(w, "{:<7}|{:<7}|{}", format!("{:03}", entry.plmn.mcc), mnc, entry.cause)?;
        }
        Ok(())
    }

    /// Project the list onto the four on-card slots: the four most recently
    /// added entries, remaining slots padded with the sentinel triplet.
    pub fn to_card_image(&self) -> [u8; FPLMN_CARD_SLOTS * 3] {
        let mut image = [0xffu8; FPLMN_CARD_SLOTS * 3];
        let skip = self.entries.len().saturating_sub(FPLMN_CARD_SLOTS);
        for (i, entry) in self.entries.iter().skip(skip).enumerate() {
            image[i * 3..i * 3 + 3].copy_from_slice(&entry.plmn.to_bcd());
        }
        image
    }
}
