//! PLMN, location-area and routing-area identities
//!
//! A PLMN (Public Land Mobile Network) is identified by a three digit
//! mobile country code and a two or three digit mobile network code.
//! On the card these are stored as 3-byte BCD triplets; the third MNC
//! digit shares an octet with the third MCC digit and is `0xF` when the
//! network uses a two digit MNC.

use crate::error::{SimError, SimResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Filler triplet marking an unused PLMN slot on the card
pub const PLMN_SENTINEL: [u8; 3] = [0xff, 0xff, 0xff];

/// Public Land Mobile Network identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Plmn {
    /// Mobile country code, 0..=999
    pub mcc: u16,
    /// Mobile network code, 0..=999
    pub mnc: u16,
    /// Distinguishes MNC "023" from "23"
    pub mnc_3_digits: bool,
}

impl Plmn {
    /// Create a new PLMN identity
    ///
    /// # Errors
    ///
    /// Returns `SimError::InvalidArgument` if either code exceeds three digits
    /// or a two-digit MNC is above 99.
    pub fn new(mcc: u16, mnc: u16, mnc_3_digits: bool) -> SimResult<Self> {
        if mcc > 999 || mnc > 999 {
            return Err(SimError::InvalidArgument(format!(
                "PLMN code out of range: mcc={} mnc={}",
                mcc, mnc
            )));
        }
        if !mnc_3_digits && mnc > 99 {
            return Err(SimError::InvalidArgument(format!(
                "two-digit MNC cannot be {}",
                mnc
            )));
        }
        Ok(Self {
            mcc,
            mnc,
            mnc_3_digits,
        })
    }

    /// Decode a PLMN from its 3-byte BCD triplet
    pub fn from_bcd(bcd: &[u8]) -> SimResult<Self> {
        if bcd.len() < 3 {
            return Err(SimError::Decode("PLMN triplet needs 3 bytes".to_string()));
        }
        let mcc = u16::from(bcd[0] & 0x0f) * 100
            + u16::from(bcd[0] >> 4) * 10
            + u16::from(bcd[1] & 0x0f);
        let mnc_3_digits = (bcd[1] >> 4) != 0x0f;
        let mut mnc = u16::from(bcd[2] & 0x0f) * 10 + u16::from(bcd[2] >> 4);
        if mnc_3_digits {
            mnc = mnc * 10 + u16::from(bcd[1] >> 4);
        }
        Ok(Self {
            mcc,
            mnc,
            mnc_3_digits,
        })
    }

    /// Encode this PLMN into its 3-byte BCD triplet
    pub fn to_bcd(&self) -> [u8; 3] {
        let mcc = [
            (self.mcc / 100 % 10) as u8,
            (self.mcc / 10 % 10) as u8,
            (self.mcc % 10) as u8,
        ];
        let (mnc1, mnc2, mnc3) = if self.mnc_3_digits {
            (
                (self.mnc / 100 % 10) as u8,
                (self.mnc / 10 % 10) as u8,
                (self.mnc % 10) as u8,
            )
        } else {
            ((self.mnc / 10 % 10) as u8, (self.mnc % 10) as u8, 0x0f)
        };
        [
            (mcc[1] << 4) | mcc[0],
            (mnc3 << 4) | mcc[2],
            (mnc2 << 4) | mnc1,
        ]
    }

    /// Whether this PLMN is the home network of the given IMSI
    ///
    /// The IMSI carries the home MCC in digits 1-3 and the home MNC in
    /// digits 4-5 (or 4-6 for three-digit MNCs).
    pub fn matches_imsi(&self, imsi: &str) -> bool {
        let mnc_len = if self.mnc_3_digits { 3 } else { 2 };
        if imsi.len() < 3 + mnc_len {
            return false;
        }
        let mcc_str = format!("{:03}", self.mcc);
        let mnc_str = if self.mnc_3_digits {
            format!("{:03}", self.mnc)
        } else {
            format!("{:02}", self.mnc)
        };
        imsi.starts_with(&mcc_str) && imsi[3..].starts_with(&mnc_str)
    }
}

impl fmt::Display for Plmn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.mnc_3_digits {
            write!(f, "{:03}-{:03}", self.mcc, self.mnc)
        } else {
            write!(f, "{:03}-{:02}", self.mcc, self.mnc)
        }
    }
}

/// Location Area Identity: PLMN plus location area code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LocationArea {
    pub plmn: Plmn,
    pub lac: u16,
}

impl LocationArea {
    /// A location area is meaningful only for codes inside (0x0000, 0xFFFE)
    pub fn is_valid(&self) -> bool {
        self.lac > 0x0000 && self.lac < 0xfffe
    }

    /// Decode the 5-byte LAI as stored on the card
    pub fn from_bytes(data: &[u8]) -> SimResult<Self> {
        if data.len() < 5 {
            return Err(SimError::Decode("LAI needs 5 bytes".to_string()));
        }
        Ok(Self {
            plmn: Plmn::from_bcd(&data[0..3])?,
            lac: u16::from_be_bytes([data[3], data[4]]),
        })
    }

    /// Encode into the 5-byte on-card LAI layout
    pub fn to_bytes(&self) -> [u8; 5] {
        let bcd = self.plmn.to_bcd();
        let lac = self.lac.to_be_bytes();
        [bcd[0], bcd[1], bcd[2], lac[0], lac[1]]
    }
}

impl fmt::Display for LocationArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:04x}", self.plmn, self.lac)
    }
}

/// Routing Area Identity: PLMN, location area code and routing area code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RoutingArea {
    pub plmn: Plmn,
    pub lac: u16,
    pub rac: u8,
}

impl RoutingArea {
    /// Same validity window as the location area code
    pub fn is_valid(&self) -> bool {
        self.lac > 0x0000 && self.lac < 0xfffe
    }

    /// Decode the 6-byte RAI as stored on the card
    pub fn from_bytes(data: &[u8]) -> SimResult<Self> {
        if data.len() < 6 {
            return Err(SimError::Decode("RAI needs 6 bytes".to_string()));
        }
        Ok(Self {
            plmn: Plmn::from_bcd(&data[0..3])?,
            lac: u16::from_be_bytes([data[3], data[4]]),
            rac: data[5],
        })
    }

    /// Encode into the 6-byte on-card RAI layout
    pub fn to_bytes(&self) -> [u8; 6] {
        let bcd = self.plmn.to_bcd();
        let lac = self.lac.to_be_bytes();
        [bcd[0], bcd[1], bcd[2], lac[0], lac[1], self.rac]
    }
}

impl fmt::Display for RoutingArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:04x}-{:02x}", self.plmn, self.lac, self.rac)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plmn_bcd_two_digit_mnc() {
        let plmn = Plmn::new(1, 1, false).unwrap();
        let bcd = plmn.to_bcd();
        assert_eq!(bcd, [0x00, 0xf1, 0x10]);
        assert_eq!(Plmn::from_bcd(&bcd).unwrap(), plmn);
    }

    #[test]
    fn test_plmn_bcd_three_digit_mnc() {
        let plmn = Plmn::new(302, 720, true).unwrap();
        let bcd = plmn.to_bcd();
        assert_eq!(Plmn::from_bcd(&bcd).unwrap(), plmn);
        assert_ne!(bcd[1] >> 4, 0x0f);
    }

    #[test]
    fn test_plmn_new_rejects_out_of_range() {
        assert!(Plmn::new(1000, 1, false).is_err());
        assert!(Plmn::new(1, 100, false).is_err());
        assert!(Plmn::new(1, 100, true).is_ok());
    }

    #[test]
    fn test_plmn_display() {
        assert_eq!(Plmn::new(1, 1, false).unwrap().to_string(), "001-01");
        assert_eq!(Plmn::new(1, 1, true).unwrap().to_string(), "001-001");
    }

    #[test]
    fn test_matches_imsi() {
        let plmn = Plmn::new(1, 1, false).unwrap();
        assert!(plmn.matches_imsi("001010000000001"));
        assert!(!plmn.matches_imsi("001020000000001"));

        let plmn3 = Plmn::new(1, 10, true).unwrap();
        assert!(plmn3.matches_imsi("001010000000001"));
        assert!(!plmn3.matches_imsi("0010"));
    }

    #[test]
    fn test_location_area_validity() {
        let mut lai = LocationArea::default();
        assert!(!lai.is_valid());
        lai.lac = 0x0001;
        assert!(lai.is_valid());
        lai.lac = 0xfffe;
        assert!(!lai.is_valid());
    }

    #[test]
    fn test_location_area_round_trip() {
        let lai = LocationArea {
            plmn: Plmn::new(262, 42, false).unwrap(),
            lac: 0x1234,
        };
        assert_eq!(LocationArea::from_bytes(&lai.to_bytes()).unwrap(), lai);
    }

    #[test]
    fn test_routing_area_round_trip() {
        let rai = RoutingArea {
            plmn: Plmn::new(262, 42, false).unwrap(),
            lac: 0x1234,
            rac: 0x56,
        };
        assert_eq!(RoutingArea::from_bytes(&rai.to_bytes()).unwrap(), rai);
    }
}
