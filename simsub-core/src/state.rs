//! Registration state enumerations
//!
//! The circuit-switched update status ("U-state") and its packet-switched
//! mirror ("GU-state") track whether the location stored on the card is
//! still current with the network.

use std::fmt;

/// Circuit-switched registration status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UState {
    /// Location information on the card is stale
    #[default]
    NotUpdated,
    /// Location update succeeded, the stored area is current
    Updated,
    /// Network rejected registration in this area
    RoamingNotAllowed,
}

impl fmt::Display for UState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UState::NotUpdated => write!(f, "U2_NOT_UPDATED"),
            UState::Updated => write!(f, "U1_UPDATED"),
            UState::RoamingNotAllowed => write!(f, "U3_ROAMING_NA"),
        }
    }
}

/// Packet-switched (GPRS) registration status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GuState {
    #[default]
    NotUpdated,
    Updated,
    RoamingNotAllowed,
}

impl fmt::Display for GuState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GuState::NotUpdated => write!(f, "GU2_NOT_UPDATED"),
            GuState::Updated => write!(f, "GU1_UPDATED"),
            GuState::RoamingNotAllowed => write!(f, "GU3_ROAMING_NA"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_not_updated() {
        assert_eq!(UState::default(), UState::NotUpdated);
        assert_eq!(GuState::default(), GuState::NotUpdated);
    }

    #[test]
    fn test_display_names() {
        assert_eq!(UState::Updated.to_string(), "U1_UPDATED");
        assert_eq!(GuState::RoamingNotAllowed.to_string(), "GU3_ROAMING_NA");
    }
}
