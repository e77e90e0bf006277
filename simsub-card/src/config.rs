//! Subscriber manager settings

use crate::auth::AuthAlgorithm;
use serde::{Deserialize, Serialize};
use simsub_core::{CardKind, Plmn, RoutingArea};

/// GPRS portion of the test-card configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestCardGprs {
    pub ptmsi: u32,
    pub ptmsi_sig: u32,
    pub imsi_attached: bool,
    pub rai_valid: bool,
    pub rai: RoutingArea,
}

impl Default for TestCardGprs {
    fn default() -> Self {
        Self {
            ptmsi: simsub_core::RESERVED_TMSI,
            ptmsi_sig: simsub_core::RESERVED_TMSI,
            imsi_attached: false,
            rai_valid: false,
            rai: RoutingArea::default(),
        }
    }
}

/// Static contents of the synthetic test card
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestCardConfig {
    /// 6..=15 decimal digits
    pub imsi: String,
    /// Simulated secret key
    pub ki: [u8; 16],
    pub algorithm: AuthAlgorithm,
    pub imsi_attached: bool,
    pub rplmn_valid: bool,
    pub rplmn: Plmn,
    pub lac: u16,
    pub tmsi: u32,
    /// Pretend barred cells are accessible
    pub barred: bool,
    pub always_search_hplmn: bool,
    pub gprs: TestCardGprs,
}

impl Default for TestCardConfig {
    fn default() -> Self {
        Self {
            imsi: "001010000000001".to_string(),
            ki: [0; 16],
            algorithm: AuthAlgorithm::default(),
            imsi_attached: false,
            rplmn_valid: false,
            rplmn: Plmn::default(),
            lac: 0x0000,
            tmsi: simsub_core::RESERVED_TMSI,
            barred: false,
            always_search_hplmn: false,
            gprs: TestCardGprs::default(),
        }
    }
}

/// Manager-level settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SimSettings {
    /// Which backend `insert_card` selects
    pub sim_type: CardKind,
    /// Always report key sequence 7 to force fresh authentication
    pub force_rekey: bool,
    pub test_card: TestCardConfig,
}

/// Basic IMSI syntax check: 6 to 15 decimal digits
pub fn imsi_valid(imsi: &str) -> bool {
    (6..=15).contains(&imsi.len()) && imsi.chars().all(|c| c.is_ascii_digit())
}
