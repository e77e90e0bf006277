//! EF(LOCI), 0x6F7E under DF(GSM): TMSI, LAI and location update status

use simsub_core::{LocationArea, SimError, SimResult, SubscriberRecord, UState};

/// Location update status values stored in the file
pub const LUPD_ST_UPDATED: u8 = 0;
pub const LUPD_ST_NOT_UPDATED: u8 = 1;
pub const LUPD_ST_PLMN_NOT_ALLOWED: u8 = 2;
pub const LUPD_ST_LA_NOT_ALLOWED: u8 = 3;

/// Byte length of the file image
pub const LOCI_LEN: usize = 11;

pub fn decode_loci(record: &mut SubscriberRecord, data: &[u8]) -> SimResult<()> {
    if data.len() < LOCI_LEN {
        return Err(SimError::Decode(format!(
            "LOCI needs {} bytes, got {}",
            LOCI_LEN,
            data.len()
        )));
    }

    record.tmsi = u32::from_be_bytes([data[0], data[1], data[2], data[3]]);
    record.lai = LocationArea::from_bytes(&data[4..9])?;

    record.ustate = match data[10] & 0x07 {
        LUPD_ST_UPDATED => UState::Updated,
        LUPD_ST_PLMN_NOT_ALLOWED | LUPD_ST_LA_NOT_ALLOWED => UState::RoamingNotAllowed,
        _ => UState::NotUpdated,
    };

    log::info!(
        "received LOCI from SIM (lai={} {})",
        record.lai,
        record.ustate
    );
    Ok(())
}

/// Build the file image for write-back. The TMSI-time byte is left at 0xFF.
pub fn encode_loci(record: &SubscriberRecord) -> [u8; LOCI_LEN] {
    let mut out = [0u8; LOCI_LEN];
    out[0..4].copy_from_slice(&record.tmsi.to_be_bytes());
    out[4..9].copy_from_slice(&record.lai.to_bytes());
    out[9] = 0xff;
    out[10] = match record.ustate {
        UState::Updated => LUPD_ST_UPDATED,
        UState::RoamingNotAllowed => LUPD_ST_LA_NOT_ALLOWED,
        UState::NotUpdated => LUPD_ST_NOT_UPDATED,
    };
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use simsub_core::Plmn;

    #[test]
    fn test_loci_round_trip() {
        let mut record = SubscriberRecord::new();
        record.tmsi = 0x1234_5678;
        record.lai = LocationArea {
            plmn: Plmn::new(262, 1, false).unwrap(),
            lac: 0x4711,
        };
        record.ustate = UState::Updated;

        let image = encode_loci(&record);
        let mut decoded = SubscriberRecord::new();
        decode_loci(&mut decoded, &image).unwrap();

        assert_eq!(decoded.tmsi, 0x1234_5678);
        assert_eq!(decoded.lai, record.lai);
        assert_eq!(decoded.ustate, UState::Updated);
    }

    #[test]
    fn test_loci_roaming_states() {
        let mut record = SubscriberRecord::new();
        let mut image = encode_loci(&record);
        image[10] = LUPD_ST_PLMN_NOT_ALLOWED;
        decode_loci(&mut record, &image).unwrap();
        assert_eq!(record.ustate, UState::RoamingNotAllowed);
    }

    #[test]
    fn test_loci_undersized() {
        let mut record = SubscriberRecord::new();
        assert!(decode_loci(&mut record, &[0u8; 10]).is_err());
    }
}
