//! Network-related elementary files: PLMN selector, forbidden PLMNs,
//! HPLMN search interval and access classes

use simsub_core::{SimError, SimResult, SubscriberRecord};

/// EF(PLMNsel), 0x6F30: preferred networks as 3-byte triplets
pub fn decode_plmnsel(record: &mut SubscriberRecord, data: &[u8]) -> SimResult<()> {
    record.load_preferred_plmns(data);
    Ok(())
}

/// EF(FPLMN), 0x6F7B: forbidden networks as 3-byte triplets
pub fn decode_fplmn(record: &mut SubscriberRecord, data: &[u8]) -> SimResult<()> {
    record.forbidden_plmns.load_from_triplets(data);
    Ok(())
}

/// EF(HPPLMN), 0x6F31: home network search interval in units of 6 minutes
pub fn decode_hpplmn(record: &mut SubscriberRecord, data: &[u8]) -> SimResult<()> {
    let Some(&interval) = data.first() else {
        return Err(SimError::Decode("HPPLMN file is empty".to_string()));
    };
    record.t6m_hplmn = interval;
    log::info!(
        "received HPPLMN {} ({} mins) from SIM",
        record.t6m_hplmn,
        u32::from(record.t6m_hplmn) * 6
    );
    Ok(())
}

/// EF(ACC), 0x6F78: access control classes, big-endian bitmap
pub fn decode_acc(record: &mut SubscriberRecord, data: &[u8]) -> SimResult<()> {
    if data.len() < 2 {
        return Err(SimError::Decode("ACC needs 2 bytes".to_string()));
    }
    record.acc_class = u16::from_be_bytes([data[0], data[1]]);
    log::info!("received ACC {:04x} from SIM", record.acc_class);
    Ok(())
}
