//! EF(SPN), 0x6F46 under DF(GSM): service provider name

use simsub_core::{SimError, SimResult, SubscriberRecord};

/// Display-condition byte plus up to 16 name bytes
pub const SPN_MIN_LEN: usize = 17;

/// Decode the provider name. UCS2-coded names (first byte >= 0x80) are
/// not supported and reported as such.
pub fn decode_spn(record: &mut SubscriberRecord, data: &[u8]) -> SimResult<()> {
    if data.len() < SPN_MIN_LEN {
        return Err(SimError::Decode(format!(
            "SPN needs {} bytes, got {}",
            SPN_MIN_LEN,
            data.len()
        )));
    }
    if data[1] >= 0x80 {
        return Err(SimError::Unsupported("UCS2 coded SPN".to_string()));
    }

    let name: Vec<u8> = data[1..17].iter().copied().take_while(|&b| b != 0xff).collect();
    record.service_provider_name = String::from_utf8_lossy(&name).into_owned();

    log::info!("received SPN {} from SIM", record.service_provider_name);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_spn() {
        let mut data = vec![0x01];
        data.extend_from_slice(b"Test Net");
        data.resize(17, 0xff);

        let mut record = SubscriberRecord::new();
        decode_spn(&mut record, &data).unwrap();
        assert_eq!(record.service_provider_name, "Test Net");
    }

    #[test]
    fn test_decode_spn_rejects_ucs2() {
        let mut data = vec![0x01, 0x80];
        data.resize(17, 0xff);
        let mut record = SubscriberRecord::new();
        assert!(decode_spn(&mut record, &data).is_err());
    }

    #[test]
    fn test_decode_spn_undersized() {
        let mut record = SubscriberRecord::new();
        assert!(decode_spn(&mut record, &[0u8; 16]).is_err());
    }
}
