//! EF(Kc), 0x6F20 under DF(GSM): ciphering key and key sequence

use simsub_core::{SimError, SimResult, SubscriberRecord};

/// Byte length of the file image: 8 key bytes plus one status byte
pub const KC_LEN: usize = 9;

pub fn decode_kc(record: &mut SubscriberRecord, data: &[u8]) -> SimResult<()> {
    if data.len() < KC_LEN {
        return Err(SimError::Decode(format!(
            "Kc needs {} bytes, got {}",
            KC_LEN,
            data.len()
        )));
    }

    record.key.copy_from_slice(&data[0..8]);
    record.set_key_seq(data[8]);

    log::info!("received KEY from SIM");
    Ok(())
}

/// Build the file image for write-back after an authentication run
pub fn encode_kc(key: &[u8; 8], key_seq: u8) -> [u8; KC_LEN] {
    let mut out = [0u8; KC_LEN];
    out[0..8].copy_from_slice(key);
    out[8] = key_seq;
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kc_decode() {
        let mut record = SubscriberRecord::new();
        let image = encode_kc(&[1, 2, 3, 4, 5, 6, 7, 8], 0x0d);
        decode_kc(&mut record, &image).unwrap();
        assert_eq!(record.key, [1, 2, 3, 4, 5, 6, 7, 8]);
        // status byte low 3 bits only
        assert_eq!(record.key_seq, 5);
    }

    #[test]
    fn test_kc_undersized() {
        let mut record = SubscriberRecord::new();
        assert!(decode_kc(&mut record, &[0u8; 8]).is_err());
    }
}
