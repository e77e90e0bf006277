//! EF(ICCID) and EF(IMSI) decoding

use simsub_core::bcd::decode_bcd;
use simsub_core::{SimError, SimResult, SubscriberRecord};

/// EF(ICCID), 0x2FE2 at the card root: the card serial number as BCD
pub fn decode_iccid(record: &mut SubscriberRecord, data: &[u8]) -> SimResult<()> {
    record.iccid = decode_bcd(data, data.len() * 2);
    record.name = format!("sim-{}", record.iccid);
    log::info!("received ICCID {} from SIM", record.iccid);
    Ok(())
}

/// EF(IMSI), 0x6F07 under DF(GSM): length byte plus BCD digits.
///
/// The first digit is parity and is skipped; the remaining 6..=15 digits
/// are the subscriber identity.
pub fn decode_imsi(record: &mut SubscriberRecord, data: &[u8]) -> SimResult<()> {
    let Some(&len) = data.first() else {
        return Err(SimError::Decode("IMSI file is empty".to_string()));
    };
    if (len as usize) + 1 < data.len() {
        return Err(SimError::Decode(format!(
            "invalid IMSI length byte {} for {} payload bytes",
            len,
            data.len()
        )));
    }

    let digits = decode_bcd(&data[1..], len as usize * 2);
    if digits.len() > 16 || digits.len() < 7 {
        return Err(SimError::Decode(format!(
            "IMSI invalid length = {}",
            digits.len().saturating_sub(1)
        )));
    }

    record.imsi = digits[1..].to_string();
    log::info!("received IMSI {} from SIM", record.imsi);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// IMSI 001010000000001 with parity nibble 9, as stored on card
    fn imsi_payload() -> Vec<u8> {
        // length byte, then parity digit 9 followed by the IMSI digits
        vec![0x08, 0x09, 0x10, 0x10, 0x00, 0x00, 0x00, 0x00, 0x10]
    }

    #[test]
    fn test_decode_imsi() {
        let mut record = SubscriberRecord::new();
        decode_imsi(&mut record, &imsi_payload()).unwrap();
        assert_eq!(record.imsi, "001010000000001");
    }

    #[test]
    fn test_decode_imsi_rejects_bad_length_byte() {
        let mut record = SubscriberRecord::new();
        let mut payload = imsi_payload();
        payload[0] = 0x02;
        assert!(decode_imsi(&mut record, &payload).is_err());
    }

    #[test]
    fn test_decode_imsi_rejects_too_short() {
        let mut record = SubscriberRecord::new();
        // only 4 digits after parity
        let payload = vec![0x03, 0x19, 0x32, 0x54];
        assert!(decode_imsi(&mut record, &payload).is_err());
    }

    #[test]
    fn test_decode_iccid() {
        let mut record = SubscriberRecord::new();
        decode_iccid(&mut record, &[0x98, 0x94, 0x10, 0x21, 0xf3]).unwrap();
        assert_eq!(record.iccid, "894901123");
        assert_eq!(record.name, "sim-894901123");
    }
}
