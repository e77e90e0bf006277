//! Record-based files under DF(Telecom): own number and SMS parameters
//!
//! Both files carry a variable alpha identifier followed by a fixed-size
//! object at the record tail; decoding starts from the tail.

use simsub_core::bcd::decode_bcd;
use simsub_core::{SimError, SimResult, SubscriberRecord};

/// Fixed tail of an EF(MSISDN)/EF(ADN) record: length, TON/NPI,
/// 10 number bytes, capability and extension identifiers
const ADN_TAIL_LEN: usize = 14;

/// Fixed tail of an EF(SMSP) record
const SMSP_TAIL_LEN: usize = 28;

/// Prefix a dialing number according to its type-of-number nibble
fn number_prefix(ton_npi: u8) -> &'static str {
    match (ton_npi & 0x70) >> 4 {
        1 => "+", // international
        2 => "0", // national
        _ => "",
    }
}

/// EF(MSISDN), 0x6F40 under DF(Telecom): the subscriber's own number
pub fn decode_msisdn(record: &mut SubscriberRecord, data: &[u8]) -> SimResult<()> {
    if data.len() < ADN_TAIL_LEN {
        return Err(SimError::Decode(format!(
            "MSISDN record needs {} bytes, got {}",
            ADN_TAIL_LEN,
            data.len()
        )));
    }
    let tail = &data[data.len() - ADN_TAIL_LEN..];
    let len_bcd = tail[0] as usize;

    record.msisdn.clear();
    if len_bcd <= 1 {
        return Ok(());
    }

    let digits = decode_bcd(&tail[2..12], (len_bcd - 1) * 2);
    record.msisdn = format!("{}{}", number_prefix(tail[1]), digits);

    log::info!("received MSISDN {} from SIM", record.msisdn);
    Ok(())
}

/// EF(SMSP), 0x6F42 under DF(Telecom): SMS service-centre address
pub fn decode_smsp(record: &mut SubscriberRecord, data: &[u8]) -> SimResult<()> {
    if data.len() < SMSP_TAIL_LEN {
        return Err(SimError::Decode(format!(
            "SMSP record needs {} bytes, got {}",
            SMSP_TAIL_LEN,
            data.len()
        )));
    }
    let tail = &data[data.len() - SMSP_TAIL_LEN..];
    let par_ind = tail[0];
    let sca = &tail[13..25];

    record.service_center_addr.clear();

    // parameter-indicator bit 1 set means the address is absent
    let sca_len = sca[0] as usize;
    if par_ind & 0x02 == 0 && (2..=11).contains(&sca_len) {
        let digits = decode_bcd(&sca[2..], (sca_len - 1) * 2);
        record.service_center_addr = format!("{}{}", number_prefix(sca[1]), digits);
    }

    log::info!(
        "received SMSP from SIM (sca={})",
        record.service_center_addr
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn adn_record(alpha: &[u8], len_bcd: u8, ton_npi: u8, number: &[u8]) -> Vec<u8> {
        let mut rec = alpha.to_vec();
        let mut tail = vec![len_bcd, ton_npi];
        let mut num = number.to_vec();
        num.resize(10, 0xff);
        tail.extend_from_slice(&num);
        tail.extend_from_slice(&[0xff, 0xff]);
        rec.extend_from_slice(&tail);
        rec
    }

    #[test]
    fn test_decode_msisdn_international() {
        let mut record = SubscriberRecord::new();
        // 491702345678 -> BCD low-first
        let rec = adn_record(b"own\xff\xff\xff", 7, 0x91, &[0x94, 0x71, 0x20, 0x43, 0x65, 0x87]);
        decode_msisdn(&mut record, &rec).unwrap();
        assert_eq!(record.msisdn, "+491702345678");
    }

    #[test]
    fn test_decode_msisdn_empty() {
        let mut record = SubscriberRecord::new();
        record.msisdn = "stale".to_string();
        let rec = adn_record(b"", 0, 0xff, &[]);
        decode_msisdn(&mut record, &rec).unwrap();
        assert_eq!(record.msisdn, "");
    }

    #[test]
    fn test_decode_msisdn_undersized() {
        let mut record = SubscriberRecord::new();
        assert!(decode_msisdn(&mut record, &[0u8; 13]).is_err());
    }

    #[test]
    fn test_decode_smsp() {
        let mut rec = vec![0xffu8; 4];
        let mut tail = vec![0u8; SMSP_TAIL_LEN];
        tail[0] = 0x00;
        // service centre +4917..: length 4 bytes (TON + 3 BCD)
        tail[13] = 4;
        tail[14] = 0x91;
        tail[15] = 0x94;
        tail[16] = 0x71;
        tail[17] = 0x21;
        rec.extend_from_slice(&tail);

        let mut record = SubscriberRecord::new();
        decode_smsp(&mut record, &rec).unwrap();
        assert_eq!(record.service_center_addr, "+491712");
    }

    #[test]
    fn test_decode_smsp_absent_parameter() {
        let mut tail = vec![0u8; SMSP_TAIL_LEN];
        tail[0] = 0x02;
        tail[13] = 4;
        let mut record = SubscriberRecord::new();
        record.service_center_addr = "stale".to_string();
        decode_smsp(&mut record, &tail).unwrap();
        assert_eq!(record.service_center_addr, "");
    }
}
