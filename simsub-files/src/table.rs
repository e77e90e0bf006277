//! The fixed ordered read table
//!
//! Card attachment walks this table front to back, one file at a time.
//! The order is significant: later optional reads may rely on earlier
//! mandatory fields (the IMSI in particular) being populated already.
//! Reordering or parallelizing the reads is not permitted.

use crate::{identity, kc, loci, locigprs, network, phonebook, spn};
use simsub_core::{SimResult, SubscriberRecord};

/// GSM directory
pub const DF_GSM: &[u16] = &[0x7f20];
/// Telecom directory
pub const DF_TELECOM: &[u16] = &[0x7f10];
/// The card root
pub const MF: &[u16] = &[];

/// How a table entry is fetched from the card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileJob {
    ReadBinary,
    /// Read record 1 of a linear-fixed file
    ReadRecord,
}

/// Decode behavior of a table entry: pure function from payload to a
/// record mutation result
pub type DecodeFn = fn(&mut SubscriberRecord, &[u8]) -> SimResult<()>;

/// One elementary file the attach sequence reads
pub struct FileEntry {
    /// A failure on a mandatory file invalidates the card
    pub mandatory: bool,
    pub path: &'static [u16],
    pub file: u16,
    pub job: FileJob,
    pub decode: DecodeFn,
}

/// Attach read sequence, in on-card read order
pub static FILE_TABLE: &[FileEntry] = &[
    FileEntry {
        mandatory: true,
        path: MF,
        file: 0x2fe2,
        job: FileJob::ReadBinary,
        decode: identity::decode_iccid,
    },
    FileEntry {
        mandatory: true,
        path: DF_GSM,
        file: 0x6f07,
        job: FileJob::ReadBinary,
        decode: identity::decode_imsi,
    },
    FileEntry {
        mandatory: true,
        path: DF_GSM,
        file: 0x6f7e,
        job: FileJob::ReadBinary,
        decode: loci::decode_loci,
    },
    FileEntry {
        mandatory: true,
        path: DF_GSM,
        file: 0x6f53,
        job: FileJob::ReadBinary,
        decode: locigprs::decode_locigprs,
    },
    FileEntry {
        mandatory: false,
        path: DF_GSM,
        file: 0x6f20,
        job: FileJob::ReadBinary,
        decode: kc::decode_kc,
    },
    FileEntry {
        mandatory: false,
        path: DF_GSM,
        file: 0x6f30,
        job: FileJob::ReadBinary,
        decode: network::decode_plmnsel,
    },
    FileEntry {
        mandatory: false,
        path: DF_GSM,
        file: 0x6f31,
        job: FileJob::ReadBinary,
        decode: network::decode_hpplmn,
    },
    FileEntry {
        mandatory: false,
        path: DF_GSM,
        file: 0x6f46,
        job: FileJob::ReadBinary,
        decode: spn::decode_spn,
    },
    FileEntry {
        mandatory: false,
        path: DF_GSM,
        file: 0x6f78,
        job: FileJob::ReadBinary,
        decode: network::decode_acc,
    },
    FileEntry {
        mandatory: false,
        path: DF_GSM,
        file: 0x6f7b,
        job: FileJob::ReadBinary,
        decode: network::decode_fplmn,
    },
    FileEntry {
        mandatory: false,
        path: DF_TELECOM,
        file: 0x6f40,
        job: FileJob::ReadRecord,
        decode: phonebook::decode_msisdn,
    },
    FileEntry {
        mandatory: false,
        path: DF_TELECOM,
        file: 0x6f42,
        job: FileJob::ReadRecord,
        decode: phonebook::decode_smsp,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_order() {
        let files: Vec<u16> = FILE_TABLE.iter().map(|e| e.file).collect();
        assert_eq!(
            files,
            vec![
                0x2fe2, 0x6f07, 0x6f7e, 0x6f53, 0x6f20, 0x6f30, 0x6f31, 0x6f46, 0x6f78, 0x6f7b,
                0x6f40, 0x6f42
            ]
        );
    }

    #[test]
    fn test_mandatory_prefix() {
        // the first four entries are mandatory, everything after is optional
        for (i, entry) in FILE_TABLE.iter().enumerate() {
            assert_eq!(entry.mandatory, i < 4, "entry 0x{:04x}", entry.file);
        }
    }

    #[test]
    fn test_record_reads_are_telecom_files() {
        for entry in FILE_TABLE {
            if entry.job == FileJob::ReadRecord {
                assert_eq!(entry.path, DF_TELECOM);
            }
        }
    }
}
