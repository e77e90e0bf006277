//! Elementary-file codecs for the SIM subscriber subsystem
//!
//! One module per file family, plus the fixed ordered table driving the
//! attach read sequence. Decoders validate payload length before
//! interpreting structure and mutate the subscriber record in place.

pub mod identity;
pub mod kc;
pub mod loci;
pub mod locigprs;
pub mod network;
pub mod phonebook;
pub mod spn;
pub mod table;

pub use table::{DecodeFn, FileEntry, FileJob, DF_GSM, DF_TELECOM, FILE_TABLE, MF};
