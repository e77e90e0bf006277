//! Core types and utilities for the SIM subscriber subsystem
//!
//! This crate provides the subscriber data model, PLMN and area identities,
//! BCD decoding and the error type used throughout the implementation.

pub mod bcd;
pub mod error;
pub mod forbidden;
pub mod plmn;
pub mod record;
pub mod state;

pub use error::{PinState, SimError, SimResult};
pub use forbidden::{ForbiddenCause, ForbiddenEntry, ForbiddenPlmnList, FPLMN_CARD_SLOTS};
pub use plmn::{LocationArea, Plmn, RoutingArea, PLMN_SENTINEL};
pub use record::{CardKind, GprsRecord, SubscriberRecord, KEY_SEQ_INVALID, RESERVED_TMSI};
pub use state::{GuState, UState};
