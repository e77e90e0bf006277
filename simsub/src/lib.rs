//! SIM subscriber subsystem for a mobile station
//!
//! This library keeps the in-memory view of the subscriber identity
//! module (IMSI, location information, ciphering key, network lists) in
//! sync with the card behind it and publishes typed events to the rest
//! of the station.
//!
//! # Architecture
//!
//! This library is organized as a workspace with multiple crates:
//!
//! - `simsub-core`: Subscriber record, network identities, BCD codec,
//!   error handling
//! - `simsub-io`: Card job queue, response taxonomy and the remote-relay
//!   contract
//! - `simsub-files`: Elementary-file codecs and the ordered attach table
//! - `simsub-card`: Card backends, the access state machine and the
//!   subscriber manager
//!
//! # Usage
//!
//! ```no_run
//! use simsub::{event_channel, notify_channel, SimSettings, SubscriberManager};
//! use simsub::io::job_channel;
//!
//! # async fn attach() -> simsub::SimResult<()> {
//! let (jobs, _job_rx) = job_channel();
//! let (events, _event_rx) = event_channel();
//! let (notifier, _note_rx) = notify_channel();
//!
//! let mut manager = SubscriberManager::new(SimSettings::default(), jobs, events, notifier);
//! manager.insert_card().await?;
//! # Ok(())
//! # }
//! ```

// Re-export core types
pub use simsub_core::{
    CardKind, GuState, LocationArea, Plmn, RoutingArea, SimError, SimResult, SubscriberRecord,
    UState,
};

// Re-export the manager API
pub use simsub_card::{
    event_channel, notify_channel, AuthAlgorithm, SimSettings, SubscriberEvent, SubscriberManager,
    TestCardConfig,
};

// Re-export the I/O contract
pub mod io {
    pub use simsub_io::*;
}

// Re-export the file codecs and the attach table
pub mod files {
    pub use simsub_files::*;
}
