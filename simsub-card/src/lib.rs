//! Card backends and the subscriber manager
//!
//! This crate ties the data model, the file codecs and the job queue
//! together: the [`SubscriberManager`] owns the subscriber record, drives
//! the attach state machine over the configured backend (local reader,
//! synthetic test card or remote relay) and publishes typed events to the
//! rest of the station.

pub mod auth;
pub mod config;
pub mod events;
pub mod manager;
mod reader;
mod relay;
mod testcard;

pub use auth::{generate_vector, AuthAlgorithm, AuthVector, DUMMY_SRES};
pub use config::{imsi_valid, SimSettings, TestCardConfig, TestCardGprs};
pub use events::{event_channel, notify_channel, EventSender, Notifier, SubscriberEvent};
pub use manager::SubscriberManager;
