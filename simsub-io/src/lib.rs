//! Job-queue and relay contract for the SIM subscriber subsystem
//!
//! This crate defines the interfaces the subsystem consumes: the card job
//! queue with its three logical handles, the response taxonomy, and the
//! remote-relay collaborator.

pub mod job;
pub mod queue;
pub mod relay;
pub mod response;

pub use job::{FilePath, Generation, HandleKind, JobKind, PinOp, SimJob};
pub use queue::{job_channel, response_channel, JobSender};
pub use relay::{RelayLink, RelayResponse, RelayResponseKind, RelayResult};
pub use response::{ErrorCause, JobError, JobOutcome, SimJobResponse};
