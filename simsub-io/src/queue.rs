//! Channels between the subsystem and the external card I/O endpoint
//!
//! The subsystem never blocks on the card: jobs go out through an
//! unbounded sender and the endpoint delivers responses on its own pace.

use crate::job::SimJob;
use crate::response::SimJobResponse;
use simsub_core::{SimError, SimResult};
use tokio::sync::mpsc;

/// Sending half of the job queue, held by the subsystem
#[derive(Debug, Clone)]
pub struct JobSender {
    tx: mpsc::UnboundedSender<SimJob>,
}

impl JobSender {
    /// Hand a job to the endpoint; returns immediately
    pub fn submit(&self, job: SimJob) -> SimResult<()> {
        log::debug!(
            "submitting {} job for file 0x{:04x} ({})",
            job.handle,
            job.file,
            job.generation
        );
        self.tx
            .send(job)
            .map_err(|_| SimError::Channel("card I/O endpoint is gone".to_string()))
    }
}

/// Create the job queue; the receiver goes to the I/O endpoint
pub fn job_channel() -> (JobSender, mpsc::UnboundedReceiver<SimJob>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (JobSender { tx }, rx)
}

/// Create the response path; the sender goes to the I/O endpoint
pub fn response_channel() -> (
    mpsc::UnboundedSender<SimJobResponse>,
    mpsc::UnboundedReceiver<SimJobResponse>,
) {
    mpsc::unbounded_channel()
}
