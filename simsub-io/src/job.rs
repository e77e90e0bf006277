//! Card jobs
//!
//! Every card round trip is a `SimJob` submitted to the external I/O
//! endpoint. Jobs carry the logical handle they belong to and the card
//! session generation, so late responses from a removed card can be told
//! apart from responses for the current one.

use bytes::Bytes;
use std::fmt;

/// The three logical job handles
///
/// Handles are independent; each may have at most one outstanding request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandleKind {
    /// Sequential file reads and PIN jobs
    Query,
    /// Write-backs (location info, lists, key file)
    Update,
    /// Authentication runs
    Key,
}

impl fmt::Display for HandleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandleKind::Query => write!(f, "query"),
            HandleKind::Update => write!(f, "update"),
            HandleKind::Key => write!(f, "key"),
        }
    }
}

/// Card session generation token
///
/// Incremented on every card insert. Responses whose generation does not
/// match the current one belong to a superseded session and are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Generation(u32);

impl Generation {
    pub fn new() -> Self {
        Self::default()
    }

    /// The following generation (wrapping)
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "gen#{}", self.0)
    }
}

/// Directory path to an elementary file, empty meaning the card root
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilePath(Vec<u16>);

impl FilePath {
    /// The card root (master file)
    pub fn root() -> Self {
        Self(Vec::new())
    }

    pub fn from_slice(components: &[u16]) -> Self {
        Self(components.to_vec())
    }

    pub fn components(&self) -> &[u16] {
        &self.0
    }
}

impl fmt::Display for FilePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "3F00")?;
        for c in &self.0 {
            write!(f, "/{:04X}", c)?;
        }
        Ok(())
    }
}

/// PIN management operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinOp {
    /// Present PIN1 to unlock the session
    Unlock,
    Enable,
    Disable,
    /// Change PIN1 from the first credential to the second
    Change,
    /// Unblock PIN1 with the unblock code and set a new PIN
    Unblock,
}

/// What the endpoint is asked to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobKind {
    /// Read a transparent file
    ReadBinary,
    /// Read one record of a linear-fixed file
    ReadRecord { record_no: u8 },
    /// Overwrite a transparent file
    UpdateBinary { data: Bytes },
    /// Run the authentication algorithm with a 16-byte challenge
    RunGsmAlgorithm { rand: [u8; 16] },
    /// PIN management, carrying one or two credential strings
    Pin {
        op: PinOp,
        pin1: String,
        pin2: String,
    },
}

/// One request to the card I/O endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimJob {
    pub handle: HandleKind,
    pub generation: Generation,
    pub path: FilePath,
    pub file: u16,
    pub kind: JobKind,
}

impl SimJob {
    pub fn read_binary(
        handle: HandleKind,
        generation: Generation,
        path: FilePath,
        file: u16,
    ) -> Self {
        Self {
            handle,
            generation,
            path,
            file,
            kind: JobKind::ReadBinary,
        }
    }

    pub fn read_record(
        handle: HandleKind,
        generation: Generation,
        path: FilePath,
        file: u16,
        record_no: u8,
    ) -> Self {
        Self {
            handle,
            generation,
            path,
            file,
            kind: JobKind::ReadRecord { record_no },
        }
    }

    pub fn update_binary(
        handle: HandleKind,
        generation: Generation,
        path: FilePath,
        file: u16,
        data: Bytes,
    ) -> Self {
        Self {
            handle,
            generation,
            path,
            file,
            kind: JobKind::UpdateBinary { data },
        }
    }

    pub fn run_gsm_algorithm(generation: Generation, path: FilePath, rand: [u8; 16]) -> Self {
        Self {
            handle: HandleKind::Key,
            generation,
            path,
            file: 0,
            kind: JobKind::RunGsmAlgorithm { rand },
        }
    }

    pub fn pin(generation: Generation, op: PinOp, pin1: &str, pin2: &str) -> Self {
        Self {
            handle: HandleKind::Query,
            generation,
            path: FilePath::root(),
            file: 0,
            kind: JobKind::Pin {
                op,
                pin1: pin1.to_string(),
                pin2: pin2.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_advances() {
        let g = Generation::new();
        assert_ne!(g, g.next());
        assert_eq!(g.next().next(), g.next().next());
    }

    #[test]
    fn test_file_path_display() {
        assert_eq!(FilePath::root().to_string(), "3F00");
        assert_eq!(FilePath::from_slice(&[0x7f20]).to_string(), "3F00/7F20");
    }

    #[test]
    fn test_pin_job_uses_query_handle() {
        let job = SimJob::pin(Generation::new(), PinOp::Unlock, "1234", "");
        assert_eq!(job.handle, HandleKind::Query);
    }
}
