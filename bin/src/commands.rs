//! The example programs. Each one is independent of the others.

pub mod options;
pub mod read;

use std::process::ExitCode;

/// How an example program finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    /// The arguments were rejected and a diagnostic was printed.
    UsageError,
}

impl Status {
    /// Process exit code: 0 on success, 1 on a usage error.
    pub fn code(self) -> u8 {
        match self {
            Status::Success => 0,
            Status::UsageError => 1,
        }
    }
}

impl From<Status> for ExitCode {
    fn from(status: Status) -> Self {
        ExitCode::from(status.code())
    }
}
