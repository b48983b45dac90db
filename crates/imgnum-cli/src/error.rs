//! Process exit statuses.
//!
//! - 0: Success
//! - 1: Usage error (bad or missing arguments)
//! - 2: Operation failed (I/O, bad container, malformed seal)
//! - 3: `verify`: dimensions differ
//! - 4: `verify` / `checkseal`: digest, metadata or short id mismatch
//! - 5: `batchseal`: one or more files failed

use std::process::ExitCode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum CliExitCode {
    Success = 0,
    Usage = 1,
    Error = 2,
    DimensionMismatch = 3,
    Mismatch = 4,
    PartialFailure = 5,
}

impl From<CliExitCode> for ExitCode {
    fn from(code: CliExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

impl From<CliExitCode> for i32 {
    fn from(code: CliExitCode) -> Self {
        code as i32
    }
}
