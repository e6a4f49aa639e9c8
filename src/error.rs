//! Failure taxonomy.
//!
//! Every operation in this crate either returns a value or one of these
//! failures; nothing here logs, retries or panics. `AccessDenied` is the
//! expected negative outcome of a check and not a fault. The caller decides
//! whether it becomes an audit record, a protocol error or a retry.

use parsing::InvalidSidFormat;
use thiserror::Error;

/// Errors produced by the security model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SecurityError {
    /// The requested access was not granted. One denied bit fails the whole
    /// request, and a bit no entry allowed is denied by default.
    #[error("access denied")]
    AccessDenied,
    /// `SYSTEM_SECURITY` access was requested without the security
    /// privilege.
    #[error("privilege not held")]
    PrivilegeNotHeld,
    /// A delete found no entry for the given trustee, or no list to delete
    /// from.
    #[error("no matching entry")]
    NotFound,
    /// A SID string could not be parsed.
    #[error(transparent)]
    InvalidSidFormat(#[from] InvalidSidFormat),
    /// An extended-right GUID string could not be parsed.
    #[error("invalid GUID string")]
    InvalidGuidFormat,
}
