//! Error types.
//!
//! Two tiers, matching the source's exception split (`itamae.mpdu.parse`):
//! [`Error`] aborts `parse` outright (the mandatory header could not be
//! read); [`Fault`] is a recoverable, per-field diagnostic appended to
//! [`crate::record::MpduRecord::err`] without aborting the overall parse.

use std::fmt;

/// Fatal failure to decode the mandatory `framectrl|duration|addr1` header.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// `framectrl`, `duration` or `addr1` needed more bytes than the buffer held.
    #[error("truncated header: need {need} bytes at offset {offset}, have {have}")]
    Truncated {
        offset: usize,
        need: usize,
        have: usize,
    },
}

/// A single `(location, message)` fault recorded on the output record.
///
/// `location` is a dotted path per the error-handling contract, e.g.
/// `"mgmt.info-elements.eid-48"` or `"l3-crypt.wep"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fault {
    pub location: String,
    pub message: String,
}

impl Fault {
    pub fn new(location: impl Into<String>, message: impl Into<String>) -> Self {
        Fault {
            location: location.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.location, self.message)
    }
}

impl From<Fault> for (String, String) {
    fn from(fault: Fault) -> Self {
        (fault.location, fault.message)
    }
}
