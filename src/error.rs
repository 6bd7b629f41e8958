//! Unified error type for the client library.
//!
//! A single `Error` enum that every subsystem converts into, keeping error
//! handling uniform for callers that mix stream publishes with assist
//! queries. All variants are `Copy` so statuses can be passed through
//! completion callbacks without allocation.

use core::fmt;

use crate::transport::TransportError;

/// Every fallible operation in the library funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// An assist query is already in flight; only one may be outstanding.
    Busy,
    /// A value or CBOR payload could not be encoded.
    Serialize,
    /// A transient buffer or table slot could not be obtained.
    AllocFailed,
    /// Malformed input (inbound RPC parameters, zero-sized answer buffer,
    /// duplicate method registration).
    InvalidArgument,
    /// A synchronous send exceeded its deadline.
    Timeout,
    /// Terminal status from the transport, passed through verbatim.
    Transport(TransportError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Busy => write!(f, "request already in flight"),
            Self::Serialize => write!(f, "serialization failed"),
            Self::AllocFailed => write!(f, "allocation failed"),
            Self::InvalidArgument => write!(f, "invalid argument"),
            Self::Timeout => write!(f, "timed out"),
            Self::Transport(e) => write!(f, "transport: {e}"),
        }
    }
}

impl From<TransportError> for Error {
    fn from(e: TransportError) -> Self {
        Self::Transport(e)
    }
}

// CBOR encoding into a Vec cannot fail at the writer level; any error from
// the encoder is a serialization failure.
impl From<minicbor::encode::Error<core::convert::Infallible>> for Error {
    fn from(_: minicbor::encode::Error<core::convert::Infallible>) -> Self {
        Self::Serialize
    }
}

/// Library-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
