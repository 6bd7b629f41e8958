//! Transport abstraction — the seam between this library and the network.
//!
//! Concrete implementations own connection state, security and retry policy.
//! On-device this is typically a CoAP/DTLS client; in tests it is a mock
//! that records every request. The stream gateway and the assist client are
//! generic over `Transport`, so swapping the network layer requires zero
//! changes to the publishing or correlation logic.

use core::fmt;
use core::time::Duration;

use crate::error::Result;

/// Wire tag attached to every published payload.
///
/// Selects how the server interprets the bytes; independent of how the
/// payload was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    /// JSON scalar or document text.
    Json,
    /// Compact binary CBOR.
    Cbor,
    /// Opaque bytes, no server-side parsing.
    OctetStream,
}

impl ContentType {
    /// MIME string used on the wire.
    pub const fn mime(self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::Cbor => "application/cbor",
            Self::OctetStream => "application/octet-stream",
        }
    }
}

/// Completion for an asynchronous send.
///
/// Invoked by the transport exactly once, on the transport's own execution
/// context, with the terminal status of the exchange. Never invoked
/// synchronously from within [`Transport::send`].
pub type SendCallback = Box<dyn FnOnce(Result<()>) + Send>;

/// How a send resolves.
pub enum SendMode {
    /// Return as soon as the request is accepted for sending; the network
    /// outcome is reported later through the completion, if one is given.
    Async(Option<SendCallback>),
    /// Block the calling context until the transport resolves or the
    /// deadline elapses. No callback is involved.
    Sync(Duration),
}

impl SendMode {
    /// `true` for [`SendMode::Sync`].
    pub const fn is_sync(&self) -> bool {
        matches!(self, Self::Sync(_))
    }
}

/// One outbound request, stack-scoped. `path` is already fully prefixed.
pub struct SendRequest<'a> {
    pub path: &'a str,
    pub content_type: ContentType,
    pub payload: &'a [u8],
    pub mode: SendMode,
}

/// Terminal failures originating inside the transport.
///
/// These pass through the gateway verbatim; the library adds no retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportError {
    /// No session with the cloud endpoint.
    NotConnected,
    /// The outbound request queue is full.
    QueueFull,
    /// The exchange failed at the network layer.
    Io,
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotConnected => write!(f, "not connected"),
            Self::QueueFull => write!(f, "send queue full"),
            Self::Io => write!(f, "network I/O failed"),
        }
    }
}

/// Asynchronous, single-outstanding-request send primitive.
pub trait Transport {
    /// Hand one request to the transport.
    ///
    /// For [`SendMode::Async`] the returned status only says whether the
    /// request was accepted for sending; for [`SendMode::Sync`] it is the
    /// terminal status of the exchange, with [`Error::Timeout`] when the
    /// deadline elapsed first.
    ///
    /// [`Error::Timeout`]: crate::Error::Timeout
    fn send(&mut self, request: SendRequest<'_>) -> Result<()>;
}

/// A transport with no session: rejects every request up front.
///
/// Useful as a default before the real connection is brought up. Because
/// requests are rejected before sending, no completion callback is ever
/// owed.
pub struct NullTransport;

impl Transport for NullTransport {
    fn send(&mut self, _request: SendRequest<'_>) -> Result<()> {
        Err(TransportError::NotConnected.into())
    }
}

// ── Tests ────────────────────────────────────────────────────
