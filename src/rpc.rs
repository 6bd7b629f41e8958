//! Inbound RPC substrate — method registration and dispatch.
//!
//! The cloud invokes device methods by name with CBOR-encoded positional
//! parameters. Handlers receive a decoder positioned at the first parameter
//! and an encoder for the response detail map, and report an [`RpcStatus`].
//! Wire framing of the calls themselves (CoAP observe, retries) belongs to
//! the transport; this module only routes decoded calls.

use heapless;
use log::warn;
use minicbor::{Decoder, Encoder};

use crate::error::{Error, Result};

/// Maximum number of registered methods.
pub const MAX_METHODS: usize = 8;

/// Status a handler reports back to the caller. Codes follow the
/// server-side RPC status numbering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum RpcStatus {
    Ok = 0,
    /// No handler registered for the requested method.
    Unknown = 2,
    /// Parameters were malformed or missing.
    InvalidArgument = 3,
    /// The handler failed internally.
    Internal = 13,
}

impl RpcStatus {
    /// Numeric wire code for this status.
    pub const fn code(self) -> u8 {
        self as u8
    }
}

/// A registered method handler.
///
/// First argument: decoder positioned at the first positional parameter.
/// Second argument: encoder inside the (indefinite-length) response detail
/// map; handlers may add key/value pairs or leave it empty.
pub type Handler =
    Box<dyn FnMut(&mut Decoder<'_>, &mut Encoder<&mut Vec<u8>>) -> RpcStatus + Send>;

/// Registration seam used by components that need to receive calls.
pub trait RpcRouter {
    /// Register `handler` under `method`. Fails with
    /// [`Error::InvalidArgument`] if the name is taken and
    /// [`Error::AllocFailed`] if the table is full.
    fn register(&mut self, method: &'static str, handler: Handler) -> Result<()>;
}

struct Registration {
    method: &'static str,
    handler: Handler,
}

/// Bounded `(method name → handler)` table.
///
/// Capacity is fixed at [`MAX_METHODS`]; registrations are never removed.
pub struct MethodTable {
    entries: heapless::Vec<Registration, MAX_METHODS>,
}

impl MethodTable {
    pub fn new() -> Self {
        Self { entries: heapless::Vec::new() }
    }

    /// Number of registered methods.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Route one inbound call.
    ///
    /// `params` is a CBOR array of positional parameters. The response
    /// detail map (possibly empty) is written into `response`.
    pub fn dispatch(&mut self, method: &str, params: &[u8], response: &mut Vec<u8>) -> RpcStatus {
        let Some(entry) = self.entries.iter_mut().find(|e| e.method == method) else {
            warn!("rpc: call to unregistered method {method:?}");
            return RpcStatus::Unknown;
        };

        let mut dec = Decoder::new(params);
        if dec.array().is_err() {
            warn!("rpc: {method:?} called with non-array parameters");
            return RpcStatus::InvalidArgument;
        }

        let mut enc = Encoder::new(response);
        if enc.begin_map().is_err() {
            return RpcStatus::Internal;
        }
        let status = (entry.handler)(&mut dec, &mut enc);
        if enc.end().is_err() {
            return RpcStatus::Internal;
        }
        status
    }
}

impl RpcRouter for MethodTable {
    fn register(&mut self, method: &'static str, handler: Handler) -> Result<()> {
        if self.entries.iter().any(|e| e.method == method) {
            return Err(Error::InvalidArgument);
        }
        self.entries
            .push(Registration { method, handler })
            .map_err(|_| Error::AllocFailed)?;
        Ok(())
    }
}

// ── Tests ────────────────────────────────────────────────────
