//! Stream gateway — the single entry point for outbound telemetry.
//!
//! Every publish, typed or raw, passes through [`set`], which applies the
//! stream path prefix and delegates to the transport. The typed setters
//! encode via [`TypedValue`] and publish as JSON; raw setters take an
//! explicit content type (e.g. CBOR for pre-serialized maps).
//!
//! Async setters return as soon as the request is accepted for sending and
//! report the network outcome through an optional completion. Sync setters
//! block the caller inside the transport until a terminal status or the
//! timeout, whichever comes first.

use core::time::Duration;

use log::debug;

use crate::error::Result;
use crate::transport::{ContentType, SendCallback, SendMode, SendRequest, Transport};
use crate::value::TypedValue;

/// All telemetry lives under this reserved subtree, distinct from other
/// data classes such as device state.
pub const STREAM_PATH_PREFIX: &str = ".s/";

/// Publish a payload on the stream channel.
///
/// Applies [`STREAM_PATH_PREFIX`] and hands the request to the transport.
/// Transport statuses pass through verbatim; no retry happens here.
pub fn set<T: Transport>(
    transport: &mut T,
    path: &str,
    content_type: ContentType,
    payload: &[u8],
    mode: SendMode,
) -> Result<()> {
    let full_path = format!("{STREAM_PATH_PREFIX}{path}");
    debug!(
        "stream set {} ({} bytes, {}, {})",
        full_path,
        payload.len(),
        content_type.mime(),
        if mode.is_sync() { "sync" } else { "async" },
    );
    transport.send(SendRequest {
        path: &full_path,
        content_type,
        payload,
        mode,
    })
}

// ── Typed setters, async ─────────────────────────────────────

pub fn set_int_async<T: Transport>(
    transport: &mut T,
    path: &str,
    value: i32,
    completion: Option<SendCallback>,
) -> Result<()> {
    let payload = TypedValue::Int(value).encode();
    set(transport, path, ContentType::Json, &payload, SendMode::Async(completion))
}

pub fn set_bool_async<T: Transport>(
    transport: &mut T,
    path: &str,
    value: bool,
    completion: Option<SendCallback>,
) -> Result<()> {
    let payload = TypedValue::Bool(value).encode();
    set(transport, path, ContentType::Json, &payload, SendMode::Async(completion))
}

pub fn set_float_async<T: Transport>(
    transport: &mut T,
    path: &str,
    value: f32,
    completion: Option<SendCallback>,
) -> Result<()> {
    let payload = TypedValue::Float(value).encode();
    set(transport, path, ContentType::Json, &payload, SendMode::Async(completion))
}

pub fn set_string_async<T: Transport>(
    transport: &mut T,
    path: &str,
    value: &str,
    completion: Option<SendCallback>,
) -> Result<()> {
    let payload = TypedValue::Str(value).encode();
    set(transport, path, ContentType::Json, &payload, SendMode::Async(completion))
}

/// Publish a pre-serialized payload asynchronously.
pub fn set_async<T: Transport>(
    transport: &mut T,
    path: &str,
    content_type: ContentType,
    payload: &[u8],
    completion: Option<SendCallback>,
) -> Result<()> {
    set(transport, path, content_type, payload, SendMode::Async(completion))
}

// ── Typed setters, sync ──────────────────────────────────────

pub fn set_int_sync<T: Transport>(
    transport: &mut T,
    path: &str,
    value: i32,
    timeout: Duration,
) -> Result<()> {
    let payload = TypedValue::Int(value).encode();
    set(transport, path, ContentType::Json, &payload, SendMode::Sync(timeout))
}

pub fn set_bool_sync<T: Transport>(
    transport: &mut T,
    path: &str,
    value: bool,
    timeout: Duration,
) -> Result<()> {
    let payload = TypedValue::Bool(value).encode();
    set(transport, path, ContentType::Json, &payload, SendMode::Sync(timeout))
}

pub fn set_float_sync<T: Transport>(
    transport: &mut T,
    path: &str,
    value: f32,
    timeout: Duration,
) -> Result<()> {
    let payload = TypedValue::Float(value).encode();
    set(transport, path, ContentType::Json, &payload, SendMode::Sync(timeout))
}

pub fn set_string_sync<T: Transport>(
    transport: &mut T,
    path: &str,
    value: &str,
    timeout: Duration,
) -> Result<()> {
    let payload = TypedValue::Str(value).encode();
    set(transport, path, ContentType::Json, &payload, SendMode::Sync(timeout))
}

/// Publish a pre-serialized payload synchronously.
pub fn set_sync<T: Transport>(
    transport: &mut T,
    path: &str,
    content_type: ContentType,
    payload: &[u8],
    timeout: Duration,
) -> Result<()> {
    set(transport, path, content_type, payload, SendMode::Sync(timeout))
}

// ── Tests ────────────────────────────────────────────────────
