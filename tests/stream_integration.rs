//! Integration tests: typed setters → gateway → transport wire forms.

use cirruslink::stream;
use cirruslink::transport::{ContentType, SendMode, SendRequest, Transport, TransportError};
use cirruslink::{Error, Result};
use core::time::Duration;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

// ── Mock transport ───────────────────────────────────────────

struct SentRecord {
    path: String,
    content_type: ContentType,
    payload: Vec<u8>,
    sync: bool,
    timeout: Option<Duration>,
}

/// Records requests; sync requests resolve with `sync_outcome`, async
/// completions fire with `async_outcome` on a later `drain` call — never
/// from inside `send`, matching the transport contract.
struct MockTransport {
    sent: Vec<SentRecord>,
    pending: Vec<cirruslink::transport::SendCallback>,
    sync_outcome: Result<()>,
    async_outcome: Result<()>,
}

impl MockTransport {
    fn new() -> Self {
        Self {
            sent: Vec::new(),
            pending: Vec::new(),
            sync_outcome: Ok(()),
            async_outcome: Ok(()),
        }
    }

    /// Deliver all outstanding async completions.
    fn drain(&mut self) {
        for cb in self.pending.drain(..) {
            cb(self.async_outcome);
        }
    }
}

impl Transport for MockTransport {
    fn send(&mut self, request: SendRequest<'_>) -> Result<()> {
        let sync = request.mode.is_sync();
        let timeout = match &request.mode {
            SendMode::Sync(t) => Some(*t),
            SendMode::Async(_) => None,
        };
        self.sent.push(SentRecord {
            path: request.path.to_string(),
            content_type: request.content_type,
            payload: request.payload.to_vec(),
            sync,
            timeout,
        });
        match request.mode {
            SendMode::Async(completion) => {
                if let Some(cb) = completion {
                    self.pending.push(cb);
                }
                Ok(())
            }
            SendMode::Sync(_) => self.sync_outcome,
        }
    }
}

// ── Scenarios ────────────────────────────────────────────────

#[test]
fn scalar_wire_forms_are_valid_json() {
    let mut t = MockTransport::new();
    stream::set_int_async(&mut t, "count", -42, None).unwrap();
    stream::set_bool_async(&mut t, "enabled", true, None).unwrap();
    stream::set_float_async(&mut t, "temp", 27.5, None).unwrap();
    stream::set_string_async(&mut t, "state", "running", None).unwrap();

    for record in &t.sent {
        assert_eq!(record.content_type, ContentType::Json);
        let _parsed: serde_json::Value =
            serde_json::from_slice(&record.payload).expect("scalar form must parse as JSON");
    }

    assert_eq!(t.sent[0].payload, b"-42");
    assert_eq!(t.sent[1].payload, b"true");
    assert_eq!(t.sent[2].payload, b"27.500000");
    assert_eq!(t.sent[3].payload, b"\"running\"");
}

#[test]
fn every_publish_lands_under_stream_prefix() {
    let mut t = MockTransport::new();
    stream::set_int_async(&mut t, "sensors/temp", 1, None).unwrap();
    stream::set_sync(&mut t, "raw", ContentType::OctetStream, &[0xff], Duration::from_secs(1))
        .unwrap();
    assert_eq!(t.sent[0].path, ".s/sensors/temp");
    assert_eq!(t.sent[1].path, ".s/raw");
}

#[test]
fn sync_timeout_reaches_the_transport() {
    let mut t = MockTransport::new();
    stream::set_float_sync(&mut t, "temp", 1.0, Duration::from_secs(7)).unwrap();
    assert!(t.sent[0].sync);
    assert_eq!(t.sent[0].timeout, Some(Duration::from_secs(7)));
}

#[test]
fn async_completion_fires_later_exactly_once() {
    let mut t = MockTransport::new();
    let hits = Arc::new(AtomicU32::new(0));
    let hits2 = Arc::clone(&hits);

    stream::set_string_async(
        &mut t,
        "state",
        "boot",
        Some(Box::new(move |status| {
            assert_eq!(status, Ok(()));
            hits2.fetch_add(1, Ordering::SeqCst);
        })),
    )
    .unwrap();

    // Accepted, but not yet resolved.
    assert_eq!(hits.load(Ordering::SeqCst), 0);
    t.drain();
    assert_eq!(hits.load(Ordering::SeqCst), 1);
    t.drain();
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[test]
fn async_network_failure_reported_through_completion() {
    let mut t = MockTransport::new();
    t.async_outcome = Err(Error::Transport(TransportError::Io));

    let seen = Arc::new(AtomicU32::new(0));
    let seen2 = Arc::clone(&seen);
    let accepted = stream::set_int_async(
        &mut t,
        "count",
        1,
        Some(Box::new(move |status| {
            assert_eq!(status, Err(Error::Transport(TransportError::Io)));
            seen2.fetch_add(1, Ordering::SeqCst);
        })),
    );

    // Acceptance status says nothing about the exchange outcome.
    assert!(accepted.is_ok());
    t.drain();
    assert_eq!(seen.load(Ordering::SeqCst), 1);
}

#[test]
fn sync_failure_statuses_pass_through_verbatim() {
    let mut t = MockTransport::new();
    t.sync_outcome = Err(Error::Transport(TransportError::NotConnected));
    assert_eq!(
        stream::set_bool_sync(&mut t, "x", false, Duration::from_secs(1)),
        Err(Error::Transport(TransportError::NotConnected)),
    );

    t.sync_outcome = Err(Error::Timeout);
    assert_eq!(
        stream::set_bool_sync(&mut t, "x", false, Duration::from_secs(1)),
        Err(Error::Timeout),
    );
}

#[test]
fn raw_cbor_payload_unmodified() {
    let mut t = MockTransport::new();
    let cbor = [0xa1, 0x61, 0x71, 0x63, 0x6d, 0x61, 0x78]; // {"q": "max"}
    stream::set_async(&mut t, "events", ContentType::Cbor, &cbor, None).unwrap();
    assert_eq!(t.sent[0].payload, cbor);
    assert_eq!(t.sent[0].content_type, ContentType::Cbor);
}
