//! Assist queries — ask on the stream channel, answered over RPC.
//!
//! The query goes out as a CBOR map on a reserved stream path; the answer
//! arrives later as an inbound `assist_rsp` RPC call, on a channel that is
//! structurally unrelated to the publish. The transport offers no native
//! pairing between the two, so this module keeps the correlation state: a
//! single pending slot per [`AssistClient`].
//!
//! The transport-level delivery confirmation of the query and the semantic
//! answer arrive independently and in either order; only the answer
//! completes the request.

use core::cell::RefCell;
use std::sync::Arc;

use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use log::{error, warn};
use minicbor::{Decoder, Encoder};

use crate::error::{Error, Result};
use crate::rpc::{RpcRouter, RpcStatus};
use crate::stream;
use crate::transport::{ContentType, SendMode, Transport};

/// Reserved stream path for outbound queries, distinct from telemetry.
pub const ASSIST_PATH: &str = "assist";

/// Inbound RPC method that delivers answers.
pub const ANSWER_METHOD: &str = "assist_rsp";

/// Upper bound reserved for one encoded query map.
const QUERY_BUF_MAX: usize = 1024;

type AnswerFn = Box<dyn FnOnce(&str) + Send>;

struct Pending {
    answer_capacity: usize,
    on_answer: AnswerFn,
}

/// Correlates one outstanding ask with its eventual answer.
///
/// Owns its pending slot, so independent clients (e.g. per logical channel)
/// can coexist as long as each registers its own answer method. At most one
/// ask may be in flight per client; there is no expiry on an unanswered
/// ask — until the answer arrives, further asks fail with [`Error::Busy`].
pub struct AssistClient {
    // Slot is taken out of the lock before the stored closure runs, so an
    // answer callback never executes inside the critical section.
    slot: Mutex<CriticalSectionRawMutex, RefCell<Option<Pending>>>,
}

impl AssistClient {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            slot: Mutex::new(RefCell::new(None)),
        })
    }

    /// Register the answer handler with the RPC substrate.
    ///
    /// Call once during bring-up, before any [`ask`](Self::ask).
    pub fn init(client: &Arc<Self>, router: &mut impl RpcRouter) -> Result<()> {
        let client = Arc::clone(client);
        router.register(
            ANSWER_METHOD,
            Box::new(move |params, _detail| client.on_answer(params)),
        )
    }

    /// Publish a query and arrange for `on_answer` to receive the reply.
    ///
    /// `answer_capacity` bounds the delivered answer: at most
    /// `answer_capacity - 1` bytes reach the closure (one byte of the
    /// stated capacity stays reserved for a terminator, for parity with
    /// device-side tooling that copies answers into C string buffers).
    ///
    /// Fails with [`Error::Busy`] while a previous ask is unanswered. If
    /// encoding or publishing fails, the slot is rolled back and no
    /// callback will ever fire for this call. On success the closure is
    /// invoked exactly once, on the RPC dispatch context, whenever the
    /// answer arrives — there is no timeout.
    pub fn ask<T: Transport>(
        &self,
        transport: &mut T,
        question: &str,
        data_path: Option<&str>,
        answer_capacity: usize,
        on_answer: impl FnOnce(&str) + Send + 'static,
    ) -> Result<()> {
        if answer_capacity == 0 {
            return Err(Error::InvalidArgument);
        }

        self.slot.lock(|slot| {
            let mut slot = slot.borrow_mut();
            if slot.is_some() {
                return Err(Error::Busy);
            }
            *slot = Some(Pending {
                answer_capacity,
                on_answer: Box::new(on_answer),
            });
            Ok(())
        })?;

        let query = match encode_query(question, data_path) {
            Ok(q) => q,
            Err(e) => {
                self.clear_slot();
                return Err(e);
            }
        };

        match stream::set(
            transport,
            ASSIST_PATH,
            ContentType::Cbor,
            &query,
            SendMode::Async(None),
        ) {
            Ok(()) => Ok(()),
            Err(e) => {
                // The query never left; no answer will ever come.
                self.clear_slot();
                Err(e)
            }
        }
    }

    /// `true` while an ask awaits its answer.
    pub fn is_awaiting(&self) -> bool {
        self.slot.lock(|slot| slot.borrow().is_some())
    }

    fn clear_slot(&self) {
        self.slot.lock(|slot| {
            let _ = slot.borrow_mut().take();
        });
    }

    /// Inbound `assist_rsp` handler body.
    fn on_answer(&self, params: &mut Decoder<'_>) -> RpcStatus {
        let text = match params.str() {
            Ok(t) => t,
            Err(e) => {
                error!("assist: failed to decode answer: {e}");
                return RpcStatus::InvalidArgument;
            }
        };

        let Some(pending) = self.slot.lock(|slot| slot.borrow_mut().take()) else {
            // Duplicate or unsolicited answer; accepted, not a protocol error.
            warn!("assist: answer received but no ask pending");
            return RpcStatus::Ok;
        };

        (pending.on_answer)(clamp_answer(text, pending.answer_capacity));
        RpcStatus::Ok
    }
}

/// Truncate an answer to fit a stated buffer capacity.
///
/// At most `capacity - 1` bytes survive; if the cut would split a UTF-8
/// code point it backs off to the previous character boundary. This is the
/// single place the truncation policy lives.
pub fn clamp_answer(text: &str, capacity: usize) -> &str {
    let max = capacity.saturating_sub(1);
    if text.len() <= max {
        return text;
    }
    let mut end = max;
    while end > 0 && !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

fn encode_query(question: &str, data_path: Option<&str>) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    buf.try_reserve(QUERY_BUF_MAX).map_err(|_| Error::AllocFailed)?;

    let mut enc = Encoder::new(&mut buf);
    enc.map(2)?;
    enc.str("path")?;
    match data_path {
        Some(p) => enc.str(p)?,
        None => enc.null()?,
    };
    enc.str("q")?;
    enc.str(question)?;
    Ok(buf)
}

// ── Tests ────────────────────────────────────────────────────
