//! cirruslink — device-side client library for the Cirrus IoT cloud.
//!
//! Telemetry values flow out through the stream gateway; remote calls flow
//! back in through the RPC method table. The assist module ties the two
//! together: it publishes a query on the stream channel and completes it
//! later when the matching answer arrives as an inbound RPC.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        cirruslink                            │
//! │                                                              │
//! │  ┌─────────┐    ┌───────────────┐    ┌────────────────────┐ │
//! │  │  value  │───▶│    stream     │───▶│  Transport (trait) │ │
//! │  │ (encode)│    │   (gateway)   │    │ network / retries  │ │
//! │  └─────────┘    └───────────────┘    └────────────────────┘ │
//! │                        ▲                        │            │
//! │                        │ query                  │ inbound    │
//! │                  ┌──────────┐    answer   ┌──────────┐      │
//! │                  │  assist  │◀────────────│   rpc    │      │
//! │                  │ (ask/rsp)│             │ (table)  │      │
//! │                  └──────────┘             └──────────┘      │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Connection establishment, credentials and retransmission are owned by
//! the [`transport::Transport`] implementation, not by this crate.

#![deny(unused_must_use)]

pub mod assist;
pub mod rpc;
pub mod stream;
pub mod transport;
pub mod value;

mod error;

pub use error::{Error, Result};
