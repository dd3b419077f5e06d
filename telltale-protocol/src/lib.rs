//! Engine-controller bus wire contract for the Telltale instrument cluster
//!
//! This crate defines the frame formats exchanged with the engine controller
//! over the vehicle bus, and the pure decode step that turns a received frame
//! into an effect on the dashboard.
//!
//! # Protocol Overview
//!
//! The engine controller broadcasts fixed-size telemetry frames, each tagged
//! with a numeric identifier and carrying up to 8 payload bytes:
//! ```text
//! ┌────────────┬──────────┬───────────────┐
//! │ IDENTIFIER │ EXTENDED │ PAYLOAD       │
//! │ u32        │ bool     │ 0–8B          │
//! └────────────┴──────────┴───────────────┘
//! ```
//!
//! Multi-byte fields are big-endian on the wire. The identifier-to-field
//! mapping is a fixed table ([`decode`]); a handful of identifiers carry
//! non-gauge semantics (wall-clock request/set, knock warning) and are
//! represented as explicit [`FrameEffect`] variants instead.
//!
//! The cluster also transmits: two analog-sample telemetry pages and the
//! wall-clock broadcast reply. Their layouts live here so both directions of
//! the wire contract stay in one crate.

#![no_std]
#![deny(unsafe_code)]

pub mod clock;
pub mod decode;
pub mod frame;
pub mod telemetry;

pub use clock::DateTime;
pub use decode::{decode, DecodeError, FrameEffect, GaugeId, GaugeUpdate};
pub use frame::{BusFrame, FrameError, MAX_FRAME_DATA};
pub use telemetry::{sample_page, SAMPLE_PAGE_HIGH_ID, SAMPLE_PAGE_LOW_ID};
