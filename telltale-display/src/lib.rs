//! Display panel command channel for the Telltale instrument cluster
//!
//! The panel is a smart serial display: every operation is a short text
//! command terminated by a fixed 3-byte sequence. Setting a field's text,
//! changing its color, and panel housekeeping all share this one channel,
//! and nothing is ever read back - writes are fire-and-forget.
//!
//! This crate provides:
//! - [`command`]: building the panel's wire commands
//! - [`link`]: the non-blocking byte-sink trait the board supplies

#![no_std]
#![deny(unsafe_code)]

pub mod command;
pub mod link;

pub use command::{
    color_command, raw_command, text_command, Color, CommandBuf, CommandError,
    COMMAND_TERMINATOR, MAX_COMMAND_LEN,
};
pub use link::DisplayLink;
