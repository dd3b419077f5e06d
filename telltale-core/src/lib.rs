//! Board-agnostic telemetry core for the Telltale instrument cluster
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Cooperative periodic-tick scheduler
//! - Gauge model: fixed-point formatting, threshold color classification,
//!   write debouncing, staleness watchdog
//! - Gauge registry and dashboard configuration
//! - Status LED auto-off logic
//! - Hardware abstraction traits (bus, wall clock, sensors, LED pin)
//! - Dashboard controller tying it all together, one pass per invocation
//!
//! Everything runs on one logical thread of control: the board's run loop
//! calls [`controller::DashBoard::poll`] repeatedly and nothing here blocks.

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod controller;
pub mod gauge;
pub mod led;
pub mod tick;
pub mod traits;

#[cfg(test)]
pub(crate) mod testutil;
