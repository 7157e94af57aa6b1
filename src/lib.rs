//! Soil watcher library.
//!
//! Exposes the control loop, its ports, and the Linux adapters for
//! integration testing.  The binary in `main.rs` only wires them together.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod classify;
pub mod cli;
pub mod config;
pub mod error;
pub mod fsm;
pub mod pins;
pub mod sensors;
