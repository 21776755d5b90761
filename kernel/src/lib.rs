// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Core simulation kernel.
//!
//! The kernel crate holds the shared code that simulated chips depend on: the
//! Hardware Interface Layer (HIL) traits a peripheral model implements or
//! consumes, the standard error type, the debug output macros, and the `sim`
//! primitives that stand in for the host simulator (virtual clock, signal
//! lines, system bus).
//!
//! Everything here is single threaded. Peripherals take `&self` and keep
//! their state in `Cell`s, exactly like drivers running on a Tock kernel, and
//! the host serializes every callback on one logical thread.

#[macro_use]
pub mod debug;
pub mod hil;
pub mod sim;
pub mod utilities;

mod config;
mod errorcode;

pub use crate::errorcode::ErrorCode;
