// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Stand-ins for the host simulator's collaborators.
//!
//! A peripheral model only ever sees the HIL traits. These types implement
//! those traits on the host side so models can be wired together and driven
//! deterministically from tests and board files:
//!
//! - [`clock::VirtualClock`] and [`clock::VirtualAlarm`]: virtual time and
//!   single-shot alarms scheduled on it.
//! - [`line::SignalLine`]: a single-bit wire that records its level and
//!   rising edges, and forwards changes to a listening model.
//! - [`bus::SystemBus`]: address decoding from absolute addresses to the
//!   register window of the device that owns them.

pub mod bus;
pub mod clock;
pub mod line;
