// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Hardware agnostic interfaces for time and timers.
//!
//! Peripheral models never block. Anything that takes time (a conversion, a
//! transfer) is modeled by arming an [`Alarm`] on the host's virtual clock and
//! finishing the work from [`AlarmClient::alarm`].

use crate::ErrorCode;
use core::cmp::Ordering;
use core::fmt;

/// An integer type defining the width of a time value, which allows clients
/// to know when wraparound will occur.
pub trait Ticks: Clone + Copy + From<u32> + fmt::Debug + Ord + PartialOrd + Eq {
    /// Converts the type into a `u64`, filling the higher bits with 0 if it
    /// is narrower.
    fn into_u64(self) -> u64;

    /// Add two values, wrapping around on overflow using standard unsigned
    /// arithmetic.
    fn wrapping_add(self, other: Self) -> Self;

    /// Subtract two values, wrapping around on underflow using standard
    /// unsigned arithmetic.
    fn wrapping_sub(self, other: Self) -> Self;

    /// Returns whether the value is in the range of [`start, `end`) using
    /// unsigned arithmetic and considering wraparound. It returns `true` if,
    /// incrementing from `start`, the value will be reached before `end`.
    fn within_range(self, start: Self, end: Self) -> bool;
}

/// 64-bit `Ticks`. The virtual clock never wraps in practice, but the
/// wrapping arithmetic is kept so drivers stay honest.
#[derive(Clone, Copy, Debug)]
pub struct Ticks64(u64);

impl From<u32> for Ticks64 {
    fn from(val: u32) -> Self {
        Ticks64(val as u64)
    }
}

impl From<u64> for Ticks64 {
    fn from(val: u64) -> Self {
        Ticks64(val)
    }
}

impl Ticks for Ticks64 {
    fn into_u64(self) -> u64 {
        self.0
    }

    fn wrapping_add(self, other: Self) -> Self {
        Ticks64(self.0.wrapping_add(other.0))
    }

    fn wrapping_sub(self, other: Self) -> Self {
        Ticks64(self.0.wrapping_sub(other.0))
    }

    fn within_range(self, start: Self, end: Self) -> bool {
        self.wrapping_sub(start).0 < end.wrapping_sub(start).0
    }
}

impl PartialOrd for Ticks64 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Ticks64 {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl PartialEq for Ticks64 {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for Ticks64 {}

/// An abstraction over a monotonic clock.
pub trait Time {
    type Ticks: Ticks;

    /// Returns the current time in hardware clock units.
    fn now(&self) -> Self::Ticks;
}

/// The `Alarm` trait models a single-shot event on a clock.
///
/// Implementers signal [`AlarmClient::alarm`] when the clock reaches
/// `reference + dt`. Arming again replaces any outstanding alarm.
pub trait Alarm<'a>: Time {
    /// Specify the callback for when the alarm fires.
    fn set_alarm_client(&self, client: &'a dyn AlarmClient);

    /// Specify when the callback should be called and enable it. The alarm
    /// fires at `reference + dt`, or as soon as possible if that instant has
    /// already passed. `dt` shorter than [`Alarm::minimum_dt`] is rounded up.
    fn set_alarm(&self, reference: Self::Ticks, dt: Self::Ticks);

    /// Return the current alarm value. This is undefined at boot and
    /// otherwise returns `now + dt` from the last call to `set_alarm`.
    fn get_alarm(&self) -> Self::Ticks;

    /// Disable the alarm and stop it from firing in the future.
    ///
    /// Once `disarm` returns `Ok(())` the client is guaranteed not to see a
    /// callback for the previous `set_alarm`.
    fn disarm(&self) -> Result<(), ErrorCode>;

    /// Returns whether the alarm is currently armed.
    fn is_armed(&self) -> bool;

    /// Return the minimum dt value that is supported.
    fn minimum_dt(&self) -> Self::Ticks;
}

/// Callback handler for when an Alarm fires.
pub trait AlarmClient {
    /// Callback indicating the alarm time has been reached.
    fn alarm(&self);
}
