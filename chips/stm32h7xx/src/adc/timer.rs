// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Sampling and conversion latency.
//!
//! A single-shot wrapper around a HIL alarm. The converter is the alarm's
//! client; an expiry is handled exactly like a qualifying trigger edge.

use core::cell::Cell;

use kernel::hil::time::{Alarm, Ticks};
use kernel::ErrorCode;

pub struct ConversionTimer<'a, A: Alarm<'a>> {
    alarm: &'a A,
    latency: Cell<A::Ticks>,
}

impl<'a, A: Alarm<'a>> ConversionTimer<'a, A> {
    pub fn new(alarm: &'a A, latency: u32) -> ConversionTimer<'a, A> {
        ConversionTimer {
            alarm,
            latency: Cell::new(A::Ticks::from(latency)),
        }
    }

    /// Schedule a completion one latency from now, replacing any pending one.
    pub fn arm(&self) {
        let latency = self.latency.get().max(self.alarm.minimum_dt());
        self.alarm.set_alarm(self.alarm.now(), latency);
    }

    /// Cancel a pending completion. It will not be delivered.
    pub fn disarm(&self) -> Result<(), ErrorCode> {
        if self.alarm.is_armed() {
            self.alarm.disarm()
        } else {
            Ok(())
        }
    }

    pub fn is_armed(&self) -> bool {
        self.alarm.is_armed()
    }
}
