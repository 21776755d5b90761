// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Virtual time shared by every simulated peripheral.
//!
//! `VirtualClock` counts 1 MHz ticks and only moves when the host advances
//! it. Each `VirtualAlarm` registered with the clock behaves like one
//! hardware compare channel: arming it schedules a callback, disarming it
//! guarantees the callback will not be delivered. Expired alarms are delivered in time order
//! from a loop, so a client that re-arms itself from its callback never grows
//! the stack.
//!
//! Usage
//! -----
//!
//! ```rust
//! use kernel::hil::time::{Alarm, AlarmClient, Ticks64};
//! use kernel::sim::clock::{VirtualAlarm, VirtualClock};
//!
//! struct Blinker;
//! impl AlarmClient for Blinker {
//!     fn alarm(&self) {}
//! }
//!
//! let clock = VirtualClock::new();
//! let alarm = VirtualAlarm::new(&clock);
//! alarm.setup();
//! let blinker = Blinker;
//! alarm.set_alarm_client(&blinker);
//! alarm.set_alarm(clock.now(), Ticks64::from(10u32));
//! assert_eq!(clock.advance(10), 1);
//! ```

use core::cell::{Cell, RefCell};

use crate::hil::time::{self, Alarm, Ticks, Ticks64, Time};
use crate::utilities::cells::OptionalCell;
use crate::ErrorCode;

pub struct VirtualClock<'a> {
    now: Cell<Ticks64>,
    alarms: RefCell<Vec<&'a VirtualAlarm<'a>>>,
}

impl<'a> VirtualClock<'a> {
    pub fn new() -> VirtualClock<'a> {
        VirtualClock {
            now: Cell::new(Ticks64::from(0u32)),
            alarms: RefCell::new(Vec::new()),
        }
    }

    pub fn now(&self) -> Ticks64 {
        self.now.get()
    }

    fn register(&self, alarm: &'a VirtualAlarm<'a>) {
        self.alarms.borrow_mut().push(alarm);
    }

    /// The earliest armed alarm expiring at or before `deadline`. Ties go to
    /// the alarm registered first.
    fn next_expired(&self, deadline: Ticks64) -> Option<&'a VirtualAlarm<'a>> {
        self.alarms
            .borrow()
            .iter()
            .filter(|alarm| alarm.armed.get() && alarm.expiry.get() <= deadline)
            .min_by_key(|alarm| alarm.expiry.get())
            .copied()
    }

    /// Move time forward to `deadline`, firing every alarm that expires on
    /// the way, including alarms armed by earlier callbacks. Returns how many
    /// callbacks were delivered.
    pub fn run_until(&self, deadline: Ticks64) -> usize {
        let mut fired = 0;
        while let Some(alarm) = self.next_expired(deadline) {
            if alarm.expiry.get() > self.now.get() {
                self.now.set(alarm.expiry.get());
            }
            alarm.armed.set(false);
            alarm.client.map(|client| client.alarm());
            fired += 1;
        }
        if deadline > self.now.get() {
            self.now.set(deadline);
        }
        fired
    }

    /// Advance the clock by `ticks`. See [`VirtualClock::run_until`].
    pub fn advance(&self, ticks: u64) -> usize {
        let deadline = Ticks64::from(self.now.get().into_u64().saturating_add(ticks));
        self.run_until(deadline)
    }

    /// Jump to the next pending expiry and deliver it. Returns `false` when
    /// no alarm is armed.
    pub fn run_next(&self) -> bool {
        let next = self
            .alarms
            .borrow()
            .iter()
            .filter(|alarm| alarm.armed.get())
            .map(|alarm| alarm.expiry.get())
            .min();
        match next {
            Some(expiry) => {
                self.run_until(expiry);
                true
            }
            None => false,
        }
    }
}

impl Default for VirtualClock<'_> {
    fn default() -> Self {
        Self::new()
    }
}

pub struct VirtualAlarm<'a> {
    clock: &'a VirtualClock<'a>,
    expiry: Cell<Ticks64>,
    armed: Cell<bool>,
    client: OptionalCell<&'a dyn time::AlarmClient>,
}

impl<'a> VirtualAlarm<'a> {
    pub fn new(clock: &'a VirtualClock<'a>) -> VirtualAlarm<'a> {
        VirtualAlarm {
            clock,
            expiry: Cell::new(Ticks64::from(0u32)),
            armed: Cell::new(false),
            client: OptionalCell::empty(),
        }
    }

    /// Register this alarm with its clock. Must be called once before the
    /// alarm can fire.
    pub fn setup(&'a self) {
        self.clock.register(self);
    }
}

impl Time for VirtualAlarm<'_> {
    type Ticks = Ticks64;

    fn now(&self) -> Ticks64 {
        self.clock.now()
    }
}

impl<'a> Alarm<'a> for VirtualAlarm<'a> {
    fn set_alarm_client(&self, client: &'a dyn time::AlarmClient) {
        self.client.set(client);
    }

    fn set_alarm(&self, reference: Ticks64, dt: Ticks64) {
        let dt = if dt < self.minimum_dt() {
            self.minimum_dt()
        } else {
            dt
        };
        let mut expire = reference.wrapping_add(dt);
        let now = self.now();
        if !now.within_range(reference, expire) {
            // Already in the past: fire as soon as possible.
            expire = now.wrapping_add(self.minimum_dt());
        }
        self.expiry.set(expire);
        self.armed.set(true);
    }

    fn get_alarm(&self) -> Ticks64 {
        self.expiry.get()
    }

    fn disarm(&self) -> Result<(), ErrorCode> {
        self.armed.set(false);
        Ok(())
    }

    fn is_armed(&self) -> bool {
        self.armed.get()
    }

    fn minimum_dt(&self) -> Ticks64 {
        Ticks64::from(1u32)
    }
}
