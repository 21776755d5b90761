// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! A single-bit wire between two models.

use core::cell::Cell;

use crate::hil::gpio;
use crate::utilities::cells::OptionalCell;

/// A wire with a current level and a count of rising edges.
///
/// The driving side uses [`gpio::Output`]. The receiving side either samples
/// the level through [`gpio::Input`] or registers itself as a
/// [`gpio::LineClient`] and is told about every level change, tagged with the
/// input number it was attached under.
pub struct SignalLine<'a> {
    level: Cell<bool>,
    rising_edges: Cell<usize>,
    client: OptionalCell<(&'a dyn gpio::LineClient, u32)>,
}

impl<'a> SignalLine<'a> {
    pub const fn new() -> SignalLine<'a> {
        SignalLine {
            level: Cell::new(false),
            rising_edges: Cell::new(0),
            client: OptionalCell::empty(),
        }
    }

    /// Attach `client` as the receiver of this line, on its input `line`.
    pub fn set_client(&self, client: &'a dyn gpio::LineClient, line: u32) {
        self.client.set((client, line));
    }

    pub fn is_high(&self) -> bool {
        self.level.get()
    }

    /// Number of low-to-high transitions seen since creation.
    pub fn rising_edges(&self) -> usize {
        self.rising_edges.get()
    }

    fn drive(&self, level: bool) {
        if self.level.get() == level {
            return;
        }
        self.level.set(level);
        if level {
            self.rising_edges.set(self.rising_edges.get() + 1);
        }
        self.client
            .map(|(client, line)| client.line_changed(line, level));
    }
}

impl Default for SignalLine<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl gpio::Output for SignalLine<'_> {
    fn set(&self) {
        self.drive(true);
    }

    fn clear(&self) {
        self.drive(false);
    }

    fn toggle(&self) -> bool {
        let level = !self.level.get();
        self.drive(level);
        level
    }
}

impl gpio::Input for SignalLine<'_> {
    fn read(&self) -> bool {
        self.level.get()
    }
}
