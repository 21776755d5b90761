// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Regular sequence of channel selections and the scan cursor.

use core::cell::Cell;

use kernel::utilities::cells::OptionalCell;

/// Number of slots in the regular sequence.
pub const MAX_LENGTH: usize = 16;

/// Ordered list of channel indices converted by a scan.
///
/// `length` is always in `1..=MAX_LENGTH` and `cursor < length`. A length
/// written while a pass is in progress is held back until the cursor wraps,
/// so a pass never ends early or runs past the slots it started with.
pub struct Sequencer {
    slots: Cell<[u8; MAX_LENGTH]>,
    length: Cell<usize>,
    pending_length: OptionalCell<usize>,
    cursor: Cell<usize>,
}

impl Sequencer {
    pub const fn new() -> Sequencer {
        Sequencer {
            slots: Cell::new([0; MAX_LENGTH]),
            length: Cell::new(1),
            pending_length: OptionalCell::empty(),
            cursor: Cell::new(0),
        }
    }

    pub fn reset(&self) {
        self.slots.set([0; MAX_LENGTH]);
        self.length.set(1);
        self.pending_length.clear();
        self.cursor.set(0);
    }

    /// Select `channel` for the zero-based `slot`.
    pub fn set_slot(&self, slot: usize, channel: u8) {
        if slot < MAX_LENGTH {
            let mut slots = self.slots.get();
            slots[slot] = channel;
            self.slots.set(slots);
        }
    }

    /// Set the number of active slots, clamped to `1..=MAX_LENGTH`.
    pub fn set_length(&self, length: usize) {
        let length = length.clamp(1, MAX_LENGTH);
        if self.cursor.get() == 0 {
            self.length.set(length);
            self.pending_length.clear();
        } else {
            self.pending_length.set(length);
        }
    }

    pub fn len(&self) -> usize {
        self.length.get()
    }

    pub fn cursor(&self) -> usize {
        self.cursor.get()
    }

    /// Channel selected by the slot under the cursor.
    pub fn current(&self) -> u8 {
        self.slots.get()[self.cursor.get()]
    }

    /// Whether the cursor is on the last active slot.
    pub fn is_last(&self) -> bool {
        self.cursor.get() + 1 == self.length.get()
    }

    /// Whether a pass is in progress.
    pub fn mid_scan(&self) -> bool {
        self.cursor.get() != 0
    }

    /// Step to the next slot. Returns `true` when the cursor wrapped back to
    /// the first slot.
    pub fn advance(&self) -> bool {
        if self.is_last() {
            self.rewind();
            true
        } else {
            self.cursor.set(self.cursor.get() + 1);
            false
        }
    }

    /// Move the cursor to the first slot and apply a held-back length.
    pub fn rewind(&self) {
        self.cursor.set(0);
        if let Some(length) = self.pending_length.take() {
            self.length.set(length);
        }
    }
}
