// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Analog inputs, modeled as queues of harness-supplied digital values.

use core::cell::RefCell;

use super::samples::SampleError;

/// How many times a fed sequence is played before it sticks on its last
/// value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Repeat {
    Times(u32),
    Forever,
}

impl Default for Repeat {
    fn default() -> Self {
        Repeat::Times(1)
    }
}

/// Signed repeat counts as used by scripting front ends: a negative count
/// repeats forever and zero is invalid.
impl TryFrom<i32> for Repeat {
    type Error = SampleError;

    fn try_from(count: i32) -> Result<Self, Self::Error> {
        match count {
            0 => Err(SampleError::ZeroRepeat),
            count if count < 0 => Ok(Repeat::Forever),
            count => Ok(Repeat::Times(count as u32)),
        }
    }
}

struct Source {
    values: Vec<u32>,
    repeat: Repeat,
    /// Passes left, including the current one.
    remaining: Repeat,
    position: usize,
}

impl Source {
    fn rewind(&mut self) {
        self.remaining = self.repeat;
        self.position = 0;
    }

    fn pop(&mut self) -> u32 {
        let last = self.values.len() - 1;
        if self.position > last {
            return self.values[last];
        }
        let value = self.values[self.position];
        self.position += 1;
        if self.position > last {
            match self.remaining {
                Repeat::Forever => self.position = 0,
                Repeat::Times(passes) if passes > 1 => {
                    self.remaining = Repeat::Times(passes - 1);
                    self.position = 0;
                }
                Repeat::Times(_) => {}
            }
        }
        value
    }
}

/// One converter input.
///
/// Channels are shared between the converter, which pops a value per
/// conversion, and the harness, which feeds them at any time. A feed replaces
/// the previous source and is seen by the next pop. An unfed channel reads 0.
pub struct Channel {
    index: usize,
    source: RefCell<Option<Source>>,
}

impl Channel {
    pub const fn new(index: usize) -> Channel {
        Channel {
            index,
            source: RefCell::new(None),
        }
    }

    /// `N` channels numbered `0..N`.
    pub fn array<const N: usize>() -> [Channel; N] {
        core::array::from_fn(Channel::new)
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_fed(&self) -> bool {
        self.source.borrow().is_some()
    }

    /// Install `values`, played `repeat` times. `values` must not be empty.
    pub fn feed(&self, values: Vec<u32>, repeat: Repeat) -> Result<(), SampleError> {
        if repeat == Repeat::Times(0) {
            return Err(SampleError::ZeroRepeat);
        }
        if values.is_empty() {
            return Err(SampleError::Empty);
        }
        self.source.replace(Some(Source {
            values,
            repeat,
            remaining: repeat,
            position: 0,
        }));
        Ok(())
    }

    /// Next sample. Once the repeat budget is spent the last value repeats.
    pub fn pop(&self) -> u32 {
        self.source
            .borrow_mut()
            .as_mut()
            .map_or(0, |source| source.pop())
    }

    /// Restart the source from its first value with its full repeat budget.
    pub fn rewind(&self) {
        if let Some(source) = self.source.borrow_mut().as_mut() {
            source.rewind();
        }
    }
}
