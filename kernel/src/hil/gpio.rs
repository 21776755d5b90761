// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Interfaces for digital signal lines.
//!
//! In the simulator a "pin" is any single-bit wire between two models: an
//! interrupt output into the interrupt controller, a DMA request into the DMA
//! controller, or a GPIO/timer event feeding a peripheral trigger input.

/// Enum for selecting which edge to trigger interrupts on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InterruptEdge {
    RisingEdge,
    FallingEdge,
    EitherEdge,
}

impl InterruptEdge {
    /// Whether a transition to `level` is an edge of this kind.
    pub fn matches(self, level: bool) -> bool {
        match self {
            InterruptEdge::RisingEdge => level,
            InterruptEdge::FallingEdge => !level,
            InterruptEdge::EitherEdge => true,
        }
    }
}

/// A line driven by a peripheral model.
pub trait Output {
    /// Set the line high.
    fn set(&self);

    /// Set the line low.
    fn clear(&self);

    /// Toggle the line. Returns the new level.
    fn toggle(&self) -> bool;

    /// Drive the line to `level`.
    fn write(&self, level: bool) {
        if level {
            self.set();
        } else {
            self.clear();
        }
    }

    /// Raise then immediately lower the line, modeling an edge-style request.
    fn pulse(&self) {
        self.set();
        self.clear();
    }
}

/// A line whose current level can be sampled.
pub trait Input {
    /// Get the current level of the line.
    fn read(&self) -> bool;
}

/// Interface for models that listen to numbered input lines.
///
/// `line` identifies which of the listener's inputs changed and `level` is
/// the new level. The listener decides on its own which transitions matter.
pub trait LineClient {
    fn line_changed(&self, line: u32, level: bool);
}
