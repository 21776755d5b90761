// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! External trigger selection and edge qualification.

use core::cell::Cell;

use kernel::hil::gpio::InterruptEdge;
use kernel::utilities::cells::OptionalCell;

use super::registers::CFGR;

/// Decides which input line transitions start a conversion.
///
/// With no edge configured, conversions are paced by the conversion timer and
/// every line event is ignored.
pub struct TriggerRouter {
    edge: OptionalCell<InterruptEdge>,
    source: Cell<u32>,
}

impl TriggerRouter {
    pub const fn new() -> TriggerRouter {
        TriggerRouter {
            edge: OptionalCell::empty(),
            source: Cell::new(0),
        }
    }

    pub fn reset(&self) {
        self.edge.clear();
        self.source.set(0);
    }

    /// Apply an `EXTEN` setting.
    pub fn set_mode(&self, mode: CFGR::EXTEN::Value) {
        match mode {
            CFGR::EXTEN::Value::Disabled => self.edge.clear(),
            CFGR::EXTEN::Value::RisingEdge => self.edge.set(InterruptEdge::RisingEdge),
            CFGR::EXTEN::Value::FallingEdge => self.edge.set(InterruptEdge::FallingEdge),
            CFGR::EXTEN::Value::BothEdges => self.edge.set(InterruptEdge::EitherEdge),
        }
    }

    /// Select the input line that may trigger conversions.
    pub fn set_source(&self, line: u32) {
        self.source.set(line);
    }

    pub fn source(&self) -> u32 {
        self.source.get()
    }

    /// Whether conversions wait for an external edge instead of the timer.
    pub fn is_external(&self) -> bool {
        self.edge.is_some()
    }

    /// Whether a change of `line` to `level` is a trigger. Lines other than
    /// the selected source never qualify.
    pub fn qualifies(&self, line: u32, level: bool) -> bool {
        self.edge
            .map_or(false, |edge| line == self.source.get() && edge.matches(level))
    }
}
