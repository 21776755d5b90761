// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Configuration for the STM32H7 peripheral models.
//!
//! Build-wide switches live in the `CONFIG` constant, following the kernel's
//! `Config` pattern: a typed `const` keeps every code path type-checked while
//! disabled branches fold away. Per-instance parameters, which differ between
//! two converters on the same board, are passed at construction time through
//! [`AdcConfig`].

/// Compile-time configuration options.
pub(crate) struct Config {
    /// Whether converters should print every completed conversion (channel,
    /// raw sample, masked result) to the debug output.
    pub(crate) trace_conversions: bool,
}

pub(crate) const CONFIG: Config = Config {
    trace_conversions: cfg!(feature = "trace_conversions"),
};

/// Construction parameters of one ADC instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AdcConfig {
    /// Name used to tag diagnostics, e.g. "adc1".
    pub name: &'static str,
    /// Virtual ticks between a conversion start and its result: sampling
    /// plus conversion latency. Values below the alarm's minimum are rounded
    /// up.
    pub conversion_ticks: u32,
}

impl Default for AdcConfig {
    fn default() -> Self {
        AdcConfig {
            name: "adc1",
            conversion_ticks: 10,
        }
    }
}
