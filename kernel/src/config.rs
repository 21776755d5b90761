// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Data structure for storing compile-time configuration options in the kernel.
//!
//! Configuration lives in a typed `const` rather than in `#[cfg]` blocks so
//! that every code path is type-checked even when disabled; the compiler
//! folds the constant away afterwards.

/// Data structure holding compile-time configuration options.
pub(crate) struct Config {
    /// Whether the system bus should trace every routed access to the debug
    /// output, with address, width and value.
    pub(crate) debug_bus_accesses: bool,
}

/// The only location in the kernel crate where `#[cfg(x)]`-style
/// configuration based on Cargo features is permitted.
pub(crate) const CONFIG: Config = Config {
    debug_bus_accesses: cfg!(feature = "debug_bus_accesses"),
};
