// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Utility types and re-exports provided by the kernel crate.

pub mod cells;

/// The Tock Register Interface.
///
/// This is a re-export of the `tock-registers` crate provided for
/// convenience. Simulated peripherals use it to describe their bitfields and
/// to decode stored register values through `LocalRegisterCopy`.
pub mod registers {
    pub use tock_registers::fields::{Field, FieldValue, TryFromValue};
    pub use tock_registers::register_bitfields;
    pub use tock_registers::{LocalRegisterCopy, RegisterLongName};
}
