// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Support for in-simulator debugging output.
//!
//! Peripheral models report diagnostics with `debug!` and `debug_warn!`. Each
//! message is tagged with the file and line it came from, the same way Tock's
//! kernel debug writer does it, and then handed to the `log` facade so the
//! host simulator decides where it ends up.
//!
//! Usage
//! -----
//!
//! ```rust
//! use kernel::{debug, debug_warn};
//!
//! debug!("conversion done on channel {}", 3);
//! debug_warn!("write to undeclared offset {:#x} dropped", 0x44);
//! ```

use core::fmt::Arguments;

pub use log::Level;

/// Log target used for every message emitted through this module.
pub const TARGET: &str = "kernel";

/// Emit a debug message at `Level::Debug`.
#[macro_export]
macro_rules! debug {
    () => ({
        // Allow an empty debug!() to print the location when hit
        $crate::debug!("")
    });
    ($msg:expr $(,)?) => ({
        $crate::debug::begin_debug_fmt($crate::debug::Level::Debug, format_args!("{}", $msg), {
            static _FILE_LINE: (&'static str, u32) = (file!(), line!());
            &_FILE_LINE
        })
    });
    ($fmt:expr, $($arg:tt)+) => ({
        $crate::debug::begin_debug_fmt($crate::debug::Level::Debug, format_args!($fmt, $($arg)+), {
            static _FILE_LINE: (&'static str, u32) = (file!(), line!());
            &_FILE_LINE
        })
    });
}

/// Emit a diagnostic at `Level::Warn`.
///
/// Used for recoverable protocol misuse: the operation is ignored, the
/// simulation carries on, and the message is the only trace it happened.
#[macro_export]
macro_rules! debug_warn {
    ($msg:expr $(,)?) => ({
        $crate::debug::begin_debug_fmt($crate::debug::Level::Warn, format_args!("{}", $msg), {
            static _FILE_LINE: (&'static str, u32) = (file!(), line!());
            &_FILE_LINE
        })
    });
    ($fmt:expr, $($arg:tt)+) => ({
        $crate::debug::begin_debug_fmt($crate::debug::Level::Warn, format_args!($fmt, $($arg)+), {
            static _FILE_LINE: (&'static str, u32) = (file!(), line!());
            &_FILE_LINE
        })
    });
}

pub fn begin_debug_fmt(level: Level, args: Arguments, file_line: &(&'static str, u32)) {
    let (file, line) = *file_line;
    log::log!(target: TARGET, level, "{}:{}: {}", file, line, args);
}
