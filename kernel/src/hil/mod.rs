// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Public traits for interfaces between simulated peripherals and the host.

pub mod gpio;
pub mod mmio;
pub mod time;
