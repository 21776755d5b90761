// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Registers shared by the ADCs of one pair (clock mode, prescaler, dual
//! mode, common status).
//!
//! The shared block is not modeled yet. Converters take it as a capability so
//! boards wire it once, and a model of it can be added without touching the
//! converter.

/// Services the shared block offers to the converters attached to it.
pub trait AdcCommon {}

/// Shared block with no behavior.
pub struct NoAdcCommon;

impl AdcCommon for NoAdcCommon {}
