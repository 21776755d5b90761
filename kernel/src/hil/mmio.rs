// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Interface for devices controlled through memory-mapped registers.
//!
//! The bus hands each access to the device as a byte slice relative to the
//! device's base address. The slice length is the access width: 1 for a byte,
//! 2 for a halfword, 4 for a word. Data is little endian.

/// A trait for devices that can be controlled by reading or writing MMIO
/// registers.
///
/// Devices should handle every access to their window. Accesses they do not
/// model are answered with zeroes on read and dropped on write; they never
/// fail the bus transaction.
pub trait MmioDevice {
    /// Size of the register window in bytes.
    fn size(&self) -> usize;

    /// Reads at `offset` from this device into `data`.
    fn mmio_read(&self, offset: usize, data: &mut [u8]);

    /// Writes `data` at `offset` of this device.
    fn mmio_write(&self, offset: usize, data: &[u8]);

    fn read_word(&self, offset: usize) -> u32 {
        let mut data = [0u8; 4];
        self.mmio_read(offset, &mut data);
        u32::from_le_bytes(data)
    }

    fn read_halfword(&self, offset: usize) -> u16 {
        let mut data = [0u8; 2];
        self.mmio_read(offset, &mut data);
        u16::from_le_bytes(data)
    }

    fn read_byte(&self, offset: usize) -> u8 {
        let mut data = [0u8; 1];
        self.mmio_read(offset, &mut data);
        data[0]
    }

    fn write_word(&self, offset: usize, value: u32) {
        self.mmio_write(offset, &value.to_le_bytes());
    }

    fn write_halfword(&self, offset: usize, value: u16) {
        self.mmio_write(offset, &value.to_le_bytes());
    }

    fn write_byte(&self, offset: usize, value: u8) {
        self.mmio_write(offset, &[value]);
    }
}
