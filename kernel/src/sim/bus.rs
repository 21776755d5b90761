// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Address decoding for simulated peripherals.
//!
//! A `SystemBus` maps non-overlapping address windows onto devices
//! implementing [`MmioDevice`]. An access is forwarded to the device owning
//! the address with the address rebased to the start of its window. The bus
//! itself implements `MmioDevice` over the whole address space so the width
//! helpers (`read_word`, `write_halfword`, ...) work on absolute addresses.
//!
//! Accesses that hit no window are reported and read as zero. Enable the
//! `debug_bus_accesses` feature to trace every forwarded access.

use core::cell::RefCell;
use std::collections::BTreeMap;

use crate::config::CONFIG;
use crate::hil::mmio::MmioDevice;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum BusError {
    #[error("region at {base:#x} size {size:#x} overlaps an existing region")]
    RegionOverlaps { base: usize, size: usize },
    #[error("region at base address {0:#x} cannot be zero-sized")]
    ZeroSizedRegion(usize),
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
struct Region {
    base: usize,
    size: usize,
}

impl Region {
    fn overlaps(&self, base: usize, size: usize) -> bool {
        self.base < base.saturating_add(size) && base < self.base.saturating_add(self.size)
    }
}

pub struct SystemBus<'a> {
    devices: RefCell<BTreeMap<Region, &'a dyn MmioDevice>>,
}

impl<'a> SystemBus<'a> {
    pub fn new() -> SystemBus<'a> {
        SystemBus {
            devices: RefCell::new(BTreeMap::new()),
        }
    }

    /// Map `device` at `base`. The window size is `device.size()`.
    pub fn add_device(&self, base: usize, device: &'a dyn MmioDevice) -> Result<(), BusError> {
        let size = device.size();
        if size == 0 {
            return Err(BusError::ZeroSizedRegion(base));
        }
        let mut devices = self.devices.borrow_mut();
        if devices.keys().any(|region| region.overlaps(base, size)) {
            return Err(BusError::RegionOverlaps { base, size });
        }
        devices.insert(Region { base, size }, device);
        Ok(())
    }

    /// The device owning `addr` and the offset of `addr` inside its window.
    fn decode(&self, addr: usize) -> Option<(usize, &'a dyn MmioDevice)> {
        let devices = self.devices.borrow();
        let (region, device) = devices
            .range(
                ..=Region {
                    base: addr,
                    size: usize::MAX,
                },
            )
            .next_back()?;
        let offset = addr - region.base;
        if offset < region.size {
            Some((offset, *device))
        } else {
            None
        }
    }
}

impl Default for SystemBus<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl MmioDevice for SystemBus<'_> {
    fn size(&self) -> usize {
        usize::MAX
    }

    fn mmio_read(&self, addr: usize, data: &mut [u8]) {
        match self.decode(addr) {
            Some((offset, device)) => {
                device.mmio_read(offset, data);
                if CONFIG.debug_bus_accesses {
                    debug!("bus: read {:#010x} <- {:02x?}", addr, data);
                }
            }
            None => {
                debug_warn!("bus: read from unmapped address {:#010x}", addr);
                data.fill(0);
            }
        }
    }

    fn mmio_write(&self, addr: usize, data: &[u8]) {
        match self.decode(addr) {
            Some((offset, device)) => {
                if CONFIG.debug_bus_accesses {
                    debug!("bus: write {:#010x} -> {:02x?}", addr, data);
                }
                device.mmio_write(offset, data);
            }
            None => {
                debug_warn!("bus: write to unmapped address {:#010x} dropped", addr);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;

    /// A window of four 32-bit scratch registers.
    struct Scratch {
        words: [Cell<u32>; 4],
    }

    impl Scratch {
        fn new() -> Self {
            Scratch {
                words: Default::default(),
            }
        }
    }

    impl MmioDevice for Scratch {
        fn size(&self) -> usize {
            16
        }

        fn mmio_read(&self, offset: usize, data: &mut [u8]) {
            let word = self.words[offset / 4].get().to_le_bytes();
            let start = offset % 4;
            data.copy_from_slice(&word[start..start + data.len()]);
        }

        fn mmio_write(&self, offset: usize, data: &[u8]) {
            if data.len() == 4 {
                self.words[offset / 4].set(u32::from_le_bytes([data[0], data[1], data[2], data[3]]));
            }
        }
    }

    #[test]
    fn accesses_are_rebased_to_the_owning_window() {
        let a = Scratch::new();
        let b = Scratch::new();
        let bus = SystemBus::new();
        bus.add_device(0x4000_0000, &a).unwrap();
        bus.add_device(0x4000_0100, &b).unwrap();

        bus.write_word(0x4000_0104, 0xdead_beef);
        assert_eq!(b.words[1].get(), 0xdead_beef);
        assert_eq!(a.words[1].get(), 0);
        assert_eq!(bus.read_word(0x4000_0104), 0xdead_beef);
        assert_eq!(bus.read_halfword(0x4000_0106), 0xdead);
    }

    #[test]
    fn unmapped_reads_are_zero() {
        let a = Scratch::new();
        let bus = SystemBus::new();
        bus.add_device(0x1000, &a).unwrap();
        assert_eq!(bus.read_word(0x1010), 0);
        assert_eq!(bus.read_word(0x0ffc), 0);
        bus.write_word(0x2000, 1);
    }

    #[test]
    fn overlapping_and_empty_regions_are_rejected() {
        struct Empty;
        impl MmioDevice for Empty {
            fn size(&self) -> usize {
                0
            }
            fn mmio_read(&self, _offset: usize, _data: &mut [u8]) {}
            fn mmio_write(&self, _offset: usize, _data: &[u8]) {}
        }

        let a = Scratch::new();
        let b = Scratch::new();
        let bus = SystemBus::new();
        bus.add_device(0x1000, &a).unwrap();
        assert_eq!(
            bus.add_device(0x1008, &b),
            Err(BusError::RegionOverlaps {
                base: 0x1008,
                size: 16
            })
        );
        assert_eq!(
            bus.add_device(0x3000, &Empty),
            Err(BusError::ZeroSizedRegion(0x3000))
        );
    }
}
