// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Analog-to-digital converter (ADC1/ADC2/ADC3) model.
//!
//! The model reproduces the register interface, conversion timing, regular
//! sequence scanning and the interrupt and DMA request signaling of the SAR
//! converters. It does not model analog behavior: every conversion returns the
//! next value the harness fed to the selected channel, masked to the
//! configured resolution.
//!
//! A conversion completes either when the conversion timer expires (software
//! trigger, `CFGR.EXTEN = 0`) or when a qualifying edge arrives on the
//! selected external trigger line. In external mode one edge converts the
//! whole regular sequence.
//!
//! Injected channels, analog watchdogs, oversampling, offsets and
//! differential inputs are declared in the register window but have no
//! behavior.
//!
//! Usage
//! -----
//!
//! ```rust
//! use kernel::hil::mmio::MmioDevice;
//! use kernel::hil::time::Alarm;
//! use kernel::sim::clock::{VirtualAlarm, VirtualClock};
//! use kernel::sim::line::SignalLine;
//! use stm32h7xx::adc::{registers::offset, Adc, Channel, NoAdcCommon, Repeat};
//! use stm32h7xx::config::AdcConfig;
//!
//! let clock = VirtualClock::new();
//! let alarm = VirtualAlarm::new(&clock);
//! alarm.setup();
//! let channels = Channel::array::<20>();
//! let adc = Adc::new(&alarm, &channels, &NoAdcCommon, AdcConfig::default());
//! alarm.set_alarm_client(&adc);
//! let irq = SignalLine::new();
//! adc.set_interrupt_line(&irq);
//!
//! adc.feed_sample(5, 0x123, Repeat::Forever).unwrap();
//! adc.write_word(offset::SQR1, 5 << 6); // SQ1 = 5, one conversion
//! adc.write_word(offset::IER, 1 << 2); // EOCIE
//! adc.write_word(offset::CR, 1); // ADEN
//! adc.write_word(offset::CR, 1 << 2); // ADSTART
//! clock.advance(10);
//!
//! assert!(irq.is_high());
//! assert_eq!(adc.read_word(offset::DR), 0x123);
//! assert!(!irq.is_high());
//! ```

use core::cell::Cell;
use std::path::Path;

use kernel::hil::gpio;
use kernel::hil::mmio::MmioDevice;
use kernel::hil::time::{self, Alarm};
use kernel::utilities::cells::OptionalCell;
use kernel::utilities::registers::{Field, LocalRegisterCopy, RegisterLongName};
use kernel::{debug, debug_warn};

use crate::config::{AdcConfig, CONFIG};

pub mod channel;
pub mod common;
pub mod registers;
pub mod samples;
pub mod sequencer;
pub mod timer;
pub mod trigger;

pub use self::channel::{Channel, Repeat};
pub use self::common::{AdcCommon, NoAdcCommon};
pub use self::samples::SampleError;

use self::registers::{
    offset, Hook, RegisterBank, CFGR, CR, IER, ISR, SQR1, SQR2, SQR3, SQR4,
};
use self::sequencer::Sequencer;
use self::timer::ConversionTimer;
use self::trigger::TriggerRouter;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AdcState {
    Disabled,
    /// Enabled, nothing scheduled.
    Idle,
    /// Waiting for the conversion timer or an external edge.
    Converting,
    /// A result is being latched.
    ResultReady,
}

/// `CFGR.DMNGT` setting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DmaMode {
    /// Results stay in `DR`.
    Disabled,
    OneShot,
    /// Results go to the DFSDM, no DMA requests.
    Dfsdm,
    Circular,
}

impl DmaMode {
    fn requests(self) -> bool {
        match self {
            DmaMode::OneShot | DmaMode::Circular => true,
            DmaMode::Disabled | DmaMode::Dfsdm => false,
        }
    }
}

/// Width of a result for a `CFGR.RES` setting.
fn resolution_bits(res: u32) -> u32 {
    match res {
        0 => 16,
        1 | 5 => 14,
        2 | 6 => 12,
        3 => 10,
        _ => 8,
    }
}

pub struct Adc<'a, A: Alarm<'a>> {
    config: AdcConfig,
    registers: RegisterBank,
    sequencer: Sequencer,
    timer: ConversionTimer<'a, A>,
    trigger: TriggerRouter,
    channels: &'a [Channel],
    common: &'a dyn AdcCommon,
    interrupt_line: OptionalCell<&'a dyn gpio::Output>,
    dma_line: OptionalCell<&'a dyn gpio::Output>,
    interrupt_asserted: Cell<bool>,
    state: Cell<AdcState>,
    scan_active: Cell<bool>,
    current_channel: OptionalCell<usize>,
    dma_mode: Cell<DmaMode>,
}

impl<'a, A: Alarm<'a>> Adc<'a, A> {
    pub fn new(
        alarm: &'a A,
        channels: &'a [Channel],
        common: &'a dyn AdcCommon,
        config: AdcConfig,
    ) -> Adc<'a, A> {
        Adc {
            config,
            registers: RegisterBank::new(),
            sequencer: Sequencer::new(),
            timer: ConversionTimer::new(alarm, config.conversion_ticks),
            trigger: TriggerRouter::new(),
            channels,
            common,
            interrupt_line: OptionalCell::empty(),
            dma_line: OptionalCell::empty(),
            interrupt_asserted: Cell::new(false),
            state: Cell::new(AdcState::Disabled),
            scan_active: Cell::new(false),
            current_channel: OptionalCell::empty(),
            dma_mode: Cell::new(DmaMode::Disabled),
        }
    }

    /// Connect the level-sensitive interrupt output.
    pub fn set_interrupt_line(&self, line: &'a dyn gpio::Output) {
        self.interrupt_line.set(line);
        line.write(self.interrupt_asserted.get());
    }

    /// Connect the DMA request output, pulsed once per result.
    pub fn set_dma_line(&self, line: &'a dyn gpio::Output) {
        self.dma_line.set(line);
    }

    pub fn name(&self) -> &'static str {
        self.config.name
    }

    pub fn state(&self) -> AdcState {
        self.state.get()
    }

    pub fn is_enabled(&self) -> bool {
        self.state.get() != AdcState::Disabled
    }

    /// Channel the next conversion reads, if the converter is enabled.
    pub fn current_channel(&self) -> Option<usize> {
        self.current_channel.get()
    }

    /// Number of analog inputs wired to this converter.
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Shared block this converter was built with.
    pub fn common(&self) -> &'a dyn AdcCommon {
        self.common
    }

    pub fn dma_mode(&self) -> DmaMode {
        self.dma_mode.get()
    }

    pub fn interrupt_pending(&self) -> bool {
        self.interrupt_asserted.get()
    }

    /// Peripheral reset: registers back to their reset values, converter
    /// disabled, outputs released and every channel rewound.
    pub fn reset(&self) {
        self.cancel_conversion();
        self.registers.reset();
        self.sequencer.reset();
        self.trigger.reset();
        self.state.set(AdcState::Disabled);
        self.scan_active.set(false);
        self.current_channel.clear();
        self.dma_mode.set(DmaMode::Disabled);
        self.update_interrupt();
        for channel in self.channels.iter() {
            channel.rewind();
        }
    }

    fn channel(&self, index: usize) -> Result<&'a Channel, SampleError> {
        self.channels
            .get(index)
            .ok_or(SampleError::ChannelOutOfRange {
                channel: index,
                count: self.channel_count(),
            })
    }

    /// Feed a single value to `channel`.
    pub fn feed_sample(
        &self,
        channel: usize,
        value: u32,
        repeat: Repeat,
    ) -> Result<(), SampleError> {
        self.channel(channel)?.feed(vec![value], repeat)
    }

    /// Feed a sequence of values to `channel`.
    pub fn feed_samples(
        &self,
        channel: usize,
        values: &[u32],
        repeat: Repeat,
    ) -> Result<(), SampleError> {
        self.channel(channel)?.feed(values.to_vec(), repeat)
    }

    /// Feed `channel` from a sample file. Nothing changes unless the whole
    /// file parses.
    pub fn feed_samples_from_file(
        &self,
        channel: usize,
        path: &Path,
        repeat: Repeat,
    ) -> Result<(), SampleError> {
        let channel = self.channel(channel)?;
        if repeat == Repeat::Times(0) {
            return Err(SampleError::ZeroRepeat);
        }
        let values = samples::load_samples(path)?;
        channel.feed(values, repeat)
    }

    fn select_current(&self) {
        self.current_channel
            .set(usize::from(self.sequencer.current()));
    }

    fn set_scan_active(&self, active: bool) {
        self.scan_active.set(active);
        self.registers
            .modify(offset::CR, CR::ADSTART.val(u32::from(active)));
    }

    fn update_interrupt(&self) {
        let level = self.registers.is_set(offset::ISR, ISR::EOC)
            && self.registers.is_set(offset::IER, IER::EOCIE);
        if level != self.interrupt_asserted.get() {
            self.interrupt_asserted.set(level);
            self.interrupt_line.map(|line| line.write(level));
        }
    }

    fn cancel_conversion(&self) {
        if let Err(error) = self.timer.disarm() {
            debug_warn!("{}: failed to disarm conversion timer: {}", self.name(), error);
        }
    }

    fn enable(&self) {
        self.state.set(AdcState::Idle);
        self.sequencer.rewind();
        self.select_current();
        self.registers
            .modify(offset::CR, CR::ADEN::SET + CR::ADDIS::CLEAR);
        self.registers.modify(offset::ISR, ISR::ADRDY::SET);
    }

    fn disable(&self) {
        self.cancel_conversion();
        self.sequencer.rewind();
        self.current_channel.clear();
        self.set_scan_active(false);
        self.state.set(AdcState::Disabled);
        self.registers.modify(offset::CR, CR::ADEN::CLEAR);
        self.registers.modify(offset::ISR, ISR::ADRDY::CLEAR);
    }

    fn start(&self) {
        if !self.is_enabled() {
            debug_warn!("{}: ADSTART ignored, converter is disabled", self.name());
            return;
        }
        if self.scan_active.get() {
            return;
        }
        self.set_scan_active(true);
        self.state.set(AdcState::Converting);
        if !self.trigger.is_external() {
            self.timer.arm();
        }
    }

    fn stop(&self) {
        if !self.is_enabled() {
            return;
        }
        self.cancel_conversion();
        self.set_scan_active(false);
        self.sequencer.rewind();
        self.select_current();
        self.state.set(AdcState::Idle);
    }

    fn calibrate(&self) {
        if self.is_enabled() {
            debug_warn!("{}: calibration started while enabled", self.name());
        }
    }

    /// Latch one result and schedule whatever follows it.
    fn conversion_done(&self) {
        if !self.is_enabled() {
            return;
        }
        self.state.set(AdcState::ResultReady);

        let raw = match self
            .current_channel
            .get()
            .and_then(|index| self.channels.get(index))
        {
            Some(channel) => channel.pop(),
            None => {
                debug_warn!(
                    "{}: sequence selects channel {} but only {} exist",
                    self.name(),
                    self.sequencer.current(),
                    self.channel_count()
                );
                0
            }
        };
        let bits = resolution_bits(
            self.registers
                .view::<CFGR::Register>(offset::CFGR)
                .read(CFGR::RES),
        );
        let value = raw & ((1 << bits) - 1);

        if self.registers.is_set(offset::ISR, ISR::EOC) {
            self.registers.modify(offset::ISR, ISR::OVR::SET);
        }
        self.registers.store(offset::DR, value);
        self.registers.modify(offset::ISR, ISR::EOSMP::SET);
        let last = self.sequencer.is_last();
        // Recomputed on every result: a mid-scan result withdraws an unread
        // end of conversion from the previous pass.
        self.registers.modify(
            offset::ISR,
            ISR::EOC.val(u32::from(!self.scan_active.get() || last)),
        );
        if last {
            self.registers.modify(offset::ISR, ISR::EOS::SET);
        }
        if CONFIG.trace_conversions {
            debug!(
                "{}: slot {} channel {} raw {:#x} -> {:#x}",
                self.name(),
                self.sequencer.cursor(),
                self.sequencer.current(),
                raw,
                value
            );
        }
        if self.dma_mode.get().requests() {
            self.dma_line.map(|line| line.pulse());
        }
        self.update_interrupt();

        self.sequencer.advance();
        self.select_current();

        let external = self.trigger.is_external();
        let continuous = self.registers.is_set(offset::CFGR, CFGR::CONT);
        if !external && !continuous && !self.sequencer.mid_scan() {
            self.set_scan_active(false);
            self.state.set(AdcState::Idle);
        } else {
            self.state.set(AdcState::Converting);
            if !external {
                self.timer.arm();
            }
        }
    }

    fn control_written(&self, written: u32) {
        let command = LocalRegisterCopy::<u32, CR::Register>::new(written);
        if command.is_set(CR::ADDIS) {
            if self.is_enabled() {
                self.disable();
            }
        } else if command.is_set(CR::ADEN) && !self.is_enabled() {
            self.enable();
        }
        if command.is_set(CR::ADSTP) {
            self.stop();
        }
        if command.is_set(CR::ADSTART) {
            self.start();
        }
        if command.is_set(CR::ADCAL) {
            self.calibrate();
        }
        // Commands complete immediately. Enable and start bits report state.
        self.registers.modify(
            offset::CR,
            CR::ADDIS::CLEAR
                + CR::ADSTP::CLEAR
                + CR::ADCAL::CLEAR
                + CR::ADEN.val(u32::from(self.is_enabled()))
                + CR::ADSTART.val(u32::from(self.scan_active.get())),
        );
    }

    fn configuration_written(&self) {
        let cfgr = self.registers.view::<CFGR::Register>(offset::CFGR);

        if let Some(dmngt) = cfgr.read_as_enum::<CFGR::DMNGT::Value>(CFGR::DMNGT) {
            self.dma_mode.set(match dmngt {
                CFGR::DMNGT::Value::DataRegister => DmaMode::Disabled,
                CFGR::DMNGT::Value::DmaOneShot => DmaMode::OneShot,
                CFGR::DMNGT::Value::Dfsdm => DmaMode::Dfsdm,
                CFGR::DMNGT::Value::DmaCircular => DmaMode::Circular,
            });
        }

        self.trigger.set_source(cfgr.read(CFGR::EXTSEL));
        let was_external = self.trigger.is_external();
        if let Some(mode) = cfgr.read_as_enum::<CFGR::EXTEN::Value>(CFGR::EXTEN) {
            self.trigger.set_mode(mode);
        }
        let external = self.trigger.is_external();
        if external && !was_external {
            self.cancel_conversion();
        } else if !external && was_external && self.scan_active.get() && self.is_enabled() {
            self.state.set(AdcState::Converting);
            self.timer.arm();
        }
    }

    fn load_slots<R: RegisterLongName>(
        &self,
        offset: usize,
        first: usize,
        fields: &[Field<u32, R>],
    ) {
        let register = self.registers.view::<R>(offset);
        for (i, field) in fields.iter().enumerate() {
            self.sequencer.set_slot(first + i, register.read(*field) as u8);
        }
    }

    fn sequence_written(&self, offset: usize) {
        match offset {
            offset::SQR1 => {
                self.load_slots(offset, 0, &[SQR1::SQ1, SQR1::SQ2, SQR1::SQ3, SQR1::SQ4]);
                let length = self
                    .registers
                    .view::<SQR1::Register>(offset)
                    .read(SQR1::L);
                self.sequencer.set_length(length as usize + 1);
            }
            offset::SQR2 => self.load_slots(
                offset,
                4,
                &[SQR2::SQ5, SQR2::SQ6, SQR2::SQ7, SQR2::SQ8, SQR2::SQ9],
            ),
            offset::SQR3 => self.load_slots(
                offset,
                9,
                &[SQR3::SQ10, SQR3::SQ11, SQR3::SQ12, SQR3::SQ13, SQR3::SQ14],
            ),
            offset::SQR4 => self.load_slots(offset, 14, &[SQR4::SQ15, SQR4::SQ16]),
            _ => {}
        }
        if self.is_enabled() {
            self.select_current();
        }
    }

    fn data_read(&self) {
        self.registers.modify(offset::ISR, ISR::EOC::CLEAR);
        self.update_interrupt();
    }

    fn run_hook(&self, hook: Hook, offset: usize, written: u32) {
        match hook {
            Hook::Status | Hook::InterruptEnable => self.update_interrupt(),
            Hook::Control => self.control_written(written),
            Hook::Configuration => self.configuration_written(),
            Hook::SequenceLength | Hook::Sequence => self.sequence_written(offset),
        }
    }
}

impl<'a, A: Alarm<'a>> MmioDevice for Adc<'a, A> {
    fn size(&self) -> usize {
        registers::WINDOW_SIZE
    }

    fn mmio_read(&self, offset: usize, data: &mut [u8]) {
        data.fill(0);
        let word = data.len() == 4 && offset % 4 == 0;
        let narrow_data = offset == offset::DR && (data.len() == 1 || data.len() == 2);
        if !word && !narrow_data {
            debug_warn!(
                "{}: unsupported {}-byte read at {:#04x}",
                self.name(),
                data.len(),
                offset
            );
            return;
        }
        let register = match registers::descriptor(offset) {
            Some(register) => register,
            None => {
                debug_warn!("{}: read from undeclared offset {:#04x}", self.name(), offset);
                return;
            }
        };
        let value = self.registers.load(offset);
        if register.acknowledge_on_read {
            self.data_read();
        }
        let len = data.len();
        data.copy_from_slice(&value.to_le_bytes()[..len]);
    }

    fn mmio_write(&self, offset: usize, data: &[u8]) {
        let bytes: [u8; 4] = match data.try_into() {
            Ok(bytes) if offset % 4 == 0 => bytes,
            _ => {
                debug_warn!(
                    "{}: unsupported {}-byte write at {:#04x} dropped",
                    self.name(),
                    data.len(),
                    offset
                );
                return;
            }
        };
        let register = match registers::descriptor(offset) {
            Some(register) => register,
            None => {
                debug_warn!("{}: write to undeclared offset {:#04x} dropped", self.name(), offset);
                return;
            }
        };
        let value = u32::from_le_bytes(bytes);
        match self.registers.write(register, value) {
            Ok(Some(hook)) => self.run_hook(hook, offset, value),
            Ok(None) => {}
            Err(_) => debug_warn!("{}: write to read-only {} ignored", self.name(), register.name),
        }
    }
}

impl<'a, A: Alarm<'a>> time::AlarmClient for Adc<'a, A> {
    fn alarm(&self) {
        if self.state.get() == AdcState::Converting && !self.trigger.is_external() {
            self.conversion_done();
        }
    }
}

impl<'a, A: Alarm<'a>> gpio::LineClient for Adc<'a, A> {
    fn line_changed(&self, line: u32, level: bool) {
        if !self.is_enabled() || !self.trigger.is_external() {
            return;
        }
        if line != self.trigger.source() {
            debug_warn!(
                "{}: edge on line {} ignored, trigger source is line {}",
                self.name(),
                line,
                self.trigger.source()
            );
            return;
        }
        if !self.trigger.qualifies(line, level) {
            return;
        }
        for _ in 0..self.sequencer.len() {
            self.conversion_done();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel::sim::clock::{VirtualAlarm, VirtualClock};

    #[test]
    fn resolution_widths() {
        assert_eq!(resolution_bits(0), 16);
        assert_eq!(resolution_bits(2), 12);
        assert_eq!(resolution_bits(3), 10);
        assert_eq!(resolution_bits(5), 14);
        assert_eq!(resolution_bits(7), 8);
    }

    #[test]
    fn command_bits_read_back_as_state() {
        let clock = VirtualClock::new();
        let alarm = VirtualAlarm::new(&clock);
        alarm.setup();
        let channels = Channel::array::<2>();
        let adc = Adc::new(&alarm, &channels, &NoAdcCommon, AdcConfig::default());

        adc.write_word(offset::CR, CR::ADCAL::SET.mask());
        assert!(!adc.registers.is_set(offset::CR, CR::ADCAL));

        adc.write_word(offset::CR, CR::ADEN::SET.mask() | CR::BOOST::SET.mask());
        let cr = adc.registers.view::<CR::Register>(offset::CR);
        assert!(cr.is_set(CR::ADEN));
        assert_eq!(cr.read(CR::BOOST), 3);
        assert!(adc.registers.is_set(offset::ISR, ISR::ADRDY));

        // ADEN cannot be cleared by writing 0.
        adc.write_word(offset::CR, 0);
        assert!(adc.is_enabled());
        assert!(adc.registers.is_set(offset::CR, CR::ADEN));

        adc.write_word(offset::CR, CR::ADDIS::SET.mask());
        assert!(!adc.is_enabled());
        assert_eq!(adc.registers.load(offset::CR) & 0b11, 0);
        assert!(!adc.registers.is_set(offset::ISR, ISR::ADRDY));
    }

    #[test]
    fn start_while_disabled_is_ignored() {
        let clock = VirtualClock::new();
        let alarm = VirtualAlarm::new(&clock);
        alarm.setup();
        let channels = Channel::array::<1>();
        let adc = Adc::new(&alarm, &channels, &NoAdcCommon, AdcConfig::default());

        adc.write_word(offset::CR, CR::ADSTART::SET.mask());
        assert_eq!(adc.state(), AdcState::Disabled);
        assert!(!adc.registers.is_set(offset::CR, CR::ADSTART));
        assert!(!alarm.is_armed());
    }

    #[test]
    fn dma_mode_follows_dmngt() {
        let clock = VirtualClock::new();
        let alarm = VirtualAlarm::new(&clock);
        alarm.setup();
        let channels = Channel::array::<1>();
        let adc = Adc::new(&alarm, &channels, &NoAdcCommon, AdcConfig::default());

        adc.write_word(offset::CFGR, 3);
        assert_eq!(adc.dma_mode(), DmaMode::Circular);
        adc.write_word(offset::CFGR, 2);
        assert_eq!(adc.dma_mode(), DmaMode::Dfsdm);
        adc.reset();
        assert_eq!(adc.dma_mode(), DmaMode::Disabled);
        assert!(adc.registers.is_set(offset::CFGR, CFGR::JQDIS));
    }
}
