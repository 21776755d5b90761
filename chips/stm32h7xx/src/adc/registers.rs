// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Register window of one ADC instance.
//!
//! Every register the firmware can see is declared once in [`REGISTERS`]
//! with its reset value, access policy, writable mask and, if it has one, the
//! hook the converter runs after a write. [`RegisterBank`] holds the storage
//! and applies the policy; it knows nothing about conversions. Bitfields are
//! described with `register_bitfields!` and accessed through
//! `LocalRegisterCopy` views of the stored words.

use core::cell::Cell;

use kernel::ErrorCode;
use kernel::utilities::registers::{
    register_bitfields, Field, FieldValue, LocalRegisterCopy, RegisterLongName,
};

/// Size of the register window in bytes.
pub const WINDOW_SIZE: usize = 0x100;

register_bitfields![u32,
    /// Interrupt and status register
    pub ISR [
        /// Injected context queue overflow
        JQOVF OFFSET(10) NUMBITS(1) [],
        /// Analog watchdog 3 flag
        AWD3 OFFSET(9) NUMBITS(1) [],
        /// Analog watchdog 2 flag
        AWD2 OFFSET(8) NUMBITS(1) [],
        /// Analog watchdog 1 flag
        AWD1 OFFSET(7) NUMBITS(1) [],
        /// Injected channel end of sequence flag
        JEOS OFFSET(6) NUMBITS(1) [],
        /// Injected channel end of conversion flag
        JEOC OFFSET(5) NUMBITS(1) [],
        /// Overrun
        OVR OFFSET(4) NUMBITS(1) [],
        /// End of regular sequence flag
        EOS OFFSET(3) NUMBITS(1) [],
        /// End of conversion flag
        EOC OFFSET(2) NUMBITS(1) [],
        /// End of sampling flag
        EOSMP OFFSET(1) NUMBITS(1) [],
        /// ADC ready
        ADRDY OFFSET(0) NUMBITS(1) []
    ],
    /// Interrupt enable register
    pub IER [
        JQOVFIE OFFSET(10) NUMBITS(1) [],
        AWD3IE OFFSET(9) NUMBITS(1) [],
        AWD2IE OFFSET(8) NUMBITS(1) [],
        AWD1IE OFFSET(7) NUMBITS(1) [],
        JEOSIE OFFSET(6) NUMBITS(1) [],
        JEOCIE OFFSET(5) NUMBITS(1) [],
        OVRIE OFFSET(4) NUMBITS(1) [],
        EOSIE OFFSET(3) NUMBITS(1) [],
        /// End of regular conversion interrupt enable
        EOCIE OFFSET(2) NUMBITS(1) [],
        EOSMPIE OFFSET(1) NUMBITS(1) [],
        ADRDYIE OFFSET(0) NUMBITS(1) []
    ],
    /// Control register
    pub CR [
        /// ADC calibration
        ADCAL OFFSET(31) NUMBITS(1) [],
        /// Differential mode for calibration
        ADCALDIF OFFSET(30) NUMBITS(1) [],
        /// Deep-power-down enable
        DEEPPWD OFFSET(29) NUMBITS(1) [],
        /// ADC voltage regulator enable
        ADVREGEN OFFSET(28) NUMBITS(1) [],
        /// Linearity calibration
        ADCALLIN OFFSET(16) NUMBITS(1) [],
        /// Boost mode control
        BOOST OFFSET(8) NUMBITS(2) [],
        /// ADC stop of injected conversion command
        JADSTP OFFSET(5) NUMBITS(1) [],
        /// ADC stop of regular conversion command
        ADSTP OFFSET(4) NUMBITS(1) [],
        /// ADC start of injected conversion
        JADSTART OFFSET(3) NUMBITS(1) [],
        /// ADC start of regular conversion
        ADSTART OFFSET(2) NUMBITS(1) [],
        /// ADC disable command
        ADDIS OFFSET(1) NUMBITS(1) [],
        /// ADC enable control
        ADEN OFFSET(0) NUMBITS(1) []
    ],
    /// Configuration register
    pub CFGR [
        /// Injected queue disable
        JQDIS OFFSET(31) NUMBITS(1) [],
        /// Analog watchdog 1 channel selection
        AWD1CH OFFSET(26) NUMBITS(5) [],
        /// Automatic injected group conversion
        JAUTO OFFSET(25) NUMBITS(1) [],
        /// Analog watchdog 1 enable on injected channels
        JAWD1EN OFFSET(24) NUMBITS(1) [],
        /// Analog watchdog 1 enable on regular channels
        AWD1EN OFFSET(23) NUMBITS(1) [],
        /// Enable the watchdog 1 on a single channel or on all channels
        AWD1SGL OFFSET(22) NUMBITS(1) [],
        /// JSQR queue mode
        JQM OFFSET(21) NUMBITS(1) [],
        /// Discontinuous mode on injected channels
        JDISCEN OFFSET(20) NUMBITS(1) [],
        /// Discontinuous mode channel count
        DISCNUM OFFSET(17) NUMBITS(3) [],
        /// Discontinuous mode for regular channels
        DISCEN OFFSET(16) NUMBITS(1) [],
        /// Delayed conversion mode
        AUTDLY OFFSET(14) NUMBITS(1) [],
        /// Single / continuous conversion mode for regular conversions
        CONT OFFSET(13) NUMBITS(1) [],
        /// Overrun mode
        OVRMOD OFFSET(12) NUMBITS(1) [],
        /// External trigger enable and polarity selection for regular channels
        EXTEN OFFSET(10) NUMBITS(2) [
            Disabled = 0,
            RisingEdge = 1,
            FallingEdge = 2,
            BothEdges = 3
        ],
        /// External trigger selection for regular group
        EXTSEL OFFSET(5) NUMBITS(5) [],
        /// Data resolution
        RES OFFSET(2) NUMBITS(3) [],
        /// Data management configuration
        DMNGT OFFSET(0) NUMBITS(2) [
            DataRegister = 0,
            DmaOneShot = 1,
            Dfsdm = 2,
            DmaCircular = 3
        ]
    ],
    /// Regular sequence register 1
    pub SQR1 [
        /// 4th conversion in regular sequence
        SQ4 OFFSET(24) NUMBITS(5) [],
        /// 3rd conversion in regular sequence
        SQ3 OFFSET(18) NUMBITS(5) [],
        /// 2nd conversion in regular sequence
        SQ2 OFFSET(12) NUMBITS(5) [],
        /// 1st conversion in regular sequence
        SQ1 OFFSET(6) NUMBITS(5) [],
        /// Regular channel sequence length, minus one
        L OFFSET(0) NUMBITS(4) []
    ],
    /// Regular sequence register 2
    pub SQR2 [
        SQ9 OFFSET(24) NUMBITS(5) [],
        SQ8 OFFSET(18) NUMBITS(5) [],
        SQ7 OFFSET(12) NUMBITS(5) [],
        SQ6 OFFSET(6) NUMBITS(5) [],
        SQ5 OFFSET(0) NUMBITS(5) []
    ],
    /// Regular sequence register 3
    pub SQR3 [
        SQ14 OFFSET(24) NUMBITS(5) [],
        SQ13 OFFSET(18) NUMBITS(5) [],
        SQ12 OFFSET(12) NUMBITS(5) [],
        SQ11 OFFSET(6) NUMBITS(5) [],
        SQ10 OFFSET(0) NUMBITS(5) []
    ],
    /// Regular sequence register 4
    pub SQR4 [
        SQ16 OFFSET(6) NUMBITS(5) [],
        SQ15 OFFSET(0) NUMBITS(5) []
    ],
    /// Regular data register
    pub DR [
        /// Regular data converted
        RDATA OFFSET(0) NUMBITS(32) []
    ]
];

/// Byte offsets of the registers in the window.
pub mod offset {
    pub const ISR: usize = 0x00;
    pub const IER: usize = 0x04;
    pub const CR: usize = 0x08;
    pub const CFGR: usize = 0x0C;
    pub const CFGR2: usize = 0x10;
    pub const SMPR1: usize = 0x14;
    pub const SMPR2: usize = 0x18;
    pub const PCSEL: usize = 0x1C;
    pub const LTR1: usize = 0x20;
    pub const HTR1: usize = 0x24;
    pub const SQR1: usize = 0x30;
    pub const SQR2: usize = 0x34;
    pub const SQR3: usize = 0x38;
    pub const SQR4: usize = 0x3C;
    pub const DR: usize = 0x40;
    pub const JSQR: usize = 0x4C;
    pub const OFR1: usize = 0x60;
    pub const OFR2: usize = 0x64;
    pub const OFR3: usize = 0x68;
    pub const OFR4: usize = 0x6C;
    pub const JDR1: usize = 0x80;
    pub const JDR2: usize = 0x84;
    pub const JDR3: usize = 0x88;
    pub const JDR4: usize = 0x8C;
    pub const AWD2CR: usize = 0xA0;
    pub const AWD3CR: usize = 0xA4;
    pub const LTR2: usize = 0xB0;
    pub const HTR2: usize = 0xB4;
    pub const LTR3: usize = 0xB8;
    pub const HTR3: usize = 0xBC;
    pub const DIFSEL: usize = 0xC0;
    pub const CALFACT: usize = 0xC4;
    pub const CALFACT2: usize = 0xC8;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
    ReadWrite,
    ReadOnly,
    /// Writing 1 to a writable bit clears it, writing 0 has no effect.
    WriteOneToClear,
}

/// Converter behavior run after an accepted write.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Hook {
    /// Status flags changed under software control.
    Status,
    InterruptEnable,
    /// Enable, disable, start, stop and calibration commands.
    Control,
    /// DMA management, trigger selection and conversion mode.
    Configuration,
    /// Sequence length and the first four slots.
    SequenceLength,
    /// Sequence slots 5 to 16.
    Sequence,
}

pub struct RegisterDescriptor {
    pub offset: usize,
    pub name: &'static str,
    pub access: Access,
    pub reset: u32,
    /// Bits software may change. All other bits keep their stored value.
    pub writable: u32,
    pub hook: Option<Hook>,
    /// A read acknowledges the latched result.
    pub acknowledge_on_read: bool,
}

const fn rw(offset: usize, name: &'static str, writable: u32) -> RegisterDescriptor {
    RegisterDescriptor {
        offset,
        name,
        access: Access::ReadWrite,
        reset: 0,
        writable,
        hook: None,
        acknowledge_on_read: false,
    }
}

const fn ro(offset: usize, name: &'static str) -> RegisterDescriptor {
    RegisterDescriptor {
        offset,
        name,
        access: Access::ReadOnly,
        reset: 0,
        writable: 0,
        hook: None,
        acknowledge_on_read: false,
    }
}

const ISR_W1C: u32 = ISR::ADRDY::SET.mask()
    | ISR::EOSMP::SET.mask()
    | ISR::EOC::SET.mask()
    | ISR::EOS::SET.mask()
    | ISR::OVR::SET.mask();

// Injected-group commands are reserved in this model.
const CR_WRITABLE: u32 = CR::ADCAL::SET.mask()
    | CR::ADCALDIF::SET.mask()
    | CR::DEEPPWD::SET.mask()
    | CR::ADVREGEN::SET.mask()
    | CR::ADCALLIN::SET.mask()
    | CR::BOOST::SET.mask()
    | CR::ADSTP::SET.mask()
    | CR::ADSTART::SET.mask()
    | CR::ADDIS::SET.mask()
    | CR::ADEN::SET.mask();

const SQR1_WRITABLE: u32 = SQR1::SQ4::SET.mask()
    | SQR1::SQ3::SET.mask()
    | SQR1::SQ2::SET.mask()
    | SQR1::SQ1::SET.mask()
    | SQR1::L::SET.mask();

const SQ_SLOTS_5: u32 = 0x1F7D_F7DF;

/// Every register in the window, in address order.
pub static REGISTERS: [RegisterDescriptor; 33] = [
    RegisterDescriptor {
        access: Access::WriteOneToClear,
        hook: Some(Hook::Status),
        ..rw(offset::ISR, "ISR", ISR_W1C)
    },
    RegisterDescriptor {
        hook: Some(Hook::InterruptEnable),
        ..rw(offset::IER, "IER", 0x0000_07FF)
    },
    RegisterDescriptor {
        reset: CR::DEEPPWD::SET.mask(),
        hook: Some(Hook::Control),
        ..rw(offset::CR, "CR", CR_WRITABLE)
    },
    RegisterDescriptor {
        reset: CFGR::JQDIS::SET.mask(),
        hook: Some(Hook::Configuration),
        ..rw(offset::CFGR, "CFGR", 0xFFFF_7FFF)
    },
    rw(offset::CFGR2, "CFGR2", 0xFFFF_FFFF),
    rw(offset::SMPR1, "SMPR1", 0x3FFF_FFFF),
    rw(offset::SMPR2, "SMPR2", 0x3FFF_FFFF),
    rw(offset::PCSEL, "PCSEL", 0x000F_FFFF),
    rw(offset::LTR1, "LTR1", 0x03FF_FFFF),
    RegisterDescriptor {
        reset: 0x03FF_FFFF,
        ..rw(offset::HTR1, "HTR1", 0x03FF_FFFF)
    },
    RegisterDescriptor {
        hook: Some(Hook::SequenceLength),
        ..rw(offset::SQR1, "SQR1", SQR1_WRITABLE)
    },
    RegisterDescriptor {
        hook: Some(Hook::Sequence),
        ..rw(offset::SQR2, "SQR2", SQ_SLOTS_5)
    },
    RegisterDescriptor {
        hook: Some(Hook::Sequence),
        ..rw(offset::SQR3, "SQR3", SQ_SLOTS_5)
    },
    RegisterDescriptor {
        hook: Some(Hook::Sequence),
        ..rw(offset::SQR4, "SQR4", 0x0000_07DF)
    },
    RegisterDescriptor {
        acknowledge_on_read: true,
        ..ro(offset::DR, "DR")
    },
    rw(offset::JSQR, "JSQR", 0xFFFF_FFFF),
    rw(offset::OFR1, "OFR1", 0xFFFF_FFFF),
    rw(offset::OFR2, "OFR2", 0xFFFF_FFFF),
    rw(offset::OFR3, "OFR3", 0xFFFF_FFFF),
    rw(offset::OFR4, "OFR4", 0xFFFF_FFFF),
    ro(offset::JDR1, "JDR1"),
    ro(offset::JDR2, "JDR2"),
    ro(offset::JDR3, "JDR3"),
    ro(offset::JDR4, "JDR4"),
    rw(offset::AWD2CR, "AWD2CR", 0x000F_FFFF),
    rw(offset::AWD3CR, "AWD3CR", 0x000F_FFFF),
    rw(offset::LTR2, "LTR2", 0x03FF_FFFF),
    RegisterDescriptor {
        reset: 0x03FF_FFFF,
        ..rw(offset::HTR2, "HTR2", 0x03FF_FFFF)
    },
    rw(offset::LTR3, "LTR3", 0x03FF_FFFF),
    RegisterDescriptor {
        reset: 0x03FF_FFFF,
        ..rw(offset::HTR3, "HTR3", 0x03FF_FFFF)
    },
    rw(offset::DIFSEL, "DIFSEL", 0x000F_FFFF),
    rw(offset::CALFACT, "CALFACT", 0x07FF_07FF),
    rw(offset::CALFACT2, "CALFACT2", 0x3FFF_FFFF),
];

/// Look up the register declared at `offset`.
pub fn descriptor(offset: usize) -> Option<&'static RegisterDescriptor> {
    REGISTERS.iter().find(|register| register.offset == offset)
}

pub struct RegisterBank {
    words: [Cell<u32>; WINDOW_SIZE / 4],
}

impl RegisterBank {
    pub fn new() -> RegisterBank {
        let bank = RegisterBank {
            words: core::array::from_fn(|_| Cell::new(0)),
        };
        bank.reset();
        bank
    }

    /// Put every register back to its reset value.
    pub fn reset(&self) {
        for register in REGISTERS.iter() {
            self.store(register.offset, register.reset);
        }
    }

    /// Raw value at `offset`, no side effects.
    pub fn load(&self, offset: usize) -> u32 {
        self.words[offset / 4].get()
    }

    /// Overwrite the value at `offset`, bypassing the access policy.
    pub fn store(&self, offset: usize, value: u32) {
        self.words[offset / 4].set(value);
    }

    pub fn view<R: RegisterLongName>(&self, offset: usize) -> LocalRegisterCopy<u32, R> {
        LocalRegisterCopy::new(self.load(offset))
    }

    pub fn modify<R: RegisterLongName>(&self, offset: usize, field: FieldValue<u32, R>) {
        let mut register = self.view::<R>(offset);
        register.modify(field);
        self.store(offset, register.get());
    }

    pub fn is_set<R: RegisterLongName>(&self, offset: usize, field: Field<u32, R>) -> bool {
        self.view::<R>(offset).is_set(field)
    }

    /// Apply a word write from the bus to `register`.
    ///
    /// Returns the hook to run, if the register has one. Read-only registers
    /// refuse the write with `NOSUPPORT` and keep their value.
    pub fn write(
        &self,
        register: &RegisterDescriptor,
        value: u32,
    ) -> Result<Option<Hook>, ErrorCode> {
        let previous = self.load(register.offset);
        let next = match register.access {
            Access::ReadOnly => return Err(ErrorCode::NOSUPPORT),
            Access::ReadWrite => (previous & !register.writable) | (value & register.writable),
            Access::WriteOneToClear => previous & !(value & register.writable),
        };
        self.store(register.offset, next);
        Ok(register.hook)
    }
}
