/*!
regs.rs - Register file of the SM83 core: eight 8-bit slots, four 16-bit pairs
and the flag bits of F.

Overview
========
`RegisterFile` owns the eight architectural byte registers. Slots are addressed
by `Reg`, a closed tag set whose storage index comes from an explicit table
(`Reg::index`) rather than declaration order. 16-bit registers are views over two
slots (`Reg16::pair`), composed big-endian (`high * 256 + low`).

PC and SP are not slots; they live on `Cpu` directly.

Flag register layout
====================
Bit: 7 6 5 4 3 2 1 0
     Z N H C 0 0 0 0
The low nibble is always zero. Writes to F (directly or through AF) mask it.
*/

use crate::bits;

/// One of the eight 8-bit register slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reg {
    A,
    F,
    B,
    C,
    D,
    E,
    H,
    L,
}

impl Reg {
    pub const ALL: [Reg; 8] = [
        Reg::A,
        Reg::F,
        Reg::B,
        Reg::C,
        Reg::D,
        Reg::E,
        Reg::H,
        Reg::L,
    ];

    /// Storage slot index.
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Reg::A => 0,
            Reg::F => 1,
            Reg::B => 2,
            Reg::C => 3,
            Reg::D => 4,
            Reg::E => 5,
            Reg::H => 6,
            Reg::L => 7,
        }
    }

    /// Decode the 3-bit operand field used by loads and ALU ops
    /// (0=B 1=C 2=D 3=E 4=H 5=L 7=A). Field value 6 means `(HL)` and has no slot.
    pub const fn from_operand(field: u8) -> Option<Reg> {
        match field & 0x07 {
            0 => Some(Reg::B),
            1 => Some(Reg::C),
            2 => Some(Reg::D),
            3 => Some(Reg::E),
            4 => Some(Reg::H),
            5 => Some(Reg::L),
            7 => Some(Reg::A),
            _ => None,
        }
    }
}

/// 16-bit register pairs built from two slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reg16 {
    AF,
    BC,
    DE,
    HL,
}

impl Reg16 {
    /// `(high, low)` slots of the pair.
    #[inline]
    pub const fn pair(self) -> (Reg, Reg) {
        match self {
            Reg16::AF => (Reg::A, Reg::F),
            Reg16::BC => (Reg::B, Reg::C),
            Reg16::DE => (Reg::D, Reg::E),
            Reg16::HL => (Reg::H, Reg::L),
        }
    }
}

/// Flag bits of F.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flag {
    Z,
    N,
    H,
    C,
}

impl Flag {
    pub const ALL: [Flag; 4] = [Flag::Z, Flag::N, Flag::H, Flag::C];

    /// Bit position inside F.
    #[inline]
    pub const fn bit(self) -> u32 {
        match self {
            Flag::Z => 7,
            Flag::N => 6,
            Flag::H => 5,
            Flag::C => 4,
        }
    }

    #[inline]
    pub const fn mask(self) -> u8 {
        1 << self.bit()
    }
}

/// Z|N|H|C: the only bits F may hold.
pub const FLAGS_MASK: u8 = 0xF0;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterFile {
    slots: [u8; 8],
}

impl RegisterFile {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn get(&self, reg: Reg) -> u8 {
        self.slots[reg.index()]
    }

    /// Store `value`; writes to F drop the low nibble.
    #[inline]
    pub fn set(&mut self, reg: Reg, value: u8) {
        let value = if reg == Reg::F {
            value & FLAGS_MASK
        } else {
            value
        };
        self.slots[reg.index()] = value;
    }

    #[inline]
    #[track_caller]
    pub fn test_bit(&self, reg: Reg, index: u32) -> bool {
        assert!(index < 8, "bit index {index} out of range");
        bits::test(self.get(reg) as u32, index)
    }

    #[inline]
    #[track_caller]
    pub fn set_bit(&mut self, reg: Reg, index: u32, value: bool) {
        assert!(index < 8, "bit index {index} out of range");
        let v = bits::set(self.get(reg) as u32, index, value);
        self.set(reg, v as u8);
    }

    pub fn get16(&self, reg: Reg16) -> u16 {
        let (hi, lo) = reg.pair();
        bits::make16(self.get(hi), self.get(lo))
    }

    pub fn set16(&mut self, reg: Reg16, value: u16) {
        let (hi, lo) = reg.pair();
        self.set(hi, (value >> 8) as u8);
        self.set(lo, value as u8);
    }

    #[inline]
    pub fn flag(&self, flag: Flag) -> bool {
        self.test_bit(Reg::F, flag.bit())
    }

    #[inline]
    pub fn set_flag(&mut self, flag: Flag, value: bool) {
        self.set_bit(Reg::F, flag.bit(), value);
    }
}
