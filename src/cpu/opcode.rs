/*!
opcode.rs - Opcode descriptors and the two 256-entry decode tables.

Overview
========
Each encoding maps to an `Opcode` carrying:
- `family`: the semantic operation, as a `Family` variant holding only the
  operands that operation needs (register, pair, bit, condition...)
- `total_bytes`: instruction length including the 0xCB prefix when present
- `cycles`: base cost in machine cycles
- `additional_cycles`: extra cost charged only when a conditional transfer is taken

Tables
======
`DIRECT` and `PREFIXED` are built once on first use and never mutated. Slots are
`None` for unassigned encodings (`0xD3`, `0xDB`, `0xDD`, `0xE3`, `0xE4`, `0xEB`,
`0xEC`, `0xED`, `0xF4`, `0xFC`, `0xFD` and the prefix byte `0xCB` itself). Every
prefixed slot is assigned.

Decoding follows the usual octal split of the encoding byte:

```text
bits  7 6 | 5 4 3 | 2 1 0
      x   |   y   |   z        y = p:q (p = bits 5-4, q = bit 3)
```

so register, pair, bit index and condition fields are extracted once here rather
than at every execution.
*/

use once_cell::sync::Lazy;

use crate::address_map::RESETS;
use crate::cpu::alu::RotDir;
use crate::cpu::regs::{Reg, Reg16};

/// Byte introducing a prefixed (second table) instruction.
pub const PREFIX: u8 = 0xCB;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpcodeKind {
    Direct,
    Prefixed,
}

/// Branch predicate selected by bits 4-3 of the encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    NZ,
    Z,
    NC,
    C,
}

impl Condition {
    const fn from_field(field: u8) -> Self {
        match field & 0b11 {
            0b00 => Condition::NZ,
            0b01 => Condition::Z,
            0b10 => Condition::NC,
            _ => Condition::C,
        }
    }
}

/// 16-bit operand of the pair-addressed families, where the fourth encoding
/// names either SP or AF depending on the family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wide {
    Pair(Reg16),
    Sp,
}

/// Post-access adjustment of HL in `LD A,(HL±)` / `LD (HL±),A`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HlStep {
    Inc,
    Dec,
}

impl HlStep {
    #[inline]
    pub fn apply(self, hl: u16) -> u16 {
        match self {
            HlStep::Inc => hl.wrapping_add(1),
            HlStep::Dec => hl.wrapping_sub(1),
        }
    }
}

/// Semantic operation of an opcode.
///
/// Naming: `R8` register operand, `HlR` the byte at (HL), `N8`/`N16` immediate,
/// `E8` signed displacement, `U3` bit index, `Cc` condition, trailing `R` in
/// `N8R`/`CR`/`N16R`/`BcR`/`DeR` means "memory at".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Family {
    Nop,

    // Loads
    LdR8HlR { dst: Reg },
    LdAHlRu { step: HlStep },
    LdAN8R,
    LdACR,
    LdAN16R,
    LdABcR,
    LdADeR,
    LdR8N8 { dst: Reg },
    LdR16SpN16 { dst: Wide },
    PopR16 { dst: Reg16 },
    LdHlRR8 { src: Reg },
    LdHlRuA { step: HlStep },
    LdN8RA,
    LdCRA,
    LdN16RA,
    LdBcRA,
    LdDeRA,
    LdHlRN8,
    LdN16RSp,
    LdR8R8 { dst: Reg, src: Reg },
    LdSpHl,
    PushR16 { src: Reg16 },

    // Add
    AddAN8 { carry: bool },
    AddAR8 { src: Reg, carry: bool },
    AddAHlR { carry: bool },
    IncR8 { reg: Reg },
    IncHlR,
    IncR16Sp { reg: Wide },
    AddHlR16Sp { src: Wide },
    /// `ADD SP,e8` (`to_hl == false`) or `LD HL,SP+e8`.
    LdHlSpS8 { to_hl: bool },

    // Subtract and compare
    SubAN8 { borrow: bool },
    SubAR8 { src: Reg, borrow: bool },
    SubAHlR { borrow: bool },
    DecR8 { reg: Reg },
    DecHlR,
    CpAN8,
    CpAR8 { src: Reg },
    CpAHlR,
    DecR16Sp { reg: Wide },

    // Logic
    AndAN8,
    AndAR8 { src: Reg },
    AndAHlR,
    OrAN8,
    OrAR8 { src: Reg },
    OrAHlR,
    XorAN8,
    XorAR8 { src: Reg },
    XorAHlR,
    Cpl,

    // Rotate and shift
    RotCA { dir: RotDir },
    RotA { dir: RotDir },
    RotCR8 { dir: RotDir, reg: Reg },
    RotR8 { dir: RotDir, reg: Reg },
    RotCHlR { dir: RotDir },
    RotHlR { dir: RotDir },
    SwapR8 { reg: Reg },
    SwapHlR,
    SlaR8 { reg: Reg },
    SraR8 { reg: Reg },
    SrlR8 { reg: Reg },
    SlaHlR,
    SraHlR,
    SrlHlR,

    // Bit test, set and reset
    BitU3R8 { bit: u8, reg: Reg },
    BitU3HlR { bit: u8 },
    ChgU3R8 { bit: u8, set: bool, reg: Reg },
    ChgU3HlR { bit: u8, set: bool },

    // Misc ALU
    Daa,
    /// `SCF` (`complement == false`) or `CCF`.
    Sccf { complement: bool },

    // Jumps
    JpHl,
    JpN16,
    JpCcN16 { cond: Condition },
    JrE8,
    JrCcE8 { cond: Condition },

    // Calls and returns
    CallN16,
    CallCcN16 { cond: Condition },
    RstU3 { target: u16 },
    Ret,
    RetCc { cond: Condition },

    // Interrupts and control
    /// `EI` (`enable == true`) or `DI`.
    Edi { enable: bool },
    Reti,
    Halt,
    Stop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Opcode {
    pub mnemonic: &'static str,
    pub kind: OpcodeKind,
    pub encoding: u8,
    pub family: Family,
    pub total_bytes: u8,
    pub cycles: u8,
    pub additional_cycles: u8,
}

pub static DIRECT: Lazy<[Option<Opcode>; 256]> =
    Lazy::new(|| std::array::from_fn(|i| decode_direct(i as u8)));

pub static PREFIXED: Lazy<[Option<Opcode>; 256]> =
    Lazy::new(|| std::array::from_fn(|i| Some(decode_prefixed(i as u8))));

/// Descriptor for `encoding` in the table selected by `kind`.
pub fn lookup(kind: OpcodeKind, encoding: u8) -> Option<&'static Opcode> {
    let table = match kind {
        OpcodeKind::Direct => &*DIRECT,
        OpcodeKind::Prefixed => &*PREFIXED,
    };
    table[encoding as usize].as_ref()
}

/// Pair selected by bits 5-4; the fourth slot is SP.
const fn wide_sp(p: u8) -> Wide {
    match p & 0b11 {
        0 => Wide::Pair(Reg16::BC),
        1 => Wide::Pair(Reg16::DE),
        2 => Wide::Pair(Reg16::HL),
        _ => Wide::Sp,
    }
}

/// Pair selected by bits 5-4; the fourth slot is AF (PUSH/POP).
const fn pair_af(p: u8) -> Reg16 {
    match p & 0b11 {
        0 => Reg16::BC,
        1 => Reg16::DE,
        2 => Reg16::HL,
        _ => Reg16::AF,
    }
}

#[inline]
fn rot_dir(y: u8) -> RotDir {
    if y & 1 == 0 { RotDir::Left } else { RotDir::Right }
}

fn direct(
    encoding: u8,
    mnemonic: &'static str,
    family: Family,
    total_bytes: u8,
    cycles: u8,
    additional_cycles: u8,
) -> Option<Opcode> {
    Some(Opcode {
        mnemonic,
        kind: OpcodeKind::Direct,
        encoding,
        family,
        total_bytes,
        cycles,
        additional_cycles,
    })
}

fn decode_direct(e: u8) -> Option<Opcode> {
    let x = e >> 6;
    let y = (e >> 3) & 0b111;
    let z = e & 0b111;
    let p = y >> 1;
    let q = y & 1 == 1;
    let r_y = Reg::from_operand(y);
    let r_z = Reg::from_operand(z);
    let cond = Condition::from_field(y);
    let step = if p == 3 { HlStep::Dec } else { HlStep::Inc };

    use Family as F;
    match (x, z) {
        (0, 0) => match y {
            0 => direct(e, "NOP", F::Nop, 1, 1, 0),
            1 => direct(e, "LD (n16),SP", F::LdN16RSp, 3, 5, 0),
            2 => direct(e, "STOP", F::Stop, 2, 1, 0),
            3 => direct(e, "JR e8", F::JrE8, 2, 3, 0),
            _ => direct(e, "JR cc,e8", F::JrCcE8 { cond }, 2, 2, 1),
        },
        (0, 1) if !q => direct(e, "LD r16,n16", F::LdR16SpN16 { dst: wide_sp(p) }, 3, 3, 0),
        (0, 1) => direct(e, "ADD HL,r16", F::AddHlR16Sp { src: wide_sp(p) }, 1, 2, 0),
        (0, 2) => {
            let family = match (p, q) {
                (0, false) => F::LdBcRA,
                (1, false) => F::LdDeRA,
                (_, false) => F::LdHlRuA { step },
                (0, true) => F::LdABcR,
                (1, true) => F::LdADeR,
                (_, true) => F::LdAHlRu { step },
            };
            let mnemonic = if q { "LD A,(r16)" } else { "LD (r16),A" };
            direct(e, mnemonic, family, 1, 2, 0)
        }
        (0, 3) if !q => direct(e, "INC r16", F::IncR16Sp { reg: wide_sp(p) }, 1, 2, 0),
        (0, 3) => direct(e, "DEC r16", F::DecR16Sp { reg: wide_sp(p) }, 1, 2, 0),
        (0, 4) => match r_y {
            Some(reg) => direct(e, "INC r8", F::IncR8 { reg }, 1, 1, 0),
            None => direct(e, "INC (HL)", F::IncHlR, 1, 3, 0),
        },
        (0, 5) => match r_y {
            Some(reg) => direct(e, "DEC r8", F::DecR8 { reg }, 1, 1, 0),
            None => direct(e, "DEC (HL)", F::DecHlR, 1, 3, 0),
        },
        (0, 6) => match r_y {
            Some(dst) => direct(e, "LD r8,n8", F::LdR8N8 { dst }, 2, 2, 0),
            None => direct(e, "LD (HL),n8", F::LdHlRN8, 2, 3, 0),
        },
        (0, _) => {
            let (mnemonic, family) = match y {
                0 => ("RLCA", F::RotCA { dir: RotDir::Left }),
                1 => ("RRCA", F::RotCA { dir: RotDir::Right }),
                2 => ("RLA", F::RotA { dir: RotDir::Left }),
                3 => ("RRA", F::RotA { dir: RotDir::Right }),
                4 => ("DAA", F::Daa),
                5 => ("CPL", F::Cpl),
                6 => ("SCF", F::Sccf { complement: false }),
                _ => ("CCF", F::Sccf { complement: true }),
            };
            direct(e, mnemonic, family, 1, 1, 0)
        }

        (1, _) => match (r_y, r_z) {
            (None, None) => direct(e, "HALT", F::Halt, 1, 1, 0),
            (Some(dst), None) => direct(e, "LD r8,(HL)", F::LdR8HlR { dst }, 1, 2, 0),
            (None, Some(src)) => direct(e, "LD (HL),r8", F::LdHlRR8 { src }, 1, 2, 0),
            (Some(dst), Some(src)) => direct(e, "LD r8,r8", F::LdR8R8 { dst, src }, 1, 1, 0),
        },

        (2, _) => {
            let (mnemonic, family, cycles) = match r_z {
                Some(src) => (ALU_R8[y as usize], alu_r8(y, src), 1),
                None => (ALU_HLR[y as usize], alu_hlr(y), 2),
            };
            direct(e, mnemonic, family, 1, cycles, 0)
        }

        (_, 0) => match y {
            0..=3 => direct(e, "RET cc", F::RetCc { cond }, 1, 2, 3),
            4 => direct(e, "LD (n8),A", F::LdN8RA, 2, 3, 0),
            5 => direct(e, "ADD SP,e8", F::LdHlSpS8 { to_hl: false }, 2, 4, 0),
            6 => direct(e, "LD A,(n8)", F::LdAN8R, 2, 3, 0),
            _ => direct(e, "LD HL,SP+e8", F::LdHlSpS8 { to_hl: true }, 2, 3, 0),
        },
        (_, 1) if !q => direct(e, "POP r16", F::PopR16 { dst: pair_af(p) }, 1, 3, 0),
        (_, 1) => match p {
            0 => direct(e, "RET", F::Ret, 1, 4, 0),
            1 => direct(e, "RETI", F::Reti, 1, 4, 0),
            2 => direct(e, "JP HL", F::JpHl, 1, 1, 0),
            _ => direct(e, "LD SP,HL", F::LdSpHl, 1, 2, 0),
        },
        (_, 2) => match y {
            0..=3 => direct(e, "JP cc,n16", F::JpCcN16 { cond }, 3, 3, 1),
            4 => direct(e, "LD (C),A", F::LdCRA, 1, 2, 0),
            5 => direct(e, "LD (n16),A", F::LdN16RA, 3, 4, 0),
            6 => direct(e, "LD A,(C)", F::LdACR, 1, 2, 0),
            _ => direct(e, "LD A,(n16)", F::LdAN16R, 3, 4, 0),
        },
        (_, 3) => match y {
            0 => direct(e, "JP n16", F::JpN16, 3, 4, 0),
            6 => direct(e, "DI", F::Edi { enable: false }, 1, 1, 0),
            7 => direct(e, "EI", F::Edi { enable: true }, 1, 1, 0),
            _ => None,
        },
        (_, 4) => match y {
            0..=3 => direct(e, "CALL cc,n16", F::CallCcN16 { cond }, 3, 3, 3),
            _ => None,
        },
        (_, 5) if !q => direct(e, "PUSH r16", F::PushR16 { src: pair_af(p) }, 1, 4, 0),
        (_, 5) => match p {
            0 => direct(e, "CALL n16", F::CallN16, 3, 6, 0),
            _ => None,
        },
        (_, 6) => direct(e, ALU_N8[y as usize], alu_n8(y), 2, 2, 0),
        (_, _) => direct(
            e,
            "RST u3",
            F::RstU3 {
                target: RESETS[y as usize],
            },
            1,
            4,
            0,
        ),
    }
}

const ALU_R8: [&str; 8] = [
    "ADD A,r8", "ADC A,r8", "SUB A,r8", "SBC A,r8", "AND A,r8", "XOR A,r8", "OR A,r8", "CP A,r8",
];
const ALU_HLR: [&str; 8] = [
    "ADD A,(HL)",
    "ADC A,(HL)",
    "SUB A,(HL)",
    "SBC A,(HL)",
    "AND A,(HL)",
    "XOR A,(HL)",
    "OR A,(HL)",
    "CP A,(HL)",
];
const ALU_N8: [&str; 8] = [
    "ADD A,n8", "ADC A,n8", "SUB A,n8", "SBC A,n8", "AND A,n8", "XOR A,n8", "OR A,n8", "CP A,n8",
];

// ALU operation order in y: ADD ADC SUB SBC AND XOR OR CP. Bit 0 of y is the
// carry/borrow selector for the add and subtract rows.

fn alu_r8(y: u8, src: Reg) -> Family {
    let carry = y & 1 == 1;
    match y {
        0 | 1 => Family::AddAR8 { src, carry },
        2 | 3 => Family::SubAR8 { src, borrow: carry },
        4 => Family::AndAR8 { src },
        5 => Family::XorAR8 { src },
        6 => Family::OrAR8 { src },
        _ => Family::CpAR8 { src },
    }
}

fn alu_hlr(y: u8) -> Family {
    let carry = y & 1 == 1;
    match y {
        0 | 1 => Family::AddAHlR { carry },
        2 | 3 => Family::SubAHlR { borrow: carry },
        4 => Family::AndAHlR,
        5 => Family::XorAHlR,
        6 => Family::OrAHlR,
        _ => Family::CpAHlR,
    }
}

fn alu_n8(y: u8) -> Family {
    let carry = y & 1 == 1;
    match y {
        0 | 1 => Family::AddAN8 { carry },
        2 | 3 => Family::SubAN8 { borrow: carry },
        4 => Family::AndAN8,
        5 => Family::XorAN8,
        6 => Family::OrAN8,
        _ => Family::CpAN8,
    }
}

fn decode_prefixed(e: u8) -> Opcode {
    let x = e >> 6;
    let y = (e >> 3) & 0b111;
    let operand = Reg::from_operand(e & 0b111);
    let dir = rot_dir(y);
    let set = x == 3;

    use Family as F;
    let (mnemonic, family) = match (x, operand) {
        (0, Some(reg)) => match y {
            0 | 1 => ("RLC/RRC r8", F::RotCR8 { dir, reg }),
            2 | 3 => ("RL/RR r8", F::RotR8 { dir, reg }),
            4 => ("SLA r8", F::SlaR8 { reg }),
            5 => ("SRA r8", F::SraR8 { reg }),
            6 => ("SWAP r8", F::SwapR8 { reg }),
            _ => ("SRL r8", F::SrlR8 { reg }),
        },
        (0, None) => match y {
            0 | 1 => ("RLC/RRC (HL)", F::RotCHlR { dir }),
            2 | 3 => ("RL/RR (HL)", F::RotHlR { dir }),
            4 => ("SLA (HL)", F::SlaHlR),
            5 => ("SRA (HL)", F::SraHlR),
            6 => ("SWAP (HL)", F::SwapHlR),
            _ => ("SRL (HL)", F::SrlHlR),
        },
        (1, Some(reg)) => ("BIT u3,r8", F::BitU3R8 { bit: y, reg }),
        (1, None) => ("BIT u3,(HL)", F::BitU3HlR { bit: y }),
        (_, Some(reg)) => ("RES/SET u3,r8", F::ChgU3R8 { bit: y, set, reg }),
        (_, None) => ("RES/SET u3,(HL)", F::ChgU3HlR { bit: y, set }),
    };

    let cycles = match (x, operand) {
        (_, Some(_)) => 2,
        (1, None) => 3,
        (_, None) => 4,
    };

    Opcode {
        mnemonic,
        kind: OpcodeKind::Prefixed,
        encoding: e,
        family,
        total_bytes: 2,
        cycles,
        additional_cycles: 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(e: u8) -> &'static Opcode {
        lookup(OpcodeKind::Direct, e).unwrap()
    }

    fn p(e: u8) -> &'static Opcode {
        lookup(OpcodeKind::Prefixed, e).unwrap()
    }

    #[test]
    fn unassigned_direct_slots() {
        let absent: Vec<u8> = (0..=255u8)
            .filter(|&e| lookup(OpcodeKind::Direct, e).is_none())
            .collect();
        assert_eq!(
            absent,
            vec![0xCB, 0xD3, 0xDB, 0xDD, 0xE3, 0xE4, 0xEB, 0xEC, 0xED, 0xF4, 0xFC, 0xFD]
        );
        assert!(PREFIXED.iter().all(Option::is_some));
    }

    #[test]
    fn entries_know_their_encoding_and_table() {
        for e in 0..=255u8 {
            if let Some(op) = lookup(OpcodeKind::Direct, e) {
                assert_eq!(op.encoding, e);
                assert_eq!(op.kind, OpcodeKind::Direct);
            }
            assert_eq!(p(e).encoding, e);
            assert_eq!(p(e).kind, OpcodeKind::Prefixed);
            assert_eq!(p(e).total_bytes, 2);
        }
    }

    #[test]
    fn load_decoding() {
        assert_eq!(d(0x06).family, Family::LdR8N8 { dst: Reg::B });
        assert_eq!(d(0x3E).family, Family::LdR8N8 { dst: Reg::A });
        assert_eq!(
            d(0x57).family,
            Family::LdR8R8 {
                dst: Reg::D,
                src: Reg::A
            }
        );
        assert_eq!(d(0x46).family, Family::LdR8HlR { dst: Reg::B });
        assert_eq!(d(0x70).family, Family::LdHlRR8 { src: Reg::B });
        assert_eq!(d(0x22).family, Family::LdHlRuA { step: HlStep::Inc });
        assert_eq!(d(0x3A).family, Family::LdAHlRu { step: HlStep::Dec });
        assert_eq!(d(0x31).family, Family::LdR16SpN16 { dst: Wide::Sp });
        assert_eq!(d(0xF1).family, Family::PopR16 { dst: Reg16::AF });
        assert_eq!(d(0xC5).family, Family::PushR16 { src: Reg16::BC });
        assert_eq!(d(0xE0).family, Family::LdN8RA);
        assert_eq!(d(0xF2).family, Family::LdACR);
    }

    #[test]
    fn arithmetic_decoding() {
        assert_eq!(
            d(0x80).family,
            Family::AddAR8 {
                src: Reg::B,
                carry: false
            }
        );
        assert_eq!(d(0x8E).family, Family::AddAHlR { carry: true });
        assert_eq!(d(0xDE).family, Family::SubAN8 { borrow: true });
        assert_eq!(d(0xBF).family, Family::CpAR8 { src: Reg::A });
        assert_eq!(d(0x0D).family, Family::DecR8 { reg: Reg::C });
        assert_eq!(d(0x33).family, Family::IncR16Sp { reg: Wide::Sp });
        assert_eq!(
            d(0x29).family,
            Family::AddHlR16Sp {
                src: Wide::Pair(Reg16::HL)
            }
        );
        assert_eq!(d(0xE8).family, Family::LdHlSpS8 { to_hl: false });
        assert_eq!(d(0xF8).family, Family::LdHlSpS8 { to_hl: true });
        assert_eq!(d(0xEE).family, Family::XorAN8);
    }

    #[test]
    fn control_decoding() {
        assert_eq!(
            d(0xC2).family,
            Family::JpCcN16 {
                cond: Condition::NZ
            }
        );
        assert_eq!(d(0x38).family, Family::JrCcE8 { cond: Condition::C });
        assert_eq!(d(0xC8).family, Family::RetCc { cond: Condition::Z });
        assert_eq!(d(0xFF).family, Family::RstU3 { target: 0x38 });
        assert_eq!(d(0xFB).family, Family::Edi { enable: true });
        assert_eq!(d(0xF3).family, Family::Edi { enable: false });
        assert_eq!(d(0x76).family, Family::Halt);
        assert_eq!(d(0x10).family, Family::Stop);
        assert_eq!(d(0x3F).family, Family::Sccf { complement: true });
    }

    #[test]
    fn prefixed_decoding() {
        assert_eq!(
            p(0x00).family,
            Family::RotCR8 {
                dir: RotDir::Left,
                reg: Reg::B
            }
        );
        assert_eq!(p(0x1E).family, Family::RotHlR { dir: RotDir::Right });
        assert_eq!(p(0x37).family, Family::SwapR8 { reg: Reg::A });
        assert_eq!(p(0x7E).family, Family::BitU3HlR { bit: 7 });
        assert_eq!(
            p(0x87).family,
            Family::ChgU3R8 {
                bit: 0,
                set: false,
                reg: Reg::A
            }
        );
        assert_eq!(p(0xFE).family, Family::ChgU3HlR { bit: 7, set: true });
    }

    // One row per high nibble, one hex digit per low nibble; '-' is unassigned.
    const DIRECT_BYTES: [&str; 16] = [
        "1311112131111121",
        "2311112121111121",
        "2311112121111121",
        "2311112121111121",
        "1111111111111111",
        "1111111111111111",
        "1111111111111111",
        "1111111111111111",
        "1111111111111111",
        "1111111111111111",
        "1111111111111111",
        "1111111111111111",
        "11333121113-3321",
        "113-3121113-3-21",
        "211--121213---21",
        "2111-1212131--21",
    ];
    const DIRECT_CYCLES: [&str; 16] = [
        "1322112152221121",
        "1322112132221121",
        "2322112122221121",
        "2322333122221121",
        "1111112111111121",
        "1111112111111121",
        "1111112111111121",
        "2222221211111121",
        "1111112111111121",
        "1111112111111121",
        "1111112111111121",
        "1111112111111121",
        "23343424243-3624",
        "233-3424243-3-24",
        "332--424414---24",
        "3321-4243241--24",
    ];
    const DIRECT_TAKEN: [&str; 16] = [
        "0000000000000000",
        "0000000000000000",
        "1000000010000000",
        "1000000010000000",
        "0000000000000000",
        "0000000000000000",
        "0000000000000000",
        "0000000000000000",
        "0000000000000000",
        "0000000000000000",
        "0000000000000000",
        "0000000000000000",
        "3010300030103000",
        "3010300030103000",
        "0000000000000000",
        "0000000000000000",
    ];

    fn grid(rows: &[&str; 16], e: u8) -> Option<u8> {
        let digit = rows[(e >> 4) as usize].as_bytes()[(e & 0xF) as usize];
        (digit as char).to_digit(16).map(|v| v as u8)
    }

    fn timing(op: &Opcode) -> (u8, u8, u8) {
        (op.total_bytes, op.cycles, op.additional_cycles)
    }

    #[test]
    fn direct_timings() {
        for e in 0..=255u8 {
            let actual = lookup(OpcodeKind::Direct, e).map(timing);
            let Some(len) = grid(&DIRECT_BYTES, e) else {
                assert!(actual.is_none(), "{e:#04X} should be unassigned");
                continue;
            };
            let cycles = grid(&DIRECT_CYCLES, e).unwrap();
            let taken = grid(&DIRECT_TAKEN, e).unwrap();
            assert_eq!(actual, Some((len, cycles, taken)), "encoding {e:#04X}");
        }
    }

    #[test]
    fn prefixed_timings() {
        for e in 0..=255u8 {
            let cycles = match (e >> 6, e & 0b111) {
                (_, z) if z != 6 => 2,
                (1, _) => 3,
                _ => 4,
            };
            assert_eq!(timing(p(e)), (2, cycles, 0), "encoding CB {e:#04X}");
        }
    }
}
