//! BIT u3, RES u3 and SET u3 on registers and (HL).
//!
//! BIT sets Z from the complement of the tested bit, clears N, sets H and keeps C.
//! RES/SET leave F alone.

use crate::bits;
use crate::bus::Bus;
use crate::cpu::alu;
use crate::cpu::core::Cpu;
use crate::cpu::dispatch::{Exec, FlagSrc};
use crate::cpu::opcode::Family;

#[inline]
fn change(v: u8, bit: u8, set: bool) -> u8 {
    bits::set(v as u32, bit as u32, set) as u8
}

fn bit_test(cpu: &mut Cpu, v: u8, bit: u8) {
    let result = alu::test_bit(v, bit as u32);
    cpu.combine_flags(result, FlagSrc::Alu, FlagSrc::V0, FlagSrc::V1, FlagSrc::Cpu);
}

pub(super) fn handle(family: Family, cpu: &mut Cpu, bus: &mut Bus, _exec: &mut Exec) -> bool {
    use Family as F;
    match family {
        F::BitU3R8 { bit, reg } => {
            let v = cpu.reg(reg);
            bit_test(cpu, v, bit);
        }
        F::BitU3HlR { bit } => {
            let v = cpu.read_hl(bus);
            bit_test(cpu, v, bit);
        }
        F::ChgU3R8 { bit, set, reg } => {
            let v = change(cpu.reg(reg), bit, set);
            cpu.set_reg(reg, v);
        }
        F::ChgU3HlR { bit, set } => {
            let v = change(cpu.read_hl(bus), bit, set);
            cpu.write_hl(bus, v);
        }
        _ => return false,
    }
    true
}
