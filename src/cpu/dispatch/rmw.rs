/*!
rmw.rs - Rotates, shifts and nibble swap (register or (HL) read-modify-write).

Handles:
  RLCA RRCA RLA RRA                    (Z forced 0)
  RLC/RRC/RL/RR/SLA/SRA/SRL/SWAP r8    (prefixed)
  RLC/RRC/RL/RR/SLA/SRA/SRL/SWAP (HL)  (prefixed)

The accumulator forms always clear Z; the prefixed forms take Z from the result.
SWAP clears C.
*/

use crate::bus::Bus;
use crate::cpu::alu::{self, AluResult, RotDir};
use crate::cpu::core::Cpu;
use crate::cpu::dispatch::{Exec, FlagSrc};
use crate::cpu::opcode::Family;
use crate::cpu::regs::{Flag, Reg};

use FlagSrc::{Alu, V0};

const ACCUMULATOR_FLAGS: [FlagSrc; 4] = [V0, V0, V0, Alu];
const SHIFT_FLAGS: [FlagSrc; 4] = [Alu, V0, V0, Alu];
const SWAP_FLAGS: [FlagSrc; 4] = [Alu, V0, V0, V0];

/// Operand-independent transformation applied to one byte.
#[derive(Clone, Copy)]
enum Shift {
    Rot(RotDir),
    RotThroughCarry(RotDir),
    Sla,
    Sra,
    Srl,
    Swap,
}

impl Shift {
    fn apply(self, v: u8, carry: bool) -> AluResult {
        match self {
            Shift::Rot(dir) => alu::rotate(dir, v),
            Shift::RotThroughCarry(dir) => alu::rotate_through_carry(dir, v, carry),
            Shift::Sla => alu::shift_left(v),
            Shift::Sra => alu::shift_right_arithmetic(v),
            Shift::Srl => alu::shift_right_logical(v),
            Shift::Swap => alu::swap(v),
        }
    }

    fn flags(self) -> [FlagSrc; 4] {
        match self {
            Shift::Swap => SWAP_FLAGS,
            _ => SHIFT_FLAGS,
        }
    }
}

enum Target {
    Accumulator,
    Register(Reg),
    Memory,
}

pub(super) fn handle(family: Family, cpu: &mut Cpu, bus: &mut Bus, _exec: &mut Exec) -> bool {
    use Family as F;
    let (shift, target) = match family {
        F::RotCA { dir } => (Shift::Rot(dir), Target::Accumulator),
        F::RotA { dir } => (Shift::RotThroughCarry(dir), Target::Accumulator),
        F::RotCR8 { dir, reg } => (Shift::Rot(dir), Target::Register(reg)),
        F::RotR8 { dir, reg } => (Shift::RotThroughCarry(dir), Target::Register(reg)),
        F::RotCHlR { dir } => (Shift::Rot(dir), Target::Memory),
        F::RotHlR { dir } => (Shift::RotThroughCarry(dir), Target::Memory),
        F::SwapR8 { reg } => (Shift::Swap, Target::Register(reg)),
        F::SwapHlR => (Shift::Swap, Target::Memory),
        F::SlaR8 { reg } => (Shift::Sla, Target::Register(reg)),
        F::SraR8 { reg } => (Shift::Sra, Target::Register(reg)),
        F::SrlR8 { reg } => (Shift::Srl, Target::Register(reg)),
        F::SlaHlR => (Shift::Sla, Target::Memory),
        F::SraHlR => (Shift::Sra, Target::Memory),
        F::SrlHlR => (Shift::Srl, Target::Memory),
        _ => return false,
    };

    let carry = cpu.flag(Flag::C);
    match target {
        Target::Accumulator => {
            let result = shift.apply(cpu.reg(Reg::A), carry);
            cpu.set_reg_from_alu(Reg::A, result, ACCUMULATOR_FLAGS);
        }
        Target::Register(reg) => {
            let result = shift.apply(cpu.reg(reg), carry);
            cpu.set_reg_from_alu(reg, result, shift.flags());
        }
        Target::Memory => {
            let result = shift.apply(cpu.read_hl(bus), carry);
            cpu.write_hl_from_alu(bus, result, shift.flags());
        }
    }
    true
}
