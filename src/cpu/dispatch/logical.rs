/*!
logical.rs - Bitwise AND/OR/XOR on the accumulator, CPL and SCF/CCF.

Flag sources (Z N H C):
  AND A,x     Alu V0 V1 V0
  OR/XOR A,x  Alu V0 V0 V0
  CPL         Cpu V1 V1 Cpu
  SCF         Cpu V0 V0 V1
  CCF         Cpu V0 V0 !C
*/

use crate::bits;
use crate::bus::Bus;
use crate::cpu::alu::{self, AluResult};
use crate::cpu::core::Cpu;
use crate::cpu::dispatch::{Exec, FlagSrc};
use crate::cpu::opcode::Family;
use crate::cpu::regs::{Flag, Reg};

use FlagSrc::{Alu, Cpu as Prior, V0, V1};

const AND_FLAGS: [FlagSrc; 4] = [Alu, V0, V1, V0];
const OR_FLAGS: [FlagSrc; 4] = [Alu, V0, V0, V0];

#[derive(Clone, Copy)]
enum Op {
    And,
    Or,
    Xor,
}

fn apply(cpu: &mut Cpu, op: Op, r: u8) {
    let a = cpu.reg(Reg::A);
    let (result, flags) = match op {
        Op::And => (alu::and(a, r), AND_FLAGS),
        Op::Or => (alu::or(a, r), OR_FLAGS),
        Op::Xor => (alu::xor(a, r), OR_FLAGS),
    };
    cpu.set_reg_from_alu(Reg::A, result, flags);
}

pub(super) fn handle(family: Family, cpu: &mut Cpu, bus: &mut Bus, exec: &mut Exec) -> bool {
    use Family as F;
    let (op, operand) = match family {
        F::AndAN8 => (Op::And, exec.imm8(bus)),
        F::AndAR8 { src } => (Op::And, cpu.reg(src)),
        F::AndAHlR => (Op::And, cpu.read_hl(bus)),
        F::OrAN8 => (Op::Or, exec.imm8(bus)),
        F::OrAR8 { src } => (Op::Or, cpu.reg(src)),
        F::OrAHlR => (Op::Or, cpu.read_hl(bus)),
        F::XorAN8 => (Op::Xor, exec.imm8(bus)),
        F::XorAR8 { src } => (Op::Xor, cpu.reg(src)),
        F::XorAHlR => (Op::Xor, cpu.read_hl(bus)),
        F::Cpl => {
            let a = bits::complement8(cpu.reg(Reg::A));
            cpu.set_reg(Reg::A, a);
            cpu.combine_flags(AluResult::new(0, 0), Prior, V1, V1, Prior);
            return true;
        }
        F::Sccf { complement } => {
            let carry = !complement || !cpu.flag(Flag::C);
            let c = if carry { V1 } else { V0 };
            cpu.combine_flags(AluResult::new(0, 0), Prior, V0, V0, c);
            return true;
        }
        _ => return false,
    };
    apply(cpu, op, operand);
    true
}

#[cfg(test)]
mod tests {
    use crate::cpu::dispatch::test_support::Harness;
    use crate::cpu::regs::Reg;
    use crate::test_utils::poke;

    fn with_hl_byte(op: u8, a: u8, mem: u8) -> Harness {
        // LD A,a; LD HL,0x3542; <op> (HL)
        let mut h = Harness::new(&[0x3E, a, 0x21, 0x42, 0x35, op]);
        poke(&h.ram, 0x3542, &[mem]);
        h.run(3);
        h
    }

    #[test]
    fn and_or_xor_memory() {
        let h = with_hl_byte(0xA6, 0x0F, 0xF0); // AND A,(HL)
        assert_eq!(
            h.cpu.registers_snapshot(),
            [6, 0, 0, 0xA0, 0, 0, 0, 0, 0x35, 0x42]
        );
        let h = with_hl_byte(0xB6, 0x0F, 0xF0); // OR A,(HL)
        assert_eq!(
            h.cpu.registers_snapshot(),
            [6, 0, 0xFF, 0, 0, 0, 0, 0, 0x35, 0x42]
        );
        let h = with_hl_byte(0xAE, 0x0F, 0xEF); // XOR A,(HL)
        assert_eq!(
            h.cpu.registers_snapshot(),
            [6, 0, 0xE0, 0, 0, 0, 0, 0, 0x35, 0x42]
        );
    }

    #[test]
    fn logic_clears_carry() {
        // SCF; LD B,0x0F; LD A,0x01; OR A,B; AND A,0xFF
        let mut h = Harness::new(&[0x37, 0x06, 0x0F, 0x3E, 0x01, 0xB0, 0xE6, 0xFF]);
        h.run(4);
        assert_eq!(h.cpu.reg(Reg::A), 0x0F);
        assert_eq!(h.f(), 0);
        assert_eq!(h.step(), 2);
        assert_eq!(h.f(), 0x20);
    }

    #[test]
    fn cpl_keeps_z_and_c() {
        // XOR A; SCF; CPL
        let mut h = Harness::new(&[0xAF, 0x37, 0x2F]);
        h.run(3);
        assert_eq!(h.cpu.reg(Reg::A), 0xFF);
        assert_eq!(h.f(), 0xF0);
    }

    #[test]
    fn scf_and_ccf() {
        // SCF; CCF; CCF
        let mut h = Harness::new(&[0x37, 0x3F, 0x3F]);
        h.step();
        assert_eq!(h.f(), 0x10);
        h.step();
        assert_eq!(h.f(), 0x00);
        h.step();
        assert_eq!(h.f(), 0x10);
    }
}
