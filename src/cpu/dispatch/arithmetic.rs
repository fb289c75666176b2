/*!
arithmetic.rs - Add, subtract, compare, increment/decrement and DAA.

Flag sources (Z N H C):
  ADD/ADC A,x          Alu V0  Alu Alu
  SUB/SBC/CP A,x       Alu V1  Alu Alu
  INC r8 / (HL)        Alu V0  Alu Cpu
  DEC r8 / (HL)        Alu V1  Alu Cpu
  ADD HL,r16           Cpu V0  Alu Alu   (high-byte carry chain)
  ADD SP,e8 / LD HL,SP+e8
                       V0  V0  Alu Alu   (low-byte carry chain)
  INC/DEC r16          unchanged
  DAA                  Alu Cpu V0  Alu

ADC/SBC feed the current C flag into the ALU only when the encoding selects the
carrying variant.
*/

use crate::bits;
use crate::bus::Bus;
use crate::cpu::alu;
use crate::cpu::core::Cpu;
use crate::cpu::dispatch::{Exec, FlagSrc};
use crate::cpu::opcode::Family;
use crate::cpu::regs::{Flag, Reg, Reg16};

use FlagSrc::{Alu, Cpu as Prior, V0, V1};

const ADD_FLAGS: [FlagSrc; 4] = [Alu, V0, Alu, Alu];
const SUB_FLAGS: [FlagSrc; 4] = [Alu, V1, Alu, Alu];
const INC_FLAGS: [FlagSrc; 4] = [Alu, V0, Alu, Prior];
const DEC_FLAGS: [FlagSrc; 4] = [Alu, V1, Alu, Prior];

fn add_a(cpu: &mut Cpu, r: u8, carry: bool) {
    let c = carry && cpu.flag(Flag::C);
    let result = alu::add(cpu.reg(Reg::A), r, c);
    cpu.set_reg_from_alu(Reg::A, result, ADD_FLAGS);
}

fn sub_a(cpu: &mut Cpu, r: u8, borrow: bool) {
    let b = borrow && cpu.flag(Flag::C);
    let result = alu::sub(cpu.reg(Reg::A), r, b);
    cpu.set_reg_from_alu(Reg::A, result, SUB_FLAGS);
}

fn cp_a(cpu: &mut Cpu, r: u8) {
    let result = alu::sub(cpu.reg(Reg::A), r, false);
    let [z, n, h, c] = SUB_FLAGS;
    cpu.combine_flags(result, z, n, h, c);
}

pub(super) fn handle(family: Family, cpu: &mut Cpu, bus: &mut Bus, exec: &mut Exec) -> bool {
    use Family as F;
    match family {
        F::AddAN8 { carry } => add_a(cpu, exec.imm8(bus), carry),
        F::AddAR8 { src, carry } => {
            let v = cpu.reg(src);
            add_a(cpu, v, carry);
        }
        F::AddAHlR { carry } => {
            let v = cpu.read_hl(bus);
            add_a(cpu, v, carry);
        }
        F::IncR8 { reg } => {
            let result = alu::add(cpu.reg(reg), 1, false);
            cpu.set_reg_from_alu(reg, result, INC_FLAGS);
        }
        F::IncHlR => {
            let result = alu::add(cpu.read_hl(bus), 1, false);
            cpu.write_hl_from_alu(bus, result, INC_FLAGS);
        }
        F::IncR16Sp { reg } => cpu.set_wide(reg, cpu.wide(reg).wrapping_add(1)),
        F::AddHlR16Sp { src } => {
            let result = alu::add16_high(cpu.reg16(Reg16::HL), cpu.wide(src));
            cpu.set_reg16(Reg16::HL, result.value());
            cpu.combine_flags(result, Prior, V0, Alu, Alu);
        }
        F::LdHlSpS8 { to_hl } => {
            let offset = bits::clip(16, bits::sign_extend8(exec.imm8(bus)) as u32) as u16;
            let result = alu::add16_low(cpu.sp, offset);
            if to_hl {
                cpu.set_reg16(Reg16::HL, result.value());
            } else {
                cpu.sp = result.value();
            }
            cpu.combine_flags(result, V0, V0, Alu, Alu);
        }

        F::SubAN8 { borrow } => sub_a(cpu, exec.imm8(bus), borrow),
        F::SubAR8 { src, borrow } => {
            let v = cpu.reg(src);
            sub_a(cpu, v, borrow);
        }
        F::SubAHlR { borrow } => {
            let v = cpu.read_hl(bus);
            sub_a(cpu, v, borrow);
        }
        F::DecR8 { reg } => {
            let result = alu::sub(cpu.reg(reg), 1, false);
            cpu.set_reg_from_alu(reg, result, DEC_FLAGS);
        }
        F::DecHlR => {
            let result = alu::sub(cpu.read_hl(bus), 1, false);
            cpu.write_hl_from_alu(bus, result, DEC_FLAGS);
        }
        F::CpAN8 => cp_a(cpu, exec.imm8(bus)),
        F::CpAR8 { src } => {
            let v = cpu.reg(src);
            cp_a(cpu, v);
        }
        F::CpAHlR => {
            let v = cpu.read_hl(bus);
            cp_a(cpu, v);
        }
        F::DecR16Sp { reg } => cpu.set_wide(reg, cpu.wide(reg).wrapping_sub(1)),

        F::Daa => {
            let result = alu::bcd_adjust(
                cpu.reg(Reg::A),
                cpu.flag(Flag::N),
                cpu.flag(Flag::H),
                cpu.flag(Flag::C),
            );
            cpu.set_reg_from_alu(Reg::A, result, [Alu, Prior, V0, Alu]);
        }
        _ => return false,
    }
    true
}

#[cfg(test)]
mod tests {
    use crate::cpu::dispatch::test_support::Harness;
    use crate::cpu::regs::{Reg, Reg16};

    #[test]
    fn add_immediate_register_and_memory() {
        // LD A,0x42; ADD A,0x42
        let mut h = Harness::new(&[0x3E, 0x42, 0xC6, 0x42]);
        h.run(2);
        assert_eq!(
            h.cpu.registers_snapshot(),
            [4, 0, 0x84, 0, 0, 0, 0, 0, 0, 0]
        );

        // LD A,0x42; LD HL,0x3542; ADD A,(HL) with 0x42 at 0x3542
        let mut h = Harness::new(&[0x3E, 0x42, 0x21, 0x42, 0x35, 0x86]);
        crate::test_utils::poke(&h.ram, 0x3542, &[0x42]);
        h.run(2);
        assert_eq!(h.step(), 2);
        assert_eq!(
            h.cpu.registers_snapshot(),
            [6, 0, 0x84, 0, 0, 0, 0, 0, 0x35, 0x42]
        );
    }

    #[test]
    fn adc_uses_carry_only_when_selected() {
        // SCF; LD A,0x42; LD HL,0x3542; ADC A,(HL)
        let mut h = Harness::new(&[0x37, 0x3E, 0x42, 0x21, 0x42, 0x35, 0x8E]);
        crate::test_utils::poke(&h.ram, 0x3542, &[0x42]);
        h.run(4);
        assert_eq!(h.cpu.reg(Reg::A), 0x85);
        assert_eq!(h.f(), 0);

        // SCF; ADD A,0 keeps C out of the sum
        let mut h = Harness::new(&[0x37, 0xC6, 0x00]);
        h.run(2);
        assert_eq!(h.cpu.reg(Reg::A), 0);
        assert_eq!(h.f(), 0x80);
    }

    #[test]
    fn inc_and_dec_keep_carry() {
        // LD A,0xFF; INC A
        let mut h = Harness::new(&[0x3E, 0xFF, 0x3C]);
        h.run(2);
        assert_eq!(
            h.cpu.registers_snapshot(),
            [3, 0, 0, 0xA0, 0, 0, 0, 0, 0, 0]
        );

        // SCF; DEC D
        let mut h = Harness::new(&[0x37, 0x15]);
        h.run(2);
        assert_eq!(h.cpu.reg(Reg::D), 0xFF);
        assert_eq!(h.f(), 0x40 | 0x20 | 0x10);
    }

    #[test]
    fn inc_dec_memory() {
        // LD HL,0x0300; INC (HL); INC (HL); DEC (HL)
        let mut h = Harness::new(&[0x21, 0x00, 0x03, 0x34, 0x34, 0x35]);
        h.step();
        assert_eq!(h.step(), 3);
        h.run(2);
        assert_eq!(h.ram.borrow().read(0x300), 1);
        assert_eq!(h.f(), 0x40);
    }

    #[test]
    fn sixteen_bit_inc_dec_leave_flags() {
        // LD SP,0xFFFF; INC SP
        let mut h = Harness::new(&[0x31, 0xFF, 0xFF, 0x33]);
        h.run(2);
        assert_eq!(h.cpu.registers_snapshot(), [4, 0, 0, 0, 0, 0, 0, 0, 0, 0]);

        // DEC SP from 0
        let mut h = Harness::new(&[0x3B]);
        assert_eq!(h.step(), 2);
        assert_eq!(h.cpu.sp(), 0xFFFF);
        assert_eq!(h.f(), 0);

        // LD BC,0x00FF; INC BC
        let mut h = Harness::new(&[0x01, 0xFF, 0x00, 0x03]);
        h.run(2);
        assert_eq!(h.cpu.reg16(Reg16::BC), 0x0100);
    }

    #[test]
    fn add_hl_r16_uses_high_byte_carry() {
        // LD HL,0x0FFF; LD SP,0x0001; ADD HL,SP
        let mut h = Harness::new(&[0x21, 0xFF, 0x0F, 0x31, 0x01, 0x00, 0x39]);
        h.run(3);
        assert_eq!(h.cpu.reg16(Reg16::HL), 0x1000);
        assert_eq!(h.f(), 0x20);

        // Z is preserved: XOR A sets it, ADD HL,HL leaves it
        let mut h = Harness::new(&[0xAF, 0x21, 0x00, 0x80, 0x29]);
        h.run(3);
        assert_eq!(h.cpu.reg16(Reg16::HL), 0x0000);
        assert_eq!(h.f(), 0x80 | 0x10);
    }

    #[test]
    fn sp_relative_adds() {
        // LD SP,0x000F; ADD SP,1 ; LD HL,SP+(-1)
        let mut h = Harness::new(&[0x31, 0x0F, 0x00, 0xE8, 0x01, 0xF8, 0xFF]);
        h.step();
        assert_eq!(h.step(), 4);
        assert_eq!(h.cpu.sp(), 0x0010);
        assert_eq!(h.f(), 0x20);
        assert_eq!(h.step(), 3);
        assert_eq!(h.cpu.reg16(Reg16::HL), 0x000F);
        // 0x10 + 0xFF: no half carry, byte carry
        assert_eq!(h.f(), 0x10);
        assert_eq!(h.cpu.sp(), 0x0010);
    }

    #[test]
    fn sub_sbc_and_cp() {
        // LD A,0x42; SUB A,0x42
        let mut h = Harness::new(&[0x3E, 0x42, 0xD6, 0x42]);
        h.run(2);
        assert_eq!(
            h.cpu.registers_snapshot(),
            [4, 0, 0, 0xC0, 0, 0, 0, 0, 0, 0]
        );

        // SCF; SBC A,0 from 0 -> 0xFF with N H C
        let mut h = Harness::new(&[0x37, 0xDE, 0x00]);
        h.run(2);
        assert_eq!(h.cpu.reg(Reg::A), 0xFF);
        assert_eq!(h.f(), 0x70);

        // LD A,0x42; LD D,0x36; CP A,D leaves A
        let mut h = Harness::new(&[0x3E, 0x42, 0x16, 0x36, 0xBA]);
        h.run(3);
        assert_eq!(
            h.cpu.registers_snapshot(),
            [5, 0, 0x42, 0x60, 0, 0, 0x36, 0, 0, 0]
        );
    }

    #[test]
    fn daa_after_add_and_sub() {
        // LD A,0x15; ADD A,0x27; DAA  => 0x42
        let mut h = Harness::new(&[0x3E, 0x15, 0xC6, 0x27, 0x27]);
        h.run(3);
        assert_eq!(h.cpu.reg(Reg::A), 0x42);
        assert_eq!(h.f(), 0);

        // LD A,0x42; SUB A,0x15; DAA => 0x27, N kept
        let mut h = Harness::new(&[0x3E, 0x42, 0xD6, 0x15, 0x27]);
        h.run(3);
        assert_eq!(h.cpu.reg(Reg::A), 0x27);
        assert_eq!(h.f(), 0x40);
    }
}
