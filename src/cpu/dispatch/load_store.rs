/*!
load_store.rs - Load, store and stack-transfer families.

Handles:
  LD r8,(HL)   LD A,(HL±)   LD A,(n8)   LD A,(C)   LD A,(n16)   LD A,(BC|DE)
  LD r8,n8     LD r16,n16   POP r16
  LD (HL),r8   LD (HL±),A   LD (n8),A   LD (C),A   LD (n16),A   LD (BC|DE),A
  LD (HL),n8   LD (n16),SP  LD r8,r8    LD SP,HL   PUSH r16

`(n8)` and `(C)` address the register page: $FF00 + operand.
None of these families touch F (POP AF excepted, which loads it).
*/

use crate::address_map::REGS_START;
use crate::bus::Bus;
use crate::cpu::core::Cpu;
use crate::cpu::dispatch::Exec;
use crate::cpu::opcode::Family;
use crate::cpu::regs::{Reg, Reg16};

#[inline]
fn high_page(offset: u8) -> u16 {
    REGS_START.wrapping_add(offset as u16)
}

pub(super) fn handle(family: Family, cpu: &mut Cpu, bus: &mut Bus, exec: &mut Exec) -> bool {
    use Family as F;
    match family {
        F::LdR8HlR { dst } => {
            let v = cpu.read_hl(bus);
            cpu.set_reg(dst, v);
        }
        F::LdAHlRu { step } => {
            let hl = cpu.reg16(Reg16::HL);
            cpu.set_reg(Reg::A, bus.read(hl));
            cpu.set_reg16(Reg16::HL, step.apply(hl));
        }
        F::LdAN8R => {
            let v = bus.read(high_page(exec.imm8(bus)));
            cpu.set_reg(Reg::A, v);
        }
        F::LdACR => {
            let v = bus.read(high_page(cpu.reg(Reg::C)));
            cpu.set_reg(Reg::A, v);
        }
        F::LdAN16R => {
            let v = bus.read(exec.imm16(bus));
            cpu.set_reg(Reg::A, v);
        }
        F::LdABcR => {
            let v = bus.read(cpu.reg16(Reg16::BC));
            cpu.set_reg(Reg::A, v);
        }
        F::LdADeR => {
            let v = bus.read(cpu.reg16(Reg16::DE));
            cpu.set_reg(Reg::A, v);
        }
        F::LdR8N8 { dst } => {
            let v = exec.imm8(bus);
            cpu.set_reg(dst, v);
        }
        F::LdR16SpN16 { dst } => {
            let v = exec.imm16(bus);
            cpu.set_wide(dst, v);
        }
        F::PopR16 { dst } => {
            let v = cpu.pop16(bus);
            cpu.set_reg16(dst, v);
        }
        F::LdHlRR8 { src } => cpu.write_hl(bus, cpu.reg(src)),
        F::LdHlRuA { step } => {
            let hl = cpu.reg16(Reg16::HL);
            bus.write(hl, cpu.reg(Reg::A));
            cpu.set_reg16(Reg16::HL, step.apply(hl));
        }
        F::LdN8RA => {
            let address = high_page(exec.imm8(bus));
            bus.write(address, cpu.reg(Reg::A));
        }
        F::LdCRA => bus.write(high_page(cpu.reg(Reg::C)), cpu.reg(Reg::A)),
        F::LdN16RA => {
            let address = exec.imm16(bus);
            bus.write(address, cpu.reg(Reg::A));
        }
        F::LdBcRA => bus.write(cpu.reg16(Reg16::BC), cpu.reg(Reg::A)),
        F::LdDeRA => bus.write(cpu.reg16(Reg16::DE), cpu.reg(Reg::A)),
        F::LdHlRN8 => {
            let v = exec.imm8(bus);
            cpu.write_hl(bus, v);
        }
        F::LdN16RSp => {
            let address = exec.imm16(bus);
            bus.write_word(address, cpu.sp);
        }
        F::LdR8R8 { dst, src } => cpu.set_reg(dst, cpu.reg(src)),
        F::LdSpHl => cpu.sp = cpu.reg16(Reg16::HL),
        F::PushR16 { src } => {
            let v = cpu.reg16(src);
            cpu.push16(bus, v);
        }
        _ => return false,
    }
    true
}
