/*!
control_flow.rs - Jumps, calls, returns and restarts.

Handles:
  JP HL   JP n16   JP cc,n16
  JR e8   JR cc,e8
  CALL n16   CALL cc,n16   RST u3
  RET   RET cc   RETI

Every transfer goes through `Exec::jump` so the dispatcher leaves PC alone.
Conditional forms that fail fall through to the next instruction and are charged
the base cost only (`Exec::check` records the failure).

Relative jumps are measured from the address of the following instruction.
CALL and RST push that same address. RETI re-enables IME immediately.
*/

use crate::bits;
use crate::bus::Bus;
use crate::cpu::core::Cpu;
use crate::cpu::dispatch::Exec;
use crate::cpu::opcode::Family;
use crate::cpu::regs::Reg16;

fn relative_target(exec: &Exec, bus: &Bus) -> u16 {
    let offset = bits::sign_extend8(exec.imm8(bus));
    exec.next_pc().wrapping_add(offset as u16)
}

fn call(cpu: &mut Cpu, bus: &mut Bus, exec: &mut Exec, target: u16) {
    let ret = exec.next_pc();
    cpu.push16(bus, ret);
    exec.jump(cpu, target);
}

fn ret(cpu: &mut Cpu, bus: &mut Bus, exec: &mut Exec) {
    let target = cpu.pop16(bus);
    exec.jump(cpu, target);
}

pub(super) fn handle(family: Family, cpu: &mut Cpu, bus: &mut Bus, exec: &mut Exec) -> bool {
    use Family as F;
    match family {
        F::JpHl => {
            let target = cpu.reg16(Reg16::HL);
            exec.jump(cpu, target);
        }
        F::JpN16 => {
            let target = exec.imm16(bus);
            exec.jump(cpu, target);
        }
        F::JpCcN16 { cond } => {
            if exec.check(cpu, cond) {
                let target = exec.imm16(bus);
                exec.jump(cpu, target);
            }
        }
        F::JrE8 => {
            let target = relative_target(exec, bus);
            exec.jump(cpu, target);
        }
        F::JrCcE8 { cond } => {
            if exec.check(cpu, cond) {
                let target = relative_target(exec, bus);
                exec.jump(cpu, target);
            }
        }
        F::CallN16 => {
            let target = exec.imm16(bus);
            call(cpu, bus, exec, target);
        }
        F::CallCcN16 { cond } => {
            if exec.check(cpu, cond) {
                let target = exec.imm16(bus);
                call(cpu, bus, exec, target);
            }
        }
        F::RstU3 { target } => call(cpu, bus, exec, target),
        F::Ret => ret(cpu, bus, exec),
        F::RetCc { cond } => {
            if exec.check(cpu, cond) {
                ret(cpu, bus, exec);
            }
        }
        F::Reti => {
            cpu.ime = true;
            ret(cpu, bus, exec);
        }
        _ => return false,
    }
    true
}
