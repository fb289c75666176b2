//! NOP, EI/DI and HALT.
//!
//! EI takes effect immediately: an interrupt already pending is entered on the
//! next scheduled cycle. HALT parks the schedule until `IE & IF` is non-zero.

use tracing::debug;

use crate::bus::Bus;
use crate::cpu::core::{Cpu, Schedule};
use crate::cpu::dispatch::Exec;
use crate::cpu::opcode::Family;

pub(super) fn handle(family: Family, cpu: &mut Cpu, _bus: &mut Bus, exec: &mut Exec) -> bool {
    match family {
        Family::Nop => {}
        Family::Edi { enable } => cpu.ime = enable,
        Family::Halt => {
            debug!(pc = exec.pc, ime = cpu.ime, "cpu: halted");
            cpu.schedule = Schedule::Idle;
        }
        _ => return false,
    }
    true
}
