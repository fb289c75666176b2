/*!
dispatch - One unit of processor work (interrupt entry or one instruction).

Overview
========
`step` is called by `Cpu::cycle` on the cycle the schedule names:
1. If IME is set and an interrupt is both requested and enabled, enter the
   highest-priority one (IME cleared, IF bit cleared, PC pushed, jump to the
   vector, 5 cycles).
2. Otherwise fetch the opcode at PC (`0xCB` selects the prefixed table on the
   following byte), decode it and hand the `Family` to the handler chain.
3. Advance PC by the instruction length unless the instruction set PC itself,
   and move the schedule forward by the base cost plus the conditional cost when
   the condition held.

Handler chain
=============
Each family module exposes `handle(family, cpu, bus, exec) -> bool`,
returning `true` when it recognised and executed the family. Handlers never touch
the schedule; they report control transfers and failed conditions through `Exec`.

```text
load_store   - 8/16-bit loads, stores, PUSH/POP
arithmetic   - ADD/ADC/SUB/SBC/CP, INC/DEC, 16-bit adds, DAA
logical      - AND/OR/XOR, CPL, SCF/CCF
rmw          - rotates, shifts, SWAP
bit_ops      - BIT/RES/SET
control_flow - JP/JR/CALL/RET/RST/RETI
misc         - NOP, EI/DI, HALT
```

STOP is rejected here before the chain runs.

Flag combination
================
ALU results carry a full Z/N/H/C mask; each family states per flag where the new
value comes from (`FlagSrc`): forced 0, forced 1, the ALU result or the previous F.
*/

use tracing::{debug, trace};

use crate::bus::Bus;
use crate::cpu::alu::AluResult;
use crate::cpu::core::{Cpu, Interrupt, Schedule};
use crate::cpu::opcode::{self, Condition, Family, Opcode, OpcodeKind, PREFIX};
use crate::cpu::regs::{Flag, Reg};
use crate::error::{GameBoyError, Result};

pub(crate) mod arithmetic;
pub(crate) mod bit_ops;
pub(crate) mod control_flow;
pub(crate) mod load_store;
pub(crate) mod logical;
pub(crate) mod misc;
pub(crate) mod rmw;

/// Extra cycles charged for interrupt entry.
pub const INTERRUPT_CYCLES: u64 = 5;

/// Source of one flag when combining an ALU result into F.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagSrc {
    V0,
    V1,
    Alu,
    Cpu,
}

/// Per-instruction execution context.
pub(crate) struct Exec {
    pub op: &'static Opcode,
    /// PC at the start of the instruction (address of the prefix if any).
    pub pc: u16,
    pc_altered: bool,
    condition_failed: bool,
}

impl Exec {
    fn new(op: &'static Opcode, pc: u16) -> Self {
        Self {
            op,
            pc,
            pc_altered: false,
            condition_failed: false,
        }
    }

    /// Address of the first operand byte.
    #[inline]
    pub fn operand_address(&self) -> u16 {
        let opcode_len = match self.op.kind {
            OpcodeKind::Direct => 1,
            OpcodeKind::Prefixed => 2,
        };
        self.pc.wrapping_add(opcode_len)
    }

    #[inline]
    pub fn imm8(&self, bus: &Bus) -> u8 {
        bus.read(self.operand_address())
    }

    #[inline]
    pub fn imm16(&self, bus: &Bus) -> u16 {
        bus.read_word(self.operand_address())
    }

    /// Address of the next instruction in sequence.
    #[inline]
    pub fn next_pc(&self) -> u16 {
        self.pc.wrapping_add(self.op.total_bytes as u16)
    }

    /// Redirect control to `target`.
    pub fn jump(&mut self, cpu: &mut Cpu, target: u16) {
        cpu.pc = target;
        self.pc_altered = true;
    }

    /// Evaluate `cond` against F; remember a failure for cycle accounting.
    pub fn check(&mut self, cpu: &Cpu, cond: Condition) -> bool {
        let taken = match cond {
            Condition::NZ => !cpu.flag(Flag::Z),
            Condition::Z => cpu.flag(Flag::Z),
            Condition::NC => !cpu.flag(Flag::C),
            Condition::C => cpu.flag(Flag::C),
        };
        if !taken {
            self.condition_failed = true;
        }
        taken
    }
}

impl Cpu {
    /// Merge `result`'s flags into F according to the four sources.
    pub(crate) fn combine_flags(
        &mut self,
        result: AluResult,
        z: FlagSrc,
        n: FlagSrc,
        h: FlagSrc,
        c: FlagSrc,
    ) {
        let alu = result.flags();
        let cpu = self.reg(Reg::F);
        let mut f = 0u8;
        for (flag, src) in [(Flag::Z, z), (Flag::N, n), (Flag::H, h), (Flag::C, c)] {
            let on = match src {
                FlagSrc::V0 => false,
                FlagSrc::V1 => true,
                FlagSrc::Alu => alu & flag.mask() != 0,
                FlagSrc::Cpu => cpu & flag.mask() != 0,
            };
            if on {
                f |= flag.mask();
            }
        }
        self.set_reg(Reg::F, f);
    }

    /// Store the 8-bit value of `result` in `r` and combine flags.
    pub(crate) fn set_reg_from_alu(&mut self, r: Reg, result: AluResult, flags: [FlagSrc; 4]) {
        self.set_reg(r, result.value8());
        let [z, n, h, c] = flags;
        self.combine_flags(result, z, n, h, c);
    }

    /// Store the 8-bit value of `result` at (HL) and combine flags.
    pub(crate) fn write_hl_from_alu(
        &mut self,
        bus: &mut Bus,
        result: AluResult,
        flags: [FlagSrc; 4],
    ) {
        self.write_hl(bus, result.value8());
        let [z, n, h, c] = flags;
        self.combine_flags(result, z, n, h, c);
    }
}

/// Execute one unit of work on the cycle the schedule names.
pub(crate) fn step(cpu: &mut Cpu, bus: &mut Bus) -> Result<()> {
    if cpu.ime
        && let Some(interrupt) = cpu.pending_interrupt()
    {
        service_interrupt(cpu, bus, interrupt);
        return Ok(());
    }

    let pc = cpu.pc;
    let first = bus.read(pc);
    let (kind, encoding) = if first == PREFIX {
        (OpcodeKind::Prefixed, bus.read(pc.wrapping_add(1)))
    } else {
        (OpcodeKind::Direct, first)
    };
    let Some(op) = opcode::lookup(kind, encoding) else {
        return Err(GameBoyError::UnassignedOpcode { kind, encoding, pc });
    };

    trace!(pc, opcode = op.encoding, op = op.mnemonic, "cpu: exec");

    let mut exec = Exec::new(op, pc);
    execute(cpu, bus, &mut exec)?;

    if !exec.pc_altered {
        cpu.pc = exec.next_pc();
    }
    // HALT leaves the schedule Idle; nothing to charge until wake-up.
    if let Schedule::Active(next) = cpu.schedule {
        let extra = if exec.condition_failed {
            0
        } else {
            op.additional_cycles
        };
        cpu.schedule = Schedule::Active(next + op.cycles as u64 + extra as u64);
    }
    Ok(())
}

fn execute(cpu: &mut Cpu, bus: &mut Bus, exec: &mut Exec) -> Result<()> {
    let family = exec.op.family;
    if family == Family::Stop {
        return Err(GameBoyError::StopNotSupported { pc: exec.pc });
    }

    let handled = load_store::handle(family, cpu, bus, exec)
        || arithmetic::handle(family, cpu, bus, exec)
        || logical::handle(family, cpu, bus, exec)
        || rmw::handle(family, cpu, bus, exec)
        || bit_ops::handle(family, cpu, bus, exec)
        || control_flow::handle(family, cpu, bus, exec)
        || misc::handle(family, cpu, bus, exec);

    if handled {
        Ok(())
    } else {
        Err(GameBoyError::UnassignedOpcode {
            kind: exec.op.kind,
            encoding: exec.op.encoding,
            pc: exec.pc,
        })
    }
}

/// Interrupt entry: IME off, acknowledge, push PC, jump to the vector.
fn service_interrupt(cpu: &mut Cpu, bus: &mut Bus, interrupt: Interrupt) {
    debug!(?interrupt, pc = cpu.pc, "cpu: servicing interrupt");
    cpu.ime = false;
    cpu.acknowledge(interrupt);
    let return_pc = cpu.pc;
    cpu.push16(bus, return_pc);
    cpu.pc = interrupt.vector();
    if let Schedule::Active(next) = cpu.schedule {
        cpu.schedule = Schedule::Active(next + INTERRUPT_CYCLES);
    }
}
