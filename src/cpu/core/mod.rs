/*!
core::Cpu - SM83 processor state and its bus-facing register block.

Design
======
- `Cpu` owns the register file, PC, SP, the master interrupt enable (IME) and
  its `Schedule`: either `Active(next_cycle)` (the cycle at which the next unit
  of work is due) or `Idle` (halted until an interrupt becomes pending).
- The memory-mapped part of the processor (IE at $FFFF, IF at $FF0F and high RAM
  at $FF80-$FFFE) lives in `CpuIo`, shared through `Rc<RefCell<_>>` so the bus can
  hold it while the `Cpu` itself is being stepped. The `Cpu` only borrows it for
  the duration of a single register access, never across a bus call.
- The bus is passed into every operation that touches memory; the `Cpu` keeps no
  reference to it.

Timing
======
`Clocked::cycle` is called once per logical cycle. The processor only works on
the cycle its schedule names; everything in between is skipped. Instruction
execution and interrupt entry are implemented in `cpu::dispatch`.
*/

use std::cell::RefCell;
use std::rc::Rc;

use tracing::debug;

use crate::address_map::{HIGH_RAM_END, HIGH_RAM_SIZE, HIGH_RAM_START, REG_IE, REG_IF};
use crate::bits;
use crate::bus::{self, Bus, Clocked, Component, Ram};
use crate::cpu::dispatch;
use crate::cpu::opcode::Wide;
use crate::cpu::regs::{Flag, Reg, Reg16, RegisterFile};
use crate::error::Result;

/// Interrupt sources in priority order (index 0 is serviced first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Interrupt {
    VBlank,
    LcdStat,
    Timer,
    Serial,
    Joypad,
}

impl Interrupt {
    pub const ALL: [Interrupt; 5] = [
        Interrupt::VBlank,
        Interrupt::LcdStat,
        Interrupt::Timer,
        Interrupt::Serial,
        Interrupt::Joypad,
    ];

    /// Bit position in IE / IF, also the priority rank.
    #[inline]
    pub const fn index(self) -> u32 {
        match self {
            Interrupt::VBlank => 0,
            Interrupt::LcdStat => 1,
            Interrupt::Timer => 2,
            Interrupt::Serial => 3,
            Interrupt::Joypad => 4,
        }
    }

    #[inline]
    pub const fn mask(self) -> u8 {
        1 << self.index()
    }

    /// Handler address.
    #[inline]
    pub const fn vector(self) -> u16 {
        crate::address_map::INTERRUPTS[self.index() as usize]
    }
}

/// When the processor next has work to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schedule {
    Active(u64),
    Idle,
}

/// Interrupt registers and high RAM, as seen on the bus.
#[derive(Debug, Clone)]
pub struct CpuIo {
    ie: u8,
    if_: u8,
    high_ram: Ram,
}

impl Default for CpuIo {
    fn default() -> Self {
        Self {
            ie: 0,
            if_: 0,
            high_ram: Ram::new(HIGH_RAM_SIZE),
        }
    }
}

impl CpuIo {
    pub fn ie(&self) -> u8 {
        self.ie
    }

    pub fn if_flags(&self) -> u8 {
        self.if_
    }

    /// Highest-priority interrupt that is both requested and enabled.
    pub fn pending(&self) -> Option<Interrupt> {
        let ready = self.ie & self.if_;
        Interrupt::ALL
            .into_iter()
            .find(|i| bits::test(ready as u32, i.index()))
    }

    pub fn request(&mut self, interrupt: Interrupt) {
        self.if_ |= interrupt.mask();
    }

    pub fn acknowledge(&mut self, interrupt: Interrupt) {
        self.if_ &= !interrupt.mask();
    }

    #[inline]
    fn high_ram_index(address: u16) -> Option<usize> {
        (HIGH_RAM_START..HIGH_RAM_END)
            .contains(&address)
            .then(|| (address - HIGH_RAM_START) as usize)
    }
}

impl Component for CpuIo {
    fn read(&self, address: u16) -> Option<u8> {
        match address {
            REG_IE => Some(self.ie),
            REG_IF => Some(self.if_),
            _ => Self::high_ram_index(address).map(|i| self.high_ram.read(i)),
        }
    }

    fn write(&mut self, address: u16, data: u8) {
        match address {
            REG_IE => self.ie = data,
            REG_IF => self.if_ = data,
            _ => {
                if let Some(i) = Self::high_ram_index(address) {
                    self.high_ram.write(i, data);
                }
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct Cpu {
    pub(crate) regs: RegisterFile,
    pub(crate) pc: u16,
    pub(crate) sp: u16,
    pub(crate) ime: bool,
    pub(crate) schedule: Schedule,
    io: Rc<RefCell<CpuIo>>,
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}

impl Cpu {
    /// Power-up state: all registers zero, IME clear, first work due at cycle 0.
    pub fn new() -> Self {
        Self {
            regs: RegisterFile::new(),
            pc: 0,
            sp: 0,
            ime: false,
            schedule: Schedule::Active(0),
            io: Rc::new(RefCell::new(CpuIo::default())),
        }
    }

    /// Attach the processor's register block (IE, IF, high RAM) to `bus`.
    pub fn attach_to(&self, bus: &mut Bus) {
        bus::attach(&self.io, bus);
    }

    /// Shared handle to the register block.
    pub fn io(&self) -> &Rc<RefCell<CpuIo>> {
        &self.io
    }

    pub fn pc(&self) -> u16 {
        self.pc
    }

    pub fn sp(&self) -> u16 {
        self.sp
    }

    pub fn ime(&self) -> bool {
        self.ime
    }

    pub fn schedule(&self) -> Schedule {
        self.schedule
    }

    pub fn is_idle(&self) -> bool {
        self.schedule == Schedule::Idle
    }

    pub fn reg(&self, r: Reg) -> u8 {
        self.regs.get(r)
    }

    pub fn reg16(&self, r: Reg16) -> u16 {
        self.regs.get16(r)
    }

    pub fn flag(&self, f: Flag) -> bool {
        self.regs.flag(f)
    }

    pub fn ie(&self) -> u8 {
        self.io.borrow().ie()
    }

    pub fn if_flags(&self) -> u8 {
        self.io.borrow().if_flags()
    }

    /// Set the IF bit of `interrupt`.
    pub fn request_interrupt(&mut self, interrupt: Interrupt) {
        self.io.borrow_mut().request(interrupt);
    }

    pub fn pending_interrupt(&self) -> Option<Interrupt> {
        self.io.borrow().pending()
    }

    /// `[PC, SP, A, F, B, C, D, E, H, L]`, for inspection and tests.
    pub fn registers_snapshot(&self) -> [u16; 10] {
        let r = |reg| self.regs.get(reg) as u16;
        [
            self.pc,
            self.sp,
            r(Reg::A),
            r(Reg::F),
            r(Reg::B),
            r(Reg::C),
            r(Reg::D),
            r(Reg::E),
            r(Reg::H),
            r(Reg::L),
        ]
    }

    // ---------------------------------------------------------------------
    // Execution helpers shared by the dispatch families
    // ---------------------------------------------------------------------

    #[inline]
    pub(crate) fn set_reg(&mut self, r: Reg, v: u8) {
        self.regs.set(r, v);
    }

    #[inline]
    pub(crate) fn set_reg16(&mut self, r: Reg16, v: u16) {
        self.regs.set16(r, v);
    }

    /// Value of a pair operand where the fourth slot means SP.
    pub(crate) fn wide(&self, w: Wide) -> u16 {
        match w {
            Wide::Pair(r) => self.regs.get16(r),
            Wide::Sp => self.sp,
        }
    }

    pub(crate) fn set_wide(&mut self, w: Wide, v: u16) {
        match w {
            Wide::Pair(r) => self.regs.set16(r, v),
            Wide::Sp => self.sp = v,
        }
    }

    pub(crate) fn acknowledge(&mut self, interrupt: Interrupt) {
        self.io.borrow_mut().acknowledge(interrupt);
    }

    pub(crate) fn read_hl(&self, bus: &Bus) -> u8 {
        bus.read(self.regs.get16(Reg16::HL))
    }

    pub(crate) fn write_hl(&self, bus: &mut Bus, v: u8) {
        bus.write(self.regs.get16(Reg16::HL), v);
    }

    /// SP -= 2, then store `v` little-endian at SP.
    pub(crate) fn push16(&mut self, bus: &mut Bus, v: u16) {
        self.sp = self.sp.wrapping_sub(2);
        bus.write_word(self.sp, v);
    }

    /// Load the word at SP, then SP += 2.
    pub(crate) fn pop16(&mut self, bus: &Bus) -> u16 {
        let v = bus.read_word(self.sp);
        self.sp = self.sp.wrapping_add(2);
        v
    }
}

impl Clocked for Cpu {
    fn cycle(&mut self, cycle: u64, bus: &mut Bus) -> Result<()> {
        if self.schedule == Schedule::Idle && self.pending_interrupt().is_some() {
            debug!(cycle, pc = self.pc, "cpu: wake from halt");
            self.schedule = Schedule::Active(cycle);
        }
        match self.schedule {
            Schedule::Active(next) if next == cycle => dispatch::step(self, bus),
            _ => Ok(()),
        }
    }
}
