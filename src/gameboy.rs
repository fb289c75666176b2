/*!
gameboy.rs - Machine assembly and the cycle loop.

Wiring
======
`GameBoy::new` attaches, in this order:

```text
work RAM        $C000-$DFFF
echo RAM        $E000-$FDFF   (same storage as work RAM)
processor block IE, IF, high RAM
boot overlay + cartridge
timer           $FF04-$FF07
```

Attachment order is read priority on the bus (first responder wins).

Cycle loop
==========
Each logical cycle ticks every registered peripheral in registration order,
forwards their interrupt requests to the processor, ticks the processor, then
collects requests once more (a write by the processor can raise one, e.g. a
timer register write). Only then does the cycle counter advance, so an error
leaves the machine at the failing cycle.

Peripherals receive the bus during their tick. A peripheral that is also
attached to the bus must not read its own registers through it.
*/

use std::cell::{Ref, RefCell};
use std::rc::Rc;

use tracing::{debug, trace};

use crate::address_map::{ECHO_RAM_END, ECHO_RAM_START, WORK_RAM_SIZE, WORK_RAM_START};
use crate::boot_rom::BootRomController;
use crate::bus::{self, Bus, Clocked, Ram, RamController};
use crate::cartridge::Cartridge;
use crate::cpu::{Cpu, Interrupt};
use crate::error::{GameBoyError, Result};
use crate::timer::Timer;

pub struct GameBoy {
    bus: Bus,
    cpu: Cpu,
    work_ram: Rc<RefCell<Ram>>,
    cartridge: Rc<RefCell<BootRomController>>,
    timer: Rc<RefCell<Timer>>,
    peripherals: Vec<Rc<RefCell<dyn Clocked>>>,
    cycles: u64,
}

impl std::fmt::Debug for GameBoy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameBoy")
            .field("cycles", &self.cycles)
            .field("cpu", &self.cpu)
            .field("peripherals", &self.peripherals.len())
            .finish()
    }
}

impl GameBoy {
    pub fn new(cartridge: Cartridge) -> Self {
        Self::assemble(BootRomController::new(cartridge))
    }

    /// Same as `new`, with `boot_rom` mapped over $0000-$00FF until $FF50 is written.
    pub fn with_boot_rom(cartridge: Cartridge, boot_rom: &[u8]) -> Result<Self> {
        Ok(Self::assemble(BootRomController::with_boot_rom(
            cartridge, boot_rom,
        )?))
    }

    fn assemble(controller: BootRomController) -> Self {
        let mut bus = Bus::new();

        let work_ram = Ram::shared(WORK_RAM_SIZE);
        let work = Rc::new(RefCell::new(RamController::new(
            work_ram.clone(),
            WORK_RAM_START,
        )));
        let echo = Rc::new(RefCell::new(RamController::with_range(
            work_ram.clone(),
            ECHO_RAM_START,
            ECHO_RAM_END,
        )));
        bus::attach(&work, &mut bus);
        bus::attach(&echo, &mut bus);

        let cpu = Cpu::new();
        cpu.attach_to(&mut bus);

        let cartridge = Rc::new(RefCell::new(controller));
        bus::attach(&cartridge, &mut bus);

        let timer = Rc::new(RefCell::new(Timer::new()));
        bus::attach(&timer, &mut bus);

        debug!(devices = bus.device_count(), "gameboy: assembled");

        let peripherals = vec![timer.clone() as Rc<RefCell<dyn Clocked>>];
        Self {
            bus,
            cpu,
            work_ram,
            cartridge,
            timer,
            peripherals,
            cycles: 0,
        }
    }

    /// Register another clocked device; it runs after the existing ones and
    /// before the processor. Attach it to `bus_mut()` separately if it is
    /// memory-mapped.
    pub fn add_peripheral(&mut self, peripheral: Rc<RefCell<dyn Clocked>>) {
        self.peripherals.push(peripheral);
    }

    /// Simulate every cycle from `cycles()` up to, but not including, `cycle`.
    pub fn run_until(&mut self, cycle: u64) -> Result<()> {
        if cycle < self.cycles {
            return Err(GameBoyError::CycleInPast {
                requested: cycle,
                current: self.cycles,
            });
        }
        while self.cycles < cycle {
            self.tick()?;
        }
        Ok(())
    }

    fn tick(&mut self) -> Result<()> {
        let now = self.cycles;
        for peripheral in &self.peripherals {
            peripheral.borrow_mut().cycle(now, &mut self.bus)?;
        }
        self.latch_requests();
        self.cpu.cycle(now, &mut self.bus)?;
        self.latch_requests();
        self.cycles += 1;
        Ok(())
    }

    fn latch_requests(&mut self) {
        for peripheral in &self.peripherals {
            if let Some(interrupt) = peripheral.borrow_mut().take_interrupt_request() {
                trace!(?interrupt, cycle = self.cycles, "gameboy: request latched");
                self.cpu.request_interrupt(interrupt);
            }
        }
    }

    /// Number of cycles simulated so far.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn request_interrupt(&mut self, interrupt: Interrupt) {
        self.cpu.request_interrupt(interrupt);
    }

    pub fn bus(&self) -> &Bus {
        &self.bus
    }

    pub fn bus_mut(&mut self) -> &mut Bus {
        &mut self.bus
    }

    pub fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    pub fn timer(&self) -> Ref<'_, Timer> {
        self.timer.borrow()
    }

    pub fn work_ram(&self) -> Ref<'_, Ram> {
        self.work_ram.borrow()
    }

    pub fn boot_rom_enabled(&self) -> bool {
        self.cartridge.borrow().is_enabled()
    }
}
