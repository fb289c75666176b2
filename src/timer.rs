/*!
timer.rs - Divider and programmable timer ($FF04-$FF07).

Model
=====
A free-running 16-bit counter advances by 4 every logical cycle. DIV is its high
byte; writing DIV (any value) clears the whole counter.

TIMA is clocked by a falling edge of

```text
TAC.bit2 && counter.bit(SELECT[TAC & 3])      SELECT = [9, 3, 5, 7]
```

The edge is evaluated after every counter step *and* after every register
write, so disabling the timer or resetting DIV while the selected bit is high
also ticks TIMA. When TIMA overflows it is reloaded from TMA and a
`Interrupt::Timer` request is latched for the orchestrator to collect.
*/

use tracing::trace;

use crate::address_map::{REG_DIV, REG_TAC, REG_TIMA, REG_TMA};
use crate::bits;
use crate::bus::{Bus, Clocked, Component};
use crate::cpu::Interrupt;
use crate::error::Result;

const COUNTER_STEP: u16 = 4;
const TAC_ENABLE_BIT: u32 = 2;
const SELECT: [u32; 4] = [9, 3, 5, 7];

#[derive(Debug, Default, Clone)]
pub struct Timer {
    counter: u16,
    tima: u8,
    tma: u8,
    tac: u8,
    pending: Option<Interrupt>,
}

impl Timer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn counter(&self) -> u16 {
        self.counter
    }

    pub fn div(&self) -> u8 {
        (self.counter >> 8) as u8
    }

    pub fn tima(&self) -> u8 {
        self.tima
    }

    fn state(&self) -> bool {
        let enabled = bits::test(self.tac as u32, TAC_ENABLE_BIT);
        let select = SELECT[bits::clip(2, self.tac as u32) as usize];
        enabled && bits::test(self.counter as u32, select)
    }

    /// Tick TIMA if the edge signal fell since `previous`.
    fn increment_if_fallen(&mut self, previous: bool) {
        if !previous || self.state() {
            return;
        }
        if self.tima == 0xFF {
            trace!(tma = self.tma, "timer: overflow");
            self.tima = self.tma;
            self.pending = Some(Interrupt::Timer);
        } else {
            self.tima += 1;
        }
    }
}

impl Component for Timer {
    fn read(&self, address: u16) -> Option<u8> {
        match address {
            REG_DIV => Some(self.div()),
            REG_TIMA => Some(self.tima),
            REG_TMA => Some(self.tma),
            REG_TAC => Some(self.tac),
            _ => None,
        }
    }

    fn write(&mut self, address: u16, data: u8) {
        let previous = self.state();
        match address {
            REG_DIV => self.counter = 0,
            REG_TIMA => self.tima = data,
            REG_TMA => self.tma = data,
            REG_TAC => self.tac = data,
            _ => return,
        }
        self.increment_if_fallen(previous);
    }
}

impl Clocked for Timer {
    fn cycle(&mut self, _cycle: u64, _bus: &mut Bus) -> Result<()> {
        let previous = self.state();
        self.counter = self.counter.wrapping_add(COUNTER_STEP);
        self.increment_if_fallen(previous);
        Ok(())
    }

    fn take_interrupt_request(&mut self) -> Option<Interrupt> {
        self.pending.take()
    }
}
