/*!
Clocked capability for timing-sensitive devices.

Purpose
- Every device that does work over time implements `Clocked`. The orchestrator
  calls `cycle` exactly once per logical cycle, in a fixed registration order
  (peripherals first, the processor last).
- The device receives the bus explicitly for the duration of the call; no device
  holds on to the bus between ticks.

Interrupt latching
- A peripheral does not reach into the processor to raise an interrupt. It records
  the request and hands it out from `take_interrupt_request`. The orchestrator
  drains requests after each device tick and forwards them to the processor, so a
  request raised during a peripheral's tick is visible to the processor in the same
  logical cycle.
*/

use crate::bus::Bus;
use crate::cpu::Interrupt;
use crate::error::Result;

pub trait Clocked {
    /// Advance this device to logical cycle `cycle`.
    ///
    /// Called once per cycle with strictly increasing `cycle` values.
    fn cycle(&mut self, cycle: u64, bus: &mut Bus) -> Result<()>;

    /// Return (and clear) an interrupt raised since the last call.
    fn take_interrupt_request(&mut self) -> Option<Interrupt> {
        None
    }
}
