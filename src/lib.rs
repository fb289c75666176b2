#![doc = r#"
gameboj library crate.

Processing core of a handheld console built around an SM83 processor: a shared
address bus, the processor with its interrupt block, a timer, a fixed-ROM
cartridge with an optional boot overlay, and the cycle-driven orchestrator.

Modules:
- address_map: memory map constants, interrupt vectors and restart targets
- bits: bit-field helpers and range guards
- boot_rom: 256-byte boot overlay in front of the cartridge
- bus: `Component` trait, the `Bus`, RAM devices and the `Clocked` trait
- cartridge: image validation; constructs a Mapper
- cpu: SM83 core (register file, ALU, opcode tables, state, dispatch)
- error: `GameBoyError` and the crate `Result`
- gameboy: machine assembly and `run_until`
- mapper: Mapper trait and the type 0 (ROM only) implementation
- timer: DIV/TIMA/TMA/TAC and the timer interrupt

In tests, shared ROM and bus builders are available under `crate::test_utils`.
"#]

pub mod address_map;
pub mod bits;
pub mod boot_rom;
pub mod bus;
pub mod cartridge;
pub mod cpu;
pub mod error;
pub mod gameboy;
pub mod mapper;
pub mod timer;

// Re-export commonly used types at the crate root for convenience.
pub use bus::Bus;
pub use cartridge::Cartridge;
pub use cpu::Cpu;
pub use error::{GameBoyError, Result};
pub use gameboy::GameBoy;

// Shared test utilities (only compiled for tests)
#[cfg(test)]
pub mod test_utils;
