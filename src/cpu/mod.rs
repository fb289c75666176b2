/*!
cpu::mod - Public façade for the SM83 processor core.

Layout:

```text
regs.rs      - Register slots, 16-bit pairs, flags and the register file.
alu.rs       - Pure 8/16-bit arithmetic returning packed value + flags.
opcode.rs    - Opcode descriptors, the `Family` union and the two 256-entry tables.
core/        - `Cpu` state, the memory-mapped `CpuIo` block and scheduling.
dispatch/    - One unit of work: interrupt entry or fetch/decode/execute,
               split into per-family handlers.
```

Usage:
```rust
use std::cell::RefCell;
use std::rc::Rc;
use gameboj::bus::{self, Bus, Clocked, Ram, RamController};
use gameboj::cpu::Cpu;

let ram = Ram::shared(0x8000);
ram.borrow_mut().write(0, 0x00); // NOP
let mut bus = Bus::new();
bus::attach(&Rc::new(RefCell::new(RamController::new(ram, 0))), &mut bus);

let mut cpu = Cpu::new();
cpu.attach_to(&mut bus);
cpu.cycle(0, &mut bus).unwrap();
assert_eq!(cpu.pc(), 1);
```
*/

pub mod alu;
pub mod core;
pub mod dispatch;
pub mod opcode;
pub mod regs;

pub use self::core::{Cpu, CpuIo, Interrupt, Schedule};
pub use regs::{Flag, Reg, Reg16};
