/*!
Memory map of the 16-bit address space.

Ranges are half-open (`START..END`):
- $0000-$00FF: boot ROM overlay (until $FF50 is written)
- $0000-$7FFF: cartridge ROM (fixed 32 KiB, no banking)
- $8000-$9FFF: video RAM
- $A000-$BFFF: cartridge external RAM
- $C000-$DFFF: work RAM
- $E000-$FDFF: echo of work RAM
- $FE00-$FE9F: object attribute memory
- $FF00-$FF7F: peripheral registers (timer, IF, LCD, boot disable)
- $FF80-$FFFE: high RAM (internal to the processor)
- $FFFF:       interrupt enable register
*/

pub const BOOT_ROM_START: u16 = 0x0000;
pub const BOOT_ROM_END: u16 = 0x0100;
pub const BOOT_ROM_SIZE: usize = (BOOT_ROM_END - BOOT_ROM_START) as usize;

pub const ROM_START: u16 = 0x0000;
pub const ROM_END: u16 = 0x8000;
pub const ROM_SIZE: usize = (ROM_END - ROM_START) as usize;

pub const VIDEO_RAM_START: u16 = 0x8000;
pub const VIDEO_RAM_END: u16 = 0xA000;
pub const VIDEO_RAM_SIZE: usize = (VIDEO_RAM_END - VIDEO_RAM_START) as usize;

pub const EXTERNAL_RAM_START: u16 = 0xA000;
pub const EXTERNAL_RAM_END: u16 = 0xC000;

pub const WORK_RAM_START: u16 = 0xC000;
pub const WORK_RAM_END: u16 = 0xE000;
pub const WORK_RAM_SIZE: usize = (WORK_RAM_END - WORK_RAM_START) as usize;

pub const ECHO_RAM_START: u16 = 0xE000;
pub const ECHO_RAM_END: u16 = 0xFE00;

pub const OAM_START: u16 = 0xFE00;
pub const OAM_END: u16 = 0xFEA0;

pub const REGS_START: u16 = 0xFF00;
pub const REGS_END: u16 = 0xFF80;

pub const HIGH_RAM_START: u16 = 0xFF80;
pub const HIGH_RAM_END: u16 = 0xFFFF;
pub const HIGH_RAM_SIZE: usize = (HIGH_RAM_END - HIGH_RAM_START) as usize;

// Timer
pub const REG_DIV: u16 = 0xFF04;
pub const REG_TIMA: u16 = 0xFF05;
pub const REG_TMA: u16 = 0xFF06;
pub const REG_TAC: u16 = 0xFF07;

// Interrupts
pub const REG_IF: u16 = 0xFF0F;
pub const REG_IE: u16 = 0xFFFF;

// LCD controller window (reserved; no device in this crate answers it)
pub const REGS_LCDC_START: u16 = 0xFF40;
pub const REGS_LCDC_END: u16 = 0xFF4C;
pub const REG_LCDC: u16 = 0xFF40;
pub const REG_STAT: u16 = 0xFF41;
pub const REG_SCY: u16 = 0xFF42;
pub const REG_SCX: u16 = 0xFF43;
pub const REG_LY: u16 = 0xFF44;
pub const REG_LYC: u16 = 0xFF45;
pub const REG_DMA: u16 = 0xFF46;
pub const REG_BGP: u16 = 0xFF47;
pub const REG_OBP0: u16 = 0xFF48;
pub const REG_OBP1: u16 = 0xFF49;
pub const REG_WY: u16 = 0xFF4A;
pub const REG_WX: u16 = 0xFF4B;

pub const REG_BOOT_ROM_DISABLE: u16 = 0xFF50;

/// Cartridge header byte holding the mapper type.
pub const CARTRIDGE_TYPE_ADDRESS: usize = 0x147;

/// Interrupt handler addresses, indexed by interrupt priority (0 = highest).
pub const INTERRUPTS: [u16; 5] = [0x40, 0x48, 0x50, 0x58, 0x60];

/// `RST u3` targets.
pub const RESETS: [u16; 8] = [0x00, 0x08, 0x10, 0x18, 0x20, 0x28, 0x30, 0x38];
