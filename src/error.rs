//! Error taxonomy for the emulator core.
//!
//! Every variant is fatal for the machine that produced it: there is no retry
//! path. Range violations on raw integers are not represented here; they are
//! programming defects and panic at the offending call (see `crate::bits`).

use thiserror::Error;

use crate::cpu::opcode::OpcodeKind;

pub type Result<T> = std::result::Result<T, GameBoyError>;

#[derive(Debug, Error)]
pub enum GameBoyError {
    #[error("unassigned {kind:?} opcode {encoding:#04x} at pc={pc:#06x}")]
    UnassignedOpcode {
        kind: OpcodeKind,
        encoding: u8,
        pc: u16,
    },
    #[error("STOP is not implemented (pc={pc:#06x})")]
    StopNotSupported { pc: u16 },
    #[error("invalid cartridge: {reason}")]
    InvalidCartridge { reason: String },
    #[error("unsupported cartridge type {0:#04x} (only type 0 is supported)")]
    UnsupportedCartridgeType(u8),
    #[error("boot ROM must be 256 bytes, got {len}")]
    InvalidBootRom { len: usize },
    #[error("cannot run to cycle {requested}: already at cycle {current}")]
    CycleInPast { requested: u64, current: u64 },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
