/*!
Mapper subsystem: trait definition and the fixed 32 KiB mapper (type 0).

Purpose:
- Decouple the processor-visible cartridge address space from the `Cartridge`
  so other memory bank controllers can be added behind the same interface.
- The cartridge forwards every bus access to its mapper; the mapper decides
  whether the address is its own (`Some`) or not (`None`).

Only type 0 exists today: 32 KiB of ROM at $0000-$7FFF, no banking, no
external RAM. Writes into ROM space are accepted and discarded.
*/

use crate::address_map::{ROM_END, ROM_SIZE, ROM_START};

/// Common interface all cartridge mappers implement.
///
/// Semantics:
/// - Addresses are full 16-bit bus addresses.
/// - `read` returns `None` for addresses outside the mapper's windows so the
///   bus can fall through to other devices.
/// - `write` is offered every bus write and ignores what it does not own.
pub trait Mapper {
    /// Cartridge type byte (header $0147) this mapper implements.
    fn cartridge_type(&self) -> u8;

    fn read(&self, address: u16) -> Option<u8>;

    fn write(&mut self, address: u16, value: u8);
}

/// Type 0: ROM only.
#[derive(Clone, Debug)]
pub struct Mbc0 {
    rom: Box<[u8]>,
}

impl Mbc0 {
    /// `rom` must be exactly 32 KiB; the cartridge loader validates this first.
    pub fn new(rom: Vec<u8>) -> Self {
        assert_eq!(rom.len(), ROM_SIZE, "type 0 cartridges hold exactly 32 KiB");
        Self {
            rom: rom.into_boxed_slice(),
        }
    }
}

impl Mapper for Mbc0 {
    fn cartridge_type(&self) -> u8 {
        0x00
    }

    fn read(&self, address: u16) -> Option<u8> {
        if (ROM_START..ROM_END).contains(&address) {
            Some(self.rom[(address - ROM_START) as usize])
        } else {
            None
        }
    }

    fn write(&mut self, _address: u16, _value: u8) {}
}
