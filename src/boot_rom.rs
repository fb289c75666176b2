/*!
Boot ROM overlay in front of the cartridge.

While the overlay is enabled, reads in $0000-$00FF are answered from the
256-byte boot image. The first write of any value to $FF50 disables it for the
rest of the session. Every other access is forwarded to the cartridge, which
makes this controller the single bus device for cartridge space.
*/

use tracing::debug;

use crate::address_map::{BOOT_ROM_END, BOOT_ROM_SIZE, BOOT_ROM_START, REG_BOOT_ROM_DISABLE};
use crate::bus::Component;
use crate::cartridge::Cartridge;
use crate::error::{GameBoyError, Result};

#[derive(Debug)]
pub struct BootRomController {
    overlay: Option<Box<[u8; BOOT_ROM_SIZE]>>,
    cartridge: Cartridge,
}

impl BootRomController {
    /// Cartridge only, no overlay.
    pub fn new(cartridge: Cartridge) -> Self {
        Self {
            overlay: None,
            cartridge,
        }
    }

    pub fn with_boot_rom(cartridge: Cartridge, boot_rom: &[u8]) -> Result<Self> {
        let image: [u8; BOOT_ROM_SIZE] = boot_rom
            .try_into()
            .map_err(|_| GameBoyError::InvalidBootRom {
                len: boot_rom.len(),
            })?;
        Ok(Self {
            overlay: Some(Box::new(image)),
            cartridge,
        })
    }

    pub fn is_enabled(&self) -> bool {
        self.overlay.is_some()
    }

    pub fn cartridge(&self) -> &Cartridge {
        &self.cartridge
    }
}

impl Component for BootRomController {
    fn read(&self, address: u16) -> Option<u8> {
        if let Some(overlay) = &self.overlay
            && (BOOT_ROM_START..BOOT_ROM_END).contains(&address)
        {
            return Some(overlay[(address - BOOT_ROM_START) as usize]);
        }
        self.cartridge.read(address)
    }

    fn write(&mut self, address: u16, data: u8) {
        if address == REG_BOOT_ROM_DISABLE && self.overlay.is_some() {
            debug!(data, "boot rom: disabled");
            self.overlay = None;
        }
        self.cartridge.write(address, data);
    }
}
