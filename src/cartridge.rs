/*!
Cartridge image loader and Mapper integration (type 0 only).

Features:
- Validate a raw image from bytes or a file path
- Read the header title ($0134-$0143) and cartridge type ($0147)
- Construct a concrete Mapper (`Mbc0`) and answer bus reads through it

Notes:
- The image must be exactly 32 KiB. Anything else is rejected with
  `InvalidCartridge`; a non-zero type byte is rejected with
  `UnsupportedCartridgeType`.
- Header checksums are not verified.
*/

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::address_map::{CARTRIDGE_TYPE_ADDRESS, ROM_SIZE};
use crate::bus::Component;
use crate::error::{GameBoyError, Result};
use crate::mapper::{Mapper, Mbc0};

const TITLE_START: usize = 0x134;
const TITLE_END: usize = 0x144;

pub struct Cartridge {
    mapper: Box<dyn Mapper>,
    title: String,
}

impl std::fmt::Debug for Cartridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cartridge")
            .field("title", &self.title)
            .field("cartridge_type", &self.mapper.cartridge_type())
            .finish()
    }
}

impl Cartridge {
    /// Validate `data` and build the matching mapper.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.len() != ROM_SIZE {
            let reason = format!("image is {} bytes, expected {ROM_SIZE}", data.len());
            return Err(GameBoyError::InvalidCartridge { reason });
        }

        let cartridge_type = data[CARTRIDGE_TYPE_ADDRESS];
        if cartridge_type != 0x00 {
            return Err(GameBoyError::UnsupportedCartridgeType(cartridge_type));
        }

        let title = parse_title(&data[TITLE_START..TITLE_END]);
        debug!(%title, cartridge_type, "cartridge: loaded");

        Ok(Self {
            mapper: Box::new(Mbc0::new(data.to_vec())),
            title,
        })
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = fs::read(path)?;
        Self::from_bytes(&data)
    }

    /// Printable part of the header title, trailing NULs dropped.
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn cartridge_type(&self) -> u8 {
        self.mapper.cartridge_type()
    }
}

fn parse_title(raw: &[u8]) -> String {
    raw.iter()
        .take_while(|&&b| b != 0)
        .map(|&b| {
            if b.is_ascii_graphic() || b == b' ' {
                b as char
            } else {
                '?'
            }
        })
        .collect()
}

impl Component for Cartridge {
    fn read(&self, address: u16) -> Option<u8> {
        self.mapper.read(address)
    }

    fn write(&mut self, address: u16, data: u8) {
        self.mapper.write(address, data);
    }
}
