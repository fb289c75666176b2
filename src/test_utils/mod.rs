//! Shared test utilities for building cartridge images and program-loaded buses.
//!
//! These helpers de-duplicate setup across tests in the CPU, Bus, Cartridge and
//! GameBoy modules. They support just what the test suite needs: fixed 32 KiB
//! images (cartridge type 0) and a flat RAM bus with a program at address 0.
//!
//! Layout of a fixed-ROM image as produced here:
//! - bytes[0..program.len()] = program
//! - byte 0x147 = cartridge type (0 = no mapper)
//! - everything else = 0x00 (NOP)

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use crate::address_map::{CARTRIDGE_TYPE_ADDRESS, ROM_SIZE};
use crate::bus::{self, Bus, Ram, RamController};

/// Build a 32 KiB type-0 cartridge image with `program` at offset 0.
///
/// Panics if the program would overlap the cartridge header.
pub fn build_rom(program: &[u8]) -> Vec<u8> {
    assert!(
        program.len() <= 0x100,
        "test program overlaps the cartridge header"
    );
    let mut rom = vec![0u8; ROM_SIZE];
    rom[..program.len()].copy_from_slice(program);
    rom[CARTRIDGE_TYPE_ADDRESS] = 0x00;
    rom
}

/// Same as `build_rom`, placing `routine` at `address` in addition to `program`.
pub fn build_rom_with(program: &[u8], address: usize, routine: &[u8]) -> Vec<u8> {
    let mut rom = build_rom(program);
    rom[address..address + routine.len()].copy_from_slice(routine);
    rom
}

/// A bus with one flat RAM covering $0000-$FFFD, preloaded with `program` at 0.
///
/// Returns the RAM handle too so tests can inspect memory without going through
/// the bus.
pub fn program_bus(program: &[u8]) -> (Bus, Rc<RefCell<Ram>>) {
    let ram = Ram::shared(0xFFFE);
    {
        let mut r = ram.borrow_mut();
        for (i, &b) in program.iter().enumerate() {
            r.write(i, b);
        }
    }
    let mut bus = Bus::new();
    let ctrl = Rc::new(RefCell::new(RamController::new(ram.clone(), 0x0000)));
    bus::attach(&ctrl, &mut bus);
    (bus, ram)
}

/// Write `bytes` into `ram` starting at physical index `at`.
pub fn poke(ram: &Rc<RefCell<Ram>>, at: usize, bytes: &[u8]) {
    let mut r = ram.borrow_mut();
    for (i, &b) in bytes.iter().enumerate() {
        r.write(at + i, b);
    }
}
