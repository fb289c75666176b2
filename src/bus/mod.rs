#![doc = r#"
Bus module: addressable-device capability and the shared address bus.

Overview
- `Component` is the capability every attachable device implements: `read` returns
  `Some(byte)` for addresses the device maps and `None` ("absent") otherwise; `write`
  is delivered to every device, which ignores addresses outside its own range.
- `Bus` holds the attached devices in attachment order. Reads go to the first device
  that answers (open bus `0xFF` if none does). Writes are broadcast.
- Broadcast writes let two controllers share one storage (work RAM and its echo) while
  each only answers its own window.

Modules and responsibilities
- ram: byte storage (`Ram`) and windowed controllers (`RamController`) over shared storage.
- clock: the `Clocked` capability ticked once per logical cycle by the orchestrator.
- tests: wiring scenarios across several devices.

Ownership
- Devices are shared handles (`Rc<RefCell<_>>`). The orchestrator keeps typed handles to
  the devices it also ticks; the bus keeps type-erased ones. No device keeps a borrow
  across a bus call, so a device touched through the bus is never already borrowed.
"#]

use std::cell::RefCell;
use std::rc::Rc;

pub mod clock;
pub mod ram;

pub use clock::Clocked;
pub use ram::{Ram, RamController};

/// Value seen on reads that no device answers.
pub const OPEN_BUS: u8 = 0xFF;

/// Memory-mapped device capability.
pub trait Component {
    /// Byte mapped at `address`, or `None` when this device does not map it.
    fn read(&self, address: u16) -> Option<u8>;

    /// Store `data` at `address`. Devices ignore addresses they do not map.
    fn write(&mut self, address: u16, data: u8);
}

/// Shared, type-erased device handle as stored by the bus.
pub type DeviceHandle = Rc<RefCell<dyn Component>>;

/// Ordered collection of attached devices.
#[derive(Default)]
pub struct Bus {
    devices: Vec<DeviceHandle>,
}

impl std::fmt::Debug for Bus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bus")
            .field("devices", &self.devices.len())
            .finish()
    }
}

impl Bus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a device; it answers reads after every device attached before it.
    pub fn attach(&mut self, device: DeviceHandle) {
        self.devices.push(device);
    }

    pub fn device_count(&self) -> usize {
        self.devices.len()
    }

    /// First non-absent answer in attachment order, else `OPEN_BUS`.
    pub fn read(&self, address: u16) -> u8 {
        self.devices
            .iter()
            .find_map(|device| device.borrow().read(address))
            .unwrap_or(OPEN_BUS)
    }

    /// Deliver the write to every attached device.
    pub fn write(&mut self, address: u16, data: u8) {
        for device in &self.devices {
            device.borrow_mut().write(address, data);
        }
    }

    /// Little-endian 16-bit read (`address` low byte, `address + 1` high byte).
    pub fn read_word(&self, address: u16) -> u16 {
        let lo = self.read(address);
        let hi = self.read(address.wrapping_add(1));
        crate::bits::make16(hi, lo)
    }

    /// Little-endian 16-bit write.
    pub fn write_word(&mut self, address: u16, value: u16) {
        self.write(address, value as u8);
        self.write(address.wrapping_add(1), (value >> 8) as u8);
    }
}

/// Attach a typed device handle to `bus`.
///
/// Registration is identical for every device type, so it lives here instead of
/// on each device. The caller keeps its typed handle.
pub fn attach<D>(device: &Rc<RefCell<D>>, bus: &mut Bus)
where
    D: Component + 'static,
{
    let handle: DeviceHandle = device.clone();
    bus.attach(handle);
}
