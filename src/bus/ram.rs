/*!
RAM module: byte storage and the controllers that map it into the address space.

- `Ram` is plain storage indexed from 0; it knows nothing about addresses.
- `RamController` maps a `Ram` into the half-open window `[start, end)` and answers
  only inside it. Several controllers may wrap the same `Rc<RefCell<Ram>>`; this is
  how work RAM ($C000-$DFFF) and its echo ($E000-$FDFF) share one storage.
*/

use std::cell::RefCell;
use std::rc::Rc;

use crate::bus::Component;

/// Zero-initialised byte storage.
#[derive(Debug, Clone)]
pub struct Ram {
    data: Box<[u8]>,
}

impl Ram {
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0; size].into_boxed_slice(),
        }
    }

    /// Convenience constructor for storage shared between controllers.
    pub fn shared(size: usize) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self::new(size)))
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Read by physical index; panics when `index` is outside the storage.
    #[inline]
    pub fn read(&self, index: usize) -> u8 {
        self.data[index]
    }

    #[inline]
    pub fn write(&mut self, index: usize, value: u8) {
        self.data[index] = value;
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }
}

/// Maps a window of the address space onto (a prefix of) a shared `Ram`.
#[derive(Debug, Clone)]
pub struct RamController {
    ram: Rc<RefCell<Ram>>,
    start: u32,
    end: u32,
}

impl RamController {
    /// Map the whole storage starting at `start`.
    ///
    /// Panics if the window would extend past the end of the address space.
    pub fn new(ram: Rc<RefCell<Ram>>, start: u16) -> Self {
        let size = ram.borrow().size() as u32;
        let end = start as u32 + size;
        assert!(
            end <= 0x1_0000,
            "RAM of {size:#x} bytes at {start:#06x} exceeds the address space"
        );
        Self {
            ram,
            start: start as u32,
            end,
        }
    }

    /// Map `[start, end)` onto the first `end - start` bytes of the storage.
    ///
    /// Panics if the window is inverted or larger than the storage.
    pub fn with_range(ram: Rc<RefCell<Ram>>, start: u16, end: u16) -> Self {
        assert!(start <= end, "inverted RAM window {start:#06x}..{end:#06x}");
        let len = (end - start) as usize;
        assert!(
            len <= ram.borrow().size(),
            "window of {len:#x} bytes larger than RAM"
        );
        Self {
            ram,
            start: start as u32,
            end: end as u32,
        }
    }

    #[inline]
    fn index(&self, address: u16) -> Option<usize> {
        let a = address as u32;
        (self.start..self.end)
            .contains(&a)
            .then(|| (a - self.start) as usize)
    }
}

impl Component for RamController {
    fn read(&self, address: u16) -> Option<u8> {
        self.index(address).map(|i| self.ram.borrow().read(i))
    }

    fn write(&mut self, address: u16, data: u8) {
        if let Some(i) = self.index(address) {
            self.ram.borrow_mut().write(i, data);
        }
    }
}
