/*!
bits.rs - Bit-field helpers shared by the ALU, the register file and devices.

Overview
========
Small, pure helpers over `u32` bit vectors:

```text
mask / test / set      - single-bit access by index
clip / extract         - keep the low `size` bits, or a `size`-bit field at `start`
rotate                 - rotate a `size`-bit value by a signed distance
sign_extend8           - interpret a byte as two's complement
reverse8 / complement8 - byte bit-order reversal and bitwise NOT
make16                 - big-endian composition of two bytes
```

Range guards
============
`check_bits8` / `check_bits16` narrow a wide integer to `u8` / `u16`. An
out-of-range value is a programming defect, so the guards panic instead of
returning an error.
*/

/// Narrow `v` to a byte, panicking if it does not fit in 8 bits.
#[inline]
#[track_caller]
pub fn check_bits8(v: u32) -> u8 {
    assert!(v <= 0xFF, "value {v:#x} is not an 8-bit value");
    v as u8
}

/// Narrow `v` to a 16-bit value, panicking if it does not fit.
#[inline]
#[track_caller]
pub fn check_bits16(v: u32) -> u16 {
    assert!(v <= 0xFFFF, "value {v:#x} is not a 16-bit value");
    v as u16
}

/// Single-bit mask for `index` (0..32).
#[inline]
#[track_caller]
pub fn mask(index: u32) -> u32 {
    assert!(index < u32::BITS, "bit index {index} out of range");
    1 << index
}

#[inline]
pub fn test(bits: u32, index: u32) -> bool {
    bits & mask(index) != 0
}

/// Return `bits` with bit `index` forced to `value`.
#[inline]
pub fn set(bits: u32, index: u32, value: bool) -> u32 {
    if value {
        bits | mask(index)
    } else {
        bits & !mask(index)
    }
}

/// Keep only the `size` least significant bits.
#[inline]
#[track_caller]
pub fn clip(size: u32, bits: u32) -> u32 {
    assert!(size <= u32::BITS, "clip size {size} out of range");
    if size == u32::BITS {
        bits
    } else {
        bits & ((1 << size) - 1)
    }
}

/// Extract the `size`-bit field starting at bit `start`.
#[inline]
#[track_caller]
pub fn extract(bits: u32, start: u32, size: u32) -> u32 {
    assert!(
        start.checked_add(size).is_some_and(|end| end <= u32::BITS),
        "field [{start}, +{size}) out of range"
    );
    if start == u32::BITS {
        return 0;
    }
    clip(size, bits >> start)
}

/// Rotate the `size`-bit value `bits` by `distance` (positive = left).
#[track_caller]
pub fn rotate(size: u32, bits: u32, distance: i32) -> u32 {
    assert!(
        size > 0 && size <= u32::BITS,
        "rotate size {size} out of range"
    );
    assert!(
        clip(size, bits) == bits,
        "value {bits:#x} does not fit in {size} bits"
    );
    let offset = distance.rem_euclid(size as i32) as u32;
    if offset == 0 {
        return bits;
    }
    clip(size, bits << offset) | (bits >> (size - offset))
}

/// Sign-extend a byte to a 32-bit two's complement value.
#[inline]
pub fn sign_extend8(b: u8) -> i32 {
    b as i8 as i32
}

#[inline]
pub fn reverse8(b: u8) -> u8 {
    b.reverse_bits()
}

#[inline]
pub fn complement8(b: u8) -> u8 {
    !b
}

/// Compose a 16-bit value from its high and low bytes.
#[inline]
pub fn make16(high: u8, low: u8) -> u16 {
    ((high as u16) << 8) | low as u16
}
