/*!
alu.rs - Pure arithmetic/logic operations of the SM83 core.

Every operation returns an `AluResult`: a packed `value << 8 | flags` word where
`value` is an 8- or 16-bit result and `flags` is a Z/N/H/C mask laid out exactly
like the F register (low nibble zero). The processor decides per instruction
family which of these flags it keeps (see `cpu::dispatch::FlagSrc`).

Flag policies
=============
  add / adc          Z=res==0  N=0  H=nibble carry     C=byte carry
  add16_low/high     Z=0       N=0  H/C from the low (resp. high) byte carry chain
  sub / sbc / cp     Z=res==0  N=1  H=nibble borrow    C=byte borrow
  and                Z=res==0  N=0  H=1                C=0
  or / xor           Z=res==0  N=0  H=0                C=0
  shifts / rotates   Z=res==0  N=0  H=0                C=outgoing bit
  swap               Z=res==0  N=0  H=0                C=0
  test_bit           Z=!bit    N=0  H=1                C=0
  bcd_adjust         Z=res==0  N=n  H=0                C=high correction applied
*/

use crate::bits;
use crate::cpu::regs::{FLAGS_MASK, Flag};

/// Rotation direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotDir {
    Left,
    Right,
}

impl RotDir {
    #[inline]
    fn distance(self) -> i32 {
        match self {
            RotDir::Left => 1,
            RotDir::Right => -1,
        }
    }
}

/// Packed (value, flags) result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AluResult(u32);

impl AluResult {
    /// Pack `value` with a flag mask; panics on stray flag bits.
    #[track_caller]
    pub fn new(value: u16, flags: u8) -> Self {
        assert!(
            flags & !FLAGS_MASK == 0,
            "flag byte {flags:#04x} has bits outside Z/N/H/C"
        );
        Self(((value as u32) << 8) | flags as u32)
    }

    /// Wrap an already packed word; panics if it is not a valid packed result.
    #[track_caller]
    pub fn from_raw(packed: u32) -> Self {
        let value = bits::check_bits16(packed >> 8);
        Self::new(value, packed as u8)
    }

    #[inline]
    pub fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub fn value(self) -> u16 {
        (self.0 >> 8) as u16
    }

    /// Low byte of the value, for 8-bit operations.
    #[inline]
    pub fn value8(self) -> u8 {
        self.value() as u8
    }

    #[inline]
    pub fn flags(self) -> u8 {
        self.0 as u8
    }

    #[inline]
    pub fn flag(self, flag: Flag) -> bool {
        self.flags() & flag.mask() != 0
    }
}

/// Build a flag mask from the four flags.
pub fn mask_znhc(z: bool, n: bool, h: bool, c: bool) -> u8 {
    let mut mask = 0;
    for (on, flag) in [(z, Flag::Z), (n, Flag::N), (h, Flag::H), (c, Flag::C)] {
        if on {
            mask |= flag.mask();
        }
    }
    mask
}

#[inline]
fn pack(value: u16, z: bool, n: bool, h: bool, c: bool) -> AluResult {
    AluResult::new(value, mask_znhc(z, n, h, c))
}

#[inline]
fn half_carry(l: u8, r: u8, c0: bool) -> bool {
    (l & 0xF) + (r & 0xF) + c0 as u8 > 0xF
}

#[inline]
fn byte_carry(l: u8, r: u8, c0: bool) -> bool {
    l as u16 + r as u16 + c0 as u16 > 0xFF
}

/// `l + r + carry_in`, wrapping at 8 bits.
pub fn add(l: u8, r: u8, carry_in: bool) -> AluResult {
    let result = l.wrapping_add(r).wrapping_add(carry_in as u8);
    pack(
        result as u16,
        result == 0,
        false,
        half_carry(l, r, carry_in),
        byte_carry(l, r, carry_in),
    )
}

/// 16-bit sum with H/C taken from the low byte addition.
pub fn add16_low(l: u16, r: u16) -> AluResult {
    let (ll, rl) = (l as u8, r as u8);
    pack(
        l.wrapping_add(r),
        false,
        false,
        half_carry(ll, rl, false),
        byte_carry(ll, rl, false),
    )
}

/// 16-bit sum with H/C taken from the high byte addition (including the carry
/// coming out of the low byte).
pub fn add16_high(l: u16, r: u16) -> AluResult {
    let c0 = byte_carry(l as u8, r as u8, false);
    let (lh, rh) = ((l >> 8) as u8, (r >> 8) as u8);
    pack(
        l.wrapping_add(r),
        false,
        false,
        half_carry(lh, rh, c0),
        byte_carry(lh, rh, c0),
    )
}

/// `l - r - borrow_in`, wrapping at 8 bits.
pub fn sub(l: u8, r: u8, borrow_in: bool) -> AluResult {
    let b = borrow_in as u16;
    let result = l.wrapping_sub(r).wrapping_sub(borrow_in as u8);
    pack(
        result as u16,
        result == 0,
        true,
        ((l & 0xF) as u16) < (r & 0xF) as u16 + b,
        (l as u16) < r as u16 + b,
    )
}

pub fn and(l: u8, r: u8) -> AluResult {
    let result = l & r;
    pack(result as u16, result == 0, false, true, false)
}

pub fn or(l: u8, r: u8) -> AluResult {
    let result = l | r;
    pack(result as u16, result == 0, false, false, false)
}

pub fn xor(l: u8, r: u8) -> AluResult {
    let result = l ^ r;
    pack(result as u16, result == 0, false, false, false)
}

pub fn shift_left(v: u8) -> AluResult {
    let result = v << 1;
    pack(result as u16, result == 0, false, false, v & 0x80 != 0)
}

/// Shift right keeping bit 7.
pub fn shift_right_arithmetic(v: u8) -> AluResult {
    let result = ((v as i8) >> 1) as u8;
    pack(result as u16, result == 0, false, false, v & 0x01 != 0)
}

pub fn shift_right_logical(v: u8) -> AluResult {
    let result = v >> 1;
    pack(result as u16, result == 0, false, false, v & 0x01 != 0)
}

/// 8-bit rotate by one; C receives the bit that wrapped around.
pub fn rotate(dir: RotDir, v: u8) -> AluResult {
    let result = bits::rotate(8, v as u32, dir.distance()) as u8;
    let out = match dir {
        RotDir::Left => v & 0x80 != 0,
        RotDir::Right => v & 0x01 != 0,
    };
    pack(result as u16, result == 0, false, false, out)
}

/// 9-bit rotate through the carry; C receives the new ninth bit.
pub fn rotate_through_carry(dir: RotDir, v: u8, carry: bool) -> AluResult {
    let nine = ((carry as u32) << 8) | v as u32;
    let rotated = bits::rotate(9, nine, dir.distance());
    let result = bits::clip(8, rotated) as u8;
    pack(
        result as u16,
        result == 0,
        false,
        false,
        bits::test(rotated, 8),
    )
}

/// Exchange the nibbles of `v`.
pub fn swap(v: u8) -> AluResult {
    let result = v.rotate_left(4);
    pack(result as u16, result == 0, false, false, false)
}

/// Z is set when bit `index` of `v` is clear. The value part is 0.
#[track_caller]
pub fn test_bit(v: u8, index: u32) -> AluResult {
    assert!(index < 8, "bit index {index} out of range");
    pack(0, !bits::test(v as u32, index), false, true, false)
}

/// Decimal adjust after an addition (`n == false`) or subtraction (`n == true`).
pub fn bcd_adjust(v: u8, n: bool, h: bool, c: bool) -> AluResult {
    let fix_low = h || (!n && (v & 0xF) > 9);
    let fix_high = c || (!n && v > 0x99);
    let fix = 0x60 * fix_high as u8 + 0x06 * fix_low as u8;
    let result = if n {
        v.wrapping_sub(fix)
    } else {
        v.wrapping_add(fix)
    };
    pack(result as u16, result == 0, n, false, fix_high)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const Z: u8 = 0x80;
    const N: u8 = 0x40;
    const H: u8 = 0x20;
    const C: u8 = 0x10;

    #[test]
    fn add_vectors() {
        let r = add(0x08, 0x08, false);
        assert_eq!((r.value(), r.flags()), (0x10, H));
        let r = add(0x80, 0x7F, true);
        assert_eq!((r.value(), r.flags()), (0x00, Z | H | C));
        let r = add(0x10, 0x15, false);
        assert_eq!((r.value(), r.flags()), (0x25, 0));
    }

    #[test]
    fn add16_vectors() {
        let r = add16_low(0x11FF, 0x0001);
        assert_eq!((r.value(), r.flags()), (0x1200, H | C));
        let r = add16_high(0x11FF, 0x0001);
        assert_eq!((r.value(), r.flags()), (0x1200, 0));
        let r = add16_high(0x0FFF, 0x0001);
        assert_eq!((r.value(), r.flags()), (0x1000, H));
        let r = add16_high(0xFFFF, 0x0001);
        assert_eq!((r.value(), r.flags()), (0x0000, H | C));
    }

    #[test]
    fn sub_vectors() {
        let r = sub(0x01, 0x01, true);
        assert_eq!((r.value(), r.flags()), (0xFF, N | H | C));
        let r = sub(0x10, 0x10, false);
        assert_eq!((r.value(), r.flags()), (0x00, Z | N));
        let r = sub(0x10, 0x80, false);
        assert_eq!((r.value(), r.flags()), (0x90, N | C));
        let r = sub(0x01, 0x01, false);
        assert_eq!((r.value(), r.flags()), (0x00, Z | N));
    }

    #[test]
    fn logic_vectors() {
        let r = and(0x53, 0xA7);
        assert_eq!((r.value(), r.flags()), (0x03, H));
        let r = and(0xF0, 0x0F);
        assert_eq!((r.value(), r.flags()), (0x00, Z | H));
        let r = or(0x53, 0xA7);
        assert_eq!((r.value(), r.flags()), (0xF7, 0));
        let r = xor(0x53, 0xA7);
        assert_eq!((r.value(), r.flags()), (0xF4, 0));
        assert_eq!(xor(0x5A, 0x5A).flags(), Z);
    }

    #[test]
    fn shift_vectors() {
        let r = shift_left(0x80);
        assert_eq!((r.value(), r.flags()), (0x00, Z | C));
        let r = shift_right_arithmetic(0x81);
        assert_eq!((r.value(), r.flags()), (0xC0, C));
        let r = shift_right_logical(0x81);
        assert_eq!((r.value(), r.flags()), (0x40, C));
    }

    #[test]
    fn rotate_vectors() {
        let r = rotate(RotDir::Left, 0x80);
        assert_eq!((r.value(), r.flags()), (0x01, C));
        let r = rotate(RotDir::Right, 0x01);
        assert_eq!((r.value(), r.flags()), (0x80, C));
        let r = rotate_through_carry(RotDir::Left, 0x80, false);
        assert_eq!((r.value(), r.flags()), (0x00, Z | C));
        let r = rotate_through_carry(RotDir::Left, 0x00, true);
        assert_eq!((r.value(), r.flags()), (0x01, 0));
        let r = rotate_through_carry(RotDir::Right, 0x01, true);
        assert_eq!((r.value(), r.flags()), (0x80, C));
    }

    #[test]
    fn swap_and_test_bit() {
        let r = swap(0xA5);
        assert_eq!((r.value(), r.flags()), (0x5A, 0));
        assert_eq!(swap(0).flags(), Z);
        assert_eq!(test_bit(0x20, 5).flags(), H);
        assert_eq!(test_bit(0x20, 4).flags(), Z | H);
        assert_eq!(test_bit(0xFF, 0).value(), 0);
    }

    #[test]
    fn bcd_vectors() {
        let r = bcd_adjust(0x6D, false, false, false);
        assert_eq!((r.value(), r.flags()), (0x73, 0));
        let r = bcd_adjust(0x0F, true, true, false);
        assert_eq!((r.value(), r.flags()), (0x09, N));
        let r = bcd_adjust(0x9A, false, false, false);
        assert_eq!((r.value(), r.flags()), (0x00, Z | C));
    }

    #[test]
    #[should_panic]
    fn stray_flag_bits_are_rejected() {
        AluResult::from_raw(0x1234_01);
    }

    #[test]
    #[should_panic]
    fn test_bit_rejects_index_8() {
        test_bit(0, 8);
    }

    #[test]
    fn mask_builder() {
        assert_eq!(mask_znhc(true, false, true, false), Z | H);
        assert_eq!(mask_znhc(true, true, true, true), 0xF0);
    }

    proptest! {
        #[test]
        fn add_wraps_and_sets_z(l: u8, r: u8) {
            let res = add(l, r, false);
            let want = l.wrapping_add(r);
            prop_assert_eq!(res.value(), want as u16);
            prop_assert_eq!(res.flag(Flag::Z), want == 0);
            prop_assert!(!res.flag(Flag::N));
        }

        #[test]
        fn rotate_left_eight_times_is_identity(v: u8) {
            let first = rotate(RotDir::Left, v);
            prop_assert_eq!(first.flag(Flag::C), v & 0x80 != 0);

            let mut cur = first;
            for _ in 1..8 {
                cur = rotate(RotDir::Left, cur.value8());
            }
            prop_assert_eq!(cur.value8(), v);
            // RLC copies the wrapped bit into both bit 0 and C.
            prop_assert_eq!(cur.flag(Flag::C), v & 0x01 != 0);
        }

        #[test]
        fn pack_unpack_round_trip(value: u16, z: bool, n: bool, h: bool, c: bool) {
            let flags = mask_znhc(z, n, h, c);
            let packed = AluResult::new(value, flags);
            let back = AluResult::from_raw(packed.raw());
            prop_assert_eq!(back.value(), value);
            prop_assert_eq!(back.flags(), flags);
        }

        #[test]
        fn sub_inverts_add(l: u8, r: u8) {
            let sum = add(l, r, false).value() as u8;
            prop_assert_eq!(sub(sum, r, false).value() as u8, l);
        }
    }
}
