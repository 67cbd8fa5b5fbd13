//! # Flag-setting arithmetic
//!
//! Emulates the ARM data-processing arithmetic instructions with the `S`
//! suffix (`ADDS`, `SUBS`, ...): every operation returns the 32-bit result
//! together with a fresh set of N, Z, C, V flags.
//!
//! Two primitives carry all the work:
//!
//! ```text
//! add_with_carry(a, b, cin)   sum  = a + b + cin       (unsigned, 33 bits)
//!                             C    = sum > 0xFFFF_FFFF
//!                             V    = a, b same sign and result sign differs
//!
//! sub_with_borrow(a, b, bin)  diff = a - b - bin       (signed intermediate)
//!                             C    = diff >= 0          (no borrow happened)
//!                             V    = a, b differ in sign and result sign != a
//! ```
//!
//! Note the ARM convention for subtraction: `C=1` means *no* borrow, so
//! `SBC`/`RSC` consume the inverted carry flag as their borrow-in.

use serde::{Deserialize, Serialize};

use crate::flags::FlagSet;
use crate::operand::{Operand, SIGN_BIT};

/// The result of a flag-setting arithmetic operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OperationResult {
    pub result: i32,
    pub flags: FlagSet,
}

/// Raw output of the adder, before flag packing.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ArithmeticOpResult {
    pub result: u32,
    pub carry: bool,
    pub overflow: bool,
}

impl From<ArithmeticOpResult> for OperationResult {
    #[allow(clippy::cast_possible_wrap)]
    fn from(op: ArithmeticOpResult) -> Self {
        let result = op.result as i32;

        Self {
            result,
            flags: FlagSet::from_result(result, op.carry, op.overflow),
        }
    }
}

#[allow(clippy::cast_possible_truncation)]
pub(crate) fn add_with_carry(first_op: u32, second_op: u32, carry_in: bool) -> ArithmeticOpResult {
    // we do the sum in 64bits so that the 32nd bit is the carry
    let sum = u64::from(first_op) + u64::from(second_op) + u64::from(carry_in);
    let result = sum as u32;

    // overflow only occurs when operands have the same sign and result has the opposite one
    let overflow = (!(first_op ^ second_op) & (first_op ^ result)) & SIGN_BIT != 0;

    ArithmeticOpResult {
        result,
        carry: sum > u64::from(u32::MAX),
        overflow,
    }
}

#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_sign_loss)]
pub(crate) fn sub_with_borrow(first_op: i32, second_op: i32, borrow_in: bool) -> ArithmeticOpResult {
    let unsigned_first = Operand::new(first_op).unsigned();
    let unsigned_second = Operand::new(second_op).unsigned();

    let diff = i64::from(unsigned_first) - i64::from(unsigned_second) - i64::from(borrow_in);
    let result = diff as u32;

    // The sign comparison works on the signed operands: overflow when they
    // differ in sign and the result does not keep the sign of the minuend.
    let signed_result = Operand::from(result).signed();
    let overflow = ((first_op ^ second_op) & (first_op ^ signed_result)) as u32 & SIGN_BIT != 0;

    ArithmeticOpResult {
        result,
        carry: diff >= 0,
        overflow,
    }
}

/// `a + b`
#[must_use]
pub fn add(a: impl Into<Operand>, b: impl Into<Operand>) -> OperationResult {
    add_with_carry(a.into().unsigned(), b.into().unsigned(), false).into()
}

/// `a + b + C`
#[must_use]
pub fn adc(a: impl Into<Operand>, b: impl Into<Operand>, carry: bool) -> OperationResult {
    add_with_carry(a.into().unsigned(), b.into().unsigned(), carry).into()
}

/// `a - b`
#[must_use]
pub fn sub(a: impl Into<Operand>, b: impl Into<Operand>) -> OperationResult {
    sub_with_borrow(a.into().signed(), b.into().signed(), false).into()
}

/// `a - b - NOT(C)`
#[must_use]
pub fn sbc(a: impl Into<Operand>, b: impl Into<Operand>, carry: bool) -> OperationResult {
    sub_with_borrow(a.into().signed(), b.into().signed(), !carry).into()
}

/// `b - a`
#[must_use]
pub fn rsb(a: impl Into<Operand>, b: impl Into<Operand>) -> OperationResult {
    sub_with_borrow(b.into().signed(), a.into().signed(), false).into()
}

/// `b - a - NOT(C)`
#[must_use]
pub fn rsc(a: impl Into<Operand>, b: impl Into<Operand>, carry: bool) -> OperationResult {
    sub_with_borrow(b.into().signed(), a.into().signed(), !carry).into()
}

/// Flags of `a - b`.
///
/// The difference is still returned in `result`; a caller modelling the
/// real instruction discards it.
#[must_use]
pub fn cmp(a: impl Into<Operand>, b: impl Into<Operand>) -> OperationResult {
    sub_with_borrow(a.into().signed(), b.into().signed(), false).into()
}

/// Flags of `a + b` (compare negative).
#[must_use]
pub fn cmn(a: impl Into<Operand>, b: impl Into<Operand>) -> OperationResult {
    add_with_carry(a.into().unsigned(), b.into().unsigned(), false).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn expected(result: i32, n: bool, z: bool, c: bool, v: bool) -> OperationResult {
        let mut flags = FlagSet::default();
        flags.set_sign_flag(n);
        flags.set_zero_flag(z);
        flags.set_carry_flag(c);
        flags.set_overflow_flag(v);
        OperationResult { result, flags }
    }

    fn random_pair() -> (i32, i32) {
        (rand::random::<i32>(), rand::random::<i32>())
    }

    #[test]
    fn add_zero_is_identity() {
        for a in [0, 1, -1, i32::MAX, i32::MIN, 12345, -98765] {
            assert_eq!(add(a, 0), expected(a, a < 0, a == 0, false, false));
        }
        for _ in 0..1000 {
            let a = rand::random::<i32>();
            assert_eq!(add(a, 0), expected(a, a < 0, a == 0, false, false));
        }
    }

    #[test]
    fn add_signed_overflow() {
        assert_eq!(
            add(0x7FFF_FFFF, 1),
            expected(i32::MIN, true, false, false, true)
        );
    }

    #[test]
    fn add_two_negatives_carry_and_overflow() {
        // 0x80000001 + 0x80000000 = 0x1_0000_0001
        assert_eq!(
            add(0x8000_0001_u32, 0x8000_0000_u32),
            expected(1, false, false, true, true)
        );
    }

    #[test]
    fn adc_unsigned_wraparound() {
        assert_eq!(
            adc(0xFFFF_FFFF_u32, 1, false),
            expected(0, false, true, true, false)
        );
    }

    #[test]
    fn adc_consumes_carry() {
        assert_eq!(adc(2, 3, true), expected(6, false, false, false, false));
        assert_eq!(
            adc(0xFFFF_FFFF_u32, 0, true),
            expected(0, false, true, true, false)
        );
        // the carry-in alone pushes a positive sum over i32::MAX
        assert_eq!(
            adc(0x7FFF_FFFF, 0, true),
            expected(i32::MIN, true, false, false, true)
        );
    }

    #[test]
    fn sub_borrow_clears_carry() {
        assert_eq!(sub(0, 1), expected(-1, true, false, false, false));
    }

    #[test]
    fn sub_without_borrow_sets_carry() {
        assert_eq!(sub(10, 3), expected(7, false, false, true, false));
        assert_eq!(sub(5, 5), expected(0, false, true, true, false));
    }

    #[test]
    fn sub_signed_overflow() {
        // i32::MIN - 1 wraps to i32::MAX
        assert_eq!(
            sub(i32::MIN, 1),
            expected(i32::MAX, false, false, true, true)
        );
        // i32::MAX - (-1) wraps to i32::MIN
        assert_eq!(sub(i32::MAX, -1), expected(i32::MIN, true, false, false, true));
    }

    #[test]
    fn sbc_with_carry_set_is_sub() {
        assert_eq!(sbc(10, 3, true), sub(10, 3));
        assert_eq!(sbc(10, 3, true), expected(7, false, false, true, false));
    }

    #[test]
    fn sbc_with_carry_clear_borrows_one() {
        assert_eq!(sbc(10, 3, false), expected(6, false, false, true, false));
        assert_eq!(sbc(0, 0, false), expected(-1, true, false, false, false));
        assert_eq!(
            sbc(i32::MIN, 0, false),
            expected(i32::MAX, false, false, true, true)
        );
    }

    #[test]
    fn rsb_reverses_operands() {
        assert_eq!(rsb(3, 10), expected(7, false, false, true, false));
        // NEG r0 is RSB r0, #0
        assert_eq!(rsb(5, 0), expected(-5, true, false, false, false));
        assert_eq!(rsb(i32::MIN, 0), expected(i32::MIN, true, false, false, true));
    }

    #[test]
    fn rsc_reverses_operands_and_borrows() {
        assert_eq!(rsc(3, 10, true), rsb(3, 10));
        assert_eq!(rsc(3, 10, false), expected(6, false, false, true, false));
        assert_eq!(rsc(0, 0, false), expected(-1, true, false, false, false));
    }

    #[test]
    fn cmn_is_add_flags() {
        assert_eq!(cmn(-1, 1), expected(0, false, true, true, false));
        for _ in 0..1000 {
            let (a, b) = random_pair();
            assert_eq!(cmn(a, b), add(a, b));
        }
    }

    #[test]
    fn sub_and_reversed_rsb_agree() {
        for _ in 0..1000 {
            let (a, b) = random_pair();
            assert_eq!(sub(a, b), rsb(b, a));
            assert_eq!(sbc(a, b, false), rsc(b, a, false));
        }
    }

    #[test]
    fn cmp_is_sub() {
        for _ in 0..1000 {
            let (a, b) = random_pair();
            assert_eq!(cmp(a, b), sub(a, b));
        }
        assert_eq!(cmp(7, 7), sub(7, 7));
    }

    #[test]
    fn repeated_calls_are_identical() {
        for _ in 0..100 {
            let (a, b) = random_pair();
            let carry = rand::random::<bool>();
            assert_eq!(adc(a, b, carry), adc(a, b, carry));
            assert_eq!(sbc(a, b, carry), sbc(a, b, carry));
            assert_eq!(rsc(a, b, carry), rsc(a, b, carry));
        }
    }

    #[test]
    fn addition_matches_wide_reference() {
        for _ in 0..10_000 {
            let (a, b) = random_pair();
            let carry = rand::random::<bool>();
            let op = adc(a, b, carry);

            let unsigned_sum =
                u64::from(Operand::new(a).unsigned()) + u64::from(Operand::new(b).unsigned()) + u64::from(carry);
            let signed_sum = i64::from(a) + i64::from(b) + i64::from(carry);

            assert_eq!(op.result, a.wrapping_add(b).wrapping_add(i32::from(carry)));
            assert_eq!(op.flags.carry_flag(), unsigned_sum > u64::from(u32::MAX));
            assert_eq!(op.flags.overflow_flag(), i32::try_from(signed_sum).is_err());
            assert_eq!(op.flags.sign_flag(), op.result < 0);
            assert_eq!(op.flags.zero_flag(), op.result == 0);
        }
    }

    #[test]
    fn subtraction_matches_wide_reference() {
        for _ in 0..10_000 {
            let (a, b) = random_pair();
            let carry = rand::random::<bool>();
            let borrow = i64::from(!carry);
            let op = sbc(a, b, carry);

            let unsigned_diff =
                i64::from(Operand::new(a).unsigned()) - i64::from(Operand::new(b).unsigned()) - borrow;
            let signed_diff = i64::from(a) - i64::from(b) - borrow;

            assert_eq!(op.result, a.wrapping_sub(b).wrapping_sub(i32::from(!carry)));
            assert_eq!(op.flags.carry_flag(), unsigned_diff >= 0);
            assert_eq!(op.flags.overflow_flag(), i32::try_from(signed_diff).is_err());
            assert_eq!(op.flags.sign_flag(), op.result < 0);
            assert_eq!(op.flags.zero_flag(), op.result == 0);
        }
    }

    #[test]
    fn wide_operands_are_normalized() {
        // 2^32 + 1 wraps to 1
        assert_eq!(add(0x1_0000_0001_i64, 1_i64), add(1, 1));
        assert_eq!(sub(-0x1_0000_0000_i64, 0_i64), sub(0, 0));
    }
}
