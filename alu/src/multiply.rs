use crate::flags::FlagUpdate;
use crate::operand::Operand;
use crate::operation::Outcome;

/// `a * b`, keeping the low 32 bits of the product.
///
/// N and Z describe the truncated result. V reports whether the exact
/// signed product fits in 32 bits, C is left unchanged.
#[must_use]
pub fn mul(a: impl Into<Operand>, b: impl Into<Operand>) -> Outcome {
    let product = i64::from(a.into().signed()) * i64::from(b.into().signed());
    let result = Operand::from(product).signed();

    Outcome {
        result,
        flags: FlagUpdate::from_result(result).with_overflow(i32::try_from(product).is_err()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn small_product() {
        let outcome = mul(6, -7);
        assert_eq!(outcome.result, -42);
        assert_eq!(
            outcome.flags,
            FlagUpdate {
                sign: true,
                zero: false,
                carry: None,
                overflow: Some(false),
            }
        );
    }

    #[test]
    fn product_out_of_range_overflows() {
        // 0x10000 * 0x10000 = 2^32, low word is 0
        let outcome = mul(0x1_0000, 0x1_0000);
        assert_eq!(outcome.result, 0);
        assert!(outcome.flags.zero);
        assert_eq!(outcome.flags.overflow, Some(true));

        let outcome = mul(i32::MIN, -1);
        assert_eq!(outcome.result, i32::MIN);
        assert_eq!(outcome.flags.overflow, Some(true));
    }

    #[test]
    fn boundary_product_fits() {
        let outcome = mul(i32::MIN, 1);
        assert_eq!(outcome.result, i32::MIN);
        assert_eq!(outcome.flags.overflow, Some(false));
    }
}
