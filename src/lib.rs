//! # daxie
//!
//! Exact conversion between decimal amounts and the traditional Chinese
//! **capitalized numerals** (大写金额) used on financial instruments:
//! checks, contracts, invoices.
//!
//! Both directions are exact. Amounts are carried as digit strings through
//! [`DecimalValue`] arithmetic; no binary floating point touches a monetary
//! value, so every amount round-trips without drift:
//!
//! - **encode**: `"1024"` → 壹仟零贰拾肆圆
//! - **decode**: 壹仟零贰拾肆圆 → `"1024"`
//!
//! ## Examples
//!
//! ```rust
//! use daxie::{decode, encode, round_half_to_even};
//!
//! let text = encode("1024").unwrap();
//! assert_eq!(text, "壹仟零贰拾肆圆");
//! assert_eq!(decode(&text).unwrap(), "1024");
//!
//! // sub-yuan amounts need no integer section at all
//! assert_eq!(encode("0.5").unwrap(), "伍角");
//! assert_eq!(decode("伍角").unwrap(), "0.5");
//!
//! // settlement rounding is half-to-even, not half-up
//! assert_eq!(round_half_to_even("0.125", 2).unwrap(), "0.12");
//! ```
//!
//! ## Numeral conventions
//!
//! The integer part is grouped four digits at a time under the 万/亿 labels,
//! runs of internal zeros collapse to a single 零, and the 10^12 tier is the
//! 万亿 compound. The fractional part covers four places through the
//! monetary units 角 分 厘 毫; the integer table is faithful through sixteen
//! digits. Two deliberate edge behaviors of the financial convention are
//! kept: the integer zero encodes as the empty string, and a fractional
//! digit with no unit glyph after it decodes positionally.
//!
//! The repayment-schedule calculator in [`InterestCalculator`] sits outside
//! the numeral core and touches it only through the rounding primitive and
//! exact sums.

pub(crate) mod decimal;
pub(crate) mod decoder;
pub(crate) mod encoder;
pub(crate) mod error;
pub(crate) mod schedule;
pub(crate) mod tables;

// Re-export the public surface
pub use decimal::{round_half_to_even, DecimalValue};
pub use decoder::decode;
pub use encoder::encode;
pub use error::{DecodeError, DecodeResult, EncodeError, EncodeResult};
pub use schedule::{totals, Installment, InterestCalculator, Period, ScheduleTotals};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_decode_roundtrip() {
        let cases = ["1024", "100000001", "0.5", "-8.05", "5432100000000"];
        for case in cases {
            let text = encode(case).unwrap();
            assert_eq!(decode(&text).unwrap(), case, "round trip of {case}");
        }
    }

    #[test]
    fn test_zero_roundtrips_through_the_empty_encoding() {
        let text = encode("0").unwrap();
        assert_eq!(text, "");
        assert_eq!(decode(&text).unwrap(), "0");
    }

    #[test]
    fn test_error_types_carry_the_offending_input() {
        assert_eq!(
            encode("12x"),
            Err(EncodeError::InvalidNumber("12x".to_string()))
        );
        assert_eq!(
            decode("壹X圆"),
            Err(DecodeError::InvalidNumeralText("壹X圆".to_string()))
        );
    }

    #[test]
    fn test_rounding_primitive() {
        assert_eq!(round_half_to_even("0.125", 2).unwrap(), "0.12");
        assert_eq!(round_half_to_even("0.875", 2).unwrap(), "0.88");
    }
}
