//! Decoding of capitalized numeral text back into a decimal string.
//!
//! A single left-to-right scan drives a small accumulator machine. Groups
//! close on 万/亿; a closing unit normally multiplies everything gathered so
//! far, but a unit ranked below the previous close only adds its group, the
//! rule that makes gapped numerals like 壹亿零壹万 come out right. The scan
//! is an independent pass over the glyph tables and shares nothing with the
//! encoder.

use crate::decimal::DecimalValue;
use crate::error::{DecodeError, DecodeResult};
use crate::tables;

/// Accumulator state threaded through the scan.
///
/// `total` holds magnitude finalized by closed high-order groups, `group`
/// the value of the group still open, and `pending` the most recent digit
/// glyph, waiting for the unit that scales it. Both `group` and `pending`
/// reset to zero on a close; `last_rank` remembers the rank of that close
/// for the out-of-order rule.
#[derive(Debug)]
struct DecodeState {
    total: DecimalValue,
    group: DecimalValue,
    pending: u8,
    last_rank: Option<usize>,
    seen_digit: bool,
    negative: bool,
    fraction: DecimalValue,
}

impl DecodeState {
    fn new() -> Self {
        Self {
            total: DecimalValue::zero(),
            group: DecimalValue::zero(),
            pending: 0,
            last_rank: None,
            seen_digit: false,
            negative: false,
            fraction: DecimalValue::zero(),
        }
    }

    fn push_digit(&mut self, digit: u8) {
        self.pending = digit;
        self.seen_digit = true;
    }

    /// Fold a scale unit into the accumulator: 拾 佰 仟 scale the pending
    /// digit within the open group, 万 and 亿 close it. Returns `false` when
    /// no digit glyph has been seen yet.
    fn apply_scale_unit(&mut self, rank: usize) -> bool {
        if !self.seen_digit {
            return false;
        }
        let pending = DecimalValue::from(std::mem::take(&mut self.pending));
        #[allow(clippy::cast_possible_wrap)]
        let factor = DecimalValue::power_of_ten(tables::scale_unit_exponent(rank) as i32);
        if rank <= tables::MAX_INTRA_RANK {
            self.group = self.group.add(&pending.multiply(&factor));
        } else {
            let closed = self.group.add(&pending);
            if self.last_rank.is_some_and(|last| rank < last) {
                self.total = self.total.add(&closed.multiply(&factor));
            } else {
                self.total = self.total.add(&closed).multiply(&factor);
            }
            self.group = DecimalValue::zero();
            self.last_rank = Some(rank);
        }
        true
    }

    /// Fold `digit` paired with a monetary unit into the fraction.
    #[allow(clippy::cast_possible_wrap)]
    fn add_subunit(&mut self, digit: u8, rank: usize) {
        let place = DecimalValue::power_of_ten(-(rank as i32));
        self.fraction = self
            .fraction
            .add(&DecimalValue::from(digit).multiply(&place));
    }

    /// The fallback for a fractional digit with no unit after it: append it
    /// to the fraction's plain-string form.
    fn append_fraction_digit(&mut self, digit: u8) {
        self.fraction.append_digit(digit);
    }

    fn finish(self) -> DecimalValue {
        let pending = DecimalValue::from(self.pending);
        let mut value = self
            .total
            .add(&self.group)
            .add(&pending)
            .add(&self.fraction)
            .with_scale(tables::MONEY_UNITS.len() - 1);
        if self.negative {
            value = DecimalValue::zero().subtract(&value);
        }
        value.normalize()
    }
}

/// Decode capitalized numeral text into a plain decimal string.
///
/// The scan starts in fractional mode when the text carries no 圆 at all
/// (bare sub-yuan amounts like 伍角); otherwise any monetary-unit glyph met
/// in integer mode switches to fractional mode and is consumed without
/// contributing a value. Empty input decodes to `0`, the counterpart of the
/// empty encoding of zero.
///
/// # Errors
///
/// Returns [`DecodeError::InvalidNumeralText`] when a glyph is absent from
/// every table, when 负 appears anywhere but first, or when a scale unit
/// arrives before any digit glyph.
pub fn decode(text: &str) -> DecodeResult<String> {
    let err = || DecodeError::InvalidNumeralText(text.to_string());
    let mut state = DecodeState::new();
    let mut fractional = !text.contains(tables::YUAN);
    let mut glyphs = text.chars().peekable();
    let mut first = true;

    while let Some(glyph) = glyphs.next() {
        if first && glyph == tables::NEGATIVE {
            state.negative = true;
            first = false;
            continue;
        }
        first = false;

        if fractional {
            if glyph == tables::NEGATIVE {
                return Err(err());
            }
            let digit = tables::digit_value(glyph);
            if digit.is_none()
                && tables::scale_unit_rank(glyph).is_none()
                && tables::money_unit_rank(glyph).is_none()
            {
                return Err(err());
            }
            match glyphs.peek().copied().and_then(tables::money_unit_rank) {
                Some(rank) => {
                    glyphs.next();
                    state.add_subunit(digit.unwrap_or(0), rank);
                }
                None => {
                    if let Some(d) = digit {
                        state.append_fraction_digit(d);
                    }
                }
            }
        } else if let Some(digit) = tables::digit_value(glyph) {
            state.push_digit(digit);
        } else if let Some(rank) = tables::scale_unit_rank(glyph) {
            if !state.apply_scale_unit(rank) {
                return Err(err());
            }
        } else if tables::money_unit_rank(glyph).is_some() {
            fractional = true;
        } else {
            return Err(err());
        }
    }

    Ok(state.finish().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_plain_groups() {
        assert_eq!(decode("壹仟零贰拾肆圆").unwrap(), "1024");
        assert_eq!(decode("柒圆").unwrap(), "7");
        assert_eq!(decode("玖佰玖拾玖圆").unwrap(), "999");
        assert_eq!(decode("壹拾圆").unwrap(), "10");
    }

    #[test]
    fn test_decode_group_closes() {
        assert_eq!(decode("伍万圆").unwrap(), "50000");
        assert_eq!(decode("壹拾伍万圆").unwrap(), "150000");
        assert_eq!(decode("壹亿圆").unwrap(), "100000000");
        assert_eq!(decode("壹亿零壹圆").unwrap(), "100000001");
        assert_eq!(decode("伍万陆仟圆").unwrap(), "56000");
    }

    #[test]
    fn test_decode_out_of_order_rank_adds() {
        // 亿 then 万: the lower-ranked group adds instead of multiplying
        assert_eq!(decode("壹亿零伍佰万圆").unwrap(), "105000000");
        assert_eq!(decode("壹亿零壹万伍仟圆").unwrap(), "100015000");
    }

    #[test]
    fn test_decode_compound_tier() {
        assert_eq!(decode("壹万亿圆").unwrap(), "1000000000000");
        assert_eq!(decode("伍万肆仟叁佰贰拾壹亿圆").unwrap(), "5432100000000");
        // a closed 万 group followed by the bare 亿 placeholder
        assert_eq!(decode("壹仟万亿圆").unwrap(), "1000000000000000");
        assert_eq!(decode("壹拾贰万亿圆").unwrap(), "12000000000000");
    }

    #[test]
    fn test_decode_unit_after_close_without_digit_adds_nothing() {
        assert_eq!(decode("壹亿拾圆").unwrap(), "100000000");
    }

    #[test]
    fn test_decode_fractions() {
        assert_eq!(decode("伍角").unwrap(), "0.5");
        assert_eq!(decode("零伍分").unwrap(), "0.05");
        assert_eq!(decode("壹角贰分叁厘肆毫").unwrap(), "0.1234");
        assert_eq!(decode("捌圆零伍分").unwrap(), "8.05");
    }

    #[test]
    fn test_decode_sign() {
        assert_eq!(decode("负捌圆零伍分").unwrap(), "-8.05");
        assert_eq!(decode("负伍角").unwrap(), "-0.5");
    }

    #[test]
    fn test_decode_bare_fraction_digit_appends() {
        // a trailing digit with no unit lands one place past the last unit
        assert_eq!(decode("壹角贰分叁厘肆").unwrap(), "0.1234");
        // and past 毫 it falls off at the scale-4 truncation
        assert_eq!(decode("壹角贰分叁厘肆毫伍").unwrap(), "0.1234");
        // with no unit at all the appended digits read as a bare integer
        assert_eq!(decode("陆").unwrap(), "6");
    }

    #[test]
    fn test_decode_empty_text_is_zero() {
        assert_eq!(decode("").unwrap(), "0");
        assert_eq!(decode("零").unwrap(), "0");
    }

    #[test]
    fn test_decode_rejects_unknown_glyphs() {
        assert!(decode("壹仟X圆").is_err());
        assert!(decode("伍角☃").is_err());
        assert!(decode("一圆").is_err()); // lowercase numerals are not in the tables
    }

    #[test]
    fn test_decode_rejects_misplaced_sign() {
        assert!(decode("壹负圆").is_err());
        assert!(decode("伍角负").is_err());
    }

    #[test]
    fn test_decode_rejects_unit_before_any_digit() {
        assert!(decode("拾伍圆").is_err());
        assert!(decode("万圆").is_err());
    }

    #[test]
    fn test_decode_skips_misplaced_known_glyphs_in_fraction() {
        // a stray scale unit past 圆 is skipped, not rejected
        assert_eq!(decode("伍圆拾").unwrap(), "5");
        assert_eq!(decode("伍角拾分").unwrap(), "0.5");
    }
}
