//! Encoding of decimal amounts into capitalized numeral text.
//!
//! The integer part is rendered in 4-digit groups labelled 万 and 亿; the
//! fractional part is rendered digit by digit against the monetary units
//! 角 分 厘 毫. Semantics follow the conventions used on financial
//! instruments: runs of internal zeros collapse to a single 零, trailing
//! zeros vanish, and an all-zero group keeps its place through a bare
//! magnitude label.

use crate::error::{EncodeError, EncodeResult};
use crate::tables;

/// Encode a signed decimal string into capitalized numeral text.
///
/// The accepted grammar is `[+|-] digits [ '.' digits ]` with at least one
/// digit; either side of the point may be empty. The 负 prefix appears only
/// when the integer part is numerically below zero, and the integer zero
/// renders as the empty string, so `0.5` and `-0.5` both come out as 伍角.
///
/// Fractional digits past the fourth have no monetary unit and are emitted
/// as bare digit glyphs; callers wanting rounded output must round first.
///
/// # Errors
///
/// Returns [`EncodeError::InvalidNumber`] if `number` does not match the
/// grammar above.
pub fn encode(number: &str) -> EncodeResult<String> {
    let input = number.trim();
    let (signed, unsigned) = match input.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, input.strip_prefix('+').unwrap_or(input)),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((int, frac)) => (int, frac),
        None => (unsigned, ""),
    };
    if int_part.is_empty() && frac_part.is_empty() {
        return Err(EncodeError::InvalidNumber(number.to_string()));
    }
    if !int_part
        .bytes()
        .chain(frac_part.bytes())
        .all(|b| b.is_ascii_digit())
    {
        return Err(EncodeError::InvalidNumber(number.to_string()));
    }

    let int_trimmed = int_part.trim_start_matches('0');
    let int_digits = if int_trimmed.is_empty() { "0" } else { int_trimmed };
    let negative = signed && int_digits != "0";

    let mut out = String::new();
    if negative {
        out.push(tables::NEGATIVE);
    }
    out.push_str(&encode_integer(int_digits));
    out.push_str(&encode_fraction(frac_part));
    Ok(out)
}

/// Encode a non-negative integer digit string (no sign, no leading zeros
/// beyond a literal `0`).
///
/// Groups of four digits are rendered most-significant first. Counting
/// groups from the least-significant end, group 1 is labelled 万, group 2
/// 亿, and higher groups 万 again, the 万-of-亿 compound that carries the
/// 10^12 tier (壹万亿). An all-zero group at the 亿 position contributes its
/// label alone to preserve the overall magnitude. A non-empty rendering is
/// terminated by a single 圆; zero renders as the empty string.
pub(crate) fn encode_integer(digits: &str) -> String {
    let bytes = digits.as_bytes();
    let group_count = bytes.len().div_ceil(4);
    let mut out = String::new();
    for g in (0..group_count).rev() {
        // g counts groups from the least-significant end
        let end = bytes.len() - g * 4;
        let group = &bytes[end.saturating_sub(4)..end];
        let rendered = render_group(group);
        if rendered.is_empty() {
            if g == 2 {
                out.push(tables::SCALE_UNITS[4]);
            }
        } else {
            out.push_str(&rendered);
            if g >= 1 {
                let label = if g == 2 { 4 } else { 3 };
                out.push(tables::SCALE_UNITS[label]);
            }
        }
    }
    if !out.is_empty() {
        out.push(tables::YUAN);
    }
    out
}

/// Render one 4-digit group (the leftmost may be shorter).
///
/// Zeros are deferred; the next non-zero digit flushes them as a single 零.
/// Trailing zeros never surface. Non-zero digits carry the intra-group unit
/// for their offset from the group's low end.
fn render_group(group: &[u8]) -> String {
    let mut out = String::new();
    let mut deferred_zero = false;
    let len = group.len();
    for (j, &b) in group.iter().enumerate() {
        let digit = b - b'0';
        if digit == 0 {
            deferred_zero = true;
            continue;
        }
        if deferred_zero {
            out.push(tables::DIGITS[0]);
            deferred_zero = false;
        }
        out.push(tables::DIGITS[digit as usize]);
        let offset = len - 1 - j;
        if offset >= 1 {
            out.push(tables::SCALE_UNITS[offset - 1]);
        }
    }
    out
}

/// Encode the fractional digit string against the monetary units.
///
/// Only trailing zeros are trimmed; an all-zero fraction keeps a single
/// digit, so `0.00` still surfaces a bare 零. A zero digit contributes 零
/// with no unit, a non-zero digit its glyph plus the unit for its position,
/// and positions past 毫 the bare glyph.
pub(crate) fn encode_fraction(digits: &str) -> String {
    let trimmed = digits.trim_end_matches('0');
    let effective = if trimmed.is_empty() && !digits.is_empty() {
        "0"
    } else {
        trimmed
    };
    let mut out = String::new();
    for (i, b) in effective.bytes().enumerate() {
        let digit = (b - b'0') as usize;
        out.push(tables::DIGITS[digit]);
        if digit != 0 && i + 1 < tables::MONEY_UNITS.len() {
            out.push(tables::MONEY_UNITS[i + 1]);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_group_with_internal_zero() {
        assert_eq!(encode_integer("1024"), "壹仟零贰拾肆圆");
        assert_eq!(encode_integer("1004"), "壹仟零肆圆");
        assert_eq!(encode_integer("1000"), "壹仟圆");
    }

    #[test]
    fn test_small_integers() {
        assert_eq!(encode_integer("0"), "");
        assert_eq!(encode_integer("7"), "柒圆");
        assert_eq!(encode_integer("10"), "壹拾圆");
        assert_eq!(encode_integer("999"), "玖佰玖拾玖圆");
    }

    #[test]
    fn test_zero_run_collapses_to_one_glyph() {
        let text = encode_integer("100000001");
        assert_eq!(text, "壹亿零壹圆");
        assert_eq!(text.chars().filter(|&c| c == '零').count(), 1);
    }

    #[test]
    fn test_group_labels() {
        assert_eq!(encode_integer("50000"), "伍万圆");
        assert_eq!(encode_integer("100000000"), "壹亿圆");
        assert_eq!(encode_integer("10005"), "壹万零伍圆");
        assert_eq!(encode_integer("123456789"), "壹亿贰仟叁佰肆拾伍万陆仟柒佰捌拾玖圆");
    }

    #[test]
    fn test_compound_tier_above_hundred_million() {
        // 10^12 is carried by the 万亿 compound
        assert_eq!(encode_integer("1000000000000"), "壹万亿圆");
        assert_eq!(encode_integer("5000000001234"), "伍万亿壹仟贰佰叁拾肆圆");
        assert_eq!(
            encode_integer("5432100000000"),
            "伍万肆仟叁佰贰拾壹亿圆"
        );
    }

    #[test]
    fn test_fraction_units() {
        assert_eq!(encode_fraction(""), "");
        assert_eq!(encode_fraction("5"), "伍角");
        assert_eq!(encode_fraction("05"), "零伍分");
        assert_eq!(encode_fraction("1234"), "壹角贰分叁厘肆毫");
        assert_eq!(encode_fraction("50"), "伍角");
        assert_eq!(encode_fraction("00"), "零");
    }

    #[test]
    fn test_fraction_past_the_unit_table() {
        // the fifth digit has no unit and stays bare
        assert_eq!(encode_fraction("12345"), "壹角贰分叁厘肆毫伍");
    }

    #[test]
    fn test_encode_signed_amounts() {
        assert_eq!(encode("-8.05").unwrap(), "负捌圆零伍分");
        assert_eq!(encode("0.5").unwrap(), "伍角");
        assert_eq!(encode("-0.5").unwrap(), "伍角");
        assert_eq!(encode("+12").unwrap(), "壹拾贰圆");
    }

    #[test]
    fn test_encode_zero_is_empty() {
        assert_eq!(encode("0").unwrap(), "");
        assert_eq!(encode("0.0").unwrap(), "零");
    }

    #[test]
    fn test_encode_rejects_malformed_input() {
        for bad in ["", "-", ".", "1.2.3", "12x", "1e9"] {
            assert!(encode(bad).is_err(), "`{bad}` should be rejected");
        }
    }
}
