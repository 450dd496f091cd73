//! Glyph tables for the capitalized numeral system.
//!
//! All tables are immutable constants shared by reference between the
//! encoder and the decoder; there is no global mutable state.

/// Capitalized digit glyphs, indexed by digit value.
pub(crate) const DIGITS: [char; 10] = ['零', '壹', '贰', '叁', '肆', '伍', '陆', '柒', '捌', '玖'];

/// Sign glyph prefixed to negative amounts.
pub(crate) const NEGATIVE: char = '负';

/// Scale-unit glyphs by rank: 拾 佰 仟 are intra-group (10^1..10^3),
/// 万 and 亿 close a 4-digit group (10^4, 10^8).
pub(crate) const SCALE_UNITS: [char; 5] = ['拾', '佰', '仟', '万', '亿'];

/// Monetary-unit glyphs by rank: 圆 is the base unit, the rest label the
/// first four fractional digits (10^-1..10^-4).
pub(crate) const MONEY_UNITS: [char; 5] = ['圆', '角', '分', '厘', '毫'];

/// The base monetary unit, terminating the integer section of a numeral.
pub(crate) const YUAN: char = MONEY_UNITS[0];

/// Highest intra-group scale-unit rank (仟).
pub(crate) const MAX_INTRA_RANK: usize = 2;

/// Map a glyph to its digit value.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn digit_value(glyph: char) -> Option<u8> {
    DIGITS.iter().position(|&g| g == glyph).map(|v| v as u8)
}

/// Map a glyph to its scale-unit rank (0 = 拾 .. 4 = 亿).
pub(crate) fn scale_unit_rank(glyph: char) -> Option<usize> {
    SCALE_UNITS.iter().position(|&g| g == glyph)
}

/// Map a glyph to its monetary-unit rank (0 = 圆 .. 4 = 毫).
pub(crate) fn money_unit_rank(glyph: char) -> Option<usize> {
    MONEY_UNITS.iter().position(|&g| g == glyph)
}

/// Decimal exponent of a scale-unit rank: 拾 佰 仟 万 step by one power of
/// ten, ranks past 万 step by four.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn scale_unit_exponent(rank: usize) -> u32 {
    if rank > 3 {
        ((rank - 3) * 4 + 4) as u32
    } else {
        (rank + 1) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digit_lookup_is_total_over_the_table() {
        for (value, &glyph) in DIGITS.iter().enumerate() {
            assert_eq!(digit_value(glyph), Some(value as u8));
        }
        assert_eq!(digit_value('七'), None); // lowercase form is not in the table
        assert_eq!(digit_value(NEGATIVE), None);
    }

    #[test]
    fn test_scale_unit_exponents() {
        let exponents: Vec<u32> = (0..SCALE_UNITS.len()).map(scale_unit_exponent).collect();
        assert_eq!(exponents, vec![1, 2, 3, 4, 8]);
    }

    #[test]
    fn test_unit_tables_are_disjoint() {
        for &g in &SCALE_UNITS {
            assert_eq!(money_unit_rank(g), None);
            assert_eq!(digit_value(g), None);
        }
        for &g in &MONEY_UNITS {
            assert_eq!(scale_unit_rank(g), None);
        }
    }
}
