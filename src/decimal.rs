use crate::error::{EncodeError, EncodeResult};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// An exact signed decimal number.
///
/// Stores the digit string most-significant first together with a `scale`,
/// the count of fractional digits at the tail. All arithmetic operates on
/// the digit vectors directly; no binary floating point is involved at any
/// point, so monetary amounts survive encode/decode round trips without
/// drift.
///
/// Invariants: at least one integer digit is always present (`0` for values
/// below one); leading integer zeros beyond that are trimmed; zero is never
/// negative.
#[derive(Debug, Clone)]
pub struct DecimalValue {
    negative: bool,
    digits: Vec<u8>,
    scale: usize,
}

impl DecimalValue {
    /// The value `0` with scale zero.
    #[must_use]
    pub fn zero() -> Self {
        Self {
            negative: false,
            digits: vec![0],
            scale: 0,
        }
    }

    /// Exact `10^exponent` for either sign of the exponent.
    #[must_use]
    pub fn power_of_ten(exponent: i32) -> Self {
        if exponent >= 0 {
            let mut digits = vec![0u8; exponent.unsigned_abs() as usize + 1];
            digits[0] = 1;
            Self {
                negative: false,
                digits,
                scale: 0,
            }
        } else {
            let scale = exponent.unsigned_abs() as usize;
            let mut digits = vec![0u8; scale + 1];
            digits[scale] = 1;
            Self {
                negative: false,
                digits,
                scale,
            }
        }
    }

    /// Number of fractional digits currently carried.
    #[must_use]
    pub const fn scale(&self) -> usize {
        self.scale
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.digits.iter().all(|&d| d == 0)
    }

    #[must_use]
    pub const fn is_negative(&self) -> bool {
        self.negative
    }

    fn int_digits(&self) -> &[u8] {
        &self.digits[..self.digits.len() - self.scale]
    }

    fn frac_digits(&self) -> &[u8] {
        &self.digits[self.digits.len() - self.scale..]
    }

    /// Drop leading integer zeros down to the single mandatory digit.
    fn trim_leading(&mut self) {
        let excess = self
            .int_digits()
            .iter()
            .take_while(|&&d| d == 0)
            .count()
            .min(self.digits.len() - self.scale - 1);
        if excess > 0 {
            self.digits.drain(..excess);
        }
    }

    fn clear_sign_of_zero(&mut self) {
        if self.is_zero() {
            self.negative = false;
        }
    }

    /// Compare absolute values, ignoring sign and trailing-zero padding.
    pub(crate) fn cmp_magnitude(&self, other: &Self) -> Ordering {
        let ia = trim_zeros(self.int_digits());
        let ib = trim_zeros(other.int_digits());
        match ia.len().cmp(&ib.len()).then_with(|| ia.cmp(ib)) {
            Ordering::Equal => {}
            unequal => return unequal,
        }
        let fa = self.frac_digits();
        let fb = other.frac_digits();
        for i in 0..fa.len().max(fb.len()) {
            let da = fa.get(i).copied().unwrap_or(0);
            let db = fb.get(i).copied().unwrap_or(0);
            match da.cmp(&db) {
                Ordering::Equal => {}
                unequal => return unequal,
            }
        }
        Ordering::Equal
    }

    /// Exact sum. The result carries the larger of the two scales.
    #[must_use]
    pub fn add(&self, other: &Self) -> Self {
        let mut out = if self.negative == other.negative {
            let (digits, scale) = mag_add(self, other);
            Self {
                negative: self.negative,
                digits,
                scale,
            }
        } else {
            match self.cmp_magnitude(other) {
                Ordering::Equal => {
                    let scale = self.scale.max(other.scale);
                    Self {
                        negative: false,
                        digits: vec![0; scale + 1],
                        scale,
                    }
                }
                Ordering::Greater => {
                    let (digits, scale) = mag_sub(self, other);
                    Self {
                        negative: self.negative,
                        digits,
                        scale,
                    }
                }
                Ordering::Less => {
                    let (digits, scale) = mag_sub(other, self);
                    Self {
                        negative: other.negative,
                        digits,
                        scale,
                    }
                }
            }
        };
        out.trim_leading();
        out.clear_sign_of_zero();
        out
    }

    /// Exact difference, `self - other`.
    #[must_use]
    pub fn subtract(&self, other: &Self) -> Self {
        self.add(&other.negated())
    }

    /// Exact product. The result scale is the sum of the operand scales.
    #[must_use]
    pub fn multiply(&self, other: &Self) -> Self {
        let mut acc = vec![0u32; self.digits.len() + other.digits.len()];
        for (i, &a) in self.digits.iter().enumerate() {
            for (j, &b) in other.digits.iter().enumerate() {
                acc[i + j + 1] += u32::from(a) * u32::from(b);
            }
        }
        for k in (1..acc.len()).rev() {
            let carry = acc[k] / 10;
            acc[k] %= 10;
            acc[k - 1] += carry;
        }
        #[allow(clippy::cast_possible_truncation)]
        let digits: Vec<u8> = acc.into_iter().map(|d| d as u8).collect();
        let mut out = Self {
            negative: self.negative != other.negative,
            digits,
            scale: self.scale + other.scale,
        };
        out.trim_leading();
        out.clear_sign_of_zero();
        out
    }

    /// Truncate toward zero, or zero-pad, to exactly `scale` fractional
    /// digits.
    #[must_use]
    pub fn with_scale(&self, scale: usize) -> Self {
        let mut out = self.clone();
        if scale >= out.scale {
            let grow = scale - out.scale;
            let new_len = out.digits.len() + grow;
            out.digits.resize(new_len, 0);
        } else {
            let new_len = out.digits.len() - (out.scale - scale);
            out.digits.truncate(new_len);
        }
        out.scale = scale;
        out.clear_sign_of_zero();
        out
    }

    /// Strip trailing fractional zeros (and with them a dangling decimal
    /// point) and redundant leading integer zeros.
    #[must_use]
    pub fn normalize(&self) -> Self {
        let mut out = self.clone();
        while out.scale > 0 && out.digits.last() == Some(&0) {
            out.digits.pop();
            out.scale -= 1;
        }
        out.trim_leading();
        out.clear_sign_of_zero();
        out
    }

    /// Round half to even ("banker's rounding") at `scale` fractional
    /// digits. The result carries exactly `scale` fractional digits.
    ///
    /// A tie (first dropped digit 5 with nothing but zeros after it)
    /// rounds to the even neighbor; every other case rounds to nearest.
    #[must_use]
    pub fn round_half_to_even(&self, scale: usize) -> Self {
        if scale >= self.scale {
            return self.with_scale(scale);
        }
        let keep = self.digits.len() - (self.scale - scale);
        let first_dropped = self.digits[keep];
        let tail_nonzero = self.digits[keep + 1..].iter().any(|&d| d != 0);
        let mut digits = self.digits[..keep].to_vec();
        let round_up = match first_dropped.cmp(&5) {
            Ordering::Greater => true,
            Ordering::Less => false,
            Ordering::Equal => tail_nonzero || digits.last().is_some_and(|d| d % 2 == 1),
        };
        if round_up {
            let mut carry = 1u8;
            for d in digits.iter_mut().rev() {
                let sum = *d + carry;
                *d = sum % 10;
                carry = sum / 10;
                if carry == 0 {
                    break;
                }
            }
            if carry > 0 {
                digits.insert(0, carry);
            }
        }
        let mut out = Self {
            negative: self.negative,
            digits,
            scale,
        };
        out.trim_leading();
        out.clear_sign_of_zero();
        out
    }

    fn negated(&self) -> Self {
        let mut out = self.clone();
        out.negative = !out.negative && !out.is_zero();
        out
    }

    /// Append a digit to the plain-string form of the value: a fractional
    /// value gains one more fractional digit, an integer value shifts left
    /// one decimal place.
    pub(crate) fn append_digit(&mut self, digit: u8) {
        self.digits.push(digit);
        if self.scale > 0 {
            self.scale += 1;
        }
    }
}

fn trim_zeros(digits: &[u8]) -> &[u8] {
    let start = digits.iter().take_while(|&&d| d == 0).count();
    &digits[start..]
}

/// Pad both operands to a common scale and length.
fn aligned(a: &DecimalValue, b: &DecimalValue) -> (Vec<u8>, Vec<u8>, usize) {
    let scale = a.scale.max(b.scale);
    let mut da = a.digits.clone();
    da.resize(da.len() + (scale - a.scale), 0);
    let mut db = b.digits.clone();
    db.resize(db.len() + (scale - b.scale), 0);
    let len = da.len().max(db.len());
    let mut pa = vec![0u8; len - da.len()];
    pa.extend(da);
    let mut pb = vec![0u8; len - db.len()];
    pb.extend(db);
    (pa, pb, scale)
}

fn mag_add(a: &DecimalValue, b: &DecimalValue) -> (Vec<u8>, usize) {
    let (mut da, db, scale) = aligned(a, b);
    let mut carry = 0u8;
    for (x, &y) in da.iter_mut().rev().zip(db.iter().rev()) {
        let sum = *x + y + carry;
        *x = sum % 10;
        carry = sum / 10;
    }
    if carry > 0 {
        da.insert(0, carry);
    }
    (da, scale)
}

/// Magnitude subtraction; callers guarantee `|a| >= |b|`.
fn mag_sub(a: &DecimalValue, b: &DecimalValue) -> (Vec<u8>, usize) {
    let (mut da, db, scale) = aligned(a, b);
    let mut borrow = 0u8;
    for (x, &y) in da.iter_mut().rev().zip(db.iter().rev()) {
        let sub = y + borrow;
        if *x < sub {
            *x = *x + 10 - sub;
            borrow = 1;
        } else {
            *x -= sub;
            borrow = 0;
        }
    }
    (da, scale)
}

impl FromStr for DecimalValue {
    type Err = EncodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        let (negative, unsigned) = match input.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, input.strip_prefix('+').unwrap_or(input)),
        };
        let (int_part, frac_part) = match unsigned.split_once('.') {
            Some((int, frac)) => (int, frac),
            None => (unsigned, ""),
        };
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(EncodeError::InvalidNumber(s.to_string()));
        }
        if !int_part
            .bytes()
            .chain(frac_part.bytes())
            .all(|b| b.is_ascii_digit())
        {
            return Err(EncodeError::InvalidNumber(s.to_string()));
        }

        let int_trimmed = int_part.trim_start_matches('0');
        let mut digits = Vec::with_capacity(int_trimmed.len().max(1) + frac_part.len());
        if int_trimmed.is_empty() {
            digits.push(0);
        } else {
            digits.extend(int_trimmed.bytes().map(|b| b - b'0'));
        }
        digits.extend(frac_part.bytes().map(|b| b - b'0'));

        let mut out = Self {
            negative,
            digits,
            scale: frac_part.len(),
        };
        out.clear_sign_of_zero();
        Ok(out)
    }
}

impl fmt::Display for DecimalValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negative {
            f.write_str("-")?;
        }
        for &d in self.int_digits() {
            write!(f, "{d}")?;
        }
        if self.scale > 0 {
            f.write_str(".")?;
            for &d in self.frac_digits() {
                write!(f, "{d}")?;
            }
        }
        Ok(())
    }
}

impl PartialEq for DecimalValue {
    fn eq(&self, other: &Self) -> bool {
        // "1.50" equals "1.5"; zero equals zero whatever the scale
        self.cmp_magnitude(other) == Ordering::Equal
            && (self.negative == other.negative || self.is_zero())
    }
}

impl Eq for DecimalValue {}

impl From<u64> for DecimalValue {
    fn from(value: u64) -> Self {
        let mut digits = Vec::new();
        let mut v = value;
        loop {
            #[allow(clippy::cast_possible_truncation)]
            digits.push((v % 10) as u8);
            v /= 10;
            if v == 0 {
                break;
            }
        }
        digits.reverse();
        Self {
            negative: false,
            digits,
            scale: 0,
        }
    }
}

impl From<u32> for DecimalValue {
    fn from(value: u32) -> Self {
        Self::from(u64::from(value))
    }
}

impl From<u8> for DecimalValue {
    fn from(value: u8) -> Self {
        Self::from(u64::from(value))
    }
}

/// Round a decimal string at `scale` fractional digits using round half to
/// even, the settlement rule for financial amounts. The output keeps
/// exactly `scale` fractional digits.
///
/// # Errors
///
/// Returns [`EncodeError::InvalidNumber`] if `value` is not a valid decimal
/// number.
pub fn round_half_to_even(value: &str, scale: usize) -> EncodeResult<String> {
    let parsed: DecimalValue = value.parse()?;
    Ok(parsed.round_half_to_even(scale).to_string())
}
