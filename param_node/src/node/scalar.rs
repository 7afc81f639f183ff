//! Lenient scalar conversions for node text.
//!
//! Each parser reads the longest well-formed prefix after leading whitespace
//! and falls back to zero when no digits are present, matching stream-style
//! extraction rather than strict validation.

use std::fmt;

/// Number of fractional bits in a [`Fixed`] value.
const FRACTION_BITS: u32 = 16;
const ONE: i64 = 1 << FRACTION_BITS;
/// Fraction digits beyond this cannot change the rounded 16-bit fraction.
const MAX_FRACTION_DIGITS: u32 = 9;

/// Signed 16.16 fixed-point number produced by [`crate::Node::to_fixed`].
///
/// Arithmetic on template values is expected to be deterministic across
/// platforms, so parsing never goes through floating point.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Fixed(i32);

impl Fixed {
    /// The value zero.
    pub const ZERO: Self = Self(0);

    /// Wraps a raw 16.16 bit pattern.
    #[must_use]
    pub const fn from_raw(raw: i32) -> Self {
        Self(raw)
    }

    /// Returns the raw 16.16 bit pattern.
    #[must_use]
    pub const fn raw(self) -> i32 {
        self.0
    }

    /// Builds a fixed-point value from an integer, saturating at the
    /// representable range.
    #[must_use]
    pub fn from_int(value: i32) -> Self {
        Self(clamp_raw(i64::from(value) * ONE))
    }

    /// Integer part, rounded towards zero.
    #[must_use]
    pub const fn to_int_round_to_zero(self) -> i32 {
        let magnitude = self.0.unsigned_abs() >> FRACTION_BITS;
        #[expect(
            clippy::cast_possible_wrap,
            reason = "a shifted i32 magnitude always fits in i32"
        )]
        let whole = magnitude as i32;
        if self.0 < 0 { -whole } else { whole }
    }

    /// Converts to `f64`. Exact for every representable value.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "conversion for display and scripting consumers only"
    )]
    pub fn to_f64(self) -> f64 {
        f64::from(self.0) / 65536.0
    }

    /// Parses `text` leniently.
    ///
    /// Accepts optional leading whitespace, an optional sign, integer digits
    /// and an optional fractional part. The fraction is rounded to the nearest
    /// representable value; out-of-range magnitudes saturate. Text without any
    /// digits yields [`Fixed::ZERO`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use param_node::Fixed;
    ///
    /// assert_eq!(Fixed::parse_lenient("1.5"), Fixed::from_raw(0x0001_8000));
    /// assert_eq!(Fixed::parse_lenient("  -2.25 m/s"), Fixed::from_raw(-0x0002_4000));
    /// assert_eq!(Fixed::parse_lenient("fast"), Fixed::ZERO);
    /// ```
    #[must_use]
    pub fn parse_lenient(text: &str) -> Self {
        let mut chars = text.trim_start().chars().peekable();
        let negative = match chars.peek() {
            Some('-') => {
                chars.next();
                true
            }
            Some('+') => {
                chars.next();
                false
            }
            _ => false,
        };

        let mut seen_digit = false;
        let mut whole: i64 = 0;
        while let Some(digit) = chars.peek().and_then(|c| c.to_digit(10)) {
            seen_digit = true;
            whole = whole.saturating_mul(10).saturating_add(i64::from(digit));
            chars.next();
        }

        let mut numerator: u64 = 0;
        let mut denominator: u64 = 1;
        if chars.peek() == Some(&'.') {
            chars.next();
            let mut taken = 0;
            while let Some(digit) = chars.peek().and_then(|c| c.to_digit(10)) {
                seen_digit = true;
                if taken < MAX_FRACTION_DIGITS {
                    numerator = numerator * 10 + u64::from(digit);
                    denominator *= 10;
                    taken += 1;
                }
                chars.next();
            }
        }

        if !seen_digit {
            return Self::ZERO;
        }

        let fraction = round_div(numerator << FRACTION_BITS, denominator);
        let magnitude = whole
            .saturating_mul(ONE)
            .saturating_add(i64::try_from(fraction).unwrap_or(i64::MAX));
        Self(clamp_raw(if negative { -magnitude } else { magnitude }))
    }
}

impl fmt::Display for Fixed {
    /// Writes the shortest decimal that parses back to the same value.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let magnitude = u64::from(self.0.unsigned_abs());
        let whole = magnitude >> FRACTION_BITS;
        let fraction = magnitude & (u64::from(u32::MAX) >> FRACTION_BITS);
        if self.0 < 0 {
            f.write_str("-")?;
        }
        write!(f, "{whole}")?;
        if fraction == 0 {
            return Ok(());
        }
        let mut scale: u64 = 1;
        for digits in 1..=6_usize {
            scale *= 10;
            let scaled = round_div(fraction * scale, 1 << FRACTION_BITS);
            if round_div(scaled << FRACTION_BITS, scale) == fraction {
                return write!(f, ".{scaled:0digits$}");
            }
        }
        Ok(())
    }
}

#[expect(
    clippy::integer_division,
    reason = "rounding is applied explicitly before truncating"
)]
const fn round_div(numerator: u64, denominator: u64) -> u64 {
    (numerator + denominator / 2) / denominator
}

fn clamp_raw(raw: i64) -> i32 {
    i32::try_from(raw).unwrap_or(if raw < 0 { i32::MIN } else { i32::MAX })
}

/// Parses a leading integer the way formatted stream extraction does.
///
/// Overflow saturates; text without leading digits yields zero.
pub(crate) fn parse_int(text: &str) -> i32 {
    let trimmed = text.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, trimmed.get(1..).unwrap_or_default()),
        Some(b'+') => (false, trimmed.get(1..).unwrap_or_default()),
        _ => (false, trimmed),
    };
    let mut value: i64 = 0;
    for digit in rest.chars().map_while(|c| c.to_digit(10)) {
        value = value.saturating_mul(10).saturating_add(i64::from(digit));
    }
    clamp_int(if negative { -value } else { value })
}

fn clamp_int(value: i64) -> i32 {
    i32::try_from(value).unwrap_or(if value < 0 { i32::MIN } else { i32::MAX })
}

/// Parses the longest floating-point prefix of `text`.
pub(crate) fn parse_float(text: &str) -> f32 {
    let trimmed = text.trim_start();
    let end = float_prefix_len(trimmed.as_bytes());
    trimmed
        .get(..end)
        .and_then(|prefix| prefix.parse::<f32>().ok())
        .unwrap_or(0.0)
}

fn float_prefix_len(bytes: &[u8]) -> usize {
    let digits_from = |start: usize| {
        bytes
            .iter()
            .skip(start)
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    let mut pos = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let whole = digits_from(pos);
    pos += whole;
    let mut mantissa_digits = whole;
    if bytes.get(pos) == Some(&b'.') {
        let fraction = digits_from(pos + 1);
        if whole > 0 || fraction > 0 {
            pos += 1 + fraction;
            mantissa_digits += fraction;
        }
    }
    if mantissa_digits == 0 {
        return 0;
    }
    if matches!(bytes.get(pos), Some(b'e' | b'E')) {
        let sign = usize::from(matches!(bytes.get(pos + 1), Some(b'+' | b'-')));
        let exponent = digits_from(pos + 1 + sign);
        if exponent > 0 {
            pos += 1 + sign + exponent;
        }
    }
    pos
}

/// Only the exact, case-sensitive literal `true` is truthy.
pub(crate) fn parse_bool(text: &str) -> bool {
    text == "true"
}
