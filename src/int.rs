//! Integer-to-text conversion.
//!
//! Renders any supported integer width and signedness in decimal, hex,
//! octal, or binary, with optional sign, alternate-form base prefixes, and
//! locale-aware grouping. The magnitude is always taken through unsigned
//! arithmetic (`wrapping_neg` on the unsigned image), so `i64::MIN` and
//! friends never hit a negation overflow.
//!
//! Decimal digit counts come from an `ilog2`-based estimate corrected by a
//! power-of-ten table instead of a per-digit loop, and decimal digits are
//! emitted two at a time from a pairs table.

use crate::engine::{write_formatted, Resolved};
use crate::float::sign_prefix;
use crate::parser::Align;
use crate::{Buffer, NumericLocale, Result, Sink};

/// One u128 decimal rendering, at most 39 digits.
const MAX_DECIMAL_DIGITS: usize = 39;

/// Two decimal digits per entry: "00", "01", .. "99".
const DIGIT_PAIRS: &[u8; 200] = b"\
0001020304050607080910111213141516171819\
2021222324252627282930313233343536373839\
4041424344454647484950515253545556575859\
6061626364656667686970717273747576777879\
8081828384858687888990919293949596979899";

const POW10: [u128; 39] = {
    let mut table = [0u128; 39];
    let mut i = 0;
    let mut p: u128 = 1;
    while i < 39 {
        table[i] = p;
        if i < 38 {
            p *= 10;
        }
        i += 1;
    }
    table
};

/// Decimal digit count via bit-scan estimate plus one table correction.
pub(crate) fn count_digits10(value: u128) -> usize {
    if value == 0 {
        return 1;
    }
    // floor(log10(2^bits)) approximation: bits * 1233 / 4096.
    let bits = 128 - value.leading_zeros() as usize;
    let approx = bits * 1233 >> 12;
    approx + usize::from(value >= POW10[approx])
}

/// Writes `value` in decimal, two digits per division step, into the tail
/// of `scratch`; returns the used range.
fn decimal_digits(scratch: &mut [u8; MAX_DECIMAL_DIGITS], mut value: u128) -> usize {
    let mut pos = scratch.len();
    while value >= 100 {
        let pair = (value % 100) as usize * 2;
        value /= 100;
        pos -= 2;
        scratch[pos] = DIGIT_PAIRS[pair];
        scratch[pos + 1] = DIGIT_PAIRS[pair + 1];
    }
    if value >= 10 {
        let pair = value as usize * 2;
        pos -= 2;
        scratch[pos] = DIGIT_PAIRS[pair];
        scratch[pos + 1] = DIGIT_PAIRS[pair + 1];
    } else {
        pos -= 1;
        scratch[pos] = b'0' + value as u8;
    }
    pos
}

/// Presentation radix for one field.
#[derive(Clone, Copy, PartialEq, Eq)]
pub(crate) enum IntBase {
    Decimal,
    Hex { upper: bool },
    Octal,
    Binary { upper: bool },
}

impl IntBase {
    pub(crate) fn from_type_char(ty: Option<char>) -> Option<IntBase> {
        match ty {
            None | Some('d') => Some(IntBase::Decimal),
            Some('x') => Some(IntBase::Hex { upper: false }),
            Some('X') => Some(IntBase::Hex { upper: true }),
            Some('o') => Some(IntBase::Octal),
            Some('b') => Some(IntBase::Binary { upper: false }),
            Some('B') => Some(IntBase::Binary { upper: true }),
            _ => None,
        }
    }

    fn bits_per_digit(self) -> u32 {
        match self {
            IntBase::Hex { .. } => 4,
            IntBase::Octal => 3,
            IntBase::Binary { .. } => 1,
            IntBase::Decimal => unreachable!("decimal is not a power of two"),
        }
    }

    fn prefix(self, alternate: bool) -> &'static str {
        if !alternate {
            return "";
        }
        match self {
            IntBase::Decimal => "",
            IntBase::Hex { upper: false } => "0x",
            IntBase::Hex { upper: true } => "0X",
            IntBase::Octal => "0",
            IntBase::Binary { upper: false } => "0b",
            IntBase::Binary { upper: true } => "0B",
        }
    }
}

/// Renders an integer magnitude per a resolved specifier. The driver has
/// already validated specifier/type compatibility and extracted the
/// magnitude and sign.
pub(crate) fn write_int<S: Sink>(
    out: &mut S,
    spec: &Resolved,
    mut magnitude: u128,
    negative: bool,
    base: IntBase,
    locale: &NumericLocale,
) -> Result<()> {
    let mut body = Buffer::new();
    match base {
        IntBase::Decimal => {
            if spec.localized && locale.separator_count(count_digits10(magnitude)) > 0 {
                write_grouped_decimal(&mut body, magnitude, locale)?;
            } else {
                let mut scratch = [0u8; MAX_DECIMAL_DIGITS];
                let pos = decimal_digits(&mut scratch, magnitude);
                body.write_str(
                    std::str::from_utf8(&scratch[pos..]).expect("digits are ASCII"),
                )?;
            }
        }
        _ => {
            let bits = base.bits_per_digit();
            let alphabet: &[u8; 16] = match base {
                IntBase::Hex { upper: true } | IntBase::Binary { upper: true } => {
                    b"0123456789ABCDEF"
                }
                _ => b"0123456789abcdef",
            };
            let digit_count = if magnitude == 0 {
                1
            } else {
                ((128 - magnitude.leading_zeros() + bits - 1) / bits) as usize
            };
            let mut scratch = [0u8; 128];
            let mask = (1u128 << bits) - 1;
            for i in (0..digit_count).rev() {
                scratch[i] = alphabet[(magnitude & mask) as usize];
                magnitude >>= bits;
            }
            body.write_str(std::str::from_utf8(&scratch[..digit_count]).expect("digits are ASCII"))?;
        }
    }

    let sign = sign_prefix(negative, spec.sign);
    let base_prefix = base.prefix(spec.alternate);
    let mut prefix_buf = [0u8; 3];
    prefix_buf[..sign.len()].copy_from_slice(sign.as_bytes());
    prefix_buf[sign.len()..sign.len() + base_prefix.len()].copy_from_slice(base_prefix.as_bytes());
    let prefix = std::str::from_utf8(&prefix_buf[..sign.len() + base_prefix.len()])
        .expect("prefix is ASCII");
    write_formatted(out, spec, Align::Right, prefix, body.as_str())
}

/// Decimal with locale separators, written most-significant-first with the
/// group boundaries computed right-to-left.
fn write_grouped_decimal(out: &mut Buffer, value: u128, locale: &NumericLocale) -> Result<()> {
    let mut scratch = [0u8; MAX_DECIMAL_DIGITS];
    let pos = decimal_digits(&mut scratch, value);
    let digits = &scratch[pos..];
    let total = digits.len();
    let boundaries = locale.boundaries(total);
    for (i, &d) in digits.iter().enumerate() {
        out.write_char(d as char)?;
        let from_right = total - 1 - i;
        if from_right != 0 && boundaries.contains(&from_right) {
            out.write_char(locale.separator())?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digit_count_boundaries() {
        assert_eq!(count_digits10(0), 1);
        assert_eq!(count_digits10(9), 1);
        assert_eq!(count_digits10(10), 2);
        assert_eq!(count_digits10(99), 2);
        assert_eq!(count_digits10(100), 3);
        assert_eq!(count_digits10(999_999_999_999_999_999), 18);
        assert_eq!(count_digits10(1_000_000_000_000_000_000), 19);
        assert_eq!(count_digits10(u64::MAX as u128), 20);
        assert_eq!(count_digits10(u128::MAX), 39);
        for p in 0..38 {
            let v = 10u128.pow(p);
            assert_eq!(count_digits10(v), p as usize + 1, "10^{}", p);
            assert_eq!(count_digits10(v - 1), (p as usize).max(1), "10^{}-1", p);
        }
    }

    #[test]
    fn decimal_pairs_write() {
        let mut scratch = [0u8; MAX_DECIMAL_DIGITS];
        let pos = decimal_digits(&mut scratch, 0);
        assert_eq!(&scratch[pos..], b"0");
        let pos = decimal_digits(&mut scratch, 7);
        assert_eq!(&scratch[pos..], b"7");
        let pos = decimal_digits(&mut scratch, 42);
        assert_eq!(&scratch[pos..], b"42");
        let pos = decimal_digits(&mut scratch, 1234567890);
        assert_eq!(&scratch[pos..], b"1234567890");
        let pos = decimal_digits(&mut scratch, u128::MAX);
        assert_eq!(
            &scratch[pos..],
            b"340282366920938463463374607431768211455" as &[u8]
        );
    }

    #[test]
    fn base_prefixes() {
        assert_eq!(IntBase::Hex { upper: false }.prefix(true), "0x");
        assert_eq!(IntBase::Hex { upper: true }.prefix(true), "0X");
        assert_eq!(IntBase::Octal.prefix(true), "0");
        assert_eq!(IntBase::Binary { upper: false }.prefix(true), "0b");
        assert_eq!(IntBase::Hex { upper: false }.prefix(false), "");
    }

    #[test]
    fn type_char_mapping() {
        assert!(matches!(IntBase::from_type_char(None), Some(IntBase::Decimal)));
        assert!(matches!(IntBase::from_type_char(Some('d')), Some(IntBase::Decimal)));
        assert!(matches!(IntBase::from_type_char(Some('X')), Some(IntBase::Hex { upper: true })));
        assert!(IntBase::from_type_char(Some('q')).is_none());
        assert!(IntBase::from_type_char(Some('f')).is_none());
    }
}
