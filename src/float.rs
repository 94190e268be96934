//! Floating-point decomposition, strategy selection, and text assembly.
//!
//! The pipeline for a float field is: decode the IEEE754 value (sign bit,
//! significand, exponent, and the two flags the digit generators need),
//! pick a digit-generation strategy, then lay the resulting
//! [`Decimal`](crate::grisu::Decimal) out as text according to the resolved
//! specifier.
//!
//! Strategies, cheapest first:
//!
//! 1. shortest round-trip ([`crate::grisu::shortest`]) when no precision is
//!    requested,
//! 2. counted fast path ([`crate::grisu::counted`]) for explicit precision,
//! 3. the exact big-integer generator ([`crate::bignum`]) whenever a fast
//!    path reports that its error bound cannot certify the result.
//!
//! The fallback chain is internal; callers only ever see finished digits.
//!
//! NaN, infinities and negative zero never reach the digit generators: they
//! are detected from the sign bit here (ordering comparisons are useless
//! for NaN) and rendered as literal tokens.

use crate::engine::{write_formatted, Resolved};
use crate::grisu::{Decimal, DigitBuf};
use crate::parser::{Align, Sign};
use crate::{bignum, grisu, Buffer, NumericLocale, Result, Sink};

/// A finite nonzero float reduced to `sig * 2^exp` plus the flags the digit
/// generators need.
pub(crate) struct Decoded {
    pub sig: u64,
    pub exp: i32,
    /// The representable neighbor below is closer than the one above
    /// (happens exactly at power-of-two boundaries).
    pub lower_closer: bool,
    /// The significand is even: ties round toward this value.
    pub even: bool,
}

pub(crate) enum FloatClass {
    Finite(Decoded),
    Zero,
    Infinity,
    Nan,
}

pub(crate) struct DecodedFloat {
    pub negative: bool,
    pub class: FloatClass,
}

impl DecodedFloat {
    #[cfg(test)]
    pub(crate) fn finite(self) -> Option<Decoded> {
        match self.class {
            FloatClass::Finite(d) => Some(d),
            _ => None,
        }
    }
}

pub(crate) fn decode_f64(value: f64) -> DecodedFloat {
    let bits = value.to_bits();
    let negative = bits >> 63 != 0;
    let biased = ((bits >> 52) & 0x7ff) as i32;
    let frac = bits & ((1u64 << 52) - 1);
    let class = if biased == 0x7ff {
        if frac == 0 {
            FloatClass::Infinity
        } else {
            FloatClass::Nan
        }
    } else if biased == 0 && frac == 0 {
        FloatClass::Zero
    } else {
        let (sig, exp) = if biased == 0 {
            (frac, -1074)
        } else {
            (frac | (1u64 << 52), biased - 1075)
        };
        FloatClass::Finite(Decoded {
            sig,
            exp,
            lower_closer: frac == 0 && biased > 1,
            even: sig & 1 == 0,
        })
    };
    DecodedFloat { negative, class }
}

pub(crate) fn decode_f32(value: f32) -> DecodedFloat {
    let bits = value.to_bits();
    let negative = bits >> 31 != 0;
    let biased = ((bits >> 23) & 0xff) as i32;
    let frac = (bits & ((1u32 << 23) - 1)) as u64;
    let class = if biased == 0xff {
        if frac == 0 {
            FloatClass::Infinity
        } else {
            FloatClass::Nan
        }
    } else if biased == 0 && frac == 0 {
        FloatClass::Zero
    } else {
        let (sig, exp) = if biased == 0 {
            (frac, -149)
        } else {
            (frac | (1u64 << 23), biased - 150)
        };
        FloatClass::Finite(Decoded {
            sig,
            exp,
            lower_closer: frac == 0 && biased > 1,
            even: sig & 1 == 0,
        })
    };
    DecodedFloat { negative, class }
}

/// Shortest round-trip digits.
pub(crate) fn shortest_digits(decoded: &Decoded) -> Decimal {
    grisu::shortest(decoded).unwrap_or_else(|| bignum::shortest(decoded))
}

/// Exactly `count` significant digits, correctly rounded.
pub(crate) fn significant_digits(decoded: &Decoded, count: usize) -> Decimal {
    grisu::counted(decoded, count).unwrap_or_else(|| bignum::counted(decoded, count))
}

/// Digits down to `10^-frac` (fixed-notation precision). The fast path only
/// applies when its decimal-point estimate is confirmed by the generated
/// digits; anything else goes exact.
pub(crate) fn fixed_digits(decoded: &Decoded, frac: usize) -> Decimal {
    let estimate = bignum::estimate_power(decoded) as i64;
    let requested = estimate + frac as i64;
    if requested > 0 {
        if let Some(dec) = grisu::counted(decoded, requested as usize) {
            if dec.decimal_point() as i64 + frac as i64 == requested {
                return dec;
            }
        }
    }
    bignum::fixed(decoded, frac)
}

/// Which of the two layouts a presentation ends up in.
enum Layout {
    /// digits[.digits]
    Fixed { frac: usize, strip: bool },
    /// d[.digits]e±EE
    Scientific { after_point: usize, strip: bool },
}

#[derive(Clone, Copy)]
pub(crate) enum FloatValue {
    F32(f32),
    F64(f64),
}

/// Renders a float field. The specifier has been validated by the driver;
/// `ty` is one of `e E f F g G a A` or absent.
pub(crate) fn write_float<S: Sink>(
    out: &mut S,
    spec: &Resolved,
    value: FloatValue,
    locale: &NumericLocale,
) -> Result<()> {
    let decoded = match value {
        FloatValue::F32(v) => decode_f32(v),
        FloatValue::F64(v) => decode_f64(v),
    };
    let ty = spec.ty.unwrap_or('\0');
    let upper = matches!(ty, 'E' | 'F' | 'G' | 'A');

    match decoded.class {
        FloatClass::Nan => {
            return write_special(out, spec, decoded.negative, if upper { "NAN" } else { "nan" })
        }
        FloatClass::Infinity => {
            return write_special(out, spec, decoded.negative, if upper { "INF" } else { "inf" })
        }
        _ => {}
    }

    if matches!(ty, 'a' | 'A') {
        return write_hex_float(out, spec, &decoded, value_frac_bits(&value), upper);
    }

    // Digit generation per presentation.
    let (decimal, layout) = match ty {
        'e' | 'E' => {
            let prec = spec.precision.unwrap_or(6);
            let decimal = generate_significant(&decoded.class, prec + 1);
            (
                decimal,
                Layout::Scientific {
                    after_point: prec,
                    strip: false,
                },
            )
        }
        'f' | 'F' => {
            let prec = spec.precision.unwrap_or(6);
            let decimal = match &decoded.class {
                FloatClass::Finite(d) => fixed_digits(d, prec),
                _ => zero_decimal(),
            };
            (
                decimal,
                Layout::Fixed {
                    frac: prec,
                    strip: false,
                },
            )
        }
        'g' | 'G' => {
            let p = spec.precision.unwrap_or(6).max(1);
            let decimal = generate_significant(&decoded.class, p);
            let exp = decimal.decimal_point() - 1;
            let layout = if -4 <= exp && (exp as i64) < p as i64 {
                Layout::Fixed {
                    frac: (p as i64 - decimal.decimal_point() as i64).max(0) as usize,
                    strip: !spec.alternate,
                }
            } else {
                Layout::Scientific {
                    after_point: p - 1,
                    strip: !spec.alternate,
                }
            };
            (decimal, layout)
        }
        _ => {
            // Default presentation: explicit precision behaves like general
            // mode, otherwise shortest round-trip digits in a fixed window.
            match spec.precision {
                Some(prec) => {
                    let p = prec.max(1);
                    let decimal = generate_significant(&decoded.class, p);
                    let exp = decimal.decimal_point() - 1;
                    let layout = if -4 <= exp && (exp as i64) < p as i64 {
                        Layout::Fixed {
                            frac: (p as i64 - decimal.decimal_point() as i64).max(0) as usize,
                            strip: true,
                        }
                    } else {
                        Layout::Scientific {
                            after_point: p - 1,
                            strip: true,
                        }
                    };
                    (decimal, layout)
                }
                None => {
                    let decimal = match &decoded.class {
                        FloatClass::Finite(d) => shortest_digits(d),
                        _ => zero_decimal(),
                    };
                    let exp = decimal.decimal_point() - 1;
                    let layout = if (-4..16).contains(&exp) {
                        Layout::Fixed {
                            frac: (decimal.digits().len() as i64 - decimal.decimal_point() as i64)
                                .max(0) as usize,
                            strip: false,
                        }
                    } else {
                        Layout::Scientific {
                            after_point: decimal.digits().len().saturating_sub(1),
                            strip: false,
                        }
                    };
                    (decimal, layout)
                }
            }
        }
    };

    let mut body = Buffer::new();
    match layout {
        Layout::Fixed { frac, strip } => {
            let grouped = if spec.localized { Some(locale) } else { None };
            body_fixed(&mut body, &decimal, frac, spec.alternate, strip, grouped)?;
        }
        Layout::Scientific { after_point, strip } => {
            body_scientific(&mut body, &decimal, after_point, upper, spec.alternate, strip)?;
        }
    }
    let prefix = sign_prefix(decoded.negative, spec.sign);
    write_formatted(out, spec, Align::Right, prefix, body.as_str())
}

fn value_frac_bits(value: &FloatValue) -> u32 {
    match value {
        FloatValue::F32(_) => 23,
        FloatValue::F64(_) => 52,
    }
}

fn zero_decimal() -> Decimal {
    let mut digits = DigitBuf::new();
    digits.push(0);
    Decimal::new(digits, 1)
}

fn generate_significant(class: &FloatClass, count: usize) -> Decimal {
    match class {
        FloatClass::Finite(d) => significant_digits(d, count),
        _ => zero_decimal(),
    }
}

pub(crate) fn sign_prefix(negative: bool, sign: Sign) -> &'static str {
    match (negative, sign) {
        (true, _) => "-",
        (false, Sign::Plus) => "+",
        (false, Sign::Space) => " ",
        _ => "",
    }
}

/// NaN and infinity tokens: never zero-padded, sign handled like any other
/// prefix.
fn write_special<S: Sink>(out: &mut S, spec: &Resolved, negative: bool, token: &str) -> Result<()> {
    let mut spec = *spec;
    if spec.align == Align::Numeric {
        spec.align = Align::Right;
        spec.fill = ' ';
    }
    let prefix = sign_prefix(negative, spec.sign);
    write_formatted(out, &spec, Align::Right, prefix, token)
}

fn push_digit<S: Sink>(out: &mut S, d: u8) -> Result<()> {
    out.write_char((b'0' + d) as char)
}

fn push_zeros<S: Sink>(out: &mut S, mut n: usize) -> Result<()> {
    const ZEROS: &str = "0000000000000000";
    while n >= ZEROS.len() {
        out.write_str(ZEROS)?;
        n -= ZEROS.len();
    }
    out.write_str(&ZEROS[..n])
}

/// Lays out `0.digits * 10^dp` in fixed notation with `frac` fractional
/// digits (before optional zero-stripping).
fn body_fixed(
    out: &mut Buffer,
    decimal: &Decimal,
    frac: usize,
    alternate: bool,
    strip: bool,
    locale: Option<&NumericLocale>,
) -> Result<()> {
    let digits = decimal.digits();
    let dp = decimal.decimal_point();

    // Integer part.
    if dp <= 0 || digits.is_empty() {
        out.write_char('0')?;
    } else {
        let int_len = (dp as usize).min(digits.len());
        let int_digits = &digits[..int_len];
        let total = dp as usize;
        match locale {
            Some(loc) if loc.separator_count(total) > 0 => {
                write_grouped(out, int_digits, total, loc)?;
            }
            _ => {
                for &d in int_digits {
                    push_digit(out, d)?;
                }
                push_zeros(out, total - int_len)?;
            }
        }
    }

    // Fraction part: leading zeros for dp < 0, then remaining digits, then
    // zero padding up to `frac`.
    let mut fraction: Vec<u8> = Vec::new();
    if dp < 0 {
        fraction.resize((-dp) as usize, 0);
    }
    if dp <= 0 {
        fraction.extend_from_slice(digits);
    } else if (dp as usize) < digits.len() {
        fraction.extend_from_slice(&digits[dp as usize..]);
    }
    fraction.resize(frac.max(fraction.len()), 0);
    fraction.truncate(frac);
    if strip {
        while fraction.last() == Some(&0) {
            fraction.pop();
        }
    }
    if !fraction.is_empty() || alternate {
        out.write_char('.')?;
        for &d in &fraction {
            push_digit(out, d)?;
        }
    }
    Ok(())
}

/// Writes `total` integer digits (the first `int_digits.len()` significant,
/// the rest zeros) with locale separators inserted right-to-left.
fn write_grouped(
    out: &mut Buffer,
    int_digits: &[u8],
    total: usize,
    locale: &NumericLocale,
) -> Result<()> {
    let boundaries = locale.boundaries(total);
    for i in 0..total {
        let d = int_digits.get(i).copied().unwrap_or(0);
        push_digit(out, d)?;
        let from_right = total - 1 - i;
        if from_right != 0 && boundaries.contains(&from_right) {
            out.write_char(locale.separator())?;
        }
    }
    Ok(())
}

/// Lays out `0.digits * 10^dp` in scientific notation with `after_point`
/// digits after the point.
fn body_scientific(
    out: &mut Buffer,
    decimal: &Decimal,
    after_point: usize,
    upper: bool,
    alternate: bool,
    strip: bool,
) -> Result<()> {
    let digits = decimal.digits();
    let exp = decimal.decimal_point() - 1;
    push_digit(out, digits.first().copied().unwrap_or(0))?;

    let mut rest: Vec<u8> = digits.get(1..).map(|s| s.to_vec()).unwrap_or_default();
    rest.resize(after_point.max(rest.len()), 0);
    rest.truncate(after_point);
    if strip {
        while rest.last() == Some(&0) {
            rest.pop();
        }
    }
    if !rest.is_empty() || alternate {
        out.write_char('.')?;
        for &d in &rest {
            push_digit(out, d)?;
        }
    }

    out.write_char(if upper { 'E' } else { 'e' })?;
    out.write_char(if exp < 0 { '-' } else { '+' })?;
    let abs = exp.unsigned_abs();
    if abs < 10 {
        out.write_char('0')?;
    }
    let mut scratch = [0u8; 10];
    let mut i = scratch.len();
    let mut v = abs;
    loop {
        i -= 1;
        scratch[i] = b'0' + (v % 10) as u8;
        v /= 10;
        if v == 0 {
            break;
        }
    }
    out.write_str(std::str::from_utf8(&scratch[i..]).expect("digits are ASCII"))
}

/// Hexadecimal float notation (`a`/`A`): raw significand nibbles and a
/// binary exponent, rounded half-to-even when precision trims nibbles.
fn write_hex_float<S: Sink>(
    out: &mut S,
    spec: &Resolved,
    decoded: &DecodedFloat,
    frac_bits: u32,
    upper: bool,
) -> Result<()> {
    let hex_digits: &[u8; 16] = if upper {
        b"0123456789ABCDEF"
    } else {
        b"0123456789abcdef"
    };
    let mut body = Buffer::new();

    let (mut lead, mut frac, exp): (u64, u64, i32) = match &decoded.class {
        FloatClass::Zero => (0, 0, 0),
        FloatClass::Finite(d) => {
            // Undo the decode bias to recover the raw fraction field.
            let hidden = 1u64 << frac_bits;
            if d.sig >= hidden {
                (1, d.sig & (hidden - 1), d.exp + frac_bits as i32)
            } else {
                // Subnormal: keep the leading zero and the minimum exponent.
                (0, d.sig, d.exp + frac_bits as i32)
            }
        }
        _ => unreachable!("specials are rendered before hex layout"),
    };

    // Left-align the fraction to a nibble boundary.
    let nibbles = (frac_bits as usize + 3) / 4;
    let aligned_bits = nibbles as u32 * 4;
    frac <<= aligned_bits - frac_bits;

    let kept = match spec.precision {
        Some(p) if p < nibbles => {
            let drop_bits = (nibbles - p) as u32 * 4;
            let remainder = frac & ((1u64 << drop_bits) - 1);
            let half = 1u64 << (drop_bits - 1);
            frac >>= drop_bits;
            let round_up = remainder > half || (remainder == half && frac & 1 == 1);
            if round_up {
                frac += 1;
                if p == 0 || frac >> (p as u32 * 4) != 0 {
                    frac &= if p == 0 { 0 } else { (1u64 << (p as u32 * 4)) - 1 };
                    lead += 1;
                }
            }
            p
        }
        Some(p) => p,
        None => nibbles,
    };

    body.write_char((b'0' + lead as u8) as char)?;
    let mut shown: Vec<u8> = Vec::with_capacity(kept);
    for i in (0..kept.min(nibbles)).rev() {
        let nib = (frac >> (i * 4)) & 0xf;
        shown.push(hex_digits[nib as usize]);
    }
    shown.resize(kept, b'0');
    if spec.precision.is_none() {
        while shown.last() == Some(&b'0') {
            shown.pop();
        }
    }
    if !shown.is_empty() || spec.alternate {
        body.write_char('.')?;
        body.write_str(std::str::from_utf8(&shown).expect("hex digits are ASCII"))?;
    }
    body.write_char(if upper { 'P' } else { 'p' })?;
    body.write_char(if exp < 0 { '-' } else { '+' })?;
    body.write_str(&exp.unsigned_abs().to_string())?;

    let mut prefix_buf = [0u8; 3];
    let prefix = {
        let sign = sign_prefix(decoded.negative, spec.sign);
        prefix_buf[..sign.len()].copy_from_slice(sign.as_bytes());
        prefix_buf[sign.len()..sign.len() + 2].copy_from_slice(if upper { b"0X" } else { b"0x" });
        std::str::from_utf8(&prefix_buf[..sign.len() + 2]).expect("prefix is ASCII")
    };
    write_formatted(out, spec, Align::Right, prefix, body.as_str())
}
