//! Replacement-field and specifier parsing.
//!
//! A replacement field is `{[arg-ref][:spec]}`. The argument reference is
//! either empty (automatic indexing), a non-negative integer (manual
//! indexing), or a name. The specifier grammar, in order, all parts
//! optional:
//!
//! ```text
//! [[fill]align][sign]['#']['0'][width]['.'precision]['L'][type]
//! ```
//!
//! - `align` is one of `<` (left), `>` (right), `^` (center); a fill
//!   character is only recognized immediately before an alignment token
//! - `sign` is one of `+`, `-`, or space
//! - `#` selects the alternate form (base prefixes, forced decimal point)
//! - `0` pads with leading zeros after the sign and base prefix
//! - `width` and `precision` are literal non-negative integers or nested
//!   `{arg-ref}` references resolved at format time
//! - `L` applies locale-aware digit grouping
//! - `type` is the single presentation character
//!
//! Parsing only builds the [`FormatSpec`] model; compatibility with the
//! actual argument is checked at format time by the driver.
//!
//! ## Examples
//!
//! ```rust
//! use strform::{Align, FormatSpec, Sign};
//!
//! let spec = FormatSpec::parse("*>+8.3f").unwrap();
//! assert_eq!(spec.fill, '*');
//! assert_eq!(spec.align, Align::Right);
//! assert_eq!(spec.sign, Sign::Plus);
//! assert_eq!(spec.ty, Some('f'));
//! ```

use crate::{Error, Result};

/// Reference to an argument, by position or by name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArgRef<'a> {
    Index(usize),
    Name(&'a str),
}

/// Horizontal alignment of a field within its width.
///
/// `Numeric` is the legacy zero-fill alignment produced by the `0` flag:
/// fill goes between the sign/prefix and the digits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    None,
    Left,
    Right,
    Center,
    Numeric,
}

/// Sign display mode for numeric arguments.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Sign {
    #[default]
    None,
    Minus,
    Plus,
    Space,
}

/// A width or precision: unset, a literal value, or a dynamic reference to
/// another argument resolved at format time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Count<'a> {
    #[default]
    Unset,
    Value(u32),
    Arg(Option<ArgRef<'a>>),
}

/// A parsed format specifier.
///
/// Mutated only while parsing; the driver treats it as read-only.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FormatSpec<'a> {
    pub fill: char,
    pub align: Align,
    pub sign: Sign,
    pub alternate: bool,
    pub width: Count<'a>,
    pub precision: Count<'a>,
    pub localized: bool,
    pub ty: Option<char>,
}

impl Default for FormatSpec<'_> {
    fn default() -> Self {
        FormatSpec {
            fill: ' ',
            align: Align::None,
            sign: Sign::None,
            alternate: false,
            width: Count::Unset,
            precision: Count::Unset,
            localized: false,
            ty: None,
        }
    }
}

impl<'a> FormatSpec<'a> {
    /// Parses a complete specifier string (the text that would appear
    /// between `:` and `}` in a template).
    ///
    /// # Errors
    ///
    /// Returns a parse error if the string is not entirely consumed by the
    /// grammar.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use strform::FormatSpec;
    ///
    /// assert!(FormatSpec::parse("^10").is_ok());
    /// assert!(FormatSpec::parse("..").is_err());
    /// ```
    pub fn parse(spec: &'a str) -> Result<Self> {
        let (parsed, consumed) = parse_spec(spec, 0)?;
        if consumed != spec.len() {
            return Err(Error::parse(consumed, "invalid format specifier"));
        }
        Ok(parsed)
    }
}

/// Parses the argument reference at the start of a field body, stopping at
/// `:` or `}`. Returns the reference (`None` = automatic) and the bytes
/// consumed.
pub(crate) fn parse_arg_ref(field: &str, base: usize) -> Result<(Option<ArgRef<'_>>, usize)> {
    let bytes = field.as_bytes();
    if bytes.is_empty() {
        return Err(Error::parse(base, "unterminated format field"));
    }
    match bytes[0] {
        b':' | b'}' => Ok((None, 0)),
        b'0'..=b'9' => {
            let end = scan_digits(bytes, 0);
            let index = field[..end]
                .parse::<usize>()
                .map_err(|_| Error::parse(base, "argument index is too big"))?;
            Ok((Some(ArgRef::Index(index)), end))
        }
        b'a'..=b'z' | b'A'..=b'Z' | b'_' => {
            let mut end = 1;
            while end < bytes.len()
                && (bytes[end].is_ascii_alphanumeric() || bytes[end] == b'_')
            {
                end += 1;
            }
            Ok((Some(ArgRef::Name(&field[..end])), end))
        }
        _ => Err(Error::parse(base, "invalid argument reference")),
    }
}

/// Parses a specifier, stopping at (and not consuming) the closing `}` or
/// the end of input. Returns the spec and the bytes consumed.
pub(crate) fn parse_spec(spec: &str, base: usize) -> Result<(FormatSpec<'_>, usize)> {
    let mut out = FormatSpec::default();
    let mut pos = 0;

    // [[fill]align]
    let mut chars = spec[pos..].chars();
    if let Some(first) = chars.next() {
        let second = chars.next();
        if let Some(align) = second.and_then(align_of) {
            if first == '{' || first == '}' {
                return Err(Error::parse(base + pos, "invalid fill character"));
            }
            out.fill = first;
            out.align = align;
            pos += first.len_utf8() + 1;
        } else if let Some(align) = align_of(first) {
            out.align = align;
            pos += 1;
        }
    }

    // [sign]
    match spec.as_bytes().get(pos) {
        Some(b'+') => {
            out.sign = Sign::Plus;
            pos += 1;
        }
        Some(b'-') => {
            out.sign = Sign::Minus;
            pos += 1;
        }
        Some(b' ') => {
            out.sign = Sign::Space;
            pos += 1;
        }
        _ => {}
    }

    // ['#']
    if spec.as_bytes().get(pos) == Some(&b'#') {
        out.alternate = true;
        pos += 1;
    }

    // ['0']: legacy numeric alignment, unless an explicit align was given.
    if spec.as_bytes().get(pos) == Some(&b'0') {
        if out.align == Align::None {
            out.align = Align::Numeric;
            out.fill = '0';
        }
        pos += 1;
    }

    // [width]
    let (width, consumed) = parse_count(&spec[pos..], base + pos)?;
    out.width = width;
    pos += consumed;

    // ['.'precision]
    if spec.as_bytes().get(pos) == Some(&b'.') {
        pos += 1;
        let (precision, consumed) = parse_count(&spec[pos..], base + pos)?;
        if precision == Count::Unset {
            return Err(Error::parse(base + pos, "invalid precision specifier"));
        }
        out.precision = precision;
        pos += consumed;
    }

    // ['L']
    if spec.as_bytes().get(pos) == Some(&b'L') {
        out.localized = true;
        pos += 1;
    }

    // [type]
    match spec[pos..].chars().next() {
        None | Some('}') => {}
        Some(c) => {
            out.ty = Some(c);
            pos += c.len_utf8();
            match spec[pos..].chars().next() {
                None | Some('}') => {}
                Some(_) => return Err(Error::parse(base + pos, "invalid format specifier")),
            }
        }
    }

    Ok((out, pos))
}

/// Parses a literal or dynamic width/precision.
fn parse_count(s: &str, base: usize) -> Result<(Count<'_>, usize)> {
    let bytes = s.as_bytes();
    match bytes.first() {
        Some(b'1'..=b'9') => {
            let end = scan_digits(bytes, 0);
            let value = s[..end]
                .parse::<u32>()
                .map_err(|_| Error::parse(base, "number is too big"))?;
            Ok((Count::Value(value), end))
        }
        Some(b'{') => {
            let inner = &s[1..];
            let (arg_ref, consumed) = parse_arg_ref(inner, base + 1)?;
            if inner.as_bytes().get(consumed) != Some(&b'}') {
                return Err(Error::parse(base + 1 + consumed, "invalid dynamic width or precision"));
            }
            Ok((Count::Arg(arg_ref), consumed + 2))
        }
        _ => Ok((Count::Unset, 0)),
    }
}

fn scan_digits(bytes: &[u8], start: usize) -> usize {
    let mut end = start;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    end
}

fn align_of(c: char) -> Option<Align> {
    match c {
        '<' => Some(Align::Left),
        '>' => Some(Align::Right),
        '^' => Some(Align::Center),
        _ => None,
    }
}
