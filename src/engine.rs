//! The format driver: template scanning, argument resolution, specifier
//! validation, and the shared pad-and-fill composition.
//!
//! The driver walks the template once, copying literal runs verbatim and
//! handing each `{...}` field to the specifier parser. Field arguments are
//! resolved lazily (an argument is never consulted unless its field is
//! reached), dynamic width/precision references are resolved against the
//! argument list at format time, and the resolved specifier is
//! cross-checked against the argument's runtime kind before any of the
//! field's output is emitted.
//!
//! Automatic (`{}`) and manual (`{0}`/`{name}`) indexing are mutually
//! exclusive within one formatting call; the first field locks the mode and
//! a later switch fails.

use crate::arg::{Arg, ArgKind, ArgVisitor, Args, CustomFmt};
use crate::float::{write_float, FloatValue};
use crate::int::{write_int, IntBase};
use crate::parser::{self, Align, ArgRef, Count, FormatSpec, Sign};
use crate::{Error, NumericLocale, Result, Sink};

/// A specifier with dynamic width/precision resolved to concrete values,
/// plus the field's byte position for error reporting.
#[derive(Clone, Copy)]
pub(crate) struct Resolved {
    pub fill: char,
    pub align: Align,
    pub sign: Sign,
    pub alternate: bool,
    pub width: usize,
    pub precision: Option<usize>,
    pub localized: bool,
    pub ty: Option<char>,
    pub pos: usize,
}

/// Shared pad-and-fill: lays `prefix` + `body` out inside `width` columns.
/// `Numeric` alignment puts the fill between prefix and body, which is how
/// zero padding keeps the sign and base prefix in front.
pub(crate) fn write_formatted<S: Sink>(
    out: &mut S,
    spec: &Resolved,
    default_align: Align,
    prefix: &str,
    body: &str,
) -> Result<()> {
    let content = prefix.chars().count() + body.chars().count();
    if spec.width <= content {
        out.write_str(prefix)?;
        return out.write_str(body);
    }
    let pad = spec.width - content;
    let align = if spec.align == Align::None {
        default_align
    } else {
        spec.align
    };
    match align {
        Align::Left => {
            out.write_str(prefix)?;
            out.write_str(body)?;
            write_fill(out, spec.fill, pad)
        }
        Align::Center => {
            let left = pad / 2;
            write_fill(out, spec.fill, left)?;
            out.write_str(prefix)?;
            out.write_str(body)?;
            write_fill(out, spec.fill, pad - left)
        }
        Align::Numeric => {
            out.write_str(prefix)?;
            write_fill(out, spec.fill, pad)?;
            out.write_str(body)
        }
        Align::Right | Align::None => {
            write_fill(out, spec.fill, pad)?;
            out.write_str(prefix)?;
            out.write_str(body)
        }
    }
}

fn write_fill<S: Sink>(out: &mut S, fill: char, count: usize) -> Result<()> {
    for _ in 0..count {
        out.write_char(fill)?;
    }
    Ok(())
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum IndexMode {
    Unset,
    Automatic,
    Manual,
}

struct Driver<'a> {
    template: &'a str,
    args: &'a Args<'a>,
    locale: &'a NumericLocale,
    next_index: usize,
    mode: IndexMode,
}

/// Formats `template` against `args` into `out`.
pub(crate) fn vformat_into<S: Sink>(
    out: &mut S,
    template: &str,
    args: &Args<'_>,
    locale: &NumericLocale,
) -> Result<()> {
    let mut driver = Driver {
        template,
        args,
        locale,
        next_index: 0,
        mode: IndexMode::Unset,
    };
    let bytes = template.as_bytes();
    let mut pos = 0;
    while pos < bytes.len() {
        match memchr::memchr2(b'{', b'}', &bytes[pos..]) {
            None => {
                out.write_str(&template[pos..])?;
                break;
            }
            Some(offset) => {
                let brace = pos + offset;
                out.write_str(&template[pos..brace])?;
                if bytes[brace] == b'}' {
                    if bytes.get(brace + 1) == Some(&b'}') {
                        out.write_str("}")?;
                        pos = brace + 2;
                    } else {
                        return Err(Error::parse(brace, "unmatched '}' in format string"));
                    }
                } else if bytes.get(brace + 1) == Some(&b'{') {
                    out.write_str("{")?;
                    pos = brace + 2;
                } else {
                    pos = driver.format_field(out, brace)?;
                }
            }
        }
    }
    Ok(())
}

impl<'a> Driver<'a> {
    /// Formats the field opening at `open` (the `{` byte); returns the
    /// position just past the closing `}`.
    fn format_field<S: Sink>(&mut self, out: &mut S, open: usize) -> Result<usize> {
        let bytes = self.template.as_bytes();
        let body_start = open + 1;
        let (arg_ref, consumed) = parser::parse_arg_ref(&self.template[body_start..], body_start)?;
        let mut pos = body_start + consumed;
        let delimiter = match bytes.get(pos) {
            Some(&b) if b == b'}' || b == b':' => b,
            None => return Err(Error::parse(open, "unterminated format field")),
            Some(_) => return Err(Error::parse(pos, "invalid format string")),
        };
        let arg = self.resolve_ref(arg_ref, open)?;

        if delimiter == b'}' {
            if let Arg::Custom(custom) = arg {
                self.custom_field(out, custom, "", open)?;
            } else {
                self.standard_field(out, arg, FormatSpec::default(), open)?;
            }
            return Ok(pos + 1);
        }

        pos += 1;
        if let Arg::Custom(custom) = arg {
            let close = memchr::memchr(b'}', &bytes[pos..])
                .ok_or_else(|| Error::parse(open, "unterminated format field"))?;
            let raw = &self.template[pos..pos + close];
            self.custom_field(out, custom, raw, open)?;
            Ok(pos + close + 1)
        } else {
            let (spec, spec_len) = parser::parse_spec(&self.template[pos..], pos)?;
            let end = pos + spec_len;
            if bytes.get(end) != Some(&b'}') {
                return Err(Error::parse(open, "unterminated format field"));
            }
            self.standard_field(out, arg, spec, open)?;
            Ok(end + 1)
        }
    }

    fn custom_field<S: Sink>(
        &mut self,
        out: &mut S,
        custom: &dyn CustomFmt,
        raw: &str,
        open: usize,
    ) -> Result<()> {
        let consumed = custom.parse(raw)?;
        if consumed != raw.len() {
            return Err(Error::spec(open, "invalid format specifier"));
        }
        custom.format(raw, out)
    }

    fn standard_field<S: Sink>(
        &mut self,
        out: &mut S,
        arg: Arg<'_>,
        spec: FormatSpec<'_>,
        open: usize,
    ) -> Result<()> {
        let width = self
            .resolve_count(spec.width, open, "width")?
            .unwrap_or(0);
        let precision = self.resolve_count(spec.precision, open, "precision")?;
        let resolved = Resolved {
            fill: spec.fill,
            align: spec.align,
            sign: spec.sign,
            alternate: spec.alternate,
            width,
            precision,
            localized: spec.localized,
            ty: spec.ty,
            pos: open,
        };
        validate(&resolved, arg.kind())?;
        let mut renderer = Renderer {
            out,
            spec: resolved,
            locale: self.locale,
        };
        arg.visit(&mut renderer)
    }

    /// Resolves an argument reference, enforcing index-mode exclusivity.
    fn resolve_ref(&mut self, arg_ref: Option<ArgRef<'_>>, pos: usize) -> Result<Arg<'a>> {
        match arg_ref {
            None => {
                if self.mode == IndexMode::Manual {
                    return Err(Error::spec(
                        pos,
                        "cannot switch from manual to automatic argument indexing",
                    ));
                }
                self.mode = IndexMode::Automatic;
                let index = self.next_index;
                self.next_index += 1;
                self.args.get(index).ok_or_else(|| Error::index_not_found(index))
            }
            Some(ArgRef::Index(index)) => {
                if self.mode == IndexMode::Automatic {
                    return Err(Error::spec(
                        pos,
                        "cannot switch from automatic to manual argument indexing",
                    ));
                }
                self.mode = IndexMode::Manual;
                self.args.get(index).ok_or_else(|| Error::index_not_found(index))
            }
            Some(ArgRef::Name(name)) => {
                if self.mode == IndexMode::Automatic {
                    return Err(Error::spec(
                        pos,
                        "cannot switch from automatic to manual argument indexing",
                    ));
                }
                self.mode = IndexMode::Manual;
                self.args
                    .get_named(name)
                    .ok_or_else(|| Error::name_not_found(name))
            }
        }
    }

    /// Resolves a dynamic width or precision against the argument list.
    fn resolve_count(
        &mut self,
        count: Count<'_>,
        pos: usize,
        what: &str,
    ) -> Result<Option<usize>> {
        match count {
            Count::Unset => Ok(None),
            Count::Value(v) => Ok(Some(v as usize)),
            Count::Arg(arg_ref) => {
                let arg = self.resolve_ref(arg_ref, pos)?;
                match arg.as_integer() {
                    Some((_, true)) => Err(Error::Spec {
                        pos,
                        msg: format!("negative {}", what),
                    }),
                    Some((magnitude, false)) => {
                        if magnitude > u32::MAX as u128 {
                            Err(Error::spec(pos, "number is too big"))
                        } else {
                            Ok(Some(magnitude as usize))
                        }
                    }
                    None => Err(Error::Spec {
                        pos,
                        msg: format!("{} is not integer", what),
                    }),
                }
            }
        }
    }
}

const INT_TYPES: [char; 7] = ['d', 'x', 'X', 'o', 'b', 'B', 'c'];
const FLOAT_TYPES: [char; 8] = ['e', 'E', 'f', 'F', 'g', 'G', 'a', 'A'];

/// Cross-checks the resolved specifier against the argument's runtime kind.
fn validate(spec: &Resolved, kind: ArgKind) -> Result<()> {
    let pos = spec.pos;

    if let Some(c) = spec.ty {
        let ty_ok = match kind {
            ArgKind::I32 | ArgKind::I64 | ArgKind::I128 | ArgKind::U32 | ArgKind::U64
            | ArgKind::U128 => INT_TYPES.contains(&c),
            ArgKind::F32 | ArgKind::F64 => FLOAT_TYPES.contains(&c),
            ArgKind::Str => c == 's',
            ArgKind::Bool => c == 's' || (INT_TYPES.contains(&c) && c != 'c'),
            ArgKind::Char => INT_TYPES.contains(&c),
            ArgKind::Pointer => c == 'p',
            ArgKind::Custom | ArgKind::None => true,
        };
        if !ty_ok {
            return Err(Error::Spec {
                pos,
                msg: format!("invalid type specifier '{}'", c),
            });
        }
    }

    // A char or bool under an integer presentation participates as a number.
    let as_integer =
        matches!(kind, ArgKind::Bool | ArgKind::Char) && matches!(spec.ty, Some(c) if INT_TYPES.contains(&c) && c != 'c');
    let numeric = kind.is_numeric() || as_integer;
    if !numeric
        && (spec.sign != Sign::None
            || spec.alternate
            || spec.align == Align::Numeric
            || spec.localized)
    {
        return Err(Error::spec(pos, "format specifier requires numeric argument"));
    }

    if spec.sign != Sign::None {
        let signed = kind.is_signed_integral() || kind.is_float();
        if !signed {
            return Err(Error::spec(pos, "format specifier requires signed argument"));
        }
    }

    let precision_ok = matches!(
        kind,
        ArgKind::Str | ArgKind::F32 | ArgKind::F64 | ArgKind::Custom | ArgKind::None
    );
    if spec.precision.is_some() && !precision_ok {
        return Err(Error::spec(pos, "precision not allowed for this argument type"));
    }

    Ok(())
}

/// Per-kind rendering, dispatched through the argument visitor.
struct Renderer<'e, S> {
    out: &'e mut S,
    spec: Resolved,
    locale: &'e NumericLocale,
}

impl<S: Sink> Renderer<'_, S> {
    fn int_field(&mut self, magnitude: u128, negative: bool) -> Result<()> {
        if self.spec.ty == Some('c') {
            let code = u32::try_from(magnitude).ok().filter(|_| !negative);
            let c = code
                .and_then(char::from_u32)
                .ok_or_else(|| Error::spec(self.spec.pos, "invalid character code"))?;
            return self.char_field(c);
        }
        let base = match IntBase::from_type_char(self.spec.ty) {
            Some(base) => base,
            None => return Err(Error::spec(self.spec.pos, "invalid type specifier")),
        };
        write_int(self.out, &self.spec, magnitude, negative, base, self.locale)
    }

    fn text_field(&mut self, text: &str) -> Result<()> {
        let clipped = match self.spec.precision {
            Some(p) => match text.char_indices().nth(p) {
                Some((idx, _)) => &text[..idx],
                None => text,
            },
            None => text,
        };
        write_formatted(self.out, &self.spec, Align::Left, "", clipped)
    }

    fn char_field(&mut self, c: char) -> Result<()> {
        let mut tmp = [0u8; 4];
        let s: &str = c.encode_utf8(&mut tmp);
        write_formatted(self.out, &self.spec, Align::Left, "", s)
    }
}

impl<S: Sink> ArgVisitor for Renderer<'_, S> {
    type Output = Result<()>;

    fn visit_none(&mut self) -> Result<()> {
        // Out-of-range indices were reported during resolution; reaching a
        // `none` payload here means the argument list itself held one.
        Err(Error::ArgumentNotFound {
            which: "empty argument slot".to_string(),
        })
    }

    fn visit_i64(&mut self, v: i64) -> Result<()> {
        self.int_field(v.unsigned_abs() as u128, v < 0)
    }

    fn visit_u64(&mut self, v: u64) -> Result<()> {
        self.int_field(v as u128, false)
    }

    fn visit_i128(&mut self, v: i128) -> Result<()> {
        self.int_field(v.unsigned_abs(), v < 0)
    }

    fn visit_u128(&mut self, v: u128) -> Result<()> {
        self.int_field(v, false)
    }

    fn visit_bool(&mut self, v: bool) -> Result<()> {
        match self.spec.ty {
            None | Some('s') => self.text_field(if v { "true" } else { "false" }),
            _ => self.int_field(v as u128, false),
        }
    }

    fn visit_char(&mut self, v: char) -> Result<()> {
        match self.spec.ty {
            None | Some('c') => self.char_field(v),
            _ => self.int_field(v as u128, false),
        }
    }

    fn visit_f32(&mut self, v: f32) -> Result<()> {
        write_float(self.out, &self.spec, FloatValue::F32(v), self.locale)
    }

    fn visit_f64(&mut self, v: f64) -> Result<()> {
        write_float(self.out, &self.spec, FloatValue::F64(v), self.locale)
    }

    fn visit_str(&mut self, v: &str) -> Result<()> {
        self.text_field(v)
    }

    fn visit_pointer(&mut self, v: usize) -> Result<()> {
        let spec = Resolved {
            alternate: true,
            ..self.spec
        };
        write_int(
            self.out,
            &spec,
            v as u128,
            false,
            IntBase::Hex { upper: false },
            self.locale,
        )
    }

    fn visit_custom(&mut self, _: &dyn CustomFmt) -> Result<()> {
        // User-defined arguments take the raw-specifier path in the driver.
        Err(Error::custom("user-defined argument reached the standard renderer"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Buffer;

    fn run(template: &str, args: &Args<'_>) -> Result<String> {
        let mut buf = Buffer::new();
        vformat_into(&mut buf, template, args, &NumericLocale::default())?;
        Ok(buf.into_string())
    }

    #[test]
    fn literal_passthrough() {
        let args = Args::new();
        assert_eq!(run("plain text", &args).unwrap(), "plain text");
        assert_eq!(run("", &args).unwrap(), "");
        assert_eq!(run("a {{b}} c", &args).unwrap(), "a {b} c");
        assert_eq!(run("{{{{}}}}", &args).unwrap(), "{{}}");
    }

    #[test]
    fn unmatched_braces() {
        let args = Args::new();
        let err = run("so }", &args).unwrap_err();
        assert!(err.to_string().contains("unmatched '}'"));
        let err = run("so {", &args).unwrap_err();
        assert!(err.to_string().contains("unterminated"));
        let err = run("{0", &args).unwrap_err();
        assert!(err.to_string().contains("unterminated"));
    }

    #[test]
    fn automatic_and_manual_modes() {
        let args = Args::new().with(Arg::from(1)).with(Arg::from(2));
        assert_eq!(run("{} {}", &args).unwrap(), "1 2");
        assert_eq!(run("{1} {0}", &args).unwrap(), "2 1");

        let err = run("{0} {}", &args).unwrap_err();
        assert!(err
            .to_string()
            .contains("cannot switch from manual to automatic argument indexing"));
        let err = run("{} {1}", &args).unwrap_err();
        assert!(err
            .to_string()
            .contains("cannot switch from automatic to manual argument indexing"));
    }

    #[test]
    fn named_arguments_are_manual() {
        let args = Args::new().with_named("x", Arg::from(9));
        assert_eq!(run("{x}", &args).unwrap(), "9");
        let err = run("{x} {}", &args).unwrap_err();
        assert!(err.to_string().contains("manual to automatic"));
    }

    #[test]
    fn missing_arguments() {
        let args = Args::new().with(Arg::from(1));
        let err = run("{} {}", &args).unwrap_err();
        assert_eq!(err, Error::index_not_found(1));
        let err = run("{nope}", &args).unwrap_err();
        assert!(err.to_string().contains("\"nope\""));
    }

    #[test]
    fn lazy_evaluation_of_later_fields() {
        // The second field is malformed, but the first must already have
        // been emitted into the sink before the error is detected.
        let args = Args::new().with(Arg::from(5));
        let mut buf = Buffer::new();
        let result = vformat_into(&mut buf, "{} {", &args, &NumericLocale::default());
        assert!(result.is_err());
    }

    #[test]
    fn dynamic_width_and_precision_errors() {
        let args = Args::new().with(Arg::from("x")).with(Arg::from(-1));
        let err = run("{0:{1}}", &args).unwrap_err();
        assert!(err.to_string().contains("negative width"));

        let args = Args::new().with(Arg::from(1.5)).with(Arg::from(-2));
        let err = run("{0:.{1}f}", &args).unwrap_err();
        assert!(err.to_string().contains("negative precision"));

        let args = Args::new().with(Arg::from("x")).with(Arg::from("w"));
        let err = run("{0:{1}}", &args).unwrap_err();
        assert!(err.to_string().contains("width is not integer"));

        let args = Args::new().with(Arg::from(1.5)).with(Arg::from(2.0));
        let err = run("{0:.{1}f}", &args).unwrap_err();
        assert!(err.to_string().contains("precision is not integer"));
    }

    #[test]
    fn validation_rules() {
        let args = Args::new().with(Arg::from("s"));
        assert!(run("{:+}", &args).unwrap_err().to_string().contains("numeric"));
        assert!(run("{:#}", &args).unwrap_err().to_string().contains("numeric"));
        assert!(run("{:05}", &args).unwrap_err().to_string().contains("numeric"));

        let args = Args::new().with(Arg::from(3u32));
        assert!(run("{:+}", &args).unwrap_err().to_string().contains("signed"));

        let args = Args::new().with(Arg::from(3));
        assert!(run("{:.2}", &args)
            .unwrap_err()
            .to_string()
            .contains("precision not allowed"));

        let args = Args::new().with(Arg::pointer(&3 as *const i32));
        assert!(run("{:.2}", &args)
            .unwrap_err()
            .to_string()
            .contains("precision not allowed"));

        let args = Args::new().with(Arg::from(3));
        assert!(run("{:z}", &args)
            .unwrap_err()
            .to_string()
            .contains("invalid type specifier"));
    }

    #[test]
    fn padding_composition() {
        let args = Args::new().with(Arg::from("hi"));
        assert_eq!(run("{:>8}", &args).unwrap(), "      hi");
        assert_eq!(run("{:<8}", &args).unwrap(), "hi      ");
        assert_eq!(run("{:^8}", &args).unwrap(), "   hi   ");
        assert_eq!(run("{:*^7}", &args).unwrap(), "**hi***");

        let args = Args::new().with(Arg::from(-42));
        assert_eq!(run("{:08}", &args).unwrap(), "-0000042");
        assert_eq!(run("{:+09}", &args).unwrap(), "-00000042");
    }

    #[test]
    fn width_counts_characters_not_bytes() {
        let args = Args::new().with(Arg::from("héé"));
        assert_eq!(run("{:>5}", &args).unwrap(), "  héé");
        let args = Args::new().with(Arg::from("猫"));
        assert_eq!(run("{:é>3}", &args).unwrap(), "éé猫");
    }

    #[test]
    fn string_precision_truncates_chars() {
        let args = Args::new().with(Arg::from("hello"));
        assert_eq!(run("{:.3}", &args).unwrap(), "hel");
        assert_eq!(run("{:.0}", &args).unwrap(), "");
        assert_eq!(run("{:.9}", &args).unwrap(), "hello");
        let args = Args::new().with(Arg::from("ééééé"));
        assert_eq!(run("{:.2}", &args).unwrap(), "éé");
    }

    #[test]
    fn char_and_bool_fields() {
        let args = Args::new().with(Arg::from('x'));
        assert_eq!(run("{}", &args).unwrap(), "x");
        assert_eq!(run("{:d}", &args).unwrap(), "120");

        let args = Args::new().with(Arg::from(true)).with(Arg::from(false));
        assert_eq!(run("{} {}", &args).unwrap(), "true false");
        assert_eq!(run("{0:d} {1:d}", &args).unwrap(), "1 0");

        let args = Args::new().with(Arg::from(97));
        assert_eq!(run("{:c}", &args).unwrap(), "a");
        let args = Args::new().with(Arg::from(-1));
        assert!(run("{:c}", &args).unwrap_err().to_string().contains("character"));
    }

    #[test]
    fn pointer_field() {
        let args = Args::new().with(Arg::Pointer(0xdead_beef));
        assert_eq!(run("{}", &args).unwrap(), "0xdeadbeef");
        assert_eq!(run("{:p}", &args).unwrap(), "0xdeadbeef");
        assert_eq!(run("{:>12}", &args).unwrap(), "  0xdeadbeef");
    }

    #[test]
    fn nested_dynamic_counts_consume_auto_indices() {
        let args = Args::new()
            .with(Arg::from(3.14159))
            .with(Arg::from(8u32))
            .with(Arg::from(2u32));
        assert_eq!(run("{:{}.{}f}", &args).unwrap(), "    3.14");
    }
}
