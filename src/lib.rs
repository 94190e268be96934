//! # strform
//!
//! A runtime, type-safe text-formatting engine: `{}`-style templates,
//! positional and named arguments, rich per-argument format specifiers, and
//! a correctly-rounded floating-point conversion core.
//!
//! ## Why a runtime formatter?
//!
//! `std::format!` resolves its template at compile time. When the template
//! arrives at run time (configuration files, translation catalogs, log
//! layouts, user-supplied patterns), you need an engine that parses the
//! template, checks it against the arguments you actually supplied, and
//! reports mistakes as errors instead of compile failures. That is what
//! this crate does, with the same specifier vocabulary you already know.
//!
//! ## Key Features
//!
//! - **Full specifier grammar**: fill/alignment, sign, alternate form,
//!   zero padding, width, precision, locale-aware grouping, presentation
//!   types, including dynamic width/precision taken from other arguments
//! - **Positional and named arguments**: `{}`, `{2}`, `{name}`, with
//!   mode-mixing caught as an error
//! - **Correct floating point**: the default presentation is the shortest
//!   decimal string that round-trips to the exact same bits; explicit
//!   precisions round half-to-even, backed by an arbitrary-precision
//!   fallback when 64-bit arithmetic cannot prove the result
//! - **No allocation for short outputs**: inline buffers end-to-end
//! - **No Unsafe Code**: written entirely in safe Rust with zero unsafe
//!   blocks
//!
//! ## Quick Start
//!
//! ```rust
//! use strform::{format, args};
//!
//! let s = format("{0} and {1:.2f}", &args![42, 3.14159]).unwrap();
//! assert_eq!(s, "42 and 3.14");
//!
//! let s = format("{:#x}", &args![255]).unwrap();
//! assert_eq!(s, "0xff");
//!
//! let s = format("{name:>8}", &args![name = "hi"]).unwrap();
//! assert_eq!(s, "      hi");
//! ```
//!
//! ### Shortest round-trip floats
//!
//! The default float presentation emits the fewest digits that parse back
//! to the identical value:
//!
//! ```rust
//! use strform::{format, args};
//!
//! assert_eq!(format("{}", &args![0.1]).unwrap(), "0.1");
//! assert_eq!(format("{}", &args![1e300]).unwrap(), "1e+300");
//! assert_eq!(format("{}", &args![f64::NEG_INFINITY]).unwrap(), "-inf");
//! ```
//!
//! ### Locale-aware grouping
//!
//! ```rust
//! use strform::{format_with_locale, args, NumericLocale};
//!
//! let de = NumericLocale::new().with_separator('.');
//! let s = format_with_locale("{:L}", &args![1234567], &de).unwrap();
//! assert_eq!(s, "1.234.567");
//! ```
//!
//! ### Errors instead of surprises
//!
//! ```rust
//! use strform::{format, args};
//!
//! // Mixing automatic and manual indexing is an error, not a guess.
//! assert!(format("{0} {}", &args![1, 2]).is_err());
//! // So is an incompatible specifier.
//! assert!(format("{:+}", &args!["text"]).is_err());
//! ```
//!
//! ## Performance Characteristics
//!
//! - **Template scan**: single pass, literal runs located with `memchr`
//! - **Integers**: O(1) digit counting, two digits per division step
//! - **Floats**: 64-bit fast paths cover >99% of values; the exact
//!   big-integer fallback only runs when the fast path cannot prove its
//!   rounding
//! - **Memory**: outputs up to 128 bytes never touch the heap
//!
//! ## Safety Guarantees
//!
//! - No `unsafe` code blocks
//! - No panics in the public API for any input (logic errors excepted)
//! - Proper error propagation with `Result` types

pub mod arg;
pub mod buffer;
pub mod error;
pub mod grammar;
pub mod locale;
pub mod macros;
pub mod parser;

mod bignum;
mod engine;
mod float;
mod grisu;
mod int;

pub use arg::{Arg, ArgKind, ArgVisitor, Args, CustomFmt, PACKED_MAX};
pub use buffer::{Buffer, Sink};
pub use error::{Error, Result};
pub use locale::NumericLocale;
pub use parser::{Align, ArgRef, Count, FormatSpec, Sign};

use std::io;

/// Formats `template` against `args`, returning the result as a `String`.
///
/// Uses the default [`NumericLocale`] for `L`-flagged fields; see
/// [`format_with_locale`] to supply another.
///
/// # Examples
///
/// ```rust
/// use strform::{format, args};
///
/// let s = format("{:+d} and {:e}", &args![7, 1.5]).unwrap();
/// assert_eq!(s, "+7 and 1.500000e+00");
/// ```
///
/// # Errors
///
/// Returns an error for malformed templates, unresolvable argument
/// references, or specifiers incompatible with their arguments. Nothing is
/// partially substituted: a failed call yields no output.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn format(template: &str, args: &Args<'_>) -> Result<String> {
    format_with_locale(template, args, &NumericLocale::default())
}

/// Formats `template` against `args` with an explicit grouping locale.
///
/// # Examples
///
/// ```rust
/// use strform::{format_with_locale, args, NumericLocale};
///
/// let inr = NumericLocale::new().with_groups(&[3, 2]);
/// let s = format_with_locale("{:L}", &args![10000000], &inr).unwrap();
/// assert_eq!(s, "1,00,00,000");
/// ```
///
/// # Errors
///
/// Same conditions as [`format`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn format_with_locale(
    template: &str,
    args: &Args<'_>,
    locale: &NumericLocale,
) -> Result<String> {
    let mut buf = Buffer::with_capacity(template.len());
    engine::vformat_into(&mut buf, template, args, locale)?;
    Ok(buf.into_string())
}

/// Formats into any [`Sink`] instead of building a `String`.
///
/// # Examples
///
/// ```rust
/// use strform::{format_into, args, Buffer};
///
/// let mut out = String::from("result: ");
/// format_into(&mut out, "{}", &args![12]).unwrap();
/// assert_eq!(out, "result: 12");
///
/// // A fixed-capacity buffer reports overflow as an error.
/// let mut out = Buffer::with_limit(4);
/// assert!(format_into(&mut out, "{}", &args![123456]).is_err());
/// ```
///
/// # Errors
///
/// Same conditions as [`format`], plus capacity errors from fixed-size
/// sinks. Sink contents up to the error point are unspecified.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn format_into<S: Sink>(out: &mut S, template: &str, args: &Args<'_>) -> Result<()> {
    engine::vformat_into(out, template, args, &NumericLocale::default())
}

/// Formats into any [`Sink`] with an explicit grouping locale.
///
/// # Errors
///
/// Same conditions as [`format_into`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn format_into_with_locale<S: Sink>(
    out: &mut S,
    template: &str,
    args: &Args<'_>,
    locale: &NumericLocale,
) -> Result<()> {
    engine::vformat_into(out, template, args, locale)
}

/// Formats to an [`io::Write`] destination.
///
/// # Examples
///
/// ```rust
/// use strform::{format_to_writer, args};
///
/// let mut out = Vec::new();
/// format_to_writer(&mut out, "{:05}", &args![42]).unwrap();
/// assert_eq!(out, b"00042");
/// ```
///
/// # Errors
///
/// Returns an error if formatting fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn format_to_writer<W>(mut writer: W, template: &str, args: &Args<'_>) -> Result<()>
where
    W: io::Write,
{
    let text = format(template, args)?;
    writer
        .write_all(text.as_bytes())
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smoke_positional() {
        let s = format("{} + {} = {}", &args![1, 2, 3]).unwrap();
        assert_eq!(s, "1 + 2 = 3");
    }

    #[test]
    fn smoke_named() {
        let s = format("{greeting}, {who}!", &args![greeting = "hello", who = "world"]).unwrap();
        assert_eq!(s, "hello, world!");
    }

    #[test]
    fn smoke_numeric_specifiers() {
        assert_eq!(format("{:#x}", &args![255]).unwrap(), "0xff");
        assert_eq!(format("{:+d}", &args![7]).unwrap(), "+7");
        assert_eq!(format("{:+d}", &args![-7]).unwrap(), "-7");
        assert_eq!(format("{:08.3f}", &args![2.5]).unwrap(), "0002.500");
    }

    #[test]
    fn smoke_error_paths() {
        assert!(format("{", &args![]).is_err());
        assert!(format("{}", &args![]).is_err());
        assert!(format("{:q}", &args![1]).is_err());
    }

    #[test]
    fn smoke_sinks() {
        let mut s = String::new();
        format_into(&mut s, "[{}]", &args![9]).unwrap();
        assert_eq!(s, "[9]");

        let mut v: Vec<u8> = Vec::new();
        format_to_writer(&mut v, "{}", &args!["bytes"]).unwrap();
        assert_eq!(v, b"bytes");
    }
}
