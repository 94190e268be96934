//! Template Grammar Reference
//!
//! This module documents the template syntax accepted by the engine.
//!
//! # Overview
//!
//! A template is literal text interleaved with replacement fields. Each
//! field is substituted by one formatted argument; everything else is
//! copied through verbatim.
//!
//! ```text
//! template    := ( literal | '{{' | '}}' | field )*
//! field       := '{' [arg-ref] [':' spec] '}'
//! arg-ref     := integer | name
//! name        := [A-Za-z_][A-Za-z0-9_]*
//! spec        := [[fill]align][sign]['#']['0'][width]['.'precision]['L'][type]
//! align       := '<' | '>' | '^'
//! sign        := '+' | '-' | ' '
//! width       := integer | '{' [arg-ref] '}'
//! precision   := integer | '{' [arg-ref] '}'
//! type        := 'd' | 'x' | 'X' | 'o' | 'b' | 'B' | 'c' | 's' | 'p'
//!              | 'e' | 'E' | 'f' | 'F' | 'g' | 'G' | 'a' | 'A'
//! ```
//!
//! # Escaped Braces
//!
//! `{{` and `}}` produce literal `{` and `}`. A lone `}` in literal text is
//! an error ("unmatched '}' in format string"), as is an unterminated `{`.
//!
//! # Argument References
//!
//! | Form | Meaning |
//! |------|---------|
//! | `{}` | Automatic: the next unconsumed positional index |
//! | `{2}` | Manual: explicit positional index |
//! | `{name}` | Manual: named argument |
//!
//! Automatic and manual references must not be mixed within one formatting
//! call: once a field (or a dynamic width/precision) uses one mode, a field
//! in the other mode fails with a mode-switch error. Dynamic width and
//! precision references participate in the same sequence, so
//! `"{:{}.{}}"` consumes three automatic indices.
//!
//! # Fill and Alignment
//!
//! A fill character (any character except `{` and `}`) is recognized only
//! immediately before an alignment token:
//!
//! ```text
//! {:>8}    right-align in 8 columns, space fill
//! {:*<8}   left-align, '*' fill
//! {:^8}    center (extra fill goes to the right)
//! ```
//!
//! Without an explicit alignment, strings, characters and booleans align
//! left; numbers align right. Width counts characters, not bytes.
//!
//! # Sign, `#`, and `0`
//!
//! `+` prints a plus on non-negative signed numbers, space reserves a
//! column for it, `-` is the default. `#` selects the alternate form:
//! `0x`/`0X`/`0`/`0b`/`0B` base prefixes for integers, a forced decimal
//! point (and kept trailing zeros in general mode) for floats. `0` pads
//! with zeros between the sign/prefix and the digits; an explicit
//! alignment disables it. All of these require a numeric argument, and the
//! sign flags additionally require a signed one.
//!
//! # Width and Precision
//!
//! Both accept a literal integer or a nested `{arg-ref}` resolved against
//! the argument list at format time. A dynamic value must be a
//! non-negative integer; anything else fails ("negative width",
//! "precision is not integer", ...).
//!
//! Precision means: maximum characters for strings, fractional digits for
//! `f`/`F`/`e`/`E`, significant digits for `g`/`G` and the default float
//! presentation, hex digits after the point for `a`/`A`. Precision is
//! rejected for integral and pointer presentations.
//!
//! # Locale Flag
//!
//! `L` applies the grouping rule of the active
//! [`NumericLocale`](crate::NumericLocale) to the integer digits:
//!
//! ```rust
//! use strform::{format, args};
//!
//! assert_eq!(format("{:L}", &args![1234567]).unwrap(), "1,234,567");
//! ```
//!
//! # Presentation Types
//!
//! | Type | Arguments | Rendering |
//! |------|-----------|-----------|
//! | none | any | natural form of the value |
//! | `d` | integers, `bool`, `char` | decimal |
//! | `x`/`X` | integers, `bool`, `char` | hexadecimal |
//! | `o` | integers, `bool`, `char` | octal |
//! | `b`/`B` | integers, `bool`, `char` | binary |
//! | `c` | integers, `char` | the character with that code point |
//! | `s` | strings, `bool` | text |
//! | `p` | pointers | `0x` + lowercase hex address |
//! | `f`/`F` | floats | fixed notation, default precision 6 |
//! | `e`/`E` | floats | scientific, exponent sign + at least two digits |
//! | `g`/`G` | floats | general: fixed inside the exponent window, else scientific |
//! | `a`/`A` | floats | hexadecimal significand with binary exponent |
//!
//! The default float presentation (no type, no precision) produces the
//! shortest decimal string that parses back to the exact same value, in
//! fixed notation while the decimal exponent lies in `[-4, 16)` and
//! scientific notation outside it.
//!
//! # Special Values
//!
//! NaN and infinities render as `nan`/`inf` (`NAN`/`INF` for the
//! upper-case presentation types), honor the sign flags (`-inf`, `+nan`),
//! and are never zero-padded. Negative zero renders with its sign: `-0`.
//!
//! # Errors
//!
//! Malformed fields, unknown specifier characters, incompatible
//! specifier/argument combinations, and unresolvable references all abort
//! the formatting call with a descriptive [`Error`](crate::Error); there is
//! no silent recovery or default substitution.

// This module contains only documentation; no implementation code
