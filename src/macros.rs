/// Builds an [`Args`](crate::Args) list from a mix of positional values and
/// `name = value` pairs.
///
/// Values are converted through `Arg::from`, so anything with a `From`
/// conversion into [`Arg`](crate::Arg) works: integers, floats, `bool`,
/// `char`, `&str`, and `&String`. Named entries must come with plain
/// identifier names.
///
/// # Examples
///
/// ```rust
/// use strform::{format, args};
///
/// assert_eq!(format("{} {}", &args![1, "two"]).unwrap(), "1 two");
/// assert_eq!(format("{n:.1f}", &args![n = 2.25]).unwrap(), "2.2");
/// assert_eq!(format("{0} {x}", &args![7, x = 8]).unwrap(), "7 8");
/// ```
#[macro_export]
macro_rules! args {
    // Named entry, possibly followed by more.
    (@push $args:ident, $name:ident = $value:expr, $($rest:tt)*) => {
        $args.push_named(stringify!($name), $crate::Arg::from($value));
        $crate::args!(@push $args, $($rest)*);
    };
    (@push $args:ident, $name:ident = $value:expr) => {
        $args.push_named(stringify!($name), $crate::Arg::from($value));
    };

    // Positional entry, possibly followed by more.
    (@push $args:ident, $value:expr, $($rest:tt)*) => {
        $args.push($crate::Arg::from($value));
        $crate::args!(@push $args, $($rest)*);
    };
    (@push $args:ident, $value:expr) => {
        $args.push($crate::Arg::from($value));
    };

    (@push $args:ident,) => {};

    () => {
        $crate::Args::new()
    };

    ($($rest:tt)+) => {{
        let mut args = $crate::Args::new();
        $crate::args!(@push args, $($rest)+);
        args
    }};
}
