use strform::{
    args, format, format_into, Arg, Args, Buffer, CustomFmt, Error, Result, Sink,
};

#[test]
fn test_literal_only_templates() {
    assert_eq!(format("", &args![]).unwrap(), "");
    assert_eq!(format("no fields here", &args![]).unwrap(), "no fields here");
    assert_eq!(format("open {{ close }}", &args![]).unwrap(), "open { close }");
    assert_eq!(format("{{}}", &args![]).unwrap(), "{}");
    assert_eq!(format("{{{}}}", &args![5]).unwrap(), "{5}");
}

#[test]
fn test_basic_substitution() {
    assert_eq!(format("{}", &args![42]).unwrap(), "42");
    assert_eq!(format("{} {} {}", &args![1, "two", 3.5]).unwrap(), "1 two 3.5");
    assert_eq!(format("{0} {0}", &args!["echo"]).unwrap(), "echo echo");
    assert_eq!(format("{1} {0}", &args!["a", "b"]).unwrap(), "b a");
}

#[test]
fn test_named_substitution() {
    let s = format("{name} is {age}", &args![name = "Ada", age = 36]).unwrap();
    assert_eq!(s, "Ada is 36");

    // Named arguments stay addressable by position too.
    let s = format("{0} {1}", &args![first = 1, second = 2]).unwrap();
    assert_eq!(s, "1 2");
}

#[test]
fn test_spec_scenario_mixed_field() {
    // "{0} and {1:.2f}" with (42, 3.14159) is the canonical scenario.
    let s = format("{0} and {1:.2f}", &args![42, 3.14159]).unwrap();
    assert_eq!(s, "42 and 3.14");
}

#[test]
fn test_index_mode_exclusivity() {
    let args = args![1, 2];
    let err = format("{} {0}", &args).unwrap_err();
    assert!(err
        .to_string()
        .contains("cannot switch from automatic to manual argument indexing"));

    let err = format("{0} {}", &args).unwrap_err();
    assert!(err
        .to_string()
        .contains("cannot switch from manual to automatic argument indexing"));

    // The error fires regardless of argument values.
    let err = format("{x} {}", &args![x = 0]).unwrap_err();
    assert!(err.to_string().contains("manual to automatic"));
}

#[test]
fn test_argument_not_found() {
    let err = format("{}", &args![]).unwrap_err();
    assert!(err.to_string().contains("argument not found"));
    let err = format("{3}", &args![1, 2]).unwrap_err();
    assert!(err.to_string().contains("index 3"));
    let err = format("{missing}", &args![present = 1]).unwrap_err();
    assert!(err.to_string().contains("\"missing\""));
}

#[test]
fn test_malformed_templates() {
    assert!(format("}", &args![]).is_err());
    assert!(format("a } b", &args![]).is_err());
    assert!(format("{", &args![]).is_err());
    assert!(format("{0", &args![0]).is_err());
    assert!(format("{:", &args![0]).is_err());
    assert!(format("{ }", &args![0]).is_err());
    assert!(format("{-1}", &args![0]).is_err());
}

#[test]
fn test_alignment_and_fill() {
    assert_eq!(format("{:>8}", &args!["hi"]).unwrap(), "      hi");
    assert_eq!(format("{:<8}", &args!["hi"]).unwrap(), "hi      ");
    assert_eq!(format("{:^8}", &args!["hi"]).unwrap(), "   hi   ");
    assert_eq!(format("{:-^9}", &args!["mid"]).unwrap(), "---mid---");
    assert_eq!(format("{:.<6}", &args!["ab"]).unwrap(), "ab....");

    // Numbers default to right alignment, strings to left.
    assert_eq!(format("{:4}", &args![7]).unwrap(), "   7");
    assert_eq!(format("{:4}", &args!["x"]).unwrap(), "x   ");
}

#[test]
fn test_dynamic_width_and_precision() {
    assert_eq!(format("{:{}}", &args!["hi", 5]).unwrap(), "hi   ");
    assert_eq!(format("{0:{1}.{2}f}", &args![3.14159, 9, 3]).unwrap(), "    3.142");
    assert_eq!(format("{:.{}}", &args!["truncate", 4]).unwrap(), "trun");
    assert_eq!(
        format("{v:{w}}", &args![v = 1.5, w = 6]).unwrap(),
        "   1.5"
    );
}

#[test]
fn test_dynamic_count_failures() {
    let err = format("{:{}}", &args!["x", -3]).unwrap_err();
    assert!(err.to_string().contains("negative width"));

    let err = format("{:.{}f}", &args![1.0, -3]).unwrap_err();
    assert!(err.to_string().contains("negative precision"));

    let err = format("{:{}}", &args!["x", 1.5]).unwrap_err();
    assert!(err.to_string().contains("width is not integer"));

    let err = format("{:.{}f}", &args![1.0, "three"]).unwrap_err();
    assert!(err.to_string().contains("precision is not integer"));
}

#[test]
fn test_string_precision() {
    assert_eq!(format("{:.3}", &args!["hello"]).unwrap(), "hel");
    assert_eq!(format("{:.10}", &args!["hello"]).unwrap(), "hello");
    assert_eq!(format("{:8.3}", &args!["hello"]).unwrap(), "hel     ");
    // Precision counts characters, not bytes.
    assert_eq!(format("{:.2}", &args!["héllo"]).unwrap(), "hé");
}

#[test]
fn test_char_and_bool_arguments() {
    assert_eq!(format("{}", &args!['é']).unwrap(), "é");
    assert_eq!(format("{:>3}", &args!['x']).unwrap(), "  x");
    assert_eq!(format("{:d}", &args!['A']).unwrap(), "65");
    assert_eq!(format("{}", &args![true]).unwrap(), "true");
    assert_eq!(format("{:5}", &args![false]).unwrap(), "false");
    assert_eq!(format("{:x}", &args![true]).unwrap(), "1");
}

#[test]
fn test_incompatible_specifiers() {
    assert!(format("{:+}", &args!["s"]).is_err());
    assert!(format("{:#}", &args!["s"]).is_err());
    assert!(format("{:0>5.2d}", &args![10]).is_err());
    assert!(format("{:.2}", &args![10]).is_err());
    assert!(format("{:+}", &args![1u64]).is_err());
    assert!(format("{:f}", &args![10]).is_err());
    assert!(format("{:d}", &args![1.5]).is_err());
    assert!(format("{:s}", &args![1]).is_err());
}

#[test]
fn test_format_into_string_sink() {
    let mut out = String::from(">> ");
    format_into(&mut out, "{}+{}", &args![1, 2]).unwrap();
    assert_eq!(out, ">> 1+2");
}

#[test]
fn test_fixed_capacity_sink() {
    let mut out = Buffer::with_limit(8);
    format_into(&mut out, "{}", &args!["12345678"]).unwrap();
    assert_eq!(out.as_str(), "12345678");

    let mut out = Buffer::with_limit(8);
    let err = format_into(&mut out, "{}", &args!["123456789"]).unwrap_err();
    assert!(matches!(err, Error::CapacityExceeded { .. }));
}

struct Fraction {
    num: i32,
    den: i32,
}

impl CustomFmt for Fraction {
    fn parse(&self, spec: &str) -> Result<usize> {
        // Accept an empty spec or the single flag `/`.
        match spec {
            "" | "/" => Ok(spec.len()),
            _ => Ok(0),
        }
    }

    fn format(&self, spec: &str, out: &mut dyn Sink) -> Result<()> {
        if spec == "/" {
            out.write_str(&std::format!("{}/{}", self.num, self.den))
        } else {
            out.write_str(&std::format!("{}", self.num as f64 / self.den as f64))
        }
    }
}

#[test]
fn test_custom_formatter_contract() {
    let half = Fraction { num: 1, den: 2 };
    let args = Args::new().with(Arg::custom(&half));
    assert_eq!(format("{}", &args).unwrap(), "0.5");
    assert_eq!(format("{0:/}", &args).unwrap(), "1/2");

    // A spec the custom parser does not consume entirely is an error.
    let err = format("{0:??}", &args).unwrap_err();
    assert!(err.to_string().contains("invalid format specifier"));
}

#[test]
fn test_no_eager_argument_evaluation() {
    // Only the referenced argument is touched: an unused `none` slot does
    // not fail the call.
    let args = Args::new().with(Arg::from(1)).with(Arg::None);
    assert_eq!(format("{0}", &args).unwrap(), "1");
    assert!(format("{1}", &args).is_err());
}

#[test]
fn test_deeply_mixed_template() {
    let s = format(
        "{}: [{:>6}] ({:+.1f}) {{literal}} {:#06x}",
        &args!["row", "val", 2.25, 48879],
    )
    .unwrap();
    assert_eq!(s, "row: [   val] (+2.2) {literal} 0xbeef");
}
