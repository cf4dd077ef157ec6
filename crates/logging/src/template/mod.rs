//! crates/logging/src/template/mod.rs
//! printf-style template rendering with positional arguments.
//!
//! Templates use `%` directives of the form `%[flags][width][.precision]verb`.
//! Width and precision are either decimal literals or `*`, which takes the
//! value from the next argument. Arguments are consumed left to right, one per
//! directive. Rendering never fails: problems are written into the output as
//! markers so a bad template still produces a readable line.
//!
//! | Problem | Marker |
//! |---|---|
//! | directive without an argument | `%!d(MISSING)` |
//! | verb not valid for the argument | `%!d(str=hello)` |
//! | `%` at the end of the template | `%!(NOVERB)` |
//! | arguments left over | `%!(EXTRA i64=6, str=x)` |
//! | width above one million, or a `*` width that is not an integer | `%!(BADWIDTH)` |
//! | precision above one million, or a `*` precision that is not a non-negative integer | `%!(BADPREC)` |
//!
//! `%v` on floats is the shortest `%g` form, so `1e21` renders as `1e+21`.
//! `%q` escapes the way Go's `strconv.Quote` does for ASCII; outside ASCII,
//! control, whitespace and invisible formatting characters are escaped and
//! everything else is kept as is.

mod arg;


use std::fmt::Write as _;
use std::iter::repeat_n;

pub use arg::Arg;

/// Widths and precisions above this are rejected with a marker.
const COUNT_LIMIT: usize = 1_000_000;

/// Largest precision handed to `std::fmt`; longer float expansions are zero-extended.
const FMT_PRECISION_LIMIT: usize = u16::MAX as usize;

const BAD_WIDTH: &str = "%!(BADWIDTH)";
const BAD_PRECISION: &str = "%!(BADPREC)";

/// Renders `template`, substituting `args` in order.
///
/// # Examples
///
/// ```
/// use logging::template::{Arg, render};
///
/// assert_eq!(render("x=%d", &[Arg::from(5)]), "x=5");
/// assert_eq!(render("%-5s|", &[Arg::from("ab")]), "ab   |");
/// assert_eq!(render("%*d", &[Arg::from(3), Arg::from(7)]), "  7");
/// assert_eq!(render("%d %d", &[Arg::from(1)]), "1 %!d(MISSING)");
/// ```
pub fn render(template: &str, args: &[Arg<'_>]) -> String {
    if !template.contains('%') && args.is_empty() {
        return template.to_owned();
    }

    let mut out = String::with_capacity(template.len() + args.len() * 8);
    let mut next_arg = 0;
    let mut rest = template;

    while let Some(pos) = rest.find('%') {
        out.push_str(&rest[..pos]);

        let (mut spec, remaining) = Spec::parse(&rest[pos + 1..]);
        rest = remaining;
        spec.resolve(args, &mut next_arg, &mut out);

        let Some(verb) = spec.verb else {
            out.push_str("%!(NOVERB)");
            break;
        };

        // A literal percent takes no argument and ignores width and precision.
        if verb == '%' {
            out.push('%');
            continue;
        }

        match args.get(next_arg) {
            Some(arg) => {
                next_arg += 1;
                match format_arg(&spec, verb, arg) {
                    Some((body, zero_pad)) => spec.pad_into(&mut out, &body, zero_pad),
                    None => push_bad_verb(&mut out, verb, arg),
                }
            }
            None => {
                let _ = write!(out, "%!{verb}(MISSING)");
            }
        }
    }
    out.push_str(rest);

    if next_arg < args.len() {
        out.push_str("%!(EXTRA ");
        for (index, arg) in args[next_arg..].iter().enumerate() {
            if index > 0 {
                out.push_str(", ");
            }
            let _ = write!(out, "{}={arg}", arg.type_name());
        }
        out.push(')');
    }

    out
}

/// Width or precision as written in a directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Count {
    Fixed(usize),
    /// `*`: taken from the next argument.
    Star,
    /// A literal above [`COUNT_LIMIT`].
    Oversized,
}

/// How the `0` flag fills a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ZeroPad {
    /// Zeros go between the sign and the digits.
    AfterSign,
    /// Zeros go in front of the whole value.
    Leading,
    /// The value is always padded with spaces.
    Never,
}

/// A parsed `%` directive.
#[derive(Debug, Default, PartialEq)]
struct Spec {
    left_align: bool,
    plus: bool,
    zero: bool,
    width: Option<Count>,
    precision: Option<Count>,
    verb: Option<char>,
}

impl Spec {
    /// Parses a directive from the text following `%` and returns the unparsed tail.
    fn parse(input: &str) -> (Self, &str) {
        let mut spec = Self::default();
        let mut chars = input.char_indices().peekable();

        while let Some(&(_, c)) = chars.peek() {
            match c {
                '-' => spec.left_align = true,
                '+' => spec.plus = true,
                '0' => spec.zero = true,
                _ => break,
            }
            chars.next();
        }

        spec.width = take_count(&mut chars);

        if let Some(&(_, '.')) = chars.peek() {
            chars.next();
            spec.precision = Some(take_count(&mut chars).unwrap_or(Count::Fixed(0)));
        }

        match chars.next() {
            Some((index, verb)) => {
                spec.verb = Some(verb);
                (spec, &input[index + verb.len_utf8()..])
            }
            None => (spec, ""),
        }
    }

    /// Replaces `*` counts with argument values and drops invalid counts,
    /// writing a marker for each one dropped.
    fn resolve(&mut self, args: &[Arg<'_>], next_arg: &mut usize, out: &mut String) {
        if let Some(count) = self.width {
            self.width = match count {
                Count::Fixed(_) => Some(count),
                Count::Star => match star_value(args, next_arg) {
                    Some(value) if value < 0 => {
                        self.left_align = true;
                        Some(Count::Fixed(value.unsigned_abs() as usize))
                    }
                    Some(value) => Some(Count::Fixed(value as usize)),
                    None => None,
                },
                Count::Oversized => None,
            };
            if self.width.is_none() {
                out.push_str(BAD_WIDTH);
            }
        }

        if let Some(count) = self.precision {
            self.precision = match count {
                Count::Fixed(_) => Some(count),
                Count::Star => match star_value(args, next_arg) {
                    Some(value) if value >= 0 => Some(Count::Fixed(value as usize)),
                    _ => None,
                },
                Count::Oversized => None,
            };
            if self.precision.is_none() {
                out.push_str(BAD_PRECISION);
            }
        }
    }

    fn width(&self) -> Option<usize> {
        match self.width {
            Some(Count::Fixed(width)) => Some(width),
            _ => None,
        }
    }

    fn precision(&self) -> Option<usize> {
        match self.precision {
            Some(Count::Fixed(precision)) => Some(precision),
            _ => None,
        }
    }

    fn pad_into(&self, out: &mut String, body: &str, zero_pad: ZeroPad) {
        let len = body.chars().count();
        let fill = self.width().map_or(0, |width| width.saturating_sub(len));

        if fill == 0 {
            out.push_str(body);
        } else if self.left_align {
            out.push_str(body);
            out.extend(repeat_n(' ', fill));
        } else if self.zero && zero_pad == ZeroPad::AfterSign {
            let (sign, digits) = match body.as_bytes().first() {
                Some(b'+' | b'-') => body.split_at(1),
                _ => ("", body),
            };
            out.push_str(sign);
            out.extend(repeat_n('0', fill));
            out.push_str(digits);
        } else if self.zero && zero_pad == ZeroPad::Leading {
            out.extend(repeat_n('0', fill));
            out.push_str(body);
        } else {
            out.extend(repeat_n(' ', fill));
            out.push_str(body);
        }
    }
}

/// Reads a decimal count or `*`. Digits past the limit are still consumed.
fn take_count<I>(chars: &mut std::iter::Peekable<I>) -> Option<Count>
where
    I: Iterator<Item = (usize, char)>,
{
    if let Some(&(_, '*')) = chars.peek() {
        chars.next();
        return Some(Count::Star);
    }

    let mut value: Option<usize> = None;
    let mut oversized = false;
    while let Some(&(_, c)) = chars.peek() {
        let Some(digit) = c.to_digit(10) else { break };
        let next = value.unwrap_or(0) * 10 + digit as usize;
        oversized |= next > COUNT_LIMIT;
        value = Some(next.min(COUNT_LIMIT + 1));
        chars.next();
    }

    if oversized {
        Some(Count::Oversized)
    } else {
        value.map(Count::Fixed)
    }
}

/// Consumes the argument for a `*` count. `None` when it is missing, not an
/// integer, or beyond the limit in either direction.
fn star_value(args: &[Arg<'_>], next_arg: &mut usize) -> Option<i64> {
    let arg = args.get(*next_arg)?;
    *next_arg += 1;
    let value = match arg {
        Arg::Int(value) => *value,
        Arg::Uint(value) => i64::try_from(*value).ok()?,
        _ => return None,
    };
    (value.unsigned_abs() <= COUNT_LIMIT as u64).then_some(value)
}

fn push_bad_verb(out: &mut String, verb: char, arg: &Arg<'_>) {
    let _ = write!(out, "%!{verb}({}={arg})", arg.type_name());
}

/// Formats one argument, or returns `None` when `verb` does not apply to it.
fn format_arg(spec: &Spec, verb: char, arg: &Arg<'_>) -> Option<(String, ZeroPad)> {
    let text = |body: String| Some((body, ZeroPad::Leading));

    match (verb, arg) {
        ('v' | 'd', Arg::Int(value)) => Some(integer(spec, *value < 0, value.unsigned_abs(), 10, false)),
        ('v' | 'd', Arg::Uint(value)) => Some(integer(spec, false, *value, 10, false)),
        ('x' | 'X' | 'o' | 'b', Arg::Int(value)) => {
            Some(integer(spec, *value < 0, value.unsigned_abs(), radix(verb), verb == 'X'))
        }
        ('x' | 'X' | 'o' | 'b', Arg::Uint(value)) => {
            Some(integer(spec, false, *value, radix(verb), verb == 'X'))
        }
        ('v' | 'f' | 'F' | 'e' | 'E' | 'g' | 'G', Arg::Float(value)) => {
            Some(float(spec, verb, *value))
        }

        ('v' | 's', Arg::Str(_) | Arg::Display(_)) => text(truncate(arg.to_string(), spec.precision())),
        ('v', Arg::Bool(_) | Arg::Char(_)) => text(arg.to_string()),
        ('x' | 'X', Arg::Str(value)) => text(hex_bytes(value.as_bytes(), verb == 'X')),

        ('t', Arg::Bool(value)) => text(value.to_string()),
        ('c', Arg::Char(value)) => text(value.to_string()),
        ('c', Arg::Int(value)) => text(code_point(u32::try_from(*value).ok()).to_string()),
        ('c', Arg::Uint(value)) => text(code_point(u32::try_from(*value).ok()).to_string()),
        ('q', Arg::Str(value)) => text(quote(value.chars(), '"')),
        ('q', Arg::Char(value)) => text(quote(std::iter::once(*value), '\'')),

        _ => None,
    }
}

const fn radix(verb: char) -> u32 {
    match verb {
        'o' => 8,
        'b' => 2,
        'x' | 'X' => 16,
        _ => 10,
    }
}

fn code_point(value: Option<u32>) -> char {
    value
        .and_then(char::from_u32)
        .unwrap_or(char::REPLACEMENT_CHARACTER)
}

/// Integer with optional minimum digit count. A precision turns the `0` flag off,
/// and a zero value with precision zero renders as nothing.
fn integer(spec: &Spec, negative: bool, magnitude: u64, radix: u32, upper: bool) -> (String, ZeroPad) {
    let digits = unsigned_digits(magnitude, radix, upper);

    let (digits, zero_pad) = match spec.precision() {
        Some(0) if magnitude == 0 => return (String::new(), ZeroPad::Never),
        Some(precision) => {
            let mut padded = String::with_capacity(precision.max(digits.len()));
            padded.extend(repeat_n('0', precision.saturating_sub(digits.len())));
            padded.push_str(&digits);
            (padded, ZeroPad::Never)
        }
        None => (digits, ZeroPad::AfterSign),
    };

    let body = if negative {
        format!("-{digits}")
    } else if spec.plus {
        format!("+{digits}")
    } else {
        digits
    };
    (body, zero_pad)
}

fn unsigned_digits(value: u64, radix: u32, upper: bool) -> String {
    match (radix, upper) {
        (16, true) => format!("{value:X}"),
        (16, false) => format!("{value:x}"),
        (8, _) => format!("{value:o}"),
        (2, _) => format!("{value:b}"),
        _ => value.to_string(),
    }
}

fn hex_bytes(bytes: &[u8], upper: bool) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        let _ = if upper {
            write!(out, "{byte:02X}")
        } else {
            write!(out, "{byte:02x}")
        };
    }
    out
}

fn truncate(text: String, precision: Option<usize>) -> String {
    match precision {
        Some(limit) if text.chars().count() > limit => text.chars().take(limit).collect(),
        _ => text,
    }
}

/// Quotes `chars` between `delimiter`s with Go-style escapes.
fn quote(chars: impl Iterator<Item = char>, delimiter: char) -> String {
    let mut out = String::new();
    out.push(delimiter);
    for c in chars {
        match c {
            '\x07' => out.push_str("\\a"),
            '\x08' => out.push_str("\\b"),
            '\x0c' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\x0b' => out.push_str("\\v"),
            '\\' => out.push_str("\\\\"),
            c if c == delimiter => {
                out.push('\\');
                out.push(c);
            }
            c if is_printable(c) => out.push(c),
            c if c.is_ascii() => {
                let _ = write!(out, "\\x{:02x}", u32::from(c));
            }
            c if u32::from(c) < 0x1_0000 => {
                let _ = write!(out, "\\u{:04x}", u32::from(c));
            }
            c => {
                let _ = write!(out, "\\U{:08x}", u32::from(c));
            }
        }
    }
    out.push(delimiter);
    out
}

fn is_printable(c: char) -> bool {
    if c.is_ascii() {
        return c == ' ' || c.is_ascii_graphic();
    }
    !(c.is_control()
        || c.is_whitespace()
        || matches!(
            c,
            '\u{ad}' | '\u{200b}'..='\u{200f}' | '\u{202a}'..='\u{202e}' | '\u{2060}'..='\u{2064}' | '\u{feff}'
        ))
}

/// Formats a float for `%v`, `%f`, `%e` or `%g`.
fn float(spec: &Spec, verb: char, value: f64) -> (String, ZeroPad) {
    if value.is_nan() {
        let body = if spec.plus { "+NaN" } else { "NaN" };
        return (body.to_owned(), ZeroPad::Never);
    }
    if value.is_infinite() {
        let body = if value.is_sign_negative() { "-Inf" } else { "+Inf" };
        return (body.to_owned(), ZeroPad::Never);
    }

    let magnitude = value.abs();
    let digits = match verb {
        'f' | 'F' => fixed(magnitude, spec.precision().unwrap_or(6)),
        'e' | 'E' => exponent(magnitude, spec.precision().unwrap_or(6), verb == 'E'),
        _ => general(magnitude, spec.precision(), verb == 'G'),
    };

    let body = if value.is_sign_negative() {
        format!("-{digits}")
    } else if spec.plus {
        format!("+{digits}")
    } else {
        digits
    };
    (body, ZeroPad::AfterSign)
}

/// Shortest `%g` form of `value`, as `%v` prints it.
pub(super) fn shortest(value: f64) -> String {
    float(&Spec::default(), 'v', value).0
}

/// `%f` digits. Every finite `f64` has an exact expansion well within
/// [`FMT_PRECISION_LIMIT`] places, so the remainder is zeros.
fn fixed(magnitude: f64, precision: usize) -> String {
    let shown = precision.min(FMT_PRECISION_LIMIT);
    let mut body = format!("{magnitude:.shown$}");
    body.extend(repeat_n('0', precision - shown));
    body
}

/// Scientific notation with a signed exponent of at least two digits, e.g. `1.500000e+03`.
fn exponent(magnitude: f64, precision: usize, upper: bool) -> String {
    let shown = precision.min(FMT_PRECISION_LIMIT);
    let raw = format!("{magnitude:.shown$e}");
    let (mantissa, exponent) = split_scientific(&raw);

    let mut body = String::with_capacity(precision + 8);
    body.push_str(mantissa);
    body.extend(repeat_n('0', precision - shown));
    push_exponent(&mut body, exponent, upper);
    body
}

/// `%g`: scientific for exponents below -4 or at least the precision (6 when
/// shortest), plain otherwise. Trailing zeros are dropped either way.
fn general(magnitude: f64, precision: Option<usize>, upper: bool) -> String {
    let raw = match precision {
        None => format!("{magnitude:e}"),
        Some(precision) => {
            let places = precision.clamp(1, FMT_PRECISION_LIMIT) - 1;
            format!("{magnitude:.places$e}")
        }
    };
    let (mantissa, exponent) = split_scientific(&raw);

    let mut digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();
    let significant = digits.trim_end_matches('0').len();
    digits.truncate(significant.max(1));

    let count = digits.len() as i64;
    let point = i64::from(exponent) + 1;
    let limit = match precision {
        None => 6,
        Some(precision) => {
            let precision = precision.max(1) as i64;
            if precision > count && count >= point { count } else { precision }
        }
    };

    if exponent < -4 || i64::from(exponent) >= limit {
        let mut body = String::with_capacity(digits.len() + 6);
        body.push_str(&digits[..1]);
        if digits.len() > 1 {
            body.push('.');
            body.push_str(&digits[1..]);
        }
        push_exponent(&mut body, exponent, upper);
        body
    } else if point <= 0 {
        let mut body = String::from("0.");
        body.extend(repeat_n('0', point.unsigned_abs() as usize));
        body.push_str(&digits);
        body
    } else if point >= count {
        let mut body = digits;
        body.extend(repeat_n('0', (point - count) as usize));
        body
    } else {
        let (whole, fraction) = digits.split_at(point as usize);
        format!("{whole}.{fraction}")
    }
}

fn split_scientific(raw: &str) -> (&str, i32) {
    match raw.split_once('e') {
        Some((mantissa, exponent)) => (mantissa, exponent.parse().unwrap_or(0)),
        None => (raw, 0),
    }
}

fn push_exponent(body: &mut String, exponent: i32, upper: bool) {
    let marker = if upper { 'E' } else { 'e' };
    let sign = if exponent < 0 { '-' } else { '+' };
    let _ = write!(body, "{marker}{sign}{:02}", exponent.unsigned_abs());
}
