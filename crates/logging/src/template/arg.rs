use std::borrow::Cow;
use std::fmt;

/// A positional argument substituted into a template by [`render`](super::render).
///
/// The variant decides which verbs accept the value: `%d` wants an integer,
/// `%s` a string or [`Display`](Arg::Display) value, `%f` a float and so on.
/// Conversions exist for the primitive numeric types, `bool`, `char`, `&str`,
/// `String` and `&String`, so callers normally write `Arg::from(value)` or use
/// the logging macros, which do it for them.
#[derive(Clone)]
pub enum Arg<'a> {
    /// Signed integer.
    Int(i64),
    /// Unsigned integer.
    Uint(u64),
    /// Floating-point number.
    Float(f64),
    /// Boolean.
    Bool(bool),
    /// Unicode scalar value.
    Char(char),
    /// Borrowed or owned text.
    Str(Cow<'a, str>),
    /// Any other value, rendered through its [`fmt::Display`] implementation.
    Display(&'a dyn fmt::Display),
}

impl<'a> Arg<'a> {
    /// Wraps a value that only implements [`fmt::Display`].
    pub fn display(value: &'a dyn fmt::Display) -> Self {
        Self::Display(value)
    }

    /// Name of the argument's kind as it appears in error markers.
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Int(_) => "i64",
            Self::Uint(_) => "u64",
            Self::Float(_) => "f64",
            Self::Bool(_) => "bool",
            Self::Char(_) => "char",
            Self::Str(_) => "str",
            Self::Display(_) => "display",
        }
    }
}

impl fmt::Display for Arg<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(value) => fmt::Display::fmt(value, f),
            Self::Uint(value) => fmt::Display::fmt(value, f),
            Self::Float(value) => f.write_str(&super::shortest(*value)),
            Self::Bool(value) => fmt::Display::fmt(value, f),
            Self::Char(value) => fmt::Display::fmt(value, f),
            Self::Str(value) => f.write_str(value),
            Self::Display(value) => value.fmt(f),
        }
    }
}

impl fmt::Debug for Arg<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({self})", self.type_name())
    }
}

macro_rules! arg_from {
    ($variant:ident as $target:ty: $($source:ty),+) => {
        $(
            impl From<$source> for Arg<'_> {
                fn from(value: $source) -> Self {
                    Self::$variant(<$target>::from(value))
                }
            }
        )+
    };
}

arg_from!(Int as i64: i8, i16, i32, i64);
arg_from!(Uint as u64: u8, u16, u32, u64);
arg_from!(Float as f64: f32, f64);

impl From<isize> for Arg<'_> {
    fn from(value: isize) -> Self {
        // isize is at most 64 bits wide on every supported target.
        Self::Int(value as i64)
    }
}

impl From<usize> for Arg<'_> {
    fn from(value: usize) -> Self {
        Self::Uint(value as u64)
    }
}

impl From<bool> for Arg<'_> {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<char> for Arg<'_> {
    fn from(value: char) -> Self {
        Self::Char(value)
    }
}

impl<'a> From<&'a str> for Arg<'a> {
    fn from(value: &'a str) -> Self {
        Self::Str(Cow::Borrowed(value))
    }
}

impl<'a> From<&'a String> for Arg<'a> {
    fn from(value: &'a String) -> Self {
        Self::Str(Cow::Borrowed(value.as_str()))
    }
}

impl From<String> for Arg<'_> {
    fn from(value: String) -> Self {
        Self::Str(Cow::Owned(value))
    }
}

impl<'a> From<Cow<'a, str>> for Arg<'a> {
    fn from(value: Cow<'a, str>) -> Self {
        Self::Str(value)
    }
}

impl<'a> From<&'a dyn fmt::Display> for Arg<'a> {
    fn from(value: &'a dyn fmt::Display) -> Self {
        Self::Display(value)
    }
}
