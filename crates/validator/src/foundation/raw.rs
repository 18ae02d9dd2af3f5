//! Loosely typed field values.
//!
//! Form layers hand the engine whatever the widget produced: a string, a
//! number, `null`, or an array of those. [`Raw`] is a borrowed view over all
//! of these shapes and [`AsRaw`] converts Rust and `serde_json` values into
//! it, so every predicate and rule can accept `&str`, `u16`, `Vec<String>` or
//! a `serde_json::Value` alike.

use std::borrow::Cow;

use serde_json::Value;

// ============================================================================
// RAW VALUE VIEW
// ============================================================================

/// Borrowed view of a field value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Raw<'a> {
    /// `null` / `None` / no value supplied.
    Missing,
    /// A string, untrimmed.
    Text(&'a str),
    /// Any numeric value.
    Number(f64),
    /// A boolean.
    Bool(bool),
    /// A one-dimensional list of values.
    List(RawList<'a>),
    /// A JSON object; never valid for any field kind.
    Object,
}

impl<'a> Raw<'a> {
    /// `true` for an absent value or the exact empty string.
    ///
    /// Whitespace-only text is not empty: it is validated and then fails
    /// the trimmed shape check.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Raw::Missing | Raw::Text(""))
    }

    /// The string payload, only for [`Raw::Text`].
    #[must_use]
    pub fn as_text(&self) -> Option<&'a str> {
        match *self {
            Raw::Text(text) => Some(text),
            _ => None,
        }
    }

    /// The list payload, only for [`Raw::List`].
    #[must_use]
    pub fn as_list(&self) -> Option<RawList<'a>> {
        match *self {
            Raw::List(list) => Some(list),
            _ => None,
        }
    }

    /// Numeric coercion the way the form layer's `Number()` does it: numbers
    /// as-is; trimmed text as a decimal float (sign, fraction and exponent
    /// allowed), a `0x` / `0o` / `0b` integer, or `Infinity`. Everything else,
    /// including blank text, is not a number.
    ///
    /// The result may be non-finite (`"Infinity"`, `"1e999"`); callers decide.
    #[must_use]
    pub fn to_number(&self) -> Option<f64> {
        match *self {
            Raw::Number(n) => Some(n),
            Raw::Text(text) => parse_number(text.trim()),
            _ => None,
        }
    }

    /// Textual rendering used for list elements and in messages.
    #[must_use]
    pub fn render(&self) -> Cow<'a, str> {
        match *self {
            Raw::Missing => Cow::Borrowed("null"),
            Raw::Text(text) => Cow::Borrowed(text),
            Raw::Number(n) => Cow::Owned(render_number(n)),
            Raw::Bool(b) => Cow::Borrowed(if b { "true" } else { "false" }),
            Raw::List(list) => Cow::Owned(
                list.iter()
                    .map(|item| item.render().into_owned())
                    .collect::<Vec<_>>()
                    .join(","),
            ),
            Raw::Object => Cow::Borrowed("[object Object]"),
        }
    }

    /// Short type name for diagnostics.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Raw::Missing => "null",
            Raw::Text(_) => "string",
            Raw::Number(_) => "number",
            Raw::Bool(_) => "boolean",
            Raw::List(_) => "array",
            Raw::Object => "object",
        }
    }
}

// ============================================================================
// NUMBER TEXT
// ============================================================================

fn parse_number(text: &str) -> Option<f64> {
    if text.is_empty() {
        return None;
    }
    let prefixed = |radix: u32, digits: &str| {
        if digits.is_empty() {
            return None;
        }
        digits.chars().try_fold(0.0_f64, |acc, c| {
            c.to_digit(radix).map(|d| acc * f64::from(radix) + f64::from(d))
        })
    };
    match text.get(..2) {
        Some("0x" | "0X") => return prefixed(16, &text[2..]),
        Some("0o" | "0O") => return prefixed(8, &text[2..]),
        Some("0b" | "0B") => return prefixed(2, &text[2..]),
        _ => {}
    }
    match text {
        "Infinity" | "+Infinity" => return Some(f64::INFINITY),
        "-Infinity" => return Some(f64::NEG_INFINITY),
        _ => {}
    }
    // `str::parse::<f64>` also takes `inf` and `NaN`; `Number()` does not.
    if text
        .bytes()
        .any(|b| b.is_ascii_alphabetic() && !matches!(b, b'e' | b'E'))
    {
        return None;
    }
    text.parse::<f64>().ok()
}

/// Shortest round-trip form, switching to exponent notation outside
/// `1e-6..1e21` the way the form layer prints numbers.
fn render_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if n == 0.0 {
        return "0".to_string();
    }
    let magnitude = n.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return n.to_string();
    }
    let exp = format!("{n:e}");
    match exp.split_once('e') {
        Some((mantissa, power)) if !power.starts_with('-') => format!("{mantissa}e+{power}"),
        _ => exp,
    }
}

// ============================================================================
// RAW LIST
// ============================================================================

/// Borrowed one-dimensional list, typed by its backing slice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawList<'a> {
    Json(&'a [Value]),
    Str(&'a [&'a str]),
    String(&'a [String]),
    U16(&'a [u16]),
    I32(&'a [i32]),
    I64(&'a [i64]),
    U32(&'a [u32]),
    U64(&'a [u64]),
    F64(&'a [f64]),
}

impl<'a> RawList<'a> {
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            RawList::Json(s) => s.len(),
            RawList::Str(s) => s.len(),
            RawList::String(s) => s.len(),
            RawList::U16(s) => s.len(),
            RawList::I32(s) => s.len(),
            RawList::I64(s) => s.len(),
            RawList::U32(s) => s.len(),
            RawList::U64(s) => s.len(),
            RawList::F64(s) => s.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Element at zero-based `index`, or [`Raw::Missing`] past the end.
    #[must_use]
    pub fn get(&self, index: usize) -> Raw<'a> {
        match *self {
            RawList::Json(s) => s.get(index).map_or(Raw::Missing, AsRaw::as_raw),
            RawList::Str(s) => s.get(index).map_or(Raw::Missing, |t| Raw::Text(*t)),
            RawList::String(s) => s.get(index).map_or(Raw::Missing, |t| Raw::Text(t.as_str())),
            RawList::U16(s) => s.get(index).map_or(Raw::Missing, AsRaw::as_raw),
            RawList::I32(s) => s.get(index).map_or(Raw::Missing, AsRaw::as_raw),
            RawList::I64(s) => s.get(index).map_or(Raw::Missing, AsRaw::as_raw),
            RawList::U32(s) => s.get(index).map_or(Raw::Missing, AsRaw::as_raw),
            RawList::U64(s) => s.get(index).map_or(Raw::Missing, AsRaw::as_raw),
            RawList::F64(s) => s.get(index).map_or(Raw::Missing, AsRaw::as_raw),
        }
    }

    /// Elements in index order.
    pub fn iter(self) -> impl Iterator<Item = Raw<'a>> {
        (0..self.len()).map(move |index| self.get(index))
    }
}

// ============================================================================
// CONVERSION TRAITS
// ============================================================================

/// Types that can be viewed as a field value.
pub trait AsRaw {
    /// Borrows `self` as a [`Raw`] view.
    fn as_raw(&self) -> Raw<'_>;
}

/// Element types that can back a [`RawList`].
pub trait ListElement: Sized {
    /// Wraps a slice of elements.
    fn wrap_slice(slice: &[Self]) -> RawList<'_>;
}

impl AsRaw for Raw<'_> {
    #[inline]
    fn as_raw(&self) -> Raw<'_> {
        *self
    }
}

impl AsRaw for str {
    #[inline]
    fn as_raw(&self) -> Raw<'_> {
        Raw::Text(self)
    }
}

impl AsRaw for String {
    #[inline]
    fn as_raw(&self) -> Raw<'_> {
        Raw::Text(self.as_str())
    }
}

impl AsRaw for Cow<'_, str> {
    #[inline]
    fn as_raw(&self) -> Raw<'_> {
        Raw::Text(self.as_ref())
    }
}

impl AsRaw for bool {
    #[inline]
    fn as_raw(&self) -> Raw<'_> {
        Raw::Bool(*self)
    }
}

impl<T: AsRaw + ?Sized> AsRaw for &T {
    #[inline]
    fn as_raw(&self) -> Raw<'_> {
        (**self).as_raw()
    }
}

impl<T: AsRaw> AsRaw for Option<T> {
    #[inline]
    fn as_raw(&self) -> Raw<'_> {
        match self {
            Some(value) => value.as_raw(),
            None => Raw::Missing,
        }
    }
}

impl AsRaw for Value {
    fn as_raw(&self) -> Raw<'_> {
        match self {
            Value::Null => Raw::Missing,
            Value::Bool(b) => Raw::Bool(*b),
            Value::Number(n) => n.as_f64().map_or(Raw::Missing, Raw::Number),
            Value::String(s) => Raw::Text(s.as_str()),
            Value::Array(items) => Raw::List(RawList::Json(items.as_slice())),
            Value::Object(_) => Raw::Object,
        }
    }
}

macro_rules! numeric_as_raw {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl AsRaw for $ty {
                #[inline]
                fn as_raw(&self) -> Raw<'_> {
                    Raw::Number(*self as f64)
                }
            }

            impl ListElement for $ty {
                #[inline]
                fn wrap_slice(slice: &[Self]) -> RawList<'_> {
                    RawList::$variant(slice)
                }
            }
        )*
    };
}

numeric_as_raw! {
    u16 => U16,
    i32 => I32,
    i64 => I64,
    u32 => U32,
    u64 => U64,
}

impl AsRaw for f64 {
    #[inline]
    fn as_raw(&self) -> Raw<'_> {
        Raw::Number(*self)
    }
}

impl ListElement for f64 {
    #[inline]
    fn wrap_slice(slice: &[Self]) -> RawList<'_> {
        RawList::F64(slice)
    }
}

impl ListElement for Value {
    #[inline]
    fn wrap_slice(slice: &[Self]) -> RawList<'_> {
        RawList::Json(slice)
    }
}

impl ListElement for String {
    #[inline]
    fn wrap_slice(slice: &[Self]) -> RawList<'_> {
        RawList::String(slice)
    }
}

impl ListElement for &str {
    #[inline]
    fn wrap_slice(slice: &[Self]) -> RawList<'_> {
        RawList::Str(slice)
    }
}

impl<T: ListElement> AsRaw for [T] {
    #[inline]
    fn as_raw(&self) -> Raw<'_> {
        Raw::List(T::wrap_slice(self))
    }
}

impl<T: ListElement, const N: usize> AsRaw for [T; N] {
    #[inline]
    fn as_raw(&self) -> Raw<'_> {
        Raw::List(T::wrap_slice(self.as_slice()))
    }
}

impl<T: ListElement> AsRaw for Vec<T> {
    #[inline]
    fn as_raw(&self) -> Raw<'_> {
        Raw::List(T::wrap_slice(self.as_slice()))
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scalar_views() {
        assert_eq!("abc".as_raw(), Raw::Text("abc"));
        assert_eq!(8080u16.as_raw(), Raw::Number(8080.0));
        assert_eq!(None::<&str>.as_raw(), Raw::Missing);
        assert_eq!(json!(null).as_raw(), Raw::Missing);
        assert_eq!(json!({"a": 1}).as_raw(), Raw::Object);
    }

    #[test]
    fn test_empty() {
        assert!(Raw::Missing.is_empty());
        assert!(Raw::Text("").is_empty());
        assert!(!Raw::Text("  ").is_empty());
        assert!(!Raw::Number(0.0).is_empty());
    }

    #[test]
    fn test_list_views() {
        let ports = vec![80u16, 443];
        let list = ports.as_raw().as_list().unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list.get(1), Raw::Number(443.0));
        assert_eq!(list.get(2), Raw::Missing);

        let value = json!(["10.0.0.1", 22]);
        let list = value.as_raw().as_list().unwrap();
        assert_eq!(list.iter().collect::<Vec<_>>(), vec![Raw::Text("10.0.0.1"), Raw::Number(22.0)]);

        let names = ["a", "b"];
        assert_eq!(names.as_raw().as_list().unwrap().len(), 2);
    }

    #[test]
    fn test_to_number() {
        assert_eq!(Raw::Text(" 12.5 ").to_number(), Some(12.5));
        assert_eq!(Raw::Text("1e3").to_number(), Some(1000.0));
        assert_eq!(Raw::Text("   ").to_number(), None);
        assert_eq!(Raw::Text("abc").to_number(), None);
        assert_eq!(Raw::Text("inf").to_number(), None);
        assert_eq!(Raw::Text("NaN").to_number(), None);
        assert!(Raw::Text("-Infinity").to_number().is_some_and(|n| !n.is_finite()));
        assert_eq!(Raw::Text("+80").to_number(), Some(80.0));
        assert_eq!(Raw::Text(" 0x50 ").to_number(), Some(80.0));
        assert_eq!(Raw::Text("0b101").to_number(), Some(5.0));
        assert_eq!(Raw::Text("0o17").to_number(), Some(15.0));
        assert_eq!(Raw::Text("0x").to_number(), None);
        assert_eq!(Raw::Text("0x+5").to_number(), None);
        assert_eq!(Raw::Bool(true).to_number(), None);
    }

    #[test]
    fn test_render() {
        assert_eq!(Raw::Number(80.0).render(), "80");
        assert_eq!(Raw::Number(1.5).render(), "1.5");
        assert_eq!(Raw::Number(-0.0).render(), "0");
        assert_eq!(Raw::Number(1e300).render(), "1e+300");
        assert_eq!(Raw::Number(-2.5e21).render(), "-2.5e+21");
        assert_eq!(Raw::Number(1e20).render(), "100000000000000000000");
        assert_eq!(Raw::Number(1.5e-7).render(), "1.5e-7");
        assert_eq!(Raw::Number(f64::INFINITY).render(), "Infinity");
        assert_eq!(json!([1, "a"]).as_raw().render(), "1,a");
        assert_eq!(Raw::Missing.render(), "null");
    }
}
