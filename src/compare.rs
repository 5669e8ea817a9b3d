//! Equality and ordering between [`Value`]s.
//!
//! Three relations are provided:
//! - [`Value::strict_eq`]: same type and same value, maps pairwise in order.
//! - [`Value::loose_eq`]: type-juggling equality (numeric strings compare as
//!   numbers, `null`/`bool` compare by truthiness).
//! - [`Value::compare`]: the standard total-ish ordering used by value and key
//!   sorts.
//!
//! [`natural_cmp`] implements "natural order" string comparison.

use std::cmp::Ordering;

use crate::ordered_map::OrderedMap;
use crate::value::{Number, Value};

#[derive(Debug, Clone, Copy)]
enum Numeric {
    Int(i128),
    Float(f64),
}

impl From<Number> for Numeric {
    fn from(n: Number) -> Self {
        match n.as_i128() {
            Some(i) => Numeric::Int(i),
            None => Numeric::Float(n.as_f64()),
        }
    }
}

fn cmp_numeric(a: Numeric, b: Numeric) -> Ordering {
    match (a, b) {
        (Numeric::Int(x), Numeric::Int(y)) => x.cmp(&y),
        (Numeric::Int(x), Numeric::Float(y)) => (x as f64).partial_cmp(&y).unwrap_or(Ordering::Equal),
        (Numeric::Float(x), Numeric::Int(y)) => x.partial_cmp(&(y as f64)).unwrap_or(Ordering::Equal),
        (Numeric::Float(x), Numeric::Float(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
    }
}

/// Parse a numeric string: optional surrounding whitespace, optional sign,
/// digits with an optional fraction and exponent.
fn parse_numeric(s: &str) -> Option<Numeric> {
    let t = s.trim_matches(|c: char| c.is_ascii_whitespace());
    if t.is_empty() || !t.bytes().any(|b| b.is_ascii_digit()) {
        return None;
    }
    if !t
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E'))
    {
        return None;
    }
    if let Ok(i) = t.parse::<i64>() {
        return Some(Numeric::Int(i as i128));
    }
    t.parse::<f64>().ok().map(Numeric::Float)
}

fn compare_strings(a: &str, b: &str) -> Ordering {
    match (parse_numeric(a), parse_numeric(b)) {
        (Some(x), Some(y)) => cmp_numeric(x, y),
        _ => a.as_bytes().cmp(b.as_bytes()),
    }
}

fn compare_number_str(n: Number, s: &str) -> Ordering {
    match parse_numeric(s) {
        Some(parsed) => cmp_numeric(n.into(), parsed),
        None => n.to_string().as_bytes().cmp(s.as_bytes()),
    }
}

fn compare_maps(a: &OrderedMap, b: &OrderedMap) -> Ordering {
    match a.len().cmp(&b.len()) {
        Ordering::Equal => {}
        ord => return ord,
    }
    for (key, left) in a.iter() {
        let Some(right) = b.get(key) else {
            // uncomparable: a key of `a` is missing from `b`
            return Ordering::Greater;
        };
        match left.compare(right) {
            Ordering::Equal => {}
            ord => return ord,
        }
    }
    Ordering::Equal
}

impl Value {
    /// Truthiness: `null`, `false`, `0`, `0.0`, `""`, `"0"` and empty maps are
    /// falsy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => match n.as_i128() {
                Some(i) => i != 0,
                None => n.as_f64() != 0.0,
            },
            Value::Str(s) => !(s.is_empty() || s == "0"),
            Value::Map(m) => !m.is_empty(),
        }
    }

    /// String conversion used by natural sorting and number/string
    /// comparison.
    pub fn to_text(&self) -> String {
        match self {
            Value::Null | Value::Bool(false) => String::new(),
            Value::Bool(true) => "1".to_string(),
            Value::Number(n) => n.to_string(),
            Value::Str(s) => s.to_string(),
            Value::Map(_) => "Array".to_string(),
        }
    }

    /// Standard ordering between two values of any type.
    pub fn compare(&self, other: &Value) -> Ordering {
        match (self, other) {
            (Value::Str(a), Value::Str(b)) => compare_strings(a, b),
            (Value::Null, Value::Str(b)) => compare_strings("", b),
            (Value::Str(a), Value::Null) => compare_strings(a, ""),
            (Value::Bool(_), _) | (_, Value::Bool(_)) | (Value::Null, _) | (_, Value::Null) => {
                self.is_truthy().cmp(&other.is_truthy())
            }
            (Value::Number(a), Value::Number(b)) => cmp_numeric((*a).into(), (*b).into()),
            (Value::Number(a), Value::Str(b)) => compare_number_str(*a, b),
            (Value::Str(a), Value::Number(b)) => compare_number_str(*b, a).reverse(),
            (Value::Map(a), Value::Map(b)) => compare_maps(a, b),
            (Value::Map(_), _) => Ordering::Greater,
            (_, Value::Map(_)) => Ordering::Less,
        }
    }

    /// Type-juggling equality.
    pub fn loose_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Str(a), Value::Str(b)) => match (parse_numeric(a), parse_numeric(b)) {
                (Some(x), Some(y)) => cmp_numeric(x, y) == Ordering::Equal,
                _ => a == b,
            },
            (Value::Number(Number::F64(f)), _) | (_, Value::Number(Number::F64(f)))
                if f.is_nan() =>
            {
                false
            }
            (Value::Map(a), Value::Map(b)) => {
                a.len() == b.len()
                    && a.iter()
                        .all(|(k, v)| b.get(k).is_some_and(|other| v.loose_eq(other)))
            }
            _ => self.compare(other) == Ordering::Equal,
        }
    }

    /// Identity-style equality: same type and value. Integers never equal
    /// floats; maps must match pairwise in order.
    pub fn strict_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => match (a.as_i128(), b.as_i128()) {
                (Some(x), Some(y)) => x == y,
                (None, None) => a.as_f64() == b.as_f64(),
                _ => false,
            },
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => {
                a.len() == b.len()
                    && a.iter()
                        .zip(b.iter())
                        .all(|((ka, va), (kb, vb))| ka == kb && va.strict_eq(vb))
            }
            _ => false,
        }
    }

    /// `strict_eq` when `strict`, otherwise `loose_eq`.
    #[inline]
    pub fn matches(&self, other: &Value, strict: bool) -> bool {
        if strict {
            self.strict_eq(other)
        } else {
            self.loose_eq(other)
        }
    }
}

// ─── Natural order ──────────────────────────────────────────────────────────

/// Compare two strings in "natural order": digit runs compare by numeric
/// magnitude, so `img2` sorts before `img12`. Leading whitespace of each chunk
/// is ignored.
pub fn natural_cmp(a: &str, b: &str, case_insensitive: bool) -> Ordering {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let (mut i, mut j) = (0usize, 0usize);

    loop {
        while i < a.len() && a[i].is_ascii_whitespace() {
            i += 1;
        }
        while j < b.len() && b[j].is_ascii_whitespace() {
            j += 1;
        }
        match (i < a.len(), j < b.len()) {
            (false, false) => return Ordering::Equal,
            (false, true) => return Ordering::Less,
            (true, false) => return Ordering::Greater,
            (true, true) => {}
        }

        if a[i].is_ascii_digit() && b[j].is_ascii_digit() {
            let (si, sj) = (i, j);
            while i < a.len() && a[i].is_ascii_digit() {
                i += 1;
            }
            while j < b.len() && b[j].is_ascii_digit() {
                j += 1;
            }
            match compare_digit_runs(&a[si..i], &b[sj..j]) {
                Ordering::Equal => continue,
                ord => return ord,
            }
        }

        let (ca, cb) = if case_insensitive {
            (a[i].to_ascii_lowercase(), b[j].to_ascii_lowercase())
        } else {
            (a[i], b[j])
        };
        match ca.cmp(&cb) {
            Ordering::Equal => {
                i += 1;
                j += 1;
            }
            ord => return ord,
        }
    }
}

/// Runs with a leading zero compare left-aligned (as fractions), all others
/// right-aligned (longer run is larger).
fn compare_digit_runs(x: &[u8], y: &[u8]) -> Ordering {
    if x[0] == b'0' || y[0] == b'0' {
        x.cmp(y)
    } else {
        x.len().cmp(&y.len()).then_with(|| x.cmp(y))
    }
}
