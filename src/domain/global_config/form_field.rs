use std::fmt;
use std::str::FromStr;

/// Raised when a numeric form field holds text that does not parse. The
/// field's last valid value is used instead; nothing is aborted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoercionWarning {
    pub field: &'static str,
    pub raw: String,
    pub fallback: String,
}

impl fmt::Display for CoercionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' is not a valid value for {}; using {}", self.raw, self.field, self.fallback)
    }
}

/// Value types a numeric form field can hold.
pub trait FormValue: FromStr + fmt::Display + Copy {
    fn is_acceptable(&self) -> bool {
        true
    }
}

impl FormValue for i64 {}
impl FormValue for u32 {}

impl FormValue for f64 {
    fn is_acceptable(&self) -> bool {
        self.is_finite()
    }
}

/// A numeric form input: the text as typed plus the last value that parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct FormField<T> {
    name: &'static str,
    raw: String,
    value: T,
}

impl<T: FormValue> FormField<T> {
    pub fn new(name: &'static str, value: T) -> Self {
        Self { name, raw: value.to_string(), value }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Last value that parsed successfully.
    pub fn value(&self) -> T {
        self.value
    }

    pub fn is_valid(&self) -> bool {
        Self::parse_strict(&self.raw).is_some()
    }

    pub fn set(&mut self, value: T) {
        self.raw = value.to_string();
        self.value = value;
    }

    /// Stores the typed text. A parse failure keeps the previous value and
    /// reports a warning.
    pub fn edit(&mut self, raw: impl Into<String>) -> Option<CoercionWarning> {
        self.raw = raw.into();
        match Self::parse_strict(&self.raw) {
            Some(value) => {
                self.value = value;
                None
            }
            None => self.warning(),
        }
    }

    /// The value to submit, plus a warning when the current text is unusable.
    pub fn resolve(&self) -> (T, Option<CoercionWarning>) {
        match Self::parse_strict(&self.raw) {
            Some(value) => (value, None),
            None => (self.value, self.warning()),
        }
    }

    fn warning(&self) -> Option<CoercionWarning> {
        Some(CoercionWarning { field: self.name, raw: self.raw.clone(), fallback: self.value.to_string() })
    }

    // Whitespace around the number is tolerated, trailing garbage is not.
    fn parse_strict(raw: &str) -> Option<T> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        trimmed.parse::<T>().ok().filter(T::is_acceptable)
    }
}
