//! Input validation for form fields.
//!
//! A [`Validatable`] pairs a value with optional constraints. Every constraint
//! that is present must hold; absent constraints are skipped. Length checks
//! only apply to text and range checks only apply to numbers.
//!
//! Text length is measured in UTF-16 code units, the unit browser form
//! fields report. A character outside the Basic Multilingual Plane, such as
//! most emoji, therefore counts as two.

use std::fmt;

/// A raw field value, either text or a number
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Number(f64),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => write!(f, "{}", s),
            Self::Number(n) => write!(f, "{}", n),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i32> for FieldValue {
    fn from(n: i32) -> Self {
        Self::Number(f64::from(n))
    }
}

/// A value together with the constraints it must satisfy
#[derive(Debug, Clone, PartialEq)]
pub struct Validatable {
    pub value: FieldValue,
    pub required: bool,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl Validatable {
    pub fn new(value: impl Into<FieldValue>) -> Self {
        Self {
            value: value.into(),
            required: false,
            min_length: None,
            max_length: None,
            min: None,
            max: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn min_length(mut self, len: usize) -> Self {
        self.min_length = Some(len);
        self
    }

    pub fn max_length(mut self, len: usize) -> Self {
        self.max_length = Some(len);
        self
    }

    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    /// Shorthand for [`validate`]
    pub fn is_valid(&self) -> bool {
        validate(self)
    }
}

/// Checks a value against all of its constraints. Lengths are UTF-16 code
/// units, not `char`s.
pub fn validate(input: &Validatable) -> bool {
    let mut is_valid = true;

    if input.required {
        is_valid &= !input.value.to_string().trim().is_empty();
    }

    match &input.value {
        FieldValue::Text(text) => {
            let len = text.encode_utf16().count();
            if let Some(min_length) = input.min_length {
                is_valid &= len >= min_length;
            }
            if let Some(max_length) = input.max_length {
                is_valid &= len <= max_length;
            }
        }
        FieldValue::Number(n) => {
            // NaN fails both comparisons
            if let Some(min) = input.min {
                is_valid &= *n >= min;
            }
            if let Some(max) = input.max {
                is_valid &= *n <= max;
            }
        }
    }

    is_valid
}
