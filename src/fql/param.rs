//! Values bound to FQL placeholders.

use std::fmt;

/// A single scalar value bound to an FQL placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum FqlValue {
    /// Bound to `%s`
    String(String),
    /// Bound to `%d`
    Int(i64),
    /// Bound to `%f`
    Float(f64),
}

impl FqlValue {
    /// The value wrapped in single quotes, as substituted into a query.
    ///
    /// Embedded quotes are not escaped.
    pub fn escape(&self) -> String {
        format!("'{}'", self)
    }
}

impl fmt::Display for FqlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FqlValue::String(s) => f.write_str(s),
            FqlValue::Int(i) => write!(f, "{}", i),
            FqlValue::Float(x) => write!(f, "{:.6}", x),
        }
    }
}

impl From<&str> for FqlValue {
    fn from(s: &str) -> Self {
        FqlValue::String(s.to_string())
    }
}

impl From<String> for FqlValue {
    fn from(s: String) -> Self {
        FqlValue::String(s)
    }
}

impl From<&String> for FqlValue {
    fn from(s: &String) -> Self {
        FqlValue::String(s.clone())
    }
}

impl From<i32> for FqlValue {
    fn from(i: i32) -> Self {
        FqlValue::Int(i.into())
    }
}

impl From<u32> for FqlValue {
    fn from(i: u32) -> Self {
        FqlValue::Int(i.into())
    }
}

impl From<i64> for FqlValue {
    fn from(i: i64) -> Self {
        FqlValue::Int(i)
    }
}

impl From<f32> for FqlValue {
    fn from(x: f32) -> Self {
        FqlValue::Float(x.into())
    }
}

impl From<f64> for FqlValue {
    fn from(x: f64) -> Self {
        FqlValue::Float(x)
    }
}

/// An argument bound to one placeholder: a scalar or an array of scalars.
#[derive(Debug, Clone, PartialEq)]
pub enum FqlParam {
    /// Bound to `%s`, `%d` or `%f`
    Scalar(FqlValue),
    /// Bound to `%S`, `%D` or `%F`
    Array(Vec<FqlValue>),
}

impl FqlParam {
    /// Number of values; `1` for scalars.
    pub fn len(&self) -> usize {
        match self {
            FqlParam::Scalar(_) => 1,
            FqlParam::Array(values) => values.len(),
        }
    }

    /// Returns `true` for an empty array.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` for the array form.
    pub fn is_array(&self) -> bool {
        matches!(self, FqlParam::Array(_))
    }

    /// The parameter as substituted into a query: a quoted scalar, or the
    /// quoted array elements joined by `, `.
    pub fn escape(&self) -> String {
        match self {
            FqlParam::Scalar(value) => value.escape(),
            FqlParam::Array(values) => escape_all(values),
        }
    }
}

pub(crate) fn escape_all(values: &[FqlValue]) -> String {
    values
        .iter()
        .map(FqlValue::escape)
        .collect::<Vec<_>>()
        .join(", ")
}

impl From<FqlValue> for FqlParam {
    fn from(value: FqlValue) -> Self {
        FqlParam::Scalar(value)
    }
}

impl From<Vec<FqlValue>> for FqlParam {
    fn from(values: Vec<FqlValue>) -> Self {
        FqlParam::Array(values)
    }
}

macro_rules! impl_param_from {
    ($($t:ty),* $(,)?) => {
        $(
            impl From<$t> for FqlParam {
                fn from(value: $t) -> Self {
                    FqlParam::Scalar(value.into())
                }
            }

            impl From<Vec<$t>> for FqlParam {
                fn from(values: Vec<$t>) -> Self {
                    FqlParam::Array(values.into_iter().map(Into::into).collect())
                }
            }

            impl From<&[$t]> for FqlParam {
                fn from(values: &[$t]) -> Self {
                    FqlParam::Array(values.iter().cloned().map(Into::into).collect())
                }
            }

            impl<const N: usize> From<[$t; N]> for FqlParam {
                fn from(values: [$t; N]) -> Self {
                    FqlParam::Array(values.into_iter().map(Into::into).collect())
                }
            }
        )*
    };
}

impl_param_from!(&str, String, i32, u32, i64, f32, f64);
