//! Typed parameter values and their wire rendering.
//!
//! A value renders to zero or more strings. Zero means "not set": the
//! parameter is left out of the request entirely. Null, empty strings,
//! non-positive integers, empty lists and the epoch date all render to
//! nothing, so a page number of 0 can never be sent.

use chrono::{DateTime, SecondsFormat, Utc};

/// How a list-valued parameter is written to the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListStyle {
    /// One parameter whose value is the comma-joined list.
    #[default]
    CommaJoined,
    /// One parameter per element, all sharing the same name.
    Repeated,
}

/// Where a parameter lands in the request. Only date-times render
/// differently between the two.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Placement {
    Query,
    Header,
}

/// A query or header parameter value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Null,
    Str(String),
    Int(i64),
    Bool(bool),
    DateTime(DateTime<Utc>),
    /// Wire string of an enumeration variant.
    Enum(&'static str),
    List(Vec<String>, ListStyle),
}

impl ParamValue {
    /// Switch a list value to one-entry-per-element encoding.
    #[must_use]
    pub fn repeated(self) -> Self {
        match self {
            ParamValue::List(items, _) => ParamValue::List(items, ListStyle::Repeated),
            other => other,
        }
    }

    pub(crate) fn render(&self, placement: Placement) -> Vec<String> {
        match self {
            ParamValue::Null => Vec::new(),
            ParamValue::Str(value) if value.is_empty() => Vec::new(),
            ParamValue::Str(value) => vec![value.clone()],
            ParamValue::Int(value) if *value <= 0 => Vec::new(),
            ParamValue::Int(value) => vec![value.to_string()],
            ParamValue::Bool(value) => vec![value.to_string()],
            ParamValue::DateTime(value) if is_unset_date(value) => Vec::new(),
            ParamValue::DateTime(value) => vec![match placement {
                Placement::Query => value.to_rfc3339_opts(SecondsFormat::Secs, true),
                Placement::Header => value.format("%a, %d %b %Y %H:%M:%S GMT").to_string(),
            }],
            ParamValue::Enum(wire) => vec![(*wire).to_string()],
            ParamValue::List(items, style) => {
                let items: Vec<String> = items.iter().filter(|item| !item.is_empty()).cloned().collect();
                match style {
                    _ if items.is_empty() => Vec::new(),
                    ListStyle::CommaJoined => vec![items.join(",")],
                    ListStyle::Repeated => items,
                }
            }
        }
    }
}

fn is_unset_date(value: &DateTime<Utc>) -> bool {
    (value.timestamp() == 0 && value.timestamp_subsec_nanos() == 0) || *value == DateTime::<Utc>::MIN_UTC
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Str(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Str(value)
    }
}

impl From<&String> for ParamValue {
    fn from(value: &String) -> Self {
        ParamValue::Str(value.clone())
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        ParamValue::Int(i64::from(value))
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Int(value)
    }
}

impl From<u32> for ParamValue {
    fn from(value: u32) -> Self {
        ParamValue::Int(i64::from(value))
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Bool(value)
    }
}

impl From<DateTime<Utc>> for ParamValue {
    fn from(value: DateTime<Utc>) -> Self {
        ParamValue::DateTime(value)
    }
}

impl From<&[String]> for ParamValue {
    fn from(values: &[String]) -> Self {
        ParamValue::List(values.to_vec(), ListStyle::CommaJoined)
    }
}

impl From<&[&str]> for ParamValue {
    fn from(values: &[&str]) -> Self {
        ParamValue::List(values.iter().map(|v| (*v).to_string()).collect(), ListStyle::CommaJoined)
    }
}

impl From<Vec<String>> for ParamValue {
    fn from(values: Vec<String>) -> Self {
        ParamValue::List(values, ListStyle::CommaJoined)
    }
}

impl<T: Into<ParamValue>> From<Option<T>> for ParamValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(ParamValue::Null, Into::into)
    }
}

/// An enumeration with a fixed wire string per variant.
pub trait WireEnum: Copy {
    fn wire_value(self) -> &'static str;
}

/// Declare an enumeration together with its variant → wire string table.
///
/// The table is an exhaustive `match`, so every variant has a mapping. The
/// same strings drive serde, `Display`, `FromStr` and parameter rendering.
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($(#[$vmeta:meta])* $variant:ident => $wire:literal,)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $($(#[$vmeta])* #[serde(rename = $wire)] $variant,)+
        }

        impl $crate::params::WireEnum for $name {
            fn wire_value(self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str($crate::params::WireEnum::wire_value(*self))
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::error::ApiError;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                match value {
                    $($wire => Ok($name::$variant),)+
                    other => Err($crate::error::ApiError::Configuration(format!(
                        "unknown {} value `{other}`",
                        stringify!($name)
                    ))),
                }
            }
        }

        impl From<$name> for $crate::params::ParamValue {
            fn from(value: $name) -> Self {
                $crate::params::ParamValue::Enum($crate::params::WireEnum::wire_value(value))
            }
        }

        impl From<&[$name]> for $crate::params::ParamValue {
            fn from(values: &[$name]) -> Self {
                $crate::params::ParamValue::List(
                    values
                        .iter()
                        .map(|v| $crate::params::WireEnum::wire_value(*v).to_string())
                        .collect(),
                    $crate::params::ListStyle::CommaJoined,
                )
            }
        }
    };
}

pub(crate) use wire_enum;
