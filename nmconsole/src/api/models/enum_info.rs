//! Human-readable descriptors for NetworkManager enumerations.
//!
//! Every enumeration in this crate can describe itself through
//! [`Enum::info`]. Unknown raw values are always representable; they only
//! fail when a caller checks the descriptor's [`Level`], which is how operator
//! input gets rejected while data read back from NetworkManager never does.

use serde::Serialize;
use std::borrow::Cow;
use std::fmt::{self, Display, Formatter};

use crate::api::models::NmError;

/// Severity attached to an [`EnumInfo`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    /// No particular severity.
    #[default]
    #[serde(rename = "")]
    None,
    Info,
    Success,
    Warning,
    /// The value is unrecognized or invalid.
    Error,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::None => "",
            Level::Info => "info",
            Level::Success => "success",
            Level::Warning => "warning",
            Level::Error => "error",
        }
    }
}

impl Display for Level {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Short label, longer description and severity of an enumeration value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EnumInfo {
    pub short: Cow<'static, str>,
    pub details: Cow<'static, str>,
    pub level: Level,
}

impl EnumInfo {
    pub(crate) const fn new(short: &'static str, details: &'static str, level: Level) -> Self {
        Self {
            short: Cow::Borrowed(short),
            details: Cow::Borrowed(details),
            level,
        }
    }

    /// Descriptor for a value the lookup table does not know.
    pub(crate) fn unknown(details: String) -> Self {
        Self {
            short: Cow::Borrowed("unknown"),
            details: Cow::Owned(details),
            level: Level::Error,
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == Level::Error
    }
}

/// An enumeration that can describe its values.
pub trait Enum {
    fn info(&self) -> EnumInfo;

    /// Fails with the descriptor's details if the value is not acceptable.
    fn check(&self) -> Result<(), NmError> {
        let info = self.info();
        if info.is_error() {
            return Err(NmError::InvalidEnum(info.details.into_owned()));
        }
        Ok(())
    }
}

/// A string-valued enumeration with a closed set of known values.
pub trait StringEnum: Enum + Sized {
    /// Raw representations of every known value, in canonical order.
    const KNOWN: &'static [&'static str];

    fn from_raw(raw: &str) -> Self;

    fn as_str(&self) -> &str;
}

/// Ordered set of string enumeration values built from raw strings.
///
/// A set containing every known value is equivalent to an empty set:
/// NetworkManager reads both as "no restriction".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumSet<T>(Vec<T>);

impl<T> Default for EnumSet<T> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<T: StringEnum> EnumSet<T> {
    pub fn new<I, S>(raw: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(raw.into_iter().map(|s| T::from_raw(s.as_ref())).collect())
    }

    /// Set of every known value.
    pub fn all() -> Self {
        Self::new(T::KNOWN)
    }

    /// Fails on the first member whose descriptor is an error.
    pub fn check_invalid(&self) -> Result<(), NmError> {
        self.0.iter().try_for_each(Enum::check)
    }

    /// Whether every known value appears in the set.
    pub fn covers_all_known(&self) -> bool {
        T::KNOWN
            .iter()
            .all(|known| self.0.iter().any(|v| v.as_str() == *known))
    }

    /// Collapses a set covering every known value into the empty set.
    pub fn normalized(self) -> Self {
        if self.covers_all_known() {
            Self::default()
        } else {
            self
        }
    }

    pub fn strings(&self) -> Vec<String> {
        self.0.iter().map(|v| v.as_str().to_string()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<T: StringEnum> Serialize for EnumSet<T> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.iter().map(StringEnum::as_str))
    }
}

impl<T: StringEnum> Display for EnumSet<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.strings().join(","))
    }
}

/// Serializes a string enumeration through its raw representation.
pub(crate) fn serialize_raw<T: StringEnum, S: serde::Serializer>(
    value: &T,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(value.as_str())
}
