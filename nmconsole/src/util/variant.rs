//! Helpers for reading typed values out of settings dictionaries.

use std::collections::HashMap;
use zvariant::{OwnedValue, Value};

use crate::Result;
use crate::api::models::NmError;

/// One settings section, as in `a{sv}`.
pub type RawSection = HashMap<String, OwnedValue>;

/// All sections of a connection profile, as in `a{sa{sv}}`.
pub type RawSettings = HashMap<String, RawSection>;

/// Deep copy of a settings dictionary.
pub fn clone_settings(raw: &RawSettings) -> Result<RawSettings> {
    raw.iter()
        .map(|(name, section)| Ok((name.clone(), clone_section(section)?)))
        .collect()
}

pub(crate) fn clone_section(section: &RawSection) -> Result<RawSection> {
    section
        .iter()
        .map(|(key, value)| Ok((key.clone(), value.try_clone()?)))
        .collect()
}

/// Name used for a key in decode errors: the key with dashes as spaces.
fn field_name(key: &str, name: Option<&str>) -> String {
    name.map(str::to_string)
        .unwrap_or_else(|| key.replace('-', " "))
}

fn lookup<T>(section: Option<&RawSection>, key: &str, name: Option<&str>) -> Result<Option<T>>
where
    T: TryFrom<OwnedValue>,
{
    let Some(value) = section.and_then(|s| s.get(key)) else {
        return Ok(None);
    };
    let signature = value.value_signature().to_string();
    T::try_from(value.try_clone()?)
        .map(Some)
        .map_err(|_| NmError::UnexpectedType {
            field: field_name(key, name),
            signature,
        })
}

/// Reads a field which must be present.
pub(crate) fn required<T>(section: Option<&RawSection>, key: &str, name: Option<&str>) -> Result<T>
where
    T: TryFrom<OwnedValue>,
{
    lookup(section, key, name)?.ok_or_else(|| NmError::MissingField(field_name(key, name)))
}

/// Reads a field, substituting `default` when it's absent.
pub(crate) fn optional<T>(
    section: Option<&RawSection>,
    key: &str,
    name: Option<&str>,
    default: T,
) -> Result<T>
where
    T: TryFrom<OwnedValue>,
{
    Ok(lookup(section, key, name)?.unwrap_or(default))
}

/// Renders a variant as plain text, without quoting strings.
pub(crate) fn render_value(value: &Value<'_>) -> String {
    match value {
        Value::Str(s) => s.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::U8(n) => n.to_string(),
        Value::I16(n) => n.to_string(),
        Value::U16(n) => n.to_string(),
        Value::I32(n) => n.to_string(),
        Value::U32(n) => n.to_string(),
        Value::I64(n) => n.to_string(),
        Value::U64(n) => n.to_string(),
        Value::F64(n) => n.to_string(),
        Value::ObjectPath(p) => p.to_string(),
        Value::Value(inner) => render_value(inner),
        other => other.to_string(),
    }
}
