//! Clause splitting for passive-skill descriptions.

use serde_json::Value;

/// A passive-skill description as it arrives from a data row.
///
/// Anything that is not a string (null, a number, a missing column) is
/// `Absent` and means "no skill text".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawDescription<'a> {
    Present(&'a str),
    Absent,
}

impl<'a> RawDescription<'a> {
    pub fn from_json(value: &'a Value) -> Self {
        match value {
            Value::String(s) => RawDescription::Present(s),
            _ => RawDescription::Absent,
        }
    }
}

impl<'a> From<Option<&'a str>> for RawDescription<'a> {
    fn from(value: Option<&'a str>) -> Self {
        value.map_or(RawDescription::Absent, RawDescription::Present)
    }
}

impl<'a> From<&'a str> for RawDescription<'a> {
    fn from(value: &'a str) -> Self {
        RawDescription::Present(value)
    }
}

/// Splits a description on commas and trims each piece.
/// Empty pieces are kept; they simply match nothing downstream.
pub fn split_clauses(raw: RawDescription<'_>) -> Vec<&str> {
    match raw {
        RawDescription::Present(text) => text.split(',').map(str::trim).collect(),
        RawDescription::Absent => Vec::new(),
    }
}
