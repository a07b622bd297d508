//! Environment variable readers for configuration overrides.

use std::fmt;
use std::str::FromStr;

/// An override variable that was set but could not be used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedOverride {
    pub name: &'static str,
    pub value: String,
    pub reason: String,
}

impl fmt::Display for RejectedOverride {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={:?}: {}", self.name, self.value, self.reason)
    }
}

#[must_use]
pub(super) fn read_non_empty<F>(lookup: &F, name: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .map(|raw| raw.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Parse a set variable. Values that do not parse are recorded in `rejected`
/// and read as unset.
pub(super) fn read_parsed<T, F>(
    lookup: &F,
    name: &'static str,
    rejected: &mut Vec<RejectedOverride>,
) -> Option<T>
where
    T: FromStr,
    T::Err: fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    let raw = read_non_empty(lookup, name)?;
    match raw.parse::<T>() {
        Ok(value) => Some(value),
        Err(e) => {
            rejected.push(RejectedOverride {
                name,
                value: raw,
                reason: e.to_string(),
            });
            None
        }
    }
}
