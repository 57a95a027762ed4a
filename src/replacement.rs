//! Parsing of `key<=>value` replacement entries.

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Separator between key and value in a `--replace` entry.
pub const SEPARATOR: &str = "<=>";

/// A single literal substitution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplacementRule {
    pub key: String,
    pub value: String,
}

impl ReplacementRule {
    /// Create a rule. The key must not be empty.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Result<Self> {
        let key = key.into();
        let value = value.into();
        if key.is_empty() {
            return Err(Error::MalformedReplacement {
                entry: format!("{key}{SEPARATOR}{value}"),
                reason: "key is empty".to_string(),
            });
        }
        Ok(Self { key, value })
    }
}

impl FromStr for ReplacementRule {
    type Err = Error;

    /// Split on the first separator only; the value may contain it.
    fn from_str(entry: &str) -> Result<Self> {
        let Some((key, value)) = entry.split_once(SEPARATOR) else {
            return Err(Error::MalformedReplacement {
                entry: entry.to_string(),
                reason: format!("missing separator '{SEPARATOR}'"),
            });
        };
        Self::new(key, value)
    }
}

impl fmt::Display for ReplacementRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.key, SEPARATOR, self.value)
    }
}

/// Ordered rules, applied in declaration order.
///
/// Duplicate keys are kept. A later rule sees the output of every earlier
/// one, so `[a<=>b, b<=>c]` turns `a` into `c`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplacementSet {
    rules: Vec<ReplacementRule>,
}

impl ReplacementSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse entries in the order given. Fails on the first malformed one.
    pub fn parse<I, S>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::new();
        for entry in entries {
            set.push(entry.as_ref().parse()?);
        }
        Ok(set)
    }

    pub fn push(&mut self, rule: ReplacementRule) {
        self.rules.push(rule);
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ReplacementRule> {
        self.rules.iter()
    }
}
