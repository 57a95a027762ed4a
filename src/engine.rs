//! Literal text substitution over a serialized dashboard model.
//!
//! The model is serialized to compact JSON, every rule is applied to the
//! whole text in order, and the result is parsed back. Working on the text
//! lets a single rule hit keys, values and query strings alike. Nothing is
//! escaped: a value containing `"` or `\` can break the JSON, which is
//! reported as [`Error::MalformedResult`].

use crate::error::{Error, Result};
use crate::replacement::ReplacementSet;
use serde_json::Value;

/// Apply `rules` to `model` and return the new model.
pub fn substitute(model: &Value, rules: &ReplacementSet) -> Result<Value> {
    let text = serde_json::to_string(model).map_err(Error::Serialization)?;
    let replaced = replace_all(text, rules);

    if log::log_enabled!(log::Level::Trace) {
        log::trace!("substituted model: {replaced}");
    }

    let value: Value =
        serde_json::from_str(&replaced).map_err(|e| Error::MalformedResult {
            reason: e.to_string(),
        })?;

    if !value.is_object() {
        return Err(Error::MalformedResult {
            reason: "model is no longer a JSON object".to_string(),
        });
    }

    Ok(value)
}

/// Fold the rules over `text`, each one replacing every non-overlapping
/// occurrence of its key, scanning left to right.
pub fn replace_all(text: String, rules: &ReplacementSet) -> String {
    rules.iter().fold(text, |acc, rule| {
        let hits = acc.matches(rule.key.as_str()).count();
        if hits == 0 {
            log::debug!("'{}' not found", rule.key);
            return acc;
        }
        log::debug!("'{}' -> '{}' ({} occurrences)", rule.key, rule.value, hits);
        acc.replace(rule.key.as_str(), &rule.value)
    })
}
