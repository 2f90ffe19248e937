//! Table and view `WITH` options

use crate::render::escape_string;
use crate::tree::OptionMap;
use serde_json::Value;

/// Keys whose new value differs from the old one, in new-map order
pub fn diff_options(new: &OptionMap, old: &OptionMap) -> OptionMap {
    new.iter()
        .filter(|(key, value)| !value.is_null() && old.get(*key) != Some(*value))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

/// Plain decimal or exponent notation; `inf` and `NaN` stay strings
fn is_numeric(s: &str) -> bool {
    s.chars().any(|c| c.is_ascii_digit())
        && s
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E'))
        && s.parse::<f64>().is_ok()
}

fn looks_literal(s: &str) -> bool {
    let trimmed = s.trim();
    trimmed.starts_with('{')
        || is_numeric(trimmed)
        || trimmed.eq_ignore_ascii_case("true")
        || trimmed.eq_ignore_ascii_case("false")
}

fn map_entry_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(escape_string(s)),
        other => render_option_value(other),
    }
}

/// CQL literal for an option value. `None` for values that have no literal
/// form (null, arrays).
pub fn render_option_value(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Array(_) => None,
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) if looks_literal(s) => Some(s.trim().to_string()),
        Value::String(s) => Some(escape_string(s)),
        Value::Object(map) => {
            let entries: Vec<String> = map
                .iter()
                .filter_map(|(key, value)| {
                    map_entry_value(value).map(|v| format!("{}: {}", escape_string(key), v))
                })
                .collect();
            Some(format!("{{{}}}", entries.join(", ")))
        }
    }
}

/// `name = value` clauses for every renderable option, plus the comment
pub fn render_option_clauses(options: &OptionMap, comment: Option<&str>) -> Vec<String> {
    let mut clauses: Vec<String> = options
        .iter()
        .filter_map(|(key, value)| {
            render_option_value(value).map(|rendered| format!("{} = {}", key, rendered))
        })
        .collect();

    if let Some(comment) = comment {
        clauses.push(format!("comment = {}", escape_string(comment)));
    }

    clauses
}

/// The comment to set when it changed; `None` when it did not
pub fn changed_comment<'a>(old: Option<&'a str>, new: Option<&'a str>) -> Option<&'a str> {
    match new {
        Some(new) if old != Some(new) => Some(new),
        _ => None,
    }
}
