//! Ordered-alias field extraction from a loosely-typed row.
//!
//! Imported spreadsheets name the same column many ways (English headers,
//! localized headers, unit suffixes). Each semantic field therefore has an
//! ordered candidate-key list (see [`crate::aliases`]); the first key whose
//! value is present and non-empty wins, and extraction stops there.

use serde_json::{Map, Value};

/// Extract a numeric field from `row` by trying `keys` in order.
///
/// The first key whose value exists and has a non-empty trimmed string form
/// is selected and extraction stops — later keys are never consulted, even
/// if the selected value fails to parse. Before parsing, every character
/// except ASCII digits, `.`, and a leading `-` is stripped (currency
/// symbols, thousands separators, percent signs). A remainder that does not
/// parse to a finite number yields `fallback` rather than partial-parse
/// garbage.
#[must_use]
pub fn extract_number(row: &Map<String, Value>, keys: &[&str], fallback: f64) -> f64 {
    for key in keys {
        let Some(raw) = row.get(*key).and_then(string_form) else {
            continue;
        };
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            continue;
        }
        let cleaned = clean_numeric(trimmed);
        return match cleaned.parse::<f64>() {
            Ok(n) if n.is_finite() => n,
            _ => fallback,
        };
    }
    fallback
}

/// Extract a string field from `row` by trying `keys` in order.
///
/// Returns the first present value whose trimmed string form is non-empty,
/// or `fallback` on a total miss. An empty-after-trim value counts as
/// absent and the next key is tried.
#[must_use]
pub fn extract_string(row: &Map<String, Value>, keys: &[&str], fallback: &str) -> String {
    for key in keys {
        let Some(raw) = row.get(*key).and_then(string_form) else {
            continue;
        };
        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }
    fallback.to_string()
}

/// String form of a JSON value; `Null` counts as absent.
fn string_form(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    }
}

/// Keep ASCII digits, `.`, and a leading `-`; drop everything else.
fn clean_numeric(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if c.is_ascii_digit() || c == '.' {
            out.push(c);
        } else if c == '-' && out.is_empty() {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(value: Value) -> Map<String, Value> {
        value.as_object().expect("object literal").clone()
    }

    #[test]
    fn number_first_matching_key_wins() {
        let row = row(json!({"A": "5", "B": "10"}));
        assert_eq!(extract_number(&row, &["B", "A"], 0.0), 10.0);
        assert_eq!(extract_number(&row, &["A", "B"], 0.0), 5.0);
    }

    #[test]
    fn number_extraction_is_idempotent() {
        let row = row(json!({"price": "89.99"}));
        let first = extract_number(&row, &["price"], 0.0);
        let second = extract_number(&row, &["price"], 0.0);
        assert_eq!(first, second);
        assert_eq!(first, 89.99);
    }

    #[test]
    fn number_strips_currency_and_separators() {
        let row = row(json!({"price": "$1,234.56"}));
        assert_eq!(extract_number(&row, &["price"], 0.0), 1234.56);
    }

    #[test]
    fn number_keeps_leading_minus_only() {
        let row = row(json!({"trend": "-12.5%"}));
        assert_eq!(extract_number(&row, &["trend"], 0.0), -12.5);
    }

    #[test]
    fn number_zero_is_present_and_selected() {
        let row = row(json!({"sales": 0}));
        assert_eq!(extract_number(&row, &["sales"], 99.0), 0.0);
    }

    #[test]
    fn number_garbage_yields_fallback_not_next_key() {
        // "n/a" is selected (non-empty) and fails to parse; the valid value
        // under the later key must NOT leak through.
        let row = row(json!({"sales": "n/a", "Sales": "120"}));
        assert_eq!(extract_number(&row, &["sales", "Sales"], 7.0), 7.0);
    }

    #[test]
    fn number_empty_string_falls_through_to_next_key() {
        let row = row(json!({"sales": "  ", "Sales": "120"}));
        assert_eq!(extract_number(&row, &["sales", "Sales"], 0.0), 120.0);
    }

    #[test]
    fn number_null_counts_as_absent() {
        let row = row(json!({"sales": null, "Sales": "120"}));
        assert_eq!(extract_number(&row, &["sales", "Sales"], 0.0), 120.0);
    }

    #[test]
    fn number_total_miss_yields_fallback() {
        let row = row(json!({}));
        assert_eq!(extract_number(&row, &["a", "b"], 3.5), 3.5);
    }

    #[test]
    fn number_accepts_json_numbers_directly() {
        let row = row(json!({"rank": 42}));
        assert_eq!(extract_number(&row, &["rank"], 0.0), 42.0);
    }

    #[test]
    fn string_skips_empty_values() {
        let row = row(json!({"Title": "   ", "title": "Desk Lamp"}));
        assert_eq!(extract_string(&row, &["Title", "title"], ""), "Desk Lamp");
    }

    #[test]
    fn string_trims_selected_value() {
        let row = row(json!({"Brand": "  Acme  "}));
        assert_eq!(extract_string(&row, &["Brand"], ""), "Acme");
    }

    #[test]
    fn string_total_miss_yields_fallback() {
        let row = row(json!({"x": ""}));
        assert_eq!(extract_string(&row, &["x", "y"], "unknown"), "unknown");
    }

    #[test]
    fn localized_headers_resolve() {
        let row = row(json!({"价格": "59.90", "尺寸分级": "Small"}));
        assert_eq!(
            extract_number(&row, &["price", "价格", "Price"], 0.0),
            59.90
        );
        assert_eq!(
            extract_string(&row, &["size_tier", "尺寸分级", "Size Tier"], ""),
            "Small"
        );
    }
}
