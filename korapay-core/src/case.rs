//! Field-name casing between the application and the wire.
//!
//! The Korapay API speaks `snake_case` JSON while this SDK exposes `camelCase`
//! payloads and responses. [`to_wire_case`] and [`to_app_case`] rewrite every
//! object key of an arbitrary JSON value, recursing through nested objects and
//! arrays. Scalars (including `null`) are returned untouched.
//!
//! Keys are split into words with these rules:
//!
//! 1. Any non-alphanumeric character separates words and is dropped.
//! 2. A lowercase letter followed by an uppercase letter starts a new word
//!    (`firstName` → `first`, `Name`).
//! 3. Inside an uppercase run, the last uppercase letter starts a new word when
//!    a lowercase letter follows it (`DOBValue` → `DOB`, `Value`).
//! 4. A transition between letters and digits starts a new word
//!    (`line1` → `line`, `1`).
//!
//! Acronyms therefore collapse to lowercase in both directions:
//!
//! ```
//! use korapay_core::case::{camel_case, snake_case};
//!
//! assert_eq!(snake_case("DOB"), "dob");
//! assert_eq!(snake_case("accountID"), "account_id");
//! assert_eq!(camel_case("account_id"), "accountId");
//! assert_eq!(camel_case("DOB"), "dob");
//! ```

use serde_json::{Map, Value};

use crate::types::AnyJson;

/// Rewrite every object key in `value` from `camelCase` to `snake_case`.
///
/// ```
/// use serde_json::json;
/// use korapay_core::case::to_wire_case;
///
/// let wire = to_wire_case(json!({ "firstName": "john", "cards": [{ "expiryMonth": "08" }] }));
/// assert_eq!(wire, json!({ "first_name": "john", "cards": [{ "expiry_month": "08" }] }));
/// ```
pub fn to_wire_case(value: AnyJson) -> AnyJson {
    rename_keys(value, snake_case)
}

/// Rewrite every object key in `value` from `snake_case` to `camelCase`.
///
/// ```
/// use serde_json::json;
/// use korapay_core::case::to_app_case;
///
/// let app = to_app_case(json!({ "bank_code": "044", "data": [{ "account_name": "Doe" }] }));
/// assert_eq!(app, json!({ "bankCode": "044", "data": [{ "accountName": "Doe" }] }));
/// ```
pub fn to_app_case(value: AnyJson) -> AnyJson {
    rename_keys(value, camel_case)
}

/// Convert a single key to `snake_case`.
pub fn snake_case(key: &str) -> String {
    words(key)
        .iter()
        .map(|word| word.to_lowercase())
        .collect::<Vec<_>>()
        .join("_")
}

/// Convert a single key to `camelCase`.
pub fn camel_case(key: &str) -> String {
    words(key)
        .iter()
        .enumerate()
        .map(|(index, word)| {
            if index == 0 {
                word.to_lowercase()
            } else {
                capitalize(word)
            }
        })
        .collect()
}

fn rename_keys(value: Value, rename: fn(&str) -> String) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, value)| (rename(&key), rename_keys(value, rename)))
                .collect::<Map<_, _>>(),
        ),
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|item| rename_keys(item, rename))
                .collect(),
        ),
        scalar => scalar,
    }
}

fn words(key: &str) -> Vec<String> {
    let chars: Vec<char> = key.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (index, &c) in chars.iter().enumerate() {
        if !c.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }

        // `current` is non-empty only when the previous char was alphanumeric.
        if let Some(prev) = current.chars().last()
            && starts_word(prev, c, chars.get(index + 1).copied())
        {
            words.push(std::mem::take(&mut current));
        }
        current.push(c);
    }

    if !current.is_empty() {
        words.push(current);
    }
    words
}

fn starts_word(prev: char, c: char, next: Option<char>) -> bool {
    (prev.is_lowercase() && c.is_uppercase())
        || prev.is_numeric() != c.is_numeric()
        || (prev.is_uppercase() && c.is_uppercase() && next.is_some_and(char::is_lowercase))
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_to_wire_case_collapses_acronyms() {
        let data = json!({ "firstName": "john", "lastName": "doe", "DOB": "2024-08-30" });
        let expected = json!({ "first_name": "john", "last_name": "doe", "dob": "2024-08-30" });
        assert_eq!(to_wire_case(data), expected);
    }

    #[test]
    fn test_to_app_case() {
        let data = json!({ "first_name": "john", "last_name": "doe", "dob": "2024-08-30" });
        let expected = json!({ "firstName": "john", "lastName": "doe", "dob": "2024-08-30" });
        assert_eq!(to_app_case(data), expected);
    }

    #[test]
    fn test_nested_objects_and_arrays() {
        let data = json!({
            "batchReference": "batch-001",
            "payouts": [
                { "bankAccount": { "bankCode": "044", "accountNumber": "0000000000" } },
                { "bankAccount": { "bankCode": "058", "accountNumber": "1111111111" } }
            ],
            "metadata": null
        });
        let wire = to_wire_case(data);
        assert_eq!(
            wire,
            json!({
                "batch_reference": "batch-001",
                "payouts": [
                    { "bank_account": { "bank_code": "044", "account_number": "0000000000" } },
                    { "bank_account": { "bank_code": "058", "account_number": "1111111111" } }
                ],
                "metadata": null
            })
        );
    }

    #[test]
    fn test_scalars_pass_through() {
        for scalar in [json!(null), json!(true), json!(42), json!("firstName"), json!(1.5)] {
            assert_eq!(to_wire_case(scalar.clone()), scalar);
            assert_eq!(to_app_case(scalar.clone()), scalar);
        }
    }

    #[test]
    fn test_top_level_array_keeps_order_and_length() {
        let data = json!([{ "aKey": 1 }, 2, [{ "bKey": 3 }]]);
        assert_eq!(to_wire_case(data), json!([{ "a_key": 1 }, 2, [{ "b_key": 3 }]]));
    }

    #[test]
    fn test_snake_case_word_rules() {
        assert_eq!(snake_case("firstName"), "first_name");
        assert_eq!(snake_case("DOBValue"), "dob_value");
        assert_eq!(snake_case("XMLHttpRequest"), "xml_http_request");
        assert_eq!(snake_case("accountID"), "account_id");
        assert_eq!(snake_case("line1"), "line_1");
        assert_eq!(snake_case("first-name"), "first_name");
        assert_eq!(snake_case("__private"), "private");
        assert_eq!(snake_case("already_snake"), "already_snake");
        assert_eq!(snake_case(""), "");
    }

    #[test]
    fn test_camel_case_word_rules() {
        assert_eq!(camel_case("first_name"), "firstName");
        assert_eq!(camel_case("DOB"), "dob");
        assert_eq!(camel_case("account_id"), "accountId");
        assert_eq!(camel_case("line_1"), "line1");
        assert_eq!(camel_case("redirect_url"), "redirectUrl");
        assert_eq!(camel_case("alreadyCamel"), "alreadyCamel");
        assert_eq!(camel_case("STATUS"), "status");
    }

    #[test]
    fn test_key_order_is_preserved() {
        let wire = to_wire_case(json!({ "zField": 1, "aField": 2, "mField": 3 }));
        let keys: Vec<_> = wire.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["z_field", "a_field", "m_field"]);
    }

    fn camel_key() -> impl Strategy<Value = String> {
        "[a-z]{2,8}([A-Z][a-z]{1,8}){0,3}"
    }

    fn snake_key() -> impl Strategy<Value = String> {
        "[a-z]{2,8}(_[a-z]{2,8}){0,3}"
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn test_camel_keys_roundtrip(
            outer in camel_key(),
            inner in prop::collection::vec((camel_key(), any::<i64>()), 0..6),
        ) {
            let nested: Map<String, Value> =
                inner.into_iter().map(|(key, value)| (key, json!(value))).collect();
            let value = json!({ outer: [Value::Object(nested.clone()), Value::Object(nested)] });

            prop_assert_eq!(to_app_case(to_wire_case(value.clone())), value);
        }

        #[test]
        fn test_snake_case_is_idempotent(key in "[A-Za-z0-9_ -]{0,24}") {
            let once = snake_case(&key);
            prop_assert_eq!(snake_case(&once), once);
        }

        #[test]
        fn test_camel_case_is_idempotent_for_snake_keys(key in snake_key()) {
            let once = camel_case(&key);
            prop_assert_eq!(camel_case(&once), once);
        }
    }
}
