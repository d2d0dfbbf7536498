//! Token substitution in link hrefs.
//!
//! A token is `{name}`, where `name` is a wire-level field key of the node
//! being decorated. No nesting, no escaping.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde_json::{Map, Value};

/// Matches `{token}` and captures the token name.
static TOKEN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([^{}]*)\}").expect("token pattern is a valid regex"));

/// Names of all tokens in `href`, in order of appearance.
pub fn tokens(href: &str) -> Vec<&str> {
    TOKEN_PATTERN
        .captures_iter(href)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .collect()
}

/// Replace every token of `href` that names a key of `node` with that value's
/// string form. Tokens without a matching key are left verbatim.
///
/// Returns `Cow::Borrowed` when nothing was replaced.
pub fn substitute<'a>(href: &'a str, node: &Map<String, Value>) -> Cow<'a, str> {
    TOKEN_PATTERN.replace_all(href, |caps: &Captures<'_>| match node.get(&caps[1]) {
        Some(value) => display_value(value),
        None => caps[0].to_string(),
    })
}

/// Strings are inserted raw; everything else as compact JSON text.
fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn node(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("Expected object"),
        }
    }

    #[test]
    fn test_tokens_none() {
        assert!(tokens("/test").is_empty());
    }

    #[test]
    fn test_tokens_single() {
        assert_eq!(tokens("/test/{id}"), vec!["id"]);
    }

    #[test]
    fn test_tokens_multiple() {
        assert_eq!(tokens("/test/{name}/{pcode}"), vec!["name", "pcode"]);
    }

    #[test]
    fn test_substitute_number() {
        let result = substitute("/api/v1/bakeries/{id}", &node(json!({"id": 234})));
        assert_eq!(result, "/api/v1/bakeries/234");
    }

    #[test]
    fn test_substitute_string_is_unquoted() {
        let result = substitute("/cupcakes/{name}", &node(json!({"name": "abc"})));
        assert_eq!(result, "/cupcakes/abc");
    }

    #[test]
    fn test_substitute_other_scalars() {
        let fields = node(json!({"flag": true, "ratio": 1.5, "gone": null}));
        assert_eq!(substitute("{flag}", &fields), "true");
        assert_eq!(substitute("{ratio}", &fields), "1.5");
        assert_eq!(substitute("{gone}", &fields), "null");
    }

    #[test]
    fn test_substitute_repeated_token() {
        let result = substitute("/{id}/again/{id}", &node(json!({"id": 9})));
        assert_eq!(result, "/9/again/9");
    }

    #[test]
    fn test_unresolved_token_left_verbatim() {
        let result = substitute("/a/{id}/{slug}", &node(json!({"id": 1})));
        assert_eq!(result, "/a/1/{slug}");
    }

    #[test]
    fn test_no_tokens_borrows() {
        let result = substitute("/plain", &node(json!({"id": 1})));
        assert!(matches!(result, Cow::Borrowed("/plain")));
    }

    #[test]
    fn test_token_names_are_case_sensitive() {
        let result = substitute("/a/{ID}", &node(json!({"id": 1})));
        assert_eq!(result, "/a/{ID}");
    }
}
