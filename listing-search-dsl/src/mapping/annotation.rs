//! Parsing of schema directive annotations.

use serde_json::{Map, Value};

/// Parse a directive string such as `"type=keyword,index=false,norms"`.
///
/// Tokens are separated by commas and trimmed; empty tokens are dropped.
/// `key=value` tokens keep their value (only the first `=` splits), bare keys
/// become boolean `true` flags. The literal values `true` and `false` are
/// stored as JSON booleans so the engine receives typed settings.
///
/// When a key appears twice the last occurrence wins, in the position of the
/// first one.
pub(crate) fn parse_annotation(annotation: &str) -> Map<String, Value> {
    let mut attributes = Map::new();

    for token in annotation.split(',') {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }

        match token.split_once('=') {
            Some((key, value)) => {
                let key = key.trim();
                if key.is_empty() {
                    continue;
                }
                attributes.insert(key.to_string(), directive_value(value.trim()));
            }
            None => {
                attributes.insert(token.to_string(), Value::Bool(true));
            }
        }
    }

    attributes
}

fn directive_value(raw: &str) -> Value {
    match raw {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        other => Value::String(other.to_string()),
    }
}
