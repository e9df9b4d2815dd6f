//! Pretty-printing serializer: the value-tree-to-text direction.
//!
//! Output uses two spaces of indentation per nesting depth and is
//! strictly valid JSON — no separator is emitted after the final element
//! of a container, so `parse_str(stringify(v)?)` round-trips. Object
//! keys are written in the map's sorted iteration order.

use crate::error::{JsonError, JsonResult};
use crate::value::Value;

/// Serialize a tree to pretty-printed JSON text.
///
/// Only object or array roots can be stringified, mirroring the parser's
/// root restriction; a scalar root is a `TypeMismatch`. Non-finite floats
/// anywhere in the tree have no JSON spelling and fail serialization.
pub fn stringify(value: &Value) -> JsonResult<String> {
    match value {
        Value::Object(_) | Value::Array(_) => {
            let mut output = String::new();
            write_value(value, 0, &mut output)?;
            Ok(output)
        }
        other => Err(JsonError::TypeMismatch {
            expected: "object or array",
            found: other.type_name(),
        }),
    }
}

fn write_value(value: &Value, depth: usize, output: &mut String) -> JsonResult<()> {
    match value {
        Value::Null => output.push_str("null"),
        Value::Bool(true) => output.push_str("true"),
        Value::Bool(false) => output.push_str("false"),
        Value::Integer(n) => output.push_str(&n.to_string()),
        Value::Float(f) => {
            if !f.is_finite() {
                return Err(JsonError::NonFiniteFloat);
            }
            // Debug formatting keeps a trailing ".0" on integral floats,
            // so the token re-lexes as a float rather than an integer.
            output.push_str(&format!("{f:?}"));
        }
        Value::String(s) => write_string(s, output),
        Value::Array(_) => write_array(value, depth, output)?,
        Value::Object(_) => write_object(value, depth, output)?,
    }
    Ok(())
}

/// Write a string with JSON escaping.
fn write_string(s: &str, output: &mut String) {
    output.push('"');
    for ch in s.chars() {
        match ch {
            '"' => output.push_str("\\\""),
            '\\' => output.push_str("\\\\"),
            '\x08' => output.push_str("\\b"),
            '\x0C' => output.push_str("\\f"),
            '\n' => output.push_str("\\n"),
            '\r' => output.push_str("\\r"),
            '\t' => output.push_str("\\t"),
            c if c < '\x20' => {
                output.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => output.push(c),
        }
    }
    output.push('"');
}

fn write_indent(depth: usize, output: &mut String) {
    for _ in 0..depth {
        output.push_str("  ");
    }
}

fn write_array(value: &Value, depth: usize, output: &mut String) -> JsonResult<()> {
    let items = value.as_array()?;

    if items.is_empty() {
        output.push_str("[]");
        return Ok(());
    }

    output.push('[');
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            output.push(',');
        }
        output.push('\n');
        write_indent(depth + 1, output);
        write_value(item, depth + 1, output)?;
    }
    output.push('\n');
    write_indent(depth, output);
    output.push(']');
    Ok(())
}

fn write_object(value: &Value, depth: usize, output: &mut String) -> JsonResult<()> {
    let map = value.as_object()?;

    if map.is_empty() {
        output.push_str("{}");
        return Ok(());
    }

    output.push('{');
    for (i, (key, item)) in map.iter().enumerate() {
        if i > 0 {
            output.push(',');
        }
        output.push('\n');
        write_indent(depth + 1, output);
        write_string(key, output);
        output.push_str(": ");
        write_value(item, depth + 1, output)?;
    }
    output.push('\n');
    write_indent(depth, output);
    output.push('}');
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::JsonType;

    fn pair(key: &str, value: Value) -> Value {
        Value::Array(vec![Value::from(key), value])
    }

    #[test]
    fn test_scalar_root_rejected() {
        assert!(stringify(&Value::Integer(1)).is_err());
        assert!(stringify(&Value::Null).is_err());
        assert!(stringify(&Value::from("s")).is_err());
    }

    #[test]
    fn test_empty_containers() {
        assert_eq!(stringify(&Value::empty(JsonType::Object)).unwrap(), "{}");
        assert_eq!(stringify(&Value::empty(JsonType::Array)).unwrap(), "[]");
    }

    #[test]
    fn test_flat_array() {
        let value = Value::Array(vec![Value::Integer(1), Value::Bool(true), Value::Null]);
        assert_eq!(
            stringify(&value).unwrap(),
            "[\n  1,\n  true,\n  null\n]"
        );
    }

    #[test]
    fn test_object_two_space_indent_and_sorted_keys() {
        let value = Value::from_list(vec![
            pair("pi", Value::Float(3.141)),
            pair("happy", Value::Bool(true)),
        ]);
        assert_eq!(
            stringify(&value).unwrap(),
            "{\n  \"happy\": true,\n  \"pi\": 3.141\n}"
        );
    }

    #[test]
    fn test_nested_indentation() {
        let value = Value::from_list(vec![pair(
            "a",
            Value::Array(vec![Value::Integer(1), Value::Integer(2)]),
        )]);
        assert_eq!(
            stringify(&value).unwrap(),
            "{\n  \"a\": [\n    1,\n    2\n  ]\n}"
        );
    }

    #[test]
    fn test_no_trailing_separator() {
        let out = stringify(&Value::Array(vec![Value::Integer(1)])).unwrap();
        assert!(!out.contains(",\n]"));
        assert!(!out.contains(",]"));
    }

    #[test]
    fn test_string_escaping() {
        let value = Value::Array(vec![Value::from("a\"b\\c\nd\te")]);
        assert_eq!(
            stringify(&value).unwrap(),
            "[\n  \"a\\\"b\\\\c\\nd\\te\"\n]"
        );
    }

    #[test]
    fn test_control_character_escaped_as_hex() {
        let value = Value::Array(vec![Value::from("\u{1}")]);
        assert_eq!(stringify(&value).unwrap(), "[\n  \"\\u0001\"\n]");
    }

    #[test]
    fn test_integral_float_keeps_point() {
        let value = Value::Array(vec![Value::Float(3.0)]);
        assert_eq!(stringify(&value).unwrap(), "[\n  3.0\n]");
    }

    #[test]
    fn test_non_finite_float_rejected() {
        let nan = Value::Array(vec![Value::Float(f64::NAN)]);
        assert_eq!(stringify(&nan).unwrap_err(), JsonError::NonFiniteFloat);
        let inf = Value::Array(vec![Value::Float(f64::INFINITY)]);
        assert!(stringify(&inf).is_err());
    }
}
