//! Portable encoding for cell values
//!
//! `encode` maps a `Value` to a JSON tree. `decode_as` reverses it using the
//! declared column type. `decode` reverses it without a declared type by
//! sniffing the shape of the tree, which is ambiguous:
//! - any string starting with the JPEG base64 magic is taken for a picture
//! - any object with exactly `start` and `end` is taken for an interval
//! - a single-character string comes back as text, not as a char
//!
//! JSON has no number for NaN or the infinities. `encode` writes them as the
//! strings `NaN`, `inf` and `-inf`, which only `decode_as` reads back as
//! floats. Tables never store them; see `Field::validate`.

use serde_json::{Number, Value as JsonValue};

use super::errors::{ValueError, ValueResult};
use super::interval::RealInterval;
use super::picture::Picture;
use super::types::{DataType, Value};

/// Base64 prefix of every JPEG file (`FF D8 FF`)
pub const JPEG_BASE64_MAGIC: &str = "/9j/";

/// Encodes a value into its portable form.
pub fn encode(value: &Value) -> JsonValue {
    match value {
        Value::Integer(v) => JsonValue::from(*v),
        Value::Float(v) => match Number::from_f64(*v) {
            Some(n) => JsonValue::Number(n),
            None => JsonValue::String(non_finite_tag(*v).to_owned()),
        },
        Value::Text(v) => JsonValue::String(v.clone()),
        Value::Char(v) => JsonValue::String(v.to_string()),
        Value::Picture(v) => JsonValue::String(v.to_base64()),
        Value::Interval(v) => v.to_dict(),
    }
}

/// Decodes a portable value by sniffing its shape. Only for contexts where
/// no declared type is available.
pub fn decode(data: &JsonValue) -> ValueResult<Value> {
    match data {
        JsonValue::String(s) if s.starts_with(JPEG_BASE64_MAGIC) => {
            // A plain string that merely shares the prefix stays text.
            Ok(Picture::from_base64(s)
                .map(Value::Picture)
                .unwrap_or_else(|_| Value::Text(s.clone())))
        }
        JsonValue::String(s) => Ok(Value::Text(s.clone())),
        JsonValue::Number(n) => Ok(match n.as_i64() {
            Some(i) => Value::Integer(i),
            None => Value::Float(number_as_f64(n)?),
        }),
        JsonValue::Object(obj)
            if obj.len() == 2 && obj.contains_key("start") && obj.contains_key("end") =>
        {
            Ok(Value::Interval(RealInterval::from_dict(data)?))
        }
        other => Err(ValueError::invalid(format!(
            "{} has no value representation",
            json_type_name(other)
        ))),
    }
}

/// Decodes a portable value as the declared type. Never sniffs.
pub fn decode_as(data: &JsonValue, data_type: DataType) -> ValueResult<Value> {
    let incompatible = || ValueError::Incompatible {
        expected: data_type,
        found: json_type_name(data),
    };

    match data_type {
        DataType::Int => data.as_i64().map(Value::Integer).ok_or_else(incompatible),
        DataType::Float => match data {
            JsonValue::String(s) => non_finite_from_tag(s)
                .map(Value::Float)
                .ok_or_else(incompatible),
            _ => data.as_f64().map(Value::Float).ok_or_else(incompatible),
        },
        DataType::Str => data
            .as_str()
            .map(|s| Value::Text(s.to_owned()))
            .ok_or_else(incompatible),
        DataType::Char => {
            let s = data.as_str().ok_or_else(incompatible)?;
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Ok(Value::Char(c)),
                _ => Err(ValueError::Incompatible {
                    expected: data_type,
                    found: "string without exactly one character",
                }),
            }
        }
        DataType::Picture => {
            let s = data.as_str().ok_or_else(incompatible)?;
            Ok(Value::Picture(Picture::from_base64(s)?))
        }
        DataType::RealInterval => {
            if !data.is_object() {
                return Err(incompatible());
            }
            Ok(Value::Interval(RealInterval::from_dict(data)?))
        }
    }
}

/// Returns the JSON type name for error messages.
pub fn json_type_name(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "bool",
        JsonValue::Number(n) => {
            if n.is_i64() || n.is_u64() {
                "int"
            } else {
                "float"
            }
        }
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

fn non_finite_tag(v: f64) -> &'static str {
    if v.is_nan() {
        "NaN"
    } else if v > 0.0 {
        "inf"
    } else {
        "-inf"
    }
}

fn non_finite_from_tag(tag: &str) -> Option<f64> {
    match tag {
        "NaN" => Some(f64::NAN),
        "inf" => Some(f64::INFINITY),
        "-inf" => Some(f64::NEG_INFINITY),
        _ => None,
    }
}

fn number_as_f64(n: &Number) -> ValueResult<f64> {
    n.as_f64()
        .ok_or_else(|| ValueError::invalid(format!("number {} is out of range", n)))
}
