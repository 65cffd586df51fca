//! JSON mapping used on the wire
//!
//! | type               | JSON                                        |
//! |--------------------|---------------------------------------------|
//! | `nat`, `int`, ...  | number; beyond 64 bits a decimal string     |
//! | `float32/64`       | number                                      |
//! | `text`             | string                                      |
//! | `opt T`            | `[]` or `[v]` (`null` and bare `v` accepted) |
//! | `vec T`, tuples    | array                                       |
//! | records            | object                                      |
//! | variants           | single-key object (`"label"` for null arms)  |
//! | `null`, `reserved` | `null`                                      |

use serde_json::{Map, Number, Value};

use super::types::{Field, IdlType};
use super::value::IdlValue;
use crate::error::{Error, Result};

/// Encode a value for the wire
pub fn to_json(value: &IdlValue) -> Value {
    match value {
        IdlValue::Null | IdlValue::Reserved => Value::Null,
        IdlValue::Bool(b) => Value::Bool(*b),
        IdlValue::Nat(n) => match u64::try_from(*n) {
            Ok(n) => Value::Number(n.into()),
            Err(_) => Value::String(n.to_string()),
        },
        IdlValue::Int(i) => match i64::try_from(*i) {
            Ok(i) => Value::Number(i.into()),
            Err(_) => Value::String(i.to_string()),
        },
        IdlValue::Float(x) => Number::from_f64(*x)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        IdlValue::Text(s) => Value::String(s.clone()),
        IdlValue::Opt(None) => Value::Array(vec![]),
        IdlValue::Opt(Some(inner)) => Value::Array(vec![to_json(inner)]),
        IdlValue::Vec(items) => Value::Array(items.iter().map(to_json).collect()),
        IdlValue::Record(fields)
            if super::types::is_tuple_labels(fields.iter().map(|(l, _)| l.as_str())) =>
        {
            Value::Array(fields.iter().map(|(_, v)| to_json(v)).collect())
        }
        IdlValue::Record(fields) => Value::Object(
            fields
                .iter()
                .map(|(label, v)| (label.clone(), to_json(v)))
                .collect::<Map<_, _>>(),
        ),
        IdlValue::Variant(label, payload) => {
            let mut map = Map::new();
            map.insert(label.clone(), to_json(payload));
            Value::Object(map)
        }
    }
}

/// Encode an argument list
pub fn args_to_json(values: &[IdlValue]) -> Vec<Value> {
    values.iter().map(to_json).collect()
}

/// Decode a JSON value against its declared type
pub fn from_json(ty: &IdlType, json: &Value) -> Result<IdlValue> {
    decode(ty, json, "$")
}

fn kind(json: &Value) -> &'static str {
    match json {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn mismatch(ty: &IdlType, json: &Value, path: &str) -> Error {
    Error::decode(format!("{}: expected {}, found {}", path, ty, kind(json)))
}

fn decode(ty: &IdlType, json: &Value, path: &str) -> Result<IdlValue> {
    match ty {
        IdlType::Null => match json {
            Value::Null => Ok(IdlValue::Null),
            _ => Err(mismatch(ty, json, path)),
        },
        IdlType::Reserved => Ok(IdlValue::Reserved),
        IdlType::Bool => json
            .as_bool()
            .map(IdlValue::Bool)
            .ok_or_else(|| mismatch(ty, json, path)),
        ty if ty.is_nat() => {
            let n = match json {
                Value::Number(n) => n.as_u64().map(u128::from),
                Value::String(s) => s.parse::<u128>().ok(),
                _ => None,
            }
            .ok_or_else(|| mismatch(ty, json, path))?;
            if n > ty.nat_max() {
                return Err(Error::decode(format!(
                    "{}: {} is out of range for {}",
                    path, n, ty
                )));
            }
            Ok(IdlValue::Nat(n))
        }
        ty if ty.is_int() => {
            let i = match json {
                Value::Number(n) => n
                    .as_i64()
                    .map(i128::from)
                    .or_else(|| n.as_u64().map(i128::from)),
                Value::String(s) => s.parse::<i128>().ok(),
                _ => None,
            }
            .ok_or_else(|| mismatch(ty, json, path))?;
            let (min, max) = ty.int_bounds();
            if i < min || i > max {
                return Err(Error::decode(format!(
                    "{}: {} is out of range for {}",
                    path, i, ty
                )));
            }
            Ok(IdlValue::Int(i))
        }
        ty if ty.is_float() => json
            .as_f64()
            .map(IdlValue::Float)
            .ok_or_else(|| mismatch(ty, json, path)),
        IdlType::Text => json
            .as_str()
            .map(IdlValue::text)
            .ok_or_else(|| mismatch(ty, json, path)),
        IdlType::Opt(inner) => match json {
            Value::Null => Ok(IdlValue::none()),
            Value::Array(items) if items.is_empty() => Ok(IdlValue::none()),
            // `[v]`, or a bare array when the inner type is itself an array
            Value::Array(items) if items.len() == 1 => {
                match decode(inner, &items[0], &format!("{}[0]", path)) {
                    Ok(value) => Ok(IdlValue::some(value)),
                    Err(wrapped) => decode(inner, json, path)
                        .map(IdlValue::some)
                        .map_err(|_| wrapped),
                }
            }
            other => Ok(IdlValue::some(decode(inner, other, path)?)),
        },
        IdlType::Vec(inner) => match json {
            Value::Array(items) => items
                .iter()
                .enumerate()
                .map(|(i, item)| decode(inner, item, &format!("{}[{}]", path, i)))
                .collect::<Result<Vec<_>>>()
                .map(IdlValue::Vec),
            _ => Err(mismatch(ty, json, path)),
        },
        IdlType::Record(fields) => decode_record(ty, fields, json, path),
        IdlType::Variant(arms) => decode_variant(ty, arms, json, path),
        _ => Err(mismatch(ty, json, path)),
    }
}

fn decode_record(ty: &IdlType, fields: &[Field], json: &Value, path: &str) -> Result<IdlValue> {
    let mut out = Vec::with_capacity(fields.len());
    match json {
        Value::Array(items) if ty.is_tuple() => {
            if items.len() != fields.len() {
                return Err(Error::decode(format!(
                    "{}: expected {} elements, found {}",
                    path,
                    fields.len(),
                    items.len()
                )));
            }
            for (field, item) in fields.iter().zip(items) {
                let value = decode(&field.ty, item, &format!("{}[{}]", path, field.label))?;
                out.push((field.label.clone(), value));
            }
        }
        Value::Object(map) => {
            for field in fields {
                let field_path = format!("{}.{}", path, field.label);
                let value = match map.get(&field.label) {
                    Some(item) => decode(&field.ty, item, &field_path)?,
                    None if matches!(field.ty, IdlType::Opt(_)) => IdlValue::none(),
                    None if field.ty == IdlType::Null || field.ty == IdlType::Reserved => {
                        decode(&field.ty, &Value::Null, &field_path)?
                    }
                    None => {
                        return Err(Error::decode(format!("{}: missing field", field_path)));
                    }
                };
                out.push((field.label.clone(), value));
            }
        }
        _ => return Err(mismatch(ty, json, path)),
    }
    Ok(IdlValue::Record(out))
}

fn decode_variant(ty: &IdlType, arms: &[Field], json: &Value, path: &str) -> Result<IdlValue> {
    let (label, payload) = match json {
        Value::String(label) => (label.as_str(), &Value::Null),
        Value::Object(map) if map.len() == 1 => match map.iter().next() {
            Some((label, payload)) => (label.as_str(), payload),
            None => return Err(mismatch(ty, json, path)),
        },
        _ => return Err(mismatch(ty, json, path)),
    };
    let Some(arm) = arms.iter().find(|a| a.label == label) else {
        return Err(Error::decode(format!(
            "{}: unknown variant `{}`",
            path, label
        )));
    };
    let value = decode(&arm.ty, payload, &format!("{}.{}", path, label))?;
    Ok(IdlValue::Variant(label.to_string(), Box::new(value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn person() -> IdlType {
        IdlType::Record(vec![
            Field::new("name", IdlType::Text),
            Field::new("nick", IdlType::opt(IdlType::Text)),
        ])
    }

    #[test]
    fn test_encode_numbers() {
        assert_eq!(to_json(&IdlValue::Nat(5)), json!(5));
        assert_eq!(to_json(&IdlValue::Int(-5)), json!(-5));
        assert_eq!(
            to_json(&IdlValue::Nat(u64::MAX as u128 + 1)),
            json!("18446744073709551616")
        );
    }

    #[test]
    fn test_encode_compound() {
        let value = IdlValue::Record(vec![
            ("name".into(), IdlValue::text("Ada")),
            ("nick".into(), IdlValue::none()),
        ]);
        assert_eq!(to_json(&value), json!({"name": "Ada", "nick": []}));
        assert_eq!(
            to_json(&IdlValue::tuple(vec![IdlValue::Nat(1), IdlValue::text("a")])),
            json!([1, "a"])
        );
        assert_eq!(
            to_json(&IdlValue::variant("ok", IdlValue::Nat(1))),
            json!({"ok": 1})
        );
        assert_eq!(to_json(&IdlValue::some(IdlValue::Bool(true))), json!([true]));
    }

    #[test]
    fn test_decode_record_defaults_missing_opt() {
        let value = from_json(&person(), &json!({"name": "Ada"})).unwrap();
        assert_eq!(
            value,
            IdlValue::Record(vec![
                ("name".into(), IdlValue::text("Ada")),
                ("nick".into(), IdlValue::none()),
            ])
        );
    }

    #[test]
    fn test_decode_opt_shapes() {
        let ty = IdlType::opt(IdlType::Nat);
        assert_eq!(from_json(&ty, &json!([])).unwrap(), IdlValue::none());
        assert_eq!(from_json(&ty, &json!(null)).unwrap(), IdlValue::none());
        assert_eq!(
            from_json(&ty, &json!([3])).unwrap(),
            IdlValue::some(IdlValue::Nat(3))
        );
        assert_eq!(
            from_json(&ty, &json!(3)).unwrap(),
            IdlValue::some(IdlValue::Nat(3))
        );
    }

    #[test]
    fn test_decode_opt_vec_accepts_bare_arrays() {
        let ty = IdlType::opt(IdlType::vec(IdlType::Nat));
        let some = |items: Vec<u128>| {
            IdlValue::some(IdlValue::Vec(items.into_iter().map(IdlValue::Nat).collect()))
        };

        assert_eq!(from_json(&ty, &json!([[7]])).unwrap(), some(vec![7]));
        assert_eq!(from_json(&ty, &json!([7])).unwrap(), some(vec![7]));
        assert_eq!(from_json(&ty, &json!([7, 8])).unwrap(), some(vec![7, 8]));
        assert!(from_json(&ty, &json!(["x"])).is_err());
    }

    #[test]
    fn test_decode_big_numbers_from_strings() {
        assert_eq!(
            from_json(&IdlType::Nat, &json!("340282366920938463463374607431768211455")).unwrap(),
            IdlValue::Nat(u128::MAX)
        );
        assert_eq!(
            from_json(&IdlType::Int, &json!("-5")).unwrap(),
            IdlValue::Int(-5)
        );
    }

    #[test]
    fn test_decode_variant_forms() {
        let ty = IdlType::Variant(vec![
            Field::new("ok", IdlType::Nat),
            Field::new("err", IdlType::Null),
        ]);
        assert_eq!(
            from_json(&ty, &json!({"ok": 2})).unwrap(),
            IdlValue::variant("ok", IdlValue::Nat(2))
        );
        assert_eq!(
            from_json(&ty, &json!("err")).unwrap(),
            IdlValue::variant("err", IdlValue::Null)
        );
        assert!(from_json(&ty, &json!({"nope": 1})).is_err());
    }

    #[test]
    fn test_decode_errors_carry_path() {
        let ty = IdlType::vec(person());
        let err = from_json(&ty, &json!([{"name": "a"}, {"name": 3}])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Decode error: $[1].name: expected text, found a number"
        );
    }

    #[test]
    fn test_decode_range_checks() {
        assert!(from_json(&IdlType::Nat8, &json!(256)).is_err());
        assert!(from_json(&IdlType::Nat, &json!(-1)).is_err());
        assert!(from_json(&IdlType::Int8, &json!(-128)).is_ok());
    }

    #[test]
    fn test_tuple_length_mismatch() {
        let ty = IdlType::tuple(vec![IdlType::Nat, IdlType::Nat]);
        assert!(from_json(&ty, &json!([1])).is_err());
    }
}
