//! Values and their canonical textual form

use std::fmt;

use super::types::{display_label, is_tuple_labels};

/// Default width used when pretty-printing values
pub const DEFAULT_TEXT_WIDTH: usize = 80;

const INDENT: &str = "  ";

/// A value of the interface description language
///
/// Sized naturals and integers share the `Nat` / `Int` variants; the
/// declared type carries the width.
#[derive(Debug, Clone, PartialEq)]
pub enum IdlValue {
    Null,
    Bool(bool),
    Nat(u128),
    Int(i128),
    Float(f64),
    Text(String),
    Reserved,
    Opt(Option<Box<IdlValue>>),
    Vec(Vec<IdlValue>),
    Record(Vec<(String, IdlValue)>),
    Variant(String, Box<IdlValue>),
}

impl IdlValue {
    pub fn some(inner: IdlValue) -> Self {
        IdlValue::Opt(Some(Box::new(inner)))
    }

    pub fn none() -> Self {
        IdlValue::Opt(None)
    }

    pub fn text(s: impl Into<String>) -> Self {
        IdlValue::Text(s.into())
    }

    pub fn variant(label: impl Into<String>, payload: IdlValue) -> Self {
        IdlValue::Variant(label.into(), Box::new(payload))
    }

    /// Build a tuple record with positional labels
    pub fn tuple(items: Vec<IdlValue>) -> Self {
        IdlValue::Record(
            items
                .into_iter()
                .enumerate()
                .map(|(i, v)| (i.to_string(), v))
                .collect(),
        )
    }

    fn is_tuple(fields: &[(String, IdlValue)]) -> bool {
        is_tuple_labels(fields.iter().map(|(l, _)| l.as_str()))
    }

    /// Multi-line rendering: compound values that do not fit in `width`
    /// columns are broken into one member per line.
    pub fn to_pretty_string(&self, width: usize) -> String {
        let mut out = String::new();
        write_pretty(&mut out, self, 0, width);
        out
    }
}

fn format_float(f: f64) -> String {
    let s = f.to_string();
    if s.contains(['.', 'e', 'i', 'N']) {
        s
    } else {
        format!("{}.0", s)
    }
}

/// Escape a text value for its quoted form
pub(crate) fn quote_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c if c.is_control() => out.push_str(&format!("\\u{{{:x}}}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

impl fmt::Display for IdlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdlValue::Null | IdlValue::Reserved => write!(f, "null"),
            IdlValue::Bool(b) => write!(f, "{}", b),
            IdlValue::Nat(n) => write!(f, "{}", n),
            IdlValue::Int(i) => write!(f, "{}", i),
            IdlValue::Float(x) => write!(f, "{}", format_float(*x)),
            IdlValue::Text(s) => write!(f, "{}", quote_text(s)),
            IdlValue::Opt(None) => write!(f, "null"),
            IdlValue::Opt(Some(inner)) => write!(f, "opt {}", inner),
            IdlValue::Vec(items) if items.is_empty() => write!(f, "vec {{}}"),
            IdlValue::Vec(items) => {
                write!(f, "vec {{ ")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, "; ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, " }}")
            }
            IdlValue::Record(fields) if fields.is_empty() => write!(f, "record {{}}"),
            IdlValue::Record(fields) => {
                let tuple = Self::is_tuple(fields);
                write!(f, "record {{ ")?;
                for (i, (label, value)) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, "; ")?;
                    }
                    if tuple {
                        write!(f, "{}", value)?;
                    } else {
                        write!(f, "{} = {}", display_label(label), value)?;
                    }
                }
                write!(f, " }}")
            }
            IdlValue::Variant(label, payload) => match payload.as_ref() {
                IdlValue::Null => write!(f, "variant {{ {} }}", display_label(label)),
                payload => write!(f, "variant {{ {} = {} }}", display_label(label), payload),
            },
        }
    }
}

fn write_indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
}

fn write_pretty(out: &mut String, value: &IdlValue, depth: usize, width: usize) {
    let flat = value.to_string();
    if depth * INDENT.len() + flat.chars().count() <= width {
        out.push_str(&flat);
        return;
    }

    match value {
        IdlValue::Opt(Some(inner)) => {
            out.push_str("opt ");
            write_pretty(out, inner, depth, width);
        }
        IdlValue::Vec(items) if !items.is_empty() => {
            out.push_str("vec {\n");
            for item in items {
                write_indent(out, depth + 1);
                write_pretty(out, item, depth + 1, width);
                out.push_str(";\n");
            }
            write_indent(out, depth);
            out.push('}');
        }
        IdlValue::Record(fields) if !fields.is_empty() => {
            let tuple = IdlValue::is_tuple(fields);
            out.push_str("record {\n");
            for (label, field) in fields {
                write_indent(out, depth + 1);
                if !tuple {
                    out.push_str(&display_label(label));
                    out.push_str(" = ");
                }
                write_pretty(out, field, depth + 1, width);
                out.push_str(";\n");
            }
            write_indent(out, depth);
            out.push('}');
        }
        IdlValue::Variant(label, payload) if **payload != IdlValue::Null => {
            out.push_str("variant {\n");
            write_indent(out, depth + 1);
            out.push_str(&display_label(label));
            out.push_str(" = ");
            write_pretty(out, payload, depth + 1, width);
            out.push('\n');
            write_indent(out, depth);
            out.push('}');
        }
        // Scalars are never broken
        _ => out.push_str(&flat),
    }
}

/// Format a positional value list as `(a, b, c)`
///
/// This is the canonical argument-list form used for call transcripts.
/// Lists that do not fit in `width` columns put one value per line.
pub fn format_args(values: &[IdlValue], width: usize) -> String {
    let flat = format!(
        "({})",
        values
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    );
    if flat.chars().count() <= width {
        return flat;
    }

    let mut out = String::from("(\n");
    for value in values {
        write_indent(&mut out, 1);
        write_pretty(&mut out, value, 1, width);
        out.push_str(",\n");
    }
    out.push(')');
    out
}

/// Format the return values of a call
///
/// A single value is shown bare; zero or several values use the
/// argument-list form.
pub fn format_returns(values: &[IdlValue], width: usize) -> String {
    match values {
        [single] => single.to_pretty_string(width),
        _ => format_args(values, width),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_display() {
        assert_eq!(IdlValue::Nat(5).to_string(), "5");
        assert_eq!(IdlValue::Int(-3).to_string(), "-3");
        assert_eq!(IdlValue::Bool(true).to_string(), "true");
        assert_eq!(IdlValue::Null.to_string(), "null");
        assert_eq!(IdlValue::Float(1.0).to_string(), "1.0");
        assert_eq!(IdlValue::Float(2.5).to_string(), "2.5");
    }

    #[test]
    fn test_text_is_quoted_and_escaped() {
        assert_eq!(IdlValue::text("hi").to_string(), "\"hi\"");
        assert_eq!(
            IdlValue::text("a\"b\nc").to_string(),
            "\"a\\\"b\\nc\""
        );
    }

    #[test]
    fn test_compound_display() {
        assert_eq!(IdlValue::some(IdlValue::Nat(1)).to_string(), "opt 1");
        assert_eq!(IdlValue::none().to_string(), "null");
        assert_eq!(
            IdlValue::Vec(vec![IdlValue::Nat(1), IdlValue::Nat(2)]).to_string(),
            "vec { 1; 2 }"
        );
        assert_eq!(IdlValue::Vec(vec![]).to_string(), "vec {}");
        assert_eq!(
            IdlValue::Record(vec![
                ("name".into(), IdlValue::text("Ada")),
                ("age".into(), IdlValue::Nat(36)),
            ])
            .to_string(),
            "record { name = \"Ada\"; age = 36 }"
        );
        assert_eq!(
            IdlValue::tuple(vec![IdlValue::Nat(1), IdlValue::text("x")]).to_string(),
            "record { 1; \"x\" }"
        );
        assert_eq!(
            IdlValue::variant("ok", IdlValue::Nat(5)).to_string(),
            "variant { ok = 5 }"
        );
        assert_eq!(
            IdlValue::variant("none", IdlValue::Null).to_string(),
            "variant { none }"
        );
    }

    #[test]
    fn test_format_args() {
        assert_eq!(
            format_args(&[IdlValue::Nat(2), IdlValue::Nat(3)], DEFAULT_TEXT_WIDTH),
            "(2, 3)"
        );
        assert_eq!(format_args(&[], DEFAULT_TEXT_WIDTH), "()");
    }

    #[test]
    fn test_format_returns_single_value_is_bare() {
        assert_eq!(format_returns(&[IdlValue::Nat(5)], DEFAULT_TEXT_WIDTH), "5");
        assert_eq!(format_returns(&[], DEFAULT_TEXT_WIDTH), "()");
        assert_eq!(
            format_returns(
                &[IdlValue::text("b"), IdlValue::Int(-1)],
                DEFAULT_TEXT_WIDTH
            ),
            "(\"b\", -1)"
        );
    }

    #[test]
    fn test_pretty_breaks_long_records() {
        let value = IdlValue::Record(vec![
            ("name".into(), IdlValue::text("Ada Lovelace")),
            ("tags".into(), IdlValue::Vec(vec![IdlValue::text("math")])),
        ]);
        let pretty = value.to_pretty_string(20);
        assert_eq!(
            pretty,
            "record {\n  name = \"Ada Lovelace\";\n  tags = vec { \"math\" };\n}"
        );
    }

    #[test]
    fn test_pretty_keeps_short_values_on_one_line() {
        let value = IdlValue::Vec(vec![IdlValue::Nat(1)]);
        assert_eq!(value.to_pretty_string(80), "vec { 1 }");
    }

    #[test]
    fn test_format_args_breaks_when_too_wide() {
        let long = IdlValue::text("x".repeat(30));
        let text = format_args(&[long.clone(), IdlValue::Nat(1)], 20);
        assert!(text.starts_with("(\n  \""));
        assert!(text.ends_with(",\n)"));
        assert_eq!(text.lines().count(), 4);
    }
}
