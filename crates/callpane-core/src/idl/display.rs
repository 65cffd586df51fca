//! Display widgets: values laid out as an indented tree

use super::types::{display_label, IdlType};
use super::value::IdlValue;

/// One row of a display widget
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayRow {
    pub depth: usize,
    pub label: Option<String>,
    pub text: String,
}

/// Read-only widget showing one value of a declared type
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayWidget {
    pub ty: IdlType,
    pub rows: Vec<DisplayRow>,
}

/// Create an empty display widget for a return type
pub fn render_output(ty: &IdlType) -> DisplayWidget {
    DisplayWidget {
        ty: ty.clone(),
        rows: Vec::new(),
    }
}

/// Populate a display widget with a value
///
/// The tree follows the declared type. Where the value does not match the
/// type, the value's text form is shown as a single row.
pub fn render_value(ty: &IdlType, widget: &mut DisplayWidget, value: &IdlValue) {
    widget.rows.clear();
    push_rows(&mut widget.rows, 0, None, ty, value);
}

fn row(rows: &mut Vec<DisplayRow>, depth: usize, label: Option<String>, text: impl Into<String>) {
    rows.push(DisplayRow {
        depth,
        label,
        text: text.into(),
    });
}

fn push_rows(
    rows: &mut Vec<DisplayRow>,
    depth: usize,
    label: Option<String>,
    ty: &IdlType,
    value: &IdlValue,
) {
    match (ty, value) {
        (IdlType::Opt(inner), IdlValue::Opt(Some(v))) => push_rows(rows, depth, label, inner, v),
        (IdlType::Opt(_), IdlValue::Opt(None)) => row(rows, depth, label, "null"),
        (IdlType::Vec(_), IdlValue::Vec(items)) if items.is_empty() => {
            row(rows, depth, label, "vec {}")
        }
        (IdlType::Vec(inner), IdlValue::Vec(items)) => {
            let noun = if items.len() == 1 { "item" } else { "items" };
            row(rows, depth, label, format!("vec ({} {})", items.len(), noun));
            for (i, item) in items.iter().enumerate() {
                push_rows(rows, depth + 1, Some(format!("[{}]", i)), inner, item);
            }
        }
        (IdlType::Record(fields), IdlValue::Record(values)) => {
            let tuple = ty.is_tuple();
            row(rows, depth, label, if tuple { "tuple" } else { "record" });
            for (field_label, v) in values {
                let shown = if tuple {
                    format!("[{}]", field_label)
                } else {
                    display_label(field_label)
                };
                match fields.iter().find(|f| &f.label == field_label) {
                    Some(field) => push_rows(rows, depth + 1, Some(shown), &field.ty, v),
                    None => row(rows, depth + 1, Some(shown), v.to_string()),
                }
            }
        }
        (IdlType::Variant(arms), IdlValue::Variant(arm_label, payload)) => {
            row(
                rows,
                depth,
                label,
                format!("variant {}", display_label(arm_label)),
            );
            if **payload != IdlValue::Null {
                let arm_ty = arms
                    .iter()
                    .find(|a| &a.label == arm_label)
                    .map(|a| a.ty.clone())
                    .unwrap_or(IdlType::Reserved);
                push_rows(
                    rows,
                    depth + 1,
                    Some(display_label(arm_label)),
                    &arm_ty,
                    payload,
                );
            }
        }
        (_, value) => row(rows, depth, label, value.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::idl::types::Field;

    fn rows(ty: &IdlType, value: &IdlValue) -> Vec<(usize, Option<String>, String)> {
        let mut widget = render_output(ty);
        render_value(ty, &mut widget, value);
        widget
            .rows
            .into_iter()
            .map(|r| (r.depth, r.label, r.text))
            .collect()
    }

    #[test]
    fn test_scalar_is_one_row() {
        assert_eq!(
            rows(&IdlType::Nat, &IdlValue::Nat(5)),
            vec![(0, None, "5".to_string())]
        );
    }

    #[test]
    fn test_record_tree() {
        let ty = IdlType::Record(vec![
            Field::new("name", IdlType::Text),
            Field::new("tags", IdlType::vec(IdlType::Text)),
        ]);
        let value = IdlValue::Record(vec![
            ("name".into(), IdlValue::text("Ada")),
            ("tags".into(), IdlValue::Vec(vec![IdlValue::text("math")])),
        ]);
        assert_eq!(
            rows(&ty, &value),
            vec![
                (0, None, "record".to_string()),
                (1, Some("name".to_string()), "\"Ada\"".to_string()),
                (1, Some("tags".to_string()), "vec (1 item)".to_string()),
                (2, Some("[0]".to_string()), "\"math\"".to_string()),
            ]
        );
    }

    #[test]
    fn test_opt_and_variant() {
        let ty = IdlType::opt(IdlType::Variant(vec![
            Field::new("ok", IdlType::Nat),
            Field::new("none", IdlType::Null),
        ]));
        assert_eq!(
            rows(&ty, &IdlValue::some(IdlValue::variant("ok", IdlValue::Nat(1)))),
            vec![
                (0, None, "variant ok".to_string()),
                (1, Some("ok".to_string()), "1".to_string()),
            ]
        );
        assert_eq!(
            rows(&ty, &IdlValue::some(IdlValue::variant("none", IdlValue::Null))),
            vec![(0, None, "variant none".to_string())]
        );
        assert_eq!(
            rows(&ty, &IdlValue::none()),
            vec![(0, None, "null".to_string())]
        );
    }

    #[test]
    fn test_mismatched_value_falls_back_to_text() {
        assert_eq!(
            rows(&IdlType::vec(IdlType::Nat), &IdlValue::text("x")),
            vec![(0, None, "\"x\"".to_string())]
        );
    }

    #[test]
    fn test_rendering_twice_replaces_rows() {
        let mut widget = render_output(&IdlType::Nat);
        render_value(&IdlType::Nat, &mut widget, &IdlValue::Nat(1));
        render_value(&IdlType::Nat, &mut widget, &IdlValue::Nat(2));
        assert_eq!(widget.rows.len(), 1);
        assert_eq!(widget.rows[0].text, "2");
    }
}
