//! Result area of a method card: the three views of a finished call

use ratatui::text::{Line, Span};

use callpane_app::{HitTarget, RenderedResult, ResultPane, ResultView};
use callpane_core::{display_lines, sanitize_line};

use super::CardRow;
use crate::theme::styles;

/// Left margin inside a card
const INDENT: &str = "  ";

/// Build the rows of a result pane
///
/// `max_lines` caps the body of a finished result; the rest is summarised
/// in one trailing row.
pub fn result_rows(
    pane: &ResultPane,
    method: usize,
    focused: bool,
    width: u16,
    max_lines: Option<usize>,
) -> Vec<CardRow> {
    let target = HitTarget::Result(method);
    match pane {
        ResultPane::Hidden => Vec::new(),
        ResultPane::Waiting => vec![CardRow::new(Line::from(vec![
            Span::raw(INDENT),
            Span::styled("Waiting...", styles::status_yellow()),
        ]))
        .target(target)],
        ResultPane::Failed(message) => {
            let mut rows = vec![CardRow::new(Line::from(vec![
                Span::raw(INDENT),
                Span::styled("✗ Call failed", header_style(focused, true)),
            ]))
            .target(target)];
            rows.extend(display_lines(message).into_iter().map(|line| {
                CardRow::new(Line::from(vec![
                    Span::raw(INDENT),
                    Span::styled(line, styles::status_red()),
                ]))
                .target(target)
            }));
            rows
        }
        ResultPane::Ready(rendered) => {
            let mut rows = vec![CardRow::new(title_line(rendered, focused, width)).target(target)];
            let body = body_lines(rendered);
            let total = body.len();
            let shown = match max_lines {
                Some(max) if total > max => max,
                _ => total,
            };
            rows.extend(
                body.into_iter()
                    .take(shown)
                    .map(|line| CardRow::new(line).target(target)),
            );
            if shown < total {
                rows.push(
                    CardRow::new(Line::from(vec![
                        Span::raw(INDENT),
                        Span::styled(
                            format!("… {} more line(s)", total - shown),
                            styles::text_muted(),
                        ),
                    ]))
                    .target(target),
                );
            }
            rows
        }
    }
}

fn header_style(focused: bool, failed: bool) -> ratatui::style::Style {
    match (focused, failed) {
        (true, _) => styles::focused_selected(),
        (false, true) => styles::status_red(),
        (false, false) => styles::accent_bold(),
    }
}

/// View name on the left, elapsed seconds on the right
fn title_line(rendered: &RenderedResult, focused: bool, width: u16) -> Line<'static> {
    let label = format!("─ {} ─", rendered.view.label());
    let elapsed = format!("{:.3}s", rendered.elapsed.as_secs_f64());

    let used = INDENT.len() + label.chars().count() + elapsed.len() + 1;
    let padding = (width as usize).saturating_sub(used).max(1);

    Line::from(vec![
        Span::raw(INDENT),
        Span::styled(label, header_style(focused, false)),
        Span::raw(" ".repeat(padding)),
        Span::styled(elapsed, styles::text_muted()),
    ])
}

fn body_lines(rendered: &RenderedResult) -> Vec<Line<'static>> {
    match rendered.view {
        ResultView::Text => rendered
            .text
            .iter()
            .map(|line| {
                Line::from(vec![
                    Span::raw(INDENT),
                    Span::styled(line.clone(), styles::text_primary()),
                ])
            })
            .collect(),
        ResultView::Structured => rendered
            .structured
            .iter()
            .flat_map(|widget| widget.rows.iter())
            .map(|row| {
                let mut spans = vec![Span::raw(format!("{}{}", INDENT, "  ".repeat(row.depth)))];
                if let Some(label) = &row.label {
                    spans.push(Span::styled(
                        format!("{}: ", sanitize_line(label)),
                        styles::text_secondary(),
                    ));
                }
                spans.push(Span::styled(sanitize_line(&row.text), styles::text_primary()));
                Line::from(spans)
            })
            .collect(),
        ResultView::Raw => rendered
            .raw
            .iter()
            .map(|line| {
                Line::from(vec![
                    Span::raw(INDENT),
                    Span::styled(line.clone(), styles::text_muted()),
                ])
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use callpane_app::CallResult;
    use callpane_core::{Field, IdlType, IdlValue};
    use callpane_service::Reply;
    use serde_json::json;
    use std::time::Duration;

    fn text_of(rows: &[CardRow]) -> Vec<String> {
        rows.iter().map(|row| row.line.to_string()).collect()
    }

    fn ready(values: Vec<IdlValue>, rets: &[IdlType], raw: Reply) -> ResultPane {
        let result = CallResult {
            values,
            raw,
            elapsed: Duration::from_millis(1500),
        };
        ResultPane::Ready(RenderedResult::new(&result, rets, 80))
    }

    #[test]
    fn test_hidden_pane_has_no_rows() {
        assert!(result_rows(&ResultPane::Hidden, 0, false, 60, None).is_empty());
    }

    #[test]
    fn test_waiting_row() {
        let rows = result_rows(&ResultPane::Waiting, 3, false, 60, None);
        assert_eq!(text_of(&rows), vec!["  Waiting..."]);
        assert_eq!(rows[0].targets[0].2, HitTarget::Result(3));
    }

    #[test]
    fn test_failed_pane_shows_message() {
        let rows = result_rows(&ResultPane::Failed("boom".into()), 0, false, 60, None);
        let text = text_of(&rows);
        assert_eq!(text[0], "  ✗ Call failed");
        assert_eq!(text[1], "  boom");
    }

    #[test]
    fn test_text_view_right_aligns_elapsed() {
        let pane = ready(vec![IdlValue::Nat(5)], &[IdlType::Nat], Reply::Single(json!(5)));
        let rows = result_rows(&pane, 0, false, 40, None);
        let text = text_of(&rows);

        assert!(text[0].starts_with("  ─ Text ─"));
        assert!(text[0].ends_with("1.500s"));
        assert_eq!(text[0].chars().count(), 39);
        assert_eq!(text[1], "  5");
    }

    #[test]
    fn test_structured_view_indents_by_depth() {
        let ty = IdlType::Record(vec![Field::new("name", IdlType::Text)]);
        let value = IdlValue::Record(vec![("name".into(), IdlValue::text("Ada"))]);
        let mut pane = ready(
            vec![value],
            &[ty],
            Reply::Single(json!({"name": "Ada"})),
        );
        pane.cycle();

        let text = text_of(&result_rows(&pane, 0, false, 60, None));
        assert!(text[0].contains("Structured"));
        assert_eq!(text[1], "  record");
        assert_eq!(text[2], "    name: \"Ada\"");
    }

    #[test]
    fn test_raw_view_shows_reply_json() {
        let mut pane = ready(vec![IdlValue::Nat(5)], &[IdlType::Nat], Reply::Single(json!(5)));
        pane.cycle();
        pane.cycle();

        let text = text_of(&result_rows(&pane, 0, false, 60, None));
        assert!(text[0].contains("Raw"));
        assert_eq!(text[1], "  5");
    }

    #[test]
    fn test_long_body_is_capped() {
        let values = vec![IdlValue::Vec((0..10).map(IdlValue::Nat).collect())];
        let rets = [IdlType::vec(IdlType::Nat)];
        let mut pane = ready(values, &rets, Reply::Single(json!([0, 1, 2, 3, 4, 5, 6, 7, 8, 9])));
        pane.cycle();

        let rows = result_rows(&pane, 0, false, 60, Some(3));
        let text = text_of(&rows);
        assert_eq!(rows.len(), 5); // title + 3 + summary
        assert!(text[4].contains("more line(s)"));

        let full = result_rows(&pane, 0, false, 60, None);
        assert_eq!(full.len(), 12); // title + vec row + 10 items
    }
}
