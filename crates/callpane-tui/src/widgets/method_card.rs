//! Method card widget: one form with its buttons and result area

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{StatefulWidget, Widget},
};
use unicode_width::UnicodeWidthChar;

use callpane_app::{FormFocus, HitMap, HitTarget, MethodEntry};
use callpane_core::{sanitize_line, InputKind, InputWidget, ServiceInterface};

use super::{result_rows, CardRow};
use crate::theme::styles;

/// Narrowest an edit field gets
const FIELD_MIN_WIDTH: usize = 8;

/// A method's signature, inputs, buttons and result pane
///
/// Rendering records every clickable part in the [`HitMap`].
pub struct MethodCard<'a> {
    entry: &'a MethodEntry,
    index: usize,
    selected: bool,
    max_result_lines: Option<usize>,
}

impl<'a> MethodCard<'a> {
    pub fn new(entry: &'a MethodEntry, index: usize) -> Self {
        Self {
            entry,
            index,
            selected: false,
            max_result_lines: None,
        }
    }

    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    /// Cap the result body; the selected card is never capped
    pub fn max_result_lines(mut self, max: usize) -> Self {
        self.max_result_lines = Some(max);
        self
    }

    /// Rows needed at `width`, borders included
    pub fn height(&self, width: u16) -> u16 {
        let rows = self.rows(width.saturating_sub(2)).len();
        u16::try_from(rows + 2).unwrap_or(u16::MAX)
    }

    fn focus(&self) -> Option<FormFocus> {
        self.selected.then_some(self.entry.form.focus)
    }

    fn title(&self) -> Line<'static> {
        let signature = &self.entry.signature;
        let name_style = if self.selected {
            styles::accent_bold()
        } else {
            styles::text_secondary()
        };
        Line::from(vec![
            Span::styled(
                format!(" {}", sanitize_line(&ServiceInterface::display_name(signature))),
                name_style,
            ),
            Span::styled(
                format!(" : {} ", sanitize_line(&signature.to_string())),
                styles::text_muted(),
            ),
        ])
    }

    fn rows(&self, width: u16) -> Vec<CardRow> {
        let mut rows: Vec<CardRow> = self
            .entry
            .form
            .inputs
            .iter()
            .enumerate()
            .map(|(arg, input)| self.input_row(arg, input, width))
            .collect();

        rows.push(self.button_row());

        let focused = self.focus() == Some(FormFocus::Result);
        let max_lines = if self.selected {
            None
        } else {
            self.max_result_lines
        };
        rows.extend(result_rows(
            &self.entry.result,
            self.index,
            focused,
            width,
            max_lines,
        ));
        rows
    }

    fn input_row(&self, arg: usize, input: &InputWidget, width: u16) -> CardRow {
        let focused = self.focus() == Some(FormFocus::Input(arg));
        let label = format!("  {}: ", sanitize_line(&self.entry.signature.arg_label(arg)));
        let label_width = Line::from(label.as_str()).width();

        let rejection = input
            .rejection()
            .map(|reason| format!("  ✗ {}", sanitize_line(reason)));
        let rejection_width = rejection
            .as_deref()
            .map(|r| Line::from(r).width())
            .unwrap_or(0);

        let field_width = (width as usize)
            .saturating_sub(label_width + rejection_width + 1)
            .max(FIELD_MIN_WIDTH);

        let mut spans = vec![Span::styled(
            label,
            if focused {
                styles::text_primary()
            } else {
                styles::text_secondary()
            },
        )];
        spans.extend(field_spans(input, focused, field_width));
        if let Some(rejection) = rejection {
            spans.push(Span::styled(rejection, styles::status_red()));
        }

        CardRow::new(Line::from(spans)).target(HitTarget::Input {
            method: self.index,
            arg,
        })
    }

    fn button_row(&self) -> CardRow {
        let invoke = format!(" {} ", self.entry.invoke_label());
        let lucky = " Lucky ".to_string();
        let invoke_width = invoke.len() as u16;
        let lucky_x = 2 + invoke_width + 2;
        let lucky_width = lucky.len() as u16;

        let focus = self.focus();
        let line = Line::from(vec![
            Span::raw("  "),
            Span::styled(invoke, styles::button(focus == Some(FormFocus::Invoke))),
            Span::raw("  "),
            Span::styled(lucky, styles::lucky_button(focus == Some(FormFocus::Lucky))),
        ]);

        CardRow::new(line)
            .target_span(2, invoke_width, HitTarget::Invoke(self.index))
            .target_span(lucky_x, lucky_width, HitTarget::Lucky(self.index))
    }
}

/// The edit field of one input, padded to `width` cells
fn field_spans(input: &InputWidget, focused: bool, width: usize) -> Vec<Span<'static>> {
    let style = styles::input_field(focused, input.is_rejected());

    match input.kind {
        InputKind::Fixed => vec![Span::styled(input.ty.to_string(), styles::text_muted())],
        InputKind::Toggle => {
            let mark = if input.is_checked() { "[x]" } else { "[ ]" };
            vec![Span::styled(mark, style)]
        }
        InputKind::Text | InputKind::Number | InputKind::Literal => {
            // One display char per buffer char so the cursor index holds
            let chars: Vec<char> = input
                .buffer()
                .chars()
                .map(|c| {
                    if c.is_control() {
                        char::REPLACEMENT_CHARACTER
                    } else {
                        c
                    }
                })
                .collect();

            if !focused {
                let (shown, used) = take_width(&chars, width);
                return vec![Span::styled(pad(shown, width - used), style)];
            }

            let cursor = input.cursor().min(chars.len());
            // Scroll so the cursor cell stays visible
            let mut start = 0;
            while start < cursor && chars_width(&chars[start..cursor]) + 1 > width {
                start += 1;
            }
            let (before, before_used) = take_width(&chars[start..cursor], width);
            let under = chars.get(cursor).copied().unwrap_or(' ');
            let under_width = under.width().unwrap_or(1).max(1);
            let rest = width.saturating_sub(before_used + under_width);
            let (after, after_used) = match chars.get(cursor + 1..) {
                Some(tail) => take_width(tail, rest),
                None => (String::new(), 0),
            };

            vec![
                Span::styled(before, style),
                Span::styled(under.to_string(), styles::cursor()),
                Span::styled(pad(after, rest - after_used), style),
            ]
        }
    }
}

fn chars_width(chars: &[char]) -> usize {
    chars.iter().map(|c| c.width().unwrap_or(0)).sum()
}

/// Leading chars that fit in `width` cells, and the cells they use
fn take_width(chars: &[char], width: usize) -> (String, usize) {
    let mut used = 0;
    let mut out = String::new();
    for &c in chars {
        let w = c.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        out.push(c);
    }
    (out, used)
}

fn pad(mut text: String, spaces: usize) -> String {
    text.push_str(&" ".repeat(spaces));
    text
}

impl StatefulWidget for MethodCard<'_> {
    type State = HitMap;

    fn render(self, area: Rect, buf: &mut Buffer, hit_map: &mut HitMap) {
        let block = styles::glass_block(self.selected).title(self.title());
        let inner = block.inner(area);
        block.render(area, buf);

        hit_map.push(
            area.x,
            area.y,
            area.width,
            area.height,
            HitTarget::Method(self.index),
        );

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let right = inner.x + inner.width;
        let rows = self.rows(inner.width);
        for (row, y) in rows.iter().zip(inner.y..inner.y + inner.height) {
            buf.set_line(inner.x, y, &row.line, inner.width);
            for &(offset, width, target) in &row.targets {
                let x = inner.x.saturating_add(offset);
                if x >= right {
                    continue;
                }
                hit_map.push(x, y, width.min(right - x), 1, target);
            }
        }
    }
}
