//! Display preparation for text coming from a service
//!
//! Service replies can contain anything: terminal escape sequences, bare
//! carriage returns, bells. Everything shown in the console or a result pane
//! goes through [`display_lines`] first so the terminal state cannot be
//! disturbed by a reply.

use regex::Regex;
use std::sync::LazyLock;

/// Terminal escape sequences: CSI, OSC and two-byte escapes
static ANSI_ESCAPE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?x)
        \x1b\[[0-9;?]*[ -/]*[@-~]            # CSI sequences
        | \x1b\][^\x07\x1b]*(?:\x07|\x1b\\)  # OSC sequences
        | \x1b[@-Z\\-_]                      # two-byte escapes
        ",
    )
    .expect("escape regex pattern is valid")
});

/// Width a tab expands to
const TAB_WIDTH: usize = 4;

/// Strip terminal escape sequences from a string
pub fn strip_ansi_codes(s: &str) -> String {
    ANSI_ESCAPE_PATTERN.replace_all(s, "").into_owned()
}

/// Returns true if the string contains any escape sequence
pub fn contains_ansi_codes(s: &str) -> bool {
    ANSI_ESCAPE_PATTERN.is_match(s)
}

/// Neutralise a single line: escapes removed, tabs expanded, carriage
/// returns dropped, remaining control characters replaced with U+FFFD.
pub fn sanitize_line(line: &str) -> String {
    let stripped = strip_ansi_codes(line);
    let mut out = String::with_capacity(stripped.len());
    for c in stripped.chars() {
        match c {
            '\t' => out.push_str(&" ".repeat(TAB_WIDTH)),
            '\r' => {}
            c if c.is_control() => out.push(char::REPLACEMENT_CHARACTER),
            c => out.push(c),
        }
    }
    out
}

/// Split text into display rows
///
/// Each line break starts a new row and leading spaces are kept, so
/// indentation from the pretty printer survives.
pub fn display_lines(text: &str) -> Vec<String> {
    text.split('\n').map(sanitize_line).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_color_codes() {
        assert_eq!(strip_ansi_codes("\x1b[31mred\x1b[0m"), "red");
        assert!(contains_ansi_codes("\x1b[1mbold"));
        assert!(!contains_ansi_codes("plain"));
    }

    #[test]
    fn test_strip_osc_hyperlink() {
        let s = "\x1b]8;;https://example.com\x07link\x1b]8;;\x07";
        assert_eq!(strip_ansi_codes(s), "link");
    }

    #[test]
    fn test_display_lines_split_and_keep_indent() {
        let lines = display_lines("record {\n  a = 1;\n}");
        assert_eq!(lines, vec!["record {", "  a = 1;", "}"]);
    }

    #[test]
    fn test_control_characters_are_replaced() {
        assert_eq!(sanitize_line("a\x07b"), "a\u{fffd}b");
        assert_eq!(sanitize_line("a\r"), "a");
        assert_eq!(sanitize_line("\tx"), "    x");
    }

    #[test]
    fn test_single_line_is_one_row() {
        assert_eq!(display_lines("5"), vec!["5"]);
    }
}
