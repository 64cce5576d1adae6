//! Rendering primitives for CLI output.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::{ASCII_MARKDOWN, UTF8_FULL};
use comfy_table::{Attribute, Cell, ContentArrangement, Table};

use super::context::UiContext;
use super::theme::{styled, styles, Badge};

/// Render a badge followed by `message`.
pub fn badge(ctx: &UiContext, kind: Badge, message: &str) -> String {
    let colored = styled(kind.display(ctx.unicode), kind.style(), ctx.color);
    if message.is_empty() {
        colored
    } else {
        format!("{} {}", colored, message)
    }
}

/// Pretty mode: "Key: value" with a dim key. Otherwise "key=value".
pub fn kv(ctx: &UiContext, key: &str, value: &str) -> String {
    if ctx.mode.is_pretty() {
        let label = styled(&format!("{}:", key), styles::dim(), ctx.color);
        format!("{} {}", label, value)
    } else {
        format!("{}={}", key.to_lowercase().replace(' ', "_"), value)
    }
}

pub fn hint(ctx: &UiContext, text: &str) -> String {
    if ctx.mode.is_pretty() {
        format!("{} {}", styled("Hint:", styles::dim(), ctx.color), text)
    } else {
        format!("hint={}", text)
    }
}

/// Summary block printed after an action.
///
/// Pretty mode: badge plus indented key-value pairs.
/// Plain mode: `status=ok` followed by `key=value` lines.
pub fn receipt(ctx: &UiContext, title: &str, items: &[(&str, &str)]) -> String {
    let mut lines = Vec::with_capacity(items.len() + 1);
    if ctx.mode.is_pretty() {
        lines.push(badge(ctx, Badge::Ok, title));
        for (key, value) in items {
            lines.push(format!("  {}", kv(ctx, key, value)));
        }
    } else {
        lines.push("status=ok".to_string());
        for (key, value) in items {
            lines.push(kv(ctx, key, value));
        }
    }
    lines.join("\n")
}

/// A table row; muted rows are dimmed in pretty mode.
#[derive(Debug, Clone)]
pub struct Row {
    pub cells: Vec<String>,
    pub muted: bool,
}

impl Row {
    pub fn new(cells: Vec<String>) -> Self {
        Self {
            cells,
            muted: false,
        }
    }

    pub fn muted(mut self, muted: bool) -> Self {
        self.muted = muted;
        self
    }
}

/// Bordered table in pretty mode, tab-separated rows otherwise.
pub fn table(ctx: &UiContext, headers: &[&str], rows: &[Row]) -> String {
    if !ctx.mode.is_pretty() {
        return rows
            .iter()
            .map(|row| row.cells.join("\t"))
            .collect::<Vec<_>>()
            .join("\n");
    }

    let mut table = Table::new();
    if ctx.unicode {
        table
            .load_preset(UTF8_FULL)
            .apply_modifier(UTF8_ROUND_CORNERS);
    } else {
        table.load_preset(ASCII_MARKDOWN);
    }
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(headers.to_vec());
    for row in rows {
        table.add_row(row.cells.iter().map(|text| {
            let cell = Cell::new(text);
            if row.muted && ctx.color {
                cell.add_attribute(Attribute::Dim)
            } else {
                cell
            }
        }));
    }
    table.to_string()
}

pub fn warning(ctx: &UiContext, message: &str) -> String {
    if ctx.mode.is_pretty() {
        badge(ctx, Badge::Warn, message)
    } else {
        format!("warning={}", message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::mode::OutputMode;

    fn ctx(mode: OutputMode) -> UiContext {
        UiContext {
            color: false,
            unicode: false,
            interactive: false,
            mode,
        }
    }

    #[test]
    fn test_receipt_pretty() {
        let out = receipt(
            &ctx(OutputMode::Pretty),
            "Entry added",
            &[("ID", "abc"), ("Description", "Standup")],
        );
        assert_eq!(out, "[OK] Entry added\n  ID: abc\n  Description: Standup");
    }

    #[test]
    fn test_receipt_plain() {
        let out = receipt(&ctx(OutputMode::Plain), "Entry added", &[("Entry ID", "abc")]);
        assert_eq!(out, "status=ok\nentry_id=abc");
    }

    #[test]
    fn test_warning_and_hint() {
        assert_eq!(warning(&ctx(OutputMode::Pretty), "unsaved"), "[WARN] unsaved");
        assert_eq!(warning(&ctx(OutputMode::Plain), "unsaved"), "warning=unsaved");
        assert_eq!(hint(&ctx(OutputMode::Plain), "try again"), "hint=try again");
    }

    #[test]
    fn test_table_plain_is_tab_separated() {
        let rows = vec![
            Row::new(vec!["a".to_string(), "b".to_string()]),
            Row::new(vec!["c".to_string(), "d".to_string()]).muted(true),
        ];
        let out = table(&ctx(OutputMode::Plain), &["X", "Y"], &rows);
        assert_eq!(out, "a\tb\nc\td");
    }

    #[test]
    fn test_table_pretty_has_headers() {
        let rows = vec![Row::new(vec!["1".to_string(), "Standup".to_string()])];
        let out = table(&ctx(OutputMode::Pretty), &["ID", "Description"], &rows);
        assert!(out.contains("ID"));
        assert!(out.contains("Standup"));
    }
}
