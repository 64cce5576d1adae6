//! Entry and template listings in every output mode.

use serde_json::{json, Value};

use timelog_core::format::escape_for_display;
use timelog_core::storage::timestamp::canonical;
use timelog_core::{Template, View};

use super::context::UiContext;
use super::mode::OutputMode;
use super::render::{table, Row};
use super::theme::{styled, styles};

const EMPTY_ENTRIES: &str = "No entries yet.";
const EMPTY_TEMPLATES: &str = "No templates yet.";

/// Render the newest `limit` entries of `view`.
pub fn entries(ctx: &UiContext, view: &View<'_>, limit: Option<usize>) -> String {
    let shown = &view.entries[..limit.unwrap_or(usize::MAX).min(view.entries.len())];

    match ctx.mode {
        OutputMode::Json => {
            let items: Vec<Value> = shown
                .iter()
                .map(|entry| {
                    json!({
                        "id": entry.id.as_str(),
                        "timestamp": canonical(&entry.timestamp),
                        "display": view.timestamp(entry),
                        "description": entry.description,
                        "notes": entry.notes,
                        "quick": entry.is_quick(),
                    })
                })
                .collect();
            Value::Array(items).to_string()
        }
        OutputMode::Html => entries_html(view, shown),
        OutputMode::Pretty | OutputMode::Plain => {
            if shown.is_empty() {
                return if ctx.mode.is_pretty() {
                    styled(EMPTY_ENTRIES, styles::dim(), ctx.color)
                } else {
                    String::new()
                };
            }
            let rows: Vec<Row> = shown
                .iter()
                .map(|entry| {
                    Row::new(vec![
                        entry.id.to_string(),
                        view.timestamp(entry),
                        entry.description.clone(),
                        entry.notes.clone().unwrap_or_default(),
                    ])
                    .muted(entry.is_quick())
                })
                .collect();
            let mut out = table(ctx, &["ID", "Time", "Description", "Notes"], &rows);
            if ctx.mode.is_pretty() && shown.len() < view.entries.len() {
                let more = format!(
                    "Showing {} of {} entries",
                    shown.len(),
                    view.entries.len()
                );
                out.push('\n');
                out.push_str(&styled(&more, styles::dim(), ctx.color));
            }
            out
        }
    }
}

fn entries_html(view: &View<'_>, shown: &[timelog_core::Entry]) -> String {
    if shown.is_empty() {
        return format!("<p class=\"empty\">{}</p>", EMPTY_ENTRIES);
    }
    let mut out = String::from("<ul class=\"entries\">\n");
    for entry in shown {
        let class = if entry.is_quick() { "entry quick" } else { "entry" };
        out.push_str(&format!(
            "  <li class=\"{}\" data-id=\"{}\"><time datetime=\"{}\">{}</time> <span class=\"description\">{}</span>",
            class,
            escape_for_display(entry.id.as_str()),
            canonical(&entry.timestamp),
            escape_for_display(&view.timestamp(entry)),
            escape_for_display(&entry.description),
        ));
        if let Some(notes) = &entry.notes {
            out.push_str(&format!(
                "<p class=\"notes\">{}</p>",
                escape_for_display(notes)
            ));
        }
        out.push_str("</li>\n");
    }
    out.push_str("</ul>");
    out
}

/// Render saved templates in insertion order.
pub fn templates(ctx: &UiContext, templates: &[Template]) -> String {
    match ctx.mode {
        OutputMode::Json => {
            let items: Vec<Value> = templates
                .iter()
                .map(|t| json!({ "id": t.id.as_str(), "name": t.name }))
                .collect();
            Value::Array(items).to_string()
        }
        OutputMode::Html => {
            if templates.is_empty() {
                return format!("<p class=\"empty\">{}</p>", EMPTY_TEMPLATES);
            }
            let items: Vec<String> = templates
                .iter()
                .map(|t| {
                    format!(
                        "  <li data-id=\"{}\">{}</li>",
                        escape_for_display(t.id.as_str()),
                        escape_for_display(&t.name)
                    )
                })
                .collect();
            format!("<ul class=\"templates\">\n{}\n</ul>", items.join("\n"))
        }
        OutputMode::Pretty | OutputMode::Plain => {
            if templates.is_empty() {
                return if ctx.mode.is_pretty() {
                    styled(EMPTY_TEMPLATES, styles::dim(), ctx.color)
                } else {
                    String::new()
                };
            }
            let rows: Vec<Row> = templates
                .iter()
                .map(|t| Row::new(vec![t.id.to_string(), t.name.clone()]))
                .collect();
            table(ctx, &["ID", "Name"], &rows)
        }
    }
}
