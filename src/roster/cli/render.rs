//! # Rendering Module
//!
//! Styled terminal output using the `outstanding` crate. Renderers turn the
//! library's view models ([`TableView`], [`FormView`], [`CmdMessage`]) into
//! template data and render it with automatic terminal color detection.
//!
//! Layout calculations (column widths, padding) stay in Rust because they need
//! Unicode-aware widths. Templates only choose styles.
//!
//! ## Overflow
//!
//! A table taller than the configured threshold (counted in lines: header,
//! rule, and one line per row) is not printed in full. Only a window of rows is
//! shown, starting at the requested offset, followed by a footer telling the
//! user which rows they are looking at.

use super::styles::{names, ROSTER_THEME};
use super::templates::{FORM_TEMPLATE, MESSAGES_TEMPLATE, TABLE_TEMPLATE, TEXT_LIST_TEMPLATE};
use outstanding::{render, render_with_color, ThemeChoice};
use roster::api::{CmdMessage, MessageLevel};
use roster::view::{FormView, Focus, Overflow, RowView, TableView, TABLE_HEADERS};
use serde::Serialize;
use unicode_width::UnicodeWidthStr;

pub const COLUMN_GAP: &str = "  ";
const INDEX_HEADER: &str = "#";
const RULE_CHAR: &str = "─";
/// Header and rule.
const HEADER_LINES: usize = 2;

#[derive(Serialize)]
struct TableData {
    empty: bool,
    empty_message: String,
    header: String,
    rule: String,
    rows: Vec<RowData>,
    footer: String,
}

#[derive(Serialize)]
struct RowData {
    index: String,
    cells: String,
    actions: String,
}

#[derive(Serialize)]
struct FormData {
    title: String,
    fields: Vec<FieldData>,
    actions: String,
    hint: String,
}

#[derive(Serialize)]
struct FieldData {
    marker: String,
    label: String,
    value: String,
    locked: bool,
    error: Option<String>,
    error_indent: String,
}

#[derive(Serialize)]
struct TextListData {
    lines: Vec<String>,
    empty_message: String,
}

#[derive(Serialize)]
struct MessageData {
    content: String,
    style: String,
}

#[derive(Serialize)]
struct MessagesData {
    messages: Vec<MessageData>,
}

/// The rows of a scrolled table that are on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub start: usize,
    pub end: usize,
    pub total: usize,
}

impl Window {
    /// Picks the visible rows for a table of `total` rows, or `None` when the
    /// whole table fits under `threshold` lines.
    pub fn for_table(total: usize, threshold: usize, offset: usize) -> Option<Self> {
        let measured = HEADER_LINES + total;
        match Overflow::for_height(measured, threshold) {
            Overflow::Natural => None,
            Overflow::Scroll { max_height } => {
                // Header, rule and footer always stay visible
                let capacity = max_height.saturating_sub(HEADER_LINES + 1).max(1);
                let start = offset.min(total.saturating_sub(capacity));
                let end = (start + capacity).min(total);
                Some(Self { start, end, total })
            }
        }
    }

    pub fn footer(&self) -> String {
        let mut footer = format!(
            "Rows {}-{} of {}",
            self.start + 1,
            self.end,
            self.total
        );
        if self.end < self.total {
            footer.push_str(&format!(" (--offset {} for more)", self.end));
        }
        footer
    }
}

/// Renders the roster table, windowed when it is taller than `threshold`.
pub fn render_table(view: &TableView, threshold: usize, offset: usize) -> String {
    render_table_internal(view, threshold, offset, None)
}

fn render_table_internal(
    view: &TableView,
    threshold: usize,
    offset: usize,
    use_color: Option<bool>,
) -> String {
    let rows = match view {
        TableView::Empty { message } => {
            let data = TableData {
                empty: true,
                empty_message: message.to_string(),
                header: String::new(),
                rule: String::new(),
                rows: vec![],
                footer: String::new(),
            };
            return render_or(TABLE_TEMPLATE, &data, use_color, |_| format!("{}\n", message));
        }
        TableView::Rows(rows) => rows,
    };

    let index_width = rows
        .iter()
        .map(|r| index_label(r).width())
        .chain(std::iter::once(INDEX_HEADER.width()))
        .max()
        .unwrap_or(0);
    let mut cell_widths = [0usize; 4];
    for (i, width) in cell_widths.iter_mut().enumerate() {
        *width = rows
            .iter()
            .map(|r| r.cells()[i].width())
            .chain(std::iter::once(TABLE_HEADERS[i].width()))
            .max()
            .unwrap_or(0);
    }

    let header_cells: Vec<String> = TABLE_HEADERS[..4]
        .iter()
        .zip(cell_widths)
        .map(|(h, w)| pad_to_width(h, w))
        .collect();
    let header = format!(
        "{}{}{}{}{}",
        pad_to_width(INDEX_HEADER, index_width),
        COLUMN_GAP,
        header_cells.join(COLUMN_GAP),
        COLUMN_GAP,
        TABLE_HEADERS[4]
    );
    let rule = RULE_CHAR.repeat(header.width());

    let window = Window::for_table(rows.len(), threshold, offset);
    let visible = match window {
        Some(w) => &rows[w.start..w.end],
        None => &rows[..],
    };

    let row_data = visible
        .iter()
        .map(|row| {
            let cells: Vec<String> = row
                .cells()
                .iter()
                .zip(cell_widths)
                .map(|(c, w)| pad_to_width(c, w))
                .collect();
            RowData {
                index: format!("{}{}", pad_to_width(&index_label(row), index_width), COLUMN_GAP),
                cells: format!("{}{}", cells.join(COLUMN_GAP), COLUMN_GAP),
                actions: action_hint(row),
            }
        })
        .collect();

    let data = TableData {
        empty: false,
        empty_message: String::new(),
        header,
        rule,
        rows: row_data,
        footer: window.map(|w| w.footer()).unwrap_or_default(),
    };

    render_or(TABLE_TEMPLATE, &data, use_color, |e| format!("Render error: {}\n", e))
}

/// Renders the student form.
pub fn render_form(view: &FormView, hint: &str) -> String {
    render_form_internal(view, hint, None)
}

fn render_form_internal(view: &FormView, hint: &str, use_color: Option<bool>) -> String {
    let label_width = view
        .fields
        .iter()
        .map(|f| f.label.width() + 2)
        .max()
        .unwrap_or(0);
    let marker_width = 2;

    let fields = view
        .fields
        .iter()
        .map(|f| {
            let focused = view.focus == Some(Focus::Field(f.field));
            FieldData {
                marker: if focused { "> " } else { "  " }.to_string(),
                label: pad_to_width(&format!("{}: ", f.label), label_width),
                value: roster::view::sanitize(&f.value),
                locked: f.locked,
                error: f.error.clone(),
                error_indent: " ".repeat(marker_width + label_width),
            }
        })
        .collect();

    let mut actions = format!("[submit: {}]", view.submit_label);
    if view.cancel_enabled {
        actions.push_str(" [cancel]");
    }

    let data = FormData {
        title: view.title.to_string(),
        fields,
        actions,
        hint: hint.to_string(),
    };

    render_or(FORM_TEMPLATE, &data, use_color, |e| format!("Render error: {}\n", e))
}

pub fn render_text_list(lines: &[String], empty_message: &str) -> String {
    render_text_list_internal(lines, empty_message, None)
}

fn render_text_list_internal(
    lines: &[String],
    empty_message: &str,
    use_color: Option<bool>,
) -> String {
    let data = TextListData {
        lines: lines.to_vec(),
        empty_message: empty_message.to_string(),
    };
    render_or(TEXT_LIST_TEMPLATE, &data, use_color, |_| {
        format!("{}\n", empty_message)
    })
}

/// Renders command messages using the template system with themed styles.
pub fn render_messages(messages: &[CmdMessage]) -> String {
    render_messages_internal(messages, None)
}

fn render_messages_internal(messages: &[CmdMessage], use_color: Option<bool>) -> String {
    if messages.is_empty() {
        return String::new();
    }

    let message_data: Vec<MessageData> = messages
        .iter()
        .map(|msg| {
            let style = match msg.level {
                MessageLevel::Info => names::INFO,
                MessageLevel::Success => names::SUCCESS,
                MessageLevel::Warning => names::WARNING,
                MessageLevel::Error => names::ERROR,
            };
            MessageData {
                content: msg.content.clone(),
                style: style.to_string(),
            }
        })
        .collect();

    let data = MessagesData {
        messages: message_data,
    };

    render_or(MESSAGES_TEMPLATE, &data, use_color, |_| {
        messages
            .iter()
            .map(|m| format!("{}\n", m.content))
            .collect()
    })
}

/// Prints command messages to stdout using the template system.
pub fn print_messages(messages: &[CmdMessage]) {
    let output = render_messages(messages);
    if !output.is_empty() {
        print!("{}", output);
    }
}

fn render_or<T: Serialize>(
    template: &str,
    data: &T,
    use_color: Option<bool>,
    fallback: impl FnOnce(String) -> String,
) -> String {
    let theme = ThemeChoice::from(&*ROSTER_THEME);
    match use_color {
        Some(c) => render_with_color(template, data, theme, c),
        None => render(template, data, theme),
    }
    .unwrap_or_else(|e| fallback(e.to_string()))
}

fn index_label(row: &RowView) -> String {
    format!("{}.", row.position + 1)
}

/// The shell/CLI commands behind the row's actions, e.g. `[edit 2] [delete 2]`.
fn action_hint(row: &RowView) -> String {
    row.actions
        .iter()
        .map(|a| {
            format!(
                "[{} {}]",
                a.label.to_lowercase(),
                a.action.position() + 1
            )
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn pad_to_width(s: &str, width: usize) -> String {
    let padding = width.saturating_sub(s.width());
    format!("{}{}", s, " ".repeat(padding))
}
