//! # CLI Templates
//!
//! Terminal output is rendered from minijinja templates through `outstanding`.
//! Templates live as stand-alone files in `templates/` and are embedded here at
//! compile time.
//!
//! Line breaks are explicit: every line a template emits ends right after a
//! `{{ }}` expression or a block tag, so loops and conditionals never leave
//! stray blank lines. Layout math (column widths, padding) is done in Rust and
//! handed to templates as ready strings; templates only pick styles.

pub const TABLE_TEMPLATE: &str = include_str!("templates/table.tmp");
pub const FORM_TEMPLATE: &str = include_str!("templates/form.tmp");
pub const MESSAGES_TEMPLATE: &str = include_str!("templates/messages.tmp");
pub const TEXT_LIST_TEMPLATE: &str = include_str!("templates/text_list.tmp");
