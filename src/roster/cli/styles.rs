//! Styles for the roster CLI.
//!
//! Templates only ever name *semantic* styles (a table header, a field label, an
//! error). This module maps those names to actual `console` styles, so the
//! look can change without touching templates or renderers.
//!
//! All styles are registered once through `once_cell::sync::Lazy`. An unknown
//! style name renders with a `(!?)` prefix, which makes typos in templates
//! visible in tests.

use console::Style;
use once_cell::sync::Lazy;
use outstanding::{rgb_to_ansi256, Theme};

/// Style identifiers shared between templates and renderers.
pub mod names {
    pub const MUTED: &str = "muted";
    pub const FAINT: &str = "faint";
    pub const ERROR: &str = "error";
    pub const WARNING: &str = "warning";
    pub const SUCCESS: &str = "success";
    pub const INFO: &str = "info";
    pub const TITLE: &str = "title";
    // Table
    pub const HEADER: &str = "header";
    pub const INDEX: &str = "index";
    pub const ACTION: &str = "action";
    // Form
    pub const LABEL: &str = "label";
    pub const FOCUS: &str = "focus";
    pub const LOCKED: &str = "locked";
}

pub static ROSTER_THEME: Lazy<Theme> = Lazy::new(|| {
    let muted = Style::new().color256(rgb_to_ansi256((128, 128, 128)));
    let faint = Style::new().color256(rgb_to_ansi256((173, 173, 173)));
    let accent = Style::new().color256(rgb_to_ansi256((196, 140, 0)));

    Theme::new()
        .add(names::MUTED, muted.clone())
        .add(names::FAINT, faint)
        .add(names::ERROR, Style::new().red().bold())
        .add(names::WARNING, Style::new().yellow().bold())
        .add(names::SUCCESS, Style::new().green())
        .add(names::INFO, muted.clone())
        .add(names::TITLE, Style::new().bold())
        .add(names::HEADER, Style::new().bold().underlined())
        .add(names::INDEX, accent.clone())
        .add(names::ACTION, muted.clone().italic())
        .add(names::LABEL, Style::new())
        .add(names::FOCUS, accent.bold())
        .add(names::LOCKED, muted.italic())
});
