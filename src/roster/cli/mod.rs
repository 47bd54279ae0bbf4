//! # CLI Behavior
//!
//! This is **one possible UI client** for roster, not the application itself.
//! For the overall architecture, see the library's crate-level documentation.
//!
//! ## Naked Execution (`roster`)
//!
//! Running `roster` with no arguments lists the roster.
//!
//! ## One-shot vs. Shell
//!
//! `add`, `edit`, `delete` each run a single form interaction and exit. An
//! invalid submission fails the command with every field error listed.
//!
//! `roster shell` keeps the form open across lines: values are filtered as
//! they are typed (digits only for id and contact, letters and spaces for the
//! name), fields can be checked one at a time with `blur`, and a rejected
//! submit leaves the form as it was.
//!
//! ## Module Structure
//!
//! - `commands`: context setup and per-command handlers
//! - `render`: templated output (table, form, messages)
//! - `setup`: argument parsing via clap
//! - `shell`: the interactive form
//! - `styles`: terminal styles
//! - `templates`: output templates

mod commands;
mod render;
pub mod setup;
mod shell;
mod styles;
mod templates;

pub use commands::run;
