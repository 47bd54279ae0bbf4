//! # Roster Architecture
//!
//! Roster is a **UI-agnostic student-roster library**: a list of validated student
//! records, one form for creating and editing them, a table view, and local
//! persistence. The bundled binary is one client of it; nothing below the CLI
//! knows about terminals.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, renders templates, runs the shell      │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade: 1-based positions → roster indexes          │
//! │  - Returns structured Result types                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Controller (controller.rs) + Commands (commands/)          │
//! │  - Edit session state machine, submit/edit/delete/cancel    │
//! │  - Validation (validation.rs), view models (view.rs)        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - RecordStore: the ordered in-memory roster                │
//! │  - SlotStorage trait: FileSlots (production), MemSlots      │
//! │  - Persistence: roster ⇄ one JSON slot, self-healing load   │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward, code takes regular Rust arguments, returns regular
//! Rust types, and never prints or exits. Confirmation of destructive actions
//! is injected through [`controller::Confirm`], so the same controller can sit
//! behind a terminal prompt, a test closure, or any other UI.
//!
//! ## Positions, Not Ids
//!
//! Records are addressed by their position in the roster. Deleting a record
//! shifts later ones up, and the table is rebuilt from scratch after every
//! change so row actions always carry current positions.
//!
//! ## Testing Strategy
//!
//! 1. **Validation, store, view, controller**: thorough unit tests against the
//!    in-memory slot store. This is where most tests live.
//! 2. **API** (`api.rs`): dispatch and position normalization.
//! 3. **CLI**: rendering of canned results, shell command parsing, and
//!    end-to-end runs of the binary in `tests/`.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade
//! - [`controller`]: Edit session, form, and the user events that change them
//! - [`commands`]: Structured results and the config command
//! - [`validation`]: Field validators and entry filters
//! - [`view`]: Table and form view models, overflow policy
//! - [`store`]: In-memory roster, slot storage, persistence
//! - [`model`]: `StudentRecord`, `Field`, `EditSession`
//! - [`config`]: Configuration management
//! - [`logging`]: `tracing` subscriber setup for binaries
//! - [`error`]: Error types
//! - `cli`: Argument parsing, templated rendering, and the interactive shell (binary only)

pub mod api;
pub mod commands;
pub mod config;
pub mod controller;
pub mod error;
pub mod logging;
pub mod model;
pub mod store;
pub mod validation;
pub mod view;
