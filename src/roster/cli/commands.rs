//! # CLI Layer
//!
//! This module is **one possible UI client** for roster. It is the only place
//! that parses arguments, talks to the terminal, and decides what gets printed.
//!
//! ## Responsibilities
//!
//! 1. **Argument Parsing**: shell arguments → typed commands via clap
//! 2. **Context Setup**: data directory, config, logging, and the `RosterApi`
//! 3. **API Dispatch**: one `RosterApi` call per command
//! 4. **Output Formatting**: `CmdResult` → templated terminal output
//!
//! Errors propagate to `main`, which prints them and exits with status 1.

use super::render::{print_messages, render_table, render_text_list};
use super::setup::{Cli, Commands};
use super::shell;
use clap::Parser;
use directories::ProjectDirs;
use roster::api::{RosterApi, StudentUpdate};
use roster::commands::config::ConfigAction;
use roster::config::RosterConfig;
use roster::controller::Controller;
use roster::error::{Result, RosterError};
use roster::logging::{init_logging, LogConfig};
use roster::store::fs::FileSlots;
use roster::store::persist::Persistence;
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::PathBuf;
use tracing::{debug, warn};

/// Overrides the data directory when `--data-dir` is not given.
pub const DATA_DIR_ENV: &str = "ROSTER_DATA";

type CliConfirm = Box<dyn FnMut(&str) -> bool>;

struct AppContext {
    api: RosterApi<FileSlots, CliConfirm>,
    config: RosterConfig,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&LogConfig::from_verbosity(cli.verbose).with_ansi(io::stderr().is_terminal()));

    let skip_confirm = matches!(cli.command, Some(Commands::Delete { yes: true, .. }));
    let mut ctx = init_context(&cli, skip_confirm)?;

    match cli.command {
        Some(Commands::Add {
            name,
            id,
            email,
            contact,
        }) => handle_add(&mut ctx, &name, &id, &email, &contact),
        Some(Commands::List { offset }) => handle_list(&mut ctx, offset),
        Some(Commands::Edit {
            position,
            name,
            email,
            contact,
        }) => handle_edit(
            &mut ctx,
            position,
            StudentUpdate {
                name,
                email,
                contact,
            },
        ),
        Some(Commands::Delete { position, .. }) => handle_delete(&mut ctx, position),
        Some(Commands::Shell) => handle_shell(&mut ctx),
        Some(Commands::Config { key, value }) => handle_config(&mut ctx, key, value),
        None => handle_list(&mut ctx, 0),
    }
}

fn resolve_data_dir(cli: &Cli) -> Result<PathBuf> {
    if let Some(dir) = &cli.data_dir {
        return Ok(dir.clone());
    }
    if let Some(dir) = std::env::var_os(DATA_DIR_ENV).filter(|d| !d.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    ProjectDirs::from("org", "roster", "roster")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| RosterError::Config("Could not determine data directory".to_string()))
}

fn init_context(cli: &Cli, skip_confirm: bool) -> Result<AppContext> {
    let data_dir = resolve_data_dir(cli)?;
    debug!(data_dir = %data_dir.display(), "resolved data directory");

    let config = RosterConfig::load(&data_dir).unwrap_or_else(|e| {
        warn!(error = %e, "ignoring unreadable config, using defaults");
        RosterConfig::default()
    });

    let confirm: CliConfirm = if skip_confirm || !config.confirm_delete {
        Box::new(|_: &str| true)
    } else {
        Box::new(terminal_confirm)
    };

    let persistence =
        Persistence::with_key(FileSlots::new(data_dir.clone()), config.storage_key.clone());
    let controller = Controller::open(persistence, confirm)?;

    Ok(AppContext {
        api: RosterApi::new(controller, data_dir),
        config,
    })
}

/// Asks on stderr and reads the answer from stdin. Anything but y/yes is a no.
fn terminal_confirm(prompt: &str) -> bool {
    eprint!("{} [y/N] ", prompt);
    let _ = io::stderr().flush();

    let mut answer = String::new();
    match io::stdin().lock().read_line(&mut answer) {
        Ok(_) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
        Err(_) => false,
    }
}

fn handle_add(ctx: &mut AppContext, name: &str, id: &str, email: &str, contact: &str) -> Result<()> {
    let result = ctx.api.add_student(name, id, email, contact)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_list(ctx: &mut AppContext, offset: usize) -> Result<()> {
    let result = ctx.api.list()?;
    print_messages(&result.messages);
    if let Some(table) = &result.table {
        print!(
            "{}",
            render_table(table, ctx.config.overflow_threshold, offset)
        );
    }
    Ok(())
}

fn handle_edit(ctx: &mut AppContext, position: usize, update: StudentUpdate) -> Result<()> {
    if update.is_empty() {
        return Err(RosterError::Api(
            "Nothing to change: pass --name, --email or --contact".into(),
        ));
    }
    let result = ctx.api.edit_student(position, update)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_delete(ctx: &mut AppContext, position: usize) -> Result<()> {
    let result = ctx.api.delete_student(position)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_shell(ctx: &mut AppContext) -> Result<()> {
    shell::run(&mut ctx.api, ctx.config.overflow_threshold)
}

fn handle_config(ctx: &mut AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(key), None) => ConfigAction::ShowKey(key),
        (Some(key), Some(value)) => ConfigAction::Set(key, value),
    };
    let show_all = matches!(action, ConfigAction::ShowAll);

    let result = ctx.api.config(action)?;
    if show_all {
        if let Some(config) = &result.config {
            let lines: Vec<String> = config
                .list_all()
                .into_iter()
                .map(|(key, value)| format!("{} = {}", key, value))
                .collect();
            print!("{}", render_text_list(&lines, "No configuration."));
        }
    }
    print_messages(&result.messages);
    Ok(())
}
