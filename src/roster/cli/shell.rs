//! # Interactive Shell
//!
//! `roster shell` is the form-driven client: the user fills fields one at a
//! time, leaves them (`blur`) to get immediate feedback, and submits. Each line
//! maps onto exactly one controller event.
//!
//! [`Shell::execute`] takes one line and returns what to print, so the command
//! handling is testable without a terminal. [`run`] is the stdin loop around it.

use super::render::{render_form, render_messages, render_table, render_text_list};
use roster::api::{to_position, CmdMessage, CmdResult, Outcome, RosterApi};
use roster::controller::Confirm;
use roster::error::Result;
use roster::model::Field;
use roster::store::SlotStorage;
use std::io::{self, BufRead, Write};
use std::str::FromStr;

const PROMPT: &str = "roster> ";
const FORM_HINT: &str = "Fill the form with `set <field> <value>`, then `submit`.";

const HELP_LINES: [&str; 10] = [
    "list                    Show the roster",
    "form                    Show the form",
    "set <field> <value>     Type into a field (name, id, email, contact)",
    "blur <field>            Leave a field and check it",
    "submit                  Add the student, or save the edit",
    "edit <pos>              Load a student into the form",
    "delete <pos>            Delete a student",
    "cancel                  Clear the form and stop editing",
    "help                    Show this help",
    "quit                    Leave the shell",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    List,
    Form,
    Set(Field, String),
    Blur(Field),
    Submit,
    Edit(usize),
    Delete(usize),
    Cancel,
    Help,
    Quit,
}

impl FromStr for ShellCommand {
    type Err = String;

    fn from_str(line: &str) -> std::result::Result<Self, Self::Err> {
        let (word, rest) = split_word(line);
        let command = match word.to_ascii_lowercase().as_str() {
            "list" | "ls" => ShellCommand::List,
            "form" => ShellCommand::Form,
            "set" => {
                let (field, value) = split_word(rest);
                ShellCommand::Set(parse_field(field)?, value.to_string())
            }
            "blur" => ShellCommand::Blur(parse_field(rest.trim())?),
            "submit" => ShellCommand::Submit,
            "edit" => ShellCommand::Edit(parse_position(rest)?),
            "delete" | "rm" => ShellCommand::Delete(parse_position(rest)?),
            "cancel" => ShellCommand::Cancel,
            "help" | "?" => ShellCommand::Help,
            "quit" | "exit" | "q" => ShellCommand::Quit,
            other => return Err(format!("Unknown command: {} (try `help`)", other)),
        };
        Ok(command)
    }
}

fn split_word(s: &str) -> (&str, &str) {
    let s = s.trim_start();
    match s.find(char::is_whitespace) {
        Some(i) => (&s[..i], s[i..].trim_start()),
        None => (s, ""),
    }
}

fn parse_field(s: &str) -> std::result::Result<Field, String> {
    if s.is_empty() {
        return Err("Missing field: name, id, email or contact".to_string());
    }
    s.parse()
}

fn parse_position(s: &str) -> std::result::Result<usize, String> {
    let s = s.trim();
    let display: usize = s
        .parse()
        .map_err(|_| format!("Expected a position (1, 2, ...), got '{}'", s))?;
    to_position(display).map_err(|e| e.to_string())
}

/// What the loop should do after a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Continue(String),
    Quit,
}

pub struct Shell<'a, S: SlotStorage, C: Confirm> {
    api: &'a mut RosterApi<S, C>,
    threshold: usize,
}

impl<'a, S: SlotStorage, C: Confirm> Shell<'a, S, C> {
    pub fn new(api: &'a mut RosterApi<S, C>, threshold: usize) -> Self {
        Self { api, threshold }
    }

    /// Text shown when the shell starts.
    pub fn banner(&self) -> String {
        let mut out = String::new();
        if self.api.controller().recovered_from_corruption() {
            out.push_str(&render_messages(&[CmdMessage::warning(
                "Stored roster was unreadable and has been reset.",
            )]));
        }
        out.push_str(&self.table());
        out.push('\n');
        out.push_str(&self.form(FORM_HINT));
        out
    }

    pub fn execute(&mut self, line: &str) -> Step {
        let line = line.trim();
        if line.is_empty() {
            return Step::Continue(String::new());
        }
        let command = match line.parse::<ShellCommand>() {
            Ok(command) => command,
            Err(e) => return Step::Continue(render_messages(&[CmdMessage::error(e)])),
        };

        let output = match command {
            ShellCommand::Quit => return Step::Quit,
            ShellCommand::List => self.table(),
            ShellCommand::Form => self.form(""),
            ShellCommand::Help => render_text_list(
                &HELP_LINES.map(String::from),
                "",
            ),
            ShellCommand::Set(field, value) => self.set(field, &value),
            ShellCommand::Blur(field) => {
                let message = match self.api.controller_mut().blur(field) {
                    Ok(()) => CmdMessage::success(format!("{}: ok", field.label())),
                    Err(e) => CmdMessage::error(format!("{}: {}", field.label(), e.message)),
                };
                render_messages(&[message])
            }
            ShellCommand::Submit => {
                let result = self.api.controller_mut().submit();
                if result.outcome == Outcome::Rejected {
                    format!("{}{}", render_messages(&result.messages), self.form(""))
                } else {
                    self.with_table(&result)
                }
            }
            ShellCommand::Edit(position) => {
                let result = self.api.controller_mut().edit(position);
                if result.outcome == Outcome::Ignored {
                    missing_row(position)
                } else {
                    format!("{}{}", render_messages(&result.messages), self.form(""))
                }
            }
            ShellCommand::Delete(position) => {
                // Checked before asking for confirmation
                if position >= self.api.controller().store().len() {
                    format!("{}{}", missing_row(position), self.table())
                } else {
                    let result = self.api.controller_mut().delete(position);
                    self.with_table(&result)
                }
            }
            ShellCommand::Cancel => {
                self.api.controller_mut().cancel();
                format!(
                    "{}{}",
                    render_messages(&[CmdMessage::info("Form cleared.")]),
                    self.form("")
                )
            }
        };
        Step::Continue(output)
    }

    fn set(&mut self, field: Field, value: &str) -> String {
        let controller = self.api.controller_mut();
        if field == Field::Id && controller.session().is_editing() {
            return render_messages(&[CmdMessage::warning(
                "Student ID cannot be changed while editing.",
            )]);
        }
        controller.input(field, value);
        render_messages(&[CmdMessage::info(format!(
            "{}: {}",
            field.label(),
            controller.form().value(field)
        ))])
    }

    fn table(&self) -> String {
        render_table(&self.api.controller().table(), self.threshold, 0)
    }

    fn form(&self, hint: &str) -> String {
        render_form(&self.api.controller().form_view(), hint)
    }

    fn with_table(&self, result: &CmdResult) -> String {
        let mut out = render_messages(&result.messages);
        if let Some(table) = &result.table {
            out.push_str(&render_table(table, self.threshold, 0));
        }
        out
    }
}

fn missing_row(position: usize) -> String {
    render_messages(&[CmdMessage::error(format!(
        "No student at position {}",
        position + 1
    ))])
}

/// Reads commands from stdin until `quit` or end of input.
///
/// Stdin is not held locked between lines: a delete confirmation reads from
/// it too.
pub fn run<S: SlotStorage, C: Confirm>(api: &mut RosterApi<S, C>, threshold: usize) -> Result<()> {
    let mut shell = Shell::new(api, threshold);
    print!("{}", shell.banner());

    loop {
        print!("{}", PROMPT);
        io::stdout().flush()?;

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            println!();
            return Ok(());
        }

        match shell.execute(&line) {
            Step::Continue(output) => print!("{}", output),
            Step::Quit => return Ok(()),
        }
    }
}
