//! Line-oriented console front-end.
//!
//! Reads one command per line from stdin, forwards it to the controller and
//! prints every update as it arrives.

use std::fmt::Write as _;
use std::io;

use courier_domain::{DomainError, NormalizedResponse, Tab, TabEdit, TabField, TabId};
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tracing::debug;

use crate::bridge::{NoticeLevel, TabData, TabRef, UiCommand, UiUpdate};

/// Command reference printed on start and by `help`.
pub const HELP: &str = "\
Commands (field commands apply to the active tab):
  new                    open a new tab
  tabs                   list open tabs
  select <id>            make a tab active
  close <id>             close a tab (tab 1 stays open)
  method <GET|POST|PUT|DELETE>
  url <text>             set the URL
  headers <json>         set the header JSON object
  body <json>            set the JSON body
  token <text>           set the bearer token
  toggle-token           show or hide the bearer token
  send                   send the active tab's request
  show                   print the active tab and its response
  curl                   print the request as a curl command
  help                   show this list
  quit                   exit
";

/// What one input line asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleAction {
    /// Forward to the controller.
    Command(UiCommand),
    /// Print the command reference.
    Help,
    /// Stop reading input.
    Quit,
    /// Blank line.
    Nothing,
}

/// Input that could not be turned into an action.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("unknown command '{0}', type 'help' for a list")]
    UnknownCommand(String),

    #[error("'{command}' needs {expected}")]
    MissingArgument {
        command: &'static str,
        expected: &'static str,
    },

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Parses one input line.
///
/// # Errors
///
/// Returns `ParseError` for unknown commands, missing arguments, bad tab ids
/// and unsupported methods.
pub fn parse_line(line: &str) -> Result<ConsoleAction, ParseError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(ConsoleAction::Nothing);
    }

    let (word, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(word, rest)| (word, rest.trim()));

    let command = match word {
        "new" => UiCommand::NewTabClicked,
        "tabs" => UiCommand::ListTabs,
        "select" => UiCommand::TabClicked {
            id: parse_id("select", rest)?,
        },
        "close" => UiCommand::TabCloseClicked {
            id: parse_id("close", rest)?,
        },
        "method" => {
            if rest.is_empty() {
                return Err(ParseError::MissingArgument {
                    command: "method",
                    expected: "GET, POST, PUT or DELETE",
                });
            }
            field_command(TabField::Method, rest)?
        }
        "url" => field_command(TabField::Url, rest)?,
        "headers" => field_command(TabField::Headers, rest)?,
        "body" => field_command(TabField::Body, rest)?,
        "token" => field_command(TabField::BearerToken, rest)?,
        "toggle-token" => UiCommand::ToggleBearerTokenInput {
            target: TabRef::Active,
        },
        "send" => UiCommand::SendRequest {
            target: TabRef::Active,
        },
        "show" => UiCommand::ShowTab {
            target: TabRef::Active,
        },
        "curl" => UiCommand::ExportAsCurl {
            target: TabRef::Active,
        },
        "help" | "?" => return Ok(ConsoleAction::Help),
        "quit" | "exit" => return Ok(ConsoleAction::Quit),
        other => return Err(ParseError::UnknownCommand(other.to_string())),
    };

    Ok(ConsoleAction::Command(command))
}

fn parse_id(command: &'static str, rest: &str) -> Result<TabId, ParseError> {
    if rest.is_empty() {
        return Err(ParseError::MissingArgument {
            command,
            expected: "a tab id",
        });
    }
    Ok(rest.parse::<TabId>()?)
}

fn field_command(field: TabField, value: &str) -> Result<UiCommand, ParseError> {
    Ok(UiCommand::FieldChanged {
        target: TabRef::Active,
        edit: TabEdit::parse(field, value)?,
    })
}

/// Formats an update for the terminal.
#[must_use]
pub fn render(update: &UiUpdate) -> String {
    match update {
        UiUpdate::TabsUpdated(tabs) => render_tabs(tabs),
        UiUpdate::ActiveTabChanged(id) => format!("Active tab: {id}"),
        UiUpdate::FieldUpdated { id, field } => format!("[{id}] {field} updated"),
        UiUpdate::BearerInputToggled { id, visible } => {
            let state = if *visible { "shown" } else { "hidden" };
            format!("[{id}] bearer token {state}")
        }
        UiUpdate::TabDetails(tab) => render_tab(tab),
        UiUpdate::RequestPending { id, method, url } => format!("[{id}] {method} {url} ..."),
        UiUpdate::ResponseReady {
            id,
            response,
            elapsed,
        } => format!(
            "[{id}] {} ({} ms)\n{}",
            summary(response),
            elapsed.as_millis(),
            response.to_pretty_json()
        ),
        UiUpdate::ResponseSuperseded { id } => {
            format!("[{id}] discarded a response from an earlier send")
        }
        UiUpdate::CurlExport { command, .. } => command.clone(),
        UiUpdate::Notice(notice) => match notice.level {
            NoticeLevel::Info => notice.message.clone(),
            NoticeLevel::Error => format!("error: {}", notice.message),
        },
    }
}

fn render_tabs(tabs: &[TabData]) -> String {
    let mut out = String::from("Tabs:");
    for tab in tabs {
        let marker = if tab.active { '*' } else { ' ' };
        let _ = write!(out, "\n {marker} [{}] {} {}", tab.id, tab.method, tab.name);
        if tab.has_response {
            out.push_str(" (response)");
        }
    }
    out
}

fn render_tab(tab: &Tab) -> String {
    let request = &tab.request;
    let token = if request.bearer_token.is_empty() {
        "(none)"
    } else if tab.show_bearer_token_input {
        request.bearer_token.as_str()
    } else {
        "(hidden, toggle-token to show)"
    };
    let response = tab
        .response
        .as_ref()
        .map_or_else(|| "No response yet".to_string(), NormalizedResponse::to_pretty_json);

    format!(
        "Tab {}\n  method:  {}\n  url:     {}\n  headers: {}\n  body:    {}\n  token:   {}\nResponse:\n{}",
        tab.id(),
        request.method,
        request.url,
        request.headers,
        request.body,
        token,
        response
    )
}

fn summary(response: &NormalizedResponse) -> String {
    match (response.error_message(), response.meta()) {
        (None, Some(meta)) => format!("{} {}", meta.status, meta.status_text),
        (Some(error), _) => format!("error: {error}"),
        (None, None) => String::new(),
    }
}

/// Runs the console until `quit` or end of input.
///
/// Dropping the command sender on exit stops the controller, which in turn
/// closes the update channel and ends the printer.
///
/// # Errors
///
/// Returns an error when stdin or stdout fail.
pub async fn run(
    commands: mpsc::UnboundedSender<UiCommand>,
    mut updates: mpsc::UnboundedReceiver<UiUpdate>,
) -> io::Result<()> {
    let printer = tokio::spawn(async move {
        let mut stdout = tokio::io::stdout();
        while let Some(update) = updates.recv().await {
            let mut text = render(&update);
            text.push('\n');
            stdout.write_all(text.as_bytes()).await?;
            stdout.flush().await?;
        }
        Ok::<(), io::Error>(())
    });

    let mut stdout = tokio::io::stdout();
    stdout.write_all(HELP.as_bytes()).await?;
    stdout.flush().await?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match parse_line(&line) {
            Ok(ConsoleAction::Command(command)) => {
                if commands.send(command).is_err() {
                    break;
                }
            }
            Ok(ConsoleAction::Help) => {
                stdout.write_all(HELP.as_bytes()).await?;
                stdout.flush().await?;
            }
            Ok(ConsoleAction::Quit) => break,
            Ok(ConsoleAction::Nothing) => {}
            Err(e) => {
                debug!(input = %line, error = %e, "unparsable input");
                stdout.write_all(format!("error: {e}\n").as_bytes()).await?;
                stdout.flush().await?;
            }
        }
    }

    drop(commands);
    printer.await.map_err(io::Error::other)?
}
