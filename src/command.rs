//! Console command parsing.
//!
//! Every command is one line of the form `bio <action> [argument]`:
//! - `bio start <m>`: build the tree with gene length m
//! - `bio read <file>`: index every window of a sequence file
//! - `bio search <gene>`: offsets of one gene
//! - `bio all`: every observed gene
//! - `bio max` / `bio min`: most / least frequent genes
//! - `bio help`: list the commands
//! - `bio exit`: tear down and quit
//!
//! Tokens past the third are ignored.

use std::path::PathBuf;

use thiserror::Error;

use crate::query::ExtremumKind;

/// Prefix every command line has to start with.
pub const COMMAND_PREFIX: &str = "bio";

/// Commands accepted by the console.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Blank line
    Empty,
    /// Build the tree (raw depth token, validated by the session)
    Start(String),
    /// Index a sequence file
    Read(PathBuf),
    /// Look up one gene
    Search(String),
    /// List every observed gene
    All,
    /// Most or least frequent genes
    Extremum(ExtremumKind),
    /// Show the command list
    Help,
    /// End the session
    Exit,
}

/// Errors for lines that do not form a command.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unrecognized command. Use 'bio <action>'.")]
    NotBio,

    #[error("Unknown action '{0}'.")]
    UnknownAction(String),

    #[error("Missing argument: use 'bio {action} <{expected}>'.")]
    MissingArgument {
        action: &'static str,
        expected: &'static str,
    },
}

/// Parses one console line.
pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let mut tokens = line.split_whitespace();

    let Some(prefix) = tokens.next() else {
        return Ok(Command::Empty);
    };
    if prefix != COMMAND_PREFIX {
        return Err(CommandError::NotBio);
    }

    let action = tokens.next().unwrap_or_default();
    let argument = tokens.next();

    let required = |action: &'static str, expected: &'static str| {
        argument
            .map(str::to_string)
            .ok_or(CommandError::MissingArgument { action, expected })
    };

    match action {
        "start" => required("start", "m").map(Command::Start),
        "read" => required("read", "file").map(|p| Command::Read(PathBuf::from(p))),
        "search" => required("search", "gene").map(Command::Search),
        "all" => Ok(Command::All),
        "max" => Ok(Command::Extremum(ExtremumKind::Max)),
        "min" => Ok(Command::Extremum(ExtremumKind::Min)),
        "help" => Ok(Command::Help),
        "exit" => Ok(Command::Exit),
        other => Err(CommandError::UnknownAction(other.to_string())),
    }
}
