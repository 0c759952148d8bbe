//! Tests for the clipboard subcommands: open and the hidden holder.

use super::parse;
use crate::cli::commands::HOLD_COMMAND;
use crate::cli::{Cli, CliCommand};
use clap::{CommandFactory, Parser};

#[test]
fn cli_parse_open() {
    match parse(&["clip2tana", "open"]) {
        CliCommand::Open { print } => assert!(!print),
        _ => panic!("expected Open"),
    }
}

#[test]
fn cli_parse_open_print() {
    match parse(&["clip2tana", "open", "--print"]) {
        CliCommand::Open { print } => assert!(print),
        _ => panic!("expected Open --print"),
    }
}

#[test]
fn cli_rejects_unknown_subcommand() {
    assert!(Cli::try_parse_from(["clip2tana", "badge"]).is_err());
}

#[test]
fn cli_parse_hold_clipboard() {
    assert!(matches!(
        parse(&["clip2tana", HOLD_COMMAND]),
        CliCommand::HoldClipboard
    ));
}

#[test]
fn hold_clipboard_is_hidden_from_help() {
    let help = Cli::command().render_help().to_string();
    assert!(help.contains("open"));
    assert!(!help.contains(HOLD_COMMAND));
}
