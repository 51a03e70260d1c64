//! # Trusted Sender Commands
//!
//! Management grammar, checked before the device-command grammar:
//!
//! ```text
//! trusted add <text>      -> Add(text)
//! trusted remove <text>   -> Remove(text)
//! trusted list            -> ListSenders
//! ```
//!
//! Keywords are case-insensitive and separated by any whitespace run. The
//! trailing `<text>` is carried raw (trimmed only); the policy normalizes it.
//! It must fit on one line: a body whose argument spans lines is not a
//! management command.

use serde::{Deserialize, Serialize};

/// Policy-management command parsed from an inbound message body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrustedSenderCommand {
    /// Add a sender to the allow-list.
    Add(String),
    /// Remove a sender from the allow-list.
    Remove(String),
    /// Enumerate the allow-list.
    ListSenders,
}

const KEYWORD: &str = "trusted";

impl TrustedSenderCommand {
    /// Parse a message body. Returns `None` when the body is not a
    /// management command; it then falls through to the device grammar.
    pub fn parse(raw: &str) -> Option<Self> {
        let (keyword, rest) = split_word(raw.trim())?;
        if !keyword.eq_ignore_ascii_case(KEYWORD) {
            return None;
        }

        match split_word(rest) {
            Some((action, argument)) => {
                if action.eq_ignore_ascii_case("add") {
                    non_empty(argument).map(Self::Add)
                } else if action.eq_ignore_ascii_case("remove") {
                    non_empty(argument).map(Self::Remove)
                } else {
                    None
                }
            }
            None if rest.eq_ignore_ascii_case("list") => Some(Self::ListSenders),
            None => None,
        }
    }

    /// Short action label for logs and metrics.
    pub fn action(&self) -> &'static str {
        match self {
            Self::Add(_) => "add",
            Self::Remove(_) => "remove",
            Self::ListSenders => "list",
        }
    }
}

/// Split off the first word; `None` if there is no whitespace after it.
fn split_word(input: &str) -> Option<(&str, &str)> {
    let (word, rest) = input.split_once(char::is_whitespace)?;
    Some((word, rest.trim_start()))
}

/// Trimmed single-line argument, `None` when blank or multi-line.
fn non_empty(argument: &str) -> Option<String> {
    let argument = argument.trim();
    if argument.is_empty() || argument.contains(['\n', '\r']) {
        return None;
    }
    Some(argument.to_string())
}
