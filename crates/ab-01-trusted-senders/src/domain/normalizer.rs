//! # Phone Number Normalizer
//!
//! Canonical form used for allow-list comparison: an optional leading `+`
//! followed by ASCII digits only.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A phone number in allow-list canonical form.
///
/// Only produced by [`normalize`], so the inner string always satisfies
/// `^\+?[0-9]*$`. It may be blank; callers decide what blank means.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NormalizedNumber(String);

impl NormalizedNumber {
    /// Borrow the canonical string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when no digits survived normalization.
    ///
    /// A lone `+` counts as blank.
    pub fn is_blank(&self) -> bool {
        !self.0.bytes().any(|b| b.is_ascii_digit())
    }

    /// Consume into the inner string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for NormalizedNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NormalizedNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Normalize a raw phone-number string.
///
/// Trims surrounding whitespace. A leading `+` on the trimmed value is kept;
/// every other non-digit is dropped. Never fails.
pub fn normalize(raw: &str) -> NormalizedNumber {
    let trimmed = raw.trim();
    let (prefix, rest) = match trimmed.strip_prefix('+') {
        Some(rest) => ("+", rest),
        None => ("", trimmed),
    };

    let mut out = String::with_capacity(trimmed.len());
    out.push_str(prefix);
    out.extend(rest.chars().filter(char::is_ascii_digit));

    NormalizedNumber(out)
}
