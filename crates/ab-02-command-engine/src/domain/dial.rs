//! Dial-target normalization for `call me back`.
//!
//! Separate from the allow-list normalizer: a dial string may carry
//! keypad letters (`1-800-FLOWERS`) and pause markers that matter to the
//! telephony stack but not to sender matching.

use serde::Serialize;
use std::fmt;

/// A dialable number: an optional leading `+` followed by ASCII digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct DialNumber(String);

impl DialNumber {
    /// Borrow as `&str`.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `tel:` URI form.
    pub fn to_uri(&self) -> String {
        format!("tel:{}", self.0)
    }
}

impl fmt::Display for DialNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for DialNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Normalize a sender address into something the dialer accepts.
///
/// Keeps a leading `+`, keeps digits, maps keypad letters to their digit
/// and stops at the first pause (`,`) or wait (`;`) marker. Returns `None`
/// when no digit survives.
pub fn normalize_dial_target(raw: &str) -> Option<DialNumber> {
    let trimmed = raw.trim();
    let mut out = String::with_capacity(trimmed.len());

    for (idx, ch) in trimmed.chars().enumerate() {
        match ch {
            '+' if idx == 0 => out.push('+'),
            '0'..='9' => out.push(ch),
            ',' | ';' => break,
            c if c.is_ascii_alphabetic() => {
                if let Some(d) = keypad_digit(c) {
                    out.push(d);
                }
            }
            _ => {}
        }
    }

    if out.bytes().any(|b| b.is_ascii_digit()) {
        Some(DialNumber(out))
    } else {
        None
    }
}

fn keypad_digit(c: char) -> Option<char> {
    let digit = match c.to_ascii_lowercase() {
        'a' | 'b' | 'c' => '2',
        'd' | 'e' | 'f' => '3',
        'g' | 'h' | 'i' => '4',
        'j' | 'k' | 'l' => '5',
        'm' | 'n' | 'o' => '6',
        'p' | 'q' | 'r' | 's' => '7',
        't' | 'u' | 'v' => '8',
        'w' | 'x' | 'y' | 'z' => '9',
        _ => return None,
    };
    Some(digit)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dial(raw: &str) -> Option<String> {
        normalize_dial_target(raw).map(|d| d.as_str().to_string())
    }

    #[test]
    fn test_plain_and_formatted() {
        assert_eq!(dial("15550000000").as_deref(), Some("15550000000"));
        assert_eq!(dial(" (555) 123-4567 ").as_deref(), Some("5551234567"));
        assert_eq!(dial("+1 555 123 4567").as_deref(), Some("+15551234567"));
    }

    #[test]
    fn test_plus_only_leading() {
        assert_eq!(dial("1+555").as_deref(), Some("1555"));
        assert_eq!(dial("++1555").as_deref(), Some("+1555"));
    }

    #[test]
    fn test_keypad_letters() {
        assert_eq!(dial("1-800-FLOWERS").as_deref(), Some("18003569377"));
        assert_eq!(dial("1800flowers").as_deref(), Some("18003569377"));
    }

    #[test]
    fn test_pause_truncates() {
        assert_eq!(dial("5551234567,,22").as_deref(), Some("5551234567"));
        assert_eq!(dial("5551234567;1234").as_deref(), Some("5551234567"));
    }

    #[test]
    fn test_no_digits_is_none() {
        assert_eq!(dial(""), None);
        assert_eq!(dial("   "), None);
        assert_eq!(dial("+"), None);
        assert_eq!(dial("---"), None);
        assert_eq!(dial(",5551234567"), None);
    }

    #[test]
    fn test_uri() {
        let number = normalize_dial_target("+1 555 0000").unwrap();
        assert_eq!(number.to_uri(), "tel:+15550000");
    }
}
