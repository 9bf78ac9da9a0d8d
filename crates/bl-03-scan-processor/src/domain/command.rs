//! Command interpreter.
//!
//! Text is split on whitespace. A first token of `restore` or `set` (or the
//! localized `還原` / `設定`) selects a ledger override; anything else is a
//! scan probe and the whole trimmed text is the candidate code.

use shared_types::{BoxCount, LotId};

use super::errors::CommandError;

const RESTORE_KEYWORDS: [&str; 2] = ["restore", "還原"];
const SET_KEYWORDS: [&str; 2] = ["set", "設定"];
const LOT_PREFIXES: [&str; 2] = ["lot", "編號"];

/// Parsed intent of one message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Reset a lot to its catalog original count.
    Restore { lot_id: LotId },
    /// Overwrite a lot's remaining count.
    Set { lot_id: LotId, count: BoxCount },
    /// Take one box off whichever lot carries this code.
    Scan { probe: String },
}

impl Command {
    /// Interprets free text.
    ///
    /// # Errors
    /// - `RestoreUsage`: `restore` without exactly one lot token
    /// - `SetUsage`: `set` without exactly a lot token and an all-digit count
    pub fn parse(text: &str) -> Result<Self, CommandError> {
        let text = text.trim();
        let tokens: Vec<&str> = text.split_whitespace().collect();

        match tokens.as_slice() {
            [keyword, rest @ ..] if is_keyword(keyword, &RESTORE_KEYWORDS) => match rest {
                [lot] => Ok(Command::Restore {
                    lot_id: strip_lot_prefix(lot),
                }),
                _ => Err(CommandError::RestoreUsage),
            },
            [keyword, rest @ ..] if is_keyword(keyword, &SET_KEYWORDS) => match rest {
                [lot, count] => Ok(Command::Set {
                    lot_id: strip_lot_prefix(lot),
                    count: parse_count(count).ok_or(CommandError::SetUsage)?,
                }),
                _ => Err(CommandError::SetUsage),
            },
            _ => Ok(Command::Scan {
                probe: text.to_string(),
            }),
        }
    }
}

fn is_keyword(token: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| token.eq_ignore_ascii_case(k))
}

/// Removes one optional lot prefix from the front of a lot token.
fn strip_lot_prefix(token: &str) -> LotId {
    for prefix in LOT_PREFIXES {
        if let Some(head) = token.get(..prefix.len()) {
            if head.eq_ignore_ascii_case(prefix) {
                return token[prefix.len()..].to_string();
            }
        }
    }
    token.to_string()
}

/// ASCII digits only; overflow is rejected.
fn parse_count(token: &str) -> Option<BoxCount> {
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    token.parse().ok()
}
