//! # Response Formatter
//!
//! Renders an [`Outcome`] as the single reply string sent back to chat.

use std::fmt::Write;
use std::str::FromStr;

use thiserror::Error;

use super::errors::{CommandError, ProcessError};
use super::outcome::{Outcome, ScanReport};

/// Reply language.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Locale {
    #[default]
    En,
    /// Traditional Chinese, the wording used on the warehouse floor.
    ZhTw,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown locale {0:?} (expected \"en\" or \"zh-TW\")")]
pub struct ParseLocaleError(String);

impl FromStr for Locale {
    type Err = ParseLocaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" | "en-us" | "en_us" => Ok(Locale::En),
            "zh" | "zh-tw" | "zh_tw" | "zh-hant" => Ok(Locale::ZhTw),
            _ => Err(ParseLocaleError(s.to_string())),
        }
    }
}

/// Outcome renderer.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReplyFormatter {
    locale: Locale,
}

impl ReplyFormatter {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn render(&self, outcome: &Outcome) -> String {
        match (self.locale, outcome) {
            (Locale::En, Outcome::Restored { lot_id, remaining }) => {
                format!("restored: lot {lot_id} remaining count {remaining}")
            }
            (Locale::ZhTw, Outcome::Restored { lot_id, remaining }) => {
                format!("✅ 已還原：編號 {lot_id} 的箱數為 {remaining}")
            }
            (Locale::En, Outcome::Set { lot_id, remaining }) => {
                format!("set: lot {lot_id} remaining count {remaining}")
            }
            (Locale::ZhTw, Outcome::Set { lot_id, remaining }) => {
                format!("✅ 已設定：編號 {lot_id} 剩餘箱數為 {remaining}")
            }
            (locale, Outcome::Scanned(report)) => render_scan(locale, report),
            (locale, Outcome::Failed(error)) => render_error(locale, error),
        }
    }
}

fn render_scan(locale: Locale, report: &ScanReport) -> String {
    let ScanReport {
        lot_id,
        original,
        remaining,
        total_remaining,
    } = report;
    let mut msg = match locale {
        Locale::En => format!(
            "scan result:\n- lot {lot_id}, original count {original}, remaining count {remaining}\ntotal remaining: {total_remaining}"
        ),
        Locale::ZhTw => format!(
            "✅ 查詢結果：\n- 編號 {lot_id}，原始箱數 {original}，剩餘箱數：{remaining}\n➕ 總剩餘箱數：{total_remaining}"
        ),
    };
    if report.is_complete() {
        msg.push_str(match locale {
            Locale::En => "\ncomplete",
            Locale::ZhTw => "\n✅ 下貨完畢",
        });
    }
    msg
}

fn render_error(locale: Locale, error: &ProcessError) -> String {
    match (locale, error) {
        (Locale::En, ProcessError::CatalogUnavailable(e)) => format!("catalog download error: {e}"),
        (Locale::ZhTw, ProcessError::CatalogUnavailable(e)) => format!("❌ 資料下載錯誤：{e}"),
        (Locale::En, ProcessError::CommandSyntax(CommandError::RestoreUsage)) => {
            "usage: restore lot<ID>".to_string()
        }
        (Locale::ZhTw, ProcessError::CommandSyntax(CommandError::RestoreUsage)) => {
            "❌ 請輸入：還原 編號XXXX".to_string()
        }
        (Locale::En, ProcessError::CommandSyntax(CommandError::SetUsage)) => {
            "usage: set lot<ID> <count>".to_string()
        }
        (Locale::ZhTw, ProcessError::CommandSyntax(CommandError::SetUsage)) => {
            "❌ 請輸入：設定 編號XXXX 數字".to_string()
        }
        (locale, ProcessError::LotNotFound { lot_id, known }) => {
            let mut msg = match locale {
                Locale::En => format!("lot {lot_id} not found\nknown lots include: "),
                Locale::ZhTw => format!("❌ 查無編號 {lot_id} 資料\n可用編號包含："),
            };
            let _ = write!(msg, "{} ...", known.join(", "));
            msg
        }
        (Locale::En, ProcessError::ScanNoMatch) => "no matching record".to_string(),
        (Locale::ZhTw, ProcessError::ScanNoMatch) => "❌ 查無資料".to_string(),
        (Locale::En, ProcessError::Storage(e)) => format!("storage error: {e}"),
        (Locale::ZhTw, ProcessError::Storage(e)) => format!("❌ 資料儲存錯誤：{e}"),
    }
}
