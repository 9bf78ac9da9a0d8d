//! # Scan Processor Service
//!
//! Runs the event-handling state machine for one inbound message:
//!
//! ```text
//! Init → DedupCheck ─┬─ Duplicate → Terminal (no reply, nothing written)
//!                    └─ Accepted → Catalog ─┬─ Unavailable → Reply (nothing written)
//!                                           └─ Dispatch{Restore|Set|Scan} → Persist → Reply
//! ```
//!
//! The whole load → mutate → persist cycle runs under one async mutex, so
//! events are applied strictly one at a time and no event can overwrite
//! another's update with a stale copy. Persistence happens once per
//! accepted event regardless of the command outcome: the dedup window is
//! always recorded, and the ledger is rewritten even when unchanged (the
//! stores serialize deterministically, so that rewrite is byte-identical).

use std::sync::Arc;

use bl_01_catalog::{match_probe, Catalog, CatalogProvider, LOT_HINT_LIMIT};
use bl_02_ledger::{
    Admission, DedupStore, DedupWindow, Ledger, LedgerError, LedgerStore, DEFAULT_RETENTION_SECS,
};
use shared_types::{InboundMessage, TimeSource};
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use crate::domain::{Command, Locale, Outcome, ProcessError, ReplyFormatter, ScanReport};
use crate::ports::inbound::MessageHandler;


/// Processor settings.
#[derive(Debug, Clone, Copy)]
pub struct ProcessorConfig {
    /// How long processed message ids are remembered.
    pub retention_secs: u64,
    /// Reply language.
    pub locale: Locale,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            retention_secs: DEFAULT_RETENTION_SECS,
            locale: Locale::En,
        }
    }
}

/// Result of processing one message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventResult {
    /// Already processed; no reply.
    Duplicate,
    /// Accepted (or rejected before any state change); exactly one reply.
    Processed(Outcome),
}

/// Idempotent chat-event processor.
pub struct ScanProcessor {
    catalog: Arc<dyn CatalogProvider>,
    ledger_store: Arc<dyn LedgerStore>,
    dedup_store: Arc<dyn DedupStore>,
    clock: Arc<dyn TimeSource>,
    formatter: ReplyFormatter,
    retention_secs: u64,
    cycle: Mutex<()>,
}

impl ScanProcessor {
    pub fn new(
        catalog: Arc<dyn CatalogProvider>,
        ledger_store: Arc<dyn LedgerStore>,
        dedup_store: Arc<dyn DedupStore>,
        clock: Arc<dyn TimeSource>,
        config: ProcessorConfig,
    ) -> Self {
        Self {
            catalog,
            ledger_store,
            dedup_store,
            clock,
            formatter: ReplyFormatter::new(config.locale),
            retention_secs: config.retention_secs,
            cycle: Mutex::new(()),
        }
    }

    pub fn formatter(&self) -> &ReplyFormatter {
        &self.formatter
    }

    /// Runs one event to completion.
    pub async fn process(&self, message: &InboundMessage) -> EventResult {
        let _cycle = self.cycle.lock().await;
        let now = self.clock.now();

        let (mut ledger, mut window) = match self.load_stores() {
            Ok(docs) => docs,
            Err(e) => return EventResult::Processed(e.into()),
        };

        let pruned = window.prune_older_than(now, self.retention_secs);
        if pruned > 0 {
            debug!(pruned, "Pruned expired dedup entries");
        }
        if window.admit(&message.message_id, now, &message.user_id) == Admission::Duplicate {
            info!(message_id = %message.message_id, "Duplicate delivery ignored");
            return EventResult::Duplicate;
        }

        let catalog = match self.catalog.current().await {
            Ok(catalog) => catalog,
            Err(e) => {
                warn!(message_id = %message.message_id, error = %e, "Catalog unavailable");
                return EventResult::Processed(ProcessError::CatalogUnavailable(e.to_string()).into());
            }
        };

        let outcome = dispatch(&catalog, &mut ledger, &message.text);
        debug!(message_id = %message.message_id, ?outcome, "Dispatched");

        if let Err(e) = self.persist(&ledger, &window) {
            return EventResult::Processed(e.into());
        }
        EventResult::Processed(outcome)
    }

    fn load_stores(&self) -> Result<(Ledger, DedupWindow), ProcessError> {
        let ledger = self.ledger_store.load().map_err(|e| {
            error!(error = %e, "Failed to load ledger");
            ProcessError::Storage(e.to_string())
        })?;
        let window = self.dedup_store.load().map_err(|e| {
            error!(error = %e, "Failed to load dedup window");
            ProcessError::Storage(e.to_string())
        })?;
        Ok((ledger, window))
    }

    fn persist(&self, ledger: &Ledger, window: &DedupWindow) -> Result<(), ProcessError> {
        self.ledger_store.save(ledger).map_err(|e| {
            error!(error = %e, "Failed to save ledger");
            ProcessError::Storage(e.to_string())
        })?;
        self.dedup_store.save(window).map_err(|e| {
            error!(error = %e, "Failed to save dedup window");
            ProcessError::Storage(e.to_string())
        })
    }
}

#[async_trait::async_trait]
impl MessageHandler for ScanProcessor {
    async fn handle(&self, message: &InboundMessage) -> Option<String> {
        match self.process(message).await {
            EventResult::Duplicate => None,
            EventResult::Processed(outcome) => Some(self.formatter.render(&outcome)),
        }
    }
}

/// Interprets the text and applies it to the ledger.
fn dispatch(catalog: &Catalog, ledger: &mut Ledger, text: &str) -> Outcome {
    let command = match Command::parse(text) {
        Ok(command) => command,
        Err(e) => return ProcessError::CommandSyntax(e).into(),
    };

    match command {
        Command::Restore { lot_id } => match ledger.restore(catalog, &lot_id) {
            Ok(remaining) => {
                info!(%lot_id, remaining, "Lot restored");
                Outcome::Restored { lot_id, remaining }
            }
            Err(e) => lot_not_found(catalog, e).into(),
        },
        Command::Set { lot_id, count } => match ledger.set(catalog, &lot_id, count) {
            Ok(remaining) => {
                info!(%lot_id, remaining, "Lot count set");
                Outcome::Set { lot_id, remaining }
            }
            Err(e) => lot_not_found(catalog, e).into(),
        },
        Command::Scan { probe } => {
            let Some(entry) = match_probe(catalog, &probe) else {
                debug!(%probe, "Scan matched no lot");
                return ProcessError::ScanNoMatch.into();
            };
            let remaining = ledger.decrement(entry);
            info!(lot_id = %entry.lot_id, remaining, "Box scanned out");
            Outcome::Scanned(ScanReport {
                lot_id: entry.lot_id.clone(),
                original: entry.box_count,
                remaining,
                total_remaining: remaining,
            })
        }
    }
}

fn lot_not_found(catalog: &Catalog, error: LedgerError) -> ProcessError {
    let LedgerError::LotNotFound { lot_id } = error;
    ProcessError::LotNotFound {
        lot_id,
        known: catalog.known_lot_ids(LOT_HINT_LIMIT),
    }
}
