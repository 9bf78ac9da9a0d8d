//! Result of dispatching one accepted event.

use shared_types::{BoxCount, LotId};

use super::errors::ProcessError;

/// What a scan did to the matched lot.
///
/// At most one lot matches a scan, so `total_remaining` always equals
/// `remaining`; it is kept as its own field because the reply reports both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanReport {
    pub lot_id: LotId,
    pub original: BoxCount,
    pub remaining: BoxCount,
    pub total_remaining: BoxCount,
}

impl ScanReport {
    /// No boxes left.
    pub fn is_complete(&self) -> bool {
        self.total_remaining == 0
    }
}

/// Outcome of one accepted event; rendered into exactly one reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Restored { lot_id: LotId, remaining: BoxCount },
    Set { lot_id: LotId, remaining: BoxCount },
    Scanned(ScanReport),
    Failed(ProcessError),
}

impl From<ProcessError> for Outcome {
    fn from(e: ProcessError) -> Self {
        Outcome::Failed(e)
    }
}
