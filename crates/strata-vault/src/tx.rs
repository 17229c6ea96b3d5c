//! Per-operation transaction buffer.
//!
//! Collects the host transfers an entry point wants to perform so the
//! dispatcher can hand them to the host as one atomic batch at commit time.

use strata_core::{BlockHeight, TransferIntent};

/// Scratch context for one entry-point invocation.
#[derive(Debug)]
pub(crate) struct Transaction {
    /// Block height the operation observes. Fixed for the whole call.
    pub height: BlockHeight,
    transfers: Vec<TransferIntent>,
}

impl Transaction {
    pub(crate) fn new(height: BlockHeight) -> Self {
        Self {
            height,
            transfers: Vec::new(),
        }
    }

    /// Buffer a value movement for commit.
    pub(crate) fn push_transfer(&mut self, intent: TransferIntent) {
        self.transfers.push(intent);
    }

    /// Buffered movements, in the order they were requested.
    pub(crate) fn transfers(&self) -> &[TransferIntent] {
        &self.transfers
    }
}
