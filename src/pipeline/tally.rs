//! Running totals shared by the grouped views.

use crate::parser::TransferRecord;
use std::collections::HashSet;

/// Sums plus distinct transfer/sender sets for one group
#[derive(Debug, Default)]
pub(crate) struct Tally<'a> {
    pub volume_native: f64,
    pub volume_usd: f64,
    transfers: HashSet<&'a str>,
    senders: HashSet<&'a str>,
}

impl<'a> Tally<'a> {
    pub fn add(&mut self, record: &'a TransferRecord) {
        self.volume_native += record.amount_native;
        if let Some(usd) = record.amount_usd {
            self.volume_usd += usd;
        }
        self.transfers.insert(&record.transfer_id);
        if let Some(sender) = &record.sender_address {
            self.senders.insert(sender);
        }
    }

    pub fn transfers_count(&self) -> u64 {
        self.transfers.len() as u64
    }

    pub fn senders_count(&self) -> u64 {
        self.senders.len() as u64
    }
}
