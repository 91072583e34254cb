//! Most recent transfers as a row-level snapshot.

use super::routes::routed;
use super::tables::RecentTransferRow;
use crate::parser::TransferRecord;
use crate::utils::config::MAX_RECENT_TRANSFERS;

/// Newest transfers first, at most `MAX_RECENT_TRANSFERS` rows
///
/// Ties on timestamp are broken by transfer id, descending, so the order
/// is deterministic.
pub fn calculate_recent_transfers(
    records: &[TransferRecord],
    excluded: &[String],
) -> Vec<RecentTransferRow> {
    let mut rows: Vec<&TransferRecord> = routed(records, excluded).map(|(_, r)| r).collect();

    rows.sort_by(|a, b| {
        b.timestamp
            .cmp(&a.timestamp)
            .then_with(|| b.transfer_id.cmp(&a.transfer_id))
    });

    rows.into_iter()
        .take(MAX_RECENT_TRANSFERS)
        .map(|record| RecentTransferRow {
            timestamp: record.timestamp,
            amount_native: record.amount_native,
            amount_usd: record.amount_usd,
            source_chain: record.source_chain.clone().unwrap_or_default(),
            destination_chain: record.destination_chain.clone().unwrap_or_default(),
            sender_address: record.sender_address.clone(),
            fee_usd: record.fee_usd,
            transfer_id: record.transfer_id.clone(),
        })
        .collect()
}
