//! Window-wide summary metrics.

use super::tables::SummaryMetrics;
use super::tally::Tally;
use crate::parser::TransferRecord;
use log::debug;

/// Total volume, USD volume, distinct transfers and senders
///
/// No route breakdown and no destination filter.
pub fn calculate_summary(records: &[TransferRecord]) -> SummaryMetrics {
    let mut tally = Tally::default();
    for record in records {
        tally.add(record);
    }

    let summary = SummaryMetrics {
        volume_native: tally.volume_native,
        volume_usd: tally.volume_usd,
        transfers_count: tally.transfers_count(),
        senders_count: tally.senders_count(),
    };

    debug!("Summary over {} records: {:?}", records.len(), summary);

    summary
}
