//! Convergence check: is the server's actual order ascending by number?

use chanorder_core::{fetch_management_list, ChannelDirectory, ManagementRecord, NumberMap, Result};
use tracing::debug;

use crate::sort_key::sort_key;

/// Channel numbers in the server's current order and whether they ascend.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderReport {
    pub ok: bool,
    pub numbers: Vec<Option<String>>,
}

impl OrderReport {
    pub fn channels(&self) -> usize {
        self.numbers.len()
    }

    /// Position `i` of the first pair `(i, i + 1)` that is out of order.
    pub fn first_violation(&self) -> Option<usize> {
        self.numbers
            .windows(2)
            .position(|w| sort_key(w[0].as_deref()) > sort_key(w[1].as_deref()))
    }
}

/// Order `records` by server-reported sort index and scan adjacent numbers.
///
/// Records without a sort index are placed after the indexed ones. This
/// looks only at the actual order; it never compares against the desired
/// order directly.
pub fn check_order(mut records: Vec<ManagementRecord>, numbers: &NumberMap) -> OrderReport {
    records.sort_by_key(|r| (r.sort_index_number.is_none(), r.sort_index_number));
    let numbers: Vec<Option<String>> = records
        .iter()
        .map(|r| numbers.get(&r.id).cloned().flatten())
        .collect();
    let ok = numbers
        .windows(2)
        .all(|w| sort_key(w[0].as_deref()) <= sort_key(w[1].as_deref()));
    OrderReport { ok, numbers }
}

/// Fetch both collections fresh and check the current order.
pub async fn fully_sorted<D: ChannelDirectory>(directory: &D) -> Result<OrderReport> {
    let records = fetch_management_list(directory).await?;
    let numbers = directory.number_map().await?;
    let report = check_order(records, &numbers);
    debug!(
        "Order check: {} channels, ok={}",
        report.channels(),
        report.ok
    );
    Ok(report)
}
