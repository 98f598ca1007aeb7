//! Reorder pass: compute desired indices and issue only the writes that
//! differ from what the server reports.

use std::time::Duration;

use chanorder_core::{
    fetch_management_list, ChannelDirectory, Error, IndexWrite, ManagementRecord, Result,
    SortIndexWriter,
};
use tracing::{debug, info};

use crate::sort_key::compare_numbers;

/// What one pass did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PassSummary {
    pub channels: usize,
    pub writes: usize,
}

/// Records stable-sorted ascending by numeric channel number.
///
/// Ties keep their input (fetch) order.
pub fn desired_order(records: &[ManagementRecord]) -> Vec<&ManagementRecord> {
    let mut sorted: Vec<&ManagementRecord> = records.iter().collect();
    sorted.sort_by(|a, b| compare_numbers(a.number.as_deref(), b.number.as_deref()));
    sorted
}

/// Writes needed to move every record to its desired index.
///
/// Walks the desired order from the last index to the first and skips
/// records already at their index. The result is in issue order.
pub fn plan_pass(records: &[ManagementRecord]) -> Vec<IndexWrite> {
    desired_order(records)
        .into_iter()
        .enumerate()
        .rev()
        .filter(|(idx, ch)| ch.sort_index_number != Some(*idx))
        .map(|(idx, ch)| IndexWrite {
            channel_id: ch.id.clone(),
            management_id: ch.management_id.clone(),
            new_index: idx,
        })
        .collect()
}

/// One bottom-to-top pass against the server.
///
/// Fetches both collections fresh, issues the planned writes in order and
/// sleeps `pause` after each one. A write answered with status >= 400 ends
/// the pass with `Error::FatalWrite`.
pub async fn reorder_once<D, W>(directory: &D, writer: &W, pause: Duration) -> Result<PassSummary>
where
    D: ChannelDirectory,
    W: SortIndexWriter,
{
    let mut records = fetch_management_list(directory).await?;
    let numbers = directory.number_map().await?;
    for record in &mut records {
        record.annotate(&numbers);
    }

    let writes = plan_pass(&records);
    info!(
        "Reorder pass: {} channels, {} writes planned",
        records.len(),
        writes.len()
    );

    for write in &writes {
        let status = writer.set_sort_index(write).await?;
        if status >= 400 {
            return Err(Error::FatalWrite {
                channel_id: write.channel_id.clone(),
                new_index: write.new_index,
                status,
            });
        }
        debug!(
            "Channel {} -> index {} (HTTP {})",
            write.channel_id, write.new_index, status
        );
        tokio::time::sleep(pause).await;
    }

    Ok(PassSummary {
        channels: records.len(),
        writes: writes.len(),
    })
}
