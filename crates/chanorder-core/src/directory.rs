//! Capability traits over the media server.
//!
//! The reorder engine and convergence checker only see these traits, so a
//! live `EmbyClient` and an in-memory fake are interchangeable.

use tracing::debug;

use crate::error::Result;
use crate::types::{IndexWrite, ManagementRecord, NumberMap, ScheduledTask, PAGE_SIZE};

/// Read access to the two channel collections.
#[allow(async_fn_in_trait)]
pub trait ChannelDirectory {
    /// One page of management records starting at `start`.
    async fn management_page(&self, start: usize, limit: usize) -> Result<Vec<ManagementRecord>>;

    /// Channel id → display number, in a single unpaginated call.
    async fn number_map(&self) -> Result<NumberMap>;
}

/// Write access to a channel's sort index.
#[allow(async_fn_in_trait)]
pub trait SortIndexWriter {
    /// Issue the write and return the raw HTTP status.
    async fn set_sort_index(&self, write: &IndexWrite) -> Result<u16>;
}

/// Scheduled-task listing and triggering.
#[allow(async_fn_in_trait)]
pub trait TaskScheduler {
    async fn scheduled_tasks(&self) -> Result<Vec<ScheduledTask>>;

    /// Start a task and return the raw HTTP status.
    async fn start_task(&self, task_id: &str) -> Result<u16>;
}

/// Fetch every management record, `PAGE_SIZE` at a time.
///
/// The offset advances by the number of items actually returned and the
/// walk ends on the first empty page. Any page error aborts the fetch.
pub async fn fetch_management_list<D: ChannelDirectory>(directory: &D) -> Result<Vec<ManagementRecord>> {
    let mut out = Vec::new();
    let mut start = 0;
    loop {
        let page = directory.management_page(start, PAGE_SIZE).await?;
        if page.is_empty() {
            break;
        }
        debug!("Fetched {} management records at offset {}", page.len(), start);
        start += page.len();
        out.extend(page);
    }
    Ok(out)
}
