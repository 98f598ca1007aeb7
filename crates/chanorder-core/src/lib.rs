//! chanorder core: channel records, capability traits, errors, configuration.

pub mod config;
pub mod directory;
pub mod error;
pub mod types;

pub use config::ChanOrderConfig;
pub use directory::{fetch_management_list, ChannelDirectory, SortIndexWriter, TaskScheduler};
pub use error::{Error, Result};
pub use types::{IndexWrite, ManagementRecord, NumberMap, ScheduledTask, PAGE_SIZE};
