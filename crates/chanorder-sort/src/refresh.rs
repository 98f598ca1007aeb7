//! Guide refresh: start the server's "Refresh Guide" scheduled task.

use chanorder_core::{Result, ScheduledTask, TaskScheduler};
use tracing::{info, warn};

/// Result of asking the server to refresh its guide. None of these are
/// errors.
#[derive(Debug, Clone, PartialEq)]
pub enum RefreshOutcome {
    Started { task: ScheduledTask },
    TaskNotFound,
    UnexpectedStatus { task: ScheduledTask, status: u16 },
}

impl RefreshOutcome {
    pub fn is_started(&self) -> bool {
        matches!(self, RefreshOutcome::Started { .. })
    }
}

/// First task whose name contains "guide", ignoring case.
pub fn find_guide_task(tasks: &[ScheduledTask]) -> Option<&ScheduledTask> {
    tasks
        .iter()
        .find(|t| t.name.to_lowercase().contains("guide"))
}

pub async fn trigger_guide_refresh<S: TaskScheduler>(scheduler: &S) -> Result<RefreshOutcome> {
    let tasks = scheduler.scheduled_tasks().await?;
    let Some(task) = find_guide_task(&tasks) else {
        warn!("No scheduled task containing 'guide' among {} tasks", tasks.len());
        return Ok(RefreshOutcome::TaskNotFound);
    };

    let status = scheduler.start_task(&task.id).await?;
    if status == 204 {
        info!("Started scheduled task {} ({})", task.name, task.id);
        Ok(RefreshOutcome::Started { task: task.clone() })
    } else {
        warn!("Starting task {} returned HTTP {}", task.name, status);
        Ok(RefreshOutcome::UnexpectedStatus {
            task: task.clone(),
            status,
        })
    }
}
