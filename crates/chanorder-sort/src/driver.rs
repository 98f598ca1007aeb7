//! Driver loop: reorder, verify, retry up to `max_passes`, then refresh
//! the guide on success.

use std::time::Duration;

use chanorder_core::{ChanOrderConfig, ChannelDirectory, Result, SortIndexWriter, TaskScheduler};
use tracing::{info, warn};

use crate::convergence::fully_sorted;
use crate::refresh::{trigger_guide_refresh, RefreshOutcome};
use crate::reorder::{reorder_once, PassSummary};

/// Where the loop ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Running,
    Succeeded,
    Exhausted,
}

/// Loop tunables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSettings {
    /// Delay after each issued write.
    pub pause: Duration,
    /// Retry ceiling for whole passes (at least 1).
    pub max_passes: u32,
}

impl RunSettings {
    pub fn from_config(config: &ChanOrderConfig) -> Self {
        Self {
            pause: config.pause(),
            max_passes: config.max_passes,
        }
    }
}

impl Default for RunSettings {
    fn default() -> Self {
        Self::from_config(&ChanOrderConfig::default())
    }
}

/// Progress notifications emitted while the loop runs.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    PassComplete { attempt: u32, summary: PassSummary },
    NotYetSorted { attempt: u32, first_violation: Option<usize> },
    Sorted { attempts: u32, channels: usize },
    Refresh(RefreshOutcome),
    Exhausted { passes: u32 },
}

/// Final result of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunOutcome {
    pub state: RunState,
    pub attempts: u32,
    pub channels: usize,
    /// Present only when the run succeeded.
    pub refresh: Option<RefreshOutcome>,
}

/// Bounded retry orchestration over one server.
pub struct Driver<C> {
    client: C,
    settings: RunSettings,
}

impl<C> Driver<C>
where
    C: ChannelDirectory + SortIndexWriter + TaskScheduler,
{
    pub fn new(client: C, settings: RunSettings) -> Self {
        Self { client, settings }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Run passes until the order converges or the ceiling is reached.
    ///
    /// Any transport error or rejected write ends the run with `Err`.
    pub async fn run<F>(&self, mut on_event: F) -> Result<RunOutcome>
    where
        F: FnMut(&Event),
    {
        let max_passes = self.settings.max_passes.max(1);
        let mut attempt = 1;

        loop {
            let summary = reorder_once(&self.client, &self.client, self.settings.pause).await?;
            on_event(&Event::PassComplete { attempt, summary });

            let report = fully_sorted(&self.client).await?;
            let state = if report.ok {
                RunState::Succeeded
            } else if attempt >= max_passes {
                RunState::Exhausted
            } else {
                RunState::Running
            };

            match state {
                RunState::Running => {
                    info!("Pass {} left the list out of order, retrying", attempt);
                    on_event(&Event::NotYetSorted {
                        attempt,
                        first_violation: report.first_violation(),
                    });
                    attempt += 1;
                }
                RunState::Succeeded => {
                    info!(
                        "Sorted after {} pass(es), {} channels",
                        attempt,
                        report.channels()
                    );
                    on_event(&Event::Sorted {
                        attempts: attempt,
                        channels: report.channels(),
                    });

                    let refresh = trigger_guide_refresh(&self.client).await?;
                    on_event(&Event::Refresh(refresh.clone()));
                    return Ok(RunOutcome {
                        state,
                        attempts: attempt,
                        channels: report.channels(),
                        refresh: Some(refresh),
                    });
                }
                RunState::Exhausted => {
                    warn!("Order not converged after {} passes", attempt);
                    on_event(&Event::Exhausted { passes: attempt });
                    return Ok(RunOutcome {
                        state,
                        attempts: attempt,
                        channels: report.channels(),
                        refresh: None,
                    });
                }
            }
        }
    }
}
