//! In-memory server used by the unit tests.
//!
//! Holds the channel list in its current server order (position ==
//! `SortIndexNumber`). An applied write removes the channel and reinserts it
//! at the requested index, shifting the rest.

use std::cell::{Cell, RefCell};

use chanorder_core::{
    ChannelDirectory, Error, IndexWrite, ManagementRecord, NumberMap, Result, ScheduledTask,
    SortIndexWriter, TaskScheduler,
};

pub struct FakeServer {
    order: RefCell<Vec<String>>,
    pub numbers: NumberMap,
    /// When false, writes are acknowledged but never applied.
    pub apply_writes: bool,
    /// Apply at most this many writes per pass (reset on each first page).
    pub writes_per_pass: Option<usize>,
    pub write_status: u16,
    pub tasks: Vec<ScheduledTask>,
    pub tasks_status: u16,
    pub start_status: u16,
    pub writes: RefCell<Vec<IndexWrite>>,
    pub started: RefCell<Vec<String>>,
    pub first_page_fetches: Cell<usize>,
    applied_this_pass: Cell<usize>,
}

impl FakeServer {
    /// Channels in current server order as `(id, number)`.
    pub fn new(channels: &[(&str, Option<&str>)]) -> Self {
        Self {
            order: RefCell::new(channels.iter().map(|(id, _)| id.to_string()).collect()),
            numbers: channels
                .iter()
                .map(|(id, n)| (id.to_string(), n.map(str::to_string)))
                .collect(),
            apply_writes: true,
            writes_per_pass: None,
            write_status: 204,
            tasks: vec![
                task("t-scan", "Scan media library"),
                task("t-guide", "Refresh Guide"),
            ],
            tasks_status: 200,
            start_status: 204,
            writes: RefCell::new(Vec::new()),
            started: RefCell::new(Vec::new()),
            first_page_fetches: Cell::new(0),
            applied_this_pass: Cell::new(0),
        }
    }

    pub fn order(&self) -> Vec<String> {
        self.order.borrow().clone()
    }

    /// Written `(channel id, new index)` pairs in issue order.
    pub fn write_log(&self) -> Vec<(String, usize)> {
        self.writes
            .borrow()
            .iter()
            .map(|w| (w.channel_id.clone(), w.new_index))
            .collect()
    }
}

pub fn task(id: &str, name: &str) -> ScheduledTask {
    ScheduledTask {
        id: id.into(),
        name: name.into(),
    }
}

impl ChannelDirectory for FakeServer {
    async fn management_page(&self, start: usize, limit: usize) -> Result<Vec<ManagementRecord>> {
        if start == 0 {
            self.first_page_fetches.set(self.first_page_fetches.get() + 1);
            self.applied_this_pass.set(0);
        }
        let order = self.order.borrow();
        Ok(order
            .iter()
            .enumerate()
            .skip(start)
            .take(limit)
            .map(|(i, id)| ManagementRecord::new(id.as_str(), format!("m{id}"), i))
            .collect())
    }

    async fn number_map(&self) -> Result<NumberMap> {
        Ok(self.numbers.clone())
    }
}

impl SortIndexWriter for FakeServer {
    async fn set_sort_index(&self, write: &IndexWrite) -> Result<u16> {
        self.writes.borrow_mut().push(write.clone());
        if self.write_status >= 400 {
            return Ok(self.write_status);
        }
        let within_budget = self
            .writes_per_pass
            .map_or(true, |limit| self.applied_this_pass.get() < limit);
        if self.apply_writes && within_budget {
            self.applied_this_pass.set(self.applied_this_pass.get() + 1);
            let mut order = self.order.borrow_mut();
            if let Some(pos) = order.iter().position(|id| *id == write.channel_id) {
                let id = order.remove(pos);
                let at = write.new_index.min(order.len());
                order.insert(at, id);
            }
        }
        Ok(self.write_status)
    }
}

impl TaskScheduler for FakeServer {
    async fn scheduled_tasks(&self) -> Result<Vec<ScheduledTask>> {
        if self.tasks_status >= 400 {
            return Err(Error::Transport {
                url: "/ScheduledTasks".into(),
                status: self.tasks_status,
            });
        }
        Ok(self.tasks.clone())
    }

    async fn start_task(&self, task_id: &str) -> Result<u16> {
        self.started.borrow_mut().push(task_id.to_string());
        Ok(self.start_status)
    }
}
