//! chanorder sort: the convergence loop.
//!
//! `plan_pass` and `check_order` are pure functions over in-memory
//! records; `reorder_once`, `fully_sorted`, `trigger_guide_refresh` and the
//! `Driver` run them against any implementation of the `chanorder-core`
//! capability traits.

pub mod convergence;
pub mod driver;
pub mod refresh;
pub mod reorder;
pub mod sort_key;

#[cfg(test)]
mod fake;

pub use convergence::{check_order, fully_sorted, OrderReport};
pub use driver::{Driver, Event, RunOutcome, RunSettings, RunState};
pub use refresh::{trigger_guide_refresh, RefreshOutcome};
pub use reorder::{desired_order, plan_pass, reorder_once, PassSummary};
pub use sort_key::{compare_numbers, sort_key};
