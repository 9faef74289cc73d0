// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Successful and failing update loops
//!
//! [`ProgressDemo`] drives two progress bars from `0` to `total_progress` and counts
//! how many times its reaction hook got to observe each of them.
//!
//! The successful loop sleeps before every assignment. Sleeping hands control back
//! to the scheduler, the pending pass runs, and the hook observes every single value.
//!
//! The failing loop assigns and explicitly requests an update on every iteration,
//! but never yields. The requests pile up into a single pending pass that only runs
//! once the loop is done, so the hook sees the final value and nothing else. This
//! is the behavior being demonstrated and must not be "fixed".
use std::rc::Rc;
use std::time::Duration;

use crate::host::Host;
use crate::runtime::{Changed, Component};
use crate::state::Element;
use crate::view::{Action, Block, ProgressBar, View};

/// Name the demo is registered under by [`Registry::with_defaults`](crate::registry::Registry::with_defaults).
pub const NAME: &str = "sync-updating-example";

pub const DEFAULT_TOTAL_PROGRESS: u32 = 1000;

/// Shortest delay the successful loop sleeps for.
pub const MIN_TICK: Duration = Duration::from_millis(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// Upper bound of both progress bars.
    pub total_progress: u32,
    /// Delay before each step of the successful loop, never below [`MIN_TICK`].
    pub tick: Duration,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            total_progress: DEFAULT_TOTAL_PROGRESS,
            tick: MIN_TICK,
        }
    }
}

/// Observable fields of [`ProgressDemoState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    SuccessfulProgress,
    FailingProgress,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct ProgressDemoState {
    pub successful_progress: u32,
    pub failing_progress: u32,
    pub total_progress: u32,
    pub successful_update_count: u32,
    pub failing_update_count: u32,
}

impl Default for ProgressDemoState {
    fn default() -> Self {
        Self::new(DEFAULT_TOTAL_PROGRESS)
    }
}

impl ProgressDemoState {
    pub const fn new(total_progress: u32) -> Self {
        ProgressDemoState {
            successful_progress: 0,
            failing_progress: 0,
            total_progress,
            successful_update_count: 0,
            failing_update_count: 0,
        }
    }

    /// Zero both bars and both counters. The bound stays.
    pub fn reset(&mut self) {
        *self = Self::new(self.total_progress);
    }

    /// Count the fields observed in this pass.
    pub fn on_progress_changed(&mut self, changed: &Changed<Field>, host: &dyn Host) {
        if changed.has(Field::SuccessfulProgress) {
            self.successful_update_count += 1;
            host.log(format_args!(
                "successful progress observed at {}",
                self.successful_progress
            ));
        }

        if changed.has(Field::FailingProgress) {
            self.failing_update_count += 1;
            host.log(format_args!(
                "failing progress observed {} times",
                self.failing_update_count
            ));
        }
    }
}

impl Component for ProgressDemoState {
    type Key = Field;

    fn render(&self) -> View {
        View {
            blocks: vec![
                Block {
                    title: "Successful Synchronous Update",
                    bar: ProgressBar::new(self.successful_progress, self.total_progress),
                    action: Action::RunSuccessful,
                },
                Block {
                    title: "Failing Synchronous Update",
                    bar: ProgressBar::new(self.failing_progress, self.total_progress),
                    action: Action::RunFailing,
                },
            ],
            controls: vec![Action::ResetAll],
        }
    }

    fn updated(&mut self, changed: &Changed<Field>, host: &dyn Host) {
        self.on_progress_changed(changed, host);
    }
}

/// The demo component. Cloning yields another handle to the same state.
///
/// Runs are not guarded against each other: starting one while another is in
/// flight makes both write the same fields.
#[derive(Debug, Clone)]
pub struct ProgressDemo {
    element: Element<ProgressDemoState>,
    tick: Duration,
}

impl ProgressDemo {
    pub fn new(options: Options, host: Rc<dyn Host>) -> Self {
        ProgressDemo {
            element: Element::new(ProgressDemoState::new(options.total_progress), host),
            tick: options.tick.max(MIN_TICK),
        }
    }

    /// Schedule the first render.
    pub fn connect(&self) {
        self.element.connect();
    }

    pub fn element(&self) -> &Element<ProgressDemoState> {
        &self.element
    }

    pub fn state(&self) -> ProgressDemoState {
        self.element.get()
    }

    /// Sleep, assign, repeat. Every assignment is observed by its own pass.
    ///
    /// Alerts and returns the number of observed updates, minus one.
    pub async fn run_successful_update_sequence(&self) -> i64 {
        let total = self.element.with(|s| s.total_progress);

        for i in 0..=total {
            tokio::time::sleep(self.tick).await;

            self.element
                .update(Field::SuccessfulProgress, |s| s.successful_progress = i);
        }

        self.element.update_complete().await;

        // Every assignment, `0` included, was observed. The report is one short.
        let updates = i64::from(self.element.with(|s| s.successful_update_count)) - 1;

        self.element
            .host()
            .alert(&format!("Successful Progress Updated {updates} Times"));

        updates
    }

    /// Assign and request an update on every step without ever yielding.
    /// All requests end up in a single pass.
    ///
    /// Alerts and returns the number of observed updates, minus one.
    pub async fn run_failing_update_sequence(&self) -> i64 {
        let total = self.element.with(|s| s.total_progress);

        for i in 0..=total {
            // Not a reactive field: assigning alone schedules nothing.
            self.element.update_silent(|s| s.failing_progress = i);
            self.element.request_update(Field::FailingProgress);
        }

        self.element.update_complete().await;

        let updates = i64::from(self.element.with(|s| s.failing_update_count)) - 1;

        self.element
            .host()
            .alert(&format!("Failing Progress Updated {updates} Times"));

        updates
    }

    /// Zero progress and counters without marking any field, then re-render.
    pub fn reset(&self) {
        self.element.update_silent(ProgressDemoState::reset);
        self.element.request_render();
    }

    /// Perform what the control `action` does. Runs yield their reported count.
    pub async fn dispatch(&self, action: Action) -> Option<i64> {
        match action {
            Action::RunSuccessful => Some(self.run_successful_update_sequence().await),
            Action::RunFailing => Some(self.run_failing_update_sequence().await),
            Action::ResetAll => {
                self.reset();
                None
            }
        }
    }
}
