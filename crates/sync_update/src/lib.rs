// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # sync_update
//!
//! _Two progress bars, one update loop that gets observed and one that doesn't._
//!
//! Declarative UI runtimes rarely react to a state change the moment it happens.
//! They mark what changed and reconcile later, once per scheduling turn. Code
//! that mutates state in a tight loop without ever yielding only gets seen once.
//!
//! This crate reproduces that behavior on top of a `tokio`
//! [`LocalSet`](tokio::task::LocalSet):
//!
//! * [`Element`](state::Element) owns component state, collects
//!   [`Changed`](runtime::Changed) fields and schedules at most one
//!   reconciliation pass at a time.
//! * [`ProgressDemo`](demo::ProgressDemo) is the component. Its successful loop
//!   sleeps between assignments and has every value observed. Its failing loop
//!   doesn't, and all its updates are coalesced into a single pass.
//! * A [`Host`](host::Host) shows the rendered [`View`](view::View) and the alerts.
//!
//! ### Example
//!
//! ```
//! use std::rc::Rc;
//!
//! use sync_update::prelude::*;
//!
//! # #[tokio::main(flavor = "current_thread", start_paused = true)]
//! # async fn main() {
//! let host = Rc::new(Recorder::default());
//! let demo = ProgressDemo::new(Options { total_progress: 100, ..Options::default() }, host.clone());
//!
//! LocalSet::new()
//!     .run_until(async {
//!         assert_eq!(demo.run_successful_update_sequence().await, 100);
//!         assert_eq!(demo.run_failing_update_sequence().await, 0);
//!     })
//!     .await;
//!
//! assert_eq!(host.alerts(), [
//!     "Successful Progress Updated 100 Times",
//!     "Failing Progress Updated 0 Times",
//! ]);
//! # }
//! ```

pub mod demo;
pub mod host;
pub mod registry;
pub mod runtime;
pub mod state;
pub mod view;

/// The prelude module with most commonly used types.
///
/// Intended use is:
/// ```
/// use sync_update::prelude::*;
/// ```
pub mod prelude {
    pub use crate::demo::{Field, Options, ProgressDemo, ProgressDemoState};
    pub use crate::host::{Host, Recorder};
    pub use crate::registry::Registry;
    pub use crate::runtime::{Changed, Component, ShouldRender, Then};
    pub use crate::state::Element;
    pub use crate::view::{Action, ProgressBar, View};
    pub use tokio::task::LocalSet;
}
