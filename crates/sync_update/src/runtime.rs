// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Scheduling primitives shared by every [`Element`](crate::state::Element).

use std::fmt::Debug;

use crate::host::Host;
use crate::view::View;

mod changed;

pub use changed::Changed;

/// Describes whether or not a mutation should schedule a reconciliation pass.
/// For uses see:
///
/// * [`Element::update`](crate::state::Element::update)
pub trait ShouldRender: 'static {
    fn should_render(self) -> bool;
}

/// Closures without return type always request a pass.
impl ShouldRender for () {
    fn should_render(self) -> bool {
        true
    }
}

/// An enum that implements the [`ShouldRender`] trait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Then {
    /// This is a silent update
    Stop,
    /// Mark the field as changed and schedule a pass
    Render,
}

impl ShouldRender for Then {
    fn should_render(self) -> bool {
        match self {
            Then::Stop => false,
            Then::Render => true,
        }
    }
}

/// State owned by an [`Element`](crate::state::Element).
///
/// A reconciliation pass first renders the state into a [`View`] for the host,
/// then hands the set of fields marked since the previous pass to
/// [`updated`](Component::updated).
pub trait Component: 'static {
    /// Names the observable fields of the state.
    type Key: Copy + Eq + Debug + 'static;

    fn render(&self) -> View;

    /// Reaction hook, invoked once per pass, never once per mutation.
    fn updated(&mut self, changed: &Changed<Self::Key>, host: &dyn Host) {
        let _ = (changed, host);
    }
}
