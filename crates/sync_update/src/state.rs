// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Reactive component state
//!
//! An [`Element`] owns the state of a single [`Component`] and decides when the
//! component gets to see its own changes. Mutations never run the reaction hook
//! directly. Instead they mark a field as changed and schedule a reconciliation
//! pass on the current [`LocalSet`](tokio::task::LocalSet):
//!
//! ```
//! # use std::rc::Rc;
//! # use sync_update::prelude::*;
//! # async fn example(element: Element<ProgressDemoState>) {
//! // marks `SuccessfulProgress` and schedules a pass
//! element.update(Field::SuccessfulProgress, |s| s.successful_progress = 10);
//!
//! // no pass runs until this task yields, so this lands in the same pass
//! element.update(Field::SuccessfulProgress, |s| s.successful_progress = 11);
//!
//! element.update_complete().await;
//! # }
//! ```
//!
//! At most one pass is pending at any time. Every mutation made before the pass
//! gets to run is coalesced into it, and the hook only ever sees the latest values.
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use tokio::sync::Notify;

use crate::host::Host;
use crate::runtime::{Changed, Component, ShouldRender};

/// Cloneable handle to component state. All clones share the same state.
pub struct Element<C: Component> {
    inner: Rc<Inner<C>>,
}

struct Inner<C: Component> {
    state: RefCell<C>,
    changed: RefCell<Changed<C::Key>>,
    pending: Cell<bool>,
    passes: Cell<u64>,
    settled: Notify,
    host: Rc<dyn Host>,
}

impl<C: Component> Clone for Element<C> {
    fn clone(&self) -> Self {
        Element {
            inner: self.inner.clone(),
        }
    }
}

impl<C: Component> Element<C> {
    pub fn new(state: C, host: Rc<dyn Host>) -> Self {
        Element {
            inner: Rc::new(Inner {
                state: RefCell::new(state),
                changed: RefCell::new(Changed::new()),
                pending: Cell::new(false),
                passes: Cell::new(0),
                settled: Notify::new(),
                host,
            }),
        }
    }

    pub fn host(&self) -> &dyn Host {
        &*self.inner.host
    }

    /// Read the state without marking anything.
    pub fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&C) -> R,
    {
        f(&self.inner.state.borrow())
    }

    /// Snapshot of the current state.
    pub fn get(&self) -> C
    where
        C: Clone,
    {
        self.inner.state.borrow().clone()
    }

    /// Number of reconciliation passes performed so far.
    pub fn passes(&self) -> u64 {
        self.inner.passes.get()
    }

    pub fn is_update_pending(&self) -> bool {
        self.inner.pending.get()
    }

    /// Schedule the first render. The pass sees an empty changed set.
    ///
    /// Must be called from within a [`LocalSet`](tokio::task::LocalSet).
    pub fn connect(&self) {
        self.schedule();
    }

    /// Mutate the state and mark `key` as changed, unless the mutator returns
    /// [`Then::Stop`](crate::runtime::Then::Stop).
    ///
    /// Must be called from within a [`LocalSet`](tokio::task::LocalSet).
    pub fn update<F, O>(&self, key: C::Key, mutator: F)
    where
        F: FnOnce(&mut C) -> O,
        O: ShouldRender,
    {
        let render = mutator(&mut self.inner.state.borrow_mut()).should_render();

        if render {
            self.request_update(key);
        }
    }

    /// Same as [`update`](Element::update), but it never schedules a pass.
    pub fn update_silent<F>(&self, mutator: F)
    where
        F: FnOnce(&mut C),
    {
        mutator(&mut self.inner.state.borrow_mut());
    }

    /// Mark `key` as changed and schedule a pass, whether or not its value moved.
    pub fn request_update(&self, key: C::Key) {
        self.inner.changed.borrow_mut().insert(key);
        self.schedule();
    }

    /// Schedule a pass without marking any field.
    pub fn request_render(&self) {
        self.schedule();
    }

    /// Resolves once no pass is pending. Resolves immediately when idle.
    pub async fn update_complete(&self) {
        loop {
            // Created before the check so a pass finishing in between still wakes us.
            let settled = self.inner.settled.notified();

            if !self.inner.pending.get() {
                return;
            }

            settled.await;
        }
    }

    fn schedule(&self) {
        if self.inner.pending.replace(true) {
            return;
        }

        let element = self.clone();

        tokio::task::spawn_local(async move { element.perform_update() });
    }

    fn perform_update(&self) {
        let inner = &*self.inner;
        let changed = inner.changed.take();

        inner.pending.set(false);

        {
            let mut state = inner.state.borrow_mut();

            inner.host.render(&state.render());
            state.updated(&changed, &*inner.host);
        }

        inner.passes.set(inner.passes.get() + 1);

        if !inner.pending.get() {
            inner.settled.notify_waiters();
        }
    }
}

impl<C: Component> fmt::Debug for Element<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Element")
            .field("pending", &self.inner.pending.get())
            .field("passes", &self.inner.passes.get())
            .finish_non_exhaustive()
    }
}
