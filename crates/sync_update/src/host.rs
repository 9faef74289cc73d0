// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The surface an [`Element`](crate::state::Element) is presented on.

use std::cell::{Cell, RefCell};
use std::fmt;

use crate::view::View;

/// Whatever displays the component: a terminal, a test recorder, a page.
pub trait Host {
    /// Called at the start of every reconciliation pass.
    fn render(&self, view: &View);

    /// User-facing notification. Hosts are free to block until it is dismissed.
    fn alert(&self, message: &str);

    /// Trace output from reaction hooks. Ignored unless the host cares.
    fn log(&self, args: fmt::Arguments<'_>) {
        let _ = args;
    }
}

/// A [`Host`] that draws nothing and remembers everything it was given.
#[derive(Debug, Default)]
pub struct Recorder {
    renders: Cell<usize>,
    view: RefCell<Option<View>>,
    alerts: RefCell<Vec<String>>,
    logs: RefCell<Vec<String>>,
}

impl Recorder {
    pub fn renders(&self) -> usize {
        self.renders.get()
    }

    /// The most recently rendered view.
    pub fn view(&self) -> Option<View> {
        self.view.borrow().clone()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts.borrow().clone()
    }

    pub fn logs(&self) -> Vec<String> {
        self.logs.borrow().clone()
    }
}

impl Host for Recorder {
    fn render(&self, view: &View) {
        self.renders.set(self.renders.get() + 1);
        *self.view.borrow_mut() = Some(view.clone());
    }

    fn alert(&self, message: &str) {
        self.alerts.borrow_mut().push(message.to_owned());
    }

    fn log(&self, args: fmt::Arguments<'_>) {
        self.logs.borrow_mut().push(args.to_string());
    }
}
