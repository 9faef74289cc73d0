// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Explicit name to factory registration, handed to whichever host creates components.

use std::error::Error;
use std::fmt;
use std::rc::Rc;

use crate::demo::{self, Options, ProgressDemo};
use crate::host::Host;

pub type Factory = fn(Options, Rc<dyn Host>) -> ProgressDemo;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefineError {
    /// Names must start with a lowercase ASCII letter, contain a `-`, and
    /// otherwise only use lowercase letters, digits, `.`, `_` and `-`.
    InvalidName(String),
    AlreadyDefined(String),
}

impl fmt::Display for DefineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefineError::InvalidName(name) => write!(f, "\"{name}\" is not a valid element name"),
            DefineError::AlreadyDefined(name) => {
                write!(f, "\"{name}\" has already been defined")
            }
        }
    }
}

impl Error for DefineError {}

#[derive(Debug, Clone, Default)]
pub struct Registry {
    definitions: Vec<(String, Factory)>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with the demo defined under [`demo::NAME`].
    pub fn with_defaults() -> Self {
        let mut registry = Registry::new();

        registry.definitions.push((demo::NAME.to_owned(), ProgressDemo::new));
        registry
    }

    pub fn define(&mut self, name: &str, factory: Factory) -> Result<(), DefineError> {
        if !is_valid_name(name) {
            return Err(DefineError::InvalidName(name.to_owned()));
        }
        if self.get(name).is_some() {
            return Err(DefineError::AlreadyDefined(name.to_owned()));
        }

        self.definitions.push((name.to_owned(), factory));

        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<Factory> {
        self.definitions
            .iter()
            .find(|(defined, _)| defined == name)
            .map(|(_, factory)| *factory)
    }

    pub fn create(&self, name: &str, options: Options, host: Rc<dyn Host>) -> Option<ProgressDemo> {
        self.get(name).map(|factory| factory(options, host))
    }

    /// Defined names, in definition order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.definitions.iter().map(|(name, _)| name.as_str())
    }
}

fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();

    matches!(chars.next(), Some('a'..='z'))
        && name.contains('-')
        && chars.all(|c| matches!(c, 'a'..='z' | '0'..='9' | '.' | '_' | '-'))
}
