// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Host-independent description of what a component shows.

use std::fmt::{self, Display, Write};

/// Output of [`Component::render`](crate::runtime::Component::render).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct View {
    pub blocks: Vec<Block>,
    /// Controls that don't belong to any block.
    pub controls: Vec<Action>,
}

impl View {
    /// Every action the view exposes, block actions first.
    pub fn actions(&self) -> impl Iterator<Item = Action> + '_ {
        self.blocks
            .iter()
            .map(|block| block.action)
            .chain(self.controls.iter().copied())
    }
}

/// A heading with a percentage, a button and a progress bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub title: &'static str,
    pub bar: ProgressBar,
    pub action: Action,
}

impl Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}%", self.title, self.bar.percent())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressBar {
    pub value: u32,
    pub max: u32,
}

impl ProgressBar {
    pub const fn new(value: u32, max: u32) -> Self {
        ProgressBar { value, max }
    }

    /// Whole percent, rounded down.
    pub fn percent(&self) -> Percent {
        if self.max == 0 {
            return Percent(None);
        }

        let percent = u64::from(self.value) * 100 / u64::from(self.max);

        Percent(Some(percent.min(100) as u32))
    }

    /// Number of cells filled when drawn `width` cells wide.
    pub fn filled(&self, width: usize) -> usize {
        if self.max == 0 {
            return 0;
        }

        let filled = self.value.min(self.max) as u64 * width as u64 / u64::from(self.max);

        filled as usize
    }
}

/// Draws as `[####......]`. The formatter width sets the number of cells.
impl Display for ProgressBar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = f.width().unwrap_or(20);
        let filled = self.filled(width);

        f.write_char('[')?;
        for _ in 0..filled {
            f.write_char('#')?;
        }
        for _ in filled..width {
            f.write_char('.')?;
        }
        f.write_char(']')
    }
}

/// Percentage label. An empty range has no meaningful percentage and shows `--`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Percent(pub Option<u32>);

impl Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(n) => f.pad(itoa::Buffer::new().format(n)),
            None => f.pad("--"),
        }
    }
}

/// The clickable controls of the demo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    RunSuccessful,
    RunFailing,
    ResetAll,
}

impl Action {
    pub const ALL: [Action; 3] = [Action::RunSuccessful, Action::RunFailing, Action::ResetAll];

    /// Button caption.
    pub fn label(self) -> &'static str {
        match self {
            Action::RunSuccessful | Action::RunFailing => "Run Test",
            Action::ResetAll => "Reset all tests",
        }
    }

    /// Keyboard shortcut used by text hosts.
    pub fn key(self) -> char {
        match self {
            Action::RunSuccessful => 's',
            Action::RunFailing => 'f',
            Action::ResetAll => 'r',
        }
    }

    pub fn from_key(key: char) -> Option<Self> {
        Action::ALL
            .into_iter()
            .find(|action| action.key() == key.to_ascii_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_rounds_down() {
        assert_eq!(ProgressBar::new(0, 1000).percent(), Percent(Some(0)));
        assert_eq!(ProgressBar::new(9, 1000).percent(), Percent(Some(0)));
        assert_eq!(ProgressBar::new(459, 1000).percent(), Percent(Some(45)));
        assert_eq!(ProgressBar::new(1000, 1000).percent(), Percent(Some(100)));
        assert_eq!(ProgressBar::new(u32::MAX, u32::MAX).percent(), Percent(Some(100)));
    }

    #[test]
    fn empty_range() {
        let bar = ProgressBar::new(0, 0);

        assert_eq!(bar.percent().to_string(), "--");
        assert_eq!(format!("{:>4}", bar.percent()), "  --");
        assert_eq!(format!("{bar:4}"), "[....]");
    }

    #[test]
    fn draw() {
        assert_eq!(format!("{:10}", ProgressBar::new(5, 10)), "[#####.....]");
        assert_eq!(format!("{:10}", ProgressBar::new(10, 10)), "[##########]");
        assert_eq!(format!("{}", ProgressBar::new(1, 2)).len(), 22);

        let block = Block {
            title: "Failing Synchronous Update",
            bar: ProgressBar::new(333, 1000),
            action: Action::RunFailing,
        };

        assert_eq!(block.to_string(), "Failing Synchronous Update 33%");
    }

    #[test]
    fn keys() {
        assert_eq!(Action::from_key('S'), Some(Action::RunSuccessful));
        assert_eq!(Action::from_key('f'), Some(Action::RunFailing));
        assert_eq!(Action::from_key('r'), Some(Action::ResetAll));
        assert_eq!(Action::from_key('q'), None);
    }
}
