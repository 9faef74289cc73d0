use std::cell::{Cell, RefCell};
use std::fmt;
use std::io::{self, IsTerminal, Write};

use crossterm::cursor::MoveToPreviousLine;
use crossterm::queue;
use crossterm::style::Stylize;
use crossterm::terminal::{Clear, ClearType};
use sync_update::host::Host;
use sync_update::view::View;

use crate::log;

const BAR_WIDTH: usize = 40;

/// [`Host`] drawing the view, normally on stdout.
///
/// With `redraw` every pass overwrites the previous frame in place. Without it
/// only the frame current at the time of an alert is printed, which keeps
/// piped output readable.
pub struct Terminal<W = io::Stdout> {
    out: RefCell<W>,
    redraw: bool,
    wait_on_alert: bool,
    verbose: bool,
    lines: Cell<u16>,
    last: RefCell<Option<View>>,
}

impl Terminal {
    /// Redraws in place only when stdout is a terminal.
    pub fn stdout(wait_on_alert: bool) -> Self {
        let redraw = io::stdout().is_terminal();

        Terminal::with_writer(io::stdout(), redraw, wait_on_alert)
    }
}

impl<W: Write> Terminal<W> {
    pub fn with_writer(out: W, redraw: bool, wait_on_alert: bool) -> Self {
        Terminal {
            out: RefCell::new(out),
            redraw,
            wait_on_alert,
            verbose: log::is_verbose_output_enabled(),
            lines: Cell::new(0),
            last: RefCell::new(None),
        }
    }

    /// Start the next frame below whatever got printed since the last one.
    pub fn interrupt(&self) {
        self.lines.set(0);
    }

    fn draw(&self, view: &View) -> io::Result<()> {
        let frame = frame(view, log::is_color_output_enabled());
        let mut out = self.out.borrow_mut();

        let lines = self.lines.get();
        if lines > 0 {
            queue!(out, MoveToPreviousLine(lines))?;
        }

        for line in &frame {
            queue!(out, Clear(ClearType::CurrentLine))?;
            writeln!(out, "{line}")?;
        }
        out.flush()?;

        self.lines.set(frame.len() as u16);

        Ok(())
    }

    fn print_alert(&self, message: &str) -> io::Result<()> {
        let mut out = self.out.borrow_mut();

        if let Some(view) = self.last.take() {
            for line in frame(&view, log::is_color_output_enabled()) {
                writeln!(out, "{line}")?;
            }
        }

        writeln!(out, "{} {message}", Badge)?;

        if self.wait_on_alert {
            write!(out, "press Enter to continue ")?;
        }
        out.flush()
    }
}

impl<W: Write + 'static> Host for Terminal<W> {
    fn render(&self, view: &View) {
        if !self.redraw {
            *self.last.borrow_mut() = Some(view.clone());
            return;
        }

        if let Err(err) = self.draw(view) {
            log::error!("failed to draw progress: {err}");
        }
    }

    fn alert(&self, message: &str) {
        if let Err(err) = self.print_alert(message) {
            log::error!("failed to print alert: {err}");
        }
        self.interrupt();

        // Alerts block until dismissed.
        if self.wait_on_alert {
            if let Err(err) = io::stdin().read_line(&mut String::new()) {
                log::error!("failed to read from stdin: {err}");
            }
        }
    }

    fn log(&self, args: fmt::Arguments<'_>) {
        if self.verbose {
            log::info!("{args}");
            self.interrupt();
        }
    }
}

struct Badge;

impl fmt::Display for Badge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let badge = "[!]";
        if log::is_color_output_enabled() {
            write!(f, "{}", badge.yellow().bold())
        } else {
            write!(f, "{badge}")
        }
    }
}

/// One line per block, then one line with the remaining controls.
pub fn frame(view: &View, color: bool) -> Vec<String> {
    let mut lines = Vec::with_capacity(view.blocks.len() + 1);

    for block in &view.blocks {
        let bar = format!("{:width$}", block.bar, width = BAR_WIDTH);
        let bar = match (color, block.bar.value >= block.bar.max) {
            (false, _) => bar,
            (true, true) => bar.dark_green().to_string(),
            (true, false) => bar.dark_blue().to_string(),
        };

        lines.push(format!(
            "{:<30} {:>3}% {bar} [{}] {}",
            block.title,
            block.bar.percent(),
            block.action.key(),
            block.action.label(),
        ));
    }

    if !view.controls.is_empty() {
        let controls = view
            .controls
            .iter()
            .map(|action| format!("[{}] {}", action.key(), action.label()))
            .collect::<Vec<_>>();

        lines.push(controls.join("  "));
    }

    lines
}

#[cfg(test)]
mod tests {
    use sync_update::prelude::*;

    use super::*;

    #[test]
    fn plain_frame() {
        let view = ProgressDemoState {
            successful_progress: 500,
            ..ProgressDemoState::new(1000)
        }
        .render();

        let frame = frame(&view, false);

        assert_eq!(frame.len(), 3);
        assert_eq!(
            frame[0],
            format!(
                "Successful Synchronous Update   50% [{}{}] [s] Run Test",
                "#".repeat(20),
                ".".repeat(20)
            )
        );
        assert!(frame[1].starts_with("Failing Synchronous Update       0% [...."));
        assert_eq!(frame[2], "[r] Reset all tests");
    }

    fn piped(verbose: bool) -> Terminal<Vec<u8>> {
        Terminal {
            verbose,
            ..Terminal::with_writer(Vec::new(), false, false)
        }
    }

    fn output(terminal: &Terminal<Vec<u8>>) -> String {
        String::from_utf8(terminal.out.borrow().clone()).unwrap()
    }

    #[test]
    fn piped_alert_prints_last_frame_then_badge() {
        let terminal = piped(false);

        terminal.render(&ProgressDemoState::new(10).render());
        terminal.render(
            &ProgressDemoState {
                failing_progress: 10,
                ..ProgressDemoState::new(10)
            }
            .render(),
        );

        assert_eq!(output(&terminal), "");

        terminal.alert("Failing Progress Updated 0 Times");

        let printed = output(&terminal);
        let lines = printed.lines().collect::<Vec<_>>();

        assert!(!printed.contains('\x1b'));
        assert_eq!(lines.len(), 4);
        assert!(lines[1].starts_with("Failing Synchronous Update     100% [####"));
        assert_eq!(lines[2], "[r] Reset all tests");
        assert_eq!(lines[3], "[!] Failing Progress Updated 0 Times");

        terminal.alert("again");

        assert!(output(&terminal).ends_with("Times\n[!] again\n"));
    }

    #[test]
    fn redraw_moves_back_over_previous_frame() {
        let terminal = Terminal::with_writer(Vec::new(), true, false);
        let view = ProgressDemoState::new(10).render();

        terminal.render(&view);
        assert_eq!(terminal.lines.get(), 3);
        assert!(!output(&terminal).contains("\x1b[3F"));

        terminal.render(&view);
        assert!(output(&terminal).contains("\x1b[3F"));
    }

    #[test]
    fn log_only_interrupts_when_verbose() {
        let view = ProgressDemoState::new(10).render();

        let quiet = Terminal {
            redraw: true,
            ..piped(false)
        };
        quiet.render(&view);
        quiet.log(format_args!("successful progress observed at 1"));
        assert_eq!(quiet.lines.get(), 3);

        let verbose = Terminal {
            redraw: true,
            ..piped(true)
        };
        verbose.render(&view);
        verbose.log(format_args!("successful progress observed at 1"));
        assert_eq!(verbose.lines.get(), 0);
    }

    #[test]
    fn empty_range_frame() {
        let view = ProgressDemoState::new(0).render();

        let frame = frame(&view, false);

        assert!(frame[0].contains(" --% ["));
    }
}
