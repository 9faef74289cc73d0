use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand, ValueEnum};

mod config;
mod log;
mod report;
mod session;
mod terminal;

/// Watch a batched UI runtime observe one update loop and coalesce another
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// When to color the output
    #[arg(long, value_enum, default_value_t = When::Auto, global = true)]
    color: When,

    /// Print a line every time the reaction hook observes a change
    #[arg(short, long, global = true)]
    verbose: bool,

    /// JSON file with `totalProgress`, `tickMs` and `element` keys
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the tests once and exit
    #[command(visible_alias = "r")]
    Run(Run),

    /// Drive the demo from the keyboard
    #[command(visible_alias = "i")]
    Interactive(Demo),

    /// List registered element names
    List,
}

#[derive(Debug, Args)]
struct Demo {
    /// Upper bound of both progress bars [default: 1000]
    #[arg(long)]
    total: Option<u32>,

    /// Delay before each step of the successful test, in milliseconds [default: 1]
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Registered element to create [default: sync-updating-example]
    #[arg(long)]
    element: Option<String>,
}

#[derive(Debug, Args)]
struct Run {
    /// Which test to run
    #[arg(value_enum, default_value_t = Test::Both)]
    test: Test,

    #[command(flatten)]
    demo: Demo,

    /// Print a JSON summary instead of drawing the bars
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Test {
    Successful,
    Failing,
    Both,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum When {
    Auto,
    Always,
    Never,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.verbose {
        log::enable_verbose_output();
    }

    let color = match cli.color {
        When::Auto => io::stderr().is_terminal(),
        When::Always => true,
        When::Never => false,
    };
    if color {
        log::enable_color_output();
    }

    let config = cli.config.as_deref();
    let res = match &cli.command {
        Command::Run(run) => session::run(config, run),
        Command::Interactive(demo) => session::interactive(config, demo),
        Command::List => session::list(),
    };

    match res {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn run_flags() {
        let cli = Cli::parse_from([
            "sync-update",
            "run",
            "failing",
            "--total",
            "10",
            "--json",
            "--color",
            "never",
        ]);

        let Command::Run(run) = cli.command else {
            panic!("expected `run`");
        };

        assert_eq!(run.test, Test::Failing);
        assert_eq!(run.demo.total, Some(10));
        assert!(run.json);
        assert_eq!(cli.color, When::Never);
    }

    #[test]
    fn aliases() {
        let cli = Cli::parse_from(["sync-update", "i", "--tick-ms", "3"]);

        let Command::Interactive(demo) = cli.command else {
            panic!("expected `interactive`");
        };

        assert_eq!(demo.tick_ms, Some(3));
        assert!(demo.element.is_none());
    }
}
