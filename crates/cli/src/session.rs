use std::io::{self, Write};
use std::path::Path;
use std::rc::Rc;

use serde::Serialize;
use sync_update::prelude::*;
use tokio::runtime::{Builder, Runtime};

use crate::config::{config, Config};
use crate::log;
use crate::report::{Error, ErrorExt, Report};
use crate::terminal::Terminal;
use crate::{Demo, Run, Test};

pub fn run(config_path: Option<&Path>, run: &Run) -> Report<()> {
    let config = config(config_path, &run.demo)?;

    runtime()?.block_on(LocalSet::new().run_until(run_tests(&config, run)))
}

pub fn interactive(config_path: Option<&Path>, demo: &Demo) -> Report<()> {
    let config = config(config_path, demo)?;

    runtime()?.block_on(LocalSet::new().run_until(prompt(&config)))
}

pub fn list() -> Report<()> {
    let mut out = io::stdout().lock();

    for name in Registry::with_defaults().names() {
        writeln!(out, "{name}").message("failed to write to stdout")?;
    }

    Ok(())
}

fn runtime() -> Report<Runtime> {
    Builder::new_current_thread()
        .enable_all()
        .build()
        .message("failed to create tokio runtime")
}

fn create(config: &Config, host: Rc<dyn Host>) -> Report<ProgressDemo> {
    Registry::with_defaults()
        .create(&config.element, config.options, host)
        .ok_or_else(|| {
            Error::message(format!(
                "no element named `{}`; see `sync-update list`",
                config.element
            ))
        })
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Summary {
    test: &'static str,
    reported_updates: i64,
    state: ProgressDemoState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Sequence {
    Successful,
    Failing,
}

impl Sequence {
    fn name(self) -> &'static str {
        match self {
            Sequence::Successful => "successful",
            Sequence::Failing => "failing",
        }
    }
}

fn sequences(test: Test) -> &'static [Sequence] {
    match test {
        Test::Successful => &[Sequence::Successful],
        Test::Failing => &[Sequence::Failing],
        Test::Both => &[Sequence::Successful, Sequence::Failing],
    }
}

async fn run_sequence(demo: &ProgressDemo, sequence: Sequence) -> i64 {
    match sequence {
        Sequence::Successful => demo.run_successful_update_sequence().await,
        Sequence::Failing => demo.run_failing_update_sequence().await,
    }
}

/// Runs the selected tests in order, snapshotting the state after each one.
async fn summarize(demo: &ProgressDemo, test: Test) -> Vec<Summary> {
    let mut summaries = Vec::new();

    for &sequence in sequences(test) {
        summaries.push(Summary {
            test: sequence.name(),
            reported_updates: run_sequence(demo, sequence).await,
            state: demo.state(),
        });
    }

    summaries
}

async fn run_tests(config: &Config, run: &Run) -> Report<()> {
    if run.json {
        let demo = create(config, Rc::new(Recorder::default()))?;
        let summaries = summarize(&demo, run.test).await;

        let mut out = io::stdout().lock();
        serde_json::to_writer_pretty(&mut out, &summaries).message("failed to write summary")?;
        writeln!(out).message("failed to write summary")?;

        return Ok(());
    }

    let terminal = Rc::new(Terminal::stdout(false));
    let demo = create(config, terminal.clone())?;

    demo.connect();
    demo.element().update_complete().await;

    for &sequence in sequences(run.test) {
        log::running!("{} test on `{}`", sequence.name(), config.element);
        terminal.interrupt();

        let reported = run_sequence(&demo, sequence).await;

        log::finished!("{} test, {reported} updates reported", sequence.name());
        terminal.interrupt();
    }

    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Input {
    Act(Action),
    Help,
    Quit,
}

fn parse_input(line: &str) -> Option<Input> {
    let mut chars = line.trim().chars();
    let key = chars.next()?;

    if chars.next().is_some() {
        return None;
    }

    match key.to_ascii_lowercase() {
        'q' => Some(Input::Quit),
        '?' | 'h' => Some(Input::Help),
        key => Action::from_key(key).map(Input::Act),
    }
}

fn help(view: &View) -> String {
    let mut help = view
        .actions()
        .map(|action| format!("{} = {}", action.key(), describe(action)))
        .collect::<Vec<_>>();

    help.push("q = quit".to_owned());
    help.join(", ")
}

fn describe(action: Action) -> &'static str {
    match action {
        Action::RunSuccessful => "run the successful test",
        Action::RunFailing => "run the failing test",
        Action::ResetAll => "reset all tests",
    }
}

async fn prompt(config: &Config) -> Report<()> {
    let terminal = Rc::new(Terminal::stdout(true));
    let demo = create(config, terminal.clone())?;

    demo.connect();
    demo.element().update_complete().await;

    let help = help(&demo.state().render());
    println!("{help}");

    let stdin = io::stdin();
    let mut line = String::new();

    loop {
        print!("> ");
        io::stdout().flush().message("failed to write to stdout")?;

        line.clear();

        // Nothing is pending between commands, so blocking here stalls no pass.
        if stdin.read_line(&mut line).message("failed to read from stdin")? == 0 {
            return Ok(());
        }
        terminal.interrupt();

        match parse_input(&line) {
            Some(Input::Quit) => return Ok(()),
            Some(Input::Help) => println!("{help}"),
            Some(Input::Act(action)) => {
                if action == Action::ResetAll {
                    log::resetting!("all tests");
                }

                if let Some(reported) = demo.dispatch(action).await {
                    log::finished!("{reported} updates reported");
                }
                demo.element().update_complete().await;
            }
            None => log::error!("unknown command `{}`; {help}", line.trim()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inputs() {
        assert_eq!(parse_input("s\n"), Some(Input::Act(Action::RunSuccessful)));
        assert_eq!(parse_input("  F "), Some(Input::Act(Action::RunFailing)));
        assert_eq!(parse_input("r"), Some(Input::Act(Action::ResetAll)));
        assert_eq!(parse_input("q"), Some(Input::Quit));
        assert_eq!(parse_input("?"), Some(Input::Help));
        assert_eq!(parse_input("run"), None);
        assert_eq!(parse_input(""), None);
    }

    #[test]
    fn help_lists_every_control() {
        let help = help(&ProgressDemoState::default().render());

        assert_eq!(
            help,
            "s = run the successful test, f = run the failing test, r = reset all tests, q = quit"
        );
    }

    #[test]
    fn unknown_element() {
        let config = Config {
            element: "no-such-demo".to_owned(),
            options: Options::default(),
        };

        let err = create(&config, Rc::new(Recorder::default())).unwrap_err();

        assert_eq!(
            err.to_string(),
            "no element named `no-such-demo`; see `sync-update list`"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn summaries_serialize() {
        let config = Config {
            element: sync_update::demo::NAME.to_owned(),
            options: Options {
                total_progress: 40,
                ..Options::default()
            },
        };

        let demo = create(&config, Rc::new(Recorder::default())).unwrap();

        let summaries = LocalSet::new()
            .run_until(summarize(&demo, Test::Both))
            .await;

        let json = serde_json::to_value(&summaries).unwrap();

        assert_eq!(json[0]["test"], "successful");
        assert_eq!(json[0]["reportedUpdates"], 40);
        assert_eq!(json[0]["state"]["successfulUpdateCount"], 41);
        assert_eq!(json[1]["test"], "failing");
        assert_eq!(json[1]["reportedUpdates"], 0);
        assert_eq!(json[1]["state"]["failingProgress"], 40);
    }
}
