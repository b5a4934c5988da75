use std::io::{self, BufRead, Write};
use std::sync::mpsc;
use std::thread;

use anyhow::Context;
use clap::Parser;
use log::LevelFilter;
use triage_core::{update, AppState, Msg, Screen};
use triage_logging::{triage_debug, triage_info, triage_warn};

use super::cli::Args;
use super::commands::{parse_command, Command};
use super::config::load_config;
use super::effects::EffectRunner;
use super::{files, logging, ui};

enum Input {
    Line(String),
    Engine(Msg),
    Closed,
}

pub fn run_app() -> anyhow::Result<()> {
    let args = Args::parse();
    let mut config = load_config(&args.config)?;
    if let Some(api_base) = args.api_base {
        config.api_base_url = api_base;
    }
    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        config.level_filter()?
    };
    logging::initialize(config.log_destination, level);
    triage_info!("Starting, api_base_url={}", config.api_base_url);

    let (tx, rx) = mpsc::channel::<Input>();
    let engine_tx = tx.clone();
    let runner = EffectRunner::new(config.client_settings(), move |msg| {
        engine_tx.send(Input::Engine(msg)).is_ok()
    })
    .context("failed to start the classification engine")?;
    spawn_stdin_reader(tx);

    let mut session = Session::new(runner, io::stdout());
    session.print_view();
    session.prompt();

    let mut stdin_closed = false;
    while let Ok(input) = rx.recv() {
        match input {
            Input::Line(line) => {
                if !session.handle_line(&line) {
                    break;
                }
                session.prompt();
            }
            Input::Engine(msg) => session.handle_engine(msg),
            Input::Closed => stdin_closed = true,
        }
        if stdin_closed && !session.has_pending_work() {
            break;
        }
    }
    triage_info!("Shutting down");
    Ok(())
}

fn spawn_stdin_reader(tx: mpsc::Sender<Input>) {
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if tx.send(Input::Line(line)).is_err() {
                        return;
                    }
                }
                Err(err) => {
                    triage_warn!("stdin read failed: {}", err);
                    break;
                }
            }
        }
        let _ = tx.send(Input::Closed);
    });
}

struct Session<W: Write> {
    state: AppState,
    runner: EffectRunner,
    out: W,
}

impl<W: Write> Session<W> {
    fn new(runner: EffectRunner, out: W) -> Self {
        Self {
            state: AppState::new(),
            runner,
            out,
        }
    }

    /// Engine responses arrive while the user sits at the prompt, so a
    /// redraw has to put the prompt back.
    fn handle_engine(&mut self, msg: Msg) {
        if self.dispatch(msg) {
            self.prompt();
        }
    }

    /// Returns `false` when the user asked to quit.
    fn handle_line(&mut self, line: &str) -> bool {
        let command = match parse_command(line) {
            Ok(Some(command)) => command,
            Ok(None) => return true,
            Err(err) => {
                let _ = writeln!(self.out, "{err}");
                return true;
            }
        };
        triage_debug!("Command {:?}", command);
        let msg = match command {
            Command::Quit => return false,
            Command::Help => {
                let _ = writeln!(self.out, "{}", ui::constants::HELP);
                return true;
            }
            Command::Select(kind) => Msg::InputKindSelected(kind),
            Command::Write(text) => Msg::TextEdited(text),
            Command::Open(path) => match files::load_file(&path) {
                Ok(file) => Msg::FileChosen(file),
                Err(err) => {
                    let _ = writeln!(self.out, "cannot read {}: {err}", path.display());
                    return true;
                }
            },
            Command::Clear => Msg::InputCleared,
            Command::Dismiss => Msg::InlineErrorDismissed,
            Command::Submit => Msg::SubmitClicked,
            Command::History => Msg::HistoryRequested,
            Command::Filter(filter) => Msg::FilterChanged(filter),
            Command::Page(page) => Msg::PageSelected(page),
            Command::NextPage => Msg::PageSelected(self.state.history().current_page() + 1),
            Command::PrevPage => {
                Msg::PageSelected(self.state.history().current_page().saturating_sub(1))
            }
            Command::Back => Msg::BackToSelection,
        };
        self.dispatch(msg);
        true
    }

    /// Returns `true` when the screen was redrawn.
    fn dispatch(&mut self, msg: Msg) -> bool {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        self.runner.enqueue(effects);
        let was_dirty = state.consume_dirty();
        self.state = state;
        if was_dirty {
            self.print_view();
        }
        was_dirty
    }

    fn has_pending_work(&self) -> bool {
        matches!(self.state.screen(), Screen::Loading { .. }) || self.state.history().is_loading()
    }

    fn print_view(&mut self) {
        for line in ui::render::render(&self.state.view()) {
            let _ = writeln!(self.out, "{line}");
        }
        let _ = self.out.flush();
    }

    fn prompt(&mut self) {
        let _ = write!(self.out, "{}", ui::constants::PROMPT);
        let _ = self.out.flush();
    }
}
