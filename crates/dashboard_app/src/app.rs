use std::io::BufRead;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use anyhow::Context;
use client_logging::{client_info, get_poll_cycle, set_poll_cycle};
use dashboard_core::{update, AppState, Msg};
use dashboard_engine::ApiSettings;

use crate::commands::{self, Command};
use crate::config::Config;
use crate::effects::EffectRunner;
use crate::notify::ConsoleNotifier;
use crate::render;

/// Events feeding the main loop, from the poll ticker, the command reader,
/// and the engine's completion pump.
pub enum AppEvent {
    Dispatch(Msg),
    Quit,
}

pub fn run(config: Config) -> anyhow::Result<()> {
    let settings = ApiSettings {
        base_url: config.api_base.clone(),
        ..ApiSettings::default()
    };
    let (event_tx, event_rx) = mpsc::channel();
    let runner = EffectRunner::new(settings, Box::new(ConsoleNotifier), event_tx.clone())
        .context("starting engine")?;

    spawn_poll_ticker(event_tx.clone(), config.poll_interval());
    spawn_command_reader(event_tx);

    let mut state = AppState::with_page_size(config.page_size);

    while let Ok(event) = event_rx.recv() {
        let msg = match event {
            AppEvent::Quit => break,
            AppEvent::Dispatch(msg) => msg,
        };
        if matches!(msg, Msg::PollTick) {
            set_poll_cycle(get_poll_cycle() + 1);
            client_info!("poll cycle {}", get_poll_cycle());
        }

        let (next, effects) = update(std::mem::take(&mut state), msg);
        state = next;
        runner.run(effects);

        // Render coalescing: only repaint when the state actually changed.
        if state.consume_dirty() {
            render::print_dashboard(&state.view());
        }
    }
    Ok(())
}

/// Fixed-interval refresh trigger. The first tick fires immediately, which
/// is the once-on-startup fetch.
fn spawn_poll_ticker(event_tx: mpsc::Sender<AppEvent>, interval: Duration) {
    thread::spawn(move || {
        while event_tx.send(AppEvent::Dispatch(Msg::PollTick)).is_ok() {
            thread::sleep(interval);
        }
    });
}

/// Reads terminal commands and feeds them to the loop as messages.
fn spawn_command_reader(event_tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            match commands::parse(&line) {
                Command::Quit => {
                    let _ = event_tx.send(AppEvent::Quit);
                    return;
                }
                Command::Help => println!("{}", commands::HELP),
                Command::Unknown(input) => eprintln!("unknown command: {input} (try 'help')"),
                Command::Dispatch(msgs) => {
                    for msg in msgs {
                        if event_tx.send(AppEvent::Dispatch(msg)).is_err() {
                            return;
                        }
                    }
                }
            }
        }
        // Stdin closed; shut the dashboard down.
        let _ = event_tx.send(AppEvent::Quit);
    });
}
