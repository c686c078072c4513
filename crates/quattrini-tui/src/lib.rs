// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod render;
mod theme;

pub use render::render;
pub use theme::Theme;

use anyhow::{Context, Result};
use crossterm::event::{self, Event as TermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use quattrini_app::{ApiCall, Command, Event, KeyPress, Model};
use quattrini_logs::LogEntry;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::widgets::Paragraph;
use std::io;
use std::sync::mpsc::{self, Sender};
use std::time::{Duration, Instant};
use time::OffsetDateTime;

const POLL_INTERVAL: Duration = Duration::from_millis(120);
const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Seam between the pure state machine and the outside world. The CLI
/// wires this to the HTTP client and the log store.
pub trait AppRuntime {
    /// Execute the call off the UI thread and post its completion back
    /// through `tx` as an `Event::Api`.
    fn dispatch_api(&mut self, token: &str, call: &ApiCall, tx: Sender<Event>);
    fn read_logs(&mut self) -> Vec<LogEntry>;
    fn clear_logs(&mut self);
}

/// Terminal event loop. Owns the model, feeds it key presses, ticks,
/// resizes, and posted completions, and draws each successor state.
pub fn run_app<R: AppRuntime>(mut model: Model, runtime: &mut R) -> Result<Model> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen).context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;

    let theme = Theme::dark();
    let (tx, rx) = mpsc::channel();

    let size = terminal.size().context("query terminal size")?;
    let (sized, _) = apply_event(
        model,
        Event::Resize {
            width: size.width,
            height: size.height,
        },
        runtime,
        &tx,
    );
    model = sized;

    let mut last_tick = Instant::now();
    let mut result = Ok(());
    let mut done = false;

    while !done {
        while let Ok(posted) = rx.try_recv() {
            let (next, quit) = apply_event(model, posted, runtime, &tx);
            model = next;
            done = done || quit;
        }
        if done {
            break;
        }

        if let Err(error) = terminal.draw(|frame| {
            let text = render(&model, &theme);
            frame.render_widget(Paragraph::new(text), frame.area());
        }) {
            result = Err(error).context("draw frame");
            break;
        }

        if last_tick.elapsed() >= TICK_INTERVAL {
            last_tick = Instant::now();
            let (next, quit) = apply_event(
                model,
                Event::Tick(OffsetDateTime::now_utc()),
                runtime,
                &tx,
            );
            model = next;
            if quit {
                break;
            }
        }

        let has_event = event::poll(POLL_INTERVAL).context("poll event")?;
        if has_event {
            match event::read().context("read event")? {
                TermEvent::Key(key) => {
                    if let Some(press) = map_key(key) {
                        let (next, quit) = apply_event(model, Event::Key(press), runtime, &tx);
                        model = next;
                        done = quit;
                    }
                }
                TermEvent::Resize(width, height) => {
                    let (next, quit) =
                        apply_event(model, Event::Resize { width, height }, runtime, &tx);
                    model = next;
                    done = quit;
                }
                _ => {}
            }
        }
    }

    disable_raw_mode().context("disable raw mode")?;
    execute!(io::stdout(), terminal::LeaveAlternateScreen).context("leave alternate screen")?;
    result.map(|()| model)
}

/// Advance the model and execute whatever it asked for. Returns the
/// successor model and whether the loop should stop. In-flight worker
/// threads are abandoned on quit.
fn apply_event<R: AppRuntime>(
    model: Model,
    event: Event,
    runtime: &mut R,
    tx: &Sender<Event>,
) -> (Model, bool) {
    let (mut model, mut command) = model.advance(event);
    while let Some(next) = command.take() {
        match next {
            Command::Quit => return (model, true),
            Command::Api(call) => {
                runtime.dispatch_api(&model.session.token, &call, tx.clone());
            }
            Command::RefreshLogs => {
                let entries = runtime.read_logs();
                let (after, follow_up) = model.advance(Event::LogsRefreshed(entries));
                model = after;
                command = follow_up;
            }
            Command::ClearLogs => {
                runtime.clear_logs();
                let (after, follow_up) = model.advance(Event::LogsRefreshed(runtime.read_logs()));
                model = after;
                command = follow_up;
            }
        }
    }
    (model, false)
}

fn map_key(key: KeyEvent) -> Option<KeyPress> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL)
        && let KeyCode::Char(ch) = key.code
    {
        return Some(KeyPress::Ctrl(ch.to_ascii_lowercase()));
    }
    match key.code {
        KeyCode::Up => Some(KeyPress::Up),
        KeyCode::Down => Some(KeyPress::Down),
        KeyCode::Left => Some(KeyPress::Left),
        KeyCode::Right => Some(KeyPress::Right),
        KeyCode::Enter => Some(KeyPress::Enter),
        KeyCode::Esc => Some(KeyPress::Esc),
        KeyCode::Tab => Some(KeyPress::Tab),
        KeyCode::Backspace => Some(KeyPress::Backspace),
        KeyCode::Char(ch) => Some(KeyPress::Char(ch)),
        _ => None,
    }
}
