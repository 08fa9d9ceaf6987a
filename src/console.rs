//! Interactive terminal front end.
//!
//! A raw-mode key loop drives the calculator state machine and sends
//! finished calculations to the recorder actor; the display reflects the
//! evaluated result immediately, independent of persistence. The history
//! view is re-fetched after every successful create or clear rather than
//! kept live.

use std::io::{Stdout, Write, stdout};

use crossterm::cursor::MoveToColumn;
use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{Clear, ClearType, disable_raw_mode, enable_raw_mode};
use futures::StreamExt;
use tokio::sync::broadcast;
use tracing::debug;

use crate::api::history_client::HistoryClient;
use crate::calculator::keymap::event_for_char;
use crate::calculator::state::{CalculatorState, InputEvent};
use crate::config::{Config, Theme, ThemeStore};
use crate::db::models::Calculation;
use crate::error::ReckonError;
use crate::service::recorder::{self, RecorderEvent, RecorderHandle};

const BANNER: &str = "reckon console: digits . % + - * / compose, Enter/= evaluates, \
Backspace deletes, Esc clears, h history, x clear history, t theme, q quits";

pub async fn run(cfg: &Config) -> Result<(), ReckonError> {
    let client = HistoryClient::new(&cfg.api_base_url)?;
    let recorder = recorder::spawn(client.clone()).await;
    let notifications = recorder.subscribe();
    let themes = ThemeStore::load(&cfg.theme_path);

    let mut console = Console {
        client,
        recorder,
        themes,
        state: CalculatorState::new(),
        history: Vec::new(),
        notice: String::new(),
    };

    enable_raw_mode()?;
    let outcome = console.event_loop(notifications).await;
    disable_raw_mode()?;
    println!();
    outcome
}

struct Console {
    client: HistoryClient,
    recorder: RecorderHandle,
    themes: ThemeStore,
    state: CalculatorState,
    history: Vec<Calculation>,
    notice: String,
}

impl Console {
    async fn event_loop(
        &mut self,
        mut notifications: broadcast::Receiver<RecorderEvent>,
    ) -> Result<(), ReckonError> {
        let mut out = stdout();
        let mut events = EventStream::new();

        execute!(out, Print(BANNER), Print("\r\n"))?;
        self.render(&mut out)?;

        loop {
            tokio::select! {
                maybe_event = events.next() => {
                    let Some(event) = maybe_event else { break };
                    if let Event::Key(key) = event? {
                        if key.kind == KeyEventKind::Release {
                            continue;
                        }
                        if !self.handle_key(&mut out, key).await? {
                            break;
                        }
                    }
                }
                settled = notifications.recv() => {
                    match settled {
                        Ok(RecorderEvent::Recorded(created)) => {
                            self.notice = format!("saved #{}", created.id);
                            self.refresh_history().await;
                        }
                        Ok(RecorderEvent::Failed(notice)) => self.notice = notice,
                        Err(_) => {}
                    }
                }
            }
            self.render(&mut out)?;
        }
        Ok(())
    }

    /// Returns false when the loop should exit.
    async fn handle_key(&mut self, out: &mut Stdout, key: KeyEvent) -> Result<bool, ReckonError> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Ok(false);
        }

        match key.code {
            KeyCode::Char('q') => return Ok(false),
            KeyCode::Char('h') => {
                self.refresh_history().await;
                self.print_history(out)?;
            }
            KeyCode::Char('x') => match self.client.clear().await {
                Ok(()) => {
                    self.notice = "history cleared".to_string();
                    self.refresh_history().await;
                }
                Err(e) => {
                    debug!(error = %e, "clear request failed");
                    self.notice = "could not clear history".to_string();
                }
            },
            KeyCode::Char('t') => {
                let theme = self.themes.toggle()?;
                self.notice = format!("{theme:?} theme");
            }
            KeyCode::Enter => self.dispatch(InputEvent::Calculate),
            KeyCode::Backspace => self.dispatch(InputEvent::Delete),
            KeyCode::Esc => self.dispatch(InputEvent::Clear),
            KeyCode::Char(c) => {
                if let Some(event) = event_for_char(c) {
                    self.dispatch(event);
                }
            }
            _ => {}
        }
        Ok(true)
    }

    fn dispatch(&mut self, event: InputEvent) {
        self.notice.clear();
        match self.state.dispatch(event) {
            Ok(Some(record)) => self.recorder.record(record),
            Ok(None) => {}
            Err(_) => {
                // Buffer is preserved; the user fixes it in place.
                self.notice = "Invalid expression: check your calculation syntax".to_string();
            }
        }
    }

    /// Fire-and-refresh: re-query the list after create/clear settle.
    async fn refresh_history(&mut self) {
        match self.client.list().await {
            Ok(latest) => self.history = latest,
            Err(e) => debug!(error = %e, "history refresh failed"),
        }
    }

    fn print_history(&self, out: &mut Stdout) -> Result<(), ReckonError> {
        execute!(out, MoveToColumn(0), Clear(ClearType::CurrentLine))?;
        if self.history.is_empty() {
            execute!(out, Print("history is empty\r\n"))?;
            return Ok(());
        }
        for entry in &self.history {
            execute!(
                out,
                Print(format!("{} = {}\r\n", entry.expression, entry.result))
            )?;
        }
        Ok(())
    }

    fn render(&self, out: &mut Stdout) -> Result<(), ReckonError> {
        let shown = if self.state.display().is_empty() {
            "0"
        } else {
            self.state.display()
        };
        execute!(
            out,
            MoveToColumn(0),
            Clear(ClearType::CurrentLine),
            SetForegroundColor(accent_color(self.themes.current())),
            Print(shown),
            ResetColor
        )?;
        if !self.notice.is_empty() {
            execute!(out, Print("   "), Print(&self.notice))?;
        }
        out.flush()?;
        Ok(())
    }
}

fn accent_color(theme: Theme) -> Color {
    match theme {
        Theme::Light => Color::Blue,
        Theme::Dark => Color::Cyan,
    }
}
