//! TUI module using ratatui.
//!
//! Component-based pattern: [`App`] owns the router and the path input, routes
//! key presses to the mounted view, and hands summarizer side effects to the
//! [`Effects`] driver. Rendering lives in [`components`].

pub mod components;

use crate::client::SummarizerClient;
use crate::config::Config;
use crate::driver::Effects;
use crate::router::{Route, Router};
use crate::selection::SelectedFile;
use crate::state::Msg;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{DefaultTerminal, Frame};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Everything the event loop reacts to
#[derive(Debug)]
pub enum AppEvent {
    Terminal(Event),
    Summarizer(Msg),
}

impl From<Msg> for AppEvent {
    fn from(msg: Msg) -> Self {
        AppEvent::Summarizer(msg)
    }
}

pub struct App {
    router: Router,
    input: String,
    effects: Effects<AppEvent>,
    should_quit: bool,
}

impl App {
    pub fn new(
        start: Route,
        config: &Config,
        client: Arc<SummarizerClient>,
        tx: UnboundedSender<AppEvent>,
    ) -> Self {
        Self {
            router: Router::new(start, config.progress.clone()),
            input: String::new(),
            effects: Effects::new(client, config.progress.clone(), tx),
            should_quit: false,
        }
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    async fn run(
        &mut self,
        terminal: &mut DefaultTerminal,
        rx: &mut UnboundedReceiver<AppEvent>,
    ) -> anyhow::Result<()> {
        while !self.should_quit {
            terminal.draw(|frame| self.render(frame))?;

            let Some(event) = rx.recv().await else {
                break;
            };
            self.handle_event(event);
            while let Ok(event) = rx.try_recv() {
                self.handle_event(event);
            }
        }
        Ok(())
    }

    pub fn render(&self, frame: &mut Frame) {
        components::render(frame, &self.router, &self.input);
    }

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Terminal(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                self.handle_key(key)
            }
            AppEvent::Terminal(_) => {}
            AppEvent::Summarizer(msg) => self.dispatch(msg),
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        if ctrl && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        match self.router.current() {
            Route::Landing => match key.code {
                KeyCode::Enter | KeyCode::Char(' ') => self.router.navigate(Route::Summarize),
                KeyCode::Esc | KeyCode::Char('q') => self.should_quit = true,
                _ => {}
            },
            Route::Summarize => match key.code {
                KeyCode::Esc => {
                    self.input.clear();
                    self.router.navigate(Route::Landing);
                }
                KeyCode::Char('s') if ctrl => self.submit(),
                KeyCode::Enter if self.input.trim().is_empty() => self.submit(),
                KeyCode::Enter => self.select_path(),
                KeyCode::Backspace => {
                    self.input.pop();
                }
                KeyCode::Char(c) if !ctrl => self.input.push(c),
                _ => {}
            },
        }
    }

    fn submit(&mut self) {
        let enabled = self.router.summarizer().is_some_and(|s| s.can_submit());
        if enabled {
            self.dispatch(Msg::Submit);
        }
    }

    fn select_path(&mut self) {
        if self.router.summarizer().is_some_and(|s| s.is_loading()) {
            return;
        }
        let path = expand_home(self.input.trim());
        match SelectedFile::open(&path) {
            Ok(file) => {
                if !file.matches_accept_filter() {
                    tracing::info!(file = file.name(), "selected file is outside the picker filter");
                }
                self.input.clear();
                self.dispatch(Msg::FileSelected(file));
            }
            Err(e) => self.dispatch(Msg::SelectionFailed(e.to_string())),
        }
    }

    fn dispatch(&mut self, msg: Msg) {
        let Some(state) = self.router.summarizer_mut() else {
            tracing::debug!(?msg, "summarizer not mounted, dropping message");
            return;
        };
        if let Some(command) = state.update(msg) {
            self.effects.run(command);
        }
    }
}

fn expand_home(raw: &str) -> PathBuf {
    match (raw.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(raw),
    }
}

/// Forward terminal events on a plain thread; `event::read` blocks.
fn spawn_input_reader(tx: UnboundedSender<AppEvent>) {
    std::thread::spawn(move || loop {
        match event::read() {
            Ok(event) => {
                if tx.send(AppEvent::Terminal(event)).is_err() {
                    break;
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "terminal input failed");
                break;
            }
        }
    });
}

/// Launch the TUI at the given route
pub async fn run(config: &Config, start: Route) -> anyhow::Result<()> {
    let client = Arc::new(SummarizerClient::new(&config.backend)?);
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut app = App::new(start, config, client, tx.clone());

    let mut terminal = ratatui::try_init()?;
    spawn_input_reader(tx);
    tracing::info!(route = %start, "tui started");

    let result = app.run(&mut terminal, &mut rx).await;
    ratatui::restore();
    result
}
