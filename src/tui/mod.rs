//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! translates keyboard and mouse events into core::Action values, and
//! carries out the effects the core asks for (speech, timers, content).
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! - **Animating** (loading spinner): draws every ~80ms.
//! - **Idle**: sleeps up to 250ms, only redraws on input, resize, or a
//!   background action (timer, generated session).
//!
//! ## Timers
//!
//! `Effect::StartTimer` spawns a tokio sleep that sends `Action::TimerFired`
//! back through the action channel. `Effect::CancelTimers` aborts every
//! pending sleep; anything that slips through carries a stale epoch and is
//! ignored by the core.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::Duration;

use crossterm::cursor::Hide;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::ContentSource;
use crate::content::{ContentProvider, GeminiProvider, GenerationError};
use crate::core::action::{Action, Effect, Timer, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::{App, Stage};
use crate::narration::{Narrator, build_narrator};
use crate::tui::components::coloring_view::canvas_point;
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};
use crate::tui::ui::{HitMap, hit};

/// TUI-specific presentation state (not part of core game logic)
pub struct TuiState {
    /// Keyboard cursor over level tiles
    pub cursor: usize,
    /// Keyboard cursor over coloring regions
    pub region_cursor: usize,
    pub spinner_frame: usize,
    pub(crate) hits: HitMap,
    stage: Stage,
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            cursor: 0,
            region_cursor: 0,
            spinner_frame: 0,
            hits: HitMap::default(),
            stage: Stage::Menu,
        }
    }

    /// Cursors start over whenever the stage changes (new level, new page).
    pub fn sync(&mut self, app: &App) {
        if app.stage != self.stage {
            self.cursor = 0;
            self.region_cursor = 0;
            self.stage = app.stage;
        }
    }
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(stdout(), EnableMouseCapture, Hide)?;
        info!("Terminal modes enabled (mouse capture, hidden cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture);
    }
}

/// Build the live content provider, if the configuration allows one.
/// `None` means every run plays the built-in session.
pub fn build_provider(config: &ResolvedConfig) -> Option<Arc<dyn ContentProvider>> {
    if config.content_source == ContentSource::Builtin {
        info!("Content source: built-in levels");
        return None;
    }
    let Some(api_key) = config.gemini_api_key.clone() else {
        if config.content_source == ContentSource::Gemini {
            warn!("Gemini content requested but no API key is configured; using built-in levels");
        } else {
            info!("No API key configured; using built-in levels");
        }
        return None;
    };
    info!(
        "Content source: gemini (model: {}, base: {})",
        config.gemini_model, config.gemini_base_url
    );
    Some(Arc::new(
        GeminiProvider::new(
            api_key,
            Some(config.gemini_base_url.clone()),
            config.gemini_model.clone(),
        )
        .with_temperature(config.temperature)
        .with_timeout(Duration::from_secs(config.timeout_secs)),
    ))
}

// ============================================================================
// Event routing
// ============================================================================

/// Turns a terminal event into a core action for the current stage.
/// Cursor movement is handled here and never reaches the core.
fn route_event(app: &App, tui: &mut TuiState, event: &TuiEvent) -> Option<Action> {
    match event {
        TuiEvent::Quit | TuiEvent::ForceQuit => return Some(Action::Quit),
        TuiEvent::Resize => return None,
        _ => {}
    }

    match app.stage {
        Stage::Menu => match *event {
            TuiEvent::Confirm => Some(Action::Start),
            TuiEvent::Click(col, row) if hit(tui.hits.start, col, row) => Some(Action::Start),
            _ => None,
        },
        Stage::Loading => None,
        Stage::Playing(_) => {
            let count = app.level.as_ref().map_or(0, |e| e.tiles().len());
            route_level_event(tui, event, count)
        }
        Stage::Coloring => {
            let regions = app
                .coloring
                .as_ref()
                .map_or(0, |c| c.template().regions.len());
            route_coloring_event(app, tui, event, regions)
        }
    }
}

fn route_level_event(tui: &mut TuiState, event: &TuiEvent, count: usize) -> Option<Action> {
    if count == 0 {
        return None;
    }
    let columns = tui.hits.tile_columns.max(1);
    match *event {
        TuiEvent::Left => tui.cursor = tui.cursor.saturating_sub(1),
        TuiEvent::Right => tui.cursor = (tui.cursor + 1).min(count - 1),
        TuiEvent::Up if tui.cursor >= columns => tui.cursor -= columns,
        TuiEvent::Down if tui.cursor + columns < count => tui.cursor += columns,
        TuiEvent::Tab => tui.cursor = (tui.cursor + 1) % count,
        TuiEvent::BackTab => tui.cursor = (tui.cursor + count - 1) % count,
        TuiEvent::Confirm => return Some(Action::SelectOption(tui.cursor.min(count - 1))),
        TuiEvent::Digit(d) if (d as usize) <= count => {
            let tile = d as usize - 1;
            tui.cursor = tile;
            return Some(Action::SelectOption(tile));
        }
        TuiEvent::Replay => return Some(Action::ReplayNarration),
        TuiEvent::Click(col, row) => {
            let tile = tui.hits.tile_at(col, row)?;
            tui.cursor = tile;
            return Some(Action::SelectOption(tile));
        }
        _ => {}
    }
    None
}

fn route_coloring_event(
    app: &App,
    tui: &mut TuiState,
    event: &TuiEvent,
    regions: usize,
) -> Option<Action> {
    match *event {
        TuiEvent::NewGame => Some(Action::Restart),
        TuiEvent::Digit(d) => Some(Action::SpeakWord(d as usize - 1)),
        TuiEvent::Tab | TuiEvent::Right | TuiEvent::Down if regions > 0 => {
            tui.region_cursor = (tui.region_cursor + 1) % regions;
            None
        }
        TuiEvent::BackTab | TuiEvent::Left | TuiEvent::Up if regions > 0 => {
            tui.region_cursor = (tui.region_cursor + regions - 1) % regions;
            None
        }
        TuiEvent::Confirm if regions > 0 => Some(Action::PaintRegion(tui.region_cursor)),
        TuiEvent::Click(col, row) => {
            if hit(tui.hits.restart, col, row) {
                return Some(Action::Restart);
            }
            if let Some(word) = tui.hits.word_at(col, row) {
                return Some(Action::SpeakWord(word));
            }
            let point = canvas_point(tui.hits.canvas?, col, row)?;
            let region = app.coloring.as_ref()?.template().region_at(point)?;
            tui.region_cursor = region;
            Some(Action::PaintRegion(region))
        }
        _ => None,
    }
}

// ============================================================================
// Effects
// ============================================================================

/// Carries out core effects: speech, timers, and content requests.
pub struct EffectRunner {
    tx: mpsc::Sender<Action>,
    narrator: Arc<dyn Narrator>,
    request_timeout: Duration,
    timers: Vec<tokio::task::AbortHandle>,
    request: Option<tokio::task::AbortHandle>,
}

impl EffectRunner {
    pub fn new(
        tx: mpsc::Sender<Action>,
        narrator: Arc<dyn Narrator>,
        request_timeout: Duration,
    ) -> Self {
        Self {
            tx,
            narrator,
            request_timeout,
            timers: Vec::new(),
            request: None,
        }
    }

    /// Applies effects in order. Returns true when the app should quit.
    pub fn apply(&mut self, app: &App, effects: Vec<Effect>) -> bool {
        let mut quit = false;
        for effect in effects {
            match effect {
                Effect::Speak { text, language } => self.narrator.speak(&text, language),
                Effect::StartTimer {
                    timer,
                    epoch,
                    after,
                } => self.start_timer(timer, epoch, after),
                Effect::CancelTimers => self.cancel_timers(),
                Effect::RequestSession => self.request_session(app),
                Effect::Quit => quit = true,
            }
        }
        quit
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.iter().filter(|h| !h.is_finished()).count()
    }

    fn start_timer(&mut self, timer: Timer, epoch: u64, after: Duration) {
        debug!("Starting {:?} timer (epoch {}, {:?})", timer, epoch, after);
        self.timers.retain(|h| !h.is_finished());
        let tx = self.tx.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(after).await;
            if tx.send(Action::TimerFired { timer, epoch }).is_err() {
                warn!("Failed to deliver {:?} timer: receiver dropped", timer);
            }
        });
        self.timers.push(handle.abort_handle());
    }

    fn cancel_timers(&mut self) {
        let pending = self.pending_timers();
        for handle in self.timers.drain(..) {
            handle.abort();
        }
        if pending > 0 {
            debug!("Cancelled {} pending timers", pending);
        }
    }

    fn request_session(&mut self, app: &App) {
        let tx = self.tx.clone();
        let Some(provider) = app.provider.clone() else {
            warn!("Session requested without a live provider");
            if tx
                .send(Action::SessionReady(Err(GenerationError::MissingCredentials)))
                .is_err()
            {
                warn!("Failed to send SessionReady: receiver dropped");
            }
            return;
        };
        info!("Spawning session request ({})", provider.name());
        let timeout = self.request_timeout;
        let handle = tokio::spawn(async move {
            let started = std::time::Instant::now();
            let result = match tokio::time::timeout(timeout, provider.generate_session()).await {
                Ok(result) => result,
                Err(_) => Err(GenerationError::Network(format!(
                    "timed out after {}s",
                    timeout.as_secs()
                ))),
            };
            match &result {
                Ok(session) => info!(
                    "Session generated in {}ms ({} levels)",
                    started.elapsed().as_millis(),
                    session.levels.len()
                ),
                Err(e) => warn!(
                    "Session request failed after {}ms: {}",
                    started.elapsed().as_millis(),
                    e
                ),
            }
            if tx.send(Action::SessionReady(result)).is_err() {
                warn!("Failed to send SessionReady: receiver dropped");
            }
        });
        self.request = Some(handle.abort_handle());
    }

    pub fn shutdown(&mut self) {
        self.cancel_timers();
        if let Some(request) = self.request.take() {
            request.abort();
        }
    }
}

// ============================================================================
// Run loop
// ============================================================================

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let provider = build_provider(&config);
    let rng = match config.coloring_seed {
        Some(seed) => {
            info!("Coloring seed: {}", seed);
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };
    let mut app = App::new(provider, rng);
    let mut tui = TuiState::new();

    let (tx, rx) = mpsc::channel();
    // Request timeout includes a little slack over the HTTP client's own timeout
    let mut runner = EffectRunner::new(
        tx,
        build_narrator(&config.narration),
        Duration::from_secs(config.timeout_secs + 5),
    );

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    let start_time = std::time::Instant::now();
    let mut needs_redraw = true;

    'main: loop {
        tui.sync(&app);
        let animating = app.stage == Stage::Loading;

        if animating || needs_redraw {
            tui.spinner_frame = (start_time.elapsed().as_secs_f32() * 4.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui))?;
            needs_redraw = false;
        }

        let timeout = if animating {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(250)
        };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain ALL pending events before next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            let Some(action) = route_event(&app, &mut tui, &event) else {
                continue;
            };
            debug!("Input action: {:?}", action);
            let effects = update(&mut app, action);
            if runner.apply(&app, effects) {
                break 'main;
            }
            tui.sync(&app);
        }

        // Background actions (timers, generated sessions)
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            let effects = update(&mut app, action);
            if runner.apply(&app, effects) {
                break 'main;
            }
        }
    }

    info!("Shutting down");
    runner.shutdown();
    ratatui::restore();
    Ok(())
}
