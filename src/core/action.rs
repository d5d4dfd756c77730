//! # Actions
//!
//! Everything that can happen in the game becomes an `Action`.
//! Child taps a tile? That's `Action::SelectOption(tile)`.
//! Generator responds? That's `Action::SessionReady(result)`.
//!
//! The `update()` function takes the current state and an action, mutates
//! the state, and returns the effects the adapter must perform (speak, start a
//! timer, fetch content). No I/O happens here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effects
//! ```
//!
//! Stage transitions:
//!
//! ```text
//! Menu ──Start──▶ Loading ──SessionReady(ok | err→fallback)──▶ Playing(0)
//! Playing(i) ──LevelComplete──▶ Playing(i+1) | Coloring
//! Coloring ──Restart──▶ Menu
//! ```
//!
//! Anything else is a no-op.

use std::time::Duration;

use log::{debug, info, warn};

use crate::content::{GenerationError, fallback_session};
use crate::core::coloring::{COLORING_PHRASE, ColoringActivity};
use crate::core::level::{
    LevelEngine, PROGRESS_PHRASE, SOLVED_PHRASE, SUCCESS_DELAY, Selection, WRONG_DELAY,
    WRONG_PHRASE,
};
use crate::core::model::{Language, Session};
use crate::core::state::{App, SessionOrigin, Stage};

#[derive(Debug)]
pub enum Action {
    /// Start button on the menu.
    Start,
    /// Outcome of the content request started by `Effect::RequestSession`.
    SessionReady(Result<Session, GenerationError>),
    /// A tile of the active level, by position in the flattened options.
    SelectOption(usize),
    TimerFired { timer: Timer, epoch: u64 },
    /// Speak the active level's narration again.
    ReplayNarration,
    /// Paint a region of the coloring page.
    PaintRegion(usize),
    /// Speak a vocabulary word from the recap.
    SpeakWord(usize),
    Restart,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timer {
    /// Success delay elapsed; move past the solved level.
    LevelComplete,
    /// Wrong-answer delay elapsed; re-enable input.
    ClearWrong,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Fire-and-forget narration. Interrupts anything still playing.
    Speak { text: String, language: Language },
    /// Send `Action::TimerFired { timer, epoch }` after `after`.
    StartTimer {
        timer: Timer,
        epoch: u64,
        after: Duration,
    },
    /// Drop every pending timer; they belong to a discarded level or session.
    CancelTimers,
    /// Ask the live provider for a session and report back with `SessionReady`.
    RequestSession,
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Vec<Effect> {
    match action {
        Action::Start => start(app),
        Action::SessionReady(result) => session_ready(app, result),
        Action::SelectOption(tile) => select_option(app, tile),
        Action::TimerFired { timer, epoch } => timer_fired(app, timer, epoch),
        Action::ReplayNarration => replay_narration(app),
        Action::PaintRegion(region) => paint_region(app, region),
        Action::SpeakWord(index) => speak_word(app, index),
        Action::Restart => restart(app),
        Action::Quit => {
            info!("Quit requested in stage {:?}", app.stage);
            vec![Effect::Quit]
        }
    }
}

fn speak(app: &mut App, text: &str, language: Language) -> Effect {
    app.caption = Some(text.to_string());
    Effect::Speak {
        text: text.to_string(),
        language,
    }
}

fn start(app: &mut App) -> Vec<Effect> {
    if app.stage != Stage::Menu {
        debug!("Start ignored in stage {:?}", app.stage);
        return vec![];
    }
    let run_id = uuid::Uuid::new_v4().to_string();
    info!("[{}] Menu -> Loading", run_id);
    app.run_id = Some(run_id);
    app.stage = Stage::Loading;

    match &app.provider {
        Some(provider) => {
            info!("Requesting session from {}", provider.name());
            vec![Effect::RequestSession]
        }
        None => {
            info!("No live generator configured, using built-in session");
            install_session(app, fallback_session(), SessionOrigin::Fallback)
        }
    }
}

fn session_ready(app: &mut App, result: Result<Session, GenerationError>) -> Vec<Effect> {
    if app.stage != Stage::Loading {
        warn!("Session arrived outside Loading ({:?}), dropping it", app.stage);
        return vec![];
    }
    let result = result.and_then(|session| {
        session.validate().map_err(GenerationError::Schema)?;
        Ok(session)
    });
    match result {
        Ok(session) => install_session(app, session, SessionOrigin::Live),
        Err(e) => {
            warn!("Session generation failed ({}), using built-in session", e);
            install_session(app, fallback_session(), SessionOrigin::Fallback)
        }
    }
}

fn install_session(app: &mut App, session: Session, origin: SessionOrigin) -> Vec<Effect> {
    let issues = session.log_consistency_warnings();
    info!(
        "[{}] Session installed: origin={:?}, levels={}, template={}, issues={}",
        app.run_id.as_deref().unwrap_or("-"),
        origin,
        session.levels.len(),
        session.coloring.template_id,
        issues
    );
    app.session = Some(session);
    app.origin = Some(origin);
    mount_level(app, 0)
}

/// Activates level `index` with fresh engine state, then narrates it.
fn mount_level(app: &mut App, index: usize) -> Vec<Effect> {
    let Some(level) = app.session.as_ref().and_then(|s| s.levels.get(index)).cloned() else {
        // validate() guarantees at least one level; an empty session goes straight on
        warn!("No level {} in session, skipping to coloring", index);
        return enter_coloring(app);
    };

    app.epoch += 1;
    app.stage = Stage::Playing(index);
    info!(
        "[{}] -> Playing({}) epoch={}",
        app.run_id.as_deref().unwrap_or("-"),
        index,
        app.epoch
    );
    let voice_over = level.voice_over.clone();
    app.level = Some(LevelEngine::new(level));

    vec![
        Effect::CancelTimers,
        speak(app, &voice_over, Language::Turkish),
    ]
}

fn enter_coloring(app: &mut App) -> Vec<Effect> {
    let Some(template_id) = app.session.as_ref().map(|s| s.coloring.template_id) else {
        return vec![];
    };
    app.epoch += 1;
    app.stage = Stage::Coloring;
    app.level = None;
    app.coloring = Some(ColoringActivity::new(template_id));
    info!(
        "[{}] -> Coloring({}) epoch={}",
        app.run_id.as_deref().unwrap_or("-"),
        template_id,
        app.epoch
    );
    vec![
        Effect::CancelTimers,
        speak(app, COLORING_PHRASE, Language::Turkish),
    ]
}

fn select_option(app: &mut App, tile: usize) -> Vec<Effect> {
    let Stage::Playing(index) = app.stage else {
        return vec![];
    };
    let Some(engine) = app.level.as_mut() else {
        return vec![];
    };

    let outcome = engine.select(tile);
    debug!("Level {} tile {} -> {:?}", index, tile, outcome);
    let epoch = app.epoch;
    match outcome {
        Selection::Ignored => vec![],
        Selection::Progress => vec![speak(app, PROGRESS_PHRASE, Language::Turkish)],
        Selection::Solved => vec![
            speak(app, SOLVED_PHRASE, Language::Turkish),
            Effect::StartTimer {
                timer: Timer::LevelComplete,
                epoch,
                after: SUCCESS_DELAY,
            },
        ],
        Selection::Wrong => vec![
            speak(app, WRONG_PHRASE, Language::Turkish),
            Effect::StartTimer {
                timer: Timer::ClearWrong,
                epoch,
                after: WRONG_DELAY,
            },
        ],
    }
}

fn timer_fired(app: &mut App, timer: Timer, epoch: u64) -> Vec<Effect> {
    if epoch != app.epoch {
        debug!(
            "Stale {:?} timer (epoch {} != {}), ignoring",
            timer, epoch, app.epoch
        );
        return vec![];
    }
    let Stage::Playing(index) = app.stage else {
        return vec![];
    };

    match timer {
        Timer::ClearWrong => {
            if let Some(engine) = app.level.as_mut() {
                engine.clear_wrong();
            }
            vec![]
        }
        Timer::LevelComplete => {
            if !app.level.as_ref().is_some_and(LevelEngine::is_solved) {
                return vec![];
            }
            if index + 1 < app.level_count() {
                mount_level(app, index + 1)
            } else {
                enter_coloring(app)
            }
        }
    }
}

fn replay_narration(app: &mut App) -> Vec<Effect> {
    let Some(text) = app.level.as_ref().map(|e| e.level().voice_over.clone()) else {
        return vec![];
    };
    vec![speak(app, &text, Language::Turkish)]
}

fn paint_region(app: &mut App, region: usize) -> Vec<Effect> {
    if app.stage != Stage::Coloring {
        return vec![];
    }
    if let Some(activity) = app.coloring.as_mut() {
        match activity.paint(region, &mut app.rng) {
            Some(color) => debug!("Painted region {} with {:?}", region, color),
            None => debug!("No region {} on this page", region),
        }
    }
    vec![]
}

fn speak_word(app: &mut App, index: usize) -> Vec<Effect> {
    if app.stage != Stage::Coloring {
        return vec![];
    }
    let Some(word) = app
        .session
        .as_ref()
        .and_then(|s| s.vocabulary.get(index))
        .map(|v| v.english.clone())
    else {
        return vec![];
    };
    vec![speak(app, &word, Language::English)]
}

fn restart(app: &mut App) -> Vec<Effect> {
    if app.stage != Stage::Coloring {
        debug!("Restart ignored in stage {:?}", app.stage);
        return vec![];
    }
    info!("[{}] Coloring -> Menu", app.run_id.as_deref().unwrap_or("-"));
    app.epoch += 1;
    app.stage = Stage::Menu;
    app.session = None;
    app.origin = None;
    app.level = None;
    app.coloring = None;
    app.caption = None;
    app.run_id = None;
    vec![Effect::CancelTimers]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::coloring::PALETTE;
    use crate::core::model::TemplateId;
    use crate::test_support::{failing_app, live_app, test_app};

    fn spoken(effects: &[Effect]) -> Vec<&str> {
        effects
            .iter()
            .filter_map(|e| match e {
                Effect::Speak { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    fn timer(effects: &[Effect]) -> Option<(Timer, u64, Duration)> {
        effects.iter().find_map(|e| match e {
            Effect::StartTimer {
                timer,
                epoch,
                after,
            } => Some((*timer, *epoch, *after)),
            _ => None,
        })
    }

    fn fire(app: &mut App, effects: &[Effect]) -> Vec<Effect> {
        let (timer, epoch, _) = timer(effects).expect("timer started");
        update(app, Action::TimerFired { timer, epoch })
    }

    /// Solves the active fallback level by picking every correct tile.
    fn solve_current(app: &mut App) -> Vec<Effect> {
        let engine = app.level.as_ref().unwrap();
        let correct: Vec<usize> = engine
            .tiles()
            .iter()
            .enumerate()
            .filter(|(_, s)| engine.level().correct.contains(*s))
            .map(|(i, _)| i)
            .collect();
        let mut last = vec![];
        for tile in correct {
            last = update(app, Action::SelectOption(tile));
        }
        last
    }

    // ------------------------------------------------------------------
    // Scenario A: no generator → fallback level 1
    // ------------------------------------------------------------------

    #[test]
    fn test_start_without_generator_plays_fallback() {
        let mut app = test_app();
        let effects = update(&mut app, Action::Start);

        assert_eq!(app.stage, Stage::Playing(0));
        assert_eq!(app.origin, Some(SessionOrigin::Fallback));
        assert!(app.run_id.is_some());
        assert_eq!(spoken(&effects), vec!["Aslan acıkmış. Aslan ne yer?"]);
        assert_eq!(effects[0], Effect::CancelTimers);
        let engine = app.level.as_ref().unwrap();
        assert!(engine.found().is_empty());
        assert_eq!(engine.wrong(), None);
    }

    #[test]
    fn test_start_with_generator_waits_in_loading() {
        let mut app = live_app();
        let effects = update(&mut app, Action::Start);
        assert_eq!(app.stage, Stage::Loading);
        assert_eq!(effects, vec![Effect::RequestSession]);
        assert!(app.session.is_none());
    }

    #[test]
    fn test_generated_session_is_played() {
        let mut app = live_app();
        update(&mut app, Action::Start);
        let mut session = fallback_session();
        session.levels[0].voice_over = "Maymun ne yer?".to_string();
        session.coloring.template_id = TemplateId::Cat;

        let effects = update(&mut app, Action::SessionReady(Ok(session)));
        assert_eq!(app.stage, Stage::Playing(0));
        assert_eq!(app.origin, Some(SessionOrigin::Live));
        assert_eq!(spoken(&effects), vec!["Maymun ne yer?"]);
    }

    #[test]
    fn test_generation_failure_falls_back_silently() {
        let mut app = failing_app();
        update(&mut app, Action::Start);
        let effects = update(
            &mut app,
            Action::SessionReady(Err(GenerationError::Network("refused".to_string()))),
        );
        assert_eq!(app.stage, Stage::Playing(0));
        assert_eq!(app.origin, Some(SessionOrigin::Fallback));
        assert_eq!(app.session, Some(fallback_session()));
        assert_eq!(spoken(&effects), vec!["Aslan acıkmış. Aslan ne yer?"]);
    }

    #[test]
    fn test_invalid_generated_session_falls_back() {
        let mut app = live_app();
        update(&mut app, Action::Start);
        let mut session = fallback_session();
        session.levels.clear();

        let effects = update(&mut app, Action::SessionReady(Ok(session)));
        assert_eq!(app.stage, Stage::Playing(0));
        assert_eq!(app.origin, Some(SessionOrigin::Fallback));
        assert_eq!(app.session, Some(fallback_session()));
        assert_eq!(spoken(&effects), vec!["Aslan acıkmış. Aslan ne yer?"]);
    }

    #[test]
    fn test_late_session_outside_loading_is_dropped() {
        let mut app = test_app();
        let effects = update(&mut app, Action::SessionReady(Ok(fallback_session())));
        assert!(effects.is_empty());
        assert_eq!(app.stage, Stage::Menu);
        assert!(app.session.is_none());
    }

    // ------------------------------------------------------------------
    // Scenario B: correct answer → success → next level after delay
    // ------------------------------------------------------------------

    #[test]
    fn test_correct_answer_advances_after_success_delay() {
        let mut app = test_app();
        update(&mut app, Action::Start);

        let effects = update(&mut app, Action::SelectOption(0)); // 🥩
        let engine = app.level.as_ref().unwrap();
        assert_eq!(engine.found().len(), 1);
        assert!(engine.found().contains("🥩"));
        assert_eq!(spoken(&effects), vec![SOLVED_PHRASE]);
        let (kind, _, after) = timer(&effects).unwrap();
        assert_eq!(kind, Timer::LevelComplete);
        assert_eq!(after, SUCCESS_DELAY);

        // Still on the level until the timer fires
        assert_eq!(app.stage, Stage::Playing(0));

        let effects = fire(&mut app, &effects);
        assert_eq!(app.stage, Stage::Playing(1));
        assert_eq!(spoken(&effects), vec!["Kurbağa ve maymun ne ister?"]);
        assert!(app.level.as_ref().unwrap().found().is_empty());
    }

    #[test]
    fn test_partial_progress_encourages() {
        let mut app = test_app();
        update(&mut app, Action::Start);
        let effects = solve_current(&mut app);
        fire(&mut app, &effects);

        let effects = update(&mut app, Action::SelectOption(0)); // 🪰
        assert_eq!(spoken(&effects), vec![PROGRESS_PHRASE]);
        assert!(timer(&effects).is_none());
        assert_eq!(app.stage, Stage::Playing(1));
    }

    // ------------------------------------------------------------------
    // Scenario C: wrong answer → wrong state → cleared after delay
    // ------------------------------------------------------------------

    #[test]
    fn test_wrong_answer_blocks_then_clears() {
        let mut app = test_app();
        update(&mut app, Action::Start);

        let effects = update(&mut app, Action::SelectOption(1)); // 🥕
        assert_eq!(spoken(&effects), vec![WRONG_PHRASE]);
        assert_eq!(app.level.as_ref().unwrap().wrong(), Some(1));
        let (kind, _, after) = timer(&effects).unwrap();
        assert_eq!(kind, Timer::ClearWrong);
        assert_eq!(after, WRONG_DELAY);

        // Input is blocked while the tile is marked
        assert!(update(&mut app, Action::SelectOption(0)).is_empty());

        fire(&mut app, &effects);
        let engine = app.level.as_ref().unwrap();
        assert_eq!(engine.wrong(), None);
        assert!(engine.found().is_empty());

        // Accepts input again
        let effects = update(&mut app, Action::SelectOption(0));
        assert_eq!(spoken(&effects), vec![SOLVED_PHRASE]);
    }

    // ------------------------------------------------------------------
    // Scenario D: last level → coloring (lion) → restart → menu
    // ------------------------------------------------------------------

    #[test]
    fn test_full_run_reaches_coloring_and_restarts() {
        let mut app = test_app();
        update(&mut app, Action::Start);

        for expected in 0..3 {
            assert_eq!(app.stage, Stage::Playing(expected));
            let effects = solve_current(&mut app);
            assert_eq!(spoken(&effects), vec![SOLVED_PHRASE]);
            let effects = fire(&mut app, &effects);
            if expected == 2 {
                assert_eq!(spoken(&effects), vec![COLORING_PHRASE]);
            }
        }

        assert_eq!(app.stage, Stage::Coloring);
        assert!(app.level.is_none());
        let activity = app.coloring.as_ref().unwrap();
        assert_eq!(activity.template().id, TemplateId::Lion);

        let effects = update(&mut app, Action::Restart);
        assert_eq!(effects, vec![Effect::CancelTimers]);
        assert_eq!(app.stage, Stage::Menu);
        assert!(app.session.is_none());
        assert!(app.coloring.is_none());
        assert!(app.run_id.is_none());

        // A new run starts from the first level again
        update(&mut app, Action::Start);
        assert_eq!(app.stage, Stage::Playing(0));
    }

    // ------------------------------------------------------------------
    // Timers and guards
    // ------------------------------------------------------------------

    #[test]
    fn test_level_completes_exactly_once() {
        let mut app = test_app();
        update(&mut app, Action::Start);
        let effects = update(&mut app, Action::SelectOption(0));

        fire(&mut app, &effects);
        assert_eq!(app.stage, Stage::Playing(1));
        // The same timer firing again belongs to the old epoch
        assert!(fire(&mut app, &effects).is_empty());
        assert_eq!(app.stage, Stage::Playing(1));
    }

    #[test]
    fn test_stale_clear_wrong_does_not_touch_new_level() {
        let mut app = test_app();
        update(&mut app, Action::Start);
        let old_epoch = app.epoch;
        let effects = solve_current(&mut app);
        fire(&mut app, &effects);

        // Mark a tile wrong on level 2, then deliver a timer from level 1
        update(&mut app, Action::SelectOption(3)); // 🦴
        update(
            &mut app,
            Action::TimerFired {
                timer: Timer::ClearWrong,
                epoch: old_epoch,
            },
        );
        assert_eq!(app.level.as_ref().unwrap().wrong(), Some(3));
    }

    #[test]
    fn test_level_complete_timer_requires_solved_level() {
        let mut app = test_app();
        update(&mut app, Action::Start);
        let epoch = app.epoch;
        let effects = update(
            &mut app,
            Action::TimerFired {
                timer: Timer::LevelComplete,
                epoch,
            },
        );
        assert!(effects.is_empty());
        assert_eq!(app.stage, Stage::Playing(0));
    }

    #[test]
    fn test_actions_outside_their_stage_are_noops() {
        let mut app = test_app();
        assert!(update(&mut app, Action::SelectOption(0)).is_empty());
        assert!(update(&mut app, Action::Restart).is_empty());
        assert!(update(&mut app, Action::PaintRegion(0)).is_empty());
        assert!(update(&mut app, Action::ReplayNarration).is_empty());
        assert_eq!(app.stage, Stage::Menu);

        update(&mut app, Action::Start);
        assert!(update(&mut app, Action::Start).is_empty());
        assert!(update(&mut app, Action::Restart).is_empty());
        assert!(update(&mut app, Action::SpeakWord(0)).is_empty());
        assert_eq!(app.stage, Stage::Playing(0));
    }

    #[test]
    fn test_replay_narration_repeats_voice_over() {
        let mut app = test_app();
        update(&mut app, Action::Start);
        let effects = update(&mut app, Action::ReplayNarration);
        assert_eq!(spoken(&effects), vec!["Aslan acıkmış. Aslan ne yer?"]);
        assert_eq!(app.caption.as_deref(), Some("Aslan acıkmış. Aslan ne yer?"));
    }

    #[test]
    fn test_unsolvable_level_stays_playable() {
        let mut app = live_app();
        update(&mut app, Action::Start);
        let mut session = fallback_session();
        session.levels[0].correct = vec!["🦄".to_string()];
        update(&mut app, Action::SessionReady(Ok(session)));

        for tile in 0..2 {
            let effects = update(&mut app, Action::SelectOption(tile));
            assert_eq!(spoken(&effects), vec![WRONG_PHRASE]);
            fire(&mut app, &effects);
        }
        assert_eq!(app.stage, Stage::Playing(0));
    }

    #[test]
    fn test_painting_and_vocabulary_in_coloring() {
        let mut app = test_app();
        update(&mut app, Action::Start);
        for _ in 0..3 {
            let effects = solve_current(&mut app);
            fire(&mut app, &effects);
        }

        update(&mut app, Action::PaintRegion(1));
        let fills = app.coloring.as_ref().unwrap().fills();
        assert!(PALETTE.contains(&fills[1].unwrap()));

        let effects = update(&mut app, Action::SpeakWord(0));
        assert_eq!(
            effects,
            vec![Effect::Speak {
                text: "Lion".to_string(),
                language: Language::English,
            }]
        );
        assert!(update(&mut app, Action::SpeakWord(99)).is_empty());
    }

    #[test]
    fn test_quit_from_any_stage() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::Quit), vec![Effect::Quit]);
        update(&mut app, Action::Start);
        assert_eq!(update(&mut app, Action::Quit), vec![Effect::Quit]);
    }
}
