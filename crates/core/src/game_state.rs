//! Game state module - the phase machine driving the field
//!
//! [`GameState`] owns the [`Field`], the piece queue and every timer. A driver
//! calls [`GameState::tick`] with the elapsed milliseconds; each tick advances
//! at most one phase step:
//!
//! ```text
//! Idle --start--> Playing --lock, rows full--> AnimateCollapse --> Playing
//!                    |
//!                    +--lock above the top--> WaitDelay --> AnimateEnd --> Idle
//! ```
//!
//! Player input arrives as intents (`request_*`). Moves and rotations are
//! queued and applied at the start of the next `Playing` tick.

use std::fmt;

use arrayvec::ArrayVec;

use crate::collapse::CollapsePlan;
use crate::config::GameConfig;
use crate::error::{ConfigError, OutOfBounds};
use crate::field::Field;
use crate::observer::{CellObserver, GameObserver};
use crate::rng::PieceQueue;
use crate::scoring::{collapse_score, fall_threshold, tighten_drop_interval};
use crate::snapshot::GameSnapshot;
use crate::types::{Direction, GameAction, PieceKind, RotateDirection};

/// Phase entered when a [`GamePhase::WaitDelay`] runs out. Only game over
/// waits before its animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DelayTarget {
    AnimateEnd,
}

impl From<DelayTarget> for GamePhase {
    fn from(target: DelayTarget) -> Self {
        match target {
            DelayTarget::AnimateEnd => GamePhase::AnimateEnd,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GamePhase {
    Idle,
    Playing,
    WaitDelay(DelayTarget),
    AnimateCollapse,
    AnimateEnd,
}

impl GamePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Idle => "idle",
            GamePhase::Playing => "playing",
            GamePhase::WaitDelay(_) => "waitDelay",
            GamePhase::AnimateCollapse => "animateCollapse",
            GamePhase::AnimateEnd => "animateEnd",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Intent {
    Translate(Direction),
    Rotate(RotateDirection),
}

/// Queued intents per tick; extra requests in the same tick are dropped.
const MAX_INTENTS: usize = 16;

pub struct GameState {
    config: GameConfig,
    field: Field,
    queue: PieceQueue,
    phase: GamePhase,
    score: u32,
    last_score: u32,
    drop_interval_ms: f64,
    fall_clock_ms: f64,
    anim_clock_ms: u32,
    anim_step: u8,
    collapse: Option<CollapsePlan>,
    intents: ArrayVec<Intent, MAX_INTENTS>,
    soft_drop: bool,
    paused: bool,
    pieces_locked: u32,
    rows_cleared: u32,
    observer: Option<Box<dyn GameObserver>>,
}

impl GameState {
    /// Create a game with the default configuration.
    pub fn new(seed: u32) -> Self {
        Self::build(GameConfig::default(), seed)
    }

    pub fn with_config(config: GameConfig, seed: u32) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config, seed))
    }

    fn build(config: GameConfig, seed: u32) -> Self {
        Self {
            field: Field::new(config.width, config.height),
            queue: PieceQueue::new(seed),
            phase: GamePhase::Idle,
            score: 0,
            last_score: 0,
            drop_interval_ms: config.initial_drop_ms,
            fall_clock_ms: 0.0,
            anim_clock_ms: 0,
            anim_step: 0,
            collapse: None,
            intents: ArrayVec::new(),
            soft_drop: false,
            paused: false,
            pieces_locked: 0,
            rows_cleared: 0,
            observer: None,
            config,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    /// Direct field access, for drivers that set up positions.
    pub fn field_mut(&mut self) -> &mut Field {
        &mut self.field
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Score of the most recently finished game.
    pub fn last_score(&self) -> u32 {
        self.last_score
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn soft_drop(&self) -> bool {
        self.soft_drop
    }

    pub fn drop_interval_ms(&self) -> f64 {
        self.drop_interval_ms
    }

    pub fn pieces_locked(&self) -> u32 {
        self.pieces_locked
    }

    pub fn rows_cleared(&self) -> u32 {
        self.rows_cleared
    }

    /// The collapse being animated, if any.
    pub fn collapse(&self) -> Option<&CollapsePlan> {
        self.collapse.as_ref()
    }

    pub fn animation_step(&self) -> u8 {
        self.anim_step
    }

    /// Piece that spawns next.
    pub fn peek_next(&self) -> PieceKind {
        self.queue.peek()
    }

    pub fn set_observer(&mut self, observer: Box<dyn GameObserver>) {
        self.observer = Some(observer);
    }

    pub fn set_cell_observer(&mut self, observer: Box<dyn CellObserver>) {
        self.field.set_observer(observer);
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            phase: self.phase,
            paused: self.paused,
            score: self.score,
            last_score: self.last_score,
            next: self.queue.peek(),
            active: self.field.active().map(Into::into),
            drop_interval_ms: self.drop_interval_ms,
            clearing_rows: self.collapse.as_ref().map_or(0, CollapsePlan::row_count),
            animation_step: self.anim_step,
            pieces_locked: self.pieces_locked,
            rows_cleared: self.rows_cleared,
        }
    }

    // ---- intents ----

    /// Start a game. Only honored while idle.
    pub fn request_start(&mut self) -> bool {
        if self.phase != GamePhase::Idle {
            return false;
        }
        self.score = 0;
        self.pieces_locked = 0;
        self.rows_cleared = 0;
        self.paused = false;
        self.soft_drop = false;
        self.intents.clear();
        self.drop_interval_ms = self.config.initial_drop_ms;
        self.notify(|o| o.score_changed(0));
        self.set_phase(GamePhase::Playing);
        true
    }

    pub fn request_translate(&mut self, direction: Direction) -> bool {
        self.queue_intent(Intent::Translate(direction))
    }

    pub fn request_rotate(&mut self, direction: RotateDirection) -> bool {
        self.queue_intent(Intent::Rotate(direction))
    }

    pub fn request_soft_drop(&mut self, held: bool) {
        self.soft_drop = held;
    }

    /// Pause or resume. Only honored while playing.
    pub fn request_toggle_pause(&mut self) -> bool {
        if self.phase != GamePhase::Playing {
            return false;
        }
        self.paused = !self.paused;
        self.intents.clear();
        true
    }

    /// Route an input action to the matching request.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.request_translate(Direction::Left),
            GameAction::MoveRight => self.request_translate(Direction::Right),
            GameAction::MoveDown => self.request_translate(Direction::Down),
            GameAction::RotateLeft => self.request_rotate(RotateDirection::Left),
            GameAction::RotateRight => self.request_rotate(RotateDirection::Right),
            GameAction::SoftDropOn => {
                self.request_soft_drop(true);
                true
            }
            GameAction::SoftDropOff => {
                self.request_soft_drop(false);
                true
            }
            GameAction::Pause => self.request_toggle_pause(),
            GameAction::Start => self.request_start(),
        }
    }

    fn queue_intent(&mut self, intent: Intent) -> bool {
        if self.phase != GamePhase::Playing || self.paused {
            return false;
        }
        self.intents.try_push(intent).is_ok()
    }

    // ---- phases ----

    /// Switch phase and run its entry actions. Re-entering the current phase
    /// does nothing.
    pub fn set_phase(&mut self, phase: GamePhase) {
        if phase == self.phase {
            return;
        }
        self.phase = phase;
        self.notify(|o| o.phase_changed(phase));

        match phase {
            GamePhase::AnimateCollapse | GamePhase::AnimateEnd => {
                self.anim_clock_ms = 0;
                self.anim_step = 0;
            }
            GamePhase::WaitDelay(_) => self.anim_clock_ms = 0,
            GamePhase::Playing => self.spawn_next(),
            GamePhase::Idle => {}
        }
    }

    /// Advance the game by `elapsed_ms`. Returns whether anything changed.
    pub fn tick(&mut self, elapsed_ms: u32) -> Result<bool, OutOfBounds> {
        match self.phase {
            GamePhase::Idle => Ok(false),
            GamePhase::Playing => self.tick_playing(elapsed_ms),
            GamePhase::WaitDelay(target) => {
                self.anim_clock_ms = self.anim_clock_ms.saturating_add(elapsed_ms);
                if self.anim_clock_ms >= self.config.wait_delay_ms {
                    self.set_phase(target.into());
                    return Ok(true);
                }
                Ok(false)
            }
            GamePhase::AnimateCollapse => self.tick_collapse(elapsed_ms),
            GamePhase::AnimateEnd => Ok(self.tick_end(elapsed_ms)),
        }
    }

    fn tick_playing(&mut self, elapsed_ms: u32) -> Result<bool, OutOfBounds> {
        if self.paused {
            self.intents.clear();
            return Ok(false);
        }

        let mut changed = self.apply_intents();

        self.fall_clock_ms += f64::from(elapsed_ms);
        let threshold = fall_threshold(self.drop_interval_ms, self.soft_drop, self.config.soft_drop_factor);
        if self.fall_clock_ms >= threshold {
            self.fall_clock_ms = 0.0;
            if self.field.can_translate(Direction::Down) {
                self.field.translate(Direction::Down);
            } else {
                self.lock_active();
            }
            changed = true;
        }
        Ok(changed)
    }

    fn apply_intents(&mut self) -> bool {
        let intents = std::mem::take(&mut self.intents);
        let mut changed = false;
        for intent in intents {
            match intent {
                Intent::Translate(direction) => {
                    if self.field.can_translate(direction) {
                        self.field.translate(direction);
                        changed = true;
                    }
                }
                Intent::Rotate(direction) => {
                    if let Some(kick) = self.field.try_rotate(direction) {
                        self.field.rotate(direction, kick);
                        changed = true;
                    }
                }
            }
        }
        changed
    }

    fn lock_active(&mut self) {
        let placed = self.field.lock();
        self.pieces_locked += 1;
        self.drop_interval_ms = tighten_drop_interval(
            self.drop_interval_ms,
            self.config.speedup_factor,
            self.config.min_drop_ms,
        );

        if !placed {
            self.set_phase(GamePhase::WaitDelay(DelayTarget::AnimateEnd));
            return;
        }

        let plan = CollapsePlan::scan(&self.field);
        if plan.is_empty() {
            self.spawn_next();
        } else {
            self.collapse = Some(plan);
            self.set_phase(GamePhase::AnimateCollapse);
        }
    }

    fn spawn_next(&mut self) {
        let kind = self.queue.draw();
        self.field.spawn(kind);
        self.fall_clock_ms = 0.0;
        let next = self.queue.peek();
        self.notify(|o| o.next_piece_changed(next));
    }

    fn tick_collapse(&mut self, elapsed_ms: u32) -> Result<bool, OutOfBounds> {
        let Some(plan) = self.collapse.take() else {
            self.set_phase(GamePhase::Playing);
            return Ok(true);
        };
        self.anim_clock_ms = self.anim_clock_ms.saturating_add(elapsed_ms);

        // Bigger clears animate slower.
        let rows = plan.row_count();
        let scaled = self.anim_clock_ms / (1 + rows.saturating_sub(1) / 2);
        let shrink = self.config.collapse_shrink_ms;

        let changed = match self.anim_step {
            0 => {
                if scaled >= shrink {
                    self.anim_step = 1;
                    true
                } else {
                    false
                }
            }
            1 => {
                plan.clear_full_rows(&mut self.field)?;
                self.score += collapse_score(rows, &self.config.collapse_scores);
                self.rows_cleared += rows;
                let score = self.score;
                self.notify(|o| o.score_changed(score));
                self.anim_step = 2;
                true
            }
            _ => {
                if scaled.saturating_sub(shrink) >= self.config.collapse_settle_ms {
                    plan.commit(&mut self.field)?;
                    self.set_phase(GamePhase::Playing);
                    return Ok(true);
                }
                false
            }
        };
        self.collapse = Some(plan);
        Ok(changed)
    }

    fn tick_end(&mut self, elapsed_ms: u32) -> bool {
        self.anim_clock_ms = self.anim_clock_ms.saturating_add(elapsed_ms);
        let duration = self.config.end_animation_ms;

        match self.anim_step {
            0 => {
                if self.anim_clock_ms.saturating_mul(2) >= duration {
                    self.anim_step = 1;
                    return true;
                }
                false
            }
            1 => {
                self.field.clear();
                self.anim_step = 2;
                true
            }
            2 => {
                if self.anim_clock_ms >= duration {
                    self.anim_step = 3;
                    return true;
                }
                false
            }
            _ => {
                self.last_score = self.score;
                self.score = 0;
                self.drop_interval_ms = self.config.initial_drop_ms;
                self.soft_drop = false;
                self.notify(|o| o.score_changed(0));
                self.set_phase(GamePhase::Idle);
                true
            }
        }
    }

    fn notify(&mut self, f: impl FnOnce(&mut dyn GameObserver)) {
        if let Some(observer) = self.observer.as_mut() {
            f(observer.as_mut());
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}

impl fmt::Debug for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameState")
            .field("phase", &self.phase)
            .field("score", &self.score)
            .field("paused", &self.paused)
            .field("drop_interval_ms", &self.drop_interval_ms)
            .field("field", &self.field)
            .field("next", &self.queue.peek())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    use crate::observer::ChangeLog;

    fn playing_game() -> GameState {
        let mut game = GameState::new(7);
        assert!(game.request_start());
        game
    }

    #[test]
    fn test_new_game_is_idle() {
        let game = GameState::new(1);
        assert_eq!(game.phase(), GamePhase::Idle);
        assert!(!game.field().has_active());
        assert_eq!(game.score(), 0);
        assert_eq!(game.drop_interval_ms(), 550.0);
    }

    #[test]
    fn test_idle_ignores_moves_and_ticks() {
        let mut game = GameState::new(1);
        assert!(!game.request_translate(Direction::Left));
        assert!(!game.request_toggle_pause());
        assert_eq!(game.tick(10_000), Ok(false));
        assert_eq!(game.phase(), GamePhase::Idle);
    }

    #[test]
    fn test_start_spawns_queued_piece() {
        let mut game = GameState::new(3);
        let queued = game.peek_next();
        assert!(game.request_start());
        assert_eq!(game.phase(), GamePhase::Playing);
        assert_eq!(game.field().active().map(|p| p.kind), Some(queued));
        // A second start is refused.
        assert!(!game.request_start());
    }

    #[test]
    fn test_set_phase_same_phase_is_noop() {
        let mut game = playing_game();
        let before = game.field().active();
        game.set_phase(GamePhase::Playing);
        assert_eq!(game.field().active(), before);
    }

    #[test]
    fn test_gravity_moves_piece_after_interval() {
        let mut game = playing_game();
        let y0 = game.field().active().unwrap().y;

        assert_eq!(game.tick(549), Ok(false));
        assert_eq!(game.field().active().unwrap().y, y0);

        assert_eq!(game.tick(1), Ok(true));
        assert_eq!(game.field().active().unwrap().y, y0 - 1);
    }

    #[test]
    fn test_soft_drop_shortens_interval() {
        let mut game = playing_game();
        let y0 = game.field().active().unwrap().y;
        game.request_soft_drop(true);
        game.tick(83).unwrap();
        assert_eq!(game.field().active().unwrap().y, y0 - 1);
    }

    #[test]
    fn test_intents_apply_on_next_tick() {
        let mut game = playing_game();
        let x0 = game.field().active().unwrap().x;
        assert!(game.request_translate(Direction::Left));
        assert_eq!(game.field().active().unwrap().x, x0);
        assert_eq!(game.tick(0), Ok(true));
        assert_eq!(game.field().active().unwrap().x, x0 - 1);
    }

    #[test]
    fn test_pause_freezes_everything() {
        let mut game = playing_game();
        let before = game.field().active();
        assert!(game.request_toggle_pause());
        assert!(game.paused());
        assert!(!game.request_translate(Direction::Left));
        assert_eq!(game.tick(5000), Ok(false));
        assert_eq!(game.field().active(), before);

        assert!(game.request_toggle_pause());
        assert_eq!(game.tick(549), Ok(false));
        assert_eq!(game.field().active(), before);
    }

    #[test]
    fn test_apply_action_routes() {
        let mut game = GameState::new(1);
        assert!(game.apply_action(GameAction::Start));
        assert!(game.apply_action(GameAction::SoftDropOn));
        assert!(game.soft_drop());
        assert!(game.apply_action(GameAction::SoftDropOff));
        assert!(!game.soft_drop());
        assert!(game.apply_action(GameAction::RotateRight));
        assert!(game.apply_action(GameAction::Pause));
        assert!(game.paused());
    }

    #[test]
    fn test_lock_speeds_up_and_spawns_next() {
        let mut game = playing_game();
        while game.field().can_translate(Direction::Down) {
            game.field_mut().translate(Direction::Down);
        }
        let next = game.peek_next();
        assert_eq!(game.tick(550), Ok(true));
        assert_eq!(game.pieces_locked(), 1);
        assert_eq!(game.phase(), GamePhase::Playing);
        assert_eq!(game.field().grid().occupied_count(), 4);
        assert_eq!(game.field().active().map(|p| p.kind), Some(next));
        assert!(game.drop_interval_ms() < 550.0);
    }

    #[test]
    fn test_observer_sees_phase_and_preview() {
        let log = Rc::new(RefCell::new(ChangeLog::new()));
        let mut game = GameState::new(5);
        game.set_observer(Box::new(log.clone()));
        game.request_start();

        let log = log.borrow();
        assert_eq!(log.phases, vec![GamePhase::Playing]);
        assert_eq!(log.previews, vec![game.peek_next()]);
        assert_eq!(log.scores, vec![0]);
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let game = playing_game();
        let snap = game.snapshot();
        assert_eq!(snap.phase, GamePhase::Playing);
        assert_eq!(snap.next, game.peek_next());
        assert_eq!(snap.active.map(|a| a.kind), game.field().active().map(|p| p.kind));
        assert_eq!(snap.clearing_rows, 0);
    }
}
