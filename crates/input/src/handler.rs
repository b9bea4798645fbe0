//! DAS/ARR input handler for terminal environments.
//!
//! Holding left/right repeats after a delayed auto shift (DAS) at the auto
//! repeat rate (ARR); holding soft drop repeats at its own rate with no delay.
//! Terminals that never report key releases are handled by auto-releasing a
//! held key after a short silence.

use std::time::{Duration, Instant};

use arrayvec::ArrayVec;
use crossterm::event::KeyEvent;

use crate::map::handle_key_event;
use crate::types::{GameAction, DEFAULT_ARR_MS, DEFAULT_DAS_MS, SOFT_DROP_ARR_MS, SOFT_DROP_DAS_MS};

const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u32 = 150;

/// Actions produced by one [`InputHandler::update`].
pub type RepeatedActions = ArrayVec<GameAction, 32>;

/// One held key and its repeat timers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Repeat {
    held: Option<GameAction>,
    held_ms: u32,
    carry_ms: u32,
    delay_ms: u32,
    rate_ms: u32,
}

impl Repeat {
    fn new(delay_ms: u32, rate_ms: u32) -> Self {
        Self {
            held: None,
            held_ms: 0,
            carry_ms: 0,
            delay_ms,
            rate_ms: rate_ms.max(1),
        }
    }

    /// Start holding `action`. Returns false if it was already held.
    fn press(&mut self, action: GameAction) -> bool {
        if self.held == Some(action) {
            return false;
        }
        self.held = Some(action);
        self.held_ms = 0;
        self.carry_ms = 0;
        true
    }

    fn release(&mut self) {
        self.held = None;
        self.held_ms = 0;
        self.carry_ms = 0;
    }

    fn is_holding(&self, action: GameAction) -> bool {
        self.held == Some(action)
    }

    fn advance(&mut self, elapsed_ms: u32, out: &mut RepeatedActions) {
        let Some(action) = self.held else {
            return;
        };

        let before = self.held_ms;
        self.held_ms = self.held_ms.saturating_add(elapsed_ms);
        if self.held_ms < self.delay_ms {
            return;
        }

        // Only time past the delay counts toward repeats.
        self.carry_ms += if before < self.delay_ms {
            self.held_ms - self.delay_ms
        } else {
            elapsed_ms
        };
        while self.carry_ms >= self.rate_ms {
            let _ = out.try_push(action);
            self.carry_ms -= self.rate_ms;
        }
    }
}

/// Tracks held keys for DAS/ARR handling.
#[derive(Debug, Clone)]
pub struct InputHandler {
    horizontal: Repeat,
    soft_drop: Repeat,
    last_key_time: Instant,
    key_release_timeout_ms: u32,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::with_config(DEFAULT_DAS_MS, DEFAULT_ARR_MS)
    }

    /// Custom horizontal DAS delay and ARR rate; soft drop keeps its defaults.
    pub fn with_config(das_delay: u32, arr_rate: u32) -> Self {
        Self {
            horizontal: Repeat::new(das_delay, arr_rate),
            soft_drop: Repeat::new(SOFT_DROP_DAS_MS, SOFT_DROP_ARR_MS),
            last_key_time: Instant::now(),
            key_release_timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    pub fn key_release_timeout_ms(&self) -> u32 {
        self.key_release_timeout_ms
    }

    /// Map a key press to the action to apply now.
    ///
    /// Repeatable keys (move, soft drop) yield their action once per press
    /// and then repeat from [`update`](Self::update); a key-repeat event for a
    /// key already held yields nothing. Other mapped keys pass straight through.
    pub fn handle_key_press(&mut self, key: KeyEvent) -> Option<GameAction> {
        let action = handle_key_event(key)?;
        let track = match action {
            GameAction::MoveLeft | GameAction::MoveRight => &mut self.horizontal,
            GameAction::SoftDrop => &mut self.soft_drop,
            _ => return Some(action),
        };

        self.last_key_time = Instant::now();
        track.press(action).then_some(action)
    }

    pub fn handle_key_release(&mut self, key: KeyEvent) {
        match handle_key_event(key) {
            Some(action @ (GameAction::MoveLeft | GameAction::MoveRight)) => {
                if self.horizontal.is_holding(action) {
                    self.horizontal.release();
                }
            }
            Some(GameAction::SoftDrop) => self.soft_drop.release(),
            _ => {}
        }
    }

    /// Advance the repeat timers by `elapsed_ms` and collect the repeats due.
    pub fn update(&mut self, elapsed_ms: u32) -> RepeatedActions {
        let mut actions = RepeatedActions::new();

        if self.last_key_time.elapsed() > Duration::from_millis(self.key_release_timeout_ms as u64) {
            self.horizontal.release();
            self.soft_drop.release();
        }

        self.horizontal.advance(elapsed_ms, &mut actions);
        self.soft_drop.advance(elapsed_ms, &mut actions);
        actions
    }

    pub fn reset(&mut self) {
        self.horizontal.release();
        self.soft_drop.release();
        self.last_key_time = Instant::now();
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyCode;

    fn press(ih: &mut InputHandler, code: KeyCode) -> Option<GameAction> {
        ih.handle_key_press(KeyEvent::from(code))
    }

    #[test]
    fn test_horizontal_das_arr_repeats_after_delay() {
        let mut ih = InputHandler::with_config(100, 25).with_key_release_timeout_ms(10_000);

        assert_eq!(press(&mut ih, KeyCode::Left), Some(GameAction::MoveLeft));

        assert!(ih.update(99).is_empty());
        // Exactly at the delay: nothing accumulated past it yet.
        assert!(ih.update(1).is_empty());

        assert_eq!(ih.update(25).as_slice(), &[GameAction::MoveLeft]);
        assert_eq!(ih.update(25).as_slice(), &[GameAction::MoveLeft]);
    }

    #[test]
    fn test_held_key_repeat_events_are_swallowed() {
        let mut ih = InputHandler::new().with_key_release_timeout_ms(10_000);

        assert_eq!(press(&mut ih, KeyCode::Char('l')), Some(GameAction::MoveRight));
        assert_eq!(press(&mut ih, KeyCode::Right), None);

        // Switching direction restarts DAS.
        assert_eq!(press(&mut ih, KeyCode::Left), Some(GameAction::MoveLeft));
        assert!(ih.update(DEFAULT_DAS_MS - 1).is_empty());
    }

    #[test]
    fn test_release_of_other_direction_keeps_hold() {
        let mut ih = InputHandler::with_config(0, 10).with_key_release_timeout_ms(10_000);

        press(&mut ih, KeyCode::Left);
        ih.handle_key_release(KeyEvent::from(KeyCode::Right));
        assert_eq!(ih.update(10).as_slice(), &[GameAction::MoveLeft]);

        ih.handle_key_release(KeyEvent::from(KeyCode::Char('a')));
        assert!(ih.update(100).is_empty());
    }

    #[test]
    fn test_non_repeatable_keys_pass_through() {
        let mut ih = InputHandler::new();
        assert_eq!(press(&mut ih, KeyCode::Char(' ')), Some(GameAction::HardDrop));
        assert_eq!(press(&mut ih, KeyCode::Char(' ')), Some(GameAction::HardDrop));
        assert_eq!(press(&mut ih, KeyCode::Enter), Some(GameAction::Start));
        assert_eq!(press(&mut ih, KeyCode::Char('m')), None);
    }

    #[test]
    fn test_auto_release_triggers_after_timeout_without_key_release_events() {
        let mut ih = InputHandler::with_config(100, 25);
        ih.key_release_timeout_ms = 50;

        assert_eq!(press(&mut ih, KeyCode::Left), Some(GameAction::MoveLeft));
        assert!(ih.horizontal.is_holding(GameAction::MoveLeft));

        ih.last_key_time = Instant::now() - Duration::from_millis(51);

        assert!(ih.update(500).is_empty());
        assert_eq!(ih.horizontal.held, None);
    }

    #[test]
    fn test_non_movement_key_does_not_extend_auto_release_timeout() {
        let mut ih = InputHandler::with_config(100, 25);
        ih.key_release_timeout_ms = 50;

        press(&mut ih, KeyCode::Left);
        ih.last_key_time = Instant::now() - Duration::from_millis(51);
        assert_eq!(press(&mut ih, KeyCode::Up), Some(GameAction::RotateCw));

        assert!(ih.update(0).is_empty());
        assert_eq!(ih.horizontal.held, None);
    }

    #[test]
    fn test_soft_drop_repeats_use_zero_das_and_50ms_arr() {
        let mut ih = InputHandler::new().with_key_release_timeout_ms(10_000);

        assert_eq!(press(&mut ih, KeyCode::Down), Some(GameAction::SoftDrop));

        assert!(ih.update(49).is_empty());
        assert_eq!(ih.update(1).as_slice(), &[GameAction::SoftDrop]);
        assert_eq!(
            ih.update(100).as_slice(),
            &[GameAction::SoftDrop, GameAction::SoftDrop]
        );
    }

    #[test]
    fn test_horizontal_and_soft_drop_repeat_together() {
        let mut ih = InputHandler::with_config(0, 50).with_key_release_timeout_ms(10_000);

        press(&mut ih, KeyCode::Right);
        press(&mut ih, KeyCode::Down);

        assert_eq!(
            ih.update(50).as_slice(),
            &[GameAction::MoveRight, GameAction::SoftDrop]
        );
    }

    #[test]
    fn test_reset_clears_held_state_and_stops_repeats() {
        let mut ih = InputHandler::with_config(100, 25).with_key_release_timeout_ms(10_000);

        press(&mut ih, KeyCode::Left);
        assert!(!ih.update(200).is_empty());

        ih.reset();
        assert!(ih.update(200).is_empty());
    }

    #[test]
    fn test_repeats_are_capped_per_update() {
        let mut ih = InputHandler::with_config(0, 1).with_key_release_timeout_ms(10_000);
        press(&mut ih, KeyCode::Left);
        assert_eq!(ih.update(1_000).len(), 32);
    }
}
