//! A game bound to a best-score slot.
//!
//! [`Session`] forwards commands and ticks to the core and, after each one,
//! writes any new best score the game reports. Store failures never stop the
//! game; the last one is kept for the host to report.

use std::sync::{Arc, Mutex, MutexGuard};

use blockfall_core::{GameSnapshot, GameState};
use blockfall_types::GameAction;

use crate::autoplay::{choose_placement, Weights};
use crate::best_score::{load_best, ScoreSlot, StoreError};
use crate::place::{apply_place, PlaceError, Placement};

#[derive(Debug)]
pub struct Session<S: ScoreSlot> {
    game: GameState,
    slot: S,
    store_error: Option<StoreError>,
}

impl<S: ScoreSlot> Session<S> {
    /// Read the stored best and create a `Ready` game.
    pub fn open(seed: u32, slot: S) -> Self {
        let best = load_best(&slot);
        Self {
            game: GameState::with_best(seed, best),
            slot,
            store_error: None,
        }
    }

    pub fn apply_action(&mut self, action: GameAction) -> bool {
        let changed = self.game.apply_action(action);
        self.persist_new_best();
        changed
    }

    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        let stepped = self.game.tick(elapsed_ms);
        self.persist_new_best();
        stepped
    }

    pub fn place(&mut self, placement: Placement) -> Result<(), PlaceError> {
        let result = apply_place(&mut self.game, placement);
        self.persist_new_best();
        result
    }

    /// Let the greedy player place the active piece. Returns whether a piece was placed.
    pub fn autoplay_step(&mut self, weights: &Weights) -> bool {
        match choose_placement(&self.game, weights) {
            Some(placement) => self.place(placement).is_ok(),
            None => false,
        }
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn slot(&self) -> &S {
        &self.slot
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.game.snapshot_into(out);
    }

    /// The most recent failed best-score write, if any.
    pub fn take_store_error(&mut self) -> Option<StoreError> {
        self.store_error.take()
    }

    fn persist_new_best(&mut self) {
        if let Some(best) = self.game.take_new_best() {
            if let Err(e) = self.slot.save(best) {
                self.store_error = Some(e);
            }
        }
    }
}

/// A [`Session`] shared between threads.
///
/// Every call takes the lock once, so a command or tick is applied as a
/// whole. Every operation leaves the game valid, so a poisoned lock is
/// recovered rather than propagated.
#[derive(Debug)]
pub struct SharedSession<S: ScoreSlot> {
    inner: Arc<Mutex<Session<S>>>,
}

impl<S: ScoreSlot> Clone for SharedSession<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: ScoreSlot> SharedSession<S> {
    pub fn new(session: Session<S>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(session)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Session<S>> {
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn apply_action(&self, action: GameAction) -> bool {
        self.lock().apply_action(action)
    }

    pub fn tick(&self, elapsed_ms: u32) -> bool {
        self.lock().tick(elapsed_ms)
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.lock().snapshot_into(out);
    }

    pub fn take_store_error(&self) -> Option<StoreError> {
        self.lock().take_store_error()
    }

    /// Run `f` with exclusive access to the session.
    pub fn with<R>(&self, f: impl FnOnce(&mut Session<S>) -> R) -> R {
        f(&mut self.lock())
    }
}
