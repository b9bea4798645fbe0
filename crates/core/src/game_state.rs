//! Game state module - the session state machine
//!
//! Owns the board, the active piece, the queued next piece, the bag, and the
//! score/lines/level counters. Every player command and every gravity tick goes
//! through [`GameState`]; commands issued in the wrong state are no-ops that
//! return `false`.
//!
//! A piece's life: spawn (centered, origin row -2) -> fall / move / rotate ->
//! lock (merge into the board) -> sweep full rows -> score -> spawn the next.
//! A spawn that collides ends the session.

use crate::board::Board;
use crate::pieces::{template_for, try_rotate, Shape};
use crate::rng::PieceBag;
use crate::scoring::{drop_interval_ms, level_for_lines, line_clear_score};
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::*;

/// The falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub kind: PieceKind,
    /// Current (possibly rotated) matrix
    pub shape: Shape,
    pub x: i8,
    pub y: i8,
}

impl ActivePiece {
    /// A piece at its spawn position: horizontally centered, origin at [`SPAWN_ROW`].
    pub fn spawn(kind: PieceKind) -> Self {
        let shape = template_for(kind);
        let x = (BOARD_WIDTH / 2) as i8 - (shape.size() / 2) as i8;
        Self {
            kind,
            shape,
            x,
            y: SPAWN_ROW,
        }
    }

    pub fn collides(&self, board: &Board) -> bool {
        board.collides(&self.shape, self.x, self.y)
    }
}

/// Complete game session
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    active: Option<ActivePiece>,
    next: Option<PieceKind>,
    bag: PieceBag,
    state: SessionState,
    score: u32,
    lines: u32,
    level: u32,
    drop_interval_ms: u32,
    /// Time accumulated toward the next gravity step.
    drop_timer_ms: u32,
    best: u32,
    /// Set when a game over beats `best`; taken by whoever persists it.
    new_best: Option<u32>,
}

impl GameState {
    /// Create a session with the given bag seed and no stored best score
    pub fn new(seed: u32) -> Self {
        Self::with_best(seed, 0)
    }

    /// Create a session with a previously stored best score
    pub fn with_best(seed: u32, best: u32) -> Self {
        Self {
            board: Board::new(),
            active: None,
            next: None,
            bag: PieceBag::new(seed),
            state: SessionState::Ready,
            score: 0,
            lines: 0,
            level: 1,
            drop_interval_ms: drop_interval_ms(1),
            drop_timer_ms: 0,
            best,
            new_best: None,
        }
    }

    /// Start playing. After a game over this resets the session first.
    ///
    /// Returns false if the session was already running.
    pub fn start(&mut self) -> bool {
        if self.state == SessionState::GameOver {
            self.reset();
        }
        if self.state != SessionState::Ready {
            return false;
        }

        self.state = SessionState::Playing;
        if self.next.is_none() {
            self.next = Some(self.bag.next());
        }
        self.spawn_piece();
        true
    }

    /// Discard the current session and start a new one.
    pub fn restart(&mut self) {
        self.reset();
        self.start();
    }

    /// Back to `Ready` with an empty board; the bag and best score carry over.
    fn reset(&mut self) {
        self.board.clear();
        self.active = None;
        self.next = None;
        self.state = SessionState::Ready;
        self.score = 0;
        self.lines = 0;
        self.level = 1;
        self.drop_interval_ms = drop_interval_ms(1);
        self.drop_timer_ms = 0;
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn paused(&self) -> bool {
        self.state == SessionState::Paused
    }

    pub fn game_over(&self) -> bool {
        self.state == SessionState::GameOver
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    /// Current gravity interval in milliseconds
    pub fn drop_interval_ms(&self) -> u32 {
        self.drop_interval_ms
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.active
    }

    pub fn next(&self) -> Option<PieceKind> {
        self.next
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The new best score, once, after a game over that beat the stored best.
    pub fn take_new_best(&mut self) -> Option<u32> {
        self.new_best.take()
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_u8_grid(&mut out.board);

        out.active = self.active.map(ActiveSnapshot::from);
        out.ghost_y = self.ghost_y();
        out.next = self.next;
        out.state = self.state;
        out.score = self.score;
        out.lines = self.lines;
        out.level = self.level;
        out.best = self.best;
        out.drop_interval_ms = self.drop_interval_ms;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Promote the queued piece to active and queue a new one.
    ///
    /// If the new piece collides where it spawns the session is over. Returns
    /// whether a piece is now in play.
    pub fn spawn_piece(&mut self) -> bool {
        if self.state != SessionState::Playing {
            return false;
        }

        let kind = self.next.take().unwrap_or_else(|| self.bag.next());
        self.next = Some(self.bag.next());

        let piece = ActivePiece::spawn(kind);
        if piece.collides(&self.board) {
            self.active = None;
            self.end_game();
            return false;
        }

        self.active = Some(piece);
        true
    }

    fn end_game(&mut self) {
        self.state = SessionState::GameOver;
        if self.score > self.best {
            self.best = self.score;
            self.new_best = Some(self.score);
        }
    }

    /// Shift the active piece `dx` columns; nothing moves if the target collides.
    pub fn try_move(&mut self, dx: i8) -> bool {
        if self.state != SessionState::Playing {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        let x = active.x + dx;
        if self.board.collides(&active.shape, x, active.y) {
            return false;
        }
        self.active = Some(ActivePiece { x, ..active });
        true
    }

    /// Rotate the active piece with the simple horizontal wall kick.
    ///
    /// When no kick fits, the piece keeps its previous matrix and column.
    pub fn rotate(&mut self, dir: Rotation) -> bool {
        if self.state != SessionState::Playing {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        let board = &self.board;
        let result = try_rotate(&active.shape, active.x, dir, |shape, x| {
            board.collides(shape, x, active.y)
        });

        match result {
            Some((shape, x)) => {
                self.active = Some(ActivePiece { shape, x, ..active });
                true
            }
            None => false,
        }
    }

    /// Move the active piece down one row, or lock it if it cannot descend.
    pub fn soft_drop(&mut self) -> bool {
        if self.state != SessionState::Playing {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        self.drop_timer_ms = 0;
        let y = active.y + 1;
        if self.board.collides(&active.shape, active.x, y) {
            self.lock_active();
        } else {
            self.active = Some(ActivePiece { y, ..active });
        }
        true
    }

    /// Drop the active piece straight to its landing row and lock it.
    pub fn hard_drop(&mut self) -> bool {
        if self.state != SessionState::Playing {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        self.drop_timer_ms = 0;
        let y = self.landing_y(&active);
        self.active = Some(ActivePiece { y, ..active });
        self.lock_active();
        true
    }

    /// Flip between playing and paused.
    pub fn toggle_pause(&mut self) -> bool {
        self.state = match self.state {
            SessionState::Playing => SessionState::Paused,
            SessionState::Paused => SessionState::Playing,
            _ => return false,
        };
        true
    }

    /// Advance gravity by `elapsed_ms`.
    ///
    /// Once the accumulated time exceeds the gravity interval, performs one
    /// soft drop and starts accumulating from zero. Returns whether a gravity
    /// step happened.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if self.state != SessionState::Playing {
            return false;
        }

        self.drop_timer_ms = self.drop_timer_ms.saturating_add(elapsed_ms);
        if self.drop_timer_ms > self.drop_interval_ms {
            return self.soft_drop();
        }
        false
    }

    /// Lowest row the piece can reach by falling straight down.
    fn landing_y(&self, piece: &ActivePiece) -> i8 {
        let mut y = piece.y;
        while !self.board.collides(&piece.shape, piece.x, y + 1) {
            y += 1;
        }
        y
    }

    /// Landing row of the active piece (ghost preview)
    pub fn ghost_y(&self) -> Option<i8> {
        self.active.map(|piece| self.landing_y(&piece))
    }

    /// Merge the active piece, sweep rows, update counters, spawn the next piece.
    fn lock_active(&mut self) {
        let Some(active) = self.active.take() else {
            return;
        };

        self.board.merge(&active.shape, active.x, active.y);
        let cleared = self.board.sweep_completed_rows();

        if cleared > 0 {
            self.score = self
                .score
                .saturating_add(line_clear_score(cleared, self.level));
            self.lines = self.lines.saturating_add(cleared);
            self.level = level_for_lines(self.lines);
            self.drop_interval_ms = drop_interval_ms(self.level);
        }

        self.spawn_piece();
    }

    /// Apply a game action
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.try_move(-1),
            GameAction::MoveRight => self.try_move(1),
            GameAction::SoftDrop => self.soft_drop(),
            GameAction::HardDrop => self.hard_drop(),
            GameAction::RotateCw => self.rotate(Rotation::Cw),
            GameAction::RotateCcw => self.rotate(Rotation::Ccw),
            GameAction::Pause => self.toggle_pause(),
            GameAction::Start => self.start(),
            GameAction::Restart => {
                self.restart();
                true
            }
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}
