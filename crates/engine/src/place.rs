use blockfall_core::GameState;
use blockfall_types::{GameAction, Rotation, SessionState, BOARD_WIDTH};

/// A final resting position expressed as spawn-relative commands:
/// `turns` clockwise quarter turns, then shift the origin to column `x`, then hard drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Placement {
    pub turns: u8,
    pub x: i8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceError {
    NotPlayable,
    NoActive,
    RotationBlocked,
    XOutOfBounds,
    XBlocked,
}

impl PlaceError {
    pub fn message(self) -> &'static str {
        match self {
            PlaceError::NotPlayable => "game is not playable",
            PlaceError::NoActive => "no active piece",
            PlaceError::RotationBlocked => "could not rotate to the requested orientation",
            PlaceError::XOutOfBounds => "target column would put the piece outside the well",
            PlaceError::XBlocked => "could not shift to the target column due to collision",
        }
    }
}

/// Drive the active piece to `placement` through ordinary commands and hard drop it.
///
/// On error the game may have been partially moved (rotated or shifted) but
/// no piece has been locked.
pub fn apply_place(state: &mut GameState, placement: Placement) -> Result<(), PlaceError> {
    if state.state() != SessionState::Playing {
        return Err(PlaceError::NotPlayable);
    }
    if state.active().is_none() {
        return Err(PlaceError::NoActive);
    }

    let turns = placement.turns % 4;
    // Three clockwise turns are one counter-clockwise turn; try the short way first.
    let mut plans = [(Rotation::Cw, turns), (Rotation::Ccw, (4 - turns) % 4)];
    if plans[1].1 < plans[0].1 {
        plans.swap(0, 1);
    }

    let before = state.clone();
    let mut rotated = false;
    for (dir, steps) in plans {
        *state = before.clone();
        if (0..steps).all(|_| state.rotate(dir)) {
            rotated = true;
            break;
        }
    }
    if !rotated {
        *state = before;
        return Err(PlaceError::RotationBlocked);
    }

    let Some(active) = state.active() else {
        return Err(PlaceError::NoActive);
    };

    let (min_dx, max_dx) = active
        .shape
        .blocks()
        .fold((i8::MAX, i8::MIN), |(lo, hi), (dx, _, _)| (lo.min(dx), hi.max(dx)));
    let target = i16::from(placement.x);
    if target + i16::from(min_dx) < 0 || target + i16::from(max_dx) >= BOARD_WIDTH as i16 {
        return Err(PlaceError::XOutOfBounds);
    }

    let dx = target - i16::from(active.x);
    let step = if dx < 0 { -1 } else { 1 };
    for _ in 0..dx.unsigned_abs() {
        if !state.try_move(step) {
            return Err(PlaceError::XBlocked);
        }
    }

    if !state.apply_action(GameAction::HardDrop) {
        return Err(PlaceError::NotPlayable);
    }
    Ok(())
}
