use blockfall::core::GameState;
use blockfall::term::{AnchorY, FrameBuffer, GameView, Viewport};
use blockfall::types::{GameAction, PieceKind};

fn screen_text(fb: &FrameBuffer) -> String {
    (0..fb.height())
        .map(|y| fb.row_text(y))
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn term_view_renders_border_corners() {
    let snap = GameState::new(1).snapshot();
    let view = GameView::default();

    // 10x20 cells at 2x1 plus the border => 22x22.
    let fb = view.render(&snap, Viewport::new(22, 22));

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(21, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 21).unwrap().ch, '└');
    assert_eq!(fb.get(21, 21).unwrap().ch, '┘');
}

#[test]
fn term_view_renders_locked_cell_as_two_chars_wide() {
    let mut snap = GameState::new(1).snapshot();
    snap.board[19][0] = PieceKind::I.id();

    let fb = GameView::default().render(&snap, Viewport::new(22, 22));

    assert_eq!(fb.get(1, 20).unwrap().ch, '█');
    assert_eq!(fb.get(2, 20).unwrap().ch, '█');
    assert_eq!(fb.get(3, 20).unwrap().ch, '·');
}

#[test]
fn term_view_ready_game_prompts_for_enter() {
    let snap = GameState::new(1).snapshot();
    let fb = GameView::default().render(&snap, Viewport::new(60, 22));
    let text = screen_text(&fb);
    assert!(text.contains("PRESS ENTER"));
    assert!(text.contains("READY"));
}

#[test]
fn term_view_draws_live_game() {
    let mut gs = GameState::with_best(1, 777);
    gs.start();
    gs.apply_action(GameAction::HardDrop);

    let fb = GameView::default().render(&gs.snapshot(), Viewport::new(60, 22));
    let text = screen_text(&fb);

    for word in ["SCORE", "BEST", "777", "LEVEL", "LINES", "PLAYING", "NEXT"] {
        assert!(text.contains(word), "missing {word}");
    }
    assert!(!text.contains("PRESS ENTER"));
    // The locked piece and the ghost of the new piece are visible.
    assert!(text.contains('█'));
    assert!(text.contains('░'));
}

#[test]
fn term_view_paused_and_game_over_overlays() {
    let mut gs = GameState::new(1);
    gs.start();
    gs.apply_action(GameAction::Pause);
    let fb = GameView::default().render(&gs.snapshot(), Viewport::new(22, 22));
    assert!(screen_text(&fb).contains("PAUSED"));

    gs.apply_action(GameAction::Pause);
    while !gs.game_over() {
        gs.apply_action(GameAction::HardDrop);
    }
    let fb = GameView::default().render(&gs.snapshot(), Viewport::new(22, 22));
    assert!(screen_text(&fb).contains("GAME OVER"));
}

#[test]
fn term_view_centers_board_by_default_on_tall_viewports() {
    let snap = GameState::new(1).snapshot();
    let fb = GameView::default().render(&snap, Viewport::new(22, 30));

    // start_y = (30 - 22) / 2 = 4.
    assert_eq!(fb.get(0, 4).unwrap().ch, '┌');
}

#[test]
fn term_view_can_anchor_board_to_top() {
    let snap = GameState::new(1).snapshot();
    let view = GameView::default().with_anchor_y(AnchorY::Top);
    let fb = view.render(&snap, Viewport::new(22, 30));

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
}

#[test]
fn term_view_render_into_reuses_buffer() {
    let snap = GameState::new(1).snapshot();
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);

    view.render_into(&snap, Viewport::new(30, 24), &mut fb);
    assert_eq!((fb.width(), fb.height()), (30, 24));
    let first = fb.clone();

    view.render_into(&snap, Viewport::new(30, 24), &mut fb);
    assert_eq!(fb, first);
}
