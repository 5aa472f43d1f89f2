use blockfall::core::{Engine, GameSnapshot, ShapeCatalog};
use blockfall::term::{AnchorY, FrameBuffer, GameView, Viewport};
use blockfall::types::ShapeId;

fn view() -> GameView {
    GameView::new(&ShapeCatalog::standard().unwrap())
}

fn empty_snapshot(cols: u16, rows: u16) -> GameSnapshot {
    let mut snap = Engine::with_size(cols, rows, 1).unwrap().snapshot();
    snap.active = None;
    snap
}

fn screen_text(fb: &FrameBuffer) -> String {
    let mut all = String::new();
    for y in 0..fb.height() {
        all.push_str(&fb.row_text(y));
        all.push('\n');
    }
    all
}

#[test]
fn term_view_renders_border_corners() {
    let snap = empty_snapshot(10, 20);

    // With cell_w=2 and cell_h=1:
    // board pixels = 10*2 by 20*1 => 20x20, plus border => 22x22
    let fb = view().render(&snap, Viewport::new(22, 22));

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(21, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 21).unwrap().ch, '└');
    assert_eq!(fb.get(21, 21).unwrap().ch, '┘');
}

#[test]
fn term_view_follows_board_size() {
    let snap = empty_snapshot(4, 6);
    let fb = view().render(&snap, Viewport::new(10, 8));

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(9, 7).unwrap().ch, '┘');
    assert_eq!(fb.get(1, 1).unwrap().ch, '·');
}

#[test]
fn term_view_renders_locked_cell_in_shape_color() {
    let mut snap = empty_snapshot(10, 20);
    // Locked L block at bottom-left.
    snap.board[19 * 10] = ShapeId::L.value();

    let catalog = ShapeCatalog::standard().unwrap();
    let fb = view().render(&snap, Viewport::new(22, 22));

    // Inside border: (1,1) origin. Each cell is 2 chars wide.
    let left = fb.get(1, 20).unwrap();
    let right = fb.get(2, 20).unwrap();
    assert_eq!(left.ch, '█');
    assert_eq!(right.ch, '█');
    assert_eq!(left.style.fg, catalog.get(ShapeId::L).color());
}

#[test]
fn term_view_draws_active_piece() {
    let engine = Engine::with_size(10, 20, 3).unwrap();
    let snap = engine.snapshot();
    let active = snap.active.clone().unwrap();

    let fb = view().render(&snap, Viewport::new(22, 22));
    for &(x, y) in active.cells.iter() {
        let cell = fb.get(1 + 2 * x as u16, 1 + y as u16).unwrap();
        assert_eq!(cell.ch, '█');
        assert_eq!(cell.style.fg, engine.catalog().get(active.shape).color());
    }
}

#[test]
fn term_view_draws_side_panel_when_wide_enough() {
    let mut snap = empty_snapshot(10, 20);
    snap.score = 1234;
    snap.level = 2;
    snap.lines = 10;
    snap.delay_ms = 450;

    let all = screen_text(&view().render(&snap, Viewport::new(60, 22)));
    assert!(all.contains("SCORE"));
    assert!(all.contains("1234"));
    assert!(all.contains("LEVEL"));
    assert!(all.contains("LINES"));
    assert!(all.contains("SPEED"));
    assert!(all.contains("450ms"));
}

#[test]
fn term_view_skips_side_panel_when_narrow() {
    let snap = empty_snapshot(10, 20);
    let all = screen_text(&view().render(&snap, Viewport::new(22, 22)));
    assert!(!all.contains("SCORE"));
}

#[test]
fn term_view_shows_overlays() {
    let mut snap = empty_snapshot(10, 20);
    snap.paused = true;
    let all = screen_text(&view().render(&snap, Viewport::new(22, 22)));
    assert!(all.contains("PAUSED"));

    snap.game_over = true;
    let all = screen_text(&view().render(&snap, Viewport::new(22, 22)));
    assert!(all.contains("GAME OVER"));
    assert!(!all.contains("PAUSED"));
}

#[test]
fn term_view_centers_board_by_default_on_tall_viewports() {
    let snap = empty_snapshot(10, 20);
    let fb = view().render(&snap, Viewport::new(22, 30));

    // start_y = (30 - 22) / 2 = 4 => top-left corner at (0,4).
    assert_eq!(fb.get(0, 4).unwrap().ch, '┌');
}

#[test]
fn term_view_can_anchor_board_to_top() {
    let snap = empty_snapshot(10, 20);
    let view = view().with_anchor_y(AnchorY::Top);
    let fb = view.render(&snap, Viewport::new(22, 30));

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
}

#[test]
fn term_view_render_into_reuses_framebuffer() {
    let snap = empty_snapshot(10, 20);
    let view = view();
    let mut fb = FrameBuffer::new(0, 0);
    view.render_into(&snap, Viewport::new(40, 24), &mut fb);
    assert_eq!((fb.width(), fb.height()), (40, 24));
    let first = fb.clone();
    view.render_into(&snap, Viewport::new(40, 24), &mut fb);
    assert_eq!(fb, first);
}
