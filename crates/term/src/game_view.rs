//! GameView: maps `core::GameState` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! The simulation runs in a 350x600 world-pixel space; the view scales world
//! rectangles onto terminal cells, compensating for the ~2:1 glyph aspect
//! ratio, and centers the playfield in the viewport with a box border. The
//! score panel sits to the right of the field when the terminal is wide
//! enough.

use tui_flappy_core::GameState;
use tui_flappy_types::{GROUND_HEIGHT, RectF, SCREEN_HEIGHT, SCREEN_WIDTH};

use crate::fb::{CellStyle, FrameBuffer, Rgb};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

const SKY: CellStyle = CellStyle::new(Rgb::new(160, 215, 240), Rgb::new(110, 175, 215));
const PIPE: CellStyle = CellStyle::new(Rgb::new(46, 160, 60), Rgb::new(110, 175, 215));
const GROUND: CellStyle = CellStyle::new(Rgb::new(80, 42, 12), Rgb::new(150, 100, 45));
const BIRD: CellStyle = CellStyle::new(Rgb::new(245, 205, 60), Rgb::new(110, 175, 215));

/// A lightweight terminal renderer for the flappy game world.
pub struct GameView {
    /// World pixels per terminal column.
    px_per_col: f32,
    /// World pixels per terminal row.
    px_per_row: f32,
}

impl Default for GameView {
    fn default() -> Self {
        // 6x12 world pixels per cell: a 350x600 world becomes a 58x50 cell
        // field, and the 2:1 ratio compensates for terminal glyph shape.
        Self {
            px_per_col: 6.0,
            px_per_row: 12.0,
        }
    }
}

impl GameView {
    pub fn new(px_per_col: f32, px_per_row: f32) -> Self {
        Self {
            px_per_col,
            px_per_row,
        }
    }

    /// Field dimensions in cells (excluding the border).
    pub fn field_size(&self) -> (u16, u16) {
        let w = (SCREEN_WIDTH / self.px_per_col).round() as u16;
        let h = (SCREEN_HEIGHT / self.px_per_row).round() as u16;
        (w, h)
    }

    /// Render the current game state into a framebuffer.
    pub fn render(&self, state: &GameState, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        fb.clear(CellStyle::default());

        let (field_w, field_h) = self.field_size();
        let frame_w = field_w + 2;
        let frame_h = field_h + 2;

        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = viewport.height.saturating_sub(frame_h) / 2;

        // Sky backdrop for the whole field.
        fb.fill_rect(start_x + 1, start_y + 1, field_w, field_h, ' ', SKY);

        // Pipes (both halves of every pair).
        for rect in state.obstacle_rects() {
            self.blit_world_rect(&mut fb, start_x, start_y, rect, '█', PIPE);
        }

        // Ground strip.
        let ground = RectF::new(
            0.0,
            SCREEN_HEIGHT - GROUND_HEIGHT,
            SCREEN_WIDTH,
            GROUND_HEIGHT,
        );
        self.blit_world_rect(&mut fb, start_x, start_y, ground, '▒', GROUND);

        // Bird on top of everything in the field.
        self.blit_world_rect(&mut fb, start_x, start_y, state.bird().rect(), '█', BIRD);

        let border = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
        draw_border(&mut fb, start_x, start_y, frame_w, frame_h, border);

        self.draw_side_panel(&mut fb, state, viewport, start_x, start_y, frame_w);

        if state.game_over() {
            draw_overlay(&mut fb, start_x, start_y, frame_w, frame_h, "GAME OVER");
            draw_overlay_below(&mut fb, start_x, start_y, frame_w, frame_h, "SPACE to restart");
        } else if state.paused() {
            draw_overlay(&mut fb, start_x, start_y, frame_w, frame_h, "PAUSED");
        }

        fb
    }

    /// Fill the cells covered by a world rectangle, clipped to the field.
    fn blit_world_rect(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        rect: RectF,
        ch: char,
        style: CellStyle,
    ) {
        if rect.is_empty() {
            return;
        }
        let (field_w, field_h) = self.field_size();

        let x0 = (rect.x / self.px_per_col).floor().max(0.0) as u16;
        let x1 = ((rect.right() / self.px_per_col).ceil()).min(field_w as f32) as u16;
        let y0 = (rect.y / self.px_per_row).floor().max(0.0) as u16;
        let y1 = ((rect.bottom() / self.px_per_row).ceil()).min(field_h as f32) as u16;

        if x0 >= x1 || y0 >= y1 {
            return;
        }

        fb.fill_rect(
            start_x + 1 + x0,
            start_y + 1 + y0,
            x1 - x0,
            y1 - y0,
            ch,
            style,
        );
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        state: &GameState,
        viewport: Viewport,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
    ) {
        let panel_x = start_x.saturating_add(frame_w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 12 {
            return;
        }

        let label = CellStyle::default().bold();
        let value = CellStyle::default();

        let mut y = start_y;
        fb.put_str(panel_x, y, "SCORE", label);
        y = y.saturating_add(1);
        fb.put_str(panel_x, y, &state.score().to_string(), value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "KEYS", label);
        y = y.saturating_add(1);
        for line in ["space  flap", "p      pause", "r      restart", "q      quit"] {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, line, value);
            y = y.saturating_add(1);
        }
    }
}

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
    if w < 2 || h < 2 {
        return;
    }

    fb.put_char(x, y, '┌', style);
    fb.put_char(x + w - 1, y, '┐', style);
    fb.put_char(x, y + h - 1, '└', style);
    fb.put_char(x + w - 1, y + h - 1, '┘', style);

    for dx in 1..w - 1 {
        fb.put_char(x + dx, y, '─', style);
        fb.put_char(x + dx, y + h - 1, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put_char(x, y + dy, '│', style);
        fb.put_char(x + w - 1, y + dy, '│', style);
    }
}

fn draw_overlay(fb: &mut FrameBuffer, start_x: u16, start_y: u16, frame_w: u16, frame_h: u16, text: &str) {
    let style = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0)).bold();
    let y = start_y.saturating_add(frame_h / 2);
    let text_w = text.chars().count() as u16;
    let x = start_x.saturating_add(frame_w.saturating_sub(text_w) / 2);
    fb.put_str(x, y, text, style);
}

fn draw_overlay_below(
    fb: &mut FrameBuffer,
    start_x: u16,
    start_y: u16,
    frame_w: u16,
    frame_h: u16,
    text: &str,
) {
    let style = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
    let y = start_y.saturating_add(frame_h / 2).saturating_add(2);
    let text_w = text.chars().count() as u16;
    let x = start_x.saturating_add(frame_w.saturating_sub(text_w) / 2);
    fb.put_str(x, y, text, style);
}

#[cfg(test)]
mod tests {
    use super::*;
    use tui_flappy_core::GameState;
    use tui_flappy_types::GameAction;

    const VIEW: Viewport = Viewport {
        width: 80,
        height: 60,
    };

    fn row_text(fb: &FrameBuffer, y: u16) -> String {
        (0..fb.width())
            .map(|x| fb.get(x, y).map(|c| c.ch).unwrap_or(' '))
            .collect()
    }

    fn find_style(fb: &FrameBuffer, style: CellStyle) -> Option<(u16, u16)> {
        for y in 0..fb.height() {
            for x in 0..fb.width() {
                if fb.get(x, y).map(|c| c.style) == Some(style) {
                    return Some((x, y));
                }
            }
        }
        None
    }

    #[test]
    fn test_field_size_from_default_scale() {
        let view = GameView::default();
        assert_eq!(view.field_size(), (58, 50));
    }

    #[test]
    fn test_render_contains_bird_and_ground() {
        let view = GameView::default();
        let state = GameState::new(1);
        let fb = view.render(&state, VIEW);

        let (bx, by) = find_style(&fb, BIRD).expect("bird cells rendered");

        // Bird starts at world (100, 300): cells (16..23, 25..27) inside the
        // field, offset by the centered frame origin plus the border.
        let (field_w, field_h) = view.field_size();
        let origin_x = (VIEW.width - (field_w + 2)) / 2 + 1;
        let origin_y = (VIEW.height - (field_h + 2)) / 2 + 1;
        assert_eq!((bx, by), (origin_x + 16, origin_y + 25));

        assert!(find_style(&fb, GROUND).is_some());
        assert!(find_style(&fb, SKY).is_some());
    }

    #[test]
    fn test_pipes_become_visible_after_scrolling_in() {
        let view = GameView::default();
        let mut state = GameState::new(1);

        let fb = view.render(&state, VIEW);
        assert!(find_style(&fb, PIPE).is_none(), "pipes start off-screen");

        for _ in 0..15 {
            state.tick();
        }
        let fb = view.render(&state, VIEW);
        assert!(find_style(&fb, PIPE).is_some());
    }

    #[test]
    fn test_game_over_overlay() {
        let view = GameView::default();
        let mut state = GameState::new(1);
        while !state.game_over() {
            state.tick();
        }

        let fb = view.render(&state, VIEW);
        let all: Vec<String> = (0..fb.height()).map(|y| row_text(&fb, y)).collect();
        assert!(all.iter().any(|row| row.contains("GAME OVER")));
        assert!(all.iter().any(|row| row.contains("SPACE to restart")));
    }

    #[test]
    fn test_paused_overlay() {
        let view = GameView::default();
        let mut state = GameState::new(1);
        state.apply_action(GameAction::Pause);

        let fb = view.render(&state, VIEW);
        let all: Vec<String> = (0..fb.height()).map(|y| row_text(&fb, y)).collect();
        assert!(all.iter().any(|row| row.contains("PAUSED")));
    }

    #[test]
    fn test_side_panel_shows_score() {
        let view = GameView::default();
        let state = GameState::new(1);

        // Wide enough that the panel fits to the right of the field.
        let fb = view.render(&state, Viewport::new(100, 60));
        let all: Vec<String> = (0..fb.height()).map(|y| row_text(&fb, y)).collect();
        assert!(all.iter().any(|row| row.contains("SCORE")));
    }

    #[test]
    fn test_tiny_viewport_does_not_panic() {
        let view = GameView::default();
        let state = GameState::new(1);

        let fb = view.render(&state, Viewport::new(10, 5));
        assert_eq!(fb.width(), 10);
        assert_eq!(fb.height(), 5);
    }
}
