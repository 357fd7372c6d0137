//! Pipe field: a fixed ring of pipe pairs that scrolls, recycles and scores.
//!
//! The field always holds [`PIPE_COUNT`] pipes. A pipe that scrolls fully off
//! the left edge is respawned behind the rightmost pipe, so the spacing
//! between consecutive pipes stays at [`PIPE_SPAWN_INTERVAL`] for the whole
//! run regardless of recycle order.

use arrayvec::ArrayVec;

use tui_flappy_types::{
    BIRD_START_X, CEILING_HEIGHT, GROUND_HEIGHT, PIPE_COUNT, PIPE_GAP, PIPE_SPAWN_INTERVAL,
    PIPE_SPEED, PIPE_WIDTH, RectF, SCREEN_HEIGHT, SCREEN_WIDTH,
};

use crate::rng::SimpleRng;

/// Vertical span the gap offset is drawn from (399 world pixels).
const GAP_Y_SPAN: f32 = SCREEN_HEIGHT - PIPE_GAP - GROUND_HEIGHT - CEILING_HEIGHT;

/// Two obstacle rectangles per pipe.
pub const OBSTACLE_RECT_CAP: usize = PIPE_COUNT * 2;

/// One pipe pair: a top and bottom obstacle separated by a fixed gap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pipe {
    /// Left edge; decreases by [`PIPE_SPEED`] every tick.
    pub x: f32,
    /// World y at which the passable opening begins.
    pub gap_y: f32,
    /// Set once the pipe has been counted toward the score.
    pub passed: bool,
}

impl Pipe {
    fn spawn(x: f32, rng: &mut SimpleRng) -> Self {
        Self {
            x,
            gap_y: random_gap_y(rng),
            passed: false,
        }
    }

    /// Obstacle above the gap, hanging from the ceiling.
    pub fn top_rect(&self) -> RectF {
        RectF::new(self.x, 0.0, PIPE_WIDTH, self.gap_y)
    }

    /// Obstacle below the gap, standing on the ground.
    pub fn bottom_rect(&self) -> RectF {
        let top = self.gap_y + PIPE_GAP;
        RectF::new(self.x, top, PIPE_WIDTH, SCREEN_HEIGHT - top - GROUND_HEIGHT)
    }

    /// True once the trailing edge has left the screen entirely.
    pub fn is_offscreen(&self) -> bool {
        self.x + PIPE_WIDTH < 0.0
    }
}

/// Gap offset drawn uniformly so both pipe halves keep positive height.
fn random_gap_y(rng: &mut SimpleRng) -> f32 {
    CEILING_HEIGHT + rng.next_range(GAP_Y_SPAN as u32) as f32
}

/// The fixed-size collection of pipes in flight.
#[derive(Debug, Clone, PartialEq)]
pub struct PipeField {
    pipes: [Pipe; PIPE_COUNT],
}

impl PipeField {
    /// Field in the starting layout: evenly spaced off the right screen edge.
    pub fn new(rng: &mut SimpleRng) -> Self {
        Self {
            pipes: std::array::from_fn(|i| {
                Pipe::spawn(SCREEN_WIDTH + i as f32 * PIPE_SPAWN_INTERVAL, rng)
            }),
        }
    }

    /// Put every pipe back into the starting layout with fresh gaps.
    pub fn reseed(&mut self, rng: &mut SimpleRng) {
        for (i, pipe) in self.pipes.iter_mut().enumerate() {
            *pipe = Pipe::spawn(SCREEN_WIDTH + i as f32 * PIPE_SPAWN_INTERVAL, rng);
        }
    }

    /// One tick of scrolling: move every pipe, then recycle, then score.
    ///
    /// Recycling runs after the whole field has moved, so a respawned pipe
    /// lands exactly one spawn interval behind the current rightmost pipe
    /// and the uniform spacing invariant holds for the entire run. The O(N)
    /// max scan is fine at N = 10.
    ///
    /// Returns the number of pipes newly passed this tick, i.e. the score
    /// delta.
    pub fn advance(&mut self, rng: &mut SimpleRng) -> u32 {
        for pipe in &mut self.pipes {
            pipe.x -= PIPE_SPEED;
        }

        for i in 0..PIPE_COUNT {
            if self.pipes[i].is_offscreen() {
                let x = self.max_x() + PIPE_SPAWN_INTERVAL;
                self.pipes[i] = Pipe::spawn(x, rng);
            }
        }

        let mut newly_passed = 0;
        for pipe in &mut self.pipes {
            if !pipe.passed && pipe.x < BIRD_START_X {
                pipe.passed = true;
                newly_passed += 1;
            }
        }

        newly_passed
    }

    pub fn pipes(&self) -> &[Pipe] {
        &self.pipes
    }

    /// Every obstacle rectangle currently in the world, without allocating.
    pub fn obstacle_rects(&self) -> ArrayVec<RectF, OBSTACLE_RECT_CAP> {
        let mut rects = ArrayVec::new();
        for pipe in &self.pipes {
            for rect in [pipe.top_rect(), pipe.bottom_rect()] {
                if !rect.is_empty() {
                    rects.push(rect);
                }
            }
        }
        rects
    }

    fn max_x(&self) -> f32 {
        self.pipes.iter().map(|p| p.x).fold(f32::MIN, f32::max)
    }

    #[cfg(test)]
    pub fn pipes_mut(&mut self) -> &mut [Pipe] {
        &mut self.pipes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(seed: u32) -> (PipeField, SimpleRng) {
        let mut rng = SimpleRng::new(seed);
        let field = PipeField::new(&mut rng);
        (field, rng)
    }

    fn spacing_is_uniform(field: &PipeField) -> bool {
        let mut xs: Vec<f32> = field.pipes().iter().map(|p| p.x).collect();
        xs.sort_by(|a, b| a.partial_cmp(b).unwrap());
        xs.windows(2).all(|w| w[1] - w[0] == PIPE_SPAWN_INTERVAL)
    }

    #[test]
    fn test_starting_layout() {
        let (field, _) = field(42);

        assert_eq!(field.pipes().len(), PIPE_COUNT);
        for (i, pipe) in field.pipes().iter().enumerate() {
            assert_eq!(pipe.x, SCREEN_WIDTH + i as f32 * PIPE_SPAWN_INTERVAL);
            assert!(!pipe.passed);
            assert!(pipe.gap_y >= CEILING_HEIGHT);
            assert!(pipe.gap_y < CEILING_HEIGHT + GAP_Y_SPAN);
        }
        assert!(spacing_is_uniform(&field));
    }

    #[test]
    fn test_advance_scrolls_left() {
        let (mut field, mut rng) = field(42);
        let before: Vec<f32> = field.pipes().iter().map(|p| p.x).collect();

        field.advance(&mut rng);

        for (pipe, x0) in field.pipes().iter().zip(before) {
            assert_eq!(pipe.x, x0 - PIPE_SPEED);
        }
    }

    #[test]
    fn test_recycle_fires_only_once_fully_offscreen() {
        let (mut field, mut rng) = field(42);
        field.pipes_mut()[0].x = 0.0;

        // 13 ticks: x = -52, trailing edge exactly at 0, still on screen.
        for _ in 0..13 {
            field.advance(&mut rng);
        }
        assert_eq!(field.pipes()[0].x, -52.0);

        // 14th tick crosses the threshold and respawns the pipe.
        field.advance(&mut rng);
        assert!(field.pipes()[0].x > SCREEN_WIDTH);
    }

    #[test]
    fn test_recycle_targets_max_x_plus_interval() {
        let (mut field, mut rng) = field(7);
        field.pipes_mut()[0].x = -PIPE_WIDTH - 1.0;

        let max_before = field
            .pipes()
            .iter()
            .skip(1)
            .map(|p| p.x)
            .fold(f32::MIN, f32::max);

        field.advance(&mut rng);

        // Every pipe (including the respawn target) moved by one speed step
        // before the scan, so the recycled pipe lands one interval behind
        // the shifted maximum.
        assert_eq!(
            field.pipes()[0].x,
            (max_before - PIPE_SPEED) + PIPE_SPAWN_INTERVAL
        );
        assert!(!field.pipes()[0].passed);
    }

    #[test]
    fn test_spacing_survives_many_recycles() {
        let (mut field, mut rng) = field(99);

        // Long enough for every pipe to recycle several times.
        for _ in 0..5000 {
            field.advance(&mut rng);
        }
        assert!(spacing_is_uniform(&field));
    }

    #[test]
    fn test_pipe_scored_exactly_once() {
        let (mut field, mut rng) = field(42);
        field.pipes_mut()[0].x = BIRD_START_X + PIPE_SPEED;

        let first = field.advance(&mut rng);
        assert_eq!(first, 0); // x == BIRD_START_X, not yet past

        let second = field.advance(&mut rng);
        assert_eq!(second, 1);
        assert!(field.pipes()[0].passed);

        let third = field.advance(&mut rng);
        assert_eq!(third, 0);
    }

    #[test]
    fn test_obstacle_rects_cover_world_height() {
        let (field, _) = field(3);

        let rects = field.obstacle_rects();
        assert_eq!(rects.len(), PIPE_COUNT * 2);

        for pipe in field.pipes() {
            let top = pipe.top_rect();
            let bottom = pipe.bottom_rect();
            assert_eq!(top.y, 0.0);
            assert_eq!(top.bottom(), pipe.gap_y);
            assert_eq!(bottom.y, pipe.gap_y + PIPE_GAP);
            assert_eq!(bottom.bottom(), SCREEN_HEIGHT - GROUND_HEIGHT);
        }
    }

    #[test]
    fn test_same_seed_same_layout() {
        let (a, _) = field(1234);
        let (b, _) = field(1234);
        assert_eq!(a, b);
    }

    #[test]
    fn test_reseed_restores_starting_layout() {
        let (mut field, mut rng) = field(42);
        for _ in 0..300 {
            field.advance(&mut rng);
        }

        field.reseed(&mut rng);

        for (i, pipe) in field.pipes().iter().enumerate() {
            assert_eq!(pipe.x, SCREEN_WIDTH + i as f32 * PIPE_SPAWN_INTERVAL);
            assert!(!pipe.passed);
        }
    }
}
