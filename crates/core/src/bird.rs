//! Bird physics: gravity integration and boundary clamping.

use tui_flappy_types::{
    BIRD_HEIGHT, BIRD_START_X, BIRD_WIDTH, CEILING_HEIGHT, GRAVITY, GROUND_HEIGHT, JUMP_STRENGTH,
    RectF, SCREEN_HEIGHT,
};

/// Highest y the bird can stand at: resting on the ground strip.
pub const STANDING_Y: f32 = SCREEN_HEIGHT - GROUND_HEIGHT - BIRD_HEIGHT;

/// The player-controlled bird. `x` is fixed after spawn; only `y` and
/// `velocity` evolve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bird {
    pub x: f32,
    pub y: f32,
    pub velocity: f32,
}

impl Bird {
    /// Bird at the fixed start position with zero velocity.
    pub fn new() -> Self {
        Self {
            x: BIRD_START_X,
            y: SCREEN_HEIGHT / 2.0,
            velocity: 0.0,
        }
    }

    /// Set the upward jump impulse.
    pub fn flap(&mut self) {
        self.velocity = JUMP_STRENGTH;
    }

    /// One physics tick: accelerate, integrate, clamp.
    ///
    /// Clamping zeroes the velocity so the bird does not accumulate speed
    /// while pinned against the ceiling or standing on the ground.
    pub fn step(&mut self) {
        self.velocity += GRAVITY;
        self.y += self.velocity;

        if self.y < CEILING_HEIGHT {
            self.y = CEILING_HEIGHT;
            self.velocity = 0.0;
        }

        if self.y > STANDING_Y {
            self.y = STANDING_Y;
            self.velocity = 0.0;
        }
    }

    /// Bounding box for collision and rendering.
    pub fn rect(&self) -> RectF {
        RectF::new(self.x, self.y, BIRD_WIDTH, BIRD_HEIGHT)
    }

    /// Ground contact is inclusive: resting on the ground counts.
    pub fn on_ground(&self) -> bool {
        self.y + BIRD_HEIGHT >= SCREEN_HEIGHT - GROUND_HEIGHT
    }
}

impl Default for Bird {
    fn default() -> Self {
        Self::new()
    }
}
