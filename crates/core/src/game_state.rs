//! Game state module - the complete simulation owned by the loop driver.
//!
//! Ties together bird physics, the pipe field, scoring and the
//! Playing/GameOver machine. One [`GameState::tick`] call advances the world
//! by exactly one fixed timestep; [`GameState::apply_action`] feeds discrete
//! player intents in between ticks.

use tui_flappy_types::{GameAction, Phase, RectF};

use crate::bird::Bird;
use crate::pipes::{Pipe, PipeField};
use crate::rng::SimpleRng;

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    bird: Bird,
    pipes: PipeField,
    score: u32,
    phase: Phase,
    paused: bool,
    rng: SimpleRng,
}

impl GameState {
    /// Create a new game with the given RNG seed, in the starting layout.
    pub fn new(seed: u32) -> Self {
        let mut rng = SimpleRng::new(seed);
        let pipes = PipeField::new(&mut rng);

        Self {
            bird: Bird::new(),
            pipes,
            score: 0,
            phase: Phase::Playing,
            paused: false,
            rng,
        }
    }

    pub fn bird(&self) -> &Bird {
        &self.bird
    }

    pub fn pipes(&self) -> &[Pipe] {
        self.pipes.pipes()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    /// Main game tick: bird physics, pipe scrolling/scoring, collision.
    ///
    /// Frozen (returns `false` without touching state) while paused or game
    /// over; the driver keeps rendering those frames, it just stops
    /// simulating them.
    pub fn tick(&mut self) -> bool {
        if self.paused || self.game_over() {
            return false;
        }

        self.bird.step();
        self.score += self.pipes.advance(&mut self.rng);

        if self.collided() {
            self.phase = Phase::GameOver;
        }

        true
    }

    /// Apply a player action. Returns `true` if it changed anything.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::Flap => {
                // A flap on the game-over screen restarts the run and counts
                // as the first flap of the new one.
                if self.game_over() {
                    self.reset();
                }
                self.bird.flap();
                true
            }
            GameAction::Pause => {
                if self.game_over() {
                    return false;
                }
                self.paused = !self.paused;
                true
            }
            GameAction::Restart => {
                self.reset();
                true
            }
        }
    }

    /// Return to the starting layout: bird re-spawned, score cleared, pipes
    /// re-seeded with fresh gaps. The RNG keeps its sequence, so successive
    /// runs see different pipe layouts while the whole session stays
    /// reproducible from the initial seed.
    pub fn reset(&mut self) {
        self.bird = Bird::new();
        self.pipes.reseed(&mut self.rng);
        self.score = 0;
        self.phase = Phase::Playing;
        self.paused = false;
    }

    /// Discrete overlap test of the bird against every obstacle.
    ///
    /// Pipes use strict rectangle intersection; ground contact is inclusive
    /// because the physics clamp parks the bird exactly on the ground line.
    pub fn collided(&self) -> bool {
        let bird = self.bird.rect();

        self.bird.on_ground()
            || self
                .pipes
                .obstacle_rects()
                .iter()
                .any(|rect| bird.intersects(rect))
    }

    /// Obstacle rectangles for the render collaborator.
    pub fn obstacle_rects(&self) -> impl Iterator<Item = RectF> + '_ {
        self.pipes.obstacle_rects().into_iter()
    }

    #[cfg(test)]
    pub(crate) fn pipes_field_mut(&mut self) -> &mut PipeField {
        &mut self.pipes
    }

    #[cfg(test)]
    pub(crate) fn bird_mut(&mut self) -> &mut Bird {
        &mut self.bird
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}
