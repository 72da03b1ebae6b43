//! Presentation collaborator
//!
//! The simulation never draws or touches UI itself; the host implements
//! [`Presenter`] and the app pushes state into it once per frame.

use crate::sim::GameState;

/// Host-side rendering and HUD
pub trait Presenter {
    /// Draw the current frame (scene graph and camera live in `state`)
    fn render(&mut self, state: &GameState);

    /// Update the score readout
    fn show_score(&mut self, score: u64);

    /// Show the game-over overlay with the final score
    fn show_game_over(&mut self, score: u64);

    /// Remove the game-over overlay
    fn hide_game_over(&mut self);
}

/// Presenter that ignores everything (headless runs, tests)
#[derive(Debug, Clone, Copy, Default)]
pub struct NullPresenter;

impl Presenter for NullPresenter {
    fn render(&mut self, _state: &GameState) {}

    fn show_score(&mut self, _score: u64) {}

    fn show_game_over(&mut self, _score: u64) {}

    fn hide_game_over(&mut self) {}
}
