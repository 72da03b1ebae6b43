//! Host-facing game loop glue
//!
//! [`RunnerApp`] owns the simulation state, the frame clock, pending input
//! and the presenter. The host calls the input methods from its event
//! handlers and [`RunnerApp::update`] once per displayed frame.

use crate::platform::{FrameClock, Presenter};
use crate::schedule::Scheduler;
use crate::sim::{GameEvent, GameState, TickInput, tick};
use crate::tuning::Tuning;

/// Deferred host-level actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    /// Start the next run after the game-over pause
    Restart,
}

/// One runner session bound to a presenter
pub struct RunnerApp<P: Presenter> {
    pub state: GameState,
    presenter: P,
    clock: FrameClock,
    input: TickInput,
    scheduler: Scheduler<AppAction>,
    /// Restart automatically this long after game over
    auto_restart_delay: Option<f32>,
    game_over_shown: bool,
    runs_finished: u32,
    best_score: u64,
}

impl<P: Presenter> RunnerApp<P> {
    pub fn new(seed: u64, tuning: Tuning, presenter: P) -> Self {
        log::info!("Runner initialized with seed: {}", seed);
        Self {
            state: GameState::new(seed, tuning),
            presenter,
            clock: FrameClock::default(),
            input: TickInput::default(),
            scheduler: Scheduler::new(),
            auto_restart_delay: None,
            game_over_shown: false,
            runs_finished: 0,
            best_score: 0,
        }
    }

    /// Restart on our own `delay` seconds after each game over
    pub fn with_auto_restart(mut self, delay: f32) -> Self {
        self.auto_restart_delay = Some(delay);
        self
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn runs_finished(&self) -> u32 {
        self.runs_finished
    }

    pub fn best_score(&self) -> u64 {
        self.best_score
    }

    /// Jump command (space/tap)
    pub fn jump(&mut self) {
        self.input.jump = true;
    }

    /// Pointer moved; `x` is normalized to [-1, 1] across the viewport
    pub fn pointer(&mut self, x: f32) {
        self.input.pointer_x = Some(x);
    }

    /// Restart command; ignored unless the run is over
    pub fn restart(&mut self) {
        if self.state.is_game_over() {
            self.input.restart = true;
        }
    }

    pub fn set_autopilot(&mut self, enabled: bool) {
        self.input.autopilot = enabled;
    }

    /// Run the simulation for one displayed frame and present it
    pub fn update(&mut self, frame_dt: f32) {
        let steps = self.clock.accumulate(frame_dt);
        for _ in 0..steps {
            tick(&mut self.state, &self.input, self.clock.dt());
            // Clear one-shot inputs after processing
            self.input.jump = false;
            self.input.restart = false;
        }

        for event in self.state.drain_events() {
            self.handle_event(event);
        }

        for action in self.scheduler.advance(frame_dt, self.state.generation) {
            match action {
                AppAction::Restart => {
                    self.input.restart = true;
                }
            }
        }

        self.presenter.show_score(self.state.display_score());
        self.presenter.render(&self.state);
    }

    fn handle_event(&mut self, event: GameEvent) {
        match event {
            GameEvent::GameOver { score, .. } => {
                self.runs_finished += 1;
                self.best_score = self.best_score.max(score);
                if !self.game_over_shown {
                    self.presenter.show_game_over(score);
                    self.game_over_shown = true;
                }
                if let Some(delay) = self.auto_restart_delay {
                    self.scheduler
                        .schedule(delay, self.state.generation, AppAction::Restart);
                }
            }
            GameEvent::Restarted { .. } => {
                if self.game_over_shown {
                    self.presenter.hide_game_over();
                    self.game_over_shown = false;
                }
                self.clock.reset();
            }
            GameEvent::SegmentRecycled { .. } => {}
        }
    }
}
