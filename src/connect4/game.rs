//! Turn state machine

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

use super::board::{Board, Disc};
use super::drop::DropAnimation;
use crate::schedule::Scheduler;

/// Delay before the computer opponent drops its disc (seconds)
pub const OPPONENT_DELAY: f32 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Mode {
    /// `Disc::Second` is played by the computer
    OnePlayer,
    TwoPlayer,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Phase {
    AwaitingMove,
    Dropping(DropAnimation),
    Won(Disc),
    Draw,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MatchEvent {
    DiscLanded {
        column: usize,
        row: usize,
        disc: Disc,
    },
    TurnChanged(Disc),
    Won(Disc),
    Draw,
}

/// Deferred match actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MatchAction {
    OpponentMove(usize),
}

/// One game of Connect-Four
pub struct Match {
    board: Board,
    mode: Mode,
    phase: Phase,
    turn: Disc,
    /// Bumped on restart; scheduled moves from older matches are dropped
    generation: u64,
    rng: Pcg32,
    scheduler: Scheduler<MatchAction>,
    events: Vec<MatchEvent>,
}

impl Match {
    pub fn new(mode: Mode, seed: u64) -> Self {
        log::info!("Connect-Four match started ({:?}, seed {})", mode, seed);
        Self {
            board: Board::new(),
            mode,
            phase: Phase::AwaitingMove,
            turn: Disc::First,
            generation: 0,
            rng: Pcg32::seed_from_u64(seed),
            scheduler: Scheduler::new(),
            events: Vec::new(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn turn(&self) -> Disc {
        self.turn
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, Phase::Won(_) | Phase::Draw)
    }

    /// Is the side to move controlled by the computer
    pub fn is_computer_turn(&self) -> bool {
        self.mode == Mode::OnePlayer && self.turn == Disc::Second
    }

    /// Human picks a column; returns whether a drop started
    pub fn select_column(&mut self, column: usize) -> bool {
        if self.is_computer_turn() {
            return false;
        }
        self.start_drop(column)
    }

    /// Advance animations and scheduled opponent moves by `dt` seconds
    pub fn advance(&mut self, dt: f32) {
        for action in self.scheduler.advance(dt, self.generation) {
            match action {
                MatchAction::OpponentMove(column) => {
                    self.start_drop(column);
                }
            }
        }

        let Phase::Dropping(mut falling) = self.phase else {
            return;
        };
        if falling.advance(dt) {
            self.land(falling);
        } else {
            self.phase = Phase::Dropping(falling);
        }
    }

    /// Empty the board and hand the first move back to `Disc::First`
    pub fn restart(&mut self) {
        self.board.clear();
        self.phase = Phase::AwaitingMove;
        self.turn = Disc::First;
        self.generation += 1;
        log::info!("Connect-Four restarted (generation {})", self.generation);
    }

    pub fn drain_events(&mut self) -> Vec<MatchEvent> {
        std::mem::take(&mut self.events)
    }

    fn start_drop(&mut self, column: usize) -> bool {
        if self.phase != Phase::AwaitingMove {
            return false;
        }
        let Some(row) = self.board.lowest_empty_row(column) else {
            log::debug!("Column {} is full", column);
            return false;
        };
        self.phase = Phase::Dropping(DropAnimation::new(column, row, self.turn));
        true
    }

    fn land(&mut self, falling: DropAnimation) {
        let Some(row) = self.board.place(falling.column, falling.disc) else {
            self.phase = Phase::AwaitingMove;
            return;
        };
        self.events.push(MatchEvent::DiscLanded {
            column: falling.column,
            row,
            disc: falling.disc,
        });

        if self.board.is_win_at(falling.column, row, falling.disc) {
            log::info!("{:?} wins", falling.disc);
            self.phase = Phase::Won(falling.disc);
            self.events.push(MatchEvent::Won(falling.disc));
            return;
        }
        if self.board.is_full() {
            log::info!("Board full, draw");
            self.phase = Phase::Draw;
            self.events.push(MatchEvent::Draw);
            return;
        }

        self.turn = self.turn.other();
        self.phase = Phase::AwaitingMove;
        self.events.push(MatchEvent::TurnChanged(self.turn));

        if self.is_computer_turn() {
            self.schedule_opponent();
        }
    }

    fn schedule_opponent(&mut self) {
        let open = self.board.open_columns();
        if open.is_empty() {
            return;
        }
        let column = open[self.rng.random_range(0..open.len())];
        log::debug!("Opponent plays column {} in {}s", column, OPPONENT_DELAY);
        self.scheduler.schedule(
            OPPONENT_DELAY,
            self.generation,
            MatchAction::OpponentMove(column),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connect4::board::COLUMNS;
    use crate::connect4::drop::DROP_DURATION;

    /// Drop a disc and let it land
    fn play(game: &mut Match, column: usize) {
        assert!(game.select_column(column));
        game.advance(DROP_DURATION);
    }

    #[test]
    fn test_two_player_alternates() {
        let mut game = Match::new(Mode::TwoPlayer, 1);
        assert_eq!(game.turn(), Disc::First);
        play(&mut game, 3);
        assert_eq!(game.turn(), Disc::Second);
        play(&mut game, 3);
        assert_eq!(game.board().get(3, 0), Some(Disc::First));
        assert_eq!(game.board().get(3, 1), Some(Disc::Second));
        assert_eq!(
            game.drain_events(),
            vec![
                MatchEvent::DiscLanded {
                    column: 3,
                    row: 0,
                    disc: Disc::First
                },
                MatchEvent::TurnChanged(Disc::Second),
                MatchEvent::DiscLanded {
                    column: 3,
                    row: 1,
                    disc: Disc::Second
                },
                MatchEvent::TurnChanged(Disc::First),
            ]
        );
    }

    #[test]
    fn test_input_ignored_while_dropping() {
        let mut game = Match::new(Mode::TwoPlayer, 2);
        assert!(game.select_column(0));
        assert!(!game.select_column(1));
        game.advance(0.5);
        assert!(matches!(game.phase(), Phase::Dropping(_)));
        assert_eq!(game.board().disc_count(), 0);
        game.advance(0.5);
        assert_eq!(game.phase(), Phase::AwaitingMove);
        assert_eq!(game.board().disc_count(), 1);
    }

    #[test]
    fn test_full_column_is_noop() {
        let mut game = Match::new(Mode::TwoPlayer, 3);
        for _ in 0..6 {
            play(&mut game, 0);
        }
        let turn = game.turn();
        assert!(!game.select_column(0));
        assert_eq!(game.phase(), Phase::AwaitingMove);
        assert_eq!(game.turn(), turn);
        assert!(!game.select_column(COLUMNS));
    }

    #[test]
    fn test_vertical_win_ends_match() {
        let mut game = Match::new(Mode::TwoPlayer, 4);
        for _ in 0..3 {
            play(&mut game, 0);
            play(&mut game, 1);
        }
        play(&mut game, 0);
        assert_eq!(game.phase(), Phase::Won(Disc::First));
        assert!(game.is_over());
        assert!(game.drain_events().contains(&MatchEvent::Won(Disc::First)));
        assert!(!game.select_column(2));
    }

    #[test]
    fn test_draw_when_board_fills() {
        let mut game = Match::new(Mode::TwoPlayer, 5);
        // Column order that fills the board without four in a line
        let order = [0, 1, 0, 1, 1, 0, 1, 0, 0, 1, 0, 1];
        for pair in [[0, 1], [2, 3], [4, 5]] {
            for &k in &order {
                play(&mut game, pair[k]);
            }
        }
        for _ in 0..6 {
            play(&mut game, 6);
        }
        assert_eq!(game.phase(), Phase::Draw);
        assert!(game.board().is_full());
    }

    #[test]
    fn test_computer_answers_after_delay() {
        let mut game = Match::new(Mode::OnePlayer, 6);
        play(&mut game, 3);
        assert!(game.is_computer_turn());
        // Human input is refused on the computer's turn
        assert!(!game.select_column(2));

        game.advance(0.5);
        assert_eq!(game.phase(), Phase::AwaitingMove);
        game.advance(0.5);
        assert!(matches!(
            game.phase(),
            Phase::Dropping(DropAnimation {
                disc: Disc::Second,
                ..
            })
        ));
        game.advance(DROP_DURATION);
        assert_eq!(game.turn(), Disc::First);
        assert_eq!(game.board().disc_count(), 2);
    }

    #[test]
    fn test_restart_discards_pending_computer_move() {
        let mut game = Match::new(Mode::OnePlayer, 7);
        play(&mut game, 3);
        game.restart();
        assert_eq!(game.generation(), 1);
        assert_eq!(game.turn(), Disc::First);
        game.advance(2.0);
        assert_eq!(game.phase(), Phase::AwaitingMove);
        assert_eq!(game.board().disc_count(), 0);
    }

    #[test]
    fn test_computer_is_deterministic_per_seed() {
        let run = |seed| {
            let mut game = Match::new(Mode::OnePlayer, seed);
            for column in [0, 6, 0, 6] {
                if game.is_over() {
                    break;
                }
                game.select_column(column);
                for _ in 0..40 {
                    game.advance(0.1);
                }
            }
            game.drain_events()
        };
        assert_eq!(run(42), run(42));
    }
}
