use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::env::{Action, Observation};
use crate::game::{Board, Piece};

use super::player::Player;

/// One-ply heuristic player.
///
/// Takes an immediately winning placement when there is one; otherwise
/// prefers moves whose hand-over gives the opponent no immediate win. Ties
/// are broken at random.
pub struct GreedyPlayer {
    rng: StdRng,
}

impl GreedyPlayer {
    pub fn new() -> Self {
        GreedyPlayer {
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        GreedyPlayer {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn pick(&mut self, actions: &[Action]) -> Action {
        actions[self.rng.random_range(0..actions.len())]
    }
}

impl Default for GreedyPlayer {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether the opponent could win right away by placing `piece` on `board`.
pub(crate) fn gives_away_win(board: &Board, piece: Piece) -> bool {
    board.free_spots().any(|cell| {
        let mut next = *board;
        next.place(cell, piece).is_ok() && next.winning_line_through(cell).is_some()
    })
}

impl Player for GreedyPlayer {
    fn name(&self) -> &str {
        "Greedy"
    }

    fn select_action(&mut self, observation: &Observation) -> Action {
        let legal: Vec<Action> = observation.legal_actions().collect();
        assert!(!legal.is_empty(), "No legal actions available");

        let Some(held) = observation.piece else {
            // Opening hand-over: no line can be completed yet.
            return self.pick(&legal);
        };

        let mut winning = Vec::new();
        let mut safe = Vec::new();
        for &action in &legal {
            let mut after = observation.board;
            if after.place(action.cell, held).is_err() {
                continue;
            }
            if after.winning_line_through(action.cell).is_some() {
                winning.push(action);
                continue;
            }
            match action.piece {
                Some(next) if gives_away_win(&after, next) => {}
                _ => safe.push(action),
            }
        }

        if !winning.is_empty() {
            self.pick(&winning)
        } else if !safe.is_empty() {
            self.pick(&safe)
        } else {
            self.pick(&legal)
        }
    }

    fn seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Cell;

    /// Row 0 holds three tall pieces with cell 3 open.
    fn board_with_open_tall_row() -> Board {
        let mut board = Board::new();
        for (i, id) in [1, 7, 9].into_iter().enumerate() {
            board.place(Cell::from_index(i), Piece::from_index(id)).unwrap();
        }
        board
    }

    #[test]
    fn test_takes_immediate_win() {
        let obs = Observation {
            board: board_with_open_tall_row(),
            piece: Some(Piece::from_index(15)),
        };
        for seed in 0..10 {
            let mut player = GreedyPlayer::with_seed(seed);
            let action = player.select_action(&obs);
            assert_eq!(action.cell, Cell::from_index(3));
        }
    }

    #[test]
    fn test_never_hands_over_a_winning_piece_when_avoidable() {
        let obs = Observation {
            board: board_with_open_tall_row(),
            piece: Some(Piece::from_index(0)),
        };
        for seed in 0..20 {
            let mut player = GreedyPlayer::with_seed(seed);
            let action = player.select_action(&obs);

            let mut after = obs.board;
            after.place(action.cell, Piece::from_index(0)).unwrap();
            let next = action.piece.expect("pieces remain to hand over");
            assert!(!gives_away_win(&after, next), "handed over {}", next);
        }
    }

    #[test]
    fn test_gives_away_win_detects_open_line() {
        let board = board_with_open_tall_row();
        assert!(gives_away_win(&board, Piece::from_index(15)));
        assert!(!gives_away_win(&board, Piece::from_index(0)));
    }
}
