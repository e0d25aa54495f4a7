use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::ai::{Player, PlayerKind};

use super::{Action, LegalActions, Observation, Outcome, StepInfo, StepResult, TurnEnvironment};

/// Who makes the opening hand-over of an episode.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum FirstMover {
    /// Fair coin flip on every reset.
    #[default]
    Random,
    Controller,
    Opponent,
}

/// Relay settings: which built-in opponent to play against and who opens.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RelayConfig {
    pub opponent: PlayerKind,
    pub first_mover: FirstMover,
    /// Seed for the coin flip and the opponent; fresh entropy when unset.
    pub seed: Option<u64>,
}

impl Default for RelayConfig {
    fn default() -> Self {
        RelayConfig {
            opponent: PlayerKind::Random,
            first_mover: FirstMover::Random,
            seed: None,
        }
    }
}

/// Plays the opponent's moves inside `step` so the controller sees a
/// single-agent episode, always from its own side of the table.
///
/// When the opponent's move ends the episode the reward is re-expressed from
/// the controller's point of view: an opponent win is a loss, an opponent
/// forfeit is worth nothing, a draw is shared.
pub struct OpponentRelay<P> {
    env: TurnEnvironment,
    opponent: P,
    first_mover: FirstMover,
    rng: StdRng,
    opponent_first: bool,
    /// Result of an opening move that ended the episode, handed out by the
    /// next `step`.
    opening_result: Option<StepResult>,
}

impl<P: Player> OpponentRelay<P> {
    pub fn new(env: TurnEnvironment, opponent: P, first_mover: FirstMover) -> Self {
        OpponentRelay {
            env,
            opponent,
            first_mover,
            rng: StdRng::from_os_rng(),
            opponent_first: false,
            opening_result: None,
        }
    }

    /// Seed the coin flip and the opponent.
    pub fn seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
        self.opponent.seed(seed.wrapping_add(1));
    }

    /// Start a new episode. If the opponent opens, its hand-over is played
    /// before control returns. An opening that ends the episode is kept in
    /// [`opening_result`](Self::opening_result).
    pub fn reset(&mut self) -> Observation {
        let observation = self.env.reset();
        self.opponent.reset(&observation.board);
        self.opening_result = None;

        self.opponent_first = match self.first_mover {
            FirstMover::Random => self.rng.random_bool(0.5),
            FirstMover::Controller => false,
            FirstMover::Opponent => true,
        };

        if self.opponent_first {
            let action = self.opponent.select_action(&observation);
            log::debug!("{} opens with {}", self.opponent.name(), action);
            let theirs = self.env.step(action);
            if theirs.done {
                log::warn!("opponent ended the episode on its opening move");
                let info = StepInfo {
                    turn: theirs.info.turn,
                    ..Default::default()
                };
                self.opening_result = Some(Self::ended_by_opponent(&theirs, info));
            }
        }

        self.env.observation()
    }

    pub fn step(&mut self, action: Action) -> StepResult {
        if let Some(result) = self.opening_result.take() {
            log::debug!("episode already ended on the opening, ignoring {}", action);
            return result;
        }

        let mut own = self.env.step(action);
        if own.done {
            if !own.info.noop {
                own.info.winner = Outcome::from_info(&own.info).winner_for_own_move();
            }
            return own;
        }

        let reply = self.opponent.select_action(&own.observation);
        log::debug!("{} replies with {}", self.opponent.name(), reply);
        let theirs = self.env.step(reply);

        let mut info = own.info;
        info.turn = theirs.info.turn;

        if !theirs.done {
            return StepResult {
                observation: theirs.observation,
                reward: own.reward,
                done: false,
                info,
            };
        }

        Self::ended_by_opponent(&theirs, info)
    }

    /// Controller's view of an opponent step that ended the episode.
    fn ended_by_opponent(theirs: &StepResult, mut info: StepInfo) -> StepResult {
        let outcome = Outcome::from_info(&theirs.info);
        info.winner = outcome.winner_for_opponent_move();
        StepResult {
            observation: theirs.observation,
            reward: outcome.controller_reward(theirs.reward),
            done: true,
            info,
        }
    }

    /// Set when the opponent's opening move ended the episode, until the
    /// next `step` or `reset`.
    pub fn opening_result(&self) -> Option<StepResult> {
        self.opening_result
    }

    pub fn observation(&self) -> Observation {
        self.env.observation()
    }

    pub fn done(&self) -> bool {
        self.env.done()
    }

    pub fn legal_actions(&self) -> LegalActions {
        self.env.legal_actions()
    }

    /// Whether the opponent opened the current episode.
    pub fn opponent_first(&self) -> bool {
        self.opponent_first
    }

    pub fn env(&self) -> &TurnEnvironment {
        &self.env
    }

    pub fn opponent(&self) -> &P {
        &self.opponent
    }

    pub fn render(&self) -> String {
        self.env.render()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::{RandomPlayer, ScriptedPlayer};
    use crate::env::Winner;
    use crate::game::test_support::DRAW_BOARD;
    use crate::game::{Cell, Piece};

    fn act(index: usize, piece: Option<usize>) -> Action {
        Action::new(Cell::from_index(index), piece.map(Piece::from_index))
    }

    fn relay(script: Vec<Action>, first_mover: FirstMover) -> OpponentRelay<ScriptedPlayer> {
        OpponentRelay::new(
            TurnEnvironment::default(),
            ScriptedPlayer::new(script),
            first_mover,
        )
    }

    #[test]
    fn test_opponent_forfeit_scores_zero_for_agent() {
        // The opponent tries to hand over the piece it is placing.
        let mut relay = relay(vec![act(0, Some(1))], FirstMover::Controller);
        relay.reset();

        let result = relay.step(act(0, Some(1)));
        assert_eq!(result.reward, 0.0);
        assert!(result.reward.is_sign_positive());
        assert!(result.done);
        assert_eq!(result.info.winner, Some(Winner::Agent));
    }

    #[test]
    fn test_opponent_invalid_opening_is_a_forfeit() {
        // The opening must hand over a piece.
        let mut relay = relay(vec![act(0, None)], FirstMover::Opponent);
        relay.reset();
        assert!(relay.done());

        let opening = relay.opening_result().unwrap();
        assert_eq!(opening.info.winner, Some(Winner::Agent));
        assert_eq!(opening.info.turn, 1);

        let result = relay.step(act(0, Some(1)));
        assert!(result.done);
        assert!(!result.info.noop);
        assert_eq!(result.info.winner, Some(Winner::Agent));
        assert_eq!(result.reward, 0.0);
        assert!(result.reward.is_sign_positive());
        assert!(relay.opening_result().is_none());

        // Only the first step reports the forfeit.
        let after = relay.step(act(0, Some(1)));
        assert!(after.info.noop);
        assert_eq!(after.info.winner, None);
    }

    #[test]
    fn test_reset_clears_opening_result() {
        let mut relay = relay(vec![act(0, None)], FirstMover::Opponent);
        relay.reset();
        assert!(relay.opening_result().is_some());

        relay.reset();
        assert!(relay.opening_result().is_none());
        assert!(!relay.done());
    }

    #[test]
    fn test_opponent_win_is_negated() {
        let mut relay = relay(
            vec![act(0, Some(7)), act(2, Some(2)), act(3, Some(3))],
            FirstMover::Controller,
        );
        relay.reset();

        let first = relay.step(act(0, Some(1)));
        assert!(!first.done);
        assert_eq!(first.info.winner, None);
        assert_eq!(first.reward, 0.0);

        let second = relay.step(act(1, Some(9)));
        assert!(!second.done);

        let last = relay.step(act(4, Some(15)));
        assert_eq!(last.reward, -100.0);
        assert!(last.done);
        assert_eq!(last.info.winner, Some(Winner::Env));
    }

    #[test]
    fn test_controller_win_is_reported_directly() {
        let mut relay = relay(
            vec![act(0, Some(7)), act(2, Some(15))],
            FirstMover::Controller,
        );
        relay.reset();

        relay.step(act(0, Some(1)));
        relay.step(act(1, Some(9)));
        let result = relay.step(act(3, Some(2)));

        assert_eq!(result.reward, 100.0);
        assert!(result.done);
        assert!(result.info.win);
        assert_eq!(result.info.winner, Some(Winner::Agent));
    }

    #[test]
    fn test_controller_invalid_move_skips_opponent() {
        let mut relay = relay(
            vec![act(5, Some(6)), act(6, Some(3))],
            FirstMover::Controller,
        );
        relay.reset();
        relay.step(act(0, Some(1)));

        // Cell 5 is now taken and piece 6 is held by the controller.
        let result = relay.step(act(5, Some(2)));
        assert_eq!(result.reward, -200.0);
        assert!(result.done);
        assert!(result.info.invalid);
        assert_eq!(result.info.winner, Some(Winner::Env));
        assert_eq!(relay.opponent().remaining(), 1);
    }

    #[test]
    fn test_opponent_draw_keeps_draw_reward() {
        let next = |i: usize| DRAW_BOARD.get(i + 1).copied();
        let mut script = vec![act(0, Some(DRAW_BOARD[0]))];
        script.extend((1..16).step_by(2).map(|i| act(i, next(i))));

        let mut relay = relay(script, FirstMover::Opponent);
        let obs = relay.reset();
        assert!(relay.opponent_first());
        assert_eq!(obs.piece, Some(Piece::from_index(DRAW_BOARD[0])));

        let mut last = None;
        for i in (0..16).step_by(2) {
            last = Some(relay.step(act(i, next(i))));
        }
        let result = last.unwrap();
        assert_eq!(result.reward, 20.0);
        assert!(result.done);
        assert_eq!(result.info.winner, Some(Winner::Draw));
    }

    #[test]
    fn test_random_first_mover_uses_both_sides() {
        let mut relay = OpponentRelay::new(
            TurnEnvironment::default(),
            RandomPlayer::new(),
            FirstMover::Random,
        );
        relay.seed(7);
        let mut opponent_first = 0;
        for _ in 0..64 {
            let obs = relay.reset();
            if relay.opponent_first() {
                opponent_first += 1;
                assert!(obs.piece.is_some());
            } else {
                assert!(obs.piece.is_none());
            }
        }
        assert!(opponent_first > 0 && opponent_first < 64);
    }

    #[test]
    fn test_random_episode_ends_with_winner() {
        let mut relay = OpponentRelay::new(
            TurnEnvironment::default(),
            RandomPlayer::with_seed(3),
            FirstMover::Random,
        );
        relay.seed(11);
        let mut controller = RandomPlayer::with_seed(5);
        let mut obs = relay.reset();
        let mut result = None;
        while !relay.done() {
            let step = relay.step(controller.select_action(&obs));
            obs = step.observation;
            result = Some(step);
        }
        let result = result.unwrap();
        assert!(result.done);
        assert!(result.info.winner.is_some());
        assert!(!result.info.invalid);
    }
}
