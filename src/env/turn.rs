use crate::game::{GameState, MoveError};

use super::{Action, LegalActions, Observation, Outcome, RewardConfig, StepInfo, StepResult};

/// One engine driven by a single controller, one move per `step`.
///
/// The first step of an episode only hands over a piece (its cell is
/// ignored). The first invalid move breaks the episode; any step after the
/// episode ended is a logged no-op.
#[derive(Debug, Clone)]
pub struct TurnEnvironment {
    game: GameState,
    rewards: RewardConfig,
    turns: u32,
    broken: bool,
}

impl TurnEnvironment {
    pub fn new(rewards: RewardConfig) -> Self {
        TurnEnvironment {
            game: GameState::initial(),
            rewards,
            turns: 0,
            broken: false,
        }
    }

    /// Start a fresh episode: empty board, no held piece.
    pub fn reset(&mut self) -> Observation {
        self.game = GameState::initial();
        self.turns = 0;
        self.broken = false;
        self.observation()
    }

    pub fn step(&mut self, action: Action) -> StepResult {
        self.turns += 1;
        let mut info = StepInfo {
            turn: self.turns,
            ..Default::default()
        };

        if self.done() {
            log::warn!("step called on a finished episode (turn {}), ignoring", self.turns);
            info.noop = true;
            return self.result(0.0, info);
        }

        log::debug!("received action {}", action);

        let played = match self.game.held() {
            // Opening move: nothing to place yet, only the hand-over counts.
            None => match action.piece {
                Some(piece) => self.game.choose_first(piece),
                None => Err(MoveError::MissingHandOver),
            },
            Some(held) => self.game.play(held, action.cell, action.piece),
        };

        if let Err(err) = played {
            log::debug!("invalid move {}: {}", action, err);
            self.broken = true;
            info.invalid = true;
        } else {
            info.win = self.game.game_over();
            info.draw = self.game.draw();
        }

        let reward = Outcome::from_info(&info).reward(&self.rewards);
        self.result(reward, info)
    }

    pub fn observation(&self) -> Observation {
        Observation {
            board: *self.game.board(),
            piece: self.game.held(),
        }
    }

    /// The episode ended through an invalid move, a win or a draw.
    pub fn done(&self) -> bool {
        self.broken || self.game.is_terminal()
    }

    pub fn broken(&self) -> bool {
        self.broken
    }

    pub fn turns(&self) -> u32 {
        self.turns
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn rewards(&self) -> &RewardConfig {
        &self.rewards
    }

    pub fn legal_actions(&self) -> LegalActions {
        if self.done() {
            LegalActions::none()
        } else {
            self.observation().legal_actions()
        }
    }

    /// Human-readable board, held piece and free pieces.
    pub fn render(&self) -> String {
        self.observation().to_string()
    }

    fn result(&self, reward: f32, info: StepInfo) -> StepResult {
        StepResult {
            observation: self.observation(),
            reward,
            done: self.done(),
            info,
        }
    }
}

impl Default for TurnEnvironment {
    fn default() -> Self {
        Self::new(RewardConfig::default())
    }
}
