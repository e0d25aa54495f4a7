use std::collections::VecDeque;

use crate::env::{Action, Observation};

use super::player::Player;

/// Replays a fixed list of actions in order. Once the script runs out it
/// falls back to the first legal action.
pub struct ScriptedPlayer {
    script: VecDeque<Action>,
}

impl ScriptedPlayer {
    pub fn new(script: impl IntoIterator<Item = Action>) -> Self {
        ScriptedPlayer {
            script: script.into_iter().collect(),
        }
    }

    /// Actions not yet played.
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl Player for ScriptedPlayer {
    fn name(&self) -> &str {
        "Scripted"
    }

    fn select_action(&mut self, observation: &Observation) -> Action {
        if let Some(action) = self.script.pop_front() {
            return action;
        }
        log::debug!("script exhausted, playing first legal action");
        let mut legal = observation.legal_actions();
        legal.next().expect("No legal actions available")
    }
}
