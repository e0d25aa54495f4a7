use std::io::{BufRead, Write};

use crate::env::{Action, Observation};
use crate::game::{Cell, Piece};

use super::player::Player;

/// A person at a terminal. Prints the position, then reads `<cell> <piece>`
/// lines until a legal action is entered.
pub struct HumanPlayer<R, W> {
    input: R,
    output: W,
    name: String,
}

impl<R: BufRead, W: Write> HumanPlayer<R, W> {
    pub fn new(input: R, output: W) -> Self {
        HumanPlayer {
            input,
            output,
            name: "Human".to_string(),
        }
    }

    fn prompt(&mut self, observation: &Observation) -> std::io::Result<()> {
        write!(self.output, "\n{}", observation)?;
        if observation.piece.is_none() {
            write!(self.output, "Choose a piece for your opponent: ")?;
        } else {
            write!(self.output, "Your move (<row,col> <piece>): ")?;
        }
        self.output.flush()
    }

    fn parse(&self, line: &str, observation: &Observation) -> Option<Action> {
        let action = if observation.piece.is_none() {
            // Opening: only the hand-over matters.
            let piece = line.trim().parse::<Piece>().ok()?;
            Action::new(Cell::from_index(0), Some(piece))
        } else {
            line.parse::<Action>().ok()?
        };
        let legal = observation.legal_actions().any(|a| a == action);
        legal.then_some(action)
    }
}

impl<R: BufRead, W: Write> Player for HumanPlayer<R, W> {
    fn name(&self) -> &str {
        &self.name
    }

    fn select_action(&mut self, observation: &Observation) -> Action {
        loop {
            if let Err(err) = self.prompt(observation) {
                log::warn!("failed to write prompt: {}", err);
            }
            let mut line = String::new();
            match self.input.read_line(&mut line) {
                Ok(0) | Err(_) => {
                    log::warn!("input closed, playing first legal action");
                    let mut legal = observation.legal_actions();
                    return legal.next().expect("No legal actions available");
                }
                Ok(_) => {}
            }
            if let Some(action) = self.parse(&line, observation) {
                return action;
            }
            if let Err(err) = writeln!(self.output, "Illegal or unreadable move: '{}'", line.trim()) {
                log::warn!("failed to write reprompt: {}", err);
            }
        }
    }
}
