//! # ML Quarto
//!
//! A Quarto rule engine exposed as a turn-by-turn reward environment for
//! learning agents, with a relay that plays a built-in opponent in between
//! controller moves.
//!
//! ## Modules
//!
//! - [`game`]: pieces, board, win detection and the game state machine
//! - [`env`]: turn environment, reward classification, opponent relay
//! - [`ai`]: player trait, random/greedy/scripted/human players, flat encodings
//! - [`simulation`]: episode runner, rolling metrics, batch simulator
//! - [`config`]: TOML configuration loading and validation
//! - [`error`]: structured error types

pub mod ai;
pub mod config;
pub mod env;
pub mod error;
pub mod game;
pub mod simulation;
