#![warn(missing_debug_implementations)]

//! An [Ultimate tic-tac-toe](https://en.wikipedia.org/wiki/Ultimate_tic-tac-toe) rules engine
//! and a bot to play against.
//!
//! # Features
//!
//! * The rules, as [GameState](crate::games::uttt::GameState), which implements the generic
//!     [Board](crate::board::Board) trait. All move validation lives here.
//! * Game-playing algorithms:
//!     * [RandomBot](crate::ai::simple::RandomBot), which simply picks a random move.
//!     * [minimax](crate::ai::minimax::minimax), alpha-beta negamax with a customizable heuristic,
//!         with [UtttHeuristic](crate::heuristic::uttt::UtttHeuristic) as the heuristic for this game.
//!     * [choose_move](crate::ai::difficulty::choose_move), the bot played against humans,
//!         which picks a search depth and randomness based on a [Difficulty](crate::ai::difficulty::Difficulty).
//! * A [GameController](crate::controller::GameController) that sequences turns between a human and the bot,
//!     optionally searching on a background thread, and accepts state pushed by a remote peer.
//! * A bot vs bot game runner to compare difficulty levels, see [bot_game](crate::util::bot_game).
//! * Simple game statistics (perft, random game length) which can be used to test the rules.
//!
//! # Examples
//!
//! ## List the available moves on a board and play a random one.
//!
//! ```
//! # use ultimate_ttt::board::{BoardMoves, Board};
//! # use ultimate_ttt::games::uttt::GameState;
//! # use internal_iterator::InternalIterator;
//! # let mut rng = rand::thread_rng();
//! let mut board = GameState::new();
//! println!("{}", board);
//!
//! board.available_moves().unwrap().for_each(|mv| {
//!     println!("{:?}", mv)
//! });
//!
//! let mv = board.random_available_move(&mut rng).unwrap();
//! println!("Picked move {:?}", mv);
//! board.play(mv).unwrap();
//! println!("{}", board);
//! ```
//!
//! ## Play against the bot
//!
//! ```
//! # use ultimate_ttt::board::Mark;
//! # use ultimate_ttt::config::ControllerConfig;
//! # use ultimate_ttt::controller::GameController;
//! # use ultimate_ttt::games::uttt::Move;
//! let mut controller = GameController::with_seed(ControllerConfig::default(), 0).unwrap();
//!
//! controller.submit_move(Mark::X, Move::new(4, 4)).unwrap();
//! assert!(controller.is_bot_turn());
//!
//! let reply = controller.play_bot_turn().unwrap();
//! assert_eq!(reply.sub_board, 4);
//! println!("{}", controller.state());
//! ```

pub mod board;

pub mod wdl;

pub mod ai;

pub mod games;

pub mod heuristic;

pub mod config;

pub mod controller;

pub mod util;
