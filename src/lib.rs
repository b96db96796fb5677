#![warn(missing_debug_implementations)]
#![allow(clippy::new_without_default)]

//! A [Position](crate::position::Position) abstraction for deterministic two player games,
//! with a generic minimax search on top of it.
//! Searches and other utilities only need to be written once and work for any game.
//!
//! # Features
//!
//! The main game is "chairs in a circle" as [ChairBoard](crate::games::chairs::ChairBoard):
//! players take turns seating their people on a ring of chairs,
//! never directly next to a person of the other player. Whoever seats the last person wins.
//!
//! There is also [DummyGame](crate::games::dummy::DummyGame),
//! a game that is constructed from an explicit game tree, useful for testing searches.
//!
//! Utilities in this crate that work for any [Position](crate::position::Position):
//! * Players, see [Bot](crate::ai::Bot):
//!     * [MiniMaxBot](crate::ai::minimax::MiniMaxBot),
//!         which picks the best move as evaluated by plain minimax with a customizable heuristic at a fixed depth.
//!     * [RandomBot](crate::ai::simple::RandomBot),
//!         which simply picks a random move.
//!     * [ConsolePlayer](crate::console::ConsolePlayer), a human typing chair numbers.
//! * Random position generation functions, see [board_gen](crate::util::board_gen).
//! * A game driver and a bot vs bot runner, see [bot_game](crate::util::bot_game).
//! * Simple game statistics (perft, random game length) which can be used to test game implementations.
//!
//! # Examples
//!
//! ## List the available moves and play a random one.
//!
//! ```
//! # use chair_game::games::chairs::DefaultChairBoard;
//! # use chair_game::position::{Position, PositionMoves};
//! # use internal_iterator::InternalIterator;
//! # let mut rng = rand::thread_rng();
//! let mut board = DefaultChairBoard::default();
//! println!("{}", board);
//!
//! board.operators().for_each(|mv| {
//!     println!("{}", mv)
//! });
//!
//! let mv = board.random_operator(&mut rng).unwrap();
//! println!("Picked chair {}", mv);
//! board.apply(mv).unwrap();
//! println!("{}", board);
//! ```
//!
//! ## Get the best move according to minimax
//!
//! ```
//! # use chair_game::ai::Bot;
//! # use chair_game::ai::minimax::MiniMaxBot;
//! # use chair_game::games::chairs::DefaultChairBoard;
//! # use chair_game::heuristic::chairs::OpenChairsHeuristic;
//! # use chair_game::position::{Identity, Position};
//! let board: DefaultChairBoard = "a............. b".parse().unwrap();
//!
//! let mut bot = MiniMaxBot::<DefaultChairBoard, _>::new(Identity::Second, 3, OpenChairsHeuristic);
//! let mv = bot.select_move(&board).unwrap().unwrap();
//! assert!(board.is_applicable(mv));
//! ```

pub mod position;

pub mod ai;

pub mod games;

pub mod heuristic;

pub mod console;

pub mod util;
