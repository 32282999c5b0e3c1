//! Various utility functions.
pub mod bot_game;
pub mod game_stats;
pub mod rating;
pub mod tiny;
