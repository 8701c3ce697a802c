pub mod board;
pub mod events;
pub mod game;
pub mod web;

pub use board::*;
pub use events::*;
pub use game::*;
