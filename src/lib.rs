pub mod core {
	pub mod engine;
	pub mod game;
	pub mod renderer;
	pub mod terminal;
}

pub mod cli;
pub mod games;
pub mod logging;

// Re-export for convenience
pub use crate::core::game::TerminalGame;
pub use crate::core::renderer::GameRenderer;
pub use crate::games::hangman::{GameEngine, GameState, Status};
