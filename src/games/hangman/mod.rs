/// Hangman game module
pub mod game;
pub mod renderer;
pub mod words;

pub use game::{GameEngine, GameState, GuessOutcome, HangmanInput, Status, MAX_WRONG, PLACEHOLDER};
pub use renderer::HangmanRenderer;
pub use words::{WordList, WordListError};
