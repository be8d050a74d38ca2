/// Core game interface for the hangman terminal front ends
use crossterm::event::KeyEvent;
use rand::Rng;
use serde::Serialize;

/// A single-player, turn-based game that can be driven from a terminal.
///
/// Implementations hold only read-only configuration. The current state and
/// the random source are owned by the caller and threaded through each call,
/// so one game value can serve any number of independent sessions.
pub trait TerminalGame {
    /// Game state handed back to the front end after every action
    type State: Serialize + Clone;

    /// A single player action
    type Input: Clone;

    const NAME: &'static str;
    const DESCRIPTION: &'static str;

    /// Create a fresh state
    fn new_game<R: Rng + ?Sized>(&self, rng: &mut R) -> Self::State;

    /// Apply one player action, returning the updated state
    fn handle_input<R: Rng + ?Sized>(
        &self,
        state: Self::State,
        input: Self::Input,
        rng: &mut R,
    ) -> Self::State;

    /// Game controls its own input parsing - the front end only supplies raw text
    fn parse_line(line: &str) -> Option<Self::Input>;

    /// Same for single key presses in the full-screen front end
    fn parse_key(key: &KeyEvent, state: &Self::State) -> Option<Self::Input>;

    /// True once no further input can change the state
    fn is_finished(state: &Self::State) -> bool;
}
