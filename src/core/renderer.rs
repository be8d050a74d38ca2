/// Generic game renderer trait for dependency injection
use anyhow::Result;
use ratatui::Frame;
use std::io::Write;

use crate::core::terminal::TerminalContext;

/// Pure presentation - reads state, never mutates it
pub trait GameRenderer<State> {
    /// Full-screen rendering into a ratatui frame
    fn render(frame: &mut Frame, state: &State);

    /// Plain line output for the line-oriented front end
    fn render_text<W: Write>(ctx: &mut TerminalContext<W>, state: &State) -> Result<()>;
}
