/// Line-oriented terminal front end: one input per line, state printed after each action
use anyhow::{Context as _, Result};
use crossterm::{style::{Color, ResetColor, SetForegroundColor}, QueueableCommand};
use dialoguer::{theme::ColorfulTheme, Input};
use rand::Rng;
use std::io::{BufRead, Write};
use std::marker::PhantomData;
use tracing::{debug, info};

use crate::core::game::TerminalGame;
use crate::core::renderer::GameRenderer;

/// Output sink that hides the colour bookkeeping
pub struct TerminalContext<W: Write> {
    out: W,
    colored: bool,
}

impl<W: Write> TerminalContext<W> {
    pub fn new(out: W, colored: bool) -> Self {
        Self { out, colored }
    }

    pub fn print_line(&mut self, text: &str) -> Result<()> {
        writeln!(self.out, "{}", text)?;
        Ok(())
    }

    /// Print a coloured line; plain text when colours are off
    pub fn print_colored_line(&mut self, text: &str, color: TerminalColor) -> Result<()> {
        if self.colored {
            self.out.queue(SetForegroundColor(color.into()))?;
            writeln!(self.out, "{}", text)?;
            self.out.queue(ResetColor)?;
        } else {
            writeln!(self.out, "{}", text)?;
        }
        Ok(())
    }

    pub fn empty_line(&mut self) -> Result<()> {
        writeln!(self.out)?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalColor {
    Red,
    Green,
    Cyan,
    Default,
}

impl From<TerminalColor> for Color {
    fn from(color: TerminalColor) -> Self {
        match color {
            TerminalColor::Red => Color::Red,
            TerminalColor::Green => Color::Green,
            TerminalColor::Cyan => Color::Cyan,
            TerminalColor::Default => Color::Reset,
        }
    }
}

/// How each state is written out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    /// One JSON object per line
    Json,
}

/// Where the lines come from
pub trait LineSource {
    /// `None` once input is exhausted
    fn next_line(&mut self) -> Result<Option<String>>;
}

/// Lines from any reader, e.g. piped stdin
pub struct ReaderSource<B: BufRead> {
    reader: B,
}

impl<B: BufRead> ReaderSource<B> {
    pub fn new(reader: B) -> Self {
        Self { reader }
    }
}

impl<B: BufRead> LineSource for ReaderSource<B> {
    fn next_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        let read = self.reader.read_line(&mut line).context("failed to read input")?;
        if read == 0 {
            Ok(None)
        } else {
            Ok(Some(line))
        }
    }
}

/// Interactive prompt for a real terminal
pub struct PromptSource {
    theme: ColorfulTheme,
}

impl PromptSource {
    pub fn new() -> Self {
        Self { theme: ColorfulTheme::default() }
    }
}

impl Default for PromptSource {
    fn default() -> Self {
        Self::new()
    }
}

impl LineSource for PromptSource {
    fn next_line(&mut self) -> Result<Option<String>> {
        let line = Input::<String>::with_theme(&self.theme)
            .with_prompt("Guess (:new, :quit)")
            .allow_empty(true)
            .interact_text()
            .context("failed to read guess")?;
        Ok(Some(line))
    }
}

/// Drives a game from a line source until `:quit` or end of input
pub struct LineRunner<G: TerminalGame, R: GameRenderer<G::State>> {
    game: G,
    format: OutputFormat,
    _renderer: PhantomData<R>,
}

impl<G, R> LineRunner<G, R>
where
    G: TerminalGame,
    R: GameRenderer<G::State>,
{
    pub fn new(game: G, format: OutputFormat) -> Self {
        Self { game, format, _renderer: PhantomData }
    }

    /// Returns the last state shown
    pub fn run<S, W, X>(&self, source: &mut S, ctx: &mut TerminalContext<W>, rng: &mut X) -> Result<G::State>
    where
        S: LineSource,
        W: Write,
        X: Rng + ?Sized,
    {
        let mut state = self.game.new_game(rng);
        info!(game = G::NAME, "line session started");
        self.show(ctx, &state)?;

        while let Some(line) = source.next_line()? {
            if line.trim() == ":quit" {
                break;
            }
            match G::parse_line(&line) {
                Some(input) => {
                    state = self.game.handle_input(state, input, rng);
                    self.show(ctx, &state)?;
                }
                None => {
                    debug!(line = line.trim(), "unknown command");
                    ctx.print_line(&format!("Unknown command '{}'. Try :new or :quit.", line.trim()))?;
                    ctx.flush()?;
                }
            }
        }

        info!(game = G::NAME, finished = G::is_finished(&state), "line session ended");
        Ok(state)
    }

    fn show<W: Write>(&self, ctx: &mut TerminalContext<W>, state: &G::State) -> Result<()> {
        match self.format {
            OutputFormat::Text => R::render_text(ctx, state)?,
            OutputFormat::Json => {
                let json = serde_json::to_string(state).context("failed to encode state")?;
                ctx.print_line(&json)?;
            }
        }
        ctx.flush()
    }
}
