use crate::core::game::TerminalGame;
use crate::core::renderer::GameRenderer;
use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use rand::Rng;
use ratatui::DefaultTerminal;
use std::marker::PhantomData;
use tracing::{debug, info};

/// Full-screen front end: redraws after every key press, no ticks needed
pub struct Engine<G: TerminalGame, R: GameRenderer<G::State>> {
    game: G,
    _renderer: PhantomData<R>,
}

impl<G, R> Engine<G, R>
where
    G: TerminalGame,
    R: GameRenderer<G::State>,
{
    pub fn new(game: G) -> Self {
        Self { game, _renderer: PhantomData }
    }

    /// Runs until Esc or Ctrl+C and returns the last state
    pub fn run<X: Rng + ?Sized>(&self, terminal: &mut DefaultTerminal, rng: &mut X) -> Result<G::State> {
        let mut state = self.game.new_game(rng);
        info!(game = G::NAME, "terminal session started");

        loop {
            terminal.draw(|f| R::render(f, &state))?;

            // Blocking read is fine - nothing changes between key presses
            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if key.code == KeyCode::Esc
                || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
            {
                break;
            }

            match G::parse_key(&key, &state) {
                Some(input) => state = self.game.handle_input(state, input, rng),
                None => debug!(code = ?key.code, "ignored key"),
            }
        }

        info!(game = G::NAME, finished = G::is_finished(&state), "terminal session ended");
        Ok(state)
    }
}
