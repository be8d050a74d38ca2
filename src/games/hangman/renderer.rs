use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
    layout::{Layout, Constraint, Direction}
};

use anyhow::Result;
use std::io::Write;

use crate::core::renderer::GameRenderer;
use crate::core::terminal::{TerminalColor, TerminalContext};
use super::game::{GameState, Status, MAX_WRONG};

/// One drawing per wrong guess, 0 through MAX_WRONG
pub const GALLOWS: [&str; MAX_WRONG as usize + 1] = [
    "  +---+\n  |   |\n      |\n      |\n      |\n      |\n=========",
    "  +---+\n  |   |\n  O   |\n      |\n      |\n      |\n=========",
    "  +---+\n  |   |\n  O   |\n  |   |\n      |\n      |\n=========",
    "  +---+\n  |   |\n  O   |\n /|   |\n      |\n      |\n=========",
    "  +---+\n  |   |\n  O   |\n /|\\  |\n      |\n      |\n=========",
    "  +---+\n  |   |\n  O   |\n /|\\  |\n /    |\n      |\n=========",
    "  +---+\n  |   |\n  O   |\n /|\\  |\n / \\  |\n      |\n=========",
];

pub const KEYBOARD_ROWS: [&str; 3] = ["QWERTYUIOP", "ASDFGHJKL", "ZXCVBNM"];

pub fn gallows(wrong_count: u8) -> &'static str {
    GALLOWS[usize::from(wrong_count.min(MAX_WRONG))]
}

/// Banner colour for each status. Exhaustive so a new status cannot go unstyled.
pub fn banner_style(status: Status) -> Style {
    match status {
        Status::InProgress => Style::default().fg(Color::Cyan),
        Status::Won => Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        Status::Lost => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
    }
}

/// Same mapping for the line front end
pub fn banner_color(status: Status) -> TerminalColor {
    match status {
        Status::InProgress => TerminalColor::Cyan,
        Status::Won => TerminalColor::Green,
        Status::Lost => TerminalColor::Red,
    }
}

/// A key can be pressed while the game runs and its letter is untried.
pub fn key_enabled(state: &GameState, letter: char) -> bool {
    state.status() == Status::InProgress && !state.is_guessed(letter)
}

pub fn guessed_line(state: &GameState) -> String {
    let guessed = state.guessed_sorted();
    if guessed.is_empty() {
        "No guesses yet.".to_string()
    } else {
        let letters: Vec<String> = guessed.iter().map(char::to_string).collect();
        format!("Guessed letters: {}", letters.join(" "))
    }
}

#[derive(Debug)]
pub struct HangmanRenderer;

impl GameRenderer<GameState> for HangmanRenderer {
    fn render(frame: &mut Frame, state: &GameState) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Length(9), // Gallows + word
                Constraint::Length(3), // Banner
                Constraint::Length(5), // Keyboard
                Constraint::Min(0),    // Footer
            ])
            .split(frame.area());

        let header = Paragraph::new("🪢 ═══ HANGMAN ═══ 🪢")
            .block(Block::default().borders(Borders::ALL))
            .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center);
        frame.render_widget(header, chunks[0]);

        let top = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(16), Constraint::Min(0)])
            .split(chunks[1]);

        let drawing = Paragraph::new(gallows(state.wrong_count()))
            .block(Block::default().borders(Borders::ALL).title(" Gallows "));
        frame.render_widget(drawing, top[0]);

        let word = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                state.revealed_string(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(format!("Wrong guesses: {} / {}", state.wrong_count(), MAX_WRONG)),
            Line::from(Span::styled(
                guessed_line(state),
                Style::default().fg(Color::DarkGray),
            )),
        ])
        .block(Block::default().borders(Borders::ALL).title(" Word "));
        frame.render_widget(word, top[1]);

        let banner = Paragraph::new(state.message())
            .block(Block::default().borders(Borders::ALL))
            .style(banner_style(state.status()))
            .wrap(Wrap { trim: true });
        frame.render_widget(banner, chunks[2]);

        let keyboard: Vec<Line> = KEYBOARD_ROWS
            .iter()
            .map(|row| {
                Line::from(
                    row.chars()
                        .map(|c| {
                            let style = if key_enabled(state, c) {
                                Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
                            } else {
                                Style::default().fg(Color::DarkGray).add_modifier(Modifier::CROSSED_OUT)
                            };
                            Span::styled(format!(" {} ", c), style)
                        })
                        .collect::<Vec<_>>(),
                )
            })
            .collect();
        let keyboard = Paragraph::new(keyboard)
            .block(Block::default().borders(Borders::ALL).title(" Keyboard "))
            .alignment(Alignment::Center);
        frame.render_widget(keyboard, chunks[3]);

        let hint = if state.status().is_terminal() {
            "[N] New game  [Esc] Quit"
        } else {
            "[A-Z] Guess  [Ctrl+N] New game  [Esc] Quit"
        };
        let footer = Paragraph::new(vec![
            Line::from(hint),
            Line::from(Span::styled(
                format!(
                    "Rules: guess the hidden word by trying letters. You lose after {} wrong guesses.",
                    MAX_WRONG
                ),
                Style::default().fg(Color::DarkGray),
            )),
        ])
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
        frame.render_widget(footer, chunks[4]);
    }

    fn render_text<W: Write>(ctx: &mut TerminalContext<W>, state: &GameState) -> Result<()> {
        ctx.empty_line()?;
        for line in gallows(state.wrong_count()).lines() {
            ctx.print_line(line)?;
        }
        ctx.empty_line()?;
        ctx.print_line(&format!("Word: {}", state.revealed_string()))?;
        ctx.print_line(&format!("Wrong guesses: {} / {}", state.wrong_count(), MAX_WRONG))?;
        ctx.print_colored_line(&guessed_line(state), TerminalColor::Default)?;
        ctx.print_colored_line(state.message(), banner_color(state.status()))
    }
}
