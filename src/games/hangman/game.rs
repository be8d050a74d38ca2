use std::collections::BTreeSet;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rand::Rng;
use serde::Serialize;
use tracing::{debug, info};

use super::words::{normalize_word, WordList, WordListError};
use crate::core::game::TerminalGame;

/// Wrong guesses allowed before the game is lost.
pub const MAX_WRONG: u8 = 6;

/// Marker for a letter that has not been revealed yet.
pub const PLACEHOLDER: char = '_';

pub const GREETING: &str = "Good luck! Guess a letter.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    InProgress,
    Won,
    Lost,
}

impl Status {
    pub fn is_terminal(self) -> bool {
        !matches!(self, Status::InProgress)
    }
}

/// What a single call to [`GameState::apply_guess`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    /// Game had already ended; nothing changed.
    GameOver,
    /// Input was not a single letter a-z; nothing changed.
    Invalid,
    /// Letter was tried before; nothing changed.
    Repeated(char),
    Hit(char),
    Miss(char),
    /// Hit that revealed the last hidden letter.
    Won(char),
    /// Miss that used up the last wrong guess.
    Lost(char),
}

impl GuessOutcome {
    /// Whether the guess changed anything besides the message.
    pub fn is_accepted(self) -> bool {
        matches!(
            self,
            GuessOutcome::Hit(_) | GuessOutcome::Miss(_) | GuessOutcome::Won(_) | GuessOutcome::Lost(_)
        )
    }
}

/// Trims and lowercases raw player input, accepting exactly one letter a-z.
pub fn normalize_guess(raw: &str) -> Option<char> {
    let lowered = raw.trim().to_lowercase();
    let mut chars = lowered.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_lowercase() => Some(c),
        _ => None,
    }
}

/// State of one game. Replaced wholesale by a new game, mutated only by guesses.
///
/// Only the constructors can build one, so a state cannot be decoded from
/// untrusted JSON:
///
/// ```compile_fail
/// let state: hangman::GameState = serde_json::from_str("{}").unwrap();
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameState {
    secret_word: String,
    revealed: Vec<char>,
    guessed: BTreeSet<char>,
    wrong_count: u8,
    status: Status,
    message: String,
}

impl GameState {
    /// Fresh game for a known word.
    pub fn with_word(word: &str) -> Result<Self, WordListError> {
        let secret_word =
            normalize_word(word).ok_or_else(|| WordListError::InvalidSecret(word.to_string()))?;
        Ok(Self::fresh(secret_word))
    }

    fn fresh(secret_word: String) -> Self {
        let revealed = vec![PLACEHOLDER; secret_word.len()];
        Self {
            secret_word,
            revealed,
            guessed: BTreeSet::new(),
            wrong_count: 0,
            status: Status::InProgress,
            message: GREETING.to_string(),
        }
    }

    /// Applies one guess in place.
    ///
    /// Rejected input (game over, not a single letter, repeated letter) only
    /// rewrites `message`. An accepted letter is always recorded, then either
    /// reveals every matching position or costs one wrong guess.
    pub fn apply_guess(&mut self, raw: &str) -> GuessOutcome {
        if self.status.is_terminal() {
            self.message = "The game is over. Press 'n' for a new game.".to_string();
            return GuessOutcome::GameOver;
        }

        let Some(letter) = normalize_guess(raw) else {
            self.message = "Please enter a single letter (A-Z).".to_string();
            return GuessOutcome::Invalid;
        };

        if !self.guessed.insert(letter) {
            self.message = format!("You already tried '{}'.", letter);
            return GuessOutcome::Repeated(letter);
        }

        if self.secret_word.contains(letter) {
            for (slot, c) in self.revealed.iter_mut().zip(self.secret_word.chars()) {
                if c == letter {
                    *slot = c;
                }
            }

            if self.revealed.contains(&PLACEHOLDER) {
                self.message = format!("Nice! '{}' is in the word.", letter);
                GuessOutcome::Hit(letter)
            } else {
                self.status = Status::Won;
                self.message = "🎉 YOU WIN! Press 'n' for a new game.".to_string();
                GuessOutcome::Won(letter)
            }
        } else {
            self.wrong_count += 1;

            if self.wrong_count >= MAX_WRONG {
                self.status = Status::Lost;
                self.message = format!(
                    "💀 GAME OVER. The word was '{}'. Press 'n' for a new game.",
                    self.secret_word
                );
                GuessOutcome::Lost(letter)
            } else {
                self.message = format!(
                    "Nope, no '{}'. {} wrong guess(es) left.",
                    letter,
                    self.remaining()
                );
                GuessOutcome::Miss(letter)
            }
        }
    }

    pub fn secret_word(&self) -> &str {
        &self.secret_word
    }

    pub fn revealed(&self) -> &[char] {
        &self.revealed
    }

    /// Revealed pattern joined with spaces, e.g. `c _ _ u _`
    pub fn revealed_string(&self) -> String {
        self.revealed
            .iter()
            .map(char::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Every letter tried so far, alphabetically
    pub fn guessed_sorted(&self) -> Vec<char> {
        self.guessed.iter().copied().collect()
    }

    pub fn is_guessed(&self, letter: char) -> bool {
        self.guessed.contains(&letter.to_ascii_lowercase())
    }

    pub fn wrong_count(&self) -> u8 {
        self.wrong_count
    }

    /// Wrong guesses still allowed
    pub fn remaining(&self) -> u8 {
        MAX_WRONG.saturating_sub(self.wrong_count)
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HangmanInput {
    Guess(String),
    NewGame,
}

/// Starts games and applies guesses. Holds only the read-only word list.
#[derive(Debug, Clone, Default)]
pub struct GameEngine {
    words: WordList,
}

impl GameEngine {
    pub fn new(words: WordList) -> Self {
        Self { words }
    }

    pub fn words(&self) -> &WordList {
        &self.words
    }

    pub fn start_new_game(&self) -> GameState {
        self.start_new_game_with(&mut rand::rng())
    }

    pub fn start_new_game_with<R: Rng + ?Sized>(&self, rng: &mut R) -> GameState {
        let word = self.words.choose(rng).to_ascii_lowercase();
        info!(length = word.len(), "new game started");
        debug!(%word, "secret word chosen");
        GameState::fresh(word)
    }

    pub fn submit_guess(&self, mut state: GameState, raw: &str) -> GameState {
        let outcome = state.apply_guess(raw);
        if outcome.is_accepted() {
            debug!(?outcome, wrong = state.wrong_count, "guess applied");
        } else {
            debug!(?outcome, "guess rejected");
        }

        match outcome {
            GuessOutcome::Won(_) | GuessOutcome::Lost(_) => {
                info!(status = ?state.status, wrong = state.wrong_count, "game finished");
            }
            _ => {}
        }
        state
    }
}

impl TerminalGame for GameEngine {
    type State = GameState;
    type Input = HangmanInput;

    const NAME: &'static str = "Hangman";
    const DESCRIPTION: &'static str = "Guess the hidden word letter by letter before the gallows is complete";

    fn new_game<R: Rng + ?Sized>(&self, rng: &mut R) -> Self::State {
        self.start_new_game_with(rng)
    }

    fn handle_input<R: Rng + ?Sized>(
        &self,
        state: Self::State,
        input: Self::Input,
        rng: &mut R,
    ) -> Self::State {
        match input {
            HangmanInput::Guess(raw) => self.submit_guess(state, &raw),
            HangmanInput::NewGame => self.start_new_game_with(rng),
        }
    }

    /// `:new` restarts, any other `:command` is unknown, everything else is a guess
    fn parse_line(line: &str) -> Option<Self::Input> {
        let trimmed = line.trim();
        match trimmed.strip_prefix(':') {
            Some("new") => Some(HangmanInput::NewGame),
            Some(_) => None,
            None => Some(HangmanInput::Guess(trimmed.to_string())),
        }
    }

    /// Ctrl+N always restarts; a plain `n` restarts only once the game is over
    fn parse_key(key: &KeyEvent, state: &Self::State) -> Option<Self::Input> {
        match key.code {
            KeyCode::Char('n' | 'N') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(HangmanInput::NewGame)
            }
            KeyCode::Char('n' | 'N') if state.status.is_terminal() => Some(HangmanInput::NewGame),
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(HangmanInput::Guess(c.to_string()))
            }
            _ => None,
        }
    }

    fn is_finished(state: &Self::State) -> bool {
        state.status.is_terminal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn guess_all(state: &mut GameState, letters: &str) {
        for c in letters.chars() {
            state.apply_guess(&c.to_string());
        }
    }

    #[test]
    fn fresh_state_is_all_placeholders() {
        let state = GameState::with_word("Castle").unwrap();
        assert_eq!(state.secret_word(), "castle");
        assert_eq!(state.revealed(), &['_'; 6]);
        assert!(state.guessed_sorted().is_empty());
        assert_eq!(state.wrong_count(), 0);
        assert_eq!(state.status(), Status::InProgress);
        assert_eq!(state.message(), GREETING);
    }

    #[test]
    fn with_word_rejects_non_letters() {
        assert!(GameState::with_word("").is_err());
        assert_eq!(
            GameState::with_word("b4d"),
            Err(WordListError::InvalidSecret("b4d".to_string()))
        );
    }

    #[test]
    fn start_new_game_uses_thread_rng() {
        let engine = GameEngine::new(WordList::builtin());
        for _ in 0..20 {
            let state = engine.start_new_game();
            assert!(engine.words().words().iter().any(|w| w == state.secret_word()));
            assert_eq!(state.revealed().len(), state.secret_word().len());
            assert!(state.revealed().iter().all(|&c| c == PLACEHOLDER));
            assert!(state.guessed_sorted().is_empty());
            assert_eq!(state.wrong_count(), 0);
            assert_eq!(state.status(), Status::InProgress);
            assert_eq!(state.message(), GREETING);
        }
    }

    #[test]
    fn normalize_guess_accepts_one_letter() {
        assert_eq!(normalize_guess("a"), Some('a'));
        assert_eq!(normalize_guess(" Q \n"), Some('q'));
        assert_eq!(normalize_guess(""), None);
        assert_eq!(normalize_guess("ab"), None);
        assert_eq!(normalize_guess("1"), None);
        assert_eq!(normalize_guess("é"), None);
        assert_eq!(normalize_guess("a b"), None);
    }

    #[test]
    fn hit_reveals_every_occurrence() {
        let mut state = GameState::with_word("follow").unwrap();
        assert_eq!(state.apply_guess("l"), GuessOutcome::Hit('l'));
        assert_eq!(state.revealed_string(), "_ _ l l _ _");
        assert_eq!(state.message(), "Nice! 'l' is in the word.");
    }

    #[test]
    fn miss_reports_remaining() {
        let mut state = GameState::with_word("cloud").unwrap();
        assert_eq!(state.apply_guess("z"), GuessOutcome::Miss('z'));
        assert_eq!(state.wrong_count(), 1);
        assert_eq!(state.remaining(), 5);
        assert_eq!(state.message(), "Nope, no 'z'. 5 wrong guess(es) left.");
    }

    #[test]
    fn repeat_only_changes_message() {
        let mut state = GameState::with_word("cloud").unwrap();
        state.apply_guess("z");
        let before = state.clone();
        assert_eq!(state.apply_guess("Z"), GuessOutcome::Repeated('z'));
        assert_eq!(state.wrong_count(), before.wrong_count());
        assert_eq!(state.guessed_sorted(), before.guessed_sorted());
        assert_eq!(state.message(), "You already tried 'z'.");
    }

    #[test]
    fn invalid_input_only_changes_message() {
        let mut state = GameState::with_word("cloud").unwrap();
        let before = state.clone();
        assert_eq!(state.apply_guess("ab"), GuessOutcome::Invalid);
        assert_eq!(state.revealed(), before.revealed());
        assert_eq!(state.guessed_sorted(), before.guessed_sorted());
        assert_eq!(state.message(), "Please enter a single letter (A-Z).");
    }

    #[test]
    fn sixth_miss_loses() {
        let mut state = GameState::with_word("camel").unwrap();
        guess_all(&mut state, "bfghi");
        assert_eq!(state.status(), Status::InProgress);
        assert_eq!(state.apply_guess("k"), GuessOutcome::Lost('k'));
        assert_eq!(state.status(), Status::Lost);
        assert_eq!(state.remaining(), 0);
        assert!(state.message().contains("'camel'"));
    }

    #[test]
    fn guesses_after_the_end_are_ignored() {
        let mut state = GameState::with_word("jazz").unwrap();
        guess_all(&mut state, "jaz");
        assert_eq!(state.status(), Status::Won);
        let before = state.clone();
        assert_eq!(state.apply_guess("q"), GuessOutcome::GameOver);
        assert_eq!(state.revealed(), before.revealed());
        assert_eq!(state.guessed_sorted(), before.guessed_sorted());
        assert_eq!(state.status(), Status::Won);
        assert_ne!(state.message(), before.message());
    }

    #[test]
    fn outcome_acceptance() {
        assert!(GuessOutcome::Hit('a').is_accepted());
        assert!(GuessOutcome::Lost('a').is_accepted());
        assert!(!GuessOutcome::Repeated('a').is_accepted());
        assert!(!GuessOutcome::GameOver.is_accepted());
    }

    #[test]
    fn engine_picks_from_its_list() {
        let engine = GameEngine::new(WordList::new(["grass"]).unwrap());
        let mut rng = StdRng::seed_from_u64(1);
        let state = engine.start_new_game_with(&mut rng);
        assert_eq!(state.secret_word(), "grass");
        assert_eq!(state.revealed().len(), 5);
    }

    #[test]
    fn parse_line_commands() {
        assert_eq!(GameEngine::parse_line(":new"), Some(HangmanInput::NewGame));
        assert_eq!(GameEngine::parse_line(" :new "), Some(HangmanInput::NewGame));
        assert_eq!(GameEngine::parse_line(":what"), None);
        assert_eq!(
            GameEngine::parse_line(" x "),
            Some(HangmanInput::Guess("x".to_string()))
        );
    }

    #[test]
    fn parse_key_maps_letters_and_restart() {
        let mut state = GameState::with_word("jazz").unwrap();
        let key = |c| KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE);
        let ctrl_n = KeyEvent::new(KeyCode::Char('n'), KeyModifiers::CONTROL);

        assert_eq!(
            GameEngine::parse_key(&key('n'), &state),
            Some(HangmanInput::Guess("n".to_string()))
        );
        assert_eq!(GameEngine::parse_key(&ctrl_n, &state), Some(HangmanInput::NewGame));
        assert_eq!(
            GameEngine::parse_key(&KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE), &state),
            None
        );

        for c in ["j", "a", "z"] {
            state.apply_guess(c);
        }
        assert_eq!(GameEngine::parse_key(&key('n'), &state), Some(HangmanInput::NewGame));
        assert_eq!(
            GameEngine::parse_key(&key('x'), &state),
            Some(HangmanInput::Guess("x".to_string()))
        );
    }

    #[test]
    fn new_game_input_replaces_state() {
        let engine = GameEngine::new(WordList::new(["jazz"]).unwrap());
        let state = engine.submit_guess(GameState::with_word("jazz").unwrap(), "q");
        assert_eq!(state.wrong_count(), 1);
        let state = engine.handle_input(state, HangmanInput::NewGame, &mut StdRng::seed_from_u64(3));
        assert_eq!(state, GameState::with_word("jazz").unwrap());
    }

    #[test]
    fn state_serializes_for_line_mode() {
        let mut state = GameState::with_word("cloud").unwrap();
        state.apply_guess("c");
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["status"], "in_progress");
        assert_eq!(json["wrong_count"], 0);
    }
}
