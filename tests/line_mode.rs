use std::io::Cursor;

use hangman::core::terminal::{LineRunner, OutputFormat, ReaderSource, TerminalContext};
use hangman::games::hangman::{GameEngine, HangmanRenderer, Status, WordList};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn run(word: &str, input: &str, format: OutputFormat) -> (hangman::GameState, String) {
    let engine = GameEngine::new(WordList::new([word]).unwrap());
    let runner = LineRunner::<_, HangmanRenderer>::new(engine, format);
    let mut source = ReaderSource::new(Cursor::new(input.to_string()));
    let mut ctx = TerminalContext::new(Vec::new(), false);
    let mut rng = StdRng::seed_from_u64(0);

    let state = runner.run(&mut source, &mut ctx, &mut rng).unwrap();
    (state, String::from_utf8(ctx.into_inner()).unwrap())
}

#[test]
fn text_session_plays_to_a_win() {
    let (state, out) = run("jazz", "j\nz\nA\n", OutputFormat::Text);
    assert_eq!(state.status(), Status::Won);
    assert!(out.contains("Good luck! Guess a letter."));
    assert!(out.contains("Word: j _ _ _"));
    assert!(out.contains("Word: j _ z z"));
    assert!(out.contains("YOU WIN!"));
}

#[test]
fn quit_stops_reading() {
    let (state, out) = run("cloud", "c\n:quit\nl\n", OutputFormat::Text);
    assert_eq!(state.guessed_sorted(), vec!['c']);
    assert!(!out.contains("'l'"));
}

#[test]
fn unknown_command_is_reported() {
    let (state, out) = run("cloud", ":hint\n", OutputFormat::Text);
    assert!(out.contains("Unknown command ':hint'"));
    assert!(state.guessed_sorted().is_empty());
}

#[test]
fn new_command_restarts() {
    let (state, out) = run("cloud", "x\n:new\n", OutputFormat::Text);
    assert_eq!(state.wrong_count(), 0);
    assert!(state.guessed_sorted().is_empty());
    assert!(out.contains("Nope, no 'x'. 5 wrong guess(es) left."));
}

#[test]
fn json_session_prints_one_state_per_line() {
    let (_, out) = run("camel", "c\n??\n", OutputFormat::Json);
    let states: Vec<serde_json::Value> = out
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();

    assert_eq!(states.len(), 3);
    assert_eq!(states[0]["status"], "in_progress");
    assert_eq!(states[1]["revealed"], serde_json::json!(["c", "_", "_", "_", "_"]));
    assert_eq!(states[2]["message"], "Please enter a single letter (A-Z).");
    assert_eq!(states[2]["guessed"], serde_json::json!(["c"]));
}
