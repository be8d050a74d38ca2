use anyhow::Result;

fn main() -> Result<()> {
    hangman::cli::run_cli()
}
