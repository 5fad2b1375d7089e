use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use connect_four::ai::MinimaxAgent;
use connect_four::arena;
use connect_four::config::AppConfig;
use connect_four::console;
use connect_four::game::GameState;
use connect_four::ui::App;

/// Play Connect Four against a minimax AI.
#[derive(Parser)]
#[command(name = "connect-four", about = "Play Connect Four against a minimax AI")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// Override search depth (plies)
    #[arg(long)]
    depth: Option<usize>,

    /// Override number of board rows
    #[arg(long)]
    rows: Option<usize>,

    /// Override number of board columns
    #[arg(long)]
    cols: Option<usize>,

    /// Play in a plain line-oriented console instead of the TUI
    #[arg(long)]
    plain: bool,

    /// Play N headless games of minimax against a random opponent and report
    #[arg(long, value_name = "N")]
    versus_random: Option<usize>,

    /// Print the default configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    if cli.print_config {
        print!("{}", AppConfig::default_toml());
        return Ok(());
    }

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides
    if let Some(depth) = cli.depth {
        config.search.depth = depth;
    }
    if let Some(rows) = cli.rows {
        config.board.rows = rows;
    }
    if let Some(cols) = cli.cols {
        config.board.cols = cols;
    }
    if let Some(games) = cli.versus_random {
        config.match_play.games = games;
    }
    config.validate().context("validating configuration")?;

    if cli.versus_random.is_some() {
        run_match(&config)
    } else if cli.plain {
        run_console(&config)
    } else {
        run_tui(&config)
    }
}

fn run_match(config: &AppConfig) -> Result<()> {
    let summary = arena::play_match(
        config.board.rows,
        config.board.cols,
        config.search.depth,
        config.match_play.games,
        config.match_play.seed,
    )
    .context("playing minimax vs random")?;

    println!(
        "Minimax (depth {}) vs Random over {} games: {} wins, {} losses, {} draws ({:.1}% win rate)",
        config.search.depth,
        summary.games(),
        summary.wins,
        summary.losses,
        summary.draws,
        summary.win_rate() * 100.0
    );
    Ok(())
}

fn run_console(config: &AppConfig) -> Result<()> {
    let mut state = GameState::new(config.board.rows, config.board.cols)?;
    let mut ai = MinimaxAgent::new(config.search.depth);
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    console::play(&mut state, &mut ai, stdin.lock(), &mut stdout).context("console game")?;
    Ok(())
}

fn run_tui(config: &AppConfig) -> Result<()> {
    let mut app = App::new(config)?;

    // Setup terminal
    enable_raw_mode().context("enabling raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("creating terminal")?;

    let res = app.run(&mut terminal);

    // Restore terminal — always runs, even on error
    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    res.context("running game UI")
}
