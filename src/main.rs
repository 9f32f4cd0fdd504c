use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use twotwotwotwo::config::Config;
use twotwotwotwo::corpus::WordSource;
use twotwotwotwo::corpus::fetch::HttpFetcher;
use twotwotwotwo::event::TerminalInput;
use twotwotwotwo::session::clock::SystemClock;
use twotwotwotwo::session::presenter::{PresentationLoop, SessionOutcome};
use twotwotwotwo::session::{GameMode, SessionError};
use twotwotwotwo::ui::render;

const EXIT_ABORTED: u8 = 130;

#[derive(Parser)]
#[command(
    name = "twotwotwotwo",
    version,
    about = "Read 2222 words in 22 minutes 22 seconds"
)]
struct Cli {
    #[arg(short, long, value_enum, help = "Pacing mode")]
    mode: Option<GameMode>,

    #[arg(long, help = "Show words in file order instead of shuffling")]
    ordered: bool,

    #[arg(short, long, help = "Path to the word file")]
    words_file: Option<PathBuf>,

    #[arg(long, help = "URL to download the word list from when the file is missing")]
    url: Option<String>,

    #[arg(long, help = "Seed for the shuffle")]
    seed: Option<u64>,

    #[arg(long, help = "Print words as plain text instead of ASCII art")]
    plain: bool,

    #[arg(short, long, help = "Config file to use")]
    config: Option<PathBuf>,

    #[arg(long, help = "Write the effective configuration to the config file and exit")]
    write_config: bool,

    #[arg(short, long, action = ArgAction::Count, help = "More log output (-v info, -vv debug)")]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn run(cli: Cli) -> Result<ExitCode> {
    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let mut config = Config::load_from(&config_path)
        .with_context(|| format!("loading config from {}", config_path.display()))?;

    if let Some(mode) = cli.mode {
        config.game_mode = mode;
    }
    if cli.ordered {
        config.random_order = false;
    }
    if let Some(words_file) = cli.words_file {
        config.words_file = words_file;
    }
    if let Some(url) = cli.url {
        config.words_url = url;
    }

    if cli.write_config {
        config.save_to(&config_path)?;
        println!("Wrote {}", config_path.display());
        return Ok(ExitCode::SUCCESS);
    }

    let source = WordSource::new(
        config.words_url.clone(),
        config.word_count,
        HttpFetcher::new(config.fetch_timeout()),
    );
    let corpus = source.load(&config.words_file)?;

    let renderer = render::detect(cli.plain);
    let input = TerminalInput::new(Duration::from_millis(50))?;
    let rng = match cli.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy(),
    };
    let mut session =
        PresentationLoop::new(config.session_options(), renderer, input, SystemClock).with_rng(rng);

    let mut stdout = io::stdout();
    let outcome = session.run(corpus, &mut stdout);
    match outcome {
        Ok(SessionOutcome::Completed(summary)) | Ok(SessionOutcome::Interrupted(summary)) => {
            writeln!(stdout)?;
            writeln!(stdout, "{summary}")?;
            info!(mistakes = summary.mistakes, "session finished");
            Ok(ExitCode::SUCCESS)
        }
        Err(SessionError::Aborted) => {
            writeln!(stdout)?;
            eprintln!("Aborted immediately");
            Ok(ExitCode::from(EXIT_ABORTED))
        }
        Err(err) => Err(err.into()),
    }
}
