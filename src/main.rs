// sortty: time-travel sorting visualizer with step-back playback and arena races

use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::EnvFilter;

use sortty::algorithms::Algorithm;
use sortty::arena::{Arena, Side};
use sortty::config::{
    generate_array, PlaybackConfig, ARENA_SIZE, ARENA_VALUES, DEFAULT_HISTORY_LIMIT, SOLO_SIZE,
    SOLO_VALUES,
};
use sortty::playback::{JsonLinesSink, Player, StepOutcome};
use sortty::ui::App;

#[derive(Debug, Parser)]
#[command(
    name = "sortty",
    about = "Time-travel sorting visualizer for the terminal",
    version
)]
struct Cli {
    /// Write logs to this file (the terminal belongs to the UI)
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Visualize a single sorting run (default).
    Solo(SoloArgs),

    /// Race two algorithms on copies of the same array.
    Arena(ArenaArgs),

    /// Print the selectable algorithm names.
    Algorithms,
}

#[derive(Debug, Args)]
struct SoloArgs {
    #[arg(long, default_value = "selection")]
    algorithm: Algorithm,

    /// Array size (5-200, default 100)
    #[arg(long)]
    size: Option<String>,

    /// Milliseconds between automatic steps
    #[arg(long, default_value_t = 100)]
    delay_ms: u64,

    /// Snapshots kept for stepping back
    #[arg(long, default_value_t = DEFAULT_HISTORY_LIMIT)]
    history: usize,

    /// Seed for the array and quicksort pivots
    #[arg(long)]
    seed: Option<u64>,

    /// Append finalize records to this JSON-lines file
    #[arg(long)]
    records: Option<PathBuf>,

    /// Sort to completion without the UI and print the record
    #[arg(long)]
    headless: bool,
}

impl Default for SoloArgs {
    fn default() -> Self {
        SoloArgs {
            algorithm: Algorithm::Selection,
            size: None,
            delay_ms: 100,
            history: DEFAULT_HISTORY_LIMIT,
            seed: None,
            records: None,
            headless: false,
        }
    }
}

#[derive(Debug, Args)]
struct ArenaArgs {
    #[arg(long, default_value = "quick")]
    left: Algorithm,

    #[arg(long, default_value = "pancake")]
    right: Algorithm,

    /// Array size per competitor (5-100, default 50)
    #[arg(long)]
    size: Option<String>,

    /// Milliseconds between race ticks
    #[arg(long, default_value_t = 100)]
    delay_ms: u64,

    /// Seed for the array and quicksort pivots
    #[arg(long)]
    seed: Option<u64>,

    /// Race to the end without the UI and print the result
    #[arg(long)]
    headless: bool,
}

type BoxError = Box<dyn std::error::Error>;

fn main() -> Result<(), BoxError> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Solo(SoloArgs::default()));

    let headless = match &command {
        Commands::Solo(args) => args.headless,
        Commands::Arena(args) => args.headless,
        Commands::Algorithms => true,
    };
    init_logging(cli.log_file.as_ref(), headless)?;

    match command {
        Commands::Solo(args) => run_solo(args),
        Commands::Arena(args) => run_arena(args),
        Commands::Algorithms => {
            for algorithm in Algorithm::ALL {
                println!("{algorithm}");
            }
            Ok(())
        }
    }
}

/// Log to `log_file` when given, else to stderr in headless mode only
fn init_logging(log_file: Option<&PathBuf>, headless: bool) -> Result<(), BoxError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if let Some(path) = log_file {
        let file = File::create(path)?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    } else if headless {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .init();
    }
    Ok(())
}

fn run_solo(args: SoloArgs) -> Result<(), BoxError> {
    let size = args
        .size
        .as_deref()
        .map_or(SOLO_SIZE.default, |s| SOLO_SIZE.parse(s));
    let seed = args.seed.unwrap_or_else(rand::random);
    let config = PlaybackConfig::default()
        .with_delay(Duration::from_millis(args.delay_ms))
        .with_history_limit(args.history);

    let mut player = Player::new(config).with_instance("solo");
    if let Some(path) = &args.records {
        player = player.with_sink(JsonLinesSink::open(path)?);
    }

    if args.headless {
        let mut rng = SmallRng::seed_from_u64(seed);
        let array = generate_array(size, SOLO_VALUES, &mut rng);
        player.start(array, args.algorithm, seed);
        if let StepOutcome::Completed(record) = player.run_to_completion()? {
            println!("{}", serde_json::to_string(&record)?);
        }
        return Ok(());
    }

    run_tui(App::solo(player, args.algorithm, size, seed))
}

fn run_arena(args: ArenaArgs) -> Result<(), BoxError> {
    let size = args
        .size
        .as_deref()
        .map_or(ARENA_SIZE.default, |s| ARENA_SIZE.parse(s));
    let seed = args.seed.unwrap_or_else(rand::random);
    let delay = Duration::from_millis(args.delay_ms);

    if args.headless {
        let mut rng = SmallRng::seed_from_u64(seed);
        let array = generate_array(size, ARENA_VALUES, &mut rng);
        let mut arena = Arena::new(args.left, args.right, array, seed, Duration::ZERO);
        arena.run_to_completion();

        println!(
            "{}",
            arena.winner_label().unwrap_or_else(|| "No winner".to_string())
        );
        for side in [Side::Left, Side::Right] {
            let competitor = arena.competitor(side);
            let counts = arena.counts(side);
            print!(
                "{:<5} {}: {} comparisons, {} swaps",
                side,
                competitor.algorithm(),
                counts.comparisons,
                counts.swaps
            );
            match competitor.fault() {
                Some(fault) => println!(" (eliminated: {fault})"),
                None => println!(),
            }
        }
        return Ok(());
    }

    run_tui(App::arena(args.left, args.right, size, delay, seed))
}

fn run_tui(mut app: App) -> Result<(), BoxError> {
    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}
