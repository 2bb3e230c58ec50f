mod config;
mod items;
mod output;
mod parse;
mod votes;

use clap::Parser;
use pairrank_core::{Item, RankingSession, SessionState};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::parse::{Choice, Command};

pub fn bail(msg: impl std::fmt::Display) -> ! {
    eprintln!("Error: {msg}");
    std::process::exit(1);
}

#[derive(Parser)]
#[command(name = "pairrank", version, about = "Rank songs by picking the better of two, over and over")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Start (or resume) an interactive ranking session
    Rank(RankArgs),
    /// Create a commented default config file
    Init(InitArgs),
}

#[derive(Parser)]
struct InitArgs {
    /// Where to write it (default: $XDG_CONFIG_HOME/pairrank/config.toml or ~/.config/pairrank/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser)]
struct RankArgs {
    /// Items file: JSON array (strings or song objects) or one song per line
    #[arg(long)]
    items: Option<PathBuf>,

    /// Inline item (repeatable)
    #[arg(long = "item")]
    inline_items: Vec<String>,

    /// Use the built-in demo song list
    #[arg(long)]
    demo: bool,

    /// Keep the full vote log in this JSON Lines file (must be new or empty,
    /// unless it is the --resume file)
    #[arg(long)]
    save_votes: Option<PathBuf>,

    /// Replay votes from a JSON Lines file before continuing
    #[arg(long)]
    resume: Option<PathBuf>,

    /// Seed for pair selection (default: random)
    #[arg(long)]
    seed: Option<u64>,

    /// Print the final ranking as JSON instead of a table
    #[arg(long)]
    json: bool,

    /// Show debug logging on stderr
    #[arg(short, long)]
    verbose: bool,

    /// Path to config file (default: $XDG_CONFIG_HOME/pairrank/config.toml or ~/.config/pairrank/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn resolve_config_path(explicit: Option<PathBuf>) -> PathBuf {
    explicit.unwrap_or_else(|| config::config_path().unwrap_or_else(|e| bail(e)))
}

/// Load items from all sources: items file, --item inline args, or the demo list.
fn load_items(args: &RankArgs, config_items: Option<PathBuf>) -> Vec<Item> {
    let mut items = Vec::new();

    if let Some(path) = args.items.clone().or(config_items) {
        let content = std::fs::read_to_string(&path)
            .unwrap_or_else(|e| bail(format!("Failed to read items file {}: {e}", path.display())));
        items = items::parse_items_from_str(&content)
            .unwrap_or_else(|e| bail(format!("File {} looks like JSON but failed to parse: {e}", path.display())));
    }

    // Inline items continue the positional ID sequence.
    for name in &args.inline_items {
        let name = name.trim();
        if !name.is_empty() {
            items.push(Item::new((items.len() + 1).to_string(), name));
        }
    }

    if args.demo {
        if !items.is_empty() {
            bail("--demo cannot be combined with --items or --item");
        }
        items = items::demo_items();
    }

    if items.len() < 2 {
        bail(format!(
            "Need at least 2 items to rank, got {}. Use --items <file>, --item <name> or --demo.",
            items.len()
        ));
    }
    items
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Rank(args) => run_rank(args),
        Commands::Init(args) => {
            let path = resolve_config_path(args.config);
            config::create_default_config(&path).unwrap_or_else(|e| bail(e));
            println!("Created config at {}", path.display());
            println!("Edit it to set your default items file, vote log, etc.");
        }
    }
}

fn run_rank(args: RankArgs) {
    init_tracing(args.verbose);

    // Load config file, merge with CLI args (CLI wins)
    let config_path = resolve_config_path(args.config.clone());
    let cfg = config::load_config(&config_path).unwrap_or_else(|e| bail(e));

    let items = load_items(&args, cfg.items);
    let save_path = args.save_votes.clone().or(cfg.save_votes);
    let json = args.json || cfg.json.unwrap_or(false);

    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let state = match args.resume {
        Some(ref path) => {
            let file = File::open(path)
                .unwrap_or_else(|e| bail(format!("Failed to open {}: {e}", path.display())));
            let saved = votes::read_votes(BufReader::new(file))
                .unwrap_or_else(|e| bail(format!("Failed to read votes from {}: {e}", path.display())));
            info!(votes = saved.len(), path = %path.display(), "replaying saved votes");
            SessionState::replay(items, &saved)
                .unwrap_or_else(|e| bail(format!("Cannot resume from {}: {e}", path.display())))
        }
        None => SessionState::new(items).unwrap_or_else(|e| bail(e)),
    };
    let mut session = RankingSession::from_state(state, rng);

    let mut save_file = save_path.map(|path| {
        let file = votes::open_snapshot(&path, args.resume.as_deref(), session.matchups())
            .unwrap_or_else(|e| bail(e));
        info!(path = %path.display(), votes = session.matchups().len(), "saving votes");
        file
    });

    println!(
        "Ranking {} songs ({} pairs). Type h for help.",
        session.state().items().len(),
        session.progress().total,
    );

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        let Some((first, second)) = session.current_pair() else {
            println!("\nAll pairs compared.");
            break;
        };
        output::print_pair(first, second, &session.progress());
        let pair_ids = (first.id.clone(), second.id.clone());

        print!("> ");
        let _ = io::stdout().flush();

        let line = match lines.next() {
            Some(Ok(line)) => line,
            Some(Err(e)) => bail(format!("Failed to read from stdin: {e}")),
            None => break,
        };

        let command = match parse::parse_command(&line) {
            Ok(command) => command,
            Err(msg) => {
                eprintln!("{msg}");
                continue;
            }
        };

        match command {
            Command::Vote(choice) => {
                let (winner, loser) = match choice {
                    Choice::First => (&pair_ids.0, &pair_ids.1),
                    Choice::Second => (&pair_ids.1, &pair_ids.0),
                };
                if let Err(e) = session.record_vote(winner, loser) {
                    eprintln!("Vote rejected: {e}");
                    continue;
                }
                if let Some(file) = save_file.as_mut() {
                    if let Some(matchup) = session.matchups().last() {
                        if let Err(e) = votes::write_vote(file, matchup) {
                            warn!(error = %e, "failed to save vote");
                        }
                    }
                }
            }
            Command::ToggleLock(index) => match session.ranking_list().get(index) {
                Some(r) => {
                    let id = r.item.id.clone();
                    session.toggle_lock(&id);
                    let state = if session.is_locked(&id) { "Locked" } else { "Unlocked" };
                    println!("{state} position {}", index + 1);
                }
                None => eprintln!("No song at position {}", index + 1),
            },
            Command::Move { from, to } => {
                let ranking = session.ranking_list();
                let (Some(source), Some(target)) = (ranking.get(from), ranking.get(to)) else {
                    eprintln!("Positions must be between 1 and {}", ranking.len());
                    continue;
                };
                // Moving never unlocks: locked songs can't be dragged or dropped onto.
                if session.is_locked(&source.item.id) || session.is_locked(&target.item.id) {
                    eprintln!("Position is locked; unlock it first or use swap");
                    continue;
                }
                session.reorder(from, to);
                output::print_table(&session);
            }
            Command::Swap(i, j) => {
                let before = session.ranking_list().to_vec();
                session.swap(i, j);
                if session.ranking_list() == before.as_slice() && i != j {
                    eprintln!("Cannot swap: position out of range or locked");
                } else {
                    output::print_table(&session);
                }
            }
            Command::Show => output::print_table(&session),
            Command::Help => println!("{}", parse::HELP),
            Command::Quit => break,
        }
    }

    println!();
    if json {
        output::print_json(&session);
    } else {
        output::print_table(&session);
    }
}
