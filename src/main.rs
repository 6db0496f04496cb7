use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::time::Instant;

use exohab::catalog::PlanetInput;
use exohab::config::Config;
use exohab::output::ScoredPlanet;
use exohab::scoring::{Label, DISCLAIMER};
use exohab::store::{PlanetFilter, PlanetRecord, StoreState};

const EXIT_SUCCESS: i32 = 0;
const EXIT_FAILURE: i32 = 1;
const EXIT_INPUT: i32 = 2;
const EXIT_STORE: i32 = 3;
const EXIT_CONFIG: i32 = 4;

#[derive(Clone, Copy, Debug, PartialEq, ValueEnum)]
enum OutputFormat {
    Table,
    Tsv,
    Json,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Score every planet in a CSV catalog and save the results
    Analyze {
        /// Catalog file with NASA Exoplanet Archive style columns
        csv: PathBuf,
        /// Score and print without touching the store
        #[arg(long)]
        dry_run: bool,
    },
    /// Score and save the bundled demo planets
    Seed {
        /// Score and print without touching the store
        #[arg(long)]
        dry_run: bool,
    },
    /// List stored planets, best score first
    List {
        /// Only show these labels (repeatable)
        #[arg(long = "label", value_parser = parse_label)]
        labels: Vec<Label>,
        /// Minimum radius in Earth radii
        #[arg(long)]
        min_radius: Option<f64>,
        /// Maximum radius in Earth radii
        #[arg(long)]
        max_radius: Option<f64>,
        /// Minimum score (0-100)
        #[arg(long)]
        min_score: Option<f64>,
        /// Maximum score (0-100)
        #[arg(long)]
        max_score: Option<f64>,
        /// Maximum rows (defaults to query_limit from config)
        #[arg(long)]
        limit: Option<usize>,
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// Show one stored planet with its score breakdown
    Show { name: String },
    /// Mark a planet as favorite
    Favorite { name: String },
    /// Remove a planet from favorites
    Unfavorite { name: String },
    /// List favorite planets
    Favorites,
    /// Attach a note to a planet
    Note { name: String, text: String },
    /// Show notes for a planet, newest first
    Notes { name: String },
    /// Interactive dashboard
    Dashboard,
    /// Create a config file interactively
    Init,
}

#[derive(Parser, Debug)]
#[command(name = "exohab")]
#[command(about = "Heuristic habitability scoring for exoplanet catalogs", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/exohab/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

fn parse_label(s: &str) -> Result<Label, String> {
    s.parse().map_err(|e: anyhow::Error| e.to_string())
}

/// Print an error with its context chain and exit
fn fail(code: i32, what: &str, err: anyhow::Error) -> ! {
    eprintln!("{}: {:#}", what, err);
    std::process::exit(code);
}

fn open_store(path: &Path) -> StoreState {
    exohab::store::load_store(path).unwrap_or_else(|e| fail(EXIT_STORE, "Store error", e))
}

fn save_store(path: &Path, state: &StoreState) {
    if let Err(e) = exohab::store::write_store(path, state) {
        fail(EXIT_STORE, "Store error", e);
    }
}

/// Look up a stored planet or exit with an input error
fn require_planet<'a>(store: &'a StoreState, name: &str) -> &'a PlanetRecord {
    store.get(name).unwrap_or_else(|| {
        eprintln!("No stored planet named '{}'. Run `exohab list` to see names.", name);
        std::process::exit(EXIT_INPUT);
    })
}

/// Score a batch, optionally save it, and print the ranked result
fn analyze(inputs: Vec<PlanetInput>, dry_run: bool, store_path: &Path, verbose: bool) {
    let start = Instant::now();
    let results = exohab::scoring::score_batch(&inputs);
    let mut records: Vec<PlanetRecord> = inputs
        .into_iter()
        .zip(results)
        .map(|(input, result)| PlanetRecord::new(input, result))
        .collect();

    records.sort_by(PlanetRecord::cmp_rank);

    let rows: Vec<ScoredPlanet> = records.iter().map(ScoredPlanet::from).collect();
    let use_colors = exohab::output::should_use_colors();
    println!("{}", exohab::output::format_scored_table(&rows, use_colors));
    println!();
    println!("{}", DISCLAIMER);

    if verbose {
        for label in Label::ALL {
            let count = records.iter().filter(|r| r.result.label == label).count();
            eprintln!("  {}: {}", label, count);
        }
        eprintln!("Scored {} planets in {:?}", records.len(), start.elapsed());
    }

    if dry_run {
        eprintln!("Dry run: store not modified");
        return;
    }

    let mut store = open_store(store_path);
    let saved = store.save(records);
    save_store(store_path, &store);
    eprintln!("Saved {} planets to {}", saved, store_path.display());
}

fn load_effective_config(path: Option<PathBuf>) -> Config {
    let config = exohab::config::load_config(path).unwrap_or_else(|e| fail(EXIT_CONFIG, "Config error", e));

    if let Err(errors) = exohab::config::validate_config(&config) {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }
    config
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = exohab::logging::init_tracing(cli.verbose) {
        eprintln!("Warning: {}", e);
    }

    if let Commands::Init = cli.command {
        if let Err(e) = exohab::config::init::run_init_wizard(cli.config) {
            fail(EXIT_CONFIG, "Init failed", e);
        }
        std::process::exit(EXIT_SUCCESS);
    }

    let config = load_effective_config(cli.config);
    let store_path = exohab::config::resolve_store_path(&config);
    tracing::debug!(store = %store_path.display(), "resolved store path");

    let use_colors = exohab::output::should_use_colors();

    match cli.command {
        Commands::Analyze { csv, dry_run } => {
            let inputs = exohab::catalog::load_csv(&csv)
                .unwrap_or_else(|e| fail(EXIT_INPUT, "Input error", e));
            if inputs.is_empty() {
                eprintln!("No planets found in {}", csv.display());
                std::process::exit(EXIT_INPUT);
            }
            analyze(inputs, dry_run, &store_path, cli.verbose);
        }
        Commands::Seed { dry_run } => {
            let inputs = exohab::catalog::demo_catalog()
                .unwrap_or_else(|e| fail(EXIT_INPUT, "Input error", e));
            analyze(inputs, dry_run, &store_path, cli.verbose);
        }
        Commands::List {
            labels,
            min_radius,
            max_radius,
            min_score,
            max_score,
            limit,
            format,
        } => {
            let store = open_store(&store_path);
            let filter = PlanetFilter::default()
                .with_labels(labels)
                .with_radius(min_radius, max_radius)
                .with_score(min_score, max_score);
            let records = store.query(&filter, limit.unwrap_or(config.query_limit));

            match format {
                OutputFormat::Table => {
                    let rows: Vec<ScoredPlanet> =
                        records.iter().map(|r| ScoredPlanet::from(*r)).collect();
                    println!("{}", exohab::output::format_scored_table(&rows, use_colors));
                }
                OutputFormat::Tsv => {
                    let rows: Vec<ScoredPlanet> =
                        records.iter().map(|r| ScoredPlanet::from(*r)).collect();
                    let tsv = exohab::output::format_tsv(&rows);
                    if !tsv.is_empty() {
                        println!("{}", tsv);
                    }
                }
                OutputFormat::Json => {
                    let json = exohab::output::format_json(&records)
                        .unwrap_or_else(|e| fail(EXIT_FAILURE, "Output error", e));
                    println!("{}", json);
                }
            }
        }
        Commands::Show { name } => {
            let store = open_store(&store_path);
            let record = require_planet(&store, &name);
            let notes = store.notes(&name);
            println!(
                "{}",
                exohab::output::format_planet_detail(record, &notes, store.is_favorite(&name), use_colors)
            );
        }
        Commands::Favorite { name } => {
            let mut store = open_store(&store_path);
            if store.get(&name).is_none() {
                tracing::warn!(name = %name, "favoriting a planet that is not stored yet");
            }
            if store.favorite(&name) {
                save_store(&store_path, &store);
                println!("Favorited: {}", name);
            } else {
                println!("Already a favorite: {}", name);
            }
        }
        Commands::Unfavorite { name } => {
            let mut store = open_store(&store_path);
            if store.unfavorite(&name) {
                save_store(&store_path, &store);
                println!("Unfavorited: {}", name);
            } else {
                println!("Not a favorite: {}", name);
            }
        }
        Commands::Favorites => {
            let store = open_store(&store_path);
            let names = store.favorites();
            if names.is_empty() {
                println!("No favorites yet.");
            } else {
                let mut records: Vec<&PlanetRecord> =
                    names.iter().filter_map(|n| store.get(n)).collect();
                records.sort_by(|a, b| a.cmp_rank(b));
                let rows: Vec<ScoredPlanet> = records.iter().map(|r| ScoredPlanet::from(*r)).collect();
                if !rows.is_empty() {
                    println!("{}", exohab::output::format_scored_table(&rows, use_colors));
                }
                for name in names.iter().filter(|n| store.get(n).is_none()) {
                    println!("  {} (not scored)", name);
                }
            }
        }
        Commands::Note { name, text } => {
            let mut store = open_store(&store_path);
            if let Err(e) = store.add_note(&name, &text) {
                fail(EXIT_INPUT, "Input error", e);
            }
            save_store(&store_path, &store);
            println!("Note saved for {}", name);
        }
        Commands::Notes { name } => {
            let store = open_store(&store_path);
            let notes = store.notes(&name);
            if notes.is_empty() {
                println!("No notes for {}.", name);
            }
            for note in notes {
                println!("[{}] {}", note.created_at.format("%Y-%m-%d %H:%M"), note.text);
            }
        }
        Commands::Dashboard => {
            let store = open_store(&store_path);
            let theme = exohab::tui::resolve_theme(config.theme);
            let app = exohab::tui::App::new(
                store,
                store_path,
                config.query_limit,
                exohab::tui::ThemeColors::for_theme(theme),
            );
            if let Err(e) = exohab::tui::run_dashboard(app, config.tick_rate_ms).await {
                fail(EXIT_FAILURE, "Dashboard error", e);
            }
        }
        // Handled before config load
        Commands::Init => {}
    }

    std::process::exit(EXIT_SUCCESS);
}
