use clap::Parser;
use std::process;
use tracing::Level;
use u_counterpoint::cantus::{pitch_name, Mode, Note};
use u_counterpoint::ga::{Chromosome, GaConfig, GeneticAlgorithm};
use u_counterpoint::Species;

/// Evolve a first-species counterpoint against a cantus firmus.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Cantus firmus note codes (1-16 = g .. a'', 17 = rest).
    notes: Vec<Note>,

    /// Preset cantus firmus, used when no notes are given.
    #[arg(short, long, default_value = "dorian")]
    mode: Mode,

    #[arg(short, long, default_value_t = 50)]
    population: usize,

    #[arg(short, long, default_value_t = 20)]
    generations: usize,

    #[arg(long, default_value_t = 0.9)]
    crossover_rate: f64,

    #[arg(long, default_value_t = 0.02)]
    mutation_rate: f64,

    #[arg(long, default_value = "first")]
    species: Species,

    #[arg(short, long)]
    seed: Option<u64>,

    /// Number of independent runs to compare.
    #[arg(short, long, default_value_t = 3)]
    runs: usize,

    /// Evaluate fitness and independent runs on all cores.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let notes: Vec<Note> = if cli.notes.is_empty() {
        cli.mode.notes().to_vec()
    } else {
        cli.notes.clone()
    };

    let mut config = GaConfig::default()
        .with_population_size(cli.population)
        .with_generations(cli.generations)
        .with_crossover_rate(cli.crossover_rate)
        .with_mutation_rate(cli.mutation_rate)
        .with_species(cli.species)
        .with_parallel(cli.parallel);
    config.seed = cli.seed;

    let runs = GeneticAlgorithm::run_many(&notes, &config, cli.runs).unwrap_or_else(|e| {
        eprintln!("error: {e}");
        process::exit(1);
    });

    println!("Cantus firmus: {}", render(&notes));
    for (k, run) in runs.iter().enumerate() {
        println!();
        println!("Run {}", k + 1);
        let trend: Vec<String> = run
            .best_fitness_per_generation()
            .iter()
            .map(|f| format!("{f:.2}"))
            .collect();
        println!("  best fitness per generation: {}", trend.join(" "));
        print_best("first generation", run.best_of_first_generation());
        print_best("last generation", run.best_of_last_generation());
    }
}

fn print_best(label: &str, best: Option<&Chromosome>) {
    if let Some(best) = best {
        let fitness = best.cached_fitness(Species::First).unwrap_or(f64::NAN);
        println!("  best of {label} ({fitness:.2}): {}", render(best.gene_slice()));
    }
}

fn render(notes: &[Note]) -> String {
    notes
        .iter()
        .map(|&n| format!("{n}:{}", pitch_name(n).unwrap_or("?")))
        .collect::<Vec<_>>()
        .join(" ")
}
