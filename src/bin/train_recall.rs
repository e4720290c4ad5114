//! Train a Lernmatrix on labeled patterns and replay recall
//!
//! Usage:
//!   cargo run --bin train_recall -- --input data/patterns.csv --mode binary

use anyhow::Result;
use clap::Parser;
use lernmatrix::{
    dataset::LabeledPatterns,
    encoding::{active_classes, parse_pattern},
    memory::{InputMode, Lernmatrix, LernmatrixConfig},
    validate::DomainKind,
};
use ordered_float::OrderedFloat;

#[derive(Parser, Debug)]
#[command(name = "train_recall")]
#[command(about = "Train a Lernmatrix on labeled patterns and replay recall")]
struct Args {
    /// Input CSV file with feature columns and a trailing class column
    #[arg(short, long)]
    input: String,

    /// Input domain (binary, real)
    #[arg(short, long, default_value = "real")]
    mode: String,

    /// Correction increment
    #[arg(long, default_value = "1.0")]
    epsilon: f64,

    /// Enable auto-associative training (requires width == classes)
    #[arg(long, default_value = "false")]
    autoassociate: bool,

    /// Bit error rate for auto-associative passes
    #[arg(long, default_value = "0.01")]
    bit_error: f64,

    /// Number of ranked classes to show for the sample query
    #[arg(long, default_value = "5")]
    top: usize,

    /// Optional file of extra query patterns, one per line
    #[arg(short, long)]
    queries: Option<String>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    log::info!("Loading patterns from {}", args.input);
    let data = LabeledPatterns::from_csv(&args.input)?;
    log::info!("Loaded {} examples", data.len());

    if data.is_empty() {
        return Err(anyhow::anyhow!("no training examples in {}", args.input));
    }

    let mode = match args.mode.as_str() {
        "binary" => InputMode::Binary,
        _ => InputMode::RealValued,
    };

    let config = LernmatrixConfig::new(data.x_length(), data.n_classes)
        .with_epsilon(args.epsilon)
        .with_mode(mode)
        .with_autoassociate(args.autoassociate)
        .with_bit_error(args.bit_error);
    let mut lm = Lernmatrix::with_config(config)?;

    let labels = data.one_hot_labels();
    lm.learn_batch(&data.patterns, &labels)?;
    log::info!("Trained on {} examples", data.len());

    // Replay the training set through recall
    let mut clean_hits = 0;
    let mut ambiguous = 0;
    for (pattern, &class) in data.patterns.iter().zip(data.classes.iter()) {
        let recalled = lm.recall(pattern)?;
        let winners = active_classes(&recalled);
        if winners == vec![class] {
            clean_hits += 1;
        } else if winners.len() > 1 && winners.contains(&class) {
            ambiguous += 1;
        }
    }

    println!("\n=== Training Report ===");
    println!("Examples:      {}", data.len());
    println!("Input width:   {}", data.x_length());
    println!("Classes:       {}", data.n_classes);
    println!(
        "Mode:          {}",
        match mode {
            InputMode::Binary => "binary",
            InputMode::RealValued => "real-valued",
        }
    );
    println!(
        "Clean recall:  {}/{} ({:.1}%)",
        clean_hits,
        data.len(),
        clean_hits as f64 / data.len() as f64 * 100.0
    );
    println!(
        "Tied recall:   {}/{} ({:.1}%)",
        ambiguous,
        data.len(),
        ambiguous as f64 / data.len() as f64 * 100.0
    );

    let stats = lm.stats();
    println!("\n=== Matrix Statistics ===");
    println!("Dimensions:    {}x{}", stats.y_length, stats.x_length);
    println!("Examples seen: {}", stats.examples_seen);
    println!(
        "Nonzero cells: {}/{}",
        stats.nonzero_cells,
        stats.y_length * stats.x_length
    );
    println!(
        "Weight range:  [{:.4}, {:.4}]",
        stats.weight_min, stats.weight_max
    );

    // Ranked scores on the last training pattern
    if let Some(sample) = data.patterns.last() {
        println!("\n=== Sample Query (last training pattern) ===");
        print_ranked_scores(&lm, sample, args.top)?;
    }

    if let Some(path) = &args.queries {
        let text = std::fs::read_to_string(path)?;
        println!("\n=== Queries from {} ===", path);

        for line in text.lines().filter(|l| !l.trim().is_empty()) {
            let query = parse_pattern(line)?;
            let recalled = lm.recall(&query)?;
            let winners = active_classes(&recalled);
            println!("{} -> classes {:?}", line.trim(), winners);
        }
    }

    Ok(())
}

/// Print the top classes for a query, ordered best-first for its domain
fn print_ranked_scores(lm: &Lernmatrix, query: &[f64], top: usize) -> Result<()> {
    let domain = lm.classify(query)?;
    let scores = lm.recall_scores(query)?;

    let mut indexed: Vec<(usize, f64)> = scores.iter().cloned().enumerate().collect();
    match domain {
        // Dot products: higher is better
        DomainKind::Binary => indexed.sort_by_key(|(_, s)| std::cmp::Reverse(OrderedFloat(*s))),
        // Asymptote distances: lower is better
        DomainKind::RealValued => indexed.sort_by_key(|(_, s)| OrderedFloat(*s)),
    }

    for (class, score) in indexed.into_iter().take(top) {
        println!("  Class {}: score={:.4}", class, score);
    }

    Ok(())
}
