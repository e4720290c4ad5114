//! Measure recall accuracy under noisy queries
//!
//! Trains one plain and one auto-associative Lernmatrix on the same random
//! binary patterns, then recalls corrupted copies of them at increasing
//! flip counts.
//!
//! Usage:
//!   cargo run --bin noise_probe -- --size 8 --max-flips 4

use anyhow::Result;
use clap::Parser;
use lernmatrix::{
    encoding::{active_classes, one_hot},
    memory::{flip_random_bits, InputMode, Lernmatrix, LernmatrixConfig},
};
use rand::Rng;

#[derive(Parser, Debug)]
#[command(name = "noise_probe")]
#[command(about = "Measure recall accuracy under noisy queries")]
struct Args {
    /// Matrix side length (pattern width and class count)
    #[arg(short, long, default_value = "8")]
    size: usize,

    /// Largest number of query bit flips to probe
    #[arg(long, default_value = "4")]
    max_flips: usize,

    /// Recall trials per flip count
    #[arg(long, default_value = "200")]
    trials: usize,

    /// Correction increment
    #[arg(long, default_value = "1.0")]
    epsilon: f64,

    /// Bit error rate for the auto-associative engine
    #[arg(long, default_value = "0.125")]
    bit_error: f64,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    if args.size == 0 || args.trials == 0 {
        return Err(anyhow::anyhow!("size and trials must be positive"));
    }

    // One random binary pattern per class
    let mut rng = rand::thread_rng();
    let patterns: Vec<Vec<f64>> = (0..args.size)
        .map(|_| {
            (0..args.size)
                .map(|_| if rng.gen::<f64>() < 0.5 { 1.0 } else { 0.0 })
                .collect()
        })
        .collect();

    let base = LernmatrixConfig::new(args.size, args.size)
        .with_epsilon(args.epsilon)
        .with_mode(InputMode::Binary);

    let mut plain = Lernmatrix::with_config(base.clone())?;
    let mut assoc = Lernmatrix::with_config(
        base.with_autoassociate(true).with_bit_error(args.bit_error),
    )?;

    for (class, pattern) in patterns.iter().enumerate() {
        let label = one_hot(class, args.size);
        plain.learn(pattern, &label)?;
        assoc.learn(pattern, &label)?;
    }
    log::info!("Trained both engines on {} patterns", args.size);

    println!("\n=== Probe Setup ===");
    println!("Matrix size:   {}x{}", args.size, args.size);
    println!("Trials:        {} per flip count", args.trials);
    println!("Epsilon:       {:.2}", args.epsilon);
    println!("Bit error:     {:.3}", args.bit_error);

    println!("\n=== Noise Tolerance ===");
    println!("Flips | Plain    | Auto-assoc");
    for flips in 0..=args.max_flips {
        let plain_acc = probe(&plain, &patterns, flips, args.trials)?;
        let assoc_acc = probe(&assoc, &patterns, flips, args.trials)?;
        println!(
            "{:>5} | {:>7.1}% | {:>7.1}%",
            flips,
            plain_acc * 100.0,
            assoc_acc * 100.0
        );
    }

    Ok(())
}

/// Fraction of noisy recalls that answer exactly the right class
fn probe(lm: &Lernmatrix, patterns: &[Vec<f64>], n_flips: usize, trials: usize) -> Result<f64> {
    let mut rng = rand::thread_rng();
    let mut hits = 0;

    for _ in 0..trials {
        let class = rng.gen_range(0..patterns.len());
        let noisy = flip_random_bits(&patterns[class], n_flips);
        let recalled = lm.recall(&noisy)?;
        if active_classes(&recalled) == vec![class] {
            hits += 1;
        }
    }

    Ok(hits as f64 / trials as f64)
}
