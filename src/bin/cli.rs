use std::ops::Range;

use clap::{Parser, Subcommand};
use murmur_bloom::{
    BloomFilter, BloomFilterConfigBuilder, BloomFilterOps, BloomFilterStats,
    BloomParams, DEFAULT_SEED, common::bytes2hr, murmur3_x64_128,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the parameters a filter would be built with
    Params {
        /// Expected number of entries
        #[arg(short, long, default_value = "10000")]
        entries: u64,

        /// False positive rate (between 0 and 1)
        #[arg(short, long, default_value = "0.01")]
        fpr: f64,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Hash a UTF-8 string with MurmurHash3 x64/128
    Hash {
        /// Input to hash
        input: String,

        /// Hash seed
        #[arg(short, long, default_value_t = DEFAULT_SEED)]
        seed: u32,
    },

    /// Measure the observed false positive rate of a filled filter
    Fpr {
        /// Expected (and inserted) number of entries
        #[arg(short, long, default_value = "10000")]
        entries: u64,

        /// False positive rate (between 0 and 1)
        #[arg(short, long, default_value = "0.01")]
        fpr: f64,

        /// Number of never-inserted keys to query
        #[arg(short, long, default_value = "100000")]
        samples: u64,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Params { entries, fpr, json } => {
            let config = BloomFilterConfigBuilder::default()
                .expected_entries(*entries)
                .false_positive_rate(*fpr)
                .build()?;
            let params = BloomParams::try_from(&config)?;

            if *json {
                println!("{}", serde_json::to_string_pretty(&params)?);
            } else {
                println!("Bloom Filter Parameters:");
                println!("  Expected entries: {entries}");
                println!("  False positive rate: {fpr}");
                println!("  Bits per entry: {:.4}", params.bits_per_entry);
                println!("  Number of hash functions: {}", params.num_hashes);
                println!("  Bit length: {}", params.bit_length);
                println!("  Memory: {}", bytes2hr(params.size_in_bytes()));
            }
        }
        Commands::Hash { input, seed } => {
            let (h1, h2) = murmur3_x64_128(input.as_bytes(), *seed);
            println!("h1: {h1:#018x}");
            println!("h2: {h2:#018x}");
        }
        Commands::Fpr {
            entries,
            fpr,
            samples,
        } => {
            let absent = sample_range(*entries, *samples)?;
            let mut filter = BloomFilter::new(*entries, *fpr)?;
            info!(
                bit_length = filter.bit_length(),
                num_hashes = filter.num_hashes(),
                "filling filter"
            );

            for key in 0..*entries {
                filter.insert(&key);
            }

            let false_positives =
                absent.filter(|key| filter.contains(key)).count();
            let observed = false_positives as f64 / *samples as f64;

            println!("Target FPR: {:.4}%", fpr * 100.0);
            println!(
                "Observed FPR: {:.4}% ({false_positives}/{samples})",
                observed * 100.0
            );
            println!(
                "Estimated from fill: {:.4}%",
                filter.estimated_false_positive_rate() * 100.0
            );
            println!("Fill ratio: {:.2}%", filter.fill_ratio() * 100.0);
        }
    }

    Ok(())
}

/// Keys `entries..entries + samples`, none of which were inserted.
fn sample_range(entries: u64, samples: u64) -> Result<Range<u64>, String> {
    if samples == 0 {
        return Err("samples must be greater than 0".into());
    }
    let end = entries.checked_add(samples).ok_or_else(|| {
        format!("entries ({entries}) + samples ({samples}) overflows u64")
    })?;
    Ok(entries..end)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_range() {
        assert_eq!(sample_range(10, 5), Ok(10..15));
        assert!(sample_range(10, 0).is_err());
        assert!(sample_range(u64::MAX, 1).is_err());
        assert_eq!(sample_range(u64::MAX - 1, 1), Ok(u64::MAX - 1..u64::MAX));
    }
}
