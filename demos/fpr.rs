use comfy_table::{
    Cell, CellAlignment, ContentArrangement, Table,
    modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL,
};
use murmur_bloom::{
    BloomFilter, BloomFilterOps, BloomFilterStats, common::bytes2hr,
};

const TEST_SAMPLES: u64 = 100_000;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Bloom Filter - False Positive Rate Tester");
    println!("  • Keys: sequential u64, queries start past the last insert");
    println!("  • Test Samples: {TEST_SAMPLES}\n");

    let capacities = [1_000u64, 10_000, 100_000];
    let target_fprs = [0.01, 0.05, 0.1];

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Capacity").set_alignment(CellAlignment::Center),
            Cell::new("Target FPR").set_alignment(CellAlignment::Center),
            Cell::new("Hashes").set_alignment(CellAlignment::Center),
            Cell::new("Memory").set_alignment(CellAlignment::Center),
            Cell::new("False Positives").set_alignment(CellAlignment::Center),
            Cell::new("Observed FPR").set_alignment(CellAlignment::Center),
            Cell::new("Deviation").set_alignment(CellAlignment::Center),
        ]);

    for &capacity in &capacities {
        for &target_fpr in &target_fprs {
            let mut filter = BloomFilter::new(capacity, target_fpr)?;
            for key in 0..capacity {
                filter.insert(&key);
            }

            let false_positives = (capacity..capacity + TEST_SAMPLES)
                .filter(|key| filter.contains(key))
                .count();
            let observed_fpr = false_positives as f64 / TEST_SAMPLES as f64;
            let deviation = (observed_fpr - target_fpr) / target_fpr * 100.0;

            table.add_row(vec![
                Cell::new(capacity),
                Cell::new(format!("{:.2}%", target_fpr * 100.0)),
                Cell::new(filter.num_hashes()),
                Cell::new(bytes2hr(filter.size_in_bytes() as u64)),
                Cell::new(format!("{false_positives}/{TEST_SAMPLES}")),
                Cell::new(format!("{:.4}%", observed_fpr * 100.0)),
                Cell::new(format!("{deviation:+.2}%")),
            ]);
        }
    }

    println!("{table}");
    Ok(())
}
