use clap::Parser;
use rand::Rng;
use rand::rngs::ThreadRng;
use rand::seq::IndexedRandom;
use std::fs;

const FIRST_NAMES: &[&str] = &[
    "Ana", "Bruno", "Carla", "Daniel", "Elisa", "Fabio", "Gabriela", "Hugo", "Isabela", "Joao",
];
const LAST_NAMES: &[&str] = &["Silva", "Costa", "Dias", "Farias", "Lima", "Souza", "Rocha"];
const REGIONS: &[&str] = &["North", "Northeast", "Midwest", "Southeast", "South"];
const CATEGORIES: &[&str] = &["Fragrance", "Daily Care", "Makeup", "Hair", "Body"];

/// Tier names with the sales range agents of that tier usually reach.
const TIERS: &[(&str, f64, f64)] = &[
    ("Seed", 100.0, 900.0),
    ("Bronze", 600.0, 1500.0),
    ("Silver", 1200.0, 2500.0),
    ("Gold", 2200.0, 3800.0),
    ("Diamond", 3500.0, 6000.0),
];

/// A CLI tool to generate synthetic agent rosters for the campaign planner
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The path to write the generated CSV file to
    #[arg(short, long, default_value = "generated_roster.csv")]
    output: String,

    /// Number of agents to generate
    #[arg(short, long, default_value_t = 50)]
    agents: usize,

    /// First agent id
    #[arg(long, default_value_t = 2001)]
    first_id: u32,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut rng = rand::rng();

    if cli.agents == 0 {
        eprintln!("Error: --agents must be at least 1");
        std::process::exit(1);
    }

    println!("Generating a roster of {} agents...", cli.agents);

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record([
        "agent_id",
        "agent_name",
        "region",
        "tier",
        "tenure_months",
        "last_cycle_sales",
        "engagement_rate",
        "preferred_category",
    ])?;

    for offset in 0..cli.agents {
        writer.write_record(generate_agent(&mut rng, cli.first_id + offset as u32))?;
    }

    let bytes = writer.into_inner()?;
    fs::write(&cli.output, bytes)?;

    println!("Successfully generated and saved roster to '{}'", cli.output);

    Ok(())
}

/// One roster row. Engagement loosely follows the tier so that filters on sales and
/// engagement select overlapping groups.
fn generate_agent(rng: &mut ThreadRng, id: u32) -> Vec<String> {
    let tier_index = rng.random_range(0..TIERS.len());
    let (tier, min_sales, max_sales) = TIERS[tier_index];
    let engagement_floor = 20 + tier_index as u32 * 15;

    let first = FIRST_NAMES.choose(rng).copied().unwrap_or("Agent");
    let last = LAST_NAMES.choose(rng).copied().unwrap_or("Doe");

    vec![
        id.to_string(),
        format!("{} {}", first, last),
        REGIONS.choose(rng).copied().unwrap_or("North").to_string(),
        tier.to_string(),
        rng.random_range(1..=(12 + tier_index as u32 * 12)).to_string(),
        format!("{:.2}", rng.random_range(min_sales..max_sales)),
        rng.random_range(engagement_floor..=100).to_string(),
        CATEGORIES.choose(rng).copied().unwrap_or("Fragrance").to_string(),
    ]
}
