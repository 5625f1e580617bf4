use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use care_directory::data::model::Resource;

/// Minimal deterministic PRNG (splitmix64) so the sample is reproducible.
struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        SimpleRng { state: seed }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[(self.next_u64() % items.len() as u64) as usize]
    }
}

#[derive(Parser, Debug)]
#[command(about = "Write a sample resources.csv for trying the directory")]
struct Args {
    /// Output path
    #[arg(default_value = "resources.csv")]
    output: PathBuf,

    /// Number of resources to generate
    #[arg(short, long, default_value_t = 40)]
    count: usize,

    #[arg(long, default_value_t = 42)]
    seed: u64,
}

const PREFIXES: &[&str] = &[
    "Aurora", "Birch", "Cedar", "Delta", "Evergreen", "Fjord", "Granite", "Harbour",
    "Iris", "Juniper", "Kestrel", "Lakeside", "Maple", "Northern", "Orchard", "Prairie",
];
const KINDS: &[&str] = &[
    "Clinic", "Support Network", "Foundation", "Peer Circle", "Health Centre", "Helpline",
];
const CONDITIONS: &[&str] = &[
    "Cancer", "Diabetes", "ALS", "COVID", "Palliative", "Child Health", "Dementia", "Stroke",
];
const REGIONS: &[&str] = &["Central", "North", "South", "East", "West"];
const COSTS: &[&str] = &["Free", "Paid", "Sliding scale"];
const MODALITIES: &[&str] = &["Virtual", "In-person", "Both"];
const TAGS: &[&str] = &[
    "support group", "counselling", "caregivers", "nutrition", "transport", "grief", "youth",
];
const STATUSES: &[&str] = &["Open", "Waitlist"];

fn generate(rng: &mut SimpleRng, n: usize) -> Resource {
    let name = format!(
        "{} {} {}",
        rng.pick(PREFIXES),
        rng.pick(KINDS),
        n + 1
    );

    let first = rng.pick(CONDITIONS);
    let second = rng.pick(CONDITIONS);
    let conditions = if first == second {
        first.to_string()
    } else {
        format!("{first}; {second}")
    };

    let mut resource = Resource::new(name, conditions, rng.pick(REGIONS), rng.pick(COSTS))
        .with_modality(rng.pick(MODALITIES))
        .with_tags(format!("{}, {}", rng.pick(TAGS), rng.pick(TAGS)));

    let slug: String = resource
        .name
        .to_ascii_lowercase()
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect();
    resource.services = format!("Programs and referrals for people living with {first}.");
    resource.address = format!("{} Main Street", 100 + n * 7);
    resource.phone = format!("555-{:04}", rng.next_u64() % 10_000);
    resource.website = format!("https://{slug}.example.org");
    resource.email = format!("info@{slug}.example.org");
    resource.status = rng.pick(STATUSES).to_string();
    resource.language = "English".to_string();
    resource.age_restriction = if first == "Child Health" {
        "Under 18".to_string()
    } else {
        "None".to_string()
    };
    resource
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let mut rng = SimpleRng::new(args.seed);

    let mut writer = csv::Writer::from_path(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;
    for n in 0..args.count {
        writer.serialize(generate(&mut rng, n))?;
    }
    writer.flush()?;

    println!(
        "Wrote {} resources to {}",
        args.count,
        args.output.display()
    );
    Ok(())
}
