use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueHint};

/// Write a deterministic synthetic launch records CSV.
#[derive(Parser, Debug)]
#[command(about = "Generate a sample launch records CSV", long_about = None)]
struct Args {
    /// Output path
    #[arg(default_value = "spacex_launch_dash.csv", value_hint = ValueHint::FilePath)]
    output: PathBuf,

    /// Number of launches to generate
    #[arg(short, long, default_value_t = 56)]
    launches: usize,

    /// PRNG seed
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5)).rotate_left(7).wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn pick<'a>(&mut self, items: &'a [&'a str]) -> &'a str {
        items[(self.next_u64() % items.len() as u64) as usize]
    }
}

/// Booster generations in flight order: (category, version prefix,
/// success probability, typical payload ceiling in kg).
const GENERATIONS: [(&str, &str, f64, f64); 5] = [
    ("v1.0", "F9 v1.0", 0.2, 700.0),
    ("v1.1", "F9 v1.1", 0.35, 4500.0),
    ("FT", "F9 FT", 0.7, 6500.0),
    ("B4", "F9 B4", 0.6, 9600.0),
    ("B5", "F9 B5", 0.9, 9600.0),
];

const EARLY_SITES: [&str; 2] = ["CCAFS LC-40", "VAFB SLC-4E"];
const LATE_SITES: [&str; 3] = ["KSC LC-39A", "CCAFS SLC-40", "VAFB SLC-4E"];

fn main() -> Result<()> {
    let args = Args::parse();
    let mut rng = SimpleRng::new(args.seed);
    let mut writer = csv::Writer::from_path(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;

    writer.write_record([
        "",
        "Flight Number",
        "Launch Site",
        "class",
        "Payload Mass (kg)",
        "Booster Version",
        "Booster Version Category",
    ])?;

    for i in 0..args.launches {
        let flight = i + 1;
        // Later flights use later booster generations.
        let generation = (i * GENERATIONS.len() / args.launches.max(1)).min(GENERATIONS.len() - 1);
        let (category, prefix, success_rate, ceiling) = GENERATIONS[generation];

        let site = if generation < 2 {
            rng.pick(&EARLY_SITES)
        } else {
            rng.pick(&LATE_SITES)
        };
        let payload = if generation == 0 && rng.next_f64() < 0.4 {
            0.0
        } else {
            (rng.next_f64() * ceiling).round()
        };
        let class = u8::from(rng.next_f64() < success_rate);
        let version = format!("{prefix}  B{:04}", 1000 + flight);

        writer.write_record([
            i.to_string(),
            flight.to_string(),
            site.to_string(),
            class.to_string(),
            format!("{payload:.1}"),
            version,
            category.to_string(),
        ])?;
    }
    writer.flush()?;

    println!("Wrote {} launches to {}", args.launches, args.output.display());
    Ok(())
}
