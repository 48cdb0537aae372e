use clap::Args;
use sitecal_core::{ConflictDetector, Config, MetricsSource, ScheduleMetrics};

#[derive(Args)]
pub struct MetricsArgs {
    /// Events JSON file, or - for stdin
    pub file: String,
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: MetricsArgs, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let events = super::read_events(&args.file)?;
    let detector = ConflictDetector::new().with_strategy(config.detection.strategy);
    let metrics = ScheduleMetrics::compute(&events, &detector);

    if args.json {
        let mut snapshot = serde_json::Map::new();
        for (name, value) in metrics.snapshot() {
            snapshot.insert(name, serde_json::to_value(value)?);
        }
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        for (name, value) in metrics.snapshot() {
            println!("{name:<20} {value}");
        }
    }
    Ok(())
}
