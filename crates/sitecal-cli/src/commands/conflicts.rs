use clap::Args;
use sitecal_core::{
    cap_conflicts, filter_events, ConflictDetector, Config, DetectionStrategy, ProjectFilter,
};

#[derive(Args)]
pub struct ConflictsArgs {
    /// Events JSON file, or - for stdin
    pub file: String,
    /// Only check events of this project
    #[arg(long, conflicts_with = "unassigned")]
    pub project: Option<String>,
    /// Only check events with no project
    #[arg(long)]
    pub unassigned: bool,
    /// Conflicts to show (default: display.max_conflicts)
    #[arg(long, conflicts_with = "all")]
    pub limit: Option<usize>,
    /// Show every conflict
    #[arg(long)]
    pub all: bool,
    /// Detection algorithm: pairwise or sweep (default: detection.strategy)
    #[arg(long)]
    pub strategy: Option<DetectionStrategy>,
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl ConflictsArgs {
    fn filter(&self) -> ProjectFilter {
        match (&self.project, self.unassigned) {
            (Some(id), _) => ProjectFilter::Project(id.clone()),
            (None, true) => ProjectFilter::Unassigned,
            (None, false) => ProjectFilter::All,
        }
    }
}

pub fn run(args: ConflictsArgs, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let events = super::read_events(&args.file)?;
    let filter = args.filter();
    let selected = filter_events(&events, &filter);

    let strategy = args.strategy.unwrap_or(config.detection.strategy);
    let conflicts = ConflictDetector::new().with_strategy(strategy).detect(&selected);

    let limit = if args.all {
        usize::MAX
    } else {
        args.limit.unwrap_or(config.display.max_conflicts as usize)
    };
    let capped = cap_conflicts(conflicts, limit);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&capped)?);
        return Ok(());
    }

    if capped.total() == 0 {
        println!("No conflicts among {} events ({filter}).", selected.len());
        return Ok(());
    }

    println!("{} conflicts ({filter}):", capped.total());
    for c in &capped.shown {
        println!(
            "  [{}] {} <-> {} ({} min overlap)",
            c.severity,
            c.event_a.label(),
            c.event_b.label(),
            c.overlap().num_minutes()
        );
    }
    if capped.is_truncated() {
        println!("  ... and {} more (use --all to show)", capped.hidden);
    }
    Ok(())
}
