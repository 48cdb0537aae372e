use chrono::{DateTime, Utc};
use clap::Args;
use sitecal_core::{events_on_day, parse_day, upcoming_events, Config, Event};

#[derive(Args)]
pub struct DayArgs {
    /// Events JSON file, or - for stdin
    pub file: String,
    /// Day to show (YYYY-MM-DD, UTC)
    pub date: String,
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct UpcomingArgs {
    /// Events JSON file, or - for stdin
    pub file: String,
    /// Reference time (RFC 3339); defaults to the current time
    #[arg(long)]
    pub now: Option<String>,
    /// Number of events (default: display.upcoming_limit)
    #[arg(long)]
    pub limit: Option<usize>,
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

fn print_events(events: &[&Event], json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        println!("{}", serde_json::to_string_pretty(events)?);
        return Ok(());
    }
    for event in events {
        let start = event
            .start
            .map(|s| s.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default();
        let project = event.project_id.as_deref().unwrap_or("-");
        let trade = event.trade_tag().unwrap_or("-");
        println!("  {start}  {:<24} project={project} trade={trade}", event.label());
    }
    Ok(())
}

pub fn run_day(args: DayArgs) -> Result<(), Box<dyn std::error::Error>> {
    let day = parse_day(&args.date)?;
    let events = super::read_events(&args.file)?;
    let on_day = events_on_day(&events, day);
    if !args.json {
        println!("{} events on {day}:", on_day.len());
    }
    print_events(&on_day, args.json)
}

pub fn run_upcoming(args: UpcomingArgs, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let now = match args.now.as_deref() {
        Some(s) => DateTime::parse_from_rfc3339(s)?.with_timezone(&Utc),
        None => Utc::now(),
    };
    let limit = args.limit.unwrap_or(config.display.upcoming_limit as usize);
    let events = super::read_events(&args.file)?;
    let upcoming = upcoming_events(&events, now, limit);
    if !args.json {
        println!("Next {} events:", upcoming.len());
    }
    print_events(&upcoming, args.json)
}
