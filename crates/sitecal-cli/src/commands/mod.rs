pub mod calendar;
pub mod config;
pub mod conflicts;
pub mod metrics;

use std::io::Read;
use std::path::Path;

use sitecal_core::{parse_events, Event};

/// Read events from a JSON file, or from stdin when `source` is `-`.
pub fn read_events(source: &str) -> Result<Vec<Event>, Box<dyn std::error::Error>> {
    if source == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        return Ok(parse_events(&buf)?);
    }
    Ok(sitecal_core::load_events(Path::new(source))?)
}
