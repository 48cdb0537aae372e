use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use sitecal_core::Config;
use tracing_subscriber::{fmt, EnvFilter};

mod commands;

#[derive(Parser)]
#[command(name = "sitecal", version, about = "Construction schedule conflict checker")]
struct Cli {
    /// Log filter when RUST_LOG is unset (overrides config log.level)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect overlapping events within each project
    Conflicts(commands::conflicts::ConflictsArgs),
    /// List events shown on a calendar day
    Day(commands::calendar::DayArgs),
    /// List the next events from now
    Upcoming(commands::calendar::UpcomingArgs),
    /// Summary metrics for an event list
    Metrics(commands::metrics::MetricsArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Generate shell completions
    Completions {
        shell: Shell,
    },
}

fn init_tracing(cli_level: Option<&str>, config: &Config) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::try_new(cli_level.unwrap_or(config.log.level.as_str()))
            .unwrap_or_else(|_| EnvFilter::new("warn"))
    });

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    // `config` loads and saves on its own; completions never touch disk.
    let config = match &cli.command {
        Commands::Config { .. } | Commands::Completions { .. } => Config::default(),
        _ => Config::load_or_default(),
    };
    init_tracing(cli.log_level.as_deref(), &config);

    let result = match cli.command {
        Commands::Conflicts(args) => commands::conflicts::run(args, &config),
        Commands::Day(args) => commands::calendar::run_day(args),
        Commands::Upcoming(args) => commands::calendar::run_upcoming(args, &config),
        Commands::Metrics(args) => commands::metrics::run(args, &config),
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "sitecal", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
