mod commands;
mod config;
mod settings;

use std::path::PathBuf;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use settings::Settings;

#[derive(Parser)]
#[command(name = "gitfit")]
#[command(author, version, about = "Workout activity calendar and streak tracker")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, global = true, help = "Enable debug logging")]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Show activity totals and streaks")]
    Activity {
        #[command(flatten)]
        source: SourceArgs,
        #[command(flatten)]
        window: WindowArgs,
        #[arg(long, help = "Output as JSON")]
        json: bool,
    },
    #[command(about = "Export the activity calendar as JSON")]
    Graph {
        #[command(flatten)]
        source: SourceArgs,
        #[command(flatten)]
        window: WindowArgs,
        #[arg(long, help = "Write to file instead of stdout")]
        output: Option<PathBuf>,
    },
    #[command(about = "Draw the activity calendar in the terminal")]
    Heatmap {
        #[command(flatten)]
        source: SourceArgs,
        #[command(flatten)]
        window: WindowArgs,
    },
    #[command(about = "Show stats for a directory of workout files")]
    Workouts {
        #[arg(long, help = "Directory containing workout JSON files")]
        dir: PathBuf,
        #[arg(long, default_value = "5", help = "Number of recent workouts to list")]
        recent: usize,
        #[arg(long, value_parser = parse_date_arg, help = "Show only the workouts logged on this date (YYYY-MM-DD)")]
        date: Option<NaiveDate>,
        #[arg(long, value_parser = parse_date_arg, help = "Reference date for streaks (YYYY-MM-DD)")]
        today: Option<NaiveDate>,
        #[arg(long, help = "Output as JSON")]
        json: bool,
    },
    #[command(about = "Connect a code-hosting account as the live activity source")]
    Connect {
        #[arg(long, help = "Account username")]
        username: String,
        #[arg(long, help = "Saved public event feed for this account (JSON)")]
        events: Option<PathBuf>,
    },
    #[command(about = "Disconnect the code-hosting account")]
    Disconnect,
}

#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    #[arg(long, help = "Public event feed JSON file ('-' for stdin)", conflicts_with_all = ["records", "demo"])]
    pub events: Option<PathBuf>,
    #[arg(long, help = "Daily {date, count} records JSON file ('-' for stdin)", conflicts_with = "demo")]
    pub records: Option<PathBuf>,
    #[arg(long, help = "Use generated demo data")]
    pub demo: bool,
}

#[derive(Args, Debug, Clone, Default)]
pub struct WindowArgs {
    #[arg(
        long,
        help = "Number of days ending at the window end",
        conflicts_with = "since",
        value_parser = clap::value_parser!(u32)
            .range(i64::from(settings::MIN_WINDOW_DAYS)..=i64::from(settings::MAX_WINDOW_DAYS))
    )]
    pub days: Option<u32>,
    #[arg(long, value_parser = parse_date_arg, help = "Start date (YYYY-MM-DD)")]
    pub since: Option<NaiveDate>,
    #[arg(long, value_parser = parse_date_arg, help = "End date (YYYY-MM-DD)")]
    pub until: Option<NaiveDate>,
    #[arg(long, value_parser = parse_date_arg, help = "Treat this date as today (YYYY-MM-DD)")]
    pub today: Option<NaiveDate>,
}

fn parse_date_arg(s: &str) -> std::result::Result<NaiveDate, String> {
    gitfit_core::records::parse_day(s).ok_or_else(|| format!("'{}' is not a YYYY-MM-DD date", s))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug);

    let settings = Settings::load();

    match cli.command {
        Commands::Activity {
            source,
            window,
            json,
        } => commands::activity::run_activity(&settings, &source, &window, json),
        Commands::Graph {
            source,
            window,
            output,
        } => commands::activity::run_graph(&settings, &source, &window, output),
        Commands::Heatmap { source, window } => {
            commands::activity::run_heatmap(&settings, &source, &window)
        }
        Commands::Workouts {
            dir,
            recent,
            date,
            today,
            json,
        } => match date {
            Some(date) => commands::workouts::run_day(&dir, date, json),
            None => commands::workouts::run(&dir, recent, today, json),
        },
        Commands::Connect { username, events } => run_connect_command(settings, username, events),
        Commands::Disconnect => run_disconnect_command(settings),
    }
}

fn init_logging(debug: bool) {
    use tracing_subscriber::EnvFilter;

    let default_level = if debug { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run_connect_command(
    mut settings: Settings,
    username: String,
    events: Option<PathBuf>,
) -> Result<()> {
    use colored::Colorize;

    let username = username.trim().trim_start_matches('@').to_string();
    if username.is_empty() {
        anyhow::bail!("username must not be empty");
    }

    let events_path = match events {
        Some(path) => Some(
            std::fs::canonicalize(&path)
                .map_err(|e| anyhow::anyhow!("Cannot read event feed {}: {}", path.display(), e))?,
        ),
        None => None,
    };

    settings.github_connected = true;
    settings.github_username = Some(username.clone());
    settings.events_path = events_path;
    settings.save()?;

    println!("{}", format!("\n  ✓ Connected as @{}\n", username).green());
    if settings.events_path.is_none() {
        println!(
            "{}",
            "  No event feed saved; pass --events to activity commands\n".bright_black()
        );
    }
    Ok(())
}

fn run_disconnect_command(mut settings: Settings) -> Result<()> {
    use colored::Colorize;

    if !settings.github_connected {
        println!("{}", "\n  Not connected.\n".bright_black());
        return Ok(());
    }

    let username = settings.github_username.take().unwrap_or_default();
    settings.github_connected = false;
    settings.events_path = None;
    settings.save()?;

    println!("{}", format!("\n  ✓ Disconnected @{}\n", username).green());
    Ok(())
}

fn format_count(n: u64) -> String {
    if n >= 1_000_000_000 {
        format!("{:.1}B", n as f64 / 1_000_000_000.0)
    } else if n >= 1_000_000 {
        format!("{:.1}M", n as f64 / 1_000_000.0)
    } else if n >= 10_000 {
        format!("{:.1}K", n as f64 / 1_000.0)
    } else {
        n.to_string()
    }
}

fn format_weight(w: f64) -> String {
    if w.fract() == 0.0 {
        format!("{:.0}kg", w)
    } else {
        format!("{:.1}kg", w)
    }
}

fn format_days(n: u32) -> String {
    if n == 1 {
        "1 day".to_string()
    } else {
        format!("{} days", n)
    }
}
