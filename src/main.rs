//! tankcycle - command-line front end for the nitrogen cycle tracker

use anyhow::{Context, Result, bail};
use chrono::{DateTime, NaiveDate, Utc};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

use tankcycle::config::Config;
use tankcycle::db::SqliteStore;
use tankcycle::models::{Category, Priority, Task, WaterReading};
use tankcycle::store::TankStore;
use tankcycle::views::{self, TaskFilter, TaskStats};

#[derive(Parser)]
#[command(name = "tankcycle")]
#[command(about = "Track the nitrogen cycle of a new aquarium")]
#[command(version)]
struct Cli {
    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new config file
    Init {
        /// Output path for config file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show where the cycle stands
    Status,

    /// List the cycling timeline
    Phases,

    /// Record and manage water readings
    #[command(subcommand)]
    Reading(ReadingCommand),

    /// Manage setup tasks
    #[command(subcommand)]
    Task(TaskCommand),

    /// Set or show the cycle start date
    #[command(subcommand)]
    Start(StartCommand),

    /// Dark/light display preference
    #[command(subcommand)]
    Theme(ThemeCommand),
}

#[derive(Args)]
struct ReadingValues {
    /// Ammonia, ppm
    #[arg(long)]
    ammonia: f64,
    /// Nitrite, ppm
    #[arg(long)]
    nitrite: f64,
    /// Nitrate, ppm
    #[arg(long)]
    nitrate: f64,
    #[arg(long)]
    ph: f64,
    /// Water temperature, °F
    #[arg(long)]
    temperature: f64,
    #[arg(long)]
    notes: Option<String>,
}

impl ReadingValues {
    fn into_reading(self, date: DateTime<Utc>) -> WaterReading {
        WaterReading {
            date,
            ammonia: self.ammonia,
            nitrite: self.nitrite,
            nitrate: self.nitrate,
            ph: self.ph,
            temperature: self.temperature,
            notes: self.notes.filter(|n| !n.trim().is_empty()),
        }
    }
}

#[derive(Subcommand)]
enum ReadingCommand {
    /// Record a reading taken now
    Add(ReadingValues),
    /// List readings, newest first
    List,
    /// Replace the reading at a position (see `reading list`)
    Update {
        position: usize,
        #[command(flatten)]
        values: ReadingValues,
    },
    /// Delete the reading at a position (see `reading list`)
    Delete { position: usize },
}

#[derive(Subcommand)]
enum TaskCommand {
    /// Add a custom task
    Add {
        text: String,
        /// Phase number (defaults to the current phase)
        #[arg(long)]
        phase: Option<usize>,
        /// Due date, YYYY-MM-DD
        #[arg(long, value_parser = parse_day)]
        due: Option<DateTime<Utc>>,
        #[arg(long, default_value = "medium")]
        priority: Priority,
        #[arg(long, default_value = "maintenance")]
        category: Category,
    },
    /// List tasks in their canonical order
    List {
        /// Hide completed tasks
        #[arg(long, conflicts_with = "all")]
        pending: bool,
        /// Include completed tasks even if the config hides them
        #[arg(long)]
        all: bool,
        #[arg(long)]
        phase: Option<usize>,
        #[arg(long)]
        category: Option<Category>,
        #[arg(long)]
        priority: Option<Priority>,
    },
    /// Mark a task done, or not done again
    Toggle { id: String },
    /// Delete a task
    Delete { id: String },
    /// Set a task's due date; omit the date to clear it
    Due {
        id: String,
        #[arg(value_parser = parse_day)]
        date: Option<DateTime<Utc>>,
    },
}

#[derive(Subcommand)]
enum StartCommand {
    /// Set the day cycling started, YYYY-MM-DD
    Set {
        #[arg(value_parser = parse_day)]
        date: DateTime<Utc>,
    },
    Show,
    /// Forget the start date and fall back to the earliest reading
    Clear,
}

#[derive(Subcommand)]
enum ThemeCommand {
    Show,
    Toggle,
}

fn parse_day(s: &str) -> Result<DateTime<Utc>, String> {
    let day = NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| format!("expected YYYY-MM-DD: {e}"))?;
    Ok(day.and_time(chrono::NaiveTime::MIN).and_utc())
}

fn format_day(date: DateTime<Utc>) -> String {
    date.format("%B %-d, %Y").to_string()
}

type Store = TankStore<SqliteStore>;

fn init_config(output: Option<PathBuf>) -> Result<()> {
    let path = output.unwrap_or_else(|| PathBuf::from("config.toml"));
    let cfg = Config::default();
    cfg.save_to(&path)?;

    println!("Created config file: {}", path.display());
    println!("Data will be stored in {}", cfg.storage.path.display());
    Ok(())
}

/// Load the config, then open the store it points at
fn open_store(config: Option<&Path>) -> Result<(Config, Store)> {
    let cfg = match config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let db = SqliteStore::open(&cfg.storage.path).context("Failed to open database")?;
    let store = TankStore::open(db).context("Failed to load tank data")?;
    Ok((cfg, store))
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(
                    "tankcycle=info"
                        .parse::<tracing_subscriber::filter::Directive>()
                        .context("Invalid log directive")?,
                ),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.config.as_deref();

    match cli.command {
        Commands::Init { output } => init_config(output)?,
        Commands::Status => {
            let (_, store) = open_store(config)?;
            print_status(&store);
        }
        Commands::Phases => {
            let (_, store) = open_store(config)?;
            print_phases(&store);
        }
        Commands::Reading(cmd) => {
            let (_, mut store) = open_store(config)?;
            run_reading(&mut store, cmd)?;
        }
        Commands::Task(cmd) => {
            let (cfg, mut store) = open_store(config)?;
            run_task(&mut store, &cfg, cmd)?;
        }
        Commands::Start(cmd) => {
            let (_, mut store) = open_store(config)?;
            run_start(&mut store, cmd)?;
        }
        Commands::Theme(cmd) => {
            let (_, mut store) = open_store(config)?;
            match cmd {
                ThemeCommand::Show => println!("{}", theme_name(store.dark_mode())),
                ThemeCommand::Toggle => {
                    let dark = store.toggle_dark_mode()?;
                    println!("Switched to {} mode", theme_name(dark));
                }
            }
        }
    }

    Ok(())
}

fn theme_name(dark: bool) -> &'static str {
    if dark { "dark" } else { "light" }
}

fn print_status(store: &Store) {
    let Some(progress) = store.progress() else {
        println!("No start date yet.");
        println!("Set one with: tankcycle start set YYYY-MM-DD");
        return;
    };
    let phases = store.timeline();

    println!(
        "Started on {} ({} days ago)",
        format_day(progress.start),
        progress.elapsed_days
    );
    println!("Overall progress: {}%", progress.overall_percent);

    if let Some(phase) = progress.phase(phases) {
        println!();
        println!("Current phase: {}", phase.name);
        println!("  {}", phase.description);
        println!("  Phase progress: {}%", progress.phase_percent);
        if let Some(ends) = progress.phase_ends {
            println!("  Expected to end: {}", format_day(ends));
        }
        println!(
            "  Expected readings: ammonia {}, nitrite {}, nitrate {}",
            phase.expected_readings.ammonia,
            phase.expected_readings.nitrite,
            phase.expected_readings.nitrate
        );
    }

    if let Some(latest) = views::latest_reading(store.readings()) {
        println!();
        println!("Latest reading ({}):", format_day(latest.date));
        print_reading_values(latest);
    }

    let now = store.now();
    let stats = TaskStats::compute(store.tasks(), phases.len(), now);
    println!();
    println!(
        "Tasks: {}/{} done ({}%), {} overdue, {} due soon",
        stats.completed, stats.total, stats.percent_complete, stats.overdue, stats.due_soon
    );

    if let Some(current) = progress.phase_index {
        let backlog = views::phase_backlog(store.tasks(), current, 3);
        if !backlog.is_empty() {
            println!();
            println!("To do this phase:");
            for task in &backlog {
                print_task_line(store, task);
            }
        }
        let upcoming = views::upcoming(store.tasks(), current, 3);
        if !upcoming.is_empty() {
            println!();
            println!("Coming up:");
            for task in &upcoming {
                print_task_line(store, task);
            }
        }
    }

    let next_due = views::next_due(store.tasks(), 2);
    if !next_due.is_empty() {
        println!();
        println!("Next due:");
        for task in &next_due {
            print_task_line(store, task);
        }
    }
}

fn print_phases(store: &Store) {
    let current = store.current_phase_index();
    let start = store.cycle_start();
    for (idx, phase) in store.timeline().iter().enumerate() {
        let marker = if Some(idx) == current { "▶" } else { " " };
        println!(
            "{} {}. {} (days {}-{})",
            marker, idx, phase.name, phase.start_day, phase.end_day
        );
        println!("     {}", phase.description);
        if let Some(start) = start {
            println!(
                "     Ends: {}",
                format_day(tankcycle::phase::phase_end_date(phase, start))
            );
        }
        for task in phase.tasks {
            println!("     • {}", task);
        }
    }
}

fn print_reading_values(r: &WaterReading) {
    println!(
        "  NH3 {} ppm | NO2 {} ppm | NO3 {} ppm | pH {} | {}°F",
        r.ammonia, r.nitrite, r.nitrate, r.ph, r.temperature
    );
    if let Some(notes) = &r.notes {
        println!("  {}", notes);
    }
}

fn print_task_line(store: &Store, task: &Task) {
    let now = store.now();
    let check = if task.completed { "[x]" } else { "[ ]" };
    let phase_name = store
        .timeline()
        .get(task.phase_id)
        .map_or("?", |p| p.name);

    let mut due = String::new();
    if let Some(date) = task.due_date {
        due = format!(" due {}", format_day(date));
        if !task.completed && views::is_overdue(task, now) {
            due.push_str(" (overdue)");
        } else if !task.completed && views::is_due_soon(task, now) {
            due.push_str(" (due soon)");
        }
    } else if let Some(start) = store.cycle_start()
        && let Some(estimate) = views::effective_due_date(task, store.timeline(), start)
    {
        due = format!(" ~{}", format_day(estimate));
    }

    println!(
        "  {} {} [{}, {}, {}]{}  {}",
        check,
        task.text,
        task.priority.as_str(),
        task.category.as_str(),
        phase_name,
        due,
        task.id
    );
}

fn run_reading(store: &mut Store, cmd: ReadingCommand) -> Result<()> {
    match cmd {
        ReadingCommand::Add(values) => {
            let reading = values.into_reading(store.now());
            store.add_reading(reading)?;
            println!("Reading saved ({} total).", store.readings().len());
        }
        ReadingCommand::List => {
            let readings = views::readings_newest_first(store.readings());
            if readings.is_empty() {
                println!("No readings recorded yet.");
            }
            for (position, reading) in &readings {
                println!("#{} {}", position, reading.date.format("%Y-%m-%d %H:%M"));
                print_reading_values(reading);
            }
        }
        ReadingCommand::Update { position, values } => {
            let date = store
                .readings()
                .get(position)
                .map(|r| r.date)
                .unwrap_or_else(|| store.now());
            store.update_reading(position, values.into_reading(date))?;
            println!("Reading #{} updated.", position);
        }
        ReadingCommand::Delete { position } => {
            store.delete_reading(position)?;
            println!("Reading #{} deleted.", position);
        }
    }
    Ok(())
}

fn run_task(store: &mut Store, cfg: &Config, cmd: TaskCommand) -> Result<()> {
    match cmd {
        TaskCommand::Add {
            text,
            phase,
            due,
            priority,
            category,
        } => {
            if text.trim().is_empty() {
                bail!("Task text is required");
            }
            let phase = phase.or_else(|| store.current_phase_index()).unwrap_or(0);
            let task = store.create_task(text, phase, due, priority, category)?;
            println!("Added task {}", task.id);
        }
        TaskCommand::List {
            pending,
            all,
            phase,
            category,
            priority,
        } => {
            let filter = TaskFilter {
                show_completed: all || (!pending && cfg.display.show_completed),
                phase_id: phase,
                category,
                priority,
            };
            let tasks = views::task_list_view(store.tasks(), &filter);
            if tasks.is_empty() {
                println!("No tasks match.");
            }
            for task in &tasks {
                print_task_line(store, task);
            }
        }
        TaskCommand::Toggle { id } => match store.toggle_task_completion(&id)? {
            Some(true) => println!("Task {} done.", id),
            Some(false) => println!("Task {} reopened.", id),
            None => println!("Task '{}' not found.", id),
        },
        TaskCommand::Delete { id } => match store.delete_task(&id)? {
            Some(task) => println!("Deleted '{}'.", task.text),
            None => println!("Task '{}' not found.", id),
        },
        TaskCommand::Due { id, date } => {
            if store.set_task_due_date(&id, date)? {
                match date {
                    Some(date) => println!("Task {} due {}.", id, format_day(date)),
                    None => println!("Cleared due date for {}.", id),
                }
            } else {
                println!("Task '{}' not found.", id);
            }
        }
    }
    Ok(())
}

fn run_start(store: &mut Store, cmd: StartCommand) -> Result<()> {
    match cmd {
        StartCommand::Set { date } => {
            store.set_cycle_start(date)?;
            println!("Cycle start set to {}.", format_day(date));
        }
        StartCommand::Show => match (store.explicit_start_date(), store.cycle_start()) {
            (Some(date), _) => println!("Started on {}", format_day(date)),
            (None, Some(date)) => {
                println!("Started on {} (earliest reading)", format_day(date))
            }
            (None, None) => println!("No start date set."),
        },
        StartCommand::Clear => {
            store.clear_cycle_start()?;
            println!("Start date cleared.");
        }
    }
    Ok(())
}
