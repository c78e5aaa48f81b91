use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "studyplan", version, about = "Weekly study planner")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Course management
    Course {
        #[command(subcommand)]
        action: commands::course::CourseAction,
    },
    /// Task backlog management
    Task {
        #[command(subcommand)]
        action: commands::task::TaskAction,
    },
    /// Deadline management
    Deadline {
        #[command(subcommand)]
        action: commands::deadline::DeadlineAction,
    },
    /// Weekly availability windows
    Window {
        #[command(subcommand)]
        action: commands::window::WindowAction,
    },
    /// Habit tracking
    Habit {
        #[command(subcommand)]
        action: commands::habit::HabitAction,
    },
    /// Weekly schedule generation
    Schedule {
        #[command(subcommand)]
        action: commands::schedule::ScheduleAction,
    },
    /// Record executed study sessions
    Session {
        #[command(subcommand)]
        action: commands::session::SessionAction,
    },
    /// Weekly planned-versus-actual summary
    Summary(commands::summary::SummaryArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

/// Log to stderr so JSON on stdout stays machine-readable.
fn init_logging() {
    let filter = EnvFilter::try_from_env("STUDYPLAN_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn main() {
    init_logging();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Course { action } => commands::course::run(action),
        Commands::Task { action } => commands::task::run(action),
        Commands::Deadline { action } => commands::deadline::run(action),
        Commands::Window { action } => commands::window::run(action),
        Commands::Habit { action } => commands::habit::run(action),
        Commands::Schedule { action } => commands::schedule::run(action),
        Commands::Session { action } => commands::session::run(action),
        Commands::Summary(args) => commands::summary::run(args),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
