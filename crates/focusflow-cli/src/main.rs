use clap::{ArgAction, CommandFactory, Parser, Subcommand};

mod commands;
mod feedback;
mod logging;

#[derive(Parser)]
#[command(name = "focusflow", version, about = "FocusFlow CLI")]
struct Cli {
    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Less log output
    #[arg(short = 'q', long = "quiet", action = ArgAction::Count, global = true)]
    quiet: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in, register, log out
    Auth {
        #[command(subcommand)]
        action: commands::auth::AuthAction,
    },
    /// Current account
    Profile {
        #[command(subcommand)]
        action: commands::profile::ProfileAction,
    },
    /// Task management
    Task {
        #[command(subcommand)]
        action: commands::task::TaskAction,
    },
    /// Event management
    Event {
        #[command(subcommand)]
        action: commands::event::EventAction,
    },
    /// Category management
    Category {
        #[command(subcommand)]
        action: commands::category::CategoryAction,
    },
    /// Events, time-blocked tasks and holidays
    Timeline {
        #[command(subcommand)]
        action: commands::timeline::TimelineAction,
    },
    /// Calendar windows (offline)
    Calendar {
        #[command(subcommand)]
        action: commands::calendar::CalendarAction,
    },
    /// Focus sessions
    Focus {
        #[command(subcommand)]
        action: commands::focus::FocusAction,
    },
    /// Dashboard summary and widget order
    Dashboard {
        #[command(subcommand)]
        action: commands::dashboard::DashboardAction,
    },
    /// Push notification registration
    Notify {
        #[command(subcommand)]
        action: commands::notify::NotifyAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Print shell completions
    Completions {
        shell: clap_complete::Shell,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init_tracing(cli.verbose, cli.quiet);

    let result = match cli.command {
        Commands::Auth { action } => commands::auth::run(action).await,
        Commands::Profile { action } => commands::profile::run(action).await,
        Commands::Task { action } => commands::task::run(action).await,
        Commands::Event { action } => commands::event::run(action).await,
        Commands::Category { action } => commands::category::run(action).await,
        Commands::Timeline { action } => commands::timeline::run(action).await,
        Commands::Calendar { action } => commands::calendar::run(action),
        Commands::Focus { action } => commands::focus::run(action).await,
        Commands::Dashboard { action } => commands::dashboard::run(action).await,
        Commands::Notify { action } => commands::notify::run(action).await,
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { shell } => {
            let mut stdout = std::io::stdout();
            clap_complete::generate(shell, &mut Cli::command(), "focusflow", &mut stdout);
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        if commands::needs_login(e.as_ref()) {
            eprintln!("hint: run `focusflow auth login`");
        }
        std::process::exit(1);
    }
}
