//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use habitrack_core::{config, logging};

mod commands;

#[derive(Parser)]
#[command(name = "habitrack")]
#[command(version)]
#[command(about = "Track daily habits and earn points")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Log in and store the session token
    Login {
        #[arg(short, long)]
        username: String,
        /// Read from stdin when omitted
        #[arg(long, env = "HABITRACK_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Create an account
    Signup {
        #[arg(short, long)]
        username: String,
        /// Read from stdin when omitted
        #[arg(long, env = "HABITRACK_PASSWORD", hide_env_values = true)]
        password: Option<String>,
        /// Defaults to the password when omitted
        #[arg(long)]
        confirm: Option<String>,
    },
    /// Clear the stored session
    Logout,
    /// Show the logged-in user and point balance
    Whoami,
    /// Manage habits
    Habits {
        #[command(subcommand)]
        command: HabitCommands,
    },
    /// Show today's habits
    Today,
    /// Mark one of today's habits done
    Done {
        #[arg(value_name = "HABIT_ID")]
        habit_id: String,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum HabitCommands {
    /// List registered habits
    List,
    /// Register a new habit
    Add {
        #[arg(value_name = "NAME")]
        name: String,
    },
    /// Delete a habit
    Delete {
        #[arg(value_name = "HABIT_ID")]
        id: String,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
    /// Generate a fresh config from Rust defaults (for xtask)
    Generate,
    /// Store the API base URL in the config file
    SetBaseUrl {
        #[arg(value_name = "URL")]
        url: String,
    },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // Config commands stay free of logging and the network.
    let command = match cli.command {
        Some(Commands::Config { command }) => return run_config(command),
        other => other,
    };

    let _log_guard = match logging::init() {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Warning: logging disabled: {e:#}");
            None
        }
    };

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(command).await })
}

fn run_config(command: ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Path => {
            commands::config::path();
            Ok(())
        }
        ConfigCommands::Init => commands::config::init(),
        ConfigCommands::Generate => commands::config::generate(),
        ConfigCommands::SetBaseUrl { url } => commands::config::set_base_url(&url),
    }
}

async fn dispatch(command: Option<Commands>) -> Result<()> {
    let config = config::Config::load().context("load config")?;

    // default to the interactive tracker
    let Some(command) = command else {
        return commands::tui::run(config);
    };

    let ctx = commands::Context::open(config)?;

    match command {
        Commands::Login { username, password } => {
            commands::auth::login(&ctx, &username, password).await
        }
        Commands::Signup {
            username,
            password,
            confirm,
        } => commands::auth::signup(&ctx, &username, password, confirm).await,
        Commands::Logout => commands::auth::logout(&ctx),
        Commands::Whoami => commands::auth::whoami(&ctx).await,

        Commands::Habits { command } => match command {
            HabitCommands::List => commands::habits::list(&ctx).await,
            HabitCommands::Add { name } => commands::habits::add(&ctx, &name).await,
            HabitCommands::Delete { id } => commands::habits::delete(&ctx, &id).await,
        },

        Commands::Today => commands::today::show(&ctx).await,
        Commands::Done { habit_id } => commands::today::done(&ctx, &habit_id).await,

        Commands::Config { command } => run_config(command),
    }
}
