use anyhow::Result;
use clap::{Parser, Subcommand};
use cookmate_infrastructure::{CookmatePaths, load_config};

mod commands;
mod logging;
mod prompt;
mod render;

#[derive(Parser)]
#[command(name = "cookmate")]
#[command(about = "Cookmate - cook a recipe step by step with an AI assistant", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive cooking session for a recipe
    Cook {
        /// Recipe id on the backend
        recipe_id: i64,
    },
    /// Talk to the cooking assistant
    Chat {
        /// Start a fresh conversation instead of restoring history
        #[arg(long)]
        fresh: bool,
    },
    /// Inspect or create the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Write a default config.toml if none exists
    Init,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = CookmatePaths::discover()?;
    let _log_guard = logging::init_logging(&paths.log_dir())?;
    let config = load_config(&paths)?;

    match cli.command {
        Commands::Cook { recipe_id } => commands::cook::run(&config, recipe_id).await?,
        Commands::Chat { fresh } => commands::chat::run(&config, fresh).await?,
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::show(&config)?,
            ConfigAction::Init => commands::config::init(&paths)?,
        },
    }

    Ok(())
}
