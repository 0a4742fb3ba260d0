use clap::Parser;
use color_eyre::Result;
use weekplan_cli::{
    Config, PlannerStore, Profile, SqliteStorage,
    cli::{Cli, Commands},
};

fn main() -> Result<()> {
    // Set up error reporting with color-eyre
    color_eyre::install()?;

    // Parse CLI arguments
    let cli = Cli::parse();

    // Determine profile: --dev flag enables dev mode, otherwise use prod
    let profile = if cli.dev { Profile::Dev } else { Profile::Prod };

    // Load configuration with the determined profile
    // Note: --config option is parsed but not yet used to override config path
    let config = Config::load_with_profile(profile)?;

    // Open the storage substrate and load the planner state
    let db_path = config.get_database_path();
    let storage = SqliteStorage::open(
        db_path
            .to_str()
            .ok_or_else(|| color_eyre::eyre::eyre!("Database path contains invalid UTF-8"))?,
    )?;
    let mut store = PlannerStore::open(storage)?;

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Subject { command } => {
            weekplan_cli::cli::handle_subject_command(command, &mut store)?;
        }
        Commands::Unit { command } => {
            weekplan_cli::cli::handle_unit_command(command, &mut store)?;
        }
        Commands::Class { command } => {
            weekplan_cli::cli::handle_class_command(command, &mut store)?;
        }
        Commands::Memo { command } => {
            weekplan_cli::cli::handle_memo_command(command, &mut store)?;
        }
        Commands::Schedule { date } => {
            weekplan_cli::cli::handle_schedule(&store, date.as_deref())?;
        }
    }

    Ok(())
}
