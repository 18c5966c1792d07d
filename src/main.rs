use anyhow::{bail, Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

use habitweek::cli::args::{Cli, Commands, ConfigCommands};
use habitweek::cli::handlers::Output;
use habitweek::cli::session::run_session;
use habitweek::config::AppConfig;
use habitweek::models::Weekday;
use habitweek::store::HabitStore;

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config_path = match cli.config {
        Some(path) => path,
        None => AppConfig::config_path()?,
    };
    let config = AppConfig::load_from(&config_path).context("Loading config")?;

    match cli.command {
        Some(Commands::Config { action }) => handle_config(&config, &config_path, action)?,

        Some(Commands::Run { script }) => {
            let file = File::open(&script).with_context(|| format!("Opening {:?}", script))?;
            let mut store = new_store(&config);
            let mut out = Output::new(io::stdout().lock(), config.display.color);
            run_session(&mut store, &config, BufReader::new(file), &mut out, false)?;
        }

        // No subcommand → interactive session
        Some(Commands::Session) | None => {
            let mut store = new_store(&config);
            let mut out = Output::new(io::stdout().lock(), config.display.color);
            out.line("habitweek — type `help` for commands, `quit` to leave. Nothing is saved.")?;
            run_session(&mut store, &config, io::stdin().lock(), &mut out, true)?;
        }
    }

    Ok(())
}

fn new_store(config: &AppConfig) -> HabitStore {
    let mut store = HabitStore::new(Weekday::today());
    store.set_email_reminder(config.reminders.email_enabled);
    store
}

fn handle_config(config: &AppConfig, path: &Path, action: ConfigCommands) -> Result<()> {
    match action {
        ConfigCommands::Init { force } => {
            if path.exists() && !force {
                bail!("{:?} already exists. Use --force to overwrite.", path);
            }
            AppConfig::default().save_to(path)?;
            println!("  ✓ Wrote {:?}", path);
        }
        ConfigCommands::Show => {
            println!("# {:?}", path);
            print!("{}", config.to_toml()?);
        }
    }
    Ok(())
}
