mod commands;
mod terminal;

use std::sync::Arc;

use commands::{CommandLine, Commands, ThemeAction, show, theme, watch};
use ipscope_common::config::Config;
use ipscope_common::theme::{FileStore, MemoryStore, PreferenceStore, ThemeState};
use ipscope_core::orchestrator::Services;
use terminal::logging::{self, LogSink};
use terminal::{colors, print};
use tracing::{debug, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();
    let command: Commands = commands.resolved_command();

    logging::init_logging(commands.verbose, log_sink(&command))?;

    let cfg: Config = commands.to_config();
    let mut theme_state = ThemeState::load(preference_store(&cfg));
    colors::apply(theme_state.preference());

    match command {
        Commands::Show { json: true } => {
            let services = Arc::new(Services::from_config(&cfg)?);
            show::show_json(services).await
        }
        Commands::Show { json: false } => {
            print::banner(cfg.no_banner, cfg.quiet);
            let services = Arc::new(Services::from_config(&cfg)?);
            show::show(services, &cfg).await
        }
        Commands::Watch => {
            let services = Arc::new(Services::from_config(&cfg)?);
            watch::watch(services, &mut theme_state).await
        }
        Commands::Theme { action } => {
            theme::theme(&mut theme_state, action.unwrap_or(ThemeAction::Show));
            Ok(())
        }
    }
}

fn log_sink(command: &Commands) -> LogSink {
    match command {
        Commands::Watch => LogSink::Silent,
        Commands::Show { json: true } => LogSink::Stderr,
        Commands::Show { json: false } | Commands::Theme { .. } => LogSink::Report,
    }
}

fn preference_store(cfg: &Config) -> Box<dyn PreferenceStore> {
    match cfg.preferences.clone().or_else(FileStore::default_location) {
        Some(path) => {
            debug!("Theme preference stored at {}", path.display());
            Box::new(FileStore::new(path))
        }
        None => {
            warn!("No preference location available, theme changes last for this run only");
            Box::new(MemoryStore::default())
        }
    }
}
