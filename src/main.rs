//! LoField CLI - Track Code Composition Engine
//!
//! Command-line interface for combining layers and syncing tweaks.

use anyhow::Context;
use clap::Parser;
use env_logger::Env;
use log::{debug, info};

use lofield::cli::commands;
use lofield::cli::{Cli, Commands};
use lofield::EngineConfig;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logger
    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_level)).init();

    debug!("LoField v{}", env!("CARGO_PKG_VERSION"));

    let config = match &cli.config {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => EngineConfig::default(),
    };

    match cli.command {
        Some(cmd) => handle_command(&config, cmd),
        None => {
            info!("No command given");
            println!("LoField v{}", env!("CARGO_PKG_VERSION"));
            println!("Use --help for available commands");
            Ok(())
        }
    }
}

fn handle_command(config: &EngineConfig, cmd: Commands) -> anyhow::Result<()> {
    let result = match cmd {
        Commands::Combine { layers, output } => commands::combine(&layers, output.as_deref()),
        Commands::LayerNames { code } => commands::layer_names(&code),
        Commands::ExtractTweaks { code } => commands::extract_tweaks(config, &code),
        Commands::InjectTweaks {
            code,
            overrides,
            output,
        } => commands::inject(config, &code, &overrides, output.as_deref()),
        Commands::CheckTweaks { code, overrides } => commands::check(config, &code, &overrides),
        Commands::VolumeDb { percent } => commands::volume_db(percent),
        Commands::ShareToken { length } => commands::share_token(config, length),
    };

    result.map_err(|e| {
        for suggestion in e.recovery_suggestions() {
            eprintln!("hint: {}", suggestion);
        }
        let code = e.error_code();
        anyhow::Error::new(e).context(format!("command failed [{}]", code))
    })
}
