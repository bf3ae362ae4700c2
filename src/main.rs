use anyhow::Result;
use clap::Parser;
use docsynth::cli::{Cli, Commands};
use docsynth::commands::{self, CatalogCommand, GenerateCommand, GenerateOverrides};
use docsynth::config::resolve_config;
use docsynth::progress::{ProgressConfig, ProgressManager};

// Main orchestrator function
fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbosity);

    let progress = ProgressManager::new(ProgressConfig::from_env(cli.quiet));

    match cli.command {
        Commands::Init { force } => {
            commands::init_config(force)?;
        }
        Commands::Validate { path } => {
            commands::validate_file(&path)?;
        }
        Commands::Catalog { root, output } => {
            let config = resolve_config(cli.config.as_deref())?;
            commands::run_catalog(CatalogCommand {
                root,
                output,
                config,
                progress,
            })?;
        }
        Commands::Generate {
            root,
            output,
            seed,
            n_qa,
            n_design,
            language,
            repo_name,
        } => {
            let config = resolve_config(cli.config.as_deref())?;
            commands::run_generate(GenerateCommand {
                root,
                output,
                overrides: GenerateOverrides {
                    seed,
                    n_qa,
                    n_design,
                    language,
                    repo_name,
                },
                config,
                progress,
            })?;
        }
    }

    Ok(())
}

/// `warn` by default, one level more per `-v`; `RUST_LOG` wins when set.
fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}
