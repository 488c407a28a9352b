// src/main.rs

mod cli;
mod commands;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use cli::{Cli, Commands};
use manifestdb::ViewerConfig;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins over --verbose
    let default_filter = if cli.verbose { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    if let Commands::Completions { shell } = command {
        clap_complete::generate(shell, &mut Cli::command(), "manifestdb", &mut std::io::stdout());
        return Ok(());
    }

    let config = ViewerConfig::load_or_default(cli.config.as_deref())?;

    match command {
        Commands::Domains { db_path, search } => {
            commands::cmd_domains(&db_path, search.as_deref(), &config)
        }
        Commands::List { db_path, domain } => commands::cmd_list(&db_path, &domain, &config),
        Commands::Info {
            db_path,
            domain,
            row,
        } => commands::cmd_info(&db_path, &domain, row, &config),
        Commands::Copy {
            db_path,
            file_id,
            dir,
        } => commands::cmd_copy(&db_path, &file_id, &dir, &config),
        Commands::Extract {
            db_path,
            domain,
            dir,
            no_progress,
        } => commands::cmd_extract(&db_path, &domain, &dir, no_progress, &config),
        Commands::ExportCsv { db_path, output } => {
            commands::cmd_export_csv(&db_path, &output, &config)
        }
        Commands::Manifest { db_path } => commands::cmd_manifest(&db_path, &config),
        Commands::Status { db_path } => commands::cmd_status(&db_path, &config),
        Commands::Completions { .. } => Ok(()),
    }
}
