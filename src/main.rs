use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use retriever::app::AppContext;
use retriever::cli::{commands, Cli, Commands};

fn main() -> anyhow::Result<()> {
    // Initialize tracing; stdout is reserved for fetched content
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let ctx = AppContext::new(cli.config.as_deref())?;

    match cli.command {
        Commands::Text {
            url,
            detect,
            encoding,
            show_final,
        } => {
            let encoding = commands::text_encoding(detect, encoding.as_deref())?;
            commands::text(&ctx, &url, encoding, show_final)?;
        }
        Commands::Bytes { url } => {
            commands::bytes(&ctx, &url)?;
        }
        Commands::Download { url, path } => {
            commands::download(&ctx, &url, &path)?;
        }
        Commands::Resolve { url } => {
            commands::resolve(&ctx, &url)?;
        }
        Commands::Menu { url } => {
            commands::menu(&ctx, &url)?;
        }
    }

    Ok(())
}
