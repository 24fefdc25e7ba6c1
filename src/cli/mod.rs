pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "retriever")]
#[command(about = "Fetch http(s) resources with retry and charset detection", long_about = None)]
pub struct Cli {
    /// Config file to use instead of ~/.config/retriever/config.toml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print a resource as text (ASCII unless told otherwise)
    Text {
        /// URL to fetch
        url: String,
        /// Detect the encoding from charset markers in the content
        #[arg(long, conflicts_with = "encoding")]
        detect: bool,
        /// Decode with this encoding label, e.g. "utf-8"
        #[arg(short, long)]
        encoding: Option<String>,
        /// Also print the final address to stderr
        #[arg(long)]
        show_final: bool,
    },
    /// Fetch a resource into memory and report its size
    Bytes {
        /// URL to fetch
        url: String,
    },
    /// Save a resource to a file, replacing it if it exists
    Download {
        /// URL to fetch
        url: String,
        /// Destination file
        path: PathBuf,
    },
    /// Print the address a URL redirects to
    Resolve {
        /// URL to resolve
        url: String,
    },
    /// Choose actions for a URL from an interactive menu
    Menu {
        /// URL to work with
        url: String,
    },
}
