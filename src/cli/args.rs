//! CLI argument definitions using clap
//!
//! Commands:
//! - childtree serve [--config <path>] [--port <port>]
//! - childtree inspect --seed <path> [--variant bst|avl] [--order in|pre|post]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::tree::{TraversalOrder, TreeKind};

/// childtree - child records in BST and AVL trees, served over HTTP
#[derive(Parser, Debug)]
#[command(name = "childtree")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP server with both stores
    Serve {
        /// Path to configuration file; defaults apply when omitted
        #[arg(long)]
        config: Option<PathBuf>,

        /// Port to bind, overrides the configuration file
        #[arg(long)]
        port: Option<u16>,
    },

    /// Load a seed file into one store and print its contents
    Inspect {
        /// JSON array of child records
        #[arg(long)]
        seed: PathBuf,

        /// Tree variant to load into
        #[arg(long, default_value = "bst")]
        variant: TreeKind,

        /// Traversal order of the printed listing
        #[arg(long, default_value = "in")]
        order: TraversalOrder,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
