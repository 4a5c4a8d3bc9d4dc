// Command-line interface

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "pantry-match")]
#[command(about = "Pantry Match - suggest recipes from the ingredients you have", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP server
    Serve {
        /// Port to listen on
        #[arg(short, long, env = "PORT")]
        port: Option<u16>,

        /// Host to bind to
        #[arg(long, env = "HOST")]
        host: Option<String>,

        /// Serve a single recipe CSV as the default catalog
        #[arg(long, env = "RECIPES_CSV")]
        csv: Option<PathBuf>,
    },

    /// Suggest recipes for a list of ingredients
    Suggest {
        /// Ingredients, separated by commas, semicolons or newlines
        have: String,

        /// Catalog to match against (defaults to the manifest default)
        #[arg(short, long)]
        catalog: Option<String>,

        /// Use this recipe CSV instead of the catalog manifest
        #[arg(long, env = "RECIPES_CSV")]
        csv: Option<PathBuf>,

        /// Show how each term was matched
        #[arg(long)]
        explain: bool,
    },

    /// List the canonical ingredient names of a catalog
    Ingredients {
        #[arg(short, long)]
        catalog: Option<String>,

        #[arg(long, env = "RECIPES_CSV")]
        csv: Option<PathBuf>,
    },

    /// Load a recipe CSV and report what it contains
    Check {
        /// Path to the recipe CSV
        path: PathBuf,
    },
}
