use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Directory to write recipe-book.toml into
    #[clap(short, long, default_value = ".")]
    pub root: PathBuf,
}

#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Directory to scan for recipe files
    #[clap(short, long, default_value = ".")]
    pub root: PathBuf,
    /// Directory to write PDFs into, overriding the configured output directory
    #[clap(short, long)]
    pub output: Option<PathBuf>,
    /// Configuration file, defaults to recipe-book.toml in the root directory
    #[clap(short, long, env = "RECIPE_BOOK_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generates a recipe-book.toml config file with every default filled in
    Config(ConfigArgs),
    /// Renders every recipe under the root directory to a PDF
    Render(RenderArgs),
}

#[derive(Parser, Debug)]
#[clap(author, version, about)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}
