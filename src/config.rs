//! `recipe-book.toml` loading and generation.
//!
//! Every field has a default, so a missing or partial file is fine; the file only
//! needs to mention what differs from the defaults.

use crate::cli::ConfigArgs;
use crate::sinks::PDF;
use anyhow::{anyhow, Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "recipe-book.toml";

/// Complete configuration for a recipe-book project.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Configuration {
    #[serde(default)]
    pub scan: Scan,
    #[serde(default)]
    pub pdf: PDF,
}

/// Which files are treated as recipes, and where the PDFs go.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Scan {
    /// File extension of recipe files, without the dot
    #[serde(default = "default_extension")]
    pub extension: String,
    /// Output directory, relative to the root
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Directory names that are never descended into
    #[serde(default = "default_exclude_dirs")]
    pub exclude_dirs: Vec<String>,
    /// Globs of further files to skip, matched against paths relative to the root
    #[serde(default)]
    pub block_globs: Vec<String>,
}

fn default_extension() -> String {
    "yaml".to_string()
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("PDF")
}
fn default_exclude_dirs() -> Vec<String> {
    ["PDF", "tools", ".git", ".claude"]
        .into_iter()
        .map(ToString::to_string)
        .collect()
}

impl Default for Scan {
    fn default() -> Self {
        Scan {
            extension: default_extension(),
            output_dir: default_output_dir(),
            exclude_dirs: default_exclude_dirs(),
            block_globs: Vec::new(),
        }
    }
}

impl Scan {
    /// Compile the block globs into a single matcher.
    pub fn block_set(&self) -> Result<GlobSet> {
        let mut builder = GlobSetBuilder::new();
        for glob in self.block_globs.iter() {
            builder.add(
                Glob::new(glob).with_context(|| format!("Failed to parse glob '{glob}'"))?,
            );
        }
        builder
            .build()
            .with_context(|| "Failed to compile block globs")
    }
}

impl Configuration {
    /// Load `path` if it exists, otherwise use the defaults.
    pub fn load_or_default(path: &Path) -> Result<Configuration> {
        if !path.exists() {
            log::debug!("{} not found, using default configuration", path.display());
            return Ok(Configuration::default());
        }
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to load {} contents", path.display()))?;
        let config: Configuration =
            toml::from_str(&contents).with_context(|| "Failed to parse TOML")?;
        // surface bad globs before any file is rendered
        config.scan.block_set()?;
        Ok(config)
    }
}

/// Write a `recipe-book.toml` with every default filled in.
pub fn run(args: &ConfigArgs) -> Result<()> {
    if !args.root.is_dir() {
        return Err(anyhow!("Path '{}' isn't a directory!", args.root.display()));
    }
    let config_path = args.root.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        return Err(anyhow!(
            "{} already exists, remove it first to regenerate it",
            config_path.display()
        ));
    }

    let config = toml::to_string_pretty(&Configuration::default())
        .with_context(|| "Failed to convert configuration to TOML")?;
    std::fs::write(&config_path, config)
        .with_context(|| "Failed to write configuration file")?;
    println!("{} written!", config_path.display());
    Ok(())
}
