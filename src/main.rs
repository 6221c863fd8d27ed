use anyhow::{anyhow, Context, Result};
use cli::{Cli, RenderArgs};
use config::{Configuration, CONFIG_FILE_NAME};
use sinks::fonts::{default_probes, FontNames, LoadedFonts};
use std::process::ExitCode;

mod batch;
mod cli;
mod config;
mod discovery;
mod format;
mod recipe;
mod sinks;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    match try_main() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {e:#}", console::style("Error").red());
            ExitCode::FAILURE
        }
    }
}

fn try_main() -> Result<ExitCode> {
    use clap::Parser;
    let cli = Cli::parse();

    match &cli.command {
        cli::Commands::Config(args) => {
            config::run(args)?;
            Ok(ExitCode::SUCCESS)
        }
        cli::Commands::Render(args) => render(args),
    }
}

fn render(args: &RenderArgs) -> Result<ExitCode> {
    let root = &args.root;
    if !root.is_dir() {
        return Err(anyhow!("Path '{}' isn't a directory!", root.display()));
    }

    let config_path = args
        .config
        .clone()
        .unwrap_or_else(|| root.join(CONFIG_FILE_NAME));
    let Configuration { mut scan, pdf } = Configuration::load_or_default(&config_path)
        .with_context(|| format!("Failed to load {}", config_path.display()))?;

    let output_root = match &args.output {
        Some(output) => {
            // keep an explicit output directory inside the root out of the scan too
            let cwd = std::env::current_dir().context("Failed to read current directory")?;
            if let Some(relative) = discovery::output_within_root(root, output, &cwd) {
                scan.output_dir = relative;
            }
            output.clone()
        }
        None => root.join(&scan.output_dir),
    };

    let files = discovery::find_recipe_files(root, &scan)
        .with_context(|| format!("Failed to scan {} for recipes", root.display()))?;
    if files.is_empty() {
        println!("No recipe files found.");
        return Ok(ExitCode::FAILURE);
    }
    println!("Found {} recipe files.", files.len());

    let fonts = LoadedFonts::resolve(&default_probes(&pdf, root), &FontNames::from_config(&pdf));
    if fonts.is_builtin() {
        log::warn!("Unicode fonts not found, some characters may be replaced");
    }

    let report = batch::run(&pdf, &fonts, root, &files, &output_root)?;
    println!();
    println!("{}", report.summary());

    Ok(report.exit_code())
}
