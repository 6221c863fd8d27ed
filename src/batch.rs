//! The render loop over every discovered recipe.
//!
//! One file failing never stops the batch: every file gets a [`FileOutcome`] and the
//! outcomes are collected into a [`BatchReport`], which decides the exit status.

use crate::recipe::{Recipe, RecipeError};
use crate::sinks::fonts::LoadedFonts;
use crate::sinks::PDF;
use anyhow::{Context, Result};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Debug)]
pub enum Outcome {
    Rendered { output: PathBuf, pages: usize },
    /// The file isn't a recipe (no `name`), so nothing was rendered
    Skipped { reason: String },
    Failed { error: anyhow::Error },
}

/// What happened to one input file.
#[derive(Debug)]
pub struct FileOutcome {
    /// Input path, relative to the scan root
    pub path: PathBuf,
    pub outcome: Outcome,
}

impl FileOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, Outcome::Rendered { .. })
    }
}

impl fmt::Display for FileOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = self.path.display();
        match &self.outcome {
            Outcome::Rendered { .. } => write!(f, "  {}: {path}", style("OK").green()),
            Outcome::Skipped { reason } => {
                write!(f, "  {}: {path} -- {reason}", style("SKIP").yellow())
            }
            Outcome::Failed { error } => {
                write!(f, "  {}: {path} -- {error:#}", style("ERROR").red())
            }
        }
    }
}

/// The outcomes of a whole run.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub outcomes: Vec<FileOutcome>,
}

impl BatchReport {
    pub fn push(&mut self, outcome: FileOutcome) {
        self.outcomes.push(outcome);
    }

    pub fn success_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    /// Skipped files count as errors.
    pub fn error_count(&self) -> usize {
        self.outcomes.len() - self.success_count()
    }

    /// Nothing was found, or anything went wrong.
    pub fn failed(&self) -> bool {
        self.outcomes.is_empty() || self.error_count() > 0
    }

    pub fn exit_code(&self) -> ExitCode {
        if self.failed() {
            ExitCode::FAILURE
        } else {
            ExitCode::SUCCESS
        }
    }

    pub fn summary(&self) -> String {
        format!(
            "Done. {} PDFs generated, {} errors.",
            self.success_count(),
            self.error_count()
        )
    }
}

/// Where the PDF for `relative` goes: same relative path, `.pdf` extension.
pub fn output_path(output_root: &Path, relative: &Path) -> PathBuf {
    output_root.join(relative).with_extension("pdf")
}

/// Load and render a single file.
fn process_file(
    pdf: &PDF,
    fonts: &LoadedFonts,
    file: &Path,
    relative: &Path,
    output_root: &Path,
) -> Outcome {
    let recipe = match Recipe::load(file) {
        Ok(recipe) => recipe,
        Err(RecipeError::MissingName) => {
            return Outcome::Skipped {
                reason: RecipeError::MissingName.to_string(),
            }
        }
        Err(e) => {
            return Outcome::Failed {
                error: anyhow::Error::new(e),
            }
        }
    };

    let output = output_path(output_root, relative);
    match pdf
        .render(&recipe, fonts, &output)
        .with_context(|| format!("Failed to render '{}'", recipe.name))
    {
        Ok(stats) => Outcome::Rendered {
            output,
            pages: stats.page_count,
        },
        Err(error) => Outcome::Failed { error },
    }
}

/// Render every file, printing one line per file above a progress bar.
pub fn run(
    pdf: &PDF,
    fonts: &LoadedFonts,
    root: &Path,
    files: &[PathBuf],
    output_root: &Path,
) -> Result<BatchReport> {
    let progress = ProgressBar::new(files.len() as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .with_context(|| "Failed to parse progress style")?
            .progress_chars("#>-"),
    );

    let mut report = BatchReport::default();
    for file in files {
        let relative = file.strip_prefix(root).unwrap_or(file).to_path_buf();
        progress.set_message(relative.display().to_string());

        let outcome = process_file(pdf, fonts, file, &relative, output_root);
        if let Outcome::Rendered { output, pages } = &outcome {
            log::info!("wrote {} ({pages} pages)", output.display());
        }
        let outcome = FileOutcome {
            path: relative,
            outcome,
        };
        progress.println(outcome.to_string());
        report.push(outcome);
        progress.inc(1);
    }
    progress.finish_and_clear();

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(root: &Path, relative: &str, contents: &str) -> PathBuf {
        let path = root.join(relative);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn output_mirrors_input_path() {
        assert_eq!(
            output_path(Path::new("/book/PDF"), Path::new("soups/pho.yaml")),
            PathBuf::from("/book/PDF/soups/pho.pdf")
        );
    }

    #[test]
    fn missing_names_are_skipped_and_counted() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        let files = vec![
            write(root, "a.yaml", "name: Apple pie\n"),
            write(root, "mains/b.yaml", "name: Biryani\nsteps:\n  - Cook\n"),
            write(root, "mains/c.yaml", "name: Curry\n"),
            write(root, "d.yaml", "ingredients:\n  - item: salt\n"),
        ];
        let output_root = root.join("PDF");

        let report = run(
            &PDF::default(),
            &LoadedFonts::Builtin,
            root,
            &files,
            &output_root,
        )
        .unwrap();

        assert_eq!(report.success_count(), 3);
        assert_eq!(report.error_count(), 1);
        assert!(report.failed());
        assert_eq!(report.summary(), "Done. 3 PDFs generated, 1 errors.");

        assert!(output_root.join("a.pdf").is_file());
        assert!(output_root.join("mains/b.pdf").is_file());
        assert!(output_root.join("mains/c.pdf").is_file());
        assert!(!output_root.join("d.pdf").exists());

        let skipped = &report.outcomes[3];
        assert!(matches!(&skipped.outcome, Outcome::Skipped { reason } if reason == "no 'name' field"));
    }

    #[test]
    fn parse_errors_do_not_stop_the_batch() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        let files = vec![
            write(root, "bad.yaml", "name: [unclosed\n"),
            write(root, "good.yaml", "name: Toast\n"),
        ];
        let report = run(
            &PDF::default(),
            &LoadedFonts::Builtin,
            root,
            &files,
            &root.join("PDF"),
        )
        .unwrap();

        assert!(matches!(report.outcomes[0].outcome, Outcome::Failed { .. }));
        assert!(report.outcomes[1].is_success());
        assert_eq!(report.error_count(), 1);
    }

    #[test]
    fn clean_runs_succeed_and_empty_runs_fail() {
        let mut report = BatchReport::default();
        assert!(report.failed());

        report.push(FileOutcome {
            path: PathBuf::from("a.yaml"),
            outcome: Outcome::Rendered {
                output: PathBuf::from("PDF/a.pdf"),
                pages: 1,
            },
        });
        assert!(!report.failed());
    }

    #[test]
    fn outcome_lines() {
        console::set_colors_enabled(false);
        let outcome = FileOutcome {
            path: PathBuf::from("d.yaml"),
            outcome: Outcome::Skipped {
                reason: "no 'name' field".to_string(),
            },
        };
        assert_eq!(outcome.to_string(), "  SKIP: d.yaml -- no 'name' field");
    }
}
