//! Finding recipe files under a root directory.

use crate::config::Scan;
use anyhow::{Context, Result};
use ignore::WalkBuilder;
use std::ffi::{OsStr, OsString};
use std::path::{Component, Path, PathBuf};

/// `path` made absolute against `cwd`, with `.` and `..` resolved lexically.
fn lexical_absolute(path: &Path, cwd: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    };
    let mut normal = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normal.pop();
            }
            other => normal.push(other),
        }
    }
    normal
}

/// Where `output` sits relative to `root`, if it is somewhere below it.
///
/// Relative paths are resolved against `cwd` first, so `.` and `out` compare the
/// way they would on disk.
pub fn output_within_root(root: &Path, output: &Path, cwd: &Path) -> Option<PathBuf> {
    let root = lexical_absolute(root, cwd);
    let output = lexical_absolute(output, cwd);
    output
        .strip_prefix(&root)
        .ok()
        .filter(|relative| !relative.as_os_str().is_empty())
        .map(Path::to_path_buf)
}

/// How the output directory is recognised while walking.
enum OutputDir {
    /// A bare directory name, pruned at any depth like the other exclusions
    Name(OsString),
    /// A nested path, pruned only at that location below the root
    Relative(PathBuf),
}

impl OutputDir {
    fn new(output_dir: &Path) -> Option<OutputDir> {
        let parts: Vec<Component> = output_dir
            .components()
            .filter(|c| !matches!(c, Component::CurDir))
            .collect();
        match parts.as_slice() {
            [] => None,
            [Component::Normal(name)] => Some(OutputDir::Name(name.to_os_string())),
            _ => Some(OutputDir::Relative(parts.iter().collect())),
        }
    }

    fn matches(&self, root: &Path, dir: &Path) -> bool {
        match self {
            OutputDir::Name(name) => dir.file_name() == Some(name.as_os_str()),
            OutputDir::Relative(relative) if relative.is_absolute() => dir == relative,
            OutputDir::Relative(relative) => dir.strip_prefix(root).is_ok_and(|d| d == relative),
        }
    }
}

/// Find every recipe file under `root`, sorted by path.
///
/// Directories named in the exclusion list are not descended into, at any depth.
/// Neither is the output directory: a bare name is pruned everywhere, a nested
/// path only where it actually is. `.gitignore` files and hidden-file rules are
/// not consulted.
pub fn find_recipe_files(root: &Path, scan: &Scan) -> Result<Vec<PathBuf>> {
    let blocked = scan.block_set()?;
    let excluded: Vec<OsString> = scan.exclude_dirs.iter().map(OsString::from).collect();
    let output_dir = OutputDir::new(&scan.output_dir);
    let walk_root = root.to_path_buf();
    let extension = OsStr::new(&scan.extension);

    let walker = WalkBuilder::new(root)
        .standard_filters(false)
        .filter_entry(move |entry| {
            // the root itself is never filtered
            if entry.depth() == 0 || !entry.file_type().is_some_and(|ft| ft.is_dir()) {
                return true;
            }
            let is_excluded = excluded
                .iter()
                .any(|name| name.as_os_str() == entry.file_name());
            let is_output = output_dir
                .as_ref()
                .is_some_and(|output| output.matches(&walk_root, entry.path()));
            !is_excluded && !is_output
        })
        .build();

    let mut files: Vec<PathBuf> = Vec::new();
    for entry in walker {
        let entry = entry.with_context(|| format!("Failed to walk {}", root.display()))?;
        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }
        let path = entry.into_path();
        if path.extension() != Some(extension) {
            continue;
        }
        let relative = path.strip_prefix(root).unwrap_or(&path);
        if blocked.is_match(relative) {
            log::debug!("skipping blocked file {}", relative.display());
            continue;
        }
        files.push(path);
    }

    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, "name: Test\n").unwrap();
    }

    fn relative(root: &Path, files: Vec<PathBuf>) -> Vec<String> {
        files
            .into_iter()
            .map(|f| {
                f.strip_prefix(root)
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect()
    }

    #[test]
    fn finds_recipes_in_sorted_order() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "soups/pho.yaml");
        touch(dir.path(), "bread.yaml");
        touch(dir.path(), "soups/borscht.yaml");
        touch(dir.path(), "README.md");
        touch(dir.path(), "soups/notes.yml");

        let files = find_recipe_files(dir.path(), &Scan::default()).unwrap();
        assert_eq!(
            relative(dir.path(), files),
            vec!["bread.yaml", "soups/borscht.yaml", "soups/pho.yaml"]
        );
    }

    #[test]
    fn excluded_directories_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "mains/curry.yaml");
        touch(dir.path(), "PDF/mains/stale.yaml");
        touch(dir.path(), "tools/fonts/config.yaml");
        touch(dir.path(), ".git/config.yaml");
        touch(dir.path(), ".claude/settings.yaml");
        touch(dir.path(), "mains/tools/nested.yaml");
        touch(dir.path(), "out/rendered.yaml");

        let scan = Scan {
            output_dir: PathBuf::from("out"),
            ..Scan::default()
        };
        let files = find_recipe_files(dir.path(), &scan).unwrap();
        assert_eq!(relative(dir.path(), files), vec!["mains/curry.yaml"]);
    }

    #[test]
    fn nested_output_dir_is_pruned_only_where_it_is() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "build/pdf/stale.yaml");
        touch(dir.path(), "desserts/pdf/cake.yaml");

        let scan = Scan {
            output_dir: PathBuf::from("build/pdf"),
            ..Scan::default()
        };
        let files = find_recipe_files(dir.path(), &scan).unwrap();
        assert_eq!(relative(dir.path(), files), vec!["desserts/pdf/cake.yaml"]);
    }

    #[test]
    fn output_inside_current_directory_root() {
        let cwd = Path::new("/work/book");
        assert_eq!(
            output_within_root(Path::new("."), Path::new("out"), cwd),
            Some(PathBuf::from("out"))
        );
        assert_eq!(
            output_within_root(Path::new("recipes"), Path::new("./recipes/pdf/"), cwd),
            Some(PathBuf::from("pdf"))
        );
        assert_eq!(
            output_within_root(Path::new("."), Path::new("/work/book/build/pdf"), cwd),
            Some(PathBuf::from("build/pdf"))
        );
    }

    #[test]
    fn output_outside_root_is_not_excluded() {
        let cwd = Path::new("/work/book");
        assert_eq!(
            output_within_root(Path::new("recipes"), Path::new("out"), cwd),
            None
        );
        assert_eq!(
            output_within_root(Path::new("."), Path::new("../pdfs"), cwd),
            None
        );
        assert_eq!(output_within_root(Path::new("."), Path::new("."), cwd), None);
    }

    #[test]
    fn hidden_and_gitignored_files_are_still_found() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), ".drafts/secret.yaml");
        std::fs::write(dir.path().join(".gitignore"), "ignored.yaml\n").unwrap();
        touch(dir.path(), "ignored.yaml");

        let files = find_recipe_files(dir.path(), &Scan::default()).unwrap();
        assert_eq!(
            relative(dir.path(), files),
            vec![".drafts/secret.yaml", "ignored.yaml"]
        );
    }

    #[test]
    fn block_globs_skip_matching_files() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "drafts/wip.yaml");
        touch(dir.path(), "mains/curry.yaml");
        touch(dir.path(), "mains/curry.template.yaml");

        let scan = Scan {
            block_globs: vec!["drafts/**".to_string(), "**/*.template.yaml".to_string()],
            ..Scan::default()
        };
        let files = find_recipe_files(dir.path(), &scan).unwrap();
        assert_eq!(relative(dir.path(), files), vec!["mains/curry.yaml"]);
    }
}
