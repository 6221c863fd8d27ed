//! Font lookup and text measurement.
//!
//! Recipes are full of non-ASCII text (accents, arrows, the odd CJK ingredient
//! name), so a Unicode TrueType face is preferred. Lookup is an ordered list of
//! [`FontProbe`]s; the first probe that finds both the regular and bold faces, and
//! whose files actually parse, wins. When nothing is found the built-in Helvetica
//! faces are used instead, with unsupported characters replaced at layout time.
//! Not finding a font is never an error.

use crate::sinks::pdf::config::PDF;
use crate::sinks::pdf::helvetica;
use anyhow::{Context, Result};
use owned_ttf_parser::{AsFaceRef, OwnedFace};
use std::borrow::Cow;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::Duration;
use wait_timeout::ChildExt;

const MM_PER_PT: f32 = 25.4 / 72.0;

/// Well-known install locations of the DejaVu family.
const SYSTEM_FONT_DIRS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu",
    "/usr/share/fonts/TTF",
    "/usr/share/fonts/dejavu-sans-fonts",
];

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Weight {
    Regular,
    Bold,
}

/// File names of the two faces a document needs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FontNames {
    pub regular: String,
    pub bold: String,
}

impl FontNames {
    pub fn from_config(config: &PDF) -> FontNames {
        FontNames {
            regular: config.font_regular.clone(),
            bold: config.font_bold.clone(),
        }
    }
}

/// Paths of a found regular/bold pair.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FontFiles {
    pub regular: PathBuf,
    pub bold: PathBuf,
}

/// One way of looking for a font.
pub trait FontProbe {
    /// Short description used in log messages
    fn describe(&self) -> String;

    fn probe(&self, names: &FontNames) -> Option<FontFiles>;
}

/// Looks for both faces side by side in a list of directories.
pub struct DirectoryProbe {
    label: &'static str,
    dirs: Vec<PathBuf>,
}

impl DirectoryProbe {
    pub fn new(label: &'static str, dirs: Vec<PathBuf>) -> DirectoryProbe {
        DirectoryProbe { label, dirs }
    }

    pub fn system() -> DirectoryProbe {
        DirectoryProbe::new(
            "system font directories",
            SYSTEM_FONT_DIRS.iter().map(PathBuf::from).collect(),
        )
    }
}

fn find_in_dirs<'a, I>(dirs: I, names: &FontNames) -> Option<FontFiles>
where
    I: IntoIterator<Item = &'a PathBuf>,
{
    dirs.into_iter().find_map(|dir| {
        let regular = dir.join(&names.regular);
        let bold = dir.join(&names.bold);
        if regular.is_file() && bold.is_file() {
            Some(FontFiles { regular, bold })
        } else {
            None
        }
    })
}

impl FontProbe for DirectoryProbe {
    fn describe(&self) -> String {
        self.label.to_string()
    }

    fn probe(&self, names: &FontNames) -> Option<FontFiles> {
        find_in_dirs(&self.dirs, names)
    }
}

/// Asks fontconfig where each face lives, then checks that directory for both.
pub struct FcMatchProbe {
    program: OsString,
    /// Arguments placed before the `-f %{file} <face>` query
    leading_args: Vec<OsString>,
    timeout: Duration,
}

impl FcMatchProbe {
    pub fn new(timeout: Duration) -> FcMatchProbe {
        FcMatchProbe::with_command("fc-match", Vec::new(), timeout)
    }

    pub fn with_command<P: Into<OsString>>(
        program: P,
        leading_args: Vec<OsString>,
        timeout: Duration,
    ) -> FcMatchProbe {
        FcMatchProbe {
            program: program.into(),
            leading_args,
            timeout,
        }
    }

    /// Run `fc-match` for a single face, returning the matched file.
    ///
    /// A missing binary, a failure, or a timeout all count as "not found".
    fn lookup(&self, face: &str) -> Option<PathBuf> {
        let mut child = match Command::new(&self.program)
            .args(&self.leading_args)
            .args(["-f", "%{file}", face])
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
        {
            Ok(child) => child,
            Err(e) => {
                log::debug!("{} unavailable: {e}", self.program.to_string_lossy());
                return None;
            }
        };

        match child.wait_timeout(self.timeout) {
            Ok(Some(status)) if status.success() => {
                let output = child.wait_with_output().ok()?;
                let file = String::from_utf8_lossy(&output.stdout).trim().to_string();
                if file.is_empty() {
                    None
                } else {
                    Some(PathBuf::from(file))
                }
            }
            Ok(Some(status)) => {
                log::debug!("fc-match {face} exited with {status}");
                None
            }
            Ok(None) => {
                log::debug!(
                    "fc-match {face} timed out after {} seconds",
                    self.timeout.as_secs()
                );
                let _ = child.kill();
                let _ = child.wait();
                None
            }
            Err(e) => {
                log::debug!("failed waiting for fc-match: {e}");
                let _ = child.kill();
                None
            }
        }
    }
}

impl FontProbe for FcMatchProbe {
    fn describe(&self) -> String {
        "fc-match".to_string()
    }

    fn probe(&self, names: &FontNames) -> Option<FontFiles> {
        let mut dirs: Vec<PathBuf> = Vec::new();
        for face in [&names.regular, &names.bold] {
            if let Some(dir) = self
                .lookup(face)
                .and_then(|file| file.parent().map(Path::to_path_buf))
            {
                if !dirs.contains(&dir) {
                    dirs.push(dir);
                }
            }
        }
        find_in_dirs(&dirs, names)
    }
}

/// The probes to run, in order: bundled fonts, system directories, fontconfig.
pub fn default_probes(config: &PDF, root: &Path) -> Vec<Box<dyn FontProbe>> {
    let mut bundled: Vec<PathBuf> = Vec::new();
    if let Some(dir) = &config.font_dir {
        bundled.push(root.join(dir));
    }
    if let Some(exe_dir) = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        bundled.push(exe_dir.join("fonts"));
    }

    vec![
        Box::new(DirectoryProbe::new("bundled font directory", bundled)),
        Box::new(DirectoryProbe::system()),
        Box::new(FcMatchProbe::new(config.font_lookup_timeout())),
    ]
}

/// A parsed TrueType face, kept with its raw bytes for embedding.
pub struct EmbeddedFont {
    pub path: PathBuf,
    pub data: Vec<u8>,
    face: OwnedFace,
}

impl EmbeddedFont {
    pub fn load(path: &Path) -> Result<EmbeddedFont> {
        let data = std::fs::read(path)
            .with_context(|| format!("Failed to read font file: {}", path.display()))?;
        let face = OwnedFace::from_vec(data.clone(), 0)
            .with_context(|| format!("Failed to parse font file: {}", path.display()))?;
        Ok(EmbeddedFont {
            path: path.to_path_buf(),
            data,
            face,
        })
    }

    /// Width of `text` in millimetres at `size_pt`.
    fn width_of_text(&self, text: &str, size_pt: f32) -> f32 {
        let face = self.face.as_face_ref();
        let units_per_em = face.units_per_em() as f32;
        let units: u32 = text
            .chars()
            .map(|c| {
                face.glyph_index(c)
                    .and_then(|glyph| face.glyph_hor_advance(glyph))
                    .unwrap_or(0) as u32
            })
            .sum();
        units as f32 / units_per_em * size_pt * MM_PER_PT
    }
}

impl std::fmt::Debug for EmbeddedFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmbeddedFont")
            .field("path", &self.path)
            .field("bytes", &self.data.len())
            .finish()
    }
}

/// The fonts every document in a batch is laid out with.
#[derive(Debug)]
pub enum LoadedFonts {
    Embedded {
        regular: EmbeddedFont,
        bold: EmbeddedFont,
    },
    /// Built-in Helvetica / Helvetica-Bold
    Builtin,
}

impl LoadedFonts {
    /// Run the probes in order and load the first pair that parses.
    pub fn resolve(probes: &[Box<dyn FontProbe>], names: &FontNames) -> LoadedFonts {
        for probe in probes {
            let Some(files) = probe.probe(names) else {
                log::debug!("no fonts found via {}", probe.describe());
                continue;
            };
            match LoadedFonts::load(&files) {
                Ok(fonts) => {
                    log::info!(
                        "using fonts {} and {} (found via {})",
                        files.regular.display(),
                        files.bold.display(),
                        probe.describe()
                    );
                    return fonts;
                }
                Err(e) => log::warn!("ignoring fonts found via {}: {e:#}", probe.describe()),
            }
        }
        log::info!("no Unicode font found, falling back to built-in Helvetica");
        LoadedFonts::Builtin
    }

    pub fn load(files: &FontFiles) -> Result<LoadedFonts> {
        Ok(LoadedFonts::Embedded {
            regular: EmbeddedFont::load(&files.regular)?,
            bold: EmbeddedFont::load(&files.bold)?,
        })
    }

    pub fn is_builtin(&self) -> bool {
        matches!(self, LoadedFonts::Builtin)
    }

    /// Text as it will actually be drawn with these fonts.
    pub fn drawable<'a>(&self, text: &'a str) -> Cow<'a, str> {
        match self {
            LoadedFonts::Embedded { .. } => Cow::Borrowed(text),
            LoadedFonts::Builtin => helvetica::to_drawable(text),
        }
    }

    /// Width of already-drawable `text` in millimetres.
    pub fn width_of_text(&self, text: &str, weight: Weight, size_pt: f32) -> f32 {
        match self {
            LoadedFonts::Embedded { regular, bold } => match weight {
                Weight::Regular => regular.width_of_text(text, size_pt),
                Weight::Bold => bold.width_of_text(text, size_pt),
            },
            LoadedFonts::Builtin => {
                let bold = weight == Weight::Bold;
                let units: u32 = text
                    .chars()
                    .map(|c| helvetica::advance(c, bold) as u32)
                    .sum();
                units as f32 / 1000.0 * size_pt * MM_PER_PT
            }
        }
    }
}
