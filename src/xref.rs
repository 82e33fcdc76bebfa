//! Cross-reference resolution.
//!
//! Document nodes carry symbolic target keys; a [`LinkResolver`] turns a
//! key into a concrete destination at render time. A miss is not an error:
//! renderers degrade the link to plain text and keep going.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Where a resolved cross-reference points.
///
/// The three scopes close differently in every backend, so the distinction
/// is carried through the renderer's link context unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Resolution {
    /// An anchor inside the document currently being rendered.
    Local { anchor: String },
    /// An anchor inside another generated document.
    Document { file: String, anchor: String },
    /// A page outside the generated documentation.
    External { url: String },
}

/// Maps a symbolic target key to its destination.
pub trait LinkResolver {
    fn resolve(&self, key: &str) -> Option<Resolution>;
}

/// A resolver that knows nothing; every link degrades to plain text.
pub struct NullResolver;

impl LinkResolver for NullResolver {
    fn resolve(&self, _key: &str) -> Option<Resolution> {
        None
    }
}

/// In-memory resolver backed by an explicit key table.
///
/// The CLI loads one of these from a JSON object of key → resolution.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct TableResolver {
    entries: HashMap<String, Resolution>,
}

impl TableResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, resolution: Resolution) {
        self.entries.insert(key.into(), resolution);
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let entries: HashMap<String, Resolution> =
            serde_json::from_str(text).context("invalid link table")?;
        Ok(Self { entries })
    }
}

impl LinkResolver for TableResolver {
    fn resolve(&self, key: &str) -> Option<Resolution> {
        self.entries.get(key).cloned()
    }
}

/// Options forwarded to the external hypertext index generator.
#[derive(Debug, Default, Clone)]
pub struct IndexOptions {
    pub project_name: Option<String>,
    pub project_number: Option<String>,
    pub quiet: bool,
    pub warnings: bool,
}

/// Path → URL lookup over the output of the external hypertext index
/// generator (`htags`). The generator writes a `HTML/FILEMAP` table of
/// `<source path>\t<page>.html` lines; we load it once and answer lookups
/// from memory.
#[derive(Debug)]
pub struct HypertextIndex {
    input_dir: PathBuf,
    map: HashMap<String, String>,
}

impl HypertextIndex {
    /// Runs the generator over `input_dir`, writing into `html_dir`.
    pub fn generate(html_dir: &Path, input_dir: &Path, options: &IndexOptions) -> Result<()> {
        let mut command = Command::new("htags");
        command.args(["-g", "-s", "-a", "-n"]);
        if !options.quiet {
            command.arg("-v");
        }
        if options.warnings {
            command.arg("-w");
        }
        if let Some(name) = &options.project_name {
            let mut title = name.clone();
            if let Some(number) = &options.project_number {
                title.push('-');
                title.push_str(number);
            }
            command.arg("-t").arg(title);
        }
        command.arg(html_dir);
        command.current_dir(input_dir);

        info!(?html_dir, "running hypertext index generator");
        let status = command
            .status()
            .context("problems running htags, check your installation")?;
        if !status.success() {
            bail!("htags exited with {status}");
        }
        Ok(())
    }

    /// Loads the `HTML/FILEMAP` table produced by a previous run.
    pub fn load(html_dir: &Path, input_dir: &Path) -> Result<Self> {
        let filemap = html_dir.join("HTML").join("FILEMAP");
        let text = fs::read_to_string(&filemap)
            .with_context(|| format!("cannot open {}", filemap.display()))?;

        let mut map = HashMap::new();
        for line in text.lines() {
            let Some((key, value)) = line.split_once('\t') else {
                continue;
            };
            let key = key.trim();
            let mut value = value.trim();
            // URLs in FILEMAP carry an .html suffix we do not want.
            if let Some(dot) = value.rfind('.') {
                value = &value[..dot];
            }
            map.insert(key.to_string(), value.to_string());
        }
        debug!(entries = map.len(), "loaded hypertext filemap");

        Ok(Self {
            input_dir: input_dir.to_path_buf(),
            map,
        })
    }

    /// Converts a source path into its URL in the generated hypertext,
    /// or `None` when the path is not part of the indexed input.
    pub fn path_to_url(&self, path: &str) -> Option<String> {
        let prefix = self.input_dir.to_string_lossy();
        let name = path
            .strip_prefix(prefix.as_ref())
            .map(|rest| rest.trim_start_matches('/'))
            .unwrap_or(path);
        if name.is_empty() {
            return None;
        }
        self.map.get(name).map(|href| format!("HTML/{href}"))
    }
}

impl LinkResolver for HypertextIndex {
    fn resolve(&self, key: &str) -> Option<Resolution> {
        self.path_to_url(key).map(|url| Resolution::External { url })
    }
}
