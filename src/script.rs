//! Template script loading for protor.
//! A template may carry a `proto.yaml` (or `proto.yml` / `proto.json`)
//! describing, in order, the questions to resolve before rendering, plus
//! an optional post-generation command. The file is data, never code; the
//! sandbox walks its steps sequentially, exactly once.

use crate::error::{Error, Result};
use cruet::Inflector;
use indexmap::IndexMap;
use log::debug;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Supported script file names, tried in order.
pub const SCRIPT_FILES: [&str; 3] = ["proto.yaml", "proto.yml", "proto.json"];

/// Bindings whose names start with this prefix are kept out of the
/// render context.
pub const PRIVATE_PREFIX: &str = "_";

/// A parsed template script.
#[derive(Debug, Default, Deserialize)]
pub struct Script {
    /// Free-text description, surfaced by the doc generator.
    #[serde(default)]
    pub description: Option<String>,

    /// Ordered steps, executed top to bottom in a single pass.
    #[serde(default, with = "serde_yaml::with::singleton_map_recursive")]
    pub steps: Vec<Step>,

    /// Shell command executed in the target directory after all files
    /// have been written.
    #[serde(default)]
    pub post_generation: Option<String>,
}

/// One top-level statement of a template script.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// Display a message to the user.
    Say(String),
    /// Ask the user for a string value.
    Ask(AskStep),
    /// Ask the user for a yes/no confirmation.
    Confirm(ConfirmStep),
    /// Read a value from the supplied arguments without prompting.
    Arg(ArgStep),
    /// Bind plain values; string values are rendered against the
    /// namespace accumulated so far.
    Set(IndexMap<String, serde_json::Value>),
}

#[derive(Debug, Default, Deserialize)]
pub struct AskStep {
    pub name: String,
    pub prompt: Option<String>,
    pub doc: Option<String>,
    pub default: Option<serde_json::Value>,
    #[serde(default)]
    pub choices: Vec<String>,
    #[serde(default)]
    pub autocomplete: Vec<String>,
    #[serde(default)]
    pub secret: bool,
    pub positional_arg: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ConfirmStep {
    pub name: String,
    pub prompt: Option<String>,
    pub doc: Option<String>,
    pub default: Option<bool>,
    pub positional_arg: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ArgStep {
    pub name: String,
    pub doc: Option<String>,
    pub default: Option<String>,
    pub positional_arg: Option<usize>,
}

impl AskStep {
    /// The prompt shown to the user: explicit `doc` or `prompt`, else the
    /// title-cased argument name.
    pub fn prompt_text(&self) -> String {
        prompt_or_title(self.doc.as_deref(), self.prompt.as_deref(), &self.name)
    }
}

impl ConfirmStep {
    pub fn prompt_text(&self) -> String {
        prompt_or_title(self.doc.as_deref(), self.prompt.as_deref(), &self.name)
    }
}

/// Derives a human prompt from an argument name ("use_git" -> "Use Git")
/// unless an explicit one was given.
pub fn prompt_or_title(doc: Option<&str>, prompt: Option<&str>, name: &str) -> String {
    doc.or(prompt).map(str::to_string).unwrap_or_else(|| name.to_title_case())
}

/// Returns the path of the template's script file, if it carries one.
pub fn find_script_file(template_dir: &Path) -> Option<PathBuf> {
    for file in SCRIPT_FILES {
        let script_path = template_dir.join(file);
        if script_path.is_file() {
            return Some(script_path);
        }
    }
    None
}

/// Loads and parses the template's script.
///
/// A template without a script is valid: rendering proceeds with the
/// caller-supplied context only, so this returns an empty [`Script`].
pub fn load_script(template_dir: &Path) -> Result<(Option<PathBuf>, Script)> {
    match find_script_file(template_dir) {
        Some(script_path) => {
            debug!("Loading script from '{}'", script_path.display());
            let content = std::fs::read_to_string(&script_path).map_err(Error::IoError)?;
            let script = parse_script(&content).map_err(|e| Error::ScriptError {
                script: script_path.display().to_string(),
                cause: Box::new(e),
            })?;
            Ok((Some(script_path), script))
        }
        None => {
            debug!("Template has no script file");
            Ok((None, Script::default()))
        }
    }
}

/// Parses script content, trying JSON first and falling back to YAML.
pub fn parse_script(content: &str) -> Result<Script> {
    match serde_json::from_str(content) {
        Ok(script) => Ok(script),
        Err(_) => serde_yaml::from_str(content)
            .map_err(|e| Error::ScriptFormatError(e.to_string())),
    }
}
