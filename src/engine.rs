//! The render engine: one explicit value tying the renderer, the prompt
//! provider and the pipeline phases together. Constructed once per
//! process and handed to whichever command needs it; there is no hidden
//! process-wide state.

use crate::args::ArgumentBag;
use crate::doc;
use crate::error::{Error, Result};
use crate::hooks::run_post_generation;
use crate::ignore::load_ignore_set;
use crate::processor::Processor;
use crate::prompt::{Interactor, Prompter};
use crate::renderer::TemplateRenderer;
use crate::sandbox;
use crate::script::load_script;
use std::fs;
use std::path::{Path, PathBuf};

pub struct Engine<'a> {
    renderer: &'a dyn TemplateRenderer,
    prompter: &'a dyn Prompter,
}

impl<'a> Engine<'a> {
    pub fn new(renderer: &'a dyn TemplateRenderer, prompter: &'a dyn Prompter) -> Self {
        Self { renderer, prompter }
    }

    /// Renders the template at `template_dir` into `target_dir`.
    ///
    /// Phases run strictly in order: ignore rules, script execution,
    /// overwrite pre-pass (skipped entirely when `allow_overwrite`),
    /// write pass, post-generation hook. A failure before the write pass
    /// leaves the target untouched; the write pass itself is not
    /// transactional, and a post-generation failure never rolls back
    /// already-written files.
    pub fn render(
        &self,
        template_dir: &Path,
        target_dir: &Path,
        bag: &ArgumentBag,
        extra_context: &serde_json::Map<String, serde_json::Value>,
        allow_overwrite: bool,
    ) -> Result<()> {
        let template_dir = fs::canonicalize(template_dir).map_err(|_| {
            Error::TemplateSourceError { template_source: template_dir.display().to_string() }
        })?;
        fs::create_dir_all(target_dir).map_err(Error::IoError)?;
        let target_dir = fs::canonicalize(target_dir).map_err(Error::IoError)?;

        let ignored = load_ignore_set(&template_dir)?;

        let (script_path, script) = load_script(&template_dir)?;
        let interactor = Interactor::new(bag, self.prompter);
        let context =
            match sandbox::execute(&script, &interactor, self.renderer, extra_context, bag) {
                Ok(bindings) => serde_json::Value::Object(bindings),
                Err(cause) => {
                    return Err(match script_path {
                        Some(path) => Error::ScriptError {
                            script: path.display().to_string(),
                            cause: Box::new(cause),
                        },
                        None => cause,
                    })
                }
            };

        let processor = Processor::new(self.renderer, &context, &ignored);
        if !allow_overwrite {
            processor.check(&template_dir, &target_dir)?;
        }
        processor.render(&template_dir, &target_dir)?;

        if let Some(command) = &script.post_generation {
            run_post_generation(&target_dir, command, &context)?;
        }

        Ok(())
    }

    /// Generates the manual for the script at `script_path` without
    /// executing it. The display name defaults to the script's containing
    /// directory.
    pub fn render_doc(
        &self,
        script_path: &Path,
        display_name: Option<&str>,
        command_prefix: &str,
    ) -> Result<String> {
        let source = fs::read_to_string(script_path).map_err(Error::IoError)?;
        let display_name = display_name.map(str::to_string).unwrap_or_else(|| {
            script_path.parent().unwrap_or(Path::new("")).display().to_string()
        });
        doc::generate(&source, &display_name, command_prefix)
    }
}

/// Resolves a template directory to its script file for doc generation.
pub fn script_path_for_doc(template_dir: &Path) -> Result<PathBuf> {
    crate::script::find_script_file(template_dir).ok_or_else(|| {
        Error::IoError(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("no script file found in '{}'", template_dir.display()),
        ))
    })
}
