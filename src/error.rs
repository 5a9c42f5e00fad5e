//! Error handling for the protor application.
//! Defines the failure kinds a render can surface and the result alias
//! used throughout the crate.

use std::io;
use thiserror::Error;

/// All failure kinds produced by protor.
///
/// Each phase of a render reports through its own variant so callers can
/// tell a script failure apart from an overwrite collision or a plain
/// filesystem error.
#[derive(Error, Debug)]
pub enum Error {
    /// Filesystem failures while reading templates or writing output.
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    /// Template rendering failures from the MiniJinja engine.
    #[error("Template error: {0}")]
    MinijinjaError(#[from] minijinja::Error),

    /// The template source descriptor could not be resolved.
    #[error("Template source does not exist: '{template_source}'")]
    TemplateSourceError { template_source: String },

    /// Repository clone failures while acquiring a template.
    #[error("Git error: {0}")]
    Git2Error(#[from] git2::Error),

    /// Archive extraction failures while acquiring a template.
    #[error("Archive error: {0}")]
    ZipError(#[from] zip::result::ZipError),

    /// Download failures while acquiring a remote template archive.
    #[error("Download error: {0}")]
    DownloadError(#[from] reqwest::Error),

    /// A malformed glob pattern inside an ignore-list file.
    #[error("Invalid pattern in '{ignore_file}': {cause}")]
    IgnoreError { ignore_file: String, cause: globset::Error },

    /// Any failure while evaluating the template script, carrying the
    /// script's path and the underlying cause.
    #[error("Error while evaluating '{script}': {cause}")]
    ScriptError { script: String, #[source] cause: Box<Error> },

    /// The template script document could not be parsed.
    #[error("Invalid script format: {0}")]
    ScriptFormatError(String),

    /// A pre-existing file would be overwritten by the render.
    #[error("File already exists: '{target}'")]
    OverwriteError { target: String },

    /// Post-generation hook failures.
    #[error("Hook execution error: {0}")]
    HookError(String),

    /// Failures raised by the interactive prompt widgets.
    #[error("Prompt error: {0}")]
    PromptError(#[from] dialoguer::Error),
}

/// Convenience type alias for Results with protor's Error.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
pub fn default_error_handler(err: Error) {
    eprintln!("{err}");
    std::process::exit(1);
}
