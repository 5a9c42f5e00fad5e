//! Post-generation hook execution.
//! A script's `post_generation` command runs in the freshly generated
//! target directory, strictly after every file has been written. The
//! render context is piped to its stdin as JSON so external scripts can
//! read the resolved answers.

use crate::error::{Error, Result};
use log::debug;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

/// Runs the post-generation command, failing with [`Error::HookError`] on
/// a non-zero exit. Already-written output is never rolled back.
pub fn run_post_generation(
    target_dir: &Path,
    command: &str,
    context: &serde_json::Value,
) -> Result<()> {
    debug!("Running post-generation hook: {command}");

    let mut child = Command::new("sh")
        .arg("-c")
        .arg(command)
        .current_dir(target_dir)
        .stdin(Stdio::piped())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .map_err(Error::IoError)?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(context.to_string().as_bytes()).map_err(Error::IoError)?;
    }

    let status = child.wait().map_err(Error::IoError)?;
    if !status.success() {
        return Err(Error::HookError(format!(
            "post-generation hook failed with status: {status}"
        )));
    }

    Ok(())
}
