//! Ignore-rule handling for protor templates.
//! Every directory of a template may carry a `.protoignore` file whose
//! glob patterns, resolved relative to that directory, exclude matching
//! paths from rendering. Parent and child ignore lists both apply.

use crate::error::{Error, Result};
use crate::script::SCRIPT_FILES;
use globset::{Glob, GlobSetBuilder};
use log::debug;
use std::collections::HashSet;
use std::fs::read_to_string;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Protor's per-directory ignore file name.
pub const IGNORE_FILE: &str = ".protoignore";

/// Builds the exclusion set for one render: every absolute path matched by
/// an ignore-list pattern, plus the reserved system paths (the template
/// script and the root `.git` directory).
///
/// Ignore files are discovered recursively; a missing `.protoignore`
/// contributes nothing. A malformed pattern surfaces as an
/// [`Error::IgnoreError`] naming the offending ignore file.
pub fn load_ignore_set(template_root: &Path) -> Result<HashSet<PathBuf>> {
    let mut ignored = HashSet::new();

    for script_file in SCRIPT_FILES {
        ignored.insert(template_root.join(script_file));
    }
    ignored.insert(template_root.join(".git"));

    collect_ignored(template_root, &mut ignored)?;
    Ok(ignored)
}

fn collect_ignored(dir: &Path, ignored: &mut HashSet<PathBuf>) -> Result<()> {
    let ignore_file = dir.join(IGNORE_FILE);
    if ignore_file.exists() {
        let matcher = build_matcher(&ignore_file)?;
        for entry in WalkDir::new(dir).min_depth(1) {
            let entry = entry.map_err(|e| Error::IoError(e.into()))?;
            let relative = entry
                .path()
                .strip_prefix(dir)
                .expect("walked entries live under their root");
            if matcher.is_match(relative) {
                debug!("Ignoring '{}'", entry.path().display());
                ignored.insert(entry.path().to_path_buf());
            }
        }
    }

    for entry in dir.read_dir().map_err(Error::IoError)? {
        let entry = entry.map_err(Error::IoError)?;
        let path = entry.path();
        if path.is_dir() {
            collect_ignored(&path, ignored)?;
        }
    }

    Ok(())
}

fn build_matcher(ignore_file: &Path) -> Result<globset::GlobSet> {
    let as_ignore_error = |cause: globset::Error| Error::IgnoreError {
        ignore_file: ignore_file.display().to_string(),
        cause,
    };

    let mut builder = GlobSetBuilder::new();
    let contents = read_to_string(ignore_file).map_err(Error::IoError)?;
    for line in contents.lines() {
        if line.trim().is_empty() {
            continue;
        }
        builder.add(Glob::new(line).map_err(as_ignore_error)?);
    }
    builder.build().map_err(as_ignore_error)
}
