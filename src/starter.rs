//! Starter template creation for the `new` command.
//! Materializes a small working example template, embedded at compile
//! time, into a directory so users have a tree to edit instead of
//! starting from scratch.

use crate::error::{Error, Result};
use std::fs;
use std::io;
use std::path::Path;

const STARTER_FILES: &[(&str, &str)] = &[
    ("proto.yaml", include_str!("starter/proto.yaml")),
    (".protoignore", include_str!("starter/protoignore")),
    ("README.md.tmpl", include_str!("starter/README.md.tmpl")),
    (
        "{% if use_docs %}docs{% endif %}/guide.md.tmpl",
        include_str!("starter/guide.md.tmpl"),
    ),
];

/// Writes the starter template into `path`, creating the directory when
/// missing. Existing files with the same names are replaced.
pub fn create_template(path: &Path) -> Result<()> {
    if path.exists() && !path.is_dir() {
        return Err(Error::IoError(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("'{}' is not a directory", path.display()),
        )));
    }
    fs::create_dir_all(path)?;

    for (name, content) in STARTER_FILES {
        let target = path.join(name);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&target, content)?;
    }

    Ok(())
}
