//! The tree renderer and its overwrite pre-pass.
//! Walks a template directory recursively, renders every entry name
//! against the render context, and either copies bytes, renders `.tmpl`
//! content, preserves marked subtrees verbatim, or prunes entries whose
//! rendered name comes out empty. The checking walk mirrors the rendering
//! walk without writing anything.

use crate::error::{Error, Result};
use crate::renderer::TemplateRenderer;
use log::debug;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Marker file flagging a directory as preserve-verbatim.
pub const PRESERVE_FILE: &str = ".protopreserve";

/// Suffix marking a file's content as templated; stripped from the
/// output name.
pub const TEMPLATE_SUFFIX: &str = ".tmpl";

/// Resolves a rendered entry name to its target name, reporting whether
/// the content must be template-rendered.
///
/// A bare `.tmpl` name (empty stem) is treated as a regular file.
pub fn resolve_target_name(rendered_name: &str) -> (&str, bool) {
    match rendered_name.strip_suffix(TEMPLATE_SUFFIX) {
        Some(stripped) if !stripped.is_empty() => (stripped, true),
        _ => (rendered_name, false),
    }
}

/// Renders a template tree into a target tree.
///
/// Both the overwrite check and the write pass share one traversal shape;
/// the only mutated state is the target tree, and only during [`render`].
///
/// [`render`]: Processor::render
pub struct Processor<'a> {
    engine: &'a dyn TemplateRenderer,
    context: &'a serde_json::Value,
    ignored: &'a HashSet<PathBuf>,
}

impl<'a> Processor<'a> {
    pub fn new(
        engine: &'a dyn TemplateRenderer,
        context: &'a serde_json::Value,
        ignored: &'a HashSet<PathBuf>,
    ) -> Self {
        Self { engine, context, ignored }
    }

    /// Side-effect-free pre-pass: fails with [`Error::OverwriteError`] on
    /// the first pre-existing file the render would collide with.
    ///
    /// When a target parent directory does not exist yet, checking stops
    /// along that branch and defers to render time. This conservative
    /// shortcut is long-standing observable behavior; templates rely on
    /// it, so it stays.
    pub fn check(&self, template_dir: &Path, target_dir: &Path) -> Result<()> {
        for child in read_children(template_dir)? {
            if self.ignored.contains(&child) {
                continue;
            }

            let name = self.render_name(&child)?;
            if name.is_empty() {
                continue;
            }

            let target_child = target_dir.join(&name);
            if !parent_exists(&target_child) {
                return Ok(());
            }

            if child.is_dir() {
                // Preserve-verbatim subtrees are always safe to skip here.
                if !child.join(PRESERVE_FILE).exists() {
                    self.check(&child, &target_child)?;
                }
            } else {
                let (target_name, _) = resolve_target_name(&name);
                let target_file = target_dir.join(target_name);
                if target_file.exists() {
                    return Err(Error::OverwriteError {
                        target: target_file.display().to_string(),
                    });
                }
            }
        }

        Ok(())
    }

    /// The write pass: materializes the template into the target tree.
    pub fn render(&self, template_dir: &Path, target_dir: &Path) -> Result<()> {
        for child in read_children(template_dir)? {
            if self.ignored.contains(&child) {
                debug!("Skipping ignored entry '{}'", child.display());
                continue;
            }

            let name = self.render_name(&child)?;
            if name.is_empty() {
                debug!("Skipping '{}': name rendered empty", child.display());
                continue;
            }

            let target_child = target_dir.join(&name);
            if let Some(parent) = target_child.parent() {
                if !parent.exists() {
                    fs::create_dir_all(parent).map_err(Error::IoError)?;
                }
            }

            if child.is_dir() {
                if child.join(PRESERVE_FILE).exists() {
                    debug!("Preserving subtree '{}' verbatim", child.display());
                    copy_tree(&child, &target_child)?;
                    continue;
                }
                fs::create_dir_all(&target_child).map_err(Error::IoError)?;
                self.render(&child, &target_child)?;
            } else {
                let (target_name, is_template) = resolve_target_name(&name);
                let target_file = target_dir.join(target_name);
                if is_template {
                    debug!("Writing file '{}'", target_file.display());
                    let content = fs::read_to_string(&child).map_err(Error::IoError)?;
                    let rendered = self.engine.render(&content, self.context)?;
                    fs::write(&target_file, rendered).map_err(Error::IoError)?;
                } else {
                    debug!("Copying file '{}'", target_file.display());
                    fs::copy(&child, &target_file).map(|_| ()).map_err(Error::IoError)?;
                }
            }
        }

        Ok(())
    }

    fn render_name(&self, child: &Path) -> Result<String> {
        let raw_name = child
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.engine.render(&raw_name, self.context)
    }
}

fn read_children(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut children = Vec::new();
    for entry in dir.read_dir().map_err(Error::IoError)? {
        children.push(entry.map_err(Error::IoError)?.path());
    }
    Ok(children)
}

fn parent_exists(path: &Path) -> bool {
    path.parent().map(Path::exists).unwrap_or(true)
}

/// Copies a subtree byte-for-byte, no templating, marker file included.
fn copy_tree(source: &Path, target: &Path) -> Result<()> {
    for entry in WalkDir::new(source) {
        let entry = entry.map_err(|e| Error::IoError(e.into()))?;
        let relative = entry
            .path()
            .strip_prefix(source)
            .expect("walked entries live under their root");
        let destination = target.join(relative);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&destination).map_err(Error::IoError)?;
        } else {
            if let Some(parent) = destination.parent() {
                fs::create_dir_all(parent).map_err(Error::IoError)?;
            }
            fs::copy(entry.path(), &destination).map_err(Error::IoError)?;
        }
    }
    Ok(())
}
