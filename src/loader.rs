//! Template source acquisition.
//! Resolves a template descriptor to a local directory: local paths are
//! used in place, git URLs are cloned next to the working directory, and
//! zip archives (local files or http downloads) are extracted into a
//! temporary directory. This is the boundary the rendering core sees;
//! further source kinds plug in behind [`TemplateLoader`].

use crate::error::{Error, Result};
use crate::prompt::Prompter;
use log::debug;
use std::fs;
use std::io::Cursor;
use std::path::PathBuf;
use url::Url;

/// Represents the source location of a template.
#[derive(Debug)]
pub enum TemplateSource {
    /// Local filesystem template path
    FileSystem(PathBuf),
    /// Git repository URL (HTTPS or SSH)
    Git(String),
    /// Local zip archive containing the template tree
    Zip(PathBuf),
    /// Remote zip archive downloaded over http(s)
    RemoteZip(String),
}

impl std::fmt::Display for TemplateSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TemplateSource::FileSystem(path) => {
                write!(f, "local path: '{}'", path.display())
            }
            TemplateSource::Git(repo) => write!(f, "git repository: '{repo}'"),
            TemplateSource::Zip(path) => write!(f, "zip archive: '{}'", path.display()),
            TemplateSource::RemoteZip(url) => write!(f, "remote zip archive: '{url}'"),
        }
    }
}

impl TemplateSource {
    /// Creates a TemplateSource from a string path or URL.
    ///
    /// A `.zip` suffix marks an archive; http(s) URLs with it are
    /// downloaded, any other https/git/ssh URL is treated as a git
    /// repository. Everything else is a local path, an archive when it
    /// ends in `.zip`.
    pub fn from_string(s: &str) -> Option<Self> {
        // First try to parse as URL
        if let Ok(url) = Url::parse(s) {
            let scheme = url.scheme();
            if (scheme == "http" || scheme == "https") && s.ends_with(".zip") {
                return Some(Self::RemoteZip(s.to_string()));
            }
            if scheme == "https" || scheme == "git" || scheme == "ssh" {
                return Some(Self::Git(s.to_string()));
            }
        }

        // Check for SSH git URL format
        if s.starts_with("git@") {
            return Some(Self::Git(s.to_string()));
        }

        let path = PathBuf::from(s);
        if path.extension().is_some_and(|ext| ext == "zip") {
            return Some(Self::Zip(path));
        }

        Some(Self::FileSystem(path))
    }
}

/// Trait for loading templates from different sources.
pub trait TemplateLoader {
    /// Resolves the source to a readable template directory.
    fn load(&self) -> Result<PathBuf>;
}

/// Loader for templates from the local filesystem.
pub struct LocalLoader<P: AsRef<std::path::Path>> {
    path: P,
}

impl<P: AsRef<std::path::Path>> LocalLoader<P> {
    pub fn new(path: P) -> Self {
        Self { path }
    }
}

impl<P: AsRef<std::path::Path>> TemplateLoader for LocalLoader<P> {
    fn load(&self) -> Result<PathBuf> {
        let path = self.path.as_ref();
        if !path.exists() {
            return Err(Error::TemplateSourceError {
                template_source: path.display().to_string(),
            });
        }

        Ok(path.to_path_buf())
    }
}

/// Loader for templates from git repositories.
pub struct GitLoader<'a, S: AsRef<str>> {
    prompt: &'a dyn Prompter,
    repo: S,
}

impl<'a, S: AsRef<str>> GitLoader<'a, S> {
    pub fn new(prompt: &'a dyn Prompter, repo: S) -> Self {
        Self { prompt, repo }
    }
}

impl<S: AsRef<str>> TemplateLoader for GitLoader<'_, S> {
    fn load(&self) -> Result<PathBuf> {
        let repo_url = self.repo.as_ref();

        debug!("Cloning repository '{repo_url}'.");

        let repo_name =
            repo_url.split('/').next_back().unwrap_or("template").trim_end_matches(".git");
        let clone_path = PathBuf::from(repo_name);

        if clone_path.exists() {
            let replace = self.prompt.confirm(
                &format!("Directory '{repo_name}' already exists. Replace it?"),
                false,
            )?;
            if replace {
                fs::remove_dir_all(&clone_path).map_err(Error::IoError)?;
            } else {
                debug!("Using existing directory '{}'.", clone_path.display());
                return Ok(clone_path);
            }
        }

        debug!("Cloning to '{}'.", clone_path.display());

        // Set up authentication callbacks
        let mut callbacks = git2::RemoteCallbacks::new();
        callbacks.credentials(|_url, username_from_url, _allowed_types| {
            git2::Cred::ssh_key(
                username_from_url.unwrap_or("git"),
                None,
                std::path::Path::new(&format!(
                    "{}/.ssh/id_rsa",
                    std::env::var("HOME").unwrap_or_default()
                )),
                None,
            )
        });

        let mut fetch_opts = git2::FetchOptions::new();
        fetch_opts.remote_callbacks(callbacks);

        let mut builder = git2::build::RepoBuilder::new();
        builder.fetch_options(fetch_opts);

        match builder.clone(repo_url, &clone_path) {
            Ok(_) => Ok(clone_path),
            Err(e) => Err(Error::Git2Error(e)),
        }
    }
}

/// Loader for templates packed into a local zip archive.
///
/// The archive is extracted into a fresh temporary directory, which is
/// kept alive past the loader since the render reads from it afterwards.
pub struct ZipLoader<P: AsRef<std::path::Path>> {
    archive: P,
}

impl<P: AsRef<std::path::Path>> ZipLoader<P> {
    pub fn new(archive: P) -> Self {
        Self { archive }
    }
}

impl<P: AsRef<std::path::Path>> TemplateLoader for ZipLoader<P> {
    fn load(&self) -> Result<PathBuf> {
        let archive = self.archive.as_ref();
        if !archive.exists() {
            return Err(Error::TemplateSourceError {
                template_source: archive.display().to_string(),
            });
        }

        debug!("Extracting archive '{}'.", archive.display());
        let file = fs::File::open(archive).map_err(Error::IoError)?;
        extract_zip(file)
    }
}

/// Loader for templates packed into a zip archive behind an http(s) URL.
pub struct RemoteZipLoader<S: AsRef<str>> {
    url: S,
}

impl<S: AsRef<str>> RemoteZipLoader<S> {
    pub fn new(url: S) -> Self {
        Self { url }
    }
}

impl<S: AsRef<str>> TemplateLoader for RemoteZipLoader<S> {
    fn load(&self) -> Result<PathBuf> {
        let url = self.url.as_ref();

        debug!("Downloading archive '{url}'.");
        let response = reqwest::blocking::get(url)?.error_for_status()?;
        let body = response.bytes()?;

        extract_zip(Cursor::new(body))
    }
}

fn extract_zip<R: std::io::Read + std::io::Seek>(reader: R) -> Result<PathBuf> {
    let mut archive = zip::ZipArchive::new(reader)?;
    let temp_dir = tempfile::TempDir::new().map_err(Error::IoError)?;
    archive.extract(temp_dir.path())?;

    debug!("Extracted template to '{}'.", temp_dir.path().display());
    Ok(temp_dir.keep())
}

/// Returns the template directory for the given descriptor.
pub fn load_template<S: Into<String>>(prompt: &dyn Prompter, template: S) -> Result<PathBuf> {
    let template: String = template.into();
    let template_source = TemplateSource::from_string(&template).ok_or_else(|| {
        Error::TemplateSourceError { template_source: template.clone() }
    })?;

    debug!("Using template from the {template_source}");

    let loader: Box<dyn TemplateLoader> = match template_source {
        TemplateSource::Git(repo) => Box::new(GitLoader::new(prompt, repo)),
        TemplateSource::FileSystem(path) => Box::new(LocalLoader::new(path)),
        TemplateSource::Zip(path) => Box::new(ZipLoader::new(path)),
        TemplateSource::RemoteZip(url) => Box::new(RemoteZipLoader::new(url)),
    };

    loader.load()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_source_from_string() {
        match TemplateSource::from_string("https://github.com/user/repo.git") {
            Some(TemplateSource::Git(url)) => {
                assert_eq!(url, "https://github.com/user/repo.git")
            }
            _ => panic!("Expected Git source"),
        }

        match TemplateSource::from_string("git@github.com:user/repo.git") {
            Some(TemplateSource::Git(url)) => {
                assert_eq!(url, "git@github.com:user/repo.git")
            }
            _ => panic!("Expected Git source"),
        }

        match TemplateSource::from_string("./local/path") {
            Some(TemplateSource::FileSystem(path)) => {
                assert_eq!(path, PathBuf::from("./local/path"))
            }
            _ => panic!("Expected FileSystem source"),
        }

        match TemplateSource::from_string("./templates/starter.zip") {
            Some(TemplateSource::Zip(path)) => {
                assert_eq!(path, PathBuf::from("./templates/starter.zip"))
            }
            _ => panic!("Expected Zip source"),
        }

        match TemplateSource::from_string("https://example.com/starter.zip") {
            Some(TemplateSource::RemoteZip(url)) => {
                assert_eq!(url, "https://example.com/starter.zip")
            }
            _ => panic!("Expected RemoteZip source"),
        }
    }

    #[test]
    fn test_zip_loader_extracts_archive() {
        use std::io::Write;

        let dir = tempfile::tempdir().unwrap();
        let archive_path = dir.path().join("template.zip");

        let file = fs::File::create(&archive_path).unwrap();
        let mut writer = zip::ZipWriter::new(file);
        let options = zip::write::FileOptions::default();
        writer.start_file("proto.yaml", options).unwrap();
        writer.write_all(b"steps: []\n").unwrap();
        writer.add_directory("src", options).unwrap();
        writer.start_file("src/hello.txt", options).unwrap();
        writer.write_all(b"hello\n").unwrap();
        writer.finish().unwrap();

        let extracted = ZipLoader::new(&archive_path).load().unwrap();
        assert_eq!(
            fs::read_to_string(extracted.join("proto.yaml")).unwrap(),
            "steps: []\n"
        );
        assert_eq!(
            fs::read_to_string(extracted.join("src/hello.txt")).unwrap(),
            "hello\n"
        );

        fs::remove_dir_all(extracted).unwrap();
    }

    #[test]
    fn test_zip_loader_missing_archive() {
        let result = ZipLoader::new("does-not-exist.zip").load();
        assert!(matches!(
            result,
            Err(crate::error::Error::TemplateSourceError { .. })
        ));
    }

    #[test]
    fn test_template_source_display() {
        let fs_source = TemplateSource::FileSystem(PathBuf::from("/path/to/template"));
        assert_eq!(format!("{fs_source}"), "local path: '/path/to/template'");

        let git_source = TemplateSource::Git("git@github.com:user/repo".to_string());
        assert_eq!(
            format!("{git_source}"),
            "git repository: 'git@github.com:user/repo'"
        );
    }
}
