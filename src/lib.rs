//! Protor is a template processing system for project scaffolding.
//! Given a template directory (plus an optional script describing its
//! variables) it renders a fully substituted copy into a target tree,
//! resolving variables from command-line arguments or interactive
//! prompts.

/// Positional and named template arguments supplied by the caller
pub mod args;

/// Command-line interface module for the protor application
pub mod cli;

/// Static documentation generated from a template script
pub mod doc;

/// The render engine: entry points tying the pipeline together
pub mod engine;

/// Error types and handling for the protor application
pub mod error;

/// Post-generation hook execution
pub mod hooks;

/// File and directory ignore patterns
/// Processes .protoignore files to exclude specific paths
pub mod ignore;

/// Template source acquisition (local paths and git repositories)
pub mod loader;

/// Tree rendering and the overwrite pre-pass
pub mod processor;

/// User input and interaction handling
pub mod prompt;

/// Template string rendering through MiniJinja
pub mod renderer;

/// Script execution in an isolated namespace
pub mod sandbox;

/// Embedded starter template for the `new` command
pub mod starter;

/// Template script model and loading
/// Supports proto.yaml, proto.yml and proto.json
pub mod script;
