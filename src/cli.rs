//! Command-line interface implementation for protor.
//! Provides argument parsing and help text formatting using clap.

use clap::{error::ErrorKind, CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

/// Command-line arguments structure for protor.
#[derive(Parser, Debug)]
#[command(author, version, about = "protor: fast and flexible project scaffolding tool", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate a directory tree from a template
    Generate {
        /// Path to the template directory or git repository URL
        #[arg(value_name = "TEMPLATE")]
        template: String,

        /// Directory where the generated project will be created
        #[arg(value_name = "OUTPUT_DIR")]
        output_dir: PathBuf,

        /// Allow the generated content to overwrite existing files
        #[arg(short = 'o', long)]
        overwrite: bool,

        /// Template arguments: positional values and key=value pairs
        #[arg(value_name = "TEMPLATE_ARGS", trailing_var_arg = true)]
        template_args: Vec<String>,
    },

    /// Print information about a template
    Man {
        /// Path to the template directory or git repository URL
        #[arg(value_name = "TEMPLATE")]
        template: String,
    },

    /// Create a new template populated with example content
    New {
        /// Directory to create the template in, defaults to the current directory
        #[arg(value_name = "OUT_DIR")]
        out_dir: Option<PathBuf>,
    },
}

/// Parses command line arguments and returns the Args structure.
///
/// # Exits
/// * With status code 1 if required arguments are missing
/// * With clap's default error handling for other argument errors
pub fn get_args() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            if e.kind() == ErrorKind::MissingRequiredArgument {
                Args::command()
                    .help_template(
                        r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#,
                    )
                    .print_help()
                    .unwrap();
                std::process::exit(1);
            } else {
                e.exit();
            }
        }
    }
}
