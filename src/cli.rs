use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// SQL Doc Lint - Check SQL examples, template markers and links in docs
#[derive(Parser, Debug)]
#[command(name = "sql-doc-lint")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Debug logging and fix suggestions under findings
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Lint a documentation tree or a single file
    Check {
        /// Directory, Markdown file or SQL file
        root: PathBuf,

        /// Treat warnings as errors for the exit code
        #[arg(long)]
        strict: bool,

        /// Output format
        #[arg(
            short = 'f',
            long,
            value_enum,
            default_value = "text",
            env = "SQL_DOC_LINT_FORMAT"
        )]
        output_format: Format,

        /// Configuration file, applied after the default locations
        #[arg(short, long, env = "SQL_DOC_LINT_CONFIG")]
        config: Option<PathBuf>,

        /// Disable colored output
        #[arg(long)]
        no_color: bool
    },

    /// List the anchors a Markdown document defines
    Anchors {
        /// Markdown file
        file: PathBuf,

        /// Print as JSON
        #[arg(long)]
        json: bool
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Format {
    Text,
    Json,
    Yaml,
    Sarif
}
